// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Boxed sum types for the session's own small persisted schema, in the
//! same style `grammers-tl-types` uses for Telegram's: the leading
//! constructor id picks which bare `types::` struct to read next.

use grammers_tl_types::errors::DeserializeError;
use grammers_tl_types::{Cursor, Deserializable, Serializable};
use std::io::{Result as IoResult, Write};

use super::types;

type Buffer<'a, 'b> = &'a mut Cursor<'b>;
type DResult<T> = Result<T, DeserializeError>;

macro_rules! boxed_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident($ty:path)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $name {
            $($variant($ty)),+
        }

        impl Serializable for $name {
            fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
                match self {
                    $(Self::$variant(x) => x.serialize(buf)),+
                }
            }
        }

        impl Deserializable for $name {
            fn deserialize(buf: Buffer) -> DResult<Self> {
                let id = u32::deserialize(buf)?;
                match id {
                    $(<$ty as grammers_tl_types::Identifiable>::CONSTRUCTOR_ID => {
                        Ok(Self::$variant(<$ty>::deserialize_fields(buf)?))
                    })+
                    _ => Err(DeserializeError::UnexpectedConstructor { id }),
                }
            }
        }
    };
}

boxed_enum! {
    pub enum DataCenter {
        Center(types::DataCenter),
        Ws(types::DataCenterWs),
    }
}

impl DataCenter {
    pub fn id(&self) -> i32 {
        match self {
            Self::Center(dc) => dc.id,
            Self::Ws(dc) => dc.id,
        }
    }
}

boxed_enum! {
    pub enum Session {
        Session(types::Session),
    }
}

impl From<Session> for types::Session {
    fn from(session: Session) -> Self {
        let Session::Session(session) = session;
        session
    }
}
