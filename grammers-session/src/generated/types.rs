// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Bare types behind the `enums` variants used to persist a session to
//! disk. This is a small, local schema (it never goes over the wire to
//! Telegram), hand-written the same way `grammers-tl-types` hand-writes
//! the schema it actually needs to speak MTProto with.
//!
//! `dataCenter flags:# id:int ipv4:flags.0?int ipv6:flags.1?int128
//! port:int auth:flags.2?bytes = DataCenter;`
//! `dataCenterWs flags:# id:int url:string auth:flags.0?bytes = DataCenter;`
//! `session dcs:Vector<DataCenter> = Session;`

use grammers_tl_types::errors::DeserializeError;
use grammers_tl_types::{Cursor, Deserializable, Identifiable, Serializable};
use std::io::{Result as IoResult, Write};

use super::enums;

type Buffer<'a, 'b> = &'a mut Cursor<'b>;
type DResult<T> = Result<T, DeserializeError>;

macro_rules! impl_identifiable {
    ($ty:ty, $id:expr) => {
        impl Identifiable for $ty {
            #[allow(clippy::unreadable_literal)]
            const CONSTRUCTOR_ID: u32 = $id;
        }
    };
}

fn expect_id(buf: Buffer, id: u32) -> DResult<()> {
    let got = u32::deserialize(buf)?;
    if got != id {
        return Err(DeserializeError::UnexpectedConstructor { id: got });
    }
    Ok(())
}

/// A `static` TCP datacenter, reached by a plain IPv4 or IPv6 address.
#[derive(Debug, Clone, PartialEq)]
pub struct DataCenter {
    pub id: i32,
    pub ipv4: Option<i32>,
    pub ipv6: Option<[u8; 16]>,
    pub port: i32,
    pub auth: Option<Vec<u8>>,
}

impl_identifiable!(DataCenter, 0x5a1e9f02);

impl DataCenter {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        let flags = i32::deserialize(buf)?;
        let id = i32::deserialize(buf)?;
        let ipv4 = if flags & 1 != 0 {
            Some(i32::deserialize(buf)?)
        } else {
            None
        };
        let ipv6 = if flags & 2 != 0 {
            Some(<[u8; 16]>::deserialize(buf)?)
        } else {
            None
        };
        let port = i32::deserialize(buf)?;
        let auth = if flags & 4 != 0 {
            Some(Vec::<u8>::deserialize(buf)?)
        } else {
            None
        };
        Ok(Self {
            id,
            ipv4,
            ipv6,
            port,
            auth,
        })
    }
}

impl Serializable for DataCenter {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        let mut flags = 0i32;
        if self.ipv4.is_some() {
            flags |= 1;
        }
        if self.ipv6.is_some() {
            flags |= 2;
        }
        if self.auth.is_some() {
            flags |= 4;
        }
        flags.serialize(buf)?;
        self.id.serialize(buf)?;
        if let Some(ipv4) = self.ipv4 {
            ipv4.serialize(buf)?;
        }
        if let Some(ipv6) = self.ipv6 {
            ipv6.serialize(buf)?;
        }
        self.port.serialize(buf)?;
        if let Some(auth) = &self.auth {
            auth.serialize(buf)?;
        }
        Ok(())
    }
}

impl Deserializable for DataCenter {
    fn deserialize(buf: Buffer) -> DResult<Self> {
        expect_id(buf, Self::CONSTRUCTOR_ID)?;
        Self::deserialize_fields(buf)
    }
}

impl From<DataCenter> for enums::DataCenter {
    fn from(dc: DataCenter) -> Self {
        enums::DataCenter::Center(dc)
    }
}

/// A datacenter reached over a websocket URL rather than raw TCP.
#[derive(Debug, Clone, PartialEq)]
pub struct DataCenterWs {
    pub id: i32,
    pub url: String,
    pub auth: Option<Vec<u8>>,
}

impl_identifiable!(DataCenterWs, 0x5a1e9f03);

impl DataCenterWs {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        let flags = i32::deserialize(buf)?;
        let id = i32::deserialize(buf)?;
        let url = String::deserialize(buf)?;
        let auth = if flags & 1 != 0 {
            Some(Vec::<u8>::deserialize(buf)?)
        } else {
            None
        };
        Ok(Self { id, url, auth })
    }
}

impl Serializable for DataCenterWs {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        let flags = if self.auth.is_some() { 1i32 } else { 0i32 };
        flags.serialize(buf)?;
        self.id.serialize(buf)?;
        self.url.serialize(buf)?;
        if let Some(auth) = &self.auth {
            auth.serialize(buf)?;
        }
        Ok(())
    }
}

impl Deserializable for DataCenterWs {
    fn deserialize(buf: Buffer) -> DResult<Self> {
        expect_id(buf, Self::CONSTRUCTOR_ID)?;
        Self::deserialize_fields(buf)
    }
}

impl From<DataCenterWs> for enums::DataCenter {
    fn from(dc: DataCenterWs) -> Self {
        enums::DataCenter::Ws(dc)
    }
}

/// The whole persisted session: every datacenter the engine has learned
/// an address and/or authorization key for. This is the top-level value
/// written to the session file.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub dcs: Vec<enums::DataCenter>,
}

impl_identifiable!(Session, 0x5a1e9f07);

impl Session {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        let dcs = Vec::<enums::DataCenter>::deserialize(buf)?;
        Ok(Self { dcs })
    }
}

impl Serializable for Session {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        self.dcs.serialize(buf)
    }
}

impl Deserializable for Session {
    fn deserialize(buf: Buffer) -> DResult<Self> {
        expect_id(buf, Self::CONSTRUCTOR_ID)?;
        Self::deserialize_fields(buf)
    }
}

impl From<Session> for enums::Session {
    fn from(session: Session) -> Self {
        enums::Session::Session(session)
    }
}
