// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Boxed sum types: these read the leading constructor id off the wire
//! and dispatch to whichever `types::` struct it names. Serializing an
//! enum just serializes the inner value, since each variant's own
//! [`Serializable`] impl already writes its constructor id.

use crate::deserializable::{Buffer, Result as DResult};
use crate::errors::DeserializeError;
use crate::types;
use crate::{Deserializable, Serializable};
use std::io::{Result as IoResult, Write};

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
                    $(<$ty as crate::Identifiable>::CONSTRUCTOR_ID => {
                        Ok(Self::$variant(<$ty>::deserialize_fields(buf)?))
                    })+
                    _ => Err(DeserializeError::UnexpectedConstructor { id }),
                }
            }
        }
    };
}

boxed_enum! {
    /// `ResPQ`
    pub enum ResPq {
        Pq(types::ResPq),
    }
}

boxed_enum! {
    /// `Server_DH_Params`
    pub enum ServerDhParams {
        Fail(types::ServerDhParamsFail),
        Ok(types::ServerDhParamsOk),
    }
}

boxed_enum! {
    /// `Set_client_DH_params_answer`
    pub enum SetClientDhParamsAnswer {
        DhGenOk(types::DhGenOk),
        DhGenRetry(types::DhGenRetry),
        DhGenFail(types::DhGenFail),
    }
}

boxed_enum! {
    /// `P_Q_inner_data`
    pub enum PQInnerData {
        Data(types::PQInnerData),
        Dc(types::PQInnerDataDc),
        Temp(types::PQInnerDataTemp),
        TempDc(types::PQInnerDataTempDc),
    }
}

boxed_enum! {
    /// `Server_DH_inner_data`
    pub enum ServerDhInnerData {
        Data(types::ServerDhInnerData),
    }
}

boxed_enum! {
    /// `Client_DH_Inner_Data`
    pub enum ClientDhInnerData {
        Data(types::ClientDhInnerData),
    }
}

boxed_enum! {
    /// `BadMsgNotification`
    pub enum BadMsgNotification {
        Notification(types::BadMsgNotification),
        BadServerSalt(types::BadServerSalt),
    }
}

boxed_enum! {
    /// `NewSession`
    pub enum NewSession {
        Created(types::NewSessionCreated),
    }
}

boxed_enum! {
    /// `Pong`
    pub enum Pong {
        Pong(types::Pong),
    }
}

boxed_enum! {
    /// `FutureSalts`
    pub enum FutureSalts {
        Salts(types::FutureSalts),
    }
}

boxed_enum! {
    /// `MsgDetailedInfo`
    pub enum MsgDetailedInfo {
        Info(types::MsgDetailedInfo),
        MsgNewDetailedInfo(types::MsgNewDetailedInfo),
    }
}

boxed_enum! {
    /// `RpcError` (boxed wrapper; the bare `rpc_error` constructor is its only variant)
    pub enum RpcError {
        Error(types::RpcError),
    }
}

boxed_enum! {
    /// `MsgsAck`
    pub enum MsgsAck {
        Ack(types::MsgsAck),
    }
}

boxed_enum! {
    /// `DestroySessionRes`
    pub enum DestroySessionRes {
        Ok(types::DestroySessionOk),
        None(types::DestroySessionNone),
    }
}

boxed_enum! {
    /// `RpcDropAnswer`
    pub enum RpcDropAnswer {
        Unknown(types::RpcAnswerUnknown),
        DroppedRunning(types::RpcAnswerDroppedRunning),
        Dropped(types::RpcAnswerDropped),
    }
}

boxed_enum! {
    /// `InputFileLocation`
    pub enum InputFileLocation {
        Document(types::InputDocumentFileLocation),
        Photo(types::InputPhotoFileLocation),
    }
}

pub mod upload {
    use super::*;
    use crate::types::upload as upload_types;

    boxed_enum! {
        /// `upload.File`
        pub enum File {
            File(upload_types::File),
            CdnRedirect(upload_types::FileCdnRedirect),
        }
    }
}
