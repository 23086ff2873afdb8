// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! RPCs the connection engine issues on its own behalf: the handshake,
//! session pings, datacenter config/migration bookkeeping, and file
//! downloads. Anything an application issues through [`RemoteCall`] with
//! its own request type is unaffected by this module.

use crate::{enums, types, Blob, Identifiable, RemoteCall, Serializable};
use std::io::{Result as IoResult, Write};

macro_rules! impl_identifiable {
    ($ty:ty, $id:expr) => {
        impl Identifiable for $ty {
            #[allow(clippy::unreadable_literal)]
            const CONSTRUCTOR_ID: u32 = $id;
        }
    };
}

/// `req_pq_multi#be7e8ef1 nonce:int128 = ResPQ;`
#[derive(Debug, Clone, PartialEq)]
pub struct ReqPqMulti {
    pub nonce: [u8; 16],
}

impl_identifiable!(ReqPqMulti, 0xbe7e8ef1);

impl Serializable for ReqPqMulti {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        self.nonce.serialize(buf)
    }
}

impl RemoteCall for ReqPqMulti {
    type Return = enums::ResPq;
}

/// `req_DH_params#d712e4be nonce:int128 server_nonce:int128 p:string
/// q:string public_key_fingerprint:long encrypted_data:string
/// = Server_DH_Params;`
#[derive(Debug, Clone, PartialEq)]
pub struct ReqDhParams {
    pub nonce: [u8; 16],
    pub server_nonce: [u8; 16],
    pub p: Vec<u8>,
    pub q: Vec<u8>,
    pub public_key_fingerprint: i64,
    pub encrypted_data: Vec<u8>,
}

impl_identifiable!(ReqDhParams, 0xd712e4be);

impl Serializable for ReqDhParams {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        self.nonce.serialize(buf)?;
        self.server_nonce.serialize(buf)?;
        self.p.serialize(buf)?;
        self.q.serialize(buf)?;
        self.public_key_fingerprint.serialize(buf)?;
        self.encrypted_data.serialize(buf)
    }
}

impl RemoteCall for ReqDhParams {
    type Return = enums::ServerDhParams;
}

/// `set_client_DH_params#f5045f1f nonce:int128 server_nonce:int128
/// encrypted_data:string = Set_client_DH_params_answer;`
#[derive(Debug, Clone, PartialEq)]
pub struct SetClientDhParams {
    pub nonce: [u8; 16],
    pub server_nonce: [u8; 16],
    pub encrypted_data: Vec<u8>,
}

impl_identifiable!(SetClientDhParams, 0xf5045f1f);

impl Serializable for SetClientDhParams {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        self.nonce.serialize(buf)?;
        self.server_nonce.serialize(buf)?;
        self.encrypted_data.serialize(buf)
    }
}

impl RemoteCall for SetClientDhParams {
    type Return = enums::SetClientDhParamsAnswer;
}

/// `ping#7abe77ec ping_id:long = Pong;`
#[derive(Debug, Clone, PartialEq)]
pub struct Ping {
    pub ping_id: i64,
}

impl_identifiable!(Ping, 0x7abe77ec);

impl Serializable for Ping {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        self.ping_id.serialize(buf)
    }
}

impl RemoteCall for Ping {
    type Return = types::Pong;
}

/// `ping_delay_disconnect#f3427b8c ping_id:long disconnect_delay:int
/// = Pong;`
#[derive(Debug, Clone, PartialEq)]
pub struct PingDelayDisconnect {
    pub ping_id: i64,
    pub disconnect_delay: i32,
}

impl_identifiable!(PingDelayDisconnect, 0xf3427b8c);

impl Serializable for PingDelayDisconnect {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        self.ping_id.serialize(buf)?;
        self.disconnect_delay.serialize(buf)
    }
}

impl RemoteCall for PingDelayDisconnect {
    type Return = types::Pong;
}

/// `destroy_session#e7512126 session_id:long = DestroySessionRes;`
#[derive(Debug, Clone, PartialEq)]
pub struct DestroySession {
    pub session_id: i64,
}

impl_identifiable!(DestroySession, 0xe7512126);

impl Serializable for DestroySession {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        self.session_id.serialize(buf)
    }
}

impl RemoteCall for DestroySession {
    type Return = enums::DestroySessionRes;
}

/// `get_future_salts#b921bd04 num:int = FutureSalts;`
#[derive(Debug, Clone, PartialEq)]
pub struct GetFutureSalts {
    pub num: i32,
}

impl_identifiable!(GetFutureSalts, 0xb921bd04);

impl Serializable for GetFutureSalts {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        self.num.serialize(buf)
    }
}

impl RemoteCall for GetFutureSalts {
    type Return = enums::FutureSalts;
}

/// `invokeWithLayer#da9b0d0d {X:Type} layer:int query:!X = X;`
#[derive(Debug, Clone, PartialEq)]
pub struct InvokeWithLayer<X> {
    pub layer: i32,
    pub query: X,
}

impl<X> Identifiable for InvokeWithLayer<X> {
    const CONSTRUCTOR_ID: u32 = 0xda9b0d0d;
}

impl<X: Serializable> Serializable for InvokeWithLayer<X> {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        self.layer.serialize(buf)?;
        self.query.serialize(buf)
    }
}

impl<X: RemoteCall> RemoteCall for InvokeWithLayer<X> {
    type Return = X::Return;
}

/// `invokeAfterMsg#cb9f372d {X:Type} msg_id:long query:!X = X;`
#[derive(Debug, Clone, PartialEq)]
pub struct InvokeAfterMsg<X> {
    pub msg_id: i64,
    pub query: X,
}

impl<X> Identifiable for InvokeAfterMsg<X> {
    const CONSTRUCTOR_ID: u32 = 0xcb9f372d;
}

impl<X: Serializable> Serializable for InvokeAfterMsg<X> {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        self.msg_id.serialize(buf)?;
        self.query.serialize(buf)
    }
}

impl<X: RemoteCall> RemoteCall for InvokeAfterMsg<X> {
    type Return = X::Return;
}

/// `initConnection#c1cd5ea9 {X:Type} flags:# api_id:int device_model:string
/// system_version:string app_version:string system_lang_code:string
/// lang_pack:string lang_code:string query:!X = X;`
///
/// `proxy` and `params` (both flag-gated, flags.0 and flags.1) are never
/// sent by this client, so `flags` is always serialized as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct InitConnection<X> {
    pub api_id: i32,
    pub device_model: String,
    pub system_version: String,
    pub app_version: String,
    pub system_lang_code: String,
    pub lang_pack: String,
    pub lang_code: String,
    pub query: X,
}

impl<X> Identifiable for InitConnection<X> {
    const CONSTRUCTOR_ID: u32 = 0xc1cd5ea9;
}

impl<X: Serializable> Serializable for InitConnection<X> {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        0i32.serialize(buf)?;
        self.api_id.serialize(buf)?;
        self.device_model.serialize(buf)?;
        self.system_version.serialize(buf)?;
        self.app_version.serialize(buf)?;
        self.system_lang_code.serialize(buf)?;
        self.lang_pack.serialize(buf)?;
        self.lang_code.serialize(buf)?;
        self.query.serialize(buf)
    }
}

impl<X: RemoteCall> RemoteCall for InitConnection<X> {
    type Return = X::Return;
}

pub mod help {
    use super::*;

    /// `help.getConfig#c4f9186b = Config;`
    #[derive(Debug, Clone, PartialEq)]
    pub struct GetConfig;

    impl_identifiable!(GetConfig, 0xc4f9186b);

    impl Serializable for GetConfig {
        fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
            Self::CONSTRUCTOR_ID.serialize(buf)
        }
    }

    impl RemoteCall for GetConfig {
        type Return = types::Config;
    }
}

pub mod upload {
    use super::*;

    /// `upload.getFile#be5335be flags:# precise:flags.0?true
    /// cdn_supported:flags.1?true location:InputFileLocation offset:long
    /// limit:int = upload.File;`
    #[derive(Debug, Clone, PartialEq)]
    pub struct GetFile {
        pub precise: bool,
        pub cdn_supported: bool,
        pub location: enums::InputFileLocation,
        pub offset: i64,
        pub limit: i32,
    }

    impl_identifiable!(GetFile, 0xbe5335be);

    impl Serializable for GetFile {
        fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
            Self::CONSTRUCTOR_ID.serialize(buf)?;
            let flags = (self.precise as i32) | ((self.cdn_supported as i32) << 1);
            flags.serialize(buf)?;
            self.location.serialize(buf)?;
            self.offset.serialize(buf)?;
            self.limit.serialize(buf)
        }
    }

    impl RemoteCall for GetFile {
        type Return = enums::upload::File;
    }
}

pub mod auth {
    use super::*;

    /// `auth.exportAuthorization#e5bfffcd dc_id:int
    /// = auth.ExportedAuthorization;`
    #[derive(Debug, Clone, PartialEq)]
    pub struct ExportAuthorization {
        pub dc_id: i32,
    }

    impl_identifiable!(ExportAuthorization, 0xe5bfffcd);

    impl Serializable for ExportAuthorization {
        fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
            Self::CONSTRUCTOR_ID.serialize(buf)?;
            self.dc_id.serialize(buf)
        }
    }

    impl RemoteCall for ExportAuthorization {
        type Return = types::auth::ExportedAuthorization;
    }

    /// `auth.importAuthorization#e3ef9613 id:long bytes:bytes
    /// = auth.Authorization;`
    ///
    /// The real return carries full user/2FA state; the engine only
    /// needs to know the call succeeded; the bytes are handed back
    /// unparsed.
    #[derive(Debug, Clone, PartialEq)]
    pub struct ImportAuthorization {
        pub id: i64,
        pub bytes: Vec<u8>,
    }

    impl_identifiable!(ImportAuthorization, 0xe3ef9613);

    impl Serializable for ImportAuthorization {
        fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
            Self::CONSTRUCTOR_ID.serialize(buf)?;
            self.id.serialize(buf)?;
            self.bytes.serialize(buf)
        }
    }

    impl RemoteCall for ImportAuthorization {
        type Return = Blob;
    }

    /// `auth.bindTempAuthKey#cdd42a05 perm_auth_key_id:long nonce:long
    /// expires_at:int encrypted_message:bytes = Bool;`
    #[derive(Debug, Clone, PartialEq)]
    pub struct BindTempAuthKey {
        pub perm_auth_key_id: i64,
        pub nonce: i64,
        pub expires_at: i32,
        pub encrypted_message: Vec<u8>,
    }

    impl_identifiable!(BindTempAuthKey, 0xcdd42a05);

    impl Serializable for BindTempAuthKey {
        fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
            Self::CONSTRUCTOR_ID.serialize(buf)?;
            self.perm_auth_key_id.serialize(buf)?;
            self.nonce.serialize(buf)?;
            self.expires_at.serialize(buf)?;
            self.encrypted_message.serialize(buf)
        }
    }

    impl RemoteCall for BindTempAuthKey {
        type Return = bool;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn req_pq_multi_roundtrips_nonce() {
        let req = ReqPqMulti { nonce: [7u8; 16] };
        let bytes = req.to_bytes();
        assert_eq!(&bytes[..4], &0xbe7e8ef1u32.to_le_bytes());
        assert_eq!(&bytes[4..], &[7u8; 16]);
    }

    #[test]
    fn get_file_encodes_flags() {
        let req = upload::GetFile {
            precise: true,
            cdn_supported: false,
            location: enums::InputFileLocation::Document(types::InputDocumentFileLocation {
                id: 1,
                access_hash: 2,
                file_reference: vec![],
                thumb_size: String::new(),
            }),
            offset: 0,
            limit: 1024,
        };
        let bytes = req.to_bytes();
        // constructor id (4) + flags (4) follow immediately.
        let flags = i32::from_le_bytes(bytes[4..8].try_into().unwrap());
        assert_eq!(flags, 1);
    }
}
