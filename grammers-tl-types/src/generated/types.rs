// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Bare types: each struct below is the single concrete shape behind one
//! `enums` variant (or, for the handful with no alternative constructor,
//! used directly). [`Identifiable`] gives the wire constructor id;
//! [`Serializable`]/[`Deserializable`] always write/validate it, since
//! every value here is sent or received "boxed" on the wire.

use crate::deserializable::{Buffer, Result as DResult};
use crate::errors::DeserializeError;
use crate::{Deserializable, Identifiable, Serializable};
use std::io::{Result as IoResult, Write};

macro_rules! impl_identifiable {
    ($ty:ty, $id:expr) => {
        impl Identifiable for $ty {
            #[allow(clippy::unreadable_literal)]
            const CONSTRUCTOR_ID: u32 = $id;
        }
    };
}

/// Checks and consumes the leading constructor id, returning the
/// deserialize error produced by a mismatch.
fn expect_id(buf: Buffer, id: u32) -> DResult<()> {
    let got = u32::deserialize(buf)?;
    if got != id {
        return Err(DeserializeError::UnexpectedConstructor { id: got });
    }
    Ok(())
}

/// `resPQ#05162463 nonce:int128 server_nonce:int128 pq:string
/// server_public_key_fingerprints:Vector<long> = ResPQ;`
#[derive(Debug, Clone, PartialEq)]
pub struct ResPq {
    pub nonce: [u8; 16],
    pub server_nonce: [u8; 16],
    pub pq: Vec<u8>,
    pub server_public_key_fingerprints: Vec<i64>,
}

impl_identifiable!(ResPq, 0x05162463);

impl Serializable for ResPq {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        self.nonce.serialize(buf)?;
        self.server_nonce.serialize(buf)?;
        self.pq.serialize(buf)?;
        self.server_public_key_fingerprints.serialize(buf)
    }
}

impl ResPq {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        Ok(Self {
            nonce: Deserializable::deserialize(buf)?,
            server_nonce: Deserializable::deserialize(buf)?,
            pq: Deserializable::deserialize(buf)?,
            server_public_key_fingerprints: Deserializable::deserialize(buf)?,
        })
    }
}

impl Deserializable for ResPq {
    fn deserialize(buf: Buffer) -> DResult<Self> {
        expect_id(buf, Self::CONSTRUCTOR_ID)?;
        Self::deserialize_fields(buf)
    }
}

/// `p_q_inner_data#83c95aec pq:string p:string q:string nonce:int128
/// server_nonce:int128 new_nonce:int256 = P_Q_inner_data;`
#[derive(Debug, Clone, PartialEq)]
pub struct PQInnerData {
    pub pq: Vec<u8>,
    pub p: Vec<u8>,
    pub q: Vec<u8>,
    pub nonce: [u8; 16],
    pub server_nonce: [u8; 16],
    pub new_nonce: [u8; 32],
}

impl_identifiable!(PQInnerData, 0x83c95aec);

impl Serializable for PQInnerData {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        self.pq.serialize(buf)?;
        self.p.serialize(buf)?;
        self.q.serialize(buf)?;
        self.nonce.serialize(buf)?;
        self.server_nonce.serialize(buf)?;
        self.new_nonce.serialize(buf)
    }
}

impl PQInnerData {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        Ok(Self {
            pq: Deserializable::deserialize(buf)?,
            p: Deserializable::deserialize(buf)?,
            q: Deserializable::deserialize(buf)?,
            nonce: Deserializable::deserialize(buf)?,
            server_nonce: Deserializable::deserialize(buf)?,
            new_nonce: Deserializable::deserialize(buf)?,
        })
    }
}

/// `p_q_inner_data_dc#a9f55f95 pq:string p:string q:string nonce:int128
/// server_nonce:int128 new_nonce:int256 dc:int = P_Q_inner_data;`
#[derive(Debug, Clone, PartialEq)]
pub struct PQInnerDataDc {
    pub pq: Vec<u8>,
    pub p: Vec<u8>,
    pub q: Vec<u8>,
    pub nonce: [u8; 16],
    pub server_nonce: [u8; 16],
    pub new_nonce: [u8; 32],
    pub dc: i32,
}

impl_identifiable!(PQInnerDataDc, 0xa9f55f95);

impl Serializable for PQInnerDataDc {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        self.pq.serialize(buf)?;
        self.p.serialize(buf)?;
        self.q.serialize(buf)?;
        self.nonce.serialize(buf)?;
        self.server_nonce.serialize(buf)?;
        self.new_nonce.serialize(buf)?;
        self.dc.serialize(buf)
    }
}

impl PQInnerDataDc {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        Ok(Self {
            pq: Deserializable::deserialize(buf)?,
            p: Deserializable::deserialize(buf)?,
            q: Deserializable::deserialize(buf)?,
            nonce: Deserializable::deserialize(buf)?,
            server_nonce: Deserializable::deserialize(buf)?,
            new_nonce: Deserializable::deserialize(buf)?,
            dc: Deserializable::deserialize(buf)?,
        })
    }
}

/// `p_q_inner_data_temp#3c6a84d4 pq:string p:string q:string nonce:int128
/// server_nonce:int128 new_nonce:int256 expires_in:int = P_Q_inner_data;`
#[derive(Debug, Clone, PartialEq)]
pub struct PQInnerDataTemp {
    pub pq: Vec<u8>,
    pub p: Vec<u8>,
    pub q: Vec<u8>,
    pub nonce: [u8; 16],
    pub server_nonce: [u8; 16],
    pub new_nonce: [u8; 32],
    pub expires_in: i32,
}

impl_identifiable!(PQInnerDataTemp, 0x3c6a84d4);

impl Serializable for PQInnerDataTemp {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        self.pq.serialize(buf)?;
        self.p.serialize(buf)?;
        self.q.serialize(buf)?;
        self.nonce.serialize(buf)?;
        self.server_nonce.serialize(buf)?;
        self.new_nonce.serialize(buf)?;
        self.expires_in.serialize(buf)
    }
}

impl PQInnerDataTemp {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        Ok(Self {
            pq: Deserializable::deserialize(buf)?,
            p: Deserializable::deserialize(buf)?,
            q: Deserializable::deserialize(buf)?,
            nonce: Deserializable::deserialize(buf)?,
            server_nonce: Deserializable::deserialize(buf)?,
            new_nonce: Deserializable::deserialize(buf)?,
            expires_in: Deserializable::deserialize(buf)?,
        })
    }
}

/// `p_q_inner_data_temp_dc#56fddf88 pq:string p:string q:string nonce:int128
/// server_nonce:int128 new_nonce:int256 dc:int expires_in:int = P_Q_inner_data;`
#[derive(Debug, Clone, PartialEq)]
pub struct PQInnerDataTempDc {
    pub pq: Vec<u8>,
    pub p: Vec<u8>,
    pub q: Vec<u8>,
    pub nonce: [u8; 16],
    pub server_nonce: [u8; 16],
    pub new_nonce: [u8; 32],
    pub dc: i32,
    pub expires_in: i32,
}

impl_identifiable!(PQInnerDataTempDc, 0x56fddf88);

impl Serializable for PQInnerDataTempDc {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        self.pq.serialize(buf)?;
        self.p.serialize(buf)?;
        self.q.serialize(buf)?;
        self.nonce.serialize(buf)?;
        self.server_nonce.serialize(buf)?;
        self.new_nonce.serialize(buf)?;
        self.dc.serialize(buf)?;
        self.expires_in.serialize(buf)
    }
}

impl PQInnerDataTempDc {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        Ok(Self {
            pq: Deserializable::deserialize(buf)?,
            p: Deserializable::deserialize(buf)?,
            q: Deserializable::deserialize(buf)?,
            nonce: Deserializable::deserialize(buf)?,
            server_nonce: Deserializable::deserialize(buf)?,
            new_nonce: Deserializable::deserialize(buf)?,
            dc: Deserializable::deserialize(buf)?,
            expires_in: Deserializable::deserialize(buf)?,
        })
    }
}

/// `server_DH_params_fail#79cb045d nonce:int128 server_nonce:int128
/// new_nonce_hash:int128 = Server_DH_Params;`
#[derive(Debug, Clone, PartialEq)]
pub struct ServerDhParamsFail {
    pub nonce: [u8; 16],
    pub server_nonce: [u8; 16],
    pub new_nonce_hash: [u8; 16],
}

impl_identifiable!(ServerDhParamsFail, 0x79cb045d);

impl Serializable for ServerDhParamsFail {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        self.nonce.serialize(buf)?;
        self.server_nonce.serialize(buf)?;
        self.new_nonce_hash.serialize(buf)
    }
}

impl ServerDhParamsFail {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        Ok(Self {
            nonce: Deserializable::deserialize(buf)?,
            server_nonce: Deserializable::deserialize(buf)?,
            new_nonce_hash: Deserializable::deserialize(buf)?,
        })
    }
}

/// `server_DH_params_ok#d0e8075c nonce:int128 server_nonce:int128
/// encrypted_answer:string = Server_DH_Params;`
#[derive(Debug, Clone, PartialEq)]
pub struct ServerDhParamsOk {
    pub nonce: [u8; 16],
    pub server_nonce: [u8; 16],
    pub encrypted_answer: Vec<u8>,
}

impl_identifiable!(ServerDhParamsOk, 0xd0e8075c);

impl Serializable for ServerDhParamsOk {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        self.nonce.serialize(buf)?;
        self.server_nonce.serialize(buf)?;
        self.encrypted_answer.serialize(buf)
    }
}

impl ServerDhParamsOk {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        Ok(Self {
            nonce: Deserializable::deserialize(buf)?,
            server_nonce: Deserializable::deserialize(buf)?,
            encrypted_answer: Deserializable::deserialize(buf)?,
        })
    }
}

/// `server_DH_inner_data#b5890dba nonce:int128 server_nonce:int128 g:int
/// dh_prime:string g_a:string server_time:int = Server_DH_inner_data;`
#[derive(Debug, Clone, PartialEq)]
pub struct ServerDhInnerData {
    pub nonce: [u8; 16],
    pub server_nonce: [u8; 16],
    pub g: i32,
    pub dh_prime: Vec<u8>,
    pub g_a: Vec<u8>,
    pub server_time: i32,
}

impl_identifiable!(ServerDhInnerData, 0xb5890dba);

impl Serializable for ServerDhInnerData {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        self.nonce.serialize(buf)?;
        self.server_nonce.serialize(buf)?;
        self.g.serialize(buf)?;
        self.dh_prime.serialize(buf)?;
        self.g_a.serialize(buf)?;
        self.server_time.serialize(buf)
    }
}

impl ServerDhInnerData {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        Ok(Self {
            nonce: Deserializable::deserialize(buf)?,
            server_nonce: Deserializable::deserialize(buf)?,
            g: Deserializable::deserialize(buf)?,
            dh_prime: Deserializable::deserialize(buf)?,
            g_a: Deserializable::deserialize(buf)?,
            server_time: Deserializable::deserialize(buf)?,
        })
    }
}

impl Deserializable for ServerDhInnerData {
    fn deserialize(buf: Buffer) -> DResult<Self> {
        expect_id(buf, Self::CONSTRUCTOR_ID)?;
        Self::deserialize_fields(buf)
    }
}

/// `client_DH_inner_data#6643b654 nonce:int128 server_nonce:int128
/// retry_id:long g_b:string = Client_DH_Inner_Data;`
#[derive(Debug, Clone, PartialEq)]
pub struct ClientDhInnerData {
    pub nonce: [u8; 16],
    pub server_nonce: [u8; 16],
    pub retry_id: i64,
    pub g_b: Vec<u8>,
}

impl_identifiable!(ClientDhInnerData, 0x6643b654);

impl Serializable for ClientDhInnerData {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        self.nonce.serialize(buf)?;
        self.server_nonce.serialize(buf)?;
        self.retry_id.serialize(buf)?;
        self.g_b.serialize(buf)
    }
}

impl ClientDhInnerData {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        Ok(Self {
            nonce: Deserializable::deserialize(buf)?,
            server_nonce: Deserializable::deserialize(buf)?,
            retry_id: Deserializable::deserialize(buf)?,
            g_b: Deserializable::deserialize(buf)?,
        })
    }
}

/// `dh_gen_ok#3bcbf734 nonce:int128 server_nonce:int128
/// new_nonce_hash1:int128 = Set_client_DH_params_answer;`
#[derive(Debug, Clone, PartialEq)]
pub struct DhGenOk {
    pub nonce: [u8; 16],
    pub server_nonce: [u8; 16],
    pub new_nonce_hash1: [u8; 16],
}

impl_identifiable!(DhGenOk, 0x3bcbf734);

impl DhGenOk {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        Ok(Self {
            nonce: Deserializable::deserialize(buf)?,
            server_nonce: Deserializable::deserialize(buf)?,
            new_nonce_hash1: Deserializable::deserialize(buf)?,
        })
    }
}

/// `dh_gen_retry#46dc1fb9 nonce:int128 server_nonce:int128
/// new_nonce_hash2:int128 = Set_client_DH_params_answer;`
#[derive(Debug, Clone, PartialEq)]
pub struct DhGenRetry {
    pub nonce: [u8; 16],
    pub server_nonce: [u8; 16],
    pub new_nonce_hash2: [u8; 16],
}

impl_identifiable!(DhGenRetry, 0x46dc1fb9);

impl DhGenRetry {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        Ok(Self {
            nonce: Deserializable::deserialize(buf)?,
            server_nonce: Deserializable::deserialize(buf)?,
            new_nonce_hash2: Deserializable::deserialize(buf)?,
        })
    }
}

/// `dh_gen_fail#a69dae02 nonce:int128 server_nonce:int128
/// new_nonce_hash3:int128 = Set_client_DH_params_answer;`
#[derive(Debug, Clone, PartialEq)]
pub struct DhGenFail {
    pub nonce: [u8; 16],
    pub server_nonce: [u8; 16],
    pub new_nonce_hash3: [u8; 16],
}

impl_identifiable!(DhGenFail, 0xa69dae02);

impl DhGenFail {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        Ok(Self {
            nonce: Deserializable::deserialize(buf)?,
            server_nonce: Deserializable::deserialize(buf)?,
            new_nonce_hash3: Deserializable::deserialize(buf)?,
        })
    }
}

/// `bind_auth_key_inner#75a3f765 nonce:long temp_auth_key_id:long
/// perm_auth_key_id:long temp_session_id:long expires_at:int = BindAuthKeyInner;`
///
/// The inner payload encrypted under the permanent key for
/// `auth.bindTempAuthKey`.
#[derive(Debug, Clone, PartialEq)]
pub struct BindAuthKeyInner {
    pub nonce: i64,
    pub temp_auth_key_id: i64,
    pub perm_auth_key_id: i64,
    pub temp_session_id: i64,
    pub expires_at: i32,
}

impl_identifiable!(BindAuthKeyInner, 0x75a3f765);

impl Serializable for BindAuthKeyInner {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        self.nonce.serialize(buf)?;
        self.temp_auth_key_id.serialize(buf)?;
        self.perm_auth_key_id.serialize(buf)?;
        self.temp_session_id.serialize(buf)?;
        self.expires_at.serialize(buf)
    }
}

/// `rpc_error#2144ca19 error_code:int error_message:string = RpcError;`
#[derive(Debug, Clone, PartialEq)]
pub struct RpcError {
    pub error_code: i32,
    pub error_message: String,
}

impl_identifiable!(RpcError, 0x2144ca19);

impl Serializable for RpcError {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        self.error_code.serialize(buf)?;
        self.error_message.serialize(buf)
    }
}

impl RpcError {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        Ok(Self {
            error_code: Deserializable::deserialize(buf)?,
            error_message: Deserializable::deserialize(buf)?,
        })
    }
}

impl Deserializable for RpcError {
    fn deserialize(buf: Buffer) -> DResult<Self> {
        expect_id(buf, Self::CONSTRUCTOR_ID)?;
        Self::deserialize_fields(buf)
    }
}

/// `msgs_ack#62d6b459 msg_ids:Vector<long> = MsgsAck;`
#[derive(Debug, Clone, PartialEq)]
pub struct MsgsAck {
    pub msg_ids: Vec<i64>,
}

impl_identifiable!(MsgsAck, 0x62d6b459);

impl Serializable for MsgsAck {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        self.msg_ids.serialize(buf)
    }
}

impl MsgsAck {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        Ok(Self {
            msg_ids: Deserializable::deserialize(buf)?,
        })
    }
}

impl Deserializable for MsgsAck {
    fn deserialize(buf: Buffer) -> DResult<Self> {
        expect_id(buf, Self::CONSTRUCTOR_ID)?;
        Self::deserialize_fields(buf)
    }
}

/// `bad_msg_notification#a7eff811 bad_msg_id:long bad_msg_seqno:int
/// error_code:int = BadMsgNotification;`
#[derive(Debug, Clone, PartialEq)]
pub struct BadMsgNotification {
    pub bad_msg_id: i64,
    pub bad_msg_seqno: i32,
    pub error_code: i32,
}

impl_identifiable!(BadMsgNotification, 0xa7eff811);

impl BadMsgNotification {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        Ok(Self {
            bad_msg_id: Deserializable::deserialize(buf)?,
            bad_msg_seqno: Deserializable::deserialize(buf)?,
            error_code: Deserializable::deserialize(buf)?,
        })
    }
}

/// `bad_server_salt#edab447b bad_msg_id:long bad_msg_seqno:int
/// error_code:int new_server_salt:long = BadMsgNotification;`
#[derive(Debug, Clone, PartialEq)]
pub struct BadServerSalt {
    pub bad_msg_id: i64,
    pub bad_msg_seqno: i32,
    pub error_code: i32,
    pub new_server_salt: i64,
}

impl_identifiable!(BadServerSalt, 0xedab447b);

impl BadServerSalt {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        Ok(Self {
            bad_msg_id: Deserializable::deserialize(buf)?,
            bad_msg_seqno: Deserializable::deserialize(buf)?,
            error_code: Deserializable::deserialize(buf)?,
            new_server_salt: Deserializable::deserialize(buf)?,
        })
    }
}

/// `new_session_created#9ec20908 first_msg_id:long unique_id:long
/// server_salt:long = NewSession;`
#[derive(Debug, Clone, PartialEq)]
pub struct NewSessionCreated {
    pub first_msg_id: i64,
    pub unique_id: i64,
    pub server_salt: i64,
}

impl_identifiable!(NewSessionCreated, 0x9ec20908);

impl NewSessionCreated {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        Ok(Self {
            first_msg_id: Deserializable::deserialize(buf)?,
            unique_id: Deserializable::deserialize(buf)?,
            server_salt: Deserializable::deserialize(buf)?,
        })
    }
}

/// `pong#347773c5 msg_id:long ping_id:long = Pong;`
#[derive(Debug, Clone, PartialEq)]
pub struct Pong {
    pub msg_id: i64,
    pub ping_id: i64,
}

impl_identifiable!(Pong, 0x347773c5);

impl Serializable for Pong {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        self.msg_id.serialize(buf)?;
        self.ping_id.serialize(buf)
    }
}

impl Pong {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        Ok(Self {
            msg_id: Deserializable::deserialize(buf)?,
            ping_id: Deserializable::deserialize(buf)?,
        })
    }
}

impl Deserializable for Pong {
    fn deserialize(buf: Buffer) -> DResult<Self> {
        expect_id(buf, Self::CONSTRUCTOR_ID)?;
        Self::deserialize_fields(buf)
    }
}

/// `future_salt#0949d9dc valid_since:int valid_until:int salt:long = FutureSalt;`
#[derive(Debug, Clone, PartialEq)]
pub struct FutureSalt {
    pub valid_since: i32,
    pub valid_until: i32,
    pub salt: i64,
}

impl_identifiable!(FutureSalt, 0x0949d9dc);

impl Serializable for FutureSalt {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        self.valid_since.serialize(buf)?;
        self.valid_until.serialize(buf)?;
        self.salt.serialize(buf)
    }
}

impl Deserializable for FutureSalt {
    fn deserialize(buf: Buffer) -> DResult<Self> {
        expect_id(buf, Self::CONSTRUCTOR_ID)?;
        Ok(Self {
            valid_since: Deserializable::deserialize(buf)?,
            valid_until: Deserializable::deserialize(buf)?,
            salt: Deserializable::deserialize(buf)?,
        })
    }
}

/// `future_salts#ae500895 req_msg_id:long now:int salts:vector<future_salt>
/// = FutureSalts;`
#[derive(Debug, Clone, PartialEq)]
pub struct FutureSalts {
    pub req_msg_id: i64,
    pub now: i32,
    pub salts: Vec<FutureSalt>,
}

impl_identifiable!(FutureSalts, 0xae500895);

impl FutureSalts {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        let req_msg_id = i64::deserialize(buf)?;
        let now = i32::deserialize(buf)?;
        let len = u32::deserialize(buf)? as usize;
        let mut salts = Vec::with_capacity(len);
        for _ in 0..len {
            salts.push(FutureSalt::deserialize(buf)?);
        }
        Ok(Self {
            req_msg_id,
            now,
            salts,
        })
    }
}

impl Deserializable for FutureSalts {
    fn deserialize(buf: Buffer) -> DResult<Self> {
        expect_id(buf, Self::CONSTRUCTOR_ID)?;
        Self::deserialize_fields(buf)
    }
}

/// `msg_detailed_info#276d3ec6 msg_id:long answer_msg_id:long bytes:int
/// status:int = MsgDetailedInfo;`
#[derive(Debug, Clone, PartialEq)]
pub struct MsgDetailedInfo {
    pub msg_id: i64,
    pub answer_msg_id: i64,
    pub bytes: i32,
    pub status: i32,
}

impl_identifiable!(MsgDetailedInfo, 0x276d3ec6);

impl MsgDetailedInfo {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        Ok(Self {
            msg_id: Deserializable::deserialize(buf)?,
            answer_msg_id: Deserializable::deserialize(buf)?,
            bytes: Deserializable::deserialize(buf)?,
            status: Deserializable::deserialize(buf)?,
        })
    }
}

/// `msg_new_detailed_info#809db6df answer_msg_id:long bytes:int status:int
/// = MsgDetailedInfo;`
#[derive(Debug, Clone, PartialEq)]
pub struct MsgNewDetailedInfo {
    pub answer_msg_id: i64,
    pub bytes: i32,
    pub status: i32,
}

impl_identifiable!(MsgNewDetailedInfo, 0x809db6df);

impl MsgNewDetailedInfo {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        Ok(Self {
            answer_msg_id: Deserializable::deserialize(buf)?,
            bytes: Deserializable::deserialize(buf)?,
            status: Deserializable::deserialize(buf)?,
        })
    }
}

/// `msgs_state_req#da69fb52 msg_ids:Vector<long> = MsgsStateReq;`
#[derive(Debug, Clone, PartialEq)]
pub struct MsgsStateReq {
    pub msg_ids: Vec<i64>,
}

impl_identifiable!(MsgsStateReq, 0xda69fb52);

impl Serializable for MsgsStateReq {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        self.msg_ids.serialize(buf)
    }
}

/// `msgs_state_info#04deb57d req_msg_id:long info:string = MsgsStateInfo;`
#[derive(Debug, Clone, PartialEq)]
pub struct MsgsStateInfo {
    pub req_msg_id: i64,
    pub info: Vec<u8>,
}

impl_identifiable!(MsgsStateInfo, 0x04deb57d);

impl MsgsStateInfo {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        Ok(Self {
            req_msg_id: Deserializable::deserialize(buf)?,
            info: Deserializable::deserialize(buf)?,
        })
    }
}

/// `msgs_all_info#8cc0d131 msg_ids:Vector<long> info:string = MsgsAllInfo;`
#[derive(Debug, Clone, PartialEq)]
pub struct MsgsAllInfo {
    pub msg_ids: Vec<i64>,
    pub info: Vec<u8>,
}

impl_identifiable!(MsgsAllInfo, 0x8cc0d131);

impl MsgsAllInfo {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        Ok(Self {
            msg_ids: Deserializable::deserialize(buf)?,
            info: Deserializable::deserialize(buf)?,
        })
    }
}

/// `msg_resend_req#7d861a08 msg_ids:Vector<long> = MsgResendReq;`
#[derive(Debug, Clone, PartialEq)]
pub struct MsgResendReq {
    pub msg_ids: Vec<i64>,
}

impl_identifiable!(MsgResendReq, 0x7d861a08);

impl Serializable for MsgResendReq {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        self.msg_ids.serialize(buf)
    }
}

/// `msg_resend_ans_req#8610baeb msg_ids:Vector<long> = MsgResendReq;`
#[derive(Debug, Clone, PartialEq)]
pub struct MsgResendAnsReq {
    pub msg_ids: Vec<i64>,
}

impl_identifiable!(MsgResendAnsReq, 0x8610baeb);

impl Serializable for MsgResendAnsReq {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        self.msg_ids.serialize(buf)
    }
}

/// `http_wait#9299359f max_delay:int wait_after:int max_wait:int = HttpWait;`
#[derive(Debug, Clone, PartialEq)]
pub struct HttpWait {
    pub max_delay: i32,
    pub wait_after: i32,
    pub max_wait: i32,
}

impl_identifiable!(HttpWait, 0x9299359f);

impl HttpWait {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        Ok(Self {
            max_delay: Deserializable::deserialize(buf)?,
            wait_after: Deserializable::deserialize(buf)?,
            max_wait: Deserializable::deserialize(buf)?,
        })
    }
}

/// `destroy_session_ok#e22045fc session_id:long = DestroySessionRes;`
#[derive(Debug, Clone, PartialEq)]
pub struct DestroySessionOk {
    pub session_id: i64,
}

impl_identifiable!(DestroySessionOk, 0xe22045fc);

impl DestroySessionOk {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        Ok(Self {
            session_id: Deserializable::deserialize(buf)?,
        })
    }
}

/// `destroy_session_none#62d350c9 session_id:long = DestroySessionRes;`
#[derive(Debug, Clone, PartialEq)]
pub struct DestroySessionNone {
    pub session_id: i64,
}

impl_identifiable!(DestroySessionNone, 0x62d350c9);

impl DestroySessionNone {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        Ok(Self {
            session_id: Deserializable::deserialize(buf)?,
        })
    }
}

/// `rpc_answer_unknown#5e2ad36e = RpcDropAnswer;`
#[derive(Debug, Clone, PartialEq)]
pub struct RpcAnswerUnknown;

impl_identifiable!(RpcAnswerUnknown, 0x5e2ad36e);

impl RpcAnswerUnknown {
    pub(crate) fn deserialize_fields(_buf: Buffer) -> DResult<Self> {
        Ok(Self)
    }
}

/// `rpc_answer_dropped_running#cd78e586 = RpcDropAnswer;`
#[derive(Debug, Clone, PartialEq)]
pub struct RpcAnswerDroppedRunning;

impl_identifiable!(RpcAnswerDroppedRunning, 0xcd78e586);

impl RpcAnswerDroppedRunning {
    pub(crate) fn deserialize_fields(_buf: Buffer) -> DResult<Self> {
        Ok(Self)
    }
}

/// `rpc_answer_dropped#a43ad8b7 msg_id:long seq_no:int bytes:int
/// = RpcDropAnswer;`
#[derive(Debug, Clone, PartialEq)]
pub struct RpcAnswerDropped {
    pub msg_id: i64,
    pub seq_no: i32,
    pub bytes: i32,
}

impl_identifiable!(RpcAnswerDropped, 0xa43ad8b7);

impl RpcAnswerDropped {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        Ok(Self {
            msg_id: Deserializable::deserialize(buf)?,
            seq_no: Deserializable::deserialize(buf)?,
            bytes: Deserializable::deserialize(buf)?,
        })
    }
}

/// `dcOption#18b7a10d flags:# ipv6:flags.0?true media_only:flags.1?true
/// tcpo_only:flags.2?true cdn:flags.3?true static:flags.4?true
/// this_port_only:flags.5?true id:int ip_address:string port:int
/// secret:flags.10?bytes = DcOption;`
///
/// Flag-gated booleans are exposed as accessors over the raw `flags`
/// rather than as separate fields, since the engine only branches on
/// them rather than round-tripping them.
#[derive(Debug, Clone, PartialEq)]
pub struct DcOption {
    pub flags: i32,
    pub id: i32,
    pub ip_address: String,
    pub port: i32,
}

impl_identifiable!(DcOption, 0x18b7a10d);

impl DcOption {
    pub fn ipv6(&self) -> bool {
        self.flags & 1 != 0
    }
    pub fn media_only(&self) -> bool {
        self.flags & 2 != 0
    }
    pub fn tcpo_only(&self) -> bool {
        self.flags & 4 != 0
    }
    pub fn cdn(&self) -> bool {
        self.flags & 8 != 0
    }

    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        let flags = i32::deserialize(buf)?;
        let id = i32::deserialize(buf)?;
        let ip_address = String::deserialize(buf)?;
        let port = i32::deserialize(buf)?;
        if flags & (1 << 10) != 0 {
            let _secret = Vec::<u8>::deserialize(buf)?;
        }
        Ok(Self {
            flags,
            id,
            ip_address,
            port,
        })
    }
}

impl Deserializable for DcOption {
    fn deserialize(buf: Buffer) -> DResult<Self> {
        expect_id(buf, Self::CONSTRUCTOR_ID)?;
        Self::deserialize_fields(buf)
    }
}

/// Reduced projection of `config#232d5905`: only the fields the
/// connection engine itself consults (datacenter bootstrap, test/prod
/// split) are modeled. The dozens of other flag-gated tuning knobs in
/// the real object are intentionally left unparsed, consistently with
/// how this crate treats application-level payloads as opaque.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub date: i32,
    pub expires: i32,
    pub test_mode: bool,
    pub this_dc: i32,
    pub dc_options: Vec<DcOption>,
}

impl_identifiable!(Config, 0x232d5905);

impl Config {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        let _flags = i32::deserialize(buf)?;
        let date = i32::deserialize(buf)?;
        let expires = i32::deserialize(buf)?;
        let test_mode = bool::deserialize(buf)?;
        let this_dc = i32::deserialize(buf)?;
        let len = u32::deserialize(buf)? as usize;
        let mut dc_options = Vec::with_capacity(len);
        for _ in 0..len {
            dc_options.push(DcOption::deserialize(buf)?);
        }
        Ok(Self {
            date,
            expires,
            test_mode,
            this_dc,
            dc_options,
        })
    }
}

impl Deserializable for Config {
    fn deserialize(buf: Buffer) -> DResult<Self> {
        expect_id(buf, Self::CONSTRUCTOR_ID)?;
        Self::deserialize_fields(buf)
    }
}

pub mod upload {
    use super::*;

    /// `upload.file#96a18d5 type:storage.FileType mtime:int bytes:bytes
    /// = upload.File;`
    ///
    /// `storage.FileType` is carried as its raw constructor id: the
    /// engine only needs to move the bytes, not interpret the extension.
    #[derive(Debug, Clone, PartialEq)]
    pub struct File {
        pub file_type: u32,
        pub mtime: i32,
        pub bytes: Vec<u8>,
    }

    impl_identifiable!(File, 0x096a18d5);

    impl File {
        pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
            Ok(Self {
                file_type: Deserializable::deserialize(buf)?,
                mtime: Deserializable::deserialize(buf)?,
                bytes: Deserializable::deserialize(buf)?,
            })
        }
    }

    /// `upload.fileCdnRedirect#f18cda44 dc_id:int file_token:bytes
    /// encryption_key:bytes encryption_iv:bytes file_hashes:Vector<FileHash>
    /// = upload.File;`
    #[derive(Debug, Clone, PartialEq)]
    pub struct FileCdnRedirect {
        pub dc_id: i32,
        pub file_token: Vec<u8>,
        pub encryption_key: Vec<u8>,
        pub encryption_iv: Vec<u8>,
    }

    impl_identifiable!(FileCdnRedirect, 0xf18cda44);

    impl FileCdnRedirect {
        /// Parses everything up to (not including) `file_hashes`: this
        /// client never follows CDN redirects, so the hash list that
        /// would let it verify re-downloaded chunks is not decoded.
        pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
            let dc_id = i32::deserialize(buf)?;
            let file_token = Vec::<u8>::deserialize(buf)?;
            let encryption_key = Vec::<u8>::deserialize(buf)?;
            let encryption_iv = Vec::<u8>::deserialize(buf)?;
            Ok(Self {
                dc_id,
                file_token,
                encryption_key,
                encryption_iv,
            })
        }
    }
}

pub mod auth {
    use super::*;

    /// `auth.exportedAuthorization#b434e2b8 id:long bytes:bytes
    /// = auth.ExportedAuthorization;`
    #[derive(Debug, Clone, PartialEq)]
    pub struct ExportedAuthorization {
        pub id: i64,
        pub bytes: Vec<u8>,
    }

    impl_identifiable!(ExportedAuthorization, 0xb434e2b8);

    impl ExportedAuthorization {
        pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
            Ok(Self {
                id: Deserializable::deserialize(buf)?,
                bytes: Deserializable::deserialize(buf)?,
            })
        }
    }

    impl Deserializable for ExportedAuthorization {
        fn deserialize(buf: Buffer) -> DResult<Self> {
            expect_id(buf, Self::CONSTRUCTOR_ID)?;
            Self::deserialize_fields(buf)
        }
    }
}

/// `inputDocumentFileLocation#bad07584 id:long access_hash:long
/// file_reference:bytes thumb_size:string = InputFileLocation;`
#[derive(Debug, Clone, PartialEq)]
pub struct InputDocumentFileLocation {
    pub id: i64,
    pub access_hash: i64,
    pub file_reference: Vec<u8>,
    pub thumb_size: String,
}

impl_identifiable!(InputDocumentFileLocation, 0xbad07584);

impl Serializable for InputDocumentFileLocation {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        self.id.serialize(buf)?;
        self.access_hash.serialize(buf)?;
        self.file_reference.serialize(buf)?;
        self.thumb_size.serialize(buf)
    }
}

impl InputDocumentFileLocation {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        Ok(Self {
            id: Deserializable::deserialize(buf)?,
            access_hash: Deserializable::deserialize(buf)?,
            file_reference: Deserializable::deserialize(buf)?,
            thumb_size: Deserializable::deserialize(buf)?,
        })
    }
}

/// `inputPhotoFileLocation#40181ffe id:long access_hash:long
/// file_reference:bytes thumb_size:string = InputFileLocation;`
#[derive(Debug, Clone, PartialEq)]
pub struct InputPhotoFileLocation {
    pub id: i64,
    pub access_hash: i64,
    pub file_reference: Vec<u8>,
    pub thumb_size: String,
}

impl_identifiable!(InputPhotoFileLocation, 0x40181ffe);

impl Serializable for InputPhotoFileLocation {
    fn serialize<B: Write>(&self, buf: &mut B) -> IoResult<()> {
        Self::CONSTRUCTOR_ID.serialize(buf)?;
        self.id.serialize(buf)?;
        self.access_hash.serialize(buf)?;
        self.file_reference.serialize(buf)?;
        self.thumb_size.serialize(buf)
    }
}

impl InputPhotoFileLocation {
    pub(crate) fn deserialize_fields(buf: Buffer) -> DResult<Self> {
        Ok(Self {
            id: Deserializable::deserialize(buf)?,
            access_hash: Deserializable::deserialize(buf)?,
            file_reference: Deserializable::deserialize(buf)?,
            thumb_size: Deserializable::deserialize(buf)?,
        })
    }
}

/// Application-layer `Updates` constructors: the connection engine only
/// ever peeks their leading constructor id (to recognize an `rpc_result`
/// body as carrying its own updates, per `store_own_updates`) and hands
/// the raw bytes up to callers who know the full `Updates` schema. No
/// field layout is needed here, so these are identifier-only markers.
pub struct UpdateShortMessage;
impl_identifiable!(UpdateShortMessage, 0x313bad7f);

pub struct UpdateShortChatMessage;
impl_identifiable!(UpdateShortChatMessage, 0x4d6deea5);

pub struct UpdateShort;
impl_identifiable!(UpdateShort, 0x78d4dec1);

pub struct UpdatesCombined;
impl_identifiable!(UpdatesCombined, 0x725b04c3);

pub struct Updates;
impl_identifiable!(Updates, 0x74ae4240);

pub struct UpdateShortSentMessage;
impl_identifiable!(UpdateShortSentMessage, 0x9015e101);
