// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Implementation of the [Mobile Transport Protocol]. This layer is
//! responsible for converting zero or more input requests into outgoing
//! messages, and to process the response.
//!
//! A distinction between plain and encrypted is made for simplicity (the
//! plain hardly requires to process any state) and to help prevent invalid
//! states (encrypted communication cannot be made without an authorization
//! key).
//!
//! [Mobile Transport Protocol]: https://core.telegram.org/mtproto/description

mod encrypted;
mod plain;

pub use encrypted::{Builder as EncryptedBuilder, Encrypted};
pub use plain::Plain;

pub use crate::errors::{DeserializeError, RequestError};
use crate::MsgId;

/// The result of deserializing a single incoming message: zero or more
/// responses to previously-sent requests, plus any updates that came
/// along for the ride.
#[derive(Debug, Default)]
pub struct Deserialization {
    /// Results for previously-sent requests, identified by their [`MsgId`].
    pub rpc_results: Vec<(MsgId, Result<Vec<u8>, RequestError>)>,

    /// Raw, not-yet-parsed `Updates` payloads received alongside responses.
    pub updates: Vec<Vec<u8>>,
}

/// The trait used by the [Mobile Transport Protocol] to serialize outgoing
/// messages and deserialize incoming ones into proper responses.
///
/// [Mobile Transport Protocol]: https://core.telegram.org/mtproto/description
pub trait Mtp {
    /// Queues a request to be serialized the next time [`Mtp::finalize`] is
    /// called, returning the [`MsgId`] assigned to it, or `None` if it could
    /// not be queued (the buffer is full, or another request is already
    /// pending for implementations that can only track one at a time).
    ///
    /// # Panics
    ///
    /// Implementations may panic if the request is not a correctly padded,
    /// already-serialized body, or if it is unreasonably large.
    fn push(&mut self, request: &[u8]) -> Option<MsgId>;

    /// Serializes every request queued via [`Mtp::push`] since the last
    /// call into a single buffer ready to be handed to the transport layer.
    ///
    /// Returns an empty buffer if nothing was queued.
    fn finalize(&mut self) -> Vec<u8>;

    /// Deserializes a single incoming message payload into zero or more
    /// responses.
    fn deserialize(&mut self, payload: &[u8]) -> Result<Deserialization, DeserializeError>;
}
