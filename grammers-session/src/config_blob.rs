// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The client-wide configuration blob: the handful of fields
//! `help.getConfig` and the connection engine itself are allowed to
//! update, as opposed to [`crate::Session`] which is keyed per datacenter.

use grammers_tl_types::{Deserializable, Serializable};
use snafu::{ResultExt, Snafu, ensure};
use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

use crate::generated::enums::DataCenter;

const BLOB_VERSION: u32 = 1;

/// The client-wide configuration blob.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigBlob {
    pub test_backend: bool,
    pub client_blocked: bool,
    pub current_datacenter_id: u32,
    pub time_difference: i32,
    pub last_dc_update_time: i32,
    pub push_session_id: i64,
    pub registered_for_internal_push: bool,
    pub sessions_to_destroy: Vec<i64>,
    pub datacenters: Vec<DataCenter>,
}

impl Default for ConfigBlob {
    fn default() -> Self {
        Self {
            test_backend: false,
            client_blocked: false,
            current_datacenter_id: 0,
            time_difference: 0,
            last_dc_update_time: 0,
            push_session_id: 0,
            registered_for_internal_push: false,
            sessions_to_destroy: Vec::new(),
            datacenters: Vec::new(),
        }
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("unexpected io error"))]
    UnexpectedIo { source: std::io::Error },

    #[snafu(display("config blob has version {version}, expected {BLOB_VERSION}"))]
    UnsupportedVersion { version: u32 },

    #[snafu(display("config blob is malformed"))]
    InvalidFormat {
        source: grammers_tl_types::deserialize::Error,
    },
}

impl ConfigBlob {
    /// Load a blob from a file, or return the default blob if the file
    /// doesn't exist yet.
    pub fn load_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        match Self::load_file(path) {
            Err(Error::UnexpectedIo { source }) if source.kind() == ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut data = Vec::new();
        File::open(path.as_ref())
            .context(UnexpectedIoSnafu)?
            .read_to_end(&mut data)
            .context(UnexpectedIoSnafu)?;
        Self::from_bytes(&data)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        let mut cursor = grammers_tl_types::Cursor::from_slice(data);
        let version = u32::deserialize(&mut cursor).context(InvalidFormatSnafu)?;
        ensure!(version == BLOB_VERSION, UnsupportedVersionSnafu { version });

        let test_backend = bool::deserialize(&mut cursor).context(InvalidFormatSnafu)?;
        let client_blocked = bool::deserialize(&mut cursor).context(InvalidFormatSnafu)?;
        let current_datacenter_id = u32::deserialize(&mut cursor).context(InvalidFormatSnafu)?;
        let time_difference = i32::deserialize(&mut cursor).context(InvalidFormatSnafu)?;
        let last_dc_update_time = i32::deserialize(&mut cursor).context(InvalidFormatSnafu)?;
        let push_session_id = i64::deserialize(&mut cursor).context(InvalidFormatSnafu)?;
        let registered_for_internal_push =
            bool::deserialize(&mut cursor).context(InvalidFormatSnafu)?;
        let sessions_to_destroy =
            Vec::<i64>::deserialize(&mut cursor).context(InvalidFormatSnafu)?;
        let datacenters =
            Vec::<DataCenter>::deserialize(&mut cursor).context(InvalidFormatSnafu)?;

        Ok(Self {
            test_backend,
            client_blocked,
            current_datacenter_id,
            time_difference,
            last_dc_update_time,
            push_session_id,
            registered_for_internal_push,
            sessions_to_destroy,
            datacenters,
        })
    }

    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        BLOB_VERSION.serialize(&mut buf).unwrap();
        self.test_backend.serialize(&mut buf).unwrap();
        self.client_blocked.serialize(&mut buf).unwrap();
        self.current_datacenter_id.serialize(&mut buf).unwrap();
        self.time_difference.serialize(&mut buf).unwrap();
        self.last_dc_update_time.serialize(&mut buf).unwrap();
        self.push_session_id.serialize(&mut buf).unwrap();
        self.registered_for_internal_push
            .serialize(&mut buf)
            .unwrap();
        self.sessions_to_destroy.serialize(&mut buf).unwrap();
        self.datacenters.serialize(&mut buf).unwrap();
        buf
    }

    /// Write the blob to `path` atomically: the new contents are written to
    /// a sibling temp file, fsync'd, then renamed over the destination. The
    /// teacher's own `FileSessionStorage::save` truncates and overwrites the
    /// target file in place; a crash mid-write there leaves a corrupt blob,
    /// which this config's size (small, written far more rarely) doesn't
    /// need to risk.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");

        let mut tmp = File::create(&tmp_path).context(UnexpectedIoSnafu)?;
        tmp.write_all(&self.to_bytes()).context(UnexpectedIoSnafu)?;
        tmp.sync_data().context(UnexpectedIoSnafu)?;
        drop(tmp);

        fs::rename(&tmp_path, path).context(UnexpectedIoSnafu)
    }
}
