// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//! The trait used by session implementations, and the datacenter record
//! it revolves around.
//!
//! Sessions are shared behind an `Arc<dyn Session>` by the connection
//! pool, so every method here takes `&self`: implementations hide their
//! own mutability (a `Mutex`, typically) rather than exposing it.

use std::fs;
use std::io;
use std::net::{SocketAddrV4, SocketAddrV6};
use std::path::Path;

use crate::storages::TlSession;

/// Everything a connection needs to know about one datacenter: where to
/// reach it, and the authorization key previously negotiated with it,
/// if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DcOption {
    pub id: i32,
    pub ipv4: SocketAddrV4,
    pub ipv6: SocketAddrV6,
    pub auth_key: Option<[u8; 256]>,
}

/// The trait used by session implementations.
///
/// The creation and loading of sessions is left up to each concrete
/// implementation, since they may choose different ways of being loaded.
///
/// However, all of them should store the required information to allow
/// saving themselves whenever the client requests to do so.
///
/// Implementations are shared behind `Arc<dyn Session>`, so all methods
/// take `&self`; any mutability they need is internal (e.g. a `Mutex`).
pub trait Session: Send + Sync {
    /// Look up a known datacenter by id, if the session has ever seen it.
    fn dc_option(&self, dc_id: i32) -> Option<DcOption>;

    /// Insert or replace a datacenter record (address and/or auth key).
    fn set_dc_option(&self, dc_option: &DcOption);

    /// Serialize the whole session into its on-disk representation.
    fn save(&self) -> Vec<u8>;

    /// Convenience wrapper around [`Session::save`] that writes to a file.
    fn save_to_file(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.save())
    }
}

fn encode_ipv4(addr: SocketAddrV4) -> Option<(i32, i32)> {
    if addr.ip().to_bits() == 0 {
        None
    } else {
        Some((i32::from_le_bytes(addr.ip().octets()), addr.port() as i32))
    }
}

fn encode_ipv6(addr: SocketAddrV6) -> Option<([u8; 16], i32)> {
    if addr.ip().to_bits() == 0 {
        None
    } else {
        Some((addr.ip().octets(), addr.port() as i32))
    }
}

impl Session for TlSession {
    fn dc_option(&self, dc_id: i32) -> Option<DcOption> {
        self.get_dcs().into_iter().find_map(|dc| match dc {
            crate::generated::enums::DataCenter::Center(center) if center.id == dc_id => {
                let ipv4 = center
                    .ipv4
                    .map(|ip| SocketAddrV4::new(ip.to_le_bytes().into(), center.port as u16))
                    .unwrap_or_else(|| SocketAddrV4::new(std::net::Ipv4Addr::from_bits(0), 0));
                let ipv6 = center
                    .ipv6
                    .map(|ip| SocketAddrV6::new(ip.into(), center.port as u16, 0, 0))
                    .unwrap_or_else(|| {
                        SocketAddrV6::new(std::net::Ipv6Addr::from_bits(0), 0, 0, 0)
                    });
                Some(DcOption {
                    id: center.id,
                    ipv4,
                    ipv6,
                    auth_key: center.auth.and_then(|a| a.try_into().ok()),
                })
            }
            _ => None,
        })
    }

    fn set_dc_option(&self, dc_option: &DcOption) {
        let ipv4 = encode_ipv4(dc_option.ipv4);
        let ipv6 = encode_ipv6(dc_option.ipv6);
        let port = ipv4.map(|(_, p)| p).or(ipv6.map(|(_, p)| p)).unwrap_or(0);
        let auth = dc_option.auth_key.or_else(|| self.dc_auth_key(dc_option.id));

        self.set_dc(
            dc_option.id,
            ipv4.map(|(ip, _)| ip),
            ipv6.map(|(ip, _)| ip),
            port,
            auth,
        );
    }

    fn save(&self) -> Vec<u8> {
        TlSession::save(self)
    }
}
