//! Process-wide router API.
//!
//! Every function operates on one installed [`RouterApi`], a [`HostRouter`]
//! unless [`install`] replaced it. Lifecycle failures are logged, not
//! returned, matching the void contract of the C entry points.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use i2pd_config::TunnelKind;
use tracing::warn;

use crate::error::Result;
use crate::keys::{CryptoKeyType, SigningKeyType};
use crate::router::{HostRouter, RouterApi};

static ROUTER: OnceLock<Mutex<Box<dyn RouterApi>>> = OnceLock::new();

fn router() -> MutexGuard<'static, Box<dyn RouterApi>> {
    ROUTER
        .get_or_init(|| Mutex::new(Box::new(HostRouter::new())))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Replace the process-wide router.
pub fn install(replacement: Box<dyn RouterApi>) {
    *router() = replacement;
}

pub fn init_i2p(args: &[String], app_name: &str) {
    if let Err(e) = router().init(args, app_name) {
        warn!("InitI2P failed: {}", e);
    }
}

pub fn start_i2p() {
    if let Err(e) = router().start() {
        warn!("StartI2P failed: {}", e);
    }
}

pub fn stop_i2p() {
    if let Err(e) = router().stop() {
        warn!("StopI2P failed: {}", e);
    }
}

pub fn close_accepts_tunnels() {
    router().close_accepts_tunnels();
}

/// Should be called after UPnP.
pub fn run_peer_test() {
    if let Err(e) = router().run_peer_test() {
        warn!("RunPeerTest failed: {}", e);
    }
}

pub fn get_client_tunnels_count() -> usize {
    router().tunnels_count(TunnelKind::Client)
}

pub fn get_server_tunnels_count() -> usize {
    router().tunnels_count(TunnelKind::Server)
}

pub fn get_client_tunnels_name(index: usize) -> Option<String> {
    router().tunnel_name(TunnelKind::Client, index)
}

pub fn get_client_tunnels_ident(index: usize) -> Option<String> {
    router().tunnel_ident(TunnelKind::Client, index)
}

pub fn get_server_tunnels_name(index: usize) -> Option<String> {
    router().tunnel_name(TunnelKind::Server, index)
}

pub fn get_server_tunnels_ident(index: usize) -> Option<String> {
    router().tunnel_ident(TunnelKind::Server, index)
}

pub fn load_private_keys_from_file(
    filename: &Path,
    signing_type: SigningKeyType,
    crypto_type: CryptoKeyType,
) -> Result<String> {
    router().load_private_keys_from_file(filename, signing_type, crypto_type)
}
