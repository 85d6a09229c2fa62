use std::path::Path;

use i2pd_config::{RouterOptions, TunnelKind, TunnelsConfig};
use tracing::{debug, info, warn};

use crate::error::{KeyError, Result, RouterError};
use crate::identity::{IdentHash, PrivateKeys};
use crate::keys::{CryptoKeyType, SigningKeyType};
use crate::logging::init_logging;

/// The router operations the C API bridge delegates to.
///
/// Lookups return `None` when nothing is found. Nothing here hands out
/// borrowed engine state, so results stay valid after the engine changes.
pub trait RouterApi: Send {
    fn init(&mut self, args: &[String], app_name: &str) -> Result<()>;
    fn start(&mut self) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
    fn close_accepts_tunnels(&mut self);
    fn run_peer_test(&mut self) -> Result<()>;

    fn tunnels_count(&self, kind: TunnelKind) -> usize;
    fn tunnel_name(&self, kind: TunnelKind, index: usize) -> Option<String>;
    fn tunnel_ident(&self, kind: TunnelKind, index: usize) -> Option<String>;

    /// Read a private keys file and return the base32 ident hash of its
    /// public identity.
    fn load_private_keys_from_file(
        &self,
        filename: &Path,
        signing_type: SigningKeyType,
        crypto_type: CryptoKeyType,
    ) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterState {
    Uninitialized,
    Initialized,
    Running,
    Stopped,
}

#[derive(Debug, Clone)]
struct Tunnel {
    name: String,
    ident: Option<IdentHash>,
}

/// In-process router covering the surface the bridge consumes: lifecycle,
/// options, the tunnel registry and key files. It does no routing.
#[derive(Debug)]
pub struct HostRouter {
    state: RouterState,
    options: Option<RouterOptions>,
    client_tunnels: Vec<Tunnel>,
    server_tunnels: Vec<Tunnel>,
    accepts_tunnels: bool,
    peer_tests: u32,
}

impl Default for HostRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl HostRouter {
    pub fn new() -> Self {
        Self {
            state: RouterState::Uninitialized,
            options: None,
            client_tunnels: Vec::new(),
            server_tunnels: Vec::new(),
            accepts_tunnels: false,
            peer_tests: 0,
        }
    }

    pub fn state(&self) -> RouterState {
        self.state
    }

    pub fn options(&self) -> Option<&RouterOptions> {
        self.options.as_ref()
    }

    pub fn accepts_tunnels(&self) -> bool {
        self.accepts_tunnels
    }

    pub fn peer_tests(&self) -> u32 {
        self.peer_tests
    }

    fn tunnels(&self, kind: TunnelKind) -> &[Tunnel] {
        match kind {
            TunnelKind::Client => &self.client_tunnels,
            TunnelKind::Server => &self.server_tunnels,
        }
    }

    fn load_tunnels(&mut self, options: &RouterOptions) -> Result<()> {
        let config = TunnelsConfig::from_file(&options.tunconf)?;

        for kind in [TunnelKind::Client, TunnelKind::Server] {
            let tunnels: Vec<Tunnel> = config
                .of_kind(kind)
                .map(|(name, tunnel)| {
                    let ident = tunnel
                        .keys
                        .as_deref()
                        .and_then(|keys| tunnel_ident(options, name, keys));
                    debug!("tunnel {} ({:?}) ident {:?}", name, tunnel.tunnel_type, ident);
                    Tunnel {
                        name: name.clone(),
                        ident,
                    }
                })
                .collect();
            match kind {
                TunnelKind::Client => self.client_tunnels = tunnels,
                TunnelKind::Server => self.server_tunnels = tunnels,
            }
        }
        Ok(())
    }
}

fn tunnel_ident(options: &RouterOptions, name: &str, keys: &str) -> Option<IdentHash> {
    let path = options.resolve(keys);
    match PrivateKeys::from_file(&path) {
        Ok(keys) => Some(keys.ident_hash()),
        Err(e) => {
            warn!("tunnel {}: can't load keys from {}: {}", name, path.display(), e);
            None
        }
    }
}

impl RouterApi for HostRouter {
    fn init(&mut self, args: &[String], app_name: &str) -> Result<()> {
        if self.state == RouterState::Running {
            return Err(RouterError::AlreadyRunning);
        }

        let options = RouterOptions::from_args(args, app_name)?;
        init_logging(&options);
        info!(
            "{} initializing, data directory {}",
            options.app_name,
            options.datadir.display()
        );

        self.load_tunnels(&options)?;
        self.options = Some(options);
        self.state = RouterState::Initialized;
        Ok(())
    }

    fn start(&mut self) -> Result<()> {
        match self.state {
            RouterState::Uninitialized => Err(RouterError::NotInitialized),
            RouterState::Running => Err(RouterError::AlreadyRunning),
            RouterState::Initialized | RouterState::Stopped => {
                self.state = RouterState::Running;
                self.accepts_tunnels = true;
                info!(
                    "router started with {} client and {} server tunnels",
                    self.client_tunnels.len(),
                    self.server_tunnels.len()
                );
                Ok(())
            }
        }
    }

    fn stop(&mut self) -> Result<()> {
        if self.state != RouterState::Running {
            return Err(RouterError::NotRunning);
        }
        self.state = RouterState::Stopped;
        self.accepts_tunnels = false;
        info!("router stopped");
        Ok(())
    }

    fn close_accepts_tunnels(&mut self) {
        self.accepts_tunnels = false;
        info!("transit tunnels are not accepted anymore");
    }

    fn run_peer_test(&mut self) -> Result<()> {
        if self.state != RouterState::Running {
            return Err(RouterError::NotRunning);
        }
        self.peer_tests += 1;
        info!("peer test requested");
        Ok(())
    }

    fn tunnels_count(&self, kind: TunnelKind) -> usize {
        self.tunnels(kind).len()
    }

    fn tunnel_name(&self, kind: TunnelKind, index: usize) -> Option<String> {
        self.tunnels(kind).get(index).map(|t| t.name.clone())
    }

    fn tunnel_ident(&self, kind: TunnelKind, index: usize) -> Option<String> {
        self.tunnels(kind)
            .get(index)
            .and_then(|t| t.ident)
            .map(|ident| ident.to_base32())
    }

    fn load_private_keys_from_file(
        &self,
        filename: &Path,
        signing_type: SigningKeyType,
        crypto_type: CryptoKeyType,
    ) -> Result<String> {
        let path = match &self.options {
            Some(options) => options.resolve(filename),
            None => filename.to_path_buf(),
        };
        let keys = PrivateKeys::from_file_with_types(&path, signing_type, crypto_type)
            .map_err(|e: KeyError| {
                debug!("can't load keys from {}: {}", path.display(), e);
                e
            })?;
        Ok(keys.ident_hash().to_base32())
    }
}
