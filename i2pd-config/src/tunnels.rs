use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;

/// Tunnel type tag as written in the tunnels file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TunnelType {
    Client,
    Server,
    Http,
    Irc,
    #[serde(rename = "udpclient")]
    UdpClient,
    #[serde(rename = "udpserver")]
    UdpServer,
    Socks,
    #[serde(rename = "httpproxy")]
    HttpProxy,
}

/// Which enumeration a tunnel shows up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TunnelKind {
    Client,
    Server,
}

impl TunnelType {
    pub fn kind(self) -> TunnelKind {
        match self {
            TunnelType::Client
            | TunnelType::UdpClient
            | TunnelType::Socks
            | TunnelType::HttpProxy => TunnelKind::Client,
            TunnelType::Server | TunnelType::Http | TunnelType::Irc | TunnelType::UdpServer => {
                TunnelKind::Server
            }
        }
    }
}

/// One table of the tunnels file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TunnelConfig {
    #[serde(rename = "type")]
    pub tunnel_type: TunnelType,
    /// Private keys file, relative to the data directory unless absolute.
    pub keys: Option<String>,
    pub address: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, toml::Value>,
}

/// Tunnels keyed by name. Enumeration order is the name order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TunnelsConfig {
    pub tunnels: BTreeMap<String, TunnelConfig>,
}

impl TunnelsConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let tunnels: BTreeMap<String, TunnelConfig> = toml::from_str(content)?;
        Ok(Self { tunnels })
    }

    /// Load the tunnels file. A missing file is an empty configuration.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("tunnels file {} not found, no tunnels configured", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!("loaded {} tunnels from {}", config.tunnels.len(), path.display());
        Ok(config)
    }

    pub fn of_kind(&self, kind: TunnelKind) -> impl Iterator<Item = (&String, &TunnelConfig)> {
        self.tunnels
            .iter()
            .filter(move |(_, tunnel)| tunnel.tunnel_type.kind() == kind)
    }
}
