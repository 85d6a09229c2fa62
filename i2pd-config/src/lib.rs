//! # i2pd Config
//!
//! Router options and tunnels configuration consumed by the i2pd C API
//! bridge.
//!
//! Options come from the argument vector handed to `InitI2P`, optionally
//! merged with a TOML config file named by `--conf`. Tunnels are read from a
//! TOML file with one table per tunnel.
//!
//! ```no_run
//! use i2pd_config::{RouterOptions, TunnelsConfig};
//!
//! fn main() -> Result<(), i2pd_config::ConfigError> {
//!     let args = vec!["router".to_string(), "--log=stdout".to_string()];
//!     let options = RouterOptions::from_args(&args, "i2pd")?;
//!     let tunnels = TunnelsConfig::from_file(&options.tunconf)?;
//!     println!("{} tunnels configured", tunnels.tunnels.len());
//!     Ok(())
//! }
//! ```

mod error;
mod options;
mod tunnels;

pub use error::{ConfigError, Result};
pub use options::{LogTarget, RouterOptions, DEFAULT_TUNNELS_FILE};
pub use tunnels::{TunnelConfig, TunnelKind, TunnelType, TunnelsConfig};
