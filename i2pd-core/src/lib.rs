//! # i2pd Core
//!
//! The router surface consumed by the i2pd C API bridge.
//!
//! This crate provides:
//!
//! - [`RouterApi`]: the operations the bridge delegates to
//! - [`HostRouter`]: an in-process implementation covering lifecycle,
//!   options, the tunnel registry and private keys files
//! - [`api`]: process-wide functions over one installed router
//! - Key type enums with validated conversion from their wire codes, and
//!   identity parsing with ident hash derivation
//!
//! ```no_run
//! use i2pd_core::{api, CryptoKeyType, SigningKeyType};
//!
//! let args = vec!["router".to_string(), "--log=stdout".to_string()];
//! api::init_i2p(&args, "i2pd");
//! api::start_i2p();
//! for i in 0..api::get_client_tunnels_count() {
//!     println!("{:?}", api::get_client_tunnels_name(i));
//! }
//! let ident = api::load_private_keys_from_file(
//!     std::path::Path::new("keys.dat"),
//!     SigningKeyType::EddsaSha512Ed25519,
//!     CryptoKeyType::ElGamal,
//! );
//! println!("{:?}", ident);
//! api::stop_i2p();
//! ```

pub mod api;
mod error;
mod identity;
mod keys;
mod logging;
mod router;

pub use error::{KeyError, Result, RouterError};
pub use i2pd_config::TunnelKind;
pub use identity::{IdentHash, Identity, PrivateKeys, IDENT_HASH_LEN};
pub use keys::{CryptoKeyType, SigningKeyType};
pub use logging::init_logging;
pub use router::{HostRouter, RouterApi, RouterState};
