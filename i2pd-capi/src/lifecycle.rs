use std::ffi::CStr;

use i2pd_core::api;
use libc::{c_char, c_int};
use tracing::{debug, warn};

use crate::tokenize::split_args;

const DEFAULT_APP_NAME: &str = "i2pd";

/// Initialize the router from a single space-delimited argument string.
///
/// The string is split into an argument vector whose first token is the
/// program name, e.g. `"router --datadir=/var/lib/i2pd --log=stdout"`. At
/// most `argc` tokens are passed on. A NULL `argv` initializes with no
/// arguments and a NULL `app_name` uses `"i2pd"`.
///
/// # Safety
///
/// `argv` and `app_name` must each be NULL or point to a NUL-terminated
/// string. Neither is modified or retained.
#[no_mangle]
pub unsafe extern "C" fn C_InitI2P(argc: c_int, argv: *const c_char, app_name: *const c_char) {
    let app_name = if app_name.is_null() {
        DEFAULT_APP_NAME.to_string()
    } else {
        CStr::from_ptr(app_name).to_string_lossy().into_owned()
    };

    let args = if argv.is_null() {
        Vec::new()
    } else {
        match split_args(CStr::from_ptr(argv).to_bytes(), b' ') {
            Some(tokens) => tokens.to_strings(),
            None => {
                warn!("InitI2P: can't allocate argument vector");
                return;
            }
        }
    };

    let forwarded = usize::try_from(argc).unwrap_or(0).min(args.len());
    if usize::try_from(argc).ok() != Some(args.len()) {
        warn!(
            "InitI2P: argc is {} but {} arguments were given, passing {}",
            argc,
            args.len(),
            forwarded
        );
    }
    debug!("InitI2P({:?}, {})", &args[..forwarded], app_name);

    api::init_i2p(&args[..forwarded], &app_name);
}

#[no_mangle]
pub extern "C" fn C_StartI2P() {
    api::start_i2p();
}

/// Stop accepting transit tunnels.
#[no_mangle]
pub extern "C" fn C_CloseAcceptsTunnels() {
    api::close_accepts_tunnels();
}

#[no_mangle]
pub extern "C" fn C_StopI2P() {
    api::stop_i2p();
}

/// Should be called after UPnP.
#[no_mangle]
pub extern "C" fn C_RunPeerTest() {
    api::run_peer_test();
}
