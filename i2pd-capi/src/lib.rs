//! C API for the i2pd router.
//!
//! Two families of entry points:
//!
//! - `C_*`: the stable ABI. String results point into one shared buffer
//!   that the next string-returning call overwrites, so callers copy a
//!   result before issuing another call and serialize calls across threads.
//!   NULL means no data was produced.
//! - `i2pd_*`: the same queries returning caller-owned strings released with
//!   [`i2pd_string_free`], plus the argument tokenizer and its release call.
//!
//! Nothing unwinds across the boundary; failures degrade to NULL, zero or a
//! no-op and the cause is logged through `tracing`.

#![allow(non_snake_case)]

use std::ffi::{CStr, CString};
use std::ptr;

use libc::c_char;

mod keys;
mod lifecycle;
mod scratch;
mod tokenize;
mod tunnels;

pub use keys::{i2pd_load_private_keys, C_LoadPrivateKeysFromFile};
pub use lifecycle::{C_CloseAcceptsTunnels, C_InitI2P, C_RunPeerTest, C_StartI2P, C_StopI2P};
pub use tokenize::{split_args, ArgVector};
pub use tunnels::{
    i2pd_client_tunnel_ident, i2pd_client_tunnel_name, i2pd_server_tunnel_ident,
    i2pd_server_tunnel_name, C_GetClientTunnelsCount, C_GetClientTunnelsIdent,
    C_GetClientTunnelsName, C_GetServerTunnelsCount, C_GetServerTunnelsIdent,
    C_GetServerTunnelsName,
};

/// Library version. The pointer is valid for the program lifetime, do not free.
#[no_mangle]
pub extern "C" fn i2pd_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}

/// Free a string returned by one of the `i2pd_*` functions.
///
/// # Safety
///
/// `string` must be NULL or a pointer returned by an `i2pd_*` function that
/// has not been freed yet. Pointers returned by `C_*` functions must never
/// be passed here.
#[no_mangle]
pub unsafe extern "C" fn i2pd_string_free(string: *mut c_char) {
    if !string.is_null() {
        let _ = CString::from_raw(string);
    }
}

/// Split `input` on `delim` into a NULL-terminated, `argv`-style array.
///
/// Runs of delimiters count as one separator. Returns NULL when `input` is
/// NULL or the array can't be allocated. Release the result with
/// [`i2pd_str_split_free`].
///
/// # Safety
///
/// `input` must be NULL or point to a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn i2pd_str_split(input: *const c_char, delim: c_char) -> *mut *mut c_char {
    if input.is_null() {
        return ptr::null_mut();
    }
    match split_args(CStr::from_ptr(input).to_bytes(), delim as u8) {
        Some(args) => args.into_raw(),
        None => ptr::null_mut(),
    }
}

/// Free an array returned by [`i2pd_str_split`], including every token.
///
/// # Safety
///
/// `argv` must be NULL or a pointer returned by `i2pd_str_split` that has
/// not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn i2pd_str_split_free(argv: *mut *mut c_char) {
    if !argv.is_null() {
        drop(ArgVector::from_raw(argv));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_matches_package() {
        let version = unsafe { CStr::from_ptr(i2pd_version()) };
        assert_eq!(version.to_str().unwrap(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_str_split_and_free() {
        let input = CString::new("router --log=none --datadir /tmp").unwrap();
        unsafe {
            let argv = i2pd_str_split(input.as_ptr(), b' ' as c_char);
            assert!(!argv.is_null());
            assert_eq!(CStr::from_ptr(*argv).to_bytes(), b"router");
            assert_eq!(CStr::from_ptr(*argv.add(3)).to_bytes(), b"/tmp");
            assert!((*argv.add(4)).is_null());
            i2pd_str_split_free(argv);

            assert!(i2pd_str_split(ptr::null(), b' ' as c_char).is_null());
            i2pd_str_split_free(ptr::null_mut());
        }
    }

    #[test]
    fn test_string_free_accepts_null() {
        unsafe { i2pd_string_free(ptr::null_mut()) };
    }
}
