use std::ffi::CStr;
use std::path::PathBuf;
use std::ptr;

use i2pd_core::{api, CryptoKeyType, KeyError, SigningKeyType};
use libc::c_char;
use tracing::debug;

use crate::scratch;

/// Filesystem path from a C string. On Unix any byte string is a path.
#[cfg(unix)]
fn path_from_c(filename: &CStr) -> Option<PathBuf> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    Some(PathBuf::from(OsStr::from_bytes(filename.to_bytes())))
}

#[cfg(not(unix))]
fn path_from_c(filename: &CStr) -> Option<PathBuf> {
    filename.to_str().ok().map(PathBuf::from)
}

/// Load a private keys file and return the base32 ident hash of its
/// identity. Key type codes are validated before the router sees them.
unsafe fn load_ident(filename: *const c_char, sig_type: u16, crypto_type: u16) -> Option<String> {
    if filename.is_null() {
        return None;
    }
    let filename = path_from_c(CStr::from_ptr(filename))?;

    let types: Result<_, KeyError> = SigningKeyType::try_from(sig_type)
        .and_then(|sig| Ok((sig, CryptoKeyType::try_from(crypto_type)?)));
    let (sig_type, crypto_type) = match types {
        Ok(types) => types,
        Err(e) => {
            debug!("LoadPrivateKeysFromFile({}): {}", filename.display(), e);
            return None;
        }
    };

    match api::load_private_keys_from_file(&filename, sig_type, crypto_type) {
        Ok(ident) => Some(ident),
        Err(e) => {
            debug!("LoadPrivateKeysFromFile({}): {}", filename.display(), e);
            None
        }
    }
}

/// Load the private keys in `filename` and return the base32 ident hash of
/// their identity, or NULL if the file is missing, malformed, or holds keys
/// of other types than requested.
///
/// The result points into the shared result buffer; on failure the buffer is
/// left as it was.
///
/// # Safety
///
/// `filename` must be NULL or point to a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn C_LoadPrivateKeysFromFile(
    filename: *const c_char,
    sig_type: u16,
    crypto_type: u16,
) -> *const c_char {
    match load_ident(filename, sig_type, crypto_type) {
        Some(ident) => scratch::publish(ident),
        None => ptr::null(),
    }
}

/// Caller-owned variant of `C_LoadPrivateKeysFromFile`. Release the result
/// with `i2pd_string_free`.
///
/// # Safety
///
/// `filename` must be NULL or point to a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn i2pd_load_private_keys(
    filename: *const c_char,
    sig_type: u16,
    crypto_type: u16,
) -> *mut c_char {
    match load_ident(filename, sig_type, crypto_type) {
        Some(ident) => scratch::owned(ident),
        None => ptr::null_mut(),
    }
}
