use std::ffi::CString;
use std::ptr;
use std::sync::{Mutex, PoisonError};

use libc::c_char;
use tracing::warn;

/// Capacity reserved on first use so short results reuse the same storage.
const RET_STR_CAPACITY: usize = 256;

/// The one buffer every `C_*` string result points into.
///
/// Each [`publish`] overwrites the contents in place; the storage only moves
/// when a result outgrows it. A pointer handed out is valid until the next
/// `publish`. The lock only keeps the Rust side sound; callers still have to
/// copy a result before the next call and serialize concurrent use.
static RET_STR: Mutex<Vec<u8>> = Mutex::new(Vec::new());

/// Overwrite the buffer with `value` and return a pointer to it.
///
/// Returns null, leaving the buffer untouched, if `value` contains a NUL.
pub(crate) fn publish(value: String) -> *const c_char {
    if let Some(pos) = value.bytes().position(|b| b == 0) {
        warn!("result contains an interior NUL at {}", pos);
        return ptr::null();
    }

    let mut slot = RET_STR.lock().unwrap_or_else(PoisonError::into_inner);
    slot.clear();
    slot.reserve((value.len() + 1).max(RET_STR_CAPACITY));
    slot.extend_from_slice(value.as_bytes());
    slot.push(0);
    slot.as_ptr() as *const c_char
}

/// Allocate a caller-owned copy of `value`, released with `i2pd_string_free`.
pub(crate) fn owned(value: String) -> *mut c_char {
    match CString::new(value) {
        Ok(value) => value.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    // Single test so nothing else in this binary touches the buffer meanwhile.
    #[test]
    fn test_publish_overwrites_in_place() {
        let first = publish("irc".to_string());
        let second = publish("mail-ident".to_string());
        assert_eq!(first, second);
        assert_eq!(unsafe { CStr::from_ptr(first) }.to_bytes(), b"mail-ident");

        assert!(publish("bad\0value".to_string()).is_null());
        assert_eq!(unsafe { CStr::from_ptr(second) }.to_bytes(), b"mail-ident");
    }

    #[test]
    fn test_owned_rejects_interior_nul() {
        assert!(owned("bad\0value".to_string()).is_null());
    }
}
