//! Argument vector construction from a single delimited string.
//!
//! Splitting follows `strtok`: runs of delimiters separate tokens and never
//! produce empty ones, so `"a  b"` gives two tokens, not three. Callers that
//! pass multiply-delimited strings get fewer tokens than a strict split.

use std::ffi::{CStr, CString};
use std::mem::ManuallyDrop;
use std::ptr;

use libc::c_char;

/// Independently allocated tokens followed by a null sentinel, laid out as
/// a C `argv`. Every token and the array itself are released on drop.
#[derive(Debug)]
pub struct ArgVector {
    argv: Vec<*mut c_char>,
}

impl ArgVector {
    /// Number of tokens, not counting the sentinel.
    pub fn len(&self) -> usize {
        self.argv.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &CStr> {
        self.argv[..self.len()]
            .iter()
            // SAFETY: every entry before the sentinel came from CString::into_raw
            .map(|&token| unsafe { CStr::from_ptr(token) })
    }

    /// Tokens as owned strings, invalid UTF-8 replaced.
    pub fn to_strings(&self) -> Vec<String> {
        self.iter()
            .map(|token| token.to_string_lossy().into_owned())
            .collect()
    }

    /// `argv`-style pointer, valid while `self` is alive.
    pub fn as_ptr(&self) -> *const *mut c_char {
        self.argv.as_ptr()
    }

    /// Hand the array to C. Release it with [`ArgVector::from_raw`].
    pub fn into_raw(self) -> *mut *mut c_char {
        let mut this = ManuallyDrop::new(self);
        let argv = std::mem::take(&mut this.argv).into_boxed_slice();
        Box::into_raw(argv) as *mut *mut c_char
    }

    /// Take back an array produced by [`ArgVector::into_raw`].
    ///
    /// # Safety
    ///
    /// `argv` must come from `into_raw` and must not have been reclaimed before.
    pub unsafe fn from_raw(argv: *mut *mut c_char) -> Self {
        let mut len = 0;
        while !(*argv.add(len)).is_null() {
            len += 1;
        }
        let slice = ptr::slice_from_raw_parts_mut(argv, len + 1);
        ArgVector {
            argv: Box::from_raw(slice).into_vec(),
        }
    }
}

impl Drop for ArgVector {
    fn drop(&mut self) {
        for &token in &self.argv {
            if !token.is_null() {
                // SAFETY: non-null entries came from CString::into_raw
                drop(unsafe { CString::from_raw(token) });
            }
        }
    }
}

/// Slots needed for `input`: one per delimiter, one more when content
/// follows the last delimiter (or there is none), plus the sentinel.
fn expected_slots(input: &[u8], delim: u8) -> usize {
    let mut delimiters = 0;
    let mut last = None;
    for (pos, &byte) in input.iter().enumerate() {
        if byte == delim {
            delimiters += 1;
            last = Some(pos);
        }
    }
    let trailing = match last {
        Some(pos) => pos + 1 < input.len(),
        None => true,
    };
    delimiters + usize::from(trailing) + 1
}

/// Split `input` on `delim` into an [`ArgVector`].
///
/// Input ends at the first NUL byte, as a C string would. Returns `None`
/// when the token array can't be allocated, which means no tokens were
/// produced; empty input gives an empty vector.
pub fn split_args(input: &[u8], delim: u8) -> Option<ArgVector> {
    let end = input.iter().position(|&b| b == 0).unwrap_or(input.len());
    let input = &input[..end];

    let slots = expected_slots(input, delim);
    let mut argv = Vec::new();
    argv.try_reserve_exact(slots).ok()?;
    let mut args = ArgVector { argv };

    for token in input.split(|&b| b == delim).filter(|t| !t.is_empty()) {
        debug_assert!(args.argv.len() + 1 < slots);
        let token = CString::new(token).ok()?;
        args.argv.push(token.into_raw());
    }
    args.argv.push(ptr::null_mut());

    Some(args)
}
