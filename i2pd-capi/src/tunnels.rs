use std::ptr;

use i2pd_core::api;
use libc::{c_char, c_int};

use crate::scratch;

fn to_c_int(count: usize) -> c_int {
    c_int::try_from(count).unwrap_or(c_int::MAX)
}

/// Index checked against a count taken right before the lookup. Negative
/// and out-of-range indexes never reach the router.
fn checked_index(index: c_int, count: fn() -> usize) -> Option<usize> {
    let index = usize::try_from(index).ok()?;
    (index < count()).then_some(index)
}

fn lookup_into_buffer(
    index: c_int,
    count: fn() -> usize,
    lookup: fn(usize) -> Option<String>,
) -> *const c_char {
    match checked_index(index, count).and_then(lookup) {
        Some(value) => scratch::publish(value),
        None => ptr::null(),
    }
}

fn lookup_owned(
    index: c_int,
    count: fn() -> usize,
    lookup: fn(usize) -> Option<String>,
) -> *mut c_char {
    match checked_index(index, count).and_then(lookup) {
        Some(value) => scratch::owned(value),
        None => ptr::null_mut(),
    }
}

#[no_mangle]
pub extern "C" fn C_GetClientTunnelsCount() -> c_int {
    to_c_int(api::get_client_tunnels_count())
}

#[no_mangle]
pub extern "C" fn C_GetServerTunnelsCount() -> c_int {
    to_c_int(api::get_server_tunnels_count())
}

/// Name of the client tunnel at `index`, or NULL.
///
/// The result points into the shared result buffer and is overwritten by the
/// next `C_*` call that returns a string. Copy it first.
#[no_mangle]
pub extern "C" fn C_GetClientTunnelsName(index: c_int) -> *const c_char {
    lookup_into_buffer(
        index,
        api::get_client_tunnels_count,
        api::get_client_tunnels_name,
    )
}

/// Base32 ident hash of the client tunnel at `index`, or NULL.
///
/// Shares the result buffer with the other `C_*` string getters.
#[no_mangle]
pub extern "C" fn C_GetClientTunnelsIdent(index: c_int) -> *const c_char {
    lookup_into_buffer(
        index,
        api::get_client_tunnels_count,
        api::get_client_tunnels_ident,
    )
}

/// Name of the server tunnel at `index`, or NULL.
///
/// Shares the result buffer with the other `C_*` string getters.
#[no_mangle]
pub extern "C" fn C_GetServerTunnelsName(index: c_int) -> *const c_char {
    lookup_into_buffer(
        index,
        api::get_server_tunnels_count,
        api::get_server_tunnels_name,
    )
}

/// Base32 ident hash of the server tunnel at `index`, or NULL.
///
/// Shares the result buffer with the other `C_*` string getters.
#[no_mangle]
pub extern "C" fn C_GetServerTunnelsIdent(index: c_int) -> *const c_char {
    lookup_into_buffer(
        index,
        api::get_server_tunnels_count,
        api::get_server_tunnels_ident,
    )
}

/// Caller-owned name of the client tunnel at `index`, or NULL.
/// Release with `i2pd_string_free`.
#[no_mangle]
pub extern "C" fn i2pd_client_tunnel_name(index: c_int) -> *mut c_char {
    lookup_owned(
        index,
        api::get_client_tunnels_count,
        api::get_client_tunnels_name,
    )
}

/// Caller-owned ident of the client tunnel at `index`, or NULL.
/// Release with `i2pd_string_free`.
#[no_mangle]
pub extern "C" fn i2pd_client_tunnel_ident(index: c_int) -> *mut c_char {
    lookup_owned(
        index,
        api::get_client_tunnels_count,
        api::get_client_tunnels_ident,
    )
}

/// Caller-owned name of the server tunnel at `index`, or NULL.
/// Release with `i2pd_string_free`.
#[no_mangle]
pub extern "C" fn i2pd_server_tunnel_name(index: c_int) -> *mut c_char {
    lookup_owned(
        index,
        api::get_server_tunnels_count,
        api::get_server_tunnels_name,
    )
}

/// Caller-owned ident of the server tunnel at `index`, or NULL.
/// Release with `i2pd_string_free`.
#[no_mangle]
pub extern "C" fn i2pd_server_tunnel_ident(index: c_int) -> *mut c_char {
    lookup_owned(
        index,
        api::get_server_tunnels_count,
        api::get_server_tunnels_ident,
    )
}
