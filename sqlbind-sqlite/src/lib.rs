mod cbox;
mod codec;
mod connection;
mod driver;
mod prepared;

use libsqlite3_sys::{SQLITE_ERROR, SQLITE_MISMATCH, SQLITE_MISUSE, SQLITE_RANGE, sqlite3_errstr};
use sqlbind_core::{Error, Failure};
use std::{
    ffi::{CStr, c_char, c_int},
    ptr,
};

pub(crate) use cbox::*;
pub use connection::*;
pub use driver::*;
pub use prepared::*;

pub(crate) fn error_message_from_ptr(ptr: &'_ *const c_char) -> &'_ str {
    unsafe {
        if *ptr != ptr::null() {
            CStr::from_ptr(*ptr)
                .to_str()
                .unwrap_or("Unknown error (the error message was not a valid C string)")
        } else {
            "Unknown error (could not extract the error message)"
        }
    }
}

/// Engine description of a status code.
pub fn error_string(code: c_int) -> &'static str {
    let ptr = unsafe { sqlite3_errstr(code) };
    if ptr.is_null() {
        return "Unknown error";
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .unwrap_or("Unknown error")
}

/// Integer status code of an error returned by this crate.
///
/// Engine failures keep their code, a type mismatch maps to
/// `SQLITE_MISMATCH`, a size mismatch to `SQLITE_MISUSE` and an integer too
/// large for its output to `SQLITE_RANGE`. Errors not
/// originating from the engine map to `SQLITE_ERROR`.
pub fn result_code(error: &Error) -> c_int {
    match Failure::of(error) {
        Some(Failure::Engine(code)) => code,
        Some(Failure::TypeMismatch { .. }) => SQLITE_MISMATCH,
        Some(Failure::SizeMismatch { .. }) => SQLITE_MISUSE,
        Some(Failure::OutOfRange { .. }) => SQLITE_RANGE,
        None => SQLITE_ERROR,
    }
}
