//! Native kind encode and decode on a raw statement handle.
//!
//! Bind functions take a 1-based placeholder index and return the engine
//! status code unchanged. Read functions take a 0-based column index, check the
//! storage class physically present in the column before writing and return a
//! [`Failure`] without touching the output when it does not match.
//!
//! Every function expects `statement` to be a valid, non finalized handle.
use libsqlite3_sys::*;
use sqlbind_core::{Failure, Param, Slot, StorageClass};
use std::{
    ffi::{c_char, c_int, c_void},
    slice,
};

pub(crate) fn bind_null(statement: *mut sqlite3_stmt, index: c_int) -> c_int {
    unsafe { sqlite3_bind_null(statement, index) }
}

pub(crate) fn bind_int32(statement: *mut sqlite3_stmt, index: c_int, value: i32) -> c_int {
    unsafe { sqlite3_bind_int(statement, index, value) }
}

pub(crate) fn bind_int64(statement: *mut sqlite3_stmt, index: c_int, value: i64) -> c_int {
    unsafe { sqlite3_bind_int64(statement, index, value) }
}

pub(crate) fn bind_double(statement: *mut sqlite3_stmt, index: c_int, value: f64) -> c_int {
    unsafe { sqlite3_bind_double(statement, index, value) }
}

/// The engine copies the text before returning.
pub(crate) fn bind_text(statement: *mut sqlite3_stmt, index: c_int, value: &str) -> c_int {
    let Ok(len) = c_int::try_from(value.len()) else {
        return SQLITE_TOOBIG;
    };
    unsafe {
        sqlite3_bind_text(
            statement,
            index,
            value.as_ptr() as *const c_char,
            len,
            SQLITE_TRANSIENT(),
        )
    }
}

/// The engine copies the bytes before returning. An empty slice binds a zero
/// length blob, not NULL.
pub(crate) fn bind_blob(statement: *mut sqlite3_stmt, index: c_int, value: &[u8]) -> c_int {
    let Ok(len) = c_int::try_from(value.len()) else {
        return SQLITE_TOOBIG;
    };
    unsafe {
        if len == 0 {
            return sqlite3_bind_zeroblob(statement, index, 0);
        }
        sqlite3_bind_blob(
            statement,
            index,
            value.as_ptr() as *const c_void,
            len,
            SQLITE_TRANSIENT(),
        )
    }
}

/// Dispatch a tagged parameter to the kind specific bind.
pub(crate) fn bind(statement: *mut sqlite3_stmt, index: c_int, param: Param<'_>) -> c_int {
    match param {
        Param::Null => bind_null(statement, index),
        Param::Skip => SQLITE_OK,
        Param::Int32(v) => bind_int32(statement, index, v),
        Param::Int64(v) => bind_int64(statement, index, v),
        Param::Float64(v) => bind_double(statement, index, v),
        Param::Text(v) => bind_text(statement, index, v),
        Param::Blob(v) => bind_blob(statement, index, v),
    }
}

pub(crate) fn storage_class(statement: *mut sqlite3_stmt, index: c_int) -> StorageClass {
    match unsafe { sqlite3_column_type(statement, index) } {
        SQLITE_INTEGER => StorageClass::Integer,
        SQLITE_FLOAT => StorageClass::Float,
        SQLITE_TEXT => StorageClass::Text,
        SQLITE_BLOB => StorageClass::Blob,
        _ => StorageClass::Null,
    }
}

/// Columns can only be read while a row is staged.
pub(crate) fn check_range(statement: *mut sqlite3_stmt, index: c_int) -> Result<(), Failure> {
    let count = unsafe { sqlite3_data_count(statement) };
    if index < 0 || index >= count {
        return Err(Failure::Engine(SQLITE_RANGE));
    }
    Ok(())
}

fn expect_class(
    statement: *mut sqlite3_stmt,
    index: c_int,
    expected: StorageClass,
) -> Result<(), Failure> {
    check_range(statement, index)?;
    let found = storage_class(statement, index);
    if found != expected {
        return Err(Failure::TypeMismatch { expected, found });
    }
    Ok(())
}

/// Fails with [`Failure::OutOfRange`] instead of truncating a stored integer
/// that does not fit.
pub(crate) fn read_int32(
    statement: *mut sqlite3_stmt,
    index: c_int,
    value: &mut i32,
) -> Result<(), Failure> {
    expect_class(statement, index, StorageClass::Integer)?;
    let stored = unsafe { sqlite3_column_int64(statement, index) };
    *value = i32::try_from(stored).map_err(|_| Failure::OutOfRange { value: stored })?;
    Ok(())
}

pub(crate) fn read_int64(
    statement: *mut sqlite3_stmt,
    index: c_int,
    value: &mut i64,
) -> Result<(), Failure> {
    expect_class(statement, index, StorageClass::Integer)?;
    *value = unsafe { sqlite3_column_int64(statement, index) };
    Ok(())
}

pub(crate) fn read_double(
    statement: *mut sqlite3_stmt,
    index: c_int,
    value: &mut f64,
) -> Result<(), Failure> {
    expect_class(statement, index, StorageClass::Float)?;
    *value = unsafe { sqlite3_column_double(statement, index) };
    Ok(())
}

/// Invalid UTF-8 sequences are replaced.
pub(crate) fn read_text(
    statement: *mut sqlite3_stmt,
    index: c_int,
    value: &mut String,
) -> Result<(), Failure> {
    expect_class(statement, index, StorageClass::Text)?;
    unsafe {
        let ptr = sqlite3_column_text(statement, index);
        let len = sqlite3_column_bytes(statement, index) as usize;
        value.clear();
        if !ptr.is_null() {
            value.push_str(&String::from_utf8_lossy(slice::from_raw_parts(ptr, len)));
        }
    }
    Ok(())
}

/// The vector is resized to the stored length.
pub(crate) fn read_blob(
    statement: *mut sqlite3_stmt,
    index: c_int,
    value: &mut Vec<u8>,
) -> Result<(), Failure> {
    expect_class(statement, index, StorageClass::Blob)?;
    unsafe {
        let ptr = sqlite3_column_blob(statement, index) as *const u8;
        let len = sqlite3_column_bytes(statement, index) as usize;
        value.clear();
        if !ptr.is_null() {
            value.extend_from_slice(slice::from_raw_parts(ptr, len));
        }
    }
    Ok(())
}

/// The stored length must be exactly the buffer length, nothing is copied otherwise.
pub(crate) fn read_fixed(
    statement: *mut sqlite3_stmt,
    index: c_int,
    value: &mut [u8],
) -> Result<(), Failure> {
    expect_class(statement, index, StorageClass::Blob)?;
    unsafe {
        let ptr = sqlite3_column_blob(statement, index) as *const u8;
        let len = sqlite3_column_bytes(statement, index) as usize;
        if len != value.len() {
            return Err(Failure::SizeMismatch {
                expected: value.len(),
                found: len,
            });
        }
        if !ptr.is_null() {
            value.copy_from_slice(slice::from_raw_parts(ptr, len));
        }
    }
    Ok(())
}

/// Dispatch a tagged output to the kind specific read.
pub(crate) fn read(
    statement: *mut sqlite3_stmt,
    index: c_int,
    slot: Slot<'_>,
) -> Result<(), Failure> {
    match slot {
        Slot::Null | Slot::Skip => Ok(()),
        Slot::Int32(v) => read_int32(statement, index, v),
        Slot::Int64(v) => read_int64(statement, index, v),
        Slot::Float64(v) => read_double(statement, index, v),
        Slot::Text(v) => read_text(statement, index, v),
        Slot::Blob(v) => read_blob(statement, index, v),
        Slot::Fixed(v) => read_fixed(statement, index, v),
        Slot::Nullable(v) => {
            check_range(statement, index)?;
            if storage_class(statement, index) == StorageClass::Null {
                v.set_null();
                Ok(())
            } else {
                v.read_value(&mut |slot| read(statement, index, slot))
            }
        }
    }
}
