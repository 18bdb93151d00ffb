use crate::Error;
use std::fmt::{self, Display};

/// Physical type tag the engine attaches to a stored value, independent of the
/// declared column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageClass {
    Integer,
    Float,
    Text,
    Blob,
    Null,
}

impl Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StorageClass::Integer => "INTEGER",
            StorageClass::Float => "FLOAT",
            StorageClass::Text => "TEXT",
            StorageClass::Blob => "BLOB",
            StorageClass::Null => "NULL",
        })
    }
}

/// The reason a bind, read or step did not succeed.
///
/// A `Failure` is always the root cause of the [`Error`] returned by the
/// statement layer, the outer layers only add context. Use [`Failure::of`] to
/// recover it.
///
/// # Kinds
/// * `Engine` carries the engine status code verbatim, it is never translated.
/// * `TypeMismatch` is raised on read when the requested kind does not match
///   the storage class physically present in the column. The output is left
///   untouched.
/// * `SizeMismatch` is raised on fixed length blob reads when the stored length
///   differs from the buffer length. Nothing is copied.
/// * `OutOfRange` is raised on 32 bit integer reads when the stored integer
///   does not fit. The output is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Failure {
    #[error("Engine failure (code {0})")]
    Engine(i32),
    #[error("Type mismatch: expected a {expected} column but found {found}")]
    TypeMismatch {
        expected: StorageClass,
        found: StorageClass,
    },
    #[error("Size mismatch: the buffer holds {expected} bytes but the stored blob has {found}")]
    SizeMismatch { expected: usize, found: usize },
    #[error("Out of range: the stored integer {value} does not fit in 32 bits")]
    OutOfRange { value: i64 },
}

impl Failure {
    /// Extract the typed failure from an error produced by this library.
    pub fn of(error: &Error) -> Option<Failure> {
        error.downcast_ref::<Failure>().copied()
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Failure::TypeMismatch { .. })
    }

    pub fn is_size_mismatch(&self) -> bool {
        matches!(self, Failure::SizeMismatch { .. })
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Failure::OutOfRange { .. })
    }
}
