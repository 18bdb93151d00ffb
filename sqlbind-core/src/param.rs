use std::{borrow::Cow, rc::Rc, slice, sync::Arc};

/// A single bind argument reduced to one of the native kinds understood by the
/// engine.
///
/// Every caller type reaches the codec as one of these variants, the codec
/// then matches over the tag. Text and blobs are borrowed, no ownership is
/// transferred.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Param<'a> {
    Null,
    Skip,
    Int32(i32),
    Int64(i64),
    Float64(f64),
    Text(&'a str),
    Blob(&'a [u8]),
}

/// Conversion of a caller type into a bind [`Param`].
///
/// Types without size information (untyped raw pointers) deliberately have no
/// implementation, binding them does not compile:
/// ```compile_fail
/// use sqlbind_core::AsParam;
/// let value = 5u8;
/// let ptr = &value as *const u8 as *const std::ffi::c_void;
/// let _ = ptr.as_param();
/// ```
/// Wrap the pointer in a [`ConstBlob`] together with its length instead.
pub trait AsParam {
    fn as_param(&self) -> Param<'_>;
}

/// Marker binding SQL NULL, or skipping a column on read without writing.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Null;

/// Marker leaving a position untouched while still advancing the cursor.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skip;

/// Explicit read only blob descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstBlob<'a> {
    pub bytes: &'a [u8],
}

impl<'a> ConstBlob<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Build a descriptor from a raw pointer and a length in bytes.
    ///
    /// # Safety
    /// `ptr` must be valid for reads of `length` bytes for the whole lifetime
    /// `'a`, see [`slice::from_raw_parts`].
    pub unsafe fn from_raw_parts(ptr: *const u8, length: usize) -> Self {
        Self {
            bytes: if length == 0 {
                &[]
            } else {
                unsafe { slice::from_raw_parts(ptr, length) }
            },
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Explicit mutable blob descriptor. On read the stored blob must have exactly
/// the descriptor length.
#[derive(Debug, PartialEq, Eq)]
pub struct Blob<'a> {
    pub bytes: &'a mut [u8],
}

impl<'a> Blob<'a> {
    pub fn new(bytes: &'a mut [u8]) -> Self {
        Self { bytes }
    }

    /// Build a descriptor from a raw pointer and a length in bytes.
    ///
    /// # Safety
    /// `ptr` must be valid for reads and writes of `length` bytes for the whole
    /// lifetime `'a` and not aliased, see [`slice::from_raw_parts_mut`].
    pub unsafe fn from_raw_parts(ptr: *mut u8, length: usize) -> Self {
        Self {
            bytes: if length == 0 {
                &mut []
            } else {
                unsafe { slice::from_raw_parts_mut(ptr, length) }
            },
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

macro_rules! impl_as_param {
    ($source:ty, $destination:path, $as:ty) => {
        impl AsParam for $source {
            fn as_param(&self) -> Param<'_> {
                $destination(*self as $as)
            }
        }
    };
}
impl_as_param!(i8, Param::Int32, i32);
impl_as_param!(i16, Param::Int32, i32);
impl_as_param!(i32, Param::Int32, i32);
impl_as_param!(u8, Param::Int32, i32);
impl_as_param!(u16, Param::Int32, i32);
impl_as_param!(u32, Param::Int64, i64);
impl_as_param!(i64, Param::Int64, i64);
impl_as_param!(f32, Param::Float64, f64);
impl_as_param!(f64, Param::Float64, f64);
impl_as_param!(bool, Param::Int32, i32);

impl AsParam for str {
    fn as_param(&self) -> Param<'_> {
        Param::Text(self)
    }
}

impl AsParam for String {
    fn as_param(&self) -> Param<'_> {
        Param::Text(self)
    }
}

impl AsParam for Cow<'_, str> {
    fn as_param(&self) -> Param<'_> {
        Param::Text(self)
    }
}

impl AsParam for [u8] {
    fn as_param(&self) -> Param<'_> {
        Param::Blob(self)
    }
}

impl<const N: usize> AsParam for [u8; N] {
    fn as_param(&self) -> Param<'_> {
        Param::Blob(self)
    }
}

impl AsParam for Vec<u8> {
    fn as_param(&self) -> Param<'_> {
        Param::Blob(self)
    }
}

impl AsParam for ConstBlob<'_> {
    fn as_param(&self) -> Param<'_> {
        Param::Blob(self.bytes)
    }
}

impl AsParam for Blob<'_> {
    fn as_param(&self) -> Param<'_> {
        Param::Blob(&*self.bytes)
    }
}

impl AsParam for Null {
    fn as_param(&self) -> Param<'_> {
        Param::Null
    }
}

impl AsParam for Skip {
    fn as_param(&self) -> Param<'_> {
        Param::Skip
    }
}

impl<T: AsParam> AsParam for Option<T> {
    fn as_param(&self) -> Param<'_> {
        match self {
            Some(v) => v.as_param(),
            None => Param::Null,
        }
    }
}

macro_rules! impl_as_param_wrapper {
    ($($wrapper:ty),+) => {
        $(
            impl<T: AsParam + ?Sized> AsParam for $wrapper {
                fn as_param(&self) -> Param<'_> {
                    (**self).as_param()
                }
            }
        )+
    };
}
impl_as_param_wrapper!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);
