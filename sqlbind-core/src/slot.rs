use crate::{Blob, Failure, Null, Skip};

/// A single read output reduced to one of the native kinds understood by the
/// engine.
///
/// The codec only writes through the reference after the storage class (and
/// for `Fixed` the length) has been checked, a failed read leaves it untouched.
pub enum Slot<'a> {
    /// Ignore the column, nothing is written.
    Null,
    /// Ignore the column, nothing is written.
    Skip,
    /// A stored integer outside `i32` fails with [`crate::Failure::OutOfRange`].
    Int32(&'a mut i32),
    Int64(&'a mut i64),
    Float64(&'a mut f64),
    Text(&'a mut String),
    /// Growable blob, resized to the stored length.
    Blob(&'a mut Vec<u8>),
    /// Fixed length blob, the stored length must match exactly.
    Fixed(&'a mut [u8]),
    /// Output accepting SQL NULL in addition to the inner kind.
    Nullable(&'a mut dyn NullableSlot),
}

/// Conversion of a caller owned output into a read [`Slot`].
pub trait AsSlot {
    fn as_slot(&mut self) -> Slot<'_>;
}

/// Output that can represent SQL NULL, used by `Option<T>`.
pub trait NullableSlot {
    fn set_null(&mut self);
    /// Decode the non null value through `read`. The output is only replaced
    /// when `read` succeeds.
    fn read_value(
        &mut self,
        read: &mut dyn FnMut(Slot<'_>) -> Result<(), Failure>,
    ) -> Result<(), Failure>;
}

impl AsSlot for i32 {
    fn as_slot(&mut self) -> Slot<'_> {
        Slot::Int32(self)
    }
}

impl AsSlot for i64 {
    fn as_slot(&mut self) -> Slot<'_> {
        Slot::Int64(self)
    }
}

impl AsSlot for f64 {
    fn as_slot(&mut self) -> Slot<'_> {
        Slot::Float64(self)
    }
}

impl AsSlot for String {
    fn as_slot(&mut self) -> Slot<'_> {
        Slot::Text(self)
    }
}

impl AsSlot for Vec<u8> {
    fn as_slot(&mut self) -> Slot<'_> {
        Slot::Blob(self)
    }
}

impl AsSlot for [u8] {
    fn as_slot(&mut self) -> Slot<'_> {
        Slot::Fixed(self)
    }
}

impl<const N: usize> AsSlot for [u8; N] {
    fn as_slot(&mut self) -> Slot<'_> {
        Slot::Fixed(self)
    }
}

impl AsSlot for Blob<'_> {
    fn as_slot(&mut self) -> Slot<'_> {
        Slot::Fixed(&mut *self.bytes)
    }
}

impl AsSlot for Null {
    fn as_slot(&mut self) -> Slot<'_> {
        Slot::Null
    }
}

impl AsSlot for Skip {
    fn as_slot(&mut self) -> Slot<'_> {
        Slot::Skip
    }
}

impl<T: AsSlot + Default> NullableSlot for Option<T> {
    fn set_null(&mut self) {
        *self = None;
    }

    fn read_value(
        &mut self,
        read: &mut dyn FnMut(Slot<'_>) -> Result<(), Failure>,
    ) -> Result<(), Failure> {
        let mut value = T::default();
        read(value.as_slot())?;
        *self = Some(value);
        Ok(())
    }
}

impl<T: AsSlot + Default> AsSlot for Option<T> {
    fn as_slot(&mut self) -> Slot<'_> {
        Slot::Nullable(self)
    }
}

impl<T: AsSlot + ?Sized> AsSlot for &mut T {
    fn as_slot(&mut self) -> Slot<'_> {
        (**self).as_slot()
    }
}

impl<T: AsSlot + ?Sized> AsSlot for Box<T> {
    fn as_slot(&mut self) -> Slot<'_> {
        (**self).as_slot()
    }
}
