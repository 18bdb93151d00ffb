use crate::{AsParam, AsSlot, Param, Result, Slot};

/// Variable length list of bind arguments, visited left to right.
///
/// Implemented for tuples up to sixteen elements of [`AsParam`] types and for
/// dynamic lists of [`Param`]. The visit stops at the first error returned by
/// the visitor and returns it, later arguments are never visited.
///
/// ```rust
/// use sqlbind_core::{Null, Param, Params};
/// let mut seen = Vec::new();
/// (5, "x", Null)
///     .visit_params(&mut |param| {
///         seen.push(format!("{:?}", param));
///         Ok(())
///     })
///     .unwrap();
/// assert_eq!(seen, ["Int32(5)", "Text(\"x\")", "Null"]);
/// ```
pub trait Params {
    fn visit_params(&self, visitor: &mut dyn FnMut(Param<'_>) -> Result<()>) -> Result<()>;
}

/// Variable length list of read outputs, visited left to right.
///
/// Implemented for tuples up to sixteen elements of [`AsSlot`] types, usually
/// `&mut` references to the caller variables.
pub trait Outputs {
    fn visit_slots(&mut self, visitor: &mut dyn FnMut(Slot<'_>) -> Result<()>) -> Result<()>;
}

impl AsParam for Param<'_> {
    fn as_param(&self) -> Param<'_> {
        *self
    }
}

macro_rules! impl_lists_for_tuple {
    ($($name:ident $index:tt),*) => {
        impl<$($name: AsParam),*> Params for ($($name,)*) {
            #[allow(unused_variables)]
            fn visit_params(&self, visitor: &mut dyn FnMut(Param<'_>) -> Result<()>) -> Result<()> {
                $(visitor(self.$index.as_param())?;)*
                Ok(())
            }
        }
        impl<$($name: AsSlot),*> Outputs for ($($name,)*) {
            #[allow(unused_variables)]
            fn visit_slots(&mut self, visitor: &mut dyn FnMut(Slot<'_>) -> Result<()>) -> Result<()> {
                $(visitor(self.$index.as_slot())?;)*
                Ok(())
            }
        }
    };
}
impl_lists_for_tuple!();
impl_lists_for_tuple!(A 0);
impl_lists_for_tuple!(A 0, B 1);
impl_lists_for_tuple!(A 0, B 1, C 2);
impl_lists_for_tuple!(A 0, B 1, C 2, D 3);
impl_lists_for_tuple!(A 0, B 1, C 2, D 3, E 4);
impl_lists_for_tuple!(A 0, B 1, C 2, D 3, E 4, F 5);
impl_lists_for_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6);
impl_lists_for_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);
impl_lists_for_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8);
impl_lists_for_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9);
impl_lists_for_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10);
impl_lists_for_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11);
impl_lists_for_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11, M 12);
impl_lists_for_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11, M 12, N 13);
impl_lists_for_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11, M 12, N 13, O 14);
impl_lists_for_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11, M 12, N 13, O 14, P 15);

impl Params for [Param<'_>] {
    fn visit_params(&self, visitor: &mut dyn FnMut(Param<'_>) -> Result<()>) -> Result<()> {
        for param in self {
            visitor(*param)?;
        }
        Ok(())
    }
}

impl<const N: usize> Params for [Param<'_>; N] {
    fn visit_params(&self, visitor: &mut dyn FnMut(Param<'_>) -> Result<()>) -> Result<()> {
        self.as_slice().visit_params(visitor)
    }
}

impl Params for Vec<Param<'_>> {
    fn visit_params(&self, visitor: &mut dyn FnMut(Param<'_>) -> Result<()>) -> Result<()> {
        self.as_slice().visit_params(visitor)
    }
}

impl<P: Params + ?Sized> Params for &P {
    fn visit_params(&self, visitor: &mut dyn FnMut(Param<'_>) -> Result<()>) -> Result<()> {
        (**self).visit_params(visitor)
    }
}

impl Outputs for [&mut dyn AsSlot] {
    fn visit_slots(&mut self, visitor: &mut dyn FnMut(Slot<'_>) -> Result<()>) -> Result<()> {
        for slot in self.iter_mut() {
            visitor(slot.as_slot())?;
        }
        Ok(())
    }
}

impl Outputs for Vec<&mut dyn AsSlot> {
    fn visit_slots(&mut self, visitor: &mut dyn FnMut(Slot<'_>) -> Result<()>) -> Result<()> {
        self.as_mut_slice().visit_slots(visitor)
    }
}

impl<O: Outputs + ?Sized> Outputs for &mut O {
    fn visit_slots(&mut self, visitor: &mut dyn FnMut(Slot<'_>) -> Result<()>) -> Result<()> {
        (**self).visit_slots(visitor)
    }
}
