use std::{
    fmt::{self, Pointer},
    ops::{Deref, DerefMut},
    ptr,
};

pub(crate) trait NullCheck: Copy {
    fn null() -> Self;
    fn is_null(&self) -> bool;
}

impl<T> NullCheck for *const T {
    fn null() -> Self {
        ptr::null()
    }
    fn is_null(&self) -> bool {
        (*self).is_null()
    }
}

impl<T> NullCheck for *mut T {
    fn null() -> Self {
        ptr::null_mut()
    }
    fn is_null(&self) -> bool {
        (*self as *const T).is_null()
    }
}

/// Owned C handle released through `dealloc` when dropped, unless null.
#[derive(Debug)]
pub(crate) struct CBox<T: NullCheck> {
    pub(crate) ptr: T,
    dealloc: fn(T),
}

impl<T: NullCheck> CBox<T> {
    pub fn new(ptr: T, dealloc: fn(T)) -> Self {
        Self { ptr, dealloc }
    }

    /// Give up ownership, the box is null afterwards and dropping it is a no-op.
    pub fn release(&mut self) -> T {
        std::mem::replace(&mut self.ptr, T::null())
    }
}

impl<T: NullCheck> Drop for CBox<T> {
    fn drop(&mut self) {
        if !self.ptr.is_null() {
            (self.dealloc)(self.release());
        }
    }
}

impl<T: NullCheck> Deref for CBox<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.ptr
    }
}

impl<T: NullCheck> DerefMut for CBox<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.ptr
    }
}

impl<T: NullCheck + Pointer> Pointer for CBox<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Pointer::fmt(&self.ptr, f)
    }
}

unsafe impl<T: NullCheck> Send for CBox<T> {}

#[cfg(test)]
mod tests {
    use crate::cbox::CBox;
    use std::{
        ptr,
        sync::atomic::{AtomicUsize, Ordering},
    };

    static DESTROYED: AtomicUsize = AtomicUsize::new(0);

    fn destroy(_: *const i32) {
        DESTROYED.fetch_add(1, Ordering::SeqCst);
    }

    #[test]
    fn cbox_raw_pointer() {
        let v = 123;
        let ptr: *const i32 = &v;
        {
            let ptr = CBox::new(ptr::null::<i32>(), destroy);
            assert_eq!(*ptr, ptr::null());
        }
        assert_eq!(DESTROYED.load(Ordering::SeqCst), 0);
        {
            let ptr = CBox::new(ptr, destroy);
            assert_eq!(unsafe { **ptr }, 123);
            assert_eq!(DESTROYED.load(Ordering::SeqCst), 0);
        }
        assert_eq!(DESTROYED.load(Ordering::SeqCst), 1);
        {
            let mut boxed = CBox::new(ptr, destroy);
            let released = boxed.release();
            assert_eq!(released, ptr);
            assert!(boxed.is_null());
        }
        assert_eq!(DESTROYED.load(Ordering::SeqCst), 1);
    }
}
