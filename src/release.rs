//! Release operations and their status values.

use crate::error::{Error, Result};

/// Outcome reported by a release operation.
///
/// The owner never retries; it only hands the status back or, on drop,
/// logs it.
pub trait ReleaseStatus {
    /// Check if the release succeeded.
    fn succeeded(&self) -> bool;

    /// Convert the status into a [`Result`].
    fn check(self) -> Result<()>;
}

impl ReleaseStatus for () {
    #[inline]
    fn succeeded(&self) -> bool {
        true
    }

    #[inline]
    fn check(self) -> Result<()> {
        Ok(())
    }
}

/// `true` means the handle was released.
impl ReleaseStatus for bool {
    #[inline]
    fn succeeded(&self) -> bool {
        *self
    }

    fn check(self) -> Result<()> {
        if self {
            Ok(())
        } else {
            Err(Error::Rejected)
        }
    }
}

/// POSIX convention: `0` is success, anything else is a failure code.
impl ReleaseStatus for i32 {
    #[inline]
    fn succeeded(&self) -> bool {
        *self == 0
    }

    fn check(self) -> Result<()> {
        if self == 0 {
            Ok(())
        } else {
            Err(Error::Status { code: self })
        }
    }
}

impl<T, E> ReleaseStatus for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    #[inline]
    fn succeeded(&self) -> bool {
        self.is_ok()
    }

    fn check(self) -> Result<()> {
        self.map(|_| ()).map_err(|e| Error::Release(Box::new(e)))
    }
}

/// A function that frees the resource named by a handle of type `H`.
///
/// Every `FnMut(H) -> R` closure or function item is a release operation.
/// Named, zero-sized release operations bound to a plain function come from
/// [`deleter_fn!`](crate::deleter_fn).
pub trait Release<H> {
    /// Status returned by the release operation.
    type Status: ReleaseStatus;

    /// Release the resource behind `handle`.
    ///
    /// Called at most once per handle, and never with the null handle.
    fn release(&mut self, handle: H) -> Self::Status;
}

impl<H, R, F> Release<H> for F
where
    F: FnMut(H) -> R,
    R: ReleaseStatus,
{
    type Status = R;

    #[inline]
    fn release(&mut self, handle: H) -> R {
        self(handle)
    }
}

/// Declare a zero-sized release operation bound to a function.
///
/// The `unsafe fn` form wraps an unsafe release function. Writing it asserts
/// that calling the function with an owned, non-null handle is sound.
///
/// ```
/// use deleter::{HandleOwner, Nullable};
///
/// deleter::define_handle!(pub Widget: u32);
///
/// fn destroy_widget(w: Widget) -> bool {
///     w.is_valid()
/// }
///
/// deleter::deleter_fn!(pub DestroyWidget = destroy_widget: fn(Widget) -> bool);
///
/// let mut w: HandleOwner<Widget, DestroyWidget> = HandleOwner::new(Widget::from_raw(3));
/// assert!(w.close().is_ok());
/// assert!(w.get().is_null());
/// ```
#[macro_export]
macro_rules! deleter_fn {
    (@status) => { () };
    (@status $status:ty) => { $status };
    ($(#[$meta:meta])* $vis:vis $name:ident = $func:path : fn($handle:ty) $(-> $status:ty)?) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::Release<$handle> for $name {
            type Status = $crate::deleter_fn!(@status $($status)?);

            #[inline]
            fn release(&mut self, handle: $handle) -> Self::Status {
                $func(handle)
            }
        }
    };
    ($(#[$meta:meta])* $vis:vis $name:ident = $func:path : unsafe fn($handle:ty) $(-> $status:ty)?) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::Release<$handle> for $name {
            type Status = $crate::deleter_fn!(@status $($status)?);

            #[inline]
            fn release(&mut self, handle: $handle) -> Self::Status {
                unsafe { $func(handle) }
            }
        }
    };
}
