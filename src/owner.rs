//! Unique ownership of a handle.

use std::fmt;
use std::mem;

use crate::error::{Error, Result};
use crate::handle::Nullable;
use crate::release::{Release, ReleaseStatus};

/// Owns a handle and releases it exactly once.
///
/// Holds either the null handle (non-owning) or a live handle. Dropping an
/// owning instance runs the release operation `D` on the handle.
///
/// # Example
///
/// ```
/// use std::cell::RefCell;
/// use deleter::HandleOwner;
///
/// let freed = RefCell::new(Vec::new());
/// {
///     let owner = HandleOwner::with_deleter(Some(42), |h: Option<i32>| {
///         freed.borrow_mut().extend(h);
///     });
///     assert_eq!(owner.get(), Some(42));
/// }
/// assert_eq!(*freed.borrow(), vec![42]);
/// ```
pub struct HandleOwner<H, D>
where
    H: Nullable,
    D: Release<H>,
{
    handle: H,
    deleter: D,
}

impl<H, D> HandleOwner<H, D>
where
    H: Nullable,
    D: Release<H>,
{
    /// Take ownership of `handle`, releasing it later with a default `D`.
    ///
    /// The handle must be freshly acquired or null, and not owned elsewhere.
    pub fn new(handle: H) -> Self
    where
        D: Default,
    {
        Self::with_deleter(handle, D::default())
    }

    /// Take ownership of `handle`, releasing it later with `deleter`.
    pub fn with_deleter(handle: H, deleter: D) -> Self {
        if !handle.is_null() {
            tracing::trace!(handle_type = std::any::type_name::<H>(), "handle acquired");
        }
        Self { handle, deleter }
    }

    /// Create a non-owning instance.
    pub fn null() -> Self
    where
        D: Default,
    {
        Self::null_with_deleter(D::default())
    }

    /// Create a non-owning instance that will use `deleter` once reset.
    pub fn null_with_deleter(deleter: D) -> Self {
        Self {
            handle: H::NULL,
            deleter,
        }
    }

    /// Get the handle without giving up ownership.
    #[inline]
    pub fn get(&self) -> H {
        self.handle
    }

    /// Get the handle, or [`Error::InvalidHandle`] if nothing is owned.
    pub fn try_get(&self) -> Result<H> {
        if self.handle.is_null() {
            return Err(Error::InvalidHandle);
        }
        Ok(self.handle)
    }

    /// Check if a live handle is owned.
    #[inline]
    pub fn is_owning(&self) -> bool {
        !self.handle.is_null()
    }

    /// Check if the stored handle equals `handle`.
    ///
    /// `holds(H::NULL)` is true exactly when nothing is owned.
    #[inline]
    pub fn holds(&self, handle: H) -> bool {
        self.handle == handle
    }

    /// Get the release operation.
    pub fn deleter(&self) -> &D {
        &self.deleter
    }

    /// Get the release operation mutably.
    pub fn deleter_mut(&mut self) -> &mut D {
        &mut self.deleter
    }

    /// Give up ownership without releasing.
    ///
    /// Returns the handle and leaves this instance null. The caller becomes
    /// responsible for the resource.
    pub fn release(&mut self) -> H {
        let handle = mem::replace(&mut self.handle, H::NULL);
        if !handle.is_null() {
            tracing::trace!(handle_type = std::any::type_name::<H>(), "ownership released");
        }
        handle
    }

    /// Consume the owner, returning the handle and the release operation.
    ///
    /// The handle is not released.
    pub fn into_parts(mut self) -> (H, D) {
        let handle = mem::replace(&mut self.handle, H::NULL);
        let this = mem::ManuallyDrop::new(self);
        // SAFETY: `this` is never used or dropped again.
        let deleter = unsafe { std::ptr::read(&this.deleter) };
        (handle, deleter)
    }

    /// Release the owned handle, if any, then store `handle`.
    ///
    /// Returns the release operation's status when it ran. Resetting a null
    /// owner never calls the release operation, so repeated resets release
    /// at most once.
    pub fn reset(&mut self, handle: H) -> Option<D::Status> {
        let old = mem::replace(&mut self.handle, handle);
        if old.is_null() {
            return None;
        }
        let status = self.deleter.release(old);
        tracing::debug!(
            handle_type = std::any::type_name::<H>(),
            succeeded = status.succeeded(),
            "handle released"
        );
        Some(status)
    }

    /// Release the owned handle, if any, and check the release status.
    ///
    /// Called automatically on drop, but can be called explicitly to handle
    /// any errors that may occur during release.
    pub fn close(&mut self) -> Result<()> {
        match self.reset(H::NULL) {
            Some(status) => status.check(),
            None => Ok(()),
        }
    }

    /// Move ownership into a new instance, leaving this one null.
    pub fn take(&mut self) -> Self
    where
        D: Clone,
    {
        let handle = mem::replace(&mut self.handle, H::NULL);
        if !handle.is_null() {
            tracing::trace!(handle_type = std::any::type_name::<H>(), "ownership moved");
        }
        Self {
            handle,
            deleter: self.deleter.clone(),
        }
    }
}

impl<H, D> Drop for HandleOwner<H, D>
where
    H: Nullable,
    D: Release<H>,
{
    fn drop(&mut self) {
        if let Some(status) = self.reset(H::NULL) {
            // Errors on drop are only logged
            if let Err(e) = status.check() {
                tracing::warn!(
                    handle_type = std::any::type_name::<H>(),
                    error = %e,
                    "release failed during drop"
                );
            }
        }
    }
}

impl<H, D> Default for HandleOwner<H, D>
where
    H: Nullable,
    D: Release<H> + Default,
{
    fn default() -> Self {
        Self::null()
    }
}

impl<H, D> fmt::Debug for HandleOwner<H, D>
where
    H: Nullable + fmt::Debug,
    D: Release<H>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandleOwner")
            .field("handle", &self.handle)
            .field("owning", &self.is_owning())
            .finish()
    }
}

impl<H, D, E> PartialEq<HandleOwner<H, E>> for HandleOwner<H, D>
where
    H: Nullable,
    D: Release<H>,
    E: Release<H>,
{
    fn eq(&self, other: &HandleOwner<H, E>) -> bool {
        self.handle == other.handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    crate::define_handle!(Id: u32);

    fn recorder() -> (Rc<RefCell<Vec<u32>>>, impl FnMut(Id) + Clone) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        (log, move |h: Id| sink.borrow_mut().push(h.as_raw()))
    }

    #[test]
    fn test_null_is_not_owning() {
        let (log, op) = recorder();
        let owner: HandleOwner<Id, _> = HandleOwner::null_with_deleter(op);
        assert!(!owner.is_owning());
        assert!(owner.holds(Id::NULL));
        assert!(owner.try_get().unwrap_err().is_invalid_handle());
        drop(owner);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_reset_returns_status() {
        let mut owner = HandleOwner::with_deleter(Id::from_raw(1), |h: Id| h.as_raw() == 1);
        assert_eq!(owner.reset(Id::from_raw(2)), Some(true));
        assert_eq!(owner.get(), Id::from_raw(2));
        assert_eq!(owner.reset(Id::NULL), Some(false));
        assert_eq!(owner.reset(Id::NULL), None);
    }

    #[test]
    fn test_into_parts_skips_release() {
        let (log, op) = recorder();
        let owner = HandleOwner::with_deleter(Id::from_raw(8), op);
        let (handle, mut op) = owner.into_parts();
        assert_eq!(handle, Id::from_raw(8));
        assert!(log.borrow().is_empty());

        op(handle);
        assert_eq!(*log.borrow(), vec![8]);
    }

    #[test]
    fn test_compare_with_handle() {
        let (_log, op) = recorder();
        let owner = HandleOwner::with_deleter(Id::from_raw(4), op);
        assert!(owner.holds(Id::from_raw(4)));
        assert!(!owner.holds(Id::NULL));

        let other = HandleOwner::with_deleter(Id::from_raw(4), |_: Id| true);
        assert!(owner == other);
        let _ = other.into_parts();
    }

    #[test]
    fn test_debug() {
        let (_log, op) = recorder();
        let owner = HandleOwner::with_deleter(Id::from_raw(4), op);
        assert_eq!(
            format!("{:?}", owner),
            "HandleOwner { handle: Id(4), owning: true }"
        );
    }
}
