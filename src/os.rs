//! Owners for POSIX resources.
//!
//! File descriptors, `malloc` allocations and stdio streams, each bound to
//! the libc function that frees it.

use std::ffi::CString;
use std::io;
use std::path::Path;

use libc::{c_int, c_void};

use crate::error::{Error, Result};
use crate::owner::HandleOwner;

crate::define_handle!(
    /// A POSIX file descriptor. `-1` is the null value.
    pub Fd: c_int = -1
);

fn close_fd(fd: Fd) -> io::Result<()> {
    let rc = unsafe { libc::close(fd.as_raw()) };
    if rc == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

crate::deleter_fn!(
    /// Closes a file descriptor with `close(2)`.
    pub CloseFd = close_fd: fn(Fd) -> io::Result<()>
);

crate::deleter_fn!(
    /// Frees a `malloc` allocation.
    pub Free = libc::free: unsafe fn(*mut c_void)
);

crate::deleter_fn!(
    /// Closes a stdio stream with `fclose(3)`.
    pub Fclose = libc::fclose: unsafe fn(*mut libc::FILE) -> c_int
);

/// An owned file descriptor.
pub type OwnedFd = HandleOwner<Fd, CloseFd>;

/// An owned `malloc` allocation.
pub type MallocBox = HandleOwner<*mut c_void, Free>;

/// An owned stdio stream.
pub type CFile = HandleOwner<*mut libc::FILE, Fclose>;

/// Create a pipe, returning `(read, write)` ends.
pub fn pipe() -> Result<(OwnedFd, OwnedFd)> {
    let mut fds: [c_int; 2] = [-1; 2];
    let rc = unsafe { libc::pipe(fds.as_mut_ptr()) };
    if rc == -1 {
        return Err(io::Error::last_os_error().into());
    }
    Ok((
        OwnedFd::new(Fd::from_raw(fds[0])),
        OwnedFd::new(Fd::from_raw(fds[1])),
    ))
}

/// Duplicate a file descriptor with `dup(2)`.
pub fn duplicate(fd: Fd) -> Result<OwnedFd> {
    if !fd.is_valid() {
        return Err(Error::InvalidHandle);
    }
    let new_fd = unsafe { libc::dup(fd.as_raw()) };
    if new_fd == -1 {
        return Err(io::Error::last_os_error().into());
    }
    Ok(OwnedFd::new(Fd::from_raw(new_fd)))
}

/// Allocate `size` bytes with `malloc(3)`.
///
/// Zero-sized requests allocate one byte so that success is never null.
pub fn malloc(size: usize) -> Result<MallocBox> {
    let ptr = unsafe { libc::malloc(size.max(1)) };
    if ptr.is_null() {
        return Err(io::Error::from(io::ErrorKind::OutOfMemory).into());
    }
    Ok(MallocBox::new(ptr))
}

/// Open a stdio stream with `fopen(3)`.
pub fn fopen(path: impl AsRef<Path>, mode: &str) -> Result<CFile> {
    let path = path.as_ref();
    let path_c = path_to_cstring(path)?;
    let mode_c = CString::new(mode).map_err(|_| {
        io::Error::new(io::ErrorKind::InvalidInput, "mode contains null byte")
    })?;

    let file = unsafe { libc::fopen(path_c.as_ptr(), mode_c.as_ptr()) };
    if file.is_null() {
        let err = io::Error::last_os_error();
        tracing::debug!(path = %path.display(), error = %err, "fopen failed");
        return Err(err.into());
    }
    Ok(CFile::new(file))
}

fn path_to_cstring(path: &Path) -> Result<CString> {
    use std::os::unix::ffi::OsStrExt;

    CString::new(path.as_os_str().as_bytes()).map_err(|_| {
        Error::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            "path contains null byte",
        ))
    })
}
