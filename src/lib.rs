//! Unique ownership of raw and opaque resource handles.
//!
//! A [`HandleOwner`] pairs a handle (a raw pointer, a file descriptor, an
//! opaque id from a C library) with the function that frees it, and runs that
//! function exactly once: on [`reset`](HandleOwner::reset), on
//! [`close`](HandleOwner::close), or when the owner is dropped.
//!
//! # Example
//!
//! ```
//! use deleter::{HandleOwner, Nullable};
//!
//! deleter::define_handle!(pub Texture: u32);
//!
//! fn destroy_texture(t: Texture) -> bool {
//!     t.is_valid()
//! }
//!
//! deleter::deleter_fn!(pub DestroyTexture = destroy_texture: fn(Texture) -> bool);
//!
//! fn main() -> deleter::Result<()> {
//!     let mut tex: HandleOwner<Texture, DestroyTexture> =
//!         HandleOwner::new(Texture::from_raw(42));
//!     assert_eq!(tex.get(), Texture::from_raw(42));
//!
//!     // Release now and look at the status instead of waiting for drop
//!     tex.close()?;
//!     assert!(tex.get().is_null());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Handle types
//!
//! Raw pointers and `Option<T>` are handles out of the box, with null and
//! `None` as their null values. Integer handles declare their null value with
//! [`define_handle!`]. On unix, [`os`] has owners for file descriptors,
//! `malloc` allocations and stdio streams.

pub mod error;
pub mod handle;
#[cfg(unix)]
pub mod os;
pub mod owner;
pub mod release;

// Re-export main types at the crate root
pub use error::{Error, Result};
pub use handle::Nullable;
pub use owner::HandleOwner;
pub use release::{Release, ReleaseStatus};

/// Library version constants.
pub mod version {
    /// Major version.
    pub const MAJOR: u32 = 0;
    /// Minor version.
    pub const MINOR: u32 = 1;
    /// Patch version.
    pub const PATCH: u32 = 0;

    /// Pack a version into one integer: major in the top byte, minor in the
    /// next 16 bits, patch in the low byte.
    pub const fn make_version(major: u32, minor: u32, patch: u32) -> u32 {
        (major << 24) | (minor << 8) | patch
    }

    /// Packed version of this library.
    pub const VERSION: u32 = make_version(MAJOR, MINOR, PATCH);

    /// Optional parts of the API, tagged with the version that added them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Feature {
        /// The [`Nullable`](crate::Nullable) contract and `define_handle!`.
        NullableHandles,
        /// Zero-sized release operations from `deleter_fn!`.
        DeleterFn,
        /// Release statuses surfaced through `reset` and `close`.
        ReleaseStatus,
        /// Ready-made POSIX owners in `os`.
        OsOwners,
    }

    impl Feature {
        /// Packed version that introduced this feature.
        pub const fn since(self) -> u32 {
            match self {
                Feature::NullableHandles
                | Feature::DeleterFn
                | Feature::ReleaseStatus
                | Feature::OsOwners => make_version(0, 1, 0),
            }
        }
    }

    /// Check if this build of the library provides `feature`.
    pub const fn has_feature(feature: Feature) -> bool {
        if matches!(feature, Feature::OsOwners) && !cfg!(unix) {
            return false;
        }
        VERSION >= feature.since()
    }
}

/// Get the version string (e.g., "0.1.0").
pub fn version_string() -> String {
    format!("{}.{}.{}", version::MAJOR, version::MINOR, version::PATCH)
}

/// Check if this library is compatible with code written against the given
/// major.minor version.
pub fn version_compatible(major: u32, minor: u32) -> bool {
    major == version::MAJOR && minor <= version::MINOR
}
