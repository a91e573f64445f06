//! Handle types and the null-sentinel contract.
//!
//! A handle is any small `Copy` value naming a resource owned elsewhere: a raw
//! pointer, a file descriptor, an id returned by a C library. Each handle type
//! designates one value as "no resource" through [`Nullable`].

use std::ptr;

/// A handle type with a distinguished null value.
///
/// Raw pointers and `Option<T>` implement this out of the box. Opaque value
/// handles get an implementation from [`define_handle!`](crate::define_handle).
pub trait Nullable: Copy + PartialEq {
    /// The value meaning "no resource".
    const NULL: Self;

    /// Check if this handle is the null value.
    #[inline]
    fn is_null(&self) -> bool {
        *self == Self::NULL
    }
}

impl<T> Nullable for *mut T {
    const NULL: Self = ptr::null_mut();

    #[inline]
    fn is_null(&self) -> bool {
        <*mut T>::is_null(*self)
    }
}

impl<T> Nullable for *const T {
    const NULL: Self = ptr::null();

    #[inline]
    fn is_null(&self) -> bool {
        <*const T>::is_null(*self)
    }
}

impl<T: Copy + PartialEq> Nullable for Option<T> {
    const NULL: Self = None;

    #[inline]
    fn is_null(&self) -> bool {
        self.is_none()
    }
}

/// Define an opaque handle type over an integer representation.
///
/// The sentinel after `=` is the null value; it defaults to `0`.
///
/// ```
/// deleter::define_handle!(
///     /// A POSIX file descriptor.
///     pub Descriptor: i32 = -1
/// );
/// deleter::define_handle!(pub SessionId: u64);
///
/// use deleter::Nullable;
/// assert!(Descriptor::NULL.is_null());
/// assert!(Descriptor::from_raw(0).is_valid());
/// assert!(SessionId::default().is_null());
/// ```
#[macro_export]
macro_rules! define_handle {
    ($(#[$meta:meta])* $vis:vis $name:ident : $repr:ty) => {
        $crate::define_handle!($(#[$meta])* $vis $name: $repr = 0);
    };
    ($(#[$meta:meta])* $vis:vis $name:ident : $repr:ty = $null:expr) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $name($repr);

        impl $name {
            /// The invalid (null) handle.
            pub const NULL: Self = Self($null);

            /// Wrap a raw handle value.
            #[inline]
            pub const fn from_raw(raw: $repr) -> Self {
                Self(raw)
            }

            /// Get the raw handle value.
            #[inline]
            pub const fn as_raw(&self) -> $repr {
                self.0
            }

            /// Check if this handle is valid (not the null sentinel).
            #[inline]
            pub const fn is_valid(&self) -> bool {
                self.0 != $null
            }
        }

        impl ::std::default::Default for $name {
            fn default() -> Self {
                Self::NULL
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", stringify!($name), self.0)
                } else {
                    write!(f, "{}(null)", stringify!($name))
                }
            }
        }

        impl $crate::Nullable for $name {
            const NULL: Self = Self($null);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    define_handle!(Token: u32);
    define_handle!(Slot: i64 = -1);

    #[test]
    fn test_pointer_null() {
        let p: *mut u8 = Nullable::NULL;
        assert!(Nullable::is_null(&p));

        let mut x = 5u8;
        let q: *mut u8 = &mut x;
        assert!(!Nullable::is_null(&q));

        let c: *const u8 = <*const u8 as Nullable>::NULL;
        assert!(Nullable::is_null(&c));
    }

    #[test]
    fn test_option_null() {
        assert!(<Option<u16> as Nullable>::NULL.is_none());
        assert!(Nullable::is_null(&None::<u16>));
        assert!(!Nullable::is_null(&Some(0u16)));
    }

    #[test]
    fn test_defined_handle_default_sentinel() {
        assert!(Token::default().is_null());
        assert!(!Token::default().is_valid());
        assert!(Token::from_raw(7).is_valid());
        assert_eq!(Token::from_raw(7).as_raw(), 7);
    }

    #[test]
    fn test_defined_handle_custom_sentinel() {
        assert_eq!(Slot::NULL.as_raw(), -1);
        assert!(Slot::from_raw(0).is_valid());
        assert!(Slot::from_raw(-1).is_null());
    }

    #[test]
    fn test_defined_handle_debug() {
        assert_eq!(format!("{:?}", Slot::from_raw(3)), "Slot(3)");
        assert_eq!(format!("{:?}", Slot::NULL), "Slot(null)");
    }
}
