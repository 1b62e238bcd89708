use crate::backend::{self, Payload};
use core::any::{Any, type_name};
use core::fmt;

/// Wrapper around causes raised with [`throw`](crate::throw).
///
/// Foreign panics never carry this type, which is how the two origins are told apart on catch.
pub(crate) struct Thrown {
    cause: Payload,
    type_name: &'static str,
}

impl Thrown {
    pub(crate) fn new<E: Any + Send>(cause: E) -> Self {
        Self {
            cause: Box::new(cause),
            type_name: type_name::<E>(),
        }
    }
}

/// A captured failure.
///
/// This is what handlers receive when the guarded action unwinds. The failure either came from
/// [`throw`](crate::throw), in which case the cause and its type name are known, or from an
/// ordinary Rust panic, in which case the panic payload is kept as-is.
///
/// Dropping an `Exception` consumes the failure. Use [`Exception::rethrow`] to raise it again.
///
/// # Example
///
/// ```rust
/// use guarded::*;
///
/// let ex = catch(|| throw(42u32)).unwrap_err();
/// assert!(!ex.is_panic());
/// assert_eq!(ex.type_name(), Some("u32"));
/// assert_eq!(ex.downcast::<u32>().unwrap(), 42);
/// ```
pub struct Exception {
    payload: Payload,
    // `Some` iff the failure was raised with `throw`.
    thrown_as: Option<&'static str>,
}

impl Exception {
    pub(crate) fn from_payload(payload: Payload) -> Self {
        match payload.downcast::<Thrown>() {
            Ok(thrown) => {
                let Thrown { cause, type_name } = *thrown;
                Self {
                    payload: cause,
                    thrown_as: Some(type_name),
                }
            }
            Err(payload) => Self {
                payload,
                thrown_as: None,
            },
        }
    }

    /// Whether the failure is an ordinary Rust panic rather than a [`throw`](crate::throw)n cause.
    #[must_use]
    #[inline]
    pub const fn is_panic(&self) -> bool {
        self.thrown_as.is_none()
    }

    /// Type name of the thrown cause, or `None` for panics.
    ///
    /// The name is informational, as with [`core::any::type_name`].
    #[must_use]
    #[inline]
    pub const fn type_name(&self) -> Option<&'static str> {
        self.thrown_as
    }

    /// Whether the cause (or panic payload) is of type `T`.
    #[must_use]
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.payload.is::<T>()
    }

    #[must_use]
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref()
    }

    #[must_use]
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.payload.downcast_mut()
    }

    /// Take the cause out as `T`.
    ///
    /// # Errors
    ///
    /// Returns the exception back unchanged if the cause is not a `T`.
    #[inline]
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        let Self { payload, thrown_as } = self;
        match payload.downcast::<T>() {
            Ok(cause) => Ok(*cause),
            Err(payload) => Err(Self { payload, thrown_as }),
        }
    }

    /// The message of a string-like cause.
    ///
    /// Covers `panic!("...")` payloads as well as thrown `&'static str` and `String` causes.
    #[must_use]
    #[inline]
    pub fn message(&self) -> Option<&str> {
        if let Some(s) = self.payload.downcast_ref::<&'static str>() {
            Some(*s)
        } else {
            self.payload.downcast_ref::<String>().map(String::as_str)
        }
    }

    /// Unwrap into the bare cause (or panic payload), dropping origin information.
    #[must_use]
    #[inline]
    pub fn into_payload(self) -> Box<dyn Any + Send> {
        self.payload
    }

    /// Raise the failure again, preserving its origin.
    ///
    /// A thrown cause is rethrown and will again be reported with its type name; a panic resumes
    /// unwinding with the same payload. Like [`throw`](crate::throw), this does not invoke the
    /// panic hook.
    ///
    /// # Example
    ///
    /// ```rust
    /// use guarded::*;
    ///
    /// let ex = catch(|| {
    ///     if let Err(ex) = catch(|| throw("inner")) {
    ///         ex.rethrow();
    ///     }
    /// })
    /// .unwrap_err();
    /// assert_eq!(ex.message(), Some("inner"));
    /// assert_eq!(ex.type_name(), Some("&str"));
    /// ```
    #[inline]
    pub fn rethrow(self) -> ! {
        let Self { payload, thrown_as } = self;
        match thrown_as {
            Some(type_name) => backend::raise(Box::new(Thrown {
                cause: payload,
                type_name,
            })),
            None => backend::raise(payload),
        }
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.message(), self.thrown_as) {
            (Some(message), _) => f.write_str(message),
            (None, Some(type_name)) => write!(f, "exception of type `{type_name}`"),
            (None, None) => f.write_str("panic with a non-string payload"),
        }
    }
}

impl fmt::Debug for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exception")
            .field("panic", &self.is_panic())
            .field("type_name", &self.thrown_as)
            .field("message", &self.message())
            .finish_non_exhaustive()
    }
}

impl std::error::Error for Exception {}
