//! The unwinding mechanism.
//!
//! Unwinding is a mechanism of forcefully "returning" through multiple call frames, called
//! *raising*, up until a special call frame, called *interceptor*. This is the
//! `resume_unwind`/`catch_unwind` pair of the standard library.
//!
//! Intermediate call frames don't need to cooperate: all destructors of locals are run, as if
//! `return` was called.
//!
//! The backend treats payloads as opaque. Telling a [`throw`](crate::throw)n cause apart from a
//! foreign panic is the job of [`Exception`](crate::Exception).
//!
//! With `panic = "abort"`, nothing can be intercepted: raising terminates the process.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind, resume_unwind};

/// An opaque unwinding payload.
pub(crate) type Payload = Box<dyn Any + Send>;

/// Raise a payload.
///
/// Unwinding proceeds to the closest (most nested) [`intercept`] frame. The panic hook is not
/// invoked.
#[inline]
pub(crate) fn raise(payload: Payload) -> ! {
    resume_unwind(payload)
}

/// Intercept a payload.
///
/// Returns `Ok` if `func` returns normally, or `Err` with the exact payload if it unwinds and the
/// payload is not caught by a nested interceptor.
///
/// `func` is not required to be unwind-safe. Callers observe state left behind by an interrupted
/// callback through their own handlers, which is the point of intercepting.
#[inline]
pub(crate) fn intercept<Func: FnOnce() -> R, R>(func: Func) -> Result<R, Payload> {
    catch_unwind(AssertUnwindSafe(func))
}
