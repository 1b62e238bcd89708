use super::{api::catch, backend, exception::Exception};

/// Run a closure when the guard goes out of scope.
///
/// The closure runs exactly once: either when [`Finally::run`] is called, or when the guard is
/// dropped, including during unwinding. [`Finally::dismiss`] disarms it.
///
/// If the closure fails while the thread is already unwinding, that second failure is caught and
/// discarded with a warning, so the original failure keeps propagating instead of aborting the
/// process.
///
/// # Example
///
/// ```rust
/// use guarded::*;
/// use std::cell::Cell;
///
/// let closed = Cell::new(false);
/// let _ = catch(|| {
///     let _guard = Finally::new(|| closed.set(true));
///     throw("connection reset");
/// });
/// assert!(closed.get());
/// ```
#[must_use = "the closure runs as soon as an unbound guard is dropped"]
pub struct Finally<F: FnOnce()> {
    cleanup: Option<F>,
}

impl<F: FnOnce()> Finally<F> {
    /// Arm a guard.
    #[inline]
    pub const fn new(cleanup: F) -> Self {
        Self {
            cleanup: Some(cleanup),
        }
    }

    /// Run the closure now.
    ///
    /// Failures from the closure propagate to the caller.
    #[inline]
    pub fn run(mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }

    /// Disarm the guard without running the closure.
    #[inline]
    pub fn dismiss(mut self) {
        self.cleanup = None;
    }
}

impl<F: FnOnce()> Drop for Finally<F> {
    #[inline]
    fn drop(&mut self) {
        let Some(cleanup) = self.cleanup.take() else {
            return;
        };
        if !std::thread::panicking() {
            cleanup();
            return;
        }
        // A failure escaping `drop` during unwinding aborts the process.
        if let Err(payload) = backend::intercept(cleanup) {
            let ex = Exception::from_payload(payload);
            tracing::warn!(exception = ?ex, "cleanup failed during unwinding, discarding");
        }
    }
}

/// Try `action`, catch into `handler`, finally run `cleanup`.
///
/// The value-returning form of [`run_guarded`]: evaluates to what `action` returns, or, if it
/// fails, to what `handler` makes of the failure.
///
/// `cleanup` runs exactly once, after `action` and `handler` are done and before this function
/// returns. If `handler` fails, `cleanup` still runs first and the handler's failure then continues
/// to the caller. If `cleanup` itself fails, its failure reaches the caller, unless a handler failure
/// is already unwinding, in which case the cleanup failure is discarded.
///
/// # Example
///
/// ```rust
/// use guarded::*;
///
/// let parsed = guarded(
///     || "12".parse::<i32>().unwrap_or_else(|err| throw(err)),
///     |_| -1,
///     || {},
/// );
/// assert_eq!(parsed, 12);
///
/// let parsed = guarded(
///     || "twelve".parse::<i32>().unwrap_or_else(|err| throw(err)),
///     |_| -1,
///     || {},
/// );
/// assert_eq!(parsed, -1);
/// ```
#[inline]
pub fn guarded<R>(
    action: impl FnOnce() -> R,
    handler: impl FnOnce(Exception) -> R,
    cleanup: impl FnOnce(),
) -> R {
    let finally = Finally::new(cleanup);
    let value = match catch(action) {
        Ok(value) => value,
        Err(ex) => handler(ex),
    };
    tracing::trace!("running cleanup");
    finally.run();
    value
}

/// Try `action`, catch into `handler`, finally run `cleanup`.
///
/// Any failure raised by `action`, whether [`throw`](crate::throw)n or an ordinary panic, is
/// handed to `handler` and consumed there; it is never raised again by this function. `handler` is
/// not called if `action` returns normally.
///
/// `cleanup` runs exactly once per call, on every exit path. See [`guarded`] for how failures in
/// `handler` and `cleanup` are ordered.
///
/// # Example
///
/// ```rust
/// use guarded::*;
/// use std::cell::{Cell, RefCell};
///
/// let message = RefCell::new(String::new());
/// let cleanups = Cell::new(0);
///
/// run_guarded(
///     || throw("boom"),
///     |ex| *message.borrow_mut() = ex.to_string(),
///     || cleanups.set(cleanups.get() + 1),
/// );
///
/// assert_eq!(*message.borrow(), "boom");
/// assert_eq!(cleanups.get(), 1);
/// ```
#[inline]
pub fn run_guarded(action: impl FnOnce(), handler: impl FnOnce(Exception), cleanup: impl FnOnce()) {
    guarded(action, handler, cleanup);
}

/// [`run_guarded`] without a cleanup step.
#[inline]
pub fn try_catch(action: impl FnOnce(), handler: impl FnOnce(Exception)) {
    run_guarded(action, handler, || {});
}
