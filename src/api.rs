use super::{
    backend,
    exception::{Exception, Thrown},
};
use core::any::Any;

/// Throw an exception.
///
/// Unwinds to the closest enclosing [`catch`] or [`run_guarded`](crate::run_guarded), running
/// destructors along the way. Unlike [`panic!`], the panic hook is not invoked, so nothing is
/// printed.
///
/// If uncaught, the exception terminates the thread, like a panic would. With `panic = "abort"`
/// the process is aborted instead.
///
/// # Example
///
/// ```should_panic
/// use guarded::*;
///
/// throw::<&'static str>("Oops!");
/// ```
#[inline]
pub fn throw<E: Any + Send>(cause: E) -> ! {
    backend::raise(Box::new(Thrown::new(cause)))
}

/// Catch an exception.
///
/// If `func` returns a value, this function wraps it in [`Ok`].
///
/// # Errors
///
/// If `func` throws an exception or panics, the failure is returned in [`Err`]. Use
/// [`Exception::rethrow`] to send it further up.
///
/// # Example
///
/// ```rust
/// use guarded::*;
///
/// let res = catch(|| throw::<&'static str>("Oops!"));
/// assert_eq!(res.unwrap_err().downcast::<&'static str>().unwrap(), "Oops!");
///
/// let res = catch(|| 1 + 1);
/// assert_eq!(res.unwrap(), 2);
/// ```
#[inline]
pub fn catch<R>(func: impl FnOnce() -> R) -> Result<R, Exception> {
    backend::intercept(func).map_err(|payload| {
        let ex = Exception::from_payload(payload);
        tracing::trace!(exception = ?ex, "intercepted exception");
        ex
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn catch_ok() {
        let result = catch(|| String::from("Hello, world!"));
        assert_eq!(result.unwrap(), "Hello, world!");
    }

    #[test]
    fn catch_thrown() {
        let result = catch(|| throw(String::from("Hello, world!")));
        let ex = result.unwrap_err();
        assert!(!ex.is_panic());
        assert_eq!(ex.downcast::<String>().unwrap(), "Hello, world!");
    }

    #[test]
    fn catch_panic() {
        let result = catch(|| panic!("Hello, {}!", "world"));
        let ex = result.unwrap_err();
        assert!(ex.is_panic());
        assert_eq!(ex.message(), Some("Hello, world!"));
    }

    #[test]
    fn nested_catch() {
        let result = catch(|| {
            let inner = catch(|| throw(1i32));
            assert_eq!(inner.unwrap_err().downcast::<i32>().unwrap(), 1);
            throw(2i32);
        });
        assert_eq!(result.unwrap_err().downcast::<i32>().unwrap(), 2);
    }

    #[test]
    fn rethrow_with_context() {
        fn f() {
            throw(anyhow::anyhow!("f failed"));
        }

        fn g() {
            if let Err(ex) = catch(f) {
                match ex.downcast::<anyhow::Error>() {
                    Ok(err) => throw(err.context("in g")),
                    Err(ex) => ex.rethrow(),
                }
            }
        }

        let ex = catch(g).unwrap_err();
        let err = ex.downcast::<anyhow::Error>().unwrap();
        assert_eq!(format!("{err:#}"), "in g: f failed");
    }

    #[test]
    fn destructors_are_run() {
        struct Dropper<'a>(&'a mut bool);
        impl Drop for Dropper<'_> {
            fn drop(&mut self) {
                *self.0 = true;
            }
        }

        let mut destructor_was_run = false;
        let result = catch(|| {
            let _dropper = Dropper(&mut destructor_was_run);
            throw(());
        });
        assert!(result.is_err());
        assert!(destructor_was_run);
    }
}
