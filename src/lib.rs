//! try/catch/finally for closures.
//!
//! This crate lets you write exception-style control flow without exception syntax. The core is
//! [`run_guarded`]: it runs an action, hands anything the action raises to a handler, and always
//! runs a cleanup step exactly once before returning.
//!
//! ```rust
//! use guarded::*;
//! use std::cell::Cell;
//!
//! let recovered = Cell::new(false);
//! let closed = Cell::new(false);
//!
//! run_guarded(
//!     || throw("device busy"),
//!     |ex| {
//!         assert_eq!(ex.message(), Some("device busy"));
//!         recovered.set(true);
//!     },
//!     || closed.set(true),
//! );
//!
//! assert!(recovered.get());
//! assert!(closed.get());
//! ```
//!
//!
//! # Usage
//!
//! Raise a typed exception with [`throw`], catch it as a [`Result`] with [`catch`], or use the
//! trampolines [`run_guarded`], [`guarded`] and [`try_catch`]. [`Finally`] is the scope guard the
//! trampolines are built on and can be used on its own.
//!
//! Ordinary Rust panics are caught too. Handlers receive both kinds as an [`Exception`], which
//! records where the failure came from and can be downcast or rethrown.
//!
//!
//! # Ordering
//!
//! Steps run on the calling thread, in the order action, handler (only if the action failed),
//! cleanup. A failure inside the handler is not caught: cleanup runs first, then the failure
//! continues to the caller. A failure inside cleanup reaches the caller, unless a handler failure is
//! already unwinding; the cleanup failure is then logged through [`tracing`] and discarded.
//!
//!
//! # Platform support
//!
//! The mechanism is built on `catch_unwind` and needs `panic = "unwind"`, the default. With
//! `panic = "abort"`, the crate still compiles, but every [`throw`] and panic terminates the
//! process and handlers are never called.
//!
//! Closures may borrow from the caller's stack freely. Exceptions themselves must be
//! `Send + 'static`, like panic payloads.

#![warn(
    clippy::cargo,
    clippy::pedantic,
    clippy::missing_const_for_fn,
    clippy::allow_attributes,
    clippy::arithmetic_side_effects,
    clippy::as_underscore,
    clippy::assertions_on_result_states,
    clippy::clone_on_ref_ptr,
    clippy::default_numeric_fallback,
    clippy::deref_by_slicing,
    clippy::else_if_without_else,
    clippy::empty_drop,
    clippy::empty_structs_with_brackets,
    clippy::exhaustive_enums,
    clippy::exhaustive_structs,
    clippy::format_push_string,
    clippy::infinite_loop,
    clippy::missing_assert_message,
    clippy::missing_inline_in_public_items,
    clippy::mixed_read_write_in_expression,
    clippy::needless_raw_strings,
    clippy::pub_without_shorthand,
    clippy::redundant_type_annotations,
    clippy::same_name_method,
    clippy::self_named_module_files,
    clippy::semicolon_inside_block,
    clippy::separated_literal_suffix,
    clippy::shadow_unrelated,
    clippy::string_to_string,
    clippy::tests_outside_test_module,
    clippy::try_err,
    clippy::undocumented_unsafe_blocks,
    clippy::unneeded_field_pattern,
    clippy::unused_result_ok,
    clippy::wildcard_enum_match_arm,
)]
#![forbid(unsafe_code)]

mod api;
mod backend;
mod exception;
mod guard;

pub use api::{catch, throw};
pub use exception::Exception;
pub use guard::{Finally, guarded, run_guarded, try_catch};
