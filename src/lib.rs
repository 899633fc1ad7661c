//! Thread-backed generators on stable Rust.
//!
//! Each [`Coroutine`] owns one dedicated worker thread running the
//! caller-supplied body. Driver and body strictly alternate through a
//! mutex-and-condvar handoff: the body publishes a value at each
//! [`yield_`][`Yielder::yield_`], the driver observes it with
//! [`get`][`Coroutine::get`] and hands control back with
//! [`resume`][`Coroutine::resume`]. Dropping the handle cancels the body
//! cooperatively at its next suspension point and joins the worker before
//! returning.
//!
//! # Example
//!
//! ```rust
//! use ::thread_gen::prelude::*;
//!
//! let mut fib = Coroutine::new(|yielder| {
//!     let (mut a, mut b) = (1_u64, 1_u64);
//!     for _ in 0 .. 5 {
//!         yielder.yield_(a);
//!         let next = a + b;
//!         a = b;
//!         b = next;
//!     }
//! });
//!
//! let mut produced = vec![];
//! while fib.is_alive() {
//!     produced.push(fib.get().unwrap());
//!     fib.resume().unwrap();
//! }
//! assert_eq!(produced, [1, 1, 2, 3, 5]);
//! ```

#![warn(
    future_incompatible,
    rust_2018_compatibility,
    missing_docs,
    clippy::cargo,
    clippy::pedantic,
)]
#![deny(
    unused_must_use,
)]
#![doc(test(attr(deny(warnings))))]

#[macro_use]
mod utils;

pub mod prelude;

pub use self::error::Error;
mod error;

mod handoff;

pub use self::coroutine::{Builder, Coroutine, Yielder};
mod coroutine;

pub use self::void::{VoidCoroutine, VoidYielder};
mod void;

pub use self::iter::IntoIter;
mod iter;

#[cfg(test)]
mod tests;
