//! Failures a driver can observe on its side of the handoff.
//!
//! Protocol misuse is surfaced as a value, never as an assertion or
//! undefined behavior; a panic escaping the body is captured on the worker
//! and handed back here rather than silently killing a detached thread.

use_prelude!();

use ::core::fmt;

/// Errors reported by [`resume`][`crate::Coroutine::resume`] and
/// [`get`][`crate::Coroutine::get`].
#[derive(
    Debug,
    Clone,
    PartialEq, Eq,
)]
#[non_exhaustive]
pub
enum Error {
    /// The coroutine is terminal: its body has already returned, been
    /// cancelled, or panicked. Resuming it is a protocol violation.
    Completed,

    /// No yielded value is currently pending: either the body never
    /// yielded, or it has since gone terminal.
    NoValue,

    /// The body escaped with a panic unrelated to cancellation. The
    /// captured panic message is reported on every subsequent fallible
    /// driver operation.
    BodyPanicked(String),
}

impl fmt::Display for Error {
    fn fmt (self: &'_ Self, f: &'_ mut fmt::Formatter<'_>)
      -> fmt::Result
    {
        match *self {
            | Self::Completed => {
                f.write_str("coroutine has already completed")
            },
            | Self::NoValue => {
                f.write_str("no yielded value is available")
            },
            | Self::BodyPanicked(ref msg) => {
                write!(f, "coroutine body panicked: {}", msg)
            },
        }
    }
}

impl ::std::error::Error for Error {}
