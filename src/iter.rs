//! Iterating a coroutine drains its remaining yields in order.

use_prelude!();

use crate::coroutine::Coroutine;

/// Iterator over the values a [`Coroutine`] has yet to yield.
///
/// Each step observes the pending value and resumes past it; iteration
/// ends (and stays ended) once the coroutine is terminal. A body that
/// panics mid-iteration just ends the iteration; observe the panic with
/// [`Coroutine::get`] before converting if it matters.
///
/// ```rust
/// use ::thread_gen::Coroutine;
///
/// let evens = Coroutine::new(|yielder| {
///     for n in (0_u8 .. 10).filter(|n| n % 2 == 0) {
///         yielder.yield_(n);
///     }
/// });
///
/// assert_eq!(
///     evens.into_iter().collect::<Vec<_>>(),
///     [0, 2, 4, 6, 8],
/// );
/// ```
pub
struct IntoIter<YieldValue> (
    pub(in crate) Coroutine<YieldValue>,
);

impl<YieldValue : Clone> Iterator for IntoIter<YieldValue> {
    type Item = YieldValue;

    fn next (self: &'_ mut Self)
      -> Option<YieldValue>
    {
        let value = self.0.get().ok()?;
        let _ = self.0.resume();
        Some(value)
    }
}

impl<YieldValue : Clone> IntoIterator for Coroutine<YieldValue> {
    type Item = YieldValue;
    type IntoIter = IntoIter<YieldValue>;

    #[inline]
    fn into_iter (self: Self)
      -> IntoIter<YieldValue>
    {
        IntoIter(self)
    }
}
