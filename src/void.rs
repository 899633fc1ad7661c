//! The value-less variant: same alternation and cancellation protocol as
//! [`Coroutine`][crate::Coroutine], with the value channel stripped out.
//! The body only signals suspension points; there is nothing to `get`.

use_prelude!();

/// A coroutine whose suspension points carry no value.
///
/// ```rust
/// use ::thread_gen::VoidCoroutine;
///
/// let mut steps = VoidCoroutine::new(|yielder| {
///     yielder.yield_(); // step 1 done
///     yielder.yield_(); // step 2 done
/// });
///
/// assert!(steps.is_alive());
/// steps.resume().unwrap();
/// steps.resume().unwrap();
/// assert!(!steps.is_alive());
/// ```
pub
struct VoidCoroutine {
    pub(in crate)
    channel: Arc<Channel<()>>,

    pub(in crate)
    worker: Option<thread::JoinHandle<()>>,
}

/// The body-side handle of a [`VoidCoroutine`].
pub
struct VoidYielder {
    pub(in crate)
    channel: Arc<Channel<()>>,
}

impl VoidYielder {
    /// Suspends the body until the driver resumes it, publishing nothing.
    /// Unwinds the body's remaining logic if the handle was dropped in the
    /// meantime.
    pub
    fn yield_ (self: &'_ Self)
    {
        self.channel.pause();
    }
}

impl VoidCoroutine {
    /// Spawns the worker and blocks until the body first suspends or
    /// returns. See [`Coroutine::new`][crate::Coroutine::new].
    ///
    /// # Panics
    ///
    /// Panics if the OS refuses to spawn a thread; use
    /// [`Builder::spawn_void`][crate::Builder::spawn_void] for the
    /// fallible version.
    pub
    fn new (body: impl FnOnce(&VoidYielder) + Send + 'static)
      -> Self
    {
        crate::Builder::new()
            .spawn_void(body)
            .expect("failed to spawn coroutine worker thread")
    }

    /// Wakes the body and blocks until it yields again or finishes.
    ///
    /// # Errors
    ///
    /// [`Error::Completed`] if already terminal, [`Error::BodyPanicked`]
    /// if the body escaped with a panic.
    pub
    fn resume (self: &'_ mut Self)
      -> Result<(), Error>
    {
        self.channel.resume()
    }

    /// Whether the body can still make progress. Non-blocking, never
    /// fails.
    pub
    fn is_alive (self: &'_ Self)
      -> bool
    {
        self.channel.is_alive()
    }
}

impl Drop for VoidCoroutine {
    fn drop (self: &'_ mut Self)
    {
        let Self { ref channel, ref mut worker } = *self;
        ::unwind_safe::with_state(())
            .try_eval(move |&mut ()| channel.close())
            .finally(move |()| if let Some(worker) = worker.take() {
                let _ = worker.join();
            })
    }
}
