//! The value-carrying variant: [`Coroutine`], its body-side [`Yielder`],
//! and the [`Builder`] that owns worker spawning for both variants.

use_prelude!();

use {
    ::std::io,
    ::log::trace,
    crate::{
        handoff::drive,
        void::{VoidCoroutine, VoidYielder},
    },
};

/// A coroutine whose body publishes a value of type `YieldValue` at each
/// suspension point.
///
/// The handle exclusively owns one dedicated worker thread for its whole
/// lifetime. Construction blocks until the body reaches its first
/// suspension point (or returns), so a freshly constructed coroutine
/// either has a value ready for [`get`][`Coroutine::get`] or is already
/// terminal.
///
/// Dropping the handle requests cooperative cancellation, wakes the body,
/// and joins the worker: after the drop returns, no execution of the body
/// remains.
///
/// # Example
///
/// ```rust
/// use ::thread_gen::Coroutine;
///
/// let mut numbers = Coroutine::new(|yielder| {
///     for n in 1_u32 ..= 3 {
///         yielder.yield_(n);
///     }
/// });
///
/// assert_eq!(numbers.get(), Ok(1));
/// numbers.resume().unwrap();
/// assert_eq!(numbers.get(), Ok(2));
/// numbers.resume().unwrap();
/// assert_eq!(numbers.get(), Ok(3));
/// numbers.resume().unwrap();
/// assert!(!numbers.is_alive());
/// ```
pub
struct Coroutine<YieldValue> {
    pub(in crate)
    channel: Arc<Channel<YieldValue>>,

    /// `Some` until teardown takes it for the guaranteed join.
    pub(in crate)
    worker: Option<thread::JoinHandle<()>>,
}

/// The body-side handle of a [`Coroutine`]: the only way to reach a
/// suspension point.
///
/// A `&Yielder` is lent to the body for the duration of its invocation
/// and cannot escape it.
pub
struct Yielder<YieldValue> {
    pub(in crate)
    channel: Arc<Channel<YieldValue>>,
}

impl<YieldValue> Yielder<YieldValue> {
    /// Publishes `value` and suspends the body until the driver resumes
    /// it. If the handle was dropped in the meantime, the body's remaining
    /// logic is unwound instead of ever running again; the unwinding stays
    /// inside the worker thread.
    pub
    fn yield_ (self: &'_ Self, value: YieldValue)
    {
        self.channel.publish(value);
    }
}

impl<YieldValue : Send + 'static> Coroutine<YieldValue> {
    /// Spawns the worker and blocks until the body first suspends or
    /// returns.
    ///
    /// A body that returns without yielding is not an error; the returned
    /// handle is simply already terminal.
    ///
    /// # Panics
    ///
    /// Panics if the OS refuses to spawn a thread, like
    /// [`::std::thread::spawn`] does; use [`Builder::spawn`] for the
    /// fallible version.
    pub
    fn new (body: impl FnOnce(&Yielder<YieldValue>) + Send + 'static)
      -> Self
    {
        Builder::new()
            .spawn(body)
            .expect("failed to spawn coroutine worker thread")
    }
}

impl<YieldValue> Coroutine<YieldValue> {
    /// Wakes the body and blocks until it yields again or finishes.
    ///
    /// # Errors
    ///
    ///   - [`Error::Completed`] if the coroutine is already terminal:
    ///     resuming a finished coroutine is a protocol violation, reported
    ///     rather than left undefined.
    ///
    ///   - [`Error::BodyPanicked`] if the body escaped with a panic,
    ///     whether before this call or during it.
    pub
    fn resume (self: &'_ mut Self)
      -> Result<(), Error>
    {
        self.channel.resume()
    }

    /// Returns a copy of the most recently yielded value.
    ///
    /// There is no value queue: calling `get` twice between two resumes
    /// observes the same value twice.
    ///
    /// # Errors
    ///
    ///   - [`Error::NoValue`] if no value is pending: the body never
    ///     yielded, or has since gone terminal.
    ///
    ///   - [`Error::BodyPanicked`] if the body escaped with a panic.
    pub
    fn get (self: &'_ Self)
      -> Result<YieldValue, Error>
    where
        YieldValue : Clone,
    {
        self.channel.value()
    }

    /// Whether the body can still make progress. Non-blocking, never
    /// fails; `false` once the body has returned, been cancelled, or
    /// panicked.
    pub
    fn is_alive (self: &'_ Self)
      -> bool
    {
        self.channel.is_alive()
    }
}

impl<YieldValue> Drop for Coroutine<YieldValue> {
    fn drop (self: &'_ mut Self)
    {
        let Self { ref channel, ref mut worker } = *self;
        ::unwind_safe::with_state(())
            .try_eval(move |&mut ()| channel.close())
            .finally(move |()| if let Some(worker) = worker.take() {
                // the worker exits at its next suspension point; its
                // panics were already captured by `drive`.
                let _ = worker.join();
            })
    }
}

/// Coroutine factory with control over the worker thread.
///
/// This is the fallible, configurable counterpart of
/// [`Coroutine::new`] / [`VoidCoroutine::new`][crate::VoidCoroutine::new]:
///
/// ```rust
/// use ::thread_gen::Builder;
///
/// let greeter = Builder::new()
///     .name("greeter")
///     .spawn(|yielder| yielder.yield_("hello"))
///     .unwrap();
///
/// assert_eq!(greeter.get(), Ok("hello"));
/// ```
pub
struct Builder {
    name: Option<String>,
    stack_size: Option<usize>,
}

impl Builder {
    /// A builder with default worker settings.
    pub
    fn new ()
      -> Self
    {
        Self {
            name: None,
            stack_size: None,
        }
    }

    /// Names the worker thread; defaults to `"coroutine"`.
    pub
    fn name (self: Self, name: impl Into<String>)
      -> Self
    {
        Self {
            name: Some(name.into()),
            .. self
        }
    }

    /// Sets the worker thread's stack size in bytes.
    pub
    fn stack_size (self: Self, stack_size: usize)
      -> Self
    {
        Self {
            stack_size: Some(stack_size),
            .. self
        }
    }

    /// Spawns a value-carrying coroutine; blocks until its first
    /// suspension point or completion.
    ///
    /// # Errors
    ///
    /// Any error [`::std::thread::Builder::spawn`] reports.
    pub
    fn spawn<YieldValue, Body> (self: Self, body: Body)
      -> io::Result<Coroutine<YieldValue>>
    where
        YieldValue : Send + 'static,
        Body : FnOnce(&Yielder<YieldValue>) + Send + 'static,
    {
        let channel = Arc::new(Channel::new());
        let worker = self.spawn_worker({
            let channel = Arc::clone(&channel);
            move || {
                let yielder = Yielder { channel };
                drive(&yielder.channel, || body(&yielder));
            }
        })?;
        channel.wait_first_suspension();
        Ok(Coroutine {
            channel,
            worker: Some(worker),
        })
    }

    /// Spawns a void coroutine; blocks until its first suspension point or
    /// completion.
    ///
    /// # Errors
    ///
    /// Any error [`::std::thread::Builder::spawn`] reports.
    pub
    fn spawn_void<Body> (self: Self, body: Body)
      -> io::Result<VoidCoroutine>
    where
        Body : FnOnce(&VoidYielder) + Send + 'static,
    {
        let channel = Arc::new(Channel::new());
        let worker = self.spawn_worker({
            let channel = Arc::clone(&channel);
            move || {
                let yielder = VoidYielder { channel };
                drive(&yielder.channel, || body(&yielder));
            }
        })?;
        channel.wait_first_suspension();
        Ok(VoidCoroutine {
            channel,
            worker: Some(worker),
        })
    }

    fn spawn_worker (
        self: Self,
        f: impl FnOnce() + Send + 'static,
    ) -> io::Result<thread::JoinHandle<()>>
    {
        let name = self.name.unwrap_or_else(|| "coroutine".into());
        trace!("spawning coroutine worker thread `{}`", name);
        let mut builder = thread::Builder::new().name(name);
        if let Some(stack_size) = self.stack_size {
            builder = builder.stack_size(stack_size);
        }
        builder.spawn(f)
    }
}

impl Default for Builder {
    fn default ()
      -> Self
    {
        Self::new()
    }
}
