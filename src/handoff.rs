//! The payload-agnostic handoff core shared by both coroutine variants.
//!
//! One mutex and one condvar implement the strict two-party alternation:
//! whoever does not hold the [`Turn`] is parked in a predicate wait. The
//! body side parks inside its yield; the driver side parks inside
//! construction and `resume`. Cancellation is realized here too: a parked
//! body waking up to a set `quit` flag unwinds with a private sentinel,
//! which [`drive`] catches at the boundary of the worker thread.

use_prelude!();

use {
    ::core::any::Any,
    ::std::panic,
    ::log::{
        debug,
        trace,
    },
};

/// Whose turn it is to execute non-synchronization logic.
#[derive(
    Debug,
    Clone, Copy,
    PartialEq, Eq,
)]
pub(in crate)
enum Turn {
    /// The body is running (or has not yet reached its first suspension).
    Body,
    /// The body is parked at a yield point, or gone; the driver runs.
    Driver,
}

/// Everything the lock guards.
pub(in crate)
struct State<YieldValue> {
    turn: Turn,

    /// Monotonic: set on cancellation request or when the body finishes.
    quit: bool,

    /// `Some` exactly in the window between a yield and the next resume.
    slot: Option<YieldValue>,

    /// Panic message captured from a body that escaped with a failure
    /// unrelated to cancellation.
    failure: Option<String>,
}

/// The shared half of a coroutine instance: one lock, one signal.
pub(in crate)
struct Channel<YieldValue> {
    state: Mutex<State<YieldValue>>,
    condvar: Condvar,
}

/// Sentinel payload carried by the cancellation unwind. Never leaves the
/// worker thread: [`drive`] swallows it.
struct Interrupted;

/// How the body's execution ended.
enum Exit {
    Returned,
    Cancelled,
    Panicked(String),
}

impl<YieldValue> Channel<YieldValue> {
    pub(in crate)
    fn new ()
      -> Self
    {
        Self {
            state: Mutex::new(State {
                turn: Turn::Body,
                quit: false,
                slot: None,
                failure: None,
            }),
            condvar: Condvar::new(),
        }
    }

    /// No user code ever runs while the lock is held, and the cancellation
    /// unwind releases its guard first, so a poisoned lock only means a
    /// panic we have already captured and classified.
    fn lock (self: &'_ Self)
      -> MutexGuard<'_, State<YieldValue>>
    {
        unpoisoned(self.state.lock())
    }

    // === driver side ===

    /// Blocks the constructing party until the body reaches its first
    /// suspension point or finishes.
    pub(in crate)
    fn wait_first_suspension (self: &'_ Self)
    {
        let state = self.lock();
        let _state = unpoisoned(
            self.condvar.wait_while(state, |state| state.turn == Turn::Body)
        );
        trace!("construction: body handed control back");
    }

    /// Wakes the body and blocks until it yields again or finishes.
    pub(in crate)
    fn resume (self: &'_ Self)
      -> Result<(), Error>
    {
        let mut state = self.lock();
        if let Some(ref msg) = state.failure {
            return Err(Error::BodyPanicked(msg.clone()));
        }
        if state.quit {
            return Err(Error::Completed);
        }
        state.slot = None;
        state.turn = Turn::Body;
        self.condvar.notify_all();
        trace!("driver resumed body");
        let state = unpoisoned(
            self.condvar.wait_while(state, |state| state.turn == Turn::Body)
        );
        match state.failure {
            | Some(ref msg) => Err(Error::BodyPanicked(msg.clone())),
            | None => Ok(()),
        }
    }

    /// Clones out the most recently yielded value, if one is pending.
    pub(in crate)
    fn value (self: &'_ Self)
      -> Result<YieldValue, Error>
    where
        YieldValue : Clone,
    {
        let state = self.lock();
        if let Some(ref msg) = state.failure {
            return Err(Error::BodyPanicked(msg.clone()));
        }
        match state.slot {
            | Some(ref value) => Ok(value.clone()),
            | None => Err(Error::NoValue),
        }
    }

    pub(in crate)
    fn is_alive (self: &'_ Self)
      -> bool
    {
        ! self.lock().quit
    }

    /// Teardown entry point: requests cooperative cancellation and wakes a
    /// parked body so it can observe the request. Idempotent against a body
    /// that is mid-yield, mid-resume-wait, or already finished.
    pub(in crate)
    fn close (self: &'_ Self)
    {
        let mut state = self.lock();
        state.quit = true;
        state.slot = None;
        drop(state);
        self.condvar.notify_all();
        trace!("teardown: cancellation requested");
    }

    // === body side ===

    /// Publishes a value and parks until resumed. Unwinds with the
    /// cancellation sentinel if teardown happened meanwhile.
    pub(in crate)
    fn publish (self: &'_ Self, value: YieldValue)
    {
        let mut state = self.lock();
        state.slot = Some(value);
        self.park(state);
    }

    /// The value-less yield: parks without touching the slot.
    pub(in crate)
    fn pause (self: &'_ Self)
    {
        let state = self.lock();
        self.park(state);
    }

    fn park (self: &'_ Self, mut state: MutexGuard<'_, State<YieldValue>>)
    {
        state.turn = Turn::Driver;
        self.condvar.notify_all();
        trace!("body suspended at yield point");
        let state = unpoisoned(
            self.condvar.wait_while(state, |state| {
                state.turn == Turn::Driver && ! state.quit
            })
        );
        if state.quit {
            // Unwind out of the body's remaining logic; `drive` catches
            // this on the way out of the worker thread. `resume_unwind`
            // rather than `panic_any`, so that a plain teardown does not
            // invoke the global panic hook.
            drop(state);
            panic::resume_unwind(Box::new(Interrupted));
        }
    }

    /// Terminal handshake, run once per worker whatever the exit path.
    fn finish (self: &'_ Self, exit: Exit)
    {
        let mut state = self.lock();
        state.quit = true;
        state.slot = None;
        if let Exit::Panicked(msg) = exit {
            debug!("coroutine body panicked: {}", msg);
            state.failure = Some(msg);
        } else {
            trace!("coroutine body finished");
        }
        state.turn = Turn::Driver;
        drop(state);
        self.condvar.notify_all();
    }
}

/// The boundary between the body and its worker thread: runs the body,
/// classifies how it ended, and performs the terminal handshake. The
/// cancellation sentinel stops here; any other panic is captured so the
/// driver can observe it instead of it dying with the thread.
pub(in crate)
fn drive<YieldValue> (
    channel: &'_ Channel<YieldValue>,
    body: impl FnOnce(),
)
{
    let exit = match panic::catch_unwind(panic::AssertUnwindSafe(body)) {
        | Ok(()) => Exit::Returned,
        | Err(payload) => if payload.is::<Interrupted>() {
            Exit::Cancelled
        } else {
            Exit::Panicked(panic_message(&*payload))
        },
    };
    channel.finish(exit);
}

fn panic_message (payload: &'_ (dyn Any + Send))
  -> String
{
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).into()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "<non-string panic payload>".into()
    }
}

fn unpoisoned<T> (result: Result<T, PoisonError<T>>)
  -> T
{
    result.unwrap_or_else(PoisonError::into_inner)
}
