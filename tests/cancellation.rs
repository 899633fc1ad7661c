use {
    ::std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    ::thread_gen::prelude::*,
};

struct SetOnDrop (Arc<AtomicBool>);

impl Drop for SetOnDrop {
    fn drop (self: &'_ mut Self)
    {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[test]
fn drop_mid_sequence_cancels_cooperatively ()
{
    let reached_end = Arc::new(AtomicBool::new(false));
    let unwound = Arc::new(AtomicBool::new(false));

    let mut counter = Coroutine::new({
        let reached_end = Arc::clone(&reached_end);
        let unwound = Arc::clone(&unwound);
        move |yielder| {
            let _guard = SetOnDrop(unwound);
            for i in 0_u32 .. 1_000 {
                yielder.yield_(i);
            }
            reached_end.store(true, Ordering::SeqCst);
        }
    });

    counter.resume().unwrap();
    counter.resume().unwrap();
    assert_eq!(counter.get(), Ok(2));

    // teardown: wakes the body, which unwinds instead of continuing, and
    // joins the worker before returning.
    drop(counter);

    // the body's locals were dropped by the unwind...
    assert!(unwound.load(Ordering::SeqCst));
    // ...and the code past the last executed yield never ran.
    assert!(! reached_end.load(Ordering::SeqCst));
}

#[test]
fn drop_of_a_never_resumed_coroutine_terminates ()
{
    let suspended = Coroutine::new(|yielder| {
        for i in 0_u64 .. {
            yielder.yield_(i);
        }
    });

    assert!(suspended.is_alive());
    assert_eq!(suspended.get(), Ok(0));
    drop(suspended);
}

#[test]
fn void_drop_cancels ()
{
    let reached_end = Arc::new(AtomicBool::new(false));

    let mut steps = VoidCoroutine::new({
        let reached_end = Arc::clone(&reached_end);
        move |yielder| {
            yielder.yield_();
            yielder.yield_();
            reached_end.store(true, Ordering::SeqCst);
        }
    });

    steps.resume().unwrap();
    drop(steps);

    assert!(! reached_end.load(Ordering::SeqCst));
}
