#![allow(unused_imports)]
use {
    ::std::{*, prelude::v1::*},
    super::*,
};

::static_assertions::assert_impl_all!(Coroutine<u8>: Send);
::static_assertions::assert_impl_all!(VoidCoroutine: Send);
::static_assertions::assert_impl_all!(Error: Clone, ::std::error::Error);

#[test]
fn yields_in_order ()
{
    let mut numbers = Coroutine::new(|yielder| {
        yielder.yield_(10_u32);
        yielder.yield_(20);
        yielder.yield_(30);
    });

    assert_eq!(numbers.get(), Ok(10));
    numbers.resume().unwrap();
    assert_eq!(numbers.get(), Ok(20));
    numbers.resume().unwrap();
    assert_eq!(numbers.get(), Ok(30));
    assert!(numbers.is_alive());
    numbers.resume().unwrap();
    assert!(! numbers.is_alive());
}

#[test]
fn immediate_return ()
{
    let mut empty = Coroutine::<u8>::new(|_yielder| {});

    assert!(! empty.is_alive());
    assert_eq!(empty.get(), Err(Error::NoValue));
    assert_eq!(empty.resume(), Err(Error::Completed));
}

#[test]
fn resume_on_terminal_is_an_error ()
{
    let mut one = Coroutine::new(|yielder| yielder.yield_(1_u8));

    one.resume().unwrap();
    assert_eq!(one.resume(), Err(Error::Completed));
    assert_eq!(one.resume(), Err(Error::Completed));
}

#[test]
fn get_does_not_consume ()
{
    let pair = Coroutine::new(|yielder| yielder.yield_("same"));

    assert_eq!(pair.get(), Ok("same"));
    assert_eq!(pair.get(), Ok("same"));
}

#[test]
fn get_after_completion_is_an_error ()
{
    let mut one = Coroutine::new(|yielder| yielder.yield_(1_u8));

    assert_eq!(one.get(), Ok(1));
    one.resume().unwrap();
    assert_eq!(one.get(), Err(Error::NoValue));
}

#[test]
fn body_panic_is_captured ()
{
    let mut doomed = Coroutine::new(|yielder| {
        yielder.yield_(1_u8);
        panic!("boom");
    });

    assert_eq!(doomed.get(), Ok(1));
    assert_eq!(doomed.resume(), Err(Error::BodyPanicked("boom".into())));
    assert!(! doomed.is_alive());
    // resurfaced on every subsequent fallible operation
    assert_eq!(doomed.get(), Err(Error::BodyPanicked("boom".into())));
    assert_eq!(doomed.resume(), Err(Error::BodyPanicked("boom".into())));
}

#[test]
fn panic_before_first_yield_is_captured ()
{
    let mut doomed = Coroutine::<u8>::new(|_yielder| panic!("early"));

    assert!(! doomed.is_alive());
    assert_eq!(doomed.get(), Err(Error::BodyPanicked("early".into())));
    assert_eq!(doomed.resume(), Err(Error::BodyPanicked("early".into())));
}

#[test]
fn void_variant_alternates ()
{
    let mut steps = VoidCoroutine::new(|yielder| {
        yielder.yield_();
        yielder.yield_();
    });

    assert!(steps.is_alive());
    steps.resume().unwrap();
    assert!(steps.is_alive());
    steps.resume().unwrap();
    assert!(! steps.is_alive());
    assert_eq!(steps.resume(), Err(Error::Completed));
}

#[test]
fn builder_names_the_worker ()
{
    let named = Builder::new()
        .name("fib-worker")
        .spawn(|yielder: &'_ Yielder<String>| {
            let name = thread::current().name().unwrap_or("").to_owned();
            yielder.yield_(name);
        })
        .unwrap()
    ;

    assert_eq!(named.get().unwrap(), "fib-worker");
}

#[test]
fn instances_are_independent ()
{
    let mut fast = Coroutine::new(|y| (0_u8 .. 3).for_each(|i| y.yield_(i)));
    let mut slow = Coroutine::new(|y| (10_u8 .. 13).for_each(|i| y.yield_(i)));

    assert_eq!(fast.get(), Ok(0));
    assert_eq!(slow.get(), Ok(10));
    fast.resume().unwrap();
    assert_eq!(fast.get(), Ok(1));
    assert_eq!(slow.get(), Ok(10));
    slow.resume().unwrap();
    assert_eq!(slow.get(), Ok(11));
    assert_eq!(fast.get(), Ok(1));
}

#[test]
fn drains_as_iterator ()
{
    let squares = Coroutine::new(|yielder| {
        for n in 1_u32 ..= 4 {
            yielder.yield_(n * n);
        }
    });

    assert_eq!(
        squares.into_iter().collect::<Vec<_>>(),
        [1, 4, 9, 16],
    );
}

#[test]
fn iterator_starts_at_the_pending_value ()
{
    let mut numbers = Coroutine::new(|y| (0_u8 .. 4).for_each(|i| y.yield_(i)));

    numbers.resume().unwrap();
    assert_eq!(
        numbers.into_iter().collect::<Vec<_>>(),
        [1, 2, 3],
    );
}

#[test]
fn error_messages ()
{
    assert_eq!(
        Error::Completed.to_string(),
        "coroutine has already completed",
    );
    assert_eq!(
        Error::NoValue.to_string(),
        "no yielded value is available",
    );
    assert_eq!(
        Error::BodyPanicked("boom".into()).to_string(),
        "coroutine body panicked: boom",
    );
}
