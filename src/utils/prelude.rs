pub(in crate)
use {
    ::std::{
        sync::{
            Arc,
            Condvar,
            Mutex,
            MutexGuard,
            PoisonError,
        },
        thread,
    },
    crate::{
        error::Error,
        handoff::Channel,
    },
};
