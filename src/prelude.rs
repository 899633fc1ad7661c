//! The crate prelude: reexport the most essential utilities so that blob
//! `use`-ing them should enable the most straight-forward usage.

pub use crate::{
    Builder,
    Coroutine,
    Error,
    VoidCoroutine,
    VoidYielder,
    Yielder,
};
