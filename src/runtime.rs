//! Shared Runtime

use once_cell::sync::Lazy;
use tokio::runtime::{Builder, Runtime};

/// Multi-thread runtime backing the blocking entry points.
static RUNTIME: Lazy<Runtime> = Lazy::new(|| {
    Builder::new_multi_thread()
        .thread_name("sitellms-worker")
        .enable_all()
        .build()
        .expect("failed to build sitellms runtime")
});

/// Drive a pipeline future to completion from synchronous code.
///
/// Must not be called from inside another tokio runtime.
pub fn block_on<F>(future: F) -> F::Output
where
    F: std::future::Future,
{
    RUNTIME.block_on(future)
}
