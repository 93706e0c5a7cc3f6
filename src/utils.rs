//! Bridge between the tokio runtime that does network I/O and the GTK main
//! loop that owns every widget.

use once_cell::sync::Lazy;
use std::future::Future;

static RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("avatar-io")
        .enable_all()
        .build()
        .expect("Failed to build Tokio runtime")
});

/// Runs `fut` off the main thread; the returned receiver yields its
/// output once on the GTK main loop.
pub fn run_async_to_main<T, Fut>(fut: Fut) -> glib::Receiver<T>
where
    T: Send + 'static,
    Fut: Future<Output = T> + Send + 'static,
{
    let (tx, rx) = glib::MainContext::channel(glib::Priority::default());
    RUNTIME.spawn(async move {
        // The window may already be gone; nothing to deliver to then.
        let _ = tx.send(fut.await);
    });
    rx
}
