//! Completion-handler calling convention
//!
//! Runs an operation's async core and hands the outcome to a completion
//! handler, exactly once. Inside a tokio runtime the work is spawned there;
//! outside one it runs on a dedicated thread with its own runtime.

use std::future::Future;

use serpro_domain::{Result, SerproError};
use tokio::runtime::{Builder, Handle};
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Run `future` and pass its outcome to `completion`.
///
/// Returns the spawned task when called inside a tokio runtime, `None` when
/// the work was moved to a dedicated thread.
pub(crate) fn dispatch<T, Fut, F>(
    operation: &'static str,
    future: Fut,
    completion: F,
) -> Option<JoinHandle<()>>
where
    T: Send + 'static,
    Fut: Future<Output = Result<T>> + Send + 'static,
    F: FnOnce(Result<T>) + Send + 'static,
{
    match Handle::try_current() {
        Ok(handle) => Some(handle.spawn(async move {
            completion(future.await);
        })),
        Err(_) => {
            debug!(operation, "No tokio runtime detected, running callback on its own thread");
            std::thread::spawn(move || {
                match Builder::new_current_thread().enable_all().build() {
                    Ok(runtime) => completion(runtime.block_on(future)),
                    Err(err) => {
                        error!(operation, error = %err, "Failed to build callback runtime");
                        completion(Err(SerproError::Config(format!(
                            "{operation} could not start a tokio runtime: {err}"
                        ))));
                    }
                }
            });
            None
        }
    }
}
