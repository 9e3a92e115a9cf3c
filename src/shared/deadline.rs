use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeadlineError {
    #[error("call timed out after {timeout_ms}ms")]
    TimedOut { timeout_ms: u64 },
    #[error("call panicked before producing a result")]
    Panicked,
    #[error("failed to spawn worker thread: {0}")]
    Spawn(String),
}

/// Runs `call` on a worker thread and waits at most `timeout` for its result.
///
/// With no timeout the call runs inline. A panic is reported as
/// [`DeadlineError::Panicked`] either way. A timed-out worker is detached; its
/// eventual result is discarded.
pub fn call_with_deadline<T, F>(timeout: Option<Duration>, call: F) -> Result<T, DeadlineError>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let Some(timeout) = timeout else {
        return panic::catch_unwind(AssertUnwindSafe(call)).map_err(|_| DeadlineError::Panicked);
    };

    let (sender, receiver) = mpsc::sync_channel(1);
    thread::Builder::new()
        .name("scholaris-deadline".to_string())
        .spawn(move || {
            let _ = sender.send(call());
        })
        .map_err(|err| DeadlineError::Spawn(err.to_string()))?;

    match receiver.recv_timeout(timeout) {
        Ok(value) => Ok(value),
        Err(mpsc::RecvTimeoutError::Timeout) => Err(DeadlineError::TimedOut {
            timeout_ms: timeout.as_millis() as u64,
        }),
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(DeadlineError::Panicked),
    }
}
