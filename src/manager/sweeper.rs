//! Sweeper: Dedicated thread that fires expired color changes.
//!
//! The manager spawns this lazily, on the first timed-color registration.
//! The loop is paced by `recv_timeout` on a control channel: a timeout
//! means "run a sweep tick", a message or a disconnect means "shut down".

use super::ManagerState;
use crate::console::Console;
use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Handle to the sweeper thread.
pub(crate) struct Sweeper {
    /// Handle to the sweeper thread.
    handle: Option<JoinHandle<()>>,
    /// Control channel; any message (or drop) stops the loop.
    stop_tx: Sender<()>,
}

impl Sweeper {
    /// Spawn the sweeper over the shared manager state.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the sweeper thread.
    pub(crate) fn spawn<C: Console>(
        state: Arc<Mutex<ManagerState<C>>>,
        interval: Duration,
    ) -> Self {
        let (stop_tx, stop_rx) = bounded::<()>(1);

        let handle = thread::Builder::new()
            .name("dashpane-sweeper".to_string())
            .spawn(move || loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
                        if let Err(e) = state.sweep_expired(Instant::now()) {
                            eprintln!("Sweeper thread error: {e}");
                        }
                    }
                    // Stop signal or manager gone.
                    _ => break,
                }
            })
            .expect("Failed to spawn sweeper thread");

        Self {
            handle: Some(handle),
            stop_tx,
        }
    }

    /// Signal the sweeper to shutdown.
    pub(crate) fn shutdown(&self) {
        let _ = self.stop_tx.try_send(());
    }

    /// Wait for the sweeper thread to finish.
    pub(crate) fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.shutdown();
    }
}
