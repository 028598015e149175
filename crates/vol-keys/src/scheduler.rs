//! Polling worker
//!
//! The decoder runs on one dedicated thread that loops: wait out the
//! scheduled delay, run a cycle, schedule the next one. The wait is a
//! `recv_timeout` on a stop channel, so shutdown interrupts a pending delay
//! immediately and never cuts a cycle short.
//!
//! ```text
//!   start()                       shutdown()
//! Idle ──────▶ Armed ──┐ cycle  Armed ──────▶ Idle
//!                ▲     │        (stop, join, decoder returned)
//!                └─────┘
//! ```

use core::time::Duration;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};

use crate::decoder::Decoder;
use crate::error::SchedulerError;
use crate::interface::{Clock, HeadsetInterface, KeySink};
use crate::keycode::DEVICE_NAME;
use crate::window::DEFAULT_WINDOW_LEN;

/// Name given to the worker thread
pub const WORKER_NAME: &str = "vol_keys_worker";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    /// No cycle pending
    Idle,
    /// Worker running, one cycle pending or in flight
    Armed,
}

struct Armed<T> {
    stop: Sender<()>,
    handle: JoinHandle<T>,
}

pub struct Scheduler<I, K, C, const N: usize = DEFAULT_WINDOW_LEN>
where
    I: HeadsetInterface + Send + 'static,
    K: KeySink + Send + 'static,
    C: Clock + Send + 'static,
{
    decoder: Option<Decoder<I, K, C, N>>,
    armed: Option<Armed<Decoder<I, K, C, N>>>,
}

impl<I, K, C, const N: usize> Scheduler<I, K, C, N>
where
    I: HeadsetInterface + Send + 'static,
    K: KeySink + Send + 'static,
    C: Clock + Send + 'static,
{
    /// Wrap a decoder without starting it
    pub fn new(decoder: Decoder<I, K, C, N>) -> Self {
        Self {
            decoder: Some(decoder),
            armed: None,
        }
    }

    /// Spawn the worker; the first cycle runs right away
    ///
    /// # Errors
    ///
    /// - [`SchedulerError::AlreadyArmed`] if the worker is running
    /// - [`SchedulerError::Spawn`] if the thread could not be created
    /// - [`SchedulerError::WorkerPanicked`] if a previous worker lost the decoder
    pub fn start(&mut self) -> Result<(), SchedulerError> {
        if self.armed.is_some() {
            return Err(SchedulerError::AlreadyArmed);
        }
        let decoder = self.decoder.take().ok_or(SchedulerError::WorkerPanicked)?;

        let (stop, stop_rx) = mpsc::channel();
        let handle = thread::Builder::new()
            .name(WORKER_NAME.into())
            .spawn(move || poll_loop(decoder, stop_rx))
            .map_err(SchedulerError::Spawn)?;

        self.armed = Some(Armed { stop, handle });
        log::info!("{}: polling worker started", DEVICE_NAME);
        Ok(())
    }

    /// Cancel the pending cycle and wait for the worker to finish
    ///
    /// A cycle already in flight completes first. Calling this while idle
    /// does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::WorkerPanicked`] if the worker panicked.
    pub fn shutdown(&mut self) -> Result<(), SchedulerError> {
        let Some(Armed { stop, handle }) = self.armed.take() else {
            return Ok(());
        };

        // The worker also stops if the sender is gone, so a failed send is fine.
        let _ = stop.send(());
        drop(stop);

        let decoder = handle.join().map_err(|_| SchedulerError::WorkerPanicked)?;
        self.decoder = Some(decoder);
        log::info!("{}: polling worker exit", DEVICE_NAME);
        Ok(())
    }

    pub fn state(&self) -> SchedulerState {
        if self.armed.is_some() {
            SchedulerState::Armed
        } else {
            SchedulerState::Idle
        }
    }

    /// The decoder, while the worker is idle
    pub fn decoder(&self) -> Option<&Decoder<I, K, C, N>> {
        self.decoder.as_ref()
    }

    /// Shut down and hand back the decoder for release
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::WorkerPanicked`] if the worker panicked.
    pub fn into_decoder(mut self) -> Result<Decoder<I, K, C, N>, SchedulerError> {
        self.shutdown()?;
        self.decoder.take().ok_or(SchedulerError::WorkerPanicked)
    }
}

impl<I, K, C, const N: usize> Drop for Scheduler<I, K, C, N>
where
    I: HeadsetInterface + Send + 'static,
    K: KeySink + Send + 'static,
    C: Clock + Send + 'static,
{
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            log::error!("{}: {}", DEVICE_NAME, e);
        }
    }
}

fn poll_loop<I, K, C, const N: usize>(
    mut decoder: Decoder<I, K, C, N>,
    stop: Receiver<()>,
) -> Decoder<I, K, C, N>
where
    I: HeadsetInterface,
    K: KeySink,
    C: Clock,
{
    let mut delay = Duration::ZERO;
    loop {
        match stop.recv_timeout(delay) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
        delay = decoder.run_cycle().delay;
    }
    decoder
}
