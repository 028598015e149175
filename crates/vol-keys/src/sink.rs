//! Channel-backed key sink
//!
//! Hands key reports from the polling worker to whichever thread owns the
//! real input device (or a test).

use std::sync::mpsc::{self, Receiver, Sender};

use crate::interface::KeySink;
use crate::keycode::Key;

/// Message delivered to the receiving side
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SinkEvent {
    Key { key: Key, pressed: bool },
    Sync,
}

/// The receiving side of the channel was dropped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkClosed;

impl core::fmt::Display for SinkClosed {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Key event receiver dropped")
    }
}

impl core::error::Error for SinkClosed {}

pub struct ChannelSink {
    tx: Sender<SinkEvent>,
}

impl ChannelSink {
    /// Create a sink and the receiver its events arrive on
    pub fn new() -> (Self, Receiver<SinkEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }
}

impl KeySink for ChannelSink {
    type Error = SinkClosed;

    fn report_key(&mut self, key: Key, pressed: bool) -> Result<(), Self::Error> {
        self.tx
            .send(SinkEvent::Key { key, pressed })
            .map_err(|_| SinkClosed)
    }

    fn sync(&mut self) -> Result<(), Self::Error> {
        self.tx.send(SinkEvent::Sync).map_err(|_| SinkClosed)
    }
}

/// Collect the taps in a batch of sink events, ignoring syncs
///
/// A tap is a press immediately followed by the release of the same key.
pub fn taps(events: &[SinkEvent]) -> Vec<Key> {
    events
        .iter()
        .filter_map(|event| match event {
            SinkEvent::Key { key, pressed: true } => Some(*key),
            _ => None,
        })
        .collect()
}
