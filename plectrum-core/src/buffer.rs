//! # Sample Window Buffer
//!
//! Accumulates incoming sample blocks of arbitrary length and emits
//! complete, fixed-size, non-overlapping analysis windows. Residual
//! samples are carried across calls; partial data is never dropped.

/// Accumulates raw samples into fixed-length analysis windows.
///
/// The capture callback pushes whatever block size the device delivers;
/// complete windows are popped off with [`WindowBuffer::next_window`].
#[derive(Debug)]
pub struct WindowBuffer {
    window_len: usize,
    pending: Vec<f32>,
}

impl WindowBuffer {
    /// Creates a buffer that emits windows of exactly `window_len` samples.
    pub fn new(window_len: usize) -> Self {
        assert!(window_len > 0, "window length must be non-zero");
        Self {
            window_len,
            pending: Vec::with_capacity(window_len * 2),
        }
    }

    /// Appends a block of samples to the accumulator.
    pub fn push(&mut self, samples: &[f32]) {
        self.pending.extend_from_slice(samples);
    }

    /// Pops the next complete window, or `None` if fewer than
    /// `window_len` samples are pending.
    pub fn next_window(&mut self) -> Option<Vec<f32>> {
        if self.pending.len() < self.window_len {
            return None;
        }
        let window: Vec<f32> = self.pending.drain(..self.window_len).collect();
        Some(window)
    }

    /// Number of samples waiting for the next window.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
