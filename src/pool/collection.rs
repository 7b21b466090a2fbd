//! Signal Buffer Pools
//!
//! A pool is an ordered set of uniquely named buffers. Its name doubles as
//! the directory the per-buffer files are written to and as the base name
//! of the script manifest.

use tracing::debug;

use crate::pool::buffer::SignalBuffer;
use crate::pool::sample::Sample;

/// Ordered collection of named signal buffers
#[derive(Debug, Clone, PartialEq)]
pub struct SignalBufferPool<T: Sample> {
    name: String,
    buffers: Vec<SignalBuffer<T>>,
}

impl<T: Sample> SignalBufferPool<T> {
    /// Create an empty pool
    pub fn new(name: impl Into<String>) -> Self {
        SignalBufferPool {
            name: name.into(),
            buffers: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a buffer at the end of the pool
    ///
    /// A buffer with the same name is replaced in place and keeps its
    /// position, so names stay unique.
    pub fn insert(&mut self, buffer: SignalBuffer<T>) -> &SignalBuffer<T> {
        let index = match self.buffers.iter().position(|b| b.name() == buffer.name()) {
            Some(index) => {
                self.buffers[index] = buffer;
                index
            }
            None => {
                self.buffers.push(buffer);
                self.buffers.len() - 1
            }
        };

        &self.buffers[index]
    }

    /// Look up a buffer by name
    pub fn get(&self, name: &str) -> Option<&SignalBuffer<T>> {
        self.buffers.iter().find(|b| b.name() == name)
    }

    /// Buffers in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, SignalBuffer<T>> {
        self.buffers.iter()
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Log one debug line per buffer
    pub fn log_summary(&self) {
        debug!(pool = %self.name, buffers = self.buffers.len(), "signal buffer pool");

        for buffer in &self.buffers {
            debug!(
                pool = %self.name,
                buffer = %buffer.name(),
                kind = buffer.data().kind_label(),
                samples = buffer.len(),
                sample_rate = buffer.sample_rate(),
                peak = ?buffer.data().peak_magnitude(),
                "signal buffer"
            );
        }
    }
}

impl<'a, T: Sample> IntoIterator for &'a SignalBufferPool<T> {
    type Item = &'a SignalBuffer<T>;
    type IntoIter = std::slice::Iter<'a, SignalBuffer<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
