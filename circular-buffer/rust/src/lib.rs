//! Fixed-capacity, allocation-free, double-ended ring buffer.

#[cfg(feature = "dump")]
mod dump;
pub mod ring_buffer;

pub use ring_buffer::{RingBuffer, RingBufferError};
