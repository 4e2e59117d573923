//! Byte sources feeding the decoder.
//!
//! A source hands out bytes on demand with blocking-or-timeout semantics.
//! `Ok(0)` from [`ByteSource::read`] means "no data yet" (an idle timeout),
//! never an error. Closing and faulting are the only fatal conditions.

mod reader;
mod scripted;

pub use reader::ReaderSource;
pub use scripted::ScriptedSource;

use thiserror::Error;

/// Sequential supplier of raw UART bytes.
pub trait ByteSource {
    /// Fill up to `buf.len()` bytes, waiting at most the source's own timeout.
    ///
    /// Returns the number of bytes written to `buf`. Fewer than requested,
    /// including zero, means no more data arrived before the timeout.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SourceError>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
        (**self).read(buf)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
        (**self).read(buf)
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("byte source closed")]
    Closed,
    #[error("byte source fault: {0}")]
    Fault(#[from] std::io::Error),
}

impl SourceError {
    pub fn is_closed(&self) -> bool {
        matches!(self, SourceError::Closed)
    }
}
