use std::iter::FusedIterator;

use super::{DecodeError, Decoder, MotionEvent};
use crate::source::{ByteSource, SourceError};

/// Lazy, unbounded sequence of decode results pulled from a byte source.
///
/// Incomplete packets are yielded as recoverable errors and scanning resumes
/// with the next marker. A source fault is yielded once and ends the
/// sequence; a closed source ends it without an error item.
pub struct Events<'a, S: ?Sized> {
    decoder: &'a mut Decoder,
    source: &'a mut S,
    done: bool,
}

impl<'a, S: ByteSource + ?Sized> Events<'a, S> {
    pub(super) fn new(decoder: &'a mut Decoder, source: &'a mut S) -> Self {
        Self {
            decoder,
            source,
            done: false,
        }
    }
}

impl<S: ByteSource + ?Sized> Iterator for Events<'_, S> {
    type Item = Result<MotionEvent, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.decoder.read_packet(&mut *self.source) {
            Ok(event) => Some(Ok(event)),
            Err(DecodeError::Source(SourceError::Closed)) => {
                self.done = true;
                None
            }
            Err(err) => {
                if !err.is_recoverable() {
                    self.done = true;
                }
                Some(Err(err))
            }
        }
    }
}

impl<S: ByteSource + ?Sized> FusedIterator for Events<'_, S> {}
