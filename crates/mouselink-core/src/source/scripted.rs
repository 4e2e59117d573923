use std::collections::VecDeque;

use super::{ByteSource, SourceError};

/// In-memory [`ByteSource`] replaying a script of chunks.
///
/// Non-empty chunks are delivered back to back. An empty chunk stands for
/// one idle timeout: a read that reaches it returns what it has so far
/// (possibly zero bytes) and consumes it. Once the script is exhausted the
/// source reports [`SourceError::Closed`].
///
/// # Examples
/// ```
/// use mouselink_core::{ByteSource, ScriptedSource};
///
/// let mut source = ScriptedSource::new([vec![0xAAu8, 0x01], vec![], vec![0x02]]);
/// let mut buf = [0u8; 4];
/// assert_eq!(source.read(&mut buf).unwrap(), 2);
/// assert_eq!(source.read(&mut buf).unwrap(), 1);
/// assert!(source.read(&mut buf).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    chunks: VecDeque<Vec<u8>>,
}

impl ScriptedSource {
    pub fn new<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Vec<u8>>,
    {
        Self {
            chunks: chunks.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new([bytes.into()])
    }

    pub fn push_bytes(&mut self, bytes: impl Into<Vec<u8>>) {
        let bytes = bytes.into();
        if !bytes.is_empty() {
            self.chunks.push_back(bytes);
        }
    }

    pub fn push_idle(&mut self) {
        self.chunks.push_back(Vec::new());
    }

    /// Bytes not yet delivered.
    pub fn remaining(&self) -> usize {
        self.chunks.iter().map(Vec::len).sum()
    }

    pub fn is_exhausted(&self) -> bool {
        self.chunks.is_empty()
    }
}

impl ByteSource for ScriptedSource {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
        if self.chunks.is_empty() {
            return Err(SourceError::Closed);
        }

        let mut filled = 0;
        while filled < buf.len() {
            let Some(chunk) = self.chunks.front_mut() else {
                break;
            };
            if chunk.is_empty() {
                self.chunks.pop_front();
                break;
            }
            let take = chunk.len().min(buf.len() - filled);
            buf[filled..filled + take].copy_from_slice(&chunk[..take]);
            chunk.drain(..take);
            filled += take;
            if chunk.is_empty() {
                self.chunks.pop_front();
            }
        }
        Ok(filled)
    }
}
