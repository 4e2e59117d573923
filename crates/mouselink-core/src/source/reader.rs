use std::io::{ErrorKind, Read};

use super::{ByteSource, SourceError};

/// [`ByteSource`] over any [`Read`] implementation.
///
/// Works for serial device nodes opened as files, capture files and stdin.
/// Reads keep pulling from the inner reader until the buffer is full, the
/// reader times out (`TimedOut` / `WouldBlock`), or it reaches end of stream.
/// End of stream with nothing read is reported as [`SourceError::Closed`];
/// a partial fill is returned first and the close is reported on the next
/// call.
///
/// Sources built with [`ReaderSource::live`] never see end of stream: an
/// empty inner read is an idle interval (a tty with `VMIN=0, VTIME>0`
/// returns one after every quiet timeout), so it ends the current read and
/// the next call reads again.
///
/// # Examples
/// ```
/// use std::io::Cursor;
///
/// use mouselink_core::{ByteSource, ReaderSource, SourceError};
///
/// let mut source = ReaderSource::new(Cursor::new(vec![0xAA, 0x01]));
/// let mut buf = [0u8; 4];
/// assert_eq!(source.read(&mut buf).unwrap(), 2);
/// assert!(matches!(source.read(&mut buf), Err(SourceError::Closed)));
/// ```
pub struct ReaderSource<R> {
    inner: R,
    live: bool,
    eof: bool,
}

impl<R: Read> ReaderSource<R> {
    /// Source over a finite stream; an empty inner read closes it.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            live: false,
            eof: false,
        }
    }

    /// Source over a live device; an empty inner read is an idle timeout.
    pub fn live(inner: R) -> Self {
        Self {
            inner,
            live: true,
            eof: false,
        }
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
        if self.eof {
            return Err(SourceError::Closed);
        }

        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) if self.live => break,
                Ok(0) => {
                    self.eof = true;
                    break;
                }
                Ok(n) => filled += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if is_timeout(&err) => break,
                Err(err) => return Err(SourceError::Fault(err)),
            }
        }

        if filled == 0 && self.eof {
            return Err(SourceError::Closed);
        }
        Ok(filled)
    }
}

fn is_timeout(err: &std::io::Error) -> bool {
    matches!(err.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock)
}
