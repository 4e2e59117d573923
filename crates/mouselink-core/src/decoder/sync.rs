use crate::protocol::layout;
use crate::source::{ByteSource, SourceError};

/// Discard bytes until the sync marker has been consumed.
///
/// Idle reads are retried without limit; only the source itself can end the
/// scan (by closing or faulting). Returns how many non-marker bytes were
/// skipped.
///
/// # Examples
/// ```
/// use mouselink_core::{ScriptedSource, find_sync};
///
/// let mut source = ScriptedSource::new([vec![0x01u8, 0x02], vec![], vec![0xAA, 0x07]]);
/// assert_eq!(find_sync(&mut source).unwrap(), 2);
/// assert_eq!(source.remaining(), 1);
/// ```
pub fn find_sync<S: ByteSource + ?Sized>(source: &mut S) -> Result<usize, SourceError> {
    let mut byte = [0u8; 1];
    let mut skipped = 0;
    loop {
        if source.read(&mut byte)? == 0 {
            continue;
        }
        if byte[0] == layout::SYNC_MARKER {
            return Ok(skipped);
        }
        skipped += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::find_sync;
    use crate::source::{ScriptedSource, SourceError};

    #[test]
    fn marker_first_skips_nothing() {
        let mut source = ScriptedSource::from_bytes(vec![0xAAu8, 0x00]);
        assert_eq!(find_sync(&mut source).unwrap(), 0);
        assert_eq!(source.remaining(), 1);
    }

    #[test]
    fn idle_reads_are_retried() {
        let mut source = ScriptedSource::new([vec![], vec![], vec![0x10u8], vec![], vec![0xAA]]);
        assert_eq!(find_sync(&mut source).unwrap(), 1);
        assert!(source.is_exhausted());
    }

    #[test]
    fn closed_source_ends_scan() {
        let mut source = ScriptedSource::from_bytes(vec![0x01u8, 0x02, 0x03]);
        let err = find_sync(&mut source).unwrap_err();
        assert!(matches!(err, SourceError::Closed));
    }
}
