use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use thiserror::Error;

use crate::decoder::{DecodeError, Decoder};
use crate::source::{ByteSource, ReaderSource, SourceError};
use crate::{ReplayReport, make_stub_report};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Decode a capture file of raw UART bytes into a report.
pub fn replay_file(path: &Path) -> Result<ReplayReport, ReplayError> {
    let file = File::open(path)?;
    let input_bytes = file.metadata()?.len();
    let source = ReaderSource::new(BufReader::new(file));
    replay_source(&path.display().to_string(), input_bytes, source)
}

/// Run a fresh decoder over `source` until it closes.
///
/// Incomplete packets are counted and skipped. A source fault aborts the
/// replay; a close is the normal end of a capture.
pub fn replay_source<S: ByteSource>(
    input_path: &str,
    input_bytes: u64,
    mut source: S,
) -> Result<ReplayReport, ReplayError> {
    let mut decoder = Decoder::new();
    let mut report = make_stub_report(input_path, input_bytes);

    for result in decoder.events(&mut source) {
        match result {
            Ok(event) => report.events.push(event),
            Err(DecodeError::Packet(_)) => report.summary.incomplete_packets += 1,
            Err(DecodeError::Source(err)) => return Err(err.into()),
        }
    }

    report.summary.packets_decoded = decoder.decoded();
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::{ReplayError, replay_source};
    use crate::source::{ByteSource, ScriptedSource, SourceError};

    struct FaultySource;

    impl ByteSource for FaultySource {
        fn read(&mut self, _buf: &mut [u8]) -> Result<usize, SourceError> {
            Err(SourceError::Fault(io::Error::other("unplugged")))
        }
    }

    #[test]
    fn counts_incomplete_packets() {
        let source = ScriptedSource::new([
            vec![0xAAu8, 0x01, 0x00, 0x02, 0x00, 0x00],
            vec![0xAA, 0x01],
            vec![],
            vec![0x13, 0xAA, 0x00, 0x00, 0x00, 0x00, 0x04],
        ]);
        let report = replay_source("scripted", 0, source).unwrap();
        assert_eq!(report.summary.packets_decoded, 2);
        assert_eq!(report.summary.incomplete_packets, 1);
        assert_eq!(report.events[1].sequence_number, 2);
        assert!(report.events[1].button_middle);
    }

    #[test]
    fn fault_aborts_replay() {
        let err = replay_source("faulty", 0, FaultySource).unwrap_err();
        assert!(matches!(err, ReplayError::Source(SourceError::Fault(_))));
    }
}
