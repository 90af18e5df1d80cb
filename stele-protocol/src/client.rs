//! Stream drain for the fact protocol
//!
//! The protocol is read-only: connect, wait briefly for the server to
//! push, read to exhaustion, close. Connect and timeout policy live
//! with the caller (the firmware wraps the first read in the
//! `PollBudget` deadline); this module owns the byte-to-record plumbing
//! over any `embedded_io_async::Read` source.

use embedded_io_async::Read;
use heapless::Vec;

use crate::frame::{Record, RecordParser};

/// Fetch failures visible to the poll loop
///
/// Both are local and non-fatal: the loop logs, keeps the fact table
/// as-is, and retries on the next interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchError {
    /// TCP connect failed
    Connect,
    /// The connection dropped mid-read
    Io,
}

/// Bounded wait for the server's first bytes after connecting.
///
/// The server pushes immediately on accept; if nothing arrives within
/// the budget the fetch yields zero records rather than blocking the
/// cycle. Best effort, don't block forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollBudget {
    pub iterations: u32,
    pub interval_ms: u32,
}

impl PollBudget {
    /// Total wait in milliseconds
    pub const fn total_ms(&self) -> u32 {
        self.iterations * self.interval_ms
    }
}

impl Default for PollBudget {
    fn default() -> Self {
        // 100 x 10 ms, about one second
        Self {
            iterations: 100,
            interval_ms: 10,
        }
    }
}

/// Read `reader` to exhaustion, appending completed records to `out`.
///
/// Records beyond the capacity of `out` are dropped. The parser is
/// reset on return, so a frame truncated by the close of the stream is
/// dropped rather than returned partial.
pub async fn drain_records<R: Read, const N: usize>(
    reader: &mut R,
    parser: &mut RecordParser,
    out: &mut Vec<Record, N>,
) -> Result<(), R::Error> {
    let mut chunk = [0u8; 256];
    loop {
        match reader.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => parser.feed_bytes(&chunk[..n], out),
            Err(e) => {
                parser.reset();
                return Err(e);
            }
        }
    }
    parser.reset();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    fn drain(input: &[u8]) -> Vec<Record, 8> {
        let mut reader = input;
        let mut parser = RecordParser::new();
        let mut out = Vec::new();
        block_on(drain_records(&mut reader, &mut parser, &mut out)).unwrap();
        out
    }

    #[test]
    fn test_drain_concatenated_stream() {
        let records = drain(b"TIME|08:00]TIME|09:00]");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].value.as_str(), "08:00");
        assert_eq!(records[1].value.as_str(), "09:00");
    }

    #[test]
    fn test_drain_empty_stream() {
        let records = drain(b"");
        assert!(records.is_empty());
    }

    #[test]
    fn test_drain_drops_truncated_tail() {
        let mut reader: &[u8] = b"TIME|08:00]TIME|09:0";
        let mut parser = RecordParser::new();
        let mut out = Vec::<Record, 8>::new();
        block_on(drain_records(&mut reader, &mut parser, &mut out)).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].value.as_str(), "08:00");
        // The partial frame was discarded, not kept for the next fetch
        assert!(!parser.is_mid_frame());
    }

    #[test]
    fn test_poll_budget_default_is_one_second() {
        assert_eq!(PollBudget::default().total_ms(), 1000);
    }
}
