//! Frame decoding for the dashboard fact stream
//!
//! Frame format: `KIND|VALUE]`. The `]` delimiter is consumed and
//! excluded from the frame; the first `|` splits the kind from the
//! value, so values may themselves contain `|`.
//!
//! Decoding is deliberately lenient: a frame without a separator, with
//! invalid UTF-8, or longer than the parser buffer is dropped and the
//! parser resynchronizes at the next delimiter. Malformed input from
//! the server must never take the dashboard down.

use heapless::{String, Vec};

/// Terminates each frame
pub const FRAME_DELIMITER: u8 = b']';

/// Splits kind from value inside a frame
pub const FIELD_SEPARATOR: u8 = b'|';

/// Maximum fact kind length in bytes
pub const MAX_KIND_LEN: usize = 16;

/// Maximum fact value length in bytes
pub const MAX_VALUE_LEN: usize = 64;

/// Maximum frame size (kind + separator + value)
pub const MAX_FRAME_LEN: usize = MAX_KIND_LEN + 1 + MAX_VALUE_LEN;

/// One parsed `KIND|VALUE` unit of server-pushed data.
///
/// Records are transient: the caller merges them into a `FactTable`
/// and drops them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Record {
    pub kind: String<MAX_KIND_LEN>,
    pub value: String<MAX_VALUE_LEN>,
}

/// Push parser for the fact stream
///
/// Feed bytes as they arrive; a complete valid frame yields a `Record`.
/// A frame still buffered when the stream closes is a truncated frame
/// and is dropped by `reset` - a partial value is indistinguishable
/// from a frame whose delimiter was lost, and rendering half a value
/// is worse than keeping the previous one.
#[derive(Debug, Clone, Default)]
pub struct RecordParser {
    buf: Vec<u8, MAX_FRAME_LEN>,
    overflowed: bool,
}

impl RecordParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard any partially buffered frame
    pub fn reset(&mut self) {
        self.buf.clear();
        self.overflowed = false;
    }

    /// Whether bytes of an unterminated frame are buffered
    pub fn is_mid_frame(&self) -> bool {
        !self.buf.is_empty() || self.overflowed
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Some(record)` when the byte completes a valid frame.
    /// Malformed frames complete to `None` and the parser is ready for
    /// the next frame.
    pub fn feed(&mut self, byte: u8) -> Option<Record> {
        if byte == FRAME_DELIMITER {
            let record = if self.overflowed {
                None
            } else {
                decode_frame(&self.buf)
            };
            self.reset();
            return record;
        }
        if self.buf.push(byte).is_err() {
            // Oversized frame: drop it, resync at the next delimiter
            self.overflowed = true;
        }
        None
    }

    /// Feed a chunk of bytes, appending completed records to `out`.
    ///
    /// Records beyond the capacity of `out` are dropped.
    pub fn feed_bytes<const N: usize>(&mut self, bytes: &[u8], out: &mut Vec<Record, N>) {
        for &byte in bytes {
            if let Some(record) = self.feed(byte) {
                let _ = out.push(record);
            }
        }
    }
}

fn decode_frame(frame: &[u8]) -> Option<Record> {
    let sep = frame.iter().position(|&b| b == FIELD_SEPARATOR)?;
    let kind = core::str::from_utf8(&frame[..sep]).ok()?;
    let value = core::str::from_utf8(&frame[sep + 1..]).ok()?;
    Some(Record {
        kind: String::try_from(kind).ok()?,
        value: String::try_from(value).ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse_all(input: &[u8]) -> Vec<Record, 8> {
        let mut parser = RecordParser::new();
        let mut out = Vec::new();
        parser.feed_bytes(input, &mut out);
        out
    }

    #[test]
    fn test_single_frame() {
        let records = parse_all(b"TIME|14:32 Mon 03 Jan]");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind.as_str(), "TIME");
        assert_eq!(records[0].value.as_str(), "14:32 Mon 03 Jan");
    }

    #[test]
    fn test_concatenated_frames_in_order() {
        let records = parse_all(b"TIME|08:00]TIME|09:00]");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].value.as_str(), "08:00");
        assert_eq!(records[1].value.as_str(), "09:00");
    }

    #[test]
    fn test_frame_without_separator_dropped() {
        let records = parse_all(b"GARBAGE]");
        assert!(records.is_empty());
    }

    #[test]
    fn test_value_may_contain_separator() {
        let records = parse_all(b"NOTE|a|b]");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind.as_str(), "NOTE");
        assert_eq!(records[0].value.as_str(), "a|b");
    }

    #[test]
    fn test_empty_value() {
        let records = parse_all(b"TIME|]");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value.as_str(), "");
    }

    #[test]
    fn test_resync_after_malformed_frame() {
        let records = parse_all(b"noise without delimiter]TIME|10:00]");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value.as_str(), "10:00");
    }

    #[test]
    fn test_oversized_frame_dropped_and_resynced() {
        let mut input = heapless::Vec::<u8, 256>::new();
        input.extend_from_slice(b"TIME|").unwrap();
        for _ in 0..(MAX_FRAME_LEN + 10) {
            input.push(b'x').unwrap();
        }
        input.extend_from_slice(b"]TIME|11:00]").unwrap();

        let records = parse_all(&input);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value.as_str(), "11:00");
    }

    #[test]
    fn test_invalid_utf8_dropped() {
        let records = parse_all(b"TIME|\xFF\xFE]TIME|12:00]");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value.as_str(), "12:00");
    }

    #[test]
    fn test_truncated_tail_is_mid_frame() {
        let mut parser = RecordParser::new();
        let mut out = Vec::<Record, 8>::new();
        parser.feed_bytes(b"TIME|12:0", &mut out);
        assert!(out.is_empty());
        assert!(parser.is_mid_frame());
        parser.reset();
        assert!(!parser.is_mid_frame());
    }

    proptest! {
        #[test]
        fn prop_wellformed_frame_roundtrips(
            kind in "[A-Z]{1,16}",
            value in "[A-Za-z0-9 :./|-]{0,64}",
        ) {
            let mut input = heapless::Vec::<u8, 128>::new();
            input.extend_from_slice(kind.as_bytes()).unwrap();
            input.push(FIELD_SEPARATOR).unwrap();
            input.extend_from_slice(value.as_bytes()).unwrap();
            input.push(FRAME_DELIMITER).unwrap();

            let records = parse_all(&input);
            prop_assert_eq!(records.len(), 1);
            prop_assert_eq!(records[0].kind.as_str(), kind.as_str());
            prop_assert_eq!(records[0].value.as_str(), value.as_str());
        }

        #[test]
        fn prop_garbage_never_panics(input in proptest::collection::vec(any::<u8>(), 0..512)) {
            let _ = parse_all(&input);
        }
    }
}
