//! Fact table
//!
//! The client's cache of the most recently seen value per fact kind.
//! Values are replaced wholesale on each successful fetch and persist
//! across render cycles, so a failed fetch degrades to stale data
//! rather than a blank screen.

use heapless::{LinearMap, String};

use crate::frame::{Record, MAX_KIND_LEN, MAX_VALUE_LEN};

/// The timestamp fact kind, the one the reference dashboard renders
pub const FACT_TIME: &str = "TIME";

/// Maximum number of distinct fact kinds
pub const MAX_FACTS: usize = 8;

/// Most-recent value per fact kind
///
/// Unknown kinds are stored too, for forward compatibility; once the
/// table is full, records with new kinds are dropped. The kind universe
/// is fixed by the protocol, so the cap is not reached in practice.
#[derive(Debug, Clone, Default)]
pub struct FactTable {
    entries: LinearMap<String<MAX_KIND_LEN>, String<MAX_VALUE_LEN>, MAX_FACTS>,
}

impl FactTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a record, replacing any previous value of the same kind
    pub fn apply(&mut self, record: &Record) {
        if let Some(slot) = self.entries.get_mut(&record.kind) {
            *slot = record.value.clone();
        } else {
            let _ = self.entries.insert(record.kind.clone(), record.value.clone());
        }
    }

    /// Current value for `kind`, if one has ever been received
    pub fn get(&self, kind: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == kind)
            .map(|(_, v)| v.as_str())
    }

    /// Convenience accessor for the `TIME` fact
    pub fn time(&self) -> Option<&str> {
        self.get(FACT_TIME)
    }

    /// Number of kinds with a cached value
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no fact has been received yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::RecordParser;
    use heapless::Vec;

    fn record(kind: &str, value: &str) -> Record {
        Record {
            kind: String::try_from(kind).unwrap(),
            value: String::try_from(value).unwrap(),
        }
    }

    #[test]
    fn test_apply_and_get() {
        let mut facts = FactTable::new();
        facts.apply(&record("TIME", "08:00"));
        assert_eq!(facts.get("TIME"), Some("08:00"));
        assert_eq!(facts.time(), Some("08:00"));
        assert_eq!(facts.get("WEATHER"), None);
    }

    #[test]
    fn test_last_write_wins() {
        let mut facts = FactTable::new();
        let mut parser = RecordParser::new();
        let mut records = Vec::<Record, 8>::new();
        parser.feed_bytes(b"TIME|08:00]TIME|09:00]", &mut records);
        for r in &records {
            facts.apply(r);
        }
        assert_eq!(facts.len(), 1);
        assert_eq!(facts.time(), Some("09:00"));
    }

    #[test]
    fn test_unknown_kinds_preserved() {
        let mut facts = FactTable::new();
        facts.apply(&record("WEATHER", "sunny"));
        assert_eq!(facts.get("WEATHER"), Some("sunny"));
        assert_eq!(facts.time(), None);
    }

    #[test]
    fn test_malformed_frame_leaves_table_unchanged() {
        let mut facts = FactTable::new();
        facts.apply(&record("TIME", "08:00"));

        let mut parser = RecordParser::new();
        let mut records = Vec::<Record, 8>::new();
        parser.feed_bytes(b"GARBAGE]", &mut records);
        for r in &records {
            facts.apply(r);
        }
        assert_eq!(facts.time(), Some("08:00"));
        assert_eq!(facts.len(), 1);
    }

    #[test]
    fn test_full_table_drops_new_kinds() {
        let mut facts = FactTable::new();
        for i in 0..MAX_FACTS {
            let mut kind = String::<MAX_KIND_LEN>::new();
            core::fmt::Write::write_fmt(&mut kind, format_args!("KIND{}", i)).unwrap();
            facts.apply(&Record {
                kind,
                value: String::try_from("v").unwrap(),
            });
        }
        facts.apply(&record("OVERFLOW", "x"));
        assert_eq!(facts.len(), MAX_FACTS);
        assert_eq!(facts.get("OVERFLOW"), None);
        // Existing kinds still update
        facts.apply(&record("KIND0", "updated"));
        assert_eq!(facts.get("KIND0"), Some("updated"));
    }
}
