//! Dashboard fact protocol
//!
//! The dashboard server pushes a plain-text stream of facts over TCP.
//! The client only reads; it sends nothing.
//!
//! # Wire format
//!
//! Zero or more frames, concatenated with no other delimiter:
//! ```text
//! ┌──────┬─────┬───────┬─────┐
//! │ KIND │ `|` │ VALUE │ `]` │
//! └──────┴─────┴───────┴─────┘
//! ```
//! `]` terminates a frame and must not appear inside VALUE; the first
//! `|` splits kind from value. Frames without a separator are protocol
//! noise and are dropped, never surfaced as errors. The one kind the
//! reference dashboard acts on is `TIME`, a free-form display string
//! such as `14:32 Mon 03 Jan`.

#![no_std]
#![deny(unsafe_code)]

pub mod client;
pub mod facts;
pub mod frame;

pub use client::{drain_records, FetchError, PollBudget};
pub use facts::{FactTable, FACT_TIME, MAX_FACTS};
pub use frame::{Record, RecordParser, FIELD_SEPARATOR, FRAME_DELIMITER, MAX_KIND_LEN, MAX_VALUE_LEN};
