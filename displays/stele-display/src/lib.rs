//! Display primitives for the Stele e-paper dashboard
//!
//! This crate provides:
//! - `Framebuffer`, a packed 4-bit grayscale pixel buffer (two pixels per
//!   byte) with clear/rect/text/invert operations
//! - `Font` trait and a built-in 8x8 bitmap font for the header text
//! - `PanelDriver` trait abstracting the e-paper panel hardware
//!
//! # Architecture
//!
//! The framebuffer is plain memory: all drawing happens here on the
//! controller, and the finished buffer is handed to a `PanelDriver`
//! implementation for a full-screen grayscale blit. Panel power
//! sequencing and waveform timing stay behind the trait.
//!
//! Pixel packing follows the panel's raw image layout: the even-x pixel
//! of each pair occupies the high nibble, `0x0` is black and `0xF` is
//! white. A full buffer can therefore be blitted without repacking.

#![no_std]

extern crate alloc;

pub mod font;
pub mod framebuffer;
pub mod panel;

// Re-export key types
pub use font::{Font, Glyph, Mono8x8};
pub use framebuffer::{Framebuffer, Point, Region, RegionError, SHADE_BLACK, SHADE_WHITE};
pub use panel::{DisplayError, PanelDriver};
