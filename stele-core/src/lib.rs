//! Board-agnostic dashboard logic for the Stele e-paper client
//!
//! This crate contains everything between the wire protocol and the
//! panel hardware:
//!
//! - Configuration type definitions and the TOML-subset parser
//! - Display layout (panel geometry, header band, divider chrome)
//! - The render pipeline turning a fact table into a finished frame

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod layout;
pub mod render;

pub use config::{parse_config, DashboardConfig, NetworkConfig, ParseError, ServerConfig};
pub use render::{RenderError, Renderer};
