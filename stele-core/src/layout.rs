//! Display layout
//!
//! Fixed geometry for the LilyGo T5 4.7" panel: the inverted header
//! band across the top and two divider lines splitting the rest into
//! quadrants. Positions are derived from the panel dimensions, not
//! configurable.

use stele_display::{Point, Region};

/// Panel width in pixels
pub const PANEL_WIDTH: usize = 960;

/// Panel height in pixels
pub const PANEL_HEIGHT: usize = 540;

/// Height of the inverted header band
pub const HEADER_HEIGHT: usize = 32;

/// Origin of the time string inside the header band
pub const HEADER_TEXT_ORIGIN: Point = Point::new(12, 12);

/// Rendered when no TIME fact has been received yet
pub const TIME_PLACEHOLDER: &str = "--:--";

/// The header band: full width, fixed height, top of the panel
pub const fn header_region() -> Region {
    Region::new(0, 0, PANEL_WIDTH, HEADER_HEIGHT)
}

/// Horizontal divider line at mid-height
pub const fn horizontal_divider() -> Region {
    Region::new(0, PANEL_HEIGHT / 2 - 1, PANEL_WIDTH, 1)
}

/// Vertical divider line at mid-width
pub const fn vertical_divider() -> Region {
    Region::new(PANEL_WIDTH / 2 - 1, 0, 1, PANEL_HEIGHT)
}
