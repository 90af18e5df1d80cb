//! Panel driver trait
//!
//! Defines the interface to the e-paper panel hardware. Power
//! sequencing, waveform timing and the pixel push live behind this
//! trait; the render pipeline only hands over a finished buffer.

/// Panel driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the panel
    Communication,
    /// Panel not powered/initialized
    NotInitialized,
    /// Buffer length does not match the panel dimensions
    InvalidBuffer,
}

/// E-paper panel driver
///
/// Operations mirror the panel's command set: power the high-voltage
/// rail, clear the screen, push a full frame, power down. Every call
/// reports failure explicitly; a dashboard cycle must not assume the
/// hardware succeeded.
pub trait PanelDriver {
    /// Enable the panel power rail
    fn power_on(&mut self) -> Result<(), DisplayError>;

    /// Disable the panel power rail
    fn power_off(&mut self) -> Result<(), DisplayError>;

    /// Flash the screen clear (removes ghosting before a redraw)
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Push a full-screen packed 4-bpp grayscale frame.
    ///
    /// `frame` must be exactly `width * height / 2` bytes, even-x pixel
    /// in the high nibble.
    fn draw_grayscale_image(&mut self, frame: &[u8]) -> Result<(), DisplayError>;

    /// Panel dimensions in pixels (width, height)
    fn dimensions(&self) -> (usize, usize);
}
