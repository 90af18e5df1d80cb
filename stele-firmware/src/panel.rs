//! `PanelDriver` adapter for the ED047TC1 e-paper on the LilyGo T5 4.7".

use embedded_graphics::image::{Image, ImageRaw};
use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::*;
use esp_hal::delay::Delay;
use lilygo_epd47::{Display, DrawMode};
use stele_core::layout::{PANEL_HEIGHT, PANEL_WIDTH};
use stele_display::{DisplayError, PanelDriver};

pub struct Ed047Panel {
    display: Display,
    delay: Delay,
    powered: bool,
}

impl Ed047Panel {
    pub fn new(display: Display, delay: Delay) -> Self {
        Self {
            display,
            delay,
            powered: false,
        }
    }
}

impl PanelDriver for Ed047Panel {
    fn power_on(&mut self) -> Result<(), DisplayError> {
        self.display.power_on();
        // The supply rails need a moment before the first refresh.
        self.delay.delay_millis(10);
        self.powered = true;
        Ok(())
    }

    fn power_off(&mut self) -> Result<(), DisplayError> {
        self.display.power_off();
        self.powered = false;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        if !self.powered {
            return Err(DisplayError::NotInitialized);
        }
        self.display
            .clear()
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_grayscale_image(&mut self, frame: &[u8]) -> Result<(), DisplayError> {
        if !self.powered {
            return Err(DisplayError::NotInitialized);
        }
        if frame.len() != PANEL_WIDTH * PANEL_HEIGHT / 2 {
            return Err(DisplayError::InvalidBuffer);
        }
        // Packed 4-bpp with the even-x pixel in the high nibble is
        // exactly the `Gray4` raw image layout, so no repacking here.
        let raw = ImageRaw::<Gray4>::new(frame, PANEL_WIDTH as u32);
        Image::new(&raw, Point::zero())
            .draw(&mut self.display)
            .map_err(|_| DisplayError::Communication)?;
        self.display
            .flush(DrawMode::BlackOnWhite)
            .map_err(|_| DisplayError::Communication)
    }

    fn dimensions(&self) -> (usize, usize) {
        (PANEL_WIDTH, PANEL_HEIGHT)
    }
}
