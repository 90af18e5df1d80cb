//! Render pipeline
//!
//! One render cycle: clear the framebuffer, power the panel, draw the
//! divider chrome and the current TIME fact, invert the header band,
//! blit, power down. The `Renderer` owns the framebuffer for the whole
//! process lifetime - it is allocated once and mutated in place every
//! cycle.

use stele_display::{
    DisplayError, Font, Framebuffer, PanelDriver, RegionError, SHADE_BLACK, SHADE_WHITE,
};
use stele_protocol::FactTable;

use crate::layout;

/// Render cycle failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderError {
    /// A panel driver operation failed
    Display(DisplayError),
    /// A drawing operation fell outside the framebuffer
    Region(RegionError),
}

impl From<DisplayError> for RenderError {
    fn from(e: DisplayError) -> Self {
        RenderError::Display(e)
    }
}

impl From<RegionError> for RenderError {
    fn from(e: RegionError) -> Self {
        RenderError::Region(e)
    }
}

/// Dashboard renderer
///
/// Owns the panel-sized framebuffer and the header font. Hardware
/// access goes through the `PanelDriver` passed to each render call.
pub struct Renderer<F: Font> {
    fb: Framebuffer,
    font: F,
}

impl<F: Font> Renderer<F> {
    /// Allocate the framebuffer and build a renderer around `font`
    pub fn new(font: F) -> Self {
        Self {
            fb: Framebuffer::new(layout::PANEL_WIDTH, layout::PANEL_HEIGHT),
            font,
        }
    }

    /// The most recently rendered frame
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.fb
    }

    /// Run one full render cycle against `panel`.
    ///
    /// A missing TIME fact renders the placeholder instead; the panel
    /// is powered down even when the blit fails.
    pub fn render<P: PanelDriver>(
        &mut self,
        facts: &FactTable,
        panel: &mut P,
    ) -> Result<(), RenderError> {
        self.fb.clear(SHADE_WHITE);

        panel.power_on()?;
        panel.clear()?;

        self.fb.draw_rect(layout::horizontal_divider(), SHADE_BLACK)?;
        self.fb.draw_rect(layout::vertical_divider(), SHADE_BLACK)?;

        let time = facts.time().unwrap_or(layout::TIME_PLACEHOLDER);
        self.fb
            .draw_text(&self.font, time, layout::HEADER_TEXT_ORIGIN, SHADE_BLACK)?;

        // Render the header as a highlighted bar without redrawing it
        self.fb.invert_region(layout::header_region())?;

        let blit = panel.draw_grayscale_image(self.fb.as_bytes());
        // Power down regardless; the rail must not stay up on a failed blit
        let power = panel.power_off();
        blit?;
        power?;
        Ok(())
    }
}
