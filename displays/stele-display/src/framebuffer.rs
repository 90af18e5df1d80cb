//! Packed 4-bit grayscale framebuffer
//!
//! Two pixels per byte, even x in the high nibble. `0x0` is black,
//! `0xF` is white. The buffer is allocated once at startup (on hardware
//! it lives in PSRAM) and mutated in place for every render cycle.

use alloc::boxed::Box;
use alloc::vec;

use crate::font::Font;

/// Darkest shade (full black)
pub const SHADE_BLACK: u8 = 0x0;

/// Lightest shade (full white)
pub const SHADE_WHITE: u8 = 0xF;

/// Errors from region-taking framebuffer operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegionError {
    /// Region or origin exceeds the framebuffer bounds
    OutOfBounds,
    /// Shade exceeds the 4-bit range 0x0-0xF
    InvalidShade,
}

/// A pixel position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// A rectangle in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Region {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Region {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Packed 4-bpp grayscale framebuffer
pub struct Framebuffer {
    width: usize,
    height: usize,
    data: Box<[u8]>,
}

impl Framebuffer {
    /// Allocate a framebuffer sized to the panel, cleared to white.
    ///
    /// `width` must be even (two pixels per byte).
    pub fn new(width: usize, height: usize) -> Self {
        debug_assert!(width % 2 == 0, "framebuffer width must be even");
        Self {
            width,
            height,
            data: vec![0xFF; width * height / 2].into_boxed_slice(),
        }
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// The packed pixel bytes, ready for a full-screen blit
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Set every pixel to `shade`. The upper nibble of `shade` is ignored.
    pub fn clear(&mut self, shade: u8) {
        let shade = shade & 0x0F;
        let packed = (shade << 4) | shade;
        self.data.fill(packed);
    }

    /// Read the pixel at (x, y), or `None` outside the bounds
    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let byte = self.data[(y * self.width + x) / 2];
        if x % 2 == 0 {
            Some(byte >> 4)
        } else {
            Some(byte & 0x0F)
        }
    }

    /// Set the pixel at (x, y) to `shade`
    pub fn set_pixel(&mut self, x: usize, y: usize, shade: u8) -> Result<(), RegionError> {
        if shade > 0x0F {
            return Err(RegionError::InvalidShade);
        }
        if x >= self.width || y >= self.height {
            return Err(RegionError::OutOfBounds);
        }
        self.put_pixel(x, y, shade);
        Ok(())
    }

    /// Write a pixel without bounds checks. Callers have validated (x, y).
    fn put_pixel(&mut self, x: usize, y: usize, shade: u8) {
        let idx = (y * self.width + x) / 2;
        let byte = self.data[idx];
        self.data[idx] = if x % 2 == 0 {
            (byte & 0x0F) | (shade << 4)
        } else {
            (byte & 0xF0) | shade
        };
    }

    fn check_region(&self, region: &Region) -> Result<(), RegionError> {
        let x_ok = region.x.checked_add(region.width).is_some_and(|e| e <= self.width);
        let y_ok = region.y.checked_add(region.height).is_some_and(|e| e <= self.height);
        if x_ok && y_ok {
            Ok(())
        } else {
            Err(RegionError::OutOfBounds)
        }
    }

    /// Draw the 1-px border of `region` in `shade`.
    ///
    /// An empty region is a no-op.
    pub fn draw_rect(&mut self, region: Region, shade: u8) -> Result<(), RegionError> {
        if shade > 0x0F {
            return Err(RegionError::InvalidShade);
        }
        self.check_region(&region)?;
        if region.width == 0 || region.height == 0 {
            return Ok(());
        }

        let right = region.x + region.width - 1;
        let bottom = region.y + region.height - 1;

        for x in region.x..=right {
            self.put_pixel(x, region.y, shade);
            self.put_pixel(x, bottom, shade);
        }
        for y in region.y..=bottom {
            self.put_pixel(region.x, y, shade);
            self.put_pixel(right, y, shade);
        }
        Ok(())
    }

    /// Bitwise-complement every pixel inside `region`.
    ///
    /// Interior byte pairs are complemented whole; a region starting at an
    /// odd x or ending on an even x complements only the covered nibble,
    /// so no horizontal alignment is required. Applying this twice is the
    /// identity.
    pub fn invert_region(&mut self, region: Region) -> Result<(), RegionError> {
        self.check_region(&region)?;

        let end = region.x + region.width;
        for y in region.y..region.y + region.height {
            let base = y * self.width / 2;
            let mut x = region.x;
            if x % 2 == 1 && x < end {
                // Leading odd pixel sits in the low nibble
                self.data[base + x / 2] ^= 0x0F;
                x += 1;
            }
            while x + 2 <= end {
                self.data[base + x / 2] ^= 0xFF;
                x += 2;
            }
            if x < end {
                // Trailing even pixel in the high nibble
                self.data[base + x / 2] ^= 0xF0;
            }
        }
        Ok(())
    }

    /// Rasterize `text` glyph-by-glyph starting at `origin`.
    ///
    /// Returns the cursor position after the last glyph drawn. Glyphs
    /// that would cross the right edge stop the draw; the cursor then
    /// points past the last full glyph. An origin whose glyph rows would
    /// fall outside the buffer is an error.
    pub fn draw_text(
        &mut self,
        font: &dyn Font,
        text: &str,
        origin: Point,
        shade: u8,
    ) -> Result<Point, RegionError> {
        if shade > 0x0F {
            return Err(RegionError::InvalidShade);
        }
        if origin.x >= self.width || origin.y + font.line_height() > self.height {
            return Err(RegionError::OutOfBounds);
        }

        let mut cursor = origin;
        for ch in text.chars() {
            let glyph = font.glyph(ch);
            if cursor.x + glyph.width > self.width {
                break;
            }
            for (row, &bits) in glyph.rows.iter().enumerate() {
                for col in 0..glyph.width {
                    if (bits >> (7 - col)) & 1 != 0 {
                        self.put_pixel(cursor.x + col, origin.y + row, shade);
                    }
                }
            }
            cursor.x += font.advance();
        }
        Ok(cursor)
    }
}
