//! Font seam and built-in 8x8 bitmap font
//!
//! Glyph rasterization is external to the render pipeline: the pipeline
//! only consumes the `Font` trait. The built-in `Mono8x8` covers the
//! character set the dashboard actually prints (time/date strings).

/// A single glyph bitmap.
///
/// One byte per row, MSB is the leftmost pixel. `width` is at most 8.
#[derive(Debug, Clone, Copy)]
pub struct Glyph {
    pub width: usize,
    pub height: usize,
    pub rows: &'static [u8],
}

/// Narrow interface to the font collaborator
pub trait Font {
    /// Glyph for `ch`. Unknown characters map to a blank glyph.
    fn glyph(&self, ch: char) -> Glyph;

    /// Horizontal cursor advance per glyph
    fn advance(&self) -> usize;

    /// Vertical extent of a text line
    fn line_height(&self) -> usize;
}

const GLYPH_WIDTH: usize = 8;
const GLYPH_HEIGHT: usize = 8;

/// Number of glyphs in the built-in font
const GLYPH_COUNT: usize = 43;

/// Built-in glyph index mapping:
/// - 0-25:  A-Z (lowercase maps to uppercase)
/// - 26-35: 0-9
/// - 36:    space
/// - 37:    . (period)
/// - 38:    : (colon)
/// - 39:    / (slash)
/// - 40:    - (hyphen)
/// - 41:    > (greater than)
/// - 42:    _ (underscore)
#[rustfmt::skip]
static GLYPHS: [u8; GLYPH_COUNT * GLYPH_HEIGHT] = [
    // A
    0x18, 0x3C, 0x66, 0x66, 0x7E, 0x66, 0x66, 0x00,
    // B
    0x7C, 0x66, 0x66, 0x7C, 0x66, 0x66, 0x7C, 0x00,
    // C
    0x3C, 0x66, 0x60, 0x60, 0x60, 0x66, 0x3C, 0x00,
    // D
    0x78, 0x6C, 0x66, 0x66, 0x66, 0x6C, 0x78, 0x00,
    // E
    0x7E, 0x60, 0x60, 0x7C, 0x60, 0x60, 0x7E, 0x00,
    // F
    0x7E, 0x60, 0x60, 0x7C, 0x60, 0x60, 0x60, 0x00,
    // G
    0x3C, 0x66, 0x60, 0x6E, 0x66, 0x66, 0x3C, 0x00,
    // H
    0x66, 0x66, 0x66, 0x7E, 0x66, 0x66, 0x66, 0x00,
    // I
    0x3C, 0x18, 0x18, 0x18, 0x18, 0x18, 0x3C, 0x00,
    // J
    0x1E, 0x0C, 0x0C, 0x0C, 0x0C, 0x6C, 0x38, 0x00,
    // K
    0x66, 0x6C, 0x78, 0x70, 0x78, 0x6C, 0x66, 0x00,
    // L
    0x60, 0x60, 0x60, 0x60, 0x60, 0x60, 0x7E, 0x00,
    // M
    0x63, 0x77, 0x7F, 0x6B, 0x63, 0x63, 0x63, 0x00,
    // N
    0x66, 0x76, 0x7E, 0x7E, 0x6E, 0x66, 0x66, 0x00,
    // O
    0x3C, 0x66, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x00,
    // P
    0x7C, 0x66, 0x66, 0x7C, 0x60, 0x60, 0x60, 0x00,
    // Q
    0x3C, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x0E, 0x00,
    // R
    0x7C, 0x66, 0x66, 0x7C, 0x78, 0x6C, 0x66, 0x00,
    // S
    0x3C, 0x66, 0x60, 0x3C, 0x06, 0x66, 0x3C, 0x00,
    // T
    0x7E, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x00,
    // U
    0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x00,
    // V
    0x66, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x18, 0x00,
    // W
    0x63, 0x63, 0x63, 0x6B, 0x7F, 0x77, 0x63, 0x00,
    // X
    0x66, 0x66, 0x3C, 0x18, 0x3C, 0x66, 0x66, 0x00,
    // Y
    0x66, 0x66, 0x66, 0x3C, 0x18, 0x18, 0x18, 0x00,
    // Z
    0x7E, 0x06, 0x0C, 0x18, 0x30, 0x60, 0x7E, 0x00,
    // 0
    0x3C, 0x66, 0x6E, 0x76, 0x66, 0x66, 0x3C, 0x00,
    // 1
    0x18, 0x38, 0x18, 0x18, 0x18, 0x18, 0x7E, 0x00,
    // 2
    0x3C, 0x66, 0x06, 0x0C, 0x30, 0x60, 0x7E, 0x00,
    // 3
    0x3C, 0x66, 0x06, 0x1C, 0x06, 0x66, 0x3C, 0x00,
    // 4
    0x06, 0x0E, 0x1E, 0x66, 0x7F, 0x06, 0x06, 0x00,
    // 5
    0x7E, 0x60, 0x7C, 0x06, 0x06, 0x66, 0x3C, 0x00,
    // 6
    0x3C, 0x66, 0x60, 0x7C, 0x66, 0x66, 0x3C, 0x00,
    // 7
    0x7E, 0x66, 0x0C, 0x18, 0x18, 0x18, 0x18, 0x00,
    // 8
    0x3C, 0x66, 0x66, 0x3C, 0x66, 0x66, 0x3C, 0x00,
    // 9
    0x3C, 0x66, 0x66, 0x3E, 0x06, 0x66, 0x3C, 0x00,
    // space
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    // period
    0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x00,
    // colon
    0x00, 0x18, 0x18, 0x00, 0x18, 0x18, 0x00, 0x00,
    // slash
    0x02, 0x06, 0x0C, 0x18, 0x30, 0x60, 0x40, 0x00,
    // hyphen
    0x00, 0x00, 0x00, 0x7E, 0x00, 0x00, 0x00, 0x00,
    // greater than
    0x30, 0x18, 0x0C, 0x06, 0x0C, 0x18, 0x30, 0x00,
    // underscore
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x7E, 0x00,
];

/// Index of the space glyph, also the fallback for unknown characters
const SPACE: usize = 36;

fn glyph_index(ch: char) -> usize {
    match ch {
        ' ' => 36,
        '.' => 37,
        ':' => 38,
        '/' => 39,
        '-' => 40,
        '>' => 41,
        '_' => 42,
        'A'..='Z' => ch as usize - 'A' as usize,
        'a'..='z' => ch as usize - 'a' as usize,
        '0'..='9' => ch as usize - '0' as usize + 26,
        _ => SPACE,
    }
}

/// Built-in 8x8 monospace bitmap font
pub struct Mono8x8;

impl Font for Mono8x8 {
    fn glyph(&self, ch: char) -> Glyph {
        let start = glyph_index(ch) * GLYPH_HEIGHT;
        Glyph {
            width: GLYPH_WIDTH,
            height: GLYPH_HEIGHT,
            rows: &GLYPHS[start..start + GLYPH_HEIGHT],
        }
    }

    fn advance(&self) -> usize {
        GLYPH_WIDTH
    }

    fn line_height(&self) -> usize {
        GLYPH_HEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_maps_to_uppercase() {
        assert_eq!(Mono8x8.glyph('a').rows, Mono8x8.glyph('A').rows);
        assert_eq!(Mono8x8.glyph('z').rows, Mono8x8.glyph('Z').rows);
    }

    #[test]
    fn test_unknown_renders_blank() {
        assert!(Mono8x8.glyph('@').rows.iter().all(|&row| row == 0));
    }

    #[test]
    fn test_digits_are_distinct() {
        assert_ne!(Mono8x8.glyph('0').rows, Mono8x8.glyph('8').rows);
        assert_ne!(Mono8x8.glyph('1').rows, Mono8x8.glyph('7').rows);
    }

    #[test]
    fn test_metrics() {
        assert_eq!(Mono8x8.advance(), 8);
        assert_eq!(Mono8x8.line_height(), 8);
        assert_eq!(Mono8x8.glyph(':').height, 8);
    }
}
