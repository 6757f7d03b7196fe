//! Built-in 5x7 bitmap font
//!
//! Uppercase only; lowercase input is folded to uppercase. Each lit run of
//! pixels in a glyph row becomes one rectangle.

use glam::Vec2;

use super::shapes::push_rect;
use super::vertex::Vertex;

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;
/// Horizontal advance per character, in font pixels (glyph + 1 column gap)
pub const GLYPH_ADVANCE: u32 = GLYPH_WIDTH + 1;

/// HUD text scale
pub const SMALL: f32 = 2.0;
/// Banner text scale
pub const LARGE: f32 = 5.0;

/// Row bitmaps, top to bottom; bit 4 is the leftmost column
fn glyph(c: char) -> [u8; GLYPH_HEIGHT as usize] {
    match c.to_ascii_uppercase() {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '!' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        '/' => [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00],
        ' ' => [0x00; 7],
        _ => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04], // '?'
    }
}

/// Rendered width of `text` in pixels
pub fn text_width(text: &str, scale: f32) -> f32 {
    let chars = text.chars().count() as u32;
    if chars == 0 {
        return 0.0;
    }
    (chars * GLYPH_ADVANCE - 1) as f32 * scale
}

/// Largest scale up to `preferred` at which `text` fits in `max_width`
pub fn fit_scale(text: &str, preferred: f32, max_width: f32) -> f32 {
    let unit = text_width(text, 1.0);
    if unit * preferred <= max_width || unit <= 0.0 {
        preferred
    } else {
        max_width / unit
    }
}

/// Push `text` with its top-left corner at `pos`
pub fn push_text(out: &mut Vec<Vertex>, text: &str, pos: Vec2, scale: f32, color: [f32; 4]) {
    for (i, c) in text.chars().enumerate() {
        let origin = pos + Vec2::new((i as u32 * GLYPH_ADVANCE) as f32 * scale, 0.0);
        for (row, bits) in glyph(c).iter().enumerate() {
            let y = origin.y + row as f32 * scale;
            let mut col = 0;
            while col < GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                    col += 1;
                    continue;
                }
                let start = col;
                while col < GLYPH_WIDTH && bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                    col += 1;
                }
                push_rect(
                    out,
                    Vec2::new(origin.x + start as f32 * scale, y),
                    Vec2::new((col - start) as f32 * scale, scale),
                    color,
                );
            }
        }
    }
}

/// Push `text` horizontally centered on `center_x`
pub fn push_text_centered(
    out: &mut Vec<Vertex>,
    text: &str,
    center_x: f32,
    y: f32,
    scale: f32,
    color: [f32; 4],
) {
    let x = (center_x - text_width(text, scale) / 2.0).floor();
    push_text(out, text, Vec2::new(x, y), scale, color);
}
