//! 3x5 bitmap digits for the optional human-readable line.

use image::{GrayImage, Luma};

pub const GLYPH_WIDTH: u32 = 3;
pub const GLYPH_HEIGHT: u32 = 5;
/// Blank columns between glyphs.
pub const GLYPH_SPACING: u32 = 1;

// One byte per row, bit 2 is the leftmost column.
const DIGITS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b001, 0b001, 0b001],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];

/// Pixel width of `text` drawn at `scale`.
pub fn text_width(text: &str, scale: u32) -> u32 {
    let count = text.chars().count() as u32;
    if count == 0 {
        return 0;
    }
    (count * (GLYPH_WIDTH + GLYPH_SPACING) - GLYPH_SPACING) * scale
}

/// Draws the digits of `text` with their top-left corner at (`x`, `y`).
/// Non-digits are left blank; pixels outside the image are clipped.
pub fn draw_text(img: &mut GrayImage, text: &str, x: u32, y: u32, scale: u32, ink: Luma<u8>) {
    let advance = (GLYPH_WIDTH + GLYPH_SPACING) * scale;
    for (index, character) in text.chars().enumerate() {
        let Some(digit) = character.to_digit(10) else {
            continue;
        };
        let origin_x = x + index as u32 * advance;
        for (row, bits) in DIGITS[digit as usize].iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                fill_cell(img, origin_x + col * scale, y + row as u32 * scale, scale, ink);
            }
        }
    }
}

fn fill_cell(img: &mut GrayImage, x: u32, y: u32, scale: u32, ink: Luma<u8>) {
    for py in y..(y + scale).min(img.height()) {
        for px in x..(x + scale).min(img.width()) {
            img.put_pixel(px, py, ink);
        }
    }
}
