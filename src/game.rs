#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // The palette holds seven entries, far below u8::MAX
    clippy::cast_possible_truncation
)]

use crate::components::Rgb;

// Board dimensions of the reference backdrop
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

// Where every new piece appears
pub const SPAWN_COLUMN: i32 = 3;
pub const SPAWN_ROW: i32 = 0;

// Timing
pub const DROP_INTERVAL_MS: u64 = 350; // Gravity step; strictly-greater gate
pub const FRAME_INTERVAL_MS: u64 = 16; // Host frame pacing, roughly 60 FPS

// Layout, in surface pixels
pub const BOARD_PADDING: u32 = 32;
pub const DEFAULT_BLOCK_SIZE: u32 = 36; // Used until the first resize arrives

// Block styling
pub const GLOW_BLUR: u32 = 24;
pub const OUTLINE_WIDTH: u32 = 2;
pub const BACKGROUND: Rgb = Rgb::from_hex(0x1a1a2e);
pub const OUTLINE: Rgb = Rgb::from_hex(0xffffff);

// Widest shape template; spawn columns must leave room for it
pub const MAX_SHAPE_WIDTH: usize = 4;

/// Neon palette, index-aligned with the shape templates (cell value `n` uses `PALETTE[n - 1]`).
pub const PALETTE: [Rgb; 7] = [
    Rgb::from_hex(0x01cdfe), // neon blue
    Rgb::from_hex(0xff71ce), // neon pink
    Rgb::from_hex(0xb967ff), // neon purple
    Rgb::from_hex(0x05ffa1), // neon green
    Rgb::from_hex(0xfff600), // neon yellow
    Rgb::from_hex(0xfffb96), // neon light yellow
    Rgb::from_hex(0xffb347), // neon orange
];

pub const N_COLORS: u8 = PALETTE.len() as u8;

/// Shape templates. A filled cell holds the piece's color index.
pub const SHAPES: [&[&[u8]]; 7] = [
    // I
    &[&[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0], &[0, 0, 0, 0]],
    // J
    &[&[2, 0, 0], &[2, 2, 2], &[0, 0, 0]],
    // L
    &[&[0, 0, 3], &[3, 3, 3], &[0, 0, 0]],
    // O
    &[&[4, 4], &[4, 4]],
    // S
    &[&[0, 5, 5], &[5, 5, 0], &[0, 0, 0]],
    // T
    &[&[0, 6, 0], &[6, 6, 6], &[0, 0, 0]],
    // Z
    &[&[7, 7, 0], &[0, 7, 7], &[0, 0, 0]],
];

const _: () = assert!(SHAPES.len() == PALETTE.len());

/// Palette color for a grid cell value, `None` for empty or out-of-range values.
#[must_use]
pub fn color_for(value: u8) -> Option<Rgb> {
    if value == 0 {
        return None;
    }
    PALETTE.get(usize::from(value) - 1).copied()
}
