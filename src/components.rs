#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since we validate values are non-negative before casting
    clippy::cast_sign_loss,
    // Allow potential wrapping when casting between types of same size as we validate values are in range
    clippy::cast_possible_wrap
)]

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::game::{self, N_COLORS, SHAPES};
use crate::random::PieceRandom;

/// A 24-bit color, written as `#rrggbb` in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[must_use]
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let digits = value.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("invalid color {value:?}, expected #rrggbb"));
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_hex)
            .map_err(|e| format!("invalid color {value:?}: {e}"))
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Uniform pick through the injected random source.
    pub fn random(rng: &mut dyn PieceRandom) -> Self {
        let index = rng.next_index(Self::ALL.len());
        Self::ALL[index % Self::ALL.len()]
    }

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::J => 1,
            PieceKind::L => 2,
            PieceKind::O => 3,
            PieceKind::S => 4,
            PieceKind::T => 5,
            PieceKind::Z => 6,
        }
    }

    /// Grid value written by this piece (1-based color index).
    #[must_use]
    pub fn value(self) -> u8 {
        self.index() as u8 + 1
    }

    #[must_use]
    pub fn shape(self) -> &'static [&'static [u8]] {
        SHAPES[self.index()]
    }

    #[must_use]
    pub fn color(self) -> Rgb {
        game::PALETTE[self.index()]
    }

    /// Relative `(dx, dy)` offsets of the filled cells, row by row.
    #[must_use]
    pub fn filled_cells(self) -> Vec<(i32, i32)> {
        let mut cells = Vec::with_capacity(4);
        for (dy, row) in self.shape().iter().enumerate() {
            for (dx, &value) in row.iter().enumerate() {
                if value != 0 {
                    cells.push((dx as i32, dy as i32));
                }
            }
        }
        cells
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The landed cells. Row-major: `cells[row][col]`.
/// Dimensions are fixed at construction.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<Vec<u8>>,
}

impl Grid {
    #[must_use]
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![vec![0; cols]; rows],
        }
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cells(&self) -> &[Vec<u8>] {
        &self.cells
    }

    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(0);
        }
    }

    #[must_use]
    pub fn get(&self, col: usize, row: usize) -> Option<u8> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Writes a raw cell value. Out-of-range coordinates and values are ignored.
    pub fn set(&mut self, col: usize, row: usize, value: u8) {
        if value > N_COLORS {
            return;
        }
        if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = value;
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|row| row.iter().all(|&c| c == 0))
    }

    /// `(col, row, value)` for every occupied cell.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, value)| **value != 0)
                .map(move |(col, value)| (col, row, *value))
        })
    }

    /// Would `kind` at `position` hit the floor, a side wall or a landed cell?
    /// Rows above the top edge never collide.
    #[must_use]
    pub fn collides(&self, kind: PieceKind, position: Position) -> bool {
        let cols = i32::try_from(self.cols).unwrap_or(i32::MAX);
        let rows = i32::try_from(self.rows).unwrap_or(i32::MAX);

        kind.filled_cells().into_iter().any(|(dx, dy)| {
            let x = position.x + dx;
            let y = position.y + dy;

            if y >= rows || x < 0 || x >= cols {
                return true;
            }
            y >= 0 && self.get(x as usize, y as usize).is_some_and(|c| c != 0)
        })
    }

    /// Writes the piece's color index into every in-bounds filled cell.
    /// Returns how many cells were written.
    pub fn merge(&mut self, kind: PieceKind, position: Position) -> usize {
        let value = kind.value();
        let mut written = 0;

        for (dx, dy) in kind.filled_cells() {
            let x = position.x + dx;
            let y = position.y + dy;

            if x >= 0 && (x as usize) < self.cols && y >= 0 && (y as usize) < self.rows {
                let cell = &mut self.cells[y as usize][x as usize];
                debug_assert_eq!(*cell, 0, "merge over occupied cell ({x}, {y})");
                *cell = value;
                written += 1;
            }
        }

        written
    }

    /// Removes every full row, backfilling empty rows at the top.
    /// Returns the indices (top to bottom) of the rows that were removed.
    pub fn clear_full_rows(&mut self) -> Vec<usize> {
        let cleared: Vec<usize> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, row)| row.iter().all(|&c| c != 0))
            .map(|(index, _)| index)
            .collect();

        if cleared.is_empty() {
            return cleared;
        }

        self.cells.retain(|row| row.iter().any(|&c| c == 0));
        while self.cells.len() < self.rows {
            self.cells.insert(0, vec![0; self.cols]);
        }

        cleared
    }
}

/// The single falling piece.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub position: Position,
}

impl ActivePiece {
    /// Absolute grid coordinates of the piece's filled cells.
    #[must_use]
    pub fn cells(&self) -> Vec<Position> {
        self.kind
            .filled_cells()
            .into_iter()
            .map(|(dx, dy)| self.position.offset(dx, dy))
            .collect()
    }
}

/// Where and when pieces appear and fall.
#[derive(Resource, Debug, Clone, Copy)]
pub struct DropTimer {
    pub last_drop: Duration,
    pub interval: Duration,
    pub spawn: Position,
}

impl DropTimer {
    #[must_use]
    pub fn is_due(&self, now: Duration) -> bool {
        now.saturating_sub(self.last_drop) > self.interval
    }
}

/// Surface size and the block size derived from it.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub block_size: u32,
}

impl Viewport {
    /// Largest whole block size that fits `cols x rows` inside the padded surface, at least 1.
    #[must_use]
    pub fn fit_block_size(width: u32, height: u32, padding: u32, cols: usize, rows: usize) -> u32 {
        let avail_w = i64::from(width) - 2 * i64::from(padding);
        let avail_h = i64::from(height) - 2 * i64::from(padding);
        let cols = i64::try_from(cols.max(1)).unwrap_or(i64::MAX);
        let rows = i64::try_from(rows.max(1)).unwrap_or(i64::MAX);

        let block = (avail_w / cols).min(avail_h / rows);
        u32::try_from(block.max(1)).unwrap_or(u32::MAX)
    }

    /// Top-left pixel of a centered `cols x rows` board. Negative when the board overflows.
    #[must_use]
    pub fn board_offset(&self, cols: usize, rows: usize) -> (i32, i32) {
        let block = i64::from(self.block_size);
        let board_w = i64::try_from(cols).unwrap_or(i64::MAX) * block;
        let board_h = i64::try_from(rows).unwrap_or(i64::MAX) * block;

        let x = (i64::from(self.width) - board_w) / 2;
        let y = (i64::from(self.height) - board_h) / 2;
        (
            i32::try_from(x).unwrap_or(i32::MIN),
            i32::try_from(y).unwrap_or(i32::MIN),
        )
    }
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStyle {
    pub background: Rgb,
    pub outline: Rgb,
    pub line_width: u32,
    pub glow_blur: u32,
    pub board_padding: u32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background: game::BACKGROUND,
            outline: game::OUTLINE,
            line_width: game::OUTLINE_WIDTH,
            glow_blur: game::GLOW_BLUR,
            board_padding: game::BOARD_PADDING,
        }
    }
}

/// Random source used when spawning pieces.
#[derive(Resource)]
pub struct PieceRng(pub Box<dyn PieceRandom + Send + Sync>);
