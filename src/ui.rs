#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation since clipped cell coordinates always fit the terminal's u16 range
    clippy::cast_possible_truncation,
    // Allow sign loss since coordinates are clamped to be non-negative before casting
    clippy::cast_sign_loss
)]

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};

use crate::components::Rgb;
use crate::surface::{Canvas, Glow, PixelRect};

// Virtual pixels per terminal cell. A cell is roughly twice as tall as it is wide.
pub const CELL_PX_WIDTH: u32 = 8;
pub const CELL_PX_HEIGHT: u32 = 16;

/// Pixel size of a terminal area, as the simulator sees it.
#[must_use]
pub fn surface_size(width: u16, height: u16) -> (u32, u32) {
    (
        u32::from(width) * CELL_PX_WIDTH,
        u32::from(height) * CELL_PX_HEIGHT,
    )
}

#[must_use]
pub fn to_color(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Draws simulator output into a ratatui buffer.
pub struct TerminalCanvas<'a> {
    buffer: &'a mut Buffer,
    area: Rect,
}

impl<'a> TerminalCanvas<'a> {
    pub fn new(buffer: &'a mut Buffer, area: Rect) -> Self {
        Self { buffer, area }
    }

    /// Cells covered by `rect`, clipped to the area. `None` when nothing is visible.
    #[must_use]
    pub fn cell_span(&self, rect: PixelRect) -> Option<Rect> {
        let px_w = i64::from(CELL_PX_WIDTH);
        let px_h = i64::from(CELL_PX_HEIGHT);
        let x = i64::from(rect.x);
        let y = i64::from(rect.y);

        let left = x.div_euclid(px_w);
        let top = y.div_euclid(px_h);
        let right = (x + i64::from(rect.width)).div_euclid(px_w).max(left + 1);
        let bottom = (y + i64::from(rect.height)).div_euclid(px_h).max(top + 1);

        let left = left.max(0);
        let top = top.max(0);
        let right = right.min(i64::from(self.area.width));
        let bottom = bottom.min(i64::from(self.area.height));

        if left >= right || top >= bottom {
            return None;
        }

        Some(Rect {
            x: self.area.x + left as u16,
            y: self.area.y + top as u16,
            width: (right - left) as u16,
            height: (bottom - top) as u16,
        })
    }
}

impl Canvas for TerminalCanvas<'_> {
    fn size(&self) -> (u32, u32) {
        surface_size(self.area.width, self.area.height)
    }

    fn clear(&mut self, color: Rgb) {
        let color = to_color(color);
        for y in self.area.top()..self.area.bottom() {
            for x in self.area.left()..self.area.right() {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.reset();
                    cell.set_symbol(" ");
                    cell.set_fg(color);
                    cell.set_bg(color);
                }
            }
        }
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Rgb, glow: Option<Glow>) {
        let Some(span) = self.cell_span(rect) else {
            return;
        };

        let mut style = Style::default().fg(to_color(color));
        if glow.is_some_and(|g| g.blur > 0) {
            style = style.add_modifier(Modifier::BOLD);
        }

        for y in span.top()..span.bottom() {
            for x in span.left()..span.right() {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.set_symbol("█");
                    cell.set_style(style);
                }
            }
        }
    }

    // Terminal cells cannot show sub-cell line widths, so the outline is always one cell thick
    fn stroke_rect(&mut self, rect: PixelRect, color: Rgb, _line_width: u32) {
        let Some(span) = self.cell_span(rect) else {
            return;
        };
        if span.width < 2 || span.height < 2 {
            return;
        }

        let (left, right) = (span.left(), span.right() - 1);
        let (top, bottom) = (span.top(), span.bottom() - 1);
        let outline = to_color(color);

        for y in top..=bottom {
            for x in left..=right {
                let symbol = match (x == left, x == right, y == top, y == bottom) {
                    (true, _, true, _) => "┌",
                    (_, true, true, _) => "┐",
                    (true, _, _, true) => "└",
                    (_, true, _, true) => "┘",
                    (_, _, true, _) | (_, _, _, true) => "─",
                    (true, _, _, _) | (_, true, _, _) => "│",
                    _ => continue,
                };
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    let fill = cell.fg;
                    cell.set_symbol(symbol);
                    cell.set_fg(outline);
                    cell.set_bg(fill);
                }
            }
        }
    }
}
