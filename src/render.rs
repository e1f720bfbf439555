#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow potential wrapping when casting grid indices to i32 since board dimensions are small
    clippy::cast_possible_wrap,
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation
)]

use bevy_ecs::prelude::*;

use crate::components::{ActivePiece, Grid, RenderStyle, Rgb, Viewport};
use crate::game;
use crate::surface::{Canvas, Glow, PixelRect};

/// Draws the whole backdrop: background, landed cells, then the falling piece.
/// Reads the world only.
pub fn render(world: &World, canvas: &mut dyn Canvas) {
    let style = world.resource::<RenderStyle>();
    let viewport = world.resource::<Viewport>();
    let grid = world.resource::<Grid>();
    let active = world.resource::<ActivePiece>();

    canvas.clear(style.background);

    let (offset_x, offset_y) = viewport.board_offset(grid.cols(), grid.rows());
    let block = viewport.block_size;
    let to_pixels = |col: i32, row: i32| {
        let size = i64::from(block);
        let x = i64::from(offset_x) + i64::from(col) * size;
        let y = i64::from(offset_y) + i64::from(row) * size;
        (saturate(x), saturate(y))
    };

    for (col, row, value) in grid.occupied() {
        if let Some(color) = game::color_for(value) {
            let (x, y) = to_pixels(col as i32, row as i32);
            draw_block(canvas, style, PixelRect::square(x, y, block), color);
        }
    }

    let color = active.kind.color();
    for cell in active.cells() {
        let (x, y) = to_pixels(cell.x, cell.y);
        draw_block(canvas, style, PixelRect::square(x, y, block), color);
    }
}

fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

/// One neon block: glowing fill plus outline.
pub fn draw_block(canvas: &mut dyn Canvas, style: &RenderStyle, rect: PixelRect, color: Rgb) {
    let glow = (style.glow_blur > 0).then_some(Glow {
        color,
        blur: style.glow_blur,
    });
    canvas.fill_rect(rect, color, glow);
    canvas.stroke_rect(rect, style.outline, style.line_width);
}
