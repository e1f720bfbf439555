use crate::components::Rgb;

/// Pixel rectangle on a drawing surface. The origin may be negative when a
/// board is larger than the surface; implementations clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    #[must_use]
    pub fn square(x: i32, y: i32, size: u32) -> Self {
        Self {
            x,
            y,
            width: size,
            height: size,
        }
    }
}

/// Soft shadow drawn around a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glow {
    pub color: Rgb,
    pub blur: u32,
}

/// Abstract 2D drawing surface the simulator renders to.
pub trait Canvas {
    /// Surface size in pixels.
    fn size(&self) -> (u32, u32);
    fn clear(&mut self, color: Rgb);
    fn fill_rect(&mut self, rect: PixelRect, color: Rgb, glow: Option<Glow>);
    fn stroke_rect(&mut self, rect: PixelRect, color: Rgb, line_width: u32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCommand {
    Clear {
        color: Rgb,
    },
    FillRect {
        rect: PixelRect,
        color: Rgb,
        glow: Option<Glow>,
    },
    StrokeRect {
        rect: PixelRect,
        color: Rgb,
        line_width: u32,
    },
}

/// Headless canvas that keeps every call as a [`DrawCommand`].
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    width: u32,
    height: u32,
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Returns and forgets everything recorded so far.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// The filled rects, in draw order.
    #[must_use]
    pub fn fills(&self) -> Vec<(PixelRect, Rgb)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillRect { rect, color, .. } => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Rgb) {
        self.commands.push(DrawCommand::Clear { color });
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Rgb, glow: Option<Glow>) {
        self.commands
            .push(DrawCommand::FillRect { rect, color, glow });
    }

    fn stroke_rect(&mut self, rect: PixelRect, color: Rgb, line_width: u32) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            color,
            line_width,
        });
    }
}
