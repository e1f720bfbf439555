pub mod app;
pub mod clock;
pub mod components;
pub mod config;
pub mod game;
pub mod random;
pub mod render;
pub mod surface;
pub mod systems;
pub mod ui;

#[cfg(test)]
mod tests;

pub use app::Simulator;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use random::{FastRandom, PieceRandom, SequenceRandom};
pub use surface::{Canvas, DrawCommand, RecordingCanvas};
pub use systems::TickOutcome;
