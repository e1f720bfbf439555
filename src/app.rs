#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::{debug, info};
use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::components::{ActivePiece, DropTimer, Grid, PieceRng, RenderStyle, Viewport};
use crate::config::Config;
use crate::random::{FastRandom, PieceRandom};
use crate::render;
use crate::surface::Canvas;
use crate::systems::{self, TickOutcome};

/// The falling-blocks backdrop. Owns its world and drives it one frame at a time.
///
/// Hosts call [`Simulator::start`] once the surface size is known, then
/// [`Simulator::frame`] from their animation loop, [`Simulator::on_resize`]
/// whenever the surface changes, and [`Simulator::stop`] on teardown.
pub struct Simulator {
    pub world: World,
    clock: Box<dyn Clock>,
    running: bool,
}

impl Simulator {
    /// Wall clock and `fastrand` (seeded when the config carries a seed).
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let random = match config.simulation.seed {
            Some(seed) => FastRandom::with_seed(seed),
            None => FastRandom::new(),
        };
        Self::with_sources(config, SystemClock::new(), random)
    }

    pub fn with_sources(
        config: &Config,
        clock: impl Clock + 'static,
        random: impl PieceRandom + Send + Sync + 'static,
    ) -> Self {
        let sim = &config.simulation;
        let now = clock.now();

        let mut world = World::new();
        world.insert_resource(Grid::new(sim.cols, sim.rows));
        world.insert_resource(PieceRng(Box::new(random)));
        world.insert_resource(DropTimer {
            last_drop: now,
            interval: sim.drop_interval(),
            spawn: sim.spawn(),
        });
        world.insert_resource(config.render.style());
        world.insert_resource(Viewport {
            width: 0,
            height: 0,
            block_size: config.render.default_block_size.max(1),
        });

        systems::spawn_piece(&mut world);

        Self {
            world,
            clock: Box::new(clock),
            running: false,
        }
    }

    /// Starts the animation loop on a `width x height` surface. No-op while running.
    pub fn start(&mut self, width: u32, height: u32) {
        if self.running {
            return;
        }
        self.running = true;
        self.apply_viewport(width, height);
        self.world.resource_mut::<DropTimer>().last_drop = self.clock.now();
        info!("Backdrop started at {width}x{height}");
    }

    /// Stops the loop and detaches resize handling. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        info!("Backdrop stopped");
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Recomputes the block size for a new surface size. Ignored once stopped.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if !self.running {
            debug!("Ignoring resize to {width}x{height} while stopped");
            return;
        }
        self.apply_viewport(width, height);
    }

    /// One animation frame: tick, then render. Returns `false` when stopped.
    pub fn frame<C: Canvas>(&mut self, canvas: &mut C) -> bool {
        if !self.running {
            return false;
        }
        let now = self.clock.now();
        self.tick(now);
        self.render(canvas);
        true
    }

    pub fn tick(&mut self, now: Duration) -> TickOutcome {
        systems::drop_system(&mut self.world, now)
    }

    pub fn render<C: Canvas>(&self, canvas: &mut C) {
        render::render(&self.world, canvas);
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        self.world.resource::<Grid>()
    }

    #[must_use]
    pub fn active_piece(&self) -> ActivePiece {
        *self.world.resource::<ActivePiece>()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        *self.world.resource::<Viewport>()
    }

    fn apply_viewport(&mut self, width: u32, height: u32) {
        let padding = self.world.resource::<RenderStyle>().board_padding;
        let (cols, rows) = {
            let grid = self.world.resource::<Grid>();
            (grid.cols(), grid.rows())
        };

        let block_size = Viewport::fit_block_size(width, height, padding, cols, rows);
        *self.world.resource_mut::<Viewport>() = Viewport {
            width,
            height,
            block_size,
        };
        debug!("Viewport {width}x{height}, block size {block_size}");
    }
}

impl Drop for Simulator {
    fn drop(&mut self) {
        self.stop();
    }
}
