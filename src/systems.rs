use bevy_ecs::prelude::*;
use log::{debug, info, trace, warn};
use std::time::Duration;

use crate::components::{ActivePiece, DropTimer, Grid, PieceKind, PieceRng};

/// What a call to [`drop_system`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The drop interval has not elapsed yet.
    Idle,
    /// The active piece moved down one row.
    Dropped,
    /// The active piece was merged and a new one spawned.
    Landed {
        cleared_rows: Vec<usize>,
        overflow: bool,
    },
}

/// Replaces the active piece with a random one at the spawn position.
/// If it collides right away the grid is wiped. Returns `true` on such an overflow.
pub fn spawn_piece(world: &mut World) -> bool {
    let kind = {
        let mut rng = world.resource_mut::<PieceRng>();
        PieceKind::random(&mut *rng.0)
    };
    let spawn = world.resource::<DropTimer>().spawn;

    world.insert_resource(ActivePiece {
        kind,
        position: spawn,
    });
    debug!("Spawned {kind:?} at ({}, {})", spawn.x, spawn.y);

    let overflow = world.resource::<Grid>().collides(kind, spawn);
    if overflow {
        warn!("Board overflow, clearing the grid");
        world.resource_mut::<Grid>().clear();
    }

    overflow
}

/// Merges the active piece, clears full rows and spawns the next piece.
pub fn land_piece(world: &mut World) -> TickOutcome {
    let active = *world.resource::<ActivePiece>();

    let cleared_rows = {
        let mut grid = world.resource_mut::<Grid>();
        grid.merge(active.kind, active.position);
        grid.clear_full_rows()
    };

    if cleared_rows.is_empty() {
        debug!(
            "Landed {:?} at ({}, {})",
            active.kind, active.position.x, active.position.y
        );
    } else {
        info!("Cleared {} rows: {cleared_rows:?}", cleared_rows.len());
    }

    let overflow = spawn_piece(world);
    TickOutcome::Landed {
        cleared_rows,
        overflow,
    }
}

/// Gravity step, gated on the drop interval.
pub fn drop_system(world: &mut World, now: Duration) -> TickOutcome {
    let timer = *world.resource::<DropTimer>();
    if !timer.is_due(now) {
        trace!(
            "Drop not due: {:?} since last drop",
            now.saturating_sub(timer.last_drop)
        );
        return TickOutcome::Idle;
    }

    let active = *world.resource::<ActivePiece>();
    let below = active.position.offset(0, 1);
    let blocked = world.resource::<Grid>().collides(active.kind, below);

    let outcome = if blocked {
        land_piece(world)
    } else {
        world.resource_mut::<ActivePiece>().position = below;
        TickOutcome::Dropped
    };

    world.resource_mut::<DropTimer>().last_drop = now;
    outcome
}
