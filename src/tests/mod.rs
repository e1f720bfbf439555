#![warn(clippy::all, clippy::pedantic)]

pub mod game_tests;
pub mod systems_tests;

// Import test utilities
#[cfg(test)]
pub mod test_utils {
    use std::time::Duration;

    use crate::app::Simulator;
    use crate::clock::{Clock, ManualClock};
    use crate::components::{Grid, PieceKind, Position};
    use crate::config::Config;
    use crate::random::SequenceRandom;
    use crate::systems::TickOutcome;

    // One millisecond past the reference drop interval
    pub const STEP: Duration = Duration::from_millis(351);

    // Simulator on the reference board whose pieces follow `indices`
    #[must_use]
    pub fn create_test_simulator(indices: Vec<usize>) -> (Simulator, ManualClock) {
        let clock = ManualClock::new();
        let simulator =
            Simulator::with_sources(&Config::default(), clock.clone(), SequenceRandom::new(indices));
        (simulator, clock)
    }

    // Simulator that only ever spawns `kind`
    #[must_use]
    pub fn create_single_kind_simulator(kind: PieceKind) -> (Simulator, ManualClock) {
        create_test_simulator(vec![kind.index()])
    }

    // Advance the clock past the drop interval and tick once
    pub fn step(simulator: &mut Simulator, clock: &ManualClock) -> TickOutcome {
        clock.advance(STEP);
        simulator.tick(clock.now())
    }

    // Fill every cell of `row` except the listed columns
    pub fn fill_row_except(grid: &mut Grid, row: usize, holes: &[usize], value: u8) {
        for col in 0..grid.cols() {
            if !holes.contains(&col) {
                grid.set(col, row, value);
            }
        }
    }

    // Helper to check if a position is within board bounds
    #[must_use]
    pub fn is_within_bounds(grid: &Grid, pos: Position) -> bool {
        pos.x >= 0
            && usize::try_from(pos.x).is_ok_and(|x| x < grid.cols())
            && pos.y >= 0
            && usize::try_from(pos.y).is_ok_and(|y| y < grid.rows())
    }
}
