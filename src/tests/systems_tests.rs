#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::app::Simulator;
    use crate::clock::{Clock, ManualClock};
    use crate::components::{ActivePiece, Grid, PieceKind, Position};
    use crate::config::Config;
    use crate::game::{BOARD_HEIGHT, BOARD_WIDTH, N_COLORS};
    use crate::random::FastRandom;
    use crate::systems::{TickOutcome, spawn_piece};
    use crate::tests::test_utils::{
        STEP, create_single_kind_simulator, create_test_simulator, fill_row_except,
        is_within_bounds, step,
    };

    #[test]
    fn test_initial_piece_at_spawn() {
        let (simulator, _clock) = create_single_kind_simulator(PieceKind::T);
        let active = simulator.active_piece();
        assert_eq!(active.kind, PieceKind::T);
        assert_eq!(active.position, Position::new(3, 0));
        assert!(simulator.grid().is_empty());
    }

    #[test]
    fn test_tick_waits_for_drop_interval() {
        let (mut simulator, clock) = create_single_kind_simulator(PieceKind::O);

        clock.advance(Duration::from_millis(200));
        assert_eq!(simulator.tick(clock.now()), TickOutcome::Idle);

        // Exactly the interval is not enough; the gate is strictly greater
        clock.set(Duration::from_millis(350));
        assert_eq!(simulator.tick(clock.now()), TickOutcome::Idle);
        assert_eq!(simulator.active_piece().position, Position::new(3, 0));

        clock.set(Duration::from_millis(351));
        assert_eq!(simulator.tick(clock.now()), TickOutcome::Dropped);
        assert_eq!(simulator.active_piece().position, Position::new(3, 1));

        // The timer restarted at the last drop
        clock.advance(Duration::from_millis(100));
        assert_eq!(simulator.tick(clock.now()), TickOutcome::Idle);
    }

    #[test]
    fn test_o_piece_lands_on_floor() {
        let (mut simulator, clock) = create_single_kind_simulator(PieceKind::O);

        for expected_row in 1..=18 {
            assert_eq!(step(&mut simulator, &clock), TickOutcome::Dropped);
            assert_eq!(simulator.active_piece().position, Position::new(3, expected_row));
        }

        let outcome = step(&mut simulator, &clock);
        assert_eq!(
            outcome,
            TickOutcome::Landed {
                cleared_rows: vec![],
                overflow: false,
            }
        );

        let grid = simulator.grid();
        let mut occupied: Vec<_> = grid.occupied().collect();
        occupied.sort_unstable();
        assert_eq!(
            occupied,
            vec![(3, 18, 4), (3, 19, 4), (4, 18, 4), (4, 19, 4)]
        );

        let active = simulator.active_piece();
        assert_eq!(active.kind, PieceKind::O);
        assert_eq!(active.position, Position::new(3, 0));
    }

    #[test]
    fn test_landing_clears_completed_row() {
        let (mut simulator, clock) = create_single_kind_simulator(PieceKind::O);
        fill_row_except(&mut simulator.world.resource_mut::<Grid>(), 19, &[3, 4], 1);

        for _ in 0..18 {
            step(&mut simulator, &clock);
        }
        let outcome = step(&mut simulator, &clock);
        assert_eq!(
            outcome,
            TickOutcome::Landed {
                cleared_rows: vec![19],
                overflow: false,
            }
        );

        // The top half of the O dropped into the bottom row
        let grid = simulator.grid();
        let mut occupied: Vec<_> = grid.occupied().collect();
        occupied.sort_unstable();
        assert_eq!(occupied, vec![(3, 19, 4), (4, 19, 4)]);
    }

    #[test]
    fn test_landing_clears_two_rows() {
        let (mut simulator, clock) = create_single_kind_simulator(PieceKind::O);
        {
            let mut grid = simulator.world.resource_mut::<Grid>();
            fill_row_except(&mut grid, 18, &[3, 4], 2);
            fill_row_except(&mut grid, 19, &[3, 4], 2);
            grid.set(0, 17, 5);
        }

        for _ in 0..18 {
            step(&mut simulator, &clock);
        }
        let outcome = step(&mut simulator, &clock);
        assert_eq!(
            outcome,
            TickOutcome::Landed {
                cleared_rows: vec![18, 19],
                overflow: false,
            }
        );
        assert_eq!(simulator.grid().occupied().collect::<Vec<_>>(), vec![(0, 19, 5)]);
    }

    #[test]
    fn test_spawn_overflow_resets_grid() {
        let (mut simulator, _clock) = create_single_kind_simulator(PieceKind::I);
        {
            let mut grid = simulator.world.resource_mut::<Grid>();
            for row in 0..3 {
                fill_row_except(&mut grid, row, &[], 3);
            }
        }

        let overflow = spawn_piece(&mut simulator.world);
        assert!(overflow);
        assert!(simulator.grid().is_empty());
        assert_eq!(
            simulator.active_piece(),
            ActivePiece {
                kind: PieceKind::I,
                position: Position::new(3, 0),
            }
        );
    }

    #[test]
    fn test_spawn_without_overflow_keeps_grid() {
        let (mut simulator, _clock) = create_single_kind_simulator(PieceKind::O);
        fill_row_except(&mut simulator.world.resource_mut::<Grid>(), 19, &[0], 2);

        assert!(!spawn_piece(&mut simulator.world));
        assert_eq!(simulator.grid().occupied().count(), BOARD_WIDTH - 1);
    }

    #[test]
    fn test_landing_at_spawn_overflows() {
        let (mut simulator, clock) = create_single_kind_simulator(PieceKind::O);
        // A single cell right below the spawn stops the O at row 0
        simulator.world.resource_mut::<Grid>().set(3, 2, 6);

        let outcome = step(&mut simulator, &clock);
        assert_eq!(
            outcome,
            TickOutcome::Landed {
                cleared_rows: vec![],
                overflow: true,
            }
        );
        assert!(simulator.grid().is_empty());
        assert_eq!(simulator.active_piece().position, Position::new(3, 0));
    }

    #[test]
    fn test_spawn_follows_random_sequence() {
        let kinds = [PieceKind::S, PieceKind::I, PieceKind::Z];
        let (mut simulator, _clock) =
            create_test_simulator(kinds.iter().map(|kind| kind.index()).collect());

        // Construction consumed the first pick
        assert_eq!(simulator.active_piece().kind, PieceKind::S);
        spawn_piece(&mut simulator.world);
        assert_eq!(simulator.active_piece().kind, PieceKind::I);
        spawn_piece(&mut simulator.world);
        assert_eq!(simulator.active_piece().kind, PieceKind::Z);
        spawn_piece(&mut simulator.world);
        assert_eq!(simulator.active_piece().kind, PieceKind::S);
    }

    #[test]
    fn test_long_run_invariants() {
        let clock = ManualClock::new();
        let mut simulator =
            Simulator::with_sources(&Config::default(), clock.clone(), FastRandom::with_seed(7));
        let mut landings = 0;

        for _ in 0..5_000 {
            // The falling piece never overlaps landed cells
            let active = simulator.active_piece();
            for cell in active.cells() {
                assert!(is_within_bounds(simulator.grid(), cell), "{cell:?}");
                let (x, y) = (cell.x as usize, cell.y as usize);
                assert_eq!(simulator.grid().get(x, y), Some(0));
            }

            if let TickOutcome::Landed { .. } = step(&mut simulator, &clock) {
                landings += 1;
            }

            let grid = simulator.grid();
            assert_eq!(grid.cells().len(), BOARD_HEIGHT);
            for (col, row, value) in grid.occupied() {
                assert!(col < BOARD_WIDTH && row < BOARD_HEIGHT);
                assert!((1..=N_COLORS).contains(&value));
            }
        }

        assert!(landings > 100, "only {landings} landings");
    }

    #[test]
    fn test_idle_tick_changes_nothing() {
        let (mut simulator, clock) = create_single_kind_simulator(PieceKind::L);
        step(&mut simulator, &clock);
        let grid = simulator.grid().clone();
        let active = simulator.active_piece();

        clock.advance(STEP / 2);
        assert_eq!(simulator.tick(clock.now()), TickOutcome::Idle);
        assert_eq!(simulator.grid(), &grid);
        assert_eq!(simulator.active_piece(), active);
    }
}
