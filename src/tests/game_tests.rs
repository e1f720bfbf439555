#[cfg(test)]
mod tests {
    use crate::game::*;

    #[test]
    fn test_board_dimensions() {
        assert_eq!(BOARD_WIDTH, 10);
        assert_eq!(BOARD_HEIGHT, 20);
        assert_eq!((SPAWN_COLUMN, SPAWN_ROW), (3, 0));
    }

    #[test]
    fn test_shapes_match_palette() {
        assert_eq!(SHAPES.len(), PALETTE.len());
        assert_eq!(usize::from(N_COLORS), PALETTE.len());

        for (index, shape) in SHAPES.iter().enumerate() {
            let expected = u8::try_from(index + 1).unwrap();

            // Templates are square, between 2x2 and 4x4
            assert!((2..=MAX_SHAPE_WIDTH).contains(&shape.len()));
            assert!(shape.iter().all(|row| row.len() == shape.len()));

            // Every filled cell carries the shape's own color index
            let filled: Vec<u8> = shape
                .iter()
                .flat_map(|row| row.iter().copied())
                .filter(|&value| value != 0)
                .collect();
            assert_eq!(filled.len(), 4);
            assert!(filled.iter().all(|&value| value == expected));
        }
    }

    #[test]
    fn test_color_for() {
        assert_eq!(color_for(0), None);
        assert_eq!(color_for(1), Some(PALETTE[0]));
        assert_eq!(color_for(7), Some(PALETTE[6]));
        assert_eq!(color_for(8), None);
    }

    #[test]
    fn test_timing_and_layout_constants() {
        assert_eq!(DROP_INTERVAL_MS, 350);
        assert_eq!(BOARD_PADDING, 32);
        assert_eq!(DEFAULT_BLOCK_SIZE, 36);
        assert_eq!(BACKGROUND.to_string(), "#1a1a2e");
    }
}
