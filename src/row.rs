//! Row generator: lays out one row of the hexagon.
//!
//! Rows are generated top to bottom. The first half of the hexagon grows by
//! one LED per row until the widest row, the second half shrinks by one per
//! row. Every row is padded with blanks to the same width, and every second
//! row is reversed so the strip snakes back and forth.
//!
//! The only state carried between rows is a [`RowState`]: the next free
//! strip index and whether the hexagon is still growing.

use crate::grid::Cell;
use crate::{FlipTrigger, MapConfig, MapError};
use std::iter;

/// One row of cells, left to right as it appears on the panel.
pub type Row = Vec<Cell>;

/// Whether rows are currently growing toward the widest row or shrinking away from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Expanding,
    Contracting,
}

/// State threaded from one row to the next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowState {
    /// Strip index the next LED will get.
    pub next_led: u32,
    pub direction: Direction,
}

impl RowState {
    /// State before the top row.
    pub fn start() -> Self {
        Self {
            next_led: 0,
            direction: Direction::Expanding,
        }
    }
}

impl Default for RowState {
    fn default() -> Self {
        Self::start()
    }
}

/// Generate row `row_number` and the state for the row after it.
///
/// `row_number` counts from `config.row_index_base`. LED indices are handed
/// out left to right before any reversal, starting at `state.next_led`.
///
/// # Errors
/// `InvalidArgument` if `row_number` is below the configured base.
/// `InvariantViolation` if the row would hold no LEDs or more than the
/// widest row, which means the caller kept going past closure or kept
/// expanding past the widest row.
pub fn generate_row(
    config: &MapConfig,
    row_number: usize,
    state: RowState,
) -> Result<(Row, RowState), MapError> {
    let base = config.row_index_base.offset();
    let position = row_number.checked_sub(base).ok_or_else(|| {
        MapError::InvalidArgument(format!(
            "row number {row_number} is below the first row number {base}"
        ))
    })?;

    let size = config.size as usize;
    let widest = config.widest_row();
    let led_count = match state.direction {
        Direction::Expanding => size + position,
        Direction::Contracting => (widest + config.peak_position()).saturating_sub(position),
    };
    if led_count == 0 || led_count > widest {
        return Err(MapError::InvariantViolation(format!(
            "row {row_number} ({:?}) would hold {led_count} LEDs, size {size} allows 1..={widest}",
            state.direction
        )));
    }

    let blanks = widest - led_count;
    let (leading, trailing) = if config.internal_padding {
        (blanks, blanks)
    } else {
        (blanks / 2, blanks - blanks / 2)
    };

    let mut row = Vec::with_capacity(config.row_width());
    row.extend(iter::repeat_n(Cell::Blank, leading));

    let mut next_led = state.next_led;
    for i in 0..led_count {
        row.push(Cell::Led(next_led));
        next_led = next_led.checked_add(1).ok_or_else(|| {
            MapError::InvariantViolation("LED index counter overflowed".to_string())
        })?;
        if config.internal_padding && i + 1 < led_count {
            row.push(Cell::Blank);
        }
    }

    row.extend(iter::repeat_n(Cell::Blank, trailing));

    let direction = match state.direction {
        Direction::Expanding if is_widest(config.flip_trigger, &row, led_count, widest) => {
            Direction::Contracting
        }
        direction => direction,
    };

    if position % 2 == 1 {
        row.reverse();
    }

    tracing::debug!(row_number, leds = led_count, ?direction, "generated row");

    Ok((row, RowState { next_led, direction }))
}

fn is_widest(trigger: FlipTrigger, row: &[Cell], led_count: usize, widest: usize) -> bool {
    match trigger {
        FlipTrigger::EdgeCells => {
            row.first().is_some_and(|c| c.is_led()) && row.last().is_some_and(|c| c.is_led())
        }
        FlipTrigger::LedCount => led_count == widest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RowIndexBase;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const B: Cell = Cell::Blank;

    fn led(i: u32) -> Cell {
        Cell::Led(i)
    }

    fn padded(size: u32) -> MapConfig {
        MapConfig {
            transpose: false,
            ..MapConfig::new(size)
        }
    }

    fn compact(size: u32) -> MapConfig {
        MapConfig {
            internal_padding: false,
            ..padded(size)
        }
    }

    #[test]
    fn first_row_is_centred_with_internal_padding() {
        let (row, state) = generate_row(&padded(2), 0, RowState::start()).unwrap();
        assert_eq!(row, vec![B, B, led(0), B, led(1), B, B]);
        assert_eq!(
            state,
            RowState {
                next_led: 2,
                direction: Direction::Expanding
            }
        );
    }

    #[test]
    fn odd_rows_are_reversed() {
        let state = RowState {
            next_led: 2,
            direction: Direction::Expanding,
        };
        let (row, next) = generate_row(&padded(2), 1, state).unwrap();
        assert_eq!(row, vec![B, led(4), B, led(3), B, led(2), B]);
        assert_eq!(next.next_led, 5);
    }

    #[rstest]
    #[case(FlipTrigger::EdgeCells)]
    #[case(FlipTrigger::LedCount)]
    fn widest_row_flips_direction(#[case] flip_trigger: FlipTrigger) {
        let config = MapConfig {
            flip_trigger,
            ..padded(2)
        };
        let state = RowState {
            next_led: 5,
            direction: Direction::Expanding,
        };
        let (row, next) = generate_row(&config, 2, state).unwrap();
        assert_eq!(row, vec![led(5), B, led(6), B, led(7), B, led(8)]);
        assert_eq!(next.direction, Direction::Contracting);
    }

    #[rstest]
    #[case(FlipTrigger::EdgeCells)]
    #[case(FlipTrigger::LedCount)]
    fn narrower_rows_keep_expanding(#[case] flip_trigger: FlipTrigger) {
        let config = MapConfig {
            flip_trigger,
            ..compact(3)
        };
        let (_, next) = generate_row(&config, 3, RowState::start()).unwrap();
        assert_eq!(next.direction, Direction::Expanding);
    }

    #[test]
    fn contracting_rows_shrink_past_the_peak() {
        let state = RowState {
            next_led: 9,
            direction: Direction::Contracting,
        };
        let (row, next) = generate_row(&padded(2), 3, state).unwrap();
        assert_eq!(row, vec![B, led(11), B, led(10), B, led(9), B]);
        assert_eq!(next.direction, Direction::Contracting);
    }

    #[test]
    fn compact_rows_put_odd_padding_at_the_end() {
        let (row, _) = generate_row(&compact(2), 0, RowState::start()).unwrap();
        assert_eq!(row, vec![B, led(0), led(1), B]);

        let state = RowState {
            next_led: 2,
            direction: Direction::Expanding,
        };
        // Generated as [2, 3, 4, -1], then reversed.
        let (row, _) = generate_row(&compact(2), 1, state).unwrap();
        assert_eq!(row, vec![B, led(4), led(3), led(2)]);
    }

    #[test]
    fn size_one_is_a_single_led_that_flips_immediately() {
        let (row, next) = generate_row(&padded(1), 0, RowState::start()).unwrap();
        assert_eq!(row, vec![led(0)]);
        assert_eq!(next.direction, Direction::Contracting);
    }

    #[test]
    fn one_based_rows_reverse_on_even_numbers() {
        let config = MapConfig {
            row_index_base: RowIndexBase::One,
            ..padded(2)
        };
        let (first, state) = generate_row(&config, 1, RowState::start()).unwrap();
        let (second, _) = generate_row(&config, 2, state).unwrap();
        assert_eq!(first, vec![B, B, led(0), B, led(1), B, B]);
        assert_eq!(second, vec![B, led(4), B, led(3), B, led(2), B]);
    }

    #[test]
    fn row_number_below_base_is_rejected() {
        let config = MapConfig {
            row_index_base: RowIndexBase::One,
            ..padded(2)
        };
        assert!(matches!(
            generate_row(&config, 0, RowState::start()),
            Err(MapError::InvalidArgument(_))
        ));
    }

    #[test]
    fn expanding_past_the_widest_row_is_an_invariant_violation() {
        assert!(matches!(
            generate_row(&padded(2), 3, RowState::start()),
            Err(MapError::InvariantViolation(_))
        ));
    }

    #[test]
    fn contracting_past_closure_is_an_invariant_violation() {
        let state = RowState {
            next_led: 1,
            direction: Direction::Contracting,
        };
        assert!(matches!(
            generate_row(&padded(1), 1, state),
            Err(MapError::InvariantViolation(_))
        ));
    }
}
