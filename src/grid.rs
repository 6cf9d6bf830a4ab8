//! Grid assembly: drives the row generator until the hexagon closes.

use crate::row::{Direction, Row, RowState, generate_row};
use crate::{MapConfig, MapError};
use serde::{Serialize, Serializer};
use std::fmt;

// ── Cells ────────────────────────────────────────────────────────────

/// One grid position: either an LED with its strip index, or nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Led(u32),
    Blank,
}

impl Cell {
    /// Value written for a [`Cell::Blank`].
    pub const SENTINEL: i64 = -1;

    pub fn is_led(&self) -> bool {
        matches!(self, Cell::Led(_))
    }

    pub fn index(self) -> Option<u32> {
        match self {
            Cell::Led(i) => Some(i),
            Cell::Blank => None,
        }
    }

    /// The integer the LED controller reads for this cell.
    pub fn raw(self) -> i64 {
        match self {
            Cell::Led(i) => i64::from(i),
            Cell::Blank => Self::SENTINEL,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw())
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.raw())
    }
}

// ── Map ──────────────────────────────────────────────────────────────

/// A rectangular grid of cells, top row first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LedMap {
    rows: Vec<Row>,
}

impl LedMap {
    /// Wrap rows into a map, checking they all have the same length.
    pub fn from_rows(rows: Vec<Row>) -> Result<Self, MapError> {
        let width = rows.first().map_or(0, Vec::len);
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(MapError::InvariantViolation(format!(
                "row {i} has {} cells, expected {width}",
                row.len()
            )));
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Cells per row.
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn cell_count(&self) -> usize {
        self.width() * self.height()
    }

    pub fn led_count(&self) -> usize {
        self.leds().count()
    }

    /// Strip indices in reading order (row by row, left to right).
    pub fn leds(&self) -> impl Iterator<Item = u32> + '_ {
        self.rows.iter().flatten().filter_map(|c| c.index())
    }

    /// Rows become columns.
    pub fn transpose(&self) -> LedMap {
        let rows = (0..self.width())
            .map(|col| self.rows.iter().map(|row| row[col]).collect())
            .collect();
        LedMap { rows }
    }

    /// All cells in row-major order.
    pub fn flatten(&self) -> Vec<Cell> {
        self.rows.iter().flatten().copied().collect()
    }
}

// ── Assembly ─────────────────────────────────────────────────────────

/// Generate rows until the hexagon closes, without transposing.
///
/// The hexagon is closed once a row is back down to `size` LEDs. The top
/// row also has `size` LEDs, so it only closes the hexagon when it was the
/// widest row too (`size == 1`).
///
/// # Errors
/// `InvalidArgument` for a config that fails [`MapConfig::validate`];
/// `InvariantViolation` if [`MapConfig::row_cap`] rows go by without closure.
pub fn assemble(config: &MapConfig) -> Result<LedMap, MapError> {
    config.validate()?;

    let size = config.size as usize;
    let base = config.row_index_base.offset();
    let cap = config.row_cap();

    let mut rows = Vec::with_capacity(config.expected_rows());
    let mut state = RowState::start();

    for position in 0..cap {
        let (row, next) = generate_row(config, position + base, state)?;
        let leds = row.iter().filter(|c| c.is_led()).count();
        rows.push(row);
        state = next;

        let closed = leds == size && (position > 0 || state.direction == Direction::Contracting);
        if closed {
            tracing::debug!(rows = rows.len(), leds = state.next_led, "hexagon closed");
            return LedMap::from_rows(rows);
        }
    }

    Err(MapError::InvariantViolation(format!(
        "hexagon of size {size} did not close within {cap} rows"
    )))
}
