//! Serpentine LED maps for hexagonal "flower of life" panels.
//!
//! The panel is a hexagon of LEDs wired as one strip that snakes back and
//! forth row by row. This crate works out which strip index sits at each
//! position of a rectangular grid and writes that grid as a `ledmap.json`
//! for the LED controller:
//! - [`row`] lays out one row of the hexagon
//! - [`grid`] drives rows until the hexagon closes
//! - [`output`] turns the grid into JSON and writes it to disk
//! - [`preview`] renders an optional PNG of the strip order
//!
//! Configuration lives in [`MapConfig`]; the binary fills it from CLI flags
//! or a JSON file.

pub mod error;
pub mod grid;
pub mod output;
pub mod preview;
pub mod row;

pub use error::MapError;
pub use grid::{Cell, LedMap, assemble};
pub use row::{Direction, Row, RowState, generate_row};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ── Configuration ──────────────────────────────────────────────────

/// Largest hexagon size accepted.
///
/// A size-256 hexagon has 766 LEDs across its widest row and about 520k LEDs
/// in total, far beyond any real panel, while its padded grid still fits in
/// about 12 MB. Larger sizes would exhaust memory long before the `u32`
/// strip indices ran out.
pub const MAX_SIZE: u32 = 256;

/// Whether row numbers handed to the row generator count from 0 or 1.
///
/// The numbering only changes how rows are labelled. Reversal always
/// applies to every second row counted from the top, so both bases
/// produce the same map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RowIndexBase {
    #[default]
    Zero,
    One,
}

impl RowIndexBase {
    /// Row number of the top row.
    pub fn offset(self) -> usize {
        match self {
            RowIndexBase::Zero => 0,
            RowIndexBase::One => 1,
        }
    }
}

/// How the row generator notices it just emitted the widest row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum FlipTrigger {
    /// The row has an LED in both its first and last cell.
    #[default]
    EdgeCells,
    /// The row holds as many LEDs as the widest row can.
    LedCount,
}

/// Shape of the `map` value in the output document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MapLayout {
    /// An array of rows, each an array of cells.
    #[default]
    Nested,
    /// One array of cells in row-major order, as WLED reads it.
    Flat,
}

/// Everything needed to generate and serialize one map.
///
/// # Rust concept: `#[serde(default)]`
/// Any field missing from a config file falls back to `Default`, so a file
/// holding just `{"size": 5}` is a complete configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// LEDs along the top edge of the hexagon.
    pub size: u32,
    /// Put a blank between neighbouring LEDs so rows stagger like a hex grid.
    pub internal_padding: bool,
    /// Swap rows and columns before writing (column-wired panels).
    pub transpose: bool,
    /// Emit the `size` block next to `map`.
    pub include_size_block: bool,
    pub row_index_base: RowIndexBase,
    pub flip_trigger: FlipTrigger,
    pub layout: MapLayout,
    /// Overrides the generation row cap; see [`MapConfig::row_cap`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rows: Option<usize>,
}

impl MapConfig {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Read a config from a JSON file.
    pub fn load(path: &Path) -> Result<Self, MapError> {
        let text = fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| MapError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reject configurations generation cannot start from.
    pub fn validate(&self) -> Result<(), MapError> {
        if self.size < 1 {
            return Err(MapError::InvalidArgument(format!(
                "size must be at least 1, got {}",
                self.size
            )));
        }
        if self.size > MAX_SIZE {
            return Err(MapError::InvalidArgument(format!(
                "size must be at most {MAX_SIZE}, got {}",
                self.size
            )));
        }
        if self.max_rows == Some(0) {
            return Err(MapError::InvalidArgument(
                "max_rows must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// LEDs in the widest row: `3 * size - 2`.
    pub fn widest_row(&self) -> usize {
        (3 * self.size as usize).saturating_sub(2)
    }

    /// Position (0-based from the top) of the widest row.
    pub fn peak_position(&self) -> usize {
        (2 * self.size as usize).saturating_sub(2)
    }

    /// Rows in a complete hexagon: `4 * size - 3`.
    pub fn expected_rows(&self) -> usize {
        2 * self.peak_position() + 1
    }

    /// Cells in every generated row, padding included.
    pub fn row_width(&self) -> usize {
        if self.internal_padding {
            (2 * self.widest_row()).saturating_sub(1)
        } else {
            self.widest_row()
        }
    }

    /// Most rows the assembler will generate before giving up.
    ///
    /// Defaults to one more than a closed hexagon needs.
    pub fn row_cap(&self) -> usize {
        self.max_rows.unwrap_or(self.expected_rows() + 1)
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            size: 8,
            internal_padding: true,
            transpose: true,
            include_size_block: true,
            row_index_base: RowIndexBase::Zero,
            flip_trigger: FlipTrigger::EdgeCells,
            layout: MapLayout::Nested,
            max_rows: None,
        }
    }
}

// ── Generation ─────────────────────────────────────────────────────

/// Build the map described by `config`, transposed if it asks for that.
pub fn generate(config: &MapConfig) -> Result<LedMap, MapError> {
    let map = assemble(config)?;
    if config.transpose {
        Ok(map.transpose())
    } else {
        Ok(map)
    }
}

// ── Tests ──────────────────────────────────────────────────────────
