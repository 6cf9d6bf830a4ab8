//! Output: serialize a map into the `ledmap.json` document and write it.
//!
//! The document looks like
//! `{"map": [[...], ...], "size": {"width": W, "height": H, "size": W*H}}`.
//! Blank cells are written as `-1`. The readable style puts one row per
//! line with tab-separated cells so the file shows the hexagon when opened
//! in an editor; the compact style is plain `serde_json` output. Both
//! parse to the same JSON value.

use crate::grid::{Cell, LedMap};
use crate::{MapConfig, MapError, MapLayout};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default output path, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "tmp/ledmap.json";

/// How the document is laid out on the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputStyle {
    /// One map row per line, cells separated by `,\t`.
    #[default]
    Readable,
    /// Single-line JSON.
    Compact,
}

/// Dimensions of the emitted map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SizeBlock {
    pub width: usize,
    pub height: usize,
    pub size: usize,
}

impl SizeBlock {
    pub fn of(map: &LedMap) -> Self {
        Self {
            width: map.width(),
            height: map.height(),
            size: map.cell_count(),
        }
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum MapBody<'a> {
    Nested(&'a LedMap),
    Flat(Vec<Cell>),
}

#[derive(Serialize)]
struct LedMapDocument<'a> {
    map: MapBody<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<SizeBlock>,
}

/// Render `map` as a `ledmap.json` document.
///
/// `map` is written as given; transposition happens in [`crate::generate`].
pub fn render(map: &LedMap, config: &MapConfig, style: OutputStyle) -> Result<String, MapError> {
    let size = config.include_size_block.then(|| SizeBlock::of(map));

    match style {
        OutputStyle::Compact => {
            let map = match config.layout {
                MapLayout::Nested => MapBody::Nested(map),
                MapLayout::Flat => MapBody::Flat(map.flatten()),
            };
            Ok(serde_json::to_string(&LedMapDocument { map, size })?)
        }
        OutputStyle::Readable => {
            let lines: Vec<String> = map
                .rows()
                .iter()
                .map(|row| {
                    let cells = join_cells(row);
                    match config.layout {
                        MapLayout::Nested => format!("[{cells}]"),
                        MapLayout::Flat => cells,
                    }
                })
                .collect();

            let mut out = String::from("{\"map\":[\n");
            out.push_str(&lines.join(",\n "));
            out.push(']');
            if let Some(size) = size {
                out.push_str(",\n\"size\":");
                out.push_str(&serde_json::to_string(&size)?);
            }
            out.push('}');
            Ok(out)
        }
    }
}

fn join_cells(row: &[Cell]) -> String {
    row.iter()
        .map(Cell::to_string)
        .collect::<Vec<_>>()
        .join(",\t")
}

/// Write `contents` to `path`, creating its parent directory if needed.
///
/// Overwrites any existing file. Returns the absolute path written.
pub fn write_map(path: &Path, contents: &str) -> Result<PathBuf, MapError> {
    let io_err = |source| MapError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, contents).map_err(io_err)?;

    let written = path.canonicalize().map_err(io_err)?;
    tracing::info!("Wrote to: {}", written.display());
    Ok(written)
}
