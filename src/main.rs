//! Hexagonal LED map generator
//!
//! Works out how a serpentine-wired hexagonal LED panel maps onto a
//! rectangular grid and writes the result as `ledmap.json` for the LED
//! controller.
//!
//! ## Usage
//! ```sh
//! hexagon-ledmap --size 8
//! hexagon-ledmap --size 5 --no-transpose --output panel/ledmap.json --preview panel/ledmap.png
//! hexagon-ledmap --config panel.json --quiet
//! ```
//!
//! Set `RUST_LOG=debug` to log every generated row.

use clap::Parser;
use hexagon_ledmap::output::{self, DEFAULT_OUTPUT_PATH, OutputStyle};
use hexagon_ledmap::{FlipTrigger, MapConfig, MapError, MapLayout, RowIndexBase, generate, preview};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Hexagonal LED map generator
#[derive(Parser)]
#[command(name = "hexagon-ledmap")]
#[command(about = "Generate a serpentine ledmap.json for a hexagonal LED panel")]
#[command(version)]
struct Args {
    /// JSON file with a map configuration; the flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// LEDs along the top edge of the hexagon
    #[arg(long)]
    size: Option<u32>,

    /// Do not put blanks between neighbouring LEDs
    #[arg(long)]
    no_internal_padding: bool,

    /// Keep rows as rows instead of writing columns
    #[arg(long)]
    no_transpose: bool,

    /// Leave the size block out of the output
    #[arg(long)]
    no_size_block: bool,

    /// Whether rows are numbered from zero or one
    #[arg(long, value_enum)]
    row_base: Option<RowIndexBase>,

    /// How the widest row is detected
    #[arg(long, value_enum)]
    flip_trigger: Option<FlipTrigger>,

    /// Write the map as one flat array
    #[arg(long)]
    flat: bool,

    /// Where to write the map
    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Write single-line JSON
    #[arg(long)]
    compact: bool,

    /// Also render a PNG preview of the strip order
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Do not echo the map to stdout
    #[arg(long)]
    quiet: bool,
}

impl Args {
    /// Start from the config file (or defaults) and apply explicit flags.
    fn map_config(&self) -> Result<MapConfig, MapError> {
        let mut config = match &self.config {
            Some(path) => MapConfig::load(path)?,
            None => MapConfig::default(),
        };

        if let Some(size) = self.size {
            config.size = size;
        }
        if self.no_internal_padding {
            config.internal_padding = false;
        }
        if self.no_transpose {
            config.transpose = false;
        }
        if self.no_size_block {
            config.include_size_block = false;
        }
        if let Some(base) = self.row_base {
            config.row_index_base = base;
        }
        if let Some(trigger) = self.flip_trigger {
            config.flip_trigger = trigger;
        }
        if self.flat {
            config.layout = MapLayout::Flat;
        }

        Ok(config)
    }

    fn style(&self) -> OutputStyle {
        if self.compact {
            OutputStyle::Compact
        } else {
            OutputStyle::Readable
        }
    }
}

fn run(args: &Args) -> Result<(), MapError> {
    let config = args.map_config()?;
    tracing::info!(
        "Hexagon size {} (internal padding: {}, transpose: {})",
        config.size,
        config.internal_padding,
        config.transpose
    );

    // Everything is generated and rendered before the file is touched.
    let map = generate(&config)?;
    let text = output::render(&map, &config, args.style())?;

    tracing::info!(
        "Map: {}x{} cells, {} LEDs",
        map.width(),
        map.height(),
        map.led_count()
    );

    if !args.quiet {
        println!("{text}");
    }

    output::write_map(&args.output, &text)?;

    if let Some(path) = &args.preview {
        preview::save_preview(&map, path)?;
    }

    Ok(())
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only the map.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_match_library_defaults() {
        let args = Args::parse_from(["hexagon-ledmap"]);
        assert_eq!(args.map_config().unwrap(), MapConfig::default());
        assert_eq!(args.output, PathBuf::from("tmp/ledmap.json"));
        assert_eq!(args.style(), OutputStyle::Readable);
    }

    #[test]
    fn flags_override_config_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("panel.json");
        std::fs::write(&path, r#"{"size": 4, "transpose": false}"#).unwrap();

        let args = Args::parse_from([
            "hexagon-ledmap",
            "--config",
            path.to_str().unwrap(),
            "--size",
            "6",
            "--flat",
            "--row-base",
            "one",
            "--flip-trigger",
            "led-count",
        ]);
        let config = args.map_config().unwrap();

        assert_eq!(
            config,
            MapConfig {
                size: 6,
                transpose: false,
                row_index_base: RowIndexBase::One,
                flip_trigger: FlipTrigger::LedCount,
                layout: MapLayout::Flat,
                ..MapConfig::default()
            }
        );
    }

    #[test]
    fn run_writes_map_and_preview() {
        let tmp = TempDir::new().unwrap();
        let output = tmp.path().join("tmp").join("ledmap.json");
        let preview = tmp.path().join("ledmap.png");

        let args = Args::parse_from([
            "hexagon-ledmap",
            "--size",
            "3",
            "--quiet",
            "--compact",
            "--output",
            output.to_str().unwrap(),
            "--preview",
            preview.to_str().unwrap(),
        ]);
        run(&args).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(value["size"]["size"], 9 * 13);
        assert!(preview.exists());
    }

    #[test]
    fn run_writes_nothing_for_invalid_size() {
        let tmp = TempDir::new().unwrap();
        let output = tmp.path().join("tmp").join("ledmap.json");

        let args = Args::parse_from([
            "hexagon-ledmap",
            "--size",
            "0",
            "--quiet",
            "--output",
            output.to_str().unwrap(),
        ]);

        assert!(matches!(run(&args), Err(MapError::InvalidArgument(_))));
        assert!(!output.exists());
        assert!(!output.parent().unwrap().exists());
    }

    #[test]
    fn run_rejects_oversized_hexagon() {
        let tmp = TempDir::new().unwrap();
        let output = tmp.path().join("ledmap.json");

        let args = Args::parse_from([
            "hexagon-ledmap",
            "--size",
            "4294967295",
            "--quiet",
            "--output",
            output.to_str().unwrap(),
        ]);

        assert!(matches!(run(&args), Err(MapError::InvalidArgument(_))));
        assert!(!output.exists());
    }
}
