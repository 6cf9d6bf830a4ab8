//! PNG preview of a map, for checking the wiring order by eye.
//!
//! Each cell becomes a square. LEDs are coloured by their position along the
//! strip (index 0 red, then around the colour wheel), blanks stay black, so
//! the serpentine path shows up as a rainbow snaking through the hexagon.
//!
//! ## Rust concepts
//! - `image::RgbImage` as an in-memory pixel buffer
//! - `From` conversions at the crate boundary (`Color` into `image::Rgb`)

use crate::MapError;
use crate::grid::LedMap;
use image::{Rgb, RgbImage};
use std::fs;
use std::path::Path;

/// Side length in pixels of one cell in the preview.
pub const CELL_PIXELS: u32 = 12;

// ── Color ──────────────────────────────────────────────────────────

/// An RGB colour, independent of the image crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Fully saturated colour for a hue in degrees, wrapping past 360.
    ///
    /// [`Color::for_led`] maps strip positions onto this wheel, so the
    /// preview runs red, yellow, green, cyan, blue, magenta along the strip.
    pub fn from_hue(hue: u16) -> Self {
        let hue = hue % 360;
        let sector = hue / 60;
        let fraction = ((hue % 60) as f32) / 60.0;
        let rising = (fraction * 255.0) as u8;
        let falling = ((1.0 - fraction) * 255.0) as u8;

        match sector {
            0 => Self::new(255, rising, 0),  // Red → Yellow
            1 => Self::new(falling, 255, 0), // Yellow → Green
            2 => Self::new(0, 255, rising),  // Green → Cyan
            3 => Self::new(0, falling, 255), // Cyan → Blue
            4 => Self::new(rising, 0, 255),  // Blue → Magenta
            _ => Self::new(255, 0, falling), // Magenta → Red
        }
    }

    /// Colour for strip index `index` out of `count` LEDs.
    pub fn for_led(index: u32, count: usize) -> Self {
        if count == 0 {
            return Self::BLACK;
        }
        let hue = u64::from(index) * 360 / count as u64;
        Self::from_hue(hue as u16)
    }
}

impl From<Color> for Rgb<u8> {
    fn from(c: Color) -> Self {
        Rgb([c.r, c.g, c.b])
    }
}

// ── Rendering ──────────────────────────────────────────────────────

/// Draw `map` with each cell `cell_pixels` square.
pub fn render_preview(map: &LedMap, cell_pixels: u32) -> RgbImage {
    let cell_pixels = cell_pixels.max(1);
    let width = map.width() as u32 * cell_pixels;
    let height = map.height() as u32 * cell_pixels;
    let count = map.led_count();

    let mut img = RgbImage::from_pixel(width, height, Color::BLACK.into());

    for (y, row) in map.rows().iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            let Some(index) = cell.index() else {
                continue;
            };
            let color: Rgb<u8> = Color::for_led(index, count).into();
            let x0 = x as u32 * cell_pixels;
            let y0 = y as u32 * cell_pixels;
            for dy in 0..cell_pixels {
                for dx in 0..cell_pixels {
                    img.put_pixel(x0 + dx, y0 + dy, color);
                }
            }
        }
    }

    img
}

/// Render `map` and save it as a PNG at `path`, creating its parent directory.
pub fn save_preview(map: &LedMap, path: &Path) -> Result<(), MapError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| MapError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let img = render_preview(map, CELL_PIXELS);
    img.save_with_format(path, image::ImageFormat::Png)?;
    tracing::info!(
        "Preview: {} ({}x{} px)",
        path.display(),
        img.width(),
        img.height()
    );
    Ok(())
}
