//! Font registration for chart text.
//!
//! Plotters is built with the pure-Rust `ab_glyph` text backend, which only
//! knows fonts that were registered explicitly. We register one TrueType file
//! under the `sans-serif` family used by every renderer.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use plotters::style::{FontStyle, register_font};

use super::ChartTheme;
use crate::error::AppError;

pub const FONT_FAMILY: &str = "sans-serif";

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static DISCOVERED: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Register the chart font and return the file it came from.
///
/// An explicit path must load. Without one, the first loadable system font is
/// used; `Ok(None)` means none was found and charts should skip text.
pub fn register_chart_font(explicit: Option<&Path>) -> Result<Option<PathBuf>, AppError> {
    if let Some(path) = explicit {
        load(path).map_err(AppError::input)?;
        return Ok(Some(path.to_path_buf()));
    }

    let found = DISCOVERED.get_or_init(|| {
        SYSTEM_FONTS.iter().map(Path::new).find_map(|p| match load(p) {
            Ok(()) => Some(p.to_path_buf()),
            Err(reason) => {
                tracing::trace!(%reason, "font candidate skipped");
                None
            }
        })
    });
    Ok(found.clone())
}

/// Register the font named by `theme.font` (or a system font when unset) and
/// turn chart text on only if one was registered.
pub fn apply_chart_font(theme: &mut ChartTheme) -> Result<(), AppError> {
    let font = register_chart_font(theme.font.as_deref())?;
    theme.text = font.is_some();
    theme.font = font;
    Ok(())
}

/// sfnt version tags: TrueType, Apple TrueType, OpenType/CFF, collection.
fn looks_like_font(bytes: &[u8]) -> bool {
    matches!(
        bytes.get(..4),
        Some([0x00, 0x01, 0x00, 0x00]) | Some(b"true") | Some(b"OTTO") | Some(b"ttcf")
    )
}

fn load(path: &Path) -> Result<(), String> {
    let bytes = std::fs::read(path)
        .map_err(|e| format!("Failed to read font '{}': {e}", path.display()))?;
    if !looks_like_font(&bytes) {
        return Err(format!("'{}' is not a TrueType/OpenType font.", path.display()));
    }
    // The registry keeps `&'static` data for the life of the process.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    register_font(FONT_FAMILY, FontStyle::Normal, bytes)
        .map_err(|_| format!("'{}' is not a usable TrueType font.", path.display()))
}
