//! Configuration types for the thumbnail and optimize operations.
//!
//! Rename and parse need nothing beyond their corpus and directories; the
//! two collaborator-backed operations each get a small config struct with
//! documented defaults so callers set only what they care about.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for first-page thumbnail rendering.
#[derive(Debug, Clone)]
pub struct ThumbnailConfig {
    /// Maximum rendered dimension (width or height) in pixels. Default: 2000.
    ///
    /// A safety cap independent of page size: folio-format session scans at
    /// native resolution would otherwise produce multi-hundred-megapixel
    /// bitmaps. Either dimension is capped and the other scales
    /// proportionally, bounding pdfium's allocation.
    pub max_pixels: u32,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self { max_pixels: 2000 }
    }
}

/// Configuration for the two-stage PDF optimization pipeline.
#[derive(Debug, Clone)]
pub struct OptimizeConfig {
    /// Ghostscript quality preset. Default: [`QualityPreset::Ebook`].
    pub quality: QualityPreset,

    /// Path or name of the Ghostscript executable. Default: `"gs"`.
    ///
    /// Configurable because archival hosts often carry a locally built
    /// Ghostscript outside `PATH`; qpdf is assumed to be on `PATH`.
    pub ghostscript_path: String,

    /// Per-tool-invocation timeout in seconds. Default: 300.
    ///
    /// Session volumes run to hundreds of pages, so compression can be slow;
    /// the timeout exists to keep one wedged tool from stalling the batch
    /// forever, not to police normal runtimes.
    pub tool_timeout_secs: u64,
}

impl Default for OptimizeConfig {
    fn default() -> Self {
        Self {
            quality: QualityPreset::default(),
            ghostscript_path: "gs".to_string(),
            tool_timeout_secs: 300,
        }
    }
}

/// Ghostscript `-dPDFSETTINGS` quality presets, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityPreset {
    /// Lowest quality, smallest files.
    Screen,
    /// Good quality for on-screen reading. (default)
    #[default]
    Ebook,
    /// High quality.
    Printer,
    /// Highest quality, largest files.
    Prepress,
}

impl QualityPreset {
    /// The Ghostscript `-dPDFSETTINGS` value for this preset.
    pub fn gs_setting(&self) -> &'static str {
        match self {
            QualityPreset::Screen => "/screen",
            QualityPreset::Ebook => "/ebook",
            QualityPreset::Printer => "/printer",
            QualityPreset::Prepress => "/prepress",
        }
    }
}

impl fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityPreset::Screen => f.write_str("screen"),
            QualityPreset::Ebook => f.write_str("ebook"),
            QualityPreset::Printer => f.write_str("printer"),
            QualityPreset::Prepress => f.write_str("prepress"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_maps_to_gs_flag_value() {
        assert_eq!(QualityPreset::Screen.gs_setting(), "/screen");
        assert_eq!(QualityPreset::Ebook.gs_setting(), "/ebook");
        assert_eq!(QualityPreset::Printer.gs_setting(), "/printer");
        assert_eq!(QualityPreset::Prepress.gs_setting(), "/prepress");
    }

    #[test]
    fn defaults() {
        let c = OptimizeConfig::default();
        assert_eq!(c.quality, QualityPreset::Ebook);
        assert_eq!(c.ghostscript_path, "gs");
        assert_eq!(ThumbnailConfig::default().max_pixels, 2000);
    }
}
