//! Plugin settings.
//!
//! Deserialized from whatever the host persisted for the plugin. Every field
//! has a default, so an empty or partial settings object is valid.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Extensions accepted as comparison images when no settings override them.
pub const DEFAULT_IMAGE_FORMATS: [&str; 8] =
    ["avif", "bmp", "gif", "jpeg", "jpg", "png", "svg", "webp"];

/// Allow-list of image file extensions.
///
/// Matching is case-sensitive against the extension exactly as the host reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageFormats(Vec<SmolStr>);

impl ImageFormats {
    pub fn new<I, S>(formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Self(formats.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, extension: &str) -> bool {
        self.0.iter().any(|f| f == extension)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(SmolStr::as_str)
    }
}

impl Default for ImageFormats {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_FORMATS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SlideCompareOptions {
    /// Code block language tag the processor is registered under.
    pub language: SmolStr,
    pub image_formats: ImageFormats,
    /// Tooltip on the reset button.
    pub reset_tooltip: SmolStr,
    /// Render the caption text under the comparison.
    pub show_caption: bool,
}

impl Default for SlideCompareOptions {
    fn default() -> Self {
        Self {
            language: SmolStr::new_static("compare-images"),
            image_formats: ImageFormats::default(),
            reset_tooltip: SmolStr::new_static("Return slider"),
            show_caption: true,
        }
    }
}
