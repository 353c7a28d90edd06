//! slide-compare-core: before/after image comparison blocks without framework dependencies.
//!
//! This crate provides:
//! - `parse_block` - hand-written scanner for the `compare-images` block grammar
//! - `SliderState` / `Ratio` - the pointer-driven reveal model
//! - `render` - builds the comparison (or error) tree against an `ElementBuilder`
//! - `HtmlTree` - in-memory `ElementBuilder` that serializes to HTML
//! - `VaultResolver` - embed link lookup over a list of vault paths
//! - `SlideCompare` - code block processor registration for a host

pub mod error;
pub mod html;
pub mod options;
pub mod parse;
pub mod platform;
pub mod plugin;
pub mod render;
pub mod slider;
pub mod types;
pub mod vault;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{BlockError, VaultError};
pub use html::{HtmlTree, NodeId, render_block_html};
pub use options::{DEFAULT_IMAGE_FORMATS, ImageFormats, SlideCompareOptions};
pub use parse::{BlockSyntax, parse_block, scan_block};
pub use platform::{ElementBuilder, ImageFile, LinkResolver, PlatformError};
pub use plugin::{BlockInvocation, CodeBlockRegistry, InvocationElement, SlideCompare};
pub use render::{ComparisonBlock, ErrorBlock, RATIO_PROPERTY, RenderedBlock, error_message, render};
pub use slider::{BoundingBox, PRIMARY_BUTTON, PointerInput, PointerKind, Ratio, SliderState};
pub use smol_str::SmolStr;
pub use types::{ComparedImage, ComparisonRequest, EmbedLink};
pub use vault::{VaultFile, VaultResolver, lookup_filename_in_vault};
