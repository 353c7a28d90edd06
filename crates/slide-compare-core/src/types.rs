//! Core block types: embed links and validated comparison requests.
//!
//! These types borrow from the block source and are generic over the host's
//! file handle, so they can be used with any `LinkResolver` implementation.

/// An embed reference as written between `![[` and `]]`.
///
/// Follows the wiki-link shape `target#subpath|display`. Only `target` is
/// resolved against the host; the other parts ride along for rendering.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct EmbedLink<'a> {
    /// File reference handed to the link resolver.
    pub target: &'a str,
    /// Heading or block reference after `#`, if any.
    pub subpath: Option<&'a str>,
    /// Display text after `|`, if any. Image embeds usually put a size here.
    pub display: Option<&'a str>,
}

impl<'a> EmbedLink<'a> {
    /// Split raw embed text into its parts.
    ///
    /// The first `|` separates the display text, the first `#` before it
    /// separates the subpath. The target is trimmed of surrounding whitespace.
    pub fn parse(text: &'a str) -> Self {
        let (link, display) = match text.split_once('|') {
            Some((link, display)) => (link, Some(display)),
            None => (text, None),
        };
        let (target, subpath) = match link.split_once('#') {
            Some((target, subpath)) => (target, Some(subpath.trim())),
            None => (link, None),
        };
        Self {
            target: target.trim(),
            subpath: subpath.filter(|s| !s.is_empty()),
            display: display.filter(|s| !s.is_empty()),
        }
    }
}

/// One side of a comparison: the resolved host file plus the link it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComparedImage<'a, F> {
    pub file: F,
    pub link: EmbedLink<'a>,
}

impl<'a, F> ComparedImage<'a, F> {
    pub fn new(file: F, link: EmbedLink<'a>) -> Self {
        Self { file, link }
    }

    /// Text for the image `alt` attribute: the display text if given, else the target.
    pub fn alt_text(&self) -> &'a str {
        self.link.display.unwrap_or(self.link.target)
    }
}

/// A fully validated comparison block.
///
/// Only constructed by `parse_block` once both links resolved to image files,
/// so there is never a half-valid request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComparisonRequest<'a, F> {
    /// `[left, right]` in the order they were referenced.
    pub images: [ComparedImage<'a, F>; 2],
    /// Everything after the header's line breaks, verbatim.
    pub caption: &'a str,
}

impl<'a, F> ComparisonRequest<'a, F> {
    pub fn new(left: ComparedImage<'a, F>, right: ComparedImage<'a, F>, caption: &'a str) -> Self {
        Self {
            images: [left, right],
            caption,
        }
    }

    /// The first referenced image, revealed left of the slider.
    pub fn left(&self) -> &ComparedImage<'a, F> {
        &self.images[0]
    }

    /// The second referenced image, shown underneath.
    pub fn right(&self) -> &ComparedImage<'a, F> {
        &self.images[1]
    }
}
