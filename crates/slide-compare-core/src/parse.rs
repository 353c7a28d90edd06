//! Block grammar scanning and validation.
//!
//! A comparison block looks like:
//!
//! ```text
//! images: ![[before.png]] ![[after.png]]
//!
//! Optional caption, any number of lines.
//! ```
//!
//! The header must open the block. Only that first header is honored; any
//! later `images:` line is just caption text.

use crate::error::BlockError;
use crate::options::ImageFormats;
use crate::platform::{ImageFile, LinkResolver};
use crate::types::{ComparedImage, ComparisonRequest, EmbedLink};

const HEADER: &str = "images:";
const EMBED_OPEN: &str = "![[";
const EMBED_CLOSE: &str = "]]";
const LINE_BREAKS: [char; 2] = ['\r', '\n'];

/// Raw pieces of a syntactically valid block, before any link resolution.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct BlockSyntax<'a> {
    /// Text inside the first `![[...]]`.
    pub left: &'a str,
    /// Text inside the second `![[...]]`.
    pub right: &'a str,
    /// Everything after the header line and the line breaks following it.
    pub caption: &'a str,
}

/// Scan the block header.
///
/// Accepts `images:`, an optional space and two embed tokens separated by
/// exactly one space. Spaces and then any run of `\r`/`\n` after the second
/// token are consumed; the rest, including text left on the header line, is
/// returned verbatim as the caption. Returns `None` if the header does not
/// match.
pub fn scan_block(source: &str) -> Option<BlockSyntax<'_>> {
    let rest = source.strip_prefix(HEADER)?;
    let rest = rest.strip_prefix(' ').unwrap_or(rest);
    let (left, rest) = scan_embed(rest)?;
    let rest = rest.strip_prefix(' ')?;
    let (right, rest) = scan_embed(rest)?;

    let rest = rest.trim_start_matches(' ');
    Some(BlockSyntax {
        left,
        right,
        caption: rest.trim_start_matches(LINE_BREAKS),
    })
}

/// Scan one `![[link]]` token at the start of `input`.
///
/// The link must be non-empty and end before the header line does.
fn scan_embed(input: &str) -> Option<(&str, &str)> {
    let inner = input.strip_prefix(EMBED_OPEN)?;
    let line_end = inner.find(LINE_BREAKS).unwrap_or(inner.len());
    let close = inner[..line_end].find(EMBED_CLOSE)?;
    if close == 0 {
        return None;
    }
    Some((&inner[..close], &inner[close + EMBED_CLOSE.len()..]))
}

/// Parse and validate a block.
///
/// `context_path` is the document the block lives in; embed links resolve
/// relative to it. Checks run in order: active document, syntax, link
/// resolution, image extension. The first failure wins.
pub fn parse_block<'a, R>(
    source: &'a str,
    context_path: Option<&str>,
    resolver: &R,
    formats: &ImageFormats,
) -> Result<ComparisonRequest<'a, R::File>, BlockError>
where
    R: LinkResolver + ?Sized,
{
    let context_path = context_path.ok_or(BlockError::NoActiveDocument)?;
    let syntax = scan_block(source).ok_or(BlockError::MalformedBlock)?;

    let left_link = EmbedLink::parse(syntax.left);
    let right_link = EmbedLink::parse(syntax.right);
    let left = resolver.resolve_link(left_link.target, context_path);
    let right = resolver.resolve_link(right_link.target, context_path);

    let (Some(left), Some(right)) = (left, right) else {
        tracing::debug!(
            left = left_link.target,
            right = right_link.target,
            context_path,
            "comparison block link did not resolve"
        );
        return Err(BlockError::UnresolvedLink);
    };

    if !formats.contains(left.extension()) || !formats.contains(right.extension()) {
        tracing::debug!(
            left = left.extension(),
            right = right.extension(),
            "comparison block embeds a non-image file"
        );
        return Err(BlockError::NotAnImage);
    }

    Ok(ComparisonRequest::new(
        ComparedImage::new(left, left_link),
        ComparedImage::new(right, right_link),
        syntax.caption,
    ))
}
