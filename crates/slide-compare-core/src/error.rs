//! Error types for slide-compare.
//!
//! `BlockError` is the user-facing reason a block could not be rendered as a
//! comparison. Its `Display` text is what ends up in the error panel.

use miette::Diagnostic;
use std::path::PathBuf;

/// Why a `compare-images` block was rejected.
///
/// Every variant is local to one block and recoverable: the renderer shows it
/// in place of the block and the rest of the document is unaffected.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Diagnostic)]
pub enum BlockError {
    /// The block does not start with `images: ![[...]] ![[...]]`.
    #[error("Invalid comparison block formatting.")]
    #[diagnostic(
        code(slide_compare::malformed_block),
        help("start the block with `images: ![[left.png]] ![[right.png]]` on a single line")
    )]
    MalformedBlock,

    /// One of the embed links does not point at a file in the vault.
    #[error("Invalid markdown embed file link.")]
    #[diagnostic(
        code(slide_compare::unresolved_link),
        help("check that both embedded files exist")
    )]
    UnresolvedLink,

    /// One of the embedded files is not in the image format allow-list.
    #[error("Markdown embed file provided isn't an image.")]
    #[diagnostic(
        code(slide_compare::not_an_image),
        help("supported formats are avif, bmp, gif, jpeg, jpg, png, svg and webp")
    )]
    NotAnImage,

    /// The host had no open document to resolve links relative to.
    #[error("No active document to resolve embed links against.")]
    #[diagnostic(code(slide_compare::no_active_document))]
    NoActiveDocument,
}

impl BlockError {
    /// Stable kebab-case tag, suitable for CSS hooks and logs.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::MalformedBlock => "malformed-block-syntax",
            Self::UnresolvedLink => "unresolved-link",
            Self::NotAnImage => "non-image-file",
            Self::NoActiveDocument => "no-active-document",
        }
    }
}

/// Errors building a `VaultResolver`.
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum VaultError {
    #[error("vault root {} cannot be expressed as a file URL", path.display())]
    #[diagnostic(
        code(slide_compare::vault::root),
        help("vault roots must be absolute directory paths")
    )]
    InvalidRoot { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_distinct() {
        let all = [
            BlockError::MalformedBlock,
            BlockError::UnresolvedLink,
            BlockError::NotAnImage,
            BlockError::NoActiveDocument,
        ];
        let mut tags: Vec<_> = all.iter().map(BlockError::tag).collect();
        tags.sort();
        tags.dedup();
        assert_eq!(tags.len(), all.len());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            BlockError::MalformedBlock.to_string(),
            "Invalid comparison block formatting."
        );
        assert_eq!(
            BlockError::UnresolvedLink.to_string(),
            "Invalid markdown embed file link."
        );
    }

    #[test]
    fn test_diagnostic_code() {
        let code = BlockError::NotAnImage.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("slide_compare::not_an_image"));
    }
}
