//! Platform abstraction traits for block processing.
//!
//! These traits define the interface between the comparison logic and the
//! host application (browser DOM, static HTML export, tests). The core never
//! talks to a rendering engine or file store directly.

/// A host refused a platform operation, e.g. creating an element.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct PlatformError(pub String);

impl From<&str> for PlatformError {
    fn from(message: &str) -> Self {
        Self(message.to_owned())
    }
}

/// A host file that an embed link resolved to.
pub trait ImageFile {
    /// File extension without the leading dot, exactly as the host reports it.
    fn extension(&self) -> &str;

    /// URL the host can display the file from.
    fn resource_url(&self) -> String;
}

/// Host link resolution.
///
/// Given the raw link target and the path of the document containing the
/// block, returns the file it points at, or `None` if nothing matches.
pub trait LinkResolver {
    type File: ImageFile;

    fn resolve_link(&self, link: &str, context_path: &str) -> Option<Self::File>;
}

impl<R: LinkResolver + ?Sized> LinkResolver for &R {
    type File = R::File;

    fn resolve_link(&self, link: &str, context_path: &str) -> Option<Self::File> {
        (**self).resolve_link(link, context_path)
    }
}

/// Minimal UI tree builder.
///
/// Implementations handle the actual element creation. The browser
/// implementation drives `web_sys`, `HtmlTree` keeps an in-memory arena.
/// Only element creation can fail. Everything else is best effort: platforms
/// log and skip what they cannot apply.
pub trait ElementBuilder {
    type Element: Clone;

    /// Create a detached element with the given space-separated classes.
    fn create_element(&mut self, tag: &str, class: &str) -> Result<Self::Element, PlatformError>;

    fn append_child(&mut self, parent: &Self::Element, child: &Self::Element);

    /// Append `element` to the parent of `anchor`.
    ///
    /// Returns `false` (and mounts nothing) if `anchor` has no parent.
    fn append_sibling(&mut self, anchor: &Self::Element, element: &Self::Element) -> bool;

    fn set_attribute(&mut self, element: &Self::Element, name: &str, value: &str);

    /// Replace the element's content with a single text node.
    fn set_text(&mut self, element: &Self::Element, text: &str);

    /// Replace the element's content with trusted markup (icons).
    fn set_inner_html(&mut self, element: &Self::Element, html: &str);

    /// Set an inline style property, including `--custom` properties.
    fn set_style_property(&mut self, element: &Self::Element, name: &str, value: &str);

    fn remove_style_property(&mut self, element: &Self::Element, name: &str);

    /// Attach the host's tooltip to an element.
    fn set_tooltip(&mut self, element: &Self::Element, label: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_error_displays_message() {
        let err = PlatformError::from("<bad tag> is not a valid element name");
        assert_eq!(err.to_string(), "<bad tag> is not a valid element name");
        let source: &dyn std::error::Error = &err;
        assert!(source.source().is_none());
    }
}
