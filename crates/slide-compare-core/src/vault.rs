//! Embed link resolution over a local vault.
//!
//! Used by static hosts that have a list of vault files rather than a live
//! metadata cache. Paths are vault-relative; resource URLs are built by
//! appending the path to a base URL.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use smol_str::SmolStr;
use unicode_normalization::UnicodeNormalization;
use url::Url;

use crate::error::VaultError;
use crate::platform::{ImageFile, LinkResolver};

/// Path lookup in an Obsidian vault
///
/// Credit to https://github.com/zoni
///
/// Adapted from https://github.com/zoni/obsidian-export/blob/main/src/lib.rs
///
/// Returns every vault path the link could refer to, in vault order.
pub fn lookup_filename_in_vault<'a>(
    filename: &str,
    vault_contents: &'a [PathBuf],
) -> impl Iterator<Item = &'a PathBuf> {
    let filename_normalized: String = filename.nfc().collect();
    let filename_lowered = filename_normalized.to_lowercase();

    vault_contents.iter().filter(move |path| {
        let path_normalized_str: String = path.to_string_lossy().nfc().collect();
        let path_normalized = PathBuf::from(&path_normalized_str);
        let path_normalized_lowered = PathBuf::from(&path_normalized_str.to_lowercase());

        // `[[Note.1]]` may link to `Note.1.md`, so the `.md` variants are
        // checked separately instead of forcing an extension up front.
        path_normalized.ends_with(&filename_normalized)
            || path_normalized.ends_with(filename_normalized.clone() + ".md")
            || path_normalized_lowered.ends_with(&filename_lowered)
            || path_normalized_lowered.ends_with(filename_lowered.clone() + ".md")
    })
}

/// A file in the vault.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VaultFile {
    path: PathBuf,
    extension: SmolStr,
    url: Url,
}

impl VaultFile {
    /// Vault-relative path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl ImageFile for VaultFile {
    fn extension(&self) -> &str {
        &self.extension
    }

    fn resource_url(&self) -> String {
        self.url.to_string()
    }
}

/// `LinkResolver` over a fixed list of vault-relative paths.
#[derive(Clone, Debug)]
pub struct VaultResolver {
    base: Url,
    contents: Arc<[PathBuf]>,
}

impl VaultResolver {
    /// Resolver whose resource URLs are `base` joined with the vault path.
    pub fn new(base: Url, contents: impl Into<Arc<[PathBuf]>>) -> Self {
        Self {
            base,
            contents: contents.into(),
        }
    }

    /// Resolver serving files straight from an absolute vault root via `file://` URLs.
    pub fn from_root(root: impl AsRef<Path>, contents: impl Into<Arc<[PathBuf]>>) -> Result<Self, VaultError> {
        let root = root.as_ref();
        let base = Url::from_directory_path(root).map_err(|()| VaultError::InvalidRoot {
            path: root.to_path_buf(),
        })?;
        Ok(Self::new(base, contents))
    }

    pub fn contents(&self) -> &[PathBuf] {
        &self.contents
    }

    fn file(&self, path: &Path) -> VaultFile {
        let extension = path
            .extension()
            .map(|ext| SmolStr::new(ext.to_string_lossy()))
            .unwrap_or_default();
        VaultFile {
            path: path.to_path_buf(),
            extension,
            url: self.url_for(path),
        }
    }

    fn url_for(&self, path: &Path) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            for component in path.components() {
                segments.push(&component.as_os_str().to_string_lossy());
            }
        }
        url
    }
}

impl LinkResolver for VaultResolver {
    type File = VaultFile;

    /// Matches are ranked: a file in the linking note's own folder wins,
    /// otherwise the first match in vault order.
    fn resolve_link(&self, link: &str, context_path: &str) -> Option<VaultFile> {
        if link.is_empty() {
            return None;
        }
        let context_dir = Path::new(context_path).parent();
        let mut matches = lookup_filename_in_vault(link, &self.contents).peekable();
        let first = matches.peek().copied()?;
        let best = matches
            .find(|path| path.parent() == context_dir)
            .unwrap_or(first);
        Some(self.file(best))
    }
}
