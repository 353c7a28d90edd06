//! Shared fixtures for unit tests.

use std::cell::RefCell;

use crate::platform::{ImageFile, LinkResolver};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestFile {
    pub path: String,
    pub extension: String,
}

impl ImageFile for TestFile {
    fn extension(&self) -> &str {
        &self.extension
    }

    fn resource_url(&self) -> String {
        format!("app://vault/{}", self.path)
    }
}

/// Resolves links by exact path match and records the context paths it was asked about.
#[derive(Debug, Default)]
pub struct TestResolver {
    files: Vec<String>,
    contexts: RefCell<Vec<String>>,
}

impl TestResolver {
    pub fn new<'a>(files: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            files: files.into_iter().map(String::from).collect(),
            contexts: RefCell::new(Vec::new()),
        }
    }

    pub fn contexts(&self) -> Vec<String> {
        self.contexts.borrow().clone()
    }
}

impl LinkResolver for TestResolver {
    type File = TestFile;

    fn resolve_link(&self, link: &str, context_path: &str) -> Option<TestFile> {
        self.contexts.borrow_mut().push(context_path.to_string());
        let path = self.files.iter().find(|f| f.as_str() == link)?;
        let extension = path.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
        Some(TestFile {
            path: path.clone(),
            extension: extension.to_string(),
        })
    }
}
