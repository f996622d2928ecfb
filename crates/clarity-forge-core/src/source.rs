//! Template sources.
//!
//! The scanner and generator read templates through [`TemplateSource`] so tests can
//! serve templates from memory. [`FsTemplateSource`] reads them from a contracts root
//! on disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::Result;

/// Read access to contract templates, addressed by path relative to a contracts root.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    /// Read a template. Returns `Ok(None)` when the template does not exist; any
    /// other read failure is an error.
    async fn read_template(&self, relative: &str) -> Result<Option<String>>;

    /// Full path of a template, for reporting.
    fn resolve(&self, relative: &str) -> PathBuf;
}

/// Templates under a directory on disk.
#[derive(Debug, Clone)]
pub struct FsTemplateSource {
    root: PathBuf,
}

impl FsTemplateSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl TemplateSource for FsTemplateSource {
    async fn read_template(&self, relative: &str) -> Result<Option<String>> {
        let path = self.resolve(relative);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "template not found");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }
}

/// In-memory templates keyed by relative path.
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplateSource {
    templates: BTreeMap<String, String>,
}

impl MemoryTemplateSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, relative: impl Into<String>, contents: impl Into<String>) -> &mut Self {
        self.templates.insert(relative.into(), contents.into());
        self
    }
}

#[async_trait]
impl TemplateSource for MemoryTemplateSource {
    async fn read_template(&self, relative: &str) -> Result<Option<String>> {
        Ok(self.templates.get(relative).cloned())
    }

    fn resolve(&self, relative: &str) -> PathBuf {
        PathBuf::from(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fs_source_reads_template() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("dao")).unwrap();
        std::fs::write(dir.path().join("dao/aibtc-base-dao.clar"), "(define-data-var x uint u0)").unwrap();

        let source = FsTemplateSource::new(dir.path());
        let contents = source.read_template("dao/aibtc-base-dao.clar").await.unwrap();
        assert_eq!(contents.as_deref(), Some("(define-data-var x uint u0)"));
    }

    #[tokio::test]
    async fn test_fs_source_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let source = FsTemplateSource::new(dir.path());
        assert!(source.read_template("dao/missing.clar").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fs_source_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("dao/not-a-file.clar")).unwrap();
        let source = FsTemplateSource::new(dir.path());
        assert!(source.read_template("dao/not-a-file.clar").await.is_err());
    }

    #[test]
    fn test_resolve_joins_root() {
        let source = FsTemplateSource::new("/project/contracts");
        assert_eq!(
            source.resolve("dao/aibtc-base-dao.clar"),
            PathBuf::from("/project/contracts/dao/aibtc-base-dao.clar")
        );
    }

    #[tokio::test]
    async fn test_memory_source() {
        let mut source = MemoryTemplateSource::new();
        source.insert("agent/aibtc-agent-account.clar", ";; agent");
        assert_eq!(
            source.read_template("agent/aibtc-agent-account.clar").await.unwrap().as_deref(),
            Some(";; agent")
        );
        assert!(source.read_template("other.clar").await.unwrap().is_none());
    }
}
