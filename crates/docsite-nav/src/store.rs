//! Content stores that document ids are resolved against.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// Source of authored documents, queried by document id.
pub trait ContentStore {
    /// Whether a document with this id exists.
    fn contains(&self, id: &str) -> bool;
}

impl ContentStore for HashSet<String> {
    fn contains(&self, id: &str) -> bool {
        HashSet::contains(self, id)
    }
}

/// Document extensions recognized by [`FsContentStore`].
const EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// Filesystem content store rooted at the docs directory.
///
/// A document id `x/y` exists if any of `x/y.md`, `x/y.mdx`, `x/y/index.md`
/// or `x/y/index.mdx` is a file under the root.
#[derive(Debug, Clone)]
pub struct FsContentStore {
    root: PathBuf,
}

impl FsContentStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Docs directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Candidate files for a document id, in lookup order.
    ///
    /// Returns nothing for ids that are absolute or climb out of the root.
    fn candidates(&self, id: &str) -> Vec<PathBuf> {
        let relative = Path::new(id);
        if id.is_empty()
            || relative
                .components()
                .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Vec::new();
        }

        let base = self.root.join(relative);
        let mut candidates: Vec<PathBuf> = EXTENSIONS
            .iter()
            .map(|ext| {
                let mut file = base.clone().into_os_string();
                file.push(".");
                file.push(ext);
                PathBuf::from(file)
            })
            .collect();
        candidates.extend(EXTENSIONS.iter().map(|ext| base.join(format!("index.{ext}"))));
        candidates
    }

    /// First existing file backing a document id.
    #[must_use]
    pub fn locate(&self, id: &str) -> Option<PathBuf> {
        self.candidates(id).into_iter().find(|path| path.is_file())
    }
}

impl ContentStore for FsContentStore {
    fn contains(&self, id: &str) -> bool {
        self.locate(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "# Title\n").unwrap();
    }

    #[test]
    fn test_fs_store_markdown_and_mdx() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "concepts/overview.md");
        touch(dir.path(), "reference/cli.mdx");

        let store = FsContentStore::new(dir.path());
        assert!(store.contains("concepts/overview"));
        assert!(store.contains("reference/cli"));
        assert!(!store.contains("concepts/missing"));
    }

    #[test]
    fn test_fs_store_index_file() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "guides/index.md");

        let store = FsContentStore::new(dir.path());
        assert_eq!(
            store.locate("guides"),
            Some(dir.path().join("guides").join("index.md"))
        );
    }

    #[test]
    fn test_fs_store_prefers_flat_file() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "guides.md");
        touch(dir.path(), "guides/index.md");

        let store = FsContentStore::new(dir.path());
        assert_eq!(store.locate("guides"), Some(dir.path().join("guides.md")));
    }

    #[test]
    fn test_fs_store_directory_is_not_a_document() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("legal.md")).unwrap();

        let store = FsContentStore::new(dir.path());
        assert!(!store.contains("legal"));
    }

    #[test]
    fn test_fs_store_rejects_escaping_ids() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "docs/secret.md");

        let store = FsContentStore::new(dir.path().join("docs"));
        assert!(!store.contains("../docs/secret"));
        assert!(!store.contains("/etc/passwd"));
        assert!(!store.contains(""));
    }

    #[test]
    fn test_hash_set_store() {
        let store: HashSet<String> = ["a".to_owned()].into_iter().collect();
        assert!(ContentStore::contains(&store, "a"));
        assert!(!ContentStore::contains(&store, "b"));
    }
}
