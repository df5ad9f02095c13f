//! Build tree naming and on-disk state.
//!
//! A build tree has two possible locations under the project root: the
//! active path (`build-debug`) and the hidden path (`.build-debug`). A tree
//! is never deleted, only moved between the two.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A build directory belonging to one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTree {
    name: String,
    active: PathBuf,
    hidden: PathBuf,
}

impl BuildTree {
    /// Create a tree named `name` under `root`, hidden by prefixing `hidden_prefix`.
    pub fn new(root: &Path, name: impl Into<String>, hidden_prefix: &str) -> Self {
        let name = name.into();
        let hidden_name = format!("{}{}", hidden_prefix, name);
        BuildTree {
            active: root.join(&name),
            hidden: root.join(hidden_name),
            name,
        }
    }

    /// Directory name of the active tree.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the tree while active.
    pub fn active_path(&self) -> &Path {
        &self.active
    }

    /// Path of the tree while hidden.
    pub fn hidden_path(&self) -> &Path {
        &self.hidden
    }

    /// Look at the filesystem and classify this tree.
    pub fn inspect(&self) -> io::Result<TreeState> {
        let active = probe(&self.active)?;
        let hidden = probe(&self.hidden)?;

        let state = match (active, hidden) {
            (Some(false), _) => TreeState::Blocked(self.active.clone()),
            (_, Some(false)) => TreeState::Blocked(self.hidden.clone()),
            (Some(true), Some(true)) => TreeState::Conflict,
            (Some(true), None) => TreeState::Active,
            (None, Some(true)) => TreeState::Inactive,
            (None, None) => TreeState::Absent,
        };
        Ok(state)
    }
}

/// Observed state of a build tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeState {
    /// Neither path exists.
    Absent,
    /// Only the active path exists.
    Active,
    /// Only the hidden path exists.
    Inactive,
    /// Both paths exist; renaming either would clobber the other.
    Conflict,
    /// A file (not a directory) occupies one of the tree's paths.
    Blocked(PathBuf),
}

impl TreeState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TreeState::Absent => "absent",
            TreeState::Active => "active",
            TreeState::Inactive => "inactive",
            TreeState::Conflict => "conflict",
            TreeState::Blocked(_) => "blocked",
        }
    }

    /// True if the switcher can operate on a tree in this state.
    pub fn is_consistent(&self) -> bool {
        matches!(
            self,
            TreeState::Absent | TreeState::Active | TreeState::Inactive
        )
    }
}

impl std::fmt::Display for TreeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `None` if nothing is at `path`, otherwise whether it is a directory.
fn probe(path: &Path) -> io::Result<Option<bool>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta.is_dir())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_tree_paths() {
        let tree = BuildTree::new(Path::new("/proj"), "build-debug", ".");
        assert_eq!(tree.name(), "build-debug");
        assert_eq!(tree.active_path(), Path::new("/proj/build-debug"));
        assert_eq!(tree.hidden_path(), Path::new("/proj/.build-debug"));
    }

    #[test]
    fn test_inspect_states() {
        let tmp = TempDir::new().unwrap();
        let tree = BuildTree::new(tmp.path(), "build-release", ".");

        assert_eq!(tree.inspect().unwrap(), TreeState::Absent);

        fs::create_dir(tree.hidden_path()).unwrap();
        assert_eq!(tree.inspect().unwrap(), TreeState::Inactive);

        fs::create_dir(tree.active_path()).unwrap();
        assert_eq!(tree.inspect().unwrap(), TreeState::Conflict);

        fs::remove_dir(tree.hidden_path()).unwrap();
        assert_eq!(tree.inspect().unwrap(), TreeState::Active);
    }

    #[test]
    fn test_inspect_file_blocks_tree() {
        let tmp = TempDir::new().unwrap();
        let tree = BuildTree::new(tmp.path(), "build-debug", ".");
        fs::write(tree.active_path(), "not a directory").unwrap();

        let state = tree.inspect().unwrap();
        assert_eq!(state, TreeState::Blocked(tree.active_path().to_path_buf()));
        assert!(!state.is_consistent());
    }
}
