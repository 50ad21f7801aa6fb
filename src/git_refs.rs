//! Update detection for the superpowers checkout.
//!
//! Reads `.git/HEAD`, loose ref files and `packed-refs` directly. No git
//! process is spawned and nothing is fetched, so the answer reflects the
//! remote-tracking refs from the last fetch.

use crate::diagnostics::Diagnostics;
use crate::fs_tree::FileTree;
use std::path::{Path, PathBuf};

const GIT_DIR: &str = ".git";
const PACKED_REFS: &str = "packed-refs";
const SYMREF_PREFIX: &str = "ref:";
const HEADS_PREFIX: &str = "refs/heads/";
const ORIGIN_PREFIX: &str = "refs/remotes/origin/";
const ORIGIN_HEAD: &str = "refs/remotes/origin/HEAD";

/// Contents of a ref
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefValue {
    /// A commit hash
    Direct(String),
    /// `ref: <name>`
    Symbolic(String),
}

impl RefValue {
    /// `None` for empty values
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Some(target) = raw.strip_prefix(SYMREF_PREFIX) {
            let target = target.trim();
            return (!target.is_empty()).then(|| RefValue::Symbolic(target.to_string()));
        }
        (!raw.is_empty()).then(|| RefValue::Direct(raw.to_string()))
    }
}

/// Local HEAD state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Head {
    /// Ref HEAD points at; `None` when detached
    pub target: Option<String>,
    pub commit: String,
}

impl Head {
    /// Branch name when HEAD points at `refs/heads/<branch>`
    pub fn branch(&self) -> Option<&str> {
        self.target.as_deref()?.strip_prefix(HEADS_PREFIX)
    }
}

/// Read-only view of a repository's ref store
pub struct GitRefs<'a> {
    tree: &'a dyn FileTree,
    git_dir: PathBuf,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> GitRefs<'a> {
    /// `None` when `repo_root` has no `.git` directory
    pub fn open(
        tree: &'a dyn FileTree,
        repo_root: &Path,
        diagnostics: &'a dyn Diagnostics,
    ) -> Option<Self> {
        let git_dir = repo_root.join(GIT_DIR);
        if !tree.is_dir(&git_dir) {
            diagnostics.debug(&format!("No git directory at {}", git_dir.display()));
            return None;
        }
        Some(Self {
            tree,
            git_dir,
            diagnostics,
        })
    }

    /// Read a ref: loose file first, then `packed-refs`
    pub fn read_ref(&self, name: &str) -> Option<RefValue> {
        let value = self
            .read_loose(name)
            .or_else(|| self.read_packed(name))
            .and_then(|raw| RefValue::parse(&raw));
        if value.is_none() {
            self.diagnostics.debug(&format!("Git ref {} not found", name));
        }
        value
    }

    fn read_loose(&self, name: &str) -> Option<String> {
        let path = self.git_dir.join(name);
        if !self.tree.is_file(&path) {
            return None;
        }
        match self.tree.read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) => {
                self.diagnostics
                    .debug(&format!("Failed to read {}: {}", path.display(), e));
                None
            }
        }
    }

    fn read_packed(&self, name: &str) -> Option<String> {
        let path = self.git_dir.join(PACKED_REFS);
        if !self.tree.is_file(&path) {
            return None;
        }
        let content = match self.tree.read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                self.diagnostics
                    .debug(&format!("Failed to read {}: {}", path.display(), e));
                return None;
            }
        };

        content
            .lines()
            .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('^'))
            .filter_map(|line| line.split_once(' '))
            .find(|(_, ref_name)| ref_name.trim() == name)
            .map(|(hash, _)| {
                self.diagnostics
                    .debug(&format!("Resolved git ref {} from packed-refs", name));
                hash.trim().to_string()
            })
    }

    /// Commit a ref points at, following one symbolic hop
    fn peel_once(&self, value: RefValue) -> Option<String> {
        match value {
            RefValue::Direct(hash) => Some(hash),
            RefValue::Symbolic(target) => match self.read_ref(&target)? {
                RefValue::Direct(hash) => Some(hash),
                RefValue::Symbolic(next) => {
                    self.diagnostics
                        .debug(&format!("Not following nested symbolic ref {}", next));
                    None
                }
            },
        }
    }

    pub fn head(&self) -> Option<Head> {
        let value = self.read_ref("HEAD")?;
        let target = match &value {
            RefValue::Symbolic(target) => Some(target.clone()),
            RefValue::Direct(_) => None,
        };
        let commit = self.peel_once(value)?;
        Some(Head { target, commit })
    }

    /// Commit of the upstream tracking ref: `origin/HEAD`, else the
    /// origin branch matching the local branch
    pub fn upstream_commit(&self, head: &Head) -> Option<String> {
        let value = self.read_ref(ORIGIN_HEAD).or_else(|| {
            let branch = head.branch()?;
            self.read_ref(&format!("{}{}", ORIGIN_PREFIX, branch))
        })?;
        self.peel_once(value)
    }
}

/// Whether the remote-tracking head differs from the local head.
///
/// Any missing or unreadable piece counts as "no update".
pub fn has_upstream_update(
    tree: &dyn FileTree,
    repo_root: &Path,
    diagnostics: &dyn Diagnostics,
) -> bool {
    let Some(refs) = GitRefs::open(tree, repo_root, diagnostics) else {
        return false;
    };
    let Some(head) = refs.head() else {
        diagnostics.debug("HEAD commit missing");
        return false;
    };
    let Some(upstream) = refs.upstream_commit(&head) else {
        diagnostics.debug("Origin commit missing");
        return false;
    };

    let has_update = upstream != head.commit;
    diagnostics.debug(&format!("Update status: {}", has_update));
    has_update
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::recorder::Recorder;
    use crate::diagnostics::Silent;
    use crate::fs_tree::memory::MemoryTree;
    use crate::fs_tree::DiskTree;
    use std::fs;
    use tempfile::tempdir;

    const REPO: &str = "/repo";

    fn repo(files: &[(&str, &str)]) -> MemoryTree {
        let mut tree = MemoryTree::new().with_dir("/repo/.git");
        for (name, content) in files {
            tree.add_file(Path::new(REPO).join(".git").join(name), content);
        }
        tree
    }

    fn check(tree: &MemoryTree) -> bool {
        has_upstream_update(tree, Path::new(REPO), &Silent)
    }

    #[test]
    fn test_same_commit_no_update() {
        let tree = repo(&[
            ("HEAD", "ref: refs/heads/main\n"),
            ("refs/heads/main", "abc123\n"),
            ("refs/remotes/origin/main", "abc123\n"),
        ]);
        assert!(!check(&tree));
    }

    #[test]
    fn test_different_commit_update() {
        let tree = repo(&[
            ("HEAD", "ref: refs/heads/main\n"),
            ("refs/heads/main", "abc123\n"),
            ("refs/remotes/origin/main", "def456\n"),
        ]);
        assert!(check(&tree));
    }

    #[test]
    fn test_missing_git_dir() {
        let tree = MemoryTree::new().with_dir("/repo");
        let recorder = Recorder::default();
        assert!(!has_upstream_update(&tree, Path::new(REPO), &recorder));
        assert!(recorder.contains("No git directory"));

        assert!(!check(&MemoryTree::new()));
    }

    #[test]
    fn test_git_file_is_not_a_repo() {
        let tree = MemoryTree::new().with_file("/repo/.git", "gitdir: ../elsewhere");
        assert!(!check(&tree));
    }

    #[test]
    fn test_packed_refs() {
        let packed = "# pack-refs with: peeled fully-peeled sorted\n\
                      abc123 refs/heads/main\n\
                      \n\
                      def456 refs/remotes/origin/main\n\
                      ^0123abcd\n\
                      999999 refs/tags/v1.0\n";
        let tree = repo(&[("HEAD", "ref: refs/heads/main"), ("packed-refs", packed)]);
        let refs = GitRefs::open(&tree, Path::new(REPO), &Silent).unwrap();

        assert_eq!(
            refs.read_ref("refs/remotes/origin/main"),
            Some(RefValue::Direct("def456".to_string()))
        );
        assert_eq!(refs.read_ref("^0123abcd"), None);
        assert_eq!(refs.read_ref("refs/heads/missing"), None);
        assert!(check(&tree));
    }

    #[test]
    fn test_loose_ref_wins_over_packed() {
        let tree = repo(&[
            ("HEAD", "ref: refs/heads/main"),
            ("refs/heads/main", "fresh"),
            ("packed-refs", "stale refs/heads/main\n"),
            ("refs/remotes/origin/main", "fresh"),
        ]);
        assert!(!check(&tree));
    }

    #[test]
    fn test_symbolic_origin_head() {
        let tree = repo(&[
            ("HEAD", "ref: refs/heads/main"),
            ("refs/heads/main", "abc123"),
            ("refs/remotes/origin/HEAD", "ref: refs/remotes/origin/main\n"),
            ("refs/remotes/origin/main", "def456"),
            // Ignored because origin/HEAD takes priority
            ("refs/remotes/origin/feature", "abc123"),
        ]);
        assert!(check(&tree));
    }

    #[test]
    fn test_origin_head_dangling_has_no_fallback() {
        let tree = repo(&[
            ("HEAD", "ref: refs/heads/main"),
            ("refs/heads/main", "abc123"),
            ("refs/remotes/origin/HEAD", "ref: refs/remotes/origin/gone"),
            ("refs/remotes/origin/main", "def456"),
        ]);
        assert!(!check(&tree));
    }

    #[test]
    fn test_branch_with_slashes() {
        let tree = repo(&[
            ("HEAD", "ref: refs/heads/feature/login"),
            ("refs/heads/feature/login", "abc123"),
            ("refs/remotes/origin/feature/login", "def456"),
            ("refs/remotes/origin/login", "abc123"),
        ]);
        let refs = GitRefs::open(&tree, Path::new(REPO), &Silent).unwrap();
        let head = refs.head().unwrap();
        assert_eq!(head.branch(), Some("feature/login"));
        assert!(check(&tree));
    }

    #[test]
    fn test_detached_head() {
        let tree = repo(&[
            ("HEAD", "abc123\n"),
            ("refs/remotes/origin/HEAD", "def456"),
        ]);
        let refs = GitRefs::open(&tree, Path::new(REPO), &Silent).unwrap();
        let head = refs.head().unwrap();
        assert_eq!(head.target, None);
        assert_eq!(head.branch(), None);
        assert_eq!(head.commit, "abc123");
        assert!(check(&tree));

        // No origin/HEAD and no branch to derive a tracking ref from
        let tree = repo(&[("HEAD", "abc123"), ("refs/remotes/origin/main", "def456")]);
        assert!(!check(&tree));
    }

    #[test]
    fn test_unresolved_pieces_fold_to_false() {
        // Unborn branch
        let tree = repo(&[
            ("HEAD", "ref: refs/heads/main"),
            ("refs/remotes/origin/main", "def456"),
        ]);
        assert!(!check(&tree));

        // No remote-tracking refs at all
        let tree = repo(&[("HEAD", "ref: refs/heads/main"), ("refs/heads/main", "abc123")]);
        assert!(!check(&tree));

        // Empty HEAD file
        let tree = repo(&[("HEAD", "  \n")]);
        assert!(!check(&tree));
    }

    #[test]
    fn test_unreadable_ref_file() {
        let mut tree = repo(&[
            ("HEAD", "ref: refs/heads/main"),
            ("refs/heads/main", "abc123"),
            ("refs/remotes/origin/main", "def456"),
        ]);
        tree.deny("/repo/.git/refs/heads/main");
        assert!(!check(&tree));
    }

    #[test]
    fn test_ref_value_parse() {
        assert_eq!(
            RefValue::parse("ref:refs/heads/main"),
            Some(RefValue::Symbolic("refs/heads/main".to_string()))
        );
        assert_eq!(RefValue::parse("ref:   "), None);
        assert_eq!(RefValue::parse(""), None);
    }

    #[test]
    fn test_on_disk_repo() {
        let temp = tempdir().unwrap();
        let git = temp.path().join(".git");
        fs::create_dir_all(git.join("refs/heads")).unwrap();
        fs::create_dir_all(git.join("refs/remotes/origin")).unwrap();
        fs::write(git.join("HEAD"), "ref: refs/heads/main\n").unwrap();
        fs::write(git.join("refs/heads/main"), "abc123\n").unwrap();
        fs::write(git.join("refs/remotes/origin/main"), "abc123\n").unwrap();

        assert!(!has_upstream_update(&DiskTree, temp.path(), &Silent));

        fs::write(git.join("refs/remotes/origin/main"), "def456\n").unwrap();
        assert!(has_upstream_update(&DiskTree, temp.path(), &Silent));
    }
}
