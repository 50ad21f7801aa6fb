//! Depth-bounded discovery of skill directories.

use crate::diagnostics::Diagnostics;
use crate::fs_tree::FileTree;
use std::path::{Path, PathBuf};

/// Marker file identifying a skill directory
pub const SKILL_FILE: &str = "SKILL.md";

/// Finds directories that directly contain a SKILL.md file
pub struct SkillScanner<'a> {
    tree: &'a dyn FileTree,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> SkillScanner<'a> {
    pub fn new(tree: &'a dyn FileTree, diagnostics: &'a dyn Diagnostics) -> Self {
        Self { tree, diagnostics }
    }

    /// Skill directories under `root`, at most `max_depth` levels below it,
    /// sorted by path string.
    ///
    /// `root` itself is depth 0. A missing root yields an empty list.
    pub fn scan(&self, root: &Path, max_depth: usize) -> Vec<PathBuf> {
        if !self.tree.exists(root) {
            self.diagnostics
                .debug(&format!("Skills directory missing: {}", root.display()));
            return Vec::new();
        }

        let mut matches = Vec::new();
        self.visit(root, 0, max_depth, &mut matches);

        // Compare rendered strings, not components: "a-b" sorts before "a/b".
        matches.sort_by_cached_key(|path| path.to_string_lossy().into_owned());
        self.diagnostics.debug(&format!(
            "Found {} skills in {} (depth={})",
            matches.len(),
            root.display(),
            max_depth
        ));
        matches
    }

    fn visit(&self, dir: &Path, depth: usize, max_depth: usize, matches: &mut Vec<PathBuf>) {
        if self.tree.is_file(&dir.join(SKILL_FILE)) {
            matches.push(dir.to_path_buf());
        }
        if depth == max_depth {
            return;
        }

        let children = match self.tree.list_dir(dir) {
            Ok(children) => children,
            Err(e) => {
                self.diagnostics
                    .debug(&format!("Skipping {}: {}", dir.display(), e));
                return;
            }
        };

        for child in children {
            if self.tree.is_dir(&child) {
                self.visit(&child, depth + 1, max_depth, matches);
            }
        }
    }

    /// SKILL.md for `path`, which may be a skill directory or the marker file itself
    pub fn probe(&self, path: &Path) -> Option<PathBuf> {
        if self.tree.is_dir(path) {
            let skill_md = path.join(SKILL_FILE);
            if self.tree.exists(&skill_md) {
                self.diagnostics
                    .debug(&format!("Found {} in {}", SKILL_FILE, path.display()));
                return Some(skill_md);
            }
        }
        if self.tree.is_file(path) && path.file_name().is_some_and(|name| name == SKILL_FILE) {
            return Some(path.to_path_buf());
        }
        self.diagnostics
            .debug(&format!("{} not found at {}", SKILL_FILE, path.display()));
        None
    }
}
