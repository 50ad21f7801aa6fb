//! Skill discovery across all scopes for listings.

use super::parser::parse_frontmatter;
use super::query::Scope;
use super::scanner::{SkillScanner, SKILL_FILE};
use crate::config::ScopePaths;
use crate::diagnostics::Diagnostics;
use crate::fs_tree::FileTree;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// A discovered skill, as shown in listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillEntry {
    /// Path relative to the scope root, `/`-separated
    pub name: String,
    pub description: Option<String>,
    pub path: PathBuf,
    pub scope: Scope,
}

impl SkillEntry {
    pub fn display_name(&self) -> String {
        self.scope.display_name(&self.name)
    }
}

/// Ordered index of all visible skills
#[derive(Debug, Default)]
pub struct SkillIndex {
    skills: Vec<SkillEntry>,
}

impl SkillIndex {
    /// Scan local, personal and superpowers scopes, in that order.
    ///
    /// A superpowers skill is hidden when a local or personal skill with the
    /// same relative name was found. Local and personal skills never hide
    /// each other.
    pub fn build(
        tree: &dyn FileTree,
        paths: &ScopePaths,
        diagnostics: &dyn Diagnostics,
    ) -> Self {
        let scanner = SkillScanner::new(tree, diagnostics);
        let mut index = SkillIndex::default();
        let mut overriding: HashSet<String> = HashSet::new();

        for scope in Scope::PRECEDENCE {
            let root = paths.skills_dir(scope);
            for dir in scanner.scan(root, scope.scan_depth()) {
                let name = relative_name(root, &dir);
                if scope == Scope::Superpowers {
                    if overriding.contains(&name) {
                        diagnostics.debug(&format!("Superpowers skill {} is overridden", name));
                        continue;
                    }
                } else {
                    overriding.insert(name.clone());
                }

                let description = read_description(tree, &dir, diagnostics);
                index.skills.push(SkillEntry {
                    name,
                    description,
                    path: dir,
                    scope,
                });
            }
        }

        index
    }

    /// All skills in listing order
    pub fn all(&self) -> impl Iterator<Item = &SkillEntry> {
        self.skills.iter()
    }

    /// Count of indexed skills
    pub fn count(&self) -> usize {
        self.skills.len()
    }
}

fn read_description(tree: &dyn FileTree, dir: &Path, diagnostics: &dyn Diagnostics) -> Option<String> {
    let skill_md = dir.join(SKILL_FILE);
    match tree.read_to_string(&skill_md) {
        Ok(content) => parse_frontmatter(&content).description,
        Err(e) => {
            diagnostics.warn(&format!("Failed to read {}: {}", skill_md.display(), e));
            None
        }
    }
}

/// `/`-joined path of `dir` below `root`; `.` for the root itself
fn relative_name(root: &Path, dir: &Path) -> String {
    let relative = dir.strip_prefix(root).unwrap_or(dir);
    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}
