//! Scope-precedence lookup of a single skill.

use super::parser::{block, parse_frontmatter, strip_frontmatter, Block, Frontmatter};
use super::query::{Scope, SkillQuery};
use super::scanner::SkillScanner;
use crate::config::ScopePaths;
use crate::diagnostics::Diagnostics;
use crate::fs_tree::FileTree;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Skill not found: {name}")]
    NotFound { name: String },
    #[error("{}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where a query matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillLocation {
    pub scope: Scope,
    /// Query name after prefix stripping
    pub name: String,
    /// The SKILL.md file
    pub file: PathBuf,
    /// Whether the query named its scope explicitly
    pub explicit: bool,
}

impl SkillLocation {
    pub fn display_name(&self) -> String {
        self.scope.display_name(&self.name)
    }

    /// Directory holding the skill's tools and reference files
    pub fn directory(&self) -> &Path {
        self.file.parent().unwrap_or(&self.file)
    }
}

/// Complete skill with frontmatter and body
#[derive(Debug, Clone)]
pub struct LoadedSkill {
    pub location: SkillLocation,
    pub frontmatter: Frontmatter,
    pub body: String,
}

impl LoadedSkill {
    /// Frontmatter name, falling back to the display name
    pub fn title(&self) -> String {
        self.frontmatter
            .name
            .clone()
            .unwrap_or_else(|| self.location.display_name())
    }
}

/// Resolves skill queries against the three scopes
pub struct SkillResolver<'a> {
    tree: &'a dyn FileTree,
    paths: &'a ScopePaths,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> SkillResolver<'a> {
    pub fn new(
        tree: &'a dyn FileTree,
        paths: &'a ScopePaths,
        diagnostics: &'a dyn Diagnostics,
    ) -> Self {
        Self {
            tree,
            paths,
            diagnostics,
        }
    }

    /// Find the SKILL.md a query refers to.
    ///
    /// A scope-qualified query only searches its own scope. Otherwise scopes
    /// are tried local, personal, superpowers and the first hit wins.
    pub fn locate(&self, query: &SkillQuery) -> Result<SkillLocation, ResolveError> {
        let name = query.name();
        let Some(relative) = query.relative_path() else {
            self.diagnostics
                .debug(&format!("Rejecting skill path outside its scope: {}", name));
            return Err(ResolveError::NotFound { name });
        };

        let pinned = query.scope().map(|scope| [scope]);
        let scopes: &[Scope] = match &pinned {
            Some(scope) => scope,
            None => &Scope::PRECEDENCE,
        };

        let scanner = SkillScanner::new(self.tree, self.diagnostics);
        for &scope in scopes {
            let base = self.paths.skills_dir(scope);
            if !self.tree.exists(base) {
                continue;
            }
            let target = if relative.as_os_str().is_empty() {
                base.to_path_buf()
            } else {
                base.join(&relative)
            };
            if let Some(file) = scanner.probe(&target) {
                self.diagnostics
                    .debug(&format!("Resolved {} to {} skill", name, scope));
                return Ok(SkillLocation {
                    scope,
                    name,
                    file,
                    explicit: pinned.is_some(),
                });
            }
        }

        Err(ResolveError::NotFound { name })
    }

    /// Read a located skill and split it into frontmatter and body
    pub fn load(&self, location: SkillLocation) -> Result<LoadedSkill, ResolveError> {
        let content = self
            .tree
            .read_to_string(&location.file)
            .map_err(|source| ResolveError::Unreadable {
                path: location.file.clone(),
                source,
            })?;

        if block(&content) == Block::Unterminated {
            self.diagnostics.debug(&format!(
                "Unterminated frontmatter in {}",
                location.file.display()
            ));
        }

        Ok(LoadedSkill {
            frontmatter: parse_frontmatter(&content),
            body: strip_frontmatter(&content).to_string(),
            location,
        })
    }

    pub fn resolve(&self, query: &SkillQuery) -> Result<LoadedSkill, ResolveError> {
        let location = self.locate(query)?;
        self.load(location)
    }
}
