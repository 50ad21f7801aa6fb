use crate::diagnostics::Diagnostics;
use crate::fs_tree::FileTree;
use crate::skillpacks::Scope;
use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Skill auto-loaded by `bootstrap` unless configured otherwise
pub const DEFAULT_BOOTSTRAP_SKILL: &str = "using-superpowers";

const CODEX_DIR: &str = ".codex";
const CONFIG_FILE: &str = "superpowers-codex.toml";

/// Directories every command works from. Built once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopePaths {
    pub home_dir: PathBuf,
    pub local_skills_dir: PathBuf,
    pub personal_skills_dir: PathBuf,
    pub superpowers_skills_dir: PathBuf,
    pub superpowers_repo_dir: PathBuf,
    pub bootstrap_file: PathBuf,
}

impl ScopePaths {
    /// Default layout: skills under `<cwd>/.codex`, `<home>/.codex` and
    /// the superpowers checkout at `<home>/.codex/superpowers`
    pub fn new(home: &Path, cwd: &Path) -> Self {
        let repo = home.join(CODEX_DIR).join("superpowers");
        Self::with_repo(home, cwd, repo)
    }

    fn with_repo(home: &Path, cwd: &Path, repo: PathBuf) -> Self {
        Self {
            home_dir: home.to_path_buf(),
            local_skills_dir: cwd.join(CODEX_DIR).join("skills"),
            personal_skills_dir: home.join(CODEX_DIR).join("skills"),
            superpowers_skills_dir: repo.join("skills"),
            bootstrap_file: repo.join(CODEX_DIR).join("superpowers-bootstrap.md"),
            superpowers_repo_dir: repo,
        }
    }

    /// Root directory holding the skills of a scope
    pub fn skills_dir(&self, scope: Scope) -> &Path {
        match scope {
            Scope::Local => &self.local_skills_dir,
            Scope::Personal => &self.personal_skills_dir,
            Scope::Superpowers => &self.superpowers_skills_dir,
        }
    }
}

/// Optional settings from `superpowers-codex.toml`
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Superpowers checkout; `~/` is expanded against the home directory
    #[serde(default)]
    pub superpowers_dir: Option<String>,
    /// Skill loaded at the end of `bootstrap`
    #[serde(default)]
    pub bootstrap_skill: Option<String>,
}

impl Config {
    /// Load configuration from default paths
    /// Priority: project (.codex/superpowers-codex.toml) > user (~/.codex/superpowers-codex.toml)
    ///
    /// Unreadable or malformed files are reported and skipped.
    pub fn load(
        tree: &dyn FileTree,
        home: &Path,
        cwd: &Path,
        diagnostics: &dyn Diagnostics,
    ) -> Self {
        let mut config = Config::default();

        let candidates = [
            home.join(CODEX_DIR).join(CONFIG_FILE),
            cwd.join(CODEX_DIR).join(CONFIG_FILE),
        ];
        for path in candidates {
            if !tree.is_file(&path) {
                continue;
            }
            match Self::load_from(tree, &path) {
                Ok(layer) => {
                    diagnostics.debug(&format!("Loaded config {}", path.display()));
                    config.merge(layer);
                }
                Err(e) => {
                    diagnostics.warn(&format!("Ignoring config {}: {}", path.display(), e));
                }
            }
        }

        config
    }

    /// Load configuration from a specific path
    pub fn load_from(tree: &dyn FileTree, path: &Path) -> Result<Self> {
        let content = tree.read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes priority)
    pub fn merge(&mut self, other: Config) {
        if other.superpowers_dir.is_some() {
            self.superpowers_dir = other.superpowers_dir;
        }
        if other.bootstrap_skill.is_some() {
            self.bootstrap_skill = other.bootstrap_skill;
        }
    }

    /// Scope paths for this invocation
    pub fn scope_paths(&self, home: &Path, cwd: &Path) -> ScopePaths {
        match &self.superpowers_dir {
            Some(dir) => ScopePaths::with_repo(home, cwd, expand_home(dir, home)),
            None => ScopePaths::new(home, cwd),
        }
    }

    pub fn bootstrap_skill(&self) -> &str {
        self.bootstrap_skill
            .as_deref()
            .unwrap_or(DEFAULT_BOOTSTRAP_SKILL)
    }
}

fn expand_home(dir: &str, home: &Path) -> PathBuf {
    if dir == "~" {
        return home.to_path_buf();
    }
    match dir.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => PathBuf::from(dir),
    }
}
