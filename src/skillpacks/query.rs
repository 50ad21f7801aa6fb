//! Skill scopes and user-facing skill queries.

use std::fmt;
use std::path::PathBuf;

/// Prefix that pins a query to the superpowers scope
pub const SUPERPOWERS_PREFIX: &str = "superpowers:";

/// Conventional leading segment accepted (and ignored) in queries
const SKILLS_SEGMENT_PREFIX: &str = "skills/";

/// Where a skill lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Local,       // ./.codex/skills/
    Personal,    // ~/.codex/skills/
    Superpowers, // ~/.codex/superpowers/skills/
}

impl Scope {
    /// Lookup order for unscoped queries, highest priority first
    pub const PRECEDENCE: [Scope; 3] = [Scope::Local, Scope::Personal, Scope::Superpowers];

    /// How far below the scope root the listing looks for skills.
    /// Superpowers skills are flat; local and personal allow one grouping folder.
    pub fn scan_depth(self) -> usize {
        match self {
            Scope::Local | Scope::Personal => 2,
            Scope::Superpowers => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Local => "local",
            Scope::Personal => "personal",
            Scope::Superpowers => "superpowers",
        }
    }

    /// Name shown to users for a skill at `relative` within this scope
    pub fn display_name(self, relative: &str) -> String {
        match self {
            Scope::Superpowers => format!("{}{}", SUPERPOWERS_PREFIX, relative),
            Scope::Local | Scope::Personal => relative.to_string(),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed `use-skill` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillQuery {
    /// `brainstorming`
    Bare(String),
    /// `superpowers:brainstorming`; only the named scope is searched
    ScopeQualified(Scope, String),
    /// `group/my-skill`
    NestedPath(Vec<String>),
}

impl SkillQuery {
    /// Parse a raw skill argument. The scope marker is removed first, then
    /// a leading `skills/` segment.
    pub fn parse(raw: &str) -> Self {
        let (scope, rest) = match raw.strip_prefix(SUPERPOWERS_PREFIX) {
            Some(rest) => (Some(Scope::Superpowers), rest),
            None => (None, raw),
        };
        let rest = rest.strip_prefix(SKILLS_SEGMENT_PREFIX).unwrap_or(rest);

        match scope {
            Some(scope) => SkillQuery::ScopeQualified(scope, rest.to_string()),
            None if rest.contains('/') => SkillQuery::NestedPath(
                rest.split('/')
                    .filter(|segment| !segment.is_empty() && *segment != ".")
                    .map(String::from)
                    .collect(),
            ),
            None => SkillQuery::Bare(rest.to_string()),
        }
    }

    /// The name being looked up, after prefix stripping
    pub fn name(&self) -> String {
        match self {
            SkillQuery::Bare(name) | SkillQuery::ScopeQualified(_, name) => name.clone(),
            SkillQuery::NestedPath(segments) => segments.join("/"),
        }
    }

    /// Scope the query is pinned to, if any
    pub fn scope(&self) -> Option<Scope> {
        match self {
            SkillQuery::ScopeQualified(scope, _) => Some(*scope),
            SkillQuery::Bare(_) | SkillQuery::NestedPath(_) => None,
        }
    }

    /// Path relative to a scope root. `None` when a `..` segment would
    /// leave the scope.
    pub fn relative_path(&self) -> Option<PathBuf> {
        let name = self.name();
        let mut path = PathBuf::new();
        for segment in name.split('/') {
            match segment {
                "" | "." => continue,
                ".." => return None,
                segment => path.push(segment),
            }
        }
        Some(path)
    }
}
