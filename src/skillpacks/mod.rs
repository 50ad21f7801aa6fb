//! Skill Packs: SKILL.md bundles discovered across three scopes.
//!
//! A skill is a directory containing a SKILL.md file with an optional
//! frontmatter header. Skills are looked up in the project (`./.codex/skills`),
//! the user's home (`~/.codex/skills`) and the superpowers checkout
//! (`~/.codex/superpowers/skills`), in that order of precedence.

pub mod index;
pub mod parser;
pub mod query;
pub mod resolver;
pub mod scanner;

pub use index::{SkillEntry, SkillIndex};
pub use parser::Frontmatter;
pub use query::{Scope, SkillQuery};
pub use resolver::{LoadedSkill, ResolveError, SkillLocation, SkillResolver};
pub use scanner::SkillScanner;
