//! Discovery and loading of superpowers skills for Codex.
//!
//! Skills live in three scopes (project, personal, superpowers checkout).
//! The crate lists them, resolves a single skill by name with scope
//! precedence, and checks whether the superpowers checkout is behind its
//! remote-tracking branch by reading git refs straight from disk.

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod fs_tree;
pub mod git_refs;
pub mod skillpacks;
