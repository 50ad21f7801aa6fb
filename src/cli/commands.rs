//! Output of the `find-skills`, `use-skill` and `bootstrap` commands.
//!
//! Missing skills and unreadable files are reported inline; none of these
//! commands fail on them.

use super::Context;
use crate::git_refs::has_upstream_update;
use crate::skillpacks::{ResolveError, SkillIndex, SkillQuery, SkillResolver};
use std::io::{self, Write};

const RULE: &str = "# ============================================";

/// List available skills from local, personal and superpowers directories
pub fn find_skills(ctx: &Context<'_>, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Available skills:")?;
    writeln!(out, "==================")?;
    writeln!(out)?;

    let index = SkillIndex::build(ctx.tree, &ctx.paths, ctx.diagnostics);
    for skill in index.all() {
        writeln!(out, "{}", skill.display_name())?;
        if let Some(description) = &skill.description {
            writeln!(out, "  {}", description)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "Usage:")?;
    writeln!(out, "  superpowers-codex use-skill <skill-name>   # Load a specific skill")?;
    writeln!(out)?;
    writeln!(out, "Skill naming:")?;
    writeln!(
        out,
        "  Superpowers skills: superpowers:skill-name (from ~/.codex/superpowers/skills/)"
    )?;
    writeln!(out, "  Personal skills: skill-name (from ~/.codex/skills/)")?;
    writeln!(out, "  Local skills: skill-name (from ./.codex/skills/)")?;
    writeln!(out, "  Personal skills override superpowers skills when names match.")?;
    writeln!(out)?;
    writeln!(out, "Note: All skills are disclosed at session start via bootstrap.")?;
    ctx.diagnostics
        .debug(&format!("Listed {} skills", index.count()));
    Ok(())
}

/// Load and display the requested skill
pub fn use_skill(ctx: &Context<'_>, skill: Option<&str>, out: &mut dyn Write) -> io::Result<()> {
    let Some(raw) = skill.filter(|raw| !raw.is_empty()) else {
        return use_skill_usage(out);
    };

    let query = SkillQuery::parse(raw);
    let resolver = SkillResolver::new(ctx.tree, &ctx.paths, ctx.diagnostics);

    let location = match resolver.locate(&query) {
        Ok(location) => location,
        Err(e) => {
            writeln!(out, "Error: {}", e)?;
            writeln!(out)?;
            writeln!(out, "Available skills:")?;
            return find_skills(ctx, out);
        }
    };

    if !location.explicit {
        writeln!(
            out,
            "# Loading {} skill: {}",
            location.scope,
            location.display_name()
        )?;
        writeln!(out, "# Source: {}", location.file.display())?;
        writeln!(out)?;
    }

    let skill = match resolver.load(location) {
        Ok(skill) => skill,
        Err(e @ ResolveError::Unreadable { .. }) => {
            ctx.diagnostics
                .warn(&format!("Error reading skill file: {}", e));
            return writeln!(out, "Error reading skill file: {}", e);
        }
        Err(e) => return writeln!(out, "Error: {}", e),
    };

    writeln!(out, "# {}", skill.title())?;
    if let Some(description) = &skill.frontmatter.description {
        writeln!(out, "# {}", description)?;
    }
    writeln!(
        out,
        "# Skill-specific tools and reference files live in {}",
        skill.location.directory().display()
    )?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)?;
    writeln!(out, "{}", skill.body)
}

fn use_skill_usage(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Usage: superpowers-codex use-skill <skill-name>")?;
    writeln!(out, "Examples:")?;
    writeln!(
        out,
        "  superpowers-codex use-skill superpowers:brainstorming  # Load superpowers skill"
    )?;
    writeln!(
        out,
        "  superpowers-codex use-skill brainstorming              # Load local/personal skill (or superpowers if not found)"
    )?;
    writeln!(
        out,
        "  superpowers-codex use-skill my-custom-skill            # Load personal skill"
    )
}

/// Update check, bootstrap instructions, skill listing and auto-load of the
/// bootstrap skill
pub fn bootstrap(ctx: &Context<'_>, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "# Superpowers Bootstrap for Codex")?;
    writeln!(out, "# ================================")?;
    writeln!(out)?;

    if has_upstream_update(ctx.tree, &ctx.paths.superpowers_repo_dir, ctx.diagnostics) {
        writeln!(out, "## Update Available")?;
        writeln!(out)?;
        writeln!(out, "⚠️  Your superpowers installation is behind the latest version.")?;
        writeln!(
            out,
            "To update, run: `cd {} && git pull`",
            ctx.paths.superpowers_repo_dir.display()
        )?;
        writeln!(out)?;
        writeln!(out, "---")?;
        writeln!(out)?;
    }

    if ctx.tree.exists(&ctx.paths.bootstrap_file) {
        writeln!(out, "## Bootstrap Instructions:")?;
        writeln!(out)?;
        match ctx.tree.read_to_string(&ctx.paths.bootstrap_file) {
            Ok(content) => writeln!(out, "{}", content)?,
            Err(e) => {
                ctx.diagnostics
                    .warn(&format!("Error reading bootstrap file: {}", e));
                writeln!(out, "Error reading bootstrap file: {}", e)?;
            }
        }
        writeln!(out)?;
        writeln!(out, "---")?;
        writeln!(out)?;
    }

    writeln!(out, "## Available Skills:")?;
    writeln!(out)?;
    find_skills(ctx, out)?;

    writeln!(out)?;
    writeln!(out, "---")?;
    writeln!(out)?;

    let bootstrap_skill = ctx.config.bootstrap_skill();
    writeln!(out, "## Auto-loading {} skill:", bootstrap_skill)?;
    writeln!(out)?;
    use_skill(ctx, Some(bootstrap_skill), out)?;

    writeln!(out)?;
    writeln!(out, "---")?;
    writeln!(out)?;
    writeln!(out, "# Bootstrap Complete!")?;
    writeln!(out, "# You now have access to all superpowers skills.")?;
    writeln!(
        out,
        "# Use \"superpowers-codex use-skill <skill>\" to load and apply skills."
    )?;
    writeln!(out, "# Remember: If a skill applies to your task, you MUST use it!")
}

/// Banner printed when no subcommand is given
pub fn usage(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Superpowers for Codex")?;
    writeln!(out, "Usage:")?;
    writeln!(
        out,
        "  superpowers-codex bootstrap              # Run complete bootstrap with all skills"
    )?;
    writeln!(out, "  superpowers-codex use-skill <skill-name> # Load a specific skill")?;
    writeln!(out, "  superpowers-codex find-skills            # List all available skills")?;
    writeln!(out)?;
    writeln!(out, "Examples:")?;
    writeln!(out, "  superpowers-codex bootstrap")?;
    writeln!(out, "  superpowers-codex use-skill superpowers:brainstorming")?;
    writeln!(out, "  superpowers-codex use-skill my-custom-skill")
}
