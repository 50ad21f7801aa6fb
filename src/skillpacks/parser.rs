//! SKILL.md frontmatter parsing.
//!
//! The header is a loose `key: value` block between `---` lines, not YAML.
//! Only `name` and `description` are recognized and a malformed block never
//! fails: it degrades to whatever was collected.

const DELIMITER: &str = "---";

/// Parsed SKILL.md frontmatter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Shape of the leading metadata block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block<'a> {
    /// First line is not a delimiter
    Absent,
    /// Opening delimiter without a terminator line
    Unterminated,
    /// Well-formed block; `body` is everything after the terminator line
    Closed { body: &'a str },
}

fn is_delimiter(line: &str) -> bool {
    line.trim() == DELIMITER
}

/// Locate the metadata block without interpreting its contents
pub fn block(content: &str) -> Block<'_> {
    let mut lines = content.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return Block::Absent;
    };
    if !is_delimiter(first) {
        return Block::Absent;
    }

    let mut offset = first.len();
    for line in lines {
        offset += line.len();
        if is_delimiter(line) {
            return Block::Closed {
                body: &content[offset..],
            };
        }
    }
    Block::Unterminated
}

/// Parse the frontmatter of a SKILL.md document. Later keys overwrite earlier ones.
pub fn parse_frontmatter(content: &str) -> Frontmatter {
    let mut frontmatter = Frontmatter::default();
    let mut lines = content.lines();
    match lines.next() {
        Some(first) if is_delimiter(first) => {}
        _ => return frontmatter,
    }

    for line in lines {
        if is_delimiter(line) {
            break;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        let value = (!value.is_empty()).then(|| value.to_string());
        match key.trim() {
            "name" => frontmatter.name = value,
            "description" => frontmatter.description = value,
            _ => {}
        }
    }

    frontmatter
}

/// Body of a SKILL.md document with the frontmatter block removed.
///
/// Returns the input unchanged when there is no complete block.
pub fn strip_frontmatter(content: &str) -> &str {
    match block(content) {
        Block::Closed { body } => body,
        Block::Absent | Block::Unterminated => content,
    }
}
