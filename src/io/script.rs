//! Edit scripts replayed by `condprob session`.
//!
//! ```text
//! # comment
//! base-rate 5          # field 0
//! sensitivity.1 95     # field 1 (second representation)
//! specificity.0        # empty text: an in-progress edit
//! test-result positive
//! ```

use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};

use crate::choice::TernaryChoice;
use crate::graph::PercentageKey;
use crate::session::Edit;

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    pub edit: Edit,
}

pub fn read_script(path: &Path) -> Result<Vec<ScriptLine>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    parse_script(&text).with_context(|| format!("invalid script {}", path.display()))
}

pub fn parse_script(text: &str) -> Result<Vec<ScriptLine>> {
    let mut lines = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let content = raw.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }
        let edit = parse_line(content).with_context(|| format!("line {}", line_no))?;
        lines.push(ScriptLine {
            line: line_no,
            edit,
        });
    }
    Ok(lines)
}

fn parse_line(content: &str) -> Result<Edit> {
    let (target, rest) = match content.split_once(char::is_whitespace) {
        Some((target, rest)) => (target, rest.trim()),
        None => (content, ""),
    };

    if target == "test-result" {
        if rest.is_empty() {
            bail!("test-result needs a choice");
        }
        let choice: TernaryChoice = rest.parse()?;
        return Ok(Edit::Select(choice));
    }

    let (name, field) = match target.split_once('.') {
        Some((name, index)) => {
            let field = index
                .parse::<usize>()
                .map_err(|_| anyhow!("invalid representation index '{}'", index))?;
            (name, field)
        }
        None => (target, 0),
    };
    let input: PercentageKey = name.parse()?;
    if rest.contains(char::is_whitespace) {
        bail!("percentage text must be a single token, got '{}'", rest);
    }
    Ok(Edit::Type {
        input,
        field,
        text: rest.to_string(),
    })
}
