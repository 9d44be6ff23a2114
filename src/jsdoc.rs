//! `/** ... */` documentation comment parser.
//!
//! Splits a block comment into its lead text and an ordered tag list, the
//! same split a TypeScript checker performs before handing tags to the
//! extractor:
//!
//! ```text
//! /**
//!  * Lead text, possibly spanning
//!  * several lines.
//!  * @param a first operand
//!  * @example
//!  * add(1, 2)
//!  */
//! ```

use crate::analyzer::JsDocTag;
use regex::Regex;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

static RE_GUTTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[[:blank:]]*\*?[[:blank:]]?").unwrap());

static RE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[[:blank:]]*@([A-Za-z_][A-Za-z0-9_-]*)(?:[[:blank:]]+(.*))?$").unwrap());

static RE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[[:blank:]]*```").unwrap());

// `{type} name text`, `[name=default] - text`
static RE_NAMED_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?:\{[^}]*\}[[:space:]]*)?\[?([A-Za-z_$][A-Za-z0-9_$.]*)(?:=[^\]]*)?\]?(?:[[:space:]]+(?:-[[:space:]]+)?(.*))?$")
        .unwrap()
});

static RE_TYPE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\{[^}]*\}[[:space:]]*(.*)$").unwrap());

// -- Public API ---------------------------------------------------------------

/// A parsed documentation comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
    /// Text before the first tag, trimmed.
    pub summary: String,
    /// Tags in written order.
    pub tags: Vec<JsDocTag>,
}

impl DocComment {
    /// Description of the parameter `name` from its `@param` tag.
    pub fn param(&self, name: &str) -> Option<String> {
        self.named_tag(&["param", "arg", "argument"], name)
    }

    /// Description of the type parameter `name` from its `@template` tag.
    pub fn template(&self, name: &str) -> Option<String> {
        self.named_tag(&["template", "typeparam"], name)
    }

    /// Text of the first `@returns` / `@return` tag, without a `{type}` prefix.
    pub fn returns(&self) -> Option<String> {
        let tag = self
            .tags
            .iter()
            .find(|t| t.name == "returns" || t.name == "return")?;
        Some(strip_type_prefix(&tag.text))
    }

    fn named_tag(&self, names: &[&str], name: &str) -> Option<String> {
        self.tags
            .iter()
            .filter(|t| names.contains(&t.name.as_str()))
            .find_map(|t| {
                let caps = RE_NAMED_TAG.captures(&t.text)?;
                if &caps[1] != name {
                    return None;
                }
                Some(caps.get(2).map(|m| m.as_str().trim().to_string()).unwrap_or_default())
            })
    }
}

/// Parse a raw comment. Input without the `/**` opener is treated as
/// already-stripped comment text.
pub fn parse(raw: &str) -> DocComment {
    let trimmed = raw.trim();
    let (body, block) = match trimmed.strip_prefix("/**") {
        Some(rest) => (rest.strip_suffix("*/").unwrap_or(rest), true),
        None => (trimmed, false),
    };

    let mut summary = String::new();
    let mut tags: Vec<(String, String)> = Vec::new();
    let mut in_fence = false;

    for line in body.lines() {
        let line = if block {
            RE_GUTTER.replace(line, "").into_owned()
        } else {
            line.to_string()
        };

        if !in_fence {
            if let Some(caps) = RE_TAG.captures(&line) {
                let text = caps.get(2).map(|m| m.as_str()).unwrap_or("");
                if toggles_fence(text) {
                    in_fence = true;
                }
                tags.push((caps[1].to_string(), text.to_string()));
                continue;
            }
        }

        if toggles_fence(&line) {
            in_fence = !in_fence;
        }

        match tags.last_mut() {
            Some((_, text)) => concat_line(text, &line),
            None => concat_line(&mut summary, &line),
        }
    }

    DocComment {
        summary: summary.trim().to_string(),
        tags: tags
            .into_iter()
            .map(|(name, text)| JsDocTag::new(name, text.trim()))
            .collect(),
    }
}

// -- Helper functions ---------------------------------------------------------

/// A line starting with a fence flips the fence state, unless the same line
/// closes it again.
fn toggles_fence(line: &str) -> bool {
    RE_FENCE.is_match(line) && line.matches("```").count() % 2 == 1
}

/// Append `line` on a new line, keeping blank lines inside a body.
fn concat_line(dest: &mut String, line: &str) {
    if dest.is_empty() && line.trim().is_empty() {
        return;
    }
    if !dest.is_empty() {
        dest.push('\n');
    }
    dest.push_str(line.trim_end());
}

fn strip_type_prefix(text: &str) -> String {
    match RE_TYPE_PREFIX.captures(text) {
        Some(caps) => caps[1].trim().to_string(),
        None => text.trim().to_string(),
    }
}
