//! Tag classification — routes one documentation tag onto a member.

use crate::analyzer::JsDocTag;
use crate::model::DocMember;

const FENCE: &str = "```";

/// Where a tag's text ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Description,
    SeeAlso,
    Example,
    Summary,
    Custom,
}

impl TagKind {
    /// Exact, case-sensitive match against the recognized aliases.
    pub fn classify(name: &str) -> Self {
        match name {
            "desc" | "description" | "remark" => TagKind::Description,
            "see" | "seeAlso" | "seealso" => TagKind::SeeAlso,
            "example" | "sample" | "demo" => TagKind::Example,
            "summary" => TagKind::Summary,
            _ => TagKind::Custom,
        }
    }
}

/// Apply one tag to `member`. Never fails: unknown names land in
/// `custom_tags`, overwriting an earlier tag of the same name.
pub fn apply_tag(member: &mut DocMember, tag: &JsDocTag, example_language: &str) {
    match TagKind::classify(&tag.name) {
        TagKind::Description => append_line(&mut member.description, &tag.text),
        TagKind::SeeAlso => member.see_also.push(tag.text.clone()),
        TagKind::Example => {
            let code = fence_example(&tag.text, example_language);
            append_line(&mut member.example, &code);
        }
        TagKind::Summary => {
            if member.summary.is_empty() {
                member.summary = tag.text.clone();
            } else {
                member.summary.push('\n');
                member.summary.push_str(&tag.text);
            }
        }
        TagKind::Custom => {
            member.custom_tags.insert(tag.name.clone(), tag.text.clone());
        }
    }
}

/// Wrap an example body in a code fence unless it already has one.
pub fn fence_example(body: &str, language: &str) -> String {
    if body.contains(FENCE) {
        body.to_string()
    } else {
        format!("\n{FENCE}{language}\n{body}\n{FENCE}\n")
    }
}

/// Newline-join onto an optional accumulator.
fn append_line(dest: &mut Option<String>, text: &str) {
    if let Some(existing) = dest.as_mut().filter(|e| !e.is_empty()) {
        existing.push('\n');
        existing.push_str(text);
        return;
    }
    *dest = Some(text.to_string());
}
