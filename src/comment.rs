//! Head-comment synthesis.
//!
//! The renderer prefixes every comment line with `# `, but blank lines inside
//! a comment block would otherwise break the block apart. Internal blank
//! lines are therefore replaced with a lone `#` continuation marker, and the
//! same marker separates the description from the `Examples:` section.

use serde_json::Value;

use crate::render::scalar_text;

/// Marker line standing in for a blank line inside a comment block.
pub const CONTINUATION: &str = "#";

/// Build the comment text placed above a property key.
///
/// Empty input yields empty text (no comment at all). `wrap_width` of 0
/// disables word-wrapping of the description.
pub fn format_head_comment(
    description: Option<&str>,
    examples: &[Value],
    wrap_width: usize,
) -> String {
    let mut out = String::new();

    if let Some(description) = description.filter(|text| !text.is_empty()) {
        let wrapped = if wrap_width > 0 {
            word_wrap(description, wrap_width)
        } else {
            description.to_string()
        };
        // Blank lines are not preserved inside rendered comment blocks.
        out.push_str(&wrapped.replace("\n\n", &format!("\n{CONTINUATION}\n")));

        if !examples.is_empty() {
            out.push('\n');
            out.push_str(CONTINUATION);
            out.push('\n');
        }
    }

    if !examples.is_empty() {
        out.push_str("Examples:");
        for example in examples {
            out.push_str("\n- ");
            out.push_str(&scalar_text(example));
        }
    }

    out
}

/// Greedy word wrap at `width` columns, preserving existing line breaks.
/// Words longer than the width are kept whole on their own line.
pub fn word_wrap(text: &str, width: usize) -> String {
    let mut lines = Vec::new();

    for input_line in text.split('\n') {
        if input_line.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in input_line.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
            } else if current.chars().count() + 1 + word.chars().count() <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }
        lines.push(current);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_input_yields_empty_text() {
        assert_eq!(format_head_comment(None, &[], 80), "");
        assert_eq!(format_head_comment(Some(""), &[], 80), "");
    }

    #[test]
    fn description_only() {
        assert_eq!(format_head_comment(Some("The name"), &[], 80), "The name");
    }

    #[test]
    fn examples_only() {
        let examples = vec![json!("Coffee"), json!("Tea"), json!(null)];
        assert_eq!(
            format_head_comment(None, &examples, 80),
            "Examples:\n- Coffee\n- Tea\n- null"
        );
    }

    #[test]
    fn description_and_examples_are_separated_by_a_marker() {
        let examples = vec![json!(4.5)];
        assert_eq!(
            format_head_comment(Some("The price"), &examples, 80),
            "The price\n#\nExamples:\n- 4.5"
        );
    }

    #[test]
    fn internal_blank_lines_become_markers() {
        let text = format_head_comment(Some("first paragraph\n\nsecond paragraph"), &[], 0);
        assert_eq!(text, "first paragraph\n#\nsecond paragraph");
    }

    #[test]
    fn description_wraps_at_the_requested_width() {
        let text = format_head_comment(Some("one two three four five"), &[], 10);
        assert_eq!(text, "one two\nthree four\nfive");
    }

    #[test]
    fn zero_width_disables_wrapping() {
        let long = "word ".repeat(50);
        let text = format_head_comment(Some(long.trim_end()), &[], 0);
        assert!(!text.contains('\n'));
    }

    #[test]
    fn overlong_words_are_not_broken() {
        assert_eq!(word_wrap("supercalifragilistic ok", 5), "supercalifragilistic\nok");
    }
}
