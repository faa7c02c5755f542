//! Raw response text → [`ContentSegment`] sequence.
//!
//! Pure and permissive: malformed markup degrades to a paragraph, nothing
//! here returns an error.
//!
//! # Classification order
//!
//! Text is first stripped of fenced code (replaced by opaque placeholders),
//! then split on blank lines. Each unit is classified by the first rule that
//! matches:
//!
//! | Rule | Trigger | Segment |
//! |------|---------|---------|
//! | a | code placeholder | `CodeBlock` (+ leftover `Paragraph`) |
//! | b | `\n- ` | `BulletList` |
//! | c | `\n1. ` | `NumberedList` |
//! | d | `</think>` | `ThoughtAnswer` |
//! | e | `Answer:` / `Solution:` | `ThoughtAnswer` with label |
//! | f | anything else | `Paragraph` |

use super::segment::{ContentSegment, DEFAULT_CODE_LANGUAGE};
use crate::prompt::style::{THINK_CLOSE, THINK_OPEN};
use regex::Regex;
use std::sync::LazyLock;

const PARAGRAPH_BREAK: &str = "\n\n";
const BULLET_MARKER: &str = "\n- ";
const NUMBERED_MARKER: &str = "\n1. ";
const ANSWER_LABELS: [&str; 2] = ["Answer:", "Solution:"];

// Private-use code points cannot collide with provider text.
const PLACEHOLDER_OPEN: char = '\u{E000}';
const PLACEHOLDER_CLOSE: char = '\u{E001}';

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```([\w+#.\-]*)[^\n`]*\n((?s:.*?))```").expect("code fence pattern is valid")
});

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("\u{E000}CODE_BLOCK_(\\d+)\u{E001}").expect("placeholder pattern is valid")
});

static NUMBERED_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\.\s+").expect("numbered prefix pattern is valid"));

/// A fenced block lifted out of the text during the first pass.
#[derive(Debug, Clone)]
struct CodeBlock {
    language: String,
    code: String,
}

/// Segment `text` into an ordered list of renderable blocks.
///
/// Calling this twice on the same input yields identical output. Empty or
/// whitespace-only input yields no segments.
///
/// # Examples
///
/// ```
/// use duochat_domain::formatting::{ContentSegment, format};
///
/// let segments = format("<think>reasoning here</think>final answer");
/// assert_eq!(
///     segments,
///     vec![ContentSegment::ThoughtAnswer {
///         thought: "reasoning here".to_string(),
///         label: None,
///         answer: "final answer".to_string(),
///     }]
/// );
/// ```
pub fn format(text: &str) -> Vec<ContentSegment> {
    let text = text.replace("\r\n", "\n");
    let (masked, blocks) = extract_code_blocks(&text);

    masked
        .split(PARAGRAPH_BREAK)
        .filter(|unit| !unit.trim().is_empty())
        .flat_map(|unit| classify(unit, &blocks))
        .collect()
}

/// Replace every closed fence with a placeholder token.
///
/// Unterminated fences do not match and stay in the text untouched.
fn extract_code_blocks(text: &str) -> (String, Vec<CodeBlock>) {
    let mut masked = String::with_capacity(text.len());
    let mut blocks = Vec::new();
    let mut last = 0;

    for caps in CODE_FENCE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let language = caps
            .get(1)
            .map(|m| m.as_str())
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_CODE_LANGUAGE);
        let code = caps.get(2).map(|m| m.as_str()).unwrap_or_default();

        masked.push_str(&text[last..whole.start()]);
        masked.push_str(&format!(
            "{}CODE_BLOCK_{}{}",
            PLACEHOLDER_OPEN,
            blocks.len(),
            PLACEHOLDER_CLOSE
        ));
        blocks.push(CodeBlock {
            language: language.to_string(),
            code: code.to_string(),
        });
        last = whole.end();
    }
    masked.push_str(&text[last..]);

    (masked, blocks)
}

fn classify(unit: &str, blocks: &[CodeBlock]) -> Vec<ContentSegment> {
    if PLACEHOLDER.is_match(unit) {
        return code_segments(unit, blocks);
    }
    if unit.contains(BULLET_MARKER) {
        return vec![bullet_list(unit)];
    }
    if unit.contains(NUMBERED_MARKER) {
        return vec![numbered_list(unit)];
    }
    if let Some((before, after)) = unit.split_once(THINK_CLOSE) {
        return vec![ContentSegment::ThoughtAnswer {
            thought: before.replace(THINK_OPEN, "").trim().to_string(),
            label: None,
            answer: after.trim().to_string(),
        }];
    }
    if let Some(segment) = labelled_answer(unit) {
        return vec![segment];
    }
    vec![ContentSegment::paragraph(unit)]
}

/// Rule a: code blocks in placeholder order, then whatever text remains.
fn code_segments(unit: &str, blocks: &[CodeBlock]) -> Vec<ContentSegment> {
    let mut segments: Vec<ContentSegment> = PLACEHOLDER
        .captures_iter(unit)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<usize>().ok())
        .filter_map(|idx| blocks.get(idx))
        .map(|block| ContentSegment::CodeBlock {
            language: block.language.clone(),
            code: block.code.clone(),
        })
        .collect();

    let leftover = PLACEHOLDER.replace_all(unit, "");
    let leftover = leftover.trim();
    if !leftover.is_empty() {
        segments.push(ContentSegment::paragraph(leftover));
    }
    segments
}

/// Rule b. A unit that itself starts with a marker has no heading.
fn bullet_list(unit: &str) -> ContentSegment {
    let mut parts = unit.split(BULLET_MARKER);
    let first = parts.next().unwrap_or_default();

    let (heading, mut items) = match first.trim_start().strip_prefix("- ") {
        Some(item) => (None, vec![item.trim().to_string()]),
        None => (non_empty(first), Vec::new()),
    };
    items.extend(
        parts
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string),
    );

    ContentSegment::BulletList { heading, items }
}

/// Rule c. The first line is the heading unless it is an item itself.
fn numbered_list(unit: &str) -> ContentSegment {
    let mut lines = unit.split('\n');
    let first = lines.next().unwrap_or_default();

    let (heading, mut items) = if NUMBERED_PREFIX.is_match(first) {
        (None, vec![strip_number(first)])
    } else {
        (non_empty(first), Vec::new())
    };
    items.extend(
        lines
            .filter(|line| !line.trim().is_empty())
            .map(strip_number),
    );

    ContentSegment::NumberedList { heading, items }
}

/// Rule e: split at whichever label occurs first.
fn labelled_answer(unit: &str) -> Option<ContentSegment> {
    let (pos, label) = ANSWER_LABELS
        .iter()
        .filter_map(|label| unit.find(label).map(|pos| (pos, *label)))
        .min_by_key(|(pos, _)| *pos)?;

    Some(ContentSegment::ThoughtAnswer {
        thought: unit[..pos].trim().to_string(),
        label: Some(label.to_string()),
        answer: unit[pos + label.len()..].trim().to_string(),
    })
}

fn strip_number(line: &str) -> String {
    NUMBERED_PREFIX.replace(line, "").trim().to_string()
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thought(thought: &str, label: Option<&str>, answer: &str) -> ContentSegment {
        ContentSegment::ThoughtAnswer {
            thought: thought.to_string(),
            label: label.map(str::to_string),
            answer: answer.to_string(),
        }
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(format("").is_empty());
        assert!(format("\n\n  \n\n").is_empty());
    }

    #[test]
    fn plain_paragraphs_keep_order() {
        let segments = format("first paragraph\n\nsecond paragraph");
        assert_eq!(
            segments,
            vec![
                ContentSegment::paragraph("first paragraph"),
                ContentSegment::paragraph("second paragraph"),
            ]
        );
    }

    #[test]
    fn fenced_code_is_extracted_verbatim() {
        let text = "```rust\nfn main() {\n\n    println!(\"hi\");\n}\n```";
        assert_eq!(
            format(text),
            vec![ContentSegment::CodeBlock {
                language: "rust".to_string(),
                code: "fn main() {\n\n    println!(\"hi\");\n}\n".to_string(),
            }]
        );
    }

    #[test]
    fn crlf_fence_is_extracted() {
        assert_eq!(
            format("```rust\r\nfn main() {}\r\n```"),
            vec![ContentSegment::CodeBlock {
                language: "rust".to_string(),
                code: "fn main() {}\n".to_string(),
            }]
        );
    }

    #[test]
    fn crlf_blank_line_splits_units() {
        assert_eq!(
            format("a\r\n\r\nb"),
            vec![ContentSegment::paragraph("a"), ContentSegment::paragraph("b")]
        );
    }

    #[test]
    fn fence_info_string_after_tag_is_ignored() {
        assert_eq!(
            format("```python title=\"x.py\"\nprint(1)\n```"),
            vec![ContentSegment::CodeBlock {
                language: "python".to_string(),
                code: "print(1)\n".to_string(),
            }]
        );
    }

    #[test]
    fn fence_without_tag_is_labelled_code() {
        let segments = format("```\nls -la\n```");
        assert_eq!(
            segments,
            vec![ContentSegment::CodeBlock {
                language: "code".to_string(),
                code: "ls -la\n".to_string(),
            }]
        );
    }

    #[test]
    fn fence_tag_may_contain_symbols() {
        let segments = format("```c++\nint x;\n```");
        assert!(matches!(
            &segments[0],
            ContentSegment::CodeBlock { language, .. } if language == "c++"
        ));
    }

    #[test]
    fn code_unit_leftover_becomes_trailing_paragraph() {
        let text = "Here is the loop:\n```python\nfor i in range(3):\n    print(i)\n```";
        assert_eq!(
            format(text),
            vec![
                ContentSegment::CodeBlock {
                    language: "python".to_string(),
                    code: "for i in range(3):\n    print(i)\n".to_string(),
                },
                ContentSegment::paragraph("Here is the loop:"),
            ]
        );
    }

    #[test]
    fn code_between_paragraphs_keeps_position() {
        let text = "Intro\n\n```sh\necho hi\n```\n\nOutro";
        let kinds: Vec<_> = format(text).iter().map(|s| s.kind()).collect();
        assert_eq!(kinds, vec!["paragraph", "code_block", "paragraph"]);
    }

    #[test]
    fn multiple_blocks_in_one_unit_are_all_emitted() {
        let text = "```a\n1\n```\n```b\n2\n```";
        let segments = format(text);
        assert_eq!(segments.len(), 2);
        assert!(matches!(
            &segments[1],
            ContentSegment::CodeBlock { language, code } if language == "b" && code == "2\n"
        ));
    }

    #[test]
    fn unterminated_fence_is_literal_paragraph() {
        let text = "```python\nprint(1)";
        assert_eq!(format(text), vec![ContentSegment::paragraph(text)]);
    }

    #[test]
    fn placeholder_lookalike_text_is_not_code() {
        let text = "[CODE_BLOCK_0] is just text";
        assert_eq!(format(text), vec![ContentSegment::paragraph(text)]);
    }

    #[test]
    fn bullet_list_with_heading() {
        assert_eq!(
            format("Steps:\n- a\n- b"),
            vec![ContentSegment::BulletList {
                heading: Some("Steps:".to_string()),
                items: vec!["a".to_string(), "b".to_string()],
            }]
        );
    }

    #[test]
    fn bullet_list_without_heading() {
        assert_eq!(
            format("- one\n- two"),
            vec![ContentSegment::BulletList {
                heading: None,
                items: vec!["one".to_string(), "two".to_string()],
            }]
        );
    }

    #[test]
    fn bullet_list_wins_over_answer_label() {
        let segments = format("Answer: the steps are\n- a\n- b");
        assert!(matches!(&segments[0], ContentSegment::BulletList { .. }));
    }

    #[test]
    fn numbered_list_strips_markers() {
        assert_eq!(
            format("Do this:\n1. first\n2. second\n10. tenth"),
            vec![ContentSegment::NumberedList {
                heading: Some("Do this:".to_string()),
                items: vec![
                    "first".to_string(),
                    "second".to_string(),
                    "tenth".to_string(),
                ],
            }]
        );
    }

    #[test]
    fn numbered_unit_starting_with_item_has_no_heading() {
        let segments = format("\n1. first\n2. second");
        assert_eq!(
            segments,
            vec![ContentSegment::NumberedList {
                heading: None,
                items: vec!["first".to_string(), "second".to_string()],
            }]
        );
    }

    #[test]
    fn think_delimiter_splits_thought_from_answer() {
        assert_eq!(
            format("<think>reasoning here</think>final answer"),
            vec![thought("reasoning here", None, "final answer")]
        );
    }

    #[test]
    fn think_delimiter_wins_over_answer_label() {
        assert_eq!(
            format("<think>work it out</think>Answer: 42"),
            vec![thought("work it out", None, "Answer: 42")]
        );
    }

    #[test]
    fn answer_label_fallback() {
        assert_eq!(
            format("some reasoning Answer: 42"),
            vec![thought("some reasoning", Some("Answer:"), "42")]
        );
    }

    #[test]
    fn earliest_label_is_used() {
        assert_eq!(
            format("Solution: use a map. Answer: done"),
            vec![thought("", Some("Solution:"), "use a map. Answer: done")]
        );
    }

    #[test]
    fn format_is_deterministic() {
        let text = "Intro\n\n```rs\nlet x = 1;\n```\n\nList:\n- a\n- b\n\n<think>t</think>a";
        assert_eq!(format(text), format(text));
    }
}
