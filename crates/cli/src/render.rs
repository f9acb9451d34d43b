use textwrap::{wrap, Options};
use tutor_core::llm::{Message, Role};
use unicode_width::UnicodeWidthStr;

use crate::strings::{PREFIX_ASSISTANT, PREFIX_USER};

pub const DEFAULT_WIDTH: usize = 100;

/// Terminal width from `COLUMNS`, else a fixed default.
pub fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|c| c.trim().parse::<usize>().ok())
        .filter(|w| *w > 0)
        .unwrap_or(DEFAULT_WIDTH)
}

/// Wraps a message under its role prefix; continuation lines are indented to
/// the prefix width. Code fences keep their line structure.
pub fn wrap_message(m: &Message, width: usize) -> Vec<String> {
    let prefix = match m.role {
        Role::User => PREFIX_USER,
        Role::Assistant | Role::System => PREFIX_ASSISTANT,
    };
    let width = width.max(UnicodeWidthStr::width(prefix) + 1);
    let indent = " ".repeat(UnicodeWidthStr::width(prefix));
    let mut out = Vec::new();
    let mut in_fence = false;
    for (i, line) in m.content.lines().enumerate() {
        let lead = if i == 0 { prefix } else { indent.as_str() };
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            out.push(format!("{}{}", lead, line));
            continue;
        }
        if in_fence || line.is_empty() {
            // Code is never re-flowed.
            out.push(format!("{}{}", lead, line).trim_end().to_string());
            continue;
        }
        let opts = Options::new(width)
            .initial_indent(lead)
            .subsequent_indent(&indent);
        out.extend(wrap(line, opts).into_iter().map(|c| c.into_owned()));
    }
    if out.is_empty() {
        out.push(prefix.trim_end().to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_text_wraps_under_prefix() {
        let m = Message::assistant("one two three four five six seven eight nine ten");
        let lines = wrap_message(&m, 20);
        assert!(lines.len() > 1);
        assert!(lines[0].starts_with("> "));
        for l in &lines[1..] {
            assert!(l.starts_with("  "));
            assert!(UnicodeWidthStr::width(l.as_str()) <= 20);
        }
    }

    #[test]
    fn code_fences_are_kept_verbatim() {
        let long = "x".repeat(50);
        let m = Message::assistant(format!("Try:\n```python\nprint('{long}')\n```"));
        let lines = wrap_message(&m, 20);
        assert_eq!(lines[1], "  ```python");
        assert_eq!(lines[2], format!("  print('{long}')"));
        assert_eq!(lines[3], "  ```");
    }

    #[test]
    fn user_prefix_and_empty_content() {
        assert_eq!(wrap_message(&Message::user("hi"), 80), vec!["| hi".to_string()]);
        assert_eq!(wrap_message(&Message::assistant(""), 80), vec![">".to_string()]);
    }
}
