//! Incoming payloads of the HTML forms and JSON endpoints.

pub mod catalog;
pub mod customers;
pub mod menu;
pub mod orders;
pub mod recipes;
pub mod waste;

/// Collapse whitespace runs and drop control characters.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

/// Sanitize every line, trim blank lines at both ends and keep at most one
/// blank line between paragraphs.
pub(crate) fn sanitize_multiline_text(input: &str) -> String {
    let mut result: Vec<String> = Vec::new();
    let mut previous_empty = true;

    for line in input.lines().map(sanitize_inline_text) {
        if line.is_empty() {
            if !previous_empty {
                result.push(String::new());
            }
            previous_empty = true;
        } else {
            result.push(line);
            previous_empty = false;
        }
    }

    while matches!(result.last(), Some(line) if line.is_empty()) {
        result.pop();
    }

    result.join("\n")
}

/// Sanitize optional text, mapping blank input to `None`.
pub(crate) fn optional_text(input: Option<&str>) -> Option<String> {
    input
        .map(sanitize_inline_text)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_text_collapses_whitespace() {
        assert_eq!(sanitize_inline_text("  Arroz \t  integral\u{7} "), "Arroz integral");
    }

    #[test]
    fn multiline_text_keeps_single_paragraph_breaks() {
        let input = "\n\n  Refogar  a cebola\n\n\n\nServir quente \n\n";
        assert_eq!(
            sanitize_multiline_text(input),
            "Refogar a cebola\n\nServir quente"
        );
    }

    #[test]
    fn optional_text_drops_blank_values() {
        assert_eq!(optional_text(Some("   ")), None);
        assert_eq!(optional_text(Some(" escola ")), Some("escola".to_string()));
        assert_eq!(optional_text(None), None);
    }
}
