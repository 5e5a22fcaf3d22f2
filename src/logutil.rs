//! Log sanitization for player-entered text. Game input is arbitrary (the
//! pet-naming step accepts anything), so anything echoed into the logs is
//! flattened to a single bounded line first.

/// Longest input preview a single log line will carry.
const MAX_PREVIEW: usize = 200;

/// Flatten a string for single-line logging: newlines, tabs, and other
/// control characters become escapes, backslashes are doubled, and input
/// past [`MAX_PREVIEW`] characters is elided.
pub fn escape_log(s: &str) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 8);
    let mut chars = s.chars();
    for ch in chars.by_ref().take(MAX_PREVIEW) {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    if chars.next().is_some() {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape_log;

    #[test]
    fn escapes_newlines_and_tabs() {
        assert_eq!(escape_log("Line1\nLine2\r\tEnd"), "Line1\\nLine2\\r\\tEnd");
    }

    #[test]
    fn escapes_other_control_chars_as_hex() {
        assert_eq!(escape_log("a\u{7}b"), "a\\x07b");
    }

    #[test]
    fn truncates_long_input() {
        let esc = escape_log(&"x".repeat(500));
        assert!(esc.ends_with('…'));
        assert_eq!(esc.chars().count(), 201);
    }

    #[test]
    fn short_input_is_untouched() {
        assert_eq!(escape_log("Whiskers"), "Whiskers");
    }
}
