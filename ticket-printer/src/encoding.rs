//! Text layout and code page utilities for thermal printers
//!
//! Receipts are printed with the WPC1252 code page (ESC t 16), so every
//! character is emitted as exactly one byte and occupies one column.
//! This module provides utilities for:
//! - Measuring, truncating and padding strings to a column width
//! - Centering, right-aligning and word-wrapping receipt text
//! - Replacing control characters so input text cannot inject commands
//! - Converting UTF-8 text to Windows-1252 bytes

use tracing::instrument;

/// Get the printed width of a string in columns
pub fn text_width(s: &str) -> usize {
    s.chars().count()
}

/// Truncate a string to fit within a column width
pub fn truncate_width(s: &str, max_width: usize) -> String {
    s.chars().take(max_width).collect()
}

/// Pad a string to a specific column width
///
/// If the string is longer than the width, it will be truncated.
pub fn pad_width(s: &str, width: usize, align_right: bool) -> String {
    let current_width = text_width(s);
    if current_width >= width {
        return truncate_width(s, width);
    }
    let spaces = width - current_width;
    if align_right {
        format!("{}{}", " ".repeat(spaces), s)
    } else {
        format!("{}{}", s, " ".repeat(spaces))
    }
}

/// Right-align a string within a column width
pub fn align_right(s: &str, width: usize) -> String {
    pad_width(s, width, true)
}

/// Center a string within a column width
///
/// The left side gets `floor((width - len) / 2)` spaces and the right side
/// the remainder, so odd gaps put the extra space on the right.
pub fn center(s: &str, width: usize) -> String {
    let current_width = text_width(s);
    if current_width >= width {
        return truncate_width(s, width);
    }
    let gap = width - current_width;
    let left = gap / 2;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(gap - left))
}

/// Greedy word wrap at a column width
///
/// Words are never split; a single word wider than the page is hard
/// truncated onto its own line. Blank input yields no lines.
pub fn wrap_words(s: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in s.split_whitespace() {
        let word_width = text_width(word);
        if word_width > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(truncate_width(word, width));
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
        } else if text_width(&current) + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Replace control characters (C0, DEL, C1) with spaces
///
/// Receipt text must never carry line feeds or ESC/GS sequences of its own.
pub fn sanitize_text(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Convert UTF-8 text to Windows-1252 bytes
///
/// Characters without a single-byte mapping are replaced by `?` so the
/// one-byte-per-column invariant holds for any input. Control characters
/// become spaces.
#[instrument(level = "trace", skip(s))]
pub fn convert_to_cp1252(s: &str) -> Vec<u8> {
    let mut result = Vec::with_capacity(s.len());
    let mut buf = [0u8; 4];

    for c in s.chars() {
        if c.is_control() {
            result.push(b' ');
            continue;
        }
        if c.is_ascii() {
            result.push(c as u8);
            continue;
        }
        let (bytes, _, had_errors) = encoding_rs::WINDOWS_1252.encode(c.encode_utf8(&mut buf));
        if had_errors || bytes.len() != 1 {
            result.push(b'?');
        } else {
            result.extend_from_slice(&bytes);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("hello"), 5);
        assert_eq!(text_width("Almacén"), 7);
        assert_eq!(text_width("¡Gracias!"), 9);
    }

    #[test]
    fn test_truncate_width() {
        assert_eq!(truncate_width("hello world", 5), "hello");
        assert_eq!(truncate_width("añejo", 2), "añ");
        assert_eq!(truncate_width("hi", 5), "hi");
    }

    #[test]
    fn test_pad_width() {
        assert_eq!(pad_width("hi", 5, false), "hi   ");
        assert_eq!(pad_width("hi", 5, true), "   hi");
        assert_eq!(pad_width("hello world", 5, false), "hello");
    }

    #[test]
    fn test_center_even_gap() {
        // gap 4 -> 2 left, 2 right
        assert_eq!(center("abcd", 8), "  abcd  ");
    }

    #[test]
    fn test_center_odd_gap_extra_space_right() {
        // gap 5 -> 2 left, 3 right
        assert_eq!(center("abc", 8), "  abc   ");
    }

    #[test]
    fn test_center_truncates_overflow() {
        assert_eq!(center("abcdefghij", 4), "abcd");
        assert_eq!(center("abcd", 4), "abcd");
    }

    #[test]
    fn test_wrap_words_keeps_word_boundaries() {
        let lines = wrap_words("Av. Principal de Los Ruices, Edificio Sur", 16);
        assert_eq!(
            lines,
            vec!["Av. Principal de", "Los Ruices,", "Edificio Sur"]
        );
        assert!(lines.iter().all(|l| text_width(l) <= 16));
    }

    #[test]
    fn test_wrap_words_truncates_long_token() {
        let lines = wrap_words("ok supercalifragilistic end", 8);
        assert_eq!(lines, vec!["ok", "supercal", "end"]);
    }

    #[test]
    fn test_wrap_words_blank() {
        assert!(wrap_words("   ", 10).is_empty());
    }

    #[test]
    fn test_convert_to_cp1252() {
        assert_eq!(convert_to_cp1252("abc"), b"abc".to_vec());
        assert_eq!(convert_to_cp1252("¡é"), vec![0xA1, 0xE9]);
        assert_eq!(convert_to_cp1252("€"), vec![0x80]);
        // No single-byte mapping
        assert_eq!(convert_to_cp1252("中x"), b"?x".to_vec());
    }

    #[test]
    fn test_sanitize_text_replaces_controls() {
        assert_eq!(sanitize_text("ACME\nC.A.\x1DV\x00"), "ACME C.A. V ");
        assert_eq!(sanitize_text("a\tb\x7Fc\u{85}d"), "a b c d");
        assert_eq!(sanitize_text("Almacén ¡Sí!"), "Almacén ¡Sí!");
    }

    #[test]
    fn test_convert_to_cp1252_never_emits_controls() {
        assert_eq!(convert_to_cp1252("a\n\x1B@\x1DV\x00"), b"a  @ V ".to_vec());
        assert_eq!(convert_to_cp1252("\u{9B}x"), b" x".to_vec());
    }
}
