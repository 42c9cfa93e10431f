use std::collections::BTreeSet;

use inksac::prelude::*;

/// Colours input lines and messages; every method is a no-op when colour is
/// off or the terminal cannot show it.
#[derive(Debug, Clone)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
    known: BTreeSet<String>,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Splits `input` into alternating runs of whitespace and non-whitespace,
/// so joining the pieces gives back the input unchanged.
fn segments(input: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_space = None;
    for (i, c) in input.char_indices() {
        let space = c.is_whitespace();
        if in_space.is_some_and(|prev| prev != space) {
            out.push(&input[start..i]);
            start = i;
        }
        in_space = Some(space);
    }
    if start < input.len() {
        out.push(&input[start..]);
    }
    out
}

impl SyntaxHighlighter {
    pub fn new(color: bool) -> Self {
        let support = if color {
            check_color_support().unwrap_or(ColorSupport::NoColor)
        } else {
            ColorSupport::NoColor
        };
        Self {
            color_support: support,
            known: BTreeSet::new(),
        }
    }

    pub fn enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    /// Names that highlight as runnable commands.
    pub fn set_known<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        self.known = names.into_iter().map(str::to_string).collect();
    }

    pub fn highlight_command(&self, input: &str) -> String {
        if !self.enabled() {
            return input.to_string();
        }

        let command_style = Style::builder().foreground(Color::Cyan).bold().build();
        let unknown_style = Style::builder().foreground(Color::Red).build();
        let flag_style = Style::builder().foreground(Color::Yellow).build();
        let replay_style = Style::builder().foreground(Color::Magenta).build();

        let mut seen_command = false;
        let mut out = String::with_capacity(input.len());
        for segment in segments(input) {
            if segment.trim().is_empty() {
                out.push_str(segment);
                continue;
            }
            let styled = if !seen_command {
                seen_command = true;
                if segment.starts_with('!') {
                    segment.style(replay_style).to_string()
                } else if self.known.is_empty() || self.known.contains(segment) {
                    segment.style(command_style).to_string()
                } else {
                    segment.style(unknown_style).to_string()
                }
            } else if segment.starts_with('-') && segment.len() > 1 {
                segment.style(flag_style).to_string()
            } else {
                segment.to_string()
            };
            out.push_str(&styled);
        }
        out
    }

    pub fn highlight_error(&self, error: &str) -> String {
        if !self.enabled() {
            return error.to_string();
        }
        let error_style = Style::builder().foreground(Color::Red).bold().build();
        error.style(error_style).to_string()
    }

    pub fn highlight_hint(&self, hint: &str) -> String {
        if !self.enabled() {
            return hint.to_string();
        }
        let hint_style = Style::builder().foreground(Color::RGB(128, 128, 128)).build();
        hint.style(hint_style).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_round_trip() {
        let input = "  ls   -la\tsrc ";
        let parts = segments(input);
        assert_eq!(parts, ["  ", "ls", "   ", "-la", "\t", "src", " "]);
        assert_eq!(parts.concat(), input);
        assert!(segments("").is_empty());
    }

    #[test]
    fn test_plain_when_colour_off() {
        let highlighter = SyntaxHighlighter::new(false);
        assert!(!highlighter.enabled());
        assert_eq!(highlighter.highlight_command("ls  -l"), "ls  -l");
        assert_eq!(highlighter.highlight_error("error: x"), "error: x");
    }
}
