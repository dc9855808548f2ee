//! ANSI text styling and fixed-width layout helpers.

use crate::value::MAX_STRING_LEN;

pub const RESET: &str = "\x1b[0m";

/// A named SGR style available as a one-argument builtin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub name: &'static str,
    pub code: u8,
}

const fn style(name: &'static str, code: u8) -> Style {
    Style { name, code }
}

pub const STYLES: &[Style] = &[
    // Foreground colours
    style("black", 30),
    style("red", 31),
    style("green", 32),
    style("yellow", 33),
    style("blue", 34),
    style("magenta", 35),
    style("cyan", 36),
    style("white", 37),
    style("bright_black", 90),
    style("bright_red", 91),
    style("bright_green", 92),
    style("bright_yellow", 93),
    style("bright_blue", 94),
    style("bright_magenta", 95),
    style("bright_cyan", 96),
    style("bright_white", 97),
    // Background colours
    style("bg_black", 40),
    style("bg_red", 41),
    style("bg_green", 42),
    style("bg_yellow", 43),
    style("bg_blue", 44),
    style("bg_magenta", 45),
    style("bg_cyan", 46),
    style("bg_white", 47),
    style("bg_bright_black", 100),
    style("bg_bright_red", 101),
    style("bg_bright_green", 102),
    style("bg_bright_yellow", 103),
    style("bg_bright_blue", 104),
    style("bg_bright_magenta", 105),
    style("bg_bright_cyan", 106),
    style("bg_bright_white", 107),
    // Attributes
    style("bold", 1),
    style("dim", 2),
    style("italic", 3),
    style("underline", 4),
    style("blink", 5),
    style("inverse", 7),
    style("hidden", 8),
    style("strikethrough", 9),
];

pub fn find(name: &str) -> Option<Style> {
    STYLES.iter().copied().find(|style| style.name == name)
}

impl Style {
    pub fn apply(self, text: &str) -> String {
        format!("\x1b[{}m{}{}", self.code, text, RESET)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn from_name(name: &str) -> Option<Alignment> {
        match name {
            "left" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" => Some(Alignment::Right),
            _ => None,
        }
    }
}

/// Characters that would be shown on a terminal, skipping `ESC [ ... m`.
pub fn visible_len(text: &str) -> usize {
    let mut count = 0;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            for inner in chars.by_ref() {
                if inner == 'm' {
                    break;
                }
            }
        } else {
            count += 1;
        }
    }
    count
}

/// Clamps a numeric width or count argument to `0..=MAX_STRING_LEN`.
pub fn clamp_width(width: f64) -> usize {
    if width.is_nan() || width <= 0.0 {
        0
    } else {
        (width as usize).min(MAX_STRING_LEN)
    }
}

/// Pads `text` with spaces to `width` visible characters.
pub fn align(alignment: Alignment, width: usize, text: &str) -> String {
    let padding = width.saturating_sub(visible_len(text));
    let (before, after) = match alignment {
        Alignment::Left => (0, padding),
        Alignment::Right => (padding, 0),
        Alignment::Center => (padding / 2, padding - padding / 2),
    };
    format!("{}{}{}", " ".repeat(before), text, " ".repeat(after))
}

/// Repeats the first character of `text`.
pub fn repeat(text: &str, count: usize) -> String {
    match text.chars().next() {
        Some(c) => std::iter::repeat(c).take(count).collect(),
        None => String::new(),
    }
}
