//!
//! Applies a digit mask to the raw input.
//!
//! This is a pure transformation
//! `(pattern, digits, direction, prefix, suffix) -> (text, cursor)`
//! that is run anew for every change of the input.
//!
//! ```rust
//! use rat_automask::{apply, normalize, Direction};
//!
//! let digits = normalize("12/3", Direction::Forward);
//! let r = apply("00/00/____", &digits, Direction::Forward, "", "");
//! assert_eq!(r.text, "12/30");
//! assert_eq!(r.cursor, 4);
//! ```
//!
//! Positions are grapheme positions.
//!

use crate::mask_token::{leads_to_mandatory, parse_pattern, MaskChar};
use crate::{upos_type, Direction};
use std::cmp::min;
use unicode_segmentation::UnicodeSegmentation;

/// Result of applying the mask.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Prefix + masked value + suffix.
    pub text: String,
    /// Cursor position in graphemes, including the prefix.
    pub cursor: upos_type,
}

/// Only the ascii digits of the text.
pub(crate) fn only_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Extract the digits from some user input.
///
/// Zeros that can only be padding from a previous render are removed:
/// trailing zeros for [Direction::Forward], leading zeros for
/// [Direction::Backward].
pub fn normalize(raw: &str, direction: Direction) -> String {
    let mut digits = only_digits(raw);
    match direction {
        Direction::Forward => {
            let len = digits.trim_end_matches('0').len();
            digits.truncate(len);
            digits
        }
        Direction::Backward => {
            let skip = digits.len() - digits.trim_start_matches('0').len();
            digits.split_off(skip)
        }
    }
}

/// Apply the pattern to the digits.
///
/// The digits fill the placeholders `0` and `_` in order, literals are
/// copied. When the digits run out, the rest of the pattern is shown
/// as long as it leads up to another mandatory `0`.
///
/// For [Direction::Backward] the pattern is filled starting
/// from its end.
///
/// The cursor is placed at the first placeholder without a digit,
/// or before the suffix if there is none. Backward masks always
/// place the cursor before the suffix.
pub fn apply(
    pattern: &str,
    digits: &str,
    direction: Direction,
    prefix: &str,
    suffix: &str,
) -> Rendered {
    let mask = parse_pattern(pattern);
    let value = digits.graphemes(true).collect::<Vec<_>>();

    let (body, selection) = match direction {
        Direction::Forward => {
            let mask = mask.iter().collect::<Vec<_>>();
            fill(&mask, &value)
        }
        Direction::Backward => {
            let mask = mask.iter().rev().collect::<Vec<_>>();
            let value = value.iter().rev().copied().collect::<Vec<_>>();
            let (mut body, selection) = fill(&mask, &value);
            body.reverse();
            (body, selection)
        }
    };

    let mut text = String::with_capacity(
        prefix.len() + body.iter().map(|v| v.len()).sum::<usize>() + suffix.len(),
    );
    text.push_str(prefix);
    for s in &body {
        text.push_str(s);
    }
    text.push_str(suffix);

    let len = text.graphemes(true).count();
    let end = len.saturating_sub(suffix.graphemes(true).count());
    let cursor = match (selection, direction) {
        (Some(sel), Direction::Forward) => min(prefix.graphemes(true).count() + sel, len),
        _ => end,
    };

    Rendered {
        text,
        cursor: cursor as upos_type,
    }
}

/// Fills the mask left to right.
/// Returns the rendered graphemes and the first position without a digit.
fn fill<'a>(mask: &[&'a MaskChar], value: &[&'a str]) -> (Vec<&'a str>, Option<usize>) {
    let mut body = Vec::with_capacity(mask.len());
    let mut selection = if value.is_empty() { Some(0) } else { None };
    let mut value_pos = 0;

    for (i, &m) in mask.iter().enumerate() {
        if value_pos >= value.len() {
            if selection.is_none() {
                selection = Some(i);
            }
            if !m.is_mandatory() && !leads_to_mandatory(mask[i..].iter().copied()) {
                break;
            }
            body.push(m.symbol());
            continue;
        }

        if m.is_placeholder() {
            body.push(value[value_pos]);
            value_pos += 1;
        } else {
            body.push(m.symbol());
        }
    }

    (body, selection)
}
