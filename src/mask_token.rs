//!
//! Tokens of a digit mask and the fill direction.
//!
//! * `0`: mandatory digit, displayed as `0` while it has no value.
//! * `_`: optional digit, not displayed while it has no value.
//! * everything else is a literal and is displayed as is.
//!

use crate::MaskError;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use unicode_segmentation::UnicodeSegmentation;

/// Fill direction for the mask.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    /// Digits fill the mask from the left.
    /// Trailing zeros of the input are padding.
    #[default]
    Forward,
    /// Digits fill the mask from the right, the input is
    /// right-aligned against the end of the mask.
    /// Leading zeros of the input are padding.
    Backward,
}

/// One char of the mask.
#[allow(variant_size_differences)]
#[derive(Clone, PartialEq, Eq)]
pub enum MaskChar {
    /// 0-9, display 0
    Digit0,
    /// 0-9, display nothing
    Digit,
    /// Displayed verbatim.
    Literal(Box<str>),
}

impl Direction {
    /// Name as used for the `direction` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Direction {
    type Err = MaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("forward") {
            Ok(Direction::Forward)
        } else if s.eq_ignore_ascii_case("backward") {
            Ok(Direction::Backward)
        } else {
            Err(MaskError::InvalidDirection(s.into()))
        }
    }
}

impl Display for MaskChar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl Debug for MaskChar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MaskChar::Digit0 => write!(f, "0"),
            MaskChar::Digit => write!(f, "_"),
            MaskChar::Literal(s) => {
                write!(f, "\\")?;
                write!(f, "{}", s)
            }
        }
    }
}

impl MaskChar {
    /// Takes a digit.
    #[inline]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, MaskChar::Digit0 | MaskChar::Digit)
    }

    /// Is shown even without a digit.
    #[inline]
    pub fn is_mandatory(&self) -> bool {
        *self == MaskChar::Digit0
    }

    /// The char as written in the pattern.
    #[inline]
    pub fn symbol(&self) -> &str {
        match self {
            MaskChar::Digit0 => "0",
            MaskChar::Digit => "_",
            MaskChar::Literal(s) => s.as_ref(),
        }
    }
}

/// Split the pattern into mask tokens, one per grapheme.
pub fn parse_pattern(pattern: &str) -> Vec<MaskChar> {
    pattern
        .graphemes(true)
        .map(|g| match g {
            "0" => MaskChar::Digit0,
            "_" => MaskChar::Digit,
            s => MaskChar::Literal(Box::from(s)),
        })
        .collect()
}

/// Does the run starting at the mask position still lead up
/// to a mandatory digit?
///
/// Literals are skipped, the first placeholder decides.
pub(crate) fn leads_to_mandatory<'a>(mask: impl IntoIterator<Item = &'a MaskChar>) -> bool {
    for m in mask {
        match m {
            MaskChar::Digit0 => return true,
            MaskChar::Digit => return false,
            MaskChar::Literal(_) => {}
        }
    }
    false
}

/// Mask position after the n-th placeholder.
pub(crate) fn placeholder_end(mask: &[MaskChar], n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let mut count = 0;
    for (i, m) in mask.iter().enumerate() {
        if m.is_placeholder() {
            count += 1;
            if count == n {
                return i + 1;
            }
        }
    }
    mask.len()
}
