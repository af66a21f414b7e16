//!
//! Definition of a digit mask.
//!
//! Can be constructed directly, with the builder functions, or from the
//! attributes declared for an input field:
//!
//! | key | |
//! |---|---|
//! | `pattern` | required, the mask. without a pattern the field is not masked. |
//! | `prefix` | text in front of the mask. |
//! | `suffix` | text after the mask. |
//! | `direction` | `forward` (default) or `backward` |
//!
//! With the feature `serde` the same keys are used for
//! (de)serialization.
//!

use crate::mask_core::{apply, normalize, Rendered};
use crate::mask_token::{parse_pattern, MaskChar};
use crate::{Direction, MaskError};

/// Attribute key for the pattern.
pub const ATTR_PATTERN: &str = "pattern";
/// Attribute key for the prefix.
pub const ATTR_PREFIX: &str = "prefix";
/// Attribute key for the suffix.
pub const ATTR_SUFFIX: &str = "suffix";
/// Attribute key for the direction.
pub const ATTR_DIRECTION: &str = "direction";

/// All the attribute keys.
pub const ATTR_KEYS: [&str; 4] = [ATTR_PATTERN, ATTR_PREFIX, ATTR_SUFFIX, ATTR_DIRECTION];

/// Mask definition.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct MaskSpec {
    /// `0` mandatory digit, `_` optional digit, everything else
    /// is a literal.
    pub pattern: String,
    /// Always shown before the value.
    #[cfg_attr(feature = "serde", serde(default))]
    pub prefix: String,
    /// Always shown after the value.
    #[cfg_attr(feature = "serde", serde(default))]
    pub suffix: String,
    /// Fill direction.
    #[cfg_attr(feature = "serde", serde(default))]
    pub direction: Direction,
}

impl MaskSpec {
    /// New mask with the given pattern.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Default::default()
        }
    }

    /// Text shown in front of the value.
    #[inline]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Text shown after the value.
    #[inline]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Fill direction.
    #[inline]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Reads the mask from field attributes.
    ///
    /// Unknown keys are ignored. An empty direction counts as
    /// the default.
    ///
    /// Returns None if there is no pattern.
    pub fn from_attrs<'a, I>(attrs: I) -> Result<Option<Self>, MaskError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut pattern = None;
        let mut spec = MaskSpec::default();

        for (key, value) in attrs {
            match key {
                ATTR_PATTERN => pattern = Some(value),
                ATTR_PREFIX => spec.prefix = value.into(),
                ATTR_SUFFIX => spec.suffix = value.into(),
                ATTR_DIRECTION => {
                    spec.direction = if value.is_empty() {
                        Direction::default()
                    } else {
                        value.parse()?
                    };
                }
                _ => {}
            }
        }

        let Some(pattern) = pattern else {
            return Ok(None);
        };
        spec.pattern = pattern.into();
        Ok(Some(spec))
    }

    /// The parsed pattern.
    pub fn tokens(&self) -> Vec<MaskChar> {
        parse_pattern(&self.pattern)
    }

    /// Extracts the digits from the raw input and applies the mask.
    pub fn render(&self, raw: &str) -> Rendered {
        let digits = normalize(raw, self.direction);
        self.render_digits(&digits)
    }

    /// Applies the mask to digits that have already been normalized.
    pub fn render_digits(&self, digits: &str) -> Rendered {
        apply(
            &self.pattern,
            digits,
            self.direction,
            &self.prefix,
            &self.suffix,
        )
    }
}
