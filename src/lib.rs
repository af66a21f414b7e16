#![doc = include_str!("../readme.md")]
#![allow(clippy::collapsible_else_if)]

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod field;
pub mod mask_core;
pub mod mask_spec;
pub mod mask_token;
pub mod masked_input;

pub use mask_core::{apply, normalize, Rendered};
pub use mask_spec::MaskSpec;
pub use mask_token::{Direction, MaskChar};

pub mod event {
    //!
    //! Event-handler traits and the results of event-handling.
    //!

    pub use rat_event::*;

    /// Result of event handling.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    pub enum TextOutcome {
        /// The given event has not been used at all.
        #[default]
        Continue,
        /// The event has been recognized, but the result was nil.
        /// Further processing for this event may stop.
        Unchanged,
        /// The event has been recognized and there is some change
        /// due to it. The digits are the same.
        /// Further processing for this event may stop.
        /// Rendering the ui is advised.
        Changed,
        /// The digits have changed.
        TextChanged,
    }

    impl ConsumedEvent for TextOutcome {
        fn is_consumed(&self) -> bool {
            *self != TextOutcome::Continue
        }
    }

    // Useful for converting most navigation/edit results.
    impl From<bool> for TextOutcome {
        fn from(value: bool) -> Self {
            if value {
                TextOutcome::Changed
            } else {
                TextOutcome::Unchanged
            }
        }
    }

    impl From<Outcome> for TextOutcome {
        fn from(value: Outcome) -> Self {
            match value {
                Outcome::Continue => TextOutcome::Continue,
                Outcome::Unchanged => TextOutcome::Unchanged,
                Outcome::Changed => TextOutcome::Changed,
            }
        }
    }

    impl From<TextOutcome> for Outcome {
        fn from(value: TextOutcome) -> Self {
            match value {
                TextOutcome::Continue => Outcome::Continue,
                TextOutcome::Unchanged => Outcome::Unchanged,
                TextOutcome::Changed => Outcome::Changed,
                TextOutcome::TextChanged => Outcome::Changed,
            }
        }
    }
}

/// Errors from reading a mask definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskError {
    /// The direction is neither `forward` nor `backward`.
    InvalidDirection(String),
}

impl Display for MaskError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error for MaskError {}

/// Cursor/Column type.
#[allow(non_camel_case_types)]
pub type upos_type = u32;

mod _private {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct NonExhaustive;
}
