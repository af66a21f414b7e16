//!
//! Connects masks with input fields.
//!
//! Any text field can be masked by implementing [MaskField].
//! [MaskBindings] keeps track of the masked fields. Fields are bound
//! explicitly, and for every change of a bound field the application
//! calls [MaskBindings::on_input].
//!
//! ```rust
//! use rat_automask::field::{MaskBindings, MaskField};
//! use rat_automask::upos_type;
//!
//! #[derive(Default)]
//! struct Phone {
//!     text: String,
//!     cursor: upos_type,
//! }
//!
//! impl MaskField for Phone {
//!     fn attr(&self, key: &str) -> Option<&str> {
//!         match key {
//!             "pattern" => Some("(00) 0000-0000"),
//!             _ => None,
//!         }
//!     }
//!     fn text(&self) -> &str {
//!         &self.text
//!     }
//!     fn set_text(&mut self, text: String) {
//!         self.text = text;
//!     }
//!     fn set_cursor(&mut self, cursor: upos_type) {
//!         self.cursor = cursor;
//!     }
//! }
//!
//! let mut phone = Phone::default();
//! let mut bindings = MaskBindings::new();
//! bindings.bind([("phone", &phone)]).expect("valid");
//!
//! phone.text.push_str("11");
//! bindings.on_input(&"phone", &mut phone);
//! assert_eq!(phone.text, "(11) 0000-0000");
//! assert_eq!(phone.cursor, 3);
//! ```
//!

use crate::mask_core::Rendered;
use crate::mask_spec::ATTR_KEYS;
use crate::{upos_type, MaskError, MaskSpec};
use log::debug;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// A text field that can be masked.
pub trait MaskField {
    /// Declared attribute of the field.
    /// See [MaskSpec::from_attrs] for the keys.
    fn attr(&self, key: &str) -> Option<&str>;

    /// Current text.
    fn text(&self) -> &str;

    /// Replace the text.
    fn set_text(&mut self, text: String);

    /// Set the cursor as grapheme position.
    fn set_cursor(&mut self, cursor: upos_type);
}

/// Reads the mask definition from the field attributes.
pub fn read_spec<F: MaskField + ?Sized>(field: &F) -> Result<Option<MaskSpec>, MaskError> {
    MaskSpec::from_attrs(
        ATTR_KEYS
            .iter()
            .filter_map(|key| field.attr(key).map(|value| (*key, value))),
    )
}

/// Removes prefix and suffix from the text, if they are there.
///
/// Digits in prefix or suffix would otherwise end up in the value.
pub fn strip_affixes<'a>(text: &'a str, prefix: &str, suffix: &str) -> &'a str {
    let text = text.strip_prefix(prefix).unwrap_or(text);
    text.strip_suffix(suffix).unwrap_or(text)
}

/// Run the mask for the current text of the field and
/// write text and cursor back.
pub fn mask_field<F: MaskField + ?Sized>(spec: &MaskSpec, field: &mut F) -> Rendered {
    let raw = strip_affixes(field.text(), &spec.prefix, &spec.suffix);
    let r = spec.render(raw);
    field.set_text(r.text.clone());
    field.set_cursor(r.cursor);
    r
}

/// Registry for masked fields.
///
/// The key identifies the field for the application.
#[derive(Debug, Clone)]
pub struct MaskBindings<K> {
    specs: HashMap<K, MaskSpec>,
}

impl<K> Default for MaskBindings<K> {
    fn default() -> Self {
        Self {
            specs: HashMap::new(),
        }
    }
}

impl<K> MaskBindings<K>
where
    K: Hash + Eq + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind all fields that declare a pattern.
    /// Fields without a pattern are skipped.
    ///
    /// If any field has an invalid mask definition nothing is bound.
    ///
    /// Returns the number of bound fields.
    pub fn bind<'f, F, I>(&mut self, fields: I) -> Result<usize, MaskError>
    where
        F: MaskField + ?Sized + 'f,
        I: IntoIterator<Item = (K, &'f F)>,
    {
        let mut specs = Vec::new();
        for (key, field) in fields {
            match read_spec(field)? {
                Some(spec) => specs.push((key, spec)),
                None => debug!("no pattern for {:?}, not masked", key),
            }
        }

        let n = specs.len();
        for (key, spec) in specs {
            self.bind_spec(key, spec);
        }
        Ok(n)
    }

    /// Bind a field with an explicit mask.
    /// Replaces any existing binding.
    pub fn bind_spec(&mut self, key: K, spec: MaskSpec) {
        debug!("bind {:?} {:?}", key, spec.pattern);
        self.specs.insert(key, spec);
    }

    /// Remove the binding.
    pub fn unbind(&mut self, key: &K) -> Option<MaskSpec> {
        self.specs.remove(key)
    }

    /// Remove all bindings.
    pub fn clear(&mut self) {
        self.specs.clear();
    }

    pub fn is_bound(&self, key: &K) -> bool {
        self.specs.contains_key(key)
    }

    /// Mask of a bound field.
    pub fn spec(&self, key: &K) -> Option<&MaskSpec> {
        self.specs.get(key)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// The text of the field has changed.
    ///
    /// Masks the field if it is bound.
    /// Returns true if the field has been updated.
    pub fn on_input<F: MaskField + ?Sized>(&self, key: &K, field: &mut F) -> bool {
        if let Some(spec) = self.specs.get(key) {
            mask_field(spec, field);
            true
        } else {
            false
        }
    }
}
