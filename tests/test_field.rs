use rat_automask::field::{mask_field, read_spec, strip_affixes, MaskBindings, MaskField};
use rat_automask::{upos_type, Direction, MaskError, MaskSpec};
use std::collections::HashMap;

fn setup_logging() {
    _ = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}", record.level(), message))
        })
        .level(log::LevelFilter::Debug)
        .chain(std::io::stderr())
        .apply();
}

/// Simulates an input element with its attributes.
#[derive(Debug, Default)]
struct Input {
    attrs: HashMap<&'static str, &'static str>,
    text: String,
    cursor: upos_type,
}

impl Input {
    fn new(attrs: &[(&'static str, &'static str)]) -> Self {
        Self {
            attrs: attrs.iter().copied().collect(),
            ..Default::default()
        }
    }

    /// Typing at the cursor, as the text field would do it.
    fn type_str(&mut self, s: &str) {
        let pos = self
            .text
            .char_indices()
            .nth(self.cursor as usize)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len());
        self.text.insert_str(pos, s);
        self.cursor += s.chars().count() as upos_type;
    }
}

impl MaskField for Input {
    fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).copied()
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
    }

    fn set_cursor(&mut self, cursor: upos_type) {
        self.cursor = cursor;
    }
}

#[test]
fn test_strip_affixes() {
    assert_eq!(strip_affixes("+55 (11)", "+55 ", ""), "(11)");
    assert_eq!(strip_affixes("12 %", "", " %"), "12");
    assert_eq!(strip_affixes("$ 12 %", "$ ", " %"), "12");
    // partially deleted prefix stays
    assert_eq!(strip_affixes("+5 (11)", "+55 ", ""), "+5 (11)");
}

#[test]
fn test_read_spec() -> Result<(), anyhow::Error> {
    let input = Input::new(&[("pattern", "0,00"), ("direction", "backward")]);
    assert_eq!(
        read_spec(&input)?,
        Some(MaskSpec::new("0,00").direction(Direction::Backward))
    );

    let input = Input::new(&[("type", "text")]);
    assert_eq!(read_spec(&input)?, None);
    Ok(())
}

#[test]
fn test_mask_field() {
    let spec = MaskSpec::new("(00) 0000-0000").prefix("+55 ");
    let mut input = Input::new(&[]);

    input.type_str("1");
    let r = mask_field(&spec, &mut input);
    assert_eq!(input.text, "+55 (10) 0000-0000");
    assert_eq!(input.cursor, 6);
    assert_eq!(r.text, input.text);

    input.type_str("1");
    mask_field(&spec, &mut input);
    assert_eq!(input.text, "+55 (11) 0000-0000");
    assert_eq!(input.cursor, 7);

    input.type_str("9");
    mask_field(&spec, &mut input);
    assert_eq!(input.text, "+55 (11) 9000-0000");
    assert_eq!(input.cursor, 10);
}

#[test]
fn test_bindings() -> Result<(), anyhow::Error> {
    setup_logging();

    let mut phone = Input::new(&[("pattern", "(00) 0000-0000")]);
    let mut price = Input::new(&[
        ("pattern", "000.000,00"),
        ("prefix", "$ "),
        ("direction", "backward"),
    ]);
    let mut name = Input::new(&[("type", "text")]);

    let mut bindings = MaskBindings::new();
    let n = bindings.bind([("phone", &phone), ("price", &price), ("name", &name)])?;
    assert_eq!(n, 2);
    assert_eq!(bindings.len(), 2);
    assert!(bindings.is_bound(&"phone"));
    assert!(bindings.is_bound(&"price"));
    assert!(!bindings.is_bound(&"name"));
    assert_eq!(
        bindings.spec(&"price").map(|v| v.direction),
        Some(Direction::Backward)
    );

    phone.type_str("11");
    assert!(bindings.on_input(&"phone", &mut phone));
    assert_eq!(phone.text, "(11) 0000-0000");
    assert_eq!(phone.cursor, 3);

    price.text = "$ 000.000,00".into();
    price.cursor = 12;
    price.type_str("7");
    assert!(bindings.on_input(&"price", &mut price));
    assert_eq!(price.text, "$ 000.000,07");
    assert_eq!(price.cursor, 12);

    name.type_str("abc1");
    assert!(!bindings.on_input(&"name", &mut name));
    assert_eq!(name.text, "abc1");

    assert_eq!(
        bindings.unbind(&"phone"),
        Some(MaskSpec::new("(00) 0000-0000"))
    );
    assert!(!bindings.on_input(&"phone", &mut phone));
    assert_eq!(bindings.unbind(&"phone"), None);

    bindings.clear();
    assert!(bindings.is_empty());
    Ok(())
}

#[test]
fn test_bind_invalid() {
    setup_logging();

    let phone = Input::new(&[("pattern", "0000")]);
    let bad = Input::new(&[("pattern", "0000"), ("direction", "up")]);

    let mut bindings = MaskBindings::new();
    let r = bindings.bind([(1, &phone), (2, &bad)]);
    assert_eq!(r, Err(MaskError::InvalidDirection("up".into())));
    assert!(bindings.is_empty());

    bindings.bind_spec(3, MaskSpec::new("00"));
    assert!(bindings.is_bound(&3));
}
