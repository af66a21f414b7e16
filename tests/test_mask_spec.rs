use rat_automask::{Direction, MaskChar, MaskError, MaskSpec};

#[test]
fn test_builder() {
    let spec = MaskSpec::new("000.000,00")
        .prefix("$ ")
        .direction(Direction::Backward);
    assert_eq!(spec.pattern, "000.000,00");
    assert_eq!(spec.prefix, "$ ");
    assert_eq!(spec.suffix, "");
    assert_eq!(spec.direction, Direction::Backward);

    let r = spec.render("$ 12345");
    assert_eq!(r.text, "$ 000.123,45");
    assert_eq!(r.cursor, 12);
}

#[test]
fn test_render() {
    let spec = MaskSpec::new("0000-0000");
    let r = spec.render("12a34");
    assert_eq!(r.text, "1234-0000");
    assert_eq!(r.cursor, 4);

    // trailing zeros are padding
    let r = spec.render("1234-0000");
    assert_eq!(r.text, "1234-0000");
    assert_eq!(r.cursor, 4);

    let r = spec.render_digits("12340");
    assert_eq!(r.text, "1234-0000");
    assert_eq!(r.cursor, 6);
}

#[test]
fn test_tokens() {
    let spec = MaskSpec::new("0_-");
    assert_eq!(
        spec.tokens(),
        vec![
            MaskChar::Digit0,
            MaskChar::Digit,
            MaskChar::Literal("-".into())
        ]
    );
}

#[test]
fn test_from_attrs() -> Result<(), anyhow::Error> {
    let spec = MaskSpec::from_attrs([
        ("pattern", "(00) 0000-0000"),
        ("prefix", "+55 "),
        ("class", "phone"),
    ])?;
    assert_eq!(
        spec,
        Some(MaskSpec::new("(00) 0000-0000").prefix("+55 "))
    );

    let spec = MaskSpec::from_attrs([("pattern", "0,00"), ("direction", "BACKWARD")])?;
    assert_eq!(spec.map(|v| v.direction), Some(Direction::Backward));

    let spec = MaskSpec::from_attrs([("pattern", "0,00"), ("direction", "")])?;
    assert_eq!(spec.map(|v| v.direction), Some(Direction::Forward));

    let spec = MaskSpec::from_attrs([("pattern", ""), ("suffix", " %")])?;
    assert_eq!(spec, Some(MaskSpec::new("").suffix(" %")));

    Ok(())
}

#[test]
fn test_from_attrs_disabled() {
    assert_eq!(MaskSpec::from_attrs([("prefix", "x")]), Ok(None));
    assert_eq!(MaskSpec::from_attrs(Vec::<(&str, &str)>::new()), Ok(None));
}

#[test]
fn test_from_attrs_invalid() {
    let r = MaskSpec::from_attrs([("pattern", "00"), ("direction", "up")]);
    assert_eq!(r, Err(MaskError::InvalidDirection("up".into())));
    let err = r.expect_err("invalid");
    assert_eq!(err.to_string(), "InvalidDirection(\"up\")");
}

#[cfg(feature = "serde")]
#[test]
fn test_serde() -> Result<(), anyhow::Error> {
    let spec: MaskSpec = serde_json::from_str(r#"{"pattern":"000,00","direction":"backward"}"#)?;
    assert_eq!(
        spec,
        MaskSpec::new("000,00").direction(Direction::Backward)
    );

    let json = serde_json::to_string(&MaskSpec::new("00").suffix("%"))?;
    assert_eq!(
        json,
        r#"{"pattern":"00","prefix":"","suffix":"%","direction":"forward"}"#
    );
    Ok(())
}
