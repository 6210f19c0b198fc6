//! Integration tests for the validate → encode → decode pipeline.
//!
//! These go through the public API only, starting from bindings files in
//! TOML the way the command-line tool receives them.

use falcon_firmware::{
    decode, encode, validate, BindingSpec, BindingsSpec, ButtonId, DecodedBinding, KeyCode,
    ProgramSetSpec, ValidationErrorKind, FALCON_8,
};

const EXAMPLE: &str = r#"
[button1]
key = "A"

[button2]
[[button2.program]]
modifier = 0
delay_ms = 10
keys = ["A", "B"]

[button3]
string = "c"

[button4]
key = "0x29"

[button5]
key = 30

[button6]
key = "Enter"

[button7]
[[button7.program]]
modifier = ["Ctrl"]
keys = ["C"]

[[button7.program]]
modifier = "Ctrl"
delay_ms = 50
keys = ["V"]

[button8]
key = "F13"
"#;

fn parse(toml_str: &str) -> BindingsSpec {
    toml::from_str(toml_str).unwrap()
}

fn fresh_image(fill: u8) -> Vec<u8> {
    vec![fill; FALCON_8.required_len() + 64]
}

fn b(n: u8) -> ButtonId {
    ButtonId::new(n).unwrap()
}

fn region(image: &[u8], button: ButtonId) -> &[u8] {
    let base = FALCON_8.slot(button).program_base;
    &image[base..base + FALCON_8.program_region_size]
}

// ── Worked example ──

#[test]
fn example_bindings_encode_to_device_bytes() {
    let bindings = validate(&parse(EXAMPLE), &FALCON_8).unwrap();
    let mut image = fresh_image(0x55);
    encode(&mut image, &bindings, &FALCON_8);

    assert_eq!(image[FALCON_8.slot(b(1)).offset], 0x04);
    assert_eq!(image[FALCON_8.slot(b(2)).offset], 0xD8);

    let r = region(&image, b(2));
    assert_eq!(&r[0..8], &[0x00, 0x0A, 0x04, 0x05, 0x00, 0x00, 0x00, 0x00]);
    assert_eq!(&r[8..16], &[0xFD, 0, 0, 0, 0, 0, 0, 0]);
    assert!(r[16..].iter().all(|&b| b == 0));

    assert_eq!(image[FALCON_8.slot(b(3)).offset], 0x06);
    assert_eq!(image[FALCON_8.slot(b(4)).offset], 0x29);
    assert_eq!(image[FALCON_8.slot(b(5)).offset], 0x1E);
    assert_eq!(image[FALCON_8.slot(b(6)).offset], 0x28);
    assert_eq!(image[FALCON_8.slot(b(7)).offset], 0xDD);
    assert_eq!(image[FALCON_8.slot(b(8)).offset], 0x68);

    let r = region(&image, b(7));
    assert_eq!(&r[0..8], &[0x01, 0, 0x06, 0, 0, 0, 0, 0]);
    assert_eq!(&r[8..16], &[0x01, 50, 0x19, 0, 0, 0, 0, 0]);
    assert_eq!(r[16], 0xFD);
}

#[test]
fn bytes_outside_owned_positions_are_untouched() {
    let bindings = validate(&parse(EXAMPLE), &FALCON_8).unwrap();
    let mut image = fresh_image(0x55);
    encode(&mut image, &bindings, &FALCON_8);

    let mut owned = vec![false; image.len()];
    for button in ButtonId::all() {
        let slot = FALCON_8.slot(button);
        owned[slot.offset] = true;
        if matches!(image[slot.offset], 0xD7..=0xDE) {
            for flag in &mut owned[slot.program_base..slot.program_base + 800] {
                *flag = true;
            }
        }
    }
    for (i, &byte) in image.iter().enumerate() {
        if !owned[i] {
            assert_eq!(byte, 0x55, "byte 0x{i:04x} changed");
        }
    }
}

// ── Properties ──

#[test]
fn character_matches_direct_key_for_every_supported_char() {
    let base: BindingsSpec = parse(EXAMPLE);
    for ch in (0x20u8..0x7F).map(char::from).chain(['\n', '\t']) {
        let Some(code) = falcon_firmware::keycode::resolve_char(ch) else {
            continue;
        };

        let mut by_char = base.clone();
        by_char.button1 = BindingSpec::string(ch.to_string());
        let mut by_key = base.clone();
        by_key.button1 = BindingSpec::key(code);

        let mut a = fresh_image(0);
        let mut k = fresh_image(0);
        encode(&mut a, &validate(&by_char, &FALCON_8).unwrap(), &FALCON_8);
        encode(&mut k, &validate(&by_key, &FALCON_8).unwrap(), &FALCON_8);
        assert_eq!(a, k, "character {ch:?}");
    }
}

#[test]
fn shorter_program_scrubs_longer_one() {
    let mut spec = parse(EXAMPLE);
    let long_step = ProgramSetSpec {
        modifier: falcon_firmware::Modifiers(0x02),
        delay_ms: 77,
        keys: vec![KeyCode(0x04); 6],
    };
    spec.button2 = BindingSpec::program(vec![long_step; 40]);

    let mut image = fresh_image(0xEE);
    encode(&mut image, &validate(&spec, &FALCON_8).unwrap(), &FALCON_8);

    let short = validate(&parse(EXAMPLE), &FALCON_8).unwrap();
    encode(&mut image, &short, &FALCON_8);

    let r = region(&image, b(2));
    assert_eq!(r[8], 0xFD);
    assert!(r[9..].iter().all(|&b| b == 0), "stale program bytes survived");
}

#[test]
fn encoding_is_deterministic() {
    let bindings = validate(&parse(EXAMPLE), &FALCON_8).unwrap();
    let mut first = fresh_image(0x3C);
    let mut second = first.clone();
    encode(&mut first, &bindings, &FALCON_8);
    encode(&mut second, &bindings, &FALCON_8);
    assert_eq!(first, second);

    // Encoding twice into the same image changes nothing further
    let snapshot = first.clone();
    encode(&mut first, &bindings, &FALCON_8);
    assert_eq!(first, snapshot);
}

#[test]
fn overlong_program_never_reaches_encoder() {
    let mut spec = parse(EXAMPLE);
    spec.button5 = BindingSpec::program(vec![
        ProgramSetSpec {
            keys: vec![KeyCode(0x04)],
            ..ProgramSetSpec::default()
        };
        FALCON_8.program_capacity() + 1
    ]);
    let err = validate(&spec, &FALCON_8).unwrap_err();
    assert_eq!(err.button, b(5));
    assert!(matches!(err.kind, ValidationErrorKind::ProgramTooLong { .. }));
}

#[test]
fn missing_button_table_is_malformed() {
    let spec = parse(
        r#"
[button1]
key = "A"
"#,
    );
    let err = validate(&spec, &FALCON_8).unwrap_err();
    assert_eq!(err.button, b(2));
    assert_eq!(
        err.kind,
        ValidationErrorKind::MalformedBinding { populated: 0 }
    );
    assert_eq!(
        err.to_string(),
        "button 2: malformed binding: expected exactly one of key, string or program, found 0"
    );
}

#[test]
fn unknown_key_name_fails_to_parse() {
    let err = toml::from_str::<BindingsSpec>("[button1]\nkey = \"Hyper\"\n").unwrap_err();
    assert!(err.to_string().contains("Hyper"), "{err}");
}

// ── Read-back ──

#[test]
fn decode_reads_back_what_was_encoded() {
    let bindings = validate(&parse(EXAMPLE), &FALCON_8).unwrap();
    let mut image = fresh_image(0);
    encode(&mut image, &bindings, &FALCON_8);

    let decoded = decode(&image, &FALCON_8).unwrap();
    assert_eq!(decoded.get(b(1)), &DecodedBinding::Key(KeyCode(0x04)));
    // A string binding reads back as the key it typed
    assert_eq!(decoded.get(b(3)), &DecodedBinding::Key(KeyCode(0x06)));

    // Feeding the decoded description back in reproduces the same image
    let again = validate(&decoded.to_spec(), &FALCON_8).unwrap();
    let mut reencoded = fresh_image(0);
    encode(&mut reencoded, &again, &FALCON_8);
    assert_eq!(reencoded, image);
}

#[test]
fn decoded_spec_serializes_as_bindings_file() {
    let bindings = validate(&parse(EXAMPLE), &FALCON_8).unwrap();
    let mut image = fresh_image(0);
    encode(&mut image, &bindings, &FALCON_8);

    let text = toml::to_string(&decode(&image, &FALCON_8).unwrap().to_spec()).unwrap();
    assert!(text.contains("key = \"A\""), "{text}");
    assert!(text.contains("modifier = [\"LCtrl\"]"), "{text}");

    let reparsed: BindingsSpec = toml::from_str(&text).unwrap();
    assert!(validate(&reparsed, &FALCON_8).is_ok());
}
