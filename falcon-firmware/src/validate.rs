//! Binding validation.
//!
//! Turns a [`BindingsSpec`] into [`ButtonBindings`], stopping at the first
//! button that breaks a rule. Nothing is written anywhere; the encoder only
//! ever sees the output of [`validate`].

use crate::binding::{
    BindingSpec, BindingsSpec, ButtonBinding, ButtonBindings, ProgramSet, ProgramSetSpec,
    BUTTON_COUNT, MAX_KEYS_PER_STEP,
};
use crate::error::{ValidationError, ValidationErrorKind};
use crate::keycode::{self, KeyCode};
use crate::layout::Layout;
use tracing::debug;

/// Check all eight buttons against `layout`, in physical order.
pub fn validate(spec: &BindingsSpec, layout: &Layout) -> Result<ButtonBindings, ValidationError> {
    let mut buttons = Vec::with_capacity(BUTTON_COUNT);
    for (button, binding) in spec.iter() {
        let checked = validate_binding(binding, layout)
            .map_err(|kind| ValidationError { button, kind })?;
        debug!("{button}: {checked}");
        buttons.push(checked);
    }

    let buttons = buttons
        .try_into()
        .unwrap_or_else(|_| unreachable!("ButtonId::all yields one entry per button"));
    Ok(ButtonBindings::new(buttons))
}

fn validate_binding(
    spec: &BindingSpec,
    layout: &Layout,
) -> Result<ButtonBinding, ValidationErrorKind> {
    match (&spec.key, &spec.string, &spec.program) {
        (Some(code), None, None) => {
            check_key(*code, layout)?;
            Ok(ButtonBinding::Key(*code))
        }
        (None, Some(s), None) => validate_string(s).map(ButtonBinding::Character),
        (None, None, Some(steps)) => validate_program(steps, layout).map(ButtonBinding::Program),
        _ => Err(ValidationErrorKind::MalformedBinding {
            populated: spec.populated(),
        }),
    }
}

fn check_key(code: KeyCode, layout: &Layout) -> Result<(), ValidationErrorKind> {
    if layout.is_reserved(code) {
        return Err(ValidationErrorKind::ReservedKey(code));
    }
    Ok(())
}

fn validate_string(s: &str) -> Result<char, ValidationErrorKind> {
    let mut chars = s.chars();
    let ch = match (chars.next(), chars.next()) {
        (Some(ch), None) => ch,
        _ => return Err(ValidationErrorKind::InvalidCharacterCount(s.chars().count())),
    };
    keycode::resolve_char(ch).ok_or(ValidationErrorKind::UnsupportedCharacter(ch))?;
    Ok(ch)
}

fn validate_program(
    steps: &[ProgramSetSpec],
    layout: &Layout,
) -> Result<Vec<ProgramSet>, ValidationErrorKind> {
    if steps.is_empty() {
        return Err(ValidationErrorKind::EmptyProgram);
    }
    let capacity = layout.program_capacity();
    if steps.len() > capacity {
        return Err(ValidationErrorKind::ProgramTooLong {
            steps: steps.len(),
            capacity,
        });
    }

    steps
        .iter()
        .enumerate()
        .map(|(step, spec)| validate_step(step, spec, layout))
        .collect()
}

fn validate_step(
    step: usize,
    spec: &ProgramSetSpec,
    layout: &Layout,
) -> Result<ProgramSet, ValidationErrorKind> {
    if spec.keys.len() > MAX_KEYS_PER_STEP {
        return Err(ValidationErrorKind::TooManyKeysInStep {
            step,
            count: spec.keys.len(),
        });
    }
    let delay_ms = u8::try_from(spec.delay_ms).map_err(|_| ValidationErrorKind::DelayOutOfRange {
        step,
        delay: spec.delay_ms,
    })?;
    let modifier = spec.modifier.bits();
    if modifier == layout.stop_sentinel {
        return Err(ValidationErrorKind::ReservedModifier { step, modifier });
    }
    for &key in &spec.keys {
        check_key(key, layout)?;
    }

    Ok(ProgramSet {
        modifier,
        delay_ms,
        keys: spec.keys.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::ButtonId;
    use crate::keycode::{mods, Modifiers};
    use crate::layout::FALCON_8;

    fn all_keys() -> BindingsSpec {
        let mut spec = BindingsSpec::default();
        for b in ButtonId::all() {
            *spec.get_mut(b) = BindingSpec::key(KeyCode(0x04 + b.index() as u8));
        }
        spec
    }

    fn step(keys: &[u8]) -> ProgramSetSpec {
        ProgramSetSpec {
            modifier: Modifiers(0),
            delay_ms: 10,
            keys: keys.iter().copied().map(KeyCode).collect(),
        }
    }

    fn err_on(spec: &BindingsSpec) -> ValidationError {
        validate(spec, &FALCON_8).unwrap_err()
    }

    fn b(n: u8) -> ButtonId {
        ButtonId::new(n).unwrap()
    }

    #[test]
    fn accepts_all_direct_keys() {
        let bindings = validate(&all_keys(), &FALCON_8).unwrap();
        assert_eq!(bindings.get(b(1)), &ButtonBinding::Key(KeyCode(0x04)));
        assert_eq!(bindings.get(b(8)), &ButtonBinding::Key(KeyCode(0x0B)));
    }

    #[test]
    fn missing_button_is_malformed() {
        let mut spec = all_keys();
        spec.button5 = BindingSpec::default();
        assert_eq!(
            err_on(&spec),
            ValidationError {
                button: b(5),
                kind: ValidationErrorKind::MalformedBinding { populated: 0 },
            }
        );
    }

    #[test]
    fn two_variants_are_malformed() {
        let mut spec = all_keys();
        spec.button2.string = Some("a".into());
        assert_eq!(
            err_on(&spec).kind,
            ValidationErrorKind::MalformedBinding { populated: 2 }
        );

        spec.button2.program = Some(vec![step(&[0x04])]);
        assert_eq!(
            err_on(&spec).kind,
            ValidationErrorKind::MalformedBinding { populated: 3 }
        );
    }

    #[test]
    fn first_failing_button_is_reported() {
        let mut spec = all_keys();
        spec.button3 = BindingSpec::default();
        spec.button7 = BindingSpec::string("!");
        assert_eq!(err_on(&spec).button, b(3));
    }

    #[test]
    fn reserved_direct_keys_are_rejected() {
        for code in [0x00, 0xD7, 0xDE, 0xFD] {
            let mut spec = all_keys();
            spec.button1 = BindingSpec::key(KeyCode(code));
            assert_eq!(
                err_on(&spec).kind,
                ValidationErrorKind::ReservedKey(KeyCode(code))
            );
        }
    }

    #[test]
    fn string_rules() {
        let mut spec = all_keys();
        spec.button4 = BindingSpec::string("ab");
        assert_eq!(
            err_on(&spec).kind,
            ValidationErrorKind::InvalidCharacterCount(2)
        );

        spec.button4 = BindingSpec::string("");
        assert_eq!(
            err_on(&spec).kind,
            ValidationErrorKind::InvalidCharacterCount(0)
        );

        spec.button4 = BindingSpec::string("%");
        assert_eq!(
            err_on(&spec).kind,
            ValidationErrorKind::UnsupportedCharacter('%')
        );

        spec.button4 = BindingSpec::string("q");
        let bindings = validate(&spec, &FALCON_8).unwrap();
        assert_eq!(bindings.get(b(4)), &ButtonBinding::Character('q'));
    }

    #[test]
    fn empty_program_is_rejected() {
        let mut spec = all_keys();
        spec.button6 = BindingSpec::program(vec![]);
        assert_eq!(err_on(&spec).kind, ValidationErrorKind::EmptyProgram);
    }

    #[test]
    fn seven_keys_in_a_step_is_too_many() {
        let mut spec = all_keys();
        spec.button6 = BindingSpec::program(vec![
            step(&[0x04]),
            step(&[0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A]),
        ]);
        assert_eq!(
            err_on(&spec).kind,
            ValidationErrorKind::TooManyKeysInStep { step: 1, count: 7 }
        );

        spec.button6 = BindingSpec::program(vec![step(&[0x04, 0x05, 0x06, 0x07, 0x08, 0x09])]);
        assert!(validate(&spec, &FALCON_8).is_ok());
    }

    #[test]
    fn program_capacity_boundary() {
        let capacity = FALCON_8.program_capacity();
        let mut spec = all_keys();

        spec.button1 = BindingSpec::program(vec![step(&[0x04]); capacity]);
        assert!(validate(&spec, &FALCON_8).is_ok());

        spec.button1 = BindingSpec::program(vec![step(&[0x04]); capacity + 1]);
        assert_eq!(
            err_on(&spec).kind,
            ValidationErrorKind::ProgramTooLong {
                steps: capacity + 1,
                capacity,
            }
        );
    }

    #[test]
    fn delay_must_fit_a_byte() {
        let mut spec = all_keys();
        let mut slow = step(&[0x04]);
        slow.delay_ms = 255;
        spec.button2 = BindingSpec::program(vec![slow.clone()]);
        assert!(validate(&spec, &FALCON_8).is_ok());

        slow.delay_ms = 256;
        spec.button2 = BindingSpec::program(vec![step(&[0x05]), slow]);
        assert_eq!(
            err_on(&spec).kind,
            ValidationErrorKind::DelayOutOfRange { step: 1, delay: 256 }
        );
    }

    #[test]
    fn stop_marker_modifier_is_rejected() {
        let mut spec = all_keys();
        let mut s = step(&[0x04]);
        s.modifier = Modifiers(0xFD);
        spec.button2 = BindingSpec::program(vec![s]);
        assert_eq!(
            err_on(&spec).kind,
            ValidationErrorKind::ReservedModifier {
                step: 0,
                modifier: 0xFD
            }
        );
    }

    #[test]
    fn reserved_key_inside_step_is_rejected() {
        let mut spec = all_keys();
        spec.button2 = BindingSpec::program(vec![step(&[0x04, 0x00])]);
        assert_eq!(
            err_on(&spec).kind,
            ValidationErrorKind::ReservedKey(KeyCode::NONE)
        );
    }

    #[test]
    fn valid_program_is_carried_through() {
        let mut spec = all_keys();
        spec.button2 = BindingSpec::program(vec![ProgramSetSpec {
            modifier: Modifiers(mods::LCTRL),
            delay_ms: 30,
            keys: vec![KeyCode(0x06)],
        }]);
        let bindings = validate(&spec, &FALCON_8).unwrap();
        assert_eq!(
            bindings.get(b(2)),
            &ButtonBinding::Program(vec![ProgramSet {
                modifier: mods::LCTRL,
                delay_ms: 30,
                keys: vec![KeyCode(0x06)],
            }])
        );
    }
}
