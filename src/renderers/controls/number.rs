//! Number control

use serde_json::{Number, Value};

use super::{binding, display_text, form_field, RawInput};
use crate::core::state::ControlState;
use crate::dispatch::{DispatchProps, RenderContext};
use crate::renderers::widget::{InputType, Widget};
use crate::renderers::RendererKind;

/// Largest magnitude below which every integer is exactly representable as f64
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

pub fn render(props: &DispatchProps<'_>, cx: &RenderContext<'_>) -> Option<Widget> {
    let state = ControlState::derive(props, cx);
    if !state.visible {
        return None;
    }

    let input = Widget::Input {
        binding: binding(&state, RendererKind::Number),
        value: display_text(state.data),
        input_type: InputType::Number,
        inputmode: Some("decimal".to_string()),
        step: None,
        autocomplete: None,
        disabled: !state.enabled,
        invalid: state.error_message().is_some(),
        trailing: None,
    };
    Some(form_field(&state, input))
}

/// Parse the trimmed text as a finite number
///
/// Decimal and exponent forms are accepted, as are unsigned `0x`, `0o` and
/// `0b` literals. Whole results are stored as JSON integers so `"3"` and
/// `"3.0"` both commit `3`.
pub fn commit(raw: RawInput) -> Option<Option<Value>> {
    match raw {
        RawInput::Text(text) => Some(parse(&text)),
        RawInput::Clear => Some(None),
        _ => None,
    }
}

fn parse(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    // Rust accepts "inf" / "NaN" spellings; only finite values commit
    let parsed = radix_literal(trimmed)
        .or_else(|| trimmed.parse::<f64>().ok())
        .filter(|f| f.is_finite())?;
    if parsed.fract() == 0.0 && parsed.abs() <= MAX_SAFE_INTEGER {
        return Some(Value::from(parsed as i64));
    }
    Number::from_f64(parsed).map(Value::Number)
}

fn radix_literal(text: &str) -> Option<f64> {
    let mut chars = text.chars();
    if chars.next() != Some('0') {
        return None;
    }
    let radix = match chars.next()?.to_ascii_lowercase() {
        'x' => 16,
        'o' => 8,
        'b' => 2,
        _ => return None,
    };
    let digits = chars.as_str();
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
}
