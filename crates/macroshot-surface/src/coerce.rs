//! Coercion of raw style values to field kinds.
//!
//! The kind a value ends up as is decided by the field it targets. A
//! `"3"` aimed at `LINE_THICKNESS` becomes the integer 3, while a `1`
//! aimed at `SHADOW` becomes `true`.

use macroshot_config::StyleValue;

use crate::color::Color;
use crate::field::{Field, FieldKind, FieldValue};

/// Why a raw value could not be coerced.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CoerceFailure {
  /// Not a recognizable color. The caller substitutes [`Color::RED`].
  Color,
  Other(String),
}

pub(crate) fn coerce_value(field: Field, value: &StyleValue) -> Result<FieldValue, CoerceFailure> {
  match field.kind() {
    FieldKind::Color => match value {
      StyleValue::Text(s) => Color::parse(s).map(FieldValue::Color).ok_or(CoerceFailure::Color),
      _ => Err(CoerceFailure::Color),
    },

    FieldKind::Integer => match value {
      StyleValue::Integer(i) => i32::try_from(*i)
        .map(FieldValue::Integer)
        .map_err(|_| expected(field, value)),
      StyleValue::Float(x) => float_to_i32(*x)
        .map(FieldValue::Integer)
        .ok_or_else(|| expected(field, value)),
      StyleValue::Text(s) => s
        .trim()
        .parse::<i32>()
        .map(FieldValue::Integer)
        .map_err(|_| expected(field, value)),
      StyleValue::Bool(b) => Ok(FieldValue::Integer(i32::from(*b))),
    },

    FieldKind::Boolean => match value {
      StyleValue::Bool(b) => Ok(FieldValue::Boolean(*b)),
      StyleValue::Integer(i) => Ok(FieldValue::Boolean(*i != 0)),
      StyleValue::Float(x) => Ok(FieldValue::Boolean(*x != 0.0)),
      StyleValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(FieldValue::Boolean(true)),
        "false" | "no" | "off" | "0" => Ok(FieldValue::Boolean(false)),
        _ => Err(expected(field, value)),
      },
    },

    FieldKind::Float => match value {
      StyleValue::Integer(i) => Ok(FieldValue::Float(*i as f32)),
      StyleValue::Float(x) => Some(*x as f32)
        .filter(|x| x.is_finite())
        .map(FieldValue::Float)
        .ok_or_else(|| expected(field, value)),
      StyleValue::Text(s) => s
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|x| x.is_finite())
        .map(FieldValue::Float)
        .ok_or_else(|| expected(field, value)),
      StyleValue::Bool(b) => Ok(FieldValue::Float(if *b { 1.0 } else { 0.0 })),
    },
  }
}

fn float_to_i32(x: f64) -> Option<i32> {
  let rounded = x.round();
  (rounded.is_finite() && rounded >= i32::MIN as f64 && rounded <= i32::MAX as f64)
    .then_some(rounded as i32)
}

fn expected(field: Field, value: &StyleValue) -> CoerceFailure {
  CoerceFailure::Other(format!("{} expected {}, got {}", field, field.kind(), value))
}
