//! Per-kind capability registries.
//!
//! Every overlay kind builds one registry, once, that maps catalogue fields
//! to typed setters. The style mapper only ever talks to overlays through
//! these tables.

use indexmap::IndexMap;

use crate::field::{Field, FieldError, FieldValue};

/// Writes one coerced value into a target.
pub type Setter<T> = fn(&mut T, FieldValue) -> Result<(), FieldError>;

pub struct CapabilityRegistry<T> {
  setters: IndexMap<Field, Setter<T>>,
}

impl<T> CapabilityRegistry<T> {
  pub fn new() -> Self {
    Self {
      setters: IndexMap::new(),
    }
  }

  pub fn with(mut self, field: Field, setter: Setter<T>) -> Self {
    self.setters.insert(field, setter);
    self
  }

  pub fn contains(&self, field: Field) -> bool {
    self.setters.contains_key(&field)
  }

  pub fn setter(&self, field: Field) -> Option<Setter<T>> {
    self.setters.get(&field).copied()
  }

  /// Registered fields in registration order.
  pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
    self.setters.keys().copied()
  }

  pub fn len(&self) -> usize {
    self.setters.len()
  }

  pub fn is_empty(&self) -> bool {
    self.setters.is_empty()
  }
}

impl<T> Default for CapabilityRegistry<T> {
  fn default() -> Self {
    Self::new()
  }
}

/// A target the style mapper can write to.
pub trait Styleable: Sized + 'static {
  /// Every field this kind can ever accept.
  fn capabilities() -> &'static CapabilityRegistry<Self>;

  /// Whether this instance accepts `field` in its current state.
  fn exposes(&self, field: Field) -> bool {
    Self::capabilities().contains(field)
  }

  /// Look up and run the setter for `field`.
  fn apply_field(&mut self, field: Field, value: FieldValue) -> Result<(), FieldError> {
    match Self::capabilities().setter(field) {
      Some(set) => set(self, value),
      None => Err(FieldError::type_mismatch(field)),
    }
  }
}

pub(crate) fn non_negative(field: Field, value: FieldValue) -> Result<i32, FieldError> {
  let v = value.as_integer(field)?;
  if v < 0 {
    return Err(FieldError::out_of_range(field, v));
  }
  Ok(v)
}

pub(crate) fn at_least_one(field: Field, value: FieldValue) -> Result<i32, FieldError> {
  let v = value.as_integer(field)?;
  if v < 1 {
    return Err(FieldError::out_of_range(field, v));
  }
  Ok(v)
}

pub(crate) fn positive(field: Field, value: FieldValue) -> Result<f32, FieldError> {
  let v = value.as_float(field)?;
  if !(v > 0.0 && v.is_finite()) {
    return Err(FieldError::out_of_range(field, v));
  }
  Ok(v)
}

/// Accepts values in `(0, 1]`.
pub(crate) fn unit_fraction(field: Field, value: FieldValue) -> Result<f32, FieldError> {
  let v = value.as_float(field)?;
  if !(v > 0.0 && v <= 1.0) {
    return Err(FieldError::out_of_range(field, v));
  }
  Ok(v)
}
