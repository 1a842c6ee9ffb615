//! Pokemon domain model.
//!
//! # Responsibility
//! - Define the single record persisted by this crate.
//! - Check the runtime type of every field value before it is stored.
//!
//! # Invariants
//! - A set field always holds a value of its declared type.
//! - Lenient setters never panic and never return errors; rejected values
//!   leave the backing field untouched.
//! - `try_new` either returns a fully populated record or names the first
//!   failing field.

use log::warn;
use serde_json::{Number, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Placeholder rendered by [`Pokemon::info`] for unset fields.
pub const UNSET_PLACEHOLDER: &str = "undefined";

/// Record fields, in declaration (and column) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PokemonField {
    Name,
    Kind,
    Level,
}

impl PokemonField {
    /// Field name as used on the interchange wire.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Kind => "type",
            Self::Level => "level",
        }
    }

    fn expected(self) -> ValueType {
        match self {
            Self::Name | Self::Kind => ValueType::String,
            Self::Level => ValueType::Number,
        }
    }
}

impl Display for PokemonField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Runtime type of a dynamically typed field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueType {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors for strict record construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PokemonValidationError {
    InvalidField {
        field: PokemonField,
        expected: ValueType,
        found: ValueType,
    },
    MissingField(PokemonField),
}

impl Display for PokemonValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidField {
                field,
                expected,
                found,
            } => write!(f, "{field} must be a {expected}, got {found}"),
            Self::MissingField(field) => write!(f, "{field} is not set"),
        }
    }
}

impl Error for PokemonValidationError {}

/// The record persisted by this crate.
///
/// Backing fields are optional because the lenient setters may reject a
/// value, leaving a partially populated record behind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pokemon {
    pub(crate) name: Option<String>,
    pub(crate) kind: Option<String>,
    pub(crate) level: Option<Number>,
}

impl Pokemon {
    /// Builds a record by routing every argument through its setter.
    ///
    /// Mistyped arguments are dropped with a warning; see [`Pokemon::try_new`]
    /// for the fail-fast variant.
    ///
    /// `f64::NAN` and infinite levels convert to `Value::Null` before they
    /// reach the setter, so they are rejected as `null`.
    pub fn new(name: impl Into<Value>, kind: impl Into<Value>, level: impl Into<Value>) -> Self {
        let mut pokemon = Self::default();
        pokemon.set_name(name);
        pokemon.set_kind(kind);
        pokemon.set_level(level);
        pokemon
    }

    /// Builds a fully populated record or reports the first mistyped field.
    ///
    /// Non-finite float levels have no JSON number form and are reported as
    /// `found: null`.
    pub fn try_new(
        name: impl Into<Value>,
        kind: impl Into<Value>,
        level: impl Into<Value>,
    ) -> Result<Self, PokemonValidationError> {
        Ok(Self {
            name: Some(expect_string(PokemonField::Name, name.into())?),
            kind: Some(expect_string(PokemonField::Kind, kind.into())?),
            level: Some(expect_number(PokemonField::Level, level.into())?),
        })
    }

    pub fn set_name(&mut self, value: impl Into<Value>) {
        match expect_string(PokemonField::Name, value.into()) {
            Ok(name) => self.name = Some(name),
            Err(err) => report_rejected(&err),
        }
    }

    pub fn set_kind(&mut self, value: impl Into<Value>) {
        match expect_string(PokemonField::Kind, value.into()) {
            Ok(kind) => self.kind = Some(kind),
            Err(err) => report_rejected(&err),
        }
    }

    /// Accepts only finite numbers; see [`Pokemon::new`] for non-finite floats.
    pub fn set_level(&mut self, value: impl Into<Value>) {
        match expect_number(PokemonField::Level, value.into()) {
            Ok(level) => self.level = Some(level),
            Err(err) => report_rejected(&err),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn level(&self) -> Option<&Number> {
        self.level.as_ref()
    }

    /// Returns whether all three fields hold a value.
    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    /// Checks that every field is set, reporting the first gap in field order.
    pub fn validate(&self) -> Result<(), PokemonValidationError> {
        if self.name.is_none() {
            return Err(PokemonValidationError::MissingField(PokemonField::Name));
        }
        if self.kind.is_none() {
            return Err(PokemonValidationError::MissingField(PokemonField::Kind));
        }
        if self.level.is_none() {
            return Err(PokemonValidationError::MissingField(PokemonField::Level));
        }
        Ok(())
    }

    /// One-line human-readable summary. Unset fields render as
    /// [`UNSET_PLACEHOLDER`].
    pub fn info(&self) -> String {
        let level = self.level.as_ref().map(Number::to_string);
        format!(
            "name: {}, type: {}, level: {}",
            self.name.as_deref().unwrap_or(UNSET_PLACEHOLDER),
            self.kind.as_deref().unwrap_or(UNSET_PLACEHOLDER),
            level.as_deref().unwrap_or(UNSET_PLACEHOLDER),
        )
    }
}

fn expect_string(field: PokemonField, value: Value) -> Result<String, PokemonValidationError> {
    match value {
        Value::String(text) => Ok(text),
        other => Err(type_mismatch(field, &other)),
    }
}

fn expect_number(field: PokemonField, value: Value) -> Result<Number, PokemonValidationError> {
    match value {
        Value::Number(number) => Ok(number),
        other => Err(type_mismatch(field, &other)),
    }
}

fn type_mismatch(field: PokemonField, value: &Value) -> PokemonValidationError {
    PokemonValidationError::InvalidField {
        field,
        expected: field.expected(),
        found: ValueType::of(value),
    }
}

fn report_rejected(err: &PokemonValidationError) {
    warn!("event=pokemon_field_rejected module=model status=error error={err}");
}

#[cfg(test)]
mod tests {
    use super::{Pokemon, PokemonField, UNSET_PLACEHOLDER};
    use serde_json::json;

    #[test]
    fn info_renders_unset_fields_with_placeholder() {
        let pokemon = Pokemon::new(json!(null), "Water", 7);
        assert_eq!(
            pokemon.info(),
            format!("name: {UNSET_PLACEHOLDER}, type: Water, level: 7")
        );
    }

    #[test]
    fn wire_names_follow_column_order() {
        let names = [PokemonField::Name, PokemonField::Kind, PokemonField::Level]
            .map(PokemonField::wire_name);
        assert_eq!(names, ["name", "type", "level"]);
    }

    #[test]
    fn float_level_is_accepted() {
        let pokemon = Pokemon::new("Eevee", "Normal", 5.5);
        assert_eq!(pokemon.level().and_then(|level| level.as_f64()), Some(5.5));
    }
}
