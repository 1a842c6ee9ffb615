//! JSON interchange codec for [`Pokemon`] records.
//!
//! # Responsibility
//! - Serialize a record's backing fields into flat JSON text.
//! - Parse interchange text back into a structured payload.
//!
//! # Invariants
//! - Keys are emitted in `name`, `type`, `level` order.
//! - Unset fields serialize as `null`; absent and `null` keys parse to `None`.

use crate::model::pokemon::Pokemon;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type InterchangeResult<T> = Result<T, InterchangeError>;

#[derive(Debug)]
pub enum InterchangeError {
    Json(serde_json::Error),
}

impl Display for InterchangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid interchange payload: {err}"),
        }
    }
}

impl Error for InterchangeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for InterchangeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Structured view of one interchange object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterchangePayload {
    #[serde(default)]
    pub name: Option<String>,
    /// Serialized as `type` to match the table column.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub level: Option<Number>,
}

impl InterchangePayload {
    /// Copies the backing fields of `pokemon`, bypassing its accessors.
    pub fn from_pokemon(pokemon: &Pokemon) -> Self {
        Self {
            name: pokemon.name.clone(),
            kind: pokemon.kind.clone(),
            level: pokemon.level.clone(),
        }
    }

    /// Rebuilds a record; `None` fields stay unset.
    pub fn into_pokemon(self) -> Pokemon {
        Pokemon {
            name: self.name,
            kind: self.kind,
            level: self.level,
        }
    }
}

/// Serializes a record into interchange text.
pub fn to_interchange(pokemon: &Pokemon) -> InterchangeResult<String> {
    Ok(serde_json::to_string(&InterchangePayload::from_pokemon(
        pokemon,
    ))?)
}

/// Parses interchange text produced by [`to_interchange`] (or any producer
/// of the same flat shape).
pub fn parse_interchange(text: &str) -> InterchangeResult<InterchangePayload> {
    Ok(serde_json::from_str(text)?)
}
