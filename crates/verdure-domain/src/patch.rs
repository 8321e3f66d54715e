//! Tri-state field update
//!
//! Partial updates must distinguish "field omitted" (leave unchanged) from
//! "field set to null" (clear). [`FieldUpdate`] models that distinction for
//! nullable fields; non-nullable fields use a plain `Option` where `None`
//! means unchanged.
//!
//! Serialization matches the wire convention: `Keep` fields are skipped
//! entirely (pair with `#[serde(default, skip_serializing_if =
//! "FieldUpdate::is_keep")]`), `Clear` serializes as `null`, and `Set`
//! serializes as the value.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Update instruction for a single nullable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldUpdate<T> {
    /// Field was omitted from the update; leave the current value unchanged.
    #[default]
    Keep,
    /// Field was explicitly nulled; clear the current value.
    Clear,
    /// Field was provided; replace the current value.
    Set(T),
}

impl<T> FieldUpdate<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    /// Apply this instruction to the target slot.
    pub fn apply(self, slot: &mut Option<T>) {
        match self {
            Self::Keep => {}
            Self::Clear => *slot = None,
            Self::Set(value) => *slot = Some(value),
        }
    }

    /// Build an instruction from an already-resolved optional value.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Set(value),
            None => Self::Clear,
        }
    }

    pub fn as_ref(&self) -> FieldUpdate<&T> {
        match self {
            Self::Keep => FieldUpdate::Keep,
            Self::Clear => FieldUpdate::Clear,
            Self::Set(value) => FieldUpdate::Set(value),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FieldUpdate<U> {
        match self {
            Self::Keep => FieldUpdate::Keep,
            Self::Clear => FieldUpdate::Clear,
            Self::Set(value) => FieldUpdate::Set(f(value)),
        }
    }

    /// Like [`FieldUpdate::map`] but the projection may fail, e.g. when
    /// validating a raw primitive into a value object.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<FieldUpdate<U>, E> {
        Ok(match self {
            Self::Keep => FieldUpdate::Keep,
            Self::Clear => FieldUpdate::Clear,
            Self::Set(value) => FieldUpdate::Set(f(value)?),
        })
    }
}

impl<T: Serialize> Serialize for FieldUpdate<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Keep is expected to be skipped at the field level; if it is
            // serialized anyway it degrades to null.
            Self::Keep | Self::Clear => serializer.serialize_none(),
            Self::Set(value) => serializer.serialize_some(value),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldUpdate<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // A present-but-null field is Clear; an absent field never reaches
        // this impl and falls back to the Keep default.
        Ok(Self::from_option(Option::<T>::deserialize(deserializer)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize, Default)]
    struct Patch {
        #[serde(default, skip_serializing_if = "FieldUpdate::is_keep")]
        note: FieldUpdate<String>,
    }

    #[test]
    fn apply_semantics() {
        let mut slot = Some("a".to_owned());
        FieldUpdate::Keep.apply(&mut slot);
        assert_eq!(slot.as_deref(), Some("a"));

        FieldUpdate::Set("b".to_owned()).apply(&mut slot);
        assert_eq!(slot.as_deref(), Some("b"));

        FieldUpdate::<String>::Clear.apply(&mut slot);
        assert_eq!(slot, None);
    }

    #[test]
    fn keep_is_absent_on_the_wire() {
        let json = serde_json::to_string(&Patch {
            note: FieldUpdate::Keep,
        })
        .unwrap();
        assert_eq!(json, "{}");

        let back: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(back.note, FieldUpdate::Keep);
    }

    #[test]
    fn clear_is_null_on_the_wire() {
        let json = serde_json::to_string(&Patch {
            note: FieldUpdate::Clear,
        })
        .unwrap();
        assert_eq!(json, r#"{"note":null}"#);

        let back: Patch = serde_json::from_str(r#"{"note":null}"#).unwrap();
        assert_eq!(back.note, FieldUpdate::Clear);
    }

    #[test]
    fn set_round_trips() {
        let json = serde_json::to_string(&Patch {
            note: FieldUpdate::Set("hi".to_owned()),
        })
        .unwrap();
        assert_eq!(json, r#"{"note":"hi"}"#);

        let back: Patch = serde_json::from_str(r#"{"note":"hi"}"#).unwrap();
        assert_eq!(back.note, FieldUpdate::Set("hi".to_owned()));
    }

    #[test]
    fn try_map_propagates_errors() {
        let update: FieldUpdate<&str> = FieldUpdate::Set("nope");
        let result: Result<FieldUpdate<u32>, _> = update.try_map(str::parse::<u32>);
        assert!(result.is_err());

        let keep: FieldUpdate<&str> = FieldUpdate::Keep;
        let mapped: FieldUpdate<u32> = keep.try_map(str::parse::<u32>).unwrap();
        assert_eq!(mapped, FieldUpdate::Keep);
    }
}
