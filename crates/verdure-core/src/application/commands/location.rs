//! Location commands

use verdure_domain::aggregates::{LocationUpdate, NewLocation};
use verdure_domain::patch::FieldUpdate;
use verdure_domain::value_objects::{Description, EntityName, LocationId};
use verdure_domain::DomainResult;

/// Create a new location.
#[derive(Debug, Clone)]
pub struct CreateLocationCommand {
    pub props: NewLocation,
}

impl CreateLocationCommand {
    pub fn new(name: &str, kind: &str, description: Option<&str>) -> DomainResult<Self> {
        Ok(Self {
            props: NewLocation {
                name: EntityName::new(name)?,
                kind: kind.parse()?,
                description: description.map(Description::new).transpose()?,
            },
        })
    }
}

/// Partially update an existing location.
///
/// Omitted fields are unchanged; an explicit null clears a nullable field.
#[derive(Debug, Clone)]
pub struct UpdateLocationCommand {
    pub id: LocationId,
    pub update: LocationUpdate,
}

impl UpdateLocationCommand {
    pub fn new(
        id: &str,
        name: Option<&str>,
        kind: Option<&str>,
        description: FieldUpdate<&str>,
    ) -> DomainResult<Self> {
        Ok(Self {
            id: id.parse()?,
            update: LocationUpdate {
                name: name.map(EntityName::new).transpose()?,
                kind: kind.map(str::parse).transpose()?,
                description: description.try_map(Description::new)?,
            },
        })
    }
}

/// Delete a location.
#[derive(Debug, Clone)]
pub struct DeleteLocationCommand {
    pub id: LocationId,
}

impl DeleteLocationCommand {
    pub fn new(id: &str) -> DomainResult<Self> {
        Ok(Self { id: id.parse()? })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdure_domain::value_objects::LocationType;
    use verdure_domain::{DomainError, ValidationError};

    #[test]
    fn constructor_validates_before_any_handler_runs() {
        let command = CreateLocationCommand::new("  Living Room ", "ROOM", None).unwrap();
        assert_eq!(command.props.name.as_str(), "Living Room");
        assert_eq!(command.props.kind, LocationType::Room);
    }

    #[test]
    fn invalid_enum_member_fails_construction() {
        let err = CreateLocationCommand::new("Shelf", "ATTIC", None).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::InvalidEnumValue { .. })
        ));
    }

    #[test]
    fn empty_name_fails_construction() {
        assert!(CreateLocationCommand::new("   ", "ROOM", None).is_err());
    }

    #[test]
    fn update_validates_the_cleared_and_set_fields() {
        let id = verdure_domain::value_objects::LocationId::new().to_string();

        let command =
            UpdateLocationCommand::new(&id, None, None, FieldUpdate::Set("  bright ")).unwrap();
        assert!(matches!(
            command.update.description,
            FieldUpdate::Set(ref d) if d.as_str() == "bright"
        ));

        assert!(UpdateLocationCommand::new(&id, None, None, FieldUpdate::Set("  ")).is_err());
        assert!(UpdateLocationCommand::new("bogus", None, None, FieldUpdate::Keep).is_err());
    }
}
