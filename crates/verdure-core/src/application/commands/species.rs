//! Plant species commands

use verdure_domain::aggregates::{NewSpecies, SpeciesUpdate};
use verdure_domain::patch::FieldUpdate;
use verdure_domain::value_objects::{DayRange, Description, EntityName, PhRange, SpeciesId};
use verdure_domain::DomainResult;

/// Create a new plant species profile.
#[derive(Debug, Clone)]
pub struct CreateSpeciesCommand {
    pub props: NewSpecies,
}

impl CreateSpeciesCommand {
    pub fn new(
        name: &str,
        scientific_name: Option<&str>,
        optimal_ph: Option<(f64, f64)>,
        germination_days: Option<(u16, u16)>,
        description: Option<&str>,
    ) -> DomainResult<Self> {
        Ok(Self {
            props: NewSpecies {
                name: EntityName::new(name)?,
                scientific_name: scientific_name.map(EntityName::new).transpose()?,
                optimal_ph: optimal_ph.map(|(min, max)| PhRange::new(min, max)).transpose()?,
                germination: germination_days
                    .map(|(min, max)| DayRange::new(min, max))
                    .transpose()?,
                description: description.map(Description::new).transpose()?,
            },
        })
    }
}

/// Partially update an existing species profile.
#[derive(Debug, Clone)]
pub struct UpdateSpeciesCommand {
    pub id: SpeciesId,
    pub update: SpeciesUpdate,
}

impl UpdateSpeciesCommand {
    pub fn new(
        id: &str,
        name: Option<&str>,
        scientific_name: FieldUpdate<&str>,
        optimal_ph: FieldUpdate<(f64, f64)>,
        germination_days: FieldUpdate<(u16, u16)>,
        description: FieldUpdate<&str>,
    ) -> DomainResult<Self> {
        Ok(Self {
            id: id.parse()?,
            update: SpeciesUpdate {
                name: name.map(EntityName::new).transpose()?,
                scientific_name: scientific_name.try_map(EntityName::new)?,
                optimal_ph: optimal_ph.try_map(|(min, max)| PhRange::new(min, max))?,
                germination: germination_days.try_map(|(min, max)| DayRange::new(min, max))?,
                description: description.try_map(Description::new)?,
            },
        })
    }
}

/// Delete a species profile.
#[derive(Debug, Clone)]
pub struct DeleteSpeciesCommand {
    pub id: SpeciesId,
}

impl DeleteSpeciesCommand {
    pub fn new(id: &str) -> DomainResult<Self> {
        Ok(Self { id: id.parse()? })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_the_ph_window() {
        assert!(CreateSpeciesCommand::new("Basil", None, Some((9.0, 2.0)), None, None).is_err());
        assert!(CreateSpeciesCommand::new("Basil", None, Some((15.0, 15.5)), None, None).is_err());

        let command =
            CreateSpeciesCommand::new("Basil", None, Some((5.5, 6.5)), Some((5, 10)), None)
                .unwrap();
        assert_eq!(command.props.optimal_ph.unwrap().max(), 6.5);
        assert_eq!(command.props.germination.unwrap().min(), 5);
    }
}
