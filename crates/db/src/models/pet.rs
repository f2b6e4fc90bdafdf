//! Pet model, expanded representation and DTOs.

use petkare_core::error::CoreError;
use petkare_core::types::{DbId, Timestamp};
use petkare_core::validation::field_errors;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::group::{Group, GroupInput};
use crate::models::pet_trait::{Trait, TraitInput};
use crate::models::sex::Sex;

/// A row from the `pets` table.
#[derive(Debug, Clone, FromRow)]
pub struct Pet {
    pub id: DbId,
    pub name: String,
    pub age: i32,
    pub weight: f64,
    pub sex: Sex,
    pub group_id: DbId,
    pub created_at: Timestamp,
}

/// A pet with its group and traits inlined. This is the API representation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PetDetail {
    pub id: DbId,
    pub name: String,
    pub age: i32,
    pub weight: f64,
    pub sex: Sex,
    pub group: Group,
    pub traits: Vec<Trait>,
}

impl PetDetail {
    pub fn new(pet: Pet, group: Group, traits: Vec<Trait>) -> Self {
        Self {
            id: pet.id,
            name: pet.name,
            age: pet.age,
            weight: pet.weight,
            sex: pet.sex,
            group,
            traits,
        }
    }
}

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

/// Body of `POST /pets`.
///
/// Every field is optional at the serde level so that all missing fields are
/// reported together by validation rather than one at a time by serde.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePet {
    #[validate(
        required,
        length(max = 50),
        custom(function = "petkare_core::validation::not_blank")
    )]
    pub name: Option<String>,
    #[validate(required)]
    pub age: Option<i32>,
    #[validate(required)]
    pub weight: Option<f64>,
    /// Defaults to [`Sex::NotInformed`].
    pub sex: Option<Sex>,
    #[validate(required, nested)]
    pub group: Option<GroupInput>,
    #[validate(required, nested)]
    pub traits: Option<Vec<TraitInput>>,
}

/// Body of `PATCH /pets/{id}`. Omitted fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePet {
    #[validate(
        length(max = 50),
        custom(function = "petkare_core::validation::not_blank")
    )]
    pub name: Option<String>,
    pub age: Option<i32>,
    pub weight: Option<f64>,
    pub sex: Option<Sex>,
    #[validate(nested)]
    pub group: Option<GroupInput>,
    #[validate(nested)]
    pub traits: Option<Vec<TraitInput>>,
}

// ---------------------------------------------------------------------------
// Validated forms
// ---------------------------------------------------------------------------

/// A fully validated pet ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPet {
    pub name: String,
    pub age: i32,
    pub weight: f64,
    pub sex: Sex,
    pub group_name: String,
    pub trait_names: Vec<String>,
}

impl TryFrom<CreatePet> for NewPet {
    type Error = CoreError;

    fn try_from(input: CreatePet) -> Result<Self, Self::Error> {
        input
            .validate()
            .map_err(|e| CoreError::InvalidFields(field_errors(&e)))?;

        let group_name = input.group.as_ref().and_then(GroupInput::normalized_name);
        let trait_names = input
            .traits
            .as_ref()
            .map(|traits| traits.iter().filter_map(TraitInput::normalized_name).collect());

        match (input.name, input.age, input.weight, group_name, trait_names) {
            (Some(name), Some(age), Some(weight), Some(group_name), Some(trait_names)) => {
                Ok(Self {
                    name: name.trim().to_string(),
                    age,
                    weight,
                    sex: input.sex.unwrap_or_default(),
                    group_name,
                    trait_names,
                })
            }
            _ => Err(CoreError::Validation("Incomplete pet payload".into())),
        }
    }
}

/// A validated partial update.
///
/// `trait_names` is `None` when the payload omitted `traits` or sent an empty
/// list; in both cases the pet keeps its current trait set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PetChanges {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub weight: Option<f64>,
    pub sex: Option<Sex>,
    pub group_name: Option<String>,
    pub trait_names: Option<Vec<String>>,
}

impl TryFrom<UpdatePet> for PetChanges {
    type Error = CoreError;

    fn try_from(input: UpdatePet) -> Result<Self, Self::Error> {
        input
            .validate()
            .map_err(|e| CoreError::InvalidFields(field_errors(&e)))?;

        let trait_names = input
            .traits
            .filter(|traits| !traits.is_empty())
            .map(|traits| traits.iter().filter_map(TraitInput::normalized_name).collect());

        Ok(Self {
            name: input.name.map(|n| n.trim().to_string()),
            age: input.age,
            weight: input.weight,
            sex: input.sex,
            group_name: input.group.as_ref().and_then(GroupInput::normalized_name),
            trait_names,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn parse_create(value: serde_json::Value) -> Result<NewPet, CoreError> {
        let input: CreatePet = serde_json::from_value(value).unwrap();
        NewPet::try_from(input)
    }

    fn parse_update(value: serde_json::Value) -> Result<PetChanges, CoreError> {
        let input: UpdatePet = serde_json::from_value(value).unwrap();
        PetChanges::try_from(input)
    }

    #[test]
    fn create_applies_default_sex() {
        let pet = parse_create(json!({
            "name": "Rex",
            "age": 3,
            "weight": 12.5,
            "group": {"scientific_name": "Canis lupus"},
            "traits": [{"name": "Loyal"}]
        }))
        .unwrap();

        assert_eq!(pet.sex, Sex::NotInformed);
        assert_eq!(pet.group_name, "Canis lupus");
        assert_eq!(pet.trait_names, vec!["Loyal".to_string()]);
    }

    #[test]
    fn create_reports_every_missing_field() {
        let err = parse_create(json!({})).unwrap_err();
        assert_matches!(err, CoreError::InvalidFields(fields) => {
            for field in ["name", "age", "weight", "group", "traits"] {
                assert!(fields.contains_key(field), "missing error for {field}");
            }
            assert!(!fields.contains_key("sex"));
        });
    }

    #[test]
    fn create_requires_group_and_traits_objects() {
        let err = parse_create(json!({"name": "Rex", "age": 1, "weight": 1.0})).unwrap_err();
        assert_matches!(err, CoreError::InvalidFields(fields) => {
            assert_eq!(fields["group"], vec!["This field is required.".to_string()]);
            assert_eq!(fields["traits"], vec!["This field is required.".to_string()]);
            assert_eq!(fields.len(), 2);
        });
    }

    #[test]
    fn create_rejects_long_name_and_nested_faults() {
        let err = parse_create(json!({
            "name": "x".repeat(51),
            "age": 1,
            "weight": 1.0,
            "group": {},
            "traits": [{"name": "ok"}, {}]
        }))
        .unwrap_err();

        assert_matches!(err, CoreError::InvalidFields(fields) => {
            assert!(fields.contains_key("name"));
            assert!(fields.contains_key("group.scientific_name"));
            assert!(fields.contains_key("traits[1].name"));
            assert!(!fields.contains_key("traits[0].name"));
        });
    }

    #[test]
    fn create_accepts_name_of_exactly_fifty_chars() {
        let pet = parse_create(json!({
            "name": "é".repeat(50),
            "age": 1,
            "weight": 1.0,
            "group": {"scientific_name": "Felis catus"},
            "traits": []
        }))
        .unwrap();
        assert_eq!(pet.name.chars().count(), 50);
        assert!(pet.trait_names.is_empty());
    }

    #[test]
    fn create_trims_names() {
        let pet = parse_create(json!({
            "name": "  Rex ",
            "age": 1,
            "weight": 1.0,
            "group": {"scientific_name": " Canis lupus "},
            "traits": [{"name": " Loyal"}]
        }))
        .unwrap();
        assert_eq!(pet.name, "Rex");
        assert_eq!(pet.group_name, "Canis lupus");
        assert_eq!(pet.trait_names, vec!["Loyal".to_string()]);
    }

    #[test]
    fn update_with_only_age_touches_nothing_else() {
        let changes = parse_update(json!({"age": 7})).unwrap();
        assert_eq!(
            changes,
            PetChanges {
                age: Some(7),
                ..PetChanges::default()
            }
        );
    }

    #[test]
    fn update_with_empty_traits_keeps_existing_set() {
        let changes = parse_update(json!({"traits": []})).unwrap();
        assert_eq!(changes.trait_names, None);
    }

    #[test]
    fn update_with_traits_replaces_set() {
        let changes = parse_update(json!({"traits": [{"name": "Calm"}, {"name": "Shy"}]})).unwrap();
        assert_eq!(
            changes.trait_names,
            Some(vec!["Calm".to_string(), "Shy".to_string()])
        );
    }

    #[test]
    fn update_validates_supplied_group() {
        let err = parse_update(json!({"group": {"scientific_name": ""}})).unwrap_err();
        assert_matches!(err, CoreError::InvalidFields(fields) => {
            assert!(fields.contains_key("group.scientific_name"));
        });
    }

    #[test]
    fn invalid_sex_fails_deserialization() {
        let result = serde_json::from_value::<UpdatePet>(json!({"sex": "Unknown"}));
        assert!(result.is_err());
    }
}
