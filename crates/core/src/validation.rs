//! Flattening of `validator` errors into a field-path keyed map.
//!
//! Nested structs produce dotted paths (`group.scientific_name`) and list
//! items produce indexed paths (`traits[1].name`).

use std::collections::BTreeMap;

use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Field path -> human-readable messages for that field.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Flatten a (possibly nested) [`ValidationErrors`] into [`FieldErrors`].
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    collect(errors, "", &mut out);
    out
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut FieldErrors) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(list) => {
                out.entry(path)
                    .or_default()
                    .extend(list.iter().map(message_for));
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(inner, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

/// Reject strings that are empty once surrounding whitespace is removed.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Render a single validation failure.
///
/// Explicit messages set on the rule win; otherwise the rule code decides.
fn message_for(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    match error.code.as_ref() {
        "required" => "This field is required.".to_string(),
        "blank" => "This field may not be blank.".to_string(),
        "length" => match error.params.get("max") {
            Some(max) => format!("Ensure this field has no more than {max} characters."),
            None => "Ensure this field has a valid length.".to_string(),
        },
        code => format!("Invalid value ({code})."),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use validator::Validate;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct Inner {
        #[validate(required, length(max = 5))]
        label: Option<String>,
    }

    #[derive(Debug, Deserialize, Validate)]
    struct Outer {
        #[validate(required, length(max = 3))]
        name: Option<String>,
        #[validate(nested)]
        inner: Option<Inner>,
        #[validate(nested)]
        items: Vec<Inner>,
    }

    #[test]
    fn top_level_fields_use_plain_names() {
        let value = Outer {
            name: None,
            inner: None,
            items: vec![],
        };
        let errors = field_errors(&value.validate().unwrap_err());
        assert_eq!(errors["name"], vec!["This field is required.".to_string()]);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn length_message_names_the_limit() {
        let value = Outer {
            name: Some("toolong".into()),
            inner: None,
            items: vec![],
        };
        let errors = field_errors(&value.validate().unwrap_err());
        assert_eq!(
            errors["name"],
            vec!["Ensure this field has no more than 3 characters.".to_string()]
        );
    }

    #[test]
    fn blank_strings_are_rejected() {
        assert!(not_blank("Rex").is_ok());
        let err = not_blank("   ").unwrap_err();
        assert_eq!(message_for(&err), "This field may not be blank.");
    }

    #[test]
    fn nested_and_list_paths() {
        let value = Outer {
            name: Some("ok".into()),
            inner: Some(Inner { label: None }),
            items: vec![
                Inner {
                    label: Some("fine".into()),
                },
                Inner {
                    label: Some("far too long".into()),
                },
            ],
        };
        let errors = field_errors(&value.validate().unwrap_err());
        assert!(errors.contains_key("inner.label"));
        assert!(errors.contains_key("items[1].label"));
        assert!(!errors.contains_key("items[0].label"));
    }
}
