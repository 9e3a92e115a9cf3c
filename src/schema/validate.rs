use super::{FieldSchema, FieldType, SchemaDescriptor, SchemaErrorCode, ValidationErrors};
use serde_json::{Map, Value};

/// Validates `params` against `schema`.
///
/// Strings are trimmed before any length or allowed-value check, absent
/// optional fields take their default, and unknown extra keys are dropped
/// from the validated object.
pub fn validate_against(
    schema: &SchemaDescriptor,
    params: &Map<String, Value>,
) -> Result<Map<String, Value>, ValidationErrors> {
    let mut errors = ValidationErrors::new(SchemaErrorCode::ValidationError);
    let mut validated = Map::new();

    for field in &schema.fields {
        match params.get(&field.name).filter(|value| !value.is_null()) {
            Some(value) => {
                if let Some(value) = check_field(field, value, &mut errors) {
                    validated.insert(field.name.clone(), value);
                }
            }
            None if field.required => errors.push(&field.name, "Field required"),
            None => {
                if let Some(default) = &field.default {
                    validated.insert(field.name.clone(), default.clone());
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(validated)
    } else {
        Err(errors)
    }
}

fn check_field(field: &FieldSchema, value: &Value, errors: &mut ValidationErrors) -> Option<Value> {
    let before = errors.fields.len();
    let normalized = match field.field_type {
        FieldType::String => check_string(field, value, errors),
        FieldType::Integer => check_integer(field, value, errors),
        FieldType::Boolean => match value {
            Value::Bool(_) => Some(value.clone()),
            _ => type_error(field, errors),
        },
        FieldType::Object => match value {
            Value::Object(_) => Some(value.clone()),
            _ => type_error(field, errors),
        },
        FieldType::StringList => check_string_list(field, value, errors),
    };
    if errors.fields.len() > before {
        return None;
    }
    normalized
}

fn type_error(field: &FieldSchema, errors: &mut ValidationErrors) -> Option<Value> {
    errors.push(
        &field.name,
        format!("Input should be a valid {}", field.field_type),
    );
    None
}

fn check_string(field: &FieldSchema, value: &Value, errors: &mut ValidationErrors) -> Option<Value> {
    let Some(raw) = value.as_str() else {
        return type_error(field, errors);
    };
    let trimmed = raw.trim();
    let length = trimmed.chars().count();
    let constraints = &field.constraints;

    if let Some(min) = constraints.min_length {
        if length < min {
            errors.push(
                &field.name,
                format!("String should have at least {min} {}", plural(min, "character")),
            );
            return None;
        }
    }
    if let Some(max) = constraints.max_length {
        if length > max {
            errors.push(
                &field.name,
                format!("String should have at most {max} {}", plural(max, "character")),
            );
            return None;
        }
    }
    if let Some(allowed) = &constraints.allowed {
        if !allowed.values.iter().any(|candidate| candidate == trimmed) {
            errors.push(&field.name, format!("Value error, {}", allowed.message));
            return None;
        }
    }
    Some(Value::String(trimmed.to_string()))
}

fn check_integer(field: &FieldSchema, value: &Value, errors: &mut ValidationErrors) -> Option<Value> {
    let number = match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        _ => None,
    };
    let Some(number) = number else {
        return type_error(field, errors);
    };
    let constraints = &field.constraints;
    if let Some(min) = constraints.min_value {
        if number < min {
            errors.push(
                &field.name,
                format!("Input should be greater than or equal to {min}"),
            );
            return None;
        }
    }
    if let Some(max) = constraints.max_value {
        if number > max {
            errors.push(
                &field.name,
                format!("Input should be less than or equal to {max}"),
            );
            return None;
        }
    }
    Some(Value::from(number))
}

fn check_string_list(
    field: &FieldSchema,
    value: &Value,
    errors: &mut ValidationErrors,
) -> Option<Value> {
    let Some(items) = value.as_array() else {
        return type_error(field, errors);
    };
    let mut normalized = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item.as_str() {
            Some(text) => normalized.push(Value::String(text.trim().to_string())),
            None => errors.push(
                &format!("{}.{index}", field.name),
                "Input should be a valid string",
            ),
        }
    }
    if let Some(min) = field.constraints.min_items {
        if items.len() < min {
            errors.push(
                &field.name,
                format!(
                    "List should have at least {min} {} after validation, not {}",
                    plural(min, "item"),
                    items.len()
                ),
            );
        }
    }
    Some(Value::Array(normalized))
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::builtin::builtin_schemas;
    use serde_json::json;

    fn note_maker() -> SchemaDescriptor {
        builtin_schemas()
            .into_iter()
            .find(|schema| schema.tool == "NoteMaker")
            .expect("note maker schema")
    }

    fn params(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("object")
    }

    #[test]
    fn defaults_fill_optional_fields_and_strings_are_trimmed() {
        let validated = validate_against(
            &note_maker(),
            &params(json!({"user_info": {"user_id": "u1"}, "topic": "  gravity  ", "extra": 1})),
        )
        .expect("valid");
        assert_eq!(validated["topic"], json!("gravity"));
        assert_eq!(validated["format"], json!("outline"));
        assert_eq!(validated["detail_level"], json!("medium"));
        assert!(!validated.contains_key("extra"));
    }

    #[test]
    fn missing_and_invalid_fields_are_reported_per_field() {
        let errors = validate_against(&note_maker(), &params(json!({"format": "haiku"})))
            .expect_err("invalid");
        assert_eq!(errors.error_code(), SchemaErrorCode::ValidationError);
        assert_eq!(errors.fields["topic"], vec!["Field required".to_string()]);
        assert_eq!(errors.fields["user_info"], vec!["Field required".to_string()]);
        assert!(errors.fields["format"][0].contains("outline, bullets, or paragraph"));
        let required: Vec<&str> = errors.required_fields().collect();
        assert_eq!(required, vec!["topic", "user_info"]);
    }

    #[test]
    fn null_counts_as_absent() {
        let errors = validate_against(
            &note_maker(),
            &params(json!({"user_info": {}, "topic": null})),
        )
        .expect_err("invalid");
        assert_eq!(errors.fields["topic"], vec!["Field required".to_string()]);
    }
}
