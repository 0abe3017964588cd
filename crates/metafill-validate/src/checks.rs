//! Rule checks for a single cell against a single field definition.

use metafill_model::{FieldDefinition, FieldType, render_value};

/// Errors for one cell; empty when the cell satisfies `definition`.
///
/// A missing cell only fails `required`. An empty string fails `empty: false`
/// and otherwise passes every other rule.
pub fn check_cell(definition: &FieldDefinition, value: Option<&str>) -> Vec<String> {
    let Some(value) = value else {
        return if definition.is_required() {
            vec!["required field".to_string()]
        } else {
            Vec::new()
        };
    };
    if value.is_empty() {
        return if definition.allows_empty() == Some(false) {
            vec!["empty values not allowed".to_string()]
        } else {
            Vec::new()
        };
    }

    if let Some(options) = definition.any_of() {
        let mut option_errors = Vec::with_capacity(options.len());
        for option in &options {
            let errors = check_rules(option, value);
            if errors.is_empty() {
                return check_min(definition, value);
            }
            option_errors.push(errors.join("; "));
        }
        let detail = option_errors
            .iter()
            .enumerate()
            .map(|(index, errors)| format!("anyof definition {index}: {errors}"))
            .collect::<Vec<_>>()
            .join(", ");
        return vec![format!("no definitions validate ({detail})")];
    }
    check_rules(definition, value)
}

fn check_rules(definition: &FieldDefinition, value: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if let Some(field_type) = definition.field_type() {
        if !matches_type(field_type, value) {
            errors.push(format!("must be of {} type", field_type.as_str()));
            return errors;
        }
    }
    if let Some(allowed) = definition.allowed() {
        let permitted = allowed
            .iter()
            .filter_map(render_value)
            .any(|candidate| candidate == value);
        if !permitted {
            errors.push(format!("unallowed value {value}"));
        }
    }
    errors.extend(check_min(definition, value));
    errors
}

fn check_min(definition: &FieldDefinition, value: &str) -> Vec<String> {
    let Some(min) = definition.min() else {
        return Vec::new();
    };
    match value.trim().parse::<f64>() {
        Ok(number) if number < min => vec![format!("min value is {min}")],
        _ => Vec::new(),
    }
}

/// Whether a string cell coerces to `field_type`.
pub fn matches_type(field_type: FieldType, value: &str) -> bool {
    let trimmed = value.trim();
    match field_type {
        FieldType::String => true,
        FieldType::Number => trimmed.parse::<f64>().is_ok_and(f64::is_finite),
        FieldType::Integer => trimmed.parse::<i64>().is_ok(),
        FieldType::Boolean => matches!(
            trimmed.to_ascii_lowercase().as_str(),
            "true" | "false"
        ),
    }
}
