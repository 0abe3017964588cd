use serde_yaml::Value;

/// Renders a config literal as a table cell; `None` means missing.
///
/// Booleans use the `TRUE`/`FALSE` spelling metadata sheets expect.
pub fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(true) => Some("TRUE".to_string()),
        Value::Bool(false) => Some("FALSE".to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::String(text) => Some(text.clone()),
        Value::Sequence(_) | Value::Mapping(_) => serde_yaml::to_string(value)
            .ok()
            .map(|text| text.trim_end().to_string()),
        Value::Tagged(tagged) => render_value(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_scalars() {
        assert_eq!(render_value(&Value::Null), None);
        assert_eq!(render_value(&Value::from(true)).as_deref(), Some("TRUE"));
        assert_eq!(render_value(&Value::from(false)).as_deref(), Some("FALSE"));
        assert_eq!(render_value(&Value::from(42)).as_deref(), Some("42"));
        assert_eq!(render_value(&Value::from("gut")).as_deref(), Some("gut"));
    }

    #[test]
    fn yaml_booleans_render_uppercase() {
        let value: Value = serde_yaml::from_str("TRUE").expect("parse");
        assert_eq!(render_value(&value).as_deref(), Some("TRUE"));
    }
}
