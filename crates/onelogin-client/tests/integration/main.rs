use onelogin_client::models::user_mappings::{
    UserMapping, UserMappingAction, UserMappingCondition,
};

mod test_legal_values;
mod test_user_mappings;

const HOST: &str = "test.com";

/// Legal values accepting the tokens of [valid_mapping].
const ALL_LEGAL: &str =
    r#"[{"value":"ri"}, {"value":"has_role"}, {"value": "12345"}, {"value": "set_status"}]"#;

/// Legal values that reject `set_status`.
const CONDITIONS_ONLY: &str = r#"[{"value":"ri"}, {"value":"has_role"}, {"value": "12345"}]"#;

const MALFORMED: &str = r#"[{"value":"ri"}, "value":"has_role", "value": "12345"]"#;

fn mapping(
    name: &str,
    (operator, source, value): (&str, &str, &str),
    (action, values): (&str, &[&str]),
) -> UserMapping {
    UserMapping {
        name: Some(name.to_string()),
        conditions: vec![UserMappingCondition {
            operator: Some(operator.to_string()),
            source: Some(source.to_string()),
            value: Some(value.to_string()),
        }],
        actions: vec![UserMappingAction {
            action: Some(action.to_string()),
            value: values.iter().map(|value| value.to_string()).collect(),
        }],
        ..Default::default()
    }
}

fn valid_mapping(name: &str) -> UserMapping {
    mapping(name, ("ri", "has_role", "12345"), ("set_status", &["12345"]))
}

fn invalid_mapping(name: &str) -> UserMapping {
    mapping(name, ("asdf", "asdf", "asdf"), ("asdf", &["2"]))
}

fn json(value: serde_json::Value) -> Vec<u8> {
    serde_json::to_vec(&value).unwrap()
}
