//! Validation of user mappings against the values the API currently accepts.

use onelogin_common::{legal_values::LegalValueSet, user_mappings::UserMapping};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::{legal_values::LegalValues, Error};

const CONDITIONS: &str = "/api/2/mappings/conditions";
const ACTIONS: &str = "/api/2/mappings/actions";

/// Characters that would end or split a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Check every condition and action token of `mapping` against the legal values.
///
/// Legal values are fetched fresh on each call: the condition sources and the
/// actions once, the values and operators per condition source, and the
/// values per action. Sources and actions are percent-encoded into those
/// addresses; one that can't be addressed (empty or dot-only) leaves its
/// dependent categories unconstrained. A category without legal values
/// accepts anything.
///
/// A failed fetch is returned as is. Otherwise all violations are collected
/// into a single [Error::Validation] of the form
/// `<name>.<field> must be one of [<legal values>], got: <value>`, joined by `", "`.
pub async fn validate_mapping_values(
    mapping: &UserMapping,
    legal_values: &dyn LegalValues,
) -> Result<(), Error> {
    let mut violations = Violations {
        mapping_name: mapping.name.as_deref().unwrap_or_default(),
        clauses: vec![],
    };

    let (sources, actions) = futures_util::try_join!(
        fetch_unless(mapping.conditions.is_empty(), legal_values, CONDITIONS),
        fetch_unless(mapping.actions.is_empty(), legal_values, ACTIONS),
    )?;

    for condition in &mapping.conditions {
        let source = condition.source.as_deref().unwrap_or_default();

        let (values, operators) = match path_segment(source) {
            Some(segment) => {
                let values_address = format!("{CONDITIONS}/{segment}/values");
                let operators_address = format!("{CONDITIONS}/{segment}/operators");

                futures_util::try_join!(
                    legal_values.fetch(&values_address),
                    legal_values.fetch(&operators_address),
                )?
            }
            None => Default::default(),
        };

        violations.check("conditions.source", &sources, source);
        violations.check(
            "conditions.value",
            &values,
            condition.value.as_deref().unwrap_or_default(),
        );
        violations.check(
            "conditions.operator",
            &operators,
            condition.operator.as_deref().unwrap_or_default(),
        );
    }

    for action in &mapping.actions {
        let name = action.action.as_deref().unwrap_or_default();
        let values = match path_segment(name) {
            Some(segment) => {
                legal_values
                    .fetch(&format!("{ACTIONS}/{segment}/values"))
                    .await?
            }
            None => LegalValueSet::default(),
        };

        violations.check("actions.action", &actions, name);
        for value in &action.value {
            violations.check("actions.values", &values, value);
        }
    }

    violations.into_result()
}

async fn fetch_unless(
    skip: bool,
    legal_values: &dyn LegalValues,
    address: &str,
) -> Result<LegalValueSet, Error> {
    if skip {
        return Ok(LegalValueSet::default());
    }

    legal_values.fetch(address).await
}

/// Encode `token` as a single path segment.
///
/// Empty and dot-only tokens have no address of their own and yield `None`.
fn path_segment(token: &str) -> Option<String> {
    if token.is_empty() || token.bytes().all(|byte| byte == b'.') {
        return None;
    }

    Some(utf8_percent_encode(token, SEGMENT).to_string())
}

struct Violations<'m> {
    mapping_name: &'m str,
    clauses: Vec<String>,
}

impl Violations<'_> {
    fn check(&mut self, field: &str, legal: &LegalValueSet, value: &str) {
        if !legal.accepts(value) {
            self.clauses.push(format!(
                "{}.{field} must be one of {legal}, got: {value}",
                self.mapping_name
            ));
        }
    }

    fn into_result(self) -> Result<(), Error> {
        if self.clauses.is_empty() {
            return Ok(());
        }

        tracing::debug!(
            mapping = self.mapping_name,
            violations = self.clauses.len(),
            "user mapping rejected"
        );

        Err(Error::Validation(self.clauses.join(", ")))
    }
}
