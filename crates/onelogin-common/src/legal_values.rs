//! Legal values for user mapping conditions and actions.

use std::fmt::Display;

use fnv::FnvHashSet;
use serde::{Deserialize, Serialize};

/// A single record returned by one of the legal value endpoints.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct LegalValue {
    /// The token accepted by the API.
    pub value: String,

    /// Human-readable name of the value, when the API provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The tokens currently accepted for one mapping field category.
///
/// Tokens keep the order the API listed them in, with duplicates collapsed.
/// An empty set means the category is unconstrained and accepts anything.
#[derive(Clone, Default, Debug)]
pub struct LegalValueSet {
    ordered: Vec<String>,
    members: FnvHashSet<String>,
}

impl LegalValueSet {
    /// Whether the API defined no constraint for this category.
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Number of distinct accepted tokens.
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Exact, case-sensitive membership test.
    pub fn contains(&self, token: &str) -> bool {
        self.members.contains(token)
    }

    /// Whether `token` may be submitted, taking the freeform fallback into account.
    pub fn accepts(&self, token: &str) -> bool {
        self.is_empty() || self.contains(token)
    }

    /// Iterate the accepted tokens in the order the API listed them.
    pub fn iter(&self) -> impl Iterator<Item = &str> + use<'_> {
        self.ordered.iter().map(String::as_str)
    }

    /// Add a token, ignoring it if it is already present.
    pub fn insert(&mut self, token: String) {
        if self.members.insert(token.clone()) {
            self.ordered.push(token);
        }
    }
}

impl Extend<String> for LegalValueSet {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        for token in iter {
            self.insert(token);
        }
    }
}

impl Extend<LegalValue> for LegalValueSet {
    fn extend<I: IntoIterator<Item = LegalValue>>(&mut self, iter: I) {
        self.extend(iter.into_iter().map(|legal_value| legal_value.value));
    }
}

impl<T> FromIterator<T> for LegalValueSet
where
    LegalValueSet: Extend<T>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl PartialEq for LegalValueSet {
    fn eq(&self, other: &Self) -> bool {
        self.ordered == other.ordered
    }
}

impl Eq for LegalValueSet {}

/// Formats as a bracketed, space separated list: `[ri has_role 12345]`.
impl Display for LegalValueSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.ordered.join(" "))
    }
}

/// Deserializes from the wire format, a list of `{"value": ..}` records.
///
/// `null` is read as the empty set.
impl<'de> Deserialize<'de> for LegalValueSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let records = Option::<Vec<LegalValue>>::deserialize(deserializer)?;
        Ok(records.into_iter().flatten().collect())
    }
}
