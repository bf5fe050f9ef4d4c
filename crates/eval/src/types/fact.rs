//! Fact set type for the evaluator.

use std::collections::BTreeMap;

use super::values::Value;

/// Applicant facts keyed by field name. Rebuilt for every evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactSet(pub BTreeMap<String, Value>);

impl FactSet {
    pub fn new() -> Self {
        FactSet(BTreeMap::new())
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Serialize to a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for FactSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        FactSet(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_remove() {
        let mut facts = FactSet::new();
        facts.insert("cgpa", 3);
        facts.insert("disciplinary_actions", 0);
        assert_eq!(facts.len(), 2);
        assert_eq!(facts.get("disciplinary_actions"), Some(&Value::from(0)));
        assert!(facts.remove("cgpa").is_some());
        assert!(facts.get("cgpa").is_none());
    }

    #[test]
    fn collect_and_to_json() {
        let facts: FactSet = [("family_income", 5000), ("co_curricular_score", 85)]
            .into_iter()
            .collect();
        assert_eq!(
            facts.to_json(),
            serde_json::json!({"co_curricular_score": 85, "family_income": 5000})
        );
    }
}
