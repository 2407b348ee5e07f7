use crate::error::{QueryError, Result};
use serde_json::Value;
use std::collections::HashMap;

/// One unit of statement template plus its bound parameter values.
///
/// Parameter placeholders use the `{name}` syntax inside the template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    template: String,
    parameters: HashMap<String, Value>,
}

impl Query {
    pub fn new(template: impl Into<String>, parameters: HashMap<String, Value>) -> Self {
        Self {
            template: template.into(),
            parameters,
        }
    }

    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    #[must_use]
    pub fn parameters(&self) -> &HashMap<String, Value> {
        &self.parameters
    }

    /// True when neither a template nor parameters have been accumulated
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.template.is_empty() && self.parameters.is_empty()
    }

    /// Concatenate another fragment onto this one.
    ///
    /// Templates are joined with a single space (no separator onto an empty
    /// template); parameter maps are unioned. Overlapping keys fail loudly
    /// instead of silently overwriting.
    pub fn append(mut self, template: &str, parameters: HashMap<String, Value>) -> Result<Self> {
        for (key, value) in parameters {
            if self.parameters.contains_key(&key) {
                return Err(QueryError::ParameterCollision { key });
            }
            self.parameters.insert(key, value);
        }

        if !self.template.is_empty() {
            self.template.push(' ');
        }
        self.template.push_str(template);

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_append_joins_with_space() {
        let q = Query::default()
            .append("MATCH (n) ", HashMap::new())
            .unwrap()
            .append("SET n.x = {p}", HashMap::from([("p".into(), json!(1))]))
            .unwrap();

        assert_eq!(q.template(), "MATCH (n)  SET n.x = {p}");
        assert_eq!(q.parameters().len(), 1);
    }

    #[test]
    fn test_append_onto_empty_has_no_separator() {
        let q = Query::default().append("RETURN n", HashMap::new()).unwrap();
        assert_eq!(q.template(), "RETURN n");
    }

    #[test]
    fn test_append_rejects_duplicate_keys() {
        let first = HashMap::from([("p".to_string(), json!("a"))]);
        let second = HashMap::from([("p".to_string(), json!("b"))]);

        let err = Query::new("A", first).append("B", second).unwrap_err();
        assert!(matches!(err, QueryError::ParameterCollision { key } if key == "p"));
    }

    #[test]
    fn test_empty_query() {
        let q = Query::default();
        assert!(q.is_empty());
        assert_eq!(q.template(), "");
        assert!(q.parameters().is_empty());
    }
}
