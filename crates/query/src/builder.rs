use crate::clause::ClauseKind;
use crate::error::Result;
use crate::ident::fresh_param_id;
use crate::query::Query;
use serde_json::Value;
use std::collections::HashMap;

/// Accumulates Cypher fragments for one mutation unit (typically one source
/// file) and renders them as a single parameterized statement.
///
/// Fragments are stored per [`ClauseKind`] in call order; rendering always
/// follows the canonical clause order. Every caller-supplied parameter key
/// is renamed to a fresh identifier before storage, so independently
/// authored fragments can never clash inside the merged statement.
///
/// Intake operations consume and return the builder, so the accumulator
/// flows through the call chain:
///
/// ```
/// use srcgraph_query::QueryBuilder;
///
/// let query = QueryBuilder::new()
///     .where_eq("n", "path", "/a.js")
///     .set("n", "status", "parsed")
///     .build()
///     .unwrap();
/// assert_eq!(query.parameters().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct QueryBuilder {
    clauses: [Vec<Query>; ClauseKind::COUNT],
}

impl QueryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment under the given clause kind.
    ///
    /// Caller-supplied parameter keys are renamed to fresh identifiers and
    /// the matching `{key}` placeholders in the template are rewritten to
    /// the fresh names. Used directly by walkers for the clause families
    /// without a dedicated intake operation (merge, create, unwind, ...).
    #[must_use]
    pub fn add_fragment(
        mut self,
        kind: ClauseKind,
        template: impl Into<String>,
        parameters: HashMap<String, Value>,
    ) -> Self {
        let (template, parameters) = rename_parameters(template.into(), parameters);
        self.clauses[kind.index()].push(Query::new(template, parameters));
        self
    }

    /// Append a `MATCH (var[:Label])` fragment, optionally filtered.
    ///
    /// Non-empty `wheres` are joined with `" AND "` behind a single `WHERE`;
    /// an empty condition set omits the keyword entirely. Conditions may
    /// reference keys of `parameters` as `{key}` placeholders; they are
    /// rewritten along with the keys.
    #[must_use]
    pub fn match_node(
        self,
        node_var: &str,
        label: Option<&str>,
        wheres: &[String],
        parameters: HashMap<String, Value>,
    ) -> Self {
        let mut template = String::from("MATCH (");
        template.push_str(node_var);
        if let Some(label) = label {
            template.push(':');
            template.push_str(label);
        }
        template.push_str(") ");

        if !wheres.is_empty() {
            template.push_str("WHERE ");
            template.push_str(&wheres.join(" AND "));
        }

        self.add_fragment(ClauseKind::MatchWhere, template, parameters)
    }

    /// Append a `WHERE var.prop = value` filter bound to one fresh parameter
    #[must_use]
    pub fn where_eq(self, node_var: &str, property: &str, value: impl Into<Value>) -> Self {
        self.filter("WHERE", node_var, property, "=", value)
    }

    /// Append a `WHERE var.prop <op> value` filter with an explicit operator
    #[must_use]
    pub fn where_op(
        self,
        node_var: &str,
        property: &str,
        operator: &str,
        value: impl Into<Value>,
    ) -> Self {
        self.filter("WHERE", node_var, property, operator, value)
    }

    /// Append an `AND`-prefixed equality filter
    #[must_use]
    pub fn and_where(self, node_var: &str, property: &str, value: impl Into<Value>) -> Self {
        self.filter("AND", node_var, property, "=", value)
    }

    /// Append an `AND`-prefixed filter with an explicit operator
    #[must_use]
    pub fn and_where_op(
        self,
        node_var: &str,
        property: &str,
        operator: &str,
        value: impl Into<Value>,
    ) -> Self {
        self.filter("AND", node_var, property, operator, value)
    }

    /// Append an `OR`-prefixed equality filter
    #[must_use]
    pub fn or_where(self, node_var: &str, property: &str, value: impl Into<Value>) -> Self {
        self.filter("OR", node_var, property, "=", value)
    }

    /// Append an `OR`-prefixed filter with an explicit operator
    #[must_use]
    pub fn or_where_op(
        self,
        node_var: &str,
        property: &str,
        operator: &str,
        value: impl Into<Value>,
    ) -> Self {
        self.filter("OR", node_var, property, operator, value)
    }

    /// Filter fragments render in exact call order; the caller owns the
    /// reading of the joined boolean expression, there is no grouping or
    /// precedence handling here.
    fn filter(
        mut self,
        prefix: &str,
        node_var: &str,
        property: &str,
        operator: &str,
        value: impl Into<Value>,
    ) -> Self {
        let binding = fresh_param_id();
        let template = format!("{prefix} {node_var}.{property} {operator} {{{binding}}}");
        let parameters = HashMap::from([(binding, value.into())]);
        self.clauses[ClauseKind::MatchWhere.index()].push(Query::new(template, parameters));
        self
    }

    /// Append a zero-parameter label assignment: ``SET var:`Label` ``
    #[must_use]
    pub fn set_label(mut self, node_var: &str, new_label: &str) -> Self {
        let template = format!("SET {node_var}:`{new_label}`");
        self.clauses[ClauseKind::Set.index()].push(Query::new(template, HashMap::new()));
        self
    }

    /// Append a property assignment bound to one fresh parameter
    #[must_use]
    pub fn set(mut self, node_var: &str, property: &str, value: impl Into<Value>) -> Self {
        let binding = fresh_param_id();
        let template = format!("SET {node_var}.{property} = {{{binding}}}");
        let parameters = HashMap::from([(binding, value.into())]);
        self.clauses[ClauseKind::Set.index()].push(Query::new(template, parameters));
        self
    }

    /// Render the accumulated fragments as one statement.
    ///
    /// Clause kinds are visited in canonical order, fragments within a kind
    /// in call order. Read-only: calling twice without intervening mutation
    /// yields the same result. An empty builder yields an empty query.
    pub fn build(&self) -> Result<Query> {
        let mut merged = Query::default();

        for kind in ClauseKind::ORDER {
            for fragment in &self.clauses[kind.index()] {
                merged = merged.append(fragment.template(), fragment.parameters().clone())?;
            }
        }

        Ok(merged)
    }

    /// Empty every clause bucket.
    ///
    /// The builder becomes equivalent to a freshly constructed one. The
    /// identifier generator is process-wide and is never rewound, so
    /// identifiers issued after a clear stay distinct from earlier ones.
    pub fn clear(&mut self) {
        for bucket in &mut self.clauses {
            bucket.clear();
        }
    }
}

/// Rewrite every caller-supplied parameter key to a fresh identifier.
///
/// Returns a new template with `{old}` placeholders rewritten to the fresh
/// names and a new map keyed by them. Pure: the caller's data is consumed,
/// never mutated in place.
fn rename_parameters(
    mut template: String,
    parameters: HashMap<String, Value>,
) -> (String, HashMap<String, Value>) {
    let mut renamed = HashMap::with_capacity(parameters.len());

    for (key, value) in parameters {
        let fresh = fresh_param_id();
        template = template.replace(&format!("{{{key}}}"), &format!("{{{fresh}}}"));
        renamed.insert(fresh, value);
    }

    (template, renamed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn params(entries: &[(&str, Value)]) -> HashMap<String, Value> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_match_without_conditions_omits_where() {
        let query = QueryBuilder::new()
            .match_node("n", Some("File"), &[], params(&[("path", json!("/a.js"))]))
            .build()
            .unwrap();

        assert_eq!(query.template(), "MATCH (n:File) ");
        assert!(!query.template().contains("WHERE"));
        assert_eq!(query.parameters().len(), 1);
        assert_eq!(query.parameters().values().next(), Some(&json!("/a.js")));
    }

    #[test]
    fn test_match_without_label() {
        let query = QueryBuilder::new()
            .match_node("n", None, &[], HashMap::new())
            .build()
            .unwrap();

        assert_eq!(query.template(), "MATCH (n) ");
    }

    #[test]
    fn test_match_joins_conditions_with_and() {
        let wheres = vec!["n.path = {path}".to_string(), "n.session = {sid}".to_string()];
        let query = QueryBuilder::new()
            .match_node(
                "n",
                Some("File"),
                &wheres,
                params(&[("path", json!("/a.js")), ("sid", json!("s1"))]),
            )
            .build()
            .unwrap();

        let template = query.template();
        assert_eq!(template.matches("WHERE").count(), 1);
        assert_eq!(template.matches(" AND ").count(), 1);
        // Placeholders were rewritten to the fresh parameter names.
        assert!(!template.contains("{path}"));
        assert!(!template.contains("{sid}"));
        for key in query.parameters().keys() {
            assert!(template.contains(&format!("{{{key}}}")));
        }
    }

    #[test]
    fn test_renaming_does_not_reuse_caller_keys() {
        let query = QueryBuilder::new()
            .match_node("n", None, &[], params(&[("path", json!("/a.js"))]))
            .build()
            .unwrap();

        assert!(!query.parameters().contains_key("path"));
    }

    #[test]
    fn test_where_chain_preserves_call_order() {
        let query = QueryBuilder::new()
            .where_eq("n", "x", "v")
            .and_where("n", "y", "w")
            .or_where("n", "z", "u")
            .build()
            .unwrap();

        let template = query.template();
        let where_at = template.find("WHERE n.x").unwrap();
        let and_at = template.find("AND n.y").unwrap();
        let or_at = template.find("OR n.z").unwrap();
        assert!(where_at < and_at);
        assert!(and_at < or_at);
        assert_eq!(query.parameters().len(), 3);
    }

    #[test]
    fn test_where_op_uses_explicit_operator() {
        let query = QueryBuilder::new()
            .where_op("n", "line", ">", 10)
            .build()
            .unwrap();

        assert!(query.template().contains("n.line > {"));
    }

    #[test]
    fn test_canonical_order_independent_of_call_order() {
        let query = QueryBuilder::new()
            .add_fragment(ClauseKind::Return, "RETURN n", HashMap::new())
            .set("n", "status", "parsed")
            .add_fragment(ClauseKind::Create, "CREATE (m:Function)", HashMap::new())
            .add_fragment(ClauseKind::Merge, "MERGE (f:File)", HashMap::new())
            .match_node("n", None, &[], HashMap::new())
            .build()
            .unwrap();

        let template = query.template();
        let match_at = template.find("MATCH").unwrap();
        let merge_at = template.find("MERGE").unwrap();
        let create_at = template.find("CREATE").unwrap();
        let set_at = template.find("SET").unwrap();
        let return_at = template.find("RETURN").unwrap();
        assert!(match_at < merge_at);
        assert!(merge_at < create_at);
        assert!(create_at < set_at);
        assert!(set_at < return_at);
    }

    #[test]
    fn test_insertion_order_within_one_kind() {
        let query = QueryBuilder::new()
            .add_fragment(ClauseKind::Create, "CREATE (a)", HashMap::new())
            .add_fragment(ClauseKind::Create, "CREATE (b)", HashMap::new())
            .add_fragment(ClauseKind::Create, "CREATE (c)", HashMap::new())
            .build()
            .unwrap();

        assert_eq!(query.template(), "CREATE (a) CREATE (b) CREATE (c)");
    }

    #[test]
    fn test_set_label_binds_no_parameters() {
        let query = QueryBuilder::new().set_label("n", "Visited").build().unwrap();

        assert_eq!(query.template(), "SET n:`Visited`");
        assert!(query.parameters().is_empty());
    }

    #[test]
    fn test_match_then_set_end_to_end() {
        let query = QueryBuilder::new()
            .match_node("n", Some("File"), &[], params(&[("path", json!("/a.js"))]))
            .set("n", "status", "parsed")
            .build()
            .unwrap();

        let template = query.template();
        assert!(template.starts_with("MATCH (n:File)  SET n.status = {"));
        assert!(template.ends_with('}'));
        assert_eq!(query.parameters().len(), 2);

        let mut values: Vec<&Value> = query.parameters().values().collect();
        values.sort_by_key(|v| v.to_string());
        assert_eq!(values, vec![&json!("/a.js"), &json!("parsed")]);
        for key in query.parameters().keys() {
            assert!(key.chars().next().unwrap().is_ascii_alphabetic());
        }
    }

    #[test]
    fn test_parameter_keys_stay_unique_across_many_calls() {
        let mut builder = QueryBuilder::new();
        for i in 0..50 {
            builder = builder
                .set("n", "prop", format!("v{i}"))
                .where_eq("n", "x", i)
                .add_fragment(
                    ClauseKind::Create,
                    "CREATE (m {v: {val}})",
                    params(&[("val", json!(i))]),
                );
        }

        let query = builder.build().unwrap();
        // HashMap keys are unique by construction; the real check is that
        // nothing was lost to an overwrite on the way in.
        assert_eq!(query.parameters().len(), 150);
    }

    #[test]
    fn test_empty_builder_builds_empty_query() {
        let query = QueryBuilder::new().build().unwrap();
        assert!(query.is_empty());
    }

    #[test]
    fn test_build_twice_is_deterministic() {
        let builder = QueryBuilder::new().set_label("n", "File");
        let first = builder.build().unwrap();
        let second = builder.build().unwrap();
        assert_eq!(first.template(), second.template());
    }

    #[test]
    fn test_clear_resets_to_fresh_state() {
        let mut builder = QueryBuilder::new()
            .match_node("n", Some("File"), &[], params(&[("path", json!("/a.js"))]))
            .set("n", "status", "parsed");

        builder.clear();
        let query = builder.build().unwrap();
        assert_eq!(query.template(), "");
        assert!(query.parameters().is_empty());
    }

    #[test]
    fn test_identifiers_not_reused_after_clear() {
        let mut builder = QueryBuilder::new().set("n", "a", 1);
        let before: Vec<String> = builder.build().unwrap().parameters().keys().cloned().collect();

        builder.clear();
        let builder = builder.set("n", "a", 1);
        let after = builder.build().unwrap();

        for key in before {
            assert!(!after.parameters().contains_key(&key));
        }
    }
}
