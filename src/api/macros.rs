//! Endpoint macro router
//!
//! Resolves `{placeholder}` tokens in endpoint templates against an ordered
//! list of JSON objects, and turns parameter maps into query strings.

use serde_json::{Map, Value};

/// Ordered macro contexts used to fill endpoint placeholders.
///
/// When several contexts hold the same key, the one supplied first wins. A
/// resource passes itself first and caller overrides second, so its own `id`
/// cannot be shadowed while keys unique to the overrides still resolve.
/// Contexts that are not JSON objects are ignored.
#[derive(Debug, Clone, Default)]
pub struct Macros<'a> {
    contexts: Vec<&'a Value>,
}

impl<'a> Macros<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a context with lower precedence than those already present
    pub fn with(mut self, context: &'a Value) -> Self {
        self.contexts.push(context);
        self
    }

    /// Find the value for `key` in precedence order
    pub fn lookup(&self, key: &str) -> Option<&'a Value> {
        self.contexts
            .iter()
            .find_map(|context| context.as_object().and_then(|map| map.get(key)))
    }

    /// Resolve the placeholders of `template`
    pub fn resolve(&self, template: &str) -> String {
        resolve(template, self)
    }

    /// Collect the current value of each key, skipping keys no context holds
    pub fn pick(&self, keys: &[&str]) -> Map<String, Value> {
        keys.iter()
            .filter_map(|key| self.lookup(key).map(|v| (key.to_string(), v.clone())))
            .collect()
    }
}

impl<'a> From<&'a Value> for Macros<'a> {
    fn from(context: &'a Value) -> Self {
        Self {
            contexts: vec![context],
        }
    }
}

impl<'a> From<Vec<&'a Value>> for Macros<'a> {
    fn from(contexts: Vec<&'a Value>) -> Self {
        Self { contexts }
    }
}

impl<'a, const N: usize> From<[&'a Value; N]> for Macros<'a> {
    fn from(contexts: [&'a Value; N]) -> Self {
        Self {
            contexts: contexts.to_vec(),
        }
    }
}

/// Replace every `{name}` in `template` with its value from `macros`.
///
/// Placeholders without a matching key are kept verbatim; `{}` is not a
/// placeholder.
pub fn resolve(template: &str, macros: &Macros<'_>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match after.find('}') {
            Some(0) => {
                out.push_str("{}");
                rest = &after[1..];
            }
            Some(close) => {
                let key = &after[..close];
                match macros.lookup(key) {
                    Some(value) => out.push_str(&render(value)),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

/// Build `key=value&key=value` from a parameter map.
///
/// Falsy values (`null`, `false`, `0`, `""`) are left out entirely. Array
/// values are joined with commas.
pub fn query_string(params: &Map<String, Value>) -> String {
    params
        .iter()
        .filter(|(_, value)| is_truthy(value))
        .map(|(key, value)| format!("{}={}", key, encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn encode(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| urlencoding::encode(&render(item)).into_owned())
            .collect::<Vec<_>>()
            .join(","),
        other => urlencoding::encode(&render(other)).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_single_context() {
        let server = json!({"id": 42});
        let url = Macros::from(&server).resolve("servers/{id}");
        assert_eq!(url, "servers/42");
    }

    #[test]
    fn test_first_context_wins() {
        let server = json!({"id": 42, "name": "web"});
        let overrides = json!({"id": 7, "action_id": 99});
        let url = Macros::from([&server, &overrides]).resolve("servers/{id}/actions/{action_id}");
        assert_eq!(url, "servers/42/actions/99");
    }

    #[test]
    fn test_unresolved_placeholder_is_kept() {
        let ctx = json!({"id": 1});
        let url = Macros::from(&ctx).resolve("servers/{id}/actions/{action_id}");
        assert_eq!(url, "servers/1/actions/{action_id}");
    }

    #[test]
    fn test_empty_braces_and_unclosed_brace() {
        let ctx = json!({"id": 1});
        assert_eq!(Macros::from(&ctx).resolve("a/{}/b"), "a/{}/b");
        assert_eq!(Macros::from(&ctx).resolve("a/{id}/{oops"), "a/1/{oops");
    }

    #[test]
    fn test_non_object_contexts_are_ignored() {
        let scalar = json!("id");
        let ctx = json!({"id": 3});
        let url = Macros::from([&scalar, &ctx]).resolve("volumes/{id}");
        assert_eq!(url, "volumes/3");
    }

    #[test]
    fn test_string_values_are_not_quoted() {
        let ctx = json!({"name": "fsn1"});
        assert_eq!(Macros::from(&ctx).resolve("locations/{name}"), "locations/fsn1");
    }

    #[test]
    fn test_pick_takes_first_holder() {
        let own = json!({"name": "local", "labels": {"env": "prod"}});
        let extra = json!({"name": "ignored", "description": "x"});
        let body = Macros::from([&own, &extra]).pick(&["name", "description", "missing"]);
        assert_eq!(body.get("name"), Some(&json!("local")));
        assert_eq!(body.get("description"), Some(&json!("x")));
        assert!(!body.contains_key("missing"));
        assert!(!body.contains_key("labels"));
    }

    #[test]
    fn test_query_string_skips_falsy() {
        let params = json!({
            "a": 0,
            "b": "",
            "c": false,
            "d": null,
            "name": "web",
            "page": 2
        });
        let qs = query_string(params.as_object().unwrap());
        assert_eq!(qs, "name=web&page=2");
    }

    #[test]
    fn test_query_string_empty() {
        assert_eq!(query_string(&Map::new()), "");
    }

    #[test]
    fn test_query_string_encodes_values() {
        let params = json!({"label_selector": "env=prod", "status": ["running", "off"]});
        let qs = query_string(params.as_object().unwrap());
        assert_eq!(qs, "label_selector=env%3Dprod&status=running,off");
    }
}
