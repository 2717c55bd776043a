//! Query-template descriptors: declarative rules for turning a base URL plus
//! live feature properties into a concrete filtered request.

use serde::{Deserialize, Serialize};

/// One fragment of a result label.
///
/// Serialized form is either a plain string (appended verbatim) or a
/// `{ "prop": "<attributeName>" }` marker (replaced by that feature
/// property's value).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabelFragment {
    Property { prop: String },
    Literal(String),
}

/// Declarative request-building rule, shared by free-text search and
/// on-demand GeoJSON loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryTemplate {
    /// Base endpoint the compiled parameters are appended to.
    pub url: String,
    /// Filter expression containing `$query` or `$<property>` placeholders.
    #[serde(default)]
    pub query: Option<String>,
    /// Attribute names to request back, in order.
    #[serde(default)]
    pub property_load: Vec<String>,
    /// Attribute names whose current feature value is substituted into
    /// `query` at compile time.
    #[serde(default)]
    pub property_scope: Vec<String>,
    /// Label fragments concatenated, in order, into a result's display
    /// label.
    #[serde(default)]
    pub label: Vec<LabelFragment>,
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_descriptor() {
        let descriptor: QueryTemplate = serde_json::from_value(json!({
            "url": "https://geo.example.com/ows?service=WFS&request=GetFeature",
            "query": "NAME ILIKE '%$query%'",
            "property_load": ["name", "kind"],
            "label": ["Lake: ", { "prop": "name" }]
        }))
        .unwrap();

        assert_eq!(descriptor.property_load, vec!["name", "kind"]);
        assert!(descriptor.property_scope.is_empty());
        assert_eq!(
            descriptor.label,
            vec![
                LabelFragment::Literal("Lake: ".to_string()),
                LabelFragment::Property {
                    prop: "name".to_string()
                },
            ]
        );
    }
}
