//! The query-template compiler: static text plus property placeholders in,
//! concrete filter/request strings out.
//!
//! Both entry points are pure: identical inputs always yield the identical
//! string, nothing is mutated, and substitution never fails — a property
//! missing from the bag degrades to the empty string.

use once_cell::sync::Lazy;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use peta_catalog::QueryTemplate;
use regex::{NoExpand, Regex};
use serde_json::{Map, Value};

/// Name of the filter parameter appended to compiled requests.
pub const FILTER_PARAM: &str = "CQL_FILTER";

/// Name of the attribute-list parameter appended to compiled requests.
pub const PROPERTY_PARAM: &str = "propertyName";

// Everything `encodeURIComponent` escapes: all non-alphanumerics except
// - _ . ! ~ * ' ( ).
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

// The well-known free-text placeholder, matched case-insensitively.
static QUERY_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\$query").expect("placeholder pattern"));

/// Compile a query template plus a feature's property bag into a concrete
/// request URL.
///
/// Every `$<name>` placeholder for a name in `property_scope` is replaced,
/// in listed order, by the property's string value. Descriptors are authored
/// pre-escaped, so the substituted filter is percent-decoded before being
/// appended as the filter parameter, followed by the attribute-list
/// parameter built from `property_load`.
pub fn build_request_url(descriptor: &QueryTemplate, properties: &Map<String, Value>) -> String {
    let mut filter = descriptor.query.clone().unwrap_or_default();
    for name in &descriptor.property_scope {
        let value = properties.get(name).map(property_string).unwrap_or_default();
        filter = filter.replace(&format!("${}", name), &value);
    }
    let filter = percent_decode_str(&filter).decode_utf8_lossy();
    format!(
        "{}&{}={}&{}",
        descriptor.url,
        FILTER_PARAM,
        filter,
        property_list(descriptor)
    )
}

/// Compile a free-text search template: every case-insensitive `$query`
/// placeholder is replaced by the query text and the resulting filter is
/// percent-encoded before being appended, followed by the attribute-list
/// parameter.
pub fn build_search_url(descriptor: &QueryTemplate, query_text: &str) -> String {
    let filter = match &descriptor.query {
        Some(query) => QUERY_PLACEHOLDER
            .replace_all(query, NoExpand(query_text))
            .into_owned(),
        None => String::new(),
    };
    let filter = utf8_percent_encode(&filter, COMPONENT).to_string();
    format!(
        "{}&{}={}&{}",
        descriptor.url,
        FILTER_PARAM,
        filter,
        property_list(descriptor)
    )
}

// `propertyName=(a),(b)`; bare `propertyName=` when the descriptor requests
// nothing back.
fn property_list(descriptor: &QueryTemplate) -> String {
    let names = descriptor
        .property_load
        .iter()
        .map(|name| format!("({})", name))
        .collect::<Vec<_>>()
        .join(",");
    format!("{}={}", PROPERTY_PARAM, names)
}

// String form of a property value the way a URL wants it: strings verbatim,
// numbers and booleans via Display, null as empty.
pub(crate) fn property_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
