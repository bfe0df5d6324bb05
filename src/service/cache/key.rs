//! Cache key construction.
//!
//! Keys follow `stats:<scope>:<kind>[:<name=value;...>]`. Parameters are
//! rendered in name order and datetime values collapse to their calendar
//! day, so two requests for the same logical window always share an entry.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::model::scope::Scope;

const ROOT: &str = "stats";

pub fn build(scope: &Scope, kind: &str, params: &BTreeMap<String, String>) -> String {
    let mut key = format!("{}:{}:{}", ROOT, scope.key_segment(), kind);
    if !params.is_empty() {
        let rendered: Vec<String> = params
            .iter()
            .map(|(name, value)| format!("{}={}", name, canonicalize(value)))
            .collect();
        key.push(':');
        key.push_str(&rendered.join(";"));
    }
    key
}

/// Prefix matching every entry of one scope.
pub fn scope_prefix(scope: &Scope) -> String {
    format!("{}:{}:", ROOT, scope.key_segment())
}

/// Prefix matching every entry the subsystem owns.
pub fn root_prefix() -> String {
    format!("{}:", ROOT)
}

fn canonicalize(value: &str) -> String {
    let value = value.trim();
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
    {
        return datetime.date().to_string();
    }
    value.to_string()
}
