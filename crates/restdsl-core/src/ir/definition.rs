//! In-memory REST DSL definition model.
//!
//! This is the object graph a running router registers directly, without a
//! detour through generated source.

use serde::Serialize;

use super::route::{HttpMethod, RouteParam, RouteRule};

/// Root of the REST DSL model.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RestsDefinition {
    pub rests: Vec<RestDefinition>,
}

/// A `rest(path)` block with its verbs.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RestDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub verbs: Vec<VerbDefinition>,
}

/// One verb under a `rest` block, routed to a single destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerbDefinition {
    pub method: HttpMethod,
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub produces: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<RouteParam>,
    pub to: String,
}

impl From<RouteRule> for VerbDefinition {
    fn from(rule: RouteRule) -> Self {
        Self {
            method: rule.method,
            uri: rule.path,
            id: rule.id,
            description: rule.description,
            consumes: join_media_types(&rule.consumes),
            produces: join_media_types(&rule.produces),
            params: rule.params,
            to: rule.destination,
        }
    }
}

impl RestsDefinition {
    /// Build the model from translated rules, grouped under one base path.
    pub fn from_rules(base_path: Option<&str>, rules: Vec<RouteRule>) -> Self {
        let rest = RestDefinition {
            path: base_path.filter(|p| !p.is_empty()).map(String::from),
            verbs: rules.into_iter().map(VerbDefinition::from).collect(),
        };
        Self { rests: vec![rest] }
    }

    /// Total number of verbs across all `rest` blocks.
    pub fn verb_count(&self) -> usize {
        self.rests.iter().map(|r| r.verbs.len()).sum()
    }

    pub fn verbs(&self) -> impl Iterator<Item = &VerbDefinition> {
        self.rests.iter().flat_map(|r| r.verbs.iter())
    }
}

/// Media types are carried as the DSL's comma-separated list.
pub fn join_media_types(types: &[String]) -> Option<String> {
    if types.is_empty() {
        None
    } else {
        Some(types.join(","))
    }
}
