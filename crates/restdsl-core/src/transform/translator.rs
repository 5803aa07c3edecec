use std::collections::HashSet;

use indexmap::IndexMap;

use crate::error::GenerateError;
use crate::ir::{RestParamType, RestsDefinition, RouteParam, RouteRule};
use crate::parse::operation::Operation;
use crate::parse::parameter::{Parameter, ParameterLocation, ParameterOrRef};
use crate::parse::spec::Swagger;

use super::destination::{DestinationGenerator, DirectRouteNamer, OperationContext};

/// Turns the operations of a bound spec into route rules.
///
/// The destination generator is owned by the translator, so any numbering
/// state it keeps is private to this instance. Translating twice on the same
/// instance continues that numbering; a new instance starts over.
pub struct RouteTranslator<'a> {
    spec: &'a Swagger,
    destinations: Box<dyn DestinationGenerator + 'a>,
}

impl<'a> RouteTranslator<'a> {
    pub fn new(spec: &'a Swagger) -> Self {
        Self {
            spec,
            destinations: Box::new(DirectRouteNamer::new()),
        }
    }

    /// Replace destination naming with a closure. The default is not consulted
    /// afterwards.
    pub fn with_destination_generator<F>(self, generator: F) -> Self
    where
        F: FnMut(&OperationContext<'_>) -> String + 'a,
    {
        self.with_destination_strategy(generator)
    }

    /// Replace destination naming with any [`DestinationGenerator`].
    pub fn with_destination_strategy<G>(mut self, strategy: G) -> Self
    where
        G: DestinationGenerator + 'a,
    {
        self.destinations = Box::new(strategy);
        self
    }

    pub fn spec(&self) -> &'a Swagger {
        self.spec
    }

    /// One rule per (path, method), in declared order.
    pub fn translate(&mut self) -> Result<Vec<RouteRule>, GenerateError> {
        let spec = self.spec;
        let paths = spec.paths.as_ref().ok_or_else(|| {
            GenerateError::InvalidSpecification("specification has no paths".to_string())
        })?;

        let mut rules = Vec::new();
        let mut seen_ids = HashSet::new();

        for (path, item) in paths {
            if path.trim().is_empty() {
                return Err(GenerateError::InvalidSpecification(
                    "path template must not be empty".to_string(),
                ));
            }

            for (method, operation) in item.operations() {
                if let Some(id) = operation.id() {
                    if !seen_ids.insert(id) {
                        log::warn!(
                            "operationId {id:?} is declared more than once; routes will share a destination"
                        );
                    }
                }

                let ctx = OperationContext {
                    method,
                    path: path.as_str(),
                    operation,
                };
                let destination = self.destinations.destination(&ctx);
                log::debug!("{method} {path} -> {destination}");

                rules.push(RouteRule {
                    method,
                    path: path.clone(),
                    id: operation.id().map(String::from),
                    description: describe(operation),
                    consumes: operation
                        .consumes
                        .clone()
                        .unwrap_or_else(|| spec.consumes.clone()),
                    produces: operation
                        .produces
                        .clone()
                        .unwrap_or_else(|| spec.produces.clone()),
                    params: merge_parameters(&item.parameters, &operation.parameters),
                    destination,
                });
            }
        }

        Ok(rules)
    }

    /// Translate straight into the in-memory REST DSL model.
    pub fn to_definition(&mut self) -> Result<RestsDefinition, GenerateError> {
        let rules = self.translate()?;
        Ok(RestsDefinition::from_rules(
            self.spec.base_path.as_deref(),
            rules,
        ))
    }
}

fn describe(operation: &Operation) -> Option<String> {
    let present = |s: &&String| !s.trim().is_empty();
    operation
        .summary
        .as_ref()
        .filter(present)
        .or(operation.description.as_ref().filter(present))
        .cloned()
}

/// Path-level parameters first; an operation parameter with the same name and
/// location replaces the shared one in place.
fn merge_parameters(shared: &[ParameterOrRef], own: &[ParameterOrRef]) -> Vec<RouteParam> {
    let mut merged: IndexMap<(&str, ParameterLocation), &Parameter> = IndexMap::new();

    for param in shared.iter().chain(own) {
        match param {
            ParameterOrRef::Parameter(p) => {
                merged.insert((p.name.as_str(), p.location), p);
            }
            ParameterOrRef::Ref { ref_path } => {
                log::debug!("skipping parameter reference {ref_path}");
            }
        }
    }

    merged.into_values().map(to_route_param).collect()
}

fn to_route_param(param: &Parameter) -> RouteParam {
    let param_type = match param.location {
        ParameterLocation::Path => RestParamType::Path,
        ParameterLocation::Query => RestParamType::Query,
        ParameterLocation::Header => RestParamType::Header,
        ParameterLocation::Body => RestParamType::Body,
        ParameterLocation::FormData => RestParamType::FormData,
    };

    let array_type = match param.param_type.as_deref() {
        Some("array") => param.items.as_ref().and_then(|i| i.item_type.clone()),
        _ => None,
    };

    RouteParam {
        name: param.name.clone(),
        param_type,
        required: param.required,
        description: param.description.clone(),
        data_type: param.param_type.clone(),
        data_format: param.format.clone(),
        default_value: param.default.as_ref().map(value_to_string),
        allowable_values: param.enum_values.iter().map(value_to_string).collect(),
        collection_format: param.collection_format.clone(),
        array_type,
    }
}

fn value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
