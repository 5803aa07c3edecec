pub mod operation;
pub mod parameter;
pub mod spec;

use crate::error::ParseError;
use spec::Swagger;

/// Parse a Swagger spec from YAML.
pub fn from_yaml(input: &str) -> Result<Swagger, ParseError> {
    let spec: Swagger = serde_yaml_ng::from_str(input)?;
    log_version(&spec);
    Ok(spec)
}

/// Parse a Swagger spec from JSON.
pub fn from_json(input: &str) -> Result<Swagger, ParseError> {
    let spec: Swagger = serde_json::from_str(input)?;
    log_version(&spec);
    Ok(spec)
}

fn log_version(spec: &Swagger) {
    if spec.swagger != "2.0" {
        log::warn!(
            "expected a Swagger 2.0 document, found version {:?}; continuing",
            spec.swagger
        );
    }
}
