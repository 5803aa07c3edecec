use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level project configuration loaded from `.restdsl.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RestDslConfig {
    pub input: String,
    pub output: String,
    /// Java package of the generated class (derived from `host` when unset).
    pub package_name: Option<String>,
    /// Generated class name (derived from `info.title` when unset).
    pub class_name: Option<String>,
    pub indent: String,
    pub destination: DestinationConfig,
}

impl Default for RestDslConfig {
    fn default() -> Self {
        Self {
            input: "swagger.yaml".to_string(),
            output: "src/main/java".to_string(),
            package_name: None,
            class_name: None,
            indent: "    ".to_string(),
            destination: DestinationConfig::default(),
        }
    }
}

/// Where matched requests are routed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DestinationConfig {
    pub strategy: DestinationStrategy,
    /// Endpoint URI used by the `fixed` strategy.
    pub uri: Option<String>,
}

/// How destination URIs are chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationStrategy {
    /// `direct:<operationId>`, or `direct:restN` for operations without an id.
    #[default]
    Direct,
    /// Every route goes to `destination.uri`.
    Fixed,
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".restdsl.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<RestDslConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config: RestDslConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# restdsl configuration
input: swagger.yaml
output: src/main/java

# package_name: com.example.api    # defaults to the reversed spec host
# class_name: PetstoreRoutes       # defaults to <Title>RestDslRoutes
indent: "    "

destination:
  strategy: direct      # direct | fixed
  # uri: seda:requests  # required by the fixed strategy
"#
}
