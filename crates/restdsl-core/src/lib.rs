pub mod config;
pub mod error;
pub mod ir;
pub mod parse;
pub mod transform;

pub use error::{ConfigError, GenerateError, ParseError};
pub use transform::{DestinationGenerator, DirectRouteNamer, OperationContext, RouteTranslator};
