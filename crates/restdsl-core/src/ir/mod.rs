pub mod definition;
pub mod route;

pub use definition::{RestDefinition, RestsDefinition, VerbDefinition};
pub use route::{HttpMethod, RestParamType, RouteParam, RouteRule};
