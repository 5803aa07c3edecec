pub mod destination;
pub mod name_normalizer;
pub mod translator;

pub use destination::{DestinationGenerator, DirectRouteNamer, OperationContext};
pub use translator::RouteTranslator;
