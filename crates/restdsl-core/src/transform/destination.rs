use crate::ir::HttpMethod;
use crate::parse::operation::Operation;

/// An operation together with where it sits in the spec.
#[derive(Debug, Clone, Copy)]
pub struct OperationContext<'a> {
    pub method: HttpMethod,
    pub path: &'a str,
    pub operation: &'a Operation,
}

impl<'a> OperationContext<'a> {
    /// The declared `operationId`, `None` when missing or blank.
    pub fn operation_id(&self) -> Option<&'a str> {
        self.operation.id()
    }
}

/// Picks the endpoint URI a matched request is routed to.
pub trait DestinationGenerator {
    fn destination(&mut self, op: &OperationContext<'_>) -> String;
}

impl<F> DestinationGenerator for F
where
    F: FnMut(&OperationContext<'_>) -> String,
{
    fn destination(&mut self, op: &OperationContext<'_>) -> String {
        self(op)
    }
}

/// Default naming: `direct:<operationId>`, or `direct:restN` when the
/// operation has no id.
///
/// `N` counts synthesized names only and starts at 1. The counter lives in
/// this value, so a fresh namer always starts over.
#[derive(Debug, Default)]
pub struct DirectRouteNamer {
    count: u32,
}

impl DirectRouteNamer {
    pub const PREFIX: &'static str = "direct:";

    pub fn new() -> Self {
        Self::default()
    }

    /// Number of names synthesized so far.
    pub fn synthesized(&self) -> u32 {
        self.count
    }

    fn next_name(&mut self) -> String {
        self.count += 1;
        format!("rest{}", self.count)
    }
}

impl DestinationGenerator for DirectRouteNamer {
    fn destination(&mut self, op: &OperationContext<'_>) -> String {
        match op.operation_id() {
            Some(id) => format!("{}{id}", Self::PREFIX),
            None => format!("{}{}", Self::PREFIX, self.next_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(id: Option<&str>) -> Operation {
        Operation {
            operation_id: id.map(String::from),
            ..Operation::default()
        }
    }

    fn name(namer: &mut DirectRouteNamer, operation: &Operation) -> String {
        namer.destination(&OperationContext {
            method: HttpMethod::Get,
            path: "/pets",
            operation,
        })
    }

    #[test]
    fn test_operation_id_used_verbatim() {
        let mut namer = DirectRouteNamer::new();
        assert_eq!(name(&mut namer, &op(Some("listPets"))), "direct:listPets");
        assert_eq!(namer.synthesized(), 0);
    }

    #[test]
    fn test_synthesized_names_start_at_one() {
        let mut namer = DirectRouteNamer::new();
        assert_eq!(name(&mut namer, &op(None)), "direct:rest1");
        assert_eq!(name(&mut namer, &op(None)), "direct:rest2");
    }

    #[test]
    fn test_ids_do_not_consume_counter() {
        let mut namer = DirectRouteNamer::new();
        assert_eq!(name(&mut namer, &op(None)), "direct:rest1");
        assert_eq!(name(&mut namer, &op(Some("a"))), "direct:a");
        assert_eq!(name(&mut namer, &op(None)), "direct:rest2");
    }

    #[test]
    fn test_blank_id_is_synthesized() {
        let mut namer = DirectRouteNamer::new();
        assert_eq!(name(&mut namer, &op(Some(""))), "direct:rest1");
    }

    #[test]
    fn test_closure_is_a_generator() {
        let mut fixed = |_: &OperationContext<'_>| "seda:queue".to_string();
        let operation = op(Some("listPets"));
        let ctx = OperationContext {
            method: HttpMethod::Post,
            path: "/pets",
            operation: &operation,
        };
        assert_eq!(fixed.destination(&ctx), "seda:queue");
    }
}
