pub mod emitters;
pub mod filer;
pub mod generator;

pub use filer::{BuildDirFiler, Filer};
pub use generator::RestDslSourceGenerator;
