use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use restdsl_core::GenerateError;
use restdsl_core::ir::{RestsDefinition, RouteRule};
use restdsl_core::parse::spec::Swagger;
use restdsl_core::transform::name_normalizer::{
    class_name_for, is_identifier, is_qualified_name, package_name_for,
};
use restdsl_core::transform::{DestinationGenerator, OperationContext, RouteTranslator};

use crate::emitters::route_builder::{SourceLayout, emit_route_builder};
use crate::filer::{self, Filer};

/// Indentation used when none is configured.
pub const DEFAULT_INDENT: &str = "    ";

type NameGenerator<'a> = Box<dyn Fn(&Swagger) -> String + 'a>;

/// Generates a Java `RouteBuilder` for the REST DSL from a Swagger spec.
///
/// Configure with the `with_*` methods, then call exactly one of the output
/// methods. Each output call translates the spec once; synthesized
/// destination names keep counting across calls on the same instance.
pub struct RestDslSourceGenerator<'a> {
    translator: RouteTranslator<'a>,
    class_name: NameGenerator<'a>,
    package_name: NameGenerator<'a>,
    indent: String,
}

impl<'a> RestDslSourceGenerator<'a> {
    pub fn new(spec: &'a Swagger) -> Self {
        Self {
            translator: RouteTranslator::new(spec),
            class_name: Box::new(class_name_for),
            package_name: Box::new(package_name_for),
            indent: DEFAULT_INDENT.to_string(),
        }
    }

    pub fn with_destination_generator<F>(mut self, generator: F) -> Self
    where
        F: FnMut(&OperationContext<'_>) -> String + 'a,
    {
        self.translator = self.translator.with_destination_generator(generator);
        self
    }

    pub fn with_destination_strategy<G>(mut self, strategy: G) -> Self
    where
        G: DestinationGenerator + 'a,
    {
        self.translator = self.translator.with_destination_strategy(strategy);
        self
    }

    /// Derive the class name from the spec with a custom function.
    pub fn with_class_name_generator<F>(mut self, generator: F) -> Self
    where
        F: Fn(&Swagger) -> String + 'a,
    {
        self.class_name = Box::new(generator);
        self
    }

    /// Use a fixed class name.
    pub fn with_class_name(self, name: &str) -> Result<Self, GenerateError> {
        if !is_identifier(name) {
            return Err(GenerateError::InvalidConfiguration(format!(
                "{name:?} is not a valid class name"
            )));
        }
        let name = name.to_string();
        Ok(self.with_class_name_generator(move |_| name.clone()))
    }

    /// Derive the package name from the spec with a custom function.
    pub fn with_package_name_generator<F>(mut self, generator: F) -> Self
    where
        F: Fn(&Swagger) -> String + 'a,
    {
        self.package_name = Box::new(generator);
        self
    }

    /// Use a fixed package name.
    pub fn with_package_name(self, name: &str) -> Result<Self, GenerateError> {
        if !is_qualified_name(name) {
            return Err(GenerateError::InvalidConfiguration(format!(
                "{name:?} is not a valid package name"
            )));
        }
        let name = name.to_string();
        Ok(self.with_package_name_generator(move |_| name.clone()))
    }

    pub fn with_indent(mut self, indent: &str) -> Self {
        self.indent = indent.to_string();
        self
    }

    pub fn class_name(&self) -> String {
        (self.class_name)(self.translator.spec())
    }

    pub fn package_name(&self) -> String {
        (self.package_name)(self.translator.spec())
    }

    /// `package.ClassName`, the key used for filer output.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package_name(), self.class_name())
    }

    /// Translate into the in-memory REST DSL model. No I/O.
    pub fn to_definition(&mut self) -> Result<RestsDefinition, GenerateError> {
        self.translator.to_definition()
    }

    /// Render the full source file.
    pub fn render(&mut self) -> Result<String, GenerateError> {
        let rules = self.translator.translate()?;
        self.render_rules(&rules)
    }

    /// Write the source to any byte sink.
    pub fn to_writer<W: Write + ?Sized>(&mut self, writer: &mut W) -> Result<(), GenerateError> {
        let source = self.render()?;
        writer.write_all(source.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Write `<dir>/<package dirs>/<ClassName>.java`, replacing any existing
    /// file. Returns the path written.
    ///
    /// Nothing is created when translation fails. A failure while writing can
    /// leave a partial file behind.
    pub fn to_directory(&mut self, dir: &Path) -> Result<PathBuf, GenerateError> {
        let source = self.render()?;
        let path = filer::source_path(dir, &self.qualified_name());

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(&path)?);
        writer.write_all(source.as_bytes())?;
        writer.flush()?;

        log::info!("wrote {}", path.display());
        Ok(path)
    }

    /// Write the source through a [`Filer`], keyed by the qualified class name.
    pub fn to_filer<F: Filer + ?Sized>(&mut self, filer: &mut F) -> Result<(), GenerateError> {
        let source = self.render()?;
        let qualified_name = self.qualified_name();

        let mut sink = filer.create_source_file(&qualified_name)?;
        sink.write_all(source.as_bytes())?;
        sink.flush()?;

        log::info!("generated {qualified_name}");
        Ok(())
    }

    fn render_rules(&self, rules: &[RouteRule]) -> Result<String, GenerateError> {
        let spec = self.translator.spec();
        let package_name = self.package_name();
        let class_name = self.class_name();

        if !is_qualified_name(&package_name) {
            return Err(GenerateError::InvalidConfiguration(format!(
                "derived package name {package_name:?} is not valid"
            )));
        }
        if !is_identifier(&class_name) {
            return Err(GenerateError::InvalidConfiguration(format!(
                "derived class name {class_name:?} is not valid"
            )));
        }

        let layout = SourceLayout {
            package_name: &package_name,
            class_name: &class_name,
            title: spec.title().unwrap_or(&class_name),
            base_path: spec.base_path.as_deref(),
            indent: &self.indent,
        };

        emit_route_builder(&layout, rules).map_err(|e| GenerateError::Render(e.to_string()))
    }
}
