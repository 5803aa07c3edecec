use std::fs;
use std::io;

use restdsl_core::GenerateError;
use restdsl_core::parse;
use restdsl_core::parse::spec::Swagger;
use restdsl_java::{BuildDirFiler, Filer, RestDslSourceGenerator};

const PETSTORE: &str = include_str!("../../restdsl-core/tests/fixtures/petstore.yaml");

fn petstore() -> Swagger {
    parse::from_yaml(PETSTORE).unwrap()
}

#[test]
fn render_petstore_scaffold() {
    let spec = petstore();
    let source = RestDslSourceGenerator::new(&spec).render().unwrap();

    assert!(source.starts_with("package io.swagger.petstore;\n"));
    assert!(source.contains("import javax.annotation.Generated;\n"));
    assert!(source.contains("import org.apache.camel.model.rest.RestParamType;\n"));
    assert!(source.contains("import org.apache.camel.model.rest.CollectionFormat;\n"));
    assert!(source.contains("@Generated(\"restdsl-java\")\n"));
    assert!(
        source.contains("public final class SwaggerPetstoreRestDslRoutes extends RouteBuilder {\n")
    );
    assert!(source.contains("Defines Apache Camel routes for REST Swagger Petstore."));
    assert_eq!(source.matches("rest(\"/v2\")").count(), 7);
}

#[test]
fn render_petstore_routes() {
    let spec = petstore();
    let source = RestDslSourceGenerator::new(&spec).render().unwrap();

    assert!(source.contains(".put(\"/pet\")\n"));
    assert!(source.contains(".id(\"updatePet\")\n"));
    assert!(source.contains(".description(\"Update an existing pet\")\n"));
    assert!(source.contains(".consumes(\"application/json,application/xml\")\n"));
    assert!(source.contains(".produces(\"application/json,application/xml\")\n"));
    assert!(source.contains(".to(\"direct:updatePet\");\n"));
    assert!(source.contains(".get(\"/pet/{petId}\")\n"));
    assert!(source.contains(".to(\"direct:rest1\");\n"));
    assert!(source.contains(".to(\"direct:rest2\");\n"));
    assert!(source.contains(".type(RestParamType.formData)\n"));
    assert!(source.contains(".defaultValue(\"available\")\n"));
    assert!(source.contains(".dataFormat(\"int64\")\n"));
    assert!(source.contains(".required(true)\n"));
    assert!(source.contains(".required(false)\n"));
    assert!(!source.contains(".required(True)"));
    assert!(!source.contains(".required(False)"));

    // Declared order is preserved in the output
    let put = source.find(".put(\"/pet\")").unwrap();
    let post = source.find(".post(\"/pet\")").unwrap();
    let inventory = source.find(".get(\"/store/inventory\")").unwrap();
    assert!(put < post && post < inventory);
}

#[test]
fn render_with_fixed_destination() {
    let spec = petstore();
    let source = RestDslSourceGenerator::new(&spec)
        .with_destination_generator(|_| "seda:queue".to_string())
        .render()
        .unwrap();
    assert_eq!(source.matches(".to(\"seda:queue\");").count(), 7);
    assert!(!source.contains("direct:"));
}

#[test]
fn render_with_configured_names() {
    let spec = petstore();
    let source = RestDslSourceGenerator::new(&spec)
        .with_package_name("com.example.pets")
        .unwrap()
        .with_class_name("PetRoutes")
        .unwrap()
        .with_indent("  ")
        .render()
        .unwrap();
    assert!(source.starts_with("package com.example.pets;\n"));
    assert!(source.contains("public final class PetRoutes extends RouteBuilder {\n"));
    assert!(source.contains("\n    rest(\"/v2\")\n      .put(\"/pet\")\n"));
}

#[test]
fn invalid_names_rejected_at_configuration() {
    let spec = petstore();
    let result = RestDslSourceGenerator::new(&spec).with_class_name("9Routes");
    assert!(matches!(
        result,
        Err(GenerateError::InvalidConfiguration(_))
    ));

    let result = RestDslSourceGenerator::new(&spec).with_package_name("com..pets");
    assert!(matches!(
        result,
        Err(GenerateError::InvalidConfiguration(_))
    ));

    let result = RestDslSourceGenerator::new(&spec).with_class_name("class");
    assert!(matches!(
        result,
        Err(GenerateError::InvalidConfiguration(_))
    ));

    let result = RestDslSourceGenerator::new(&spec).with_package_name("com.example.new");
    assert!(matches!(
        result,
        Err(GenerateError::InvalidConfiguration(_))
    ));
}

#[test]
fn reserved_host_labels_are_escaped() {
    let mut spec = petstore();
    spec.host = Some("new.int.example.com".to_string());
    spec.info.title = Some("C:\\users api".to_string());
    let source = RestDslSourceGenerator::new(&spec).render().unwrap();
    assert!(source.starts_with("package com.example.int_.new_;\n"));
    assert!(source.contains("Defines Apache Camel routes for REST C:&#92;users api."));
}

#[test]
fn writer_and_directory_output_match() {
    let spec = petstore();
    let mut buffer = Vec::new();
    RestDslSourceGenerator::new(&spec)
        .to_writer(&mut buffer)
        .unwrap();

    let tmp = tempfile::tempdir().unwrap();
    let path = RestDslSourceGenerator::new(&spec)
        .to_directory(tmp.path())
        .unwrap();

    assert_eq!(
        path,
        tmp.path()
            .join("io")
            .join("swagger")
            .join("petstore")
            .join("SwaggerPetstoreRestDslRoutes.java")
    );
    assert_eq!(fs::read(&path).unwrap(), buffer);
}

#[test]
fn directory_output_is_idempotent() {
    let spec = petstore();
    let tmp = tempfile::tempdir().unwrap();

    let first = RestDslSourceGenerator::new(&spec)
        .to_directory(tmp.path())
        .unwrap();
    let first_content = fs::read_to_string(&first).unwrap();

    let second = RestDslSourceGenerator::new(&spec)
        .to_directory(tmp.path())
        .unwrap();
    let second_content = fs::read_to_string(&second).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_content, second_content);
}

#[test]
fn directory_output_overwrites_existing_file() {
    let spec = petstore();
    let tmp = tempfile::tempdir().unwrap();
    let mut generator = RestDslSourceGenerator::new(&spec);

    let path = tmp
        .path()
        .join("io/swagger/petstore/SwaggerPetstoreRestDslRoutes.java");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "stale content that is much longer than nothing").unwrap();

    generator.to_directory(tmp.path()).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("package io.swagger.petstore;"));
    assert!(!content.contains("stale"));
}

#[test]
fn filer_output_matches_writer() {
    let spec = petstore();
    let mut buffer = Vec::new();
    RestDslSourceGenerator::new(&spec)
        .to_writer(&mut buffer)
        .unwrap();

    let tmp = tempfile::tempdir().unwrap();
    let mut filer = BuildDirFiler::new(tmp.path());
    RestDslSourceGenerator::new(&spec)
        .to_filer(&mut filer)
        .unwrap();

    assert_eq!(filer.generated().len(), 1);
    assert_eq!(
        filer.generated()[0],
        filer.source_path("io.swagger.petstore.SwaggerPetstoreRestDslRoutes")
    );
    assert_eq!(fs::read(&filer.generated()[0]).unwrap(), buffer);
}

#[test]
fn filer_refuses_second_generation_of_same_class() {
    let spec = petstore();
    let tmp = tempfile::tempdir().unwrap();
    let mut filer = BuildDirFiler::new(tmp.path());

    RestDslSourceGenerator::new(&spec)
        .to_filer(&mut filer)
        .unwrap();
    let result = RestDslSourceGenerator::new(&spec).to_filer(&mut filer);
    match result {
        Err(GenerateError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::AlreadyExists),
        other => panic!("expected AlreadyExists, got {other:?}"),
    }
}

struct MemoryFiler {
    names: Vec<String>,
    content: Vec<u8>,
}

impl Filer for MemoryFiler {
    fn create_source_file(
        &mut self,
        qualified_name: &str,
    ) -> io::Result<Box<dyn io::Write + '_>> {
        self.names.push(qualified_name.to_string());
        Ok(Box::new(&mut self.content))
    }
}

#[test]
fn custom_filer_is_keyed_by_qualified_name() {
    let spec = petstore();
    let mut filer = MemoryFiler {
        names: Vec::new(),
        content: Vec::new(),
    };
    RestDslSourceGenerator::new(&spec)
        .with_class_name("PetRoutes")
        .unwrap()
        .to_filer(&mut filer)
        .unwrap();

    assert_eq!(filer.names, vec!["io.swagger.petstore.PetRoutes"]);
    let content = String::from_utf8(filer.content).unwrap();
    assert!(content.contains("public final class PetRoutes"));
}

#[test]
fn definition_output_has_all_operations() {
    let spec = petstore();
    let defs = RestDslSourceGenerator::new(&spec).to_definition().unwrap();
    assert_eq!(defs.verb_count(), 7);
    let destinations: Vec<&str> = defs.verbs().map(|v| v.to.as_str()).collect();
    assert_eq!(
        destinations,
        vec![
            "direct:updatePet",
            "direct:addPet",
            "direct:findPetsByStatus",
            "direct:getPetById",
            "direct:rest1",
            "direct:rest2",
            "direct:getInventory",
        ]
    );
}

#[test]
fn missing_paths_produce_no_artifact() {
    let spec = Swagger::default();

    let mut buffer = Vec::new();
    let result = RestDslSourceGenerator::new(&spec).to_writer(&mut buffer);
    assert!(matches!(
        result,
        Err(GenerateError::InvalidSpecification(_))
    ));
    assert!(buffer.is_empty());

    let tmp = tempfile::tempdir().unwrap();
    let result = RestDslSourceGenerator::new(&spec).to_directory(tmp.path());
    assert!(matches!(
        result,
        Err(GenerateError::InvalidSpecification(_))
    ));
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);

    let mut filer = BuildDirFiler::new(tmp.path());
    let result = RestDslSourceGenerator::new(&spec).to_filer(&mut filer);
    assert!(matches!(
        result,
        Err(GenerateError::InvalidSpecification(_))
    ));
    assert!(filer.generated().is_empty());

    let result = RestDslSourceGenerator::new(&spec).to_definition();
    assert!(matches!(
        result,
        Err(GenerateError::InvalidSpecification(_))
    ));
}

#[test]
fn untitled_spec_uses_default_names() {
    let spec = parse::from_yaml(
        r#"
swagger: "2.0"
info:
  version: "1"
paths:
  /ping:
    get:
      responses: {}
"#,
    )
    .unwrap();
    let source = RestDslSourceGenerator::new(&spec).render().unwrap();
    assert!(source.starts_with("package rest.dsl.generated;\n"));
    assert!(source.contains("public final class RestDslRoutes extends RouteBuilder {\n"));
    assert!(source.contains("        rest()\n            .get(\"/ping\")\n                .to(\"direct:rest1\");\n"));
    assert!(!source.contains("RestParamType"));
}
