use minijinja::{Environment, context};
use restdsl_core::ir::{RouteParam, RouteRule};
use restdsl_core::ir::definition::join_media_types;

/// Collection formats understood by the DSL's `CollectionFormat` enum.
const COLLECTION_FORMATS: &[&str] = &["csv", "ssv", "tsv", "pipes", "multi"];

/// Everything around the route statements: where the class lives and how it
/// is laid out.
#[derive(Debug, Clone, Copy)]
pub struct SourceLayout<'a> {
    pub package_name: &'a str,
    pub class_name: &'a str,
    pub title: &'a str,
    pub base_path: Option<&'a str>,
    pub indent: &'a str,
}

/// Escape a value for use inside a Java string literal.
fn escape_java(value: String) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}

/// Make a value safe inside a Javadoc block: no `*/`, no line breaks, and no
/// backslashes that javac would read as unicode escapes.
fn escape_javadoc(value: String) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '*' if chars.peek() == Some(&'/') => {
                chars.next();
                out.push_str("*&#47;");
            }
            '\\' => out.push_str("&#92;"),
            '\r' | '\n' => out.push(' '),
            other => out.push(other),
        }
    }
    out
}

/// Emit the `RouteBuilder` source: one `rest(..)` statement per rule.
pub fn emit_route_builder(
    layout: &SourceLayout<'_>,
    rules: &[RouteRule],
) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.add_filter("java", escape_java);
    env.add_filter("javadoc", escape_javadoc);
    env.add_template(
        "route_builder.java.j2",
        include_str!("../../templates/route_builder.java.j2"),
    )?;
    let tmpl = env.get_template("route_builder.java.j2")?;

    let routes: Vec<minijinja::Value> = rules.iter().map(build_route_context).collect();
    let uses_params = rules.iter().any(|r| !r.params.is_empty());
    let uses_collection_format = rules
        .iter()
        .flat_map(|r| &r.params)
        .any(|p| collection_format(p).is_some());

    let indent = |level: usize| layout.indent.repeat(level);

    tmpl.render(context! {
        package_name => layout.package_name,
        class_name => layout.class_name,
        title => layout.title,
        base_path => layout.base_path.filter(|p| !p.is_empty()),
        generator => env!("CARGO_PKG_NAME"),
        uses_params => uses_params,
        uses_collection_format => uses_collection_format,
        routes => routes,
        i1 => indent(1),
        i2 => indent(2),
        i3 => indent(3),
        i4 => indent(4),
        i5 => indent(5),
    })
}

fn build_route_context(rule: &RouteRule) -> minijinja::Value {
    let params: Vec<minijinja::Value> = rule.params.iter().map(build_param_context).collect();

    context! {
        verb => rule.method.verb(),
        path => rule.path.clone(),
        id => rule.id.clone(),
        description => rule.description.clone(),
        consumes => join_media_types(&rule.consumes),
        produces => join_media_types(&rule.produces),
        params => params,
        destination => rule.destination.clone(),
    }
}

fn build_param_context(param: &RouteParam) -> minijinja::Value {
    // Already escaped and quoted; the template inserts this verbatim.
    let allowable_values = if param.allowable_values.is_empty() {
        None
    } else {
        Some(
            param
                .allowable_values
                .iter()
                .map(|v| format!("\"{}\"", escape_java(v.clone())))
                .collect::<Vec<_>>()
                .join(", "),
        )
    };

    context! {
        name => param.name.clone(),
        kind => param.param_type.as_str(),
        required => if param.required { "true" } else { "false" },
        description => param.description.clone(),
        data_type => param.data_type.clone(),
        data_format => param.data_format.clone(),
        default_value => param.default_value.clone(),
        allowable_values => allowable_values,
        collection_format => collection_format(param),
        array_type => param.array_type.clone(),
    }
}

fn collection_format(param: &RouteParam) -> Option<&'static str> {
    let format = param.collection_format.as_deref()?;
    let known = COLLECTION_FORMATS.iter().copied().find(|f| *f == format);
    if known.is_none() {
        log::warn!(
            "parameter {:?} uses unknown collectionFormat {format:?}; omitting it",
            param.name
        );
    }
    known
}
