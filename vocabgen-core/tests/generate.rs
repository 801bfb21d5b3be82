//! End-to-end generation tests: Turtle in, Rust module source out.

use vocabgen_core::{run, Config, GenError, Generator, OptionKey};
use vocabgen_graph::source::{DAML, OWL};
use vocabgen_graph::{Graph, OntologyModel};

const FOOD: &str = r#"
    @prefix owl: <http://www.w3.org/2002/07/owl#> .
    @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
    @prefix : <http://ex.org/v#> .

    <http://ex.org/v#> a owl:Ontology .

    :hasName a owl:DatatypeProperty ;
        rdfs:comment "The name of a thing." .
    :eats a owl:ObjectProperty .
    :Animal a owl:Class .
    :lion a :Animal .
"#;

/// Generate with the given arguments over an inline Turtle document.
fn generate(args: &[&str], ttl: &str) -> String {
    try_generate(args, ttl).unwrap()
}

fn try_generate(args: &[&str], ttl: &str) -> Result<String, GenError> {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    let config = Config::with_graph(args, Graph::new())?;
    let profile = if config.is_true(OptionKey::LangDaml) {
        DAML
    } else {
        OWL
    };
    let source = OntologyModel::from_turtle(ttl, profile).unwrap();
    let mut buf = Vec::new();
    Generator::new(&config, &source, profile, &mut buf)?.generate()?;
    Ok(String::from_utf8(buf).unwrap())
}

#[test]
fn derived_namespace_and_property_name() {
    // no explicit base option: the namespace comes from the ontology header
    let out = generate(&["-i", "food.ttl", "--ontology"], FOOD);
    assert!(out.contains("pub const NS: &str = \"http://ex.org/v#\";"), "{out}");
    assert!(
        out.contains("pub const hasName: &str = \"http://ex.org/v#hasName\";"),
        "{out}"
    );
    assert!(out.contains("/** The name of a thing. */"), "{out}");
}

#[test]
fn module_shape() {
    let out = generate(&["-i", "food.ttl", "--ontology"], FOOD);
    assert!(out.contains("// Generated by vocabgen from food.ttl on "), "{out}");
    assert!(out.contains("pub mod Food {"), "{out}");
    assert!(out.contains("#![allow(non_upper_case_globals)]"), "{out}");
    assert!(
        out.contains("pub const ONTOLOGY_LANGUAGE: &str = \"http://www.w3.org/2002/07/owl#\";"),
        "{out}"
    );
    assert!(out.trim_end().ends_with('}'), "{out}");
}

#[test]
fn individual_type_uses_generated_class_name() {
    let out = generate(&["-i", "food.ttl", "--ontology"], FOOD);
    assert!(
        out.contains("pub const lion: &str = \"http://ex.org/v#lion\"; // instance of Animal"),
        "{out}"
    );
}

#[test]
fn individual_type_falls_back_to_class_iri() {
    // with classes suppressed the class never gets an identifier, so the
    // individual's type renders as the quoted class IRI
    let out = generate(&["-i", "food.ttl", "--ontology", "--noclasses"], FOOD);
    assert!(!out.contains("pub const Animal"), "{out}");
    assert!(
        out.contains("// instance of \"http://ex.org/v#Animal\""),
        "{out}"
    );
}

#[test]
fn whitelist_gates_generation() {
    let ttl = r#"
        @prefix owl: <http://www.w3.org/2002/07/owl#> .
        @prefix ext: <http://other.org/x#> .
        <http://ex.org/v#> a owl:Ontology .
        <http://ex.org/v#local> a owl:ObjectProperty .
        ext:foreign a owl:ObjectProperty .
    "#;

    let out = generate(&["-i", "food.ttl", "--ontology"], ttl);
    assert!(out.contains("pub const local"), "{out}");
    assert!(!out.contains("foreign"), "{out}");

    // admitted once its namespace is included
    let out = generate(
        &["-i", "food.ttl", "--ontology", "--include", "http://other.org/x#"],
        ttl,
    );
    assert!(out.contains("pub const foreign"), "{out}");
}

#[test]
fn colliding_local_names_get_category_suffix() {
    let ttl = r#"
        @prefix owl: <http://www.w3.org/2002/07/owl#> .
        <http://ex.org/v#> a owl:Ontology .
        <http://ex.org/v#Foo> a owl:ObjectProperty .
        <http://other.org/a#Foo> a owl:ObjectProperty .
        <http://other.org/b#Foo> a owl:ObjectProperty .
    "#;
    let out = generate(
        &[
            "-i", "food.ttl", "--ontology",
            "--include", "http://other.org/a#",
            "--include", "http://other.org/b#",
        ],
        ttl,
    );
    assert!(out.contains("pub const Foo:"), "{out}");
    assert!(out.contains("pub const Foo_PROP:"), "{out}");
    assert!(out.contains("pub const Foo_PROP1:"), "{out}");
}

#[test]
fn distinct_case_does_not_collide() {
    let ttl = r#"
        @prefix owl: <http://www.w3.org/2002/07/owl#> .
        <http://ex.org/v#> a owl:Ontology .
        <http://ex.org/v#Foo> a owl:Class .
        <http://ex.org/v#foo> a owl:ObjectProperty .
    "#;
    let out = generate(&["-i", "food.ttl", "--ontology"], ttl);
    assert!(out.contains("pub const Foo:"), "{out}");
    assert!(out.contains("pub const foo:"), "{out}");
    assert!(!out.contains("_CLASS"), "{out}");
    assert!(!out.contains("_PROP"), "{out}");
}

#[test]
fn uppercase_names() {
    let out = generate(&["-i", "food.ttl", "--ontology", "--uppercase"], FOOD);
    assert!(
        out.contains("pub const HAS_NAME: &str = \"http://ex.org/v#hasName\";"),
        "{out}"
    );
}

#[test]
fn suppression_options() {
    let out = generate(
        &["-i", "food.ttl", "--ontology", "--noproperties", "--noindividuals"],
        FOOD,
    );
    assert!(!out.contains("hasName"), "{out}");
    assert!(!out.contains("lion"), "{out}");
    assert!(out.contains("pub const Animal"), "{out}");
}

#[test]
fn section_banners_and_footer() {
    let out = generate(
        &[
            "-i", "food.ttl", "--ontology",
            "--propSection", "// === properties ===",
            "--classSection", "// === classes ===",
            "--individualsSection", "// === individuals ===",
            "--footer", "// end of %modname%",
        ],
        FOOD,
    );
    let props = out.find("// === properties ===").unwrap();
    let classes = out.find("// === classes ===").unwrap();
    let individuals = out.find("// === individuals ===").unwrap();
    assert!(props < classes && classes < individuals, "{out}");
    assert!(out.trim_end().ends_with("// end of Food"), "{out}");
}

#[test]
fn custom_template_and_marker() {
    let out = generate(
        &[
            "-i", "food.ttl", "--ontology",
            "-m", "@",
            "--propTemplate", "pub const @valname@: Term = @valclass@(\"@valuri@\"); // @valcreator@",
        ],
        FOOD,
    );
    assert!(
        out.contains(
            "pub const eats: Term = ObjectProperty(\"http://ex.org/v#eats\"); // object_property"
        ),
        "{out}"
    );
}

#[test]
fn bindings_do_not_leak_between_terms() {
    // %valtype% is only bound while an individual renders; a property
    // template referencing it must render the placeholder literally
    let out = generate(
        &["-i", "food.ttl", "--ontology", "--propTemplate", "// %valname% %valtype%"],
        FOOD,
    );
    assert!(out.contains("// hasName %valtype%"), "{out}");
}

#[test]
fn plain_mode_classifies_by_type_statements() {
    let ttl = r#"
        @prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        @prefix owl: <http://www.w3.org/2002/07/owl#> .
        <http://ex.org/v#> a owl:Ontology .
        <http://ex.org/v#p> a rdf:Property .
        <http://ex.org/v#C> a rdfs:Class .
        <http://ex.org/v#c1> a <http://ex.org/v#C> .
    "#;
    let out = generate(&["-i", "food.ttl"], ttl);
    assert!(
        out.contains("pub const ONTOLOGY_LANGUAGE: &str = \"http://www.w3.org/1999/02/22-rdf-syntax-ns#\";"),
        "{out}"
    );
    assert!(out.contains("pub const p:"), "{out}");
    assert!(out.contains("pub const C:"), "{out}");
    // individuals render with the plain template, no valtype substitution
    assert!(out.contains("pub const c1: &str = \"http://ex.org/v#c1\";"), "{out}");
}

#[test]
fn ontology_mode_sweeps_untyped_properties() {
    let ttl = r#"
        @prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
        @prefix owl: <http://www.w3.org/2002/07/owl#> .
        <http://ex.org/v#> a owl:Ontology .
        <http://ex.org/v#plain> a rdf:Property .
    "#;
    let out = generate(&["-i", "food.ttl", "--ontology"], ttl);
    assert!(out.contains("pub const plain:"), "{out}");
}

#[test]
fn daml_profile() {
    let ttl = r#"
        @prefix daml: <http://www.daml.org/2001/03/daml+oil#> .
        <http://ex.org/v#> a daml:Ontology .
        <http://ex.org/v#height> a daml:DatatypeProperty ;
            daml:comment "Height in metres." .
    "#;
    let out = generate(&["-i", "food.ttl", "--ontology", "--daml"], ttl);
    assert!(
        out.contains("pub const ONTOLOGY_LANGUAGE: &str = \"http://www.daml.org/2001/03/daml+oil#\";"),
        "{out}"
    );
    assert!(out.contains("pub const height:"), "{out}");
    assert!(out.contains("/** Height in metres. */"), "{out}");
}

#[test]
fn explicit_base_overrides_header() {
    let out = generate(
        &["-i", "food.ttl", "--ontology", "--base", "http://alt.example/ns#"],
        FOOD,
    );
    assert!(
        out.contains("pub const NS: &str = \"http://alt.example/ns#\";"),
        "{out}"
    );
    // an explicit base does not seed the whitelist, so nothing is admitted
    assert!(!out.contains("pub const hasName"), "{out}");
}

#[test]
fn missing_base_is_fatal() {
    let err = try_generate(&["-i", "food.ttl"], "").unwrap_err();
    assert!(matches!(err, GenError::NoBaseIri));
    assert!(err.to_string().contains("base IRI"));
}

#[test]
fn custom_header_replaces_default() {
    let out = generate(
        &["-i", "food.ttl", "--ontology", "--header", "// %modname% from %namespace%%nl%"],
        FOOD,
    );
    assert!(out.starts_with("// Food from http://ex.org/v#\n"), "{out}");
    assert!(!out.contains("Generated by vocabgen"), "{out}");
}

#[test]
fn module_name_options() {
    let out = generate(&["-i", "food.ttl", "--ontology", "-n", "Meals"], FOOD);
    assert!(out.contains("pub mod Meals {"), "{out}");

    let out = generate(&["-i", "food.ttl", "--ontology", "--modnamesuffix", "Vocab"], FOOD);
    assert!(out.contains("pub mod FoodVocab {"), "{out}");

    let out = generate(
        &["-i", "food.ttl", "--ontology", "--moddec", "/* deprecated */"],
        FOOD,
    );
    assert!(out.contains("pub mod Food /* deprecated */ {"), "{out}");
}

#[test]
fn nocomments_suppresses_comment_blocks() {
    let out = generate(&["-i", "food.ttl", "--ontology", "--nocomments"], FOOD);
    assert!(!out.contains("The name of a thing."), "{out}");
    assert!(out.contains("pub const hasName"), "{out}");
}

#[test]
fn extra_declarations() {
    let out = generate(
        &["-i", "food.ttl", "--ontology", "--declarations", "pub const VERSION: u32 = 1;"],
        FOOD,
    );
    assert!(out.contains("pub const VERSION: u32 = 1;"), "{out}");
}

#[test]
fn run_writes_into_directory() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("food.ttl");
    std::fs::write(&input, FOOD).unwrap();

    let args = vec![
        "-i".to_string(),
        input.display().to_string(),
        "--ontology".to_string(),
        "-o".to_string(),
        dir.path().display().to_string(),
    ];
    run(args).unwrap();

    let generated = dir.path().join("Food.rs");
    let out = std::fs::read_to_string(&generated).unwrap();
    assert!(out.contains("pub mod Food {"), "{out}");
    assert!(out.contains("pub const hasName"), "{out}");
}

#[test]
fn run_without_input_is_fatal_and_creates_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("out.rs");

    let err = run(vec!["-o".to_string(), out_path.display().to_string()]).unwrap_err();
    assert!(matches!(err, GenError::NoInput));
    assert!(err.to_string().contains("no input document"));
    assert!(!out_path.exists());
}

#[test]
fn run_with_unreadable_input_is_fatal() {
    let err = run(vec!["-i".to_string(), "no-such-file.ttl".to_string()]).unwrap_err();
    assert!(matches!(err, GenError::InputRead { .. }));
}
