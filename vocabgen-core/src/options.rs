//! The option model: dual-source configuration resolution.
//!
//! Every recognized option is a typed [`OptionKey`] bound to a command-line
//! flag token and, for most options, a property in the configuration
//! namespace. Lookup order is fixed: a command-line occurrence strictly
//! overrides a configuration-graph statement. Both sources are immutable for
//! the duration of a run, so every lookup is a pure read.

use crate::error::{GenError, Result};
use vocabgen_graph::{turtle, Graph, Term};
use vocabgen_vocab::cfg;

/// Default location probed for a configuration document when `-c` is absent.
/// Failure to read it is not an error.
pub const DEFAULT_CONFIG_PATH: &str = "vocabgen.ttl";

/// The recognized configuration options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionKey {
    /// Alternative config document; `-c <path>`
    ConfigFile,
    /// Configuration root resource; `-r <uri>`
    Root,
    /// Suppress all comment output; `--nocomments` / `cfg:noComments`
    NoComments,
    /// Input document; `-i <uri>` / `cfg:input`
    Input,
    /// Source language is DAML+OIL; `--daml` / `cfg:daml`
    LangDaml,
    /// Source language is OWL (the default); `--owl` / `cfg:owl`
    LangOwl,
    /// Destination file or directory; `-o <path>` / `cfg:output`
    Output,
    /// File header template; `--header` / `cfg:header`
    Header,
    /// File footer template; `--footer` / `cfg:footer`
    Footer,
    /// Substitution marker; `-m <marker>` / `cfg:marker`
    Marker,
    /// Package binding for templates; `--package` / `cfg:package`
    Package,
    /// Use ontology terms in preference to vanilla RDF; `--ontology` / `cfg:ontology`
    Ontology,
    /// Name of the generated module; `-n <name>` / `cfg:modname`
    ModName,
    /// Extra decoration for the module declaration; `--moddec` / `cfg:moddec`
    ModDec,
    /// Base IRI of the vocabulary; `--base <uri>` / `cfg:base`
    Base,
    /// Extra declarations at the top of the module; `--declarations` / `cfg:declarations`
    Declarations,
    /// Banner before the properties section; `--propSection` / `cfg:propSection`
    PropSection,
    /// Banner before the classes section; `--classSection` / `cfg:classSection`
    ClassSection,
    /// Banner before the individuals section; `--individualsSection` / `cfg:individualsSection`
    IndividualsSection,
    /// Suppress properties; `--noproperties` / `cfg:noproperties`
    NoProperties,
    /// Suppress classes; `--noclasses` / `cfg:noclasses`
    NoClasses,
    /// Suppress individuals; `--noindividuals` / `cfg:noindividuals`
    NoIndividuals,
    /// Property declaration template; `--propTemplate` / `cfg:propTemplate`
    PropTemplate,
    /// Class declaration template; `--classTemplate` / `cfg:classTemplate`
    ClassTemplate,
    /// Individual declaration template; `--individualTemplate` / `cfg:individualTemplate`
    IndividualTemplate,
    /// Map generated names to UPPER_SNAKE_CASE; `--uppercase` / `cfg:uppercase`
    UppercaseNames,
    /// Admit terms under a non-local IRI; `--include <uri>` / `cfg:include` (repeatable)
    Include,
    /// Suffix for the generated module name; `--modnamesuffix` / `cfg:modnamesuffix`
    ModNameSuffix,
}

/// Flag token and optional config-graph property for one option.
#[derive(Clone, Copy, Debug)]
pub struct OptionDef {
    /// Command-line form
    pub flag: &'static str,
    /// Local name of the bound property in the configuration namespace
    pub property: Option<&'static str>,
}

/// The single definition for each option key.
pub const fn def(key: OptionKey) -> OptionDef {
    use OptionKey::*;
    match key {
        ConfigFile => OptionDef { flag: "-c", property: None },
        Root => OptionDef { flag: "-r", property: None },
        NoComments => OptionDef { flag: "--nocomments", property: Some("noComments") },
        Input => OptionDef { flag: "-i", property: Some("input") },
        LangDaml => OptionDef { flag: "--daml", property: Some("daml") },
        LangOwl => OptionDef { flag: "--owl", property: Some("owl") },
        Output => OptionDef { flag: "-o", property: Some("output") },
        Header => OptionDef { flag: "--header", property: Some("header") },
        Footer => OptionDef { flag: "--footer", property: Some("footer") },
        Marker => OptionDef { flag: "-m", property: Some("marker") },
        Package => OptionDef { flag: "--package", property: Some("package") },
        Ontology => OptionDef { flag: "--ontology", property: Some("ontology") },
        ModName => OptionDef { flag: "-n", property: Some("modname") },
        ModDec => OptionDef { flag: "--moddec", property: Some("moddec") },
        Base => OptionDef { flag: "--base", property: Some("base") },
        Declarations => OptionDef { flag: "--declarations", property: Some("declarations") },
        PropSection => OptionDef { flag: "--propSection", property: Some("propSection") },
        ClassSection => OptionDef { flag: "--classSection", property: Some("classSection") },
        IndividualsSection => {
            OptionDef { flag: "--individualsSection", property: Some("individualsSection") }
        }
        NoProperties => OptionDef { flag: "--noproperties", property: Some("noproperties") },
        NoClasses => OptionDef { flag: "--noclasses", property: Some("noclasses") },
        NoIndividuals => OptionDef { flag: "--noindividuals", property: Some("noindividuals") },
        PropTemplate => OptionDef { flag: "--propTemplate", property: Some("propTemplate") },
        ClassTemplate => OptionDef { flag: "--classTemplate", property: Some("classTemplate") },
        IndividualTemplate => {
            OptionDef { flag: "--individualTemplate", property: Some("individualTemplate") }
        }
        UppercaseNames => OptionDef { flag: "--uppercase", property: Some("uppercase") },
        Include => OptionDef { flag: "--include", property: Some("include") },
        ModNameSuffix => OptionDef { flag: "--modnamesuffix", property: Some("modnamesuffix") },
    }
}

/// Resolved configuration: the raw argument list, the configuration graph,
/// and the root resource under which option properties are read.
#[derive(Clone, Debug)]
pub struct Config {
    args: Vec<String>,
    graph: Graph,
    root: Term,
}

impl Config {
    /// Build a configuration from command-line arguments, loading the config
    /// document they name (or probing the default location).
    pub fn from_args(args: Vec<String>) -> Result<Self> {
        let graph = match arg_value(&args, def(OptionKey::ConfigFile).flag)? {
            Some(path) => {
                let path = path.strip_prefix("file:").unwrap_or(path);
                load_config(path).map_err(|source| GenError::ConfigRead {
                    uri: path.to_string(),
                    source,
                })?
            }
            // Absence of an unconfigured default config is not an error.
            None => load_config(DEFAULT_CONFIG_PATH).unwrap_or_default(),
        };
        Self::with_graph(args, graph)
    }

    /// Build a configuration over an already-loaded config graph.
    pub fn with_graph(args: Vec<String>, graph: Graph) -> Result<Self> {
        let root = match arg_value(&args, def(OptionKey::Root).flag)? {
            Some(uri) => Term::iri(uri),
            None => graph
                .subjects_of_type(cfg::CONFIG)
                .into_iter()
                .next()
                // no configuration root, so we invent one
                .unwrap_or_else(|| Term::blank("config")),
        };
        Ok(Self { args, graph, root })
    }

    /// The configuration root resource.
    pub fn root(&self) -> &Term {
        &self.root
    }

    /// True if the flag appears on the command line, or the bound property
    /// holds a literal boolean true on the root resource.
    pub fn is_true(&self, key: OptionKey) -> bool {
        let d = def(key);
        if self.args.iter().any(|a| a == d.flag) {
            return true;
        }
        match d.property {
            Some(local) => self
                .graph
                .objects_of(&self.root, &cfg::property(local))
                .first()
                .and_then(|o| o.as_bool())
                == Some(true),
            None => false,
        }
    }

    /// The string value of the option, command line first.
    pub fn value(&self, key: OptionKey) -> Result<Option<String>> {
        let d = def(key);
        if let Some(v) = arg_value(&self.args, d.flag)? {
            return Ok(Some(v.to_string()));
        }
        let Some(local) = d.property else {
            return Ok(None);
        };
        Ok(self
            .graph
            .objects_of(&self.root, &cfg::property(local))
            .first()
            .and_then(|o| match o {
                Term::Literal { .. } => o.as_lexical().map(String::from),
                Term::Iri(_) => o.as_iri().map(String::from),
                Term::Blank(_) => None,
            }))
    }

    /// True if the option has a value at all.
    pub fn has_value(&self, key: OptionKey) -> Result<bool> {
        Ok(self.value(key)?.is_some())
    }

    /// The resource value of the option, command line first.
    ///
    /// A command-line value is taken verbatim as an IRI; a config-graph value
    /// must be a resource object.
    pub fn resource_value(&self, key: OptionKey) -> Result<Option<Term>> {
        let d = def(key);
        if let Some(v) = arg_value(&self.args, d.flag)? {
            return Ok(Some(Term::iri(v)));
        }
        let Some(local) = d.property else {
            return Ok(None);
        };
        Ok(self
            .graph
            .objects_of(&self.root, &cfg::property(local))
            .into_iter()
            .find(|o| o.is_iri())
            .cloned())
    }

    /// Every value of a repeatable option: all command-line occurrences in
    /// argument order, then all config-graph statements in document order.
    /// Resources render as their IRI, literals as their lexical form.
    pub fn all_values(&self, key: OptionKey) -> Result<Vec<String>> {
        let d = def(key);
        let mut values = Vec::new();

        let mut i = 0;
        while i < self.args.len() {
            if self.args[i] == d.flag {
                match self.args.get(i + 1) {
                    Some(v) => values.push(v.clone()),
                    None => return Err(GenError::MissingValue { flag: d.flag }),
                }
                i += 2;
            } else {
                i += 1;
            }
        }

        if let Some(local) = d.property {
            for object in self.graph.objects_of(&self.root, &cfg::property(local)) {
                match object {
                    Term::Iri(_) => values.push(object.as_iri().unwrap_or_default().to_string()),
                    Term::Literal { .. } => {
                        values.push(object.as_lexical().unwrap_or_default().to_string())
                    }
                    Term::Blank(_) => {}
                }
            }
        }

        Ok(values)
    }
}

/// The argument immediately following `flag`, if the flag is present.
/// A flag with nothing after it is a fatal configuration error.
fn arg_value<'a>(args: &'a [String], flag: &'static str) -> Result<Option<&'a str>> {
    match args.iter().position(|a| a == flag) {
        Some(i) => match args.get(i + 1) {
            Some(v) => Ok(Some(v)),
            None => Err(GenError::MissingValue { flag }),
        },
        None => Ok(None),
    }
}

fn load_config(path: &str) -> vocabgen_graph::Result<Graph> {
    let input = std::fs::read_to_string(path)?;
    turtle::parse(&input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn config_with(args: &[&str], ttl: &str) -> Config {
        Config::with_graph(strs(args), turtle::parse(ttl).unwrap()).unwrap()
    }

    const CONFIG_TTL: &str = r#"
        @prefix cfg: <https://vocabgen.dev/config#> .
        [] a cfg:Config ;
            cfg:output "config-output.rs" ;
            cfg:noComments "ignored" ;
            cfg:uppercase true ;
            cfg:include <http://example.org/a#> ;
            cfg:include "http://example.org/b#" ;
            cfg:input <http://example.org/food.ttl> .
    "#;

    #[test]
    fn test_command_line_overrides_config() {
        let config = config_with(&["-o", "cli-output.rs"], CONFIG_TTL);
        assert_eq!(
            config.value(OptionKey::Output).unwrap(),
            Some("cli-output.rs".to_string())
        );
    }

    #[test]
    fn test_config_graph_fallback() {
        let config = config_with(&[], CONFIG_TTL);
        assert_eq!(
            config.value(OptionKey::Output).unwrap(),
            Some("config-output.rs".to_string())
        );
        assert!(config.has_value(OptionKey::Output).unwrap());
        assert!(!config.has_value(OptionKey::Header).unwrap());
    }

    #[test]
    fn test_is_true_from_flag_and_graph() {
        let config = config_with(&["--ontology"], CONFIG_TTL);
        assert!(config.is_true(OptionKey::Ontology));
        // boolean literal in the graph
        assert!(config.is_true(OptionKey::UppercaseNames));
        // present but not a boolean true
        assert!(!config.is_true(OptionKey::NoComments));
        assert!(!config.is_true(OptionKey::NoProperties));
    }

    #[test]
    fn test_missing_value_is_fatal() {
        let config = config_with(&["-o"], "");
        let err = config.value(OptionKey::Output).unwrap_err();
        assert!(matches!(err, GenError::MissingValue { flag: "-o" }));
    }

    #[test]
    fn test_all_values_order() {
        let config = config_with(
            &["--include", "http://example.org/x#", "--include", "http://example.org/y#"],
            CONFIG_TTL,
        );
        assert_eq!(
            config.all_values(OptionKey::Include).unwrap(),
            vec![
                "http://example.org/x#",
                "http://example.org/y#",
                "http://example.org/a#",
                "http://example.org/b#",
            ]
        );
    }

    #[test]
    fn test_resource_value() {
        let config = config_with(&[], CONFIG_TTL);
        assert_eq!(
            config.resource_value(OptionKey::Input).unwrap(),
            Some(Term::iri("http://example.org/food.ttl"))
        );
        // command line wins and is taken verbatim
        let config = config_with(&["-i", "local.ttl"], CONFIG_TTL);
        assert_eq!(
            config.resource_value(OptionKey::Input).unwrap(),
            Some(Term::iri("local.ttl"))
        );
    }

    #[test]
    fn test_root_resolution() {
        // explicit root on the command line
        let config = config_with(&["-r", "http://example.org/myroot"], CONFIG_TTL);
        assert_eq!(config.root(), &Term::iri("http://example.org/myroot"));

        // unique cfg:Config-typed resource
        let config = config_with(&[], CONFIG_TTL);
        assert!(config.root().is_blank());
        assert!(config.has_value(OptionKey::Output).unwrap());

        // no config at all: fresh anonymous root, nothing resolves
        let config = config_with(&[], "");
        assert!(config.root().is_blank());
        assert!(!config.has_value(OptionKey::Output).unwrap());
    }
}
