//! The output sequencer: drives a full generation run in fixed phase order.
//!
//! Phases: determine config root (done while the [`Config`] is built) →
//! determine language profile → load source document → resolve output
//! destination → resolve base IRI and install global bindings → header →
//! module declaration → initial declarations → properties → classes →
//! individuals → module close → footer → flush. Only the explicit
//! suppression options skip a phase.
//!
//! All per-run state (include whitelist, used names, resource→name map,
//! template scope) lives inside the [`Generator`] value, so independent runs
//! never share anything.

use crate::comment::{format_comment, INDENT_STEP};
use crate::error::{GenError, Result};
use crate::names::{IdentifierGrammar, NameAllocator};
use crate::options::{Config, OptionKey};
use crate::template::TemplateScope;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, trace};
use vocabgen_graph::source::{DAML, OWL};
use vocabgen_graph::{comment_text, OntologyModel, Profile, PropertyKind, SchemaSource, Term};
use vocabgen_vocab::{rdf, rdfs};

/// Default template for value declarations.
pub const DEFAULT_TEMPLATE: &str = "pub const %valname%: &str = \"%valuri%\";";

/// Default template for individual declarations (ontology mode).
pub const DEFAULT_INDIVIDUAL_TEMPLATE: &str =
    "pub const %valname%: &str = \"%valuri%\"; // instance of %valtype%";

/// Extension for output files named after the generated module.
pub const SOURCE_FILE_EXTENSION: &str = ".rs";

/// Header emitted when no `header` option is set.
const DEFAULT_HEADER: &str = "// Generated by vocabgen from %sourceURI% on %date%. Do not edit.";

/// Run a complete generation from raw command-line arguments.
pub fn run(args: Vec<String>) -> Result<()> {
    let config = Config::from_args(args)?;

    let profile = if config.is_true(OptionKey::LangDaml) {
        DAML
    } else {
        OWL
    };
    debug!(profile = profile.name, "selected language profile");

    let uri = input_iri(&config)?;
    let path = uri
        .strip_prefix("file://")
        .or_else(|| uri.strip_prefix("file:"))
        .unwrap_or(&uri);
    let source = OntologyModel::load_file(path, profile).map_err(|source| GenError::InputRead {
        uri: uri.clone(),
        source,
    })?;

    let out = open_output(&config)?;
    Generator::new(&config, &source, profile, out)?.generate()
}

/// IRI of the input document; its absence is the canonical fatal error.
fn input_iri(config: &Config) -> Result<String> {
    config
        .resource_value(OptionKey::Input)?
        .as_ref()
        .and_then(Term::as_iri)
        .map(String::from)
        .ok_or(GenError::NoInput)
}

/// Resolve the output destination: a file path, a directory (the file is
/// named from the generated module name), or stdout when unset.
fn open_output(config: &Config) -> Result<Box<dyn Write>> {
    let Some(path) = config.value(OptionKey::Output)? else {
        return Ok(Box::new(std::io::stdout()));
    };
    let mut path = PathBuf::from(path);
    if path.is_dir() {
        path = path.join(format!(
            "{}{}",
            derive_module_name(config)?,
            SOURCE_FILE_EXTENSION
        ));
    }
    let file = std::fs::File::create(&path).map_err(|source| GenError::Output {
        path: path.display().to_string(),
        source,
    })?;
    Ok(Box::new(std::io::BufWriter::new(file)))
}

/// Derive the generated module name.
///
/// An explicit `-n` wins; otherwise the name comes from the input IRI with
/// any trailing `#` and known document extension removed, cut back to the
/// last run of name characters, suffixed per the `modnamesuffix` option and
/// legalized with a capitalized first letter.
pub fn derive_module_name(config: &Config) -> Result<String> {
    if let Some(name) = config.value(OptionKey::ModName)? {
        return Ok(name);
    }

    let input = input_iri(config)?;
    let mut uri = input.strip_suffix('#').unwrap_or(&input);
    for ext in [".owl", ".rdfs", ".rdf", ".ttl", ".nt", ".n3", ".daml"] {
        if let Some(stripped) = uri.strip_suffix(ext) {
            uri = stripped;
            break;
        }
    }

    let grammar = IdentifierGrammar::rust();
    let tail = uri
        .char_indices()
        .rev()
        .take_while(|&(_, c)| (grammar.is_continue)(c) || c == '-')
        .last()
        .map(|(i, _)| &uri[i..])
        .unwrap_or("");

    let mut name = tail.to_string();
    if let Some(suffix) = config.value(OptionKey::ModNameSuffix)? {
        name.push_str(&suffix);
    }
    grammar
        .legalize(&name, true)
        .ok_or_else(|| GenError::NoModuleName { uri: input.clone() })
}

/// One generation run over a loaded source document.
pub struct Generator<'a, S: SchemaSource, W: Write> {
    config: &'a Config,
    source: &'a S,
    profile: Profile,
    out: W,
    scope: TemplateScope,
    names: NameAllocator,
    include: Vec<String>,
    namespace: String,
}

impl<'a, S: SchemaSource, W: Write> Generator<'a, S, W> {
    /// Set up a run: template scope, name allocator, and the include
    /// whitelist seeded from the repeatable `include` option.
    pub fn new(config: &'a Config, source: &'a S, profile: Profile, out: W) -> Result<Self> {
        let marker = config.value(OptionKey::Marker)?;
        Ok(Self {
            config,
            source,
            profile,
            out,
            scope: TemplateScope::new(marker.as_deref()),
            names: NameAllocator::new(
                IdentifierGrammar::rust(),
                config.is_true(OptionKey::UppercaseNames),
            ),
            include: config.all_values(OptionKey::Include)?,
            namespace: String::new(),
        })
    }

    /// Emit the whole module in fixed phase order.
    pub fn generate(&mut self) -> Result<()> {
        self.install_global_bindings()?;
        self.process_header()?;
        self.write_mod_declaration()?;
        self.write_initial_declarations()?;
        self.write_properties()?;
        self.write_classes()?;
        self.write_individuals()?;
        self.write_mod_close()?;
        self.process_footer()?;
        self.out.flush()?;
        Ok(())
    }

    /// Determine what the base IRI for this vocabulary is.
    ///
    /// Runs exactly once, before any term is classified: the derived IRI
    /// seeds the include whitelist so the vocabulary's own terms pass the
    /// filter by default. An explicit `base` option is used verbatim and
    /// does not touch the whitelist.
    fn determine_base_iri(&mut self) -> Result<String> {
        if let Some(base) = self.config.resource_value(OptionKey::Base)? {
            if let Some(iri) = base.as_iri() {
                return Ok(iri.to_string());
            }
        }

        let Some(header) = self.source.ontology_header() else {
            return Err(GenError::NoBaseIri);
        };
        let iri = if header.ends_with('#') {
            header
        } else {
            format!("{header}#")
        };
        self.include.push(iri.clone());
        Ok(iri)
    }

    /// The bindings that are always available. Pushed once, never popped.
    fn install_global_bindings(&mut self) -> Result<()> {
        self.namespace = self.determine_base_iri()?;

        let date = chrono::Local::now().format("%d %b %Y %H:%M").to_string();
        let modname = derive_module_name(self.config)?;
        let source_uri = input_iri(self.config)?;
        let package = self.config.value(OptionKey::Package)?;
        let namespace = self.namespace.clone();

        self.scope.push_binding("date", Some(&date))?;
        self.scope.push_binding("package", package.as_deref())?;
        // the constant-based Rust target needs no imports; the binding stays
        // available to custom headers targeting other languages
        self.scope.push_binding("imports", Some(""))?;
        self.scope.push_binding("modname", Some(&modname))?;
        self.scope.push_binding("sourceURI", Some(&source_uri))?;
        self.scope.push_binding("namespace", Some(&namespace))?;
        self.scope.push_binding("nl", Some("\n"))?;
        Ok(())
    }

    fn process_header(&mut self) -> Result<()> {
        match self.config.value(OptionKey::Header)? {
            Some(header) => {
                let rendered = self.scope.render(&header);
                self.writeln(0, &rendered)
            }
            None => {
                let rendered = self.scope.render(DEFAULT_HEADER);
                self.writeln(0, &rendered)?;
                self.blank_line()
            }
        }
    }

    fn process_footer(&mut self) -> Result<()> {
        if let Some(footer) = self.config.value(OptionKey::Footer)? {
            let rendered = self.scope.render(&footer);
            self.writeln(0, &rendered)?;
        }
        Ok(())
    }

    fn write_mod_declaration(&mut self) -> Result<()> {
        let mut decl = format!("pub mod {} ", derive_module_name(self.config)?);
        if let Some(dec) = self.config.value(OptionKey::ModDec)? {
            decl.push_str(&dec);
            decl.push(' ');
        }
        decl.push('{');
        self.writeln(0, &decl)
    }

    fn write_mod_close(&mut self) -> Result<()> {
        self.writeln(0, "}")
    }

    fn write_initial_declarations(&mut self) -> Result<()> {
        // generated constant names follow the source vocabulary's casing
        self.writeln(1, "#![allow(non_upper_case_globals)]")?;
        self.blank_line()?;

        let language = if self.use_ontology() {
            self.profile.namespace
        } else {
            rdf::NS
        };
        self.writeln(1, "/** The language the vocabulary terms are classified under */")?;
        self.writeln(
            1,
            &format!("pub const ONTOLOGY_LANGUAGE: &str = \"{language}\";"),
        )?;
        self.blank_line()?;

        self.writeln(1, "/** The namespace of the vocabulary as a string */")?;
        self.writeln(1, &format!("pub const NS: &str = \"{}\";", self.namespace))?;
        self.blank_line()?;

        if let Some(declarations) = self.config.value(OptionKey::Declarations)? {
            self.writeln(0, &declarations)?;
        }
        Ok(())
    }

    /// Write the list of properties, unless suppressed.
    fn write_properties(&mut self) -> Result<()> {
        if self.config.is_true(OptionKey::NoProperties) {
            return Ok(());
        }
        if let Some(banner) = self.config.value(OptionKey::PropSection)? {
            self.writeln(0, &banner)?;
        }

        let template = self
            .config
            .value(OptionKey::PropTemplate)?
            .unwrap_or_else(|| DEFAULT_TEMPLATE.to_string());

        if self.use_ontology() {
            for term in self.source.list_properties(PropertyKind::Object) {
                self.write_value(&term, &template, "ObjectProperty", "object_property", "_PROP")?;
            }
            for term in self.source.list_properties(PropertyKind::Datatype) {
                self.write_value(
                    &term,
                    &template,
                    "DatatypeProperty",
                    "datatype_property",
                    "_PROP",
                )?;
            }
            for term in self.source.list_properties(PropertyKind::Annotation) {
                self.write_value(
                    &term,
                    &template,
                    "AnnotationProperty",
                    "annotation_property",
                    "_PROP",
                )?;
            }
            // mop up any properties not stated as object, datatype or
            // annotation properties
            self.write_rdf_properties(&template)
        } else {
            self.write_rdf_properties(&template)
        }
    }

    /// Vanilla `rdf:Property` sweep.
    fn write_rdf_properties(&mut self, template: &str) -> Result<()> {
        let property = Term::iri(rdf::PROPERTY);
        for st in self.source.statements(None, Some(rdf::TYPE), Some(&property)) {
            self.write_value(&st.subject, template, "Property", "property", "_PROP")?;
        }
        Ok(())
    }

    /// Write the list of classes, unless suppressed.
    fn write_classes(&mut self) -> Result<()> {
        if self.config.is_true(OptionKey::NoClasses) {
            return Ok(());
        }
        if let Some(banner) = self.config.value(OptionKey::ClassSection)? {
            self.writeln(0, &banner)?;
        }

        let template = self
            .config
            .value(OptionKey::ClassTemplate)?
            .unwrap_or_else(|| DEFAULT_TEMPLATE.to_string());

        if self.use_ontology() {
            for term in self.source.list_classes() {
                self.write_value(&term, &template, "Class", "class", "_CLASS")?;
            }
        } else {
            let class = Term::iri(rdfs::CLASS);
            for st in self.source.statements(None, Some(rdf::TYPE), Some(&class)) {
                self.write_value(&st.subject, &template, "Resource", "resource", "_CLASS")?;
            }
        }
        Ok(())
    }

    /// Write the list of individuals, unless suppressed.
    ///
    /// Candidates are the subjects of type statements whose object is an IRI
    /// on the include whitelist. In ontology mode the matched class supplies
    /// the `valtype` binding: the class's generated identifier when it was
    /// already emitted, else the quoted class IRI.
    fn write_individuals(&mut self) -> Result<()> {
        if self.config.is_true(OptionKey::NoIndividuals) {
            return Ok(());
        }
        if let Some(banner) = self.config.value(OptionKey::IndividualsSection)? {
            self.writeln(0, &banner)?;
        }

        let use_ontology = self.use_ontology();
        let template = match self.config.value(OptionKey::IndividualTemplate)? {
            Some(t) => t,
            None if use_ontology => DEFAULT_INDIVIDUAL_TEMPLATE.to_string(),
            None => DEFAULT_TEMPLATE.to_string(),
        };

        for st in self.source.statements(None, Some(rdf::TYPE), None) {
            let Some(class_iri) = st.object.as_iri() else {
                continue;
            };
            if !self.admitted(class_iri) {
                continue;
            }
            // the subject has a type on our include list
            if use_ontology {
                let valtype = match self.names.name_for(class_iri) {
                    Some(name) => name.to_string(),
                    None => format!("\"{class_iri}\""),
                };
                self.scope.push_binding("valtype", Some(&valtype))?;
                self.write_value(&st.subject, &template, "Individual", "individual", "_INSTANCE")?;
                self.scope.pop(1);
            } else {
                self.write_value(&st.subject, &template, "Resource", "resource", "_INSTANCE")?;
            }
        }
        Ok(())
    }

    /// Write one term's declaration using the given template, preceded by
    /// its formatted comment unless comments are suppressed.
    fn write_value(
        &mut self,
        term: &Term,
        template: &str,
        valclass: &str,
        valcreator: &str,
        suffix: &str,
    ) -> Result<()> {
        if self.filtered(term) {
            return Ok(());
        }
        let Some(iri) = term.as_iri().map(String::from) else {
            return Ok(());
        };
        let Some(name) = self.names.allocate(&iri, suffix) else {
            trace!(iri = iri.as_str(), "skipped: no legal identifier");
            return Ok(());
        };

        if !self.config.is_true(OptionKey::NoComments) {
            let comment = comment_text(self.source, term, &self.profile);
            if !comment.is_empty() {
                let block = format_comment(&comment);
                self.writeln(1, &block)?;
            }
        }

        self.scope.push_binding("valuri", Some(&iri))?;
        self.scope.push_binding("valname", Some(&name))?;
        self.scope.push_binding("valclass", Some(valclass))?;
        self.scope.push_binding("valcreator", Some(valcreator))?;

        let line = self.scope.render(template);
        self.writeln(1, &line)?;
        self.blank_line()?;

        self.scope.pop(4);
        Ok(())
    }

    /// True if the term does **not** show in output: anonymous nodes, terms
    /// already generated, and terms outside the include whitelist.
    fn filtered(&self, term: &Term) -> bool {
        let Some(iri) = term.as_iri() else {
            trace!(%term, "filtered: anonymous node");
            return true;
        };
        if self.names.contains(iri) {
            trace!(iri, "filtered: already generated");
            return true;
        }
        if !self.admitted(iri) {
            trace!(iri, "filtered: outside the include list");
            return true;
        }
        false
    }

    /// True when some include-whitelist entry prefixes the IRI.
    fn admitted(&self, iri: &str) -> bool {
        self.include.iter().any(|prefix| iri.starts_with(prefix))
    }

    fn use_ontology(&self) -> bool {
        self.config.is_true(OptionKey::Ontology)
    }

    fn writeln(&mut self, indent: usize, s: &str) -> Result<()> {
        writeln!(self.out, "{:width$}{s}", "", width = indent * INDENT_STEP)?;
        Ok(())
    }

    fn blank_line(&mut self) -> Result<()> {
        writeln!(self.out)?;
        Ok(())
    }
}
