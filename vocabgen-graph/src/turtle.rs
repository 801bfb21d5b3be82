//! Turtle (TTL) reader for vocabulary and configuration documents.
//!
//! This is a deliberately small reader for the Turtle subset that vocabulary
//! documents actually use: `@prefix`/`@base` directives (and their SPARQL
//! spellings), IRIs, prefixed names, the `a` keyword, predicate/object lists,
//! blank-node labels and property lists, and plain/typed/language-tagged
//! literals. Collections and long strings are not supported.

use crate::error::{GraphError, Result};
use crate::{Graph, Term};
use std::collections::HashMap;

/// Parse a Turtle document into a [`Graph`].
pub fn parse(input: &str) -> Result<Graph> {
    Parser::new(input)?.parse()
}

#[derive(Clone, Debug, PartialEq)]
enum TokenKind {
    /// `<...>` IRI reference, unresolved
    Iri(String),
    /// `prefix:local` name (prefix may be empty)
    Prefixed(String, String),
    /// `_:label` blank node
    Blank(String),
    /// Quoted string with escapes applied
    Str(String),
    /// `@lang` tag
    LangTag(String),
    /// Numeric literal, lexical form preserved
    Number(String),
    /// `true` / `false`
    Boolean(bool),
    /// The `a` keyword
    KeywordA,
    /// `@prefix` / `PREFIX` (bool: SPARQL spelling, no trailing dot)
    PrefixDirective(bool),
    /// `@base` / `BASE` (bool: SPARQL spelling, no trailing dot)
    BaseDirective(bool),
    DoubleCaret,
    Dot,
    Semicolon,
    Comma,
    OpenBracket,
    CloseBracket,
    Eof,
}

#[derive(Clone, Debug)]
struct Token {
    kind: TokenKind,
    line: usize,
}

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            self.skip_trivia();
            let line = self.line;
            let Some(&c) = self.chars.peek() else {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    line,
                });
                return Ok(tokens);
            };
            let kind = match c {
                '<' => self.lex_iri()?,
                '"' => self.lex_string()?,
                '@' => self.lex_at_word()?,
                '.' => {
                    self.chars.next();
                    TokenKind::Dot
                }
                ';' => {
                    self.chars.next();
                    TokenKind::Semicolon
                }
                ',' => {
                    self.chars.next();
                    TokenKind::Comma
                }
                '[' => {
                    self.chars.next();
                    TokenKind::OpenBracket
                }
                ']' => {
                    self.chars.next();
                    TokenKind::CloseBracket
                }
                '^' => {
                    self.chars.next();
                    if self.chars.next_if_eq(&'^').is_none() {
                        return Err(GraphError::lexer(line, "expected '^^'"));
                    }
                    TokenKind::DoubleCaret
                }
                c if c.is_ascii_digit() || c == '+' || c == '-' => self.lex_number(),
                _ => self.lex_word(line)?,
            };
            tokens.push(Token { kind, line });
        }
    }

    fn skip_trivia(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c == '\n' {
                self.line += 1;
                self.chars.next();
            } else if c.is_whitespace() {
                self.chars.next();
            } else if c == '#' {
                while let Some(&c) = self.chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.chars.next();
                }
            } else {
                break;
            }
        }
    }

    fn lex_iri(&mut self) -> Result<TokenKind> {
        let line = self.line;
        self.chars.next(); // consume '<'
        let mut iri = String::new();
        loop {
            match self.chars.next() {
                Some('>') => return Ok(TokenKind::Iri(iri)),
                Some('\n') | None => return Err(GraphError::lexer(line, "unterminated IRI")),
                Some(c) => iri.push(c),
            }
        }
    }

    fn lex_string(&mut self) -> Result<TokenKind> {
        let line = self.line;
        self.chars.next(); // consume '"'
        let mut s = String::new();
        loop {
            match self.chars.next() {
                Some('"') => return Ok(TokenKind::Str(s)),
                Some('\\') => match self.chars.next() {
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some('r') => s.push('\r'),
                    Some('"') => s.push('"'),
                    Some('\\') => s.push('\\'),
                    Some(c) => {
                        return Err(GraphError::lexer(line, format!("invalid escape '\\{c}'")))
                    }
                    None => return Err(GraphError::lexer(line, "unterminated string")),
                },
                Some('\n') | None => return Err(GraphError::lexer(line, "unterminated string")),
                Some(c) => s.push(c),
            }
        }
    }

    fn lex_at_word(&mut self) -> Result<TokenKind> {
        let line = self.line;
        self.chars.next(); // consume '@'
        let word = self.take_while(|c| c.is_ascii_alphanumeric() || c == '-');
        match word.as_str() {
            "prefix" => Ok(TokenKind::PrefixDirective(false)),
            "base" => Ok(TokenKind::BaseDirective(false)),
            "" => Err(GraphError::lexer(line, "dangling '@'")),
            _ => Ok(TokenKind::LangTag(word)),
        }
    }

    fn lex_number(&mut self) -> TokenKind {
        let lexical = self.take_while(|c| {
            c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')
        });
        TokenKind::Number(lexical)
    }

    fn lex_word(&mut self, line: usize) -> Result<TokenKind> {
        if let Some(&'_') = self.chars.peek() {
            // blank node label: _:label
            self.chars.next();
            if self.chars.next_if_eq(&':').is_none() {
                return Err(GraphError::lexer(line, "expected ':' after '_'"));
            }
            let label = self.take_name();
            return Ok(TokenKind::Blank(label));
        }

        let word = self.take_name();
        if word.is_empty() {
            let c = self.chars.peek().copied().unwrap_or(' ');
            return Err(GraphError::lexer(line, format!("unexpected character '{c}'")));
        }

        match word.as_str() {
            "a" => Ok(TokenKind::KeywordA),
            "true" => Ok(TokenKind::Boolean(true)),
            "false" => Ok(TokenKind::Boolean(false)),
            "PREFIX" => Ok(TokenKind::PrefixDirective(true)),
            "BASE" => Ok(TokenKind::BaseDirective(true)),
            _ => match word.split_once(':') {
                Some((prefix, local)) => {
                    Ok(TokenKind::Prefixed(prefix.to_string(), local.to_string()))
                }
                None => Err(GraphError::lexer(line, format!("unexpected token '{word}'"))),
            },
        }
    }

    /// Consume a prefixed-name-shaped word. A '.' is included only when the
    /// following character is still a name character, so the statement
    /// terminator is never swallowed.
    fn take_name(&mut self) -> String {
        let mut word = String::new();
        while let Some(&c) = self.chars.peek() {
            let is_name_char = c.is_alphanumeric() || matches!(c, '_' | '-' | ':' | '%');
            if is_name_char {
                word.push(c);
                self.chars.next();
            } else if c == '.' {
                let mut ahead = self.chars.clone();
                ahead.next();
                match ahead.peek() {
                    Some(&n) if n.is_alphanumeric() || matches!(n, '_' | '-' | '%') => {
                        word.push(c);
                        self.chars.next();
                    }
                    _ => break,
                }
            } else {
                break;
            }
        }
        word
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut s = String::new();
        while let Some(&c) = self.chars.peek() {
            if pred(c) {
                s.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        s
    }
}

/// Turtle parser state.
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    graph: Graph,
    prefixes: HashMap<String, String>,
    base: Option<String>,
    next_blank: usize,
}

impl Parser {
    fn new(input: &str) -> Result<Self> {
        Ok(Self {
            tokens: Lexer::new(input).tokenize()?,
            pos: 0,
            graph: Graph::new(),
            prefixes: HashMap::new(),
            base: None,
            next_blank: 0,
        })
    }

    fn parse(mut self) -> Result<Graph> {
        while !self.is_at_end() {
            self.parse_statement()?;
        }
        self.graph.base = self.base.take();
        Ok(self.graph)
    }

    fn is_at_end(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eof)
    }

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<()> {
        if self.current().kind == kind {
            self.advance();
            Ok(())
        } else {
            Err(GraphError::parse(
                self.current().line,
                format!("expected {what}, found {:?}", self.current().kind),
            ))
        }
    }

    fn parse_statement(&mut self) -> Result<()> {
        match self.current().kind.clone() {
            TokenKind::PrefixDirective(sparql) => self.parse_prefix_directive(sparql),
            TokenKind::BaseDirective(sparql) => self.parse_base_directive(sparql),
            _ => {
                let subject = self.parse_subject()?;
                self.parse_predicate_object_list(&subject)?;
                self.expect(TokenKind::Dot, "'.'")
            }
        }
    }

    fn parse_prefix_directive(&mut self, sparql_style: bool) -> Result<()> {
        self.advance();
        let (prefix, local) = match self.advance() {
            Token {
                kind: TokenKind::Prefixed(p, l),
                ..
            } => (p, l),
            other => {
                return Err(GraphError::parse(other.line, "expected prefix declaration"));
            }
        };
        if !local.is_empty() {
            return Err(GraphError::parse(
                self.current().line,
                "prefix declaration must end in ':'",
            ));
        }
        let namespace = match self.advance() {
            Token {
                kind: TokenKind::Iri(iri),
                ..
            } => self.resolve_iri(&iri)?,
            other => {
                return Err(GraphError::parse(other.line, "expected IRI for prefix"));
            }
        };
        self.graph.add_prefix(prefix.clone(), namespace.clone());
        self.prefixes.insert(prefix, namespace);
        if !sparql_style {
            self.expect(TokenKind::Dot, "'.'")?;
        }
        Ok(())
    }

    fn parse_base_directive(&mut self, sparql_style: bool) -> Result<()> {
        self.advance();
        let base = match self.advance() {
            Token {
                kind: TokenKind::Iri(iri),
                ..
            } => self.resolve_iri(&iri)?,
            other => return Err(GraphError::parse(other.line, "expected IRI for base")),
        };
        self.base = Some(base);
        if !sparql_style {
            self.expect(TokenKind::Dot, "'.'")?;
        }
        Ok(())
    }

    fn parse_subject(&mut self) -> Result<Term> {
        match self.advance() {
            Token {
                kind: TokenKind::Iri(iri),
                ..
            } => Ok(Term::iri(self.resolve_iri(&iri)?)),
            Token {
                kind: TokenKind::Prefixed(p, l),
                ..
            } => Ok(Term::iri(self.expand_prefixed(&p, &l)?)),
            Token {
                kind: TokenKind::Blank(label),
                ..
            } => Ok(Term::blank(label)),
            Token {
                kind: TokenKind::OpenBracket,
                ..
            } => self.parse_blank_property_list(),
            other => Err(GraphError::parse(
                other.line,
                format!("expected subject, found {:?}", other.kind),
            )),
        }
    }

    fn parse_predicate_object_list(&mut self, subject: &Term) -> Result<()> {
        loop {
            let predicate = self.parse_verb()?;
            loop {
                let object = self.parse_object()?;
                self.graph
                    .add_statement(subject.clone(), predicate.clone(), object);
                if self.current().kind == TokenKind::Comma {
                    self.advance();
                } else {
                    break;
                }
            }
            if self.current().kind == TokenKind::Semicolon {
                self.advance();
                // a trailing ';' may be followed by '.' or ']'
                if matches!(
                    self.current().kind,
                    TokenKind::Dot | TokenKind::CloseBracket
                ) {
                    return Ok(());
                }
            } else {
                return Ok(());
            }
        }
    }

    fn parse_verb(&mut self) -> Result<Term> {
        match self.advance() {
            Token {
                kind: TokenKind::KeywordA,
                ..
            } => Ok(Term::iri(vocabgen_vocab::rdf::TYPE)),
            Token {
                kind: TokenKind::Iri(iri),
                ..
            } => Ok(Term::iri(self.resolve_iri(&iri)?)),
            Token {
                kind: TokenKind::Prefixed(p, l),
                ..
            } => Ok(Term::iri(self.expand_prefixed(&p, &l)?)),
            other => Err(GraphError::parse(
                other.line,
                format!("expected predicate, found {:?}", other.kind),
            )),
        }
    }

    fn parse_object(&mut self) -> Result<Term> {
        match self.advance() {
            Token {
                kind: TokenKind::Iri(iri),
                ..
            } => Ok(Term::iri(self.resolve_iri(&iri)?)),
            Token {
                kind: TokenKind::Prefixed(p, l),
                ..
            } => Ok(Term::iri(self.expand_prefixed(&p, &l)?)),
            Token {
                kind: TokenKind::Blank(label),
                ..
            } => Ok(Term::blank(label)),
            Token {
                kind: TokenKind::OpenBracket,
                ..
            } => self.parse_blank_property_list(),
            Token {
                kind: TokenKind::Boolean(b),
                ..
            } => Ok(Term::boolean(b)),
            Token {
                kind: TokenKind::Number(lexical),
                ..
            } => Ok(Term::typed(&lexical, number_datatype(&lexical))),
            Token {
                kind: TokenKind::Str(s),
                ..
            } => self.parse_literal_suffix(s),
            other => Err(GraphError::parse(
                other.line,
                format!("expected object, found {:?}", other.kind),
            )),
        }
    }

    /// After a quoted string: an optional `@lang` or `^^datatype`.
    fn parse_literal_suffix(&mut self, lexical: String) -> Result<Term> {
        match self.current().kind.clone() {
            TokenKind::LangTag(lang) => {
                self.advance();
                Ok(Term::lang_string(lexical, lang))
            }
            TokenKind::DoubleCaret => {
                self.advance();
                let datatype = match self.advance() {
                    Token {
                        kind: TokenKind::Iri(iri),
                        ..
                    } => self.resolve_iri(&iri)?,
                    Token {
                        kind: TokenKind::Prefixed(p, l),
                        ..
                    } => self.expand_prefixed(&p, &l)?,
                    other => {
                        return Err(GraphError::parse(other.line, "expected datatype IRI"));
                    }
                };
                Ok(Term::typed(lexical, datatype))
            }
            _ => Ok(Term::string(lexical)),
        }
    }

    /// `[ ... ]` — allocate a fresh blank node and emit the inner statements.
    fn parse_blank_property_list(&mut self) -> Result<Term> {
        let node = Term::blank(format!("g{}", self.next_blank));
        self.next_blank += 1;
        if self.current().kind != TokenKind::CloseBracket {
            self.parse_predicate_object_list(&node)?;
        }
        self.expect(TokenKind::CloseBracket, "']'")?;
        Ok(node)
    }

    fn expand_prefixed(&self, prefix: &str, local: &str) -> Result<String> {
        let namespace = self
            .prefixes
            .get(prefix)
            .ok_or_else(|| GraphError::UndefinedPrefix(prefix.to_string()))?;
        Ok(format!("{namespace}{local}"))
    }

    fn resolve_iri(&self, iri: &str) -> Result<String> {
        if has_scheme(iri) {
            return Ok(iri.to_string());
        }
        match &self.base {
            Some(base) => Ok(format!("{base}{iri}")),
            None => Err(GraphError::NoBase(iri.to_string())),
        }
    }
}

/// True when the reference starts with a URI scheme (e.g. `http:`, `file:`).
fn has_scheme(iri: &str) -> bool {
    match iri.split_once(':') {
        Some((scheme, _)) => {
            !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

/// Numeric lexical forms map to xsd:integer / xsd:decimal / xsd:double.
fn number_datatype(lexical: &str) -> &'static str {
    use vocabgen_vocab::xsd;
    if lexical.contains('e') || lexical.contains('E') {
        xsd::DOUBLE
    } else if lexical.contains('.') {
        xsd::DECIMAL
    } else {
        xsd::INTEGER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vocabgen_vocab::rdf;

    #[test]
    fn test_parse_simple() {
        let graph = parse(
            r#"
            @prefix ex: <http://example.org/> .
            ex:alice ex:name "Alice" .
        "#,
        )
        .unwrap();
        assert_eq!(graph.len(), 1);
        let st = graph.iter().next().unwrap();
        assert_eq!(st.subject, Term::iri("http://example.org/alice"));
        assert_eq!(st.predicate, Term::iri("http://example.org/name"));
        assert_eq!(st.object, Term::string("Alice"));
    }

    #[test]
    fn test_parse_predicate_object_lists() {
        let graph = parse(
            r#"
            @prefix ex: <http://example.org/> .
            ex:alice a ex:Person ;
                     ex:name "Alice" , "Alicia" ;
                     ex:age 30 .
        "#,
        )
        .unwrap();
        assert_eq!(graph.len(), 4);
        let alice = Term::iri("http://example.org/alice");
        assert_eq!(graph.objects_of(&alice, rdf::TYPE).len(), 1);
        assert_eq!(graph.objects_of(&alice, "http://example.org/name").len(), 2);
        assert_eq!(
            graph.objects_of(&alice, "http://example.org/age"),
            vec![&Term::typed("30", vocabgen_vocab::xsd::INTEGER)]
        );
    }

    #[test]
    fn test_parse_booleans_and_lang() {
        let graph = parse(
            r#"
            @prefix ex: <http://example.org/> .
            ex:x ex:flag true ;
                 ex:label "bonjour"@fr .
        "#,
        )
        .unwrap();
        let x = Term::iri("http://example.org/x");
        assert_eq!(
            graph.objects_of(&x, "http://example.org/flag"),
            vec![&Term::boolean(true)]
        );
        assert_eq!(
            graph.objects_of(&x, "http://example.org/label"),
            vec![&Term::lang_string("bonjour", "fr")]
        );
    }

    #[test]
    fn test_parse_blank_nodes() {
        let graph = parse(
            r#"
            @prefix ex: <http://example.org/> .
            _:b1 a ex:Thing .
            ex:alice ex:knows [ ex:name "Bob" ] .
        "#,
        )
        .unwrap();
        assert_eq!(graph.len(), 3);
        let alice = Term::iri("http://example.org/alice");
        let knows = graph.objects_of(&alice, "http://example.org/knows");
        assert!(knows[0].is_blank());
        assert!(graph.has_property(knows[0], "http://example.org/name"));
    }

    #[test]
    fn test_parse_base_resolution() {
        let graph = parse(
            r#"
            @base <http://example.org/v#> .
            <hasName> a <Property> .
        "#,
        )
        .unwrap();
        let st = graph.iter().next().unwrap();
        assert_eq!(st.subject, Term::iri("http://example.org/v#hasName"));
        assert_eq!(st.object, Term::iri("http://example.org/v#Property"));
    }

    #[test]
    fn test_parse_typed_literal() {
        let graph = parse(
            r#"
            @prefix ex: <http://example.org/> .
            @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
            ex:x ex:flag "true"^^xsd:boolean .
        "#,
        )
        .unwrap();
        let x = Term::iri("http://example.org/x");
        let flag = graph.objects_of(&x, "http://example.org/flag");
        assert_eq!(flag[0].as_bool(), Some(true));
    }

    #[test]
    fn test_undefined_prefix_is_error() {
        let err = parse("nope:x nope:y nope:z .").unwrap_err();
        assert!(matches!(err, GraphError::UndefinedPrefix(_)));
    }

    #[test]
    fn test_unterminated_string_is_error() {
        let err = parse(r#"<http://e.org/x> <http://e.org/p> "oops"#).unwrap_err();
        assert!(matches!(err, GraphError::Lexer { .. }));
    }

    #[test]
    fn test_sparql_style_directives() {
        let graph = parse(
            r#"
            PREFIX ex: <http://example.org/>
            ex:alice ex:name "Alice" .
        "#,
        )
        .unwrap();
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_comments_ignored() {
        let graph = parse(
            r#"
            # a comment
            @prefix ex: <http://example.org/> . # trailing
            ex:alice ex:name "Alice" .
        "#,
        )
        .unwrap();
        assert_eq!(graph.len(), 1);
    }
}
