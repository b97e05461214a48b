//! Swift source outline extraction.
//!
//! Converts raw Swift source text into a compact structural outline
//! (types, properties, methods, initializers) suitable for LLM prompt
//! context. Three stages run as one pure function: annotation
//! normalization (`preprocess`), a regex-driven line scan (`parser`),
//! and deterministic rendering (`render`). No stage performs I/O or
//! keeps state across calls, so everything here is safe to call
//! concurrently over different inputs.
//!
//! This is a best-effort structural summary, not a compiler front-end:
//! lines that match no declaration pattern (comments, executable
//! statements, multi-line signatures) are skipped silently.

pub mod parser;
pub mod patterns;
pub mod preprocess;
pub mod render;

use serde::Serialize;

pub use crate::error::ParseError;

/// Annotations that decorate a whole declaration (type, function) and
/// are hoisted onto their own output line.
const DECLARATION_ANNOTATIONS: &[&str] = &[
    "@objc",
    "@available",
    "@main",
    "@UIApplicationMain",
    "@NSApplicationMain",
    "@testable",
    "@objcMembers",
];

/// Property-wrapper style annotations that stay inline with the
/// property they decorate.
const FIELD_ANNOTATIONS: &[&str] = &[
    "@State",
    "@Binding",
    "@Published",
    "@ObservedObject",
    "@Environment",
    "@EnvironmentObject",
    "@NSManaged",
    "@GKInspectable",
    "@IBOutlet",
    "@IBInspectable",
];

/// Placement classification for an annotation token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    /// Rendered on its own line above the declaration.
    Declaration,
    /// Rendered inline, before the declaration's modifiers.
    Field,
}

/// A raw annotation token (`@Name` or `@Name(args)`) with its placement
/// classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub text: String,
    pub kind: AnnotationKind,
}

impl Annotation {
    /// Classify a raw annotation token by prefix against the fixed
    /// membership lists. Unknown annotations default to
    /// declaration-level so they are never dropped.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = if DECLARATION_ANNOTATIONS.iter().any(|a| text.starts_with(a)) {
            AnnotationKind::Declaration
        } else if FIELD_ANNOTATIONS.iter().any(|a| text.starts_with(a)) {
            AnnotationKind::Field
        } else {
            AnnotationKind::Declaration
        };
        Self { text, kind }
    }
}

/// The kind of type-like construct a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Struct,
    Protocol,
    Extension,
}

impl TypeKind {
    /// The Swift keyword for this kind, as rendered in the header line.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Protocol => "protocol",
            Self::Extension => "extension",
        }
    }
}

/// `let` vs `var` for a property declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LetVar {
    Let,
    Var,
}

impl LetVar {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Let => "let",
            Self::Var => "var",
        }
    }
}

/// Accessor form of a non-stored property. Mutually exclusive with the
/// plain stored form (`None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accessor {
    Computed,
    WillSet,
    DidSet,
}

/// A stored, computed, or observed property member.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyMember {
    pub name: String,
    /// Declared type, verbatim. Absent for inferred-type forms like
    /// `var flag = false`.
    #[serde(rename = "declaredType", skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<String>,
    #[serde(rename = "letVar")]
    pub let_var: LetVar,
    pub modifiers: Vec<String>,
    pub annotations: Vec<Annotation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessor: Option<Accessor>,
}

/// `throws` / `rethrows` on a function signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThrowsClause {
    Throws,
    Rethrows,
}

impl ThrowsClause {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Throws => "throws",
            Self::Rethrows => "rethrows",
        }
    }
}

/// Distinguishes ordinary functions from deinitializers, which share
/// the method list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    Func,
    Deinit,
}

/// A function or deinitializer member.
#[derive(Debug, Clone, Serialize)]
pub struct MethodMember {
    /// Function name, or the literal `deinit`.
    pub name: String,
    pub modifiers: Vec<String>,
    pub annotations: Vec<Annotation>,
    /// Generic parameter clause, verbatim including angle brackets.
    #[serde(rename = "genericParams", skip_serializing_if = "Option::is_none")]
    pub generic_params: Option<String>,
    /// Parameter list, verbatim including parentheses. Empty for deinit.
    #[serde(rename = "parameterList")]
    pub parameter_list: String,
    /// Declared return type. The renderer suppresses it when it is the
    /// unit type.
    #[serde(rename = "returnType", skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    #[serde(rename = "throwsClause", skip_serializing_if = "Option::is_none")]
    pub throws_clause: Option<ThrowsClause>,
    pub kind: MethodKind,
}

/// An initializer member.
#[derive(Debug, Clone, Serialize)]
pub struct InitMember {
    pub modifiers: Vec<String>,
    pub annotations: Vec<Annotation>,
    /// Parameter list, verbatim including parentheses.
    #[serde(rename = "parameterList")]
    pub parameter_list: String,
}

/// One declared type-like construct and its members.
///
/// A node is owned and mutated by the scanner until the next top-level
/// type declaration (or end of input) seals it; after that it is
/// read-only and appears in the output sequence exactly once, in
/// source order.
#[derive(Debug, Clone, Serialize)]
pub struct TypeNode {
    pub kind: TypeKind,
    pub name: String,
    pub annotations: Vec<Annotation>,
    /// The `: Type, Protocol` clause, verbatim (not decomposed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inheritance: Option<String>,
    pub modifiers: Vec<String>,
    pub properties: Vec<PropertyMember>,
    pub initializers: Vec<InitMember>,
    pub methods: Vec<MethodMember>,
}

impl TypeNode {
    pub fn new(
        kind: TypeKind,
        name: impl Into<String>,
        modifiers: Vec<String>,
        inheritance: Option<String>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            annotations: Vec::new(),
            inheritance,
            modifiers,
            properties: Vec::new(),
            initializers: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Append a property unless one with the same name is already
    /// present (first occurrence wins).
    pub fn add_property(&mut self, property: PropertyMember) {
        if !self.properties.iter().any(|p| p.name == property.name) {
            self.properties.push(property);
        }
    }
}

/// Parse Swift source into an ordered sequence of type nodes.
///
/// Runs the preprocessor and the line scanner. Line numbers in errors
/// refer to the preprocessed line layout.
pub fn parse_swift(source: &str) -> Result<Vec<TypeNode>, ParseError> {
    let preprocessed = preprocess::preprocess(source);
    parser::parse_lines(&preprocessed)
}

/// Render a sequence of type nodes as indented outline text.
pub fn render_outline(nodes: &[TypeNode]) -> String {
    render::render_outline(nodes)
}

/// Fail-soft entry point: outline Swift source, degrading internal
/// failures to descriptive text instead of raising.
///
/// Always returns a string. On success it is the rendered outline
/// (empty for input with no type-like declarations). On failure it
/// starts with `"Error: "` for structural failures (unbalanced braces)
/// or `"Unexpected error: "` for anything else; callers that need to
/// distinguish degraded output inspect those prefixes.
pub fn outline_or_error(source: &str) -> String {
    match parse_swift(source) {
        Ok(nodes) => render_outline(&nodes),
        Err(err @ ParseError::Structural { .. }) => format!("Error: {err}"),
        Err(err) => format!("Unexpected error: {err}"),
    }
}
