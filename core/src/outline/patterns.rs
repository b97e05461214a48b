//! Regex pattern table and lexical helpers for the line scanner.
//!
//! Each declaration form gets one anchored pattern; the scanner tries
//! them in a fixed order and the first match wins. Patterns are
//! compiled once and shared across calls.
//!
//! Parameter lists and annotation argument lists are deliberately NOT
//! matched by regex: both may contain nested parentheses (e.g.
//! `date: Date = Date()`), so they are captured by the balanced scans
//! below instead.

use regex::Regex;
use std::sync::LazyLock;

/// Modifier keywords accepted before `class` / `struct`.
const TYPE_MODIFIERS: &str =
    "public|private|internal|fileprivate|open|static|final|weak|unowned|dynamic|lazy|convenience|required|@objc";

/// Modifier keywords accepted before `protocol` / `extension`.
const ACCESS_MODIFIERS: &str = "public|private|internal|fileprivate|@objc";

/// Modifier keywords accepted before a property declaration.
const PROPERTY_MODIFIERS: &str =
    "public|private|internal|fileprivate|open|static|lazy|weak|unowned|dynamic|final|override|@objc";

/// Modifier keywords accepted before `func`.
const FUNC_MODIFIERS: &str =
    "public|private|internal|fileprivate|static|class|final|override|open|required|convenience|mutating|nonmutating|unowned|weak|dynamic|@objc|@discardableResult";

/// Modifier keywords accepted before `init`.
const INIT_MODIFIERS: &str =
    "public|private|internal|fileprivate|required|convenience|override";

/// `class Foo: Bar` / `struct Foo` headers.
pub static TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?P<modifiers>(?:(?:{TYPE_MODIFIERS})\s+)*)(?P<kind>class|struct)\s+(?P<name>\w+)(?:\s*:\s*(?P<inheritance>[\w.,\s&]+))?"
    ))
    .unwrap()
});

/// `protocol Foo: AnyObject` headers.
pub static PROTOCOL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?P<modifiers>(?:(?:{ACCESS_MODIFIERS})\s+)*)protocol\s+(?P<name>\w+)(?:\s*:\s*(?P<inheritance>[\w.,\s&]+))?"
    ))
    .unwrap()
});

/// `extension Foo: Bar` headers.
pub static EXTENSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?P<modifiers>(?:(?:{ACCESS_MODIFIERS})\s+)*)extension\s+(?P<name>\w+)(?:\s*:\s*(?P<inheritance>[\w.,\s&]+))?"
    ))
    .unwrap()
});

/// Everything of a `func` header up to and including the opening paren
/// of its parameter list; the list itself is taken by `balanced_parens`.
pub static FUNC_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?P<modifiers>(?:(?:{FUNC_MODIFIERS})\s+)*)func\s+(?P<name>\w+)\s*(?P<generics><[^>]+>)?\s*\("
    ))
    .unwrap()
});

/// The tail of a `func` header after the parameter list. All parts are
/// optional, so this always matches.
pub static FUNC_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<throws>throws|rethrows)?\s*(?:->\s*(?P<return_type>[^{]+))?").unwrap()
});

/// An `init` header up to and including the opening paren.
pub static INIT_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?P<modifiers>(?:(?:{INIT_MODIFIERS})\s+)*)init\s*\("
    ))
    .unwrap()
});

/// A `deinit` header, optionally carrying its opening brace.
pub static DEINIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?P<modifiers>(?:(?:{ACCESS_MODIFIERS})\s+)*)deinit\s*\{{?\s*$"
    ))
    .unwrap()
});

/// A property whose observer clause opens on the same logical line:
/// `var x: Int = 0 { didSet ...`.
pub static OBSERVED_PROPERTY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?P<modifiers>(?:(?:{PROPERTY_MODIFIERS})\s+)*)(?P<let_var>let|var)\s+(?P<name>\w+)(?:\s*:\s*(?P<type>[^={{]+?))?\s*(?:=[^{{]*)?\{{\s*(?P<observer>willSet|didSet)"
    ))
    .unwrap()
});

/// A computed property: `var x: Type {` with no `=` before the brace.
pub static COMPUTED_PROPERTY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?P<modifiers>(?:(?:{PROPERTY_MODIFIERS})\s+)*)var\s+(?P<name>\w+)\s*:\s*(?P<type>[^={{]+)\{{"
    ))
    .unwrap()
});

/// A plain stored property. The type annotation is optional (inferred
/// forms like `var flag = false`) and any `= initializer` tail is left
/// out of the captured type.
pub static STORED_PROPERTY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?P<modifiers>(?:(?:{PROPERTY_MODIFIERS})\s+)*)(?P<let_var>let|var)\s+(?P<name>\w+)(?:\s*:\s*(?P<type>[^={{]+?))?\s*(?:=.*)?$"
    ))
    .unwrap()
});

/// Take a balanced parenthesis group off the front of `s`.
///
/// `s` must start with `(`. Tracks nesting depth character by
/// character and skips the contents of double-quoted string literals
/// (including backslash escapes), since argument lists may contain
/// both. Returns the group (with its parentheses) and the remainder,
/// or `None` when the group does not close within `s`.
pub fn balanced_parens(s: &str) -> Option<(&str, &str)> {
    if !s.starts_with('(') {
        return None;
    }

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, ch) in s.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '(' => depth += 1,
            ')' => {
                if depth == 1 {
                    let end = i + ch.len_utf8();
                    return Some((&s[..end], &s[end..]));
                }
                depth = depth.saturating_sub(1);
            }
            _ => {}
        }
    }

    None
}

/// Split a leading run of annotation tokens off a line.
///
/// An annotation token is `@` followed by an identifier, optionally
/// followed by a balanced-parenthesis argument list. An annotation
/// whose argument list does not close on this line terminates the run
/// without being consumed.
pub fn split_leading_annotations(line: &str) -> (Vec<String>, &str) {
    let mut annotations = Vec::new();
    let mut rest = line.trim_start();

    while let Some(after_at) = rest.strip_prefix('@') {
        let ident_len: usize = after_at
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_')
            .map(char::len_utf8)
            .sum();
        if ident_len == 0 {
            break;
        }

        let after_ident = &after_at[ident_len..];
        let token_len = if after_ident.starts_with('(') {
            match balanced_parens(after_ident) {
                Some((args, _)) => 1 + ident_len + args.len(),
                None => break,
            }
        } else {
            1 + ident_len
        };

        annotations.push(rest[..token_len].to_owned());
        rest = rest[token_len..].trim_start();
    }

    (annotations, rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_parens_simple() {
        let (group, rest) = balanced_parens("(a: Int) -> Bool").unwrap();
        assert_eq!(group, "(a: Int)");
        assert_eq!(rest, " -> Bool");
    }

    #[test]
    fn test_balanced_parens_nested() {
        let (group, rest) =
            balanced_parens("(title: String, date: Date = Date()) {").unwrap();
        assert_eq!(group, "(title: String, date: Date = Date())");
        assert_eq!(rest, " {");
    }

    #[test]
    fn test_balanced_parens_string_contents_ignored() {
        let (group, rest) = balanced_parens(r#"(name: "a ) b", n: 1) tail"#).unwrap();
        assert_eq!(group, r#"(name: "a ) b", n: 1)"#);
        assert_eq!(rest, " tail");
    }

    #[test]
    fn test_balanced_parens_unterminated() {
        assert!(balanced_parens("(a: Int").is_none());
        assert!(balanced_parens("no paren").is_none());
    }

    #[test]
    fn test_split_single_annotation() {
        let (anns, rest) = split_leading_annotations("@objc public class Foo {");
        assert_eq!(anns, vec!["@objc"]);
        assert_eq!(rest, "public class Foo {");
    }

    #[test]
    fn test_split_annotation_with_arguments() {
        let (anns, rest) = split_leading_annotations(
            r#"@available(*, deprecated, message: "Use newProp instead")"#,
        );
        assert_eq!(
            anns,
            vec![r#"@available(*, deprecated, message: "Use newProp instead")"#]
        );
        assert_eq!(rest, "");
    }

    #[test]
    fn test_split_stacked_annotations() {
        let (anns, rest) = split_leading_annotations("@objc @MainActor var x: Int");
        assert_eq!(anns, vec!["@objc", "@MainActor"]);
        assert_eq!(rest, "var x: Int");
    }

    #[test]
    fn test_split_unterminated_argument_list_stops_run() {
        // The argument list continues on the next physical line; the
        // token is left unconsumed for fail-open skipping.
        let (anns, rest) = split_leading_annotations("@available(iOS 13,");
        assert!(anns.is_empty());
        assert_eq!(rest, "@available(iOS 13,");
    }

    #[test]
    fn test_split_non_annotation_untouched() {
        let (anns, rest) = split_leading_annotations("var x: Int");
        assert!(anns.is_empty());
        assert_eq!(rest, "var x: Int");
    }

    #[test]
    fn test_func_prefix_matches_generics() {
        let caps = FUNC_PREFIX_RE
            .captures("public func complexMethod<T: Comparable>(param: T) throws -> [String: [T]] {")
            .unwrap();
        assert_eq!(caps.name("name").unwrap().as_str(), "complexMethod");
        assert_eq!(caps.name("generics").unwrap().as_str(), "<T: Comparable>");
    }

    #[test]
    fn test_deinit_with_and_without_brace() {
        assert!(DEINIT_RE.is_match("deinit"));
        assert!(DEINIT_RE.is_match("deinit {"));
        assert!(DEINIT_RE.is_match("public deinit {"));
        assert!(!DEINIT_RE.is_match("deinitialize()"));
    }

    #[test]
    fn test_stored_property_optional_type() {
        let caps = STORED_PROPERTY_RE
            .captures("private var showingAddNote = false")
            .unwrap();
        assert_eq!(caps.name("name").unwrap().as_str(), "showingAddNote");
        assert!(caps.name("type").is_none());

        let caps = STORED_PROPERTY_RE
            .captures("private let simpleProp: Int = 0")
            .unwrap();
        assert_eq!(caps.name("type").unwrap().as_str(), "Int");
    }

    #[test]
    fn test_computed_property_rejects_initializer() {
        assert!(COMPUTED_PROPERTY_RE.is_match("var body: some View {"));
        assert!(!COMPUTED_PROPERTY_RE.is_match("var x: Int = 0 {"));
        assert!(!COMPUTED_PROPERTY_RE.is_match("let x: Int"));
    }

    #[test]
    fn test_observed_property_same_line_only() {
        assert!(OBSERVED_PROPERTY_RE.is_match("var x: Int = 0 { didSet {"));
        assert!(OBSERVED_PROPERTY_RE.is_match("public var y: Bool { willSet {"));
        // Observer on the next physical line is out of reach.
        assert!(!OBSERVED_PROPERTY_RE.is_match("public var y: Bool = false {"));
    }
}
