//! Annotation-line normalization.
//!
//! Rewrites raw source so annotation handling is unambiguous for the
//! scanner: declaration-level annotations are hoisted onto their own
//! line above the declaration they decorate, while field-level
//! (property-wrapper) annotations stay attached to the property line
//! so the property patterns still see their modifier context.

use super::patterns::split_leading_annotations;
use super::{Annotation, AnnotationKind};

/// Normalize annotation layout. Lines without a leading annotation run
/// pass through untouched; indentation is preserved on rewritten
/// lines.
pub fn preprocess(source: &str) -> String {
    let mut out: Vec<String> = Vec::new();

    for line in source.lines() {
        let stripped = line.trim_start();
        if !stripped.starts_with('@') {
            out.push(line.to_owned());
            continue;
        }

        let indent = &line[..line.len() - stripped.len()];
        let (annotations, rest) = split_leading_annotations(stripped);
        if annotations.is_empty() {
            // A lone '@' or an argument list spilling onto the next
            // line; leave the line for the scanner to skip.
            out.push(line.to_owned());
            continue;
        }

        let mut inline: Vec<String> = Vec::new();
        for annotation in annotations {
            match Annotation::new(&annotation).kind {
                AnnotationKind::Declaration => out.push(format!("{indent}{annotation}")),
                AnnotationKind::Field => inline.push(annotation),
            }
        }

        if !rest.is_empty() {
            if inline.is_empty() {
                out.push(format!("{indent}{rest}"));
            } else {
                out.push(format!("{indent}{} {rest}", inline.join(" ")));
            }
        } else if !inline.is_empty() {
            // The property begins on the next physical line; keep the
            // wrapper as its own line for the pending queue.
            out.push(format!("{indent}{}", inline.join(" ")));
        }
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_lines_untouched() {
        let source = "class Foo {\n  var x: Int\n}";
        assert_eq!(preprocess(source), source);
    }

    #[test]
    fn test_declaration_annotation_hoisted() {
        assert_eq!(
            preprocess("@objc public class Foo {"),
            "@objc\npublic class Foo {"
        );
    }

    #[test]
    fn test_unknown_annotation_treated_as_declaration_level() {
        assert_eq!(
            preprocess("@Observable class ViewModel {"),
            "@Observable\nclass ViewModel {"
        );
    }

    #[test]
    fn test_field_annotation_stays_inline() {
        let line = "  @State private var count: Int";
        assert_eq!(preprocess(line), line);
    }

    #[test]
    fn test_field_annotation_alone_kept_as_own_line() {
        assert_eq!(preprocess("  @Published"), "  @Published");
    }

    #[test]
    fn test_mixed_stack_splits_by_classification() {
        assert_eq!(
            preprocess("  @objc @IBOutlet weak var button: UIButton!"),
            "  @objc\n  @IBOutlet weak var button: UIButton!"
        );
    }

    #[test]
    fn test_annotation_arguments_survive_intact() {
        let line = r#"@available(*, deprecated, message: "Use newProp instead")"#;
        assert_eq!(preprocess(line), line);
    }

    #[test]
    fn test_indentation_preserved() {
        assert_eq!(
            preprocess("    @main struct App {"),
            "    @main\n    struct App {"
        );
    }
}
