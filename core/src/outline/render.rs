//! Deterministic outline rendering.
//!
//! Serializes the type node sequence to indented text in source
//! encounter order. Members render grouped as properties, then
//! initializers, then methods; all collections are insertion-ordered,
//! so identical input always produces byte-identical output. No line
//! carries trailing whitespace.

use super::{Accessor, AnnotationKind, InitMember, MethodKind, MethodMember, PropertyMember, TypeNode};

const INDENT: &str = "  ";

/// Return types treated as the implicit unit type and suppressed.
const UNIT_RETURN_TYPES: &[&str] = &["Void", "()"];

/// Render the node sequence. Nodes are separated by one blank line;
/// the result has no leading or trailing whitespace.
pub fn render_outline(nodes: &[TypeNode]) -> String {
    nodes
        .iter()
        .map(render_node)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_node(node: &TypeNode) -> String {
    let mut lines: Vec<String> = Vec::new();

    for annotation in &node.annotations {
        lines.push(annotation.text.clone());
    }

    let mut header = String::new();
    if !node.modifiers.is_empty() {
        header.push_str(&node.modifiers.join(" "));
        header.push(' ');
    }
    header.push_str(node.kind.keyword());
    header.push(' ');
    header.push_str(&node.name);
    if let Some(inheritance) = &node.inheritance {
        header.push_str(": ");
        header.push_str(inheritance);
    }
    lines.push(header);

    for property in &node.properties {
        render_property(property, &mut lines);
    }
    for init in &node.initializers {
        render_init(init, &mut lines);
    }
    for method in &node.methods {
        render_method(method, &mut lines);
    }

    lines.join("\n")
}

fn render_property(property: &PropertyMember, lines: &mut Vec<String>) {
    // Declaration-level annotations hoist to their own line;
    // field-level wrappers stay inline before the modifiers.
    let mut parts: Vec<&str> = Vec::new();
    for annotation in &property.annotations {
        match annotation.kind {
            AnnotationKind::Declaration => lines.push(format!("{INDENT}{}", annotation.text)),
            AnnotationKind::Field => parts.push(&annotation.text),
        }
    }

    for modifier in &property.modifiers {
        parts.push(modifier);
    }
    parts.push(property.let_var.keyword());

    let mut line = format!("{INDENT}{}", parts.join(" "));
    line.push(' ');
    line.push_str(&property.name);
    if let Some(declared_type) = &property.declared_type {
        line.push_str(": ");
        line.push_str(declared_type);
    }
    match property.accessor {
        Some(Accessor::WillSet) => line.push_str(" { willSet }"),
        Some(Accessor::DidSet) => line.push_str(" { didSet }"),
        // The computed accessor is left implicit.
        Some(Accessor::Computed) | None => {}
    }
    lines.push(line);
}

fn render_init(init: &InitMember, lines: &mut Vec<String>) {
    for annotation in &init.annotations {
        lines.push(format!("{INDENT}{}", annotation.text));
    }

    let mut line = String::from(INDENT);
    if !init.modifiers.is_empty() {
        line.push_str(&init.modifiers.join(" "));
        line.push(' ');
    }
    line.push_str("init");
    line.push_str(&init.parameter_list);
    lines.push(line);
}

fn render_method(method: &MethodMember, lines: &mut Vec<String>) {
    for annotation in &method.annotations {
        lines.push(format!("{INDENT}{}", annotation.text));
    }

    let mut line = String::from(INDENT);
    if !method.modifiers.is_empty() {
        line.push_str(&method.modifiers.join(" "));
        line.push(' ');
    }

    if method.kind == MethodKind::Deinit {
        line.push_str("deinit");
        lines.push(line);
        return;
    }

    line.push_str("func ");
    line.push_str(&method.name);
    if let Some(generics) = &method.generic_params {
        line.push_str(generics);
    }
    line.push_str(&method.parameter_list);
    if let Some(throws) = method.throws_clause {
        line.push(' ');
        line.push_str(throws.keyword());
    }
    if let Some(return_type) = &method.return_type {
        if !UNIT_RETURN_TYPES.contains(&return_type.as_str()) {
            line.push_str(" -> ");
            line.push_str(return_type);
        }
    }
    lines.push(line);
}
