//! The structural line scanner.
//!
//! Walks preprocessed source line by line, matching each non-blank,
//! annotation-stripped line against the ordered pattern table in
//! `patterns` and populating the output sequence of type nodes. Brace
//! depth is tracked only to know when a function body has closed; type
//! bodies are delimited structurally, by the next top-level type
//! declaration or end of input.

use super::patterns;
use super::{
    Annotation, InitMember, LetVar, MethodKind, MethodMember, ParseError, PropertyMember,
    ThrowsClause, TypeKind, TypeNode,
};

/// Scan preprocessed source into an ordered type node sequence.
///
/// Fails with a structural error when braces never return to balance,
/// and does not return partial output on failure.
pub fn parse_lines(source: &str) -> Result<Vec<TypeNode>, ParseError> {
    let mut nodes: Vec<TypeNode> = Vec::new();
    let mut current: Option<TypeNode> = None;
    let mut pending: Vec<Annotation> = Vec::new();
    let mut brace_depth: i32 = 0;
    // Depth recorded when a function/init/deinit body opened; Some
    // while scanning inside that body.
    let mut body_entry_depth: Option<i32> = None;
    let mut line_count = 0;

    for (idx, raw_line) in source.lines().enumerate() {
        let line_no = idx + 1;
        line_count = line_no;

        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let depth_before = brace_depth;
        brace_depth += brace_delta(line);

        // Inside a body every line is bookkeeping only; the flag
        // clears when depth returns to where the body opened.
        if let Some(entry) = body_entry_depth {
            if brace_depth <= entry {
                body_entry_depth = None;
            }
            continue;
        }

        let (raw_annotations, line) = patterns::split_leading_annotations(line);
        pending.extend(raw_annotations.into_iter().map(Annotation::new));
        if line.is_empty() {
            continue;
        }

        if let Some(mut node) = match_type_decl(line, line_no)? {
            if let Some(open) = current.take() {
                nodes.push(open);
            }
            node.annotations = std::mem::take(&mut pending);
            current = Some(node);
            continue;
        }

        let Some(node) = current.as_mut() else {
            // Top-level non-declaration line (import, comment, ...).
            continue;
        };

        if let Some((mut method, opens_body)) = match_function(line, line_no)? {
            method.annotations = std::mem::take(&mut pending);
            node.methods.push(method);
            if opens_body && brace_depth > depth_before {
                body_entry_depth = Some(depth_before);
            }
            continue;
        }

        if let Some(mut init) = match_init(line, line_no)? {
            init.annotations = std::mem::take(&mut pending);
            node.initializers.push(init);
            if brace_depth > depth_before {
                body_entry_depth = Some(depth_before);
            }
            continue;
        }

        if let Some(mut deinit) = match_deinit(line) {
            deinit.annotations = std::mem::take(&mut pending);
            node.methods.push(deinit);
            if brace_depth > depth_before {
                body_entry_depth = Some(depth_before);
            }
            continue;
        }

        if let Some(mut property) = match_property(line, line_no)? {
            property.annotations = std::mem::take(&mut pending);
            node.add_property(property);
            continue;
        }

        // Unmatched line inside an open type: skipped fail-open, but
        // any pending annotations must not attach across it.
        pending.clear();
    }

    if brace_depth != 0 {
        return Err(ParseError::structural(line_count));
    }

    if let Some(open) = current.take() {
        nodes.push(open);
    }

    Ok(nodes)
}

/// Net `{` minus `}` on a line. Braces inside string literals are
/// counted too; this is a known fidelity limitation of the scan.
fn brace_delta(line: &str) -> i32 {
    let mut delta = 0;
    for ch in line.chars() {
        match ch {
            '{' => delta += 1,
            '}' => delta -= 1,
            _ => {}
        }
    }
    delta
}

fn split_modifiers(caps: &regex::Captures<'_>) -> Vec<String> {
    caps.name("modifiers")
        .map(|m| m.as_str().split_whitespace().map(str::to_owned).collect())
        .unwrap_or_default()
}

fn capture_trimmed(caps: &regex::Captures<'_>, group: &str) -> Option<String> {
    caps.name(group)
        .map(|m| m.as_str().trim().to_owned())
        .filter(|s| !s.is_empty())
}

fn match_type_decl(line: &str, line_no: usize) -> Result<Option<TypeNode>, ParseError> {
    let (caps, kind) = if let Some(caps) = patterns::TYPE_RE.captures(line) {
        let kind = match caps.name("kind").map(|m| m.as_str()) {
            Some("struct") => TypeKind::Struct,
            _ => TypeKind::Class,
        };
        (caps, kind)
    } else if let Some(caps) = patterns::PROTOCOL_RE.captures(line) {
        (caps, TypeKind::Protocol)
    } else if let Some(caps) = patterns::EXTENSION_RE.captures(line) {
        (caps, TypeKind::Extension)
    } else {
        return Ok(None);
    };

    let name = caps
        .name("name")
        .ok_or_else(|| ParseError::unexpected(line_no, "type declaration without a name"))?
        .as_str()
        .to_owned();

    // `class func` is a type-level method, not a class named `func`;
    // fall through to the function matcher.
    if name == "func" {
        return Ok(None);
    }

    Ok(Some(TypeNode::new(
        kind,
        name,
        split_modifiers(&caps),
        capture_trimmed(&caps, "inheritance"),
    )))
}

/// Match a `func` header. Returns the member plus whether the line
/// carries an opening brace (protocol requirements don't, and must not
/// put the scanner into body-skipping mode).
fn match_function(line: &str, line_no: usize) -> Result<Option<(MethodMember, bool)>, ParseError> {
    let Some(caps) = patterns::FUNC_PREFIX_RE.captures(line) else {
        return Ok(None);
    };
    let whole = caps
        .get(0)
        .ok_or_else(|| ParseError::unexpected(line_no, "function header without a match span"))?;

    // The prefix match ends just past the opening paren.
    let Some((params, after)) = patterns::balanced_parens(&line[whole.end() - 1..]) else {
        // Parameter list continues on a later line: skipped fail-open.
        return Ok(None);
    };

    let name = caps
        .name("name")
        .ok_or_else(|| ParseError::unexpected(line_no, "function header without a name"))?
        .as_str()
        .to_owned();

    let (throws_clause, return_type) = match patterns::FUNC_SUFFIX_RE.captures(after) {
        Some(suffix) => {
            let throws = match suffix.name("throws").map(|m| m.as_str()) {
                Some("throws") => Some(ThrowsClause::Throws),
                Some("rethrows") => Some(ThrowsClause::Rethrows),
                _ => None,
            };
            (throws, capture_trimmed(&suffix, "return_type"))
        }
        None => (None, None),
    };

    let method = MethodMember {
        name,
        modifiers: split_modifiers(&caps),
        annotations: Vec::new(),
        generic_params: caps.name("generics").map(|m| m.as_str().to_owned()),
        parameter_list: params.to_owned(),
        return_type,
        throws_clause,
        kind: MethodKind::Func,
    };
    Ok(Some((method, line.contains('{'))))
}

fn match_init(line: &str, line_no: usize) -> Result<Option<InitMember>, ParseError> {
    let Some(caps) = patterns::INIT_PREFIX_RE.captures(line) else {
        return Ok(None);
    };
    let whole = caps
        .get(0)
        .ok_or_else(|| ParseError::unexpected(line_no, "init header without a match span"))?;

    let Some((params, _)) = patterns::balanced_parens(&line[whole.end() - 1..]) else {
        return Ok(None);
    };

    Ok(Some(InitMember {
        modifiers: split_modifiers(&caps),
        annotations: Vec::new(),
        parameter_list: params.to_owned(),
    }))
}

fn match_deinit(line: &str) -> Option<MethodMember> {
    let caps = patterns::DEINIT_RE.captures(line)?;
    Some(MethodMember {
        name: "deinit".to_owned(),
        modifiers: split_modifiers(&caps),
        annotations: Vec::new(),
        generic_params: None,
        parameter_list: String::new(),
        return_type: None,
        throws_clause: None,
        kind: MethodKind::Deinit,
    })
}

fn match_property(line: &str, line_no: usize) -> Result<Option<PropertyMember>, ParseError> {
    use super::Accessor;

    let (caps, accessor) = if let Some(caps) = patterns::OBSERVED_PROPERTY_RE.captures(line) {
        let accessor = match caps.name("observer").map(|m| m.as_str()) {
            Some("willSet") => Accessor::WillSet,
            _ => Accessor::DidSet,
        };
        (caps, Some(accessor))
    } else if let Some(caps) = patterns::COMPUTED_PROPERTY_RE.captures(line) {
        (caps, Some(Accessor::Computed))
    } else if let Some(caps) = patterns::STORED_PROPERTY_RE.captures(line) {
        (caps, None)
    } else {
        return Ok(None);
    };

    let name = caps
        .name("name")
        .ok_or_else(|| ParseError::unexpected(line_no, "property declaration without a name"))?
        .as_str()
        .to_owned();

    let let_var = match caps.name("let_var").map(|m| m.as_str()) {
        Some("let") => LetVar::Let,
        // The computed pattern has no let_var group; it only admits var.
        _ => LetVar::Var,
    };

    Ok(Some(PropertyMember {
        name,
        declared_type: capture_trimmed(&caps, "type"),
        let_var,
        modifiers: split_modifiers(&caps),
        annotations: Vec::new(),
        accessor,
    }))
}
