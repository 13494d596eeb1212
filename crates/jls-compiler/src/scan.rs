//! `ScanningFacility`: a deterministic, lexical stand-in for "the underlying
//! Java parsing and type-resolution engine" (§1, declared out of scope as an
//! external collaborator). It understands enough Java syntax — package and
//! import lines, type/method/field declarations, brace nesting, line and
//! block comments — to drive every dispatcher operation in this workspace's
//! own test suite, without attempting full javac-grade resolution.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use smol_str::SmolStr;

use jls_core::{Diagnostic, LineIndex, Position, Ptr, TextRange, TextSize, Uri};

use crate::error::CompilerError;
use crate::facility::{CompilerFacility, DocFacility, DocFirstSentence};
use crate::types::{
    Batch, CompletionContext, DeclPath, Element, ElementKind, Focus, FoldingKind, FoldingRange,
    FullFileCompilation, ImportFixups, ImportLine, ParseResult,
};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum FrameKind {
    Class,
    Method,
    Other,
}

struct Frame {
    kind: FrameKind,
    name: Option<SmolStr>,
    start: TextSize,
    decl_index: Option<usize>,
}

#[derive(Default)]
struct HeaderInfo {
    annotations: Vec<SmolStr>,
    modifiers: Vec<SmolStr>,
    /// Tokens left after stripping annotations and modifiers.
    rest: Vec<SmolStr>,
}

const MODIFIERS: &[&str] = &[
    "public",
    "private",
    "protected",
    "static",
    "final",
    "abstract",
    "synchronized",
    "native",
    "transient",
    "volatile",
    "default",
    "strictfp",
];

fn tokenize_header(header: &str) -> HeaderInfo {
    let mut info = HeaderInfo::default();
    for tok in header.split_whitespace() {
        if tok.starts_with('@') && tok != "@interface" {
            info.annotations.push(SmolStr::new(tok.trim_start_matches('@')));
            continue;
        }
        if MODIFIERS.contains(&tok) {
            info.modifiers.push(SmolStr::new(tok));
            continue;
        }
        info.rest.push(SmolStr::new(tok));
    }
    info
}

enum HeaderKind {
    Type {
        keyword: SmolStr,
        name: SmolStr,
        extends: Option<SmolStr>,
        implements: Vec<SmolStr>,
    },
    Method {
        is_constructor: bool,
        ret_type: SmolStr,
        name: SmolStr,
        param_names: Vec<SmolStr>,
        param_types: Vec<SmolStr>,
        overridden: bool,
    },
    Field {
        type_name: SmolStr,
        name: SmolStr,
    },
    Other,
}

fn classify_header(header: &str, enclosing_class: Option<&str>) -> HeaderKind {
    let trimmed = header.trim();
    if trimmed.is_empty() {
        return HeaderKind::Other;
    }

    // Type declaration: `[mods] (class|interface|enum|@interface) Name
    // [extends S] [implements I1, I2]`.
    let type_keywords = ["class", "interface", "enum", "@interface"];
    for kw in type_keywords {
        if let Some(idx) = find_keyword(trimmed, kw) {
            let before_is_header_start = trimmed[..idx].split_whitespace().all(|t| {
                t.starts_with('@') || MODIFIERS.contains(&t)
            });
            if before_is_header_start {
                let rest = trimmed[idx + kw.len()..].trim();
                let (name, tail) = take_ident(rest);
                let (extends, tail) = take_clause(tail, "extends");
                let (implements_raw, _tail) = take_clause(tail, "implements");
                let implements = implements_raw
                    .map(|s| {
                        s.split(',')
                            .map(|p| SmolStr::new(p.trim()))
                            .filter(|p| !p.is_empty())
                            .collect()
                    })
                    .unwrap_or_default();
                return HeaderKind::Type {
                    keyword: SmolStr::new(kw),
                    name: SmolStr::new(name),
                    extends: extends.map(|s| SmolStr::new(s.trim())),
                    implements,
                };
            }
        }
    }

    // Method/constructor: header contains `(`.
    if let Some(paren) = trimmed.find('(') {
        let head = &trimmed[..paren];
        let params_str = extract_parens(trimmed, paren);
        let info = tokenize_header(head);
        if let Some((name, ret_type_tokens)) = info.rest.split_last() {
            let is_constructor = enclosing_class == Some(name.as_str());
            let ret_type = if is_constructor {
                SmolStr::default()
            } else {
                ret_type_tokens
                    .last()
                    .cloned()
                    .unwrap_or_else(|| SmolStr::new(""))
            };
            let params: Vec<(SmolStr, SmolStr)> = params_str
                .split(',')
                .filter_map(|p| {
                    let p = p.trim();
                    if p.is_empty() {
                        return None;
                    }
                    let toks: Vec<&str> = p.split_whitespace().filter(|t| *t != "final").collect();
                    let (name_tok, type_toks) = toks.split_last()?;
                    let name = SmolStr::new(name_tok.trim_start_matches('@'));
                    let ty = SmolStr::new(type_toks.join(" "));
                    Some((ty, name))
                })
                .collect();
            let param_types: Vec<SmolStr> = params.iter().map(|(t, _)| t.clone()).collect();
            let param_names: Vec<SmolStr> = params.into_iter().map(|(_, n)| n).collect();
            let overridden = info.annotations.iter().any(|a| a == "Override");
            return HeaderKind::Method {
                is_constructor,
                ret_type,
                name: name.clone(),
                param_names,
                param_types,
                overridden,
            };
        }
        return HeaderKind::Other;
    }

    // Field: `[mods] Type name [= expr]`.
    let before_eq = trimmed.split('=').next().unwrap_or(trimmed);
    let info = tokenize_header(before_eq);
    if let Some((name, type_tokens)) = info.rest.split_last() {
        if !type_tokens.is_empty() {
            return HeaderKind::Field {
                type_name: type_tokens.last().cloned().unwrap(),
                name: name.clone(),
            };
        }
    }
    HeaderKind::Other
}

fn find_keyword(s: &str, kw: &str) -> Option<usize> {
    let mut start = 0;
    while let Some(pos) = s[start..].find(kw) {
        let abs = start + pos;
        let before_ok = abs == 0 || !s.as_bytes()[abs - 1].is_ascii_alphanumeric();
        let after = abs + kw.len();
        let after_ok = after >= s.len() || !s.as_bytes()[after].is_ascii_alphanumeric();
        if before_ok && after_ok {
            return Some(abs);
        }
        start = abs + kw.len();
    }
    None
}

fn take_ident(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    let end = s
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
        .unwrap_or(s.len());
    (&s[..end], s[end..].trim_start())
}

/// Pull out the `clause` keyword's payload, stopping at the next known
/// clause keyword.
fn take_clause<'a>(s: &'a str, clause: &str) -> (Option<&'a str>, &'a str) {
    match find_keyword(s, clause) {
        Some(idx) => {
            let rest = &s[idx + clause.len()..];
            let stop_at = ["extends", "implements", "permits"]
                .iter()
                .filter_map(|k| find_keyword(rest, k))
                .min();
            let payload = match stop_at {
                Some(p) => &rest[..p],
                None => rest,
            };
            let tail = match stop_at {
                Some(p) => &rest[p..],
                None => "",
            };
            (Some(payload.trim()), tail)
        }
        None => (None, s),
    }
}

fn extract_parens(s: &str, open_idx: usize) -> String {
    let bytes = s.as_bytes();
    let mut depth = 0i32;
    let mut out = String::new();
    for (i, &b) in bytes.iter().enumerate().skip(open_idx) {
        match b as char {
            '(' => {
                depth += 1;
                if depth == 1 {
                    continue;
                }
            }
            ')' => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            _ => {}
        }
        if depth >= 1 && i > open_idx {
            out.push(b as char);
        }
    }
    out
}

struct ScanOutput {
    package_name: SmolStr,
    package_line: Option<u32>,
    imports: Vec<ImportLine>,
    decl_paths: Vec<DeclPath>,
    folding: Vec<FoldingRange>,
}

fn scan(uri: &Uri, text: &str, line_index: &LineIndex) -> ScanOutput {
    let bytes = text.as_bytes();
    let mut package_name = SmolStr::default();
    let mut imports = Vec::new();
    let mut decl_paths: Vec<DeclPath> = Vec::new();
    let mut folding = Vec::new();

    let mut package_line: Option<u32> = None;
    let mut stack: Vec<Frame> = Vec::new();
    let mut header = String::new();
    let mut header_start: Option<usize> = None;

    let mut in_line_comment = false;
    let mut in_block_comment = false;
    let mut block_comment_start: Option<usize> = None;
    let mut in_string = false;
    let mut in_char = false;

    let mut import_run_start: Option<u32> = None;
    let mut import_run_end: Option<u32> = None;

    let mut i = 0usize;
    while i < bytes.len() {
        let c = bytes[i] as char;

        if in_line_comment {
            if c == '\n' {
                in_line_comment = false;
            }
            i += 1;
            continue;
        }
        if in_block_comment {
            if c == '*' && i + 1 < bytes.len() && bytes[i + 1] == b'/' {
                in_block_comment = false;
                let start = block_comment_start.unwrap();
                let end_line = line_index.line_col(TextSize::from((i + 2) as u32)).line;
                let start_line = line_index.line_col(TextSize::from(start as u32)).line;
                if end_line > start_line {
                    folding.push(FoldingRange {
                        kind: FoldingKind::Region,
                        start_line,
                        start_col: None,
                        end_line: end_line.saturating_sub(1),
                    });
                }
                i += 2;
                continue;
            }
            i += 1;
            continue;
        }
        if in_string {
            if c == '\\' {
                i += 2;
                continue;
            }
            if c == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }
        if in_char {
            if c == '\\' {
                i += 2;
                continue;
            }
            if c == '\'' {
                in_char = false;
            }
            i += 1;
            continue;
        }

        if c == '/' && i + 1 < bytes.len() && bytes[i + 1] == b'/' {
            in_line_comment = true;
            i += 2;
            continue;
        }
        if c == '/' && i + 1 < bytes.len() && bytes[i + 1] == b'*' {
            in_block_comment = true;
            block_comment_start = Some(i);
            i += 2;
            continue;
        }
        if c == '"' {
            in_string = true;
            i += 1;
            continue;
        }
        if c == '\'' {
            in_char = true;
            i += 1;
            continue;
        }

        match c {
            '{' => {
                let current_class = stack.iter().rev().find_map(|f| {
                    if f.kind == FrameKind::Class {
                        f.name.clone()
                    } else {
                        None
                    }
                });
                let kind = classify_header(&header, current_class.as_deref());
                let start = header_start.unwrap_or(i) as u32;

                match kind {
                    HeaderKind::Type {
                        keyword,
                        name,
                        extends,
                        implements,
                    } => {
                        let enclosing: Vec<SmolStr> = stack
                            .iter()
                            .filter(|f| f.kind == FrameKind::Class)
                            .filter_map(|f| f.name.clone())
                            .collect();
                        let element_kind = match keyword.as_str() {
                            "interface" => ElementKind::Interface,
                            "enum" => ElementKind::Enum,
                            "@interface" => ElementKind::AnnotationType,
                            _ => ElementKind::Class,
                        };
                        let ptr = Ptr::for_class(package_name.clone(), enclosing.clone(), name.clone());
                        let container_name = enclosing.last().cloned().unwrap_or_else(|| package_name.clone());
                        let is_test_class = name.contains("Test");
                        let element = Element {
                            ptr,
                            kind: element_kind,
                            type_name: SmolStr::default(),
                            param_names: Vec::new(),
                            param_types: Vec::new(),
                            super_type: extends.unwrap_or_else(|| SmolStr::new("Object")),
                            already_overridden: false,
                        };
                        let _ = implements;
                        decl_paths.push(DeclPath {
                            uri: uri.clone(),
                            element,
                            container_name,
                            range: TextRange::new(TextSize::from(start), TextSize::from(start)),
                            is_test_class,
                            is_test_method: false,
                        });
                        let decl_index = decl_paths.len() - 1;
                        stack.push(Frame {
                            kind: FrameKind::Class,
                            name: Some(name),
                            start: TextSize::from(start),
                            decl_index: Some(decl_index),
                        });
                    }
                    HeaderKind::Method {
                        is_constructor,
                        ret_type,
                        name,
                        param_names,
                        param_types,
                        overridden,
                    } => {
                        let enclosing: Vec<SmolStr> = stack
                            .iter()
                            .filter(|f| f.kind == FrameKind::Class)
                            .filter_map(|f| f.name.clone())
                            .collect();
                        let owner = Ptr::for_class(
                            package_name.clone(),
                            enclosing[..enclosing.len().saturating_sub(1)].to_vec(),
                            enclosing.last().cloned().unwrap_or_default(),
                        );
                        let ptr = if is_constructor {
                            Ptr::for_constructor(&owner, param_names.clone())
                        } else {
                            Ptr::for_method(&owner, name.clone(), param_names.clone())
                        };
                        let is_test_method = name.starts_with("test") || name.starts_with("should");
                        let element = Element {
                            ptr,
                            kind: if is_constructor {
                                ElementKind::Constructor
                            } else {
                                ElementKind::Method
                            },
                            type_name: ret_type,
                            param_names,
                            param_types,
                            super_type: SmolStr::default(),
                            already_overridden: overridden,
                        };
                        decl_paths.push(DeclPath {
                            uri: uri.clone(),
                            element,
                            container_name: enclosing.last().cloned().unwrap_or_default(),
                            range: TextRange::new(TextSize::from(start), TextSize::from(start)),
                            is_test_class: false,
                            is_test_method,
                        });
                        let decl_index = decl_paths.len() - 1;
                        stack.push(Frame {
                            kind: FrameKind::Method,
                            name: Some(name),
                            start: TextSize::from(start),
                            decl_index: Some(decl_index),
                        });
                    }
                    HeaderKind::Field { .. } | HeaderKind::Other => {
                        stack.push(Frame {
                            kind: FrameKind::Other,
                            name: None,
                            start: TextSize::from(start),
                            decl_index: None,
                        });
                    }
                }
                header.clear();
                header_start = None;
            }
            '}' => {
                if let Some(frame) = stack.pop() {
                    if let Some(idx) = frame.decl_index {
                        let end = TextSize::from((i + 1) as u32);
                        decl_paths[idx].range = TextRange::new(frame.start, end);
                        if frame.kind == FrameKind::Class {
                            let start_line = line_index.line_col(frame.start).line;
                            let brace_col = line_index.line_col(TextSize::from(i as u32)).col;
                            let end_line = line_index.line_col(end).line;
                            if end_line > start_line {
                                folding.push(FoldingRange {
                                    kind: FoldingKind::Region,
                                    start_line,
                                    start_col: Some(brace_col),
                                    end_line: end_line.saturating_sub(1),
                                });
                            }
                        }
                    }
                }
                header.clear();
                header_start = None;
            }
            ';' => {
                let current_class = stack.iter().rev().find_map(|f| {
                    if f.kind == FrameKind::Class {
                        f.name.clone()
                    } else {
                        None
                    }
                });
                let at_class_level = matches!(stack.last().map(|f| f.kind), Some(FrameKind::Class) | None);
                let trimmed = header.trim();
                if trimmed.starts_with("package") {
                    let name = trimmed.trim_start_matches("package").trim();
                    package_name = SmolStr::new(name);
                    package_line = Some(
                        line_index
                            .line_col(TextSize::from(header_start.unwrap_or(i) as u32))
                            .line,
                    );
                } else if trimmed.starts_with("import") {
                    let rest = trimmed.trim_start_matches("import").trim_start();
                    let is_static = rest.starts_with("static");
                    let path = if is_static {
                        rest.trim_start_matches("static").trim()
                    } else {
                        rest
                    };
                    let line = line_index
                        .line_col(TextSize::from(header_start.unwrap_or(i) as u32))
                        .line;
                    imports.push(ImportLine {
                        line,
                        is_static,
                        path: SmolStr::new(path),
                    });
                    import_run_start.get_or_insert(line);
                    import_run_end = Some(line);
                } else if at_class_level {
                    if let HeaderKind::Field { type_name, name } = classify_header(&header, current_class.as_deref()) {
                        let enclosing: Vec<SmolStr> = stack
                            .iter()
                            .filter(|f| f.kind == FrameKind::Class)
                            .filter_map(|f| f.name.clone())
                            .collect();
                        let owner = Ptr::for_class(
                            package_name.clone(),
                            enclosing[..enclosing.len().saturating_sub(1)].to_vec(),
                            enclosing.last().cloned().unwrap_or_default(),
                        );
                        let ptr = Ptr::for_field(&owner, name);
                        let start = header_start.unwrap_or(i) as u32;
                        let element = Element {
                            ptr,
                            kind: ElementKind::Field,
                            type_name,
                            param_names: Vec::new(),
                            param_types: Vec::new(),
                            super_type: SmolStr::default(),
                            already_overridden: false,
                        };
                        decl_paths.push(DeclPath {
                            uri: uri.clone(),
                            element,
                            container_name: enclosing.last().cloned().unwrap_or_default(),
                            range: TextRange::new(TextSize::from(start), TextSize::from((i + 1) as u32)),
                            is_test_class: false,
                            is_test_method: false,
                        });
                    }
                }
                header.clear();
                header_start = None;
            }
            _ => {
                if !c.is_whitespace() {
                    if header_start.is_none() {
                        header_start = Some(i);
                    }
                    header.push(c);
                } else if header_start.is_some() {
                    header.push(' ');
                }
            }
        }
        i += 1;
    }

    if let (Some(start), Some(end)) = (import_run_start, import_run_end) {
        folding.push(FoldingRange {
            kind: FoldingKind::Imports,
            start_line: start,
            start_col: None,
            end_line: end,
        });
    }

    ScanOutput {
        package_name,
        package_line,
        imports,
        decl_paths,
        folding,
    }
}

pub fn classify_completion_context(parse: &ParseResult, position: Position) -> CompletionContext {
    let text = &parse.text;
    let offset = match parse.line_index.offset_of_position(text, position) {
        Some(o) => u32::from(o) as usize,
        None => return CompletionContext::None,
    };
    let prefix = &text[..offset];

    let partial_end = offset;
    let partial_start = prefix
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_alphanumeric() || *c == '_')
        .last()
        .map(|(i, _)| i)
        .unwrap_or(partial_end);
    let partial_name = SmolStr::new(&text[partial_start..partial_end]);
    let before_partial = &text[..partial_start];
    let trimmed_before = before_partial.trim_end();

    if trimmed_before.ends_with("::") {
        return CompletionContext::MemberReference;
    }
    if trimmed_before.ends_with('.') {
        return CompletionContext::MemberSelect {
            after_method_reference: false,
        };
    }
    if trimmed_before.ends_with('@') {
        return CompletionContext::Annotation { partial_name };
    }

    let line_start = parse
        .line_index
        .line_start(position.line)
        .map(|t| u32::from(t) as usize)
        .unwrap_or(0);
    let line_prefix = text[line_start..offset].trim_start();
    if line_prefix.starts_with("case ") || line_prefix == "case" {
        return CompletionContext::Case;
    }

    let in_class = innermost(&parse.decl_paths, offset, true);
    let in_method = innermost(&parse.decl_paths, offset, false);

    if in_method.is_none() {
        return CompletionContext::None;
    }

    CompletionContext::Identifier {
        partial_name,
        in_class,
        in_method,
    }
}

fn innermost(decls: &[DeclPath], offset: usize, classes: bool) -> Option<SmolStr> {
    let offset = TextSize::from(offset as u32);
    decls
        .iter()
        .filter(|d| {
            let is_class = matches!(
                d.element.kind,
                ElementKind::Class | ElementKind::Interface | ElementKind::Enum | ElementKind::AnnotationType
            );
            let is_method = matches!(d.element.kind, ElementKind::Method | ElementKind::Constructor);
            (classes && is_class || !classes && is_method) && d.range.contains_inclusive(offset)
        })
        .min_by_key(|d| d.range.len())
        .map(|d| SmolStr::new(d.element.ptr.simple_name()))
}

/// Whole-word occurrences of `word` in `text`.
pub fn find_word_occurrences(text: &str, word: &str) -> Vec<TextRange> {
    if word.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::new();
    let bytes = text.as_bytes();
    let wlen = word.len();
    let mut start = 0;
    while let Some(pos) = text[start..].find(word) {
        let abs = start + pos;
        let before_ok = abs == 0 || !is_ident_byte(bytes[abs - 1]);
        let after_idx = abs + wlen;
        let after_ok = after_idx >= bytes.len() || !is_ident_byte(bytes[after_idx]);
        if before_ok && after_ok {
            out.push(TextRange::new(TextSize::from(abs as u32), TextSize::from(after_idx as u32)));
        }
        start = abs + wlen.max(1);
    }
    out
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

fn build_parse(uri: &Uri, text: &str) -> ParseResult {
    let line_index = LineIndex::new(text);
    let out = scan(uri, text, &line_index);
    ParseResult {
        uri: uri.clone(),
        text: text.to_string(),
        line_index,
        package_name: out.package_name,
        package_line: out.package_line,
        decl_paths: out.decl_paths,
        folding: out.folding,
        imports: out.imports,
    }
}

/// Builtin knowledge of a handful of JDK types, used to drive import
/// fix-ups and unimported-class completions without a real classpath.
fn builtin_imports() -> &'static HashMap<&'static str, &'static str> {
    jdk_type_table()
}

fn jdk_type_table() -> &'static HashMap<&'static str, &'static str> {
    static MAP: std::sync::OnceLock<HashMap<&'static str, &'static str>> = std::sync::OnceLock::new();
    MAP.get_or_init(|| {
        let mut m = HashMap::new();
        m.insert("List", "java.util.List");
        m.insert("ArrayList", "java.util.ArrayList");
        m.insert("Map", "java.util.Map");
        m.insert("HashMap", "java.util.HashMap");
        m.insert("Set", "java.util.Set");
        m.insert("Optional", "java.util.Optional");
        m
    })
}

fn build_full_file(parse: ParseResult) -> FullFileCompilation {
    let mut elements = Vec::new();
    let mut local_reference_counts = BTreeMap::new();
    let mut overrides_needed = Vec::new();

    for d in &parse.decl_paths {
        elements.push(d.element.clone());
        let count = find_word_occurrences(&parse.text, d.element.ptr.simple_name())
            .into_iter()
            .filter(|occ| !d.range.contains_inclusive(occ.start()))
            .count() as u32;
        local_reference_counts.insert(d.element.ptr.clone(), count);
    }

    // Needs-@Override heuristic: a method whose enclosing class declares a
    // non-`Object`/`none` super type, and that is not already annotated.
    let class_supers: HashMap<SmolStr, SmolStr> = parse
        .decl_paths
        .iter()
        .filter(|d| {
            matches!(
                d.element.kind,
                ElementKind::Class | ElementKind::Interface | ElementKind::Enum
            )
        })
        .map(|d| (SmolStr::new(d.element.ptr.simple_name()), d.element.super_type.clone()))
        .collect();

    for d in &parse.decl_paths {
        if d.element.kind != ElementKind::Method || d.element.already_overridden {
            continue;
        }
        let owner_super = class_supers.get(&d.container_name);
        let has_real_super = owner_super
            .map(|s| s.as_str() != "Object" && s.as_str() != "none" && !s.is_empty())
            .unwrap_or(false);
        if has_real_super {
            overrides_needed.push(d.clone());
        }
    }

    let declared_names: BTreeSet<SmolStr> = parse
        .decl_paths
        .iter()
        .map(|d| SmolStr::new(d.element.ptr.simple_name()))
        .collect();
    let imported: BTreeSet<SmolStr> = parse
        .imports
        .iter()
        .filter(|i| !i.is_static)
        .map(|i| SmolStr::new(i.path.rsplit('.').next().unwrap_or(&i.path)))
        .collect();

    let mut needed = Vec::new();
    for (short, qualified) in builtin_imports() {
        let short: SmolStr = SmolStr::new(*short);
        if declared_names.contains(&short) {
            continue;
        }
        if imported.contains(&short) {
            continue;
        }
        if find_word_occurrences(&parse.text, &short).is_empty() {
            continue;
        }
        needed.push(SmolStr::new(*qualified));
    }

    FullFileCompilation {
        parse,
        elements,
        local_reference_counts,
        overrides_needed,
        import_fixups: ImportFixups { needed },
    }
}

/// No-op doc facility: no Javadoc source is available without a real
/// classpath/doc-path (§1, out of scope).
struct NoDocs;

impl DocFacility for NoDocs {
    fn find(&self, _ptr: &Ptr) -> Option<Uri> {
        None
    }
    fn first_sentence(&self, _ptr: &Ptr) -> Option<DocFirstSentence> {
        None
    }
    fn param_names(&self, _ptr: &Ptr) -> Option<Vec<String>> {
        None
    }
    fn param_doc(&self, _ptr: &Ptr, _param: &str) -> Option<String> {
        None
    }
}

/// The deterministic `CompilerFacility` implementation used by this
/// workspace's own tests and by the `jls-lsp` binary's default wiring.
pub struct ScanningFacility {
    files: RefCell<BTreeMap<Uri, String>>,
    docs: NoDocs,
}

impl Default for ScanningFacility {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanningFacility {
    pub fn new() -> Self {
        Self {
            files: RefCell::new(BTreeMap::new()),
            docs: NoDocs,
        }
    }

    pub fn set_file(&self, uri: Uri, text: String) {
        self.files.borrow_mut().insert(uri, text);
    }

    pub fn remove_file(&self, uri: &Uri) {
        self.files.borrow_mut().remove(uri);
    }

    fn text_of(&self, uri: &Uri) -> Option<String> {
        self.files.borrow().get(uri).cloned()
    }
}

impl CompilerFacility for ScanningFacility {
    fn parse_file(&self, uri: &Uri) -> Result<ParseResult, CompilerError> {
        let text = self.text_of(uri).ok_or_else(|| CompilerError::MissingContent { uri: uri.clone() })?;
        Ok(build_parse(uri, &text))
    }

    fn compile_file(&self, uri: &Uri) -> Result<FullFileCompilation, CompilerError> {
        let parse = self.parse_file(uri)?;
        Ok(build_full_file(parse))
    }

    fn compile_focus(&self, uri: &Uri, line: u32, col: u32) -> Result<Focus, CompilerError> {
        let full = self.compile_file(uri)?;
        let position = Position::new(line, col);
        let context = full.parse.classify_at(position);

        let mut focus = Focus::new(context.clone());
        match &context {
            CompletionContext::MemberSelect { .. } | CompletionContext::MemberReference => {
                let members: Vec<Element> = full.elements.iter().cloned().collect();
                focus = focus.with_members(members);
            }
            CompletionContext::Identifier { .. } => {
                let identifiers: Vec<Element> = full.elements.iter().cloned().collect();
                focus = focus.with_identifiers(identifiers);
            }
            CompletionContext::Annotation { .. } => {
                focus = focus.with_annotations(vec![SmolStr::new("Override"), SmolStr::new("Deprecated")]);
            }
            CompletionContext::Case => {
                focus = focus.with_enum_cases(vec![]);
            }
            CompletionContext::None => {}
        }
        Ok(focus)
    }

    fn compile_batch(&self, files: &[(Uri, String)]) -> Result<Batch, CompilerError> {
        let mut out = BTreeMap::new();
        for (uri, text) in files {
            let parse = build_parse(uri, text);
            out.insert(uri.clone(), build_full_file(parse));
        }
        Ok(Batch { files: out })
    }

    fn potential_definitions(&self, el: &Ptr) -> BTreeSet<Uri> {
        self.potential_references(el)
    }

    fn potential_references(&self, el: &Ptr) -> BTreeSet<Uri> {
        let files = self.files.borrow();
        files
            .iter()
            .filter(|(_, text)| !find_word_occurrences(text, el.simple_name()).is_empty())
            .map(|(uri, _)| uri.clone())
            .collect()
    }

    fn find_symbols(&self, query: &str, limit: usize) -> Vec<DeclPath> {
        let files = self.files.borrow();
        let mut out = Vec::new();
        for (uri, text) in files.iter() {
            let parse = build_parse(uri, text);
            for d in parse.decl_paths {
                if d.element.ptr.simple_name().contains(query) {
                    out.push(d);
                    if out.len() >= limit {
                        return out;
                    }
                }
            }
        }
        out
    }

    fn report_errors(&self, _files: &BTreeSet<Uri>) -> Vec<Diagnostic> {
        Vec::new()
    }

    fn docs(&self) -> &dyn DocFacility {
        &self.docs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri(s: &str) -> Uri {
        Uri::new(s)
    }

    #[test]
    fn parses_package_and_class() {
        let facility = ScanningFacility::new();
        let u = uri("file:///A.java");
        facility.set_file(u.clone(), "package com.acme;\n\nclass A {\n  int x;\n}\n".to_string());
        let parse = facility.parse_file(&u).unwrap();
        assert_eq!(parse.package_name.as_str(), "com.acme");
        assert_eq!(parse.decl_paths.len(), 2);
        assert_eq!(parse.decl_paths[0].element.ptr.simple_name(), "A");
        assert_eq!(parse.decl_paths[1].element.ptr.simple_name(), "x");
    }

    #[test]
    fn detects_method_and_constructor() {
        let facility = ScanningFacility::new();
        let u = uri("file:///Foo.java");
        facility.set_file(
            u.clone(),
            "class Foo {\n  Foo(int a) {}\n  void run() {}\n}\n".to_string(),
        );
        let parse = facility.parse_file(&u).unwrap();
        let ctor = parse
            .decl_paths
            .iter()
            .find(|d| d.element.kind == ElementKind::Constructor)
            .unwrap();
        assert!(ctor.element.ptr.is_constructor());
        let method = parse
            .decl_paths
            .iter()
            .find(|d| d.element.ptr.simple_name() == "run")
            .unwrap();
        assert_eq!(method.element.kind, ElementKind::Method);
    }

    #[test]
    fn pruning_preserves_positions_is_exercised_elsewhere() {
        // See jls-batch for the pruner's own position-preservation tests.
    }
}
