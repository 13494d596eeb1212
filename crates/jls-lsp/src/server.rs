//! The lsp-server wire adapter: translates JSON-RPC requests/notifications
//! into [`Dispatcher`] calls and back. Runs a single synchronous loop over
//! `crossbeam_channel` receivers — no tokio, no worker threads, matching
//! the cooperative dispatch model (§5): every request runs to completion
//! on this one thread before the next message is read.

use lsp_server::{Connection, ExtractError, Message, Notification as WireNotification, Request as WireRequest, RequestId, Response};
use lsp_types::notification::Notification as _;
use lsp_types::request::Request as _;
use lsp_types::{
    CodeLens, CodeLensOptions, CompletionItem, CompletionItemKind, CompletionList, CompletionOptions,
    CompletionResponse, Diagnostic as WireDiagnostic, DiagnosticSeverity, DiagnosticTag, DocumentSymbol,
    DocumentSymbolResponse,
    FileSystemWatcher, GlobPattern, GotoDefinitionResponse, Hover, HoverContents, HoverProviderCapability, Location,
    MarkupContent, MarkupKind, OneOf, ParameterInformation, ParameterLabel, Position as WirePosition,
    PublishDiagnosticsParams as WirePublishDiagnosticsParams, Range as WireRange, Registration, ServerCapabilities,
    SignatureHelp, SignatureHelpOptions, SignatureInformation, SymbolInformation, SymbolKind,
    TextDocumentSyncCapability, TextDocumentSyncKind, TextEdit as WireTextEdit, Url, WatchKind,
};

use jls_compiler::{Completion, DeclPath, Element, ElementKind};
use jls_core::{LineIndex, Position, Uri};
use jls_vfs::{FileStore, InMemoryFileStore};

use crate::config::JavaConfig;
use crate::dispatcher::{CodeLensItem, Dispatcher};
use crate::error::DispatchError;

pub fn run() -> anyhow::Result<()> {
    let (connection, io_threads) = Connection::stdio();

    let capabilities = serde_json::to_value(server_capabilities())?;
    connection.initialize(capabilities)?;

    main_loop(&connection)?;
    io_threads.join()?;
    Ok(())
}

fn server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
        hover_provider: Some(HoverProviderCapability::Simple(true)),
        completion_provider: Some(CompletionOptions {
            resolve_provider: Some(true),
            trigger_characters: Some(vec![".".to_string()]),
            ..Default::default()
        }),
        signature_help_provider: Some(SignatureHelpOptions {
            trigger_characters: Some(vec!["(".to_string(), ",".to_string()]),
            retrigger_characters: None,
            work_done_progress_options: Default::default(),
        }),
        definition_provider: Some(OneOf::Left(true)),
        references_provider: Some(OneOf::Left(true)),
        document_symbol_provider: Some(OneOf::Left(true)),
        workspace_symbol_provider: Some(OneOf::Left(true)),
        document_formatting_provider: Some(OneOf::Left(true)),
        code_lens_provider: Some(CodeLensOptions { resolve_provider: Some(true) }),
        folding_range_provider: Some(lsp_types::FoldingRangeProviderCapability::Simple(true)),
        rename_provider: Some(OneOf::Left(true)),
        ..Default::default()
    }
}

fn main_loop(connection: &Connection) -> anyhow::Result<()> {
    let mut dispatcher = Dispatcher::new(InMemoryFileStore::new());
    register_watchers(connection)?;

    for msg in &connection.receiver {
        match msg {
            Message::Request(req) => {
                if connection.handle_shutdown(&req)? {
                    return Ok(());
                }
                let response = handle_request(&mut dispatcher, req);
                connection.sender.send(Message::Response(response))?;
            }
            Message::Notification(not) => {
                for publish in handle_notification(&mut dispatcher, not) {
                    let text = dispatcher.vfs().store().contents(&publish.uri).unwrap_or_default();
                    let line_index = jls_core::LineIndex::new(&text);
                    let wire = WirePublishDiagnosticsParams {
                        uri: to_url(&publish.uri),
                        diagnostics: publish
                            .diagnostics
                            .into_iter()
                            .map(|d| to_wire_diagnostic(d, &line_index, &text))
                            .collect(),
                        version: None,
                    };
                    let not = WireNotification::new(
                        lsp_types::notification::PublishDiagnostics::METHOD.to_string(),
                        wire,
                    );
                    connection.sender.send(Message::Notification(not))?;
                }
            }
            Message::Response(_) => {}
        }
    }
    Ok(())
}

/// `**/*.java`, registered once at startup (§6).
fn register_watchers(connection: &Connection) -> anyhow::Result<()> {
    let options = lsp_types::DidChangeWatchedFilesRegistrationOptions {
        watchers: vec![FileSystemWatcher {
            glob_pattern: GlobPattern::String("**/*.java".to_string()),
            kind: Some(WatchKind::all()),
        }],
    };
    let registration = Registration {
        id: "jls-watch-java-files".to_string(),
        method: lsp_types::notification::DidChangeWatchedFiles::METHOD.to_string(),
        register_options: Some(serde_json::to_value(options)?),
    };
    let params = lsp_types::RegistrationParams {
        registrations: vec![registration],
    };
    let request = WireRequest::new(
        RequestId::from("jls-register-watchers".to_string()),
        lsp_types::request::RegisterCapability::METHOD.to_string(),
        params,
    );
    connection.sender.send(Message::Request(request))?;
    Ok(())
}

fn cast_request<R>(req: WireRequest) -> Result<(RequestId, R::Params), WireRequest>
where
    R: lsp_types::request::Request,
{
    match req.extract::<R::Params>(R::METHOD) {
        Ok(v) => Ok(v),
        Err(ExtractError::MethodMismatch(req)) => Err(req),
        Err(ExtractError::JsonError { method, error }) => {
            tracing::warn!(method, %error, "malformed request params");
            Err(WireRequest::new(RequestId::from(0), method, serde_json::Value::Null))
        }
    }
}

fn handle_request(dispatcher: &mut Dispatcher<InMemoryFileStore>, req: WireRequest) -> Response {
    use lsp_types::request::*;

    let req = match cast_request::<Completion>(req) {
        Ok((id, params)) => {
            let uri = to_uri(&params.text_document_position.text_document.uri);
            let position = to_core_position(params.text_document_position.position);
            return ok_or_error(id, dispatcher.completion(&uri, position), |(incomplete, items, ids)| {
                CompletionResponse::List(CompletionList {
                    is_incomplete: incomplete,
                    items: items
                        .into_iter()
                        .zip(ids)
                        .map(|(item, id)| to_completion_item(item, id))
                        .collect(),
                })
            });
        }
        Err(req) => req,
    };

    let req = match cast_request::<ResolveCompletionItem>(req) {
        Ok((id, mut item)) => {
            let data = item.data.clone().and_then(|v| v.as_str().map(str::to_string));
            if let Some(resolved) = data.and_then(|d| dispatcher.resolve_completion_item(&d)) {
                if let Some(doc) = completion_detail(dispatcher, &resolved) {
                    item.detail = Some(doc);
                }
            }
            return response(id, item);
        }
        Err(req) => req,
    };

    let req = match cast_request::<HoverRequest>(req) {
        Ok((id, params)) => {
            let uri = to_uri(&params.text_document_position_params.text_document.uri);
            let position = to_core_position(params.text_document_position_params.position);
            return ok_or_error(id, dispatcher.hover(&uri, position), |hover| {
                hover.map(|h| Hover {
                    contents: HoverContents::Markup(MarkupContent {
                        kind: MarkupKind::Markdown,
                        value: match h.doc_first_sentence {
                            Some(doc) => format!("```java\n{}\n```\n\n{}", h.declaration, doc),
                            None => format!("```java\n{}\n```", h.declaration),
                        },
                    }),
                    range: None,
                })
            });
        }
        Err(req) => req,
    };

    let req = match cast_request::<SignatureHelpRequest>(req) {
        Ok((id, params)) => {
            let uri = to_uri(&params.text_document_position_params.text_document.uri);
            let position = to_core_position(params.text_document_position_params.position);
            return ok_or_error(id, dispatcher.signature_help(&uri, position), |result| {
                result.map(|r| SignatureHelp {
                    signatures: r
                        .candidates
                        .iter()
                        .map(|overload| SignatureInformation {
                            label: format!(
                                "{}({})",
                                overload.element.ptr.simple_name(),
                                overload.element.param_names.join(", ")
                            ),
                            documentation: None,
                            parameters: Some(
                                overload
                                    .element
                                    .param_names
                                    .iter()
                                    .map(|p| ParameterInformation {
                                        label: ParameterLabel::Simple(p.to_string()),
                                        documentation: None,
                                    })
                                    .collect(),
                            ),
                            active_parameter: None,
                        })
                        .collect(),
                    active_signature: r.active_index.map(|i| i as u32),
                    active_parameter: Some(r.active_parameter),
                })
            });
        }
        Err(req) => req,
    };

    let req = match cast_request::<GotoDefinition>(req) {
        Ok((id, params)) => {
            let uri = to_uri(&params.text_document_position_params.text_document.uri);
            let position = to_core_position(params.text_document_position_params.position);
            return ok_or_error(id, dispatcher.goto_definition(&uri, position), |defs| {
                GotoDefinitionResponse::Array(defs.into_iter().map(|(uri, range)| to_location(&uri, range)).collect())
            });
        }
        Err(req) => req,
    };

    let req = match cast_request::<References>(req) {
        Ok((id, params)) => {
            let uri = to_uri(&params.text_document_position.text_document.uri);
            let position = to_core_position(params.text_document_position.position);
            return ok_or_error(id, dispatcher.find_references(&uri, position), |refs| {
                refs.into_iter().map(|(u, range)| to_location(&u, range)).collect::<Vec<_>>()
            });
        }
        Err(req) => req,
    };

    let req = match cast_request::<WorkspaceSymbolRequest>(req) {
        Ok((id, params)) => {
            let symbols = dispatcher.workspace_symbols(&params.query);
            let items = symbols
                .into_iter()
                .map(|decl| to_symbol_information(dispatcher, decl))
                .collect::<Vec<_>>();
            return response(id, items);
        }
        Err(req) => req,
    };

    let req = match cast_request::<DocumentSymbolRequest>(req) {
        Ok((id, params)) => {
            let uri = to_uri(&params.text_document.uri);
            let result = dispatcher.document_symbols(&uri).map(|decls| {
                decls
                    .into_iter()
                    .map(|decl| to_symbol_information(dispatcher, decl))
                    .collect::<Vec<_>>()
            });
            return ok_or_error(id, result, DocumentSymbolResponse::Flat);
        }
        Err(req) => req,
    };

    let req = match cast_request::<CodeLensRequest>(req) {
        Ok((id, params)) => {
            let uri = to_uri(&params.text_document.uri);
            let text = dispatcher.vfs().store().contents(&uri).unwrap_or_default();
            let line_index = LineIndex::new(&text);
            return ok_or_error(id, dispatcher.code_lens(&uri), |items| {
                items
                    .into_iter()
                    .map(|item| to_code_lens(&uri, item, &line_index, &text))
                    .collect::<Vec<_>>()
            });
        }
        Err(req) => req,
    };

    let req = match cast_request::<CodeLensResolve>(req) {
        Ok((id, mut lens)) => {
            if let Some((uri, position)) = lens.data.as_ref().and_then(decode_reference_count_lens_data) {
                match dispatcher.resolve_reference_count_lens(&uri, position) {
                    Ok(title) => {
                        lens.command = Some(lsp_types::Command {
                            title,
                            command: FIND_REFERENCES_COMMAND.to_string(),
                            arguments: Some(vec![
                                serde_json::Value::String(to_url(&uri).to_string()),
                                serde_json::Value::from(position.line),
                                serde_json::Value::from(position.character),
                            ]),
                        });
                    }
                    Err(err) => return error_response(id, &err),
                }
            }
            return response(id, lens);
        }
        Err(req) => req,
    };

    let req = match cast_request::<Formatting>(req) {
        Ok((id, params)) => {
            let uri = to_uri(&params.text_document.uri);
            return ok_or_error(id, dispatcher.formatting(&uri), |edits| {
                edits.into_iter().map(to_wire_text_edit).collect::<Vec<_>>()
            });
        }
        Err(req) => req,
    };

    let req = match cast_request::<FoldingRangeRequest>(req) {
        Ok((id, params)) => {
            let uri = to_uri(&params.text_document.uri);
            let ranges = dispatcher.folding_ranges(&uri);
            return response(id, ranges.into_iter().map(to_wire_folding_range).collect::<Vec<_>>());
        }
        Err(req) => req,
    };

    let req = match cast_request::<PrepareRenameRequest>(req) {
        Ok((id, params)) => {
            let uri = to_uri(&params.text_document.uri);
            let position = to_core_position(params.position);
            return match dispatcher.prepare_rename(&uri, position) {
                Ok(()) => response(id, ()),
                Err(err) => error_response(id, &err),
            };
        }
        Err(req) => req,
    };

    let req = match cast_request::<Rename>(req) {
        Ok((id, params)) => {
            let uri = to_uri(&params.text_document_position.text_document.uri);
            let position = to_core_position(params.text_document_position.position);
            return match dispatcher.rename(&uri, position, &params.new_name) {
                Ok(()) => response(id, ()),
                Err(err) => error_response(id, &err),
            };
        }
        Err(req) => req,
    };

    tracing::warn!(method = %req.method, "unhandled request method");
    Response::new_err(req.id, lsp_server::ErrorCode::MethodNotFound as i32, "method not implemented".to_string())
}

/// Returns the diagnostic publishes (if any) produced as a side effect.
fn handle_notification(
    dispatcher: &mut Dispatcher<InMemoryFileStore>,
    not: WireNotification,
) -> Vec<crate::diagnostics::PublishDiagnosticsParams> {
    use lsp_types::notification::*;

    let not = match cast_notification::<DidOpenTextDocument>(not) {
        Ok(params) => {
            dispatcher.did_open(to_uri(&params.text_document.uri), params.text_document.text);
            return Vec::new();
        }
        Err(not) => not,
    };

    let not = match cast_notification::<DidChangeTextDocument>(not) {
        Ok(params) => {
            if let Some(change) = params.content_changes.into_iter().last() {
                dispatcher.did_change(to_uri(&params.text_document.uri), change.text);
            }
            return Vec::new();
        }
        Err(not) => not,
    };

    let not = match cast_notification::<DidCloseTextDocument>(not) {
        Ok(params) => return vec![dispatcher.did_close(to_uri(&params.text_document.uri))],
        Err(not) => not,
    };

    let not = match cast_notification::<DidSaveTextDocument>(not) {
        Ok(_params) => return dispatcher.did_save(),
        Err(not) => not,
    };

    let not = match cast_notification::<DidChangeConfiguration>(not) {
        Ok(params) => {
            let java = params.settings.get("java").cloned().unwrap_or(params.settings);
            dispatcher.set_config(JavaConfig::from_json(&java));
            return Vec::new();
        }
        Err(not) => not,
    };

    let not = match cast_notification::<DidChangeWatchedFiles>(not) {
        Ok(_params) => {
            // External edits fall back to the next didOpen/didChange for the
            // affected buffer; the analysis core has no out-of-editor file
            // reader of its own (§1, external collaborator).
            return Vec::new();
        }
        Err(not) => not,
    };

    tracing::debug!(method = %not.method, "unhandled notification method");
    Vec::new()
}

fn cast_notification<N>(not: WireNotification) -> Result<N::Params, WireNotification>
where
    N: lsp_types::notification::Notification,
{
    not.extract::<N::Params>(N::METHOD).map_err(|err| match err {
        ExtractError::MethodMismatch(not) => not,
        ExtractError::JsonError { method, error } => {
            tracing::warn!(method, %error, "malformed notification params");
            WireNotification::new(method, serde_json::Value::Null)
        }
    })
}

/// An unresolved reference-count lens's `data` (§4.I): the positional array
/// `["java.command.findReferences", uri, line, character]`, 0-based, rather
/// than a `{uri, position}` object -- the command name travels inside the
/// data itself since `codeLens/resolve` hasn't chosen a `command` yet.
const FIND_REFERENCES_COMMAND: &str = "java.command.findReferences";

fn encode_reference_count_lens_data(uri: &Uri, position: Position) -> serde_json::Value {
    serde_json::Value::Array(vec![
        serde_json::Value::String(FIND_REFERENCES_COMMAND.to_string()),
        serde_json::Value::String(to_url(uri).to_string()),
        serde_json::Value::from(position.line),
        serde_json::Value::from(position.character),
    ])
}

fn decode_reference_count_lens_data(data: &serde_json::Value) -> Option<(Uri, Position)> {
    let array = data.as_array()?;
    let uri = array.get(1)?.as_str()?;
    let line = array.get(2)?.as_u64()? as u32;
    let character = array.get(3)?.as_u64()? as u32;
    Some((Uri::new(uri), Position::new(line, character)))
}

fn ok_or_error<T, U>(id: RequestId, result: Result<T, DispatchError>, to_value: impl FnOnce(T) -> U) -> Response
where
    U: serde::Serialize,
{
    match result {
        Ok(value) => response(id, to_value(value)),
        Err(err) => error_response(id, &err),
    }
}

fn response<T: serde::Serialize>(id: RequestId, value: T) -> Response {
    Response::new_ok(id, value)
}

fn error_response(id: RequestId, err: &DispatchError) -> Response {
    match err {
        DispatchError::Unimplemented { method } => {
            Response::new_err(id, lsp_server::ErrorCode::MethodNotFound as i32, format!("{method} is not implemented"))
        }
        other => Response::new_err(id, lsp_server::ErrorCode::InternalError as i32, other.to_string()),
    }
}

fn to_uri(url: &Url) -> Uri {
    Uri::new(url.to_string())
}

fn to_url(uri: &Uri) -> Url {
    Url::parse(uri.as_str()).unwrap_or_else(|_| Url::parse("file:///invalid").unwrap())
}

fn to_core_position(p: WirePosition) -> Position {
    Position::new(p.line, p.character)
}

fn to_wire_position(p: Position) -> WirePosition {
    WirePosition::new(p.line, p.character)
}

fn to_wire_range(r: jls_core::Range) -> WireRange {
    WireRange::new(to_wire_position(r.start), to_wire_position(r.end))
}

fn to_location(uri: &Uri, range: jls_core::Range) -> Location {
    Location {
        uri: to_url(uri),
        range: to_wire_range(range),
    }
}

fn to_wire_diagnostic(d: jls_core::Diagnostic, line_index: &LineIndex, text: &str) -> WireDiagnostic {
    let tags = (d.code.as_deref() == Some("unused")).then(|| vec![DiagnosticTag::UNNECESSARY]);
    WireDiagnostic {
        range: to_wire_range(line_index.range(text, d.range)),
        severity: Some(to_wire_severity(d.severity)),
        code: d.code.map(lsp_types::NumberOrString::String),
        code_description: None,
        source: Some("jls".to_string()),
        message: d.message,
        related_information: None,
        tags,
        data: None,
    }
}

fn to_wire_severity(severity: jls_core::Severity) -> DiagnosticSeverity {
    match severity {
        jls_core::Severity::Error => DiagnosticSeverity::ERROR,
        jls_core::Severity::Warning => DiagnosticSeverity::WARNING,
        jls_core::Severity::Info => DiagnosticSeverity::INFORMATION,
        jls_core::Severity::Hint => DiagnosticSeverity::HINT,
    }
}

fn to_completion_item(item: Completion, id: String) -> CompletionItem {
    let insert_text = match &item {
        Completion::Snippet { insert_text, .. } => Some(insert_text.to_string()),
        _ => None,
    };
    let (label, kind, sort_text, detail) = match &item {
        Completion::Element { element, sort_rank } => (
            element.ptr.simple_name().to_string(),
            Some(element_completion_kind(element)),
            Some(sort_rank.digit().to_string()),
            (!element.type_name.is_empty()).then(|| element.type_name.to_string()),
        ),
        Completion::PackagePart { name } => (
            name.to_string(),
            Some(CompletionItemKind::MODULE),
            Some("4".to_string()),
            None,
        ),
        Completion::Keyword { keyword } => (
            keyword.to_string(),
            Some(CompletionItemKind::KEYWORD),
            Some("3".to_string()),
            Some("keyword".to_string()),
        ),
        Completion::ClassName { qualified_name, .. } => (
            qualified_name.rsplit('.').next().unwrap_or(qualified_name.as_str()).to_string(),
            Some(CompletionItemKind::CLASS),
            Some("4".to_string()),
            None,
        ),
        Completion::Snippet { label, .. } => (
            label.to_string(),
            Some(CompletionItemKind::SNIPPET),
            Some("1".to_string()),
            None,
        ),
    };

    CompletionItem {
        label,
        kind,
        sort_text,
        detail,
        insert_text,
        data: Some(serde_json::Value::String(id)),
        ..Default::default()
    }
}

fn element_completion_kind(element: &Element) -> CompletionItemKind {
    match element.kind {
        ElementKind::Class | ElementKind::Interface | ElementKind::Enum | ElementKind::AnnotationType => {
            CompletionItemKind::CLASS
        }
        ElementKind::Method | ElementKind::Constructor => CompletionItemKind::METHOD,
        ElementKind::Field => CompletionItemKind::FIELD,
        ElementKind::Package => CompletionItemKind::MODULE,
    }
}

fn completion_detail(dispatcher: &Dispatcher<InMemoryFileStore>, item: &Completion) -> Option<String> {
    match item {
        Completion::Element { element, .. } => match element.kind {
            ElementKind::Method => Some(format!(
                "{} {}({})",
                element.type_name,
                element.ptr.simple_name(),
                completion_param_list(dispatcher, element)
            )),
            ElementKind::Constructor => Some(format!(
                "{}({})",
                element.ptr.simple_name(),
                completion_param_list(dispatcher, element)
            )),
            _ => Some(format!("{} {}", element.type_name, element.ptr.simple_name())),
        },
        _ => None,
    }
}

/// Parameter names for a resolved method/constructor completion item (§4.I
/// resolveCompletionItem): the doc path's `@param` names when the Javadoc
/// covers every parameter, else the element's own `param_names` -- unless
/// every one of those follows the generic `arg0, arg1, ...` pattern, in
/// which case the short-printed parameter types are substituted instead.
fn completion_param_list(dispatcher: &Dispatcher<InMemoryFileStore>, element: &Element) -> String {
    if let Some(doc_names) = dispatcher.doc_param_names(&element.ptr) {
        return doc_names.join(", ");
    }
    if !element.param_names.is_empty() && element.param_names.iter().enumerate().all(|(i, n)| n.as_str() == format!("arg{i}")) {
        return element
            .param_types
            .iter()
            .map(|t| short_type_name(t))
            .collect::<Vec<_>>()
            .join(", ");
    }
    element.param_names.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(", ")
}

/// The last dotted segment of a source-printed type, e.g. `java.util.List`
/// -> `List`.
fn short_type_name(type_name: &str) -> &str {
    type_name.rsplit('.').next().unwrap_or(type_name)
}

fn to_symbol_information(dispatcher: &Dispatcher<InMemoryFileStore>, decl: DeclPath) -> SymbolInformation {
    let text = dispatcher.vfs().store().contents(&decl.uri).unwrap_or_default();
    let line_index = LineIndex::new(&text);
    #[allow(deprecated)]
    SymbolInformation {
        name: decl.element.ptr.simple_name().to_string(),
        kind: element_symbol_kind(&decl.element),
        tags: None,
        deprecated: None,
        location: Location {
            uri: to_url(&decl.uri),
            range: to_wire_range(line_index.range(&text, decl.range)),
        },
        container_name: Some(decl.container_name.to_string()),
    }
}

fn element_symbol_kind(element: &Element) -> SymbolKind {
    match element.kind {
        ElementKind::Class => SymbolKind::CLASS,
        ElementKind::Interface => SymbolKind::INTERFACE,
        ElementKind::Enum => SymbolKind::ENUM,
        ElementKind::AnnotationType => SymbolKind::INTERFACE,
        ElementKind::Method | ElementKind::Constructor => SymbolKind::METHOD,
        ElementKind::Field => SymbolKind::FIELD,
        ElementKind::Package => SymbolKind::PACKAGE,
    }
}

/// Both test-class and test-method lenses run under the same client
/// command (§4.I), distinguished only by their argument vector: a class
/// lens passes a literal `null` member name, a method lens passes the
/// method's own name.
const TEST_RUN_COMMAND: &str = "java.command.test.run";

fn to_code_lens(uri: &Uri, item: CodeLensItem, line_index: &LineIndex, text: &str) -> CodeLens {
    match item {
        CodeLensItem::RunAllTests { range, class_name } => CodeLens {
            range: to_wire_range(line_index.range(text, range)),
            command: Some(lsp_types::Command {
                title: "Run All Tests".to_string(),
                command: TEST_RUN_COMMAND.to_string(),
                arguments: Some(vec![
                    serde_json::Value::String(to_url(uri).to_string()),
                    serde_json::Value::String(class_name.to_string()),
                    serde_json::Value::Null,
                ]),
            }),
            data: None,
        },
        CodeLensItem::RunTest {
            range,
            class_name,
            method_name,
        } => CodeLens {
            range: to_wire_range(line_index.range(text, range)),
            command: Some(lsp_types::Command {
                title: "Run Test".to_string(),
                command: TEST_RUN_COMMAND.to_string(),
                arguments: Some(vec![
                    serde_json::Value::String(to_url(uri).to_string()),
                    serde_json::Value::String(class_name.to_string()),
                    serde_json::Value::String(method_name.to_string()),
                ]),
            }),
            data: None,
        },
        CodeLensItem::ReferenceCount { position, .. } => CodeLens {
            range: WireRange::new(to_wire_position(position), to_wire_position(position)),
            command: None,
            data: Some(encode_reference_count_lens_data(uri, position)),
        },
    }
}

fn to_wire_text_edit(edit: jls_core::TextEdit) -> WireTextEdit {
    WireTextEdit {
        range: to_wire_range(edit.range),
        new_text: edit.new_text,
    }
}

fn to_wire_folding_range(range: jls_compiler::FoldingRange) -> lsp_types::FoldingRange {
    lsp_types::FoldingRange {
        start_line: range.start_line,
        start_character: range.start_col,
        end_line: range.end_line,
        end_character: None,
        kind: Some(match range.kind {
            jls_compiler::FoldingKind::Imports => lsp_types::FoldingRangeKind::Imports,
            jls_compiler::FoldingKind::Region => lsp_types::FoldingRangeKind::Region,
        }),
        collapsed_text: None,
    }
}
