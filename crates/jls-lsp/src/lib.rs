//! Components I (Query Dispatcher), J (Diagnostics Publisher), and K
//! (progress reporting / file watching) of the interactive analysis core,
//! plus the `java.*` configuration model and the lsp-server wire adapter
//! that the `jls-lsp` binary runs over stdio.

mod completion_cache;
mod config;
mod diagnostics;
mod dispatcher;
mod error;
mod progress;
mod server;

pub use completion_cache::CompletionCache;
pub use config::JavaConfig;
pub use diagnostics::{publish as publish_diagnostics, severity_label, PublishDiagnosticsParams};
pub use dispatcher::{CodeLensItem, Dispatcher, HoverResult, SignatureHelpResult};
pub use error::DispatchError;
pub use progress::Progress;
pub use server::run;
