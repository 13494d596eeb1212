//! Dispatcher-level errors (§7 taxonomy items that do cross a caller
//! boundary; most of the taxonomy resolves to logging plus an empty
//! result instead, per the table in the crate root docs).

use jls_core::Uri;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Compiler(#[from] jls_compiler::CompilerError),

    #[error("{uri} is not open")]
    NotOpen { uri: Uri },

    #[error("request not implemented: {method}")]
    Unimplemented { method: &'static str },
}
