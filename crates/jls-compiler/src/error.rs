//! Errors surfaced by the compiler facility.

use jls_core::Uri;

#[derive(Debug, thiserror::Error)]
pub enum CompilerError {
    #[error("{uri} is not a Java source file")]
    NotJava { uri: Uri },

    #[error("no content available for {uri}")]
    MissingContent { uri: Uri },
}
