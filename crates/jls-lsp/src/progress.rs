//! Component K: progress notifications around batch compiles (§6).
//!
//! Three custom notifications, always sent in this order for one unit of
//! work: `java/startProgress` once, any number of `java/reportProgress`,
//! then exactly one `java/endProgress`. Kept as plain data here; `server.rs`
//! is the only place that knows how to turn these into `lsp_server`
//! notifications.

use serde::Serialize;

pub const START_PROGRESS: &str = "java/startProgress";
pub const REPORT_PROGRESS: &str = "java/reportProgress";
pub const END_PROGRESS: &str = "java/endProgress";

#[derive(Debug, Clone, Serialize)]
pub struct StartProgressParams {
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportProgressParams {
    pub message: String,
}

/// One in-flight progress report, guaranteeing `endProgress` is the last
/// notification emitted for a unit of work even if the caller forgets.
pub struct Progress {
    title: String,
    ended: bool,
}

impl Progress {
    pub fn start(title: impl Into<String>) -> (Self, StartProgressParams) {
        let title = title.into();
        (
            Self {
                title: title.clone(),
                ended: false,
            },
            StartProgressParams { title },
        )
    }

    pub fn report(&self, message: impl Into<String>) -> ReportProgressParams {
        ReportProgressParams { message: message.into() }
    }

    pub fn end(mut self) {
        self.ended = true;
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        if !self.ended {
            tracing::warn!(title = %self.title, "progress dropped without an endProgress notification");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_suppresses_the_drop_warning_path() {
        let (progress, start) = Progress::start("Compiling");
        assert_eq!(start.title, "Compiling");
        progress.end();
    }

    #[test]
    fn report_carries_the_message_through() {
        let (progress, _start) = Progress::start("Compiling");
        let report = progress.report("indexing Foo.java");
        assert_eq!(report.message, "indexing Foo.java");
        progress.end();
    }
}
