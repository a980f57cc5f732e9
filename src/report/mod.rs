//! Fatal-error reporting.
//!
//! A gate describes its failure as a [`Report`] and hands it to whichever
//! [`ReportingChannel`] the driver allowed for that stage. The console is
//! always available; the dialog only once the toolkit core is known to load.
//!
//! # Modules
//!
//! - [`hints`] - Remediation text for each fatal failure

pub mod hints;

use std::io::{self, Write};

use console::style;

use crate::runtime::ModalDialog;

/// A user-facing description of a fatal failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Window title when shown as a dialog.
    pub title: String,
    /// One-line statement of what is missing.
    pub summary: String,
    /// Remediation text; may be empty.
    pub body: String,
    /// Diagnostic trace, only present when debugging was requested.
    pub trace: Option<String>,
}

impl Report {
    pub fn new(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            body: String::new(),
            trace: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_trace(mut self, trace: Option<String>) -> Self {
        self.trace = trace;
        self
    }

    /// Summary and body as one block of unstyled text.
    pub fn text(&self) -> String {
        if self.body.is_empty() {
            self.summary.clone()
        } else {
            format!("{}\n\n{}", self.summary, self.body)
        }
    }
}

/// Where a fatal failure gets shown.
pub enum ReportingChannel<'a> {
    /// Plain text on the console.
    Console { out: &'a mut dyn Write },
    /// A modal dialog; `out` still receives the diagnostic trace.
    Dialog {
        dialog: &'a dyn ModalDialog,
        out: &'a mut dyn Write,
    },
}

impl ReportingChannel<'_> {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            ReportingChannel::Console { .. } => "console",
            ReportingChannel::Dialog { .. } => "dialog",
        }
    }

    /// Show `report` to the user.
    ///
    /// For the dialog channel, the trace is written best-effort and the
    /// dialog is always attempted. A dialog that cannot be shown falls back
    /// to the console, and only that fallback's write error is returned.
    pub fn deliver(self, report: &Report) -> io::Result<()> {
        tracing::debug!("Reporting '{}' via {}", report.summary, self.kind());
        match self {
            ReportingChannel::Console { out } => {
                write_console(out, report)?;
                write_trace(out, report)?;
            }
            ReportingChannel::Dialog { dialog, out } => {
                // Best effort: the dialog below is shown regardless.
                if let Err(e) = write_trace(out, report) {
                    tracing::warn!("Could not write diagnostic trace: {}", e);
                }
                if let Err(e) = dialog.show_critical(&report.title, &report.text()) {
                    tracing::warn!("Could not show error dialog: {}", e);
                    write_console(out, report)?;
                }
            }
        }
        Ok(())
    }

    /// Like [`deliver`](Self::deliver), but a failure to report is only logged.
    ///
    /// The gate's own fatal error is what the caller sees either way.
    pub fn deliver_or_log(self, report: &Report) {
        if let Err(e) = self.deliver(report) {
            tracing::warn!("Could not report '{}': {}", report.summary, e);
        }
    }
}

fn write_console(out: &mut dyn Write, report: &Report) -> io::Result<()> {
    writeln!(out, "{}", style(&report.summary).red().bold())?;
    if !report.body.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", report.body)?;
    }
    out.flush()
}

fn write_trace(out: &mut dyn Write, report: &Report) -> io::Result<()> {
    if let Some(trace) = &report.trace {
        writeln!(out)?;
        writeln!(out, "{}", trace)?;
        out.flush()?;
    }
    Ok(())
}
