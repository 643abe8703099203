//! Diagnostic infrastructure for error reporting
//!
//! Turns resolution and unification failures into structured diagnostics
//! with error codes, source labels, notes and help text. Diagnostics can
//! be emitted to a terminal or serialized to JSON.

use std::ops::Range;
use std::path::PathBuf;

use codespan_reporting::diagnostic::{Diagnostic as CsDiagnostic, Label, LabelStyle, Severity};
use codespan_reporting::files::{Files, SimpleFiles};
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream, WriteColor};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, ResolveError, UnifyError};

/// A byte range in a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a span
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    fn range(self) -> Range<usize> {
        self.start..self.end
    }
}

/// Error code for a diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorCode(pub &'static str);

impl ErrorCode {
    /// The code as text (`E4001`)
    pub fn as_str(&self) -> &str {
        self.0
    }
}

/// A diagnostic message with source code context
#[derive(Debug, Clone)]
pub struct Diagnostic {
    inner: CsDiagnostic<usize>,
    code: Option<ErrorCode>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            inner: CsDiagnostic::new(severity).with_message(message),
            code: None,
        }
    }

    /// Create an error diagnostic
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Set the error code
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.inner = self.inner.with_code(code.0);
        self.code = Some(code);
        self
    }

    /// Add a primary label (main error location)
    pub fn with_primary_label(mut self, file_id: usize, span: Span, message: impl Into<String>) -> Self {
        self.inner
            .labels
            .push(Label::primary(file_id, span.range()).with_message(message));
        self
    }

    /// Add a note (additional context)
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.inner.notes.push(note.into());
        self
    }

    /// Add a help suggestion
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.inner.notes.push(format!("help: {}", help.into()));
        self
    }

    /// Create diagnostic from a ResolveError, labelling the call at `span`
    pub fn from_resolve_error(error: &ResolveError, file_id: usize, span: Span) -> Self {
        match error {
            ResolveError::NoMatch { call, args } => {
                let diag = Diagnostic::error(format!("No applicable signature for '{}'", call))
                    .with_code(resolve_error_code(error))
                    .with_primary_label(file_id, span, "no signature accepts these arguments");

                if args.iter().any(|arg| arg.is_primitive()) {
                    diag.with_help("Check for narrowing conversions; an explicit cast may be required")
                } else {
                    diag
                }
            }

            ResolveError::Ambiguous { call, signatures, .. } => {
                Diagnostic::error(format!("Call to '{}' is ambiguous", call))
                    .with_code(resolve_error_code(error))
                    .with_primary_label(file_id, span, "more than one signature matches")
                    .with_note(format!("Candidates: {}", signatures.join(", ")))
                    .with_help("Cast an argument to select one signature")
            }
        }
    }

    /// Create diagnostic from a UnifyError, labelling the branch at `span`
    pub fn from_unify_error(error: &UnifyError, file_id: usize, span: Span) -> Self {
        use UnifyError::*;

        let diag = Diagnostic::error(error.to_string()).with_code(unify_error_code(error));

        match error {
            NotExhaustive { missing } => diag
                .with_primary_label(file_id, span, "missing cases")
                .with_note(format!("Missing cases: {}", missing.join(", ")))
                .with_help("Add cases for all values or add a default case"),

            MissingDefault => diag
                .with_primary_label(file_id, span, "selector values are not enumerable")
                .with_help("Add a default case"),

            OverlappingArms { tags } => diag
                .with_primary_label(file_id, span, "duplicate case labels")
                .with_note(format!("Covered more than once: {}", tags.join(", "))),

            MultipleDefaults { .. } => {
                diag.with_primary_label(file_id, span, "more than one default case")
            }

            UnknownTags { tags } => diag
                .with_primary_label(file_id, span, "unknown case labels")
                .with_note(format!("Not part of the selector type: {}", tags.join(", "))),

            TypeConflict { first, second } => diag
                .with_primary_label(
                    file_id,
                    span,
                    format!("expected '{}', found '{}'", first, second),
                ),

            NoValue => diag
                .with_primary_label(file_id, span, "no case produces a value")
                .with_help("At least one case must yield a value"),
        }
    }

    /// Create diagnostic from a DomainError, labelling the declaration at `span`
    pub fn from_domain_error(error: &DomainError, file_id: usize, span: Span) -> Self {
        match error {
            DomainError::DuplicateTag { tag } => {
                Diagnostic::error(format!("Duplicate constant '{}'", tag))
                    .with_code(ErrorCode("E4201"))
                    .with_primary_label(file_id, span, "declared more than once")
            }
        }
    }

    /// Emit the diagnostic to stderr with colors
    pub fn emit(&self, files: &SimpleFiles<String, String>) -> Result<(), codespan_reporting::files::Error> {
        let mut writer = StandardStream::stderr(ColorChoice::Auto);
        self.emit_to(&mut writer, files)
    }

    /// Emit the diagnostic to any color-capable writer
    pub fn emit_to(
        &self,
        writer: &mut dyn WriteColor,
        files: &SimpleFiles<String, String>,
    ) -> Result<(), codespan_reporting::files::Error> {
        let config = term::Config::default();
        term::emit(writer, &config, files, &self.inner)
    }

    /// Error code, if one was set
    pub fn code(&self) -> Option<&ErrorCode> {
        self.code.as_ref()
    }

    /// Get the underlying codespan diagnostic (for testing/custom rendering)
    pub fn inner(&self) -> &CsDiagnostic<usize> {
        &self.inner
    }

    /// Convert to JSON representation for IDE integration
    pub fn to_json(&self, files: &SimpleFiles<String, String>) -> Result<String, serde_json::Error> {
        let json_diag = JsonDiagnostic::from_diagnostic(self, files);
        serde_json::to_string_pretty(&json_diag)
    }
}

/// JSON representation of a diagnostic for IDE integration
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonDiagnostic {
    /// Error code (e.g., "E4001")
    pub code: Option<String>,
    /// Severity level
    pub severity: String,
    /// Main error message
    pub message: String,
    /// Source locations with labels
    pub labels: Vec<JsonLabel>,
    /// Additional notes and help
    pub notes: Vec<String>,
}

/// JSON representation of a diagnostic label
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonLabel {
    /// File path
    pub file: String,
    /// Start line (1-indexed)
    pub start_line: usize,
    /// Start column (1-indexed)
    pub start_column: usize,
    /// End line (1-indexed)
    pub end_line: usize,
    /// End column (1-indexed)
    pub end_column: usize,
    /// Label message
    pub message: Option<String>,
    /// Label style (primary or secondary)
    pub style: String,
}

impl JsonDiagnostic {
    /// Convert a Diagnostic to JSON representation
    ///
    /// Labels pointing outside the file database are dropped.
    pub fn from_diagnostic(diag: &Diagnostic, files: &SimpleFiles<String, String>) -> Self {
        let severity = match diag.inner.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note => "note",
            Severity::Help => "help",
            Severity::Bug => "bug",
        };

        let labels = diag
            .inner
            .labels
            .iter()
            .filter_map(|label| {
                let file = files.get(label.file_id).ok()?;
                let start = files.location(label.file_id, label.range.start).ok()?;
                let end = files.location(label.file_id, label.range.end).ok()?;

                Some(JsonLabel {
                    file: file.name().to_string(),
                    start_line: start.line_number,
                    start_column: start.column_number,
                    end_line: end.line_number,
                    end_column: end.column_number,
                    message: Some(label.message.clone()),
                    style: match label.style {
                        LabelStyle::Primary => "primary",
                        LabelStyle::Secondary => "secondary",
                    }
                    .to_string(),
                })
            })
            .collect();

        JsonDiagnostic {
            code: diag.code.as_ref().map(|c| c.0.to_string()),
            severity: severity.to_string(),
            message: diag.inner.message.clone(),
            labels,
            notes: diag.inner.notes.clone(),
        }
    }
}

/// Get error code for a ResolveError
pub fn resolve_error_code(error: &ResolveError) -> ErrorCode {
    match error {
        ResolveError::NoMatch { .. } => ErrorCode("E4001"),
        ResolveError::Ambiguous { .. } => ErrorCode("E4002"),
    }
}

/// Get error code for a UnifyError
pub fn unify_error_code(error: &UnifyError) -> ErrorCode {
    use UnifyError::*;

    match error {
        NotExhaustive { .. } => ErrorCode("E4101"),
        OverlappingArms { .. } => ErrorCode("E4102"),
        TypeConflict { .. } => ErrorCode("E4103"),
        MissingDefault => ErrorCode("E4104"),
        MultipleDefaults { .. } => ErrorCode("E4105"),
        UnknownTags { .. } => ErrorCode("E4106"),
        NoValue => ErrorCode("E4107"),
    }
}

/// Helper to create a SimpleFiles instance from source code
pub fn create_files(path: impl Into<PathBuf>, source: impl Into<String>) -> SimpleFiles<String, String> {
    let mut files = SimpleFiles::new();
    files.add(path.into().display().to_string(), source.into());
    files
}
