//! Diagnostic queue for collecting compile-time errors.
//!
//! Features:
//! - Error limit so a badly broken file does not flood the terminal
//! - Deduplication of identical `(line, message)` pairs
//! - `ErrorGuaranteed` proof that errors were emitted
//!
//! Diagnostics are kept in emission order. The lexer and parser each report
//! in source order, and lexer problems are always emitted first.

use crate::{Diagnostic, ErrorGuaranteed};

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors kept (0 = unlimited).
    pub error_limit: usize,
    /// Drop a diagnostic identical to one already queued.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 50,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// Create a config with no limits (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
        }
    }
}

/// Queue for collecting diagnostics from the lexer and parser.
///
/// ```text
/// let mut queue = DiagnosticQueue::new();
/// queue.extend(lexed.errors.iter().map(LexError::to_diagnostic));
/// if let Some(guarantee) = queue.has_errors() { ... }
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    /// Errors offered after the limit was hit.
    dropped: usize,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    /// Create a new diagnostic queue with default configuration.
    pub fn new() -> Self {
        DiagnosticQueue::default()
    }

    /// Create a diagnostic queue with custom configuration.
    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            diagnostics: Vec::new(),
            dropped: 0,
            config,
        }
    }

    /// Add a diagnostic.
    ///
    /// Returns `true` if the diagnostic was queued, `false` if it was
    /// filtered as a duplicate or because the limit was reached.
    pub fn add(&mut self, diag: Diagnostic) -> bool {
        if self.limit_reached() {
            self.dropped += 1;
            return false;
        }

        if self.config.deduplicate && self.is_duplicate(&diag) {
            return false;
        }

        self.diagnostics.push(diag);
        true
    }

    /// Emit an error diagnostic and get proof it was emitted.
    ///
    /// The proof is returned even when the diagnostic itself was filtered:
    /// an error did occur, it just duplicates one already reported.
    pub fn emit_error(&mut self, diag: Diagnostic) -> ErrorGuaranteed {
        self.add(diag);
        ErrorGuaranteed::new()
    }

    /// Check if the error limit has been reached.
    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.diagnostics.len() >= self.config.error_limit
    }

    /// Number of queued errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    /// Number of errors discarded because the limit was reached.
    pub fn dropped_count(&self) -> usize {
        self.dropped
    }

    /// Returns `Some(ErrorGuaranteed)` if at least one error was queued.
    pub fn has_errors(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.diagnostics.len())
    }

    /// Get diagnostics without clearing the queue.
    pub fn peek(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Take every queued diagnostic, leaving the queue empty.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        self.dropped = 0;
        std::mem::take(&mut self.diagnostics)
    }

    fn is_duplicate(&self, diag: &Diagnostic) -> bool {
        self.diagnostics
            .iter()
            .rev()
            .take_while(|queued| queued.line == diag.line)
            .any(|queued| queued.message == diag.message)
    }
}

impl Extend<Diagnostic> for DiagnosticQueue {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        for diag in iter {
            self.add(diag);
        }
    }
}
