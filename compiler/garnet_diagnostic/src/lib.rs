//! Compile-time diagnostics for Garnet.
//!
//! The lexer and parser never abort on the first problem. Each problem is
//! turned into a [`Diagnostic`] and pushed into a [`DiagnosticQueue`]; the
//! driver inspects the queue once a stage finishes.
//!
//! # Error Guarantees
//!
//! [`ErrorGuaranteed`] is proof that at least one error was recorded. The
//! only ways to obtain one are emitting an error or asking a non-empty queue,
//! so a stage cannot report failure without also reporting why.
//!
//! ```text
//! let guarantee = queue.emit_error(diagnostic);
//! fn compile() -> Result<Program, ErrorGuaranteed> { ... }
//! ```

mod diagnostic;
mod guarantee;
pub mod queue;

pub use diagnostic::{Diagnostic, Location};
pub use guarantee::ErrorGuaranteed;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
