//! Diagnostic system for Cambda.
//!
//! Every error the front end reports carries:
//! - An error code for searchability
//! - A span (where it went wrong)
//! - An optional formatted message (what went wrong); the code's description
//!   is used when there is none
//!
//! Rendering is separate from reporting: phases build [`Diagnostic`] values
//! and a [`DiagnosticEmitter`](emitter::DiagnosticEmitter) prints them.

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
