//! Request handlers.

pub mod gemini;
