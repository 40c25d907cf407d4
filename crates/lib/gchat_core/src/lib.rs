//! # gchat_core
//!
//! Core domain logic for gchat: the Gemini upstream client, the relay
//! contract, the typewriter reveal controller and the submission coordinator.

pub mod gemini;
pub mod relay;
pub mod reveal;
pub mod submit;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
