//! Route paths served by the relay.

pub const POST_API_GEMINI: &str = gchat_core::relay::RELAY_ROUTE;
