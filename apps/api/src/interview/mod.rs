// Mock interview: a fixed-length, five-question practice session.
// `protocol` owns the response framing, `session` the state machine,
// `registry` the per-user sessions held by the server.

pub mod handlers;
pub mod prompts;
pub mod protocol;
pub mod registry;
pub mod session;
