//! State module for tracking crawl progress
//!
//! Per-host politeness state lives here. Durable crawl state (frontier,
//! visit history, counts) lives in `storage`.

mod host_state;

// Re-export main types
pub use host_state::HostState;
