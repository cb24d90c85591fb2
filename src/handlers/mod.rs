//! HTTP request handlers
//!
//! This module organizes all handlers into logical groups:
//! - `api` - Liveness banner, health check and workflow status
//! - `events` - Auxiliary event forwarding
//! - `skill` - Voice-assistant skill endpoint and its test harness

pub mod api;
pub mod events;
pub mod skill;

// Re-export commonly used handlers for convenient access
pub use skill::skill_request;

use serde_json::Value;

/// Whether a JSON request body counts as "nothing sent": null, false, zero,
/// or an empty string, array or object.
pub(crate) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
