//! Extension traits for third-party types.

pub mod serde_json;
