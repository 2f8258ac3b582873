//! External-facing JSON API.

pub mod json_api;

pub use json_api::{analyze_serve_json, AnalyzeRequest, AnalyzeResponse};
