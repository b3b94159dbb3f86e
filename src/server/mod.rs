//! HTTP server for Postern

mod http;

pub use http::{run, AppState};
