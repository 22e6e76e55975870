//! Homepage application: configuration, HTTP server, and the modules shared by
//! the `homepage` CLI and the `homepage-server` binary.

pub mod config;
pub mod server;
