//! End-to-end tests for the HTTP server: each test binds 127.0.0.1:0, serves a gateway backed by
//! `MockCompletion`, and talks to it with `reqwest`. Run with `--nocapture` to see
//! `[e2e] received: ...` lines.

mod init_logging;

mod common;

mod client_fallback;
mod cors;
mod pages;
mod validate_idea;
