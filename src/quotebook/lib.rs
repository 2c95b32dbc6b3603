//! # Quotebook Architecture
//!
//! Quotebook is a **UI-agnostic quotation library**: it loads a collection of
//! quotes from Markdown files, filters and searches it, keeps a client-local
//! set of favorites and renders quotes as shareable PNG cards. The bundled
//! binary is one client (a CLI plus an HTTP service); the library does not
//! assume either.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Clients: CLI (binary) and HTTP service (server.rs)         │
//! │  - The only places that know about terminals, HTTP, exits   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, generic over favorites backend│
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic returning structured `CmdResult`s         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core                                                       │
//! │  - loader: record store (Markdown + YAML front matter)      │
//! │  - filter: search / category filtering, related quotes      │
//! │  - favorites: observable store over a pluggable backend     │
//! │  - render: themed card layout and PNG encoding              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The core components share nothing but the [`model::Quote`] record.
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes ordinary arguments, returns
//! `Result<CmdResult>` or plain values and never writes to stdout or exits.
//! Recoverable problems (a malformed quote file, corrupt favorites, an
//! unknown theme) are logged through `tracing` and absorbed; only a missing
//! quote surfaces as an error, [`error::QuoteError::QuoteNotFound`].
//!
//! ## Testing Strategy
//!
//! 1. **Commands**: most of the unit tests, with
//!    [`favorites::MemBackend`] standing in for the filesystem.
//! 2. **Core modules**: filter, loader, favorites and render each test their
//!    own invariants in place.
//! 3. **API and server**: dispatch tests; the router is exercised in-process
//!    with `tower::ServiceExt::oneshot`.
//! 4. **Binary**: `tests/` drives the compiled CLI with `assert_cmd`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each command
//! - [`loader`]: Loading the quote collection
//! - [`filter`]: Filtering and related quotes
//! - [`favorites`]: Favorites store and backends
//! - [`render`]: Image export
//! - [`server`]: HTTP endpoints
//! - [`config`]: Configuration and data directory
//! - [`logging`]: `tracing` subscriber setup
//! - [`clipboard`]: System clipboard support
//! - [`model`]: The quote record
//! - [`error`]: Error types

pub mod api;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod error;
pub mod favorites;
pub mod filter;
pub mod loader;
pub mod logging;
pub mod model;
pub mod render;
pub mod server;
