//! # Tagpix Architecture
//!
//! Tagpix attaches tags to pictures by writing them into the file names on
//! disk (`photo.jpg` becomes `photo @sunset @beach.jpg`) while keeping a
//! durable index of every picture it has seen, each picture's previous names,
//! and a change log. There is no database: every collection is a flat JSON
//! snapshot rewritten after each mutation.
//!
//! Like any UI-agnostic library, it happens to ship a CLI client; the CLI is
//! not the application.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, sets up logging, prints results        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the session, resolves selectors to picture ids      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per user action, returns CmdResult            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Domain (index, view, tags, changelog, model)               │
//! │  - Rename algorithms, visibility filters, tag grammar       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - SnapshotStore trait: FileStore, InMemoryStore            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Consistency
//!
//! Three things must agree after every operation: the in-memory index, its
//! snapshot, and the files on disk. The [`index`] module is the only code
//! that renames pictures, and it checks everything it can before touching the
//! filesystem, renames, and only then commits and saves. A failed rename
//! leaves the index as it was.
//!
//! ## Identity
//!
//! A picture's path changes whenever its tags do, so pictures are identified
//! by a generated id. Users pick pictures by display index (`1`, `2`, ...) in
//! the current view, or by path; see [`selector`].
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout or stderr and never exits
//! the process. Diagnostics go through the `log` facade.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each user action
//! - [`index`]: Picture index and rename algorithms
//! - [`view`]: Viewing directory and hide/show filters
//! - [`tags`]: Tag vocabulary and tag grammar
//! - [`changelog`]: Append-only change log
//! - [`model`]: The `Picture` type and file-name helpers
//! - [`discovery`]: Recursive picture scanning
//! - [`recognition`]: Tag suggestion seam
//! - [`store`]: Snapshot storage abstraction and implementations
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod changelog;
pub mod commands;
pub mod config;
pub mod discovery;
pub mod error;
pub mod index;
pub mod model;
pub mod recognition;
pub mod selector;
pub mod store;
pub mod tags;
pub mod view;
