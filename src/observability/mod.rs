//! Tracing subscriber setup.
//!
//! The engine emits `tracing` spans and events around every recomputation and
//! state transition. This module installs a subscriber that prints them to stderr.
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Usage
//!
//! Initialize tracing early, before building controllers:
//!
//! ```rust
//! use recordview::observability::init_tracing;
//! use recordview::Config;
//!
//! let config = Config::default();
//! init_tracing(&config);
//!
//! tracing::debug!("engine initialized");
//! ```

mod init;

pub use init::init_tracing;
