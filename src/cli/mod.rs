//! # CLI Module
//!
//! The command-line layer of playlist-mosaic. It turns parsed arguments into
//! a [`GenerateRequest`], sets up the Spotify session for the run and reports
//! the outcome to the user.
//!
//! ## Data Flow
//!
//! ```text
//! CLI Layer (arguments, console output)
//!     ↓
//! Mosaic Pipeline (dedup, resolve, select, fetch, compose)
//!     ↓
//! Spotify Integration (session, catalog)
//!     ↓
//! Network Layer (HTTP Requests)
//! ```
//!
//! ## Usage Patterns
//!
//! ```bash
//! playlist-mosaic spotify:playlist:37i9dQZF1DXcBWIGoYBM5M
//! playlist-mosaic <url> --tiles 4 --shuffle --seed 7 --out covers.jpg
//! playlist-mosaic <url> --resolution 300 --arrange last --verbose
//! playlist-mosaic completions zsh
//! ```
//!
//! Errors are returned to `main`, which prints them and exits with status 1.

mod generate;

pub use generate::GenerateRequest;
pub use generate::generate;
