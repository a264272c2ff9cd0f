//! Playlist Mosaic Library
//!
//! This library turns the distinct album artworks of a Spotify playlist into a
//! single square mosaic image. It includes the Spotify catalog client, the
//! selection and composition pipeline, configuration management and the
//! command-line layer built on top of them.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - The error taxonomy shared by every stage
//! - `mosaic` - Deduplication, artwork resolution, tile selection, fetching and composition
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use playlist_mosaic::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> playlist_mosaic::Res<()> {
//!     config::load_env().await?;
//!     // Use CLI functions...
//!     Ok(())
//! }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

pub mod cli;
pub mod config;
pub mod error;
pub mod mosaic;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::MosaicError;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the application edges (configuration loading, the binary) where
/// any error is reported and ends the run. Pipeline stages return
/// [`MosaicError`] instead so callers can match on the failure kind.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Turns the `info!` output on or off for the rest of the process.
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

/// Whether `info!` messages are currently printed.
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Prints an informational message with a blue bullet point.
///
/// Only printed in verbose mode (see [`set_verbose`]). Used for progress
/// details of the individual pipeline stages.
///
/// # Example
///
/// ```
/// info!("Requesting token...");
/// info!("Found {} distinct albums", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    if $crate::is_verbose() {
      use colored::Colorize;
      println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
    }
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Mosaic written to {}", path.display());
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the program with exit code 1. Only the binary uses it; library
/// code returns errors instead.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("Only {} distinct artworks, shrinking grid to {}x{}", n, tiles, tiles);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
