//! Configuration management for playlist-mosaic.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. The lookup order is:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (endpoint URLs only)

use std::{env, path::PathBuf};

use crate::{Res, error::MosaicError};

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_API_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the directory structure if it doesn't exist. The file itself is
/// optional; variables already set in the environment are never overridden.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/playlist-mosaic/.env`
/// - macOS: `~/Library/Application Support/playlist-mosaic/.env`
/// - Windows: `%LOCALAPPDATA%/playlist-mosaic/.env`
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the `.env` file
/// exists but cannot be parsed.
pub async fn load_env() -> Res<()> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path)?;
    }
    Ok(())
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("playlist-mosaic/.env");
    path
}

fn required(key: &str) -> Result<String, MosaicError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(MosaicError::Config(format!(
            "{key} must be set (environment or {})",
            env_path().display()
        ))),
    }
}

fn with_default(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Returns the Spotify API client ID (`SPOTIFY_API_AUTH_CLIENT_ID`).
pub fn spotify_client_id() -> Result<String, MosaicError> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Returns the Spotify API client secret (`SPOTIFY_API_AUTH_CLIENT_SECRET`).
///
/// The secret should never be printed, not even in verbose mode.
pub fn spotify_client_secret() -> Result<String, MosaicError> {
    required("SPOTIFY_API_AUTH_CLIENT_SECRET")
}

/// Returns the Spotify Web API base URL (`SPOTIFY_API_URL`).
///
/// Defaults to `https://api.spotify.com/v1`.
pub fn spotify_apiurl() -> String {
    with_default("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)
        .trim_end_matches('/')
        .to_string()
}

/// Returns the OAuth token URL (`SPOTIFY_API_TOKEN_URL`).
///
/// Defaults to `https://accounts.spotify.com/api/token`.
pub fn spotify_apitoken_url() -> String {
    with_default("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_API_TOKEN_URL)
}
