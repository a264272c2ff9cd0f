use base64::{Engine, engine::general_purpose::STANDARD};

use crate::{
    error::MosaicError,
    mosaic::composer,
    types::{PlaylistRef, ResolutionTier},
};

/// Parses any of the playlist reference forms users copy out of Spotify.
///
/// Accepted:
/// - `spotify:playlist:<id>`
/// - `spotify:user:<user>:playlist:<id>`
/// - `https://open.spotify.com/playlist/<id>` (query string and trailing slash allowed)
/// - `https://open.spotify.com/user/<user>/playlist/<id>`
/// - a bare `<id>`
pub fn parse_playlist_ref(input: &str) -> Result<PlaylistRef, MosaicError> {
    let input = input.trim();
    let invalid = || MosaicError::InvalidReference(input.to_string());

    let id = if let Some(rest) = input.strip_prefix("spotify:") {
        let parts: Vec<&str> = rest.split(':').collect();
        match parts.as_slice() {
            ["playlist", id] => *id,
            ["user", user, "playlist", id] if !user.is_empty() => *id,
            _ => return Err(invalid()),
        }
    } else if let Some(rest) = strip_web_prefix(input) {
        let path = rest.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["playlist", id] => *id,
            ["user", _, "playlist", id] => *id,
            // localized links, e.g. /intl-de/playlist/<id>
            [locale, "playlist", id] if locale.starts_with("intl-") => *id,
            _ => return Err(invalid()),
        }
    } else {
        input
    };

    if is_valid_id(id) {
        Ok(PlaylistRef { id: id.to_string() })
    } else {
        Err(invalid())
    }
}

fn strip_web_prefix(input: &str) -> Option<&str> {
    ["https://open.spotify.com", "http://open.spotify.com"]
        .iter()
        .find_map(|prefix| input.strip_prefix(prefix))
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Builds the `Authorization: Basic ...` value for the client-credentials grant.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{client_id}:{client_secret}"))
    )
}

/// Clap value parser for `--resolution`: only the catalog's fixed sizes are valid.
pub fn parse_resolution(s: &str) -> Result<ResolutionTier, String> {
    let pixels: u32 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a number"))?;

    ResolutionTier::from_pixels(pixels).ok_or_else(|| {
        let valid = ResolutionTier::ALL
            .iter()
            .map(|t| t.pixels().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("unsupported resolution {pixels}, expected one of: {valid}")
    })
}

/// Clap value parser for `--blur`: a finite number in `0.0..=4.0`.
pub fn parse_blur(s: &str) -> Result<f32, String> {
    let coefficient: f32 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a number"))?;
    composer::check_blur(coefficient)
        .map_err(|_| format!("expected a number from 0 to {}", composer::MAX_BLUR))
}

/// Clap value parser for `--creds ID:SECRET`.
pub fn parse_credentials(s: &str) -> Result<(String, String), String> {
    match s.split_once(':') {
        Some((id, secret)) if !id.is_empty() && !secret.is_empty() => {
            Ok((id.to_string(), secret.to_string()))
        }
        _ => Err("expected CLIENT_ID:CLIENT_SECRET".to_string()),
    }
}
