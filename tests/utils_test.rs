use playlist_mosaic::{MosaicError, config};
use playlist_mosaic::types::{Grid, ResolutionTier};
use playlist_mosaic::utils::*;

#[test]
fn test_parse_playlist_uri_forms() {
    let id = "37i9dQZF1DXcBWIGoYBM5M";
    let forms = [
        format!("spotify:playlist:{id}"),
        format!("spotify:user:spotify:playlist:{id}"),
        format!("https://open.spotify.com/playlist/{id}"),
        format!("https://open.spotify.com/playlist/{id}?si=abc123"),
        format!("https://open.spotify.com/playlist/{id}/"),
        format!("https://open.spotify.com/user/someone/playlist/{id}"),
        format!("https://open.spotify.com/intl-de/playlist/{id}"),
        format!("  {id}  "),
    ];

    for form in forms {
        let parsed = parse_playlist_ref(&form).unwrap_or_else(|e| panic!("{form}: {e}"));
        assert_eq!(parsed.id, id, "{form}");
    }
}

#[test]
fn test_parse_playlist_rejects_malformed_references() {
    let bad = [
        "",
        "spotify:album:37i9dQZF1DXcBWIGoYBM5M",
        "spotify:playlist:",
        "spotify:user::playlist:abc",
        "https://open.spotify.com/album/37i9dQZF1DXcBWIGoYBM5M",
        "https://example.com/playlist/37i9dQZF1DXcBWIGoYBM5M",
        "not a playlist",
        "abc-def",
    ];

    for input in bad {
        let err = parse_playlist_ref(input).unwrap_err();
        assert!(
            matches!(err, MosaicError::InvalidReference(_)),
            "{input:?} gave {err:?}"
        );
    }
}

#[test]
fn test_playlist_ref_display() {
    let parsed = parse_playlist_ref("https://open.spotify.com/playlist/abc123").unwrap();
    assert_eq!(parsed.to_string(), "spotify:playlist:abc123");
}

#[test]
fn test_basic_auth_header() {
    // base64("id:secret")
    assert_eq!(basic_auth_header("id", "secret"), "Basic aWQ6c2VjcmV0");
}

#[test]
fn test_parse_resolution() {
    assert_eq!(parse_resolution("640").unwrap(), ResolutionTier::High);
    assert_eq!(parse_resolution("300").unwrap(), ResolutionTier::Medium);
    assert_eq!(parse_resolution("64").unwrap(), ResolutionTier::Low);

    assert!(parse_resolution("128").unwrap_err().contains("640"));
    assert!(parse_resolution("big").is_err());
}

#[test]
fn test_parse_blur() {
    assert_eq!(parse_blur("0").unwrap(), 0.0);
    assert_eq!(parse_blur("1.5").unwrap(), 1.5);
    assert_eq!(parse_blur("4.0").unwrap(), 4.0);

    for bad in ["nan", "inf", "-inf", "1e9", "-1", "4.5", "soft"] {
        assert!(parse_blur(bad).is_err(), "{bad}");
    }
}

#[test]
fn test_parse_credentials() {
    assert_eq!(
        parse_credentials("client:secret").unwrap(),
        ("client".to_string(), "secret".to_string())
    );
    assert!(parse_credentials("client").is_err());
    assert!(parse_credentials(":secret").is_err());
    assert!(parse_credentials("client:").is_err());
}

#[test]
fn test_resolution_tier_mapping() {
    let mapping: Vec<(usize, u32)> = ResolutionTier::ALL
        .iter()
        .map(|t| (t.index(), t.pixels()))
        .collect();
    assert_eq!(mapping, vec![(0, 640), (1, 300), (2, 64)]);
    assert_eq!(ResolutionTier::default(), ResolutionTier::High);
    assert_eq!(ResolutionTier::from_pixels(300), Some(ResolutionTier::Medium));
    assert_eq!(ResolutionTier::from_pixels(301), None);
}

#[test]
fn test_grid_geometry() {
    let grid = Grid::new(3, 640);
    assert_eq!(grid.side_px(), 1920);
    assert_eq!(grid.cells(), 9);
}

#[tokio::test]
async fn test_load_env_creates_data_dir() {
    config::load_env().await.unwrap();
    let dir = dirs::data_local_dir().unwrap().join("playlist-mosaic");
    assert!(dir.is_dir());
}
