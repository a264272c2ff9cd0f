use std::path::PathBuf;

use reqwest::Client;

use crate::{
    error::MosaicError,
    info,
    mosaic::{self, HttpArtworkSource, MosaicOptions, MosaicOutput},
    spotify::{Session, SpotifyCatalog},
    success,
};

/// Everything the `playlist-mosaic` command needs for one run.
#[derive(Clone)]
pub struct GenerateRequest {
    pub playlist: String,
    /// `(client_id, client_secret)`; read from the environment when absent.
    pub credentials: Option<(String, String)>,
    pub options: MosaicOptions,
}

/// Builds the mosaic for one playlist and reports where it went.
///
/// A fresh [`Session`] is created for the run and dropped with it.
pub async fn generate(request: GenerateRequest) -> Result<PathBuf, MosaicError> {
    let session = match request.credentials {
        Some((id, secret)) => Session::new(id, secret),
        None => Session::from_config()?,
    };
    let catalog = SpotifyCatalog::new(&session);

    info!("Generating mosaic for {}.", request.playlist);
    let report = mosaic::generate(
        &catalog,
        HttpArtworkSource::new(Client::new()),
        &request.playlist,
        &request.options,
    )
    .await?;

    match report.output {
        MosaicOutput::Written(path) => {
            success!(
                "{n}x{n} mosaic from {} of {} albums written to {}",
                report.artworks.len(),
                report.albums,
                path.display(),
                n = report.grid.tile_count
            );
            Ok(path)
        }
        MosaicOutput::InMemory(_) => Err(MosaicError::Config(
            "no output path given".to_string(),
        )),
    }
}
