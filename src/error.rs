use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors for the gallery pipeline. There is no partial-success mode:
/// every variant aborts the run with a diagnostic and a non-zero exit.
#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("config error: {0}")]
    Config(String),

    #[error("missing image file: {}", .0.display())]
    Asset(PathBuf),

    #[error("cannot decode {}: {source}", path.display())]
    ImageFormat {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
