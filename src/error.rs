use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("unable to find id '{0}'")]
    MissingElement(String),

    #[error("element '{id}' is not an {expected} element")]
    WrongElementKind { id: String, expected: &'static str },

    #[error("failed to fetch listing: {0}")]
    Fetch(String),

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("listing contains no links")]
    NoAnchors,

    #[error("no media found in listing")]
    EmptyGallery,

    #[error("unexpected media: '{0}'")]
    UnrecognizedMedia(String),

    #[error("dom error: {0}")]
    Dom(String),

    #[error("invalid index bounds [{min}, {max}]")]
    InvalidBounds { min: usize, max: usize },

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, GalleryError>;
