use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// Transport failures and undecodable bodies
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered, but not with a 2xx
    #[error("failed to fetch {what}: HTTP {status}")]
    Status { what: String, status: u16 },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("worker for creature {0} panicked")]
    WorkerPanicked(u32),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
