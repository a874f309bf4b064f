use crate::model::creature::Creature;

pub enum EngineCommand {
    LoadNextPage,
    LoadCategories,
    FetchArt { url: String },
    FetchCry { url: String },
}

/// Decoded RGBA pixels, ready to become a texture.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtImage {
    pub size: [usize; 2],
    pub rgba: Vec<u8>,
}

pub enum EngineResponse {
    PageLoaded {
        creatures: Vec<Creature>,
        loaded_max: u32,
        exhausted: bool,
    },

    PageFailed {
        reason: String,
    },

    Categories(Vec<String>),

    /// `image` is None when the download or decode failed.
    Art {
        url: String,
        image: Option<ArtImage>,
    },

    Cry {
        url: String,
        bytes: Vec<u8>,
    },
}
