use reqwest::blocking::Client;
use tracing::debug;

use crate::engine::error::{CatalogError, CatalogResult};
use crate::model::creature::wire::{CreaturePayload, ResourceList};
use crate::model::creature::Creature;

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";

/// Everything the engine needs from the remote catalog.
pub trait CatalogSource: Send + Sync {
    fn fetch_creature(&self, id: u32) -> CatalogResult<Creature>;

    fn fetch_categories(&self) -> CatalogResult<Vec<String>>;

    /// Raw bytes behind an art or cry URL.
    fn fetch_bytes(&self, url: &str) -> CatalogResult<Vec<u8>>;
}

pub struct HttpCatalog {
    client: Client,
    base: String,
}

impl HttpCatalog {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base,
        }
    }

    fn get(&self, url: &str, what: impl FnOnce() -> String) -> CatalogResult<reqwest::blocking::Response> {
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                what: what(),
                status: status.as_u16(),
            });
        }
        Ok(resp)
    }
}

impl CatalogSource for HttpCatalog {
    fn fetch_creature(&self, id: u32) -> CatalogResult<Creature> {
        let url = format!("{}/pokemon/{}", self.base, id);
        debug!(%url, "fetching creature");

        let payload = self
            .get(&url, || format!("creature {id}"))?
            .json::<CreaturePayload>()?;
        Ok(payload.into())
    }

    fn fetch_categories(&self) -> CatalogResult<Vec<String>> {
        let url = format!("{}/type?limit=100", self.base);
        debug!(%url, "fetching categories");

        let list = self
            .get(&url, || "category list".to_string())?
            .json::<ResourceList>()?;
        Ok(list.results.into_iter().map(|r| r.name).collect())
    }

    fn fetch_bytes(&self, url: &str) -> CatalogResult<Vec<u8>> {
        let bytes = self.get(url, || url.to_string())?.bytes()?;
        Ok(bytes.to_vec())
    }
}
