use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::engine::api_client::CatalogSource;
use crate::engine::error::CatalogResult;
use crate::engine::loader::IncrementalLoader;
use crate::engine::protocol::{ArtImage, EngineCommand, EngineResponse};
use crate::model::category::STANDARD_CATEGORIES;

pub struct Engine<S: CatalogSource + 'static> {
    rx: Receiver<EngineCommand>,
    tx: Sender<EngineResponse>,
    source: Arc<S>,
    loader: Arc<Mutex<IncrementalLoader>>,
    waker: Option<egui::Context>,
}

impl<S: CatalogSource + 'static> Engine<S> {
    pub fn new(
        rx: Receiver<EngineCommand>,
        tx: Sender<EngineResponse>,
        source: Arc<S>,
        loader: IncrementalLoader,
    ) -> Self {
        Self {
            rx,
            tx,
            source,
            loader: Arc::new(Mutex::new(loader)),
            waker: None,
        }
    }

    /// Repaint `ctx` whenever a response is sent.
    pub fn with_waker(mut self, ctx: egui::Context) -> Self {
        self.waker = Some(ctx);
        self
    }

    pub fn run(&mut self) {
        while let Ok(cmd) = self.rx.recv() {
            match cmd {
                // Runs off the loop so art and cry requests are not stuck behind a batch.
                EngineCommand::LoadNextPage => {
                    let source = Arc::clone(&self.source);
                    let loader = Arc::clone(&self.loader);
                    let tx = self.tx.clone();
                    let waker = self.waker.clone();
                    thread::spawn(move || {
                        let mut loader = loader.lock();
                        let resp = match loader.load_next_page(source.as_ref()) {
                            Ok(page) => EngineResponse::PageLoaded {
                                creatures: page.creatures,
                                loaded_max: page.loaded_max,
                                exhausted: page.exhausted,
                            },
                            Err(e) => {
                                warn!(loaded_max = loader.loaded_max(), error = %e, "page failed");
                                EngineResponse::PageFailed {
                                    reason: e.to_string(),
                                }
                            }
                        };
                        drop(loader);
                        let _ = tx.send(resp);
                        wake(waker.as_ref());
                    });
                }

                EngineCommand::LoadCategories => {
                    let categories = match self.source.fetch_categories() {
                        Ok(list) if !list.is_empty() => list,
                        Ok(_) => standard_categories(),
                        Err(e) => {
                            warn!(error = %e, "category listing failed, using built-in list");
                            standard_categories()
                        }
                    };
                    self.send(EngineResponse::Categories(categories));
                }

                EngineCommand::FetchArt { url } => {
                    let source = Arc::clone(&self.source);
                    let tx = self.tx.clone();
                    let waker = self.waker.clone();
                    thread::spawn(move || {
                        let image = match fetch_art(source.as_ref(), &url) {
                            Ok(image) => Some(image),
                            Err(e) => {
                                warn!(%url, error = %e, "art unavailable");
                                None
                            }
                        };
                        let _ = tx.send(EngineResponse::Art { url, image });
                        wake(waker.as_ref());
                    });
                }

                EngineCommand::FetchCry { url } => {
                    let source = Arc::clone(&self.source);
                    let tx = self.tx.clone();
                    let waker = self.waker.clone();
                    thread::spawn(move || match source.fetch_bytes(&url) {
                        Ok(bytes) => {
                            let _ = tx.send(EngineResponse::Cry { url, bytes });
                            wake(waker.as_ref());
                        }
                        Err(e) => debug!(%url, error = %e, "cry unavailable"),
                    });
                }
            }
        }

        info!("engine channel closed, stopping");
    }

    fn send(&self, resp: EngineResponse) {
        let _ = self.tx.send(resp);
        wake(self.waker.as_ref());
    }
}

fn wake(waker: Option<&egui::Context>) {
    if let Some(ctx) = waker {
        ctx.request_repaint();
    }
}

fn standard_categories() -> Vec<String> {
    STANDARD_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

fn fetch_art<S: CatalogSource + ?Sized>(source: &S, url: &str) -> CatalogResult<ArtImage> {
    let bytes = source.fetch_bytes(url)?;
    decode_art(&bytes)
}

pub fn decode_art(bytes: &[u8]) -> CatalogResult<ArtImage> {
    let img = image::load_from_memory(bytes)?.to_rgba8();
    let (w, h) = img.dimensions();
    Ok(ArtImage {
        size: [w as usize, h as usize],
        rgba: img.into_raw(),
    })
}
