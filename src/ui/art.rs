use std::collections::HashMap;
use std::sync::mpsc::Sender;

use eframe::egui;

use crate::engine::protocol::{ArtImage, EngineCommand};

enum ArtSlot {
    Pending,
    Ready(egui::TextureHandle),
    Missing,
}

/// Textures keyed by image URL. Each URL is requested at most once per session.
#[derive(Default)]
pub struct ArtCache {
    slots: HashMap<String, ArtSlot>,
}

impl ArtCache {
    /// Returns the texture if it is ready, asking the engine for it on first sight.
    pub fn get_or_request(
        &mut self,
        url: &str,
        cmd_tx: &Sender<EngineCommand>,
    ) -> Option<&egui::TextureHandle> {
        if !self.slots.contains_key(url) {
            self.slots.insert(url.to_string(), ArtSlot::Pending);
            let _ = cmd_tx.send(EngineCommand::FetchArt {
                url: url.to_string(),
            });
        }

        match self.slots.get(url) {
            Some(ArtSlot::Ready(tex)) => Some(tex),
            _ => None,
        }
    }

    pub fn is_missing(&self, url: &str) -> bool {
        matches!(self.slots.get(url), Some(ArtSlot::Missing))
    }

    pub fn insert(&mut self, ctx: &egui::Context, url: String, image: Option<ArtImage>) {
        let slot = match image {
            Some(art) => {
                let color = egui::ColorImage::from_rgba_unmultiplied(art.size, &art.rgba);
                ArtSlot::Ready(ctx.load_texture(&url, color, egui::TextureOptions::LINEAR))
            }
            None => ArtSlot::Missing,
        };
        self.slots.insert(url, slot);
    }
}
