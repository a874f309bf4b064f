use tracing::warn;

use crate::store::LocalStore;

const THEME_KEY: &str = "theme";
const SCALE_KEY: &str = "ui_scale";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiSettings {
    pub dark: bool,
    pub ui_scale: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            dark: false,
            ui_scale: 1.0,
        }
    }
}

impl UiSettings {
    pub fn load(store: &LocalStore) -> Self {
        let defaults = Self::default();
        let dark = store
            .get::<String>(THEME_KEY)
            .map(|t| t == "dark")
            .unwrap_or(defaults.dark);
        let ui_scale = store
            .get::<f32>(SCALE_KEY)
            .filter(|s| (0.75..=2.0).contains(s))
            .unwrap_or(defaults.ui_scale);

        Self { dark, ui_scale }
    }

    pub fn save(&self, store: &mut LocalStore) {
        let theme = if self.dark { "dark" } else { "light" };
        if let Err(e) = store
            .set(THEME_KEY, &theme)
            .and_then(|_| store.set(SCALE_KEY, &self.ui_scale))
        {
            warn!(error = %e, "could not save ui settings");
        }
    }

    pub fn toggle_theme(&mut self) {
        self.dark = !self.dark;
    }

    pub fn visuals(&self) -> egui::Visuals {
        if self.dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        }
    }
}
