use std::collections::HashMap;
use std::sync::mpsc;
use std::sync::Arc;

use eframe::egui;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::engine::api_client::HttpCatalog;
use crate::engine::engine::Engine;
use crate::engine::loader::IncrementalLoader;
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::model::creature::Creature;
use crate::model::favorites::Favorites;
use crate::model::filter::Filter;
use crate::model::grid::Grid;
use crate::store::LocalStore;
use crate::ui::art::ArtCache;
use crate::ui::audio::CryPlayer;
use crate::ui::detail::draw_detail;
use crate::ui::grid_panel::draw_grid_panel;
use crate::ui::settings::UiSettings;
use crate::ui::toolbar::draw_toolbar;

/* =========================
   Actions
   ========================= */

/// Everything a panel can ask the app to do.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    LoadMore,
    FiltersChanged,
    ClearFilters,
    ToggleFavoritesOnly,
    ToggleFavorite(u32),
    ToggleShiny,
    ToggleTheme,
    SaveSettings,
    OpenDetail(u32),
    CloseDetail,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    pub message: String,
    pub success: bool,
}

/* =========================
   UI State
   ========================= */

#[derive(Default)]
pub struct UiState {
    pub grid: Grid,
    pub creatures: HashMap<u32, Creature>,
    pub filter: Filter,
    pub favorites: Favorites,
    pub categories: Vec<String>,
    pub settings: UiSettings,

    pub shiny: bool,
    pub loading: bool,
    pub exhausted: bool,
    pub loaded_max: u32,

    pub detail: Option<u32>,
    pub status: Option<StatusLine>,
}

impl UiState {
    pub fn from_store(store: &LocalStore) -> Self {
        Self {
            favorites: Favorites::load(store),
            settings: UiSettings::load(store),
            ..Default::default()
        }
    }

    /// Renders a freshly loaded batch and re-runs the filters over the whole grid.
    pub fn apply_page(&mut self, creatures: Vec<Creature>, loaded_max: u32, exhausted: bool) -> usize {
        let mut rendered = 0;
        for creature in creatures {
            if self.grid.render(&creature) {
                rendered += 1;
            }
            self.creatures.entry(creature.id).or_insert(creature);
        }
        self.loaded_max = loaded_max;
        self.exhausted = exhausted;
        self.loading = false;
        self.reapply_filters();
        rendered
    }

    pub fn reapply_filters(&mut self) -> usize {
        self.grid.apply_filters(&self.filter, &self.favorites)
    }

    /// Returns whether `id` is now a favorite. The set is persisted immediately.
    pub fn toggle_favorite(&mut self, id: u32, store: &mut LocalStore) -> bool {
        let now = self.favorites.toggle(id);
        if let Err(e) = self.favorites.save(store) {
            warn!(error = %e, "could not persist favorites");
            self.status = Some(StatusLine {
                message: "Favorites could not be saved".into(),
                success: false,
            });
        }
        if self.filter.favorites_only {
            self.reapply_filters();
        }
        now
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
        self.reapply_filters();
    }

    pub fn toggle_favorites_only(&mut self) {
        self.filter.favorites_only = !self.filter.favorites_only;
        self.reapply_filters();
    }

    pub fn can_load_more(&self) -> bool {
        !self.loading && !self.exhausted
    }

    /// Opens the modal for `id`. Returns the cry URL worth downloading, if any.
    pub fn open_detail(&mut self, id: u32, can_play: bool) -> Option<String> {
        self.detail = Some(id);
        if !can_play {
            return None;
        }
        self.creatures.get(&id).and_then(|c| c.cry.clone())
    }

    pub fn detail_creature(&self) -> Option<&Creature> {
        self.detail.and_then(|id| self.creatures.get(&id))
    }
}

/* =========================
   App
   ========================= */

pub struct DexApp {
    pub ui: UiState,
    pub art: ArtCache,
    store: LocalStore,
    cry: CryPlayer,
    pending_cry: Option<String>,

    cmd_tx: mpsc::Sender<EngineCommand>,
    resp_rx: mpsc::Receiver<EngineResponse>,
}

impl DexApp {
    pub fn new(ctx: &egui::Context, config: AppConfig) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();

        let source = Arc::new(HttpCatalog::new(config.api_base.clone()));
        let loader = IncrementalLoader::new(config.page_size, config.max_id);
        let waker = ctx.clone();
        std::thread::spawn(move || {
            let mut engine = Engine::new(cmd_rx, resp_tx, source, loader).with_waker(waker);
            engine.run();
        });

        let store = LocalStore::open(&config.data_dir);
        let ui = UiState::from_store(&store);
        info!(favorites = ui.favorites.len(), store = %store.path().display(), "loaded local store");
        ctx.set_visuals(ui.settings.visuals());

        let mut app = Self {
            ui,
            art: ArtCache::default(),
            store,
            cry: CryPlayer::new(),
            pending_cry: None,
            cmd_tx,
            resp_rx,
        };

        app.send_command(EngineCommand::LoadCategories);
        app.request_page();
        app
    }

    pub fn send_command(&self, cmd: EngineCommand) {
        let _ = self.cmd_tx.send(cmd);
    }

    fn request_page(&mut self) {
        if !self.ui.can_load_more() {
            return;
        }
        self.ui.loading = true;
        self.send_command(EngineCommand::LoadNextPage);
    }

    fn drain_responses(&mut self, ctx: &egui::Context) {
        while let Ok(resp) = self.resp_rx.try_recv() {
            match resp {
                EngineResponse::PageLoaded {
                    creatures,
                    loaded_max,
                    exhausted,
                } => {
                    let rendered = self.ui.apply_page(creatures, loaded_max, exhausted);
                    self.ui.status = Some(StatusLine {
                        message: if exhausted {
                            format!("All {loaded_max} loaded")
                        } else {
                            format!("Loaded {rendered} more (up to #{loaded_max})")
                        },
                        success: true,
                    });
                }
                EngineResponse::PageFailed { reason } => {
                    self.ui.loading = false;
                    self.ui.status = Some(StatusLine {
                        message: format!("Load failed: {reason}"),
                        success: false,
                    });
                }
                EngineResponse::Categories(list) => {
                    self.ui.categories = list;
                }
                EngineResponse::Art { url, image } => {
                    self.art.insert(ctx, url, image);
                }
                EngineResponse::Cry { url, bytes } => {
                    if self.pending_cry.as_deref() == Some(url.as_str()) {
                        self.pending_cry = None;
                        self.cry.play(bytes);
                    }
                }
            }
        }
    }

    fn handle(&mut self, ctx: &egui::Context, action: UiAction) {
        match action {
            UiAction::LoadMore => self.request_page(),
            UiAction::FiltersChanged => {
                self.ui.reapply_filters();
            }
            UiAction::ClearFilters => self.ui.clear_filters(),
            UiAction::ToggleFavoritesOnly => self.ui.toggle_favorites_only(),
            UiAction::ToggleFavorite(id) => {
                self.ui.toggle_favorite(id, &mut self.store);
            }
            UiAction::ToggleShiny => self.ui.shiny = !self.ui.shiny,
            UiAction::ToggleTheme => {
                self.ui.settings.toggle_theme();
                self.ui.settings.save(&mut self.store);
                ctx.set_visuals(self.ui.settings.visuals());
            }
            UiAction::SaveSettings => self.ui.settings.save(&mut self.store),
            UiAction::OpenDetail(id) => {
                if let Some(url) = self.ui.open_detail(id, self.cry.is_available()) {
                    self.pending_cry = Some(url.clone());
                    self.send_command(EngineCommand::FetchCry { url });
                }
            }
            UiAction::CloseDetail => {
                self.ui.detail = None;
                self.pending_cry = None;
            }
        }
    }
}

/* =========================
   egui App
   ========================= */

impl eframe::App for DexApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        ctx.set_pixels_per_point(self.ui.settings.ui_scale);
        self.drain_responses(ctx);

        let mut actions = Vec::new();

        draw_toolbar(ctx, &mut self.ui, &mut actions);
        draw_grid_panel(ctx, &self.ui, &mut self.art, &self.cmd_tx, &mut actions);
        draw_detail(ctx, &self.ui, &mut self.art, &self.cmd_tx, &mut actions);

        for action in actions {
            self.handle(ctx, action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::creature::sample;

    fn state() -> (UiState, tempfile::TempDir, LocalStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path());
        (UiState::from_store(&store), dir, store)
    }

    #[test]
    fn page_renders_each_id_once() {
        let (mut ui, _dir, _store) = state();
        ui.loading = true;

        let rendered = ui.apply_page(
            vec![sample(1, "bulbasaur", &["grass"]), sample(2, "ivysaur", &["grass"])],
            2,
            false,
        );
        assert_eq!(rendered, 2);
        assert!(!ui.loading);

        let rendered = ui.apply_page(vec![sample(2, "ivysaur", &["grass"])], 2, false);
        assert_eq!(rendered, 0);
        assert_eq!(ui.grid.len(), 2);
    }

    #[test]
    fn new_page_respects_active_filters() {
        let (mut ui, _dir, _store) = state();
        ui.filter.search = "char".into();
        ui.apply_page(
            vec![sample(4, "charmander", &["fire"]), sample(7, "squirtle", &["water"])],
            7,
            false,
        );
        assert_eq!(ui.grid.visible_count(), 1);
    }

    #[test]
    fn favorite_toggle_persists_and_refilters() {
        let (mut ui, dir, mut store) = state();
        ui.apply_page(vec![sample(1, "bulbasaur", &["grass"])], 1, false);
        ui.toggle_favorites_only();
        assert_eq!(ui.grid.visible_count(), 0);

        assert!(ui.toggle_favorite(1, &mut store));
        assert_eq!(ui.grid.visible_count(), 1);
        assert!(Favorites::load(&LocalStore::open(dir.path())).contains(1));

        assert!(!ui.toggle_favorite(1, &mut store));
        assert_eq!(ui.grid.visible_count(), 0);
        assert!(!Favorites::load(&LocalStore::open(dir.path())).contains(1));
    }

    #[test]
    fn clear_resets_and_shows_everything() {
        let (mut ui, _dir, _store) = state();
        ui.apply_page(
            vec![sample(1, "bulbasaur", &["grass"]), sample(4, "charmander", &["fire"])],
            4,
            false,
        );
        ui.filter.category = Some("fire".into());
        ui.filter.favorites_only = true;
        ui.reapply_filters();
        assert_eq!(ui.grid.visible_count(), 0);

        ui.clear_filters();
        assert_eq!(ui.filter, Filter::default());
        assert_eq!(ui.grid.visible_count(), 2);
    }

    #[test]
    fn no_loading_past_the_ceiling() {
        let (mut ui, _dir, _store) = state();
        assert!(ui.can_load_more());
        ui.loading = true;
        assert!(!ui.can_load_more());
        ui.apply_page(Vec::new(), 1010, true);
        assert!(!ui.can_load_more());
    }

    #[test]
    fn favorites_are_restored_from_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LocalStore::open(dir.path());
        store.set("favs", &vec![25u32, 133]).unwrap();

        let ui = UiState::from_store(&LocalStore::open(dir.path()));
        assert!(ui.favorites.contains(25));
        assert!(ui.favorites.contains(133));
        assert_eq!(ui.favorites.len(), 2);
    }

    #[test]
    fn cry_is_only_fetched_when_it_can_play() {
        let (mut ui, _dir, _store) = state();
        let mut pika = sample(25, "pikachu", &["electric"]);
        pika.cry = Some("https://snd.test/25.ogg".into());
        ui.apply_page(vec![pika, sample(26, "raichu", &["electric"])], 26, false);

        assert_eq!(ui.open_detail(25, false), None);
        assert_eq!(ui.detail, Some(25));

        assert_eq!(ui.open_detail(25, true).as_deref(), Some("https://snd.test/25.ogg"));
        assert_eq!(ui.open_detail(26, true), None);
        assert_eq!(ui.detail, Some(26));
    }

    #[cfg(not(feature = "audio"))]
    #[test]
    fn silent_build_never_plays() {
        assert!(!CryPlayer::new().is_available());
    }
}
