use std::sync::mpsc::Sender;

use eframe::egui;

use crate::engine::protocol::EngineCommand;
use crate::model::category::background_rgb;
use crate::model::creature::{capitalize, pad_id, Creature};
use crate::ui::app::{UiAction, UiState};
use crate::ui::art::ArtCache;

const CARD_WIDTH: f32 = 170.0;
const ART_SIZE: f32 = 110.0;

pub fn draw_grid_panel(
    ctx: &egui::Context,
    state: &UiState,
    art: &mut ArtCache,
    cmd_tx: &Sender<EngineCommand>,
    actions: &mut Vec<UiAction>,
) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing = egui::vec2(12.0, 12.0);
                    for card in state.grid.visible_cards() {
                        if let Some(creature) = state.creatures.get(&card.id) {
                            draw_card(ui, creature, state, art, cmd_tx, actions);
                        }
                    }
                });

                if state.grid.is_empty_view() && !state.loading {
                    ui.add_space(40.0);
                    ui.vertical_centered(|ui| {
                        ui.label(
                            egui::RichText::new("No creatures match the current filters.")
                                .italics(),
                        );
                    });
                }

                ui.add_space(16.0);
                ui.vertical_centered(|ui| {
                    if state.exhausted {
                        ui.label(egui::RichText::new("End of the catalog").weak());
                    } else if state.loading {
                        ui.spinner();
                    } else if ui.button("Load more").clicked() {
                        actions.push(UiAction::LoadMore);
                    }
                });
                ui.add_space(16.0);
            });
    });
}

fn draw_card(
    ui: &mut egui::Ui,
    creature: &Creature,
    state: &UiState,
    art: &mut ArtCache,
    cmd_tx: &Sender<EngineCommand>,
    actions: &mut Vec<UiAction>,
) {
    let bg = card_color(creature, state.settings.dark);

    // The sensing scope sits beneath its children, so the star keeps its own clicks.
    let card = ui.scope_builder(
        egui::UiBuilder::new()
            .id_salt(("card", creature.id))
            .sense(egui::Sense::click()),
        |ui| {
            egui::Frame::new()
                .fill(bg)
                .corner_radius(14.0)
                .inner_margin(egui::Margin::same(10))
                .show(ui, |ui| draw_card_body(ui, creature, state, art, cmd_tx))
                .inner
        },
    );
    let (star_clicked, body_clicked) = card.inner;
    let card_clicked = card.response.on_hover_cursor(egui::CursorIcon::PointingHand).clicked();

    if let Some(action) = card_action(creature.id, star_clicked, card_clicked || body_clicked) {
        actions.push(action);
    }
}

/// Returns (star clicked, art or name clicked).
fn draw_card_body(
    ui: &mut egui::Ui,
    creature: &Creature,
    state: &UiState,
    art: &mut ArtCache,
    cmd_tx: &Sender<EngineCommand>,
) -> (bool, bool) {
    ui.set_width(CARD_WIDTH);
    ui.visuals_mut().override_text_color = Some(if state.settings.dark {
        egui::Color32::from_gray(230)
    } else {
        egui::Color32::from_gray(30)
    });

    let star_clicked = ui
        .horizontal(|ui| {
            ui.add(
                egui::Label::new(egui::RichText::new(format!("#{}", pad_id(creature.id))).small())
                    .selectable(false),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let star = egui::Button::new(state.favorites.glyph(creature.id)).frame(false);
                ui.add(star).on_hover_text("Favorite").clicked()
            })
            .inner
        })
        .inner;

    let art_clicked = ui
        .vertical_centered(|ui| art_image(ui, creature, state.shiny, art, cmd_tx, ART_SIZE))
        .inner;

    let name = ui.add(
        egui::Label::new(egui::RichText::new(capitalize(&creature.name)).strong().size(16.0))
            .selectable(false)
            .sense(egui::Sense::click()),
    );
    ui.add(
        egui::Label::new(
            egui::RichText::new(format!("Type: {}", creature.types.join(", "))).small(),
        )
        .selectable(false),
    );

    (star_clicked, art_clicked || name.clicked())
}

/// The star only toggles the favorite; a click anywhere else opens the detail.
fn card_action(id: u32, star_clicked: bool, card_clicked: bool) -> Option<UiAction> {
    if star_clicked {
        Some(UiAction::ToggleFavorite(id))
    } else if card_clicked {
        Some(UiAction::OpenDetail(id))
    } else {
        None
    }
}

/// Draws the current art (or a placeholder) and reports whether it was clicked.
pub fn art_image(
    ui: &mut egui::Ui,
    creature: &Creature,
    shiny: bool,
    art: &mut ArtCache,
    cmd_tx: &Sender<EngineCommand>,
    size: f32,
) -> bool {
    let side = egui::vec2(size, size);
    let Some(url) = creature.art_url(shiny) else {
        return placeholder(ui, side, "?");
    };

    if let Some(tex) = art.get_or_request(url, cmd_tx) {
        return ui
            .add(
                egui::Image::new(tex)
                    .fit_to_exact_size(side)
                    .sense(egui::Sense::click()),
            )
            .clicked();
    }
    if art.is_missing(url) {
        return placeholder(ui, side, "?");
    }

    let (rect, resp) = ui.allocate_exact_size(side, egui::Sense::click());
    egui::Spinner::new().paint_at(ui, rect.shrink(size / 3.0));
    resp.clicked()
}

fn placeholder(ui: &mut egui::Ui, side: egui::Vec2, text: &str) -> bool {
    let (rect, resp) = ui.allocate_exact_size(side, egui::Sense::click());
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        text,
        egui::FontId::proportional(side.y / 3.0),
        ui.visuals().weak_text_color(),
    );
    resp.clicked()
}

fn card_color(creature: &Creature, dark: bool) -> egui::Color32 {
    let [r, g, b] = background_rgb(creature.primary_type().unwrap_or_default());
    if dark {
        // same hue, dimmed
        egui::Color32::from_rgb(r / 4, g / 4, b / 4)
    } else {
        egui::Color32::from_rgb(r, g, b)
    }
}
