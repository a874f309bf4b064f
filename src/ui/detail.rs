use std::sync::mpsc::Sender;

use eframe::egui;

use crate::engine::protocol::EngineCommand;
use crate::model::creature::{capitalize, stat_percent, Creature};
use crate::ui::app::{UiAction, UiState};
use crate::ui::art::ArtCache;
use crate::ui::grid_panel::art_image;

pub fn draw_detail(
    ctx: &egui::Context,
    state: &UiState,
    art: &mut ArtCache,
    cmd_tx: &Sender<EngineCommand>,
    actions: &mut Vec<UiAction>,
) {
    let Some(creature) = state.detail_creature() else {
        return;
    };

    let modal = egui::Modal::new(egui::Id::new("detail_modal")).show(ctx, |ui| {
        ui.set_width(380.0);

        let mut close = false;
        ui.horizontal(|ui| {
            ui.heading(creature.title());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                close = ui.button("✖").on_hover_text("Close").clicked();
            });
        });
        ui.separator();

        ui.vertical_centered(|ui| {
            art_image(ui, creature, state.shiny, art, cmd_tx, 220.0);
        });

        ui.add_space(8.0);
        draw_facts(ui, creature);
        ui.add_space(8.0);

        ui.label(egui::RichText::new("Base stats").strong());
        for stat in &creature.stats {
            stat_bar(ui, &capitalize(&stat.name), stat.value);
        }

        close
    });

    if modal.inner || modal.should_close() {
        actions.push(UiAction::CloseDetail);
    }
}

fn draw_facts(ui: &mut egui::Ui, creature: &Creature) {
    egui::Grid::new("detail_facts")
        .num_columns(2)
        .spacing([16.0, 4.0])
        .show(ui, |ui| {
            ui.label(egui::RichText::new("Types").weak());
            ui.label(
                creature
                    .types
                    .iter()
                    .map(|t| capitalize(t))
                    .collect::<Vec<_>>()
                    .join(", "),
            );
            ui.end_row();

            ui.label(egui::RichText::new("Height").weak());
            ui.label(creature.height_label());
            ui.end_row();

            ui.label(egui::RichText::new("Weight").weak());
            ui.label(creature.weight_label());
            ui.end_row();

            ui.label(egui::RichText::new("Abilities").weak());
            ui.label(creature.abilities_label());
            ui.end_row();
        });
}

fn stat_bar(ui: &mut egui::Ui, label: &str, value: u32) {
    ui.horizontal(|ui| {
        ui.add_sized([110.0, 16.0], egui::Label::new(label));
        ui.add(
            egui::ProgressBar::new(stat_percent(value) as f32 / 100.0)
                .desired_width(200.0)
                .text(value.to_string()),
        );
    });
}
