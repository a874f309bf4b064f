use eframe::egui;

use crate::model::creature::capitalize;
use crate::ui::app::{UiAction, UiState};

pub fn draw_toolbar(ctx: &egui::Context, state: &mut UiState, actions: &mut Vec<UiAction>) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.add_space(4.0);
        ui.horizontal_wrapped(|ui| {
            ui.heading("Dex");
            ui.separator();

            let search = ui.add(
                egui::TextEdit::singleline(&mut state.filter.search)
                    .hint_text("Search by name or #")
                    .desired_width(200.0),
            );
            if search.changed() {
                actions.push(UiAction::FiltersChanged);
            }

            let selected = state
                .filter
                .category
                .as_deref()
                .map(capitalize)
                .unwrap_or_else(|| "All types".to_string());
            let mut picked = state.filter.category.clone();
            egui::ComboBox::from_id_salt("type_filter")
                .selected_text(selected)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut picked, None, "All types");
                    for c in &state.categories {
                        ui.selectable_value(&mut picked, Some(c.clone()), capitalize(c));
                    }
                });
            if picked != state.filter.category {
                state.filter.category = picked;
                actions.push(UiAction::FiltersChanged);
            }

            if ui
                .add_enabled(state.filter.is_active(), egui::Button::new("Clear"))
                .clicked()
            {
                actions.push(UiAction::ClearFilters);
            }

            ui.separator();

            if ui
                .selectable_label(state.filter.favorites_only, "⭐ Favorites")
                .clicked()
            {
                actions.push(UiAction::ToggleFavoritesOnly);
            }
            if ui.selectable_label(state.shiny, "✨ Shiny").clicked() {
                actions.push(UiAction::ToggleShiny);
            }

            let theme_label = if state.settings.dark { "☀ Light" } else { "🌙 Dark" };
            if ui.button(theme_label).clicked() {
                actions.push(UiAction::ToggleTheme);
            }

            ui.separator();
            ui.label("Scale");
            let scale =
                ui.add(egui::Slider::new(&mut state.settings.ui_scale, 0.75..=2.0).step_by(0.05));
            if scale.drag_stopped() {
                actions.push(UiAction::SaveSettings);
            }
        });

        ui.horizontal(|ui| {
            if state.loading {
                ui.spinner();
                ui.label("Loading…");
            }
            if let Some(status) = &state.status {
                let color = if status.success {
                    ui.visuals().weak_text_color()
                } else {
                    egui::Color32::from_rgb(200, 60, 60)
                };
                ui.label(egui::RichText::new(&status.message).color(color));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!(
                    "{} shown · {} loaded (up to #{}) · {} favorites",
                    state.grid.visible_count(),
                    state.grid.len(),
                    state.loaded_max,
                    state.favorites.len()
                ));
            });
        });
        ui.add_space(4.0);
    });
}
