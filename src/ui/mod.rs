pub mod app;
pub mod art;
pub mod audio;
pub mod detail;
pub mod grid_panel;
pub mod settings;
pub mod toolbar;
