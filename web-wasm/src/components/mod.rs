pub mod export_buttons;
pub mod header;
pub mod history_panel;
pub mod progress_bar;
pub mod report_view;
pub mod settings_panel;
pub mod upload_area;
