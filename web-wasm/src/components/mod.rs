pub mod header;
pub mod history_list;
pub mod settings_panel;
pub mod summary_panel;
pub mod upload_area;
