// Module exports for models

pub mod event;
pub mod settings;
pub mod ui;
pub mod view_range;
