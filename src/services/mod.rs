// Service module exports

pub mod event;
pub mod layout;
pub mod navigation;
pub mod settings;
pub mod view;
