pub mod app;
pub mod browser;
pub mod config;
pub mod document;
pub mod github;
pub mod home;
pub mod i18n;
pub mod preview;
pub mod settings;
pub mod theme;
pub mod ui;
