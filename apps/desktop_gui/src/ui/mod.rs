//! UI layer for desktop GUI: app shell, page panels and theme palette.

pub mod app;
pub mod contacts;
pub mod deals;
pub mod theme;

pub use app::DesktopGuiApp;
