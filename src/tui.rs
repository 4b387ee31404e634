//! Terminal front end: settings menu, table scene and overlays.

pub mod app;
pub mod controller;
pub mod logger;
pub mod ui;
