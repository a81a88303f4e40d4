pub mod app;
pub mod component_context;
pub mod components;
pub mod config;
pub mod constants;
pub mod drivers;
pub mod error;
pub mod event;
pub mod event_loop;
pub mod keybindings;
pub mod receipts;
pub mod record;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod viewer;
pub mod window;
