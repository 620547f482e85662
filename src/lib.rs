//! organ-console: a VR organ viewer with a hand-pressable button console.
//!
//! The scene lives in a `bevy_ecs` world. Each frame [`ConsoleApp::frame`]
//! polls an [`organ_console_input::XrHost`] for poses and runs the systems in
//! [`systems`] in a fixed order.

pub mod app;
pub mod components;
pub mod config;
pub mod headless;
pub mod resources;
pub mod scene;
pub mod systems;

pub use app::ConsoleApp;
pub use config::ConsoleConfig;
