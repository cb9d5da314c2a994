//! Shared UI primitives.
//!
//! - the toolkit contract every overlay talks to (`surface`)
//! - a retained, renderer-free implementation of it (`headless`)
//!
//! `systems::ui::settings` composes these into the settings overlay.
pub mod headless;
pub mod settings;
pub mod surface;
