//! Terminal dashboard for AdminHub
//!
//! One task owns [`App`] and processes [`Event`]s from a single channel:
//! keys and ticks from the terminal, completions from background actions.

mod app;
mod components;
mod event;
mod pages;
mod ui;

pub use app::{App, Prompt, PromptKind};
pub use event::{Event, EventHandler};
