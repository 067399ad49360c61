//! # AdminHub
//!
//! Admin dashboard for managing clients, reports, billing and team settings.
//!
//! All data lives in memory and every write goes through a [`actions::Backend`];
//! the shipped backend simulates a remote service with a fixed delay.
//!
//! ## Architecture
//!
//! - **Roster**: client records with search, status filter, sort and id assignment
//! - **Export**: CSV serialization of any record list
//! - **Actions**: async backend trait, simulated backend, in-flight tracking
//! - **Shell**: routes, sidebar, account menu and theme
//! - **TUI**: terminal dashboard over all of the above
//!
//! ## Quick Start
//!
//! ```bash
//! # Open the dashboard
//! adminhub dashboard
//!
//! # Script against the same data
//! adminhub clients list --status Active --sort joinDate --desc
//! adminhub clients export --output ./exports
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod actions;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod notify;
pub mod reports;
pub mod roster;
pub mod settings;
pub mod shell;
#[cfg(feature = "tui")]
pub mod tui;

pub use config::Config;
pub use error::{Error, Result};

/// Re-exports for convenience
pub mod prelude {
    pub use crate::actions::{Action, ActionRunner, Backend, SimulatedBackend};
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::export::{ExportFormat, Exporter};
    pub use crate::models::*;
    pub use crate::roster::{Roster, RosterQuery, SortDirection, SortField, StatusFilter};
    pub use crate::shell::{Route, Shell, Theme};
}
