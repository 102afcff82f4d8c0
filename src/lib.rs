pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{prompt::Prompter, stations::StationTable, taup_client::TaupWebClient};
pub use config::Settings;
pub use core::{
    geodesy::Wgs84Geodesic,
    phaselist::PhaseListEngine,
    resolver::{resolve_arguments, Resolution},
};
pub use utils::error::{PhaseListError, Result};
