pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use app::session::Session;
pub use crate::core::assembler::generate;
pub use crate::core::policy::TransformPolicy;
pub use crate::core::{engine::BulkEngine, pipeline::BulkPipeline};
pub use domain::document::OutputDocument;
pub use domain::model::{Column, EntityMode, ProfileType, Row};
pub use utils::error::{BulkError, Result};
