pub mod assembler;
pub mod builders;
pub mod classifier;
pub mod dates;
pub mod engine;
pub mod names;
pub mod parsers;
pub mod pipeline;
pub mod policy;

pub use crate::domain::model::{GenerationResult, Row};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
