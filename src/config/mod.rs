pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
mod args {
    use crate::core::policy::TransformPolicy;
    use crate::core::ConfigProvider;
    use crate::domain::model::{EntityMode, ProfileType};
    use crate::utils::error::Result;
    use crate::utils::validation::{
        validate_file_extensions, validate_path, validate_required_field, Validate,
    };
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "ari-bulk")]
    #[command(about = "Convert bulk-entry CSV rows into the individuals JSON document")]
    pub struct CliConfig {
        /// CSV file with one row per individual
        #[arg(long)]
        pub input: Option<String>,

        #[arg(long, default_value = "./output")]
        pub output_path: String,

        #[arg(long, value_enum, default_value_t = EntityMode::Create)]
        pub mode: EntityMode,

        #[arg(long, value_enum, default_value_t = ProfileType::Rel)]
        pub profile: ProfileType,

        /// TOML file with [policy] and [session] settings
        #[arg(long)]
        pub config: Option<String>,

        /// Write the header-only CSV template for --profile and exit
        #[arg(long)]
        pub template: bool,

        /// Also print the generated JSON to stdout
        #[arg(long)]
        pub stdout: bool,

        /// Print the validation report
        #[arg(long)]
        pub report: bool,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(skip)]
        #[serde(default)]
        pub policy: TransformPolicy,
    }

    impl ConfigProvider for CliConfig {
        fn input_file(&self) -> &str {
            self.input.as_deref().unwrap_or_default()
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn entity_mode(&self) -> EntityMode {
            self.mode
        }

        fn profile_type(&self) -> ProfileType {
            self.profile
        }

        fn policy(&self) -> &TransformPolicy {
            &self.policy
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_path("output_path", &self.output_path)?;

            if !self.template {
                let input = validate_required_field("input", &self.input)?;
                validate_path("input", input)?;
                validate_file_extensions("input", std::slice::from_ref(input), &["csv"])?;
            }

            if let Some(config) = &self.config {
                validate_file_extensions("config", std::slice::from_ref(config), &["toml"])?;
            }

            Ok(())
        }
    }

}

#[cfg(feature = "cli")]
pub use args::CliConfig;
