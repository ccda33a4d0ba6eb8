use ari_bulk::adapters::tabular;
use ari_bulk::core::Storage;
use ari_bulk::utils::error::ErrorSeverity;
use ari_bulk::utils::{logger, validation::Validate};
use ari_bulk::{BulkEngine, BulkError, BulkPipeline, CliConfig, LocalStorage, TomlConfig};
use clap::Parser;
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting ari-bulk CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    if let Some(path) = config.config.clone() {
        tracing::info!("📁 Loading policy from: {}", path);
        match load_policy_file(&path) {
            Ok(file) => config.policy = file.policy,
            Err(e) => exit_with(&e),
        }
    }

    let storage = LocalStorage::new(".".to_string());

    if config.template {
        match write_template(&storage, &config).await {
            Ok(path) => println!("📄 Template saved to: {}", path),
            Err(e) => exit_with(&e),
        }
        return Ok(());
    }

    let print_json = config.stdout;
    let print_report = config.report;
    let pipeline = BulkPipeline::new(storage, config);
    let engine = BulkEngine::new(pipeline);

    match engine.run().await {
        Ok(outcome) => {
            let result = &outcome.result;
            if print_json {
                println!("{}", result.json);
            }
            if print_report {
                eprintln!("{}", result.report);
            }
            eprintln!(
                "✅ {} records written to {}",
                result.document.individuals.len(),
                outcome.output_path
            );
        }
        Err(e) => exit_with(&e),
    }

    Ok(())
}

fn load_policy_file(path: &str) -> ari_bulk::Result<TomlConfig> {
    let file = TomlConfig::from_file(path)?;
    file.validate()?;
    Ok(file)
}

async fn write_template(storage: &LocalStorage, config: &CliConfig) -> ari_bulk::Result<String> {
    let filename = format!("{}_TEMPLATE.csv", config.profile.tag());
    let path = Path::new(&config.output_path)
        .join(filename)
        .to_string_lossy()
        .into_owned();
    storage
        .write_file(&path, &tabular::template(config.profile)?)
        .await?;
    Ok(path)
}

fn exit_with(e: &BulkError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ ari-bulk failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
