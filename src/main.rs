use clap::Parser;
use course_site::config::Command;
use course_site::core::watch;
use course_site::core::ConfigProvider;
use course_site::utils::error::ErrorSeverity;
use course_site::utils::{logger, validation::Validate};
use course_site::{BuildEngine, BuildError, CliConfig, CoursePipeline, LocalStorage};
use std::path::Path;

fn report_failure(e: &BuildError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Build failed: {} (Category: {:?}, Severity: {:?})",
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

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => report_failure(&e),
    };
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = config.validate() {
        report_failure(&e);
    }

    let content_dir = config.content_dir().to_string();
    let extension = config.content_extension().to_string();

    let storage = LocalStorage::new(".".to_string());
    let pipeline = CoursePipeline::new(storage, config);
    let engine = BuildEngine::new(pipeline);

    let outcome = match cli.command() {
        Command::Build => engine.run().await.map(|summary| {
            println!(
                "✅ Build complete! Deploy the \"{}\" folder.",
                summary.output_path
            );
        }),
        Command::Watch => watch::watch(&engine, Path::new(&content_dir), &extension).await,
    };

    if let Err(e) = outcome {
        report_failure(&e);
    }

    Ok(())
}
