use clap::Parser;
use inventory_admin::cli::{self, Cli, Console};
use inventory_admin::config::Config;
use mimalloc::MiMalloc;
use std::io;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Cli::parse();

    let cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error: invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    debug!(
        database_path = %cfg.database_path.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "<prompt>".to_string()),
        users_table = %cfg.users_table.as_deref().unwrap_or("<prompt>"),
        password_scheme = ?cfg.password_scheme,
        loglevel = %cfg.loglevel
    );

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    match cli::run(args, &cfg, &mut console).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
