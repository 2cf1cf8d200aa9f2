use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use mood_diary::cli::{self, Cli, Command};
use mood_diary::config::Config;
use mood_diary::{build_app, db, sqlite_store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mood_diary=info,tower_http=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    let config = Config::from_env()?;

    let pool = db::init_pool(&config.database_url).await?;
    let store = sqlite_store(pool);

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let app = build_app(store);
            let addr = config.listen_addr();
            let listener = TcpListener::bind(&addr).await?;

            tracing::info!("listening on {}", addr);
            axum::serve(listener, app).await?;
        }
        Command::Export { output } => cli::export_data(&store, output.as_deref()).await?,
        Command::Import { file } => cli::import_data(&store, &file).await?,
        Command::ResetProfile => cli::reset_profile(&store).await?,
    }

    Ok(())
}
