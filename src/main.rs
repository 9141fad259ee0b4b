use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use menu_catalog::api;
use menu_catalog::config::{DatabaseArgs, ServerArgs};

#[derive(Parser)]
#[command(name = "menucat")]
#[command(about = "Menu, submenu and dish catalog over HTTP")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Options for the default `serve` command
    #[command(flatten)]
    serve: ServerArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the catalog HTTP server
    Serve(ServerArgs),
    /// Apply pending schema migrations and exit
    Migrate(DatabaseArgs),
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(
        |_| "menu_catalog=debug,catalog_core=info,tower_http=debug".into(),
    ));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(args: ServerArgs) -> anyhow::Result<()> {
    let db = args.database.open()?;
    tracing::info!("Menu dishes_count policy: {}", db.dish_count_policy());

    let app = api::create_router(db);

    let listener = tokio::net::TcpListener::bind(args.addr()).await?;
    tracing::info!("Menu catalog listening on http://{}", args.addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Menu catalog stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Serve(args)) => serve(args).await?,
        Some(Commands::Migrate(args)) => {
            args.open()?;
            tracing::info!("Catalog schema is up to date");
        }
        None => serve(cli.serve).await?,
    }

    Ok(())
}
