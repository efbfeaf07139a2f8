use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use migration::MigratorTrait;
use sea_orm::Database;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod db;
mod error;
mod fingerprint;
mod fixtures;
mod metadata;
mod scanner;
mod tasks;

use config::Config;
use fixtures::FixtureSet;

#[derive(Parser)]
#[command(name = "tune-seeder", about = "Seed a music streaming database from local audio files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the music folder recursively and seed tracks, deduplicating by
    /// content hash; safe to re-run
    Library {
        /// Music folder to scan
        #[arg(long, env = "MUSIC_DIR", default_value = "./Music")]
        music_dir: PathBuf,
    },
    /// Clear and repopulate the demo environment: one album per folder,
    /// fixture users, playlists, likes and followers
    Demo {
        /// Music folder containing one subdirectory per album
        #[arg(long, env = "MUSIC_DIR", default_value = "./Music")]
        music_dir: PathBuf,
        /// JSON fixture set; built-in set if absent
        #[arg(long, env = "FIXTURES_FILE")]
        fixtures: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tune_seeder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    let db = Database::connect(&config.database_url).await?;
    tracing::info!("Connected to database");

    migration::Migrator::up(&db, None).await?;
    tracing::info!("Database migrations completed");

    match cli.command {
        Command::Library { music_dir } => {
            tracing::info!("Scanning: {}", music_dir.display());

            let summary = tasks::run_library_seed(&db, &music_dir).await?;

            println!("{}", "=".repeat(70));
            println!("Seeding completed");
            println!("  Files found     : {}", summary.files_found);
            println!("  Tracks added    : {}", summary.tracks_added);
            println!("  Skipped/existed : {}", summary.tracks_skipped);
            println!("  Artists created : {}", summary.artists_created);
            println!("  Albums created  : {}", summary.albums_created);
            println!("{}", "=".repeat(70));
        }
        Command::Demo { music_dir, fixtures } => {
            let fixture_set = match fixtures {
                Some(path) => FixtureSet::load(&path)?,
                None => FixtureSet::default(),
            };
            tracing::info!("Scanning: {}", music_dir.display());

            let summary = tasks::run_demo_seed(&db, &music_dir, &config.base_url, &fixture_set).await?;

            println!("{}", "=".repeat(70));
            println!("Seeding completed");
            println!("  Users           : {}", summary.users_created);
            println!("  Artists         : {}", summary.artists_created);
            println!("  Albums          : {}", summary.albums_created);
            println!("  Tracks added    : {}", summary.tracks_added);
            println!("  Tracks skipped  : {}", summary.tracks_skipped);
            println!("  Playlists       : {}", summary.playlists_created);
            println!("  Track likes     : {}", summary.likes_created);
            println!("  Artist follows  : {}", summary.artist_follows_created);
            println!("  Album follows   : {}", summary.album_follows_created);
            println!("{}", "=".repeat(70));
        }
    }

    Ok(())
}
