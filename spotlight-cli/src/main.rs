mod cli;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use spotlight_core::{Photo, Photographer, Spotlight, SpotlightConfig, SpotlightError};
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn config_path(cli: &Cli) -> PathBuf {
    cli.config
        .clone()
        .unwrap_or_else(|| SpotlightConfig::config_dir().join("config.json"))
}

async fn run(cli: Cli) -> Result<(), SpotlightError> {
    let config = SpotlightConfig::from_file(config_path(&cli));
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(SpotlightConfig::config_dir);
    let mut app = Spotlight::open(&config, &data_dir).await?;

    match cli.command {
        Command::Random => {
            let photos = app.get_random_photos().await?;
            print_photos(photos);
        }
        Command::Search { query, page } => {
            let search = app.search_photos(&query, page).await?;
            println!(
                "\"{}\" page {}/{}",
                search.query, search.current_page, search.total_pages
            );
            print_photos(&search.results);
        }
        Command::Photo { id } => {
            let photo = app.load_photo(&id).await?;
            print_photo_detail(&photo);
        }
        Command::Photographer { username, pages } => {
            let profile = app.get_photographer_profile(&username).await?;
            print_profile(&profile);
            print_photos(&app.state().photographer.photos);
            for _ in 1..pages {
                match app.get_photographer_photos(false).await {
                    Ok(view) => print_photos(&view.photos),
                    Err(SpotlightError::NoMorePages) => break,
                    Err(e) => return Err(e),
                }
            }
        }
        Command::Download { id, dir } => {
            let dir = dir.unwrap_or_else(|| config.download_dir());
            let path = app.download_photo(&id, dir).await?;
            println!("{}", path.display());
        }
        Command::Bookmark { id } => {
            let bookmarked = app.switch_bookmark(&id).await?;
            println!("{id} {}", if bookmarked { "bookmarked" } else { "removed from bookmarks" });
        }
        Command::Bookmarks => {
            if app.bookmarks().is_empty() {
                println!("no bookmarks yet");
            } else {
                print_photos(app.bookmarks());
            }
        }
    }
    Ok(())
}

fn print_photos(photos: &[Photo]) {
    for photo in photos {
        let marker = if photo.bookmarked { '*' } else { ' ' };
        let author = photo
            .user
            .as_ref()
            .map(Photographer::display_name)
            .unwrap_or("unknown");
        println!(
            "{marker} {:<12} {}x{}  {}  by {author}",
            photo.id,
            photo.width,
            photo.height,
            photo.alt_description.as_deref().unwrap_or("")
        );
    }
}

fn print_photo_detail(photo: &Photo) {
    print_photos(std::slice::from_ref(photo));
    if let Some(description) = &photo.description {
        println!("  {description}");
    }
    println!("  likes: {}", photo.likes);
    println!("  page:  {}", photo.links.html);
    println!("  full:  {}", photo.urls.full);
}

fn print_profile(profile: &Photographer) {
    println!("{} (@{})", profile.display_name(), profile.username);
    if let Some(bio) = &profile.bio {
        println!("  {bio}");
    }
    if let Some(location) = &profile.location {
        println!("  {location}");
    }
    println!(
        "  {} photos, {} likes",
        profile.total_photos, profile.total_likes
    );
}
