use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "spotlight", about = "Browse, search, download and bookmark Unsplash photos")]
pub struct Cli {
    /// Path to config.json (default: ~/.config/spotlight/config.json)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the bookmark file
    #[arg(long, global = true, env = "SPOTLIGHT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show a batch of random photos
    Random,
    /// Search photos by keyword
    Search {
        query: String,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Show a single photo
    Photo { id: String },
    /// Show a photographer's profile and photos
    Photographer {
        username: String,
        /// Number of photo pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Download a photo in full resolution
    Download {
        id: String,
        /// Target directory (default: the configured download dir)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
    /// Add or remove a bookmark
    Bookmark { id: String },
    /// List bookmarked photos
    Bookmarks,
}
