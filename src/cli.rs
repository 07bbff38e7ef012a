use clap::Parser;
use std::path::PathBuf;

/// Fill in thumbnail paths for whole-slide-image media entries
#[derive(Parser, Debug)]
#[command(name = "slide-thumbs", version)]
#[command(about = "Derive WSI thumbnail URLs in a JSON media document", long_about = None)]
pub struct Cli {
    /// JSON documents to rewrite in place (defaults to Skin_Global_Leaf_Optimized.json)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Report what would change without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Indentation width of the written JSON (0-16)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u8).range(0..=16))]
    pub indent: Option<u8>,

    /// Settings file (TOML)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
