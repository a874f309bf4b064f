use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use crate::engine::api_client::DEFAULT_API_BASE;
use crate::engine::loader::{MAX_ID, PAGE_SIZE};
use crate::store::default_data_dir;

/// Dex Viewer - browse the creature catalog page by page
#[derive(Parser, Debug, Clone)]
#[command(name = "dex_viewer")]
pub struct Args {
    /// Directory holding the local store (favorites, theme)
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Base URL of the catalog API
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Records fetched per page
    #[arg(long, default_value_t = PAGE_SIZE)]
    pub page_size: u32,

    /// Highest id ever requested
    #[arg(long, default_value_t = MAX_ID)]
    pub max_id: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub api_base: String,
    pub page_size: u32,
    pub max_id: u32,
}

impl TryFrom<Args> for AppConfig {
    type Error = anyhow::Error;

    fn try_from(args: Args) -> Result<Self> {
        if args.page_size == 0 {
            bail!("--page-size must be at least 1");
        }
        if args.max_id == 0 {
            bail!("--max-id must be at least 1");
        }
        let api_base = args.api_base.trim().trim_end_matches('/').to_string();
        if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
            bail!("--api-base must be an http(s) URL, got '{}'", args.api_base);
        }

        Ok(Self {
            data_dir: args.data_dir.unwrap_or_else(default_data_dir),
            api_base,
            page_size: args.page_size,
            max_id: args.max_id,
        })
    }
}
