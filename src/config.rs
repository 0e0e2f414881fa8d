use std::time::Duration;
use clap::Parser;
use crate::models::search::Radius;
use crate::state::options::{Layout, PageOptions, DEFAULT_CENTER};

#[derive(Parser, Clone, Debug)]
pub struct Config {
    #[clap(env, long, default_value = "development")]
    pub environment: String,
    /// Restaurant backend base URL.
    #[clap(env, long, default_value = "http://127.0.0.1:8000")]
    pub api_url: String,
    /// Map provider access token. The map shows a placeholder without one.
    #[clap(env, long)]
    pub mapbox_token: Option<String>,
    #[clap(env, long, default_value = "http://localhost:3000")]
    pub origin_urls: String,
    #[clap(env, long, default_value_t = 3000)]
    pub port: u16,
    #[clap(env, long, default_value_t = Radius::DEFAULT.meters())]
    pub default_radius: u32,
    #[clap(env, long, default_value_t = 13.0)]
    pub default_zoom: f64,
    #[clap(env, long, value_enum, default_value_t = Layout::Collapsible)]
    pub layout: Layout,
    #[clap(env, long, default_value_t = 10)]
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn page_options(&self) -> PageOptions {
        PageOptions {
            default_center: DEFAULT_CENTER,
            default_radius: Radius::new(self.default_radius),
            default_zoom: self.default_zoom,
            layout: self.layout,
        }
    }

    /// Blank tokens count as missing.
    pub fn map_token(&self) -> Option<String> {
        self.mapbox_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
