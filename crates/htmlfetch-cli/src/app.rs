use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use htmlfetch::{ClientSetting, DEFAULT_MAX_REDIRECTS, FetchOptions, Timeouts};
use url::Url;

#[derive(Clone, Debug, Parser)]
#[command(name = "htmlfetch", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(alias = "g", name = "get", about = "Print the HTML document behind a URL")]
    Get(GetArg),
    #[command(alias = "i", name = "inspect", about = "Classify a single response without following it")]
    Inspect(InspectArg),
}

#[derive(Clone, Debug, Args)]
pub struct GetArg {
    pub url: Url,

    /// Redirect hops to follow; zero or negative refuses every redirect
    #[arg(long, short = 'r', default_value_t = DEFAULT_MAX_REDIRECTS, allow_hyphen_values = true)]
    pub max_redirects: i32,

    #[command(flatten)]
    pub client: ClientArg,
}

impl GetArg {
    pub fn options(&self) -> FetchOptions { FetchOptions::default().max_redirects(self.max_redirects) }
}

#[derive(Clone, Debug, Args)]
pub struct InspectArg {
    pub url: Url,

    #[command(flatten)]
    pub client: ClientArg,
}

#[derive(Clone, Debug, Args)]
pub struct ClientArg {
    /// Connect timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub connect_timeout: Option<u64>,

    /// Whole-request timeout in seconds, body included
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    #[arg(long)]
    pub user_agent: Option<String>,

    /// Proxy URL; may be given more than once
    #[arg(long = "proxy", value_name = "URL")]
    pub proxies: Vec<Url>,
}

impl ClientArg {
    pub fn setting(&self) -> ClientSetting {
        let mut timeouts = Timeouts::default();
        if let Some(secs) = self.connect_timeout {
            timeouts = timeouts.connect(Duration::from_secs(secs));
        }
        if let Some(secs) = self.timeout {
            timeouts = timeouts.read(Duration::from_secs(secs));
        }

        let mut setting = ClientSetting::default().timeouts(timeouts);
        if let Some(agent) = &self.user_agent {
            setting = setting.user_agent(agent.clone());
        }
        for proxy in &self.proxies {
            setting = setting.proxy(proxy.clone());
        }
        setting
    }
}
