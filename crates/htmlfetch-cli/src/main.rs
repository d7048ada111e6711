use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use htmlfetch::{Fetcher, Outcome, ReqwestClient, is_html, is_redirect, resolve_location};
use tracing_subscriber::EnvFilter;

use crate::app::{App, ClientArg, Commands, GetArg, InspectArg};

mod app;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let app = App::parse();
    let result = match app.cmd {
        Commands::Get(arg) => get(arg),
        Commands::Inspect(arg) => inspect(arg),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn client(arg: &ClientArg) -> anyhow::Result<ReqwestClient> {
    ReqwestClient::with_setting(arg.setting()).context("failed to set up HTTP client")
}

fn get(arg: GetArg) -> anyhow::Result<ExitCode> {
    let fetcher = Fetcher::new(client(&arg.client)?).with_options(arg.options());
    tracing::debug!(url = %arg.url, max_redirects = arg.max_redirects, "fetching");

    match fetcher.fetch_url(&arg.url, fetcher.options().max_redirects)? {
        Outcome::Document(html) => {
            println!("{html}");
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Unavailable(reason) => {
            eprintln!("no HTML document: {reason}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn inspect(arg: InspectArg) -> anyhow::Result<ExitCode> {
    let fetcher = Fetcher::new(client(&arg.client)?);
    let head = fetcher.probe(&arg.url)?;

    let status = head
        .status()
        .map_or_else(|| "unknown".to_string(), |s| s.to_string());
    println!("status:       {status}");
    println!("content-type: {}", head.content_type().as_deref().unwrap_or("-"));
    println!("html:         {}", is_html(&head));
    println!("redirect:     {}", is_redirect(&head));

    if let Some(location) = head.location() {
        match resolve_location(&arg.url, location) {
            Some(target) => println!("location:     {target}"),
            None => println!("location:     {location} (invalid)"),
        }
    }

    Ok(ExitCode::SUCCESS)
}
