mod api;
mod app;
mod config;
mod document;
mod error;
mod events;
mod logger;
mod session;
mod ui;

use anyhow::Result;
use app::App;
use clap::{App as ClapApp, Arg};
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = ClapApp::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about("Terminal client for the mining-impact survey")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Directory holding the configuration file")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("server")
                .short("s")
                .long("server")
                .value_name("URL")
                .help("Survey server base URL, overriding the configured one")
                .takes_value(true),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    if let Some(server_url) = matches.value_of("server") {
        config.server_url = server_url.to_owned();
    }

    App::start(config).await
}
