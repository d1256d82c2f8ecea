use std::env;
use std::error::Error;

use clap::Parser;
use cli::{main_cli, Args};

mod cli;

fn main() -> Result<(), Box<dyn Error>> {
    let log_level = match env::var("LOG_LEVEL") {
        Ok(value) => value,
        Err(_) => "warn".to_string(),
    };
    env::set_var("RUST_LOG", log_level);
    env_logger::init();
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    log::debug!("Starting padmap v{}", VERSION);

    let args = Args::parse();
    main_cli(args)
}
