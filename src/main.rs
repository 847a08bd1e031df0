use std::path::PathBuf;
use std::process;

use log::error;

use flashrate_core::config::RunConfig;
use flashrate_core::pipeline;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = match std::env::args().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => {
            eprintln!("usage: flashrate <config.toml>");
            process::exit(2);
        }
    };

    let config = match RunConfig::from_toml_file(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    if let Err(e) = pipeline::run(&config) {
        error!("{}", e);
        process::exit(1);
    }
}
