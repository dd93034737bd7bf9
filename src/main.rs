mod captioner;
mod config;
mod constants;
mod errors;
mod gemini;
mod print_help;
mod server;
mod utils;

use crate::captioner::Captioner;
use crate::config::Config;
use crate::print_help::print_help;
use crate::utils::process_command;
use std::{env, error::Error};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    if args.iter().any(|arg| arg == "-help" || arg == "-h") {
        print_help();
        return Ok(());
    }

    let config = Config::from_env()?;
    let client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()?;
    let captioner = Captioner::from_config(&config, client);

    process_command(&config, captioner, &args).await
}
