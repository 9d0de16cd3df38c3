mod app;
mod config;
mod error;
mod paths;

use std::fs::{self, File};

use simplelog::{Config, LevelFilter, WriteLogger};
use tagdom::Terminal;

use crate::app::HashtagApp;
use crate::config::AppConfig;
use crate::error::AppError;

fn init_logging() -> Result<(), AppError> {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    WriteLogger::init(LevelFilter::Debug, Config::default(), File::create(&path)?)?;
    Ok(())
}

fn load_config() -> Result<AppConfig, AppError> {
    match paths::config_file() {
        Some(path) => Ok(AppConfig::load(&path)?),
        None => Ok(AppConfig::default()),
    }
}

/// Run the page and return the final hidden field value.
fn run() -> Result<String, AppError> {
    init_logging()?;
    let config = load_config()?;
    log::info!("[app] starting with limits {:?}", config.limits);

    let mut app = HashtagApp::new(&config);
    {
        let mut term = Terminal::new()?;
        app.run(&mut term)?;
    }

    Ok(app.widget().output_value().to_string())
}

fn main() {
    match run() {
        Ok(tags) => println!("{tags}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
