//! `urlsafe config` – show config path and effective settings.

use anyhow::Result;
use urlsafe_core::config::{self, UrlsafeConfig};

pub fn run_config(cfg: &UrlsafeConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    let mut effective = cfg.clone();
    effective.toast = Some(cfg.toast());
    print!("{}", toml::to_string_pretty(&effective)?);
    Ok(())
}
