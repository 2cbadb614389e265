//! `urlsafe check <url>` – validate, run a check session, show the verdict.

use anyhow::{bail, Result};
use jiff::Timestamp;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use urlsafe_core::check::SafetyCheckClient;
use urlsafe_core::config::UrlsafeConfig;
use urlsafe_core::notify::{Notifier, ToastSurface, ToastTiming};
use urlsafe_core::report::SafetyReport;
use urlsafe_core::session::{CheckSessions, SessionState};
use urlsafe_core::validate::CandidateUrl;

use super::render::{render_report, render_toast};

#[derive(Debug, Clone, Copy)]
pub struct CheckOptions {
    pub json: bool,
    pub prompt_retry: bool,
}

/// Prints each toast to stderr as it is raised and keeps the surface's timing.
struct ConsoleToast {
    surface: ToastSurface,
}

impl Notifier for ConsoleToast {
    fn notify(&self, message: &str) {
        eprintln!("{}", render_toast(message));
        self.surface.show(message);
    }
}

pub async fn run_check(cfg: &UrlsafeConfig, input: &str, opts: CheckOptions) -> Result<()> {
    let toast = Arc::new(ConsoleToast {
        surface: ToastSurface::new(ToastTiming::from(&cfg.toast())),
    });

    let url = match CandidateUrl::parse(input) {
        Ok(url) => url,
        Err(rejected) => {
            toast.notify(&rejected.to_string());
            bail!("not a valid website address: {:?}", input.trim());
        }
    };

    let client = SafetyCheckClient::from_config(cfg);
    tracing::debug!(endpoint = client.endpoint(), "using check endpoint");
    let sessions = CheckSessions::new(client, toast.clone());

    let mut handle = sessions.start_session(url);
    if !opts.json {
        println!("Checking {} ...", handle.url());
    }

    loop {
        match handle.settled().await {
            SessionState::Succeeded(report) => return print_report(&report, opts.json),
            SessionState::Failed(failure) => {
                if !opts.prompt_retry || !ask_retry().await? {
                    bail!("check failed: {}", failure.reason);
                }
                toast.surface.dismiss();
                handle = sessions.retry(&handle)?;
            }
            other => bail!("check session ended while {}", other),
        }
    }
}

fn print_report(report: &SafetyReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!();
        print!("{}", render_report(report, Timestamp::now()));
    }
    Ok(())
}

/// Ask on stderr, read one line from stdin. EOF counts as "no".
async fn ask_retry() -> Result<bool> {
    eprint!("Retry? [y/N] ");
    let mut line = String::new();
    let n = BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await?;
    if n == 0 {
        return Ok(false);
    }
    let answer = line.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}
