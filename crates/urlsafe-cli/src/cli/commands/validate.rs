//! `urlsafe validate <input>` – check an address format without any network call.

use anyhow::Result;
use urlsafe_core::validate::CandidateUrl;

pub fn run_validate(input: &str) -> Result<()> {
    let url = CandidateUrl::parse(input)?;
    println!("{url} is a valid website address");
    Ok(())
}
