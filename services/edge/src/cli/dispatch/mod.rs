//! Maps validated CLI matches to the action the binary runs.

use crate::cli::{
    actions::{Action, server::Args},
    commands::{ARG_DIST, ARG_PORT},
};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);
    let dist = matches
        .get_one::<String>(ARG_DIST)
        .map(PathBuf::from)
        .context("missing required argument: --dist")?;

    Ok(Action::Server(Args { port, dist }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;

    #[test]
    fn handler_builds_server_action() -> Result<()> {
        let matches = commands::new().try_get_matches_from(vec![
            "ezrcm-edge",
            "--port",
            "3000",
            "--dist",
            "/srv/portal",
        ])?;

        let Action::Server(args) = handler(&matches)?;
        assert_eq!(args.port, 3000);
        assert_eq!(args.dist, PathBuf::from("/srv/portal"));
        Ok(())
    }
}
