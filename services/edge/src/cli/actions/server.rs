use crate::api;
use anyhow::{Result, ensure};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dist: PathBuf,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the dist directory is unusable or the listener fails.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    let index = args.dist.join("index.html");
    ensure!(
        index.is_file(),
        "{} not found, --dist must point at the compiled portal",
        index.display()
    );

    api::serve(args.port, args.dist).await
}

fn log_startup_args(args: &Args) {
    let entries = [
        ("listen", format!("tcp:{}", args.port)),
        ("dist", args.dist.display().to_string()),
        ("login", session_gate::paths::LOGIN_PATH.to_string()),
        (
            "public",
            session_gate::paths::PUBLIC_PREFIXES.join(", "),
        ),
    ];
    log_entries("Startup configuration", &entries);
}

fn log_entries(title: &str, entries: &[(&str, String)]) {
    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = format!("{}\n\n{title}:", edge_banner());
    for (key, value) in entries {
        let padding = " ".repeat(max_key_len.saturating_sub(key.len()));
        let _ =
            std::fmt::Write::write_fmt(&mut message, format_args!("\n  {key}:{padding} {value}"));
    }
    info!("{message}");
}

fn edge_banner() -> String {
    format!(
        "EZRCM EDGE - {} - {}",
        env!("CARGO_PKG_VERSION"),
        short_commit(crate::GIT_COMMIT_HASH)
    )
}

fn short_commit(hash: &str) -> &str {
    let trimmed = hash.trim();
    trimmed.get(..7).unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_commit_truncates_long_hashes() {
        assert_eq!(short_commit("0123456789abcdef"), "0123456");
        assert_eq!(short_commit(" abc "), "abc");
        assert_eq!(short_commit("unknown"), "unknown");
    }

    #[tokio::test]
    async fn execute_rejects_missing_index() -> Result<()> {
        let dist = tempfile::tempdir()?;
        let result = execute(Args {
            port: 0,
            dist: dist.path().to_path_buf(),
        })
        .await;
        assert!(result.is_err());
        Ok(())
    }
}
