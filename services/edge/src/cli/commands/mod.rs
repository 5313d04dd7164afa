pub mod logging;

use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const ARG_PORT: &str = "port";
pub const ARG_DIST: &str = "dist";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("ezrcm-edge")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("EZRCM_EDGE_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_DIST)
                .short('d')
                .long("dist")
                .help("Directory holding the compiled portal (index.html, pkg/, assets/)")
                .long_help(
                    "Directory holding the compiled portal. Unknown page paths fall back to its index.html so client routes can be deep-linked.",
                )
                .default_value("dist")
                .env("EZRCM_EDGE_DIST"),
        );

    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "ezrcm-edge");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some(env!("CARGO_PKG_DESCRIPTION").to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars(
            [
                ("EZRCM_EDGE_PORT", None::<&str>),
                ("EZRCM_EDGE_DIST", None),
                ("EZRCM_EDGE_LOG_LEVEL", None),
            ],
            || {
                let matches = new().get_matches_from(vec!["ezrcm-edge"]);
                assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(8080));
                assert_eq!(
                    matches.get_one::<String>(ARG_DIST).cloned(),
                    Some("dist".to_string())
                );
            },
        );
    }

    #[test]
    fn test_check_port_and_dist() {
        let matches = new().get_matches_from(vec![
            "ezrcm-edge",
            "--port",
            "9090",
            "--dist",
            "/srv/portal",
        ]);

        assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(9090));
        assert_eq!(
            matches.get_one::<String>(ARG_DIST).cloned(),
            Some("/srv/portal".to_string())
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("EZRCM_EDGE_PORT", Some("443")),
                ("EZRCM_EDGE_DIST", Some("/srv/portal")),
                ("EZRCM_EDGE_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["ezrcm-edge"]);
                assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(443));
                assert_eq!(
                    matches.get_one::<String>(ARG_DIST).cloned(),
                    Some("/srv/portal".to_string())
                );
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_verbosity() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("EZRCM_EDGE_LOG_LEVEL", None::<String>)], || {
                let mut args = vec!["ezrcm-edge".to_string()];
                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_rejects_invalid_port() {
        let result = new().try_get_matches_from(vec!["ezrcm-edge", "--port", "http"]);
        assert_eq!(
            result.map_err(|e| e.kind()),
            Err(clap::error::ErrorKind::ValueValidation)
        );
    }
}
