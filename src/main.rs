//! reel - Entry Point

use clap::Parser;
use reel::model::{CatalogQuery, SortKey};
use std::path::PathBuf;
use tracing::info;

/// reel - TUI media catalog browser
#[derive(Parser, Debug)]
#[command(name = "reel")]
#[command(version)]
#[command(about = "TUI media catalog browser with single-item carousel navigation")]
pub struct Args {
    /// Base URL of the media catalog API
    #[arg(long)]
    pub server: Option<String>,

    /// Initial search query (overrides the query persisted by the last session)
    #[arg(short, long)]
    pub query: Option<String>,

    /// Sort key for search results
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set NO_COLOR env var if --no-color flag is passed so every palette
    // constructed downstream sees the same preference.
    if args.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = reel::config::load_config_with_precedence(args.config.clone())?;
        let merged = reel::config::merge_config(config_file);
        let with_env = reel::config::apply_env_overrides(merged);
        reel::config::apply_cli_overrides(with_env, args.server.clone(), args.sort)
    };

    reel::logging::init(&config.log_file_path)?;

    info!(config = ?config, "configuration loaded and resolved");

    let server_url = config.server_url.clone().ok_or(
        "no catalog server configured: pass --server, set REEL_SERVER_URL, \
         or add server_url to the config file",
    )?;
    let base = url::Url::parse(&server_url)?;
    let catalog = reel::catalog::HttpCatalog::new(base, config.page_size)?;

    // Seed the initial query: CLI wins, then the address store from the
    // previous session, then browse-all.
    let address = reel::address::FileAddress::new(config.address_file_path.clone());
    let text = args
        .query
        .clone()
        .or_else(|| address.initial_query())
        .unwrap_or_default();
    let query = CatalogQuery {
        text,
        sort: config.sort,
        direction: config.sort_direction,
    };

    reel::view::run_app(catalog, Box::new(address), &config, query)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        // Help returns Err with DisplayHelp, which is success
        let result = Args::try_parse_from(["reel", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["reel", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["reel"]);
        assert_eq!(args.server, None);
        assert_eq!(args.query, None);
        assert_eq!(args.sort, None);
        assert_eq!(args.config, None);
        assert!(!args.no_color);
    }

    #[test]
    fn test_no_color_flag() {
        let args = Args::parse_from(["reel", "--no-color"]);
        assert!(args.no_color);
    }

    #[test]
    fn test_server_flag() {
        let args = Args::parse_from(["reel", "--server", "http://cat.example/api/"]);
        assert_eq!(args.server, Some("http://cat.example/api/".to_string()));
    }

    #[test]
    fn test_query_short_flag() {
        let args = Args::parse_from(["reel", "-q", "beach"]);
        assert_eq!(args.query, Some("beach".to_string()));
    }

    #[test]
    fn test_query_long_flag() {
        let args = Args::parse_from(["reel", "--query", "beach sunset"]);
        assert_eq!(args.query, Some("beach sunset".to_string()));
    }

    #[test]
    fn test_sort_parses_known_keys() {
        let args = Args::parse_from(["reel", "--sort", "rating"]);
        assert_eq!(args.sort, Some(SortKey::Rating));
    }

    #[test]
    fn test_sort_rejects_unknown_key() {
        let result = Args::try_parse_from(["reel", "--sort", "shuffle"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_path() {
        let args = Args::parse_from(["reel", "--config", "/custom/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_combined_flags() {
        let args = Args::parse_from([
            "reel",
            "--server",
            "http://cat.example/api/",
            "-q",
            "sunset",
            "--sort",
            "date",
        ]);
        assert_eq!(args.server, Some("http://cat.example/api/".to_string()));
        assert_eq!(args.query, Some("sunset".to_string()));
        assert_eq!(args.sort, Some(SortKey::Date));
    }

    #[test]
    fn test_server_flows_through_config_precedence_chain() {
        use reel::config::{apply_cli_overrides, merge_config, ConfigFile};

        let config_file = ConfigFile {
            server_url: Some("http://from-file/".to_string()),
            page_size: None,
            sort: None,
            sort_direction: None,
            debounce_ms: None,
            overlay_timeout_ms: None,
            log_file_path: None,
            address_file_path: None,
        };

        let merged = merge_config(Some(config_file));
        assert_eq!(
            merged.server_url.as_deref(),
            Some("http://from-file/"),
            "config file should override the default"
        );

        let with_cli = apply_cli_overrides(merged, Some("http://from-cli/".to_string()), None);
        assert_eq!(
            with_cli.server_url.as_deref(),
            Some("http://from-cli/"),
            "CLI server should override all other sources"
        );
    }

    #[test]
    fn test_default_page_size_is_forty() {
        use reel::config::ResolvedConfig;

        let config = ResolvedConfig::default();
        assert_eq!(config.page_size, 40);
    }
}
