use std::net::SocketAddr;
use std::path::PathBuf;

use crate::ftc::scout::export::ExportTarget;
use crate::ftc::scout::io::graphql::DEFAULT_API_URL;

pub const DEFAULT_SEASON: u16 = 2024;
pub const DEFAULT_EXPORT_PATH: &str = "static/generated.xlsx";
pub const DEFAULT_PUBLIC_PATH: &str = "/generated.xlsx";
pub const DEFAULT_BIND: &str = "127.0.0.1:5173";

/// Runtime settings shared by the CLI and the HTTP service.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoutConfig {
    pub api_url: String,
    pub season: u16,
    pub export: ExportTarget,
    /// Spreadsheets served by the local ingest endpoint.
    pub ingest_paths: Vec<PathBuf>,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            season: DEFAULT_SEASON,
            export: ExportTarget::new(DEFAULT_EXPORT_PATH, DEFAULT_PUBLIC_PATH),
            ingest_paths: Vec::new(),
        }
    }
}

/// Command line flags backing [`ScoutConfig`].
#[derive(Debug, Clone, clap::Args)]
pub struct ConfigArgs {
    /// GraphQL endpoint of the score service.
    #[arg(long, env = "SCOUT_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Season whose events are queried.
    #[arg(long, env = "SCOUT_SEASON", default_value_t = DEFAULT_SEASON)]
    pub season: u16,

    /// File the export is written to.
    #[arg(long, env = "SCOUT_EXPORT_PATH", default_value = DEFAULT_EXPORT_PATH)]
    pub export_path: PathBuf,

    /// URL path under which the export is downloadable.
    #[arg(long, env = "SCOUT_PUBLIC_PATH", default_value = DEFAULT_PUBLIC_PATH)]
    pub public_path: String,

    /// Spreadsheet read by local ingest. Repeatable.
    #[arg(long = "ingest-path", env = "SCOUT_INGEST_PATHS", value_delimiter = ',')]
    pub ingest_paths: Vec<PathBuf>,
}

impl From<ConfigArgs> for ScoutConfig {
    fn from(args: ConfigArgs) -> Self {
        Self {
            api_url: args.api_url,
            season: args.season,
            export: ExportTarget::new(args.export_path, args.public_path),
            ingest_paths: args.ingest_paths,
        }
    }
}

/// Flags for the `serve` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ServeArgs {
    /// Socket address to listen on.
    #[arg(long, env = "SCOUT_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        config: ConfigArgs,
    }

    #[test]
    fn defaults_match_builtin_config() {
        let harness = Harness::try_parse_from(["scout"]).expect("parsed");
        assert_eq!(ScoutConfig::from(harness.config), ScoutConfig::default());
    }

    #[test]
    fn flags_override_defaults() {
        let harness = Harness::try_parse_from([
            "scout",
            "--season",
            "2023",
            "--export-path",
            "out/teams.xlsx",
            "--public-path",
            "/teams.xlsx",
            "--ingest-path",
            "a.xlsx",
            "--ingest-path",
            "b.xlsx",
        ])
        .expect("parsed");

        let config = ScoutConfig::from(harness.config);
        assert_eq!(config.season, 2023);
        assert_eq!(config.export.path, PathBuf::from("out/teams.xlsx"));
        assert_eq!(config.export.public_path, "/teams.xlsx");
        assert_eq!(
            config.ingest_paths,
            vec![PathBuf::from("a.xlsx"), PathBuf::from("b.xlsx")]
        );
    }
}
