//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;

use crate::config::Region;

/// Aikido MCP - Aikido Security findings as Model Context Protocol tools over stdio
#[derive(Parser, Debug)]
#[command(name = "aikido-mcp")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Aikido region: eu, us or me [env: AIKIDO_REGION, default: eu]
    #[arg(long)]
    pub region: Option<Region>,

    /// Override the regional API base URL [env: AIKIDO_API_BASE_URL]
    #[arg(long)]
    pub base_url: Option<String>,

    /// Load environment variables from this file instead of ./.env
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Enable debug logging (stderr)
    #[arg(long, env = "AIKIDO_MCP_DEBUG", hide_env = true)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "aikido-mcp",
            "--region",
            "US",
            "--base-url",
            "http://localhost:9000/api",
            "--env-file",
            "/tmp/aikido.env",
            "--debug",
        ])
        .unwrap();

        assert_eq!(cli.region, Some(Region::Us));
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:9000/api"));
        assert_eq!(cli.env_file, Some(PathBuf::from("/tmp/aikido.env")));
        assert!(cli.debug);
    }

    #[test]
    fn test_invalid_region_rejected() {
        assert!(Cli::try_parse_from(["aikido-mcp", "--region", "mars"]).is_err());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["aikido-mcp"]).unwrap();
        assert!(cli.region.is_none());
        assert!(cli.base_url.is_none());
        assert!(cli.env_file.is_none());
    }
}
