use clap::{CommandFactory, Parser};
use lions_essays::config;

#[derive(Debug, Parser)]
#[command(name = "lions_essays", version, about = "Dancing with Lions visual essays")]
pub struct CliArgs {
    /// Print a summary of every essay and exit
    #[arg(long)]
    pub headless: bool,

    /// With --headless, print the full JSON export instead
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Map access token (overrides MAP_ACCESS_TOKEN)
    #[arg(long = "map-token", value_name = "TOKEN")]
    pub map_token: Option<String>,

    /// Basemap style file replacing the embedded one
    #[arg(long = "map-style", value_name = "PATH")]
    pub map_style: Option<String>,

    /// Essay to open first: heritage, exports or rugs
    #[arg(long, value_name = "NAME")]
    pub essay: Option<String>,

    /// Directory for the log file
    #[arg(long = "log-dir", value_name = "PATH")]
    pub log_dir: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(token) = &self.map_token {
            std::env::set_var(config::MAP_ACCESS_TOKEN, token);
        }
        if let Some(path) = &self.map_style {
            std::env::set_var(config::MAP_STYLE_PATH, path);
        }
        if let Some(essay) = &self.essay {
            std::env::set_var(config::START_ESSAY, essay);
        }
        if let Some(dir) = &self.log_dir {
            std::env::set_var(config::LOG_DIR, dir);
        }
        if self.debug {
            std::env::set_var(config::DEBUG, "1");
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_flag() {
        let args = CliArgs::parse_from([
            "lions_essays",
            "--headless",
            "--json",
            "--map-token",
            "pk.test-token",
            "--essay",
            "rugs",
            "--log-dir",
            "/tmp/logs",
        ]);
        assert!(args.headless && args.json && !args.debug);
        assert_eq!(args.map_token.as_deref(), Some("pk.test-token"));
        assert_eq!(args.essay.as_deref(), Some("rugs"));
        assert_eq!(args.log_dir.as_deref(), Some("/tmp/logs"));
    }

    #[test]
    fn help_mentions_the_map_token() {
        assert!(CliArgs::help_text().contains("--map-token"));
    }
}
