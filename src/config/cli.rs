use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "segment-boxplot")]
#[command(about = "Render a box plot of synthetic purchase amounts per customer segment")]
pub struct CliConfig {
    #[arg(long, help = "TOML file overriding the built-in chart settings")]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = ".", help = "Directory the chart and side outputs are written to")]
    pub output_dir: PathBuf,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage after each phase")]
    pub monitor: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_uses_defaults() {
        let cli = CliConfig::try_parse_from(["segment-boxplot"]).unwrap();
        assert!(cli.config.is_none());
        assert_eq!(cli.output_dir, PathBuf::from("."));
        assert!(!cli.verbose);
        assert!(!cli.monitor);
    }

    #[test]
    fn test_parses_flags() {
        let cli = CliConfig::try_parse_from([
            "segment-boxplot",
            "--config",
            "chart.toml",
            "--output-dir",
            "out",
            "--verbose",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("chart.toml")));
        assert_eq!(cli.output_dir, PathBuf::from("out"));
        assert!(cli.verbose);
    }
}
