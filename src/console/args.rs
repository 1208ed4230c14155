use clap::Parser;
use std::path::PathBuf;

/// Heuristic spam detection for email content.
///
/// Content comes from the positional argument, `--file`, `--sample`, or stdin
/// (in that order of preference).
#[derive(Debug, Parser)]
#[command(name = "spam-detector", version)]
pub struct Cli {
    /// Email content to analyze
    pub content: Option<String>,

    /// Read the email from a text file (.txt, .eml, ...)
    #[arg(short, long, conflicts_with = "content")]
    pub file: Option<PathBuf>,

    /// Analyze one of the built-in sample emails (1-3)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=3), conflicts_with_all = ["content", "file"])]
    pub sample: Option<u8>,

    /// Read several emails from stdin, separated by blank lines
    #[arg(short, long, conflicts_with_all = ["content", "file", "sample"])]
    pub interactive: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Print history statistics after the analysis
    #[arg(long)]
    pub stats: bool,

    /// List the built-in sample emails and exit
    #[arg(long)]
    pub list_samples: bool,
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
    fn test_parse_inline_content() {
        let cli = Cli::try_parse_from(["spam-detector", "hello there", "--json"]).unwrap();

        assert_eq!(cli.content.as_deref(), Some("hello there"));
        assert!(cli.json);
        assert!(!cli.stats);
    }

    #[test]
    fn test_sample_range_is_enforced() {
        assert!(Cli::try_parse_from(["spam-detector", "--sample", "2"]).is_ok());
        assert!(Cli::try_parse_from(["spam-detector", "--sample", "0"]).is_err());
        assert!(Cli::try_parse_from(["spam-detector", "--sample", "4"]).is_err());
    }

    #[test]
    fn test_sources_conflict() {
        assert!(Cli::try_parse_from(["spam-detector", "text", "--file", "a.txt"]).is_err());
        assert!(Cli::try_parse_from(["spam-detector", "--file", "a.txt", "--sample", "1"]).is_err());
        assert!(Cli::try_parse_from(["spam-detector", "--interactive", "--sample", "1"]).is_err());
    }
}
