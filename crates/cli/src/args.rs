//! Command-line argument parsing for the `ask` driver

use clap::Parser;
use edurag_common::AppConfig;
use std::path::PathBuf;

/// Ask the indexed course notes a question
#[derive(Parser, Debug)]
#[command(name = "ask")]
#[command(version)]
#[command(about = "Ask the indexed course notes a question", long_about = None)]
pub struct Args {
    /// Question text; multiple words are joined with spaces
    #[arg(value_name = "QUESTION", required = true, num_args = 1..)]
    pub question: Vec<String>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of search hits to use
    #[arg(long)]
    pub top: Option<usize>,

    /// Do not prefix context chunks with their source
    #[arg(long)]
    pub plain: bool,

    /// Print only the answer
    #[arg(short, long)]
    pub quiet: bool,

    /// Log verbosity: -v (info), -vv (debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn question(&self) -> String {
        self.question.join(" ")
    }

    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut AppConfig) {
        config.rag.include_sources = !self.plain;
        if let Some(top) = self.top {
            config.search.top = top;
        }
    }

    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_are_joined() {
        let args = Args::parse_from(["ask", "Explain", "ostrich", "algorithm", "drawbacks"]);
        assert_eq!(args.question(), "Explain ostrich algorithm drawbacks");
        assert!(!args.quiet);
    }

    #[test]
    fn test_question_is_required() {
        assert!(Args::try_parse_from(["ask"]).is_err());
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from(["ask", "--top", "5", "-q", "deadlock"]);
        let mut config = AppConfig::default();
        args.apply(&mut config);
        assert_eq!(config.search.top, 5);
        assert!(config.rag.include_sources);
        assert!(args.quiet);
    }

    #[test]
    fn test_plain_disables_sources() {
        let args = Args::parse_from(["ask", "--plain", "paging"]);
        let mut config = AppConfig::default();
        config.rag.include_sources = true;
        args.apply(&mut config);
        assert!(!config.rag.include_sources);
        assert_eq!(config.search.top, 3);
    }

    #[test]
    fn test_verbosity() {
        assert_eq!(Args::parse_from(["ask", "q"]).log_filter(), "warn");
        assert_eq!(Args::parse_from(["ask", "-v", "q"]).log_filter(), "info");
        assert_eq!(Args::parse_from(["ask", "-vvv", "q"]).log_filter(), "debug");
    }
}
