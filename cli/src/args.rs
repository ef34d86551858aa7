//! Command line arguments

use std::path::PathBuf;

use clap::Parser;

/// Generate randomized exam and correction PDFs from a CSV question bank
#[derive(Debug, Parser)]
#[command(name = "examgen", version, about)]
pub struct Cli {
    /// Question bank CSV file
    pub input: PathBuf,

    /// Number of exam copies to generate
    #[arg(short = 'n', long)]
    pub number: Option<u32>,

    /// File name prefix of generated exams
    #[arg(short = 'e', long)]
    pub exam_prefix: Option<String>,

    /// File name prefix of generated correction keys
    #[arg(short = 'c', long)]
    pub correction_prefix: Option<String>,

    /// Application configuration file
    #[arg(short = 'f', long)]
    pub app_config: Option<PathBuf>,

    /// Logging configuration file
    #[arg(short = 'l', long)]
    pub log_config: Option<PathBuf>,

    /// Shuffle questions and answers (true/false)
    #[arg(short = 's', long)]
    pub shuffle: Option<bool>,

    /// Heading printed at the top of every page
    #[arg(short = 'p', long)]
    pub page_heading: Option<String>,

    /// Character encoding of the input file
    #[arg(short = 'E', long)]
    pub encoding: Option<String>,

    /// Column delimiter name (comma, semicolon, tab, colon,
    /// dash, period, space, exclamation)
    #[arg(short = 'd', long)]
    pub delimiter: Option<String>,

    /// Directory the PDF files are written to
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// Seed for reproducible shuffling
    #[arg(long)]
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let cli = Cli::try_parse_from(["examgen", "bank.csv"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("bank.csv"));
        assert_eq!(cli.number, None);
        assert_eq!(cli.shuffle, None);
    }

    #[test]
    fn test_parse_full() {
        let cli = Cli::try_parse_from([
            "examgen",
            "bank.csv",
            "-n",
            "3",
            "-e",
            "Quiz",
            "-d",
            "semicolon",
            "-s",
            "false",
            "--seed",
            "7",
        ])
        .unwrap();
        assert_eq!(cli.number, Some(3));
        assert_eq!(cli.exam_prefix.as_deref(), Some("Quiz"));
        assert_eq!(cli.delimiter.as_deref(), Some("semicolon"));
        assert_eq!(cli.shuffle, Some(false));
        assert_eq!(cli.seed, Some(7));
    }

    #[test]
    fn test_input_is_required() {
        assert!(Cli::try_parse_from(["examgen"]).is_err());
    }
}
