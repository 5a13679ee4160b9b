//! Command-line interface definition and translation into core requests.

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use at_base::config::ProjectConfig;
use at_base::constants::{END_TOKEN, START_TOKEN};
use at_base::options::depth_limit;
use at_base::{AnnotreeError, EmbedMarkers, Result};
use at_mod_tree::GenerateRequest;

/// Generate an annotated file tree with descriptions from file comments.
#[derive(Parser, Debug)]
#[command(name = "annotree")]
#[command(version)]
pub struct Cli {
    /// Directory to analyze
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Write the tree to this file instead of stdout
    #[arg(short, long, conflicts_with = "embed")]
    pub output: Option<PathBuf>,

    /// Ignore file (.treeignore, .gitignore, ...). Auto-detected when omitted
    #[arg(short, long)]
    pub ignore: Option<PathBuf>,

    /// Maximum depth in directory levels below the root
    #[arg(short = 'L', long, allow_negative_numbers = true)]
    pub level: Option<i64>,

    /// Only show directories
    #[arg(short, long)]
    pub directories_only: bool,

    /// Maximum number of entry lines
    #[arg(long)]
    pub limit: Option<usize>,

    /// Column at which annotations start
    #[arg(short = 'a', long)]
    pub annotation_column: Option<usize>,

    /// Do not annotate entries
    #[arg(long)]
    pub no_annotate: bool,

    /// Cut descriptions wider than this many columns
    #[arg(long)]
    pub max_width: Option<usize>,

    /// Splice the tree into this file between the start and end markers
    #[arg(short, long)]
    pub embed: Option<PathBuf>,

    /// Start marker token (wrapped as an HTML comment)
    #[arg(long, requires = "embed")]
    pub start_marker: Option<String>,

    /// End marker token (wrapped as an HTML comment)
    #[arg(long, requires = "embed")]
    pub end_marker: Option<String>,

    /// Project config file. Defaults to .annotree.yaml in the directory
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log debug details to stderr
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Where the rendered tree goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
    Embed { target: PathBuf, markers: EmbedMarkers },
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else if self.quiet {
            LevelFilter::Error
        } else {
            LevelFilter::Warn
        }
    }

    pub fn project_config(&self) -> Result<ProjectConfig> {
        match &self.config {
            Some(path) => ProjectConfig::load(path),
            None => ProjectConfig::discover(&self.directory),
        }
    }

    /// Merge defaults, project config, and flags (in that order of precedence, lowest first).
    pub fn into_request(self, config: &ProjectConfig) -> Result<(GenerateRequest, Destination)> {
        let mut request = GenerateRequest::new(&self.directory);
        config.apply(&mut request.options)?;
        if let Some(initializers) = &config.initializers {
            request.initializers = initializers.clone();
        }
        request.ignore_file = self.ignore.or_else(|| config.ignore_file.as_ref().map(|p| self.directory.join(p)));

        let options = &mut request.options;
        if self.level.is_some() {
            options.max_depth = depth_limit(self.level)?;
        }
        if self.directories_only {
            options.directories_only = true;
        }
        if let Some(limit) = self.limit {
            options.line_limit = Some(limit);
        }
        if let Some(column) = self.annotation_column {
            options.annotation_column = column;
        }
        if self.no_annotate {
            options.annotate = false;
        }
        if let Some(width) = self.max_width {
            options.max_description_width = Some(width);
        }
        options.validate()?;

        let destination = match (self.embed, self.output) {
            (Some(target), _) => {
                let start = marker_token(self.start_marker, &config.start_marker, START_TOKEN)?;
                let end = marker_token(self.end_marker, &config.end_marker, END_TOKEN)?;
                let markers = EmbedMarkers::wrapped(&start, &end);
                markers.validate()?;
                Destination::Embed { target, markers }
            }
            (None, Some(path)) => Destination::File(path),
            (None, None) => Destination::Stdout,
        };
        Ok((request, destination))
    }
}

/// Flag beats config beats default.
fn marker_token(flag: Option<String>, configured: &Option<String>, default: &str) -> Result<String> {
    let token = flag.or_else(|| configured.clone()).unwrap_or_else(|| default.to_string());
    if token.trim().is_empty() {
        return Err(AnnotreeError::config("marker tokens must not be empty"));
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("annotree").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.log_level(), LevelFilter::Warn);
        let (request, destination) = cli.into_request(&ProjectConfig::default()).unwrap();
        assert_eq!(request.root, PathBuf::from("."));
        assert_eq!(request.options.annotation_column, 42);
        assert!(request.options.annotate);
        assert_eq!(request.options.max_depth, None);
        assert_eq!(destination, Destination::Stdout);
    }

    #[test]
    fn test_flags_override_config() {
        let config = ProjectConfig::parse("annotation_column: 30\nmax_depth: 4\ndirectories_only: true\n").unwrap();
        let cli = parse(&["src", "-L", "2", "-a", "50", "-o", "tree.txt"]);
        let (request, destination) = cli.into_request(&config).unwrap();
        assert_eq!(request.root, PathBuf::from("src"));
        assert_eq!(request.options.max_depth, Some(2));
        assert_eq!(request.options.annotation_column, 50);
        assert!(request.options.directories_only);
        assert_eq!(destination, Destination::File(PathBuf::from("tree.txt")));
    }

    #[test]
    fn test_negative_level_rejected() {
        let cli = parse(&["-L", "-1"]);
        let err = cli.into_request(&ProjectConfig::default()).unwrap_err();
        assert!(matches!(err, AnnotreeError::Config(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_embed_with_custom_end_marker() {
        let cli = parse(&["--embed", "README.md", "--end-marker", "TREE:END"]);
        let (_, destination) = cli.into_request(&ProjectConfig::default()).unwrap();
        assert_eq!(
            destination,
            Destination::Embed {
                target: PathBuf::from("README.md"),
                markers: EmbedMarkers {
                    start: "<!-- ANNOTREE:START -->".into(),
                    end: "<!-- TREE:END -->".into()
                },
            }
        );
    }

    #[test]
    fn test_embed_markers_from_config() {
        let config = ProjectConfig::parse("start_marker: TREE:BEGIN\n").unwrap();
        let (_, destination) = parse(&["-e", "README.md"]).into_request(&config).unwrap();
        let Destination::Embed { markers, .. } = destination else { panic!("expected embed") };
        assert_eq!(markers.start, "<!-- TREE:BEGIN -->");
        assert_eq!(markers.end, "<!-- ANNOTREE:END -->");
    }

    #[test]
    fn test_output_conflicts_with_embed() {
        let result = Cli::try_parse_from(["annotree", "--embed", "README.md", "-o", "tree.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_ignore_file_relative_to_root() {
        let config = ProjectConfig::parse("ignore_file: custom.ignore\n").unwrap();
        let (request, _) = parse(&["proj"]).into_request(&config).unwrap();
        assert_eq!(request.ignore_file, Some(PathBuf::from("proj/custom.ignore")));
    }

    #[test]
    fn test_marker_token_precedence() {
        let configured = Some("CFG:START".to_string());
        assert_eq!(marker_token(Some("FLAG".into()), &configured, START_TOKEN).unwrap(), "FLAG");
        assert_eq!(marker_token(None, &configured, START_TOKEN).unwrap(), "CFG:START");
        assert_eq!(marker_token(None, &None, START_TOKEN).unwrap(), "ANNOTREE:START");
        assert!(marker_token(Some("  ".into()), &None, START_TOKEN).is_err());
    }
}
