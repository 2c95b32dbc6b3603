use clap::{ArgAction, Parser, Subcommand};
use quotebook::model::ALL_CATEGORY;
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "quotebook", bin_name = "quotebook", version = get_version())]
#[command(about = "Browse, search, favorite and share quotations", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory of quote files (overrides the configured one)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub quotes: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true, help_heading = "Options")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose", help_heading = "Options")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List quotes, optionally filtered (default command)
    #[command(alias = "ls")]
    List {
        /// Case-insensitive text matched against content, author, source and tags
        #[arg(short, long, default_value = "")]
        search: String,

        /// Exact category name
        #[arg(short, long, default_value = ALL_CATEGORY)]
        category: String,
    },

    /// Show one quote with related quotes
    #[command(alias = "v")]
    View { id: u32 },

    /// Show a random quote
    Random,

    /// List categories
    Categories,

    /// List tags
    Tags,

    /// Manage favorites
    #[command(alias = "favorites")]
    Fav {
        #[command(subcommand)]
        action: Option<FavCommands>,
    },

    /// Export a quote as a PNG card
    Export {
        id: u32,

        /// classic, elegant, warm, modern or gradient
        #[arg(short, long)]
        theme: Option<String>,

        /// Small preview size instead of the full download size
        #[arg(long)]
        preview: bool,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        out: PathBuf,
    },

    /// Copy a quote's share text to the clipboard
    Copy { id: u32 },

    /// Run the HTTP API
    Serve {
        /// Address to listen on, e.g. 127.0.0.1:3000
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Show or set configuration
    Config {
        /// quotes-dir, font, theme or bind
        key: Option<String>,
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum FavCommands {
    /// List favorites (default)
    #[command(alias = "ls")]
    List,
    Add { id: u32 },
    #[command(alias = "rm")]
    Remove { id: u32 },
    Toggle { id: u32 },
    /// Tell whether a quote is a favorite
    Check { id: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("quotebook").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_command_defaults_to_none() {
        assert!(parse(&[]).command.is_none());
    }

    #[test]
    fn list_defaults_to_all_categories() {
        match parse(&["ls", "-s", "孔子"]).command {
            Some(Commands::List { search, category }) => {
                assert_eq!(search, "孔子");
                assert_eq!(category, "全部");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn fav_subcommands() {
        match parse(&["fav", "rm", "3"]).command {
            Some(Commands::Fav { action }) => {
                assert_eq!(action, Some(FavCommands::Remove { id: 3 }))
            }
            other => panic!("unexpected: {other:?}"),
        }
        match parse(&["fav"]).command {
            Some(Commands::Fav { action }) => assert!(action.is_none()),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn export_options() {
        match parse(&["export", "7", "--theme", "warm", "--preview", "-o", "out"]).command {
            Some(Commands::Export { id, theme, preview, out }) => {
                assert_eq!(id, 7);
                assert_eq!(theme.as_deref(), Some("warm"));
                assert!(preview);
                assert_eq!(out, PathBuf::from("out"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn global_flags() {
        let cli = parse(&["random", "-vv", "--quotes", "/tmp/q"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.quotes, Some(PathBuf::from("/tmp/q")));
        assert!(Cli::try_parse_from(["quotebook", "-q", "-v"]).is_err());
    }

    #[test]
    fn view_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["quotebook", "view", "abc"]).is_err());
    }
}
