use clap::{Parser, Subcommand};
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
#[command(name = "tagpix", bin_name = "tagpix", version = get_version())]
#[command(about = "Tag pictures by writing the tags into their file names", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Viewing directory (defaults to the current directory)
    #[arg(short, long, global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List pictures in the viewing directory
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Only show pictures carrying this tag (repeatable)
        #[arg(short, long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Hide pictures in subdirectories
        #[arg(long)]
        top_level: bool,
    },

    /// Add tags to a picture
    #[command(display_order = 2)]
    Add {
        /// Display index or path of the picture
        picture: String,

        /// Tags to add (e.g. @beach)
        #[arg(required = true, num_args = 1..)]
        tags: Vec<String>,
    },

    /// Remove tags from a picture
    #[command(alias = "rm", display_order = 3)]
    Remove {
        /// Display index or path of the picture
        picture: String,

        #[arg(required = true, num_args = 1..)]
        tags: Vec<String>,
    },

    /// Show the previous names of a picture
    #[command(display_order = 4)]
    History { picture: String },

    /// Rename a picture back to a previous name
    #[command(display_order = 5)]
    Revert {
        picture: String,

        /// The file name to go back to
        name: String,
    },

    /// Move a picture to another directory
    #[command(alias = "mv", display_order = 6)]
    Move {
        picture: String,

        /// Target directory
        #[arg(value_name = "TARGET")]
        target: PathBuf,
    },

    /// Show or edit the list of available tags
    #[command(display_order = 7)]
    Tags {
        #[command(subcommand)]
        action: Option<TagsCommands>,

        /// Bring tags containing this keyword to the front
        #[arg(long, value_name = "KEYWORD")]
        sort: Option<String>,
    },

    /// Show the change log
    #[command(display_order = 8)]
    Log,

    /// Suggest tags for a picture, or accept labels as tags
    ///
    /// This build ships no image recognizer, so suggestions are only available
    /// to library users who plug one in. `--accept` works regardless.
    #[command(display_order = 9)]
    Suggest {
        picture: String,

        /// Labels to turn into tags (prefixed with @) and apply
        #[arg(long, num_args = 1.., value_name = "LABEL")]
        accept: Vec<String>,
    },

    /// Get or set configuration
    #[command(display_order = 10)]
    Config {
        /// Configuration key (e.g. extensions)
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TagsCommands {
    /// Add tags to the list
    Add {
        #[arg(required = true, num_args = 1..)]
        tags: Vec<String>,
    },

    /// Remove tags from the list
    #[command(alias = "rm")]
    Remove {
        #[arg(required = true, num_args = 1..)]
        tags: Vec<String>,
    },
}
