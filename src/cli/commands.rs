//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "daybook")]
#[command(about = "Mood journal with dated entries and attached images", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new journal backend
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Create an account and sign in
    Signup {
        email: String,

        /// Password (prompted for when omitted)
        #[arg(long, env = "DAYBOOK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Sign in to an existing account
    Signin {
        email: String,

        /// Password (prompted for when omitted)
        #[arg(long, env = "DAYBOOK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Sign out
    Signout,

    /// Show the signed-in account
    Whoami,

    /// Write a new entry
    New {
        #[arg(short, long)]
        title: String,

        /// Entry text (opens the editor when omitted)
        #[arg(short, long)]
        content: Option<String>,

        /// excellent, good, okay, bad or terrible
        #[arg(short, long, default_value = "okay")]
        mood: String,

        /// Entry date, YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<String>,

        /// Image to attach (repeatable)
        #[arg(short, long = "image", value_name = "PATH")]
        images: Vec<PathBuf>,
    },

    /// Edit an entry; omitted fields keep their current value
    Edit {
        /// Entry id or unique id prefix
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        content: Option<String>,

        #[arg(short, long)]
        mood: Option<String>,

        /// Image to append (repeatable)
        #[arg(short, long = "image", value_name = "PATH")]
        images: Vec<PathBuf>,
    },

    /// Delete an entry and its images
    Delete {
        /// Entry id or unique id prefix
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List entries, newest first
    List {
        /// Only entries whose title or content contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one entry in full
    Show {
        /// Entry id or unique id prefix
        id: String,
    },

    /// List the available moods
    Moods,

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
