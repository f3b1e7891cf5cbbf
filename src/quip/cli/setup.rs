use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "quip",
    bin_name = "quip",
    version,
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = "Random quotes from your own categorized collection", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Use the project store (.quip) instead of the global one
    #[arg(short, long, global = true, help_heading = "Options")]
    pub local: bool,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Print help
    #[arg(short, long, global = true)]
    pub help: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Core,
    Data,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Core => "Core Commands:",
            CommandGroup::Data => "Data Commands:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "random" | "filter" | "add" | "list" | "categories" => Some(CommandGroup::Core),
            "export" | "import" | "sync" => Some(CommandGroup::Data),
            "watch" | "config" | "init" | "help" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[CommandGroup::Core, CommandGroup::Data, CommandGroup::Misc]
    }
}

pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("quip {version}\n"));
    output.push_str("Random quotes from your own categorized collection\n");
    output.push('\n');
    output.push_str("Usage: quip [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();
    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| CommandGroup::for_command(sc.get_name()) == Some(*group))
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", sc.get_name(), about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("  -l, --local      Use the project store (.quip)\n");
    output.push_str("  -v, --verbose    Verbose output\n");
    output.push_str("  -h, --help       Print help\n");
    output.push_str("  -V, --version    Print version\n");
    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

/// Prints clap's help for one subcommand, or the grouped help for unknown names.
pub fn print_help_for_command(name: &str) {
    let mut cmd = Cli::command();
    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name || subcmd.get_all_aliases().any(|alias| alias == name) {
            print!("{}", subcmd.render_help());
            return;
        }
    }

    eprintln!("Unknown command: {}", name);
    eprintln!();
    print_grouped_help();
}

/// Name of the subcommand a parsed command line refers to.
pub fn command_name(command: &Option<Commands>) -> Option<&'static str> {
    let name = match command.as_ref()? {
        Commands::Core(c) => match c {
            CoreCommands::Random => "random",
            CoreCommands::Filter { .. } => "filter",
            CoreCommands::Add { .. } => "add",
            CoreCommands::List { .. } => "list",
            CoreCommands::Categories => "categories",
        },
        Commands::Data(c) => match c {
            DataCommands::Export { .. } => "export",
            DataCommands::Import { .. } => "import",
            DataCommands::Sync => "sync",
        },
        Commands::Misc(c) => match c {
            MiscCommands::Watch => "watch",
            MiscCommands::Config { .. } => "config",
            MiscCommands::Init => "init",
            MiscCommands::Help { .. } => "help",
        },
    };
    Some(name)
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Core(CoreCommands),

    #[command(flatten)]
    Data(DataCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Subcommand, Debug)]
pub enum CoreCommands {
    /// Show a random quote from the active category (default)
    #[command(alias = "r", display_order = 1)]
    Random,

    /// Set the active category and show a quote from it
    #[command(alias = "f", display_order = 2)]
    Filter {
        /// Category name, or "All"
        category: String,
    },

    /// Add a quote
    #[command(alias = "a", display_order = 3)]
    Add {
        /// Quote text (quote it in the shell)
        text: String,

        /// Category for the quote
        category: String,
    },

    /// List quotes
    #[command(alias = "ls", display_order = 4)]
    List {
        /// Category to list (defaults to the active one)
        category: Option<String>,
    },

    /// List categories, marking the active one
    #[command(alias = "cats", display_order = 5)]
    Categories,
}

#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Export all quotes as JSON
    #[command(display_order = 10)]
    Export {
        /// Output file (defaults to quotes.json)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Import quotes from a JSON file (all or nothing)
    #[command(display_order = 11)]
    Import {
        /// JSON file holding an array of quotes
        path: PathBuf,
    },

    /// Fetch and merge quotes from the configured remote
    #[command(display_order = 12)]
    Sync,
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Interactive session with periodic sync
    #[command(alias = "w", display_order = 20)]
    Watch,

    /// Get or set configuration
    #[command(display_order = 21)]
    Config {
        /// Configuration key (e.g., remote-url)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Initialize the store (optional utility)
    #[command(display_order = 22)]
    Init,

    /// Print help for quip or a subcommand
    #[command(display_order = 23)]
    Help {
        /// Subcommand to get help for
        command: Option<String>,
    },
}
