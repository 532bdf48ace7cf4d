use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "docstore-textsearch")]
#[command(about = "Parse text-search queries and match JSON documents against them", long_about = None)]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the parsed terms of a query as JSON
    Parse {
        #[arg(allow_hyphen_values = true)]
        query: String,
    },
    /// Print the stem set of a text, one stem per line
    Tokenize { text: String },
    /// Print the JSON-lines documents that match a query
    Filter(FilterArgs),
}

#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    #[arg(allow_hyphen_values = true)]
    pub query: String,
    /// JSON-lines input; stdin when omitted
    #[arg(short, long)]
    pub input: Option<PathBuf>,
    /// Field to search; repeat for several (default: title, content)
    #[arg(short, long = "field")]
    pub fields: Vec<String>,
    /// Print one explanation per document instead of the matching lines
    #[arg(long)]
    pub explain: bool,
}
