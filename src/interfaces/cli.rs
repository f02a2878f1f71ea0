use crate::infrastructure::config::RenderFormat;
use clap::Parser;

#[derive(Parser)]
#[command(name = "nlq")]
#[command(about = "Ask a natural-language SQL backend from the command line.")]
#[command(version)]
pub struct Cli {
    /// Backend endpoint URL (e.g. http://127.0.0.1:5000/query)
    #[arg(short = 'e', long)]
    pub endpoint: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<RenderFormat>,

    /// Choose color theme
    #[arg(short = 'T', long)]
    pub theme: Option<String>,

    /// Read queries from stdin, one per line
    #[arg(short = 'i', long)]
    pub interactive: bool,

    /// Only render the response of the most recent query
    #[arg(long)]
    pub latest_only: bool,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,

    /// Show status
    #[arg(long)]
    pub status: bool,

    /// Query text
    #[arg(num_args = 1..)]
    pub query: Vec<String>,
}
