use clap::Parser;

/// Chat with Google Gemini from the terminal.
#[derive(Parser, Debug)]
#[command(name = "gemchat", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Gemini API key. Falls back to GEMINI_API_KEY.
    #[arg(long)]
    pub api_key: Option<String>,

    /// Describe this image and exit.
    #[arg(short = 'i', long)]
    pub image: Option<String>,

    /// Prompt sent with --image.
    #[arg(short = 'p', long, requires = "image")]
    pub prompt: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
