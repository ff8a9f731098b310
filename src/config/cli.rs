use crate::config::{Settings, TomlConfig};
use crate::core::search::SearchFilters;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "basse-catalog")]
#[command(about = "Search and filter the bass lesson resource index")]
pub struct CliConfig {
    /// Index file path or http(s) URL. Overrides the config file.
    #[arg(long, global = true)]
    pub index: Option<String>,

    /// TOML config file with defaults.
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Print results as JSON")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Keyword search with optional filters
    Search {
        /// Query terms; quote a phrase for exact matching
        query: Option<String>,
        #[arg(long, help = "Resource kind (exercise, song, concept, ...)")]
        kind: Option<String>,
        #[arg(long, help = "Style or technique tag")]
        style: Option<String>,
        #[arg(long)]
        level: Option<String>,
        #[arg(long)]
        book: Option<String>,
        #[arg(long)]
        difficulty: Option<String>,
        #[arg(long, help = "Musical key (C, Dm, Eb7, ...)")]
        key: Option<String>,
        #[arg(long, help = "Only resources with audio")]
        only_mp3: bool,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long, help = "Treat the whole query as an exact phrase")]
        exact: bool,
    },
    /// Auto-complete suggestions for a partial input
    Suggest {
        partial: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Resources sharing tags with the given one
    Similar {
        id: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Resources sharing kind, style and difficulty with the given one
    Recommend {
        id: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Backing tracks in a style, optionally in one key
    Backing {
        style: String,
        #[arg(long)]
        key: Option<String>,
    },
    /// Assemble a five-part lesson plan
    Course {
        #[arg(long, default_value = "funk")]
        style: String,
        #[arg(long, default_value = "débutant")]
        difficulty: String,
        #[arg(long)]
        no_warmup: bool,
        #[arg(long)]
        no_theory: bool,
        #[arg(long)]
        no_application: bool,
        #[arg(long)]
        no_improvisation: bool,
        #[arg(long)]
        no_fun: bool,
    },
    /// Show one resource by id
    Show { id: String },
    /// Aggregate statistics over the index
    Stats,
    /// List the filter values present in the index
    Filters,
}

impl CliConfig {
    pub fn resolve_settings(&self, file: Option<&TomlConfig>) -> Settings {
        Settings::resolve(file, self.index.as_deref())
    }
}

impl Command {
    /// Filters carried by the `search` subcommand; empty for the others.
    pub fn search_filters(&self) -> SearchFilters {
        match self {
            Command::Search {
                kind,
                style,
                level,
                book,
                difficulty,
                key,
                only_mp3,
                limit,
                ..
            } => SearchFilters {
                kind: kind.clone(),
                style: style.clone(),
                level: level.clone(),
                book: book.clone(),
                difficulty: difficulty.clone(),
                key: key.clone(),
                only_mp3: *only_mp3,
                limit: *limit,
            },
            _ => SearchFilters::default(),
        }
    }
}
