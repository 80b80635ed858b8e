use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use vitrine_model::prelude::{SearchField, SortDirection};

#[derive(Parser)]
#[command(
    name = "vitrinectl",
    about = "Browse museum catalogues and curate exhibitions",
    version
)]
pub struct Cli {
    /// TOML configuration file (defaults to ./vitrine.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Environment file loaded before reading VITRINE_* variables
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,
    /// Override the catalogue API root
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Print JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Page through the artworks of one source
    Browse {
        /// Artwork source; falls back to the configured default
        source: Option<String>,
        /// First page to load
        #[arg(long, default_value_t = 1)]
        from: u32,
        /// Number of pages to load
        #[arg(long, default_value_t = 1, conflicts_with = "all")]
        pages: u32,
        /// Keep loading until the source runs out
        #[arg(long)]
        all: bool,
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Show one artwork in full
    Show { source: String, id: String },
    /// Search artworks across sources
    Search(SearchArgs),
    /// Manage exhibitions
    #[command(subcommand)]
    Exhibitions(ExhibitionCommand),
}

#[derive(Args)]
pub struct SearchArgs {
    /// Free text matched against title, artist, medium and category
    pub text: Option<String>,
    /// Use the advanced search endpoint
    #[arg(long)]
    pub advanced: bool,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub artist: Option<String>,
    #[arg(long)]
    pub medium: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,
    #[arg(long, value_enum)]
    pub order: Option<OrderArg>,
    /// Results per page
    #[arg(long)]
    pub limit: Option<u32>,
    /// First page to load
    #[arg(long)]
    pub page: Option<u32>,
    /// Number of pages to load
    #[arg(long, default_value_t = 1)]
    pub pages: u32,
}

#[derive(Subcommand)]
pub enum ExhibitionCommand {
    /// List every exhibition
    List,
    /// Show one exhibition and its artworks
    Show { id: String },
    /// Create an empty exhibition
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Change an exhibition's name or description
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Add an artwork to an exhibition
    Add {
        id: String,
        source: String,
        artwork_id: String,
    },
    /// Remove an artwork from an exhibition
    Remove {
        id: String,
        source: String,
        artwork_id: String,
    },
    /// Delete an exhibition
    Delete { id: String },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SortArg {
    Title,
    Date,
    Artist,
    Medium,
    Category,
}

impl From<SortArg> for SearchField {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Title => SearchField::Title,
            SortArg::Date => SearchField::Date,
            SortArg::Artist => SearchField::Artist,
            SortArg::Medium => SearchField::Medium,
            SortArg::Category => SearchField::Category,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OrderArg {
    Asc,
    Desc,
}

impl From<OrderArg> for SortDirection {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Asc => SortDirection::Ascending,
            OrderArg::Desc => SortDirection::Descending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn global_options_follow_subcommands() {
        let cli = Cli::try_parse_from([
            "vitrinectl",
            "browse",
            "chicago",
            "--pages",
            "3",
            "--base-url",
            "museum.test/api",
        ])
        .expect("parse");

        assert_eq!(cli.base_url.as_deref(), Some("museum.test/api"));
        match cli.command {
            Command::Browse {
                source, pages, all, ..
            } => {
                assert_eq!(source.as_deref(), Some("chicago"));
                assert_eq!(pages, 3);
                assert!(!all);
            }
            _ => panic!("expected browse"),
        }
    }

    #[test]
    fn pages_and_all_conflict() {
        let parsed = Cli::try_parse_from([
            "vitrinectl", "browse", "--pages", "2", "--all",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn search_flags_map_to_model_values() {
        let cli = Cli::try_parse_from([
            "vitrinectl",
            "search",
            "--advanced",
            "--artist",
            "Monet",
            "--sort",
            "title",
            "--order",
            "desc",
        ])
        .expect("parse");

        let Command::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert!(args.advanced);
        assert_eq!(args.artist.as_deref(), Some("Monet"));
        assert_eq!(args.sort.map(SearchField::from), Some(SearchField::Title));
        assert_eq!(
            args.order.map(SortDirection::from),
            Some(SortDirection::Descending)
        );
    }
}
