use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use research_bank::config::{
    get_config, load_config, user_config_path, write_default_config, Config, LoggingConfig,
    LOCAL_CONFIG_FILE,
};
use research_bank::models::{CatalogQuery, Facet, Language};
use research_bank::pagination::{clamp_page, paginate, total_pages};
use research_bank::print_status;
use research_bank::query::{facet_values, query};
use research_bank::sources::source_for_base;
use research_bank::store::{CatalogKind, CatalogStore, FailurePolicy, LoadStatus};
use research_bank::ui::{self, Spinner, Status};
use research_bank::Library;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Research Bank - browse curated papers, research directions and datasets
#[derive(Parser, Debug)]
#[command(name = "research-bank")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "hongkongkiwi")]
#[command(about = "Browse curated papers, research directions and datasets", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog directory or http(s) URL (overrides catalog.base)
    #[arg(long, global = true)]
    base: Option<String>,

    /// Display language: en or zh (overrides display.language)
    #[arg(long, global = true)]
    lang: Option<Language>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

/// Catalog a facet vocabulary is drawn from
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum CatalogName {
    Papers,
    General,
    Medical,
}

/// Paging options shared by the listing commands
#[derive(clap::Args, Debug)]
struct PageArgs {
    /// Page number (1-based)
    #[arg(long, short, default_value_t = 1)]
    page: usize,

    /// Items per page (defaults to display.page_size)
    #[arg(long)]
    page_size: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search the curated papers
    #[command(alias = "p")]
    Papers {
        /// Free-text term matched against title, authors, abstract and tags
        term: Option<String>,

        /// Direction id, e.g. "cv"
        #[arg(long, short)]
        direction: Option<String>,

        #[arg(long, short)]
        year: Option<i32>,

        #[arg(long)]
        venue: Option<String>,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// List research directions with paper counts
    Directions,

    /// Search the general dataset catalog
    #[command(alias = "g")]
    General {
        /// Free-text term matched against name, description, modality and task
        term: Option<String>,

        #[arg(long, short)]
        modality: Option<String>,

        #[arg(long, short)]
        task: Option<String>,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// Search the medical dataset catalog
    #[command(alias = "m")]
    Medical {
        /// Free-text term matched against name, modality, organ and task
        term: Option<String>,

        #[arg(long, short)]
        modality: Option<String>,

        /// Organ or structure, exact match
        #[arg(long)]
        organ: Option<String>,

        /// Task code (Seg, Cls, Det, ...)
        #[arg(long, short)]
        task: Option<String>,

        /// 2D, 3D or Video
        #[arg(long)]
        dimension: Option<String>,

        #[arg(long, short)]
        year: Option<i32>,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// List the distinct values of a facet in a catalog
    Facets {
        #[arg(value_enum)]
        catalog: CatalogName,

        /// modality, task, organ, dimension, year, direction or venue
        facet: Facet,
    },

    /// Write a default configuration file
    InitConfig {
        /// Destination (defaults to the user config directory)
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(Some(path.as_path()))?,
        None => get_config(),
    };
    if let Some(base) = &cli.base {
        config.catalog.base = base.clone();
    }
    if let Some(language) = cli.lang {
        config.display.language = language;
    }

    init_tracing(cli.verbose, cli.quiet, &config.logging);

    let language = config.display.language;
    let format = resolve_format(cli.output);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Papers {
            term,
            direction,
            year,
            venue,
            paging,
        } => {
            let library = Library::embedded()?;
            if let Some(id) = direction.as_deref() {
                if library.direction(id).is_none() {
                    tracing::warn!(direction = id, "Unknown direction");
                }
            }

            let catalog_query = CatalogQuery::new(term.unwrap_or_default())
                .facet_opt(Facet::Direction, direction)
                .facet_opt(Facet::Year, year.map(|y| y.to_string()))
                .facet_opt(Facet::Venue, venue);
            let results = query(library.papers(), &catalog_query);

            output_page(
                &results,
                &paging,
                &config,
                format,
                |items| ui::papers_table(items, &library, language),
                |paper| format!("{} - {} ({})", paper.title, paper.author_line(), paper.year),
            )?;
        }

        Commands::Directions => {
            let library = Library::embedded()?;
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(library.directions())?);
                }
                OutputFormat::Plain => {
                    let counts = library.direction_counts();
                    for direction in library.directions() {
                        println!(
                            "{}\t{}\t{}",
                            direction.id,
                            direction.display_name(language),
                            counts.get(direction.id.as_str()).copied().unwrap_or(0)
                        );
                    }
                }
                _ => println!("{}", ui::directions_table(&library, language)),
            }
        }

        Commands::General {
            term,
            modality,
            task,
            paging,
        } => {
            let store = load_store(&config, CatalogKind::General, cli.quiet).await?;
            let catalog_query = CatalogQuery::new(term.unwrap_or_default())
                .facet_opt(Facet::Modality, modality)
                .facet_opt(Facet::Task, task);
            let results = query(store.general(), &catalog_query);

            output_page(
                &results,
                &paging,
                &config,
                format,
                |items| ui::general_table(items),
                |dataset| dataset.to_row(),
            )?;
        }

        Commands::Medical {
            term,
            modality,
            organ,
            task,
            dimension,
            year,
            paging,
        } => {
            let store = load_store(&config, CatalogKind::Medical, cli.quiet).await?;
            let catalog_query = CatalogQuery::new(term.unwrap_or_default())
                .facet_opt(Facet::Modality, modality)
                .facet_opt(Facet::Organ, organ)
                .facet_opt(Facet::Task, task)
                .facet_opt(Facet::Dimension, dimension)
                .facet_opt(Facet::Year, year.map(|y| y.to_string()));
            let results = query(store.medical(), &catalog_query);

            output_page(
                &results,
                &paging,
                &config,
                format,
                |items| ui::medical_table(items),
                |dataset| dataset.to_row(),
            )?;
        }

        Commands::Facets { catalog, facet } => {
            let values = match catalog {
                CatalogName::Papers => facet_values(Library::embedded()?.papers(), facet),
                CatalogName::General => {
                    let store = load_store(&config, CatalogKind::General, cli.quiet).await?;
                    facet_values(store.general(), facet)
                }
                CatalogName::Medical => {
                    let store = load_store(&config, CatalogKind::Medical, cli.quiet).await?;
                    facet_values(store.medical(), facet)
                }
            };

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&values)?),
                _ => {
                    println!("{}", language.all_label().dimmed());
                    for value in values {
                        println!("{}", value);
                    }
                }
            }
        }

        Commands::InitConfig { path } => {
            let path = path
                .or_else(user_config_path)
                .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE));
            write_default_config(&path)?;
            if !cli.quiet {
                print_status!(
                    Status::Success,
                    format!("Wrote default configuration to {}", path.display())
                );
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8, quiet: bool, logging: &LoggingConfig) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => logging.level.as_str(),
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("research_bank={}", level)),
    );

    let (json, text) = if logging.is_json() {
        (
            Some(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)),
            None,
        )
    } else {
        (
            None,
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .init();
}

fn resolve_format(format: OutputFormat) -> OutputFormat {
    match format {
        OutputFormat::Auto if ui::is_terminal() => OutputFormat::Table,
        OutputFormat::Auto => OutputFormat::Json,
        other => other,
    }
}

/// Load the dataset catalogs, exiting with the localized load error if the
/// requested catalog is unusable.
async fn load_store(config: &Config, wanted: CatalogKind, quiet: bool) -> Result<CatalogStore> {
    let language = config.display.language;
    let source = source_for_base(&config.catalog.base, config.catalog.timeout())?;

    let spinner = if quiet || !ui::is_terminal() {
        Spinner::hidden()
    } else {
        Spinner::new(language.loading())
    };

    let policy = config.catalog.failure_policy;
    let mut store = CatalogStore::new(config.catalog.store_options());
    let status = store.load(source.as_ref()).await;

    if let LoadStatus::Failed(failures) = status {
        let fatal =
            policy == FailurePolicy::Joint || failures.iter().any(|f| f.kind == wanted);

        for failure in failures {
            tracing::error!(catalog = %failure.kind, "{}", failure.message);
        }

        if fatal {
            spinner.finish_with_error(language.load_failed());
            print_status!(Status::Error, language.load_failed());
            std::process::exit(1);
        }
        for failure in failures {
            print_status!(Status::Warning, failure.notice(language));
        }
    }

    spinner.clear();
    Ok(store)
}

/// Clamp the requested page, slice it out of `results` and print it.
fn output_page<'a, T: Serialize>(
    results: &[&'a T],
    paging: &PageArgs,
    config: &Config,
    format: OutputFormat,
    table: impl FnOnce(&[&'a T]) -> comfy_table::Table,
    plain: impl Fn(&T) -> String,
) -> Result<()> {
    let language = config.display.language;
    let page_size = paging.page_size.unwrap_or(config.display.page_size);
    let current = clamp_page(paging.page, total_pages(results.len(), page_size));
    let page = paginate(results, page_size, current);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&page)?),
        _ if results.is_empty() => print_status!(Status::Info, language.no_results()),
        OutputFormat::Plain => {
            for item in page.items.iter().copied() {
                println!("{}", plain(item));
            }
        }
        _ => {
            println!("{}", table(page.items));
            let pager = ui::pager_line(&page, language);
            if !pager.is_empty() {
                println!("{}", pager.dimmed());
            }
        }
    }

    Ok(())
}
