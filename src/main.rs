use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::{Attribute, Cell, Table};
use cs_department::api::{DetailSource, FacultyApi};
use cs_department::citation::{extract_fields, format_authors, PublicationAggregator};
use cs_department::config::{find_config_file, load_config, Config};
use cs_department::detail::{DetailCache, DetailFetcher, DetailSession, SelectionResult};
use cs_department::models::{FacultySummary, LectureNote, NoteCategory, PublicationRecord};
use cs_department::views::{
    faculty_stats, FacultyPublications, FacultyView, NoteTab, NotesView, Page,
    PublicationDirectory, PublicationView, DEFAULT_AREA,
};
use serde::Serialize;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CS Department - faculty directory, publications and lecture notes
#[derive(Parser, Debug)]
#[command(name = "cs-department")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Faculty directory, publications and lecture notes of the CS department", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (-v, -vv)
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

    #[command(subcommand)]
    command: Commands,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Table if stdout is a terminal, JSON otherwise
    Auto,
    Table,
    Json,
}

impl OutputFormat {
    fn resolve(self) -> OutputFormat {
        match self {
            OutputFormat::Auto if std::io::stdout().is_terminal() => OutputFormat::Table,
            OutputFormat::Auto => OutputFormat::Json,
            other => other,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a single citation line and show the extracted fields
    #[command(alias = "p")]
    Parse {
        /// Citation text
        citation: String,
    },

    /// Show the publications of one faculty member
    #[command(alias = "pubs")]
    Publications {
        /// Faculty email
        email: String,

        /// Filter by title or authors
        #[arg(long, short)]
        search: Option<String>,

        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// List faculty members
    #[command(alias = "f")]
    Faculty {
        /// Research area (unknown areas become a search)
        #[arg(long, short)]
        area: Option<String>,

        /// Position filter, e.g. "Professor"
        #[arg(long)]
        position: Option<String>,

        #[arg(long, short)]
        search: Option<String>,

        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Fetch one faculty member's detail record
    #[command(alias = "d")]
    Detail {
        /// Faculty email
        email: String,
    },

    /// Browse lecture notes from a JSON file
    #[command(alias = "n")]
    Notes {
        /// JSON array of lecture notes
        file: PathBuf,

        #[arg(long)]
        instructor: Option<String>,

        #[arg(long)]
        course: Option<String>,

        /// lecture, assignment, problem, practice, video or resource
        #[arg(long)]
        category: Option<NoteCategory>,

        /// all, recent or popular
        #[arg(long, default_value = "all")]
        tab: NoteTab,

        #[arg(long, default_value_t = 1)]
        page: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("cs_department={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = if let Some(config_path) = &cli.config {
        load_config(config_path)?
    } else if let Some(config_path) = find_config_file() {
        tracing::info!("Using config file: {}", config_path.display());
        load_config(&config_path)?
    } else {
        Config::default()
    };

    let format = cli.output.resolve();

    match cli.command {
        Commands::Parse { citation } => {
            let fields = extract_fields(&citation);
            match format {
                OutputFormat::Json => print_json(&fields)?,
                _ => {
                    let mut table = new_table(vec!["Field", "Value", "Rule"]);
                    let rows = [
                        ("Authors", fields.authors_raw.as_deref(), fields.provenance.authors),
                        ("Title", fields.title.as_deref(), fields.provenance.title),
                        ("Venue", fields.venue.as_deref(), fields.provenance.venue),
                        ("Year", fields.year.as_deref(), fields.provenance.year),
                        ("DOI", fields.doi.as_deref(), fields.provenance.doi),
                    ];
                    for (name, value, rule) in rows {
                        table.add_row(vec![
                            Cell::new(name).add_attribute(Attribute::Bold),
                            Cell::new(value.unwrap_or("-")),
                            Cell::new(rule.unwrap_or("-")),
                        ]);
                    }
                    table.add_row(vec![
                        Cell::new("Formatted authors").add_attribute(Attribute::Bold),
                        Cell::new(format_authors(fields.authors_raw.as_deref())),
                        Cell::new("-"),
                    ]);
                    if let Some(pub_type) = fields.explicit_type {
                        table.add_row(vec![
                            Cell::new("Type").add_attribute(Attribute::Bold),
                            Cell::new(pub_type.name()),
                            Cell::new(fields.provenance.explicit_type.unwrap_or("-")),
                        ]);
                    }
                    println!("{table}");
                }
            }
        }

        Commands::Publications {
            email,
            search,
            page,
        } => {
            let api = FacultyApi::from_config(&config.api, &config.timeouts)?;
            let info = api
                .fetch_primary(&email)
                .await
                .with_context(|| format!("Failed to fetch details for {}", email))?;

            let publications = PublicationAggregator::from_config(&config.publications).aggregate(&info);
            let mut directory = PublicationDirectory::default();
            directory.faculty.push(FacultyPublications {
                id: 1,
                name: info.name().unwrap_or(&email).to_string(),
                title: info.designation().unwrap_or_default().to_string(),
                area: info.teaching().unwrap_or(DEFAULT_AREA).to_string(),
                image: String::new(),
                email: Some(email.clone()),
                publications,
            });

            let mut view = PublicationView::new(config.pagination.publication_page_size);
            view.select_faculty(Some(1));
            if let Some(query) = search {
                view.set_query(&query);
            }
            view.set_page(page);

            if let Some(current) = view.current_page(&directory) {
                output_publications(&current, format)?;
            }
        }

        Commands::Faculty {
            area,
            position,
            search,
            page,
        } => {
            let api = FacultyApi::from_config(&config.api, &config.timeouts)?;
            let faculty: Vec<FacultySummary> = api
                .list_faculty()
                .await
                .context("Failed to fetch faculty list")?
                .iter()
                .enumerate()
                .map(|(i, entry)| FacultySummary::from_list_entry(i as u32 + 1, entry))
                .collect();

            let mut view = FacultyView::new(config.pagination.faculty_page_size);
            if let Some(position) = position {
                view.set_position(&position);
            }
            if let Some(search) = search {
                view.set_search(&search);
            }
            if let Some(area) = area {
                view.apply_area_param(&area);
            }
            view.set_page(page);
            let current = view.current_page(&faculty);

            match format {
                OutputFormat::Json => print_json(&current)?,
                _ => {
                    let mut table = new_table(vec!["#", "Name", "Position", "Email", "Interests"]);
                    for member in &current.items {
                        table.add_row(vec![
                            Cell::new(member.id),
                            Cell::new(&member.name).add_attribute(Attribute::Bold),
                            Cell::new(&member.position),
                            Cell::new(member.email.as_deref().unwrap_or("-")),
                            Cell::new(truncate(&member.interests.join(", "), 40)),
                        ]);
                    }
                    println!("{table}");
                    let stats = faculty_stats(&faculty);
                    println!(
                        "Page {}/{} ({} matching) | {} faculty: {} professors, {} associate, {} assistant",
                        current.page,
                        current.total_pages,
                        current.total_items,
                        stats.total,
                        stats.professors,
                        stats.associate_professors,
                        stats.assistant_professors
                    );
                }
            }
        }

        Commands::Detail { email } => {
            let api = Arc::new(FacultyApi::from_config(&config.api, &config.timeouts)?);

            // The list row feeds the local fallback; a missing list is not fatal
            let summary = match api.list_faculty().await {
                Ok(rows) => rows
                    .iter()
                    .position(|row| row.email.as_deref() == Some(email.as_str()))
                    .map(|i| FacultySummary::from_list_entry(i as u32 + 1, &rows[i])),
                Err(e) => {
                    tracing::warn!("Faculty list unavailable: {}", e);
                    None
                }
            }
            .unwrap_or_else(|| FacultySummary::new(0, email.clone(), Some(email.clone())));

            let fetcher = DetailFetcher::new(api, DetailCache::new());
            let session = DetailSession::new(fetcher, config.retry.max_manual_retries);

            let mut result = session.select(summary).await;
            while let SelectionResult::Failed(ref error) = result {
                if !session.can_retry() {
                    break;
                }
                tracing::warn!(
                    "{} (retry {}/{})",
                    error,
                    session.retry_count() + 1,
                    config.retry.max_manual_retries
                );
                match session.retry().await {
                    Some(next) => result = next,
                    None => break,
                }
            }

            match result {
                SelectionResult::Loaded(outcome) => {
                    if let Some(advisory) = outcome.advisory {
                        eprintln!("{}", advisory);
                    }
                    match format {
                        OutputFormat::Json => print_json(&outcome.info)?,
                        _ => {
                            let mut table = new_table(vec!["Field", "Value"]);
                            for name in outcome.info.field_names() {
                                if let Some(value) = outcome.info.get_str(name) {
                                    table.add_row(vec![
                                        Cell::new(name).add_attribute(Attribute::Bold),
                                        Cell::new(truncate(value, 80)),
                                    ]);
                                }
                            }
                            println!("{table}");
                        }
                    }
                }
                SelectionResult::Failed(error) => return Err(error.into()),
                SelectionResult::Discarded => {}
            }
        }

        Commands::Notes {
            file,
            instructor,
            course,
            category,
            tab,
            page,
        } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let notes: Vec<LectureNote> = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", file.display()))?;

            let mut view = NotesView::new(config.pagination.lecture_page_size);
            view.set_instructor(instructor);
            view.set_course(course);
            view.set_category(category);
            view.set_tab(tab);
            view.set_page(page);
            let current = view.current_page(&notes);

            match format {
                OutputFormat::Json => print_json(&current)?,
                _ => {
                    let mut table =
                        new_table(vec!["ID", "Title", "Course", "Instructor", "Type", "Downloads"]);
                    for note in &current.items {
                        table.add_row(vec![
                            Cell::new(note.id),
                            Cell::new(&note.title).add_attribute(Attribute::Bold),
                            Cell::new(truncate(&note.course, 30)),
                            Cell::new(&note.instructor),
                            Cell::new(format!("{:?}", note.file_type)),
                            Cell::new(note.downloads.map(|d| d.to_string()).unwrap_or_default()),
                        ]);
                    }
                    println!("{table}");
                    println!("Page {}/{}", current.page, current.total_pages);
                }
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(header);
    table
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

fn output_publications(page: &Page<PublicationRecord>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(page)?,
        _ => {
            let mut table = new_table(vec!["Title", "Authors", "Venue", "Type", "Year"]);
            for publication in &page.items {
                table.add_row(vec![
                    Cell::new(truncate(&publication.title, 50)).add_attribute(Attribute::Bold),
                    Cell::new(truncate(&publication.authors, 30)),
                    Cell::new(truncate(&publication.venue, 30)),
                    Cell::new(publication.pub_type.name()),
                    Cell::new(publication.year),
                ]);
            }
            println!("{table}");
            println!(
                "Page {}/{} ({} publications)",
                page.page, page.total_pages, page.total_items
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["cs-department", "parse", "x"]);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        assert_eq!(cli.output, OutputFormat::Auto);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::parse_from(["cs-department", "-vv", "parse", "x"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_output_format() {
        let cli = Cli::parse_from(["cs-department", "parse", "x", "-o", "json"]);
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.output.resolve(), OutputFormat::Json);
    }

    #[test]
    fn test_cli_faculty_command() {
        let cli = Cli::parse_from([
            "cs-department",
            "faculty",
            "--area",
            "VLSI",
            "--position",
            "Professor",
            "--page",
            "2",
        ]);
        match cli.command {
            Commands::Faculty {
                area,
                position,
                search,
                page,
            } => {
                assert_eq!(area.as_deref(), Some("VLSI"));
                assert_eq!(position.as_deref(), Some("Professor"));
                assert!(search.is_none());
                assert_eq!(page, 2);
            }
            _ => panic!("Expected Faculty command"),
        }
    }

    #[test]
    fn test_cli_notes_command() {
        let cli = Cli::parse_from([
            "cs-department",
            "notes",
            "notes.json",
            "--category",
            "video",
            "--tab",
            "popular",
        ]);
        match cli.command {
            Commands::Notes {
                file,
                category,
                tab,
                page,
                ..
            } => {
                assert_eq!(file, PathBuf::from("notes.json"));
                assert_eq!(category, Some(NoteCategory::Video));
                assert_eq!(tab, NoteTab::Popular);
                assert_eq!(page, 1);
            }
            _ => panic!("Expected Notes command"),
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
    }
}
