//! Terminal output helpers: status lines, the loading spinner, result tables
//! and the pager line.

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, ContentArrangement, Table};
use std::io::IsTerminal;
use std::time::Duration;

use crate::library::Library;
use crate::models::{Direction, GeneralDataset, Language, MedicalDataset, Paper};
use crate::pagination::{Page, PageMarker};

/// Get the current terminal width.
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(100)
}

/// Check if stdout is a terminal.
pub fn is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
    Warning,
    Info,
    Loading,
}

/// Status icons for different operations.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Error => "✗",
        Status::Warning => "⚠",
        Status::Info => "ℹ",
        Status::Loading => "◐",
    }
}

/// Print a styled status message. Errors go to stderr.
#[macro_export]
macro_rules! print_status {
    ($status:expr, $msg:expr) => {{
        use owo_colors::OwoColorize;
        use $crate::ui::{status_icon, Status};
        let status: Status = $status;
        let icon = status_icon(status);
        match status {
            Status::Success => println!("{} {}", icon.green().bold(), $msg),
            Status::Error => eprintln!("{} {}", icon.red().bold(), $msg),
            Status::Warning => eprintln!("{} {}", icon.yellow().bold(), $msg),
            Status::Info => println!("{} {}", icon.cyan().bold(), $msg),
            Status::Loading => println!("{} {}", icon.cyan(), $msg),
        }
    }};
}

/// Truncate text to fit within the specified width using unicode-aware truncation.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width <= 3 {
        return "...".to_string();
    }

    let total_width = unicode_width::UnicodeWidthStr::width(text);
    if total_width <= max_width {
        return text.to_string();
    }

    let budget = max_width - 3;
    let mut width = 0;
    let mut truncated = String::new();
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(1);
        if width + w > budget {
            break;
        }
        width += w;
        truncated.push(c);
    }

    format!("{}...", truncated)
}

/// Loading spinner shown while catalogs are fetched.
pub struct Spinner {
    pb: indicatif::ProgressBar,
}

impl Spinner {
    pub fn new(msg: &str) -> Self {
        let pb = indicatif::ProgressBar::new_spinner();
        pb.set_style(style("{spinner:.cyan} {msg}", "⠁⠂⠄⡀⢀⠠⠐⠈ "));
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { pb }
    }

    /// A spinner that draws nothing, for quiet or non-terminal output.
    pub fn hidden() -> Self {
        Self {
            pb: indicatif::ProgressBar::hidden(),
        }
    }

    pub fn finish_with_error(&self, msg: &str) {
        self.pb.set_style(style("{spinner:.red} {msg}", "✗✗"));
        self.pb.finish_with_message(msg.to_string());
    }

    /// Remove the spinner line.
    pub fn clear(&self) {
        self.pb.finish_and_clear();
    }
}

fn style(template: &str, ticks: &str) -> indicatif::ProgressStyle {
    indicatif::ProgressStyle::with_template(template)
        .unwrap_or_else(|_| indicatif::ProgressStyle::default_spinner())
        .tick_chars(ticks)
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(terminal_width() as u16)
        .set_header(header);
    table
}

/// Paper listing: title, authors, year, venue, direction.
pub fn papers_table(papers: &[&Paper], library: &Library, language: Language) -> Table {
    let mut table = new_table(vec!["Title", "Authors", "Year", "Venue", "Direction"]);
    for paper in papers {
        let direction = library
            .direction(&paper.direction)
            .map(|d| d.display_name(language))
            .unwrap_or(paper.direction.as_str());

        table.add_row(vec![
            Cell::new(truncate_with_ellipsis(&paper.title, 60)).add_attribute(Attribute::Bold),
            Cell::new(truncate_with_ellipsis(&paper.author_line(), 30)),
            Cell::new(paper.year),
            Cell::new(&paper.venue),
            Cell::new(direction),
        ]);
    }
    table
}

/// Direction listing with per-direction paper counts.
pub fn directions_table(library: &Library, language: Language) -> Table {
    let counts = library.direction_counts();
    let mut table = new_table(vec!["ID", "Name", "Papers", "Description"]);
    for direction in library.directions() {
        table.add_row(direction_row(direction, counts.get(direction.id.as_str()), language));
    }
    table
}

fn direction_row(direction: &Direction, count: Option<&usize>, language: Language) -> Vec<Cell> {
    vec![
        Cell::new(&direction.id),
        Cell::new(direction.display_name(language)).add_attribute(Attribute::Bold),
        Cell::new(count.copied().unwrap_or(0)),
        Cell::new(truncate_with_ellipsis(direction.display_description(language), 60)),
    ]
}

/// General dataset listing.
pub fn general_table(datasets: &[&GeneralDataset]) -> Table {
    let mut table = new_table(vec!["Name", "Modality", "Samples", "Task", "Description", "Link"]);
    for dataset in datasets {
        table.add_row(vec![
            Cell::new(&dataset.name).add_attribute(Attribute::Bold),
            Cell::new(&dataset.modality),
            Cell::new(&dataset.num_samples),
            Cell::new(&dataset.task),
            Cell::new(&dataset.description),
            Cell::new(&dataset.download_url),
        ]);
    }
    table
}

/// Medical dataset listing.
pub fn medical_table(datasets: &[&MedicalDataset]) -> Table {
    let mut table = new_table(vec![
        "Name", "Year", "Dim", "Modality", "Organ", "Samples", "Task", "Link",
    ]);
    for dataset in datasets {
        table.add_row(vec![
            Cell::new(&dataset.name).add_attribute(Attribute::Bold),
            Cell::new(dataset.year_label()),
            Cell::new(&dataset.dimension),
            Cell::new(&dataset.modality),
            Cell::new(truncate_with_ellipsis(&dataset.organ, 30)),
            Cell::new(&dataset.num_samples),
            Cell::new(&dataset.task),
            Cell::new(&dataset.link),
        ]);
    }
    table
}

/// Summary and pager controls for a page, e.g.
/// `Showing 11 - 20 of 42  ‹ 1 [2] 3 4 5 ›`. Empty when there is nothing to page.
pub fn pager_line<T>(page: &Page<'_, T>, language: Language) -> String {
    let Some((start, end)) = page.item_range() else {
        return String::new();
    };

    let markers: Vec<String> = page
        .markers()
        .into_iter()
        .map(|marker| match marker {
            PageMarker::Page(n) if n == page.current_page => format!("[{}]", n),
            other => other.to_string(),
        })
        .collect();

    let mut controls = Vec::with_capacity(markers.len() + 2);
    if page.has_previous() {
        controls.push("‹".to_string());
    }
    controls.extend(markers);
    if page.has_next() {
        controls.push("›".to_string());
    }

    format!(
        "{}  {}",
        language.showing(start, end, page.total_items),
        controls.join(" ")
    )
}
