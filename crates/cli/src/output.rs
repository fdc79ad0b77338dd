//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use owo_colors::OwoColorize;
use recipe_search::{MatchType, ScoredRecipe, SearchStats};

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }

    /// Print a subheader
    pub fn subheader(message: &str) {
        println!();
        println!("{}", message.bold().dimmed());
    }
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs % 60.0;
        format!("{}m {:.0}s", mins, remaining_secs)
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Shorten text to at most `max` characters, marking the cut with `…`
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

/// Colored, fixed-width label for a match type
pub fn match_type_badge(match_type: MatchType) -> String {
    let label = format!("{:<10}", match_type.as_str());
    match match_type {
        MatchType::Exact => label.green().bold().to_string(),
        MatchType::Partial => label.green().to_string(),
        MatchType::Ingredient => label.cyan().to_string(),
        MatchType::Tag => label.magenta().to_string(),
        MatchType::Fuzzy => label.yellow().to_string(),
    }
}

/// One line per scored recipe: rank, score, type, title and origin
pub fn format_scored(rank: usize, scored: &ScoredRecipe) -> String {
    let mut line = format!(
        "{:>3}. {:>5}  {}  {}",
        rank,
        scored.match_score.bold(),
        match_type_badge(scored.match_type),
        truncate(&scored.recipe.title, 60)
    );
    if !scored.recipe.source.is_empty() {
        line.push_str(&format!("  {}", format!("[{}]", scored.recipe.source).dimmed()));
    }
    line
}

/// Print a ranked list, with matched keywords underneath when asked
pub fn print_results(results: &[ScoredRecipe], show_keywords: bool) {
    for (i, scored) in results.iter().enumerate() {
        println!("{}", format_scored(i + 1, scored));
        if show_keywords && !scored.matched_keywords.is_empty() {
            println!("        {}", scored.matched_keywords.join(", ").dimmed());
        }
    }
}

/// Print search statistics as a short block
pub fn print_stats(stats: &SearchStats) {
    Status::header("Search statistics");
    println!("Results:        {}", stats.total);
    println!("Average score:  {:.1}", stats.average_score);
    println!("Exact match:    {}", yes_no(stats.has_exact_match));
    println!("Partial match:  {}", yes_no(stats.has_partial_match));
    for (match_type, count) in &stats.match_types {
        println!("  {}{}", match_type_badge(*match_type), count);
    }
}

fn yes_no(value: bool) -> String {
    if value {
        "yes".green().to_string()
    } else {
        "no".red().to_string()
    }
}
