// Colored terminal output for analysis results and the taxonomy table.
//
// All terminal-specific formatting lives here; main.rs delegates. JSON output
// bypasses this module entirely.

use colored::Colorize;

use crate::analyzer::{AnalysisResult, Topics};
use crate::sentiment::Sentiment;
use crate::topics::taxonomy::TopicTaxonomy;

/// Display one analysis result in the terminal.
pub fn display_result(result: &AnalysisResult) {
    if let Some(error) = &result.error {
        println!("{} {error}", "error:".red().bold());
        return;
    }

    match result.sentiment {
        Some(sentiment) => println!("  sentiment  {}", colorize_sentiment(sentiment)),
        None => println!("  sentiment  {}", "(not computed)".dimmed()),
    }

    match &result.topics {
        Some(Topics::Matched(names)) => println!("  topics     {}", names.join(", ")),
        Some(Topics::Unidentified) => {
            println!("  topics     {}", "unidentified".italic())
        }
        None => println!("  topics     {}", "(not computed)".dimmed()),
    }

    match result.urgent {
        Some(true) => println!("  urgency    {}", "!! URGENT".red().bold()),
        Some(false) => println!("  urgency    none"),
        None => println!("  urgency    {}", "(not computed)".dimmed()),
    }
}

/// Display the active topic table.
pub fn display_taxonomy(taxonomy: &TopicTaxonomy) {
    println!(
        "\n{}",
        format!("=== Topic taxonomy ({} topics) ===", taxonomy.entries.len()).bold()
    );
    for entry in &taxonomy.entries {
        println!("  {:<16} {}", entry.name.bold(), entry.triggers.join(", ").dimmed());
    }
    println!();
}

fn colorize_sentiment(sentiment: Sentiment) -> colored::ColoredString {
    match sentiment {
        Sentiment::Positive => sentiment.as_str().green(),
        Sentiment::Neutral => sentiment.as_str().yellow(),
        Sentiment::Negative => sentiment.as_str().red(),
    }
}
