// Colored terminal output for verdicts and publication decisions.
//
// main.rs display code delegates here.

use colored::Colorize;

use crate::moderation::{TrustTag, Verdict};
use crate::publication::PublicationDecision;

/// Display a single verdict.
pub fn display_verdict(text: &str, verdict: &Verdict) {
    println!("\n{}", "=== Moderation Verdict ===".bold());
    println!("  Text: {}", super::truncate_chars(text, 120).dimmed());
    println!(
        "  Trust score: {}/100  {}",
        verdict.trust_score(),
        colorize_tag(verdict.trust_tag())
    );
    println!("  Explanation: {}", verdict.explanation());
}

/// Display the gate outcome for a submission.
pub fn display_decision(decision: &PublicationDecision) {
    println!("\n{}", "=== Publication Decision ===".bold());

    if let Some(message) = decision.rejection_message() {
        println!("  {} {}", "REJECTED".red().bold(), message);
        return;
    }

    let verified = if decision.verified {
        "verified".green().bold().to_string()
    } else {
        "not verified".normal().to_string()
    };
    println!(
        "  {} score {}/100 {} ({})",
        "ACCEPTED".green().bold(),
        decision.trust_score,
        colorize_tag(decision.trust_tag),
        verified
    );
    println!("  Explanation: {}", decision.explanation);
}

/// Colorize a trust tag.
fn colorize_tag(tag: TrustTag) -> colored::ColoredString {
    let label = format!("{} {}", tag.symbol(), tag.as_str());
    match tag {
        TrustTag::Safe => label.green(),
        TrustTag::Caution => label.yellow(),
        TrustTag::Unsafe => label.red().bold(),
    }
}
