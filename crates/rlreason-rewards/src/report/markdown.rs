//! Markdown report generation

use super::RewardReport;

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Generate a Markdown report
    pub fn generate(report: &RewardReport) -> String {
        let mut md = String::new();

        md.push_str("# Reward Report\n\n");

        // Summary
        md.push_str("## Summary\n\n");
        md.push_str("| Function | Mean | Hits | Rate |\n");
        md.push_str("|----------|------|------|------|\n");
        for function in &report.functions {
            md.push_str(&format!(
                "| {} | {:.4} | {}/{} | {:.1}% |\n",
                function.name,
                function.mean,
                function.hits,
                report.candidates,
                function.hit_rate() * 100.0
            ));
        }
        md.push_str(&format!("\n**Mean total reward**: {:.4}\n\n", report.mean_total));

        // Candidates
        md.push_str("## Candidates\n\n");
        md.push_str("| # |");
        for function in &report.functions {
            md.push_str(&format!(" {} |", function.name));
        }
        md.push_str(" Total |\n|---|");
        for _ in &report.functions {
            md.push_str("---|");
        }
        md.push_str("---|\n");

        for (index, total) in report.totals.iter().enumerate() {
            md.push_str(&format!("| {} |", index));
            for function in &report.functions {
                match function.rewards.get(index) {
                    Some(reward) => md.push_str(&format!(" {} |", reward)),
                    None => md.push_str(" - |"),
                }
            }
            md.push_str(&format!(" {} |\n", total));
        }

        md
    }
}
