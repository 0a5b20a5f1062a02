use sharescan_core::{display_name, ViewModel};

pub const TOP_SITES: usize = 5;

/// Plain-text run summary printed to stdout once the reports are written.
pub fn format_summary(view: &ViewModel, top: usize) -> String {
    let stats = &view.statistics;
    let mut lines = vec![
        format!("Total sites analysed:     {}", stats.total_sites),
        format!("High risk (score 7+):     {}", stats.high_risk_sites),
        format!("Public sites:             {}", stats.public_sites),
        format!("Sites with anyone links:  {}", stats.anyone_link_sites),
        format!("Average score:            {:.1}", stats.average_score),
    ];

    let leaders = view.top_sites(top);
    if !leaders.is_empty() {
        lines.push(String::new());
        lines.push(format!("Top {} highest-risk sites:", leaders.len()));
        lines.extend(leaders.iter().enumerate().map(|(rank, site)| {
            format!(
                "  {}. [{}] {} ({})",
                rank + 1,
                site.score(),
                display_name(site),
                site.category.name
            )
        }));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
