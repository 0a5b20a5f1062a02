//! Self-contained HTML report.
//!
//! The page works offline: styles and script are inlined, and the view model
//! is embedded as JSON so sorting, filtering and downloads run in the browser.
//! The table is also rendered server-side so the report reads without script.

use anyhow::Result;
use sharescan_core::{
    display_name, display_privacy, ClassifiedSite, ScoringConfig, SourceInfo, Statistics,
    ViewModel, REASON_SEPARATOR,
};

pub fn render_report(view: &ViewModel, source: &SourceInfo) -> Result<String> {
    let data = embed_json(&serde_json::to_string(view)?);

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Site Access Risk Report - {title}</title>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        {header}
        {summary}
        {distribution}
        {config}
        {table}
    </div>
    <script id="report-data" type="application/json">{data}</script>
    <script>{js}</script>
</body>
</html>"#,
        title = escape(&source.file_name),
        css = inline_css(),
        js = inline_javascript(),
        header = render_header(source),
        summary = render_summary(&view.statistics),
        distribution = render_distribution(&view.statistics),
        config = render_config(&view.scoring_config),
        table = render_sites_table(&view.sites),
        data = data,
    ))
}

/// `<` only ever occurs inside JSON strings, where `\u003c` decodes to the same text.
fn embed_json(json: &str) -> String {
    json.replace('<', "\\u003c")
}

pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn render_header(source: &SourceInfo) -> String {
    format!(
        r#"<header>
            <h1>Site Access Risk Report</h1>
            <div class="meta">Source: {name} &middot; {size} bytes &middot; SHA-256 <code title="{digest}">{short}</code></div>
        </header>"#,
        name = escape(&source.file_name),
        size = source.size_bytes,
        digest = source.sha256,
        short = source.short_digest(),
    )
}

fn summary_card(label: &str, value: impl std::fmt::Display, class: &str) -> String {
    format!(
        r#"<div class="summary-card {class}"><h3>{label}</h3><div class="value">{value}</div></div>"#
    )
}

fn render_summary(stats: &Statistics) -> String {
    let cards = [
        summary_card("Total Sites", stats.total_sites, ""),
        summary_card("High Risk (7+)", stats.high_risk_sites, "danger"),
        summary_card("Public Sites", stats.public_sites, "warning"),
        summary_card("With Anyone Links", stats.anyone_link_sites, "warning"),
        summary_card("Average Score", format!("{:.1}", stats.average_score), ""),
        summary_card("Max Score", stats.max_score, ""),
    ];
    format!(r#"<section class="summary">{}</section>"#, cards.join(""))
}

fn render_distribution(stats: &Statistics) -> String {
    let share = |count: usize| {
        if stats.total_sites == 0 {
            0.0
        } else {
            count as f64 * 100.0 / stats.total_sites as f64
        }
    };
    let bar: String = stats
        .category_counts
        .iter()
        .filter(|entry| entry.count > 0)
        .map(|entry| {
            format!(
                r#"<div class="segment" style="width:{share:.2}%;background:{color}" title="{name}: {count}"></div>"#,
                share = share(entry.count),
                color = escape(&entry.color),
                name = escape(&entry.name),
                count = entry.count,
            )
        })
        .collect();
    let legend: String = stats
        .category_counts
        .iter()
        .map(|entry| {
            format!(
                r#"<span class="legend-item"><span class="swatch" style="background:{color}"></span>{name}: {count}</span>"#,
                color = escape(&entry.color),
                name = escape(&entry.name),
                count = entry.count,
            )
        })
        .collect();
    format!(
        r#"<section class="section">
            <h2>Risk Distribution</h2>
            <div class="distribution">{bar}</div>
            <div class="legend">{legend}</div>
        </section>"#
    )
}

fn render_config(config: &ScoringConfig) -> String {
    let rows = [
        ("Public site", config.public_site().to_string()),
        ("EEEU permissions", config.eeeu_permissions().to_string()),
        ("Everyone permissions", config.everyone_permissions().to_string()),
        ("Anyone links", config.anyone_links().to_string()),
        ("No sensitivity label", config.no_sensitivity_label().to_string()),
        ("High user count", config.high_user_count().to_string()),
        ("User count threshold", config.user_count_threshold().to_string()),
    ];
    let body: String = rows
        .iter()
        .map(|(label, value)| format!("<tr><td>{label}</td><td>{value}</td></tr>"))
        .collect();
    let note = if config.is_default() {
        "Default weights"
    } else {
        "Custom weights"
    };
    format!(
        r#"<section class="section">
            <h2>Scoring Configuration <span class="badge">{note}</span></h2>
            <table class="config"><thead><tr><th>Factor</th><th>Weight</th></tr></thead><tbody>{body}</tbody></table>
        </section>"#
    )
}

fn render_site_row(site: &ClassifiedSite) -> String {
    let record = site.record();
    format!(
        r#"<tr><td class="num">{score}</td><td><span class="badge" style="background:{color}">{category}</span></td><td>{name}</td><td><a href="{url}">{url}</a></td><td>{privacy}</td><td class="num">{users}</td><td class="num">{anyone}</td><td class="num">{eeeu}</td><td class="num">{everyone}</td><td>{reasons}</td></tr>"#,
        score = site.score(),
        color = escape(&site.category.color),
        category = escape(&site.category.name),
        name = escape(display_name(site)),
        url = escape(&record.identity.url),
        privacy = escape(display_privacy(site)),
        users = record.user_count,
        anyone = record.anyone_link_count,
        eeeu = record.eeeu_count,
        everyone = record.everyone_count,
        reasons = escape(&site.scored.reasons.join(REASON_SEPARATOR)),
    )
}

fn render_sites_table(sites: &[ClassifiedSite]) -> String {
    let body: String = sites.iter().map(render_site_row).collect();
    format!(
        r#"<section class="section">
            <h2>Sites</h2>
            <div class="controls">
                <input id="filter-text" type="search" placeholder="Filter by name, URL or factor">
                <select id="filter-category"><option value="">All categories</option></select>
                <button id="export-json">Export JSON</button>
                <button id="export-csv">Export CSV</button>
            </div>
            <table id="sites">
                <thead><tr>
                    <th data-key="Score">Score</th><th data-key="Risk Level">Risk Level</th>
                    <th data-key="Site Name">Site Name</th><th data-key="URL">URL</th>
                    <th data-key="Privacy">Privacy</th><th data-key="Users">Users</th>
                    <th data-key="Anyone Links">Anyone Links</th><th data-key="EEEU">EEEU</th>
                    <th data-key="Everyone">Everyone</th><th data-key="Risk Factors">Risk Factors</th>
                </tr></thead>
                <tbody>{body}</tbody>
            </table>
        </section>"#
    )
}

fn inline_css() -> &'static str {
    r#"
* { box-sizing: border-box; margin: 0; padding: 0; }
body { font-family: system-ui, -apple-system, 'Segoe UI', sans-serif; line-height: 1.5; color: #1f2937; background: #fff; }
.container { max-width: 1400px; margin: 0 auto; padding: 2rem; }
header { margin-bottom: 2rem; padding-bottom: 1rem; border-bottom: 2px solid #e5e7eb; }
header h1 { font-size: 2rem; }
header .meta { color: #6b7280; font-size: 0.875rem; }
.summary { display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 1rem; margin-bottom: 2rem; }
.summary-card { background: #f9fafb; padding: 1rem; border-radius: 0.5rem; border-left: 4px solid #3b82f6; }
.summary-card.danger { border-left-color: #c62828; }
.summary-card.warning { border-left-color: #ef6c00; }
.summary-card h3 { font-size: 0.8rem; color: #6b7280; }
.summary-card .value { font-size: 1.5rem; font-weight: 700; }
.section { margin-bottom: 2rem; }
.section h2 { font-size: 1.25rem; margin-bottom: 0.75rem; }
.distribution { display: flex; height: 1.5rem; border-radius: 0.25rem; overflow: hidden; background: #f3f4f6; }
.legend { margin-top: 0.5rem; font-size: 0.875rem; }
.legend-item { margin-right: 1rem; }
.swatch { display: inline-block; width: 0.75rem; height: 0.75rem; margin-right: 0.3rem; border-radius: 2px; }
.badge { display: inline-block; padding: 0.1rem 0.5rem; border-radius: 999px; font-size: 0.75rem; color: #fff; background: #6b7280; }
.controls { display: flex; gap: 0.5rem; margin-bottom: 0.75rem; flex-wrap: wrap; }
.controls input { flex: 1; min-width: 240px; padding: 0.4rem; }
table { width: 100%; border-collapse: collapse; font-size: 0.875rem; }
th, td { padding: 0.4rem 0.6rem; border-bottom: 1px solid #e5e7eb; text-align: left; vertical-align: top; }
#sites th { cursor: pointer; background: #f9fafb; position: sticky; top: 0; }
td.num { text-align: right; font-variant-numeric: tabular-nums; }
table.config { max-width: 420px; }
"#
}

fn inline_javascript() -> &'static str {
    r#"
(function () {
    const view = JSON.parse(document.getElementById('report-data').textContent);
    const rows = view.sites.map(function (site) {
        return {
            'Score': site.score,
            'Risk Level': site.category.name,
            'Site Name': site.name && site.name.trim() ? site.name : 'Unnamed Site',
            'URL': site.url,
            'Privacy': site.privacy ? site.privacy : 'Not Set',
            'Users': site.userCount,
            'Anyone Links': site.anyoneLinkCount,
            'EEEU': site.eeeuCount,
            'Everyone': site.everyoneCount,
            'Risk Factors': site.reasons.join('; '),
            color: site.category.color
        };
    });
    const columns = ['Score', 'Risk Level', 'Site Name', 'URL', 'Privacy', 'Users', 'Anyone Links', 'EEEU', 'Everyone', 'Risk Factors'];
    const tbody = document.querySelector('#sites tbody');
    const text = document.getElementById('filter-text');
    const category = document.getElementById('filter-category');
    let visible = rows.slice();
    let sortKey = null;
    let ascending = false;

    view.statistics.categoryCounts.forEach(function (entry) {
        const option = document.createElement('option');
        option.value = entry.name;
        option.textContent = entry.name + ' (' + entry.count + ')';
        category.appendChild(option);
    });

    function cell(value, numeric) {
        const td = document.createElement('td');
        td.textContent = value;
        if (numeric) td.className = 'num';
        return td;
    }

    function render() {
        tbody.textContent = '';
        visible.forEach(function (row) {
            const tr = document.createElement('tr');
            tr.appendChild(cell(row['Score'], true));
            const badge = document.createElement('span');
            badge.className = 'badge';
            badge.style.background = row.color;
            badge.textContent = row['Risk Level'];
            const level = document.createElement('td');
            level.appendChild(badge);
            tr.appendChild(level);
            tr.appendChild(cell(row['Site Name']));
            const link = document.createElement('a');
            link.href = row['URL'];
            link.textContent = row['URL'];
            const url = document.createElement('td');
            url.appendChild(link);
            tr.appendChild(url);
            tr.appendChild(cell(row['Privacy']));
            ['Users', 'Anyone Links', 'EEEU', 'Everyone'].forEach(function (key) {
                tr.appendChild(cell(row[key], true));
            });
            tr.appendChild(cell(row['Risk Factors']));
            tbody.appendChild(tr);
        });
    }

    function apply() {
        const needle = text.value.trim().toLowerCase();
        visible = rows.filter(function (row) {
            if (category.value && row['Risk Level'] !== category.value) return false;
            if (!needle) return true;
            return (row['Site Name'] + ' ' + row['URL'] + ' ' + row['Risk Factors']).toLowerCase().indexOf(needle) !== -1;
        });
        if (sortKey) {
            visible.sort(function (a, b) {
                const x = a[sortKey], y = b[sortKey];
                const order = typeof x === 'number' ? x - y : String(x).localeCompare(String(y));
                return ascending ? order : -order;
            });
        }
        render();
    }

    document.querySelectorAll('#sites th').forEach(function (th) {
        th.addEventListener('click', function () {
            const key = th.getAttribute('data-key');
            ascending = sortKey === key ? !ascending : false;
            sortKey = key;
            apply();
        });
    });
    text.addEventListener('input', apply);
    category.addEventListener('change', apply);

    function download(name, type, content) {
        const blob = new Blob([content], { type: type });
        const a = document.createElement('a');
        a.href = URL.createObjectURL(blob);
        a.download = name;
        a.click();
        URL.revokeObjectURL(a.href);
    }

    function exportable() {
        return visible.map(function (row) {
            const out = {};
            columns.forEach(function (key) { out[key] = row[key]; });
            return out;
        });
    }

    document.getElementById('export-json').addEventListener('click', function () {
        download('site-risk.json', 'application/json', JSON.stringify(exportable(), null, 2));
    });
    document.getElementById('export-csv').addEventListener('click', function () {
        const quote = function (value) {
            const s = String(value);
            return /[",\n]/.test(s) ? '"' + s.replace(/"/g, '""') + '"' : s;
        };
        const lines = [columns.join(',')].concat(exportable().map(function (row) {
            return columns.map(function (key) { return quote(row[key]); }).join(',');
        }));
        download('site-risk.csv', 'text/csv', lines.join('\n') + '\n');
    });
})();
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sharescan_core::{run_analysis, RawRow, RiskCategoryTable};

    fn view_for(name: &str) -> ViewModel {
        let row: RawRow = match json!({
            "Site name": name,
            "URL": "https://contoso.sharepoint.com/sites/x",
            "Privacy": "Public",
            "Number of users having access": "900",
        }) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        run_analysis(
            &[row],
            &ScoringConfig::default(),
            &RiskCategoryTable::reference(),
        )
        .unwrap()
        .view
    }

    fn source() -> SourceInfo {
        SourceInfo::from_bytes("sites.csv", b"data")
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
    }

    #[test]
    fn report_contains_rows_summary_and_config() {
        let html = render_report(&view_for("Finance"), &source()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<td>Finance</td>"));
        let reasons =
            "Public site; No sensitivity label; High user count (900 users, threshold 500)";
        assert!(html.contains(reasons));
        assert!(html.contains("Default weights"));
        assert!(html.contains(r#"<h3>Total Sites</h3><div class="value">1</div>"#));
        assert!(html.contains(&source().short_digest().to_string()));
    }

    #[test]
    fn site_names_cannot_break_out_of_markup() {
        let html = render_report(&view_for("</script><b>x</b>"), &source()).unwrap();
        assert!(!html.contains("</script><b>"));
        assert!(html.contains("&lt;/script&gt;&lt;b&gt;x&lt;/b&gt;"));
        assert!(html.contains("\\u003c/script>\\u003cb>x\\u003c/b>"));
    }

    #[test]
    fn embedded_data_round_trips() {
        let view = view_for("Finance");
        let html = render_report(&view, &source()).unwrap();
        let start = html.find(r#"type="application/json">"#).unwrap() + 24;
        let end = start + html[start..].find("</script>").unwrap();
        let decoded: ViewModel = serde_json::from_str(&html[start..end]).unwrap();
        assert_eq!(decoded, view);
    }

    #[test]
    fn distribution_shows_only_occupied_segments() {
        let html = render_distribution(&view_for("Finance").statistics);
        assert_eq!(html.matches(r#"class="segment""#).count(), 1);
        assert!(html.contains(r#"style="width:100.00%;background:"#));
        assert_eq!(html.matches(r#"class="legend-item""#).count(), 5);
        assert!(html.contains("</span>No Risk: 0</span>"));
    }

    #[test]
    fn empty_distribution_keeps_legend() {
        let stats = Statistics::empty(&RiskCategoryTable::reference());
        let html = render_distribution(&stats);
        assert!(!html.contains(r#"class="segment""#));
        assert!(html.contains("</span>Critical: 0</span>"));
    }

    #[test]
    fn unnamed_sites_use_fallback_label() {
        let html = render_report(&view_for(""), &source()).unwrap();
        assert!(html.contains("<td>Unnamed Site</td>"));
    }
}
