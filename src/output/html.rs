//! HTML report output format.
//!
//! Generates a self-contained HTML page with inline styling, so the report can
//! be opened or shared without any other files.

use crate::model::{Severity, Vulnerability};
use crate::report::ReportPayload;

/// Generate the HTML report as a string
pub fn generate_html_string(payload: &ReportPayload) -> String {
    let summary = &payload.summary;
    let mut html = String::new();

    html.push_str(&format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        :root {{
            --bg-color: #f5f6fa;
            --card-bg: #ffffff;
            --text-color: #222;
            --text-muted: #6c757d;
            --border-color: #dee2e6;
            --critical: #a4161a;
            --high: #dc3545;
            --moderate: #fd7e14;
            --low: #ffc107;
            --info: #17a2b8;
            --accent: #343a40;
        }}
        * {{ box-sizing: border-box; margin: 0; padding: 0; }}
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: var(--bg-color);
            color: var(--text-color);
            line-height: 1.6;
            padding: 2rem;
        }}
        .container {{ max-width: 1200px; margin: 0 auto; }}
        header {{
            display: flex;
            justify-content: space-between;
            align-items: center;
            margin-bottom: 2rem;
            padding-bottom: 1rem;
            border-bottom: 1px solid var(--border-color);
        }}
        h1 {{ font-size: 1.75rem; font-weight: 600; }}
        .timestamp {{ color: var(--text-muted); font-size: 0.9rem; }}
        .stats {{
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
            gap: 1rem;
            margin-bottom: 2rem;
        }}
        .stat-card {{
            background: var(--card-bg);
            padding: 1.25rem;
            border-radius: 8px;
            border: 1px solid var(--border-color);
        }}
        .stat-value {{ font-size: 2rem; font-weight: 700; }}
        .stat-label {{ color: var(--text-muted); font-size: 0.85rem; }}
        .stat-critical .stat-value {{ color: var(--critical); }}
        .stat-high .stat-value {{ color: var(--high); }}
        .stat-moderate .stat-value {{ color: var(--moderate); }}
        .stat-low .stat-value {{ color: var(--low); }}
        .stat-info .stat-value {{ color: var(--info); }}
        section {{ margin-bottom: 2rem; }}
        h2 {{
            font-size: 1.25rem;
            margin-bottom: 1rem;
            padding-bottom: 0.5rem;
            border-bottom: 1px solid var(--border-color);
        }}
        table {{
            width: 100%;
            border-collapse: collapse;
            background: var(--card-bg);
            border-radius: 8px;
            overflow: hidden;
        }}
        th, td {{
            padding: 0.75rem 1rem;
            text-align: left;
            border-bottom: 1px solid var(--border-color);
        }}
        th {{ background: var(--accent); color: white; font-weight: 600; }}
        tr:hover {{ background: rgba(0,0,0,0.02); }}
        a {{ color: #0d6efd; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
        .severity {{ padding: 0.25rem 0.5rem; border-radius: 4px; font-size: 0.75rem; font-weight: 600; background: var(--text-muted); color: white; }}
        .severity-critical {{ background: var(--critical); }}
        .severity-high {{ background: var(--high); }}
        .severity-moderate {{ background: var(--moderate); }}
        .severity-low {{ background: var(--low); color: black; }}
        .severity-info {{ background: var(--info); }}
        .ids {{ font-family: monospace; font-size: 0.85rem; }}
        .empty {{ text-align: center; padding: 2rem; color: var(--text-muted); }}
        footer {{ text-align: center; color: var(--text-muted); font-size: 0.8rem; margin-top: 2rem; padding-top: 1rem; border-top: 1px solid var(--border-color); }}
    </style>
</head>
<body>
    <div class="container">
        <header>
            <h1>{title}</h1>
            <span class="timestamp">{date}</span>
        </header>
"#,
        title = html_escape(&payload.title),
        date = html_escape(&payload.date),
    ));

    html.push_str(&format!(
        r#"        <div class="stats">
            <div class="stat-card">
                <div class="stat-value">{}</div>
                <div class="stat-label">Vulnerabilities</div>
            </div>
            <div class="stat-card">
                <div class="stat-value">{}</div>
                <div class="stat-label">Vulnerable Dependencies</div>
            </div>
        </div>
        <div class="stats">
"#,
        summary.vulns_found, summary.vulnerable_dependencies
    ));

    for severity in Severity::ALL {
        html.push_str(&format!(
            r#"            <div class="stat-card stat-{}">
                <div class="stat-value">{}</div>
                <div class="stat-label">{}</div>
            </div>
"#,
            severity.as_str(),
            summary.count(severity),
            severity.display_name()
        ));
    }

    html.push_str("        </div>\n");

    html.push_str(
        r#"        <section>
            <h2>Vulnerabilities</h2>
"#,
    );

    if payload.vulnerabilities.is_empty() {
        html.push_str(
            r#"            <div class="empty">No vulnerabilities found</div>
"#,
        );
    } else {
        html.push_str(
            r#"            <table>
                <thead>
                    <tr>
                        <th>Severity</th>
                        <th>Package</th>
                        <th>Advisory</th>
                        <th>CWE / CVE</th>
                    </tr>
                </thead>
                <tbody>
"#,
        );

        for vuln in &payload.vulnerabilities {
            html.push_str(&vulnerability_row(vuln));
        }

        html.push_str(
            r#"                </tbody>
            </table>
"#,
        );
    }

    html.push_str("        </section>\n");

    html.push_str(&format!(
        r#"        <footer>
            Generated by auditreport on {}
        </footer>
    </div>
</body>
</html>
"#,
        html_escape(&payload.date)
    ));

    html
}

fn vulnerability_row(vuln: &Vulnerability) -> String {
    let severity_class = vuln
        .severity_level()
        .map(|s| format!("severity-{}", s.as_str()))
        .unwrap_or_default();

    let severity_label = if vuln.severity.is_empty() {
        "-".to_string()
    } else {
        html_escape(&vuln.severity.to_uppercase())
    };

    let advisory = match vuln.link.as_deref().filter(|l| !l.is_empty()) {
        Some(link) => format!(
            r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#,
            html_escape(link),
            html_escape(&vuln.name)
        ),
        None => html_escape(&vuln.name),
    };

    let ids = if vuln.cwes.is_empty() {
        "-".to_string()
    } else {
        html_escape(&vuln.cwes)
    };

    format!(
        r#"                    <tr>
                        <td><span class="severity {}">{}</span></td>
                        <td>{}</td>
                        <td>{}</td>
                        <td class="ids">{}</td>
                    </tr>
"#,
        severity_class,
        severity_label,
        html_escape(&vuln.package),
        advisory,
        ids
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::FixedClock;
    use chrono::NaiveDate;

    fn payload(vulns: Vec<Vulnerability>) -> ReportPayload {
        let clock = FixedClock(
            NaiveDate::from_ymd_opt(2024, 3, 7)
                .unwrap()
                .and_hms_opt(9, 5, 3)
                .unwrap(),
        );
        ReportPayload::assemble(vulns, Some("Shop <frontend>"), &clock)
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_empty_report() {
        let html = generate_html_string(&payload(Vec::new()));

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("No vulnerabilities found"));
        assert!(html.contains("07 of March, 2024 - 09:05:03"));
        assert!(!html.contains("<tbody>"));
    }

    #[test]
    fn test_title_is_escaped() {
        let html = generate_html_string(&payload(Vec::new()));
        assert!(html.contains("<title>Shop &lt;frontend&gt;</title>"));
        assert!(!html.contains("<frontend>"));
    }

    #[test]
    fn test_rows_in_payload_order() {
        let html = generate_html_string(&payload(vec![
            Vulnerability::new("Low first", "a", "low"),
            Vulnerability::new("Critical second", "b", "critical"),
        ]));

        let low = html.find("Low first").unwrap();
        let critical = html.find("Critical second").unwrap();
        assert!(low < critical);
        assert!(html.contains(r#"<span class="severity severity-critical">CRITICAL</span>"#));
    }

    #[test]
    fn test_link_and_ids() {
        let html = generate_html_string(&payload(vec![Vulnerability::new(
            "Prototype Pollution",
            "minimist",
            "high",
        )
        .with_link("https://github.com/advisories/GHSA-xvch-5gv4-984h")
        .with_cwes("CWE-1321, CVE-2021-44906")]));

        assert!(html.contains(
            r#"<a href="https://github.com/advisories/GHSA-xvch-5gv4-984h" target="_blank" rel="noopener">Prototype Pollution</a>"#
        ));
        assert!(html.contains("CWE-1321, CVE-2021-44906"));
    }

    #[test]
    fn test_unknown_severity_has_plain_badge() {
        let html = generate_html_string(&payload(vec![Vulnerability::new("Odd", "a", "urgent")]));
        assert!(html.contains(r#"<span class="severity ">URGENT</span>"#));
    }

    #[test]
    fn test_severity_cards() {
        let html = generate_html_string(&payload(vec![
            Vulnerability::new("A", "a", "moderate"),
            Vulnerability::new("B", "a", "moderate"),
        ]));

        assert!(html.contains(
            r#"<div class="stat-card stat-moderate">
                <div class="stat-value">2</div>"#
        ));
        assert!(html.contains("Vulnerable Dependencies"));
    }
}
