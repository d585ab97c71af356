use crate::model::Severity;
use crate::report::ReportPayload;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct SeverityRow {
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Count")]
    count: usize,
}

pub fn format_summary_table(payload: &ReportPayload) -> String {
    let summary = &payload.summary;

    let rows: Vec<SeverityRow> = Severity::ALL
        .iter()
        .map(|s| SeverityRow {
            severity: s.display_name().to_string(),
            count: summary.count(*s),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();

    format!(
        "{}\nFound {} vulnerabilities in {} dependencies.\n{}",
        payload.title, summary.vulns_found, summary.vulnerable_dependencies, table
    )
}

pub fn print_summary_table(payload: &ReportPayload) {
    println!();
    println!("{}", format_summary_table(payload));
}
