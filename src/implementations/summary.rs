use std::fs;
use std::path::Path;

use crate::errors::{RunnerError, RunnerResult};
use crate::models::run::LitaniRun;

pub const REPORT_LINK_TEXT: &str = "Click here to see the CBMC proof report";

/// Where uploaded proof reports are served from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLocation {
    pub cloudfront_domain: String,
    pub s3_uri: String,
}

impl ReportLocation {
    fn base_url(&self) -> String {
        format!("https://{}/{}", self.cloudfront_domain, self.s3_uri)
    }

    pub fn index_url(&self) -> String {
        format!("{}/index.html", self.base_url())
    }

    pub fn proof_url(&self, proof: &str) -> String {
        format!("{}/artifacts/{}/report/html/index.html", self.base_url(), proof)
    }
}

pub fn load_run(path: &Path) -> RunnerResult<LitaniRun> {
    let run_file_error = |message: String| RunnerError::RunFile {
        path: path.to_path_buf(),
        message,
    };
    let contents = fs::read_to_string(path).map_err(|e| run_file_error(e.to_string()))?;
    serde_json::from_str(&contents).map_err(|e| run_file_error(e.to_string()))
}

/// `fail_ignored` becomes `Fail Ignored`
pub fn pretty_status(status: &str) -> String {
    let mut pretty = String::with_capacity(status.len());
    let mut word_start = true;
    for c in status.chars() {
        if c.is_alphabetic() {
            if word_start {
                pretty.extend(c.to_uppercase());
            } else {
                pretty.extend(c.to_lowercase());
            }
            word_start = false;
        } else {
            pretty.push(if c == '_' { ' ' } else { c });
            word_start = true;
        }
    }
    pretty
}

/// Status-count rows and proof-status rows, each starting with a header
pub fn summary_tables(
    run: &LitaniRun,
    location: Option<&ReportLocation>,
) -> (Vec<Vec<String>>, Vec<Vec<String>>) {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut proofs = vec![vec!["Proof".to_string(), "Status".to_string()]];
    if location.is_some() {
        proofs[0].push("CBMC proof report".to_string());
    }

    for pipeline in &run.pipelines {
        let status = pretty_status(&pipeline.status);
        match counts.iter_mut().find(|(s, _)| *s == status) {
            Some((_, count)) => *count += 1,
            None => counts.push((status.clone(), 1)),
        }

        let mut row = vec![pipeline.name.clone(), status];
        if let Some(location) = location {
            row.push(format!("[Details]({})", location.proof_url(&pipeline.name)));
        }
        proofs.push(row);
    }

    let mut statuses = vec![vec!["Status".to_string(), "Count".to_string()]];
    statuses.extend(
        counts
            .into_iter()
            .map(|(status, count)| vec![status, count.to_string()]),
    );
    (statuses, proofs)
}

/// Render rows as a GitHub-flavoured Markdown table.
///
/// The first row is the header. The result ends with a blank line.
pub fn render_table(rows: &[Vec<String>]) -> String {
    let Some(header) = rows.first() else {
        return String::new();
    };
    let mut widths: Vec<usize> = header.iter().map(|cell| cell.chars().count() + 1).collect();
    for row in &rows[1..] {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.chars().count() + 1);
        }
    }

    let mut table = String::new();
    for (idx, row) in rows.iter().enumerate() {
        if idx == 1 {
            for width in &widths {
                table.push('|');
                table.push_str(&"-".repeat(width + 1));
            }
            table.push_str("|\n");
        }
        for (cell, width) in row.iter().zip(&widths) {
            table.push_str("| ");
            table.push_str(cell);
            table.push_str(&" ".repeat(width - cell.chars().count()));
        }
        table.push_str("|\n");
    }
    table.push('\n');
    table
}

/// The complete Markdown summary of a run
pub fn render_summary(run: &LitaniRun, location: Option<&ReportLocation>) -> String {
    let mut out = String::new();
    if let Some(location) = location {
        out.push_str(&format!("## [{}]({})\n", REPORT_LINK_TEXT, location.index_url()));
    }
    out.push_str("## Summary of CBMC proof results\n");
    let (statuses, proofs) = summary_tables(run, location);
    for table in [statuses, proofs] {
        out.push_str(&render_table(&table));
        out.push('\n');
    }
    out
}
