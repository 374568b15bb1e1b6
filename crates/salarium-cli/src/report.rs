use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use salarium_core::aggregate::TermAggregate;
use salarium_core::runner::TermOutcome;
use salarium_core::source::SourceKind;

/// Output format for the final report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned per-source tables.
    Table,
    /// Flat rows, one per completed term.
    Csv,
    /// Full structure, issues included.
    Json,
}

const HEADERS: [&str; 4] = ["Term", "Found", "Processed", "Average salary"];

/// Survey results for every provider, ready to print.
pub struct Report {
    city: String,
    sections: Vec<Section>,
}

struct Section {
    source: SourceKind,
    rows: Vec<(String, TermOutcome)>,
}

impl Report {
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            sections: Vec::new(),
        }
    }

    /// Append one provider's outcomes. `terms` and `outcomes` are parallel,
    /// in batch input order.
    pub fn with_section(
        mut self,
        source: SourceKind,
        terms: &[String],
        outcomes: Vec<TermOutcome>,
    ) -> Self {
        let rows = terms.iter().cloned().zip(outcomes).collect();
        self.sections.push(Section { source, rows });
        self
    }

    pub fn render<W: Write>(&self, format: OutputFormat, writer: &mut W) -> Result<()> {
        match format {
            OutputFormat::Table => self.render_table(writer),
            OutputFormat::Csv => self.render_csv(writer),
            OutputFormat::Json => self.render_json(writer),
        }
    }

    fn render_table<W: Write>(&self, writer: &mut W) -> Result<()> {
        for (index, section) in self.sections.iter().enumerate() {
            if index > 0 {
                writeln!(writer)?;
            }
            section.render_table(&self.city, writer)?;
        }
        Ok(())
    }

    fn render_csv<W: Write>(&self, writer: &mut W) -> Result<()> {
        let mut rows = csv::Writer::from_writer(writer.by_ref());
        rows.write_record(["source", "term", "found", "processed", "average_salary"])?;
        for section in &self.sections {
            for (term, outcome) in &section.rows {
                if let Some(aggregate) = outcome.as_aggregate() {
                    let found = aggregate.found.to_string();
                    let processed = aggregate.processed.to_string();
                    let average = aggregate.average_salary.to_string();
                    rows.write_record([
                        section.source.label(),
                        term.as_str(),
                        found.as_str(),
                        processed.as_str(),
                        average.as_str(),
                    ])?;
                }
            }
        }
        rows.flush()?;
        Ok(())
    }

    fn render_json<W: Write>(&self, writer: &mut W) -> Result<()> {
        let report = JsonReport {
            city: &self.city,
            sources: self
                .sections
                .iter()
                .map(|section| JsonSection {
                    source: section.source.label(),
                    results: section
                        .rows
                        .iter()
                        .filter_map(|(_, outcome)| outcome.as_aggregate())
                        .collect(),
                    issues: section
                        .rows
                        .iter()
                        .filter_map(|(term, outcome)| json_issue(term, outcome))
                        .collect(),
                })
                .collect(),
        };

        serde_json::to_writer_pretty(writer.by_ref(), &report)?;
        writeln!(writer)?;
        Ok(())
    }
}

impl Section {
    fn render_table<W: Write>(&self, city: &str, writer: &mut W) -> Result<()> {
        let completed: Vec<(&str, &TermAggregate)> = self
            .rows
            .iter()
            .filter_map(|(term, outcome)| {
                outcome.as_aggregate().map(|aggregate| (term.as_str(), aggregate))
            })
            .collect();

        let term_width = column_width(HEADERS[0], completed.iter().map(|(term, _)| term.len()));
        let found_width = column_width(HEADERS[1], completed.iter().map(|(_, a)| digits(a.found)));
        let processed_width =
            column_width(HEADERS[2], completed.iter().map(|(_, a)| digits(a.processed)));
        let average_width = column_width(
            HEADERS[3],
            completed.iter().map(|(_, a)| digits(a.average_salary)),
        );

        writeln!(writer, "{} {}", self.source, city)?;
        writeln!(
            writer,
            "{:<term_width$}  {:>found_width$}  {:>processed_width$}  {:>average_width$}",
            HEADERS[0], HEADERS[1], HEADERS[2], HEADERS[3]
        )?;
        for (term, aggregate) in &completed {
            writeln!(
                writer,
                "{term:<term_width$}  {:>found_width$}  {:>processed_width$}  {:>average_width$}",
                aggregate.found, aggregate.processed, aggregate.average_salary
            )?;
        }

        let issues: Vec<String> = self
            .rows
            .iter()
            .filter_map(|(term, outcome)| issue_line(term, outcome))
            .collect();
        if !issues.is_empty() {
            writeln!(writer)?;
            for issue in &issues {
                writeln!(writer, "  {issue}")?;
            }
        }

        Ok(())
    }
}

fn issue_line(term: &str, outcome: &TermOutcome) -> Option<String> {
    match outcome {
        TermOutcome::Complete(_) => None,
        TermOutcome::Captcha(challenge) => Some(format!(
            "{term}: verification required at {}",
            challenge.action_url()
        )),
        TermOutcome::Failed(error) => Some(format!("{term}: {error}")),
        TermOutcome::Cancelled => Some(format!("{term}: cancelled")),
    }
}

fn digits(value: u64) -> usize {
    value.to_string().len()
}

fn column_width(header: &str, values: impl Iterator<Item = usize>) -> usize {
    values.chain([header.len()]).max().unwrap_or(header.len())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    city: &'a str,
    sources: Vec<JsonSection<'a>>,
}

#[derive(Serialize)]
struct JsonSection<'a> {
    source: &'static str,
    results: Vec<&'a TermAggregate>,
    issues: Vec<JsonIssue<'a>>,
}

#[derive(Serialize)]
struct JsonIssue<'a> {
    term: &'a str,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

fn json_issue<'a>(term: &'a str, outcome: &TermOutcome) -> Option<JsonIssue<'a>> {
    match outcome {
        TermOutcome::Complete(_) => None,
        TermOutcome::Captcha(challenge) => Some(JsonIssue {
            term,
            kind: "captcha",
            detail: Some(challenge.action_url().to_string()),
        }),
        TermOutcome::Failed(error) => Some(JsonIssue {
            term,
            kind: "failed",
            detail: Some(error.to_string()),
        }),
        TermOutcome::Cancelled => Some(JsonIssue {
            term,
            kind: "cancelled",
            detail: None,
        }),
    }
}
