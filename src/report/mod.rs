//! Rendering of pipeline results as text or JSON.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::core::event::{Event, GeoPoint};
use crate::swarm::{PipelineOutput, Statistics, Summary};

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Earliest and latest origin time among a swarm's members
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SwarmReport<'a> {
    index: usize,
    count: usize,
    centroid: GeoPoint,
    statistics: Statistics,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_window: Option<TimeWindow>,
    members: &'a [Event],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    total_events: usize,
    relevant_events: usize,
    swarms_found: usize,
    swarms_remaining: usize,
    swarms: Vec<SwarmReport<'a>>,
}

impl<'a> Report<'a> {
    fn from_output(output: &'a PipelineOutput) -> Self {
        let swarms = output
            .swarms
            .iter()
            .enumerate()
            .map(|(index, annotated)| SwarmReport {
                index,
                count: annotated.swarm.len(),
                centroid: annotated.swarm.centroid,
                statistics: annotated.statistics,
                time_window: time_window(&annotated.swarm.members),
                members: &annotated.swarm.members,
            })
            .collect();

        Self {
            total_events: output.total_events,
            relevant_events: output.relevant_events,
            swarms_found: output.swarms_found,
            swarms_remaining: output.swarms.len(),
            swarms,
        }
    }
}

/// Time span covered by the events that carry an origin time
pub fn time_window(events: &[Event]) -> Option<TimeWindow> {
    let mut times = events.iter().filter_map(|e| e.time);
    let first = times.next()?;
    let (start, end) = times.fold((first, first), |(start, end), t| (start.min(t), end.max(t)));
    Some(TimeWindow { start, end })
}

/// Render `output` in the requested format
pub fn render(output: &PipelineOutput, format: ReportFormat, precision: usize) -> Result<String> {
    match format {
        ReportFormat::Text => render_text(output, precision),
        ReportFormat::Json => render_json(output),
    }
}

pub fn render_json(output: &PipelineOutput) -> Result<String> {
    serde_json::to_string_pretty(&Report::from_output(output)).context("Failed to serialize report")
}

pub fn render_text(output: &PipelineOutput, precision: usize) -> Result<String> {
    let report = Report::from_output(output);
    let mut out = String::new();

    writeln!(out, "Total events:     {}", report.total_events)?;
    writeln!(out, "Relevant events:  {}", report.relevant_events)?;
    writeln!(out, "Swarms found:     {}", report.swarms_found)?;
    writeln!(out, "Swarms remaining: {}", report.swarms_remaining)?;

    for swarm in &report.swarms {
        writeln!(out)?;
        writeln!(out, "Swarm {}: {} events", swarm.index, swarm.count)?;
        writeln!(
            out,
            "    Center:    {:.4}, {:.4}",
            swarm.centroid.latitude, swarm.centroid.longitude
        )?;
        writeln!(out, "    Depth:     {}", format_summary(&swarm.statistics.depth, precision, " km"))?;
        writeln!(out, "    Magnitude: {}", format_summary(&swarm.statistics.magnitude, precision, ""))?;
        writeln!(out, "    Distance:  {}", format_summary(&swarm.statistics.distance, precision, " km"))?;
        if let Some(window) = &swarm.time_window {
            writeln!(
                out,
                "    Window:    {} to {}",
                window.start.format("%Y-%m-%d %H:%M:%S UTC"),
                window.end.format("%Y-%m-%d %H:%M:%S UTC")
            )?;
        }
    }

    Ok(out)
}

fn format_summary(summary: &Summary, precision: usize, unit: &str) -> String {
    format!(
        "avg {:.*}{unit}, sd {:.*}{unit}",
        precision,
        summary.average,
        precision,
        summary.standard_deviation,
        unit = unit
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ClusteringConfig;
    use crate::swarm::SwarmPipeline;

    fn sample_output() -> PipelineOutput {
        let base = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        let events: Vec<Event> = (0..5)
            .map(|i| {
                Event::new(-122.8 + 0.01 * i as f64, 38.8, 2.0 + i as f64, 1.0)
                    .with_time(base + chrono::Duration::minutes(10 * i))
            })
            .collect();
        SwarmPipeline::new(ClusteringConfig::default())
            .unwrap()
            .run(&events)
            .unwrap()
    }

    #[test]
    fn test_text_report_lists_each_swarm() {
        let text = render(&sample_output(), ReportFormat::Text, 2).unwrap();
        assert!(text.contains("Total events:     5"));
        assert!(text.contains("Swarms remaining: 1"));
        assert!(text.contains("Swarm 0: 5 events"));
        assert!(text.contains("Depth:     avg 4.00 km"));
        assert!(text.contains("Magnitude: avg 1.00, sd 0.00"));
        assert!(text.contains("2023-11-14 22:13:20 UTC to 2023-11-14 22:53:20 UTC"));
    }

    #[test]
    fn test_json_report_shape() {
        let json = render(&sample_output(), ReportFormat::Json, 2).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["totalEvents"], 5);
        assert_eq!(value["swarms"][0]["count"], 5);
        assert_eq!(value["swarms"][0]["members"].as_array().unwrap().len(), 5);
        assert_eq!(value["swarms"][0]["statistics"]["depth"]["average"], 4.0);
        assert!(value["swarms"][0]["statistics"]["distance"]["standardDeviation"].is_number());
    }

    #[test]
    fn test_time_window_ignores_missing_times() {
        let t = DateTime::<Utc>::from_timestamp(1_000, 0).unwrap();
        let events = vec![
            Event::new(0.0, 0.0, 0.0, 0.0),
            Event::new(0.0, 0.0, 0.0, 0.0).with_time(t),
        ];
        assert_eq!(time_window(&events), Some(TimeWindow { start: t, end: t }));
        assert_eq!(time_window(&events[..1]), None);
    }

    #[test]
    fn test_format_parses_from_config_text() {
        #[derive(Deserialize)]
        struct Wrapper {
            format: ReportFormat,
        }
        let parsed: Wrapper = toml::from_str("format = \"json\"").unwrap();
        assert_eq!(parsed.format, ReportFormat::Json);
    }
}
