//! End-to-end clustering: validate, filter, build, cull, annotate.

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use crate::core::config::ClusteringConfig;
use crate::core::error::SwarmError;
use crate::core::event::Event;
use crate::feed::EventSource;

use super::builder::SwarmBuilder;
use super::cull::cull;
use super::filter::relevant_indices;
use super::statistics::{annotate, AnnotatedSwarm};

/// Everything a reporter needs about one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOutput {
    /// Events handed to the pipeline
    pub total_events: usize,

    /// Events that survived the proximity filter
    pub relevant_events: usize,

    /// Swarms built before culling
    pub swarms_found: usize,

    /// Surviving swarms with statistics
    pub swarms: Vec<AnnotatedSwarm>,
}

/// The clustering pipeline for one set of parameters
#[derive(Debug, Clone)]
pub struct SwarmPipeline {
    config: ClusteringConfig,
    builder: SwarmBuilder,
}

impl SwarmPipeline {
    /// Create a pipeline, rejecting unusable parameters up front
    pub fn new(config: ClusteringConfig) -> Result<Self, SwarmError> {
        config.validate()?;
        let builder = SwarmBuilder::from_config(&config);
        Ok(Self { config, builder })
    }

    /// Run every stage over `events`
    pub fn run(&self, events: &[Event]) -> Result<PipelineOutput, SwarmError> {
        for (index, event) in events.iter().enumerate() {
            event.validate(index)?;
        }

        let kept = relevant_indices(events, self.config.search_distance_km);
        let relevant: Vec<Event> = kept.iter().map(|&i| events[i].clone()).collect();

        // Report the seed by its position in the caller's input
        let swarms = self.builder.build(&relevant).map_err(|e| match e {
            SwarmError::NonConvergence {
                seed_index,
                iterations,
            } => SwarmError::NonConvergence {
                seed_index: kept[seed_index],
                iterations,
            },
            other => other,
        })?;
        let swarms_found = swarms.len();
        let survivors = cull(swarms, self.config.min_swarm_size);

        Ok(PipelineOutput {
            total_events: events.len(),
            relevant_events: relevant.len(),
            swarms_found,
            swarms: annotate(survivors),
        })
    }
}

/// Load events from `source` and cluster them
pub fn detect_swarms(source: &dyn EventSource, config: &ClusteringConfig) -> Result<PipelineOutput> {
    let pipeline = SwarmPipeline::new(config.clone())?;

    info!("Loading events from {}", source.describe());
    let events = source
        .load_events()
        .with_context(|| format!("Failed to load events from {}", source.describe()))?;

    info!("Finding swarms");
    let output = pipeline
        .run(&events)
        .context("Failed to cluster events")?;

    Ok(output)
}
