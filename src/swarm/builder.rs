//! Centroid relaxation that partitions events into disjoint swarms.
//!
//! Each outer step seeds a centroid at the first event of the working pool and
//! repeatedly:
//! 1. splits the *whole* working pool into members (closer than the search
//!    radius to the centroid) and a remainder,
//! 2. moves the centroid to the mean location of the members,
//! until the centroid stops moving. The members become a swarm and the
//! remainder becomes the next working pool.

use log::{debug, info, warn};
use serde::Serialize;

use crate::core::config::ClusteringConfig;
use crate::core::error::SwarmError;
use crate::core::event::{Event, GeoPoint};

/// A group of events clustered around a converged centroid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Swarm {
    /// Centroid the final membership pass was measured against
    pub centroid: GeoPoint,

    /// Member events, in input order
    pub members: Vec<Event>,

    /// Positions of the members in the slice given to the builder
    #[serde(skip)]
    pub member_indices: Vec<usize>,

    /// Relaxation passes needed to converge
    #[serde(skip)]
    pub iterations: usize,
}

impl Swarm {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Every event handed to [`SwarmBuilder::partition`] ends up in exactly one
/// swarm or among the discarded seeds
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Partition {
    /// Swarms in the order they were seeded
    pub swarms: Vec<Swarm>,

    /// Seeds that no candidate swarm held on to
    pub discarded: Vec<usize>,
}

/// Outcome of relaxing one working pool
#[derive(Debug)]
enum Relaxation {
    /// The centroid stabilized around a non-empty set of members
    Converged { swarm: Swarm, remainder: Vec<usize> },
    /// No event stayed within range of the moving centroid
    Discarded { seed_index: usize, remainder: Vec<usize> },
}

/// Partitions events into swarms by centroid relaxation
#[derive(Debug, Clone)]
pub struct SwarmBuilder {
    radius_km: f64,
    epsilon_deg: f64,
    max_iterations: usize,
}

impl SwarmBuilder {
    pub fn new(radius_km: f64, epsilon_deg: f64, max_iterations: usize) -> Self {
        Self {
            radius_km,
            epsilon_deg,
            max_iterations,
        }
    }

    pub fn from_config(config: &ClusteringConfig) -> Self {
        Self::new(
            config.search_distance_km,
            config.convergence_epsilon_deg,
            config.max_iterations,
        )
    }

    /// Partition `events` into swarms, in the order they were seeded
    pub fn build(&self, events: &[Event]) -> Result<Vec<Swarm>, SwarmError> {
        Ok(self.partition(events)?.swarms)
    }

    /// Like [`build`](Self::build), also reporting discarded seeds
    pub fn partition(&self, events: &[Event]) -> Result<Partition, SwarmError> {
        let mut working: Vec<usize> = (0..events.len()).collect();
        let mut swarms = Vec::new();
        let mut discarded = Vec::new();

        while let Some(&seed_index) = working.first() {
            match self.relax(events, seed_index, &working)? {
                Relaxation::Converged { swarm, remainder } => {
                    info!(
                        "Swarm {}: {} events after {} relaxation passes",
                        swarms.len(),
                        swarm.len(),
                        swarm.iterations
                    );
                    swarms.push(swarm);
                    working = remainder;
                }
                Relaxation::Discarded {
                    seed_index,
                    remainder,
                } => {
                    warn!(
                        "No coherent swarm around seed event {}, discarding it",
                        seed_index
                    );
                    discarded.push(seed_index);
                    working = remainder;
                }
            }
        }

        info!("Found {} swarms", swarms.len());
        Ok(Partition { swarms, discarded })
    }

    fn relax(
        &self,
        events: &[Event],
        seed_index: usize,
        pool: &[usize],
    ) -> Result<Relaxation, SwarmError> {
        let mut centroid = events[seed_index].location();

        for pass in 1..=self.max_iterations {
            let (members, remainder): (Vec<usize>, Vec<usize>) =
                pool.iter().copied().partition(|&i| {
                    let distance = events[i].location().distance_to(&centroid);
                    distance < self.radius_km
                });

            if members.is_empty() {
                let remainder = remainder.into_iter().filter(|&i| i != seed_index).collect();
                return Ok(Relaxation::Discarded {
                    seed_index,
                    remainder,
                });
            }

            let next = mean_location(events, &members);
            if self.has_converged(centroid, next) {
                for &i in &members {
                    debug!(
                        "    event {} is {:.2} km from the swarm center",
                        i,
                        events[i].location().distance_to(&centroid)
                    );
                }
                let swarm = Swarm {
                    centroid,
                    members: members.iter().map(|&i| events[i].clone()).collect(),
                    member_indices: members,
                    iterations: pass,
                };
                return Ok(Relaxation::Converged { swarm, remainder });
            }

            debug!("  centroid moved, recalculating x{}", pass);
            centroid = next;
        }

        Err(SwarmError::NonConvergence {
            seed_index,
            iterations: self.max_iterations,
        })
    }

    fn has_converged(&self, previous: GeoPoint, next: GeoPoint) -> bool {
        (previous.latitude - next.latitude).abs() <= self.epsilon_deg
            && (previous.longitude - next.longitude).abs() <= self.epsilon_deg
    }
}

/// Partition `events` into swarms using the clustering parameters in `config`
pub fn build_swarms(events: &[Event], config: &ClusteringConfig) -> Result<Vec<Swarm>, SwarmError> {
    SwarmBuilder::from_config(config).build(events)
}

fn mean_location(events: &[Event], members: &[usize]) -> GeoPoint {
    let (lat_sum, lon_sum) = members.iter().fold((0.0, 0.0), |(lat, lon), &i| {
        (lat + events[i].latitude, lon + events[i].longitude)
    });
    let n = members.len() as f64;
    GeoPoint::new(lat_sum / n, lon_sum / n)
}
