//! Per-swarm descriptive statistics.
//!
//! Spread is the population standard deviation: squared deviations from the
//! mean, divided by the member count, then square-rooted.

use serde::Serialize;

use super::builder::Swarm;

/// Mean and population standard deviation of one quantity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub average: f64,
    pub standard_deviation: f64,
}

/// Depth, magnitude and distance-from-centroid summaries for one swarm
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Statistics {
    pub depth: Summary,
    pub magnitude: Summary,
    pub distance: Summary,
}

/// A swarm together with its statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedSwarm {
    #[serde(flatten)]
    pub swarm: Swarm,
    pub statistics: Statistics,
}

impl Statistics {
    /// Two passes over the members: sums for the averages, then squared deviations
    pub fn for_swarm(swarm: &Swarm) -> Self {
        let count = swarm.len();
        if count == 0 {
            return Self::default();
        }
        let n = count as f64;

        let distances: Vec<f64> = swarm
            .members
            .iter()
            .map(|event| event.location().distance_to(&swarm.centroid))
            .collect();

        let mut depth_sum = 0.0;
        let mut magnitude_sum = 0.0;
        let mut distance_sum = 0.0;
        for (event, distance) in swarm.members.iter().zip(&distances) {
            depth_sum += event.depth;
            magnitude_sum += event.magnitude;
            distance_sum += distance;
        }
        let depth_avg = depth_sum / n;
        let magnitude_avg = magnitude_sum / n;
        let distance_avg = distance_sum / n;

        let mut depth_sq = 0.0;
        let mut magnitude_sq = 0.0;
        let mut distance_sq = 0.0;
        for (event, distance) in swarm.members.iter().zip(&distances) {
            depth_sq += (event.depth - depth_avg).powi(2);
            magnitude_sq += (event.magnitude - magnitude_avg).powi(2);
            distance_sq += (distance - distance_avg).powi(2);
        }

        Self {
            depth: Summary {
                average: depth_avg,
                standard_deviation: (depth_sq / n).sqrt(),
            },
            magnitude: Summary {
                average: magnitude_avg,
                standard_deviation: (magnitude_sq / n).sqrt(),
            },
            distance: Summary {
                average: distance_avg,
                standard_deviation: (distance_sq / n).sqrt(),
            },
        }
    }
}

/// Attach statistics to every swarm
pub fn annotate(swarms: Vec<Swarm>) -> Vec<AnnotatedSwarm> {
    swarms
        .into_iter()
        .map(|swarm| {
            let statistics = Statistics::for_swarm(&swarm);
            AnnotatedSwarm { swarm, statistics }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::{Event, GeoPoint};

    fn swarm(centroid: GeoPoint, members: Vec<Event>) -> Swarm {
        let member_indices = (0..members.len()).collect();
        Swarm {
            centroid,
            members,
            member_indices,
            iterations: 1,
        }
    }

    #[test]
    fn test_depth_and_magnitude_summaries() {
        let members = vec![
            Event::new(0.0, 0.0, 2.0, 1.0),
            Event::new(0.0, 0.0, 4.0, 1.0),
            Event::new(0.0, 0.0, 4.0, 1.0),
            Event::new(0.0, 0.0, 4.0, 1.0),
            Event::new(0.0, 0.0, 5.0, 1.0),
            Event::new(0.0, 0.0, 5.0, 1.0),
            Event::new(0.0, 0.0, 7.0, 1.0),
            Event::new(0.0, 0.0, 9.0, 1.0),
        ];
        let stats = Statistics::for_swarm(&swarm(GeoPoint::new(0.0, 0.0), members));

        // Textbook population example: mean 5, sd 2
        assert!((stats.depth.average - 5.0).abs() < 1e-12);
        assert!((stats.depth.standard_deviation - 2.0).abs() < 1e-12);
        assert_eq!(stats.magnitude.average, 1.0);
        assert_eq!(stats.magnitude.standard_deviation, 0.0);
        assert_eq!(stats.distance.average, 0.0);
        assert_eq!(stats.distance.standard_deviation, 0.0);
    }

    #[test]
    fn test_distance_is_measured_from_the_centroid() {
        // Two events one degree of latitude either side of the centroid
        let members = vec![Event::new(0.0, 1.0, 1.0, 1.0), Event::new(0.0, -1.0, 1.0, 1.0)];
        let stats = Statistics::for_swarm(&swarm(GeoPoint::new(0.0, 0.0), members));
        assert!((stats.distance.average - 111.195).abs() < 0.01);
        assert!(stats.distance.standard_deviation < 1e-9);
    }

    #[test]
    fn test_spread_is_not_signed() {
        // Signed deviations cancel to zero here; squared ones do not.
        let members = vec![Event::new(0.0, 0.0, 0.0, 1.0), Event::new(0.0, 0.0, 10.0, 3.0)];
        let stats = Statistics::for_swarm(&swarm(GeoPoint::new(0.0, 0.0), members));
        assert!((stats.depth.standard_deviation - 5.0).abs() < 1e-12);
        assert!((stats.magnitude.standard_deviation - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_annotate_is_idempotent() {
        let s = swarm(
            GeoPoint::new(10.0, 10.0),
            vec![Event::new(10.0, 10.1, 3.0, 2.5), Event::new(10.1, 10.0, 6.0, 1.5)],
        );
        let first = annotate(vec![s.clone()]);
        let second = annotate(vec![s]);
        assert_eq!(first, second);
        assert_eq!(first[0].statistics, Statistics::for_swarm(&first[0].swarm));
    }

    #[test]
    fn test_empty_swarm_has_zero_statistics() {
        let stats = Statistics::for_swarm(&swarm(GeoPoint::new(0.0, 0.0), vec![]));
        assert_eq!(stats, Statistics::default());
    }

    #[test]
    fn test_json_field_names() {
        let summary = Summary {
            average: 1.5,
            standard_deviation: 0.5,
        };
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["average"], 1.5);
        assert_eq!(json["standardDeviation"], 0.5);
    }
}
