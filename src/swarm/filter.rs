//! Proximity pre-filter: drop events with no neighbor inside the search radius.

use log::{debug, info};

use crate::core::event::Event;

/// Keep every event that has at least one *other* event closer than `radius_km`.
///
/// Input order is preserved and each event appears at most once. This is an
/// all-pairs scan; a day of global events is a few hundred records.
pub fn filter_isolated(events: &[Event], radius_km: f64) -> Vec<Event> {
    relevant_indices(events, radius_km)
        .into_iter()
        .map(|i| events[i].clone())
        .collect()
}

/// Positions in `events` of the entries [`filter_isolated`] keeps, ascending
pub fn relevant_indices(events: &[Event], radius_km: f64) -> Vec<usize> {
    info!("Total events: {}", events.len());

    let kept: Vec<usize> = events
        .iter()
        .enumerate()
        .filter(|(i, event)| has_neighbor(events, *i, event, radius_km))
        .map(|(i, _)| i)
        .collect();

    info!("Relevant events: {}", kept.len());
    kept
}

fn has_neighbor(events: &[Event], index: usize, event: &Event, radius_km: f64) -> bool {
    let location = event.location();
    events
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != index)
        .any(|(j, other)| {
            let distance = location.distance_to(&other.location());
            if distance < radius_km {
                debug!(
                    "event {} is {:.2} km from event {}",
                    index, distance, j
                );
                true
            } else {
                false
            }
        })
}
