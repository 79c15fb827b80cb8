use log::{debug, info};

use super::builder::Swarm;

/// Drop swarms with fewer than `min_size` members, keeping the survivors in order
pub fn cull(swarms: Vec<Swarm>, min_size: usize) -> Vec<Swarm> {
    info!("Culling swarms smaller than size {}", min_size);

    let survivors: Vec<Swarm> = swarms
        .into_iter()
        .enumerate()
        .filter_map(|(n, swarm)| {
            if swarm.len() >= min_size {
                Some(swarm)
            } else {
                debug!("   swarm {} is size {}, culling", n, swarm.len());
                None
            }
        })
        .collect();

    info!("{} swarms remaining", survivors.len());
    survivors
}
