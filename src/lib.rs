pub mod core;
pub mod feed;
pub mod report;
pub mod swarm;
