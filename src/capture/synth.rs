// Synthetic traffic source
//
// Generates a random packet log instead of reading one: every tick, each
// configured route fires independently with its own probability. Output is
// already in timestamp order, so it feeds the same timeline as a real log.

use crate::replay::Event;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Per-tick spawn probability of one route
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRate {
    pub from: String,
    pub to: String,
    /// Chance of a packet on this route in any given tick (clamped to 0..=1)
    pub probability: f64,
}

impl RouteRate {
    pub fn new(from: impl Into<String>, to: impl Into<String>, probability: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            probability,
        }
    }
}

/// Seeded random event generator
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    routes: Vec<RouteRate>,
    rng: StdRng,
}

impl SyntheticSource {
    pub fn new(routes: Vec<RouteRate>, seed: u64) -> Self {
        Self {
            routes,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Traffic mix between the four default servers
    pub fn default_routes() -> Vec<RouteRate> {
        vec![
            RouteRate::new("s1", "s2", 0.04),
            RouteRate::new("s2", "s3", 0.05),
            RouteRate::new("s4", "s3", 0.01),
            RouteRate::new("s1", "s4", 0.05),
            RouteRate::new("s1", "s3", 0.01),
            RouteRate::new("s3", "s2", 0.08),
            RouteRate::new("s4", "s2", 0.08),
        ]
    }

    pub fn routes(&self) -> &[RouteRate] {
        &self.routes
    }

    /// Events for every tick in `[start, start + ticks)`
    ///
    /// Within a tick, events follow route order.
    pub fn generate(&mut self, start: u64, ticks: u64) -> Vec<Event> {
        let mut events = Vec::new();
        let end = start.saturating_add(ticks);

        for tick in start..end {
            for route in &self.routes {
                if self.rng.gen::<f64>() < route.probability.clamp(0.0, 1.0) {
                    events.push(Event::new(route.from.as_str(), route.to.as_str(), tick));
                }
            }
        }

        debug!(
            start,
            ticks,
            routes = self.routes.len(),
            events = events.len(),
            "Generated synthetic traffic"
        );
        events
    }
}
