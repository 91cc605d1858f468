// Per-tick replay driver
//
// Ties the clock, timeline, node registry and sprite manager together and
// hands a read-only Scene to a renderer once per tick.

use super::clock::SimClock;
use super::error::ReplayError;
use super::registry::{Extent, Node, NodeRegistry};
use super::sprite::{Sprite, SpriteManager, DEFAULT_TOTAL_STEPS};
use super::timeline::{Event, Timeline};
use std::collections::VecDeque;
use tracing::{debug, error, info, trace};

/// How many admitted events are remembered for the event feed
pub const RECENT_EVENT_CAPACITY: usize = 64;

/// Default sprite diameter in canvas units
pub const DEFAULT_SPRITE_SIZE: f64 = 10.0;

/// Replay tuning
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayConfig {
    /// Clock start; `None` starts at the first event (or 0 without events)
    pub start_time: Option<u64>,

    /// Ticks every sprite takes from source to destination
    pub total_steps: u32,

    /// Visual size handed to renderers
    pub sprite_size: f64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            start_time: None,
            total_steps: DEFAULT_TOTAL_STEPS,
            sprite_size: DEFAULT_SPRITE_SIZE,
        }
    }
}

/// Running totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplayStats {
    /// Events turned into sprites
    pub admitted: u64,
    /// Sprites removed after arriving
    pub delivered: u64,
}

/// Read-only snapshot of one tick
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    /// Clock value of the tick being drawn
    pub now: u64,
    pub nodes: &'a [Node],
    pub sprites: &'a [Sprite],
    pub sprite_size: f64,
    /// Events not admitted yet
    pub backlog: usize,
    pub stats: ReplayStats,
    /// Canvas extent covering all nodes
    pub bounds: Extent,
    recent: &'a VecDeque<Event>,
}

impl<'a> Scene<'a> {
    /// Most recently admitted events, newest first
    pub fn recent(&self) -> impl Iterator<Item = &'a Event> + 'a {
        let recent: &'a VecDeque<Event> = self.recent;
        recent.iter().rev()
    }
}

/// Anything that can draw a [`Scene`]
///
/// Renderers only read the scene; nothing flows back into the replay.
pub trait Renderer {
    type Error;

    fn render(&mut self, scene: &Scene<'_>) -> Result<(), Self::Error>;
}

/// The replay orchestrator
#[derive(Debug)]
pub struct Replay {
    registry: NodeRegistry,
    clock: SimClock,
    timeline: Timeline,
    sprites: SpriteManager,
    sprite_size: f64,
    stats: ReplayStats,
    recent: VecDeque<Event>,
}

impl Replay {
    /// Build a replay from a node registry and an ascending event list
    ///
    /// Every event is checked against the registry here, which is what lets
    /// [`Replay::step`] run without failure modes.
    ///
    /// # Errors
    /// - [`ReplayError::UnsortedInput`] if `events` is not ascending
    /// - [`ReplayError::UnknownNode`] for the first event naming a missing node
    pub fn new(
        registry: NodeRegistry,
        events: Vec<Event>,
        config: &ReplayConfig,
    ) -> Result<Self, ReplayError> {
        for event in &events {
            registry.route(event)?;
        }

        let start = config
            .start_time
            .or_else(|| events.first().map(Event::timestamp))
            .unwrap_or(0);
        let timeline = Timeline::new(events)?;

        info!(
            nodes = registry.len(),
            events = timeline.len(),
            start,
            total_steps = config.total_steps,
            "Replay ready"
        );

        Ok(Self {
            registry,
            clock: SimClock::new(start),
            timeline,
            sprites: SpriteManager::new(config.total_steps),
            sprite_size: config.sprite_size,
            stats: ReplayStats::default(),
            recent: VecDeque::with_capacity(RECENT_EVENT_CAPACITY),
        })
    }

    /// Run one tick and hand the result to `renderer`
    ///
    /// Order: read the clock, admit due events, advance sprites, render,
    /// advance the clock. When the renderer fails the clock stays where it
    /// is and the error is passed back.
    pub fn step<R: Renderer>(&mut self, renderer: &mut R) -> Result<(), R::Error> {
        let now = self.clock.now();

        for event in self.timeline.pop_due(now) {
            match self.registry.route(&event) {
                Ok((from, to)) => {
                    debug!(
                        now,
                        source = event.source(),
                        destination = event.destination(),
                        timestamp = event.timestamp(),
                        "Admitting packet"
                    );
                    self.sprites.admit(from, to);
                    self.stats.admitted += 1;
                    if self.recent.len() == RECENT_EVENT_CAPACITY {
                        self.recent.pop_front();
                    }
                    self.recent.push_back(event);
                }
                // Unreachable after the check in `new`
                Err(e) => error!(error = %e, "Skipping event with unresolved node"),
            }
        }

        let delivered = self.sprites.tick();
        self.stats.delivered += delivered as u64;

        trace!(
            now,
            live = self.sprites.len(),
            backlog = self.timeline.len(),
            delivered,
            "Tick"
        );

        renderer.render(&self.scene())?;
        self.clock.advance();
        Ok(())
    }

    /// Snapshot of the current state without stepping
    pub fn scene(&self) -> Scene<'_> {
        Scene {
            now: self.clock.now(),
            nodes: self.registry.nodes(),
            sprites: self.sprites.live(),
            sprite_size: self.sprite_size,
            backlog: self.timeline.len(),
            stats: self.stats,
            bounds: self.registry.bounds(),
            recent: &self.recent,
        }
    }

    /// Nothing left to admit and nothing in flight
    pub fn is_idle(&self) -> bool {
        self.timeline.is_empty() && self.sprites.is_empty()
    }

    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    pub fn stats(&self) -> ReplayStats {
        self.stats
    }

    /// Number of events still waiting for their timestamp
    pub fn backlog(&self) -> usize {
        self.timeline.len()
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }
}
