// Sprite lifecycle manager
//
// Owns every packet currently in flight. Each tick moves all sprites one
// step along their straight route and evicts the ones that have arrived.

use super::registry::Point;

/// Default number of ticks a packet needs from source to destination
pub const DEFAULT_TOTAL_STEPS: u32 = 200;

/// One in-flight packet
///
/// Progress is only visible to [`SpriteManager`]; everyone else sees the
/// current position and the two anchors.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    from: Point,
    to: Point,
    position: Point,
    progress: u32,
    total_steps: u32,
    arrived: bool,
}

impl Sprite {
    fn new(from: Point, to: Point, total_steps: u32) -> Self {
        Self {
            from,
            to,
            position: from,
            progress: 0,
            total_steps,
            arrived: false,
        }
    }

    /// Current interpolated position
    pub fn position(&self) -> Point {
        self.position
    }

    /// Source anchor
    pub fn from(&self) -> Point {
        self.from
    }

    /// Destination anchor
    pub fn to(&self) -> Point {
        self.to
    }

    /// Move one step along the route
    ///
    /// Arrival is decided on `t` as measured before the increment, so the
    /// sprite sits exactly on the destination for one frame before the
    /// following tick flags it.
    fn advance(&mut self) {
        let t = self.progress as f64 / self.total_steps as f64;
        self.position = self.from.lerp(self.to, t);
        self.progress = self.progress.saturating_add(1);

        if t > 1.0 {
            self.arrived = true;
        }
    }
}

/// Owner of the live sprite set
#[derive(Debug, Clone)]
pub struct SpriteManager {
    sprites: Vec<Sprite>,
    total_steps: u32,
}

impl SpriteManager {
    /// Create a manager whose sprites all take `total_steps` ticks
    ///
    /// A zero step count is bumped to 1.
    pub fn new(total_steps: u32) -> Self {
        Self {
            sprites: Vec::new(),
            total_steps: total_steps.max(1),
        }
    }

    /// Launch a sprite at `from` heading for `to`
    pub fn admit(&mut self, from: Point, to: Point) {
        self.sprites.push(Sprite::new(from, to, self.total_steps));
    }

    /// Advance every live sprite, then drop the ones that arrived
    ///
    /// Returns how many sprites were removed.
    pub fn tick(&mut self) -> usize {
        for sprite in &mut self.sprites {
            sprite.advance();
        }
        let before = self.sprites.len();
        self.sprites.retain(|sprite| !sprite.arrived);
        before - self.sprites.len()
    }

    /// Read-only view for renderers
    pub fn live(&self) -> &[Sprite] {
        &self.sprites
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }
}

impl Default for SpriteManager {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_STEPS)
    }
}
