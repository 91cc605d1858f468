// Replay engine
//
// Log-driven packet animation core: node registry, simulated clock,
// event timeline, sprite lifecycle and the per-tick orchestrator.
// Nothing in here touches the terminal or the filesystem, apart from
// loading a node layout file.

pub mod clock;
pub mod engine;
pub mod error;
pub mod registry;
pub mod sprite;
pub mod timeline;

pub use engine::{Renderer, Replay, ReplayConfig, Scene};
pub use registry::{load_nodes, Extent, Node, NodeRegistry, Point};
pub use sprite::{Sprite, DEFAULT_TOTAL_STEPS};
pub use timeline::Event;
