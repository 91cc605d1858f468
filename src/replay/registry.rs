// Node registry
//
// Fixed mapping from node name to its on-screen rectangle and anchor.
// Built once at startup and only read afterwards.

use super::error::ReplayError;
use super::timeline::Event;
use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::ops::{Add, Mul, Sub};
use std::path::Path;

// Layout of the four demo servers
const DEFAULT_NODE_SIZE: Extent = Extent {
    width: 100.0,
    height: 50.0,
};
const DEFAULT_NODE_ORIGINS: [(&str, f64, f64); 4] = [
    ("s1", 100.0, 100.0),
    ("s2", 800.0, 100.0),
    ("s3", 100.0, 500.0),
    ("s4", 800.0, 500.0),
];

/// A point in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation between `self` and `other`, both axes independently
    ///
    /// `t = 0.0` yields `self`, `t = 1.0` yields `other`. Values outside
    /// `[0, 1]` extrapolate along the same line.
    pub fn lerp(self, other: Point, t: f64) -> Point {
        self * (1.0 - t) + other * t
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Width and height of a node rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A named, fixed location on the replay surface
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    name: String,
    position: Point,
    extent: Extent,
}

impl Node {
    /// Create a node from its top-left corner and size
    pub fn new(name: impl Into<String>, position: Point, extent: Extent) -> Self {
        Self {
            name: name.into(),
            position,
            extent,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Top-left corner
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Geometric center: `position + extent / 2`
    pub fn anchor(&self) -> Point {
        Point::new(
            self.position.x + self.extent.width / 2.0,
            self.position.y + self.extent.height / 2.0,
        )
    }
}

/// One entry of a node layout file
///
/// ```json
/// [{ "name": "s1", "x": 100, "y": 100, "width": 100, "height": 50 }]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodeSpec {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<NodeSpec> for Node {
    fn from(spec: NodeSpec) -> Self {
        Node::new(
            spec.name,
            Point::new(spec.x, spec.y),
            Extent::new(spec.width, spec.height),
        )
    }
}

/// Read a JSON array of [`NodeSpec`] records from `path`
pub fn load_nodes(path: &Path) -> anyhow::Result<Vec<Node>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("cannot read node layout {}", path.display()))?;
    let specs: Vec<NodeSpec> = serde_json::from_str(&content)
        .with_context(|| format!("invalid node layout {}", path.display()))?;
    Ok(specs.into_iter().map(Node::from).collect())
}

/// Read-only lookup from node name to node
#[derive(Debug, Clone)]
pub struct NodeRegistry {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
}

impl NodeRegistry {
    /// Build a registry, rejecting repeated names
    ///
    /// # Errors
    /// [`ReplayError::DuplicateNode`] naming the first repeated node.
    pub fn new(nodes: Vec<Node>) -> Result<Self, ReplayError> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.name.clone(), i).is_some() {
                return Err(ReplayError::DuplicateNode {
                    name: node.name.clone(),
                });
            }
        }
        Ok(Self { nodes, index })
    }

    /// The four-server layout used when no layout file is given
    pub fn default_layout() -> Self {
        let nodes: Vec<Node> = DEFAULT_NODE_ORIGINS
            .iter()
            .map(|(name, x, y)| Node::new(*name, Point::new(*x, *y), DEFAULT_NODE_SIZE))
            .collect();
        // Names above are distinct, no need to go through `new`
        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.name.clone(), i))
            .collect();
        Self { nodes, index }
    }

    /// Anchor (center point) of the node called `name`
    pub fn resolve(&self, name: &str) -> Result<Point, ReplayError> {
        self.get(name)
            .map(Node::anchor)
            .ok_or_else(|| ReplayError::UnknownNode {
                name: name.to_string(),
                timestamp: 0,
            })
    }

    /// Source and destination anchors of `event`
    ///
    /// The error carries the event timestamp so a bad log line can be found.
    pub fn route(&self, event: &Event) -> Result<(Point, Point), ReplayError> {
        let lookup = |name: &str| {
            self.get(name)
                .map(Node::anchor)
                .ok_or_else(|| ReplayError::UnknownNode {
                    name: name.to_string(),
                    timestamp: event.timestamp(),
                })
        };
        Ok((lookup(event.source())?, lookup(event.destination())?))
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.index.get(name).map(|&i| &self.nodes[i])
    }

    /// Nodes in configuration order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Smallest extent from the origin that covers every node rectangle
    pub fn bounds(&self) -> Extent {
        self.nodes.iter().fold(Extent::default(), |acc, node| {
            Extent::new(
                acc.width.max(node.position.x + node.extent.width),
                acc.height.max(node.position.y + node.extent.height),
            )
        })
    }
}
