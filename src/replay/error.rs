// Replay setup errors
//
// Every failure the core can report happens while a replay is being built.
// Once a Replay exists, stepping it cannot fail.

/// Errors raised while building the node registry, the timeline or the replay
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReplayError {
    /// An event names a node that is not in the registry
    #[error("event at t={timestamp} references unknown node '{name}'")]
    UnknownNode {
        /// The missing node name
        name: String,
        /// Timestamp of the offending event (0 for bare lookups)
        timestamp: u64,
    },

    /// The node configuration lists the same name twice
    #[error("duplicate node '{name}' in node configuration")]
    DuplicateNode { name: String },

    /// The event sequence handed to the timeline is not ascending
    #[error(
        "events are not sorted: event #{index} has t={timestamp} after t={previous}"
    )]
    UnsortedInput {
        /// Position of the first out-of-order event
        index: usize,
        /// Timestamp of the event before it
        previous: u64,
        /// Timestamp of the out-of-order event
        timestamp: u64,
    },
}
