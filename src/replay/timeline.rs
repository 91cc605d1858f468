// Event timeline
//
// Holds the backlog of events that have not been admitted yet. Only the
// front is ever inspected, so the backlog must arrive sorted.

use super::error::ReplayError;
use std::collections::VecDeque;

/// One recorded packet transmission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    source: String,
    destination: String,
    timestamp: u64,
}

impl Event {
    pub fn new(source: impl Into<String>, destination: impl Into<String>, timestamp: u64) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            timestamp,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Timestamp in clock ticks
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Whether the event is eligible for admission at `now` (inclusive)
    pub fn is_due(&self, now: u64) -> bool {
        self.timestamp <= now
    }
}

/// Ordered backlog of not-yet-admitted events
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    backlog: VecDeque<Event>,
}

impl Timeline {
    /// Take ownership of an ascending event sequence
    ///
    /// Equal timestamps are allowed. Nothing is re-sorted here.
    ///
    /// # Errors
    /// [`ReplayError::UnsortedInput`] at the first event whose timestamp is
    /// lower than its predecessor's.
    pub fn new(events: Vec<Event>) -> Result<Self, ReplayError> {
        if let Some(index) = events
            .windows(2)
            .position(|pair| pair[1].timestamp < pair[0].timestamp)
        {
            return Err(ReplayError::UnsortedInput {
                index: index + 1,
                previous: events[index].timestamp,
                timestamp: events[index + 1].timestamp,
            });
        }
        Ok(Self {
            backlog: events.into(),
        })
    }

    /// Earliest remaining event
    pub fn peek(&self) -> Option<&Event> {
        self.backlog.front()
    }

    /// Remove and return the earliest event if it is due at `now`
    pub fn pop_if_due(&mut self, now: u64) -> Option<Event> {
        if self.backlog.front()?.is_due(now) {
            self.backlog.pop_front()
        } else {
            None
        }
    }

    /// Drain every event due at `now`, earliest first
    ///
    /// Stops at the first event later than `now`. Events left unconsumed in
    /// the iterator stay in the backlog.
    pub fn pop_due(&mut self, now: u64) -> impl Iterator<Item = Event> + '_ {
        std::iter::from_fn(move || self.pop_if_due(now))
    }

    /// Number of events still waiting
    pub fn len(&self) -> usize {
        self.backlog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backlog.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn events(timestamps: &[u64]) -> Vec<Event> {
        timestamps
            .iter()
            .map(|&t| Event::new("s1", "s2", t))
            .collect()
    }

    fn stamps(events: &[Event]) -> Vec<u64> {
        events.iter().map(Event::timestamp).collect()
    }

    #[test]
    fn test_unsorted_input_rejected() {
        let err = Timeline::new(events(&[1, 3, 2, 4])).unwrap_err();
        assert_eq!(
            err,
            ReplayError::UnsortedInput {
                index: 2,
                previous: 3,
                timestamp: 2,
            }
        );
    }

    #[test]
    fn test_equal_timestamps_accepted() {
        let timeline = Timeline::new(events(&[3, 3, 3])).unwrap();
        assert_eq!(timeline.len(), 3);
    }

    #[test]
    fn test_peek_does_not_remove() {
        let timeline = Timeline::new(events(&[7, 9])).unwrap();
        assert_eq!(timeline.peek().map(Event::timestamp), Some(7));
        assert_eq!(timeline.peek().map(Event::timestamp), Some(7));
        assert_eq!(timeline.len(), 2);
    }

    #[test]
    fn test_pop_if_due_inclusive() {
        let mut timeline = Timeline::new(events(&[5])).unwrap();
        assert!(timeline.pop_if_due(4).is_none());
        assert_eq!(timeline.pop_if_due(5).map(|e| e.timestamp()), Some(5));
        assert!(timeline.is_empty());
    }

    #[test]
    fn test_pop_due_catches_up_on_elapsed_events() {
        let mut timeline = Timeline::new(events(&[1, 2, 2, 6, 10])).unwrap();

        let due: Vec<Event> = timeline.pop_due(5).collect();
        assert_eq!(stamps(&due), vec![1, 2, 2]);
        assert_eq!(timeline.peek().map(Event::timestamp), Some(6));
    }

    #[test]
    fn test_pop_due_twice_same_time_is_empty() {
        let mut timeline = Timeline::new(events(&[0, 1, 1, 4])).unwrap();

        assert_eq!(timeline.pop_due(1).count(), 3);
        assert_eq!(timeline.pop_due(1).count(), 0);
        assert_eq!(timeline.len(), 1);
    }

    #[test]
    fn test_pop_due_empty_backlog() {
        let mut timeline = Timeline::new(Vec::new()).unwrap();
        assert_eq!(timeline.pop_due(u64::MAX).count(), 0);
    }

    #[test]
    fn test_partially_consumed_iterator_keeps_rest() {
        let mut timeline = Timeline::new(events(&[1, 2, 3])).unwrap();

        let first = timeline.pop_due(3).next();
        assert_eq!(first.map(|e| e.timestamp()), Some(1));
        assert_eq!(timeline.len(), 2);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Draining at c1 then c2 never repeats an event and emits every
        /// event up to c2
        #[test]
        fn prop_pop_due_no_duplicates_and_complete(
            mut raw in prop::collection::vec(0u64..200, 0..60),
            c1 in 0u64..200,
            gap in 1u64..100,
        ) {
            raw.sort_unstable();
            let c2 = c1 + gap;
            let input: Vec<Event> = raw
                .iter()
                .enumerate()
                .map(|(i, &t)| Event::new(format!("n{}", i), "dst", t))
                .collect();
            let mut timeline = Timeline::new(input.clone()).unwrap();

            let first: Vec<Event> = timeline.pop_due(c1).collect();
            let second: Vec<Event> = timeline.pop_due(c2).collect();

            for event in &second {
                prop_assert!(!first.contains(event));
            }
            prop_assert!(first.iter().all(|e| e.timestamp() <= c1));

            let mut emitted = first.clone();
            emitted.extend(second.iter().cloned());
            let expected: Vec<Event> = input
                .iter()
                .filter(|e| e.timestamp() <= c2)
                .cloned()
                .collect();
            prop_assert_eq!(emitted, expected);
            prop_assert!(timeline.peek().map_or(true, |e| e.timestamp() > c2));
        }

        /// Draining is idempotent for a fixed clock value
        #[test]
        fn prop_pop_due_idempotent(
            mut raw in prop::collection::vec(0u64..100, 0..40),
            c in 0u64..100,
        ) {
            raw.sort_unstable();
            let mut timeline = Timeline::new(events(&raw)).unwrap();
            let due = raw.iter().filter(|&&t| t <= c).count();

            prop_assert_eq!(timeline.pop_due(c).count(), due);
            prop_assert_eq!(timeline.pop_due(c).count(), 0);
        }
    }
}
