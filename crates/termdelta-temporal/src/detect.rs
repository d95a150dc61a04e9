//! Transition Detector: first qualifying state change in a timeline.

use rayon::prelude::*;

use termdelta_core::models::{EntityState, TransitionEvent, TransitionPredicate};

use crate::timeline::{Timeline, TimelineSet};

/// Scans timelines for the first row satisfying one predicate.
#[derive(Debug, Clone)]
pub struct TransitionDetector {
    predicate: TransitionPredicate,
}

impl TransitionDetector {
    pub fn new(predicate: TransitionPredicate) -> Self {
        Self { predicate }
    }

    pub fn predicate(&self) -> &TransitionPredicate {
        &self.predicate
    }

    /// Single pass with a one-row lookback. The state before the first row is
    /// `Unknown`; later matches are ignored.
    pub fn detect(&self, timeline: &Timeline) -> Option<TransitionEvent> {
        let mut previous = EntityState::Unknown;
        let mut previous_time = None;
        for row in timeline.rows() {
            let current = row.state();
            if self.predicate.matches(previous, current) {
                return Some(TransitionEvent {
                    entity_id: row.entity_id.clone(),
                    event_time: row.effective_time,
                    previous_time,
                    predicate: self.predicate.name().to_string(),
                });
            }
            previous = current;
            previous_time = Some(row.effective_time);
        }
        None
    }

    /// Detect over every timeline. Output is ordered by
    /// `(entity_id, event_time)` whether or not it ran in parallel.
    pub fn detect_all(&self, timelines: &TimelineSet, parallel: bool) -> Vec<TransitionEvent> {
        let mut events: Vec<TransitionEvent> = if parallel {
            timelines.par_iter().filter_map(|t| self.detect(t)).collect()
        } else {
            timelines.iter().filter_map(|t| self.detect(t)).collect()
        };
        events.sort_by(|a, b| {
            a.entity_id
                .cmp(&b.entity_id)
                .then(a.event_time.cmp(&b.event_time))
        });
        events
    }
}
