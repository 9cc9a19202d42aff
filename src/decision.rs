// Decision reporting
//
// The search reports its current best move once per depth level through a
// DecisionSink. The sink stands in for the host's reply channel: the HTTP
// handler collects into a Vec, the bot tees into the debug log.

use serde::{Deserialize, Serialize};

use crate::types::RelativeMove;

/// One emitted decision
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub correlation_id: String,
    #[serde(rename = "move")]
    pub chosen_move: RelativeMove,
    pub depth: u32,
}

/// Reply channel the search emits into, once per depth
pub trait DecisionSink {
    fn emit(&mut self, correlation_id: &str, chosen_move: RelativeMove, depth: u32);
}

impl DecisionSink for Vec<Decision> {
    fn emit(&mut self, correlation_id: &str, chosen_move: RelativeMove, depth: u32) {
        self.push(Decision {
            correlation_id: correlation_id.to_string(),
            chosen_move,
            depth,
        });
    }
}

/// Forwards every decision to an inner sink while keeping a copy
pub struct RecordingSink<'a> {
    inner: &'a mut dyn DecisionSink,
    recorded: Vec<Decision>,
}

impl<'a> RecordingSink<'a> {
    pub fn new(inner: &'a mut dyn DecisionSink) -> Self {
        RecordingSink {
            inner,
            recorded: Vec::new(),
        }
    }

    pub fn into_recorded(self) -> Vec<Decision> {
        self.recorded
    }
}

impl DecisionSink for RecordingSink<'_> {
    fn emit(&mut self, correlation_id: &str, chosen_move: RelativeMove, depth: u32) {
        self.inner.emit(correlation_id, chosen_move, depth);
        self.recorded.emit(correlation_id, chosen_move, depth);
    }
}

/// Discards everything; used when only the search summary matters
pub struct NullSink;

impl DecisionSink for NullSink {
    fn emit(&mut self, _correlation_id: &str, _chosen_move: RelativeMove, _depth: u32) {}
}
