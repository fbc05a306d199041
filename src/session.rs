//! Interactive add-flow state machine.
//!
//! The menu-driven "add verified movie" flow (search, pick a hit, verify the
//! director, then store) is modeled as an explicit state machine with typed
//! inputs so each step is testable without a terminal or a network. The
//! driver performs the side effects (API calls, vault writes) and feeds the
//! results back in as inputs; the machine only validates transitions.

use crate::error::ApiError;
use crate::resolver;
use crate::types::{MovieRecord, SearchHit};

/// Typed input driving one transition.
#[derive(Debug, Clone)]
pub enum SessionInput {
    /// Start a verified-add for a title, against a director name.
    Search { title: String, director: String },
    /// Search results arrived from the metadata API.
    Hits(Vec<SearchHit>),
    /// The user picked a hit (zero-based index into the presented list).
    Select(usize),
    /// The full record for the selected hit arrived.
    Record(MovieRecord),
    /// The user abandoned the flow.
    Cancel,
}

/// Terminal outcome of an add flow.
#[derive(Debug, Clone)]
pub enum AddOutcome {
    /// The search produced no hits.
    NoResults { title: String },
    /// Verification passed; the record is ready to be stored.
    Verified(MovieRecord),
    /// The record's director did not contain the supplied name.
    Mismatch { expected: String, actual: String },
    Cancelled,
}

#[derive(Debug, Default)]
pub enum AddSession {
    #[default]
    Idle,
    Searching {
        title: String,
        director: String,
    },
    AwaitingSelection {
        director: String,
        hits: Vec<SearchHit>,
    },
    Verifying {
        director: String,
        hit: SearchHit,
    },
    Done(AddOutcome),
}

impl AddSession {
    pub fn new() -> Self {
        AddSession::Idle
    }

    /// Apply one input. Invalid inputs (wrong state, out-of-range selection)
    /// return an error and leave the session where it was.
    pub fn apply(&mut self, input: SessionInput) -> Result<(), ApiError> {
        let state = std::mem::take(self);
        match (state, input) {
            (_, SessionInput::Cancel) => {
                *self = AddSession::Done(AddOutcome::Cancelled);
                Ok(())
            }
            (AddSession::Idle, SessionInput::Search { title, director }) => {
                *self = AddSession::Searching { title, director };
                Ok(())
            }
            (AddSession::Searching { title, director }, SessionInput::Hits(hits)) => {
                if hits.is_empty() {
                    *self = AddSession::Done(AddOutcome::NoResults { title });
                } else {
                    *self = AddSession::AwaitingSelection { director, hits };
                }
                Ok(())
            }
            (AddSession::AwaitingSelection { director, hits }, SessionInput::Select(index)) => {
                if index >= hits.len() {
                    let len = hits.len();
                    *self = AddSession::AwaitingSelection { director, hits };
                    return Err(ApiError::InputError(format!(
                        "Selection {} out of range (1-{})",
                        index + 1,
                        len
                    )));
                }
                let hit = hits[index].clone();
                *self = AddSession::Verifying { director, hit };
                Ok(())
            }
            (AddSession::Verifying { director, .. }, SessionInput::Record(record)) => {
                match resolver::verify_director(&record, &director) {
                    Ok(()) => *self = AddSession::Done(AddOutcome::Verified(record)),
                    Err(ApiError::VerificationFailed { expected, actual }) => {
                        *self = AddSession::Done(AddOutcome::Mismatch { expected, actual });
                    }
                    Err(other) => {
                        *self = AddSession::Done(AddOutcome::Cancelled);
                        return Err(other);
                    }
                }
                Ok(())
            }
            (state, input) => {
                let message = format!(
                    "Input {:?} not valid in state {}",
                    input,
                    state.state_name()
                );
                *self = state;
                Err(ApiError::InputError(message))
            }
        }
    }

    /// The hit awaiting detail fetch, when verification is in progress.
    pub fn selected_hit(&self) -> Option<&SearchHit> {
        match self {
            AddSession::Verifying { hit, .. } => Some(hit),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<&AddOutcome> {
        match self {
            AddSession::Done(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, AddSession::Done(_))
    }

    fn state_name(&self) -> &'static str {
        match self {
            AddSession::Idle => "Idle",
            AddSession::Searching { .. } => "Searching",
            AddSession::AwaitingSelection { .. } => "AwaitingSelection",
            AddSession::Verifying { .. } => "Verifying",
            AddSession::Done(_) => "Done",
        }
    }
}
