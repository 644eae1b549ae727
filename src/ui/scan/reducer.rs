//! Reducer for the check-in flow.

use thiserror::Error;

use crate::domain::{CheckIn, MarkedBy};
use crate::ui::mvi::EffectReducer;

use super::intent::ScanIntent;
use super::state::{CheckInNotice, ScanPhase, ScanState};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("Please select a department")]
    MissingDepartment,
    #[error("Please select a section")]
    MissingSection,
    #[error("Please select department and section")]
    MissingSelection,
    #[error("Cannot access camera: {0}")]
    CameraDenied(String),
    #[error("No matching student found in this section")]
    NoMatch,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScanEffect {
    RequestCamera,
    ReleaseCamera,
    Error(ScanError),
    /// Append to the attendance log.
    CheckedIn(CheckIn),
    /// Auto-dismiss notice `id` after the configured interval.
    ScheduleDismiss { id: u64 },
    ReturnToMenu,
}

pub struct ScanReducer;

impl EffectReducer for ScanReducer {
    type State = ScanState;
    type Intent = ScanIntent;
    type Effect = ScanEffect;

    fn reduce(state: Self::State, intent: Self::Intent) -> (Self::State, Vec<Self::Effect>) {
        match intent {
            ScanIntent::Start {
                department,
                section,
            } => {
                if department.is_empty() {
                    return (state, vec![ScanEffect::Error(ScanError::MissingDepartment)]);
                }
                if section.is_empty() {
                    return (state, vec![ScanEffect::Error(ScanError::MissingSection)]);
                }
                (
                    ScanState {
                        phase: ScanPhase::AwaitingCamera,
                        ..state
                    },
                    vec![ScanEffect::RequestCamera],
                )
            }

            ScanIntent::CameraGranted => match state.phase {
                ScanPhase::AwaitingCamera => (
                    ScanState {
                        phase: ScanPhase::Live,
                        ..state
                    },
                    Vec::new(),
                ),
                _ => (state, Vec::new()),
            },

            ScanIntent::CameraDenied { reason } => match state.phase {
                ScanPhase::AwaitingCamera => (
                    ScanState {
                        phase: ScanPhase::Idle,
                        ..state
                    },
                    vec![ScanEffect::Error(ScanError::CameraDenied(reason))],
                ),
                _ => (state, Vec::new()),
            },

            ScanIntent::Capture {
                department,
                section,
                matched,
                at,
                cutoff,
            } => {
                if department.is_empty() || section.is_empty() {
                    return (state, vec![ScanEffect::Error(ScanError::MissingSelection)]);
                }
                let Some(student) = matched else {
                    // Camera stays live for another try.
                    return (state, vec![ScanEffect::Error(ScanError::NoMatch)]);
                };

                let status = cutoff.classify(at.time());
                let id = state.last_notice_id + 1;
                let notice = CheckInNotice {
                    id,
                    name: student.name.clone(),
                    sr_code: student.sr_code.clone(),
                    time: at.format("%-I:%M:%S %p").to_string(),
                    status,
                    subjects: student.subjects.clone(),
                };
                let check_in = CheckIn {
                    sr_code: student.sr_code,
                    name: student.name,
                    section: student.section,
                    at,
                    status,
                    marked_by: MarkedBy::FaceScan,
                };
                (
                    ScanState {
                        phase: ScanPhase::Idle,
                        notice: Some(notice),
                        last_notice_id: id,
                    },
                    vec![
                        ScanEffect::ReleaseCamera,
                        ScanEffect::CheckedIn(check_in),
                        ScanEffect::ScheduleDismiss { id },
                        ScanEffect::ReturnToMenu,
                    ],
                )
            }

            ScanIntent::DismissNotice { id } => {
                let matches = match (&state.notice, id) {
                    (Some(notice), Some(id)) => notice.id == id,
                    (Some(_), None) => true,
                    (None, _) => false,
                };
                if matches {
                    (ScanState { notice: None, ..state }, Vec::new())
                } else {
                    (state, Vec::new())
                }
            }

            ScanIntent::Reset => (
                ScanState {
                    phase: ScanPhase::Idle,
                    ..state
                },
                Vec::new(),
            ),
        }
    }
}
