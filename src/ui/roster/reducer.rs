use thiserror::Error;

use crate::domain::CheckIn;
use crate::ui::mvi::Reducer;

use super::intent::RosterIntent;
use super::state::{RosterRow, RosterState};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("Please select a section")]
    NoSection,
    #[error("Student not found in this section")]
    NotInSection,
}

pub struct RosterReducer;

impl Reducer for RosterReducer {
    type State = RosterState;
    type Intent = RosterIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            RosterIntent::Load { section, students } => {
                if section.is_empty() {
                    return RosterState {
                        modal: state.modal,
                        ..RosterState::default()
                    };
                }
                RosterState {
                    section: Some(section),
                    students,
                    modal: state.modal,
                    ..RosterState::default()
                }
                .retally()
            }
            RosterIntent::Marked(entry) => apply(state, &entry).retally(),
            RosterIntent::SessionEnded(entries) => entries
                .iter()
                .fold(state, |state, entry| apply(state, entry))
                .retally(),
            RosterIntent::Show(Some(detail)) => RosterState {
                modal: Some(detail),
                ..state
            },
            RosterIntent::Show(None) => state,
            RosterIntent::CloseModal | RosterIntent::BackdropClick => RosterState {
                modal: None,
                ..state
            },
        }
    }
}

fn apply(mut state: RosterState, entry: &CheckIn) -> RosterState {
    if let Some(row) = state
        .students
        .iter_mut()
        .find(|r| r.student.sr_code == entry.sr_code)
    {
        *row = RosterRow::new(row.student.clone(), Some(entry));
    }
    if let Some(modal) = state
        .modal
        .as_mut()
        .filter(|m| m.sr_code == entry.sr_code)
    {
        modal.status = entry.status;
        modal.checked_in = entry.status.is_present();
        modal.time = entry.at.format("%-I:%M:%S %p").to_string();
    }
    state
}
