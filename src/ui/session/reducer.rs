//! Reducer for the session state machine.

use thiserror::Error;

use crate::domain::SrCode;
use crate::ui::mvi::EffectReducer;

use super::intent::SessionIntent;
use super::state::{ActiveSession, SessionPhase, SessionState};

/// Inline errors on the profile login form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Invalid SR Code. Format: XX-XXXXX")]
    InvalidCodeFormat,
    #[error("Invalid SR Code")]
    InvalidCode,
    #[error("Student not found. Please register first.")]
    NotFound,
    #[error("Cannot access camera: {0}")]
    CameraDenied(String),
    #[error("Start the camera before logging in")]
    CameraNotStarted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutReason {
    Explicit,
    Timeout,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEffect {
    RequestCamera,
    ReleaseCamera,
    /// Cancel any pending pair, then arm warning and expiry for `epoch`.
    ArmTimers { epoch: u64 },
    CancelTimers,
    ShowWarning { seconds_remaining: u64 },
    Error(SessionError),
    LoggedIn { code: SrCode },
    LoggedOut { reason: LogoutReason },
}

pub struct SessionReducer;

impl EffectReducer for SessionReducer {
    type State = SessionState;
    type Intent = SessionIntent;
    type Effect = SessionEffect;

    fn reduce(state: Self::State, intent: Self::Intent) -> (Self::State, Vec<Self::Effect>) {
        match intent {
            SessionIntent::StartLogin { code } => match state.phase {
                SessionPhase::LoggedIn(_) => (state, Vec::new()),
                _ => match SrCode::parse(code.trim()) {
                    Ok(code) => (
                        SessionState {
                            phase: SessionPhase::AwaitingCamera { code },
                            ..state
                        },
                        vec![SessionEffect::RequestCamera],
                    ),
                    Err(_) => (
                        state,
                        vec![SessionEffect::Error(SessionError::InvalidCodeFormat)],
                    ),
                },
            },

            SessionIntent::CameraDenied { reason } => match state.phase {
                SessionPhase::AwaitingCamera { .. } => (
                    SessionState {
                        phase: SessionPhase::LoggedOut,
                        ..state
                    },
                    vec![SessionEffect::Error(SessionError::CameraDenied(reason))],
                ),
                _ => (state, Vec::new()),
            },

            SessionIntent::AbandonLogin => match state.phase {
                SessionPhase::AwaitingCamera { .. } => (
                    SessionState {
                        phase: SessionPhase::LoggedOut,
                        ..state
                    },
                    vec![SessionEffect::ReleaseCamera],
                ),
                _ => (state, Vec::new()),
            },

            SessionIntent::LoginWithFace {
                code,
                identity,
                session_id,
                now,
            } => match state.phase {
                SessionPhase::AwaitingCamera { .. } => {
                    if SrCode::parse(code.trim()).is_err() {
                        return (state, vec![SessionEffect::Error(SessionError::InvalidCode)]);
                    }
                    let Some(user) = identity else {
                        return (
                            SessionState {
                                phase: SessionPhase::LoggedOut,
                                ..state
                            },
                            vec![
                                SessionEffect::ReleaseCamera,
                                SessionEffect::Error(SessionError::NotFound),
                            ],
                        );
                    };
                    let epoch = state.epoch + 1;
                    let code = user.sr_code.clone();
                    (
                        SessionState {
                            phase: SessionPhase::LoggedIn(ActiveSession {
                                user,
                                session_id,
                                logged_in_at: now,
                                last_activity: now,
                                warning: None,
                            }),
                            epoch,
                        },
                        vec![
                            SessionEffect::ReleaseCamera,
                            SessionEffect::LoggedIn { code },
                            SessionEffect::ArmTimers { epoch },
                        ],
                    )
                }
                SessionPhase::LoggedOut => (
                    state,
                    vec![SessionEffect::Error(SessionError::CameraNotStarted)],
                ),
                SessionPhase::LoggedIn(_) => (state, Vec::new()),
            },

            SessionIntent::Activity { now } => match state.phase {
                SessionPhase::LoggedIn(session) => {
                    let epoch = state.epoch + 1;
                    (
                        SessionState {
                            phase: SessionPhase::LoggedIn(ActiveSession {
                                last_activity: now,
                                warning: None,
                                ..session
                            }),
                            epoch,
                        },
                        vec![SessionEffect::ArmTimers { epoch }],
                    )
                }
                phase => (SessionState { phase, ..state }, Vec::new()),
            },

            SessionIntent::WarningElapsed {
                epoch,
                seconds_remaining,
            } => match state.phase {
                SessionPhase::LoggedIn(session) if epoch == state.epoch => (
                    SessionState {
                        phase: SessionPhase::LoggedIn(ActiveSession {
                            warning: Some(seconds_remaining),
                            ..session
                        }),
                        ..state
                    },
                    vec![SessionEffect::ShowWarning { seconds_remaining }],
                ),
                phase => (SessionState { phase, ..state }, Vec::new()),
            },

            SessionIntent::ExpiryElapsed { epoch } => match state.phase {
                SessionPhase::LoggedIn(_) if epoch == state.epoch => {
                    log_out(state.epoch, LogoutReason::Timeout)
                }
                phase => (SessionState { phase, ..state }, Vec::new()),
            },

            SessionIntent::Logout => match state.phase {
                SessionPhase::LoggedIn(_) => log_out(state.epoch, LogoutReason::Explicit),
                phase => (SessionState { phase, ..state }, Vec::new()),
            },
        }
    }
}

fn log_out(epoch: u64, reason: LogoutReason) -> (SessionState, Vec<SessionEffect>) {
    (
        SessionState {
            phase: SessionPhase::LoggedOut,
            epoch: epoch + 1,
        },
        vec![
            SessionEffect::CancelTimers,
            SessionEffect::ReleaseCamera,
            SessionEffect::LoggedOut { reason },
        ],
    )
}
