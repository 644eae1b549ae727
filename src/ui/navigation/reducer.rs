//! Reducer for navigation.

use crate::camera::CameraFlow;
use crate::domain::Role;
use crate::ui::mvi::EffectReducer;

use super::intent::NavigationIntent;
use super::state::{View, ViewState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEffect {
    /// Stop the camera held by `flow`, if any.
    ReleaseCamera(CameraFlow),
    /// `View` stopped being the active view.
    Left(View),
}

pub struct NavigationReducer;

impl EffectReducer for NavigationReducer {
    type State = ViewState;
    type Intent = NavigationIntent;
    type Effect = NavigationEffect;

    fn reduce(state: Self::State, intent: Self::Intent) -> (Self::State, Vec<Self::Effect>) {
        match intent {
            NavigationIntent::SelectRole(role) => {
                let state = ViewState { role, ..state };
                let target = state.landing();
                navigate(state, target, Vec::new())
            }

            NavigationIntent::NavigateTo(view) => {
                let mut effects = Vec::new();
                if view != state.active {
                    if let Some(flow) = state.active.camera_flow() {
                        effects.push(NavigationEffect::ReleaseCamera(flow));
                    }
                }
                navigate(state, view, effects)
            }

            NavigationIntent::GoBack => {
                // Cameras go first, whatever the destination.
                let effects = vec![
                    NavigationEffect::ReleaseCamera(CameraFlow::Scan),
                    NavigationEffect::ReleaseCamera(CameraFlow::Login),
                ];
                let target = state.landing();
                let (mut state, effects) = navigate(state, target, effects);
                if target == View::Homepage {
                    state.role = Role::None;
                }
                (state, effects)
            }

            NavigationIntent::ShowError(message) => (
                ViewState {
                    error: Some(message),
                    ..state
                },
                Vec::new(),
            ),

            NavigationIntent::ClearError => (ViewState { error: None, ..state }, Vec::new()),
        }
    }
}

fn navigate(
    state: ViewState,
    target: View,
    mut effects: Vec<NavigationEffect>,
) -> (ViewState, Vec<NavigationEffect>) {
    if target != state.active {
        effects.push(NavigationEffect::Left(state.active));
    }
    (
        ViewState {
            active: target,
            error: None,
            ..state
        },
        effects,
    )
}
