//! Intents for navigation.

use crate::domain::Role;
use crate::ui::mvi::Intent;

use super::state::View;

#[derive(Debug, Clone, PartialEq)]
pub enum NavigationIntent {
    /// Pick a role on the home screen and go to its landing view.
    SelectRole(Role),
    /// Activate a view and clear the inline error.
    NavigateTo(View),
    /// Release cameras, then return to the role's landing view.
    GoBack,
    /// Show an inline error next to the active form.
    ShowError(String),
    ClearError,
}

impl Intent for NavigationIntent {}
