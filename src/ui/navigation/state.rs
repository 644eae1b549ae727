//! State for navigation.

use crate::camera::CameraFlow;
use crate::domain::Role;
use crate::ui::mvi::UiState;

/// Named screens. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Homepage,
    StudentMenu,
    /// Teacher landing view, which hosts the section roster.
    TeacherView,
    Register,
    Scan,
    /// Login form when logged out, dashboard when logged in.
    Profile,
}

impl View {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "home" | "homepage" => Some(Self::Homepage),
            "menu" | "studentMenu" => Some(Self::StudentMenu),
            "teacher" | "teacherView" | "roster" => Some(Self::TeacherView),
            "register" => Some(Self::Register),
            "scan" => Some(Self::Scan),
            "profile" | "login" => Some(Self::Profile),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Homepage => "homepage",
            Self::StudentMenu => "studentMenu",
            Self::TeacherView => "teacherView",
            Self::Register => "register",
            Self::Scan => "scan",
            Self::Profile => "profile",
        }
    }

    /// The camera flow this view may hold open.
    pub fn camera_flow(&self) -> Option<CameraFlow> {
        match self {
            Self::Scan => Some(CameraFlow::Scan),
            Self::Profile => Some(CameraFlow::Login),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub active: View,
    pub role: Role,
    /// Inline error for the active view's form.
    pub error: Option<String>,
}

impl UiState for ViewState {}

impl ViewState {
    /// Landing view for the selected role.
    pub fn landing(&self) -> View {
        match self.role {
            Role::Student => View::StudentMenu,
            Role::Teacher => View::TeacherView,
            Role::None => View::Homepage,
        }
    }
}
