use crate::camera::{CameraError, CameraFlow, CameraSlot, VideoStream};
use crate::config::{CatalogConfig, CheckInConfig, Config, ConfigError, SessionConfig};
use crate::directory::StudentDirectory;
use crate::domain::{
    AttendanceLog, AttendanceStatus, CheckIn, LateCutoff, MarkedBy, Role, SrCode, StudentRecord,
};
use crate::registration::{RegistrationForm, RegistrationStore};
use crate::storage::KeyValueStore;
use crate::ui::clock::ClockDisplay;
use crate::ui::mvi::{EffectReducer, Reducer};
use crate::ui::navigation::{NavigationEffect, NavigationIntent, NavigationReducer, View, ViewState};
use crate::ui::roster::{
    AttendanceDetail, RosterError, RosterIntent, RosterReducer, RosterRow, RosterState,
};
use crate::ui::scan::{ScanEffect, ScanIntent, ScanReducer, ScanState};
use crate::ui::session::{
    LogoutReason, SessionEffect, SessionIntent, SessionReducer, SessionState,
};
use mockable::Clock;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Deferred work for the runtime. Completions come back as events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    RequestCamera {
        flow: CameraFlow,
        ticket: u64,
    },
    /// Abort any pending session timers, then arm both for `epoch`.
    ArmSessionTimers {
        epoch: u64,
        warning_after: Duration,
        expire_after: Duration,
        seconds_remaining: u64,
    },
    CancelSessionTimers,
    ScheduleNoticeDismiss {
        id: u64,
        after: Duration,
    },
}

/// A timer armed by a [`Command`] has fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Warning { epoch: u64, seconds_remaining: u64 },
    Expiry { epoch: u64 },
    NoticeDismiss { id: u64 },
}

/// Blocking notices, shown once and then drained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Registered { name: String },
    SessionWarning { seconds_remaining: u64 },
    SessionExpired,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Registered { name } => {
                write!(f, "Registration successful! Welcome, {}!", name)
            }
            Notice::SessionWarning { seconds_remaining } => write!(
                f,
                "Session will expire in {} seconds due to inactivity",
                seconds_remaining
            ),
            Notice::SessionExpired => f.write_str(
                "Session expired due to inactivity. You have been logged out.",
            ),
        }
    }
}

/// Logged-in profile dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub name: String,
    pub sr_code: SrCode,
    pub department: String,
    pub section: String,
    /// Today's check-in status, else the directory default, else nothing.
    pub status: Option<AttendanceStatus>,
    pub checked_in_at: Option<String>,
}

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

/// Like `dispatch_mvi!`, for reducers that also return effects.
macro_rules! dispatch_effects {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {{
        let (state, effects) = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
        $self.$field = state;
        effects
    }};
}

pub struct App {
    should_quit: bool,
    /// Active view, role and inline error (MVI pattern).
    view: ViewState,
    /// Login state machine and timer epoch (MVI pattern).
    session: SessionState,
    /// Check-in flow (MVI pattern).
    scan: ScanState,
    /// Teacher roster (MVI pattern).
    roster: RosterState,
    /// Camera handles (resources, managed outside MVI).
    scan_camera: CameraSlot,
    login_camera: CameraSlot,
    registrations: RegistrationStore,
    directory: StudentDirectory,
    attendance: AttendanceLog,
    catalog: CatalogConfig,
    session_config: SessionConfig,
    check_in: CheckInConfig,
    cutoff: LateCutoff,
    clock: Arc<dyn Clock>,
    clock_display: ClockDisplay,
    notices: VecDeque<Notice>,
    register_form: RegistrationForm,
    login_code: String,
}

impl App {
    pub fn new(
        config: &Config,
        backend: Box<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        let cutoff = config.late_cutoff()?;
        let clock_display = ClockDisplay::at(clock.local());
        Ok(Self {
            should_quit: false,
            view: ViewState::default(),
            session: SessionState::default(),
            scan: ScanState::default(),
            roster: RosterState::default(),
            scan_camera: CameraSlot::new(CameraFlow::Scan),
            login_camera: CameraSlot::new(CameraFlow::Login),
            registrations: RegistrationStore::load(backend),
            directory: StudentDirectory::new(config.directory.clone()),
            attendance: AttendanceLog::new(),
            catalog: config.catalog.clone(),
            session_config: config.session.clone(),
            check_in: config.check_in.clone(),
            cutoff,
            clock,
            clock_display,
            notices: VecDeque::new(),
            register_form: RegistrationForm::default(),
            login_code: String::new(),
        })
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn scan(&self) -> &ScanState {
        &self.scan
    }

    pub fn roster(&self) -> &RosterState {
        &self.roster
    }

    pub fn registrations(&self) -> &RegistrationStore {
        &self.registrations
    }

    pub fn attendance(&self) -> &AttendanceLog {
        &self.attendance
    }

    pub fn catalog(&self) -> &CatalogConfig {
        &self.catalog
    }

    pub fn clock_display(&self) -> &ClockDisplay {
        &self.clock_display
    }

    pub fn register_form(&self) -> &RegistrationForm {
        &self.register_form
    }

    pub fn login_code(&self) -> &str {
        &self.login_code
    }

    pub fn camera_live(&self, flow: CameraFlow) -> bool {
        self.slot(flow).is_live()
    }

    /// Drain pending blocking notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    pub fn on_tick(&mut self) {
        self.clock_display = ClockDisplay::at(self.clock.local());
    }

    /// Release both cameras and cancel timers before exit.
    pub fn shutdown(&mut self) -> Vec<Command> {
        self.scan_camera.release();
        self.login_camera.release();
        vec![Command::CancelSessionTimers]
    }

    // ========================================================================
    // Navigation (MVI pattern)
    // ========================================================================

    pub fn select_role(&mut self, role: Role) -> Vec<Command> {
        self.dispatch_navigation(NavigationIntent::SelectRole(role))
    }

    pub fn navigate_to(&mut self, view: View) -> Vec<Command> {
        self.dispatch_navigation(NavigationIntent::NavigateTo(view))
    }

    pub fn go_back(&mut self) -> Vec<Command> {
        self.dispatch_navigation(NavigationIntent::GoBack)
    }

    fn dispatch_navigation(&mut self, intent: NavigationIntent) -> Vec<Command> {
        let effects = dispatch_effects!(self, view, NavigationReducer, intent);
        let mut commands = Vec::new();
        for effect in effects {
            match effect {
                NavigationEffect::ReleaseCamera(flow) => {
                    self.slot_mut(flow).release();
                }
                NavigationEffect::Left(View::Scan) => {
                    commands.extend(self.dispatch_scan(ScanIntent::Reset));
                }
                NavigationEffect::Left(View::Profile) => {
                    commands.extend(self.dispatch_session(SessionIntent::AbandonLogin));
                }
                NavigationEffect::Left(_) => {}
            }
        }
        commands
    }

    /// Make `view` active unless it already is.
    fn enter(&mut self, view: View) -> Vec<Command> {
        if self.view.active == view {
            return Vec::new();
        }
        self.navigate_to(view)
    }

    fn show_error(&mut self, message: String) {
        let effects = dispatch_effects!(
            self,
            view,
            NavigationReducer,
            NavigationIntent::ShowError(message)
        );
        debug_assert!(effects.is_empty(), "inline errors never navigate");
    }

    fn clear_error(&mut self) {
        let effects = dispatch_effects!(self, view, NavigationReducer, NavigationIntent::ClearError);
        debug_assert!(effects.is_empty(), "inline errors never navigate");
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Validate and store a registration. On failure the form keeps its
    /// values and the error is shown inline.
    pub fn register_student(&mut self, form: RegistrationForm) -> Vec<Command> {
        self.clear_error();
        let now = self.clock.local();
        match self.registrations.register(&form, &self.catalog, now) {
            Ok(record) => {
                self.register_form.clear();
                self.notices.push_back(Notice::Registered { name: record.name });
                self.navigate_to(View::StudentMenu)
            }
            Err(e) => {
                self.register_form = form;
                self.show_error(e.to_string());
                Vec::new()
            }
        }
    }

    // ========================================================================
    // Face-scan check-in (MVI pattern)
    // ========================================================================

    /// Open the scan camera. Switches to the scan view first so that
    /// leaving it releases the camera.
    pub fn start_scan(&mut self, department: &str, section: &str) -> Vec<Command> {
        let mut commands = self.enter(View::Scan);
        self.clear_error();
        commands.extend(self.dispatch_scan(ScanIntent::Start {
            department: department.to_string(),
            section: section.to_string(),
        }));
        commands
    }

    pub fn capture_and_match(&mut self, department: &str, section: &str) -> Vec<Command> {
        self.clear_error();
        let matched = self.directory.first_match(department, section).cloned();
        self.dispatch_scan(ScanIntent::Capture {
            department: department.to_string(),
            section: section.to_string(),
            matched,
            at: self.clock.local(),
            cutoff: self.cutoff,
        })
    }

    /// Hide the check-in notice now.
    pub fn dismiss_notice(&mut self) -> Vec<Command> {
        self.dispatch_scan(ScanIntent::DismissNotice { id: None })
    }

    fn dispatch_scan(&mut self, intent: ScanIntent) -> Vec<Command> {
        let effects = dispatch_effects!(self, scan, ScanReducer, intent);
        let mut commands = Vec::new();
        for effect in effects {
            match effect {
                ScanEffect::RequestCamera => {
                    let ticket = self.scan_camera.begin_request();
                    commands.push(Command::RequestCamera {
                        flow: CameraFlow::Scan,
                        ticket,
                    });
                }
                ScanEffect::ReleaseCamera => {
                    self.scan_camera.release();
                }
                ScanEffect::Error(e) => self.show_error(e.to_string()),
                ScanEffect::CheckedIn(entry) => {
                    tracing::info!(
                        code = %entry.sr_code,
                        status = %entry.status,
                        "Checked in"
                    );
                    if self.attendance.record(entry.clone()) {
                        dispatch_mvi!(self, roster, RosterReducer, RosterIntent::Marked(entry));
                    } else {
                        tracing::debug!("Repeat check-in ignored");
                    }
                }
                ScanEffect::ScheduleDismiss { id } => {
                    commands.push(Command::ScheduleNoticeDismiss {
                        id,
                        after: self.check_in.notice_duration(),
                    });
                }
                ScanEffect::ReturnToMenu => {
                    commands.extend(self.navigate_to(View::StudentMenu));
                }
            }
        }
        commands
    }

    // ========================================================================
    // Profile login and session (MVI pattern)
    // ========================================================================

    /// Open the login camera from the profile view, switching to it first.
    pub fn start_profile_login(&mut self, code: &str) -> Vec<Command> {
        let mut commands = self.enter(View::Profile);
        self.clear_error();
        self.login_code = code.to_string();
        commands.extend(self.dispatch_session(SessionIntent::StartLogin {
            code: code.to_string(),
        }));
        commands
    }

    pub fn login_with_face(&mut self, code: &str) -> Vec<Command> {
        self.clear_error();
        let identity = self.lookup(code.trim());
        self.dispatch_session(SessionIntent::LoginWithFace {
            code: code.to_string(),
            identity,
            session_id: Uuid::new_v4(),
            now: self.clock.local(),
        })
    }

    /// Pointer movement, key press or click.
    pub fn on_activity(&mut self) -> Vec<Command> {
        self.dispatch_session(SessionIntent::Activity {
            now: self.clock.local(),
        })
    }

    pub fn logout(&mut self) -> Vec<Command> {
        self.dispatch_session(SessionIntent::Logout)
    }

    /// Registrations first, then the directory.
    fn lookup(&self, code: &str) -> Option<StudentRecord> {
        let parsed = SrCode::parse(code).ok()?;
        self.registrations
            .get(&parsed)
            .or_else(|| self.directory.find_by_code(parsed.as_str()))
            .cloned()
    }

    fn dispatch_session(&mut self, intent: SessionIntent) -> Vec<Command> {
        let effects = dispatch_effects!(self, session, SessionReducer, intent);
        let mut commands = Vec::new();
        for effect in effects {
            match effect {
                SessionEffect::RequestCamera => {
                    let ticket = self.login_camera.begin_request();
                    commands.push(Command::RequestCamera {
                        flow: CameraFlow::Login,
                        ticket,
                    });
                }
                SessionEffect::ReleaseCamera => {
                    self.login_camera.release();
                }
                SessionEffect::ArmTimers { epoch } => {
                    commands.push(Command::ArmSessionTimers {
                        epoch,
                        warning_after: self.session_config.warning_after(),
                        expire_after: self.session_config.expire_after(),
                        seconds_remaining: self.session_config.warning_lead_seconds(),
                    });
                }
                SessionEffect::CancelTimers => commands.push(Command::CancelSessionTimers),
                SessionEffect::ShowWarning { seconds_remaining } => {
                    self.notices
                        .push_back(Notice::SessionWarning { seconds_remaining });
                }
                SessionEffect::Error(e) => self.show_error(e.to_string()),
                SessionEffect::LoggedIn { code } => {
                    let session_id = self.session.active().map(|s| s.session_id);
                    tracing::info!(code = %code, session_id = ?session_id, "Logged in");
                    self.login_code.clear();
                }
                SessionEffect::LoggedOut { reason } => {
                    tracing::info!(reason = ?reason, "Logged out");
                    self.login_code.clear();
                    if reason == LogoutReason::Timeout {
                        self.notices.push_back(Notice::SessionExpired);
                    }
                }
            }
        }
        commands
    }

    /// Dashboard for the logged-in user.
    pub fn profile(&self) -> Option<ProfileView> {
        let user = &self.session.active()?.user;
        let today = self.clock.local().date_naive();
        let (status, checked_in_at) = match self.attendance.on(&user.sr_code, today) {
            Some(entry) => (Some(entry.status), entry.time_in()),
            None => (
                self.directory
                    .find_by_code(user.sr_code.as_str())
                    .map(|r| r.attendance),
                None,
            ),
        };
        Some(ProfileView {
            name: user.name.clone(),
            sr_code: user.sr_code.clone(),
            department: user.department.clone(),
            section: user.section.clone(),
            status,
            checked_in_at,
        })
    }

    // ========================================================================
    // Runtime completions
    // ========================================================================

    pub fn on_camera_result(
        &mut self,
        flow: CameraFlow,
        ticket: u64,
        result: Result<Box<dyn VideoStream>, CameraError>,
    ) -> Vec<Command> {
        match result {
            Ok(stream) => {
                if !self.slot_mut(flow).install(ticket, stream) {
                    return Vec::new();
                }
                tracing::debug!(flow = %flow, ticket, "Camera live");
                match flow {
                    CameraFlow::Scan => self.dispatch_scan(ScanIntent::CameraGranted),
                    CameraFlow::Login => Vec::new(),
                }
            }
            Err(e) => {
                if !self.slot_mut(flow).fail(ticket) {
                    return Vec::new();
                }
                tracing::warn!(flow = %flow, error = %e, "Camera request failed");
                let reason = e.to_string();
                match flow {
                    CameraFlow::Scan => self.dispatch_scan(ScanIntent::CameraDenied { reason }),
                    CameraFlow::Login => {
                        self.dispatch_session(SessionIntent::CameraDenied { reason })
                    }
                }
            }
        }
    }

    pub fn on_timer(&mut self, event: TimerEvent) -> Vec<Command> {
        match event {
            TimerEvent::Warning {
                epoch,
                seconds_remaining,
            } => self.dispatch_session(SessionIntent::WarningElapsed {
                epoch,
                seconds_remaining,
            }),
            TimerEvent::Expiry { epoch } => {
                self.dispatch_session(SessionIntent::ExpiryElapsed { epoch })
            }
            TimerEvent::NoticeDismiss { id } => {
                self.dispatch_scan(ScanIntent::DismissNotice { id: Some(id) })
            }
        }
    }

    fn slot(&self, flow: CameraFlow) -> &CameraSlot {
        match flow {
            CameraFlow::Scan => &self.scan_camera,
            CameraFlow::Login => &self.login_camera,
        }
    }

    fn slot_mut(&mut self, flow: CameraFlow) -> &mut CameraSlot {
        match flow {
            CameraFlow::Scan => &mut self.scan_camera,
            CameraFlow::Login => &mut self.login_camera,
        }
    }

    // ========================================================================
    // Teacher roster (MVI pattern)
    // ========================================================================

    pub fn load_students_by_section(&mut self, section: &str) {
        let today = self.clock.local().date_naive();
        let students: Vec<RosterRow> = if section.is_empty() {
            Vec::new()
        } else {
            self.directory
                .in_section(section)
                .map(|s| RosterRow::new(s.clone(), self.attendance.on(&s.sr_code, today)))
                .collect()
        };
        dispatch_mvi!(
            self,
            roster,
            RosterReducer,
            RosterIntent::Load {
                section: section.to_string(),
                students,
            }
        );
    }

    /// Set a student's status for today by hand, replacing any earlier
    /// entry. The student must be in the loaded section.
    pub fn mark_attendance(&mut self, code: &str, status: AttendanceStatus) {
        self.clear_error();
        let row = SrCode::parse(code.trim())
            .ok()
            .and_then(|code| self.roster.row(&code))
            .map(|row| row.student.clone());
        let Some(student) = row else {
            self.show_error(RosterError::NotInSection.to_string());
            return;
        };
        let entry = CheckIn {
            sr_code: student.sr_code,
            name: student.name,
            section: student.section,
            at: self.clock.local(),
            status,
            marked_by: MarkedBy::Teacher,
        };
        tracing::info!(code = %entry.sr_code, status = %status, "Attendance marked");
        self.attendance.mark(entry.clone());
        dispatch_mvi!(self, roster, RosterReducer, RosterIntent::Marked(entry));
    }

    /// Close attendance for the loaded section: everyone without an entry
    /// today is logged absent.
    pub fn end_attendance_session(&mut self) {
        self.clear_error();
        if self.roster.section.is_none() {
            self.show_error(RosterError::NoSection.to_string());
            return;
        }
        let now = self.clock.local();
        let absent: Vec<CheckIn> = self
            .roster
            .students
            .iter()
            .filter(|row| self.attendance.on(&row.student.sr_code, now.date_naive()).is_none())
            .map(|row| CheckIn {
                sr_code: row.student.sr_code.clone(),
                name: row.student.name.clone(),
                section: row.student.section.clone(),
                at: now,
                status: AttendanceStatus::Absent,
                marked_by: MarkedBy::System,
            })
            .collect();
        for entry in &absent {
            self.attendance.record(entry.clone());
        }
        tracing::info!(
            section = ?self.roster.section,
            absent = absent.len(),
            "Attendance session ended"
        );
        dispatch_mvi!(self, roster, RosterReducer, RosterIntent::SessionEnded(absent));
    }

    pub fn show_student_attendance(&mut self, code: &str) {
        let now = self.clock.local();
        let detail = self.directory.find_by_code(code.trim()).map(|record| {
            match self.attendance.on(&record.sr_code, now.date_naive()) {
                Some(entry) => AttendanceDetail {
                    name: record.name.clone(),
                    sr_code: record.sr_code.clone(),
                    department: record.department.clone(),
                    section: record.section.clone(),
                    status: entry.status,
                    subjects: record.subjects.clone(),
                    time: entry.at.format("%-I:%M:%S %p").to_string(),
                    checked_in: entry.status.is_present(),
                },
                None => AttendanceDetail {
                    name: record.name.clone(),
                    sr_code: record.sr_code.clone(),
                    department: record.department.clone(),
                    section: record.section.clone(),
                    status: record.attendance,
                    subjects: record.subjects.clone(),
                    time: now.format("%-I:%M:%S %p").to_string(),
                    checked_in: false,
                },
            }
        });
        dispatch_mvi!(self, roster, RosterReducer, RosterIntent::Show(detail));
    }

    pub fn close_modal(&mut self) {
        dispatch_mvi!(self, roster, RosterReducer, RosterIntent::CloseModal);
    }

    pub fn backdrop_click(&mut self) {
        dispatch_mvi!(self, roster, RosterReducer, RosterIntent::BackdropClick);
    }
}
