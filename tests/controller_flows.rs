//! End-to-end flows through the App controller with a simulated camera.

mod common;

use common::Harness;
use rollcall::camera::CameraFlow;
use rollcall::domain::{AttendanceStatus, MarkedBy, Role, SrCode};
use rollcall::registration::RegistrationForm;
use rollcall::storage::REGISTRATIONS_KEY;
use rollcall::ui::app::{Command, Notice, TimerEvent};
use rollcall::ui::navigation::View;
use rollcall::ui::scan::ScanPhase;
use std::time::Duration;

fn logged_in_as(h: &mut Harness, code: &str) -> Vec<Command> {
    h.app.select_role(Role::Student);
    h.app.navigate_to(View::Profile);
    let commands = h.app.start_profile_login(code);
    h.fulfil(commands);
    h.app.login_with_face(code)
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn registration_persists_and_returns_to_menu() {
    let mut h = Harness::new();
    h.app.select_role(Role::Student);
    h.app.navigate_to(View::Register);

    let commands = h.app.register_student(RegistrationForm::new(
        "21-12345",
        "Ada Lovelace",
        "CS",
        "A",
    ));
    assert!(commands.is_empty());
    assert_eq!(h.app.view().active, View::StudentMenu);
    assert_eq!(h.app.register_form(), &RegistrationForm::default());

    let notices = h.app.take_notices();
    assert_eq!(
        notices,
        vec![Notice::Registered {
            name: "Ada Lovelace".into()
        }]
    );
    assert_eq!(
        notices[0].to_string(),
        "Registration successful! Welcome, Ada Lovelace!"
    );

    let raw = h.store.raw(REGISTRATIONS_KEY).expect("mapping persisted");
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entry = &json["21-12345"];
    assert_eq!(entry["srCode"], "21-12345");
    assert_eq!(entry["name"], "Ada Lovelace");
    assert_eq!(entry["department"], "CS");
    assert_eq!(entry["section"], "A");
    assert_eq!(entry["attendance"], "ON TIME");
    assert_eq!(entry["registeredAt"], "3/2/2026, 8:30:00 AM");
}

#[test]
fn failed_registration_keeps_form_and_shows_error() {
    let mut h = Harness::new();
    h.app.select_role(Role::Student);
    h.app.navigate_to(View::Register);

    let form = RegistrationForm::new("21-1234", "Ada", "CS", "A");
    h.app.register_student(form.clone());
    assert_eq!(
        h.error(),
        Some("Invalid SR Code. Format: XX-XXXXX (e.g., 21-12345)")
    );
    assert_eq!(h.app.view().active, View::Register);
    assert_eq!(h.app.register_form(), &form);
    assert!(h.app.registrations().is_empty());
    assert!(h.store.raw(REGISTRATIONS_KEY).is_none());
}

#[test]
fn duplicate_registration_is_rejected() {
    let mut h = Harness::new();
    let form = RegistrationForm::new("21-12345", "Ada", "CS", "A");
    h.app.register_student(form.clone());
    h.app.take_notices();
    let persisted = h.store.raw(REGISTRATIONS_KEY);

    h.app.navigate_to(View::Register);
    h.app.register_student(RegistrationForm::new("21-12345", "Someone Else", "EN", "B"));
    assert_eq!(h.error(), Some("SR Code already registered"));
    assert_eq!(h.app.registrations().len(), 1);
    assert_eq!(h.store.raw(REGISTRATIONS_KEY), persisted);
    assert!(h.app.take_notices().is_empty());
}

#[test]
fn unknown_department_is_rejected() {
    let mut h = Harness::new();
    h.app.register_student(RegistrationForm::new("21-12345", "Ada", "ART", "A"));
    assert_eq!(h.error(), Some("Please select a department"));
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn navigate_to_is_idempotent() {
    let mut h = Harness::new();
    h.app.select_role(Role::Student);
    h.app.navigate_to(View::Register);
    let once = h.app.view().clone();
    h.app.navigate_to(View::Register);
    assert_eq!(h.app.view(), &once);
}

#[test]
fn navigate_clears_inline_error() {
    let mut h = Harness::new();
    h.app.navigate_to(View::Register);
    h.app.register_student(RegistrationForm::default());
    assert!(h.error().is_some());
    h.app.navigate_to(View::Register);
    assert!(h.error().is_none());
}

#[test]
fn back_without_role_goes_home() {
    let mut h = Harness::new();
    h.app.navigate_to(View::Scan);
    h.app.go_back();
    assert_eq!(h.app.view().active, View::Homepage);
    assert_eq!(h.app.view().role, Role::None);
}

#[test]
fn back_returns_to_role_landing() {
    let mut h = Harness::new();
    h.app.select_role(Role::Teacher);
    assert_eq!(h.app.view().active, View::TeacherView);
    h.app.navigate_to(View::Profile);
    h.app.go_back();
    assert_eq!(h.app.view().active, View::TeacherView);
    assert_eq!(h.app.view().role, Role::Teacher);
}

// ============================================================================
// Face-scan check-in
// ============================================================================

#[test]
fn scan_requires_selection_before_camera() {
    let mut h = Harness::new();
    h.app.navigate_to(View::Scan);
    let commands = h.app.start_scan("", "A");
    assert!(commands.is_empty());
    assert_eq!(h.error(), Some("Please select a department"));
    let commands = h.app.start_scan("CS", "");
    assert!(commands.is_empty());
    assert_eq!(h.error(), Some("Please select a section"));
    assert_eq!(h.camera.stats().opened, 0);
}

#[test]
fn scan_match_records_check_in_and_returns_to_menu() {
    let mut h = Harness::new();
    h.app.select_role(Role::Student);
    h.app.navigate_to(View::Scan);
    let commands = h.app.start_scan("CS", "A");
    assert!(h.fulfil(commands).is_empty());
    assert!(h.app.scan().is_live());
    assert!(h.app.camera_live(CameraFlow::Scan));

    let commands = h.app.capture_and_match("CS", "A");
    assert_eq!(
        commands,
        vec![Command::ScheduleNoticeDismiss {
            id: 1,
            after: Duration::from_secs(5)
        }]
    );
    assert_eq!(h.app.view().active, View::StudentMenu);
    assert_eq!(h.app.scan().phase, ScanPhase::Idle);

    let notice = h.app.scan().notice.clone().expect("notice shown");
    assert_eq!(notice.name, "John Smith");
    assert_eq!(notice.sr_code.as_str(), "21-00001");
    assert_eq!(notice.time, "8:30:00 AM");
    assert_eq!(notice.status, AttendanceStatus::OnTime);
    assert_eq!(notice.subjects, vec!["Math 101", "Physics 101"]);
    assert_eq!(h.app.attendance().len(), 1);

    let stats = h.camera.stats();
    assert_eq!(stats.opened, 1);
    assert_eq!(stats.stopped, 1);
    assert_eq!(stats.double_stops, 0);
}

#[test]
fn lateness_follows_minute_cutoff() {
    for ((hour, minute, second), expected) in [
        ((8, 59, 0), AttendanceStatus::OnTime),
        ((9, 0, 0), AttendanceStatus::OnTime),
        ((9, 0, 59), AttendanceStatus::OnTime),
        ((9, 1, 0), AttendanceStatus::Late),
    ] {
        let mut h = Harness::new();
        h.clock.set_local(hour, minute, second);
        h.app.capture_and_match("CS", "B");
        let notice = h.app.scan().notice.clone().unwrap();
        assert_eq!(notice.name, "Ahmed Hassan");
        assert_eq!(notice.status, expected, "at {hour}:{minute}:{second}");
    }
}

#[test]
fn no_match_keeps_camera_live() {
    let mut h = Harness::new();
    h.app.navigate_to(View::Scan);
    let commands = h.app.start_scan("BUS", "A");
    h.fulfil(commands);

    h.app.capture_and_match("BUS", "A");
    assert_eq!(h.error(), Some("No matching student found in this section"));
    assert_eq!(h.app.view().active, View::Scan);
    assert!(h.app.scan().is_live());
    assert_eq!(h.camera.stats().live(), 1);
    assert!(h.app.attendance().is_empty());
}

#[test]
fn capture_requires_both_selections() {
    let mut h = Harness::new();
    h.app.capture_and_match("CS", "");
    assert_eq!(h.error(), Some("Please select department and section"));
}

#[test]
fn scan_camera_denied() {
    let mut h = Harness::new();
    h.camera.set_deny(true);
    h.app.navigate_to(View::Scan);
    let commands = h.app.start_scan("CS", "A");
    h.fulfil(commands);
    assert_eq!(h.error(), Some("Cannot access camera: Permission denied"));
    assert_eq!(h.app.scan().phase, ScanPhase::Idle);
}

#[test]
fn leaving_scan_releases_camera_once() {
    let mut h = Harness::new();
    h.app.select_role(Role::Student);
    h.app.navigate_to(View::Scan);
    let commands = h.app.start_scan("CS", "A");
    h.fulfil(commands);

    h.app.go_back();
    h.app.go_back();
    h.app.navigate_to(View::Register);

    let stats = h.camera.stats();
    assert_eq!(stats.opened, 1);
    assert_eq!(stats.stopped, 1);
    assert_eq!(stats.double_stops, 0);
    assert!(!h.app.camera_live(CameraFlow::Scan));
}

#[test]
fn late_grant_after_leaving_is_stopped() {
    let mut h = Harness::new();
    h.app.select_role(Role::Student);
    h.app.navigate_to(View::Scan);
    let pending = h.app.start_scan("CS", "A");
    h.app.go_back();

    h.fulfil(pending);
    let stats = h.camera.stats();
    assert_eq!(stats.opened, 1);
    assert_eq!(stats.live(), 0);
    assert!(!h.app.camera_live(CameraFlow::Scan));
    assert_eq!(h.app.scan().phase, ScanPhase::Idle);
}

#[test]
fn stale_notice_dismissal_keeps_newer_notice() {
    let mut h = Harness::new();
    h.app.capture_and_match("CS", "A");
    h.app.capture_and_match("CS", "B");
    assert_eq!(h.app.scan().notice.as_ref().map(|n| n.id), Some(2));

    h.app.on_timer(TimerEvent::NoticeDismiss { id: 1 });
    assert!(h.app.scan().notice.is_some());
    h.app.on_timer(TimerEvent::NoticeDismiss { id: 2 });
    assert!(h.app.scan().notice.is_none());
}

#[test]
fn repeat_check_in_keeps_first() {
    let mut h = Harness::new();
    h.app.capture_and_match("CS", "A");
    h.clock.set_local(9, 30, 0);
    h.app.capture_and_match("CS", "A");
    assert_eq!(h.app.attendance().len(), 1);
}

// ============================================================================
// Profile login and session
// ============================================================================

#[test]
fn login_rejects_malformed_code_before_camera() {
    let mut h = Harness::new();
    h.app.navigate_to(View::Profile);
    let commands = h.app.start_profile_login("21-1234");
    assert!(commands.is_empty());
    assert_eq!(h.error(), Some("Invalid SR Code. Format: XX-XXXXX"));
    assert!(!h.app.session().is_awaiting_camera());
}

#[test]
fn face_login_requires_started_camera() {
    let mut h = Harness::new();
    h.app.navigate_to(View::Profile);
    h.app.login_with_face("21-00001");
    assert_eq!(h.error(), Some("Start the camera before logging in"));
    assert!(!h.app.session().is_logged_in());
}

#[test]
fn login_arms_session_timers() {
    let mut h = Harness::new();
    let commands = logged_in_as(&mut h, "21-00001");
    assert_eq!(
        commands,
        vec![Command::ArmSessionTimers {
            epoch: 1,
            warning_after: Duration::from_secs(150),
            expire_after: Duration::from_secs(180),
            seconds_remaining: 30,
        }]
    );
    assert!(h.app.session().is_logged_in());
    assert!(!h.app.camera_live(CameraFlow::Login));
    assert_eq!(h.camera.stats().live(), 0);
    assert_eq!(h.app.login_code(), "");

    let profile = h.app.profile().expect("dashboard");
    assert_eq!(profile.name, "John Smith");
    assert_eq!(profile.status, Some(AttendanceStatus::OnTime));
    assert!(profile.checked_in_at.is_none());
}

#[test]
fn registered_student_can_log_in() {
    let mut h = Harness::new();
    h.app
        .register_student(RegistrationForm::new("22-00077", "Grace Hopper", "EN", "C"));
    logged_in_as(&mut h, "22-00077");
    let profile = h.app.profile().unwrap();
    assert_eq!(profile.name, "Grace Hopper");
    assert_eq!(profile.status, None);
}

#[test]
fn unknown_student_cannot_log_in() {
    let mut h = Harness::new();
    let commands = logged_in_as(&mut h, "98-76543");
    assert!(commands.is_empty());
    assert_eq!(h.error(), Some("Student not found. Please register first."));
    assert!(!h.app.session().is_logged_in());
    assert!(!h.app.session().is_awaiting_camera());

    let stats = h.camera.stats();
    assert_eq!(stats.opened, 1);
    assert_eq!(stats.stopped, 1);
}

#[test]
fn login_camera_denied() {
    let mut h = Harness::new();
    h.camera.set_deny(true);
    h.app.navigate_to(View::Profile);
    let commands = h.app.start_profile_login("21-00001");
    h.fulfil(commands);
    assert_eq!(h.error(), Some("Cannot access camera: Permission denied"));
    assert!(!h.app.session().is_awaiting_camera());
}

#[test]
fn leaving_profile_abandons_pending_login() {
    let mut h = Harness::new();
    h.app.select_role(Role::Student);
    h.app.navigate_to(View::Profile);
    let commands = h.app.start_profile_login("21-00001");
    h.fulfil(commands);
    assert!(h.app.camera_live(CameraFlow::Login));

    h.app.go_back();
    assert!(!h.app.session().is_awaiting_camera());
    assert_eq!(h.camera.stats().live(), 0);
    assert_eq!(h.camera.stats().double_stops, 0);
}

#[test]
fn explicit_logout_shows_no_expiry_notice() {
    let mut h = Harness::new();
    logged_in_as(&mut h, "21-00001");
    let commands = h.app.logout();
    assert_eq!(commands, vec![Command::CancelSessionTimers]);
    assert!(!h.app.session().is_logged_in());
    assert!(h.app.profile().is_none());
    assert!(h.app.take_notices().is_empty());
}

#[test]
fn warning_then_expiry_logs_out() {
    let mut h = Harness::new();
    logged_in_as(&mut h, "21-00001");

    h.app.on_timer(TimerEvent::Warning {
        epoch: 1,
        seconds_remaining: 30,
    });
    let notices = h.app.take_notices();
    assert_eq!(notices, vec![Notice::SessionWarning { seconds_remaining: 30 }]);
    assert_eq!(
        notices[0].to_string(),
        "Session will expire in 30 seconds due to inactivity"
    );

    let commands = h.app.on_timer(TimerEvent::Expiry { epoch: 1 });
    assert_eq!(commands, vec![Command::CancelSessionTimers]);
    assert!(!h.app.session().is_logged_in());
    let notices = h.app.take_notices();
    assert_eq!(notices, vec![Notice::SessionExpired]);
    assert_eq!(
        notices[0].to_string(),
        "Session expired due to inactivity. You have been logged out."
    );
}

#[test]
fn activity_invalidates_earlier_timers() {
    let mut h = Harness::new();
    logged_in_as(&mut h, "21-00001");

    h.clock.advance(Duration::from_secs(100));
    let commands = h.app.on_activity();
    assert!(matches!(
        commands.as_slice(),
        [Command::ArmSessionTimers { epoch: 2, .. }]
    ));
    assert_eq!(
        h.app.session().active().unwrap().last_activity,
        common::local(2026, 3, 2, 8, 31, 40)
    );

    h.app.on_timer(TimerEvent::Warning {
        epoch: 1,
        seconds_remaining: 30,
    });
    h.app.on_timer(TimerEvent::Expiry { epoch: 1 });
    assert!(h.app.session().is_logged_in());
    assert!(h.app.take_notices().is_empty());
}

#[test]
fn activity_while_logged_out_is_ignored() {
    let mut h = Harness::new();
    assert!(h.app.on_activity().is_empty());
}

#[test]
fn profile_shows_todays_check_in() {
    let mut h = Harness::new();
    h.clock.set_local(9, 5, 0);
    h.app.capture_and_match("CS", "A");
    logged_in_as(&mut h, "21-00001");

    let profile = h.app.profile().unwrap();
    assert_eq!(profile.status, Some(AttendanceStatus::Late));
    assert_eq!(profile.checked_in_at.as_deref(), Some("9:05:00 AM"));
}

// ============================================================================
// Teacher roster
// ============================================================================

#[test]
fn roster_lists_section_in_directory_order() {
    let mut h = Harness::new();
    h.app.select_role(Role::Teacher);
    h.app.load_students_by_section("A");

    let roster = h.app.roster();
    let names: Vec<_> = roster.students.iter().map(|r| r.student.name.as_str()).collect();
    assert_eq!(names, vec!["John Smith", "Maria Garcia", "Sarah Lee"]);
    assert_eq!(roster.summary.on_time, 3);
    assert_eq!(roster.summary.late, 0);

    h.app.load_students_by_section("B");
    assert_eq!(h.app.roster().summary.on_time, 1);
    assert_eq!(h.app.roster().summary.late, 1);

    h.app.load_students_by_section("");
    assert!(h.app.roster().section.is_none());
    assert!(h.app.roster().students.is_empty());
}

#[test]
fn attendance_modal_open_and_close() {
    let mut h = Harness::new();
    h.app.load_students_by_section("B");

    h.app.show_student_attendance("21-00003");
    let detail = h.app.roster().modal.clone().expect("modal open");
    assert_eq!(detail.name, "Ahmed Hassan");
    assert_eq!(detail.status, AttendanceStatus::Late);
    assert_eq!(detail.time, "8:30:00 AM");
    assert!(!detail.checked_in);
    assert_eq!(detail.subjects, vec!["Data Structures", "Database"]);

    h.app.close_modal();
    assert!(h.app.roster().modal.is_none());

    h.app.show_student_attendance("21-00003");
    h.app.backdrop_click();
    assert!(h.app.roster().modal.is_none());

    h.app.show_student_attendance("99-99999");
    assert!(h.app.roster().modal.is_none());
}

#[test]
fn roster_reflects_check_ins() {
    let mut h = Harness::new();
    h.clock.set_local(9, 5, 0);
    h.app.capture_and_match("CS", "A");

    h.app.load_students_by_section("A");
    assert_eq!(h.app.roster().summary.late, 1);

    h.app.show_student_attendance("21-00001");
    let detail = h.app.roster().modal.clone().unwrap();
    assert!(detail.checked_in);
    assert_eq!(detail.status, AttendanceStatus::Late);
    assert_eq!(detail.time, "9:05:00 AM");
}

#[test]
fn roster_rows_follow_later_check_ins() {
    let mut h = Harness::new();
    h.app.load_students_by_section("A");
    assert_eq!(h.app.roster().summary.late, 0);

    h.clock.set_local(9, 5, 0);
    h.app.capture_and_match("CS", "A");

    let roster = h.app.roster();
    let row = roster.row(&SrCode::parse("21-00001").unwrap()).unwrap();
    assert_eq!(row.status, AttendanceStatus::Late);
    assert_eq!(row.marked_by, Some(MarkedBy::FaceScan));
    assert_eq!(row.time_in.as_deref(), Some("9:05:00 AM"));
    assert_eq!(roster.summary.on_time, 2);
    assert_eq!(roster.summary.late, 1);
}

#[test]
fn teacher_marking_overrides_todays_entry() {
    let mut h = Harness::new();
    h.app.capture_and_match("CS", "A");
    h.app.select_role(Role::Teacher);
    h.app.load_students_by_section("A");
    h.app.show_student_attendance("21-00001");

    h.app.mark_attendance("21-00001", AttendanceStatus::Absent);

    let code = SrCode::parse("21-00001").unwrap();
    let today = common::local(2026, 3, 2, 0, 0, 0).date_naive();
    let entry = h.app.attendance().on(&code, today).unwrap();
    assert_eq!(entry.status, AttendanceStatus::Absent);
    assert_eq!(entry.marked_by, MarkedBy::Teacher);
    assert_eq!(h.app.attendance().len(), 1);

    let roster = h.app.roster();
    assert_eq!(roster.summary.absent, 1);
    assert_eq!(roster.summary.on_time, 2);
    let modal = roster.modal.as_ref().unwrap();
    assert_eq!(modal.status, AttendanceStatus::Absent);
    assert!(!modal.checked_in);
}

#[test]
fn marking_outside_loaded_section_is_rejected() {
    let mut h = Harness::new();
    h.app.select_role(Role::Teacher);
    h.app.load_students_by_section("A");

    h.app.mark_attendance("21-00003", AttendanceStatus::Late);
    assert_eq!(h.error(), Some("Student not found in this section"));
    assert!(h.app.attendance().is_empty());
}

#[test]
fn ending_session_marks_unmarked_students_absent() {
    let mut h = Harness::new();
    h.app.select_role(Role::Teacher);
    h.app.end_attendance_session();
    assert_eq!(h.error(), Some("Please select a section"));

    h.app.capture_and_match("CS", "A");
    h.app.load_students_by_section("A");
    h.app.mark_attendance("21-00002", AttendanceStatus::Late);
    h.app.end_attendance_session();

    let roster = h.app.roster();
    assert_eq!(roster.summary.on_time, 1);
    assert_eq!(roster.summary.late, 1);
    assert_eq!(roster.summary.absent, 1);
    let absent = roster.row(&SrCode::parse("21-00004").unwrap()).unwrap();
    assert_eq!(absent.status, AttendanceStatus::Absent);
    assert_eq!(absent.marked_by, Some(MarkedBy::System));
    assert_eq!(absent.time_in, None);
    assert_eq!(h.app.attendance().len(), 3);

    // A second end changes nothing.
    h.app.end_attendance_session();
    assert_eq!(h.app.attendance().len(), 3);
}

#[test]
fn scan_started_from_another_view_is_released_on_leave() {
    let mut h = Harness::new();
    let commands = h.app.start_scan("CS", "A");
    assert_eq!(h.app.view().active, View::Scan);
    h.fulfil(commands);
    assert!(h.app.camera_live(CameraFlow::Scan));

    h.app.navigate_to(View::Register);
    h.app.navigate_to(View::StudentMenu);
    assert!(!h.app.camera_live(CameraFlow::Scan));
    assert_eq!(h.camera.stats().live(), 0);
    assert_eq!(h.camera.stats().double_stops, 0);
}

#[test]
fn login_started_from_another_view_is_released_on_leave() {
    let mut h = Harness::new();
    h.app.select_role(Role::Student);
    let commands = h.app.start_profile_login("21-00001");
    assert_eq!(h.app.view().active, View::Profile);
    h.fulfil(commands);
    assert!(h.app.camera_live(CameraFlow::Login));

    h.app.navigate_to(View::Register);
    h.app.navigate_to(View::Scan);
    h.app.navigate_to(View::StudentMenu);
    assert!(!h.app.camera_live(CameraFlow::Login));
    assert_eq!(h.camera.stats().live(), 0);
    assert_eq!(h.camera.stats().double_stops, 0);
}

#[test]
fn shutdown_releases_live_cameras() {
    let mut h = Harness::new();
    h.app.navigate_to(View::Scan);
    let commands = h.app.start_scan("CS", "A");
    h.fulfil(commands);

    let commands = h.app.shutdown();
    assert_eq!(commands, vec![Command::CancelSessionTimers]);
    assert_eq!(h.camera.stats().live(), 0);
}
