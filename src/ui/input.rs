//! Line-based command input.

use thiserror::Error;

use crate::domain::{AttendanceStatus, Role};
use crate::registration::RegistrationForm;
use crate::ui::app::{App, Command};
use crate::ui::navigation::View;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    Role(Role),
    Goto(View),
    Back,
    Register(RegistrationForm),
    Scan { department: String, section: String },
    Capture { department: String, section: String },
    Dismiss,
    Login(String),
    Face(String),
    Activity,
    Logout,
    Section(String),
    Show(String),
    Mark { code: String, status: AttendanceStatus },
    EndSession,
    Close,
    Backdrop,
    Status,
    Quit,
}

impl UserCommand {
    /// Parse a line. Returns `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match head {
            "role" => match args.as_slice() {
                [role] => match Role::parse(role) {
                    Some(role) if role != Role::None => Self::Role(role),
                    _ => return Err(ParseError::Usage("role student|teacher")),
                },
                _ => return Err(ParseError::Usage("role student|teacher")),
            },
            "goto" => match args.as_slice() {
                [view] => Self::Goto(
                    View::parse(view)
                        .ok_or(ParseError::Usage("goto home|menu|teacher|register|scan|profile"))?,
                ),
                _ => return Err(ParseError::Usage("goto home|menu|teacher|register|scan|profile")),
            },
            "back" => Self::Back,
            "register" => match args.as_slice() {
                [code, department, section, name @ ..] => Self::Register(RegistrationForm::new(
                    *code,
                    name.join(" "),
                    *department,
                    *section,
                )),
                [code] => Self::Register(RegistrationForm::new(*code, "", "", "")),
                _ => return Err(ParseError::Usage("register CODE DEPT SECTION NAME...")),
            },
            "scan" => {
                let (department, section) = selection(&args);
                Self::Scan {
                    department,
                    section,
                }
            }
            "capture" => {
                let (department, section) = selection(&args);
                Self::Capture {
                    department,
                    section,
                }
            }
            "dismiss" => Self::Dismiss,
            "login" => Self::Login(args.first().copied().unwrap_or_default().to_string()),
            "face" => Self::Face(args.first().copied().unwrap_or_default().to_string()),
            "activity" => Self::Activity,
            "logout" => Self::Logout,
            "section" => Self::Section(args.first().copied().unwrap_or_default().to_string()),
            "show" => match args.as_slice() {
                [code] => Self::Show(code.to_string()),
                _ => return Err(ParseError::Usage("show CODE")),
            },
            "mark" => match args.as_slice() {
                [code, status] => Self::Mark {
                    code: code.to_string(),
                    status: AttendanceStatus::parse(status)
                        .ok_or(ParseError::Usage("mark CODE present|late|absent"))?,
                },
                _ => return Err(ParseError::Usage("mark CODE present|late|absent")),
            },
            "end" => Self::EndSession,
            "close" => Self::Close,
            "backdrop" => Self::Backdrop,
            "status" => Self::Status,
            "quit" | "exit" => Self::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

/// Missing selections are passed through empty so the form reports them.
fn selection(args: &[&str]) -> (String, String) {
    let department = args.first().copied().unwrap_or_default().to_string();
    let section = args.get(1).copied().unwrap_or_default().to_string();
    (department, section)
}

/// Apply a command. Every command counts as user activity.
pub fn handle_command(app: &mut App, command: UserCommand) -> Vec<Command> {
    if command == UserCommand::Quit {
        app.request_quit();
        return Vec::new();
    }

    let mut commands = app.on_activity();
    commands.extend(match command {
        UserCommand::Role(role) => app.select_role(role),
        UserCommand::Goto(view) => app.navigate_to(view),
        UserCommand::Back => app.go_back(),
        UserCommand::Register(form) => app.register_student(form),
        UserCommand::Scan {
            department,
            section,
        } => app.start_scan(&department, &section),
        UserCommand::Capture {
            department,
            section,
        } => app.capture_and_match(&department, &section),
        UserCommand::Dismiss => app.dismiss_notice(),
        UserCommand::Login(code) => app.start_profile_login(&code),
        UserCommand::Face(code) => app.login_with_face(&code),
        UserCommand::Activity => Vec::new(),
        UserCommand::Logout => app.logout(),
        UserCommand::Section(section) => {
            app.load_students_by_section(&section);
            Vec::new()
        }
        UserCommand::Show(code) => {
            app.show_student_attendance(&code);
            Vec::new()
        }
        UserCommand::Mark { code, status } => {
            app.mark_attendance(&code, status);
            Vec::new()
        }
        UserCommand::EndSession => {
            app.end_attendance_session();
            Vec::new()
        }
        UserCommand::Close => {
            app.close_modal();
            Vec::new()
        }
        UserCommand::Backdrop => {
            app.backdrop_click();
            Vec::new()
        }
        UserCommand::Status | UserCommand::Quit => Vec::new(),
    });
    commands
}
