//! Plain-text rendering of the active view.

use std::io::{self, Write};

use crate::camera::CameraFlow;
use crate::ui::app::App;
use crate::ui::navigation::View;

pub fn draw(out: &mut dyn Write, app: &App) -> io::Result<()> {
    let view = app.view();
    let clock = app.clock_display();
    writeln!(out, "[{}] {} {}", view.active.name(), clock.time, clock.date)?;

    match view.active {
        View::Homepage => writeln!(out, "  Select a role: student | teacher")?,
        View::StudentMenu => writeln!(out, "  register | scan | profile")?,
        View::Register => {
            let form = app.register_form();
            if !form.code.is_empty() || !form.name.is_empty() {
                writeln!(
                    out,
                    "  form: {} {} {} {}",
                    form.code, form.name, form.department, form.section
                )?;
            }
            writeln!(
                out,
                "  departments: {}  sections: {}",
                app.catalog().departments.join(", "),
                app.catalog().sections.join(", ")
            )?;
        }
        View::Scan => {
            let camera = if app.camera_live(CameraFlow::Scan) {
                "live"
            } else {
                "off"
            };
            writeln!(out, "  camera: {}", camera)?;
        }
        View::Profile => draw_profile(out, app)?,
        View::TeacherView => draw_roster(out, app)?,
    }

    if let Some(notice) = &app.scan().notice {
        writeln!(
            out,
            "  ✓ {} ({}) checked in at {} [{}]",
            notice.name, notice.sr_code, notice.time, notice.status
        )?;
        if !notice.subjects.is_empty() {
            writeln!(out, "    subjects: {}", notice.subjects.join(", "))?;
        }
    }

    if let Some(error) = &view.error {
        writeln!(out, "  ! {}", error)?;
    }
    Ok(())
}

fn draw_profile(out: &mut dyn Write, app: &App) -> io::Result<()> {
    let Some(profile) = app.profile() else {
        let camera = if app.camera_live(CameraFlow::Login) {
            "live"
        } else {
            "off"
        };
        return writeln!(out, "  login (camera: {})", camera);
    };
    writeln!(out, "  {} ({})", profile.name, profile.sr_code)?;
    writeln!(out, "  {} / Section {}", profile.department, profile.section)?;
    match (profile.status, profile.checked_in_at) {
        (Some(status), Some(at)) => writeln!(out, "  today: {} at {}", status, at),
        (Some(status), None) => writeln!(out, "  today: {}", status),
        (None, _) => writeln!(out, "  today: no record"),
    }
}

fn draw_roster(out: &mut dyn Write, app: &App) -> io::Result<()> {
    let roster = app.roster();
    let Some(section) = &roster.section else {
        return writeln!(out, "  Select a section");
    };
    writeln!(
        out,
        "  Section {}: {} on time, {} late, {} absent",
        section, roster.summary.on_time, roster.summary.late, roster.summary.absent
    )?;
    for row in &roster.students {
        write!(
            out,
            "  {}  {:<16} {:<8}",
            row.student.sr_code, row.student.name, row.status
        )?;
        match (&row.time_in, row.marked_by) {
            (Some(time), Some(by)) => writeln!(out, " {} ({})", time, by)?,
            (None, Some(by)) => writeln!(out, " ({})", by)?,
            _ => writeln!(out)?,
        }
    }
    if let Some(detail) = &roster.modal {
        writeln!(out, "  ┌ {} ({})", detail.name, detail.sr_code)?;
        writeln!(out, "  │ {} / Section {}", detail.department, detail.section)?;
        writeln!(out, "  │ {} at {}", detail.status, detail.time)?;
        writeln!(out, "  └ {}", detail.subjects.join(", "))?;
    }
    Ok(())
}
