//! Core value types: student codes, records, attendance.

mod attendance;
mod code;
mod student;

pub use attendance::{
    AttendanceLog, AttendanceStatus, CheckIn, InvalidCutoff, LateCutoff, MarkedBy,
};
pub use code::{is_valid_sr_code, InvalidSrCode, SrCode};
pub use student::{Role, StudentRecord};
