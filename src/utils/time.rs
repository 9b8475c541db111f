use chrono::Local;

use crate::consts::roster_const::TIME_FORMAT;

/// Local wall-clock time in the format stored in the roster's time column.
pub fn time_now() -> String {
    Local::now().format(TIME_FORMAT).to_string()
}
