//! Calendar arithmetic for recurring schedules
//!
//! Everything here is pure: no I/O, no clock, no timezone.
//!
//! - `date` - the `CalendarDate` value type and `yyyy-mm-dd` parsing
//! - `weekday` - the closed `Weekday` enumeration and `WeekdaySet`
//! - `expand` - range walking and weekday filtering

pub mod date;
pub mod error;
pub mod expand;
pub mod weekday;

pub use date::CalendarDate;
pub use error::{ScheduleError, ScheduleResult};
pub use expand::{expand, DateRange};
pub use weekday::{Weekday, WeekdaySet};
