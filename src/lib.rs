// Calendar Pages Library
// Date grids, event ordering, tile layout and page navigation for calendar views

pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{CalendarError, Result};
