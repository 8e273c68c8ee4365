//! maintlog: vehicle maintenance tracking.
//!
//! Derives, for each recurring task, whether it is current, due soon, or
//! overdue from the odometer reading and the service history.

pub mod engine;
