//! Consumer-side views over parsed records.
//!
//! The parser returns every record for every user; these helpers do what
//! the portal's grade view does with that list: pick one user's records,
//! group them by subject, and roll each subject up into averages and
//! marker counts.

pub mod aggregate;
pub mod types;
pub mod utility;
