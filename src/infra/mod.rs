//! Concrete [`GradebookSource`](crate::services::gradebook::GradebookSource)
//! implementations.

pub mod demo;
pub mod sheets;
