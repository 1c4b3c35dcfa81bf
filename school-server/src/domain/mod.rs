//! Domain types for the school directory.
//!
//! All types enforce their invariants at construction time, so code that
//! receives these types can trust their validity.

mod error;
mod meal;
mod school;

pub use error::DomainError;
pub use meal::{MealData, MealKind, Meals, Timetable};
pub use school::SchoolRecord;
