//! NEIS (National Education Information System) open data client.
//!
//! NEIS publishes the national school directory, school meals and class
//! timetables as paginated JSON datasets. This module wraps those datasets
//! behind the [`NeisApi`] trait so the directory and pass-through services
//! never see HTTP or JSON details.

mod api;
mod client;
mod convert;
mod error;
#[cfg(test)]
pub(crate) mod mock;
mod region;
mod types;

pub use api::NeisApi;
pub use client::{NeisClient, NeisConfig};
pub use convert::{clean_menu, parse_calories, school_from_row};
pub use error::NeisError;
pub use region::Region;
pub use types::{MealRow, SchoolRow, TimetableRow};
