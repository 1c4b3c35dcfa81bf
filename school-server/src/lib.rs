//! School directory server.
//!
//! Loads the national school directory from NEIS, answers fuzzy and
//! initial-consonant name searches over it, and serves cached school meal
//! and timetable lookups.

pub mod cache;
pub mod config;
pub mod directory;
pub mod domain;
pub mod neis;
pub mod school_data;
pub mod web;
