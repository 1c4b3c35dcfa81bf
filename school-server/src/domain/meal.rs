//! Meal and timetable types.

use std::collections::BTreeMap;

use serde::Serialize;

/// Which meal of the day a menu belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MealKind {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealKind {
    /// Map the Korean meal name used by NEIS.
    ///
    /// Anything other than 조식 (breakfast) or 석식 (dinner) is treated as lunch.
    pub fn from_korean(name: &str) -> Self {
        match name {
            "조식" => MealKind::Breakfast,
            "석식" => MealKind::Dinner,
            _ => MealKind::Lunch,
        }
    }
}

/// Menu for a single meal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealData {
    /// Dish names with allergen annotations removed.
    pub menu: Vec<String>,

    /// Energy in kcal, when the source reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
}

/// All meals served on one day, keyed by meal kind.
pub type Meals = BTreeMap<MealKind, MealData>;

/// Subjects for one class on one day, in period order.
pub type Timetable = Vec<String>;
