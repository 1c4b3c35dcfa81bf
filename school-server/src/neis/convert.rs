//! Conversion from NEIS wire rows to domain types.

use crate::domain::{MealData, MealKind, Meals, SchoolRecord, Timetable};

use super::types::{MealRow, SchoolRow, TimetableRow};

/// Separator NEIS uses between dishes in `DDISH_NM`.
const DISH_SEPARATOR: &str = "<br/>";

/// Convert a directory row, dropping rows without a code or a name.
pub fn school_from_row(row: SchoolRow) -> Option<SchoolRecord> {
    SchoolRecord::new(
        row.school_code,
        row.org_code,
        row.name,
        row.address,
        row.kind,
    )
    .ok()
}

/// Build the day's meals from `mealServiceDietInfo` rows.
///
/// A later row for the same meal kind replaces an earlier one.
pub fn meals_from_rows(rows: Vec<MealRow>) -> Meals {
    rows.into_iter()
        .map(|row| {
            let kind = MealKind::from_korean(&row.meal_kind);
            let data = MealData {
                menu: clean_menu(&row.dishes),
                calories: parse_calories(&row.calories),
            };
            (kind, data)
        })
        .collect()
}

/// Build a timetable from timetable rows, keeping row order.
pub fn timetable_from_rows(rows: Vec<TimetableRow>) -> Timetable {
    rows.into_iter().map(|row| row.subject).collect()
}

/// Split a `DDISH_NM` value into dish names without allergen annotations.
///
/// `"쌀밥<br/>김치찌개 (5.9.13.)"` becomes `["쌀밥", "김치찌개"]`.
pub fn clean_menu(dishes: &str) -> Vec<String> {
    dishes
        .split(DISH_SEPARATOR)
        .map(|dish| strip_parenthesised(dish.trim()).trim().to_string())
        .filter(|dish| !dish.is_empty())
        .collect()
}

/// Remove `( ... )` groups, stopping at the first unbalanced parenthesis.
fn strip_parenthesised(dish: &str) -> String {
    let mut out = dish.to_string();
    while let (Some(start), Some(end)) = (out.find('('), out.find(')')) {
        if end <= start {
            break;
        }
        out.replace_range(start..=end, "");
    }
    out
}

/// Parse the leading number of a `CAL_INFO` value such as `"612.3 Kcal"`.
pub fn parse_calories(raw: &str) -> Option<f64> {
    let raw = raw.trim_start();
    let end = raw
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(raw.len());
    raw[..end].parse().ok()
}
