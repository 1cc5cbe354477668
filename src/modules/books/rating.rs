//! Rating rules for books.
//!
//! A book can carry a simple rating, which is either `DNF` or a star value
//! between 1 and 5 in quarter steps, and a detailed rating made of five
//! category scores between 1 and 10, also in quarter steps. The detailed
//! rating is never stored as stars; [`compute_stars`] derives them on read.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Marker for a book the reader did not finish.
pub const DNF: &str = "DNF";

const SIMPLE_MAX: f64 = 5.0;
const CATEGORY_MAX: f64 = 10.0;
const STEPS_PER_POINT: f64 = 4.0;

/// `1 <= value <= max` and `value` sits on the quarter-point grid starting at 1.
fn on_quarter_grid(value: f64, max: f64) -> bool {
    if !value.is_finite() || !(1.0..=max).contains(&value) {
        return false;
    }
    ((value - 1.0) * STEPS_PER_POINT).fract() == 0.0
}

/// Check a simple rating: absent, `DNF` in any case, or 1, 1.25, ..., 5.
///
/// Control characters and spaces around a number are ignored; `DNF` must
/// match exactly apart from case.
pub fn is_valid_simple_rating(value: Option<&str>) -> bool {
    let Some(raw) = value else {
        return true;
    };
    if raw.eq_ignore_ascii_case(DNF) {
        return true;
    }
    match raw.trim_matches(|c: char| c <= ' ').parse::<f64>() {
        Ok(parsed) => on_quarter_grid(parsed, SIMPLE_MAX),
        Err(_) => false,
    }
}

/// Check a single detailed-rating category: absent, or 1, 1.25, ..., 10.
pub fn is_valid_category_score(value: Option<f64>) -> bool {
    value.map_or(true, |score| on_quarter_grid(score, CATEGORY_MAX))
}

/// The categories of a detailed rating, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Character,
    Plot,
    Writing,
    WorldBuilding,
    Enjoyment,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Character,
        Category::Plot,
        Category::Writing,
        Category::WorldBuilding,
        Category::Enjoyment,
    ];

    /// Field name as it appears in JSON payloads.
    pub const fn name(self) -> &'static str {
        match self {
            Category::Character => "character",
            Category::Plot => "plot",
            Category::Writing => "writing",
            Category::WorldBuilding => "worldBuilding",
            Category::Enjoyment => "enjoyment",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A category score fell outside 1..=10 or off the quarter grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{category} must be 1–10 in .25 steps")]
pub struct InvalidCategoryScore {
    pub category: Category,
}

/// Per-category scores with a free-text comment. Every category is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedRating {
    #[serde(default)]
    pub character: Option<f64>,
    #[serde(default)]
    pub plot: Option<f64>,
    #[serde(default)]
    pub writing: Option<f64>,
    #[serde(default)]
    pub world_building: Option<f64>,
    #[serde(default)]
    pub enjoyment: Option<f64>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl DetailedRating {
    pub fn score(&self, category: Category) -> Option<f64> {
        match category {
            Category::Character => self.character,
            Category::Plot => self.plot,
            Category::Writing => self.writing,
            Category::WorldBuilding => self.world_building,
            Category::Enjoyment => self.enjoyment,
        }
    }

    /// Scores that are present, in category order.
    pub fn scores(&self) -> impl Iterator<Item = f64> + '_ {
        Category::ALL
            .into_iter()
            .filter_map(|category| self.score(category))
    }
}

/// Validate every category, reporting the first one that fails.
pub fn validate_detailed_rating(rating: &DetailedRating) -> Result<(), InvalidCategoryScore> {
    match Category::ALL
        .into_iter()
        .find(|&category| !is_valid_category_score(rating.score(category)))
    {
        Some(category) => Err(InvalidCategoryScore { category }),
        None => Ok(()),
    }
}

/// Derive 1–5 stars from whichever categories are populated.
///
/// The mean of the present scores is halved onto the five-star scale, rounded
/// half-up to the nearest quarter, and kept within one to five stars.
/// Returns `None` when no category is populated.
pub fn compute_stars(rating: &DetailedRating) -> Option<f64> {
    let (sum, count) = rating
        .scores()
        .fold((0.0, 0u32), |(sum, count), score| (sum + score, count + 1));
    if count == 0 {
        return None;
    }

    let mean = sum / f64::from(count);
    let stars = mean / CATEGORY_MAX * SIMPLE_MAX;
    let rounded = (stars * STEPS_PER_POINT + 0.5).floor() / STEPS_PER_POINT;
    Some(rounded.clamp(1.0, SIMPLE_MAX))
}
