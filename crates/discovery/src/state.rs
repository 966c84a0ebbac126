//! The filter state a view owns and hands to the pipeline.
//!
//! `FilterState` is a plain value: every control change produces a new state
//! (see the `with_*` methods) and the pipeline recomputes from scratch.

use catalog::Level;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Named duration range used by the duration filter.
///
/// Upper bounds are inclusive: a 3 hour course is in `1-3h`, not `3-6h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DurationBucket {
    #[serde(rename = "0-1h")]
    UpToOneHour,
    #[serde(rename = "1-3h")]
    OneToThreeHours,
    #[serde(rename = "3-6h")]
    ThreeToSixHours,
    #[serde(rename = "6-17h")]
    SixToSeventeenHours,
    /// Everything longer than 17 hours. None of the other buckets cover it.
    #[serde(rename = "17h+")]
    OverSeventeenHours,
}

impl DurationBucket {
    pub const ALL: [DurationBucket; 5] = [
        DurationBucket::UpToOneHour,
        DurationBucket::OneToThreeHours,
        DurationBucket::ThreeToSixHours,
        DurationBucket::SixToSeventeenHours,
        DurationBucket::OverSeventeenHours,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DurationBucket::UpToOneHour => "0-1h",
            DurationBucket::OneToThreeHours => "1-3h",
            DurationBucket::ThreeToSixHours => "3-6h",
            DurationBucket::SixToSeventeenHours => "6-17h",
            DurationBucket::OverSeventeenHours => "17h+",
        }
    }

    /// Whether a course of `hours` length falls in this bucket.
    pub fn contains(&self, hours: f64) -> bool {
        match self {
            DurationBucket::UpToOneHour => hours <= 1.0,
            DurationBucket::OneToThreeHours => hours > 1.0 && hours <= 3.0,
            DurationBucket::ThreeToSixHours => hours > 3.0 && hours <= 6.0,
            DurationBucket::SixToSeventeenHours => hours > 6.0 && hours <= 17.0,
            DurationBucket::OverSeventeenHours => hours > 17.0,
        }
    }
}

impl fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DurationBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        DurationBucket::ALL
            .into_iter()
            .find(|bucket| bucket.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown duration bucket: {s} (expected one of 0-1h, 1-3h, 3-6h, 6-17h, 17h+)"))
    }
}

/// Price dimension of the search filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PriceTier {
    Free,
    Paid,
}

impl PriceTier {
    pub fn contains(&self, price: f64) -> bool {
        match self {
            PriceTier::Free => price == 0.0,
            PriceTier::Paid => price > 0.0,
        }
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceTier::Free => f.write_str("Free"),
            PriceTier::Paid => f.write_str("Paid"),
        }
    }
}

impl FromStr for PriceTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "free" => Ok(PriceTier::Free),
            "paid" => Ok(PriceTier::Paid),
            _ => Err(format!("unknown price tier: {s} (expected free or paid)")),
        }
    }
}

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    HighestRated,
    #[default]
    Newest,
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortBy::HighestRated => f.write_str("highest-rated"),
            SortBy::Newest => f.write_str("newest"),
        }
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "highest-rated" | "rating" => Ok(SortBy::HighestRated),
            "newest" => Ok(SortBy::Newest),
            _ => Err(format!("unknown sort order: {s} (expected highest-rated or newest)")),
        }
    }
}

/// Every filter dimension the course views expose, plus the sort order.
///
/// The default value constrains nothing. Empty sets and a zero rating mean
/// "no constraint" for their dimension.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Minimum rating, inclusive
    pub rating: f64,
    pub duration: BTreeSet<DurationBucket>,
    pub level: BTreeSet<Level>,
    pub category: BTreeSet<String>,
    pub price: BTreeSet<PriceTier>,
    pub language: BTreeSet<String>,
    pub sort_by: SortBy,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = if rating.is_finite() { rating.max(0.0) } else { 0.0 };
        self
    }

    pub fn with_duration(mut self, bucket: DurationBucket) -> Self {
        self.duration.insert(bucket);
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level.insert(level);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category.insert(category.into());
        self
    }

    pub fn with_price(mut self, tier: PriceTier) -> Self {
        self.price.insert(tier);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language.insert(language.into());
        self
    }

    pub fn with_sort(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    /// Flip membership of a duration bucket, as a checkbox does.
    pub fn toggle_duration(mut self, bucket: DurationBucket) -> Self {
        if !self.duration.remove(&bucket) {
            self.duration.insert(bucket);
        }
        self
    }

    /// Flip membership of a level.
    pub fn toggle_level(mut self, level: Level) -> Self {
        if !self.level.remove(&level) {
            self.level.insert(level);
        }
        self
    }

    /// Flip membership of a category.
    pub fn toggle_category(mut self, category: &str) -> Self {
        if !self.category.remove(category) {
            self.category.insert(category.to_string());
        }
        self
    }

    /// True when no dimension constrains the result.
    pub fn is_unconstrained(&self) -> bool {
        self.rating <= 0.0
            && self.duration.is_empty()
            && self.level.is_empty()
            && self.category.is_empty()
            && self.price.is_empty()
            && self.language.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_bucket_boundaries() {
        assert!(DurationBucket::UpToOneHour.contains(0.0));
        assert!(DurationBucket::UpToOneHour.contains(1.0));
        assert!(!DurationBucket::OneToThreeHours.contains(1.0));
        assert!(DurationBucket::OneToThreeHours.contains(3.0));
        assert!(DurationBucket::ThreeToSixHours.contains(6.0));
        assert!(DurationBucket::SixToSeventeenHours.contains(17.0));
        assert!(!DurationBucket::SixToSeventeenHours.contains(17.5));
        assert!(DurationBucket::OverSeventeenHours.contains(17.5));
    }

    #[test]
    fn test_every_duration_lands_in_exactly_one_bucket() {
        for hours in [0.0, 0.5, 1.0, 1.01, 2.9, 3.0, 4.0, 6.0, 6.5, 17.0, 17.01, 52.0] {
            let hits = DurationBucket::ALL.iter().filter(|b| b.contains(hours)).count();
            assert_eq!(hits, 1, "{hours}h matched {hits} buckets");
        }
    }

    #[test]
    fn test_labels_parse() {
        assert_eq!("6-17h".parse::<DurationBucket>(), Ok(DurationBucket::SixToSeventeenHours));
        assert_eq!("17H+".parse::<DurationBucket>(), Ok(DurationBucket::OverSeventeenHours));
        assert!("2-4h".parse::<DurationBucket>().is_err());
        assert_eq!("Free".parse::<PriceTier>(), Ok(PriceTier::Free));
        assert_eq!("highest-rated".parse::<SortBy>(), Ok(SortBy::HighestRated));
        assert_eq!(SortBy::default(), SortBy::Newest);
    }

    #[test]
    fn test_toggles_replace_state() {
        let original = FilterState::new();
        let toggled = original.clone().toggle_category("Design");
        assert!(original.is_unconstrained());
        assert!(toggled.category.contains("Design"));
        assert!(toggled.toggle_category("Design").is_unconstrained());
    }

    #[test]
    fn test_negative_rating_means_unconstrained() {
        assert!(FilterState::new().with_rating(-1.0).is_unconstrained());
        assert!(!FilterState::new().with_rating(4.0).is_unconstrained());
    }
}
