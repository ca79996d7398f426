//! Property-Based Test Generators
//!
//! Proptest strategies producing catalog data that satisfies the input
//! rules of the API: non-empty names, ratings between 1 and 5.

use chrono::NaiveDate;
use domain_catalog::{Category, Pokemon, Review};
use proptest::prelude::*;

/// Strategy for capitalized names
pub fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{2,10}"
}

/// Strategy for the same name with different padding and case
pub fn name_variant_strategy(name: String) -> impl Strategy<Value = String> {
    (" {0,3}", " {0,3}", any::<bool>()).prop_map(move |(left, right, upper)| {
        let body = if upper { name.to_uppercase() } else { name.to_lowercase() };
        format!("{}{}{}", left, body, right)
    })
}

/// Strategy for review ratings
pub fn rating_strategy() -> impl Strategy<Value = i32> {
    1i32..=5
}

/// Strategy for non-empty lists of review ratings
pub fn ratings_strategy() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(rating_strategy(), 1..20)
}

/// Strategy for birth dates between 1996 and 2024
pub fn birth_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1996i32..2024, 1u32..=12, 1u32..=28)
        .prop_map(|(year, month, day)| NaiveDate::from_ymd_opt(year, month, day).unwrap())
}

pub fn pokemon_strategy() -> impl Strategy<Value = Pokemon> {
    (name_strategy(), birth_date_strategy(), 1i32..200, 1i32..10_000).prop_map(
        |(name, birth_date, height, weight)| {
            Pokemon::new(name, birth_date).with_measurements(height, weight)
        },
    )
}

pub fn category_strategy() -> impl Strategy<Value = Category> {
    name_strategy().prop_map(Category::new)
}

/// Strategy for unattached reviews
pub fn review_strategy() -> impl Strategy<Value = Review> {
    (name_strategy(), "[a-z ]{0,40}", rating_strategy())
        .prop_map(|(title, text, rating)| Review::new(title, text, rating))
}
