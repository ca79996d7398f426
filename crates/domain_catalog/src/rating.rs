//! Rating aggregation
//!
//! A pokemon's rating is the arithmetic mean of its review ratings, computed
//! with `Decimal` so the same set of reviews always yields the same value.

use rust_decimal::Decimal;

use crate::review::Review;

/// Returns the mean of the given ratings, or zero when there are none
pub fn average_rating<I>(ratings: I) -> Decimal
where
    I: IntoIterator<Item = i32>,
{
    let (sum, count) = ratings
        .into_iter()
        .fold((Decimal::ZERO, 0u32), |(sum, count), rating| {
            (sum + Decimal::from(rating), count + 1)
        });

    if count == 0 {
        return Decimal::ZERO;
    }

    (sum / Decimal::from(count)).normalize()
}

/// Returns the mean rating of a set of reviews
pub fn rating_of(reviews: &[Review]) -> Decimal {
    average_rating(reviews.iter().map(|review| review.rating))
}
