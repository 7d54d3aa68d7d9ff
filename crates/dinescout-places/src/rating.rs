//! Placeholder ratings.
//!
//! No provider exposes review scores, so every venue gets a synthesized
//! rating when it is normalized. The value is demo data and carries no
//! meaning; swap the [`RatingProvider`] to plug in a real source.

pub const MIN_RATING: f64 = 3.5;
pub const MAX_RATING: f64 = 5.0;

/// Supplies the rating attached to a venue at normalization time.
pub trait RatingProvider: Send + Sync {
    fn rating_for(&self, venue_id: &str) -> f64;
}

/// Uniform draw in `[3.5, 5.0]`, rounded to one decimal.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRating;

impl RatingProvider for RandomRating {
    fn rating_for(&self, _venue_id: &str) -> f64 {
        let raw = MIN_RATING + rand::random::<f64>() * (MAX_RATING - MIN_RATING);
        round_to_tenth(raw).clamp(MIN_RATING, MAX_RATING)
    }
}

/// Same rating for every venue.
#[derive(Debug, Clone, Copy)]
pub struct FixedRating(pub f64);

impl RatingProvider for FixedRating {
    fn rating_for(&self, _venue_id: &str) -> f64 {
        round_to_tenth(self.0).clamp(MIN_RATING, MAX_RATING)
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
