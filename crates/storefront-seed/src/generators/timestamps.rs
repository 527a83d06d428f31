//! Random timestamps relative to a reference "now".

use rand::Rng;
use time::{Date, Duration, Month, OffsetDateTime};

/// Midnight UTC on January 1st of the year containing `now`.
pub fn start_of_year(now: OffsetDateTime) -> OffsetDateTime {
    january_first(now.year(), now)
}

/// Midnight UTC on January 1st of the decade containing `now` (e.g. 2020).
pub fn start_of_decade(now: OffsetDateTime) -> OffsetDateTime {
    let year = now.year();
    january_first(year - year.rem_euclid(10), now)
}

/// Uniformly random instant in `[start, end]` at whole-second resolution.
///
/// Returns `start` when the interval is empty.
pub fn between(start: OffsetDateTime, end: OffsetDateTime, rng: &mut impl Rng) -> OffsetDateTime {
    let span = (end - start).whole_seconds();
    if span <= 0 {
        return start;
    }
    start + Duration::seconds(rng.gen_range(0..=span))
}

/// Random instant between the start of the current decade and `now`.
pub fn this_decade(now: OffsetDateTime, rng: &mut impl Rng) -> OffsetDateTime {
    between(start_of_decade(now), now, rng)
}

/// Random instant between the start of the current year and `now`.
pub fn this_year(now: OffsetDateTime, rng: &mut impl Rng) -> OffsetDateTime {
    between(start_of_year(now), now, rng)
}

fn january_first(year: i32, fallback: OffsetDateTime) -> OffsetDateTime {
    Date::from_calendar_date(year, Month::January, 1)
        .map(|date| date.midnight().assume_utc())
        .unwrap_or(fallback)
}
