//! The closed set of locations a review may be tagged with.
//!
//! Both the read path (the `location` query filter) and the write path
//! (`Location` form field) consult this list. It is fixed at compile time
//! and never mutated, so it is safe to share across coroutines.

/// Every location accepted by the service, in alphabetical order.
pub const ALLOWED_LOCATIONS: &[&str] = &[
    "Albuquerque, New Mexico",
    "Carlsbad, California",
    "Chula Vista, California",
    "Colorado Springs, Colorado",
    "Denver, Colorado",
    "El Cajon, California",
    "El Paso, Texas",
    "Escondido, California",
    "Fresno, California",
    "La Mesa, California",
    "Las Vegas, Nevada",
    "Los Angeles, California",
    "Oceanside, California",
    "Phoenix, Arizona",
    "Sacramento, California",
    "Salt Lake City, Utah",
    "San Diego, California",
    "Tucson, Arizona",
];

/// Exact, case-sensitive membership test.
#[must_use]
pub fn is_allowed_location(location: &str) -> bool {
    ALLOWED_LOCATIONS.contains(&location)
}
