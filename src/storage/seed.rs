//! Seed roster loaded when the store starts up.
//!
//! The last three entries are deliberate exact duplicates (apart from their ids)
//! and are kept as-is.

use crate::domain::Hero;

const SEED: [(&str, &str, &str, &str, &str); 13] = [
    ("1", "Spider-Man", "Web-slinging", "Peter Parker", "New York"),
    ("2", "Superman", "Flight", "Clark Kent", "Metropolis"),
    ("3", "Batman", "Intelligence", "Bruce Wayne", "Gotham"),
    ("4", "Wonder Woman", "Super strength", "Diana Prince", "Themyscira"),
    ("5", "Iron Man", "Technology", "Tony Stark", "New York"),
    ("6", "Thor", "Thunder", "Thor Odinson", "Asgard"),
    ("7", "Captain America", "Super strength", "Steve Rogers", "New York"),
    ("8", "Hulk", "Super strength", "Bruce Banner", "Dayton"),
    ("9", "Black Widow", "Intelligence", "Natasha Romanoff", "New York"),
    ("10", "The Flash", "Speed", "Barry Allen", "Central City"),
    ("11", "The Green Lantern", "Ring", "Hal Jordan", "Coast City"),
    ("12", "The Green Lantern", "Ring", "Hal Jordan", "Coast City"),
    ("13", "The Green Lantern", "Ring", "Hal Jordan", "Coast City"),
];

/// Returns the 13 seed heroes in their canonical order.
#[must_use]
pub fn seed_heroes() -> Vec<Hero> {
    SEED.iter()
        .map(|&(id, name, superpower, alter_ego, city)| {
            Hero::new(name, superpower, city)
                .with_id(id)
                .with_alter_ego(alter_ego)
        })
        .collect()
}
