//! Case-insensitive substring search over hero text fields.
//!
//! A hero matches when any of `name`, `superpower`, `city`, or `alter_ego`
//! (absent or empty fields skipped) contains the normalized term. Matching is on
//! substrings, not tokens: `"man"` matches `"Spider-Man"`.

use crate::domain::Hero;

/// Trims and lower-cases a raw search term.
///
/// Returns `None` for empty or whitespace-only input, meaning "no filter".
///
/// # Examples
///
/// ```
/// use hero_roster::storage::normalize_term;
///
/// assert_eq!(normalize_term("  GoTham "), Some("gotham".to_string()));
/// assert_eq!(normalize_term("   "), None);
/// ```
#[must_use]
pub fn normalize_term(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Returns `true` if any searchable field of `hero` contains `term`.
///
/// `term` must already be normalized with [`normalize_term`].
#[must_use]
pub fn matches_term(hero: &Hero, term: &str) -> bool {
    [
        Some(hero.name.as_str()),
        Some(hero.superpower.as_str()),
        Some(hero.city.as_str()),
        hero.alter_ego.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|field| !field.is_empty())
    .any(|field| field.to_lowercase().contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batman() -> Hero {
        Hero::new("Batman", "Intelligence", "Gotham").with_alter_ego("Bruce Wayne")
    }

    #[test]
    fn matches_each_searchable_field() {
        let hero = batman();
        assert!(matches_term(&hero, "bat"));
        assert!(matches_term(&hero, "intell"));
        assert!(matches_term(&hero, "goth"));
        assert!(matches_term(&hero, "wayne"));
    }

    #[test]
    fn id_is_not_searchable() {
        let hero = batman().with_id("gotham-1");
        assert!(!matches_term(&hero, "-1"));
    }

    #[test]
    fn missing_alter_ego_is_skipped() {
        let hero = Hero::new("Thor", "Thunder", "Asgard");
        assert!(!matches_term(&hero, "odinson"));
    }

    #[test]
    fn normalization_lowercases_after_trimming() {
        assert_eq!(normalize_term("\tSPIDER\n"), Some("spider".to_string()));
        assert_eq!(normalize_term(""), None);
    }
}
