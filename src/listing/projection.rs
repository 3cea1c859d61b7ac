use crate::{consts::consts::MIN_SEARCH_LENGTH, model::contact::Contact};

/// Returns the lowercase needle for an active search, `None` when the trimmed term is too short
pub fn normalize_search_term(search_term: &str) -> Option<String> {
    let trimmed = search_term.trim();

    if trimmed.chars().count() < MIN_SEARCH_LENGTH {
        return None;
    }

    Some(trimmed.to_lowercase())
}

pub fn is_active_search(search_term: &str) -> bool {
    normalize_search_term(search_term).is_some()
}

fn matches(contact: &Contact, needle: &str) -> bool {
    contact.full_name.to_lowercase().contains(needle)
        || contact.first_name.to_lowercase().contains(needle)
        || contact.last_name.to_lowercase().contains(needle)
}

/// Derives the displayed contacts from the full set. The result is always a subsequence of
/// `all` in the same order.
#[tracing::instrument(skip(all))]
pub fn project(all: &[Contact], search_term: &str) -> Vec<Contact> {
    match normalize_search_term(search_term) {
        None => all.to_vec(),
        Some(needle) => all
            .iter()
            .filter(|contact| matches(contact, &needle))
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};
    use rstest::rstest;

    use super::*;
    use crate::generator::{generate_contacts, NamePools};

    fn sample() -> Vec<Contact> {
        vec![
            Contact::new_test(1, "John", "Smith"),
            Contact::new_test(2, "Mary", "Johnson"),
            Contact::new_test(3, "Somchai", "Jaidee"),
            Contact::new_test(4, "Linda", "Brown"),
        ]
    }

    #[rstest]
    #[case("")]
    #[case("j")]
    #[case("jo")]
    #[case("  jo  ")]
    #[case("   ")]
    fn short_terms_show_everything(#[case] term: &str) {
        let all = sample();

        assert_eq!(project(&all, term), all);
        assert!(!is_active_search(term));
    }

    #[test]
    fn matches_first_or_last_name_case_insensitively() {
        let all = sample();

        let ids: Vec<u32> = project(&all, "JOH")
            .iter()
            .map(|c| c.id.to_number())
            .collect();

        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn matches_across_the_full_name() {
        let all = sample();

        let displayed = project(&all, "hn smi");

        assert_eq!(displayed, vec![all[0].clone()]);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let all = sample();

        assert_eq!(project(&all, "  brown "), vec![all[3].clone()]);
    }

    #[test]
    fn no_match_gives_empty() {
        assert!(project(&sample(), "zzz").is_empty());
    }

    #[test]
    fn every_displayed_contact_matches_and_no_match_is_dropped() {
        let all = generate_contacts(&mut StdRng::seed_from_u64(3), &NamePools::bundled());

        for term in ["son", "SMI", "ong", "lee", "mar"] {
            let displayed = project(&all, term);
            let needle = term.trim().to_lowercase();

            let expected: Vec<Contact> = all
                .iter()
                .filter(|c| {
                    c.full_name.to_lowercase().contains(&needle)
                        || c.first_name.to_lowercase().contains(&needle)
                        || c.last_name.to_lowercase().contains(&needle)
                })
                .cloned()
                .collect();

            assert_eq!(displayed, expected, "term: {}", term);
        }
    }
}
