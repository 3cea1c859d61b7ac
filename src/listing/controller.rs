use rand::Rng;

use crate::{
    consts::consts::ContactId,
    generator::{generate_contacts, NamePools},
    model::contact::Contact,
};

use super::{
    pagination::{self, PageMarker},
    projection::{self, is_active_search},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    /// Nothing typed
    Idle,
    /// Something typed, but not enough to search
    TooShort,
    /// Search is active, holds the number of matches
    Results(usize),
}

/// State behind the contact list view: the full set, the searched subset and the current page.
///
/// `displayed` is only ever produced by `projection::project`, so it stays an ordered subsequence
/// of `all`.
#[derive(Clone, Debug)]
pub struct ContactListView {
    all: Vec<Contact>,
    displayed: Vec<Contact>,
    search_term: String,
    current_page: usize,
}

impl ContactListView {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self {
            displayed: contacts.clone(),
            all: contacts,
            search_term: String::new(),
            current_page: 1,
        }
    }

    /// Mounting always starts from a freshly generated dataset
    pub fn mount<R: Rng + ?Sized>(rng: &mut R, pools: &NamePools) -> Self {
        Self::new(generate_contacts(rng, pools))
    }

    pub fn all(&self) -> &[Contact] {
        &self.all
    }

    pub fn displayed(&self) -> &[Contact] {
        &self.displayed
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.displayed.len())
    }

    pub fn set_search_term(&mut self, search_term: impl Into<String>) {
        self.search_term = search_term.into();
        self.displayed = projection::project(&self.all, &self.search_term);
        self.current_page = 1;
    }

    pub fn clear_search(&mut self) {
        self.set_search_term(String::new());
    }

    /// Removes the contact from both sets. The current page is kept unless it no longer exists,
    /// in which case it moves to the new last page.
    pub fn delete(&mut self, id: ContactId) -> bool {
        let before = self.all.len();

        self.all.retain(|contact| contact.id != id);

        if self.all.len() == before {
            return false;
        }

        self.displayed = projection::project(&self.all, &self.search_term);

        let total_pages = self.total_pages();

        if self.current_page > total_pages && total_pages > 0 {
            self.current_page = total_pages;
        }

        true
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() {
            return false;
        }

        self.current_page = page;
        true
    }

    pub fn next_page(&mut self) -> bool {
        if self.current_page >= self.total_pages() {
            return false;
        }

        self.current_page += 1;
        true
    }

    pub fn previous_page(&mut self) -> bool {
        if self.current_page <= 1 {
            return false;
        }

        self.current_page -= 1;
        true
    }

    /// Zero-based index of the first row on the current page
    pub fn start_index(&self) -> usize {
        pagination::page_bounds(self.current_page, self.displayed.len()).start
    }

    pub fn current_page_contacts(&self) -> &[Contact] {
        &self.displayed[pagination::page_bounds(self.current_page, self.displayed.len())]
    }

    pub fn page_window(&self) -> Vec<PageMarker> {
        pagination::page_window(self.current_page, self.total_pages())
    }

    pub fn search_status(&self) -> SearchStatus {
        if is_active_search(&self.search_term) {
            return SearchStatus::Results(self.displayed.len());
        }

        if self.search_term.is_empty() {
            SearchStatus::Idle
        } else {
            SearchStatus::TooShort
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn numbered(count: u32) -> Vec<Contact> {
        (1..=count)
            .map(|id| Contact::new_test(id, &format!("First{}", id), "Tester"))
            .collect()
    }

    fn ids(contacts: &[Contact]) -> Vec<u32> {
        contacts.iter().map(|c| c.id.to_number()).collect()
    }

    mod search {
        use super::*;

        #[test]
        fn short_query_shows_full_set_on_page_one() {
            // Given a list on page 3
            let mut view = ContactListView::new(numbered(100));
            view.go_to_page(3);

            // When a two character query is typed
            view.set_search_term("ab");

            // Then nothing is filtered and the page resets
            assert_eq!(view.displayed(), view.all());
            assert_eq!(view.current_page(), 1);
            assert_eq!(view.search_status(), SearchStatus::TooShort);
        }

        #[test]
        fn active_query_filters_and_resets_page() {
            let mut view = ContactListView::new(vec![
                Contact::new_test(1, "John", "Smith"),
                Contact::new_test(2, "Mary", "Johnson"),
                Contact::new_test(3, "Linda", "Brown"),
            ]);

            view.set_search_term("john");

            assert_eq!(ids(view.displayed()), vec![1, 2]);
            assert_eq!(view.current_page(), 1);
            assert_eq!(view.search_status(), SearchStatus::Results(2));
        }

        #[test]
        fn clear_restores_the_full_set() {
            let mut view = ContactListView::new(numbered(30));
            view.set_search_term("zzz");
            assert!(view.displayed().is_empty());

            view.clear_search();

            assert_eq!(view.displayed().len(), 30);
            assert_eq!(view.search_term(), "");
            assert_eq!(view.search_status(), SearchStatus::Idle);
        }

        #[test]
        fn search_runs_against_the_remaining_set_after_deletion() {
            let mut view = ContactListView::new(vec![
                Contact::new_test(1, "John", "Smith"),
                Contact::new_test(2, "Mary", "Johnson"),
            ]);

            view.delete(ContactId(1));
            view.set_search_term("john");

            assert_eq!(ids(view.displayed()), vec![2]);
        }
    }

    mod delete {
        use super::*;

        #[test]
        fn removes_from_both_sets() {
            // Given a filtered view
            let mut view = ContactListView::new(vec![
                Contact::new_test(1, "John", "Smith"),
                Contact::new_test(2, "Mary", "Johnson"),
                Contact::new_test(3, "Linda", "Brown"),
            ]);
            view.set_search_term("john");

            // When a displayed contact is deleted
            assert!(view.delete(ContactId(2)));

            // Then it is gone from the full and displayed sets
            assert_eq!(ids(view.all()), vec![1, 3]);
            assert_eq!(ids(view.displayed()), vec![1]);
        }

        #[test]
        fn unknown_id_is_a_no_op() {
            let mut view = ContactListView::new(numbered(5));

            assert!(!view.delete(ContactId(99)));
            assert_eq!(view.all().len(), 5);
        }

        #[test]
        fn deleting_only_row_on_last_page_moves_to_new_last_page() {
            // Given 41 contacts, the last page holds a single contact
            let mut view = ContactListView::new(numbered(41));
            assert!(view.go_to_page(3));
            assert_eq!(ids(view.current_page_contacts()), vec![41]);

            // When it is deleted
            view.delete(ContactId(41));

            // Then the view moves to the new last page
            assert_eq!(view.total_pages(), 2);
            assert_eq!(view.current_page(), 2);
        }

        #[test]
        fn deleting_elsewhere_keeps_the_current_page() {
            let mut view = ContactListView::new(numbered(100));
            view.go_to_page(4);

            view.delete(ContactId(1));

            assert_eq!(view.current_page(), 4);
            assert_eq!(view.start_index(), 60);
            assert_eq!(view.current_page_contacts()[0].id, ContactId(62));
        }

        #[test]
        fn deleting_the_last_contact_leaves_page_one() {
            let mut view = ContactListView::new(numbered(1));

            view.delete(ContactId(1));

            assert!(view.displayed().is_empty());
            assert_eq!(view.total_pages(), 0);
            assert_eq!(view.current_page(), 1);
            assert!(view.page_window().is_empty());
        }
    }

    mod paging {
        use super::*;

        #[test]
        fn navigation_is_bounded() {
            let mut view = ContactListView::new(numbered(45));

            assert!(!view.previous_page());
            assert!(view.next_page());
            assert!(view.next_page());
            assert!(!view.next_page());
            assert_eq!(view.current_page(), 3);

            assert!(!view.go_to_page(0));
            assert!(!view.go_to_page(4));
            assert!(view.go_to_page(1));
            assert_eq!(view.current_page(), 1);
        }

        #[test]
        fn pages_hold_twenty_rows() {
            let mut view = ContactListView::new(numbered(45));

            assert_eq!(view.current_page_contacts().len(), 20);
            view.go_to_page(3);
            assert_eq!(view.current_page_contacts().len(), 5);
            assert_eq!(view.start_index(), 40);
        }

        #[test]
        fn mounted_view_has_five_pages() {
            let view = ContactListView::mount(&mut StdRng::seed_from_u64(11), &NamePools::bundled());

            assert_eq!(view.all().len(), 100);
            assert_eq!(view.total_pages(), 5);
            assert_eq!(view.page_window().len(), 5);
        }
    }
}
