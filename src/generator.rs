use rand::{seq::SliceRandom, Rng};
use serde::Deserialize;

use crate::{
    consts::consts::{ContactId, CONTACT_COUNT, MAX_CONTACT_AGE, MIN_CONTACT_AGE},
    model::contact::Contact,
};

const BUNDLED_NAMES: &str = include_str!("../data/names.json");

/// Name pools the synthetic contacts are drawn from
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NamePools {
    pub first_names: Vec<String>,
    pub last_names: Vec<String>,
}

impl NamePools {
    pub fn bundled() -> Self {
        serde_json::from_str(BUNDLED_NAMES).expect("bundled name pools should be valid JSON")
    }
}

/// Picks a first name, last name (with replacement) and an age in the contact age range
pub fn generate_contact<R: Rng + ?Sized>(rng: &mut R, pools: &NamePools, id: ContactId) -> Contact {
    let first_name = pools.first_names.choose(rng).cloned().unwrap_or_default();
    let last_name = pools.last_names.choose(rng).cloned().unwrap_or_default();
    let age = rng.gen_range(MIN_CONTACT_AGE..=MAX_CONTACT_AGE);

    Contact::new(id, first_name, last_name, age)
}

/// Generates the full synthetic dataset, ids run from 1 to `CONTACT_COUNT`
pub fn generate_contacts<R: Rng + ?Sized>(rng: &mut R, pools: &NamePools) -> Vec<Contact> {
    let contacts: Vec<Contact> = (1..=CONTACT_COUNT)
        .map(|index| generate_contact(rng, pools, ContactId(index)))
        .collect();

    log::debug!("Generated {} contacts", contacts.len());

    contacts
}
