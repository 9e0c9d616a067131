//! Contact list projection with favorites and filtering.
//!
//! # Invariants
//! - `favorites_map` is loaded once and changed only by toggles made here.
//! - The visible list is recomputed after every change to roster, search
//!   text, favorites-only mode or the favorites map.
//! - Toggles are write-then-reflect: the map changes only after the registry
//!   write succeeds.

use super::mutation::{InvalidTransition, MutationState};
use crate::kv::KeyValueStore;
use crate::model::contact::{Contact, ContactId};
use crate::model::favorites::FavoriteSet;
use crate::repo::favorites_repo::FavoritesRegistry;
use crate::repo::RepoResult;
use log::{debug, warn};
use std::collections::HashMap;

/// List screen state.
#[derive(Debug, Default)]
pub struct ContactListState {
    contacts: Vec<Contact>,
    favorites_map: HashMap<ContactId, bool>,
    mutations: HashMap<ContactId, MutationState>,
    search: String,
    favorites_only: bool,
    visible: Vec<usize>,
}

impl ContactListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces roster and favorites projection in one step.
    pub fn load(&mut self, contacts: Vec<Contact>, favorites: &FavoriteSet) {
        self.contacts = contacts;
        self.favorites_map = favorites.iter().map(|id| (id.clone(), true)).collect();
        self.mutations.clear();
        self.refilter();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.refilter();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_favorites_only(&mut self, favorites_only: bool) {
        self.favorites_only = favorites_only;
        self.refilter();
    }

    pub fn favorites_only(&self) -> bool {
        self.favorites_only
    }

    pub fn is_favorite(&self, contact_id: &str) -> bool {
        self.favorites_map.get(contact_id).copied().unwrap_or(false)
    }

    pub fn mutation_state(&self, contact_id: &str) -> MutationState {
        self.mutations.get(contact_id).copied().unwrap_or_default()
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Contacts passing the current filters, in roster order.
    pub fn visible_contacts(&self) -> Vec<&Contact> {
        self.visible.iter().map(|&index| &self.contacts[index]).collect()
    }

    /// Toggles one favorite through the registry, then reflects the persisted
    /// membership. Returns the new membership.
    ///
    /// On storage failure the map is left unchanged and the mutation is
    /// marked rolled back.
    pub fn toggle_favorite<S: KeyValueStore>(
        &mut self,
        registry: &FavoritesRegistry<S>,
        contact_id: &str,
    ) -> RepoResult<bool> {
        let current = self.mutation_state(contact_id);
        let pending = match current.begin() {
            Ok(state) => state,
            Err(err) => {
                // Unreachable while `&mut self` serializes toggles.
                debug!(
                    "event=favorite_toggle module=list_view status=noop contact_id={contact_id} reason={err}"
                );
                return Ok(self.is_favorite(contact_id));
            }
        };
        self.mutations.insert(contact_id.to_string(), pending);

        match registry.toggle_favorite(contact_id) {
            Ok(now_favorite) => {
                self.favorites_map.insert(contact_id.to_string(), now_favorite);
                self.settle(contact_id, pending.commit());
                self.refilter();
                Ok(now_favorite)
            }
            Err(err) => {
                warn!(
                    "event=favorite_toggle module=list_view status=rolled_back contact_id={contact_id} error={err}"
                );
                self.settle(contact_id, pending.roll_back());
                Err(err)
            }
        }
    }

    fn settle(&mut self, contact_id: &str, next: Result<MutationState, InvalidTransition>) {
        let state = next.unwrap_or(MutationState::Idle);
        self.mutations.insert(contact_id.to_string(), state);
    }

    fn refilter(&mut self) {
        let needle = self.search.to_lowercase();
        let favorites_only = self.favorites_only;
        let favorites_map = &self.favorites_map;
        self.visible = self
            .contacts
            .iter()
            .enumerate()
            .filter(|(_, contact)| contact.name_matches(&needle))
            .filter(|(_, contact)| {
                !favorites_only || favorites_map.get(&contact.id).copied().unwrap_or(false)
            })
            .map(|(index, _)| index)
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::ContactListState;
    use crate::model::contact::Contact;
    use crate::model::favorites::FavoriteSet;

    fn roster() -> Vec<Contact> {
        vec![
            Contact::new("1", "Ana"),
            Contact::new("2", "Bruno"),
            Contact::new("3", "Mariana"),
        ]
    }

    fn names(state: &ContactListState) -> Vec<&str> {
        state
            .visible_contacts()
            .into_iter()
            .map(|contact| contact.name.as_str())
            .collect()
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let mut state = ContactListState::new();
        state.load(roster(), &FavoriteSet::new());
        state.set_search("AN");
        assert_eq!(names(&state), ["Ana", "Mariana"]);
        state.set_search("");
        assert_eq!(names(&state).len(), 3);
    }

    #[test]
    fn favorites_only_combines_with_search() {
        let mut state = ContactListState::new();
        let favorites: FavoriteSet = ["2", "3"].into_iter().collect();
        state.load(roster(), &favorites);
        state.set_favorites_only(true);
        assert_eq!(names(&state), ["Bruno", "Mariana"]);
        state.set_search("mar");
        assert_eq!(names(&state), ["Mariana"]);
    }
}
