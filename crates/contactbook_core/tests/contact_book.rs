use contactbook_core::db::open_db_in_memory;
use contactbook_core::{
    Contact, ContactBook, ContactBookError, ContactKind, InMemoryContactDirectory, KeyValueStore,
    MemoryKeyValueStore, MutationState, NewContact, PermissionResource, PhoneNumber, RepoError,
    ScriptedMediaPicker, SqliteKeyValueStore,
};

fn roster() -> Vec<Contact> {
    let mut ana = Contact::new("ana-1", "Ana");
    ana.phone_numbers = vec![PhoneNumber {
        label: "mobile".to_string(),
        number: "11911112222".to_string(),
    }];
    let mut bruno = Contact::new("bruno-2", "Bruno");
    bruno.image_available = true;
    bruno.image_uri = Some("content://contacts/bruno-2/photo".to_string());
    vec![ana, bruno]
}

fn visible_names<D, S>(book: &ContactBook<D, S>) -> Vec<String>
where
    D: contactbook_core::ContactDirectory,
    S: KeyValueStore,
{
    book.list()
        .visible_contacts()
        .into_iter()
        .map(|contact| contact.name.clone())
        .collect()
}

#[test]
fn filter_combines_search_and_favorites_only() {
    let store = MemoryKeyValueStore::new();
    let mut book = ContactBook::new(InMemoryContactDirectory::new(roster()), &store);
    book.favorites().add_favorite("bruno-2").unwrap();
    book.load_contacts().unwrap();

    book.list_mut().set_search("a");
    book.list_mut().set_favorites_only(false);
    assert_eq!(visible_names(&book), ["Ana"]);

    book.list_mut().set_search("");
    book.list_mut().set_favorites_only(true);
    assert_eq!(visible_names(&book), ["Bruno"]);
}

#[test]
fn toggle_reflects_persisted_state_and_refilters() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let mut book = ContactBook::new(InMemoryContactDirectory::new(roster()), store);
    book.load_contacts().unwrap();
    book.list_mut().set_favorites_only(true);
    assert!(visible_names(&book).is_empty());

    assert!(book.toggle_favorite("ana-1").unwrap());
    assert!(book.list().is_favorite("ana-1"));
    assert!(book.favorites().is_favorite("ana-1"));
    assert_eq!(book.list().mutation_state("ana-1"), MutationState::Committed);
    assert_eq!(visible_names(&book), ["Ana"]);

    assert!(!book.toggle_favorite("ana-1").unwrap());
    assert!(!book.favorites().is_favorite("ana-1"));
    assert!(visible_names(&book).is_empty());
}

#[test]
fn failed_toggle_rolls_back_map() {
    let store = MemoryKeyValueStore::new();
    let mut book = ContactBook::new(InMemoryContactDirectory::new(roster()), &store);
    book.load_contacts().unwrap();

    store.set_fail_writes(true);
    let err = book.toggle_favorite("ana-1").unwrap_err();
    assert!(matches!(err, ContactBookError::Repo(RepoError::Storage(_))));
    assert!(!book.list().is_favorite("ana-1"));
    assert_eq!(
        book.list().mutation_state("ana-1"),
        MutationState::RolledBack
    );

    store.set_fail_writes(false);
    assert!(book.toggle_favorite("ana-1").unwrap());
    assert_eq!(book.list().mutation_state("ana-1"), MutationState::Committed);
}

#[test]
fn switching_contacts_drops_previous_notes_and_image() {
    let store = MemoryKeyValueStore::new();
    let mut book = ContactBook::new(InMemoryContactDirectory::new(roster()), &store);
    book.images()
        .set_image_reference("ana-1", "file:///picked/ana.jpg")
        .unwrap();

    book.open_contact("ana-1").unwrap();
    book.add_note("met at the conference").unwrap();
    assert_eq!(book.detail().notes_for("ana-1").map(|notes| notes.len()), Some(1));
    assert_eq!(book.detail().image_for("ana-1"), Some("file:///picked/ana.jpg"));

    book.open_contact("bruno-2").unwrap();
    assert!(book.detail().notes_for("ana-1").is_none());
    assert!(book.detail().image_for("ana-1").is_none());
    assert_eq!(book.detail().notes_for("bruno-2"), Some(&[][..]));
    assert_eq!(
        book.detail().display_image(),
        Some("content://contacts/bruno-2/photo")
    );
}

#[test]
fn open_contact_loads_full_detail() {
    let store = MemoryKeyValueStore::new();
    let mut book = ContactBook::new(InMemoryContactDirectory::new(roster()), &store);
    book.open_contact("ana-1").unwrap();

    let contact = book.detail().contact().unwrap();
    assert_eq!(contact.primary_phone(), Some("11911112222"));
    assert_eq!(book.detail().active_id(), Some("ana-1"));

    let err = book.open_contact("ghost").unwrap_err();
    assert!(matches!(err, ContactBookError::ContactNotFound(id) if id == "ghost"));
    assert!(book.detail().active_id().is_none());
}

#[test]
fn note_operations_require_open_contact() {
    let store = MemoryKeyValueStore::new();
    let mut book = ContactBook::new(InMemoryContactDirectory::new(roster()), &store);
    assert!(matches!(
        book.add_note("orphan"),
        Err(ContactBookError::NoActiveContact)
    ));

    book.open_contact("ana-1").unwrap();
    book.close_contact();
    assert!(matches!(
        book.delete_note(1),
        Err(ContactBookError::NoActiveContact)
    ));
}

#[test]
fn add_and_delete_note_through_detail() {
    let store = MemoryKeyValueStore::new();
    let mut book = ContactBook::new(InMemoryContactDirectory::new(roster()), &store);
    book.open_contact("ana-1").unwrap();

    let err = book.add_note("   ").unwrap_err();
    assert!(matches!(err, ContactBookError::Repo(RepoError::Validation(_))));
    assert!(book.detail().notes().is_empty());

    let first = book.add_note("first").unwrap();
    let second = book.add_note("second").unwrap();
    assert_eq!(book.detail().notes(), [first.clone(), second.clone()]);

    assert!(!book.delete_note(second.id + 1).unwrap());
    assert!(book.delete_note(first.id).unwrap());
    assert_eq!(book.detail().notes(), [second]);

    book.refresh_detail().unwrap();
    assert_eq!(book.detail().notes().len(), 1);
}

#[test]
fn pick_image_stores_reference_and_handles_cancel() {
    let store = MemoryKeyValueStore::new();
    let mut book = ContactBook::new(InMemoryContactDirectory::new(roster()), &store);
    book.open_contact("ana-1").unwrap();

    let picker = ScriptedMediaPicker::new([
        None,
        Some("file:///cache/ImagePicker/".to_string()),
        Some("file:///cache/ImagePicker/a1.jpg".to_string()),
    ]);

    assert_eq!(book.pick_image(&picker).unwrap(), None);
    assert_eq!(book.detail().display_image(), None);

    assert!(matches!(
        book.pick_image(&picker),
        Err(ContactBookError::InvalidImage(_))
    ));

    let stored = book.pick_image(&picker).unwrap();
    assert_eq!(stored.as_deref(), Some("file:///cache/ImagePicker/a1.jpg"));
    assert_eq!(
        book.images().get_image_reference("ana-1").as_deref(),
        Some("file:///cache/ImagePicker/a1.jpg")
    );
    assert_eq!(
        book.detail().display_image(),
        Some("file:///cache/ImagePicker/a1.jpg")
    );
}

#[test]
fn denied_permissions_abort() {
    let store = MemoryKeyValueStore::new();
    let mut book = ContactBook::new(InMemoryContactDirectory::denied(), &store);
    assert!(matches!(
        book.load_contacts(),
        Err(ContactBookError::PermissionDenied(PermissionResource::Contacts))
    ));
    assert!(matches!(
        book.add_contact(NewContact {
            name: "Carla".to_string(),
            ..NewContact::default()
        }),
        Err(ContactBookError::PermissionDenied(PermissionResource::Contacts))
    ));

    let mut book = ContactBook::new(InMemoryContactDirectory::new(roster()), &store);
    book.open_contact("ana-1").unwrap();
    assert!(matches!(
        book.pick_image(&ScriptedMediaPicker::denied()),
        Err(ContactBookError::PermissionDenied(
            PermissionResource::MediaLibrary
        ))
    ));
    assert!(store.is_empty());
}

#[test]
fn add_contact_validates_and_refreshes_roster() {
    let store = MemoryKeyValueStore::new();
    let mut book = ContactBook::new(InMemoryContactDirectory::new(roster()), &store);
    book.load_contacts().unwrap();

    assert!(matches!(
        book.add_contact(NewContact::default()),
        Err(ContactBookError::InvalidContact(_))
    ));
    assert_eq!(book.directory().len(), 2);

    let id = book
        .add_contact(NewContact {
            name: "Carla".to_string(),
            kind: ContactKind::from_form_value("Empresa"),
            phone: "1133334444".to_string(),
            email: "carla@example.com".to_string(),
            address: "Rua B, 20".to_string(),
        })
        .unwrap();

    assert_eq!(book.list().contacts().len(), 3);
    book.open_contact(&id).unwrap();
    let contact = book.detail().contact().unwrap();
    assert_eq!(contact.kind, ContactKind::Company);
    assert_eq!(contact.emails[0].email, "carla@example.com");
}
