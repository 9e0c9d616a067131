//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `contactbook_core` linkage and run one end-to-end pass over the
//!   favorites/notes stores.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `contactbook_cli [config.json]`

use contactbook_core::{
    format_phone_number, Contact, ContactBook, CoreConfig, InMemoryContactDirectory, PhoneNumber,
    SqliteKeyValueStore,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("contactbook_core ping={}", contactbook_core::ping());
    println!("contactbook_core version={}", contactbook_core::core_version());

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("contactbook_cli error={err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => CoreConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => CoreConfig::default(),
    };
    config.init_logging()?;
    let conn = config.open_store()?;

    let mut sample = Contact::new("smoke-1", "Smoke Contact");
    sample.phone_numbers = vec![PhoneNumber {
        label: "mobile".to_string(),
        number: "11987654321".to_string(),
    }];
    let directory = InMemoryContactDirectory::new(vec![sample]);
    let mut book = ContactBook::new(directory, SqliteKeyValueStore::new(&conn));

    let total = book.load_contacts()?;
    println!("contacts={total}");
    for contact in book.list().visible_contacts() {
        println!(
            "contact id={} phone={}",
            contact.id,
            contact
                .primary_phone()
                .map(format_phone_number)
                .unwrap_or_else(|| "-".to_string())
        );
    }

    let favorite = book.toggle_favorite("smoke-1")?;
    println!("favorite smoke-1={favorite}");

    book.open_contact("smoke-1")?;
    book.add_note("smoke check")?;
    println!("notes smoke-1={}", book.detail().notes().len());
    Ok(())
}
