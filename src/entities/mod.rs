//! Entity module - Contains the SeaORM entity definitions for the database.
//! The persistent store is a single key-value table; every domain collection
//! is one JSON blob under a fixed key.

pub mod store_entry;

pub use store_entry::{Column as StoreEntryColumn, Entity as StoreEntry, Model as StoreEntryModel};
