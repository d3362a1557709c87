use crate::repos::shared::repo::DeleteResult;
use beacon_domain::{Entity, ID};
use std::sync::Mutex;

/// Useful functions for creating inmemory repositories

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    collection.push(val.clone());
}

pub fn save<T: Clone + Entity>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    if let Some(existing) = collection.iter_mut().find(|e| e.id() == val.id()) {
        *existing = val.clone();
    }
}

pub fn find<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let collection = collection.lock().unwrap();
    collection.iter().find(|e| e.id() == val_id).cloned()
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(collection: &Mutex<Vec<T>>, mut compare: F) -> Vec<T> {
    let collection = collection.lock().unwrap();
    collection.iter().filter(|e| compare(e)).cloned().collect()
}

pub fn delete<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    find_and_delete_by(collection, |e| e.id() == val_id).pop()
}

pub fn delete_by<T: Clone, F: Fn(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    compare: F,
) -> DeleteResult {
    DeleteResult {
        deleted_count: find_and_delete_by(collection, compare).len() as i64,
    }
}

pub fn find_and_delete_by<T: Clone, F: Fn(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    compare: F,
) -> Vec<T> {
    let mut collection = collection.lock().unwrap();
    let mut deleted_items = Vec::new();
    let mut i = 0;
    while i < collection.len() {
        if compare(&collection[i]) {
            deleted_items.push(collection.remove(i));
        } else {
            i += 1;
        }
    }

    deleted_items
}

/// Returns the number of updated items
pub fn update_many<T, F: Fn(&T) -> bool, U: Fn(&mut T)>(
    collection: &Mutex<Vec<T>>,
    compare: F,
    update: U,
) -> u64 {
    let mut collection = collection.lock().unwrap();
    let mut updated = 0;
    for item in collection.iter_mut().filter(|e| compare(e)) {
        update(item);
        updated += 1;
    }
    updated
}

/// Updates the first item matching `compare` or inserts `val` when there
/// is none, holding the lock for the whole operation.
pub fn upsert_by<T: Clone, F: Fn(&T) -> bool, U: Fn(&mut T)>(
    val: &T,
    collection: &Mutex<Vec<T>>,
    compare: F,
    update: U,
) -> T {
    let mut collection = collection.lock().unwrap();
    match collection.iter_mut().find(|e| compare(e)) {
        Some(existing) => {
            update(existing);
            existing.clone()
        }
        None => {
            collection.push(val.clone());
            val.clone()
        }
    }
}

/// Inserts `val` only when nothing matches `compare`. Returns whether it was inserted.
pub fn insert_if_absent<T: Clone, F: Fn(&T) -> bool>(
    val: &T,
    collection: &Mutex<Vec<T>>,
    compare: F,
) -> bool {
    let mut collection = collection.lock().unwrap();
    if collection.iter().any(|e| compare(e)) {
        return false;
    }
    collection.push(val.clone());
    true
}
