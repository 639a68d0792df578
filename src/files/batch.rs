//! Splitting collections into upload-sized batches.

use super::{FileCollection, UpdateCollection};

/// Largest number of files the service accepts in one request.
pub const MAX_FILES_PER_BATCH: usize = 20;

/// A keyed collection that can be partitioned into batches.
pub trait Batchable: Sized {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys in iteration order.
    fn batch_keys(&self) -> Vec<String>;

    /// A collection with no files, carrying over the collection-wide settings.
    fn empty_like(&self) -> Self;

    /// Copy everything stored under `key` into `target`.
    fn copy_entry(&self, key: &str, target: &mut Self);
}

impl Batchable for FileCollection {
    fn len(&self) -> usize {
        FileCollection::len(self)
    }

    fn batch_keys(&self) -> Vec<String> {
        self.keys().map(str::to_string).collect()
    }

    fn empty_like(&self) -> Self {
        FileCollection::new(self.options().clone())
    }

    fn copy_entry(&self, key: &str, target: &mut Self) {
        if let Some(file) = self.get(key) {
            target.insert(file);
        }
    }
}

impl Batchable for UpdateCollection {
    fn len(&self) -> usize {
        UpdateCollection::len(self)
    }

    fn batch_keys(&self) -> Vec<String> {
        self.collection().batch_keys()
    }

    fn empty_like(&self) -> Self {
        UpdateCollection::from(self.collection().empty_like())
    }

    fn copy_entry(&self, key: &str, target: &mut Self) {
        self.collection().copy_entry(key, target.collection_mut());
        if let Some(new_name) = self.new_name(key) {
            target.rename(key, new_name);
        }
    }
}

/// Split into batches of at most [`MAX_FILES_PER_BATCH`] files.
pub fn into_batches<T: Batchable>(collection: T) -> Vec<T> {
    into_batches_of(collection, MAX_FILES_PER_BATCH)
}

/// Split into batches of at most `cap` files, keeping key order.
///
/// A collection that already fits (including an empty one) comes back
/// unchanged as the only batch.
pub fn into_batches_of<T: Batchable>(collection: T, cap: usize) -> Vec<T> {
    let cap = cap.max(1);
    if collection.len() <= cap {
        return vec![collection];
    }

    let keys = collection.batch_keys();
    let mut batches: Vec<T> = (0..keys.len().div_ceil(cap))
        .map(|_| collection.empty_like())
        .collect();

    for (position, key) in keys.iter().enumerate() {
        collection.copy_entry(key, &mut batches[position / cap]);
    }

    batches
}
