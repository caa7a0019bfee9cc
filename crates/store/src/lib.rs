//! # Storefront Store
//!
//! An embedded document store: typed collections of JSON documents over a
//! pluggable ordered key-value backend.
//!
//! ## Core Features
//!
//! - **Pluggable Backends**: every backend implements [`StoreBackend`].
//!   - An in-memory `BTreeMap` backend for tests and ephemeral runs.
//!   - A redb backend for persistent on-disk storage (`backend-redb`
//!     feature, on by default).
//! - **Typed Collections**: a type implementing [`Document`] gets a
//!   [`Collection`] with insert, lookup, update, delete and text search.
//! - **Managed Fields**: documents are wrapped in [`Stored`], which carries
//!   the generated [`DocumentId`] and `createdAt`/`updatedAt` timestamps.
//! - **Unique Keys**: a document can declare fields that must be unique
//!   within its collection.
//!
//! ## Example Usage
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use store::{Document, DocumentStore};
//!
//! #[derive(Clone, Debug, Serialize, Deserialize)]
//! struct Note {
//!     title: String,
//! }
//!
//! impl Document for Note {
//!     const COLLECTION: &'static str = "note";
//!
//!     fn text_fields(&self) -> Vec<&str> {
//!         vec![&self.title]
//!     }
//! }
//!
//! let store = DocumentStore::in_memory();
//! let notes = store.collection::<Note>();
//! let created = notes.insert(Note { title: "Rust ownership".into() }).unwrap();
//!
//! let fetched = notes.find_by_id(&created.id).unwrap().unwrap();
//! assert_eq!(fetched.title, "Rust ownership");
//! assert_eq!(notes.text_search("rust").unwrap().len(), 1);
//! ```

mod backend;
mod error;
mod id;
pub mod text;

pub use backend::{BackendConfig, InMemoryBackend, StoreBackend};
#[cfg(feature = "backend-redb")]
pub use backend::RedbBackend;
pub use error::StoreError;
pub use id::{DocumentId, ID_HEX_LEN, InvalidId};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard};

/// A type that can be stored in a [`Collection`].
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection name, used as the key prefix.
    const COLLECTION: &'static str;

    /// `(field, value)` pairs that must not repeat across the collection.
    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Fields searched by [`Collection::text_search`].
    fn text_fields(&self) -> Vec<&str> {
        Vec::new()
    }
}

/// A document together with its store-managed fields.
///
/// On the wire the managed fields sit next to the document's own fields:
/// `{ "_id": "...", "createdAt": "...", "updatedAt": "...", ... }`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stored<T> {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub data: T,
}

impl<T> Stored<T> {
    pub fn into_inner(self) -> T {
        self.data
    }
}

impl<T> Deref for Stored<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

impl<T> DerefMut for Stored<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.data
    }
}

/// Owns a backend and hands out typed collections.
pub struct DocumentStore {
    backend: Box<dyn StoreBackend>,
    /// Serializes read-check-write sequences so unique keys hold.
    write_lock: Mutex<()>,
}

impl DocumentStore {
    /// Open a store on the configured backend.
    pub fn open(cfg: &BackendConfig) -> Result<Self, StoreError> {
        let backend = cfg.build()?;
        Ok(Self::with_backend(backend))
    }

    /// Build a store around a custom backend.
    pub fn with_backend(backend: Box<dyn StoreBackend>) -> Self {
        Self {
            backend,
            write_lock: Mutex::new(()),
        }
    }

    pub fn in_memory() -> Self {
        Self::with_backend(Box::new(InMemoryBackend::new()))
    }

    pub fn collection<T: Document>(&self) -> Collection<'_, T> {
        Collection {
            store: self,
            _marker: PhantomData,
        }
    }

    pub fn flush(&self) -> Result<(), StoreError> {
        self.backend.flush()
    }

    fn lock_writes(&self) -> Result<MutexGuard<'_, ()>, StoreError> {
        self.write_lock
            .lock()
            .map_err(|_| StoreError::backend("poisoned write lock"))
    }
}

/// Typed view over one collection of a [`DocumentStore`].
pub struct Collection<'a, T> {
    store: &'a DocumentStore,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Document> Collection<'_, T> {
    fn prefix() -> String {
        format!("{}/", T::COLLECTION)
    }

    fn key(id: &DocumentId) -> String {
        format!("{}/{id}", T::COLLECTION)
    }

    fn encode(doc: &Stored<T>) -> Result<Vec<u8>, StoreError> {
        serde_json::to_vec(doc).map_err(|e| StoreError::Encode(e.to_string()))
    }

    fn decode(data: &[u8]) -> Result<Stored<T>, StoreError> {
        serde_json::from_slice(data).map_err(|e| StoreError::Decode(e.to_string()))
    }

    /// Insert a new document under a fresh id.
    pub fn insert(&self, data: T) -> Result<Stored<T>, StoreError> {
        let _guard = self.store.lock_writes()?;
        self.ensure_unique(&data, None)?;

        let now = Utc::now();
        let doc = Stored {
            id: DocumentId::new(),
            created_at: now,
            updated_at: now,
            data,
        };
        self.store.backend.put(&Self::key(&doc.id), &Self::encode(&doc)?)?;
        tracing::debug!(collection = T::COLLECTION, id = %doc.id, "document inserted");
        Ok(doc)
    }

    pub fn find_by_id(&self, id: &DocumentId) -> Result<Option<Stored<T>>, StoreError> {
        match self.store.backend.get(&Self::key(id))? {
            Some(data) => Ok(Some(Self::decode(&data)?)),
            None => Ok(None),
        }
    }

    /// All documents matching `predicate`, in id order.
    pub fn find<P>(&self, mut predicate: P) -> Result<Vec<Stored<T>>, StoreError>
    where
        P: FnMut(&Stored<T>) -> bool,
    {
        let mut found = Vec::new();
        self.scan(&mut |doc: Stored<T>| {
            if predicate(&doc) {
                found.push(doc);
            }
            Ok(())
        })?;
        Ok(found)
    }

    /// The first document, in id order, matching `predicate`.
    pub fn find_one<P>(&self, mut predicate: P) -> Result<Option<Stored<T>>, StoreError>
    where
        P: FnMut(&Stored<T>) -> bool,
    {
        let mut found = None;
        self.scan(&mut |doc: Stored<T>| {
            if found.is_none() && predicate(&doc) {
                found = Some(doc);
            }
            Ok(())
        })?;
        Ok(found)
    }

    pub fn all(&self) -> Result<Vec<Stored<T>>, StoreError> {
        self.find(|_| true)
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        let mut count = 0;
        self.store
            .backend
            .scan_prefix(&Self::prefix(), &mut |_: &str, _: &[u8]| {
                count += 1;
                Ok(())
            })?;
        Ok(count)
    }

    /// Apply `update` to the document with `id`.
    ///
    /// `_id` and `createdAt` are preserved and `updatedAt` is bumped. Returns
    /// `None` when no such document exists.
    pub fn update_by_id<F>(&self, id: &DocumentId, update: F) -> Result<Option<Stored<T>>, StoreError>
    where
        F: FnOnce(&mut T),
    {
        let _guard = self.store.lock_writes()?;
        let Some(mut doc) = self.find_by_id(id)? else {
            return Ok(None);
        };

        update(&mut doc.data);
        self.ensure_unique(&doc.data, Some(id))?;
        doc.updated_at = Utc::now();

        self.store.backend.put(&Self::key(id), &Self::encode(&doc)?)?;
        tracing::debug!(collection = T::COLLECTION, %id, "document updated");
        Ok(Some(doc))
    }

    /// Remove the document with `id`, returning it if it existed.
    pub fn delete_by_id(&self, id: &DocumentId) -> Result<Option<Stored<T>>, StoreError> {
        let _guard = self.store.lock_writes()?;
        let Some(doc) = self.find_by_id(id)? else {
            return Ok(None);
        };
        self.store.backend.delete(&Self::key(id))?;
        tracing::debug!(collection = T::COLLECTION, %id, "document deleted");
        Ok(Some(doc))
    }

    /// Remove every document matching `predicate`, returning how many went.
    pub fn delete_many<P>(&self, predicate: P) -> Result<usize, StoreError>
    where
        P: FnMut(&Stored<T>) -> bool,
    {
        let _guard = self.store.lock_writes()?;
        let doomed = self.find(predicate)?;
        for doc in &doomed {
            self.store.backend.delete(&Self::key(&doc.id))?;
        }
        Ok(doomed.len())
    }

    /// Case-insensitive word search over each document's text fields.
    ///
    /// A document matches when at least one query word appears in it. Results
    /// are ordered by the number of distinct matched words, then by id.
    pub fn text_search(&self, query: &str) -> Result<Vec<Stored<T>>, StoreError> {
        let terms = text::query_terms(query);
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let mut scored = Vec::new();
        self.scan(&mut |doc: Stored<T>| {
            let score = text::score(&terms, &doc.text_fields());
            if score > 0 {
                scored.push((score, doc));
            }
            Ok(())
        })?;

        // Stable sort keeps id order among equal scores.
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(scored.into_iter().map(|(_, doc)| doc).collect())
    }

    fn scan(
        &self,
        visitor: &mut dyn FnMut(Stored<T>) -> Result<(), StoreError>,
    ) -> Result<(), StoreError> {
        self.store
            .backend
            .scan_prefix(&Self::prefix(), &mut |_: &str, data: &[u8]| {
                visitor(Self::decode(data)?)
            })
    }

    fn ensure_unique(&self, candidate: &T, except: Option<&DocumentId>) -> Result<(), StoreError> {
        let wanted = candidate.unique_keys();
        if wanted.is_empty() {
            return Ok(());
        }

        let mut clash = None;
        self.scan(&mut |doc: Stored<T>| {
            if clash.is_some() || Some(&doc.id) == except {
                return Ok(());
            }
            let existing = doc.unique_keys();
            clash = wanted.iter().find(|key| existing.contains(*key)).cloned();
            Ok(())
        })?;

        match clash {
            Some((field, value)) => Err(StoreError::Duplicate { field, value }),
            None => Ok(()),
        }
    }
}
