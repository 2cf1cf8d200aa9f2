use chrono::{DateTime, Datelike, FixedOffset, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cmp::Reverse;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::{StoreError, StoreResult};
use crate::kv::KeyValueStore;
use crate::models::{DiaryEntry, MoodEntry, UserProfile};

pub const MOOD_ENTRIES_KEY: &str = "mood_entries";
pub const DIARY_ENTRIES_KEY: &str = "diary_entries";
pub const USER_PROFILE_KEY: &str = "user_profile";

/// One writer at a time per collection key.
#[derive(Default)]
struct KeyLocks {
    mood_entries: Mutex<()>,
    diary_entries: Mutex<()>,
    user_profile: Mutex<()>,
}

/// Handle to the three persisted collections.
///
/// Every collection is loaded whole, changed in memory and written back whole.
/// Writes to the same key are serialized so a concurrent save can't drop another
/// one's change. Cloning is cheap; all clones share the medium and the locks.
#[derive(Clone)]
pub struct DiaryStore {
    kv: Arc<dyn KeyValueStore>,
    locks: Arc<KeyLocks>,
}

impl DiaryStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            locks: Arc::new(KeyLocks::default()),
        }
    }

    /// View with the old best-effort contract: failures are logged and
    /// reads degrade to empty.
    pub fn lenient(&self) -> Lenient<'_> {
        Lenient { store: self }
    }

    async fn load<T: DeserializeOwned>(&self, key: &'static str) -> StoreResult<Option<T>> {
        let Some(raw) = self.kv.get(key).await? else {
            return Ok(None);
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Corrupt { key, source })
    }

    async fn write<T: Serialize + ?Sized>(&self, key: &'static str, value: &T) -> StoreResult<()> {
        let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode { key, source })?;
        self.kv.set(key, &raw).await?;
        Ok(())
    }

    // Mood entries

    pub async fn mood_entries(&self) -> StoreResult<Vec<MoodEntry>> {
        Ok(self.load(MOOD_ENTRIES_KEY).await?.unwrap_or_default())
    }

    /// Insert or replace the entry for `entry.date`.
    pub async fn save_mood_entry(&self, entry: MoodEntry) -> StoreResult<()> {
        let _guard = self.locks.mood_entries.lock().await;
        let mut entries = self.mood_entries().await?;

        match entries.iter().position(|e| e.date == entry.date) {
            Some(index) => {
                tracing::debug!("Updated existing mood entry for date: {}", entry.date);
                entries[index] = entry;
            }
            None => {
                tracing::debug!("Added new mood entry for date: {}", entry.date);
                entries.push(entry);
            }
        }

        self.write(MOOD_ENTRIES_KEY, &entries).await?;
        tracing::info!("Mood entry saved. Total entries: {}", entries.len());
        Ok(())
    }

    pub async fn mood_entry_by_date(&self, date: &str) -> StoreResult<Option<MoodEntry>> {
        let entries = self.mood_entries().await?;
        Ok(entries.into_iter().find(|e| e.date == date))
    }

    /// Entries dated within the given month, oldest day first. Entries whose
    /// date does not parse are skipped.
    pub async fn mood_entries_in_month(&self, year: i32, month: u32) -> StoreResult<Vec<MoodEntry>> {
        let mut entries: Vec<MoodEntry> = self
            .mood_entries()
            .await?
            .into_iter()
            .filter(|e| {
                e.day()
                    .is_some_and(|day| day.year() == year && day.month() == month)
            })
            .collect();
        entries.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(entries)
    }

    // Diary entries

    pub async fn diary_entries(&self) -> StoreResult<Vec<DiaryEntry>> {
        Ok(self.load(DIARY_ENTRIES_KEY).await?.unwrap_or_default())
    }

    /// Newest `createdAt` first; entries with an unreadable timestamp sink to the end.
    pub async fn diary_entries_newest_first(&self) -> StoreResult<Vec<DiaryEntry>> {
        let mut entries = self.diary_entries().await?;
        entries.sort_by_key(|e| Reverse(parse_timestamp(&e.created_at)));
        Ok(entries)
    }

    pub async fn diary_entry(&self, id: &str) -> StoreResult<Option<DiaryEntry>> {
        let entries = self.diary_entries().await?;
        Ok(entries.into_iter().find(|e| e.id == id))
    }

    /// Insert or replace by `id`. A replaced entry gets a fresh `updatedAt`.
    /// Returns the entry as stored.
    pub async fn save_diary_entry(&self, entry: DiaryEntry) -> StoreResult<DiaryEntry> {
        let _guard = self.locks.diary_entries.lock().await;
        let mut entries = self.diary_entries().await?;

        let stored = match entries.iter().position(|e| e.id == entry.id) {
            Some(index) => {
                let updated = DiaryEntry {
                    updated_at: Utc::now().to_rfc3339(),
                    ..entry
                };
                tracing::debug!("Updated existing diary entry: {}", updated.id);
                entries[index] = updated.clone();
                updated
            }
            None => {
                tracing::debug!("Added new diary entry: {}", entry.id);
                entries.push(entry.clone());
                entry
            }
        };

        self.write(DIARY_ENTRIES_KEY, &entries).await?;
        tracing::info!("Diary entry saved. Total entries: {}", entries.len());
        Ok(stored)
    }

    /// Append a brand-new entry. Never replaces: while the epoch-ms id is taken
    /// it is bumped by one millisecond. Returns the entry as stored.
    pub async fn insert_diary_entry(&self, mut entry: DiaryEntry) -> StoreResult<DiaryEntry> {
        let _guard = self.locks.diary_entries.lock().await;
        let mut entries = self.diary_entries().await?;

        while entries.iter().any(|e| e.id == entry.id) {
            entry.id = next_id(&entry.id);
        }

        tracing::debug!("Added new diary entry: {}", entry.id);
        entries.push(entry.clone());
        self.write(DIARY_ENTRIES_KEY, &entries).await?;
        tracing::info!("Diary entry saved. Total entries: {}", entries.len());
        Ok(entry)
    }

    /// Replace title and content of an existing entry and stamp `updatedAt`.
    /// `None` when no entry has this id; nothing is written then.
    pub async fn update_diary_entry(
        &self,
        id: &str,
        title: String,
        content: String,
    ) -> StoreResult<Option<DiaryEntry>> {
        let _guard = self.locks.diary_entries.lock().await;
        let mut entries = self.diary_entries().await?;

        let Some(existing) = entries.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        existing.title = title;
        existing.content = content;
        existing.updated_at = Utc::now().to_rfc3339();
        let updated = existing.clone();

        self.write(DIARY_ENTRIES_KEY, &entries).await?;
        tracing::debug!("Updated existing diary entry: {}", updated.id);
        Ok(Some(updated))
    }

    /// Insert or replace by `id` exactly as given, timestamps untouched.
    pub async fn restore_diary_entries(&self, restored: Vec<DiaryEntry>) -> StoreResult<()> {
        let _guard = self.locks.diary_entries.lock().await;
        let mut entries = self.diary_entries().await?;

        for entry in restored {
            match entries.iter().position(|e| e.id == entry.id) {
                Some(index) => entries[index] = entry,
                None => entries.push(entry),
            }
        }

        self.write(DIARY_ENTRIES_KEY, &entries).await
    }

    /// Remove every entry with this id. Unknown ids are not an error.
    pub async fn delete_diary_entry(&self, id: &str) -> StoreResult<()> {
        let _guard = self.locks.diary_entries.lock().await;
        let mut entries = self.diary_entries().await?;

        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            tracing::debug!("No diary entry with id {id} to delete");
            return Ok(());
        }

        self.write(DIARY_ENTRIES_KEY, &entries).await
    }

    // User profile

    pub async fn user_profile(&self) -> StoreResult<Option<UserProfile>> {
        self.load(USER_PROFILE_KEY).await
    }

    pub async fn save_user_profile(&self, profile: &UserProfile) -> StoreResult<()> {
        let _guard = self.locks.user_profile.lock().await;
        self.write(USER_PROFILE_KEY, profile).await
    }

    pub async fn clear_user_profile(&self) -> StoreResult<()> {
        let _guard = self.locks.user_profile.lock().await;
        self.kv.remove(USER_PROFILE_KEY).await?;
        Ok(())
    }

    /// True until a profile with a completed onboarding flag exists.
    pub async fn needs_onboarding(&self) -> StoreResult<bool> {
        let profile = self.user_profile().await?;
        Ok(!profile.is_some_and(|p| p.has_completed_onboarding))
    }
}

fn next_id(id: &str) -> String {
    match id.parse::<i64>().ok().and_then(|millis| millis.checked_add(1)) {
        Some(millis) => millis.to_string(),
        None => format!("{id}-1"),
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).ok()
}

/// Best-effort view over a [`DiaryStore`].
///
/// Callers can't tell a failed read from an empty collection, nor a failed
/// write from a successful one.
pub struct Lenient<'a> {
    store: &'a DiaryStore,
}

fn degrade<T>(context: &str, result: StoreResult<T>, fallback: impl FnOnce() -> T) -> T {
    result.unwrap_or_else(|e| {
        tracing::error!("Error {context}: {e}");
        fallback()
    })
}

impl Lenient<'_> {
    pub async fn mood_entries(&self) -> Vec<MoodEntry> {
        degrade("getting mood entries", self.store.mood_entries().await, Vec::new)
    }

    pub async fn save_mood_entry(&self, entry: MoodEntry) {
        degrade("saving mood entry", self.store.save_mood_entry(entry).await, || ())
    }

    pub async fn mood_entry_by_date(&self, date: &str) -> Option<MoodEntry> {
        degrade(
            "getting mood entry by date",
            self.store.mood_entry_by_date(date).await,
            || None,
        )
    }

    pub async fn diary_entries(&self) -> Vec<DiaryEntry> {
        degrade("getting diary entries", self.store.diary_entries().await, Vec::new)
    }

    pub async fn save_diary_entry(&self, entry: DiaryEntry) {
        let result = self.store.save_diary_entry(entry).await.map(|_| ());
        degrade("saving diary entry", result, || ())
    }

    pub async fn delete_diary_entry(&self, id: &str) {
        degrade("deleting diary entry", self.store.delete_diary_entry(id).await, || ())
    }

    pub async fn user_profile(&self) -> Option<UserProfile> {
        degrade("getting user profile", self.store.user_profile().await, || None)
    }

    pub async fn save_user_profile(&self, profile: &UserProfile) {
        degrade("saving user profile", self.store.save_user_profile(profile).await, || ())
    }

    pub async fn clear_user_profile(&self) {
        degrade("clearing user profile", self.store.clear_user_profile().await, || ())
    }
}
