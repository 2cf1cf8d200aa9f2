pub mod diary_entry;
pub mod mood_entry;
pub mod moods;
pub mod profile;

pub use diary_entry::DiaryEntry;
pub use mood_entry::{MoodEntry, DATE_FORMAT};
pub use moods::Mood;
pub use profile::UserProfile;
