pub mod diary;
pub mod export;
pub mod moods;
pub mod profile;
