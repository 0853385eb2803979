//! High-level operations on journal records.
//!
//! This module provides the user-facing workflows behind each command:
//! answering prayers, completing devotionals, picking the verse of the day,
//! summarizing moods and seeding sample content. Every operation takes the
//! [`DataService`](crate::db::DataService) it works against.

pub mod account;
pub mod devotionals;
pub mod journal;
pub mod mood;
pub mod prayer;
pub mod seed;
pub mod verses;

// Re-export commonly used functions
pub use account::{
    current_profile, current_subscription, save_profile, set_subscription, ProfileUpdate,
};
pub use devotionals::{complete_devotional, list_devotionals};
pub use journal::{export_entry, list_entries, EntryFilter};
pub use mood::{mood_summary, summarize_moods, MoodSummary};
pub use prayer::{answer_prayer, list_prayers, set_prayer_status};
pub use seed::{seed_sample_data, SeedReport};
pub use verses::{pick_verse_for_day, toggle_verse_favorite, verse_of_the_day};
