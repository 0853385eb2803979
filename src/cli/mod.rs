//! Command-line interface.
//!
//! Argument definitions live here; [`commands`] runs them against the store.

pub mod commands;

use crate::constants::{
    APP_DESCRIPTION, APP_NAME, DATE_FORMAT_COMPACT, LOG_FORMAT_JSON, LOG_FORMAT_TEXT,
};
use crate::errors::{AppError, AppResult};
use crate::models::{Mood, PrayerStatus, PrivacyLevel, SubscriptionKind};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::str::FromStr;
use uuid::Uuid;

/// Top-level arguments.
#[derive(Parser, Debug)]
#[command(name = APP_NAME, about = APP_DESCRIPTION, version, long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Print verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Log output format (overrides FAITH_JOURNAL_LOG_FORMAT)
    #[arg(long, global = true, value_parser = [LOG_FORMAT_TEXT, LOG_FORMAT_JSON])]
    pub log_format: Option<String>,

    /// Print records as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Journal entries
    #[command(subcommand)]
    Entry(EntryCommand),

    /// Prayer requests
    #[command(subcommand)]
    Prayer(PrayerCommand),

    /// Bible verses and the verse of the day
    #[command(subcommand)]
    Verse(VerseCommand),

    /// Devotionals
    #[command(subcommand)]
    Devotional(DevotionalCommand),

    /// Mood check-ins
    #[command(subcommand)]
    Mood(MoodCommand),

    /// The user profile
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// The subscription record
    #[command(subcommand)]
    Subscription(SubscriptionCommand),
}

#[derive(Subcommand, Debug)]
pub enum EntryCommand {
    /// Write a new entry
    Add(EntryAddArgs),

    /// List entries, newest first
    List {
        /// Only entries with this tag
        #[arg(long)]
        tag: Option<String>,

        /// Only entries whose title or content contains this text
        #[arg(long)]
        search: Option<String>,

        /// Hide private entries
        #[arg(long)]
        public_only: bool,
    },

    /// Print one entry as plain text
    Show { id: String },

    /// Delete an entry
    Delete { id: String },

    /// Export an entry as text or as a PDF document
    Export {
        id: String,

        #[arg(long, value_enum, default_value_t = ExportKind::Text)]
        format: ExportKind,
    },
}

#[derive(Args, Debug)]
pub struct EntryAddArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub content: String,

    /// Entry date (format: YYYY-MM-DD or YYYYMMDD); defaults to now
    #[arg(short = 'd', long)]
    pub date: Option<String>,

    #[arg(long)]
    pub mood: Option<String>,

    /// Comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub private: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportKind {
    Text,
    Pdf,
}

#[derive(Subcommand, Debug)]
pub enum PrayerCommand {
    /// Add a prayer request
    Add {
        #[arg(long)]
        title: String,

        #[arg(long)]
        details: String,

        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,

        #[arg(long)]
        private: bool,
    },

    /// List prayer requests, newest first
    List {
        /// Only requests with this status (active, answered, archived)
        #[arg(long)]
        status: Option<String>,
    },

    /// Change the status of a request
    Status { id: String, status: String },

    /// Mark a request answered
    Answer {
        id: String,

        #[arg(long)]
        notes: Option<String>,

        /// Answer date (format: YYYY-MM-DD or YYYYMMDD); defaults to now
        #[arg(short = 'd', long)]
        date: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum VerseCommand {
    /// Save a verse
    Add {
        #[arg(long)]
        text: String,

        #[arg(long)]
        reference: String,

        #[arg(long)]
        translation: Option<String>,

        /// Day to feature the verse (format: YYYY-MM-DD or YYYYMMDD)
        #[arg(short = 'd', long)]
        date: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// List verses by reference
    List {
        #[arg(long)]
        favorites: bool,
    },

    /// Show the verse of the day
    Today {
        /// Day to look up (format: YYYY-MM-DD or YYYYMMDD); defaults to today
        #[arg(short = 'd', long)]
        date: Option<String>,
    },

    /// Toggle a verse's favorite flag
    Favorite { id: String },
}

#[derive(Subcommand, Debug)]
pub enum DevotionalCommand {
    /// Add a devotional
    Add {
        #[arg(long)]
        title: String,

        #[arg(long)]
        content: String,

        #[arg(long)]
        author: String,

        #[arg(long)]
        category: String,

        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },

    /// List devotionals, newest first
    List {
        /// Hide completed devotionals
        #[arg(long)]
        pending: bool,
    },

    /// Mark a devotional completed
    Complete {
        id: String,

        /// Mark it incomplete instead
        #[arg(long)]
        undo: bool,
    },

    /// Add sample devotionals and verses to an empty journal
    Seed,
}

#[derive(Subcommand, Debug)]
pub enum MoodCommand {
    /// Record a mood check-in
    Log {
        mood: String,

        /// Intensity from 1 to 10; values outside are clamped
        intensity: u8,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Summarize check-ins
    Summary {
        /// Only the last N days
        #[arg(long)]
        days: Option<u32>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Show the profile
    Show,

    /// Create or change the profile
    Set {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        theme: Option<String>,

        #[arg(long)]
        notifications: Option<bool>,

        #[arg(long)]
        biometric: Option<bool>,

        /// public, friends or private
        #[arg(long)]
        privacy: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum SubscriptionCommand {
    /// Show the subscription
    Show,

    /// Change the subscription tier
    Set {
        /// free, premium or family
        kind: String,

        /// End date for paid tiers (format: YYYY-MM-DD or YYYYMMDD); omitted keeps the current one
        #[arg(long)]
        end_date: Option<String>,

        #[arg(long)]
        auto_renew: Option<bool>,
    },
}

/// Parses a date in YYYY-MM-DD or YYYYMMDD form.
pub fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::from_str(raw)
        .or_else(|_| NaiveDate::parse_from_str(raw, DATE_FORMAT_COMPACT))
        .map_err(|e| AppError::InvalidInput(format!("Invalid date format '{}': {}", raw, e)))
}

/// Noon UTC on `day`, so the stored timestamp falls on that day in UTC.
pub fn day_to_timestamp(day: NaiveDate) -> AppResult<DateTime<Utc>> {
    let noon = day
        .and_hms_opt(12, 0, 0)
        .ok_or_else(|| AppError::InvalidInput(format!("Invalid date: {}", day)))?;
    Ok(Utc.from_utc_datetime(&noon))
}

/// Parses an optional date argument into a timestamp.
pub fn parse_optional_timestamp(raw: Option<&str>) -> AppResult<Option<DateTime<Utc>>> {
    raw.map(|raw| parse_date(raw).and_then(day_to_timestamp))
        .transpose()
}

pub fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|e| AppError::InvalidInput(format!("Invalid id '{}': {}", raw, e)))
}

pub fn parse_mood(raw: &str) -> AppResult<Mood> {
    raw.parse()
}

pub fn parse_status(raw: &str) -> AppResult<PrayerStatus> {
    raw.parse()
}

pub fn parse_privacy(raw: &str) -> AppResult<PrivacyLevel> {
    raw.parse()
}

pub fn parse_kind(raw: &str) -> AppResult<SubscriptionKind> {
    raw.parse()
}
