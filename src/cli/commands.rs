//! Runs parsed commands against the store and prints the results.

use super::{
    parse_date, parse_id, parse_kind, parse_mood, parse_optional_timestamp, parse_privacy,
    parse_status, Command, DevotionalCommand, EntryAddArgs, EntryCommand, ExportKind,
    MoodCommand, PrayerCommand, ProfileCommand, SubscriptionCommand, VerseCommand,
};
use crate::constants::DATE_FORMAT_ISO;
use crate::db::DataService;
use crate::errors::AppResult;
use crate::export::{to_plain_text, ExportFormat, Exporter, SharePayload};
use crate::models::{
    parse_tags, BibleVerse, Devotional, JournalEntry, MoodEntry, PrayerRequest,
};
use crate::ops::{self, EntryFilter, ProfileUpdate};
use chrono::{Duration, Utc};
use serde::Serialize;
use std::io::{self, Write};
use tracing::debug;

const DEFAULT_PROFILE_NAME: &str = "User";

/// What every command needs.
pub struct Context {
    pub service: DataService,
    pub exporter: Exporter,
    /// Print records as JSON instead of text.
    pub json: bool,
}

/// Runs `command`, writing its output to `out`.
///
/// # Errors
///
/// Propagates any storage, input or I/O error; nothing is printed for it.
pub fn run(command: Command, ctx: &Context, out: &mut dyn Write) -> AppResult<()> {
    debug!("Running command: {:?}", command);

    match command {
        Command::Entry(cmd) => run_entry(cmd, ctx, out),
        Command::Prayer(cmd) => run_prayer(cmd, ctx, out),
        Command::Verse(cmd) => run_verse(cmd, ctx, out),
        Command::Devotional(cmd) => run_devotional(cmd, ctx, out),
        Command::Mood(cmd) => run_mood(cmd, ctx, out),
        Command::Profile(cmd) => run_profile(cmd, ctx, out),
        Command::Subscription(cmd) => run_subscription(cmd, ctx, out),
    }
}

fn print_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> AppResult<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(io::Error::from)?;
    writeln!(out, "{}", rendered)?;
    Ok(())
}

fn tags_suffix(tags: &[String]) -> String {
    if tags.is_empty() {
        String::new()
    } else {
        format!("  [{}]", tags.join(", "))
    }
}

fn build_entry(args: EntryAddArgs) -> AppResult<JournalEntry> {
    let mut entry = JournalEntry::new(args.title, args.content);
    if let Some(date) = parse_optional_timestamp(args.date.as_deref())? {
        entry = entry.with_date(date);
    }
    if let Some(mood) = args.mood.as_deref() {
        entry = entry.with_mood(parse_mood(mood)?);
    }
    if let Some(tags) = args.tags.as_deref() {
        entry = entry.with_tags(parse_tags(tags));
    }
    if let Some(location) = args.location {
        entry = entry.with_location(location);
    }
    if args.private {
        entry = entry.private();
    }
    Ok(entry)
}

fn run_entry(cmd: EntryCommand, ctx: &Context, out: &mut dyn Write) -> AppResult<()> {
    match cmd {
        EntryCommand::Add(args) => {
            let entry = build_entry(args)?;
            ctx.service.save(&entry)?;
            writeln!(out, "{}", entry.id())?;
        }
        EntryCommand::List {
            tag,
            search,
            public_only,
        } => {
            let filter = EntryFilter {
                tag,
                text: search,
                exclude_private: public_only,
            };
            let entries = ops::list_entries(&ctx.service, &filter)?;
            if ctx.json {
                return print_json(out, &entries);
            }
            for entry in &entries {
                writeln!(
                    out,
                    "{}  {}  {}{}{}",
                    entry.id(),
                    entry.date.format(DATE_FORMAT_ISO),
                    entry.title,
                    if entry.is_private { " (private)" } else { "" },
                    tags_suffix(&entry.tags)
                )?;
            }
        }
        EntryCommand::Show { id } => {
            let entry: JournalEntry = ctx.service.require(parse_id(&id)?)?;
            if ctx.json {
                return print_json(out, &entry);
            }
            write!(out, "{}", to_plain_text(&entry))?;
        }
        EntryCommand::Delete { id } => {
            let id = parse_id(&id)?;
            ctx.service.delete_by_id::<JournalEntry>(id)?;
            writeln!(out, "Deleted {}", id)?;
        }
        EntryCommand::Export { id, format } => {
            let format = match format {
                ExportKind::Text => ExportFormat::Text,
                ExportKind::Pdf => ExportFormat::Document,
            };
            match ops::export_entry(&ctx.service, &ctx.exporter, parse_id(&id)?, format)? {
                SharePayload::Text(text) => write!(out, "{}", text)?,
                SharePayload::Document(path) => writeln!(out, "{}", path.display())?,
            }
        }
    }
    Ok(())
}

fn run_prayer(cmd: PrayerCommand, ctx: &Context, out: &mut dyn Write) -> AppResult<()> {
    match cmd {
        PrayerCommand::Add {
            title,
            details,
            tags,
            private,
        } => {
            let mut request = PrayerRequest::new(title, details);
            if let Some(tags) = tags.as_deref() {
                request = request.with_tags(parse_tags(tags));
            }
            if private {
                request = request.private();
            }
            ctx.service.save(&request)?;
            writeln!(out, "{}", request.id())?;
        }
        PrayerCommand::List { status } => {
            let status = status.as_deref().map(parse_status).transpose()?;
            let requests = ops::list_prayers(&ctx.service, status)?;
            if ctx.json {
                return print_json(out, &requests);
            }
            for request in &requests {
                let answered = request
                    .answer_date()
                    .map(|date| format!(" on {}", date.format(DATE_FORMAT_ISO)))
                    .unwrap_or_default();
                writeln!(
                    out,
                    "{}  {}  {}  {}{}",
                    request.id(),
                    request.date.format(DATE_FORMAT_ISO),
                    request.status(),
                    request.title,
                    answered
                )?;
            }
        }
        PrayerCommand::Status { id, status } => {
            let request =
                ops::set_prayer_status(&ctx.service, parse_id(&id)?, parse_status(&status)?)?;
            writeln!(out, "{} is now {}", request.title, request.status())?;
        }
        PrayerCommand::Answer { id, notes, date } => {
            let answered_at = parse_optional_timestamp(date.as_deref())?.unwrap_or_else(Utc::now);
            let request = ops::answer_prayer(&ctx.service, parse_id(&id)?, answered_at, notes)?;
            writeln!(
                out,
                "{} answered on {}",
                request.title,
                answered_at.format(DATE_FORMAT_ISO)
            )?;
        }
    }
    Ok(())
}

fn print_verse(out: &mut dyn Write, verse: &BibleVerse) -> AppResult<()> {
    writeln!(
        out,
        "{} ({}){}",
        verse.reference,
        verse.translation,
        if verse.is_favorite { " *" } else { "" }
    )?;
    writeln!(out, "{}", verse.text)?;
    Ok(())
}

fn run_verse(cmd: VerseCommand, ctx: &Context, out: &mut dyn Write) -> AppResult<()> {
    match cmd {
        VerseCommand::Add {
            text,
            reference,
            translation,
            date,
            notes,
        } => {
            let mut verse = BibleVerse::new(text, reference);
            if let Some(translation) = translation {
                verse = verse.with_translation(translation);
            }
            if let Some(date) = parse_optional_timestamp(date.as_deref())? {
                verse = verse.with_date(date);
            }
            if let Some(notes) = notes {
                verse = verse.with_notes(notes);
            }
            ctx.service.save(&verse)?;
            writeln!(out, "{}", verse.id())?;
        }
        VerseCommand::List { favorites } => {
            let verses: Vec<BibleVerse> = ctx
                .service
                .fetch_all::<BibleVerse>()?
                .into_iter()
                .filter(|verse| !favorites || verse.is_favorite)
                .collect();
            if ctx.json {
                return print_json(out, &verses);
            }
            for verse in &verses {
                writeln!(out, "{}  {}", verse.id(), verse.reference)?;
            }
        }
        VerseCommand::Today { date } => {
            let day = match date.as_deref() {
                Some(raw) => parse_date(raw)?,
                None => Utc::now().date_naive(),
            };
            match ops::verse_of_the_day(&ctx.service, day)? {
                Some(verse) if ctx.json => print_json(out, &verse)?,
                Some(verse) => print_verse(out, &verse)?,
                None => writeln!(
                    out,
                    "No verses saved yet. Add one with `verse add` or run `devotional seed`."
                )?,
            }
        }
        VerseCommand::Favorite { id } => {
            let verse = ops::toggle_verse_favorite(&ctx.service, parse_id(&id)?)?;
            writeln!(
                out,
                "{} {}",
                verse.reference,
                if verse.is_favorite { "added to favorites" } else { "removed from favorites" }
            )?;
        }
    }
    Ok(())
}

fn run_devotional(cmd: DevotionalCommand, ctx: &Context, out: &mut dyn Write) -> AppResult<()> {
    match cmd {
        DevotionalCommand::Add {
            title,
            content,
            author,
            category,
            tags,
        } => {
            let mut devotional = Devotional::new(title, content, author, category);
            if let Some(tags) = tags.as_deref() {
                devotional = devotional.with_tags(parse_tags(tags));
            }
            ctx.service.save(&devotional)?;
            writeln!(out, "{}", devotional.id())?;
        }
        DevotionalCommand::List { pending } => {
            let devotionals = ops::list_devotionals(&ctx.service, pending)?;
            if ctx.json {
                return print_json(out, &devotionals);
            }
            for devotional in &devotionals {
                writeln!(
                    out,
                    "{}  [{}] {} by {} ({}){}",
                    devotional.id(),
                    if devotional.is_completed() { "x" } else { " " },
                    devotional.title,
                    devotional.author,
                    devotional.category,
                    tags_suffix(&devotional.tags)
                )?;
            }
        }
        DevotionalCommand::Complete { id, undo } => {
            let at = if undo { None } else { Some(Utc::now()) };
            let devotional = ops::complete_devotional(&ctx.service, parse_id(&id)?, at)?;
            writeln!(
                out,
                "{} marked {}",
                devotional.title,
                if devotional.is_completed() { "completed" } else { "incomplete" }
            )?;
        }
        DevotionalCommand::Seed => {
            let report = ops::seed_sample_data(&ctx.service)?;
            writeln!(
                out,
                "Added {} devotionals and {} verses",
                report.devotionals, report.verses
            )?;
        }
    }
    Ok(())
}

fn run_mood(cmd: MoodCommand, ctx: &Context, out: &mut dyn Write) -> AppResult<()> {
    match cmd {
        MoodCommand::Log {
            mood,
            intensity,
            notes,
        } => {
            let mut entry = MoodEntry::new(parse_mood(&mood)?, intensity);
            if let Some(notes) = notes {
                entry = entry.with_notes(notes);
            }
            ctx.service.save(&entry)?;
            writeln!(out, "Logged {} ({}/10)", entry.mood, entry.intensity())?;
        }
        MoodCommand::Summary { days } => {
            let since = days.map(|days| Utc::now() - Duration::days(i64::from(days)));
            let summary = ops::mood_summary(&ctx.service, since)?;

            if ctx.json {
                let counts: serde_json::Map<String, serde_json::Value> = summary
                    .counts
                    .iter()
                    .map(|(mood, count)| (mood.to_string(), serde_json::Value::from(*count)))
                    .collect();
                return print_json(
                    out,
                    &serde_json::json!({
                        "total": summary.total,
                        "counts": counts,
                        "average_intensity": summary.average_intensity,
                        "most_frequent": summary.most_frequent.map(|mood| mood.to_string()),
                    }),
                );
            }

            writeln!(out, "Check-ins: {}", summary.total)?;
            if let Some(average) = summary.average_intensity {
                writeln!(out, "Average intensity: {:.1}", average)?;
            }
            if let Some(mood) = summary.most_frequent {
                writeln!(out, "Most frequent: {}", mood)?;
            }
            for (mood, count) in &summary.counts {
                writeln!(out, "  {}: {}", mood, count)?;
            }
        }
    }
    Ok(())
}

fn run_profile(cmd: ProfileCommand, ctx: &Context, out: &mut dyn Write) -> AppResult<()> {
    match cmd {
        ProfileCommand::Show => match ops::current_profile(&ctx.service)? {
            Some(profile) if ctx.json => print_json(out, &profile)?,
            Some(profile) => {
                writeln!(out, "Name: {}", profile.name)?;
                if let Some(email) = &profile.email {
                    writeln!(out, "Email: {}", email)?;
                }
                writeln!(out, "Theme: {}", profile.preferred_theme)?;
                writeln!(out, "Notifications: {}", profile.notifications_enabled)?;
                writeln!(out, "Biometric lock: {}", profile.biometric_enabled)?;
                writeln!(out, "Privacy: {}", profile.privacy_level)?;
            }
            None => writeln!(out, "No profile yet. Create one with `profile set --name <NAME>`.")?,
        },
        ProfileCommand::Set {
            name,
            email,
            theme,
            notifications,
            biometric,
            privacy,
        } => {
            let changes = ProfileUpdate {
                name,
                email,
                preferred_theme: theme,
                notifications_enabled: notifications,
                biometric_enabled: biometric,
                privacy_level: privacy.as_deref().map(parse_privacy).transpose()?,
            };
            let profile = ops::save_profile(&ctx.service, changes, DEFAULT_PROFILE_NAME)?;
            writeln!(out, "Saved profile for {}", profile.name)?;
        }
    }
    Ok(())
}

fn run_subscription(cmd: SubscriptionCommand, ctx: &Context, out: &mut dyn Write) -> AppResult<()> {
    match cmd {
        SubscriptionCommand::Show => match ops::current_subscription(&ctx.service)? {
            Some(subscription) if ctx.json => print_json(out, &subscription)?,
            Some(subscription) => {
                write!(out, "{}", subscription.kind())?;
                if let Some(end) = subscription.end_date() {
                    let state = if subscription.is_expired(Utc::now()) { "ended" } else { "until" };
                    write!(out, " ({} {})", state, end.format(DATE_FORMAT_ISO))?;
                }
                if subscription.auto_renew {
                    write!(out, ", auto-renews")?;
                }
                writeln!(out)?;
            }
            None => writeln!(out, "Free (no subscription recorded)")?,
        },
        SubscriptionCommand::Set {
            kind,
            end_date,
            auto_renew,
        } => {
            let end_date = parse_optional_timestamp(end_date.as_deref())?;
            let subscription =
                ops::set_subscription(&ctx.service, parse_kind(&kind)?, end_date, auto_renew)?;
            writeln!(out, "Subscription is now {}", subscription.kind())?;
        }
    }
    Ok(())
}
