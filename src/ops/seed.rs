//! Sample devotionals and verses for a fresh journal.

use crate::db::DataService;
use crate::errors::AppResult;
use crate::models::{BibleVerse, Devotional};
use tracing::info;

struct SampleDevotional {
    title: &'static str,
    content: &'static str,
    author: &'static str,
    category: &'static str,
    tags: &'static [&'static str],
}

const SAMPLE_DEVOTIONALS: &[SampleDevotional] = &[
    SampleDevotional {
        title: "Finding Peace in God's Presence",
        content: "In the midst of life's chaos, we often forget that God is always with us. Take a moment today to simply be still and know that He is God. His presence brings peace that surpasses all understanding.",
        author: "Sarah Johnson",
        category: "Peace",
        tags: &["peace", "presence", "meditation"],
    },
    SampleDevotional {
        title: "The Power of Gratitude",
        content: "Gratitude transforms our perspective and opens our hearts to God's blessings. When we focus on what we have rather than what we lack, we discover joy in unexpected places.",
        author: "Michael Chen",
        category: "Gratitude",
        tags: &["gratitude", "joy", "blessings"],
    },
    SampleDevotional {
        title: "Walking in Faith",
        content: "Faith is not the absence of doubt, but the courage to trust God even when we don't understand. Each step of faith brings us closer to His perfect plan for our lives.",
        author: "David Rodriguez",
        category: "Faith",
        tags: &["faith", "trust", "courage"],
    },
    SampleDevotional {
        title: "God's Unfailing Love",
        content: "No matter what you've done or where you've been, God's love for you never changes. His love is unconditional, unfailing, and everlasting. Rest in that truth today.",
        author: "Emily Thompson",
        category: "Love",
        tags: &["love", "forgiveness", "grace"],
    },
    SampleDevotional {
        title: "Finding Strength in Weakness",
        content: "When we feel weak and inadequate, that's when God's strength is most evident. His power is made perfect in our weakness. Don't be afraid to admit your need for Him.",
        author: "James Wilson",
        category: "Strength",
        tags: &["strength", "weakness", "power"],
    },
];

/// (reference, text), all NIV.
const SAMPLE_VERSES: &[(&str, &str)] = &[
    ("Jeremiah 29:11", "For I know the plans I have for you, declares the Lord, plans to prosper you and not to harm you, plans to give you hope and a future."),
    ("Philippians 4:13", "I can do all this through him who gives me strength."),
    ("Joshua 1:9", "Be strong and courageous. Do not be afraid; do not be discouraged, for the Lord your God will be with you wherever you go."),
    ("Proverbs 3:5-6", "Trust in the Lord with all your heart and lean not on your own understanding; in all your ways submit to him, and he will make your paths straight."),
    ("Psalm 23:1", "The Lord is my shepherd, I lack nothing."),
];

/// How many sample records a seeding run added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub devotionals: usize,
    pub verses: usize,
}

/// Adds the sample devotionals and verses to tables that are still empty.
///
/// Running it again is a no-op for any table that already has content.
pub fn seed_sample_data(service: &DataService) -> AppResult<SeedReport> {
    let mut report = SeedReport::default();

    let existing_devotionals: Vec<Devotional> = service.fetch_all()?;
    if existing_devotionals.is_empty() {
        for sample in SAMPLE_DEVOTIONALS {
            let devotional =
                Devotional::new(sample.title, sample.content, sample.author, sample.category)
                    .with_tags(sample.tags.iter().map(|tag| tag.to_string()).collect());
            service.save(&devotional)?;
            report.devotionals += 1;
        }
    }

    let existing_verses: Vec<BibleVerse> = service.fetch_all()?;
    if existing_verses.is_empty() {
        for (reference, text) in SAMPLE_VERSES {
            service.save(&BibleVerse::new(*text, *reference))?;
            report.verses += 1;
        }
    }

    info!(
        "Seeded {} devotionals and {} verses",
        report.devotionals, report.verses
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::test_support::test_service;

    #[test]
    fn test_seed_once() {
        let service = test_service();

        let first = seed_sample_data(&service).unwrap();
        assert_eq!(
            first,
            SeedReport {
                devotionals: SAMPLE_DEVOTIONALS.len(),
                verses: SAMPLE_VERSES.len(),
            }
        );

        let second = seed_sample_data(&service).unwrap();
        assert_eq!(second, SeedReport::default());

        let verses: Vec<BibleVerse> = service.fetch_all().unwrap();
        assert_eq!(verses.len(), SAMPLE_VERSES.len());
        assert!(verses.iter().all(|verse| verse.translation == "NIV"));
        assert_eq!(verses[0].reference, "Jeremiah 29:11");
    }
}
