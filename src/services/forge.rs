//! Synthetic message generation backing the `forge` command.

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use rand::Rng;
use sqlx::SqlitePool;

use crate::databases::{self, messages};

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Brian", "Claude", "Dennis", "Donald", "Edsger",
    "Frances", "Grace", "John", "Katherine", "Ken", "Leslie", "Linus", "Margaret",
    "Niklaus", "Radia", "Robin", "Tim",
];

const LAST_NAMES: &[&str] = &[
    "Baker", "Carter", "Diaz", "Evans", "Fischer", "Garcia", "Hughes", "Ivanov",
    "Jensen", "Kim", "Larsen", "Moreau", "Nguyen", "Olsen", "Patel", "Quinn",
    "Rossi", "Silva", "Tanaka", "Weber",
];

const WORDS: &[&str] = &[
    "about", "again", "board", "bright", "coffee", "corner", "day", "evening",
    "everyone", "finally", "found", "friend", "garden", "good", "great", "happy",
    "hello", "here", "little", "lovely", "message", "morning", "nice", "place",
    "quiet", "rain", "reading", "really", "saying", "small", "spring", "stop",
    "summer", "sun", "thanks", "thing", "today", "visit", "walk", "weather",
    "week", "wonderful", "world", "write",
];

pub fn fake_name(rng: &mut impl Rng) -> String {
    format!(
        "{} {}",
        FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())],
        LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())],
    )
}

pub fn fake_sentence(rng: &mut impl Rng) -> String {
    let count = rng.gen_range(4..=9);
    let words: Vec<&str> = (0..count)
        .map(|_| WORDS[rng.gen_range(0..WORDS.len())])
        .collect();

    let mut sentence = words.join(" ");
    if let Some(first) = sentence.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    sentence.push('.');
    sentence
}

/// A random instant between the start of the current year and now.
pub fn fake_timestamp_this_year(rng: &mut impl Rng) -> DateTime<Utc> {
    let now = Utc::now();
    let year_start = Utc
        .with_ymd_and_hms(now.year(), 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(now);
    let span = (now - year_start).num_seconds().max(1);
    year_start + Duration::seconds(rng.gen_range(0..span))
}

/// Drop everything and refill the store with `count` fake messages.
/// Deliberately does not prompt; this is a development-only command.
pub async fn run(pool: &SqlitePool, count: u32) -> Result<()> {
    databases::drop_all(pool).await?;
    databases::create_all(pool).await?;

    let records: Vec<(String, String, DateTime<Utc>)> = {
        let mut rng = rand::thread_rng();
        (0..count)
            .map(|_| {
                (
                    fake_name(&mut rng),
                    fake_sentence(&mut rng),
                    fake_timestamp_this_year(&mut rng),
                )
            })
            .collect()
    };

    println!("Working...");

    for (name, body, timestamp) in &records {
        messages::create(pool, name, body, Some(*timestamp))
            .await
            .context("Failed to insert fake message")?;
    }

    println!("Created {} fake messages.", count);
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Utc};

    use super::*;
    use crate::databases::test_pool;

    #[test]
    fn fake_name_is_two_capitalized_words() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let name = fake_name(&mut rng);
            let parts: Vec<&str> = name.split(' ').collect();
            assert_eq!(parts.len(), 2);
            for part in parts {
                assert!(part.chars().next().unwrap().is_ascii_uppercase());
            }
        }
    }

    #[test]
    fn fake_sentence_reads_like_a_sentence() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let sentence = fake_sentence(&mut rng);
            assert!(sentence.ends_with('.'));
            assert!(sentence.chars().next().unwrap().is_ascii_uppercase());
            assert!(sentence.split(' ').count() >= 4);
        }
    }

    #[test]
    fn fake_timestamp_falls_within_the_current_year() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let timestamp = fake_timestamp_this_year(&mut rng);
            assert_eq!(timestamp.year(), Utc::now().year());
            assert!(timestamp <= Utc::now());
        }
    }

    #[tokio::test]
    async fn run_clears_prior_data_and_seeds_exactly_count() {
        let pool = test_pool().await;
        messages::create(&pool, "Ada", "I was here first", None)
            .await
            .unwrap();

        run(&pool, 5).await.unwrap();

        let listed = messages::list_all(&pool).await.unwrap();
        assert_eq!(listed.len(), 5);
        for message in &listed {
            assert!(!message.name.is_empty());
            assert!(!message.body.is_empty());
        }
    }
}
