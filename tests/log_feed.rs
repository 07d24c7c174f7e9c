// tests/log_feed.rs
use etl_pipeline_monitor::catalog::Catalog;
use etl_pipeline_monitor::logs::{generate_log_record_at, LogFeed, LogLevel};
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn twenty_five_appends_keep_twenty_newest_first() {
    let mut rng = StdRng::seed_from_u64(2024);
    let catalog = Catalog::default_seed();
    let mut feed = LogFeed::default();

    let mut last = None;
    for i in 0..25 {
        let rec = generate_log_record_at(&mut rng, &catalog, format!("00:00:{i:02}"));
        last = Some(rec.clone());
        feed.push(rec);
        assert!(feed.len() <= 20);
    }

    assert_eq!(feed.len(), 20);
    assert_eq!(feed.latest(), last.as_ref());

    // newest first: timestamps descend from 24 down to 5
    let stamps: Vec<String> = feed.iter().map(|r| r.timestamp.clone()).collect();
    assert_eq!(stamps.first().map(String::as_str), Some("00:00:24"));
    assert_eq!(stamps.last().map(String::as_str), Some("00:00:05"));
}

#[test]
fn clear_truncates_to_empty() {
    let mut rng = StdRng::seed_from_u64(1);
    let catalog = Catalog::default_seed();
    let mut feed = LogFeed::default();
    for _ in 0..5 {
        feed.push(generate_log_record_at(&mut rng, &catalog, "01:02:03".into()));
    }
    feed.clear();
    assert!(feed.is_empty());
    assert!(feed.latest().is_none());
}

#[test]
fn every_template_level_shows_up() {
    let mut rng = StdRng::seed_from_u64(77);
    let catalog = Catalog::default_seed();
    let mut seen = [false; 3];
    for _ in 0..300 {
        let r = generate_log_record_at(&mut rng, &catalog, "01:02:03".into());
        let i = match r.level {
            LogLevel::Info => 0,
            LogLevel::Success => 1,
            LogLevel::Warning => 2,
        };
        seen[i] = true;
    }
    assert_eq!(seen, [true; 3]);
}

#[test]
fn job_placeholder_uses_a_catalog_job_name() {
    let mut rng = StdRng::seed_from_u64(5);
    let catalog = Catalog::default_seed();
    let names: Vec<&str> = catalog.jobs().iter().map(|j| j.name.as_str()).collect();
    let mut hits = 0;
    for _ in 0..300 {
        let r = generate_log_record_at(&mut rng, &catalog, "01:02:03".into());
        if let Some(job) = r.message.strip_prefix("Starting transformation job: ") {
            assert!(names.contains(&job), "unknown job {job}");
            hits += 1;
        }
    }
    assert!(hits > 0);
}
