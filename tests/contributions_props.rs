// tests/contributions_props.rs
//
// Properties of the synthetic contribution year over sampled instants.

use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, TimeZone, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};

use profile_pulse::contributions::{base_chance, count_bounds, generate, seeded_random};

/// Instants between 2000-01-01 and 2040-01-01, fixed seed for repeatability.
fn sample_instants(n: usize) -> Vec<DateTime<Utc>> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    (0..n)
        .map(|_| {
            let secs = rng.random_range(946_684_800i64..2_208_988_800i64);
            Utc.timestamp_opt(secs, 0).unwrap()
        })
        .collect()
}

fn expected_start(today: NaiveDate) -> NaiveDate {
    let year_ago = today
        .with_year(today.year() - 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(today.year() - 1, 3, 1).unwrap());
    let back = year_ago.weekday().num_days_from_sunday() as u64;
    year_ago.checked_sub_days(Days::new(back)).unwrap()
}

#[test]
fn same_instant_gives_identical_output() {
    for now in sample_instants(20) {
        let a = generate(&now);
        let b = generate(&now);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap(),
            "byte-identical output expected for {now}"
        );
    }
}

#[test]
fn range_is_gapless_from_sunday_through_today() {
    for now in sample_instants(50) {
        let days = generate(&now);
        let today = now.date_naive();
        let start = expected_start(today);

        assert!(!days.is_empty());
        assert_eq!(days[0].date, start, "start for {now}");
        assert_eq!(days[0].date.weekday().num_days_from_sunday(), 0);
        assert_eq!(days.last().unwrap().date, today);
        assert_eq!(days.len() as i64, (today - start).num_days() + 1);

        for pair in days.windows(2) {
            assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
        }
    }
}

#[test]
fn level_and_count_agree() {
    for now in sample_instants(30) {
        for day in generate(&now) {
            assert!(day.level <= 4);
            assert_eq!(day.level == 0, day.count == 0, "{day:?}");
            assert!(
                count_bounds(day.level).contains(&day.count),
                "count {} outside level {} range",
                day.count,
                day.level
            );
        }
    }
}

#[test]
fn draws_follow_seeded_formula() {
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 7, 15, 0).unwrap();
    let days = generate(&now);
    let today = days.last().unwrap();

    let seed = now.timestamp_millis();
    let occurs = seeded_random(seed);
    if occurs < base_chance(today.date) {
        assert!(today.level > 0);
        let intensity = seeded_random(seed + 1);
        assert_eq!(today.level, profile_pulse::contributions::bucket_for(intensity).1);
    } else {
        assert_eq!((today.count, today.level), (0, 0));
    }
}

#[test]
fn tuesday_in_march_has_boosted_weekday_chance() {
    let tuesday = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
    assert_eq!(tuesday.weekday().num_days_from_sunday(), 2);
    assert!((base_chance(tuesday) - 0.75).abs() < 1e-12);
}

#[test]
fn calendar_zone_decides_the_last_day() {
    // 2026-10-19 02:00 UTC is still the 18th in UTC-05:00.
    let instant = Utc.with_ymd_and_hms(2026, 10, 19, 2, 0, 0).unwrap();
    let west = FixedOffset::west_opt(5 * 3600).unwrap();

    let utc_days = generate(&instant);
    let west_days = generate(&instant.with_timezone(&west));

    assert_eq!(utc_days.last().unwrap().date.day(), 19);
    assert_eq!(west_days.last().unwrap().date.day(), 18);
}

#[test]
fn leap_day_reference_starts_from_march_first() {
    let now = Utc.with_ymd_and_hms(2028, 2, 29, 12, 0, 0).unwrap();
    let days = generate(&now);
    // 2027-03-01 is a Monday, so the range opens on Sunday 2027-02-28.
    assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2027, 2, 28).unwrap());
}
