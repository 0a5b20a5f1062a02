//! Site scoring: factor order, additivity, thresholds and monotonicity.

use proptest::prelude::*;
use sharescan_core::*;

fn site(
    privacy: Privacy,
    eeeu: u64,
    everyone: u64,
    anyone: u64,
    label: &str,
    users: u64,
) -> SiteRecord {
    SiteRecord {
        identity: SiteIdentity::default(),
        privacy,
        sensitivity_label: label.to_string(),
        eeeu_count: eeeu,
        everyone_count: everyone,
        anyone_link_count: anyone,
        user_count: users,
    }
}

fn config_with(overrides: ScoringOverrides) -> ScoringConfig {
    ScoringConfig::default().with_overrides(&overrides)
}

#[test]
fn test_public_broad_site_scores_thirteen() {
    let record = site(Privacy::Public, 2, 1, 0, "", 1247);
    let result = score_site(&record, &ScoringConfig::default());

    assert_eq!(result.score, 13);
    assert_eq!(
        result.reasons,
        vec![
            "Public site",
            "EEEU permissions (2)",
            "Everyone permissions (1)",
            "No sensitivity label",
            "High user count (1247 users, threshold 500)",
        ]
    );
}

#[test]
fn test_clean_private_site_scores_zero() {
    let record = site(Privacy::Private, 0, 0, 0, "Confidential", 12);
    let result = score_site(&record, &ScoringConfig::default());

    assert_eq!(result.score, 0);
    assert!(result.reasons.is_empty());
}

#[test]
fn test_raised_threshold_suppresses_high_user_factor() {
    let config = config_with(ScoringOverrides {
        user_count_threshold: Some(1000),
        high_user_count: Some(2),
        ..Default::default()
    });
    let record = site(Privacy::Private, 0, 0, 0, "General", 892);

    assert_eq!(score_site(&record, &config).score, 0);
    assert_eq!(score_site(&record, &ScoringConfig::default()).score, 2);
}

#[test]
fn test_threshold_is_inclusive() {
    let record = site(Privacy::Private, 0, 0, 0, "General", 500);
    let result = score_site(&record, &ScoringConfig::default());
    assert_eq!(result.score, 2);
    assert_eq!(result.reasons, vec!["High user count (500 users, threshold 500)"]);

    let below = site(Privacy::Private, 0, 0, 0, "General", 499);
    assert_eq!(score_site(&below, &ScoringConfig::default()).score, 0);
}

#[test]
fn test_anyone_links_reason_includes_count() {
    let record = site(Privacy::Private, 0, 0, 7, "General", 0);
    let result = score_site(&record, &ScoringConfig::default());
    assert_eq!(result.score, 2);
    assert_eq!(result.reasons, vec!["Anyone links (7)"]);
}

#[test]
fn test_zero_weight_factor_still_gives_reason() {
    let config = config_with(ScoringOverrides {
        public_site: Some(0),
        ..Default::default()
    });
    let record = site(Privacy::Public, 0, 0, 0, "General", 0);
    let result = score_site(&record, &config);

    assert_eq!(result.score, 0);
    assert_eq!(result.reasons, vec!["Public site"]);
}

#[test]
fn test_negative_weight_reduces_score() {
    let config = config_with(ScoringOverrides {
        no_sensitivity_label: Some(-4),
        ..Default::default()
    });
    let record = site(Privacy::Private, 1, 0, 0, "", 0);
    assert_eq!(score_site(&record, &config).score, 3 - 4);
}

#[test]
fn test_whitespace_label_counts_as_missing() {
    for label in ["", " ", "\t", "  \n "] {
        let record = site(Privacy::Private, 0, 0, 0, label, 0);
        let factors = triggered_factors(&record, &ScoringConfig::default());
        assert_eq!(factors, vec![RiskFactor::NoSensitivityLabel], "label {label:?}");
    }
}

#[test]
fn test_unset_and_unknown_privacy_never_public() {
    for privacy in [
        Privacy::Unset,
        Privacy::Private,
        Privacy::Other("Org-wide".to_string()),
    ] {
        let record = site(privacy, 0, 0, 0, "General", 0);
        assert_eq!(score_site(&record, &ScoringConfig::default()).score, 0);
    }
}

#[test]
fn test_score_record_keeps_record_and_position() {
    let record = site(Privacy::Public, 0, 0, 0, "General", 0);
    let scored = score_record(4, record.clone(), &ScoringConfig::default());
    assert_eq!(scored.position, 4);
    assert_eq!(scored.record, record);
    assert_eq!(scored.score, 3);
}

fn privacy_strategy() -> impl Strategy<Value = Privacy> {
    prop_oneof![
        Just(Privacy::Public),
        Just(Privacy::Private),
        Just(Privacy::Unset),
        "[a-z]{1,8}".prop_map(Privacy::Other),
    ]
}

fn record_strategy() -> impl Strategy<Value = SiteRecord> {
    (
        privacy_strategy(),
        0u64..50,
        0u64..50,
        0u64..50,
        prop_oneof![Just(String::new()), Just("  ".to_string()), "[A-Za-z]{1,12}"],
        0u64..5000,
    )
        .prop_map(|(privacy, eeeu, everyone, anyone, label, users)| {
            site(privacy, eeeu, everyone, anyone, &label, users)
        })
}

fn overrides_strategy() -> impl Strategy<Value = ScoringOverrides> {
    (
        -5i64..10,
        -5i64..10,
        -5i64..10,
        -5i64..10,
        -5i64..10,
        -5i64..10,
        0u64..3000,
    )
        .prop_map(|(p, e, ev, a, n, h, t)| ScoringOverrides {
            public_site: Some(p),
            eeeu_permissions: Some(e),
            everyone_permissions: Some(ev),
            anyone_links: Some(a),
            no_sensitivity_label: Some(n),
            high_user_count: Some(h),
            user_count_threshold: Some(t),
        })
}

proptest! {
    #[test]
    fn prop_score_is_sum_of_triggered_weights(
        record in record_strategy(),
        overrides in overrides_strategy(),
    ) {
        let config = config_with(overrides);
        let factors = triggered_factors(&record, &config);
        let result = score_site(&record, &config);

        let expected: i64 = factors.iter().map(|f| f.weight(&config)).sum();
        prop_assert_eq!(result.score, expected);
        prop_assert_eq!(result.reasons.len(), factors.len());
    }

    #[test]
    fn prop_reasons_follow_evaluation_order(record in record_strategy()) {
        let factors = triggered_factors(&record, &ScoringConfig::default());
        let rank = |factor: &RiskFactor| match factor {
            RiskFactor::PublicSite => 0,
            RiskFactor::EeeuPermissions { .. } => 1,
            RiskFactor::EveryonePermissions { .. } => 2,
            RiskFactor::AnyoneLinks { .. } => 3,
            RiskFactor::NoSensitivityLabel => 4,
            RiskFactor::HighUserCount { .. } => 5,
        };
        let ranks: Vec<u8> = factors.iter().map(rank).collect();
        prop_assert!(ranks.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn prop_raising_a_count_never_lowers_score(
        record in record_strategy(),
        bump in 1u64..1000,
        field in 0usize..4,
    ) {
        let config = ScoringConfig::default();
        let mut raised = record.clone();
        match field {
            0 => raised.eeeu_count += bump,
            1 => raised.everyone_count += bump,
            2 => raised.anyone_link_count += bump,
            _ => raised.user_count += bump,
        }
        prop_assert!(score_site(&raised, &config).score >= score_site(&record, &config).score);
    }

    #[test]
    fn prop_label_factor_tracks_blankness(label in "[ \t]{0,4}|[A-Za-z ]{1,12}") {
        let record = site(Privacy::Private, 0, 0, 0, &label, 0);
        let factors = triggered_factors(&record, &ScoringConfig::default());
        let blank = label.trim().is_empty();
        prop_assert_eq!(factors.contains(&RiskFactor::NoSensitivityLabel), blank);
    }
}
