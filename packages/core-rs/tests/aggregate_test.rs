//! Ranking and summary statistics.

use sharescan_core::*;

fn classified(position: usize, name: &str, score: i64) -> ClassifiedSite {
    classified_with(position, name, score, Privacy::Private, 0)
}

fn classified_with(
    position: usize,
    name: &str,
    score: i64,
    privacy: Privacy,
    anyone_links: u64,
) -> ClassifiedSite {
    let scored = ScoredSite {
        position,
        record: SiteRecord {
            identity: SiteIdentity {
                name: name.to_string(),
                ..Default::default()
            },
            privacy,
            anyone_link_count: anyone_links,
            ..Default::default()
        },
        score,
        reasons: Vec::new(),
    };
    classify_site(scored, &RiskCategoryTable::reference()).unwrap()
}

fn names(sites: &[ClassifiedSite]) -> Vec<&str> {
    sites
        .iter()
        .map(|site| site.record().identity.name.as_str())
        .collect()
}

#[test]
fn test_empty_input_yields_zero_statistics() {
    let table = RiskCategoryTable::reference();
    let (sorted, stats) = aggregate(Vec::new(), &table);

    assert!(sorted.is_empty());
    assert_eq!(stats.total_sites, 0);
    assert_eq!(stats.high_risk_sites, 0);
    assert_eq!(stats.public_sites, 0);
    assert_eq!(stats.anyone_link_sites, 0);
    assert_eq!(stats.average_score, 0.0);
    assert_eq!(stats.max_score, 0);
    assert_eq!(stats.category_counts.len(), 5);
    assert!(stats.category_counts.iter().all(|entry| entry.count == 0));
}

#[test]
fn test_sorts_by_score_descending() {
    let table = RiskCategoryTable::reference();
    let sites = vec![
        classified(0, "low", 2),
        classified(1, "critical", 12),
        classified(2, "none", 0),
        classified(3, "medium", 5),
    ];
    let (sorted, _) = aggregate(sites, &table);
    assert_eq!(names(&sorted), vec!["critical", "medium", "low", "none"]);
}

#[test]
fn test_equal_scores_keep_input_order() {
    let table = RiskCategoryTable::reference();
    let sites = vec![
        classified(0, "first", 5),
        classified(1, "top", 9),
        classified(2, "second", 5),
        classified(3, "third", 5),
    ];
    let (sorted, _) = aggregate(sites, &table);
    assert_eq!(names(&sorted), vec!["top", "first", "second", "third"]);
}

#[test]
fn test_statistics_counts() {
    let table = RiskCategoryTable::reference();
    let sites = vec![
        classified_with(0, "a", 13, Privacy::Public, 0),
        classified_with(1, "b", 7, Privacy::Private, 2),
        classified_with(2, "c", 6, Privacy::Public, 1),
        classified_with(3, "d", 0, Privacy::Unset, 0),
    ];
    let (_, stats) = aggregate(sites, &table);

    assert_eq!(stats.total_sites, 4);
    assert_eq!(stats.high_risk_sites, 2);
    assert_eq!(stats.public_sites, 2);
    assert_eq!(stats.anyone_link_sites, 2);
    assert_eq!(stats.max_score, 13);
    assert_eq!(stats.average_score, 6.5);
    assert_eq!(stats.category_count("Critical"), 1);
    assert_eq!(stats.category_count("High"), 1);
    assert_eq!(stats.category_count("Medium"), 1);
    assert_eq!(stats.category_count("Low"), 0);
    assert_eq!(stats.category_count("No Risk"), 1);
}

#[test]
fn test_category_counts_follow_table_order() {
    let table = RiskCategoryTable::reference();
    let (_, stats) = aggregate(vec![classified(0, "x", 11)], &table);
    let order: Vec<&str> = stats
        .category_counts
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(order, vec!["No Risk", "Low", "Medium", "High", "Critical"]);
}

#[test]
fn test_average_rounds_to_one_decimal() {
    let table = RiskCategoryTable::reference();
    let sites = vec![
        classified(0, "a", 1),
        classified(1, "b", 1),
        classified(2, "c", 2),
    ];
    let (_, stats) = aggregate(sites, &table);
    assert_eq!(stats.average_score, 1.3);
}

#[test]
fn test_all_negative_scores_report_true_maximum() {
    let table = RiskCategoryTable::reference();
    let (_, stats) = aggregate(vec![classified(0, "a", -2), classified(1, "b", -5)], &table);
    assert_eq!(stats.max_score, -2);
    assert_eq!(stats.category_count("No Risk"), 2);
}

#[test]
fn test_view_model_echoes_config_and_top_sites() {
    let table = RiskCategoryTable::reference();
    let config = ScoringConfig::default().with_overrides(&ScoringOverrides {
        anyone_links: Some(5),
        ..Default::default()
    });
    let sites = (0..8)
        .map(|i| classified(i, &format!("site-{i}"), i as i64))
        .collect();
    let (sorted, stats) = aggregate(sites, &table);
    let view = build_view_model(sorted, stats.clone(), &config);

    assert_eq!(view.scoring_config, config);
    assert_eq!(view.statistics, stats);
    assert_eq!(
        names(view.top_sites(5)),
        vec!["site-7", "site-6", "site-5", "site-4", "site-3"]
    );
    assert_eq!(view.top_sites(50).len(), 8);
    assert_eq!(view.export_rows()[0].site_name, "site-7");
}
