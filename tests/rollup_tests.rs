mod harness;

use std::sync::Arc;

use harness::temp_db::TempDb;
use offerlens::adapter::outbound::memory::{FailPoint, MemoryGateway};
use offerlens::application::rollup::{DuplicateOutcomePolicy, RollupService};
use offerlens::domain::{DriftDimension, ModelMetricsDaily, Mode};
use offerlens::error::Error;
use offerlens::port::outbound::metrics::{DailyMetricsReader, DailyMetricsWriter, MetricsQuery};
use offerlens::testkit::config::{settings, with_policy};
use offerlens::testkit::domain::{
    at, day, half_accepted_day, league, metrics_row, offer, outcome,
};

const MODE: &str = "trade_finder";

fn assert_half_accepted(row: &ModelMetricsDaily) {
    assert_eq!(row.segment_key.as_str(), "UNK_1QB_NONTEP_SZUNK_H0_2");
    assert_eq!(row.n_offers, 100);
    assert_eq!(row.n_labeled, 60);
    assert_eq!(row.n_accepted, 40);
    assert!((row.mean_pred - 0.5).abs() < 1e-12);
    assert!((row.mean_obs - 2.0 / 3.0).abs() < 1e-12);
    assert!((row.ece - 1.0 / 6.0).abs() < 1e-9);
    // Every labeled row is 0.5 away from its label.
    assert!((row.brier - 0.25).abs() < 1e-12);
    assert_eq!(row.auc, None);
    assert!((row.bucket_stats.intercept_drift.delta - 1.0 / 6.0).abs() < 1e-9);
    assert_eq!(row.bucket_stats.reliability[5].n, 60);
}

#[tokio::test]
async fn half_accepted_day_in_memory() {
    let gateway = Arc::new(MemoryGateway::new());
    let d = day(2026, 5, 1);
    let (offers, outcomes) = half_accepted_day(d, MODE, "o");
    gateway.insert_offers(offers);
    gateway.insert_outcomes(outcomes);

    let service = RollupService::new(gateway.clone(), gateway.clone(), settings(&[MODE]));
    let summary = service.rollup(d, &Mode::new(MODE)).await.unwrap();

    assert_eq!(summary.segments, 1);
    let rows = gateway.metrics();
    assert_eq!(rows.len(), 1);
    assert_half_accepted(&rows[0]);
}

#[tokio::test]
async fn half_accepted_day_in_sqlite() {
    let db = TempDb::create("half-accepted");
    let d = day(2026, 5, 1);
    let (offers, outcomes) = half_accepted_day(d, MODE, "o");
    db.events.record_offers(&offers).unwrap();
    for o in &outcomes {
        db.events.record_outcome(o).unwrap();
    }

    let service = RollupService::new(db.events.clone(), db.metrics.clone(), settings(&[MODE]));
    service.rollup(d, &Mode::new(MODE)).await.unwrap();

    let rows = db.metrics.list_daily_metrics(&MetricsQuery::between(d, d)).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_half_accepted(&rows[0]);
}

#[tokio::test]
async fn rerunning_a_day_is_idempotent() {
    let db = TempDb::create("idempotent");
    let d = day(2026, 5, 1);
    let (offers, outcomes) = half_accepted_day(d, MODE, "o");
    db.events.record_offers(&offers).unwrap();
    for o in &outcomes {
        db.events.record_outcome(o).unwrap();
    }
    let service = RollupService::new(db.events.clone(), db.metrics.clone(), settings(&[MODE]));
    let query = MetricsQuery::between(d, d);

    service.rollup(d, &Mode::new(MODE)).await.unwrap();
    let first = db.metrics.list_daily_metrics(&query).await.unwrap();
    service.rollup(d, &Mode::new(MODE)).await.unwrap();
    let second = db.metrics.list_daily_metrics(&query).await.unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(first, second);
}

#[tokio::test]
async fn rerun_reflects_corrected_history() {
    let gateway = Arc::new(MemoryGateway::new());
    let d = day(2026, 5, 1);
    let (offers, outcomes) = half_accepted_day(d, MODE, "o");
    gateway.insert_offers(offers);
    let service = RollupService::new(gateway.clone(), gateway.clone(), settings(&[MODE]));

    service.rollup(d, &Mode::new(MODE)).await.unwrap();
    assert_eq!(gateway.metrics()[0].n_labeled, 0);

    gateway.insert_outcomes(outcomes);
    service.rollup(d, &Mode::new(MODE)).await.unwrap();
    let rows = gateway.metrics();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].n_labeled, 60);
}

#[tokio::test]
async fn lift_at_top_decile_through_rollup() {
    let gateway = Arc::new(MemoryGateway::new());
    let d = day(2026, 5, 1);
    for i in 0..100 {
        let id = format!("o{i}");
        gateway.insert_offer(offer(&id, MODE, 1.0 - f64::from(i) / 100.0, at(d, 10)));
        let result = if i < 40 { "ACCEPTED" } else { "REJECTED" };
        gateway.insert_outcome(outcome(&id, result, at(d, 20)));
    }

    let service = RollupService::new(gateway.clone(), gateway.clone(), settings(&[MODE]));
    service.rollup(d, &Mode::new(MODE)).await.unwrap();

    let row = &gateway.metrics()[0];
    let lift = row.bucket_stats.lift_top_decile.unwrap();
    assert!((lift - 2.5).abs() < 1e-12);
    assert_eq!(row.auc.map(|a| a > 0.99), Some(true));
}

#[tokio::test]
async fn drift_needs_enough_baseline_history() {
    let gateway = Arc::new(MemoryGateway::new());
    let d = day(2026, 5, 10);
    for i in 0..60 {
        gateway.insert_offer(offer(&format!("c{i}"), MODE, 0.5, at(d, 9)));
    }
    for i in 0..150 {
        gateway.insert_offer(offer(&format!("b{i}"), MODE, 0.5, at(day(2026, 5, 1), 9)));
    }
    let service = RollupService::new(gateway.clone(), gateway.clone(), settings(&[MODE]));

    service.rollup(d, &Mode::new(MODE)).await.unwrap();
    assert!(gateway.metrics()[0].drift.is_empty());

    for i in 150..250 {
        gateway.insert_offer(offer(&format!("b{i}"), MODE, 0.5, at(day(2026, 4, 15), 9)));
    }
    service.rollup(d, &Mode::new(MODE)).await.unwrap();
    let drift = &gateway.metrics()[0].drift;
    for dim in DriftDimension::ALL {
        assert!(drift.psi_for(dim).unwrap().abs() < 1e-9, "{dim}");
        assert!(drift.jsd_for(dim).unwrap().abs() < 1e-9, "{dim}");
    }
}

#[tokio::test]
async fn baseline_window_excludes_older_offers() {
    let gateway = Arc::new(MemoryGateway::new());
    let d = day(2026, 5, 10);
    for i in 0..60 {
        gateway.insert_offer(offer(&format!("c{i}"), MODE, 0.5, at(d, 9)));
    }
    // 31 days before the day start: outside a 30-day window.
    for i in 0..300 {
        gateway.insert_offer(offer(&format!("b{i}"), MODE, 0.5, at(day(2026, 4, 9), 9)));
    }
    let service = RollupService::new(gateway.clone(), gateway.clone(), settings(&[MODE]));
    service.rollup(d, &Mode::new(MODE)).await.unwrap();
    assert!(gateway.metrics()[0].drift.is_empty());
}

#[tokio::test]
async fn outcome_fetch_failure_writes_nothing() {
    let gateway = Arc::new(MemoryGateway::new());
    let d = day(2026, 5, 1);
    let (offers, outcomes) = half_accepted_day(d, MODE, "o");
    gateway.insert_offers(offers);
    gateway.insert_outcomes(outcomes);
    gateway.fail_on(FailPoint::Outcomes);

    let service = RollupService::new(gateway.clone(), gateway.clone(), settings(&[MODE]));
    let result = service.rollup(d, &Mode::new(MODE)).await;

    assert!(matches!(result, Err(Error::Connection(_))));
    assert!(gateway.metrics().is_empty());
}

#[tokio::test]
async fn duplicate_outcomes_follow_policy_in_sqlite() {
    let db = TempDb::create("duplicates");
    let d = day(2026, 5, 1);
    db.events.record_offer(&offer("x", MODE, 0.7, at(d, 8))).unwrap();
    db.events.record_outcome(&outcome("x", "ACCEPTED", at(d, 10))).unwrap();
    db.events.record_outcome(&outcome("x", "REJECTED", at(d, 12))).unwrap();

    let latest = RollupService::new(
        db.events.clone(),
        db.metrics.clone(),
        with_policy(&[MODE], DuplicateOutcomePolicy::Latest),
    );
    latest.rollup(d, &Mode::new(MODE)).await.unwrap();
    let rows = db.metrics.list_daily_metrics(&MetricsQuery::between(d, d)).await.unwrap();
    assert_eq!((rows[0].n_labeled, rows[0].n_accepted), (1, 0));

    let first = RollupService::new(
        db.events.clone(),
        db.metrics.clone(),
        with_policy(&[MODE], DuplicateOutcomePolicy::First),
    );
    first.rollup(d, &Mode::new(MODE)).await.unwrap();
    let rows = db.metrics.list_daily_metrics(&MetricsQuery::between(d, d)).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!((rows[0].n_labeled, rows[0].n_accepted), (1, 1));
}

#[tokio::test]
async fn segments_only_exist_for_days_with_offers() {
    let db = TempDb::create("segments");
    let d = day(2026, 5, 1);
    db.events.record_league(&league("L1", "Dynasty", true, true, 14)).unwrap();
    db.events.record_league(&league("L2", "Redraft", false, false, 10)).unwrap();

    let mut dynasty = offer("a", MODE, 0.6, at(d, 8));
    dynasty.league_id = Some("L1".into());
    dynasty.features.segment_parts.opponent_trade_samples = 12;
    let mut redraft = offer("b", MODE, 0.4, at(d, 9));
    redraft.league_id = Some("L2".into());
    redraft.features.segment_parts.opponent_trade_samples = 4;
    let mut orphan = offer("c", MODE, 0.4, at(d, 9));
    orphan.league_id = Some("missing".into());
    orphan.features.segment_parts.is_superflex = true;
    orphan.features.segment_parts.league_size = Some(8);
    db.events.record_offers(&[dynasty, redraft, orphan]).unwrap();

    let service = RollupService::new(db.events.clone(), db.metrics.clone(), settings(&[MODE]));
    let summary = service.rollup(d, &Mode::new(MODE)).await.unwrap();
    assert_eq!(summary.segments, 3);

    let rows = db
        .metrics
        .list_daily_metrics(&MetricsQuery::between(d, day(2026, 5, 31)))
        .await
        .unwrap();
    let keys: Vec<&str> = rows.iter().map(|r| r.segment_key.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "DYN_SF_TEP_SZ14P_H10P",
            "RED_1QB_NONTEP_SZ10_H3_9",
            "UNK_SF_NONTEP_SZ8_H0_2",
        ]
    );
}

#[tokio::test]
async fn league_change_replaces_stale_segment_on_rerun() {
    let db = TempDb::create("league-change");
    let d = day(2026, 5, 1);
    db.events.record_league(&league("L1", "Dynasty", true, false, 12)).unwrap();
    let mut single = offer("a", MODE, 0.6, at(d, 8));
    single.league_id = Some("L1".into());
    db.events.record_offers(&[single]).unwrap();
    db.metrics
        .upsert_daily_metrics(&[metrics_row(d, "counter_offer", "DYN_SF_NONTEP_SZ12_H0_2")])
        .await
        .unwrap();

    let service = RollupService::new(db.events.clone(), db.metrics.clone(), settings(&[MODE]));
    service.rollup(d, &Mode::new(MODE)).await.unwrap();

    db.events.record_league(&league("L1", "Redraft", false, false, 10)).unwrap();
    service.rollup(d, &Mode::new(MODE)).await.unwrap();

    let mut query = MetricsQuery::between(d, d);
    query.mode = Some(Mode::new(MODE));
    let rows = db.metrics.list_daily_metrics(&query).await.unwrap();
    let found: Vec<(&str, u32)> = rows
        .iter()
        .map(|r| (r.segment_key.as_str(), r.n_offers))
        .collect();
    assert_eq!(found, vec![("RED_1QB_NONTEP_SZ10_H0_2", 1)]);

    let all = db.metrics.list_daily_metrics(&MetricsQuery::between(d, d)).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].mode.as_str(), "counter_offer");
}

#[tokio::test]
async fn backfill_over_sqlite_writes_each_day() {
    let db = TempDb::create("backfill");
    for (n, d) in [day(2026, 5, 1), day(2026, 5, 3)].into_iter().enumerate() {
        let (offers, outcomes) = half_accepted_day(d, MODE, &format!("d{n}-"));
        db.events.record_offers(&offers).unwrap();
        for o in &outcomes {
            db.events.record_outcome(o).unwrap();
        }
    }

    let service = RollupService::new(db.events.clone(), db.metrics.clone(), settings(&[MODE]));
    let summaries = service
        .backfill(day(2026, 5, 1), day(2026, 5, 3), &[Mode::new(MODE)])
        .await
        .unwrap();
    let written: Vec<usize> = summaries.iter().map(|s| s.segments).collect();
    assert_eq!(written, vec![1, 0, 1]);

    let rows = db
        .metrics
        .list_daily_metrics(&MetricsQuery::between(day(2026, 5, 1), day(2026, 5, 3)))
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
}
