//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::{league_configs, model_metrics_daily, trade_offer_events, trade_outcome_events};

/// Database row for a scored offer.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = trade_offer_events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OfferEventRow {
    pub id: String,
    pub mode: String,
    pub league_id: Option<String>,
    pub accept_prob: f64,
    pub features_json: String,
    pub narrative_valid: bool,
    pub driver_set_complete: bool,
    pub confidence_score: Option<f64>,
    pub confidence_label: Option<String>,
    pub created_at: String,
}

/// Database row for an outcome (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = trade_outcome_events)]
pub struct NewOutcomeEventRow {
    pub offer_event_id: String,
    pub outcome: String,
    pub resolved_at: String,
}

/// Database row for an outcome (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = trade_outcome_events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OutcomeEventRow {
    pub id: i32,
    pub offer_event_id: String,
    pub outcome: String,
    pub resolved_at: String,
}

/// Database row for a league configuration.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = league_configs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LeagueConfigRow {
    pub league_id: String,
    pub is_superflex: bool,
    pub is_tep: bool,
    pub team_count: Option<i32>,
    pub league_type: Option<String>,
    pub specialty_format: Option<String>,
}

/// Database row for a daily aggregate.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = model_metrics_daily)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MetricsDailyRow {
    pub day: String,
    pub mode: String,
    pub segment_key: String,
    pub n_offers: i32,
    pub n_labeled: i32,
    pub n_accepted: i32,
    pub mean_pred: f64,
    pub mean_obs: f64,
    pub ece: f64,
    pub brier: f64,
    pub auc: Option<f64>,
    pub psi_json: String,
    pub cap_rate_json: String,
    pub bucket_stats_json: String,
    pub narrative_fail_rate: f64,
    pub computed_at: String,
}
