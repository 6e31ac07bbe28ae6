//! Integration tests for the append-only tables: pricing snapshots,
//! approval trail, and campaign versions.

use canvass_db::models::approval::CreateApproval;
use canvass_db::models::campaign::CreateCampaign;
use canvass_db::models::snapshot::CreateSnapshot;
use canvass_db::repositories::{
    ApprovalRepo, CampaignRepo, CampaignVersionRepo, SnapshotRepo, UserRepo,
};
use serde_json::json;
use sqlx::PgPool;

async fn seed_campaign(pool: &PgPool, owner_email: &str) -> i64 {
    let user = UserRepo::create(pool, owner_email, "Owner", "client")
        .await
        .unwrap();
    let campaign = CampaignRepo::create(
        pool,
        user.id,
        &CreateCampaign {
            title: "Snapshot history".into(),
            total_budget: None,
            wizard_data: None,
        },
    )
    .await
    .unwrap();
    campaign.id
}

fn snapshot_input(campaign_id: i64, revenue: f64) -> CreateSnapshot {
    CreateSnapshot {
        campaign_id,
        estimated_total_cost: revenue * 0.6,
        estimated_total_revenue: revenue,
        estimated_margin: 40.0,
        currency: "USD".into(),
        breakdown: json!({"breakdown": [], "validation": {"isValid": true}}),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn every_calculation_appends_a_row(pool: PgPool) {
    let campaign_id = seed_campaign(&pool, "owner@example.com").await;

    for i in 1..=3 {
        SnapshotRepo::create(&pool, &snapshot_input(campaign_id, 100.0 * i as f64))
            .await
            .unwrap();
    }

    let history = SnapshotRepo::list_for_campaign(&pool, campaign_id)
        .await
        .unwrap();
    assert_eq!(history.len(), 3);

    let count = SnapshotRepo::count_for_campaign(&pool, campaign_id)
        .await
        .unwrap();
    assert_eq!(count, 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn latest_snapshot_is_most_recent(pool: PgPool) {
    let campaign_id = seed_campaign(&pool, "owner@example.com").await;

    SnapshotRepo::create(&pool, &snapshot_input(campaign_id, 100.0))
        .await
        .unwrap();
    let second = SnapshotRepo::create(&pool, &snapshot_input(campaign_id, 250.0))
        .await
        .unwrap();

    let latest = SnapshotRepo::latest_for_campaign(&pool, campaign_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.id, second.id);
    assert_eq!(latest.estimated_total_revenue, 250.0);
}

#[sqlx::test(migrations = "./migrations")]
async fn latest_snapshot_missing_for_fresh_campaign(pool: PgPool) {
    let campaign_id = seed_campaign(&pool, "owner@example.com").await;

    let latest = SnapshotRepo::latest_for_campaign(&pool, campaign_id)
        .await
        .unwrap();
    assert!(latest.is_none());
    assert_eq!(
        SnapshotRepo::count_for_campaign(&pool, campaign_id)
            .await
            .unwrap(),
        0
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn approval_trail_is_append_only_and_newest_first(pool: PgPool) {
    let campaign_id = seed_campaign(&pool, "owner@example.com").await;
    let reviewer = UserRepo::create(&pool, "reviewer@example.com", "Reviewer", "admin")
        .await
        .unwrap();

    for status in ["internal_review", "client_review", "approved"] {
        ApprovalRepo::create(
            &pool,
            &CreateApproval {
                campaign_id,
                status: status.into(),
                reviewed_by: Some(reviewer.id),
                notes: None,
            },
        )
        .await
        .unwrap();
    }

    let trail = ApprovalRepo::list_for_campaign(&pool, campaign_id)
        .await
        .unwrap();
    assert_eq!(trail.len(), 3);
    assert_eq!(trail[0].status, "approved");
    assert_eq!(trail[2].status, "internal_review");
}

#[sqlx::test(migrations = "./migrations")]
async fn version_numbers_increment_per_campaign(pool: PgPool) {
    let first_campaign = seed_campaign(&pool, "first@example.com").await;
    let second_campaign = seed_campaign(&pool, "second@example.com").await;

    let snapshot = json!({"questions": []});
    let v1 = CampaignVersionRepo::create(&pool, first_campaign, &snapshot)
        .await
        .unwrap();
    let v2 = CampaignVersionRepo::create(&pool, first_campaign, &snapshot)
        .await
        .unwrap();
    let other_v1 = CampaignVersionRepo::create(&pool, second_campaign, &snapshot)
        .await
        .unwrap();

    assert_eq!(v1.version_number, 1);
    assert_eq!(v2.version_number, 2);
    assert_eq!(other_v1.version_number, 1);
}
