/**
 * Demo Data Seeding
 *
 * Creates the well-known demo account (`test@example.com` / `password`)
 * with a team and a few sample records, so a freshly started dev server
 * has something to show. Guarded by an existence check: restarting the
 * process never duplicates the account.
 */

use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;
use crate::shared::document::DocumentField;
use serde_json::json;
use uuid::Uuid;

const DEMO_EMAIL: &str = "test@example.com";
const DEMO_PASSWORD: &str = "password";

/// Ensure the demo account exists. Idempotent.
pub async fn ensure_demo_data(state: &AppState) -> Result<(), ApiError> {
    if state
        .storage
        .find_user_by_email(DEMO_EMAIL)
        .await?
        .is_some()
    {
        tracing::debug!("Demo account already present, skipping seed");
        return Ok(());
    }

    let (user, team) = state
        .membership
        .register("テストユーザー", DEMO_EMAIL, DEMO_PASSWORD)
        .await?;

    state
        .storage
        .upsert_document(
            team.id,
            &[
                (DocumentField::Tasks, sample_tasks(user.id)),
                (DocumentField::Projects, sample_projects(user.id)),
                (DocumentField::Sales, sample_sales()),
            ],
        )
        .await?;

    tracing::info!(
        "Demo account created: {DEMO_EMAIL} / {DEMO_PASSWORD} (team code {})",
        team.join_code
    );
    Ok(())
}

fn sample_tasks(user_id: Uuid) -> Vec<serde_json::Value> {
    vec![
        json!({
            "id": Uuid::new_v4(),
            "title": "テストタスク1",
            "description": "これはテストタスク1です。",
            "status": "todo",
            "assignedTo": user_id,
            "dueDate": "2025-12-01",
        }),
        json!({
            "id": Uuid::new_v4(),
            "title": "テストタスク2",
            "description": "これはテストタスク2です。",
            "status": "in-progress",
            "assignedTo": user_id,
            "dueDate": "2025-12-05",
        }),
    ]
}

fn sample_projects(user_id: Uuid) -> Vec<serde_json::Value> {
    vec![json!({
        "id": Uuid::new_v4(),
        "name": "テストプロジェクトA",
        "description": "プロジェクトAの説明",
        "status": "active",
        "startDate": "2025-10-01",
        "endDate": "2026-03-31",
        "members": [user_id],
    })]
}

fn sample_sales() -> Vec<serde_json::Value> {
    vec![json!({
        "id": Uuid::new_v4(),
        "customerName": "テスト顧客X",
        "amount": 100000,
        "status": "pending",
        "contactDate": "2025-10-15",
    })]
}
