/**
 * PostgreSQL Storage Backend
 *
 * The durable storage adapter. Every operation is a parameterized sqlx
 * query; uniqueness of `users.email` and `teams.join_code` is enforced by
 * database constraints, and document upserts use `ON CONFLICT` so they
 * stay atomic under concurrent writers to the same team.
 */

use crate::backend::storage::{StorageBackend, StorageError, Team, User};
use crate::shared::document::{DocumentField, Record, TeamDocument};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

/// Columns the original schema shipped without; added in place on
/// startup so older databases pick them up without a migration step.
const ADDED_COLUMNS: [DocumentField; 4] = [
    DocumentField::Documents,
    DocumentField::MeetingMinutes,
    DocumentField::Leads,
    DocumentField::ServiceMaterials,
];

/// Durable storage adapter backed by PostgreSQL.
pub struct PostgresBackend {
    pool: PgPool,
}

impl PostgresBackend {
    /// Connect to the database. Does not touch the schema; call
    /// `init_schema` before serving.
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        tracing::info!("Connecting to database...");
        let pool = PgPool::connect(database_url).await?;
        tracing::info!("Database connection pool created");
        Ok(Self { pool })
    }
}

/// Raw `team_data` row. Kept private; the public shape is `TeamDocument`.
#[derive(sqlx::FromRow)]
struct DocumentRow {
    tasks: Json<Vec<Record>>,
    projects: Json<Vec<Record>>,
    sales: Json<Vec<Record>>,
    team_members: Json<Vec<Record>>,
    meetings: Json<Vec<Record>>,
    activities: Json<Vec<Record>>,
    documents: Json<Vec<Record>>,
    meeting_minutes: Json<Vec<Record>>,
    leads: Json<Vec<Record>>,
    service_materials: Json<Vec<Record>>,
    updated_at: DateTime<Utc>,
}

impl From<DocumentRow> for TeamDocument {
    fn from(row: DocumentRow) -> Self {
        TeamDocument {
            tasks: row.tasks.0,
            projects: row.projects.0,
            sales: row.sales.0,
            team_members: row.team_members.0,
            meetings: row.meetings.0,
            activities: row.activities.0,
            documents: row.documents.0,
            meeting_minutes: row.meeting_minutes.0,
            leads: row.leads.0,
            service_materials: row.service_materials.0,
            updated_at: row.updated_at,
        }
    }
}

/// Build the upsert statement for a given field subset.
///
/// Column names come from `DocumentField::column()` (static strings, never
/// client input); record values are bound as parameters.
fn build_upsert_sql(fields: &[(DocumentField, Vec<Record>)]) -> String {
    let mut columns = String::new();
    let mut placeholders = String::new();
    let mut updates = String::new();
    for (i, (field, _)) in fields.iter().enumerate() {
        columns.push_str(", ");
        columns.push_str(field.column());
        placeholders.push_str(&format!(", ${}", i + 2));
        if i > 0 {
            updates.push_str(", ");
        }
        updates.push_str(&format!("{col} = EXCLUDED.{col}", col = field.column()));
    }
    format!(
        "INSERT INTO team_data (team_id{columns}) VALUES ($1{placeholders}) \
         ON CONFLICT (team_id) DO UPDATE SET {updates}, updated_at = NOW()"
    )
}

#[async_trait]
impl StorageBackend for PostgresBackend {
    async fn init_schema(&self) -> Result<(), StorageError> {
        tracing::info!("Ensuring database schema...");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id UUID PRIMARY KEY,
                username TEXT NOT NULL,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                team_id UUID,
                team_name TEXT,
                role TEXT NOT NULL DEFAULT 'owner',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS teams (
                id UUID PRIMARY KEY,
                name TEXT NOT NULL,
                join_code TEXT UNIQUE NOT NULL,
                owner_id UUID NOT NULL,
                members UUID[] NOT NULL DEFAULT '{}',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS team_data (
                team_id UUID PRIMARY KEY,
                tasks JSONB NOT NULL DEFAULT '[]',
                projects JSONB NOT NULL DEFAULT '[]',
                sales JSONB NOT NULL DEFAULT '[]',
                team_members JSONB NOT NULL DEFAULT '[]',
                meetings JSONB NOT NULL DEFAULT '[]',
                activities JSONB NOT NULL DEFAULT '[]',
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        // Additive evolution for databases created before these fields
        // existed. ADD COLUMN IF NOT EXISTS keeps this idempotent.
        for field in ADDED_COLUMNS {
            let sql = format!(
                "ALTER TABLE team_data ADD COLUMN IF NOT EXISTS {} JSONB NOT NULL DEFAULT '[]'",
                field.column()
            );
            sqlx::query(&sql).execute(&self.pool).await?;
        }

        tracing::info!("Database schema is up to date");
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, team_id, team_name, role, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StorageError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, team_id, team_name, role, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_team_by_code(&self, code: &str) -> Result<Option<Team>, StorageError> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            SELECT id, name, join_code, owner_id, members, created_at
            FROM teams
            WHERE join_code = UPPER($1)
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(team)
    }

    async fn find_team_by_id(&self, id: Uuid) -> Result<Option<Team>, StorageError> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            SELECT id, name, join_code, owner_id, members, created_at
            FROM teams
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(team)
    }

    async fn get_document(&self, team_id: Uuid) -> Result<Option<TeamDocument>, StorageError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT tasks, projects, sales, team_members, meetings, activities,
                   documents, meeting_minutes, leads, service_materials, updated_at
            FROM team_data
            WHERE team_id = $1
            "#,
        )
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(TeamDocument::from))
    }

    async fn insert_user(&self, user: &User) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, team_id, team_name, role, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.team_id)
        .bind(&user.team_name)
        .bind(&user.role)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert_team(&self, team: &Team) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO teams (id, name, join_code, owner_id, members, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(team.id)
        .bind(&team.name)
        .bind(&team.join_code)
        .bind(team.owner_id)
        .bind(&team.members)
        .bind(team.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn upsert_document(
        &self,
        team_id: Uuid,
        fields: &[(DocumentField, Vec<Record>)],
    ) -> Result<(), StorageError> {
        if fields.is_empty() {
            // Row creation only; an existing document is left as-is.
            sqlx::query("INSERT INTO team_data (team_id) VALUES ($1) ON CONFLICT (team_id) DO NOTHING")
                .bind(team_id)
                .execute(&self.pool)
                .await?;
            return Ok(());
        }

        let sql = build_upsert_sql(fields);
        let mut query = sqlx::query(&sql).bind(team_id);
        for (_, records) in fields {
            query = query.bind(Json(records));
        }
        query.execute(&self.pool).await?;
        Ok(())
    }

    async fn update_user_team(
        &self,
        user_id: Uuid,
        team_id: Uuid,
        team_name: &str,
    ) -> Result<(), StorageError> {
        sqlx::query("UPDATE users SET team_id = $2, team_name = $3 WHERE id = $1")
            .bind(user_id)
            .bind(team_id)
            .bind(team_name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn append_team_member(&self, team_id: Uuid, user_id: Uuid) -> Result<(), StorageError> {
        // The guard makes a double-join a no-op instead of a duplicate.
        sqlx::query(
            r#"
            UPDATE teams
            SET members = array_append(members, $2)
            WHERE id = $1 AND NOT ($2 = ANY(members))
            "#,
        )
        .bind(team_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
