/**
 * Membership Registry
 *
 * Registration, login, and team membership. Registration creates the
 * user's personal team, its join code, and an empty workspace document
 * in one pass; joining a team by code reassigns the user and appends
 * them to the team's member set idempotently.
 *
 * # Passwords
 *
 * Passwords are bcrypt-hashed on registration and verified with a
 * constant-shape `authenticate(email, password)` call that reports the
 * same error for unknown email and wrong password.
 */

use crate::backend::error::ApiError;
use crate::backend::storage::{StorageBackend, StorageError, Team, User};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::sync::Arc;
use uuid::Uuid;

/// Length of generated join codes.
const JOIN_CODE_LEN: usize = 8;

/// How many collisions we tolerate before giving up. With 36^8 possible
/// codes this only trips if code generation itself is broken.
const JOIN_CODE_RETRIES: usize = 16;

/// Generate one candidate join code: 8 uppercase alphanumeric characters.
pub fn generate_join_code(rng: &mut impl Rng) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(JOIN_CODE_LEN)
        .map(char::from)
        .collect::<String>()
        .to_uppercase()
}

/// User and team management on top of the storage adapter.
#[derive(Clone)]
pub struct MembershipRegistry {
    backend: Arc<dyn StorageBackend>,
}

impl MembershipRegistry {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Register a new account.
    ///
    /// Creates a personal team named after the user, a unique join code
    /// (retrying on collision), an empty workspace document, and the
    /// owner user. A failed document seed is tolerated: an absent
    /// document reads as empty, so the account stays usable.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(User, Team), ApiError> {
        if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(ApiError::validation(
                "username, email, and password are required",
            ));
        }

        if self.backend.find_user_by_email(email).await?.is_some() {
            return Err(ApiError::DuplicateEmail);
        }

        let user_id = Uuid::new_v4();
        let team_id = Uuid::new_v4();
        let team_name = format!("{username}のチーム");

        let team = self.create_team_with_code(team_id, &team_name, user_id).await?;

        // Seed the empty document. If this fails the team simply has no
        // row yet, which readers treat as empty, so log and move on.
        if let Err(e) = self.backend.upsert_document(team_id, &[]).await {
            tracing::warn!("Failed to seed document for team {team_id}: {e}");
        }

        let password_hash = hash(password, DEFAULT_COST)
            .map_err(|e| StorageError::backend(format!("password hashing failed: {e}")))?;

        let user = User {
            id: user_id,
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            team_id: Some(team_id),
            team_name: Some(team_name),
            role: "owner".to_string(),
            created_at: Utc::now(),
        };

        match self.backend.insert_user(&user).await {
            Ok(()) => {}
            // Concurrent registration with the same email lost the race.
            Err(StorageError::Conflict(c)) if c.contains("email") => {
                return Err(ApiError::DuplicateEmail);
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!("Registered user {} with team {}", user.email, team.id);
        Ok((user, team))
    }

    /// Verify an email/password pair.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, ApiError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ApiError::validation("email and password are required"));
        }

        let user = self
            .backend
            .find_user_by_email(email)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        let valid = verify(password, &user.password_hash)
            .map_err(|e| StorageError::backend(format!("password verification failed: {e}")))?;
        if !valid {
            return Err(ApiError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Attach a user to an existing team by join code.
    ///
    /// Reassigns the user's team (and denormalized team name) and appends
    /// them to the member set. Joining the same team twice is a no-op.
    pub async fn join_team(&self, user_id: Uuid, code: &str) -> Result<Team, ApiError> {
        let team = self
            .backend
            .find_team_by_code(code)
            .await?
            .ok_or(ApiError::TeamNotFound)?;

        if self.backend.find_user_by_id(user_id).await?.is_none() {
            return Err(ApiError::UserNotFound);
        }

        self.backend
            .update_user_team(user_id, team.id, &team.name)
            .await?;
        self.backend.append_team_member(team.id, user_id).await?;

        tracing::info!("User {user_id} joined team {}", team.id);
        Ok(team)
    }

    /// Current account data for an authenticated user.
    pub async fn get_user(&self, user_id: Uuid) -> Result<User, ApiError> {
        self.backend
            .find_user_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)
    }

    /// Insert a team with a freshly generated join code, retrying on the
    /// (astronomically unlikely) code collision.
    async fn create_team_with_code(
        &self,
        team_id: Uuid,
        team_name: &str,
        owner_id: Uuid,
    ) -> Result<Team, ApiError> {
        for _ in 0..JOIN_CODE_RETRIES {
            let code = generate_join_code(&mut rand::thread_rng());
            if self.backend.find_team_by_code(&code).await?.is_some() {
                continue;
            }
            let team = Team {
                id: team_id,
                name: team_name.to_string(),
                join_code: code,
                owner_id,
                members: vec![owner_id],
                created_at: Utc::now(),
            };
            match self.backend.insert_team(&team).await {
                Ok(()) => return Ok(team),
                // Lost a race on the code's unique constraint: new code.
                Err(StorageError::Conflict(c)) if c.contains("join_code") => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Err(ApiError::Conflict(
            "could not generate a unique join code".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_join_code_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let code = generate_join_code(&mut rng);
        assert_eq!(code.len(), JOIN_CODE_LEN);
        assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_join_codes_unique_under_seeded_rng() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(generate_join_code(&mut rng)), "duplicate join code");
        }
    }
}
