//! In-memory repositories.
//!
//! Used by the router tests and for running the service without a database.
//! Both stores can be switched into a failing mode to exercise the
//! store-unavailable paths.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use deposit_core::{AdminUserId, IntakeId};

use super::{AdminRepository, IntakeRepository, RepositoryError};
use crate::models::{AdminUser, IntakeRecord, NewIntake};

fn unavailable() -> RepositoryError {
    RepositoryError::Unavailable("in-memory store is set to fail".to_string())
}

/// Intake records held in a vector, in insertion order.
#[derive(Debug, Default)]
pub struct MemoryIntakeRepository {
    records: Mutex<Vec<IntakeRecord>>,
    failing: AtomicBool,
}

impl MemoryIntakeRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation return `RepositoryError::Unavailable`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    /// Whether no records are stored.
    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }

    /// Insert a record with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Unavailable` when the store is failing.
    pub async fn insert_at(
        &self,
        intake: &NewIntake,
        created_at: DateTime<Utc>,
    ) -> Result<IntakeRecord, RepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(unavailable());
        }

        let mut records = self.records.lock().await;
        let next_id = records
            .iter()
            .map(|r| r.id.as_i32())
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        let record = IntakeRecord::from_new(IntakeId::new(next_id), created_at, intake.clone());
        records.push(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl IntakeRepository for MemoryIntakeRepository {
    async fn insert(&self, intake: &NewIntake) -> Result<IntakeRecord, RepositoryError> {
        self.insert_at(intake, Utc::now()).await
    }

    async fn list_newest_first(&self) -> Result<Vec<IntakeRecord>, RepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(unavailable());
        }

        let mut records = self.records.lock().await.clone();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(records)
    }
}

/// Admin accounts keyed by username.
#[derive(Debug, Default)]
pub struct MemoryAdminRepository {
    users: Mutex<Vec<AdminUser>>,
    failing: AtomicBool,
}

impl MemoryAdminRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation return `RepositoryError::Unavailable`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }
}

#[async_trait]
impl AdminRepository for MemoryAdminRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, RepositoryError> {
        self.check()?;
        let users = self.users.lock().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn insert_if_absent(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<bool, RepositoryError> {
        self.check()?;
        let mut users = self.users.lock().await;
        if users.iter().any(|u| u.username == username) {
            return Ok(false);
        }

        let next_id = users
            .iter()
            .map(|u| u.id.as_i32())
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        users.push(AdminUser {
            id: AdminUserId::new(next_id),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        });
        Ok(true)
    }

    async fn update_password_hash(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        self.check()?;
        let mut users = self.users.lock().await;
        let user = users
            .iter_mut()
            .find(|u| u.username == username)
            .ok_or(RepositoryError::NotFound)?;
        user.password_hash = password_hash.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn intake(name: &str) -> NewIntake {
        NewIntake {
            customer_name: name.to_string(),
            customer_email: format!("{name}@example.com"),
            customer_phone: None,
            item_category: "boxes".to_string(),
            item_description: "books".to_string(),
            volume_m3: 0.4,
            quoted_price: "7400".to_string(),
            recommended_box: "small box".to_string(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_unique_and_listing_is_newest_first() {
        let repo = MemoryIntakeRepository::new();
        let now = Utc::now();
        let first = repo.insert_at(&intake("a"), now - Duration::minutes(5)).await;
        let second = repo.insert_at(&intake("b"), now).await;
        let (Ok(first), Ok(second)) = (first, second) else {
            panic!("insert should succeed");
        };
        assert_ne!(first.id, second.id);

        let listed = repo.list_newest_first().await.unwrap_or_default();
        let names: Vec<_> = listed.iter().map(|r| r.customer_name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[tokio::test]
    async fn test_equal_timestamps_fall_back_to_id() {
        let repo = MemoryIntakeRepository::new();
        let now = Utc::now();
        let _ = repo.insert_at(&intake("a"), now).await;
        let _ = repo.insert_at(&intake("b"), now).await;

        let listed = repo.list_newest_first().await.unwrap_or_default();
        assert_eq!(listed.first().map(|r| r.customer_name.as_str()), Some("b"));
    }

    #[tokio::test]
    async fn test_failing_store_rejects_writes() {
        let repo = MemoryIntakeRepository::new();
        repo.set_failing(true);
        let result = repo.insert(&intake("a")).await;
        assert!(matches!(result, Err(RepositoryError::Unavailable(_))));
        repo.set_failing(false);
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_admin_insert_if_absent_is_idempotent() {
        let repo = MemoryAdminRepository::new();
        assert!(matches!(repo.insert_if_absent("admin", "h1").await, Ok(true)));
        assert!(matches!(repo.insert_if_absent("admin", "h2").await, Ok(false)));

        let user = repo.find_by_username("admin").await.ok().flatten();
        assert_eq!(user.map(|u| u.password_hash), Some("h1".to_string()));
        assert!(matches!(repo.find_by_username("Admin").await, Ok(None)));
    }

    #[tokio::test]
    async fn test_update_password_of_missing_admin() {
        let repo = MemoryAdminRepository::new();
        let result = repo.update_password_hash("ghost", "h").await;
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }
}
