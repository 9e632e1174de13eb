use crate::connection::Database;
use crate::error::{DatabaseError, Result};
use chrono::Utc;
use nutriguide_models::user::{NewUser, UpdateProfile};
use nutriguide_models::User;
use uuid::Uuid;

/// Access to the tenant registry. The users table sits outside row
/// security, so every method runs on a neutral-bound connection.
pub struct UserRepository {
    db: Database,
}

impl UserRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create a new user with a precomputed password hash and body metrics.
    pub async fn create(
        &self,
        new_user: &NewUser,
        password_hash: &str,
        bmi: Option<f64>,
        daily_calories: Option<f64>,
    ) -> Result<User> {
        let mut conn = self.db.acquire(None).await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users
                (email, password_hash, current_weight_kg, height_cm, gender, goal,
                 weight_goal_kg, bmi, daily_calories)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&new_user.email)
        .bind(password_hash)
        .bind(new_user.current_weight_kg)
        .bind(new_user.height_cm)
        .bind(new_user.gender)
        .bind(new_user.goal)
        .bind(new_user.weight_goal_kg)
        .bind(bmi)
        .bind(daily_calories)
        .fetch_one(&mut *conn)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<User> {
        let mut conn = self.db.acquire(None).await?;

        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| DatabaseError::not_found("User", &id.to_string()))?;

        Ok(user)
    }

    /// Find user by email, `None` when unknown.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut conn = self.db.acquire(None).await?;

        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(user)
    }

    /// Update profile fields and the metrics recomputed from them.
    pub async fn update_profile(
        &self,
        id: Uuid,
        update: &UpdateProfile,
        bmi: Option<f64>,
        daily_calories: Option<f64>,
    ) -> Result<User> {
        let mut query_builder = sqlx::QueryBuilder::new("UPDATE users SET updated_at = NOW()");

        let mut has_updates = false;

        if let Some(weight) = update.current_weight_kg {
            query_builder.push(", current_weight_kg = ");
            query_builder.push_bind(weight);
            has_updates = true;
        }

        if let Some(height) = update.height_cm {
            query_builder.push(", height_cm = ");
            query_builder.push_bind(height);
            has_updates = true;
        }

        if let Some(gender) = update.gender {
            query_builder.push(", gender = ");
            query_builder.push_bind(gender);
            has_updates = true;
        }

        if let Some(goal) = update.goal {
            query_builder.push(", goal = ");
            query_builder.push_bind(goal);
            has_updates = true;
        }

        if let Some(weight_goal) = update.weight_goal_kg {
            query_builder.push(", weight_goal_kg = ");
            query_builder.push_bind(weight_goal);
            has_updates = true;
        }

        if !has_updates {
            return self.find_by_id(id).await;
        }

        query_builder.push(", bmi = ");
        query_builder.push_bind(bmi);
        query_builder.push(", daily_calories = ");
        query_builder.push_bind(daily_calories);

        query_builder.push(" WHERE id = ");
        query_builder.push_bind(id);
        query_builder.push(" RETURNING *");

        let mut conn = self.db.acquire(None).await?;
        let user = query_builder
            .build_query_as::<User>()
            .fetch_one(&mut *conn)
            .await?;

        Ok(user)
    }

    /// Update password hash
    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<()> {
        let mut conn = self.db.acquire(None).await?;

        sqlx::query("UPDATE users SET password_hash = $1, updated_at = NOW() WHERE id = $2")
            .bind(password_hash)
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    /// Update last login timestamp
    pub async fn update_last_login(&self, id: Uuid) -> Result<()> {
        let mut conn = self.db.acquire(None).await?;

        sqlx::query("UPDATE users SET last_login_at = $1, updated_at = NOW() WHERE id = $2")
            .bind(Utc::now())
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    /// Soft delete user (deactivate)
    pub async fn deactivate(&self, id: Uuid) -> Result<()> {
        let mut conn = self.db.acquire(None).await?;

        sqlx::query("UPDATE users SET is_active = false, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    /// Hard delete user
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let mut conn = self.db.acquire(None).await?;

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }
}
