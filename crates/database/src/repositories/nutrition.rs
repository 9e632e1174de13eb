use crate::connection::Database;
use crate::error::{DatabaseError, Result};
use chrono::NaiveDate;
use nutriguide_models::nutrition::{
    DailySummary, DayHistory, NewNutritionEntry, NutritionEntry, UpdateNutritionEntry,
};
use uuid::Uuid;

/// Access to the nutrition log. Every method checks out a connection bound
/// to the calling tenant; the queries carry no user filter of their own.
/// Row security scoped by the session variable does all the narrowing.
pub struct NutritionEntryRepository {
    db: Database,
}

impl NutritionEntryRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Log a food item. The tenant column is filled server-side from the
    /// session variable, so the insert never names it.
    pub async fn create(&self, tenant: Uuid, entry: &NewNutritionEntry) -> Result<NutritionEntry> {
        let mut conn = self.db.acquire(Some(tenant)).await?;

        let created = sqlx::query_as::<_, NutritionEntry>(
            r#"
            INSERT INTO nutrition_entries
                (food_name, quantity, unit, meal_type, calories, protein_g, carbs_g, fat_g, entry_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, CURRENT_DATE))
            RETURNING *
            "#,
        )
        .bind(&entry.food_name)
        .bind(entry.quantity)
        .bind(&entry.unit)
        .bind(entry.meal_type)
        .bind(entry.calories)
        .bind(entry.protein_g)
        .bind(entry.carbs_g)
        .bind(entry.fat_g)
        .bind(entry.entry_date)
        .fetch_one(&mut *conn)
        .await?;

        Ok(created)
    }

    /// All entries for one day, oldest first.
    pub async fn list_for_date(&self, tenant: Uuid, date: NaiveDate) -> Result<Vec<NutritionEntry>> {
        let mut conn = self.db.acquire(Some(tenant)).await?;

        let entries = sqlx::query_as::<_, NutritionEntry>(
            "SELECT * FROM nutrition_entries WHERE entry_date = $1 ORDER BY created_at",
        )
        .bind(date)
        .fetch_all(&mut *conn)
        .await?;

        Ok(entries)
    }

    pub async fn find_by_id(&self, tenant: Uuid, id: Uuid) -> Result<NutritionEntry> {
        let mut conn = self.db.acquire(Some(tenant)).await?;

        let entry = sqlx::query_as::<_, NutritionEntry>(
            "SELECT * FROM nutrition_entries WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Nutrition entry", &id.to_string()))?;

        Ok(entry)
    }

    pub async fn update(
        &self,
        tenant: Uuid,
        id: Uuid,
        update: &UpdateNutritionEntry,
    ) -> Result<NutritionEntry> {
        let mut query_builder =
            sqlx::QueryBuilder::new("UPDATE nutrition_entries SET updated_at = NOW()");

        let mut has_updates = false;

        if let Some(ref food_name) = update.food_name {
            query_builder.push(", food_name = ");
            query_builder.push_bind(food_name);
            has_updates = true;
        }

        if let Some(quantity) = update.quantity {
            query_builder.push(", quantity = ");
            query_builder.push_bind(quantity);
            has_updates = true;
        }

        if let Some(ref unit) = update.unit {
            query_builder.push(", unit = ");
            query_builder.push_bind(unit);
            has_updates = true;
        }

        if let Some(meal_type) = update.meal_type {
            query_builder.push(", meal_type = ");
            query_builder.push_bind(meal_type);
            has_updates = true;
        }

        if let Some(calories) = update.calories {
            query_builder.push(", calories = ");
            query_builder.push_bind(calories);
            has_updates = true;
        }

        if let Some(protein) = update.protein_g {
            query_builder.push(", protein_g = ");
            query_builder.push_bind(protein);
            has_updates = true;
        }

        if let Some(carbs) = update.carbs_g {
            query_builder.push(", carbs_g = ");
            query_builder.push_bind(carbs);
            has_updates = true;
        }

        if let Some(fat) = update.fat_g {
            query_builder.push(", fat_g = ");
            query_builder.push_bind(fat);
            has_updates = true;
        }

        if !has_updates {
            return self.find_by_id(tenant, id).await;
        }

        query_builder.push(" WHERE id = ");
        query_builder.push_bind(id);
        query_builder.push(" RETURNING *");

        let mut conn = self.db.acquire(Some(tenant)).await?;
        let entry = query_builder
            .build_query_as::<NutritionEntry>()
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Nutrition entry", &id.to_string()))?;

        Ok(entry)
    }

    pub async fn delete(&self, tenant: Uuid, id: Uuid) -> Result<()> {
        let mut conn = self.db.acquire(Some(tenant)).await?;

        let result = sqlx::query("DELETE FROM nutrition_entries WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Nutrition entry", &id.to_string()));
        }

        Ok(())
    }

    /// Calorie total and entry count for one day.
    pub async fn daily_summary(&self, tenant: Uuid, date: NaiveDate) -> Result<DailySummary> {
        let mut conn = self.db.acquire(Some(tenant)).await?;

        let (total_calories, entries_count): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(calories), 0), COUNT(*)
            FROM nutrition_entries
            WHERE entry_date = $1
            "#,
        )
        .bind(date)
        .fetch_one(&mut *conn)
        .await?;

        Ok(DailySummary {
            date,
            total_calories,
            entries_count,
        })
    }

    /// Per-day totals, newest day first.
    pub async fn history(&self, tenant: Uuid, limit: i64) -> Result<Vec<DayHistory>> {
        let mut conn = self.db.acquire(Some(tenant)).await?;

        let history = sqlx::query_as::<_, DayHistory>(
            r#"
            SELECT entry_date,
                   COALESCE(SUM(calories), 0) AS total_calories,
                   COUNT(*) AS food_count
            FROM nutrition_entries
            GROUP BY entry_date
            ORDER BY entry_date DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&mut *conn)
        .await?;

        Ok(history)
    }
}
