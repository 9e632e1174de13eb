// Live-database tests for tenant-scoped connection binding.
//
// These need a running Postgres with the migrations applied and are
// ignored by default:
//
//     DATABASE_URL=postgresql://... cargo test -p nutriguide-database -- --ignored

use nutriguide_database::{Database, DatabaseConfig, NutritionEntryRepository, UserRepository};
use nutriguide_models::nutrition::{MealType, NewNutritionEntry};
use nutriguide_models::user::NewUser;
use uuid::Uuid;

fn test_config() -> DatabaseConfig {
    // A single physical connection forces every unit of work to reuse it,
    // which is exactly the reuse pattern the binder has to survive.
    DatabaseConfig {
        max_connections: 1,
        min_connections: 1,
        ..DatabaseConfig::from_env()
    }
}

async fn create_user(users: &UserRepository, email: &str) -> Uuid {
    let new_user = NewUser {
        email: email.to_string(),
        password: "irrelevant-here".to_string(),
        current_weight_kg: None,
        height_cm: None,
        gender: None,
        goal: None,
        weight_goal_kg: None,
    };
    users
        .create(&new_user, "x", None, None)
        .await
        .expect("Failed to create user")
        .id
}

fn entry(food: &str) -> NewNutritionEntry {
    NewNutritionEntry {
        food_name: food.to_string(),
        quantity: 1.0,
        unit: "serving".to_string(),
        meal_type: MealType::Lunch,
        calories: 100,
        protein_g: 1.0,
        carbs_g: 1.0,
        fat_g: 1.0,
        entry_date: None,
    }
}

#[tokio::test]
#[ignore] // Only run with database available
async fn test_connection_reuse_does_not_leak_across_tenants() {
    let db = Database::new(test_config())
        .await
        .expect("Failed to connect to database");
    db.migrate().await.expect("Migrations failed");

    let users = UserRepository::new(db.clone());
    let entries = NutritionEntryRepository::new(db.clone());

    let suffix = Uuid::new_v4().simple().to_string();
    let tenant_a = create_user(&users, &format!("a-{suffix}@example.com")).await;
    let tenant_b = create_user(&users, &format!("b-{suffix}@example.com")).await;

    let created = entries
        .create(tenant_a, &entry("Daal"))
        .await
        .expect("Failed to create entry for tenant A");
    assert_eq!(created.user_id, tenant_a);

    // Same physical connection, different tenant: must not see A's row.
    let today = created.entry_date;
    let b_view = entries
        .list_for_date(tenant_b, today)
        .await
        .expect("Failed to list for tenant B");
    assert!(
        b_view.iter().all(|e| e.user_id == tenant_b),
        "tenant B observed another tenant's rows"
    );
    assert!(b_view.is_empty());

    let a_view = entries.list_for_date(tenant_a, today).await.unwrap();
    assert_eq!(a_view.len(), 1);

    users.delete(tenant_a).await.unwrap();
    users.delete(tenant_b).await.unwrap();
}

#[tokio::test]
#[ignore] // Only run with database available
async fn test_neutral_scope_sees_no_rows() {
    let db = Database::new(test_config())
        .await
        .expect("Failed to connect to database");
    db.migrate().await.expect("Migrations failed");

    let users = UserRepository::new(db.clone());
    let entries = NutritionEntryRepository::new(db.clone());

    let suffix = Uuid::new_v4().simple().to_string();
    let tenant = create_user(&users, &format!("c-{suffix}@example.com")).await;
    let created = entries.create(tenant, &entry("Roti")).await.unwrap();

    // An anonymous unit of work on the recycled connection: the neutral
    // binding must hide everything, not inherit the previous tenant.
    let mut conn = db.acquire(None).await.expect("Failed to acquire");
    let visible: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM nutrition_entries WHERE entry_date = $1")
            .bind(created.entry_date)
            .fetch_one(&mut *conn)
            .await
            .expect("Count failed");
    assert_eq!(visible, 0);

    drop(conn);
    users.delete(tenant).await.unwrap();
}
