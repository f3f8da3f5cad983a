use rollbook::config::cors::CorsConfig;
use rollbook::router::init_router;
use rollbook::state::AppState;
use rollbook::utils::password::hash_password;
use sqlx::PgPool;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
}

#[allow(dead_code)]
pub struct TestSchool {
    pub id: Uuid,
    pub name: String,
}

pub fn setup_test_app(pool: PgPool) -> axum::Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        cors_config: CorsConfig::default(),
    };
    init_router(state)
}

#[allow(dead_code)]
pub async fn create_test_user(pool: &PgPool, email: &str) -> TestUser {
    let hashed = hash_password("testpass123").unwrap();

    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (email, password) VALUES ($1, $2) RETURNING id",
    )
    .bind(email)
    .bind(hashed)
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id,
        email: email.to_string(),
    }
}

#[allow(dead_code)]
pub async fn create_test_school(pool: &PgPool, name: &str) -> TestSchool {
    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO schools (name, address, email, phone)
         VALUES ($1, '123 Test St', 'office@test.com', '0200000000')
         RETURNING id",
    )
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap();

    TestSchool {
        id,
        name: name.to_string(),
    }
}

/// Insert a PIN row directly, bypassing the generator.
#[allow(dead_code)]
pub async fn create_test_pin(pool: &PgPool, pin: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>("INSERT INTO signup_pins (pin) VALUES ($1) RETURNING id")
        .bind(pin)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[allow(dead_code)]
pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

#[allow(dead_code)]
pub fn generate_unique_school_name() -> String {
    format!("Test School {}", Uuid::new_v4())
}
