// tests/repository_tests.rs
//
// These run against a real Postgres server and are skipped when
// DATABASE_URL is not set. Each test works in its own schema.

use naming_quiz::{
    error::AppError,
    models::quiz_item::{NewQuizItem, QuizOption},
    repository::{PgQuizRepository, QuizRepository},
    seed::seed_owner_user,
    utils::hash::hash_password,
};
use sqlx::{Executor, PgPool, postgres::PgPoolOptions};

struct TestDb {
    pool: PgPool,
    schema: String,
    owner_id: i64,
}

impl TestDb {
    fn repo(&self) -> PgQuizRepository {
        PgQuizRepository::new(self.pool.clone(), self.owner_id)
    }

    async fn teardown(self) {
        sqlx::raw_sql(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema))
            .execute(&self.pool)
            .await
            .unwrap();
    }
}

/// Connects to a fresh schema, migrates it, and seeds one owner user.
async fn setup() -> Option<TestDb> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping Postgres repository test");
        return None;
    };

    let schema = format!("t_{}", uuid::Uuid::new_v4().simple());
    let init = format!("CREATE SCHEMA IF NOT EXISTS {0}; SET search_path TO {0};", schema);

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .after_connect(move |conn, _meta| {
            let init = init.clone();
            Box::pin(async move {
                conn.execute(init.as_str()).await?;
                Ok(())
            })
        })
        .connect(&database_url)
        .await
        .expect("Failed to connect to Postgres for testing.");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    let (owner_id,): (i64,) = sqlx::query_as(
        "INSERT INTO users (name, email, password) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind("owner")
    .bind(format!("{}@example.com", schema))
    .bind(hash_password("password123").unwrap())
    .fetch_one(&pool)
    .await
    .unwrap();

    Some(TestDb {
        pool,
        schema,
        owner_id,
    })
}

fn addition() -> NewQuizItem {
    let option = |v: &str| QuizOption {
        value: v.to_string(),
        label: v.to_string(),
    };
    NewQuizItem {
        title: "Addition".to_string(),
        description: "adds two numbers".to_string(),
        code: "function ???(a,b){return a+b;}".to_string(),
        options: vec![option("add"), option("func"), option("doSomething")],
        answer: "add".to_string(),
        is_public: false,
    }
}

#[tokio::test]
async fn created_item_reads_back_identically() {
    let Some(db) = setup().await else { return };
    let repo = db.repo();

    let new_item = addition();
    let id = repo.create(&new_item).await.unwrap();
    let item = repo.get_by_id(id).await.unwrap();

    assert_eq!(item.id, id);
    assert_eq!(item.title, new_item.title);
    assert_eq!(item.description, new_item.description);
    assert_eq!(item.code, new_item.code);
    assert_eq!(item.options, new_item.options);
    assert_eq!(item.answer, new_item.answer);
    assert_eq!(item.is_public, new_item.is_public);
    assert_eq!(item.user_id, db.owner_id);
    assert!(item.created_at.is_some());
    assert!(item.updated_at.is_some());

    db.teardown().await;
}

#[tokio::test]
async fn missing_id_is_not_found() {
    let Some(db) = setup().await else { return };

    assert!(matches!(
        db.repo().get_by_id(424242).await,
        Err(AppError::NotFound(_))
    ));

    db.teardown().await;
}

#[tokio::test]
async fn empty_store_lists_nothing() {
    let Some(db) = setup().await else { return };

    assert!(db.repo().list_all().await.unwrap().is_empty());

    db.teardown().await;
}

#[tokio::test]
async fn list_returns_every_item() {
    let Some(db) = setup().await else { return };
    let repo = db.repo();

    let first = repo.create(&addition()).await.unwrap();
    let second = repo
        .create(&NewQuizItem {
            title: "Public".to_string(),
            is_public: true,
            ..addition()
        })
        .await
        .unwrap();

    let mut ids: Vec<i64> = repo.list_all().await.unwrap().iter().map(|i| i.id).collect();
    ids.sort();
    assert_eq!(ids, vec![first, second]);

    db.teardown().await;
}

#[tokio::test]
async fn malformed_options_fail_reads() {
    let Some(db) = setup().await else { return };
    let repo = db.repo();

    repo.create(&addition()).await.unwrap();
    let (bad_id,): (i64,) = sqlx::query_as(
        "INSERT INTO functions (title, code, options, answer, user_id) VALUES ('Bad', '???', 'not json', 'x', $1) RETURNING id",
    )
    .bind(db.owner_id)
    .fetch_one(&db.pool)
    .await
    .unwrap();

    assert!(matches!(
        repo.get_by_id(bad_id).await,
        Err(AppError::InternalServerError(_))
    ));
    assert!(matches!(
        repo.list_all().await,
        Err(AppError::InternalServerError(_))
    ));

    db.teardown().await;
}

#[tokio::test]
async fn unknown_owner_violates_constraint() {
    let Some(db) = setup().await else { return };
    let repo = PgQuizRepository::new(db.pool.clone(), db.owner_id + 1000);

    assert!(matches!(
        repo.create(&addition()).await,
        Err(AppError::InternalServerError(_))
    ));

    db.teardown().await;
}

#[tokio::test]
async fn deleting_owner_cascades_to_items() {
    let Some(db) = setup().await else { return };
    let repo = db.repo();

    let id = repo.create(&addition()).await.unwrap();
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(db.owner_id)
        .execute(&db.pool)
        .await
        .unwrap();

    assert!(matches!(
        repo.get_by_id(id).await,
        Err(AppError::NotFound(_))
    ));

    db.teardown().await;
}

#[tokio::test]
async fn seeding_creates_missing_owner_once() {
    let Some(db) = setup().await else { return };
    let owner_id = db.owner_id + 500;
    let email = format!("seed_{}@example.com", db.schema);

    seed_owner_user(&db.pool, owner_id, &email, "password").await.unwrap();
    seed_owner_user(&db.pool, owner_id, &email, "password").await.unwrap();

    let id = PgQuizRepository::new(db.pool.clone(), owner_id)
        .create(&addition())
        .await
        .unwrap();
    assert_eq!(db.repo().get_by_id(id).await.unwrap().user_id, owner_id);

    db.teardown().await;
}

#[tokio::test]
async fn seeding_with_taken_email_fails() {
    let Some(db) = setup().await else { return };
    let taken = format!("{}@example.com", db.schema);

    let result = seed_owner_user(&db.pool, db.owner_id + 500, &taken, "password").await;
    assert!(matches!(result, Err(AppError::InternalServerError(_))));

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE id = $1")
        .bind(db.owner_id + 500)
        .fetch_one(&db.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);

    db.teardown().await;
}
