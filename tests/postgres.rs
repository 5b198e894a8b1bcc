//! Bootstrap and account store against a live PostgreSQL server.
//!
//! Run with `TEST_DATABASE_URL=postgres://... cargo test -- --ignored`.
//! Each test uses its own email addresses so they can share a database.

#![allow(clippy::panic)]

use sqlx::PgConnection;

use zanalytics::config::AdminCredentials;
use zanalytics::persistence::accounts::{authenticate, create_account, find_account};
use zanalytics::persistence::schema::{TABLES, ensure_admin_account, ensure_schema};
use zanalytics::persistence::{BootstrapStage, bootstrap, postgres};

fn database_url() -> String {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        panic!("TEST_DATABASE_URL must point at a disposable database");
    };
    url
}

async fn ready_connection() -> PgConnection {
    let Ok(mut conn) = postgres::connect(&database_url()).await else {
        panic!("connect failed");
    };
    let Ok(()) = postgres::ping(&mut conn).await else {
        panic!("ping failed");
    };
    let Ok(()) = ensure_schema(&mut conn).await else {
        panic!("schema failed");
    };
    conn
}

fn unique_email(tag: &str) -> String {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{tag}-{nanos}@example.com")
}

#[tokio::test]
#[ignore = "requires PostgreSQL via TEST_DATABASE_URL"]
async fn ensure_schema_twice_is_idempotent() {
    let mut conn = ready_connection().await;
    assert!(ensure_schema(&mut conn).await.is_ok());

    for (table, _) in TABLES {
        let Ok(count) = sqlx::query_scalar::<_, i64>(
            "SELECT count(*) FROM information_schema.tables \
             WHERE table_schema = current_schema() AND table_name = $1",
        )
        .bind(table)
        .fetch_one(&mut conn)
        .await
        else {
            panic!("catalog query failed");
        };
        assert_eq!(count, 1, "{table} should exist exactly once");
    }
}

#[tokio::test]
#[ignore = "requires PostgreSQL via TEST_DATABASE_URL"]
async fn second_create_keeps_original_hash() {
    let mut conn = ready_connection().await;
    let email = unique_email("dup");

    assert!(matches!(
        create_account(&mut conn, &email, "first").await,
        Ok(true)
    ));
    let Ok(Some(original)) = find_account(&mut conn, &email).await else {
        panic!("account should exist");
    };

    assert!(matches!(
        create_account(&mut conn, &email, "second").await,
        Ok(false)
    ));
    let Ok(Some(after)) = find_account(&mut conn, &email).await else {
        panic!("account should still exist");
    };

    assert_eq!(original.password_hash, after.password_hash);
    assert_ne!(after.password_hash, "first");
    assert!(authenticate(&mut conn, &email, "first").await);
    assert!(!authenticate(&mut conn, &email, "second").await);
}

#[tokio::test]
#[ignore = "requires PostgreSQL via TEST_DATABASE_URL"]
async fn authenticate_paths() {
    let mut conn = ready_connection().await;
    let email = unique_email("auth");
    let Ok(_) = create_account(&mut conn, &email, "s3cret").await else {
        panic!("create failed");
    };

    assert!(authenticate(&mut conn, &email, "s3cret").await);

    let wrong_password = authenticate(&mut conn, &email, "guess").await;
    let unknown_email = authenticate(&mut conn, &unique_email("ghost"), "s3cret").await;
    assert!(!wrong_password);
    assert_eq!(wrong_password, unknown_email);
}

#[tokio::test]
#[ignore = "requires PostgreSQL via TEST_DATABASE_URL"]
async fn empty_admin_credentials_skip_seeding() {
    let mut conn = ready_connection().await;

    let Ok(before) = sqlx::query_scalar::<_, i64>("SELECT count(*) FROM accounts")
        .fetch_one(&mut conn)
        .await
    else {
        panic!("count failed");
    };
    assert!(ensure_admin_account(&mut conn, "", "").await.is_ok());
    assert!(ensure_admin_account(&mut conn, "someone", "").await.is_ok());
    let Ok(after) = sqlx::query_scalar::<_, i64>("SELECT count(*) FROM accounts")
        .fetch_one(&mut conn)
        .await
    else {
        panic!("count failed");
    };
    assert_eq!(before, after);
}

#[tokio::test]
#[ignore = "requires PostgreSQL via TEST_DATABASE_URL"]
async fn full_bootstrap_seeds_admin() {
    let admin = AdminCredentials {
        username: unique_email("admin"),
        password: "s3cret".to_string(),
    };
    let Ok(report) = bootstrap(&database_url(), &admin).await else {
        panic!("bootstrap failed");
    };
    assert_eq!(report.stage, BootstrapStage::AdminEnsured);
    assert!(report.error.is_none());

    let mut conn = ready_connection().await;
    assert!(authenticate(&mut conn, &admin.username, "s3cret").await);
}
