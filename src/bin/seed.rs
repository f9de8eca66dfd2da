//! Seed script for development — populates a fresh database with sample data.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires `DATABASE_URL` (reads .env). The company id used for the demo
//! sites is printed so it can be passed as the `x-company-id` header.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    // Run migrations first
    sqlx::migrate!("./migrations").run(&pool).await?;

    println!("=== EcoMeter Seed Script ===");

    let company_id = seed_sites(&pool).await?;
    seed_assignments(&pool).await?;
    seed_measurements(&pool).await?;

    println!("\n=== Seed complete! ===");
    println!("Demo company id: {company_id}");

    Ok(())
}

async fn seed_sites(pool: &PgPool) -> anyhow::Result<Uuid> {
    let existing: Option<Uuid> =
        sqlx::query_scalar("SELECT company_id FROM sites ORDER BY created_at LIMIT 1")
            .fetch_optional(pool)
            .await?;
    if let Some(company_id) = existing {
        println!("[skip] Sites already seeded");
        return Ok(company_id);
    }

    let company_id = Uuid::new_v4();
    let sites = [
        ("DC-SG3", "SG", "Asia/Singapore"),
        ("DC-SG8", "SG", "Asia/Singapore"),
        ("DC-SG36", "AU", "Australia/Sydney"),
    ];
    for (name, country, timezone) in sites {
        sqlx::query(
            "INSERT INTO sites (company_id, name, country, timezone) VALUES ($1, $2, $3, $4)",
        )
        .bind(company_id)
        .bind(name)
        .bind(country)
        .bind(timezone)
        .execute(pool)
        .await?;
    }
    println!("[done] Seeded {} sites", sites.len());
    Ok(company_id)
}

async fn seed_assignments(pool: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM site_frameworks")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        println!("[skip] Assignments already seeded");
        return Ok(());
    }

    let site_ids: Vec<Uuid> = sqlx::query_scalar("SELECT site_id FROM sites ORDER BY name")
        .fetch_all(pool)
        .await?;

    for site_id in &site_ids {
        let assignments = [
            ("GMDC_SG_2024", true, 10),
            ("CORP_DEFAULT", true, 20),
            ("GDCR_SG_2034", false, 30),
        ];
        for (code, is_active, precedence) in assignments {
            sqlx::query(
                "INSERT INTO site_frameworks (site_id, framework_code, is_active, precedence)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(site_id)
            .bind(code)
            .bind(is_active)
            .bind(precedence)
            .execute(pool)
            .await?;
        }
    }
    println!("[done] Seeded assignments for {} sites", site_ids.len());
    Ok(())
}

async fn seed_measurements(pool: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM measurements")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        println!("[skip] Measurements already seeded");
        return Ok(());
    }

    let sites: Vec<(Uuid, String)> = sqlx::query_as("SELECT site_id, name FROM sites")
        .fetch_all(pool)
        .await?;

    let now = Utc::now();
    let mut inserted = 0u32;
    for (site_id, name) in &sites {
        let base_pue = match name.as_str() {
            "DC-SG3" => 1.32,
            "DC-SG8" => 1.38,
            _ => 1.45,
        };
        // One reading set per day for the trailing week.
        for day in 0..7i64 {
            let measured_at = now - Duration::days(day);
            let drift = (day as f64) * 0.005;
            let readings = [
                ("PUE", base_pue + drift),
                ("WUE", 1.9 + drift),
                ("CUE", (base_pue + drift) * 0.4057),
            ];
            for (indicator, value) in readings {
                sqlx::query(
                    "INSERT INTO measurements (site_id, indicator, value, it_load_pct, measured_at)
                     VALUES ($1, $2::indicator, $3, $4, $5)",
                )
                .bind(site_id)
                .bind(indicator)
                .bind(value)
                .bind(55)
                .bind(measured_at)
                .execute(pool)
                .await?;
                inserted += 1;
            }
        }
    }
    println!("[done] Seeded {inserted} measurements");
    Ok(())
}
