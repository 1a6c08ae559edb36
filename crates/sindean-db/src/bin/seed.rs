//! # Catalog Seeder
//!
//! Imports a storefront `data-store.json` export into the database.
//!
//! ## Usage
//! ```bash
//! # Defaults: ./sindean_dev.db and ./data-store.json
//! cargo run -p sindean-db --bin seed
//!
//! cargo run -p sindean-db --bin seed -- --db ./data/sindean.db --data ./export.json
//! ```
//!
//! ## Input
//! ```text
//! { "products": [...], "projects": [...], "collections": [...] }
//! ```
//! Records are upserted by id, so re-running the seeder refreshes rows
//! instead of duplicating them. Product prices in the export are SAR
//! amounts (`1200`, `899.5`) and are stored as halalas. Products without
//! `showInStore` are imported hidden.

use std::env;
use std::fs;

use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use sindean_core::input::{NewCollection, NewProduct, NewProject};
use sindean_db::{Database, DbConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DataStore {
    products: Vec<Value>,
    projects: Vec<NewProject>,
    collections: Vec<NewCollection>,
}

/// Rewrites a SAR amount in place as integer halalas.
fn riyals_to_halalas(amount: &mut Value) {
    if let Some(sar) = amount.as_f64() {
        *amount = Value::from((sar * 100.0).round() as i64);
    }
}

/// Converts one exported product into a create payload.
fn product_payload(mut raw: Value) -> Result<NewProduct, serde_json::Error> {
    if let Some(obj) = raw.as_object_mut() {
        if let Some(price) = obj.get_mut("price") {
            riyals_to_halalas(price);
        }
        if let Some(Value::Array(tiers)) = obj.get_mut("priceTiers") {
            for tier in tiers.iter_mut() {
                if let Some(price) = tier.get_mut("price") {
                    riyals_to_halalas(price);
                }
            }
        }
        obj.entry("showInStore").or_insert(Value::Bool(false));
    }
    serde_json::from_value(raw)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./sindean_dev.db");
    let mut data_path = String::from("./data-store.json");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--data" => {
                if i + 1 < args.len() {
                    data_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Sindean catalog seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>      Database file path (default: ./sindean_dev.db)");
                println!("      --data <PATH>    Export to import (default: ./data-store.json)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            other => warn!(arg = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    info!(db = %db_path, data = %data_path, "Seeding storefront data");

    let data: DataStore = serde_json::from_str(&fs::read_to_string(&data_path)?)?;
    let db = Database::new(DbConfig::new(&db_path)).await?;
    let now = Utc::now();

    let mut seeded = 0usize;
    for raw in data.products {
        let product = match product_payload(raw).map_err(|e| e.to_string()).and_then(|p| {
            p.into_product(now).map_err(|e| e.to_string())
        }) {
            Ok(product) => product,
            Err(reason) => {
                warn!(%reason, "Skipping product");
                continue;
            }
        };
        db.products().upsert(&product).await?;
        seeded += 1;
    }
    info!(count = seeded, "Products seeded");

    let mut seeded = 0usize;
    for payload in data.projects {
        match payload.into_project(now) {
            Ok(project) => {
                db.projects().upsert(&project).await?;
                seeded += 1;
            }
            Err(e) => warn!(error = %e, "Skipping project"),
        }
    }
    info!(count = seeded, "Projects seeded");

    let mut seeded = 0usize;
    for payload in data.collections {
        match payload.into_collection(now) {
            Ok(collection) => {
                db.collections().upsert(&collection).await?;
                seeded += 1;
            }
            Err(e) => warn!(error = %e, "Skipping collection"),
        }
    }
    info!(count = seeded, "Collections seeded");

    db.close().await;
    info!("Seed complete");
    Ok(())
}
