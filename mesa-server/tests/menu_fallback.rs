//! Fallback chain behavior across tiers: read cascading, the
//! production write guard, category protection and file → database
//! migration.

use mesa_server::core::StorageConfig;
use mesa_server::db::DbService;
use mesa_server::services::{MenuService, MenuTier};
use mesa_server::store::source_file::put_export;
use mesa_server::store::{MENU_FILE, SourceFileStore, StoreError};
use shared::models::{MenuItem, MenuItemPayload};
use std::collections::BTreeMap;
use tempfile::TempDir;

fn storage(dir: &TempDir, production: bool, database_configured: bool) -> StorageConfig {
    StorageConfig {
        production,
        database_configured,
        content_dir: dir.path().to_path_buf(),
    }
}

fn item(id: &str, name: &str, category: &str) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        name: name.to_string(),
        description: "desc".to_string(),
        price: "10 €".to_string(),
        category: category.to_string(),
        image: None,
        images: None,
        preparation: None,
        image_position: None,
        images_positions: None,
        translations: None,
        hidden: false,
        sort_order: 1,
    }
}

fn payload(name: &str, category: &str) -> MenuItemPayload {
    MenuItemPayload {
        name: name.to_string(),
        description: "desc".to_string(),
        price: "10 €".to_string(),
        category: category.to_string(),
        image: None,
        images: None,
        preparation: None,
        image_position: None,
        images_positions: None,
        translations: None,
        hidden: false,
        sort_order: None,
    }
}

async fn seed_file_menu(dir: &TempDir, items: &[MenuItem], categories: &[&str]) {
    let files = SourceFileStore::new(dir.path());
    let mut values = BTreeMap::new();
    put_export(&mut values, "menuCategories", &categories).unwrap();
    put_export(&mut values, "menuItems", &items).unwrap();
    files.write(&MENU_FILE, &values).await.unwrap();
}

fn read_menu_file(dir: &TempDir) -> String {
    std::fs::read_to_string(dir.path().join("menu.ts")).unwrap()
}

#[tokio::test]
async fn configured_but_empty_database_serves_file_content() {
    let dir = TempDir::new().unwrap();
    seed_file_menu(&dir, &[item("1", "Caldo verde", "Soups")], &["All", "Soups"]).await;

    let db = DbService::in_memory().await.unwrap();
    let service = MenuService::new(
        &storage(&dir, false, true),
        Some(db),
        SourceFileStore::new(dir.path()),
    );

    let menu = service.list_menu().await;
    assert_eq!(menu.tier, MenuTier::File);
    assert_eq!(menu.items.len(), 1);
    assert_eq!(menu.items[0].name, "Caldo verde");
    assert!(menu.categories.contains(&"Soups".to_string()));
}

#[tokio::test]
async fn broken_file_store_serves_built_in_menu() {
    let dir = TempDir::new().unwrap();
    // No database, no file: the public page still gets a menu
    let service = MenuService::new(
        &storage(&dir, false, false),
        None,
        SourceFileStore::new(dir.path()),
    );
    let menu = service.list_menu().await;
    assert_eq!(menu.tier, MenuTier::BuiltIn);
    assert!(!menu.items.is_empty());
    assert_eq!(menu.categories[0], "All");
}

#[tokio::test]
async fn production_write_guard_surfaces_database_failure() {
    let dir = TempDir::new().unwrap();
    seed_file_menu(&dir, &[item("1", "Caldo verde", "Soups")], &["All", "Soups"]).await;
    let before = read_menu_file(&dir);

    let db = DbService::in_memory().await.unwrap();
    // Break the database tier after startup
    sqlx::query("DROP TABLE menu_item")
        .execute(&db.pool)
        .await
        .unwrap();
    sqlx::query("DROP TABLE category")
        .execute(&db.pool)
        .await
        .unwrap();

    let service = MenuService::new(
        &storage(&dir, true, true),
        Some(db),
        SourceFileStore::new(dir.path()),
    );

    let err = service
        .update_item("1", payload("Caldo verde", "Soups"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Database(_)));

    // No silent fallback: the file tier is provably unchanged
    assert_eq!(read_menu_file(&dir), before);
}

#[tokio::test]
async fn non_production_write_falls_back_to_file_tier() {
    let dir = TempDir::new().unwrap();
    seed_file_menu(&dir, &[item("1", "Caldo verde", "Soups")], &["All", "Soups"]).await;

    let db = DbService::in_memory().await.unwrap();
    sqlx::query("DROP TABLE menu_item")
        .execute(&db.pool)
        .await
        .unwrap();
    sqlx::query("DROP TABLE category")
        .execute(&db.pool)
        .await
        .unwrap();

    let service = MenuService::new(
        &storage(&dir, false, true),
        Some(db),
        SourceFileStore::new(dir.path()),
    );

    let outcome = service
        .update_item("1", payload("Caldo verde com chouriço", "Soups"))
        .await
        .unwrap();
    // The outcome names the tier that actually applied the write
    assert_eq!(outcome.tier, MenuTier::File);
    assert!(read_menu_file(&dir).contains("chouriço"));
}

#[tokio::test]
async fn production_without_database_refuses_writes() {
    let dir = TempDir::new().unwrap();
    let service = MenuService::new(
        &storage(&dir, true, false),
        None,
        SourceFileStore::new(dir.path()),
    );
    let err = service.add_category("Wine").await.unwrap_err();
    assert!(matches!(err, StoreError::NotConfigured(_)));
}

#[tokio::test]
async fn category_in_use_cannot_be_deleted() {
    let dir = TempDir::new().unwrap();
    seed_file_menu(&dir, &[item("1", "Caldo verde", "Soups")], &["All", "Soups"]).await;
    let service = MenuService::new(
        &storage(&dir, false, false),
        None,
        SourceFileStore::new(dir.path()),
    );

    let err = service.delete_category("Soups").await.unwrap_err();
    match err {
        StoreError::Conflict(msg) => assert!(msg.contains("1 menu item"), "{msg}"),
        other => panic!("expected Conflict, got {other:?}"),
    }
    // Category list unchanged
    let menu = service.list_menu().await;
    assert!(menu.categories.contains(&"Soups".to_string()));
}

#[tokio::test]
async fn reserved_category_cannot_be_deleted() {
    let dir = TempDir::new().unwrap();
    let service = MenuService::new(
        &storage(&dir, false, false),
        None,
        SourceFileStore::new(dir.path()),
    );
    let err = service.delete_category("All").await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));
}

#[tokio::test]
async fn duplicate_category_is_a_conflict() {
    let dir = TempDir::new().unwrap();
    let service = MenuService::new(
        &storage(&dir, false, false),
        None,
        SourceFileStore::new(dir.path()),
    );
    service.add_category("Wine").await.unwrap();
    let err = service.add_category("Wine").await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));
}

#[tokio::test]
async fn add_then_reorder_items_in_file_tier() {
    let dir = TempDir::new().unwrap();
    let service = MenuService::new(
        &storage(&dir, false, false),
        None,
        SourceFileStore::new(dir.path()),
    );
    service.add_category("Mains").await.unwrap();
    let a = service.add_item(payload("A", "Mains")).await.unwrap().value;
    let b = service.add_item(payload("B", "Mains")).await.unwrap().value;
    assert_eq!(a.id, "1");
    assert_eq!(b.id, "2");

    // Move B above A
    service
        .reorder_items(vec![(b.id.clone(), 1), (a.id.clone(), 2)])
        .await
        .unwrap();
    let menu = service.list_menu().await;
    assert_eq!(menu.items[0].id, b.id);
    assert_eq!(menu.items[0].sort_order, 1);
    assert_eq!(menu.items[1].id, a.id);
    assert_eq!(menu.items[1].sort_order, 2);
}

#[tokio::test]
async fn export_requires_configured_database() {
    let dir = TempDir::new().unwrap();
    let service = MenuService::new(
        &storage(&dir, false, false),
        None,
        SourceFileStore::new(dir.path()),
    );
    let err = service.export_backup().await.unwrap_err();
    assert!(matches!(err, StoreError::NotConfigured(_)));
}

#[tokio::test]
async fn migration_copies_file_menu_into_database() {
    let dir = TempDir::new().unwrap();
    seed_file_menu(
        &dir,
        &[item("1", "Caldo verde", "Soups"), item("2", "Bacalhau", "Mains")],
        &["All", "Soups", "Mains"],
    )
    .await;

    let db = DbService::in_memory().await.unwrap();
    let service = MenuService::new(
        &storage(&dir, false, true),
        Some(db),
        SourceFileStore::new(dir.path()),
    );

    let (item_count, category_count) = service.migrate_from_file().await.unwrap();
    assert_eq!(item_count, 2);
    // The reserved "All" is implicit, never a database row
    assert_eq!(category_count, 2);

    // Running it again is harmless
    let (again_items, again_categories) = service.migrate_from_file().await.unwrap();
    assert_eq!((again_items, again_categories), (2, 2));

    // The database now serves reads, ids preserved
    let menu = service.list_menu().await;
    assert_eq!(menu.tier, MenuTier::Database);
    assert_eq!(menu.items.len(), 2);
    assert_eq!(menu.items[0].id, "1");

    let (exported, categories) = service.export_backup().await.unwrap();
    assert_eq!(exported.len(), 2);
    assert_eq!(categories, vec!["All", "Soups", "Mains"]);
}
