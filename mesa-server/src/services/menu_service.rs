//! Menu Service: backing-store selector and fallback chain
//!
//! Menu content can live in three tiers: the SQLite adapter, the
//! structured source file, or the compiled-in default dataset. Reads
//! cascade down the chain until one tier yields data, so the public
//! page never renders an empty menu. Writes go to the database when one
//! is configured; on a database failure they fall back to the file
//! store only outside production. In production a configured but
//! failing database surfaces the error so the tiers cannot silently
//! diverge. With no database configured, production writes are refused
//! outright.
//!
//! Category rules (reserved "All", uniqueness, in-use protection) are
//! enforced here, uniformly for every tier.

use crate::db::DbService;
use crate::db::repository::{CategoryRepository, MenuItemRepository};
use crate::store::source_file::{put_export, take_export_or_default};
use crate::store::{
    MENU_FILE, SourceFileStore, StoreError, StoreResult, defaults, ids,
};
use serde::Serialize;
use serde_json::Value;
use shared::models::{MenuItem, MenuItemPayload, RESERVED_CATEGORY, with_reserved};
use std::collections::BTreeMap;

use crate::core::StorageConfig;

/// Which tier served a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuTier {
    Database,
    File,
    BuiltIn,
}

impl std::fmt::Display for MenuTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuTier::Database => write!(f, "database"),
            MenuTier::File => write!(f, "file"),
            MenuTier::BuiltIn => write!(f, "built-in"),
        }
    }
}

/// A successful write, tagged with the tier that actually applied it so
/// callers can tell a fallback write from a primary one.
#[derive(Debug)]
pub struct WriteOutcome<T> {
    pub value: T,
    pub tier: MenuTier,
}

impl<T> WriteOutcome<T> {
    fn database(value: T) -> Self {
        Self {
            value,
            tier: MenuTier::Database,
        }
    }

    fn file(value: T) -> Self {
        Self {
            value,
            tier: MenuTier::File,
        }
    }
}

/// The menu as served to the boundary: items plus categories, always
/// from the same tier.
#[derive(Debug, Serialize)]
pub struct Menu {
    pub items: Vec<MenuItem>,
    pub categories: Vec<String>,
    pub tier: MenuTier,
}

/// Write-side tier selection, decided once per operation.
enum WritePlan<'a> {
    DbFirst(&'a DbService),
    FileOnly,
    Refuse,
}

#[derive(Clone)]
pub struct MenuService {
    production: bool,
    db: Option<DbService>,
    files: SourceFileStore,
}

impl MenuService {
    pub fn new(storage: &StorageConfig, db: Option<DbService>, files: SourceFileStore) -> Self {
        Self {
            production: storage.production,
            db,
            files,
        }
    }

    // ========== Read chain ==========

    /// List the menu, cascading database → file → built-in. Never fails.
    pub async fn list_menu(&self) -> Menu {
        if let Some(db) = &self.db {
            match self.db_menu(db).await {
                Ok((items, categories)) if !items.is_empty() => {
                    return Menu {
                        items,
                        categories,
                        tier: MenuTier::Database,
                    };
                }
                Ok(_) => {
                    tracing::debug!("database tier empty, falling back to file store");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "database read failed, falling back to file store");
                }
            }
        }
        match self.file_menu().await {
            Ok((items, categories)) => Menu {
                items,
                categories,
                tier: MenuTier::File,
            },
            Err(e) => {
                tracing::warn!(error = %e, "file store read failed, serving built-in menu");
                Menu {
                    items: defaults::default_items(),
                    categories: defaults::default_categories(),
                    tier: MenuTier::BuiltIn,
                }
            }
        }
    }

    // ========== Item writes ==========

    pub async fn add_item(&self, payload: MenuItemPayload) -> StoreResult<WriteOutcome<MenuItem>> {
        match self.write_plan() {
            WritePlan::Refuse => Err(Self::refused()),
            WritePlan::FileOnly => Ok(WriteOutcome::file(self.file_add_item(payload).await?)),
            WritePlan::DbFirst(db) => match self.db_add_item(db, payload.clone()).await {
                Ok(item) => Ok(WriteOutcome::database(item)),
                Err(e) if self.may_fall_back(&e, "add_item") => {
                    Ok(WriteOutcome::file(self.file_add_item(payload).await?))
                }
                Err(e) => Err(e),
            },
        }
    }

    pub async fn update_item(
        &self,
        id: &str,
        payload: MenuItemPayload,
    ) -> StoreResult<WriteOutcome<MenuItem>> {
        match self.write_plan() {
            WritePlan::Refuse => Err(Self::refused()),
            WritePlan::FileOnly => Ok(WriteOutcome::file(self.file_update_item(id, payload).await?)),
            WritePlan::DbFirst(db) => match self.db_update_item(db, id, payload.clone()).await {
                Ok(item) => Ok(WriteOutcome::database(item)),
                Err(e) if self.may_fall_back(&e, "update_item") => {
                    Ok(WriteOutcome::file(self.file_update_item(id, payload).await?))
                }
                Err(e) => Err(e),
            },
        }
    }

    pub async fn delete_item(&self, id: &str) -> StoreResult<WriteOutcome<()>> {
        match self.write_plan() {
            WritePlan::Refuse => Err(Self::refused()),
            WritePlan::FileOnly => Ok(WriteOutcome::file(self.file_delete_item(id).await?)),
            WritePlan::DbFirst(db) => {
                match MenuItemRepository::new(db.pool.clone()).delete(id).await {
                    Ok(()) => Ok(WriteOutcome::database(())),
                    Err(e) => {
                        let e = StoreError::from(e);
                        if self.may_fall_back(&e, "delete_item") {
                            Ok(WriteOutcome::file(self.file_delete_item(id).await?))
                        } else {
                            Err(e)
                        }
                    }
                }
            }
        }
    }

    /// Apply submitted id → sort-order pairs verbatim.
    pub async fn reorder_items(&self, pairs: Vec<(String, i64)>) -> StoreResult<WriteOutcome<()>> {
        match self.write_plan() {
            WritePlan::Refuse => Err(Self::refused()),
            WritePlan::FileOnly => Ok(WriteOutcome::file(self.file_reorder_items(&pairs).await?)),
            WritePlan::DbFirst(db) => {
                match MenuItemRepository::new(db.pool.clone())
                    .update_sort_orders(&pairs)
                    .await
                {
                    Ok(()) => Ok(WriteOutcome::database(())),
                    Err(e) => {
                        let e = StoreError::from(e);
                        if self.may_fall_back(&e, "reorder_items") {
                            Ok(WriteOutcome::file(self.file_reorder_items(&pairs).await?))
                        } else {
                            Err(e)
                        }
                    }
                }
            }
        }
    }

    // ========== Category writes ==========

    pub async fn add_category(&self, name: &str) -> StoreResult<WriteOutcome<Vec<String>>> {
        if name == RESERVED_CATEGORY {
            return Err(StoreError::Conflict(format!(
                "Category '{RESERVED_CATEGORY}' already exists"
            )));
        }
        match self.write_plan() {
            WritePlan::Refuse => Err(Self::refused()),
            WritePlan::FileOnly => Ok(WriteOutcome::file(self.file_add_category(name).await?)),
            WritePlan::DbFirst(db) => match self.db_add_category(db, name).await {
                Ok(categories) => Ok(WriteOutcome::database(categories)),
                Err(e) if self.may_fall_back(&e, "add_category") => {
                    Ok(WriteOutcome::file(self.file_add_category(name).await?))
                }
                Err(e) => Err(e),
            },
        }
    }

    pub async fn delete_category(&self, name: &str) -> StoreResult<WriteOutcome<Vec<String>>> {
        if name == RESERVED_CATEGORY {
            return Err(StoreError::Conflict(format!(
                "Category '{RESERVED_CATEGORY}' is reserved and cannot be deleted"
            )));
        }
        match self.write_plan() {
            WritePlan::Refuse => Err(Self::refused()),
            WritePlan::FileOnly => Ok(WriteOutcome::file(self.file_delete_category(name).await?)),
            WritePlan::DbFirst(db) => match self.db_delete_category(db, name).await {
                Ok(categories) => Ok(WriteOutcome::database(categories)),
                Err(e) if self.may_fall_back(&e, "delete_category") => {
                    Ok(WriteOutcome::file(self.file_delete_category(name).await?))
                }
                Err(e) => Err(e),
            },
        }
    }

    // ========== Backup & migration ==========

    /// Dump the database tier's menu (database only, no fallback).
    pub async fn export_backup(&self) -> StoreResult<(Vec<MenuItem>, Vec<String>)> {
        let Some(db) = &self.db else {
            return Err(StoreError::NotConfigured(
                "menu export requires a configured database".to_string(),
            ));
        };
        let items = MenuItemRepository::new(db.pool.clone()).find_all().await?;
        let categories = CategoryRepository::new(db.pool.clone()).find_all().await?;
        Ok((items, with_reserved(categories)))
    }

    /// Copy the file tier's menu into the database, preserving ids.
    /// Idempotent: re-running upserts the same records.
    pub async fn migrate_from_file(&self) -> StoreResult<(usize, usize)> {
        let Some(db) = &self.db else {
            return Err(StoreError::NotConfigured(
                "menu migration requires a configured database".to_string(),
            ));
        };
        let (items, categories) = self.file_menu_or_empty().await?;

        let category_repo = CategoryRepository::new(db.pool.clone());
        let mut category_count = 0usize;
        for (position, name) in categories
            .iter()
            .filter(|c| c.as_str() != RESERVED_CATEGORY)
            .enumerate()
        {
            category_repo.upsert(name, position as i64 + 1).await?;
            category_count += 1;
        }

        let item_repo = MenuItemRepository::new(db.pool.clone());
        for item in &items {
            item_repo.upsert(item).await?;
        }

        tracing::info!(
            items = items.len(),
            categories = category_count,
            "menu migrated from file store to database"
        );
        Ok((items.len(), category_count))
    }

    // ========== Write-side policy ==========

    fn write_plan(&self) -> WritePlan<'_> {
        match (&self.db, self.production) {
            (Some(db), _) => WritePlan::DbFirst(db),
            (None, true) => WritePlan::Refuse,
            (None, false) => WritePlan::FileOnly,
        }
    }

    fn refused() -> StoreError {
        StoreError::NotConfigured(
            "menu writes require a configured database in production".to_string(),
        )
    }

    /// Decide whether a database write failure may cascade to the file
    /// tier. Only genuine tier failures cascade, and only outside
    /// production; domain errors (NotFound, Conflict) always surface.
    fn may_fall_back(&self, err: &StoreError, op: &str) -> bool {
        let fall_back = err.is_tier_failure() && !self.production;
        if fall_back {
            tracing::warn!(op, error = %err, "database write failed, falling back to file store");
        }
        fall_back
    }

    // ========== Database tier ==========

    async fn db_menu(&self, db: &DbService) -> StoreResult<(Vec<MenuItem>, Vec<String>)> {
        let items = MenuItemRepository::new(db.pool.clone()).find_all().await?;
        // Categories always come from the same tier that served the items
        let categories = CategoryRepository::new(db.pool.clone()).find_all().await?;
        Ok((items, with_reserved(categories)))
    }

    async fn db_ensure_category(&self, db: &DbService, category: &str) -> StoreResult<()> {
        if category == RESERVED_CATEGORY {
            return Ok(());
        }
        let exists = CategoryRepository::new(db.pool.clone())
            .exists(category)
            .await?;
        if exists {
            Ok(())
        } else {
            Err(StoreError::Validation(format!(
                "Unknown category '{category}'"
            )))
        }
    }

    async fn db_add_item(&self, db: &DbService, payload: MenuItemPayload) -> StoreResult<MenuItem> {
        self.db_ensure_category(db, &payload.category).await?;
        Ok(MenuItemRepository::new(db.pool.clone())
            .create(payload)
            .await?)
    }

    async fn db_update_item(
        &self,
        db: &DbService,
        id: &str,
        payload: MenuItemPayload,
    ) -> StoreResult<MenuItem> {
        self.db_ensure_category(db, &payload.category).await?;
        Ok(MenuItemRepository::new(db.pool.clone())
            .update(id, payload)
            .await?)
    }

    async fn db_add_category(&self, db: &DbService, name: &str) -> StoreResult<Vec<String>> {
        let repo = CategoryRepository::new(db.pool.clone());
        repo.create(name).await?;
        Ok(with_reserved(repo.find_all().await?))
    }

    async fn db_delete_category(&self, db: &DbService, name: &str) -> StoreResult<Vec<String>> {
        let in_use = MenuItemRepository::new(db.pool.clone())
            .count_by_category(name)
            .await?;
        if in_use > 0 {
            return Err(StoreError::Conflict(format!(
                "Category '{name}' is in use by {in_use} menu item(s)"
            )));
        }
        let repo = CategoryRepository::new(db.pool.clone());
        repo.delete(name).await?;
        Ok(with_reserved(repo.find_all().await?))
    }

    // ========== File tier ==========

    async fn file_menu(&self) -> StoreResult<(Vec<MenuItem>, Vec<String>)> {
        let values = self.files.read(&MENU_FILE).await?;
        Ok(Self::menu_from_values(&values))
    }

    /// Like [`file_menu`](Self::file_menu) but a missing file is an
    /// empty menu. Used on the write path, where the first write
    /// creates the file.
    async fn file_menu_or_empty(&self) -> StoreResult<(Vec<MenuItem>, Vec<String>)> {
        let values = self.files.read_or_empty(&MENU_FILE).await?;
        Ok(Self::menu_from_values(&values))
    }

    fn menu_from_values(values: &BTreeMap<String, Value>) -> (Vec<MenuItem>, Vec<String>) {
        let mut items: Vec<MenuItem> = take_export_or_default(values, "menuItems");
        items.sort_by(|a, b| {
            a.sort_order.cmp(&b.sort_order).then_with(|| {
                let a_id = a.id.parse::<i64>().unwrap_or(i64::MAX);
                let b_id = b.id.parse::<i64>().unwrap_or(i64::MAX);
                a_id.cmp(&b_id)
            })
        });
        let categories: Vec<String> = take_export_or_default(values, "menuCategories");
        (items, with_reserved(categories))
    }

    async fn write_file_menu(&self, items: &[MenuItem], categories: &[String]) -> StoreResult<()> {
        let mut values = BTreeMap::new();
        put_export(&mut values, "menuCategories", &categories)?;
        put_export(&mut values, "menuItems", &items)?;
        self.files.write(&MENU_FILE, &values).await
    }

    async fn file_add_item(&self, payload: MenuItemPayload) -> StoreResult<MenuItem> {
        let (mut items, categories) = self.file_menu_or_empty().await?;
        if !categories.contains(&payload.category) {
            return Err(StoreError::Validation(format!(
                "Unknown category '{}'",
                payload.category
            )));
        }
        let id = ids::next_string_id(items.iter().map(|i| i.id.as_str()));
        let item = payload.into_item(id);
        items.push(item.clone());
        self.write_file_menu(&items, &categories).await?;
        Ok(item)
    }

    async fn file_update_item(&self, id: &str, payload: MenuItemPayload) -> StoreResult<MenuItem> {
        let (mut items, categories) = self.file_menu_or_empty().await?;
        if !categories.contains(&payload.category) {
            return Err(StoreError::Validation(format!(
                "Unknown category '{}'",
                payload.category
            )));
        }
        let Some(slot) = items.iter_mut().find(|i| i.id == id) else {
            return Err(StoreError::NotFound(format!("Menu item {id} not found")));
        };
        let item = payload.into_item(id.to_string());
        *slot = item.clone();
        self.write_file_menu(&items, &categories).await?;
        Ok(item)
    }

    async fn file_delete_item(&self, id: &str) -> StoreResult<()> {
        let (mut items, categories) = self.file_menu_or_empty().await?;
        let before = items.len();
        items.retain(|i| i.id != id);
        if items.len() == before {
            return Err(StoreError::NotFound(format!("Menu item {id} not found")));
        }
        self.write_file_menu(&items, &categories).await
    }

    async fn file_reorder_items(&self, pairs: &[(String, i64)]) -> StoreResult<()> {
        let (mut items, categories) = self.file_menu_or_empty().await?;
        for (id, sort_order) in pairs {
            if let Some(item) = items.iter_mut().find(|i| &i.id == id) {
                item.sort_order = *sort_order;
            }
        }
        items.sort_by_key(|i| i.sort_order);
        self.write_file_menu(&items, &categories).await
    }

    async fn file_add_category(&self, name: &str) -> StoreResult<Vec<String>> {
        let (items, mut categories) = self.file_menu_or_empty().await?;
        if categories.iter().any(|c| c == name) {
            return Err(StoreError::Conflict(format!(
                "Category '{name}' already exists"
            )));
        }
        categories.push(name.to_string());
        self.write_file_menu(&items, &categories).await?;
        Ok(categories)
    }

    async fn file_delete_category(&self, name: &str) -> StoreResult<Vec<String>> {
        let (items, mut categories) = self.file_menu_or_empty().await?;
        if !categories.iter().any(|c| c == name) {
            return Err(StoreError::NotFound(format!("Category '{name}' not found")));
        }
        let in_use = items.iter().filter(|i| i.category == name).count();
        if in_use > 0 {
            return Err(StoreError::Conflict(format!(
                "Category '{name}' is in use by {in_use} menu item(s)"
            )));
        }
        categories.retain(|c| c != name);
        self.write_file_menu(&items, &categories).await?;
        Ok(categories)
    }
}
