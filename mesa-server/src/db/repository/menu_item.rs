//! Menu Item Repository

use super::{RepoError, RepoResult};
use shared::models::{ImagePosition, MenuItem, MenuItemPayload, MenuItemTranslation};
use sqlx::SqlitePool;
use std::collections::BTreeMap;

const SELECT_COLUMNS: &str = "id, name, description, price, category, image, images, \
     preparation, image_position, images_positions, translations, hidden, sort_order";

/// Row shape: scalar columns plus JSON blob TEXT columns.
#[derive(sqlx::FromRow)]
struct MenuItemRow {
    id: String,
    name: String,
    description: String,
    price: String,
    category: String,
    image: Option<String>,
    images: Option<String>,
    preparation: Option<String>,
    image_position: Option<String>,
    images_positions: Option<String>,
    translations: Option<String>,
    hidden: bool,
    sort_order: i64,
}

fn parse_blob<T: serde::de::DeserializeOwned>(
    column: &str,
    blob: Option<String>,
) -> RepoResult<Option<T>> {
    match blob {
        None => Ok(None),
        Some(text) => serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| RepoError::Database(format!("Corrupt {column} blob: {e}"))),
    }
}

fn to_blob<T: serde::Serialize>(value: &Option<T>) -> RepoResult<Option<String>> {
    match value {
        None => Ok(None),
        Some(v) => serde_json::to_string(v)
            .map(Some)
            .map_err(|e| RepoError::Database(format!("Blob serialization failed: {e}"))),
    }
}

impl MenuItemRow {
    fn into_item(self) -> RepoResult<MenuItem> {
        Ok(MenuItem {
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            image: self.image,
            images: parse_blob::<Vec<String>>("images", self.images)?,
            preparation: self.preparation,
            image_position: parse_blob::<ImagePosition>("image_position", self.image_position)?,
            images_positions: parse_blob::<Vec<ImagePosition>>(
                "images_positions",
                self.images_positions,
            )?,
            translations: parse_blob::<BTreeMap<String, MenuItemTranslation>>(
                "translations",
                self.translations,
            )?,
            hidden: self.hidden,
            sort_order: self.sort_order,
        })
    }
}

#[derive(Clone)]
pub struct MenuItemRepository {
    pool: SqlitePool,
}

impl MenuItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All items, arranged items first, then by numeric id.
    pub async fn find_all(&self) -> RepoResult<Vec<MenuItem>> {
        let rows: Vec<MenuItemRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM menu_item ORDER BY sort_order, CAST(id AS INTEGER)"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(MenuItemRow::into_item).collect()
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let row: Option<MenuItemRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM menu_item WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(MenuItemRow::into_item).transpose()
    }

    pub async fn count(&self) -> RepoResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_item")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_by_category(&self, category: &str) -> RepoResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_item WHERE category = ?1")
            .bind(category)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Next id: numeric max + 1, "1" for an empty table.
    pub async fn next_id(&self) -> RepoResult<String> {
        let next: i64 =
            sqlx::query_scalar("SELECT COALESCE(MAX(CAST(id AS INTEGER)), 0) + 1 FROM menu_item")
                .fetch_one(&self.pool)
                .await?;
        Ok(next.to_string())
    }

    /// Create a new item. Any caller-supplied id is ignored; the store
    /// assigns the next numeric id.
    pub async fn create(&self, payload: MenuItemPayload) -> RepoResult<MenuItem> {
        let id = self.next_id().await?;
        let item = payload.into_item(id);
        self.insert(&item).await?;
        Ok(item)
    }

    /// Full-record replace by id; unknown id is NotFound, never upsert.
    pub async fn update(&self, id: &str, payload: MenuItemPayload) -> RepoResult<MenuItem> {
        if self.find_by_id(id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Menu item {id} not found")));
        }
        let item = payload.into_item(id.to_string());
        sqlx::query(
            "UPDATE menu_item SET name = ?2, description = ?3, price = ?4, category = ?5, \
             image = ?6, images = ?7, preparation = ?8, image_position = ?9, \
             images_positions = ?10, translations = ?11, hidden = ?12, sort_order = ?13 \
             WHERE id = ?1",
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(&item.price)
        .bind(&item.category)
        .bind(&item.image)
        .bind(to_blob(&item.images)?)
        .bind(&item.preparation)
        .bind(to_blob(&item.image_position)?)
        .bind(to_blob(&item.images_positions)?)
        .bind(to_blob(&item.translations)?)
        .bind(item.hidden)
        .bind(item.sort_order)
        .execute(&self.pool)
        .await?;
        Ok(item)
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM menu_item WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("Menu item {id} not found")));
        }
        Ok(())
    }

    /// Apply submitted id → sort_order pairs verbatim.
    pub async fn update_sort_orders(&self, pairs: &[(String, i64)]) -> RepoResult<()> {
        for (id, sort_order) in pairs {
            sqlx::query("UPDATE menu_item SET sort_order = ?2 WHERE id = ?1")
                .bind(id)
                .bind(sort_order)
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }

    /// Insert preserving the record's id (file → database migration).
    pub async fn upsert(&self, item: &MenuItem) -> RepoResult<()> {
        sqlx::query(
            "INSERT OR REPLACE INTO menu_item \
             (id, name, description, price, category, image, images, preparation, \
              image_position, images_positions, translations, hidden, sort_order) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(&item.price)
        .bind(&item.category)
        .bind(&item.image)
        .bind(to_blob(&item.images)?)
        .bind(&item.preparation)
        .bind(to_blob(&item.image_position)?)
        .bind(to_blob(&item.images_positions)?)
        .bind(to_blob(&item.translations)?)
        .bind(item.hidden)
        .bind(item.sort_order)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert(&self, item: &MenuItem) -> RepoResult<()> {
        self.upsert(item).await
    }
}
