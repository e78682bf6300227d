//! Asset catalog service

use crate::{
    error::AppResult,
    models::asset::{Asset, AssetDetails, CreateAsset, UpdateAsset},
    models::category::{Category, CreateCategory, UpdateCategory},
    models::document::{CreateDocument, Document},
    repository::{assets::AssetFilter, Repository},
};

#[derive(Clone)]
pub struct AssetsService {
    repository: Repository,
}

impl AssetsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(
        &self,
        filter: &AssetFilter,
        limit: i64,
        offset: i64,
    ) -> AppResult<(Vec<Asset>, i64)> {
        self.repository.assets.list(filter, limit, offset).await
    }

    pub async fn get(&self, id: &str) -> AppResult<AssetDetails> {
        self.repository.assets.get_details(id).await
    }

    pub async fn create(&self, data: CreateAsset) -> AppResult<Asset> {
        self.repository.assets.create(&data).await
    }

    pub async fn update(&self, id: &str, data: UpdateAsset) -> AppResult<Asset> {
        self.repository.assets.update(id, &data).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.repository.assets.delete(id).await
    }

    // Category operations are part of the catalog service

    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.repository.categories.list().await
    }

    pub async fn get_category(&self, id: &str) -> AppResult<Category> {
        self.repository.categories.get_by_id(id).await
    }

    pub async fn create_category(&self, data: CreateCategory) -> AppResult<Category> {
        self.repository.categories.create(&data).await
    }

    pub async fn update_category(&self, id: &str, data: UpdateCategory) -> AppResult<Category> {
        self.repository.categories.update(id, &data).await
    }

    pub async fn delete_category(&self, id: &str) -> AppResult<()> {
        self.repository.categories.delete(id).await
    }

    // Document operations are part of the catalog service

    pub async fn list_documents(&self, asset_id: &str) -> AppResult<Vec<Document>> {
        self.repository.assets.get_by_id(asset_id).await?;
        self.repository.documents.list_for_asset(asset_id).await
    }

    pub async fn get_document(&self, id: &str) -> AppResult<Document> {
        self.repository.documents.get_by_id(id).await
    }

    pub async fn create_document(&self, data: CreateDocument) -> AppResult<Document> {
        self.repository.documents.create(&data).await
    }

    pub async fn delete_document(&self, id: &str) -> AppResult<()> {
        self.repository.documents.delete(id).await
    }
}
