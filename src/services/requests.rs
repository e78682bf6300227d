//! Approval workflow service

use crate::{
    error::AppResult,
    models::request::{CreateRequest, Request, RequestResponse, RequestStatus, RequestType},
    repository::Repository,
};

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
}

impl RequestsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn create(&self, data: CreateRequest) -> AppResult<RequestResponse> {
        self.repository.requests.create(&data).await
    }

    pub async fn get(&self, id: &str) -> AppResult<RequestResponse> {
        self.repository.requests.get(id).await
    }

    pub async fn list(
        &self,
        status: Option<RequestStatus>,
        request_type: Option<RequestType>,
        limit: i64,
        offset: i64,
    ) -> AppResult<(Vec<Request>, i64)> {
        self.repository
            .requests
            .list(status, request_type, limit, offset)
            .await
    }

    /// Record one approver's decision
    pub async fn decide(
        &self,
        request_id: &str,
        approver: &str,
        decision: RequestStatus,
        notes: Option<&str>,
    ) -> AppResult<RequestResponse> {
        self.repository
            .requests
            .decide(request_id, approver, decision, notes)
            .await
    }
}
