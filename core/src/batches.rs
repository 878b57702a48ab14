//! Batches: large collections of API calls stored in a compact file and
//! processed by the AvaTax batch queue.

use crate::client::AvaTaxClient;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::{HttpMethod, Transport};
use crate::options::{FetchOptions, QueryKey};
use crate::types::{BatchModel, ErrorDetail, FetchResult, FileResult};

pub const CREATE_BATCHES: Endpoint = Endpoint {
    name: "create_batches",
    method: HttpMethod::Post,
    template: "/api/v2/companies/{companyId}/batches",
    query: &[],
};

pub const DELETE_BATCH: Endpoint = Endpoint {
    name: "delete_batch",
    method: HttpMethod::Delete,
    template: "/api/v2/companies/{companyId}/batches/{id}",
    query: &[],
};

pub const DOWNLOAD_BATCH: Endpoint = Endpoint {
    name: "download_batch",
    method: HttpMethod::Get,
    template: "/api/v2/companies/{companyId}/batches/{batchId}/files/{id}/attachment",
    query: &[],
};

pub const GET_BATCH: Endpoint = Endpoint {
    name: "get_batch",
    method: HttpMethod::Get,
    template: "/api/v2/companies/{companyId}/batches/{id}",
    query: &[],
};

pub const LIST_BATCHES_BY_COMPANY: Endpoint = Endpoint {
    name: "list_batches_by_company",
    method: HttpMethod::Get,
    template: "/api/v2/companies/{companyId}/batches",
    query: QueryKey::ALL,
};

pub const QUERY_BATCHES: Endpoint = Endpoint {
    name: "query_batches",
    method: HttpMethod::Get,
    template: "/api/v2/batches",
    query: QueryKey::ALL,
};

impl<T: Transport> AvaTaxClient<T> {
    /// Create one or more batches for a company. Each new batch joins the
    /// queue and is processed in the order received.
    pub fn create_batches(&self, company_id: i32, batches: &[BatchModel]) -> Result<Vec<BatchModel>, ApiError> {
        self.send(&CREATE_BATCHES, &[company_id], batches)
    }

    /// Mark a batch as deleted. Returns any warnings raised by the delete.
    pub fn delete_batch(&self, company_id: i32, id: i32) -> Result<Vec<ErrorDetail>, ApiError> {
        self.remove(&DELETE_BATCH, &[company_id, id])
    }

    /// Download one file attached to a batch.
    pub fn download_batch(&self, company_id: i32, batch_id: i32, id: i32) -> Result<FileResult, ApiError> {
        self.download(&DOWNLOAD_BATCH, &[company_id, batch_id, id])
    }

    pub fn get_batch(&self, company_id: i32, id: i32) -> Result<BatchModel, ApiError> {
        self.fetch(&GET_BATCH, &[company_id, id], None)
    }

    pub fn list_batches_by_company(
        &self,
        company_id: i32,
        options: Option<&FetchOptions>,
    ) -> Result<FetchResult<BatchModel>, ApiError> {
        self.fetch(&LIST_BATCHES_BY_COMPANY, &[company_id], options)
    }

    /// Batches across every company the credentials can see.
    pub fn query_batches(&self, options: Option<&FetchOptions>) -> Result<FetchResult<BatchModel>, ApiError> {
        self.fetch(&QUERY_BATCHES, &[], options)
    }
}
