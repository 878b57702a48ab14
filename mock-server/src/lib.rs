//! In-memory stand-in for the AvaTax v2 batches, contacts and subscriptions
//! endpoints.
//!
//! Creates return 201 with the created array. Deletes mark the record
//! deleted and answer `200 []`; deleted records are hidden from every read.
//! Every miss is a 404 carrying the AvaTax error envelope.
//! Subscriptions are seeded at startup and cannot be written.

pub mod models;
pub mod paging;

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

use models::{seed_subscriptions, Batch, Contact, ErrorResult, Subscription};
use paging::ListParams;

#[derive(Debug, Default)]
pub struct Store {
    next_id: i32,
    pub batches: BTreeMap<i32, Batch>,
    pub contacts: BTreeMap<i32, Contact>,
    pub subscriptions: BTreeMap<i32, Subscription>,
}

impl Store {
    /// Live batch `id` owned by `company_id`.
    pub fn batch(&self, company_id: i32, id: i32) -> Option<&Batch> {
        self.batches
            .get(&id)
            .filter(|b| b.company_id == company_id && !b.deleted)
    }

    /// Live contact `id` owned by `company_id`.
    pub fn contact(&self, company_id: i32, id: i32) -> Option<&Contact> {
        self.contacts
            .get(&id)
            .filter(|c| c.company_id == company_id && !c.deleted)
    }

    pub fn seeded() -> Self {
        let mut store = Self::default();
        for subscription in seed_subscriptions() {
            store.subscriptions.insert(subscription.id, subscription);
        }
        store
    }

    fn allocate_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with_store(Arc::new(RwLock::new(Store::seeded())))
}

pub fn app_with_store(db: Db) -> Router {
    Router::new()
        .route(
            "/api/v2/companies/{company_id}/batches",
            get(list_batches_by_company).post(create_batches),
        )
        .route(
            "/api/v2/companies/{company_id}/batches/{id}",
            get(get_batch).delete(delete_batch),
        )
        .route(
            "/api/v2/companies/{company_id}/batches/{batch_id}/files/{id}/attachment",
            get(download_batch),
        )
        .route("/api/v2/batches", get(query_batches))
        .route(
            "/api/v2/companies/{company_id}/contacts",
            get(list_contacts_by_company).post(create_contacts),
        )
        .route(
            "/api/v2/companies/{company_id}/contacts/{id}",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
        .route("/api/v2/contacts", get(query_contacts))
        .route(
            "/api/v2/accounts/{account_id}/subscriptions",
            get(list_subscriptions_by_account),
        )
        .route(
            "/api/v2/accounts/{account_id}/subscriptions/{id}",
            get(get_subscription),
        )
        .route("/api/v2/subscriptions", get(query_subscriptions))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn not_found(entity: &str, id: i32) -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorResult::not_found(entity, id))).into_response()
}

fn deleted() -> Response {
    (StatusCode::OK, Json(Vec::<Value>::new())).into_response()
}

fn respond_page<T: Serialize>(
    records: impl IntoIterator<Item = T>,
    params: &ListParams,
    path: &str,
    strip: Option<&str>,
) -> Response {
    let values = records
        .into_iter()
        .filter_map(|record| serde_json::to_value(record).ok())
        .map(|mut value| {
            if let (Some(field), Some(object)) = (strip, value.as_object_mut()) {
                object.remove(field);
            }
            value
        })
        .collect();
    match paging::page(values, params, path) {
        Ok(envelope) => Json(envelope).into_response(),
        Err(err) => (StatusCode::BAD_REQUEST, Json(err)).into_response(),
    }
}

fn batch_page<'a>(
    batches: impl IntoIterator<Item = &'a Batch>,
    params: &ListParams,
    path: &str,
) -> Response {
    let strip = (!params.includes("Files")).then_some("files");
    respond_page(batches, params, path, strip)
}

// --- batches ---

async fn create_batches(
    State(db): State<Db>,
    Path(company_id): Path<i32>,
    Json(input): Json<Vec<Batch>>,
) -> (StatusCode, Json<Vec<Batch>>) {
    let mut store = db.write().await;
    let mut created = Vec::with_capacity(input.len());
    for mut batch in input {
        batch.id = store.allocate_id();
        batch.company_id = company_id;
        batch.status = Some("Waiting".to_string());
        batch.record_count = batch.files.len() as i32;
        for file in &mut batch.files {
            file.id = store.allocate_id();
            file.batch_id = batch.id;
            file.content_length = file.content.as_deref().map_or(0, |c| c.len() as i32);
        }
        store.batches.insert(batch.id, batch.clone());
        created.push(batch);
    }
    debug!(company_id, count = created.len(), "created batches");
    (StatusCode::CREATED, Json(created))
}

async fn get_batch(State(db): State<Db>, Path((company_id, id)): Path<(i32, i32)>) -> Response {
    let store = db.read().await;
    match store.batch(company_id, id) {
        Some(batch) => Json(batch.clone()).into_response(),
        None => not_found("Batch", id),
    }
}

async fn delete_batch(State(db): State<Db>, Path((company_id, id)): Path<(i32, i32)>) -> Response {
    let mut store = db.write().await;
    if store.batch(company_id, id).is_none() {
        return not_found("Batch", id);
    }
    if let Some(batch) = store.batches.get_mut(&id) {
        batch.deleted = true;
    }
    deleted()
}

async fn download_batch(
    State(db): State<Db>,
    Path((company_id, batch_id, id)): Path<(i32, i32, i32)>,
) -> Response {
    let store = db.read().await;
    let file = store
        .batch(company_id, batch_id)
        .and_then(|b| b.files.iter().find(|f| f.id == id));
    let Some(file) = file else {
        return not_found("BatchFile", id);
    };
    let content_type = file
        .content_type
        .clone()
        .unwrap_or_else(|| "application/octet-stream".to_string());
    let disposition = format!("attachment; filename=\"{}\"", file.name);
    let data = file.content.clone().unwrap_or_default().into_bytes();
    (
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        data,
    )
        .into_response()
}

async fn list_batches_by_company(
    State(db): State<Db>,
    Path(company_id): Path<i32>,
    Query(params): Query<ListParams>,
) -> Response {
    let store = db.read().await;
    let batches = store
        .batches
        .values()
        .filter(|b| b.company_id == company_id && !b.deleted);
    batch_page(batches, &params, &format!("/api/v2/companies/{company_id}/batches"))
}

async fn query_batches(State(db): State<Db>, Query(params): Query<ListParams>) -> Response {
    let store = db.read().await;
    let batches = store.batches.values().filter(|b| !b.deleted);
    batch_page(batches, &params, "/api/v2/batches")
}

// --- contacts ---

async fn create_contacts(
    State(db): State<Db>,
    Path(company_id): Path<i32>,
    Json(input): Json<Vec<Contact>>,
) -> (StatusCode, Json<Vec<Contact>>) {
    let mut store = db.write().await;
    let mut created = Vec::with_capacity(input.len());
    for mut contact in input {
        contact.id = store.allocate_id();
        contact.company_id = company_id;
        store.contacts.insert(contact.id, contact.clone());
        created.push(contact);
    }
    debug!(company_id, count = created.len(), "created contacts");
    (StatusCode::CREATED, Json(created))
}

async fn get_contact(State(db): State<Db>, Path((company_id, id)): Path<(i32, i32)>) -> Response {
    let store = db.read().await;
    match store.contact(company_id, id) {
        Some(contact) => Json(contact.clone()).into_response(),
        None => not_found("Contact", id),
    }
}

/// Full replace: fields missing from the body are cleared.
async fn update_contact(
    State(db): State<Db>,
    Path((company_id, id)): Path<(i32, i32)>,
    Json(mut input): Json<Contact>,
) -> Response {
    let mut store = db.write().await;
    let Some(existing) = store
        .contacts
        .get_mut(&id)
        .filter(|c| c.company_id == company_id && !c.deleted)
    else {
        return not_found("Contact", id);
    };
    input.id = id;
    input.company_id = company_id;
    *existing = input.clone();
    Json(input).into_response()
}

async fn delete_contact(State(db): State<Db>, Path((company_id, id)): Path<(i32, i32)>) -> Response {
    let mut store = db.write().await;
    if store.contact(company_id, id).is_none() {
        return not_found("Contact", id);
    }
    if let Some(contact) = store.contacts.get_mut(&id) {
        contact.deleted = true;
    }
    deleted()
}

async fn list_contacts_by_company(
    State(db): State<Db>,
    Path(company_id): Path<i32>,
    Query(params): Query<ListParams>,
) -> Response {
    let store = db.read().await;
    let contacts = store
        .contacts
        .values()
        .filter(|c| c.company_id == company_id && !c.deleted);
    respond_page(contacts, &params, &format!("/api/v2/companies/{company_id}/contacts"), None)
}

async fn query_contacts(State(db): State<Db>, Query(params): Query<ListParams>) -> Response {
    let store = db.read().await;
    let contacts = store.contacts.values().filter(|c| !c.deleted);
    respond_page(contacts, &params, "/api/v2/contacts", None)
}

// --- subscriptions ---

async fn get_subscription(
    State(db): State<Db>,
    Path((account_id, id)): Path<(i32, i32)>,
) -> Response {
    let store = db.read().await;
    match store.subscriptions.get(&id).filter(|s| s.account_id == account_id) {
        Some(subscription) => Json(subscription.clone()).into_response(),
        None => not_found("Subscription", id),
    }
}

async fn list_subscriptions_by_account(
    State(db): State<Db>,
    Path(account_id): Path<i32>,
    Query(params): Query<ListParams>,
) -> Response {
    let store = db.read().await;
    let subscriptions = store.subscriptions.values().filter(|s| s.account_id == account_id);
    respond_page(
        subscriptions,
        &params,
        &format!("/api/v2/accounts/{account_id}/subscriptions"),
        None,
    )
}

async fn query_subscriptions(State(db): State<Db>, Query(params): Query<ListParams>) -> Response {
    let store = db.read().await;
    respond_page(store.subscriptions.values(), &params, "/api/v2/subscriptions", None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_store_has_subscriptions_only() {
        let store = Store::seeded();
        assert_eq!(store.subscriptions.len(), 3);
        assert!(store.batches.is_empty());
        assert!(store.contacts.is_empty());
    }

    #[test]
    fn deleted_records_are_kept_but_hidden() {
        let mut store = Store::default();
        let id = store.allocate_id();
        store.contacts.insert(
            id,
            Contact {
                id,
                company_id: 7,
                contact_code: "AP".to_string(),
                ..Default::default()
            },
        );
        assert!(store.contact(7, id).is_some());
        assert!(store.contact(8, id).is_none());

        store.contacts.get_mut(&id).unwrap().deleted = true;
        assert!(store.contact(7, id).is_none());
        assert_eq!(store.contacts.len(), 1);
    }

    #[test]
    fn ids_are_shared_and_increasing() {
        let mut store = Store::default();
        assert_eq!(store.allocate_id(), 1);
        assert_eq!(store.allocate_id(), 2);
    }
}
