//! Subscriptions: licensed access to named Avalara services. Read-only;
//! Avalara provisions them out of band.

use crate::client::AvaTaxClient;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::{HttpMethod, Transport};
use crate::options::{FetchOptions, QueryKey};
use crate::types::{FetchResult, SubscriptionModel};

/// Subscriptions have no child objects, so `$include` is not accepted.
const SUBSCRIPTION_QUERY: &[QueryKey] = &[QueryKey::Filter, QueryKey::Top, QueryKey::Skip, QueryKey::OrderBy];

pub const GET_SUBSCRIPTION: Endpoint = Endpoint {
    name: "get_subscription",
    method: HttpMethod::Get,
    template: "/api/v2/accounts/{accountId}/subscriptions/{id}",
    query: &[],
};

pub const LIST_SUBSCRIPTIONS_BY_ACCOUNT: Endpoint = Endpoint {
    name: "list_subscriptions_by_account",
    method: HttpMethod::Get,
    template: "/api/v2/accounts/{accountId}/subscriptions",
    query: SUBSCRIPTION_QUERY,
};

pub const QUERY_SUBSCRIPTIONS: Endpoint = Endpoint {
    name: "query_subscriptions",
    method: HttpMethod::Get,
    template: "/api/v2/subscriptions",
    query: SUBSCRIPTION_QUERY,
};

impl<T: Transport> AvaTaxClient<T> {
    pub fn get_subscription(&self, account_id: i32, id: i32) -> Result<SubscriptionModel, ApiError> {
        self.fetch(&GET_SUBSCRIPTION, &[account_id, id], None)
    }

    pub fn list_subscriptions_by_account(
        &self,
        account_id: i32,
        options: Option<&FetchOptions>,
    ) -> Result<FetchResult<SubscriptionModel>, ApiError> {
        self.fetch(&LIST_SUBSCRIPTIONS_BY_ACCOUNT, &[account_id], options)
    }

    pub fn query_subscriptions(&self, options: Option<&FetchOptions>) -> Result<FetchResult<SubscriptionModel>, ApiError> {
        self.fetch(&QUERY_SUBSCRIPTIONS, &[], options)
    }
}
