//! # Data Client
//!
//! Catalog and order queries against the hosted database's REST tables.
//! Requests carry the signed-in user's token when there is one and the
//! public key otherwise; row-level access is enforced by the backend.

use std::rc::Rc;

use reqwest::{Method, RequestBuilder};
use serde_json::json;
use tracing::{debug, info};

use crate::auth::HostedAuthClient;
use crate::client::{BackendError, BackendHttp, BackendResult};
use crate::models::{NewOrder, Order, OrderStatus, Product, Restaurant};

const RESTAURANTS_TABLE: &str = "rest/v1/restaurants";
const PRODUCTS_TABLE: &str = "rest/v1/products";
const ORDERS_TABLE: &str = "rest/v1/orders";

/// Ask the backend to echo the written rows.
const PREFER_HEADER: &str = "Prefer";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Client for the `restaurants`, `products` and `orders` tables.
#[derive(Debug, Clone)]
pub struct DataClient {
    auth: Rc<HostedAuthClient>,
}

impl DataClient {
    /// Share the auth client's connection settings and session.
    pub fn new(auth: Rc<HostedAuthClient>) -> Self {
        Self { auth }
    }

    fn http(&self) -> &BackendHttp {
        self.auth.http()
    }

    fn request(&self, method: Method, table: &str) -> BackendResult<RequestBuilder> {
        let token = self.auth.access_token();
        self.http().request(method, table, token.as_deref())
    }

    /// Like [`DataClient::request`] but refuses to fall back to the public key.
    fn authenticated_request(&self, method: Method, table: &str) -> BackendResult<RequestBuilder> {
        let token = self.auth.access_token().ok_or(BackendError::NotAuthenticated)?;
        self.http().request(method, table, Some(&token))
    }

    /// Every restaurant, by name.
    ///
    /// # Errors
    /// Any [`BackendError`] raised by the request.
    pub async fn list_restaurants(&self) -> BackendResult<Vec<Restaurant>> {
        let request = self
            .request(Method::GET, RESTAURANTS_TABLE)?
            .query(&[("select", "*"), ("order", "name.asc")]);
        let restaurants: Vec<Restaurant> = self.http().send_json(request).await?;
        debug!(count = restaurants.len(), "restaurants loaded");
        Ok(restaurants)
    }

    /// Available products, optionally limited to one restaurant.
    ///
    /// # Errors
    /// Any [`BackendError`] raised by the request.
    pub async fn list_products(&self, restaurant_id: Option<&str>) -> BackendResult<Vec<Product>> {
        let request = products_query(self.request(Method::GET, PRODUCTS_TABLE)?, restaurant_id);
        let products: Vec<Product> = self.http().send_json(request).await?;
        debug!(count = products.len(), "products loaded");
        Ok(products)
    }

    /// The signed-in user's orders, newest first.
    ///
    /// # Errors
    /// [`BackendError::NotAuthenticated`] without a session, otherwise any
    /// error raised by the request.
    pub async fn list_orders_for_user(&self, user_id: &str) -> BackendResult<Vec<Order>> {
        let request = orders_query(
            self.authenticated_request(Method::GET, ORDERS_TABLE)?,
            "user_id",
            user_id,
        );
        self.http().send_json(request).await
    }

    /// Orders received by a restaurant, newest first.
    ///
    /// # Errors
    /// Any [`BackendError`] raised by the request.
    pub async fn list_orders_for_restaurant(&self, restaurant_id: &str) -> BackendResult<Vec<Order>> {
        let request = orders_query(
            self.request(Method::GET, ORDERS_TABLE)?,
            "restaurant_id",
            restaurant_id,
        );
        self.http().send_json(request).await
    }

    /// Insert an order and return the stored row.
    ///
    /// # Errors
    /// [`BackendError::NotAuthenticated`] without a session, and
    /// [`BackendError::UnexpectedResponse`] when the backend echoes no row.
    pub async fn place_order(&self, order: &NewOrder) -> BackendResult<Order> {
        let request = self
            .authenticated_request(Method::POST, ORDERS_TABLE)?
            .header(PREFER_HEADER, RETURN_REPRESENTATION)
            .json(order);
        let stored = first_row(self.http().send_json(request).await?, "insert")?;
        info!(order_id = %stored.id, restaurant_id = %stored.restaurant_id, "order placed");
        Ok(stored)
    }

    /// Move an order to `status` and return the updated row.
    ///
    /// # Errors
    /// [`BackendError::UnexpectedResponse`] when no row matched, otherwise
    /// any error raised by the request.
    pub async fn update_order_status(&self, order_id: &str, status: OrderStatus) -> BackendResult<Order> {
        let request = status_update(self.request(Method::PATCH, ORDERS_TABLE)?, order_id, status);
        let updated = first_row(self.http().send_json(request).await?, "update")?;
        info!(order_id = %updated.id, status = %updated.status, "order status updated");
        Ok(updated)
    }
}

fn eq_filter(value: &str) -> String {
    format!("eq.{value}")
}

fn products_query(request: RequestBuilder, restaurant_id: Option<&str>) -> RequestBuilder {
    let request = request.query(&[
        ("select", "*"),
        ("available", "eq.true"),
        ("order", "name.asc"),
    ]);
    match restaurant_id {
        Some(id) => request.query(&[("restaurant_id", eq_filter(id))]),
        None => request,
    }
}

fn orders_query(request: RequestBuilder, column: &str, value: &str) -> RequestBuilder {
    request
        .query(&[("select", "*"), ("order", "created_at.desc")])
        .query(&[(column, eq_filter(value))])
}

fn status_update(request: RequestBuilder, order_id: &str, status: OrderStatus) -> RequestBuilder {
    request
        .query(&[("id", eq_filter(order_id))])
        .header(PREFER_HEADER, RETURN_REPRESENTATION)
        .json(&json!({ "status": status }))
}

fn first_row(rows: Vec<Order>, operation: &str) -> BackendResult<Order> {
    rows.into_iter()
        .next()
        .ok_or_else(|| BackendError::unexpected(format!("{operation} returned no rows")))
}
