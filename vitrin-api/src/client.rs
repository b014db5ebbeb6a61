//! Typed HTTP client for the storefront REST API.
//!
//! One async method per endpoint. Cart mutations are increment/decrement
//! only; there is no "set quantity" endpoint, absolute updates are the
//! caller's deltas.

use reqwest::{Client, StatusCode};
use url::Url;

use crate::objects::cart::CartItem;
use crate::objects::catalog::{Gender, Product};
use crate::objects::delivery::DeliveryUpdateRequest;
use crate::objects::order::{CreateOrderRequest, OrderDetails, OrderId, PaymentStatusResponse};
use crate::objects::{ErrorDetail, ErrorResponse};

/// Errors produced by the storefront HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, TLS, connection reset).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("api error: status {status}: {detail}")]
    Api { status: StatusCode, detail: ErrorDetail },

    /// Response body could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base URL could not be joined with the endpoint path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

/// Typed HTTP client for the storefront API.
///
/// Cheap to clone; the underlying `reqwest::Client` is shared.
#[derive(Debug, Clone)]
pub struct ShopClient {
    http: Client,
    base_url: Url,
}

impl ShopClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (timeouts,
    /// proxies).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `GET /get_products/`: the full product catalog.
    pub async fn products(&self) -> Result<Vec<Product>, ClientError> {
        let url = self.base_url.join("/get_products/")?;
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }

    /// `GET /get_product/{id}`: a single product.
    pub async fn product(&self, product_id: i64) -> Result<Product, ClientError> {
        let url = self.base_url.join(&format!("/get_product/{product_id}"))?;
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }

    /// `GET /get_categories/?gender=`: category names for one audience
    /// segment.
    pub async fn categories(&self, gender: Gender) -> Result<Vec<String>, ClientError> {
        let url = self.base_url.join("/get_categories/")?;
        let resp = self
            .http
            .get(url)
            .query(&[("gender", gender.to_string())])
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `GET /get_cart/{user_id}`: the server-side cart for one shopper.
    pub async fn cart(&self, user_id: i64) -> Result<Vec<CartItem>, ClientError> {
        let url = self.base_url.join(&format!("/get_cart/{user_id}"))?;
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }

    /// `POST /add_to_cart/`: increment one cart line.
    pub async fn add_to_cart(
        &self,
        user_id: i64,
        product_id: i64,
        quantity: u32,
    ) -> Result<(), ClientError> {
        let url = self.base_url.join("/add_to_cart/")?;
        let resp = self
            .http
            .post(url)
            .query(&[
                ("user_id", user_id.to_string()),
                ("product_id", product_id.to_string()),
                ("quantity", quantity.to_string()),
            ])
            .send()
            .await?;
        ensure_success(resp).await
    }

    /// `DELETE /del_from_cart/`: decrement one cart line. The server drops
    /// the whole line once the decrement reaches zero.
    pub async fn remove_from_cart(
        &self,
        user_id: i64,
        product_id: i64,
        quantity: u32,
    ) -> Result<(), ClientError> {
        let url = self.base_url.join("/del_from_cart/")?;
        let resp = self
            .http
            .delete(url)
            .query(&[
                ("user_id", user_id.to_string()),
                ("product_id", product_id.to_string()),
                ("quantity", quantity.to_string()),
            ])
            .send()
            .await?;
        ensure_success(resp).await
    }

    /// `POST /create_order/`: convert a cart snapshot into an order with
    /// payment coordinates.
    pub async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<OrderDetails, ClientError> {
        let url = self.base_url.join("/create_order/")?;
        let resp = self.http.post(url).json(request).send().await?;
        parse_response(resp).await
    }

    /// `GET /get_order_details/{order_id}`: the full order record.
    pub async fn order_details(&self, order_id: &OrderId) -> Result<OrderDetails, ClientError> {
        let url = self
            .base_url
            .join(&format!("/get_order_details/{order_id}"))?;
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }

    /// `GET /check_payment/{order_id}`: the current payment status.
    pub async fn check_payment(
        &self,
        order_id: &OrderId,
    ) -> Result<PaymentStatusResponse, ClientError> {
        let url = self.base_url.join(&format!("/check_payment/{order_id}"))?;
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }

    /// `PUT /update_order_delivery/`: attach delivery details to a paid
    /// order.
    pub async fn update_delivery(
        &self,
        request: &DeliveryUpdateRequest,
    ) -> Result<OrderDetails, ClientError> {
        let url = self.base_url.join("/update_order_delivery/")?;
        let resp = self.http.put(url).json(request).send().await?;
        parse_response(resp).await
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(error_from_response(status, resp).await);
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::Json)
}

/// Check the status and discard the body. The cart mutation endpoints answer
/// with a `{"message": ...}` blob the client has no use for.
async fn ensure_success(resp: reqwest::Response) -> Result<(), ClientError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(error_from_response(status, resp).await);
    }
    Ok(())
}

async fn error_from_response(status: StatusCode, resp: reqwest::Response) -> ClientError {
    let body = resp.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.detail)
        .unwrap_or_else(|_| {
            if body.trim().is_empty() {
                ErrorDetail::Message(format!("status {status} with empty body"))
            } else {
                ErrorDetail::Message(body)
            }
        });
    ClientError::Api { status, detail }
}
