//! Seam between the lifecycle controller and the storefront REST API.

use async_trait::async_trait;
use vitrin_api::objects::cart::CartItem;
use vitrin_api::objects::delivery::DeliveryUpdateRequest;
use vitrin_api::objects::order::{
    CreateOrderRequest, OrderDetails, OrderId, PaymentStatusResponse,
};
use vitrin_api::{ClientError, ShopClient};

/// The lifecycle subset of the storefront API.
///
/// Injected everywhere as `Arc<dyn StorefrontBackend>`; production uses
/// [`ShopClient`], tests use a scripted in-process fake. Catalog browsing
/// stays on the concrete client since it is read-only and not part of the
/// lifecycle.
#[async_trait]
pub trait StorefrontBackend: Send + Sync {
    async fn fetch_cart(&self, user_id: i64) -> Result<Vec<CartItem>, ClientError>;

    async fn add_to_cart(
        &self,
        user_id: i64,
        product_id: i64,
        quantity: u32,
    ) -> Result<(), ClientError>;

    async fn remove_from_cart(
        &self,
        user_id: i64,
        product_id: i64,
        quantity: u32,
    ) -> Result<(), ClientError>;

    async fn create_order(&self, request: &CreateOrderRequest)
    -> Result<OrderDetails, ClientError>;

    async fn order_details(&self, order_id: &OrderId) -> Result<OrderDetails, ClientError>;

    async fn check_payment(
        &self,
        order_id: &OrderId,
    ) -> Result<PaymentStatusResponse, ClientError>;

    async fn submit_delivery(
        &self,
        request: &DeliveryUpdateRequest,
    ) -> Result<OrderDetails, ClientError>;
}

#[async_trait]
impl StorefrontBackend for ShopClient {
    async fn fetch_cart(&self, user_id: i64) -> Result<Vec<CartItem>, ClientError> {
        self.cart(user_id).await
    }

    async fn add_to_cart(
        &self,
        user_id: i64,
        product_id: i64,
        quantity: u32,
    ) -> Result<(), ClientError> {
        ShopClient::add_to_cart(self, user_id, product_id, quantity).await
    }

    async fn remove_from_cart(
        &self,
        user_id: i64,
        product_id: i64,
        quantity: u32,
    ) -> Result<(), ClientError> {
        ShopClient::remove_from_cart(self, user_id, product_id, quantity).await
    }

    async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<OrderDetails, ClientError> {
        ShopClient::create_order(self, request).await
    }

    async fn order_details(&self, order_id: &OrderId) -> Result<OrderDetails, ClientError> {
        ShopClient::order_details(self, order_id).await
    }

    async fn check_payment(
        &self,
        order_id: &OrderId,
    ) -> Result<PaymentStatusResponse, ClientError> {
        ShopClient::check_payment(self, order_id).await
    }

    async fn submit_delivery(
        &self,
        request: &DeliveryUpdateRequest,
    ) -> Result<OrderDetails, ClientError> {
        self.update_delivery(request).await
    }
}
