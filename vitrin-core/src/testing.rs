//! Scripted in-process backend for lifecycle tests.
//!
//! Mimics the real server's cart behavior (merge on add, decrement-or-delete
//! on remove, server cart cleared when an order is created) and lets tests
//! script failures and payment status sequences. Every call is recorded in
//! arrival order.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use compact_str::CompactString;
use vitrin_api::ClientError;
use vitrin_api::objects::ErrorDetail;
use vitrin_api::objects::cart::CartItem;
use vitrin_api::objects::delivery::DeliveryUpdateRequest;
use vitrin_api::objects::order::{
    CreateOrderRequest, OrderDetails, OrderId, OrderStatus, PaymentStatusResponse,
};

use crate::backend::StorefrontBackend;

/// One backend call, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchCart,
    Add { product_id: i64, quantity: u32 },
    Remove { product_id: i64, quantity: u32 },
    CreateOrder,
    OrderDetails,
    CheckPayment,
    SubmitDelivery,
}

pub struct FakeBackend {
    products: Mutex<Vec<CartItem>>,
    cart: Mutex<Vec<CartItem>>,
    order: Mutex<Option<OrderDetails>>,
    payment_script: Mutex<VecDeque<Result<OrderStatus, ClientError>>>,
    calls: Mutex<Vec<Call>>,
    clear_cart_on_order: bool,
    fail_next_fetch: Mutex<Option<ClientError>>,
    fail_next_add: Mutex<Option<ClientError>>,
    fail_next_remove: Mutex<Option<ClientError>>,
    fail_next_submit: Mutex<Option<ClientError>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            products: Mutex::new(Vec::new()),
            cart: Mutex::new(Vec::new()),
            order: Mutex::new(None),
            payment_script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            clear_cart_on_order: true,
            fail_next_fetch: Mutex::new(None),
            fail_next_add: Mutex::new(None),
            fail_next_remove: Mutex::new(None),
            fail_next_submit: Mutex::new(None),
        }
    }

    /// Known products, addable by id.
    pub fn with_products(self, products: Vec<CartItem>) -> Self {
        *self.products.lock().unwrap() = products;
        self
    }

    /// Seed the server-side cart.
    pub fn with_cart(self, items: Vec<CartItem>) -> Self {
        *self.cart.lock().unwrap() = items;
        self
    }

    /// Seed the stored order record.
    pub fn with_order(self, order: OrderDetails) -> Self {
        *self.order.lock().unwrap() = Some(order);
        self
    }

    /// Keep the server cart intact when an order is created. The real
    /// backend clears it; flipping this makes the client's own clear calls
    /// observable.
    pub fn keep_cart_on_order(mut self) -> Self {
        self.clear_cart_on_order = false;
        self
    }

    pub fn push_payment_status(&self, status: OrderStatus) {
        self.payment_script.lock().unwrap().push_back(Ok(status));
    }

    pub fn push_payment_error(&self, err: ClientError) {
        self.payment_script.lock().unwrap().push_back(Err(err));
    }

    pub fn fail_next_fetch(&self, err: ClientError) {
        *self.fail_next_fetch.lock().unwrap() = Some(err);
    }

    pub fn fail_next_add(&self, err: ClientError) {
        *self.fail_next_add.lock().unwrap() = Some(err);
    }

    pub fn fail_next_remove(&self, err: ClientError) {
        *self.fail_next_remove.lock().unwrap() = Some(err);
    }

    pub fn fail_next_submit(&self, err: ClientError) {
        *self.fail_next_submit.lock().unwrap() = Some(err);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn check_payment_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| **c == Call::CheckPayment)
            .count()
    }

    pub fn stored_order(&self) -> Option<OrderDetails> {
        self.order.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    /// Shorthand for a valid cart line.
    pub fn item(id: i64, name: &str, price: &str, quantity: u32) -> CartItem {
        CartItem {
            id,
            name: name.to_owned(),
            price: price.parse().unwrap(),
            quantity,
            gender: None,
            category: None,
            image_url: None,
        }
    }

    /// Shorthand for an order record in the given status.
    pub fn order_record(id: &str, status: OrderStatus) -> OrderDetails {
        OrderDetails {
            id: OrderId::from(id),
            user_id: 1,
            items: vec![Self::item(7, "hoodie", "10.00", 2)],
            total: "20.00".parse().unwrap(),
            status,
            payment_address: Some("tb1qexample".to_owned()),
            payment_amount: Some("20.00".parse().unwrap()),
            currency: CompactString::const_new("BTC"),
            name: None,
            contact_handle: None,
            address: None,
            postcode: None,
            city: None,
            country: None,
            created_at: 1_700_000_000,
        }
    }

    pub fn api_error(status: u16, msg: &str) -> ClientError {
        ClientError::Api {
            status: reqwest::StatusCode::from_u16(status).unwrap(),
            detail: ErrorDetail::Message(msg.to_owned()),
        }
    }

    pub fn api_error_with_detail(status: u16, detail: ErrorDetail) -> ClientError {
        ClientError::Api {
            status: reqwest::StatusCode::from_u16(status).unwrap(),
            detail,
        }
    }

    /// A `ClientError` that classifies as a transport failure.
    pub fn transport_error() -> ClientError {
        ClientError::Json(serde_json::from_str::<i64>("boom").unwrap_err())
    }
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorefrontBackend for FakeBackend {
    async fn fetch_cart(&self, _user_id: i64) -> Result<Vec<CartItem>, ClientError> {
        self.record(Call::FetchCart);
        if let Some(err) = self.fail_next_fetch.lock().unwrap().take() {
            return Err(err);
        }
        Ok(self.cart.lock().unwrap().clone())
    }

    async fn add_to_cart(
        &self,
        _user_id: i64,
        product_id: i64,
        quantity: u32,
    ) -> Result<(), ClientError> {
        self.record(Call::Add {
            product_id,
            quantity,
        });
        if let Some(err) = self.fail_next_add.lock().unwrap().take() {
            return Err(err);
        }
        let mut cart = self.cart.lock().unwrap();
        if let Some(line) = cart.iter_mut().find(|l| l.id == product_id) {
            line.quantity += quantity;
            return Ok(());
        }
        let template = self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == product_id)
            .cloned();
        match template {
            Some(mut line) => {
                line.quantity = quantity;
                cart.push(line);
                Ok(())
            }
            None => Err(Self::api_error(404, "Product not found")),
        }
    }

    async fn remove_from_cart(
        &self,
        _user_id: i64,
        product_id: i64,
        quantity: u32,
    ) -> Result<(), ClientError> {
        self.record(Call::Remove {
            product_id,
            quantity,
        });
        if let Some(err) = self.fail_next_remove.lock().unwrap().take() {
            return Err(err);
        }
        let mut cart = self.cart.lock().unwrap();
        let Some(pos) = cart.iter().position(|l| l.id == product_id) else {
            return Err(Self::api_error(404, "Item not found in user's cart"));
        };
        if cart[pos].quantity <= quantity {
            cart.remove(pos);
        } else {
            cart[pos].quantity -= quantity;
        }
        Ok(())
    }

    async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<OrderDetails, ClientError> {
        self.record(Call::CreateOrder);
        let order = OrderDetails {
            id: OrderId::from("abc"),
            user_id: request.user_id,
            items: request.items.clone(),
            total: request.total,
            status: OrderStatus::Unpaid,
            payment_address: Some("tb1qexample".to_owned()),
            payment_amount: Some(request.total),
            currency: CompactString::const_new("BTC"),
            name: request.name.clone(),
            contact_handle: request.contact_handle.clone(),
            address: request.address.clone(),
            postcode: request.postcode.clone(),
            city: request.city.clone(),
            country: request.country.clone(),
            created_at: 1_700_000_000,
        };
        if self.clear_cart_on_order {
            self.cart.lock().unwrap().clear();
        }
        *self.order.lock().unwrap() = Some(order.clone());
        Ok(order)
    }

    async fn order_details(&self, _order_id: &OrderId) -> Result<OrderDetails, ClientError> {
        self.record(Call::OrderDetails);
        match self.order.lock().unwrap().clone() {
            Some(order) => Ok(order),
            None => Err(Self::api_error(404, "Order not found")),
        }
    }

    async fn check_payment(
        &self,
        _order_id: &OrderId,
    ) -> Result<PaymentStatusResponse, ClientError> {
        self.record(Call::CheckPayment);
        match self.payment_script.lock().unwrap().pop_front() {
            Some(Ok(status)) => Ok(PaymentStatusResponse {
                status,
                message: None,
            }),
            Some(Err(err)) => Err(err),
            None => Ok(PaymentStatusResponse {
                status: OrderStatus::Unpaid,
                message: None,
            }),
        }
    }

    async fn submit_delivery(
        &self,
        request: &DeliveryUpdateRequest,
    ) -> Result<OrderDetails, ClientError> {
        self.record(Call::SubmitDelivery);
        if let Some(err) = self.fail_next_submit.lock().unwrap().take() {
            return Err(err);
        }
        let mut guard = self.order.lock().unwrap();
        let Some(order) = guard.as_mut() else {
            return Err(Self::api_error(404, "Order not found"));
        };
        order.name = Some(request.details.name.clone());
        order.contact_handle = Some(request.details.contact_handle.clone());
        order.address = Some(request.details.address.clone());
        order.postcode = Some(request.details.postcode.clone());
        order.city = Some(request.details.city.clone());
        order.country = Some(request.details.country.clone());
        Ok(order.clone())
    }
}
