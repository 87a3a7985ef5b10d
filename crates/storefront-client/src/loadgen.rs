//! Randomized load generation against a running gateway.
//!
//! Each request picks one [`Scenario`] uniformly at random. Dispatch is paced
//! by a fixed delay and bounded by a semaphore; any 2xx status counts as a
//! success.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use reqwest::Method;
use serde_json::{json, Value};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::client::StorefrontClient;

const SEARCH_TERMS: &[&str] = &["laptop", "phone", "book", "shoes", "watch", "camera"];
const ANALYTICS_PATHS: &[&str] = &[
    "/api/analytics/sales?start_date=2024-01-01&end_date=2024-12-31",
    "/api/analytics/popular-products",
    "/api/analytics/revenue",
];
const CATEGORIES: &[&str] = &["Electronics", "Clothing", "Books", "Home", "Sports"];
const BRANDS: &[&str] = &["BrandA", "BrandB", "BrandC", "BrandD", "BrandE"];
const TAG_SETS: &[&[&str]] = &[
    &["new", "sale", "popular"],
    &["featured", "bestseller"],
    &["limited", "exclusive"],
];
const ORDER_STATUSES: &[&str] = &["pending", "processing", "shipped", "delivered"];
const PAYMENT_METHODS: &[&str] = &["credit_card", "debit_card", "paypal", "cash"];
const COMMENTS: &[&str] = &[
    "Great product!",
    "Excellent quality",
    "Very satisfied",
    "Could be better",
    "Amazing purchase",
];

/// How many requests to send and how fast.
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Requests to dispatch in total.
    pub total_requests: u64,
    /// Maximum requests in flight.
    pub concurrency: usize,
    /// Pause after each dispatch.
    pub delay: Duration,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            total_requests: 1000,
            concurrency: 50,
            delay: Duration::from_millis(50),
            seed: None,
        }
    }
}

/// One kind of request the generator can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// `GET /health`
    Health,
    /// `GET /api/users`
    ListUsers,
    /// `GET /api/products`
    ListProducts,
    /// `GET /api/orders`
    ListOrders,
    /// `GET /api/inventory`
    ListInventory,
    /// `GET /api/categories`
    ListCategories,
    /// `GET /api/products/search?q=<term>`
    SearchProducts,
    /// One of the analytics reads.
    Analytics,
    /// `GET /api/reviews/product/prod<N>`
    ProductReviews,
    /// `POST /api/users`
    CreateUser,
    /// `POST /api/products`
    CreateProduct,
    /// `POST /api/orders`
    CreateOrder,
    /// `POST /api/reviews`
    CreateReview,
}

impl Scenario {
    /// Every scenario, each equally likely.
    pub const ALL: [Self; 13] = [
        Self::Health,
        Self::ListUsers,
        Self::ListProducts,
        Self::ListOrders,
        Self::ListInventory,
        Self::ListCategories,
        Self::SearchProducts,
        Self::Analytics,
        Self::ProductReviews,
        Self::CreateUser,
        Self::CreateProduct,
        Self::CreateOrder,
        Self::CreateReview,
    ];

    /// Pick a scenario uniformly at random.
    pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Build a concrete request with randomized parameters.
    pub fn request<R: Rng + ?Sized>(self, rng: &mut R) -> PlannedRequest {
        match self {
            Self::Health => PlannedRequest::get("/health"),
            Self::ListUsers => PlannedRequest::get("/api/users"),
            Self::ListProducts => PlannedRequest::get("/api/products"),
            Self::ListOrders => PlannedRequest::get("/api/orders"),
            Self::ListInventory => PlannedRequest::get("/api/inventory"),
            Self::ListCategories => PlannedRequest::get("/api/categories"),
            Self::SearchProducts => {
                PlannedRequest::get(format!("/api/products/search?q={}", choose(rng, SEARCH_TERMS)))
            }
            Self::Analytics => PlannedRequest::get(choose(rng, ANALYTICS_PATHS)),
            Self::ProductReviews => PlannedRequest::get(format!(
                "/api/reviews/product/prod{}",
                rng.gen_range(1..=100)
            )),
            Self::CreateUser => PlannedRequest::post(
                "/api/users",
                json!({
                    "name": format!("User_{}", rng.gen_range(0..10_000)),
                    "email": format!("user{}@example.com", rng.gen_range(0..10_000)),
                    "password": "password123",
                    "address": format!("{} Main St, City, State", rng.gen_range(0..1000)),
                    "phone": format!("+1-555-{:04}", rng.gen_range(0..10_000)),
                }),
            ),
            Self::CreateProduct => PlannedRequest::post(
                "/api/products",
                json!({
                    "name": format!("Product_{}", rng.gen_range(0..10_000)),
                    "description": format!("Description for product {}", rng.gen_range(0..10_000)),
                    "price": f64::from(rng.gen_range(0..1000_u16)) + 0.99,
                    "category": choose(rng, CATEGORIES),
                    "brand": choose(rng, BRANDS),
                    "image_url": format!("https://example.com/image{}.jpg", rng.gen_range(0..100)),
                    "rating": f64::from(rng.gen_range(1..=5_u8)),
                    "tags": choose(rng, TAG_SETS),
                }),
            ),
            Self::CreateOrder => PlannedRequest::post(
                "/api/orders",
                json!({
                    "user_id": rng.gen_range(1..=100),
                    "total_amount": f64::from(rng.gen_range(0..500_u16)) + 0.99,
                    "status": choose(rng, ORDER_STATUSES),
                    "payment_method": choose(rng, PAYMENT_METHODS),
                    "shipping_address": format!("{} Shipping St, City, State", rng.gen_range(0..1000)),
                }),
            ),
            Self::CreateReview => PlannedRequest::post(
                "/api/reviews",
                json!({
                    "product_id": format!("prod{}", rng.gen_range(1..=100)),
                    "user_id": rng.gen_range(1..=100),
                    "rating": rng.gen_range(1..=5),
                    "comment": choose(rng, COMMENTS),
                }),
            ),
        }
    }
}

fn choose<T: Copy, R: Rng + ?Sized>(rng: &mut R, items: &[T]) -> T {
    // Every list above is a non-empty constant.
    *items.choose(rng).unwrap_or(&items[0])
}

/// A request ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRequest {
    /// HTTP method.
    pub method: Method,
    /// Path plus query string.
    pub path: String,
    /// JSON body, if any.
    pub body: Option<Value>,
}

impl PlannedRequest {
    fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
        }
    }

    fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body: Some(body),
        }
    }
}

#[derive(Default)]
struct Counters {
    successes: AtomicU64,
    failures: AtomicU64,
    latency_nanos: AtomicU64,
}

/// Outcome of a load run.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    /// Requests dispatched.
    pub total: u64,
    /// Requests answered with a 2xx status.
    pub successes: u64,
    /// Requests that failed in transport or returned a non-2xx status.
    pub failures: u64,
    /// Sum of per-request latencies.
    pub total_latency: Duration,
    /// Wall-clock time for the whole run.
    pub duration: Duration,
}

impl LoadReport {
    /// Mean latency across all dispatched requests.
    #[must_use]
    pub fn average_latency(&self) -> Duration {
        match u32::try_from(self.total) {
            Ok(0) | Err(_) => Duration::ZERO,
            Ok(total) => self.total_latency / total,
        }
    }

    /// Throughput over the whole run.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn requests_per_second(&self) -> f64 {
        let seconds = self.duration.as_secs_f64();
        if seconds == 0.0 {
            0.0
        } else {
            self.total as f64 / seconds
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn percent(&self, count: u64) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 * 100.0 / self.total as f64
        }
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==================== Load Test Results ====================")?;
        writeln!(f, "Total Requests:      {}", self.total)?;
        writeln!(
            f,
            "Successful Requests: {} ({:.2}%)",
            self.successes,
            self.percent(self.successes)
        )?;
        writeln!(
            f,
            "Failed Requests:     {} ({:.2}%)",
            self.failures,
            self.percent(self.failures)
        )?;
        writeln!(f, "Average Latency:     {:?}", self.average_latency())?;
        writeln!(f, "Total Duration:      {:?}", self.duration)?;
        writeln!(f, "Requests/Second:     {:.2}", self.requests_per_second())?;
        write!(f, "===========================================================")
    }
}

/// Dispatch `config.total_requests` random requests and wait for all of them.
pub async fn run(client: &StorefrontClient, config: &LoadConfig) -> LoadReport {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let semaphore = Arc::new(Semaphore::new(config.concurrency.max(1)));
    let counters = Arc::new(Counters::default());
    let mut tasks = JoinSet::new();

    let started = Instant::now();

    for request_num in 0..config.total_requests {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };
        let planned = Scenario::pick(&mut rng).request(&mut rng);
        let client = client.clone();
        let counters = counters.clone();

        tasks.spawn(async move {
            let _permit = permit;
            execute(&client, request_num, &planned, &counters).await;
        });

        if !config.delay.is_zero() {
            tokio::time::sleep(config.delay).await;
        }
    }

    while tasks.join_next().await.is_some() {}

    LoadReport {
        total: config.total_requests,
        successes: counters.successes.load(Ordering::Relaxed),
        failures: counters.failures.load(Ordering::Relaxed),
        total_latency: Duration::from_nanos(counters.latency_nanos.load(Ordering::Relaxed)),
        duration: started.elapsed(),
    }
}

async fn execute(
    client: &StorefrontClient,
    request_num: u64,
    planned: &PlannedRequest,
    counters: &Counters,
) {
    let started = Instant::now();
    let result = client
        .send_raw(planned.method.clone(), &planned.path, planned.body.as_ref())
        .await;
    let latency = started.elapsed();
    counters.latency_nanos.fetch_add(
        u64::try_from(latency.as_nanos()).unwrap_or(u64::MAX),
        Ordering::Relaxed,
    );

    match result {
        Ok(status) if status.is_success() => {
            counters.successes.fetch_add(1, Ordering::Relaxed);
            if request_num % 100 == 0 {
                tracing::info!(
                    request_num,
                    method = %planned.method,
                    path = %planned.path,
                    status = status.as_u16(),
                    latency = ?latency,
                    "Request succeeded"
                );
            }
        }
        Ok(status) => {
            counters.failures.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(
                request_num,
                method = %planned.method,
                path = %planned.path,
                status = status.as_u16(),
                latency = ?latency,
                "Request failed"
            );
        }
        Err(e) => {
            counters.failures.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(
                request_num,
                method = %planned.method,
                path = %planned.path,
                error = %e,
                "Request failed"
            );
        }
    }
}
