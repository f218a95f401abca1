//! Common Test Utilities
//!
//! In-memory implementations of the repository, cache and text-generation
//! traits, plus a `TestApp` that drives the real router with `oneshot`.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request},
    response::Response,
    Router,
};
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use gym_server::application::services::{
    hash_password, AuthService, Generation, TextGenerator,
};
use gym_server::config::{
    BootstrapSettings, CacheSettings, CorsSettings, DatabaseSettings, GeminiSettings,
    JwtSettings, RedisSettings, ServerSettings, Settings,
};
use gym_server::domain::{
    Appointment, AppointmentDetail, AppointmentRepository, AppointmentScope, AppointmentStatus,
    Gym, GymRepository, OfferingListing, OfferingScope, Post, PostRepository, PostVisibility,
    Role, ServiceOffering, ServiceOfferingRepository, User, UserListing, UserRepository,
};
use gym_server::infrastructure::cache::Cache;
use gym_server::infrastructure::repositories::Repositories;
use gym_server::presentation::http::routes;
use gym_server::shared::error::AppError;
use gym_server::startup::AppState;

pub const TEST_PASSWORD: &str = "TestPassword123!";

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Default)]
pub struct Store {
    pub users: Vec<User>,
    pub gyms: Vec<Gym>,
    pub offerings: Vec<ServiceOffering>,
    pub appointments: Vec<Appointment>,
    pub posts: Vec<Post>,
    next_id: i64,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn gym_name(&self, id: i64) -> Option<String> {
        self.gyms.iter().find(|g| g.id == id).map(|g| g.name.clone())
    }

    fn listing(&self, offering: &ServiceOffering) -> Option<OfferingListing> {
        let gym = self.gyms.iter().find(|g| g.id == offering.gym_id)?;
        Some(OfferingListing {
            offering: offering.clone(),
            gym_name: gym.name.clone(),
            gym_is_active: gym.is_active,
        })
    }

    fn detail(&self, appointment: &Appointment) -> Option<AppointmentDetail> {
        let username = |id: i64| {
            self.users
                .iter()
                .find(|u| u.id == id)
                .map(|u| u.username.clone())
        };
        Some(AppointmentDetail {
            appointment: appointment.clone(),
            member_name: username(appointment.member_id)?,
            trainer_name: username(appointment.trainer_id)?,
            service_name: self
                .offerings
                .iter()
                .find(|s| s.id == appointment.service_id)
                .map(|s| s.name.clone())?,
            gym_name: self.gym_name(appointment.gym_id)?,
        })
    }
}

/// One shared store behind every repository trait, so joins see each other's rows.
#[derive(Clone, Default)]
pub struct MemoryDb {
    pub store: Arc<Mutex<Store>>,
    pub down: Arc<AtomicBool>,
}

impl MemoryDb {
    pub fn repositories(&self) -> Repositories {
        Repositories {
            users: Arc::new(self.clone()),
            gyms: Arc::new(self.clone()),
            offerings: Arc::new(self.clone()),
            appointments: Arc::new(self.clone()),
            posts: Arc::new(self.clone()),
        }
    }
}

#[async_trait]
impl UserRepository for MemoryDb {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.store.lock().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .store
            .lock()
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .store
            .lock()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        Ok(self
            .store
            .lock()
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(email)))
    }

    async fn create(&self, user: &User) -> Result<User, AppError> {
        let mut store = self.store.lock();
        if let Some(gym_id) = user.gym_id {
            if store.gym_name(gym_id).is_none() {
                return Err(AppError::NotFound("Gym not found".into()));
            }
        }
        if store
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(AppError::Conflict("Email is already registered".into()));
        }
        let mut created = user.clone();
        created.id = store.next_id();
        store.users.push(created.clone());
        Ok(created)
    }

    async fn list_with_gym(&self) -> Result<Vec<UserListing>, AppError> {
        let store = self.store.lock();
        Ok(store
            .users
            .iter()
            .map(|u| UserListing {
                user: u.clone(),
                gym_name: u.gym_id.and_then(|id| store.gym_name(id)),
            })
            .collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(AppError::Internal("database unreachable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl GymRepository for MemoryDb {
    async fn list(&self, include_inactive: bool) -> Result<Vec<Gym>, AppError> {
        Ok(self
            .store
            .lock()
            .gyms
            .iter()
            .filter(|g| g.is_visible_to(include_inactive))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Gym>, AppError> {
        Ok(self.store.lock().gyms.iter().find(|g| g.id == id).cloned())
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.store.lock().gyms.iter().any(|g| g.id == id))
    }

    async fn create(&self, gym: &Gym) -> Result<Gym, AppError> {
        let mut store = self.store.lock();
        let mut created = gym.clone();
        created.id = store.next_id();
        store.gyms.push(created.clone());
        Ok(created)
    }

    async fn update(&self, gym: &Gym) -> Result<Gym, AppError> {
        let mut store = self.store.lock();
        let slot = store
            .gyms
            .iter_mut()
            .find(|g| g.id == gym.id)
            .ok_or_else(|| AppError::NotFound(format!("Gym with id {} not found", gym.id)))?;
        *slot = gym.clone();
        Ok(gym.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut store = self.store.lock();
        let before = store.gyms.len();
        store.gyms.retain(|g| g.id != id);
        if store.gyms.len() == before {
            return Err(AppError::NotFound(format!("Gym with id {} not found", id)));
        }
        store.offerings.retain(|s| s.gym_id != id);
        Ok(())
    }
}

#[async_trait]
impl ServiceOfferingRepository for MemoryDb {
    async fn find_by_id(&self, id: i64) -> Result<Option<ServiceOffering>, AppError> {
        Ok(self
            .store
            .lock()
            .offerings
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn find_listing(&self, id: i64) -> Result<Option<OfferingListing>, AppError> {
        let store = self.store.lock();
        Ok(store
            .offerings
            .iter()
            .find(|s| s.id == id)
            .and_then(|s| store.listing(s)))
    }

    async fn list(&self, scope: OfferingScope) -> Result<Vec<OfferingListing>, AppError> {
        let store = self.store.lock();
        Ok(store
            .offerings
            .iter()
            .filter_map(|s| store.listing(s))
            .filter(|l| match scope {
                OfferingScope::All => true,
                OfferingScope::Visible => l.is_visible_to(false),
                OfferingScope::ActiveInGym(gym_id) => {
                    l.offering.gym_id == gym_id && l.offering.is_active
                }
            })
            .collect())
    }

    async fn create(&self, offering: &ServiceOffering) -> Result<ServiceOffering, AppError> {
        let mut store = self.store.lock();
        let mut created = offering.clone();
        created.id = store.next_id();
        store.offerings.push(created.clone());
        Ok(created)
    }

    async fn update(&self, offering: &ServiceOffering) -> Result<ServiceOffering, AppError> {
        let mut store = self.store.lock();
        let slot = store
            .offerings
            .iter_mut()
            .find(|s| s.id == offering.id)
            .ok_or_else(|| {
                AppError::NotFound(format!("Service with id {} not found", offering.id))
            })?;
        *slot = offering.clone();
        Ok(offering.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut store = self.store.lock();
        let before = store.offerings.len();
        store.offerings.retain(|s| s.id != id);
        if store.offerings.len() == before {
            return Err(AppError::NotFound(format!("Service with id {} not found", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl AppointmentRepository for MemoryDb {
    async fn find_by_id(&self, id: i64) -> Result<Option<Appointment>, AppError> {
        Ok(self
            .store
            .lock()
            .appointments
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn find_detail(&self, id: i64) -> Result<Option<AppointmentDetail>, AppError> {
        let store = self.store.lock();
        Ok(store
            .appointments
            .iter()
            .find(|a| a.id == id)
            .and_then(|a| store.detail(a)))
    }

    async fn list_details(
        &self,
        scope: AppointmentScope,
    ) -> Result<Vec<AppointmentDetail>, AppError> {
        let store = self.store.lock();
        Ok(store
            .appointments
            .iter()
            .filter(|a| scope.includes(a))
            .filter_map(|a| store.detail(a))
            .collect())
    }

    async fn trainer_slot_taken(
        &self,
        trainer_id: i64,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<bool, AppError> {
        Ok(self
            .store
            .lock()
            .appointments
            .iter()
            .any(|a| a.trainer_id == trainer_id && a.date == date && a.time == time))
    }

    async fn member_slot_taken(
        &self,
        member_id: i64,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<bool, AppError> {
        Ok(self
            .store
            .lock()
            .appointments
            .iter()
            .any(|a| a.member_id == member_id && a.date == date && a.time == time))
    }

    async fn create(&self, appointment: &Appointment) -> Result<Appointment, AppError> {
        let mut store = self.store.lock();
        let user_exists = |id: i64| store.users.iter().any(|u| u.id == id);
        let references_resolve = user_exists(appointment.member_id)
            && user_exists(appointment.trainer_id)
            && store.offerings.iter().any(|o| o.id == appointment.service_id)
            && store.gyms.iter().any(|g| g.id == appointment.gym_id);
        if !references_resolve {
            return Err(AppError::NotFound(
                "Referenced member, trainer, service or gym not found".into(),
            ));
        }
        let mut created = appointment.clone();
        created.id = store.next_id();
        store.appointments.push(created.clone());
        Ok(created)
    }

    async fn update_status(&self, appointment: &Appointment) -> Result<Appointment, AppError> {
        let mut store = self.store.lock();
        let slot = store
            .appointments
            .iter_mut()
            .find(|a| a.id == appointment.id)
            .ok_or_else(|| {
                AppError::NotFound(format!("Appointment with id {} not found", appointment.id))
            })?;
        *slot = appointment.clone();
        Ok(appointment.clone())
    }
}

#[async_trait]
impl PostRepository for MemoryDb {
    async fn list(&self, include_private: bool) -> Result<Vec<Post>, AppError> {
        Ok(self
            .store
            .lock()
            .posts
            .iter()
            .filter(|p| include_private || p.is_public())
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError> {
        Ok(self.store.lock().posts.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, post: &Post) -> Result<Post, AppError> {
        let mut store = self.store.lock();
        let mut created = post.clone();
        created.id = store.next_id();
        store.posts.push(created.clone());
        Ok(created)
    }

    async fn update(&self, post: &Post) -> Result<Post, AppError> {
        let mut store = self.store.lock();
        let slot = store
            .posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or_else(|| AppError::NotFound(format!("Post with id {} not found", post.id)))?;
        *slot = post.clone();
        Ok(post.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut store = self.store.lock();
        let before = store.posts.len();
        store.posts.retain(|p| p.id != id);
        if store.posts.len() == before {
            return Err(AppError::NotFound(format!("Post with id {} not found", id)));
        }
        Ok(())
    }
}

// ============================================================================
// In-memory cache
// ============================================================================

/// Cache that records every read (with hit/miss) and every write.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
    pub reads: Mutex<Vec<(String, bool)>>,
    pub writes: Mutex<Vec<(String, Option<u64>)>>,
    pub down: AtomicBool,
}

impl MemoryCache {
    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    pub fn insert(&self, key: &str, value: &str) {
        self.entries.lock().insert(key.to_string(), value.to_string());
    }

    pub fn hits(&self, key: &str) -> usize {
        self.reads
            .lock()
            .iter()
            .filter(|(k, hit)| k == key && *hit)
            .count()
    }

    pub fn misses(&self, key: &str) -> usize {
        self.reads
            .lock()
            .iter()
            .filter(|(k, hit)| k == key && !*hit)
            .count()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let value = self.entries.lock().get(key).cloned();
        self.reads.lock().push((key.to_string(), value.is_some()));
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> Result<(), AppError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        self.writes.lock().push((key.to_string(), ttl_seconds));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, AppError> {
        Ok(self.entries.lock().remove(key).is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(AppError::Internal("cache unreachable".into()));
        }
        Ok(())
    }
}

// ============================================================================
// Text generation stub
// ============================================================================

/// Canned reply for the recommendation endpoint; `None` simulates a transport failure.
pub struct StubGenerator {
    reply: Option<Generation>,
    pub prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn replying(reply: Generation) -> Self {
        Self {
            reply: Some(reply),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, prompt: &str) -> Result<Generation, AppError> {
        self.prompts.lock().push(prompt.to_string());
        self.reply
            .clone()
            .ok_or_else(|| AppError::Upstream("connection refused".into()))
    }
}

// ============================================================================
// Test application
// ============================================================================

pub fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database: DatabaseSettings {
            url: "postgres://localhost/gym_test".into(),
            max_connections: 1,
            min_connections: 1,
            acquire_timeout: 1,
            run_migrations: false,
        },
        redis: RedisSettings {
            url: "redis://localhost".into(),
            key_prefix: "gym:".into(),
        },
        jwt: JwtSettings {
            secret: "test-secret-that-is-at-least-32-characters".into(),
            token_expiry_minutes: 60,
        },
        cache: CacheSettings {
            post_ttl_seconds: 300,
        },
        gemini: GeminiSettings {
            api_key: String::new(),
            base_url: "http://localhost".into(),
            model: "gemini-2.0-flash".into(),
            timeout_secs: 1,
        },
        cors: CorsSettings {
            allowed_origins: vec![],
        },
        bootstrap: BootstrapSettings::default(),
        environment: "test".into(),
    }
}

/// Test application wired to in-memory backends
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub db: MemoryDb,
    pub cache: Arc<MemoryCache>,
    pub generator: Arc<StubGenerator>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_generator(StubGenerator::replying(Generation::Text(
            "Train three times a week.".into(),
        )))
    }

    pub fn with_generator(generator: StubGenerator) -> Self {
        let db = MemoryDb::default();
        let cache = Arc::new(MemoryCache::default());
        let generator = Arc::new(generator);

        let state = AppState {
            repos: db.repositories(),
            cache: cache.clone(),
            text_generator: generator.clone(),
            settings: Arc::new(test_settings()),
        };

        Self {
            router: routes::create_router(state.clone()),
            state,
            db,
            cache,
            generator,
        }
    }

    // ------------------------------------------------------------------
    // Fixtures
    // ------------------------------------------------------------------

    pub fn seed_user(&self, username: &str, role: Role) -> User {
        self.insert_user(username, role, "not-a-real-hash".into())
    }

    /// Seed a user whose password is [`TEST_PASSWORD`].
    pub fn seed_user_with_password(&self, username: &str, role: Role) -> User {
        let hash = hash_password(TEST_PASSWORD).unwrap();
        self.insert_user(username, role, hash)
    }

    fn insert_user(&self, username: &str, role: Role, password_hash: String) -> User {
        let mut store = self.db.store.lock();
        let user = User {
            id: store.next_id(),
            username: username.into(),
            email: format!("{}@example.com", username),
            password_hash,
            role,
            ..User::default()
        };
        store.users.push(user.clone());
        user
    }

    pub fn seed_gym(&self, name: &str, is_active: bool) -> Gym {
        let mut store = self.db.store.lock();
        let gym = Gym {
            id: store.next_id(),
            name: name.into(),
            is_active,
            ..Gym::default()
        };
        store.gyms.push(gym.clone());
        gym
    }

    pub fn seed_service(&self, gym_id: i64, name: &str, price: Decimal) -> ServiceOffering {
        let mut store = self.db.store.lock();
        let offering = ServiceOffering {
            id: store.next_id(),
            name: name.into(),
            price,
            gym_id,
            ..ServiceOffering::default()
        };
        store.offerings.push(offering.clone());
        offering
    }

    pub fn seed_post(&self, title: &str, visibility: PostVisibility) -> Post {
        let mut store = self.db.store.lock();
        let now = Utc::now();
        let post = Post {
            id: store.next_id(),
            title: title.into(),
            content: format!("{} body", title),
            visibility,
            created_at: now,
            updated_at: now,
        };
        store.posts.push(post.clone());
        post
    }

    pub fn seed_appointment(
        &self,
        member: &User,
        trainer: &User,
        offering: &ServiceOffering,
        status: AppointmentStatus,
    ) -> Appointment {
        let mut store = self.db.store.lock();
        let appointment = Appointment {
            id: store.next_id(),
            date: tomorrow(),
            time: at(10, 0),
            member_id: member.id,
            trainer_id: trainer.id,
            service_id: offering.id,
            gym_id: offering.gym_id,
            status,
            price: offering.price,
            created_at: Utc::now(),
            canceled_by: None,
            canceled_at: None,
        };
        store.appointments.push(appointment.clone());
        appointment
    }

    pub fn appointment(&self, id: i64) -> Option<Appointment> {
        self.db
            .store
            .lock()
            .appointments
            .iter()
            .find(|a| a.id == id)
            .cloned()
    }

    /// Bearer token for an existing user
    pub fn token_for(&self, user: &User) -> String {
        self.state.auth_service().issue_token(user).unwrap()
    }

    // ------------------------------------------------------------------
    // Requests
    // ------------------------------------------------------------------

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn get_auth(&self, uri: &str, token: &str) -> Response {
        self.request(Method::GET, uri, None, Some(token)).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> Response {
        self.request(Method::POST, uri, Some(body), None).await
    }

    pub async fn post_json_auth(&self, uri: &str, body: &Value, token: &str) -> Response {
        self.request(Method::POST, uri, Some(body), Some(token)).await
    }

    pub async fn post_auth(&self, uri: &str, token: &str) -> Response {
        self.request(Method::POST, uri, None, Some(token)).await
    }

    pub async fn put_json_auth(&self, uri: &str, body: &Value, token: &str) -> Response {
        self.request(Method::PUT, uri, Some(body), Some(token)).await
    }

    pub async fn delete_auth(&self, uri: &str, token: &str) -> Response {
        self.request(Method::DELETE, uri, None, Some(token)).await
    }
}

/// Read a response body as JSON
pub async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn tomorrow() -> NaiveDate {
    Utc::now().date_naive() + Duration::days(1)
}

pub fn yesterday() -> NaiveDate {
    Utc::now().date_naive() - Duration::days(1)
}

pub fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}
