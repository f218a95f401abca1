//! Application Startup
//!
//! Application building and server initialization.

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;

use crate::application::services::{
    AppointmentServiceImpl, AuthServiceImpl, CacheProxyServiceImpl, CatalogServiceImpl,
    GymServiceImpl, PostServiceImpl, RecommendationServiceImpl, TextGenerator, UserService,
    UserServiceImpl,
};
use crate::config::Settings;
use crate::infrastructure::ai::GeminiClient;
use crate::infrastructure::cache::{self, Cache};
use crate::infrastructure::database;
use crate::infrastructure::repositories::Repositories;
use crate::presentation::http::{handlers::health, routes};
use crate::presentation::middleware::{cors, logging};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub cache: Arc<dyn Cache>,
    pub text_generator: Arc<dyn TextGenerator>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn auth_service(&self) -> AuthServiceImpl {
        AuthServiceImpl::new(self.repos.users.clone(), self.settings.jwt.clone())
    }

    pub fn user_service(&self) -> UserServiceImpl {
        UserServiceImpl::new(self.repos.users.clone(), self.repos.gyms.clone())
    }

    pub fn appointment_service(&self) -> AppointmentServiceImpl {
        AppointmentServiceImpl::new(
            self.repos.appointments.clone(),
            self.repos.offerings.clone(),
            self.repos.users.clone(),
            self.repos.gyms.clone(),
        )
    }

    pub fn gym_service(&self) -> GymServiceImpl {
        GymServiceImpl::new(self.repos.gyms.clone())
    }

    pub fn catalog_service(&self) -> CatalogServiceImpl {
        CatalogServiceImpl::new(self.repos.offerings.clone(), self.repos.gyms.clone())
    }

    pub fn post_service(&self) -> PostServiceImpl {
        PostServiceImpl::new(
            self.repos.posts.clone(),
            self.cache.clone(),
            self.settings.cache.post_ttl_seconds,
        )
    }

    pub fn cache_proxy_service(&self) -> CacheProxyServiceImpl {
        CacheProxyServiceImpl::new(self.cache.clone())
    }

    pub fn recommendation_service(&self) -> RecommendationServiceImpl {
        RecommendationServiceImpl::new(self.text_generator.clone())
    }
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        health::init_server_start();

        let pool = database::create_pool(&settings.database).await?;
        tracing::info!("Database connection pool created");

        if settings.database.run_migrations {
            database::run_migrations(&pool).await?;
            tracing::info!("Database migrations applied");
        }

        let redis = cache::create_redis_cache(&settings.redis).await?;

        let state = AppState {
            repos: Repositories::postgres(pool),
            cache: Arc::new(redis),
            text_generator: Arc::new(GeminiClient::new(settings.gemini.clone())),
            settings: Arc::new(settings.clone()),
        };

        state
            .user_service()
            .ensure_admin(&settings.bootstrap)
            .await?;

        // Build router with middleware
        let router = routes::create_router(state)
            .layer(logging::create_trace_layer())
            .layer(cors::create_cors_layer(&settings.cors));

        let addr = settings.server_addr();
        let listener = TcpListener::bind(&addr).await?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until Ctrl+C
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
