use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::{info, warn};

use tmpl_api::{create_app, middleware::AuthorizationGate, AppState, ProductionBackend};
use tmpl_core::services::{
    MediaService, OtpService, OtpServiceConfig, PolicyTable, TemplateService, TokenService,
    TokenServiceConfig, UploadPolicy, UserService, UserServiceConfig,
};
use tmpl_infra::{
    create_email_service, DatabasePool, LocalMediaStorage, PgRecordRepository,
    PgTemplateRepository, PgUserRepository, RedisCache,
};

fn load_policy(path: &str) -> anyhow::Result<PolicyTable> {
    if Path::new(path).exists() {
        let table = PolicyTable::load(path)
            .with_context(|| format!("invalid policy file {}", path))?;
        info!("Loaded authorization policy from {}", path);
        Ok(table)
    } else {
        warn!("Policy file {} not found, using the built-in table", path);
        PolicyTable::embedded().context("built-in policy table is invalid")
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = tmpl_api::config::load_config();

    env_logger::init_from_env(env_logger::Env::new().default_filter_or(&config.logging.level));

    info!("Starting template API in {} mode", config.environment);
    if config.auth.jwt.is_using_default_secret() {
        warn!("SIGN_IN_KEY is not set, tokens are signed with the development secret");
    }

    // Postgres
    info!("Connecting to {}", config.database.masked_url());
    let database = DatabasePool::connect(&config.database)
        .await
        .context("failed to connect to postgres")?;
    database
        .run_migrations()
        .await
        .context("failed to run migrations")?;
    let pool = database.get_pool().clone();

    // Redis
    let cache = RedisCache::new(&config.cache).context("invalid redis configuration")?;
    if let Err(e) = cache.ping().await {
        warn!("Redis is not reachable yet: {}", e);
    }

    let email = create_email_service(&config.email).context("failed to set up email delivery")?;
    let media_storage = LocalMediaStorage::new(&config.server.media_dir)
        .await
        .context("failed to prepare media directory")?;

    let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(&config.auth.jwt)));
    let policy = Arc::new(load_policy(&config.auth.policy_path)?);

    let otp_service = Arc::new(OtpService::new(
        Arc::new(cache),
        Arc::new(email),
        OtpServiceConfig::from(&config.auth.otp),
    ));
    let user_service = Arc::new(UserService::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgRecordRepository::new(pool.clone())),
        otp_service,
        Arc::clone(&token_service),
        UserServiceConfig::from_server(&config.server),
    ));
    let template_service = Arc::new(TemplateService::new(
        Arc::new(PgTemplateRepository::new(pool)),
        Duration::from_secs(config.server.request_timeout),
    ));
    let media_service = Arc::new(MediaService::new(
        Arc::new(media_storage),
        UploadPolicy::new(config.server.max_image_size_bytes()),
        config.server.base_url.clone(),
    ));

    let app_state = web::Data::new(AppState::<ProductionBackend>::new(
        user_service,
        template_service,
        media_service,
    ));
    let gate = AuthorizationGate::new(policy, token_service);
    let environment = config.environment;

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    HttpServer::new(move || create_app(app_state.clone(), gate.clone(), environment))
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    database.close().await;
    info!("Server stopped");
    Ok(())
}
