//! Shared application state handed to every handler

use std::sync::Arc;

use tmpl_core::repositories::{RecordRepository, TemplateRepository, UserRepository};
use tmpl_core::services::{
    CacheServiceTrait, EmailServiceTrait, MediaService, MediaStorage, TemplateService, UserService,
};
use tmpl_infra::{
    EmailService, LocalMediaStorage, PgRecordRepository, PgTemplateRepository, PgUserRepository,
    RedisCache,
};

/// Set of adapters the services are built on
///
/// Handlers are generic over this trait so the same routes run against
/// Postgres and Redis in production and against in-memory mocks in tests.
pub trait Backend: 'static {
    type Users: UserRepository + 'static;
    type Records: RecordRepository + 'static;
    type Templates: TemplateRepository + 'static;
    type Cache: CacheServiceTrait + 'static;
    type Email: EmailServiceTrait + 'static;
    type Media: MediaStorage + 'static;
}

/// Adapters used by the server binary
pub struct ProductionBackend;

impl Backend for ProductionBackend {
    type Users = PgUserRepository;
    type Records = PgRecordRepository;
    type Templates = PgTemplateRepository;
    type Cache = RedisCache;
    type Email = EmailService;
    type Media = LocalMediaStorage;
}

pub type UserServiceOf<B> = UserService<
    <B as Backend>::Users,
    <B as Backend>::Records,
    <B as Backend>::Cache,
    <B as Backend>::Email,
>;

/// Application state that holds shared services
///
/// Built once at startup; handlers receive it through `web::Data`.
pub struct AppState<B: Backend> {
    pub user_service: Arc<UserServiceOf<B>>,
    pub template_service: Arc<TemplateService<B::Templates>>,
    pub media_service: Arc<MediaService<B::Media>>,
}

impl<B: Backend> AppState<B> {
    pub fn new(
        user_service: Arc<UserServiceOf<B>>,
        template_service: Arc<TemplateService<B::Templates>>,
        media_service: Arc<MediaService<B::Media>>,
    ) -> Self {
        Self {
            user_service,
            template_service,
            media_service,
        }
    }
}
