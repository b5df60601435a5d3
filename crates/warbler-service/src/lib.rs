use repositories::message_repository::MessageRepository;
use repositories::user_repository::UserRepository;
use services::user_service::UserService;
use sqlx::postgres::PgPool;
use std::sync::Arc;

pub mod models;
pub mod repositories;
pub mod services;
pub mod settings;
pub mod utils;

pub async fn setup_database(database_url: &str) -> Result<Arc<PgPool>, sqlx::Error> {
    let pool = PgPool::connect(database_url).await?;
    Ok(Arc::new(pool))
}

pub fn setup_services(db: Arc<PgPool>) -> UserService {
    let user_repository = Arc::new(UserRepository::new(db.clone()));
    let message_repository = Arc::new(MessageRepository::new(db));
    UserService::new(user_repository, message_repository)
}

pub fn init_tracing(settings: &settings::Settings) {
    let env = settings.environment.clone().unwrap_or("DEV".to_string());
    let level = match env.as_str() {
        "PROD" => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_thread_names(true)
        .with_ansi(env != "PROD")
        .init();
}
