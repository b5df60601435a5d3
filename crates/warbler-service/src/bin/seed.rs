use dotenv::dotenv;
use warbler_service::{init_tracing, settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let settings = settings::load_settings()?;
    init_tracing(&settings);

    let db = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&settings.database_url)
        .await?;
    sqlx::migrate!().run(&db).await?;

    seed::seed_data(db).await?;

    Ok(())
}

mod seed {
    use fake::faker::internet::en::{FreeEmail, Username};
    use fake::faker::lorem::en::Sentence;
    use fake::Fake;
    use sqlx::PgPool;
    use std::sync::Arc;
    use warbler_service::models::users::NewUser;
    use warbler_service::setup_services;
    use warbler_service::utils::errors::ModelError;

    const USER_COUNT: usize = 10;

    pub async fn seed_data(db: PgPool) -> anyhow::Result<()> {
        let user_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&db)
            .await?;
        if user_count > 0 {
            tracing::info!("data already exists, skipping seed");
            return Ok(());
        }

        let service = setup_services(Arc::new(db));

        let mut user_ids = Vec::with_capacity(USER_COUNT);
        for i in 0..USER_COUNT {
            let username: String = Username().fake();
            let user = service
                .signup(NewUser {
                    // suffix keeps generated names unique across the batch
                    username: format!("{username}_{i}"),
                    email: format!("{i}_{}", FreeEmail().fake::<String>()),
                    password: "password".to_string(),
                    image_url: None,
                })
                .await?;
            user_ids.push(user.id);
        }

        for (i, &follower) in user_ids.iter().enumerate() {
            for offset in [1, 3] {
                let followed = user_ids[(i + offset) % user_ids.len()];
                if followed == follower {
                    continue;
                }
                match service.follow(follower, followed).await {
                    Ok(()) | Err(ModelError::AlreadyFollowing) => {}
                    Err(err) => return Err(err.into()),
                }
            }
        }

        for &user_id in &user_ids {
            for _ in 0..2 {
                let text: String = Sentence(3..8).fake();
                service.post_message(user_id, &text).await?;
            }
        }

        tracing::info!(users = user_ids.len(), "seed data inserted successfully");
        Ok(())
    }
}
