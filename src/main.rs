use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use songroom::membership::generators::{JwtTokenIssuer, PetNameGenerator};
use songroom::membership::MembershipIssuer;
use songroom::room::repository::InMemoryRoomRepository;
use songroom::shared::AppState;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "songroom=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting song room server");

    // Create shared application state with dependency injection
    // Easy to switch between implementations:
    let room_repository = Arc::new(InMemoryRoomRepository::new());

    // For production with PostgreSQL:
    // let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    // let pool = sqlx::PgPool::connect(&database_url).await.expect("Failed to connect to database");
    // let room_repository = Arc::new(songroom::room::repository::PostgresRoomRepository::new(pool));

    let membership = Arc::new(MembershipIssuer::new(
        Arc::new(PetNameGenerator::new()),
        Arc::new(JwtTokenIssuer::new()),
    ));

    let app_state = AppState::new(room_repository, membership);
    let app = songroom::app(app_state);

    // run our app with hyper, listening globally on port 3000
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!("Server running on http://localhost:3000");
    axum::serve(listener, app).await.unwrap();
}
