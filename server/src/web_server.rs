use std::net::SocketAddr;
use std::path::Path;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use common::games::tictactoe::GameSnapshot;
use common::log;

use crate::game_service::GameService;

#[derive(Clone)]
pub struct WebServerState {
    pub game_service: GameService,
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum MoveResponse {
    Success(GameSnapshot),
    Error { message: String },
}

pub fn build_router(state: WebServerState, static_files_path: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/reset", post(reset_handler))
        .route("/move", post(move_handler))
        .route("/state", get(state_handler))
        .fallback_service(ServeDir::new(static_files_path))
        .layer(cors)
        .with_state(state)
}

pub async fn run_web_server(
    game_service: GameService,
    addr: SocketAddr,
    static_files_path: &Path,
) -> std::io::Result<()> {
    let app = build_router(WebServerState { game_service }, static_files_path);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log!(
        "Tic-tac-toe server listening on {}, serving {}",
        addr,
        static_files_path.display()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    log!("Shutdown signal received");
}

async fn reset_handler(State(state): State<WebServerState>) -> Json<StatusResponse> {
    state.game_service.reset().await;
    Json(StatusResponse { status: "success" })
}

async fn move_handler(
    State(state): State<WebServerState>,
    Json(request): Json<MoveRequest>,
) -> Json<MoveResponse> {
    match state.game_service.play_move(request.row, request.col).await {
        Ok(snapshot) => Json(MoveResponse::Success(snapshot)),
        Err(e) => Json(MoveResponse::Error {
            message: format!("Invalid move: {}", e),
        }),
    }
}

async fn state_handler(State(state): State<WebServerState>) -> Json<GameSnapshot> {
    Json(state.game_service.state().await)
}
