// HTTP handler bindings for the light-cycle bot
//
// This module provides thin wrapper functions that bind Rocket HTTP routes
// to the Bot's core logic methods. Handlers are responsible for:
// - Deserializing incoming JSON requests
// - Extracting Bot instance from Rocket's managed state
// - Delegating to Bot methods off the async executor
// - Serializing responses

use log::{error, warn};
use rocket::http::Status;
use rocket::serde::json::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::bot::Bot;
use crate::decision::Decision;
use crate::types::{PlayRequest, RelativeMove};

/// Body of a successful POST /play
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PlayResponse {
    pub correlation_id: String,
    pub seed: u64,
    pub max_depth: u32,
    /// One entry per depth, shallowest first
    pub decisions: Vec<Decision>,
    pub final_move: RelativeMove,
}

type ErrorResponse = (Status, Json<Value>);

/// GET / endpoint
/// Returns bot metadata
#[rocket::get("/")]
pub fn index(bot: &rocket::State<Bot>) -> Json<Value> {
    Json(bot.info())
}

/// POST /play endpoint
/// Runs one decision call and returns every emitted decision
#[rocket::post("/play", format = "json", data = "<play_req>")]
pub async fn play(
    bot: &rocket::State<Bot>,
    play_req: Json<PlayRequest>,
) -> Result<Json<PlayResponse>, ErrorResponse> {
    let bot = bot.inner().clone();
    let request = play_req.into_inner();

    // The search is CPU-bound; keep it off the async workers
    let result = tokio::task::spawn_blocking(move || {
        let mut decisions: Vec<Decision> = Vec::new();
        bot.play(&request, &mut decisions).map(|outcome| PlayResponse {
            correlation_id: request.correlation_id,
            seed: outcome.seed,
            max_depth: outcome.max_depth,
            decisions,
            final_move: outcome.summary.final_move,
        })
    })
    .await;

    match result {
        Ok(Ok(response)) => Ok(Json(response)),
        Ok(Err(e)) => {
            warn!("Rejected play request: {}", e);
            Err((Status::BadRequest, Json(json!({ "error": e.to_string() }))))
        }
        Err(e) => {
            error!("Play task failed: {}", e);
            Err((
                Status::InternalServerError,
                Json(json!({ "error": "search task failed" })),
            ))
        }
    }
}
