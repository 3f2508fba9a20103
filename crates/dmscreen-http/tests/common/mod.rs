//! A fake remote campaign service served over real HTTP on an ephemeral port.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use dmscreen_http::{HttpCampaignService, ServiceConfig};
use serde_json::{Value, json};

/// Requests the fake server has seen, for assertions.
#[derive(Debug, Default, Clone)]
pub struct Seen {
    pub bodies: Vec<(String, Value)>,
    pub queries: Vec<(String, HashMap<String, String>)>,
}

type Shared = Arc<Mutex<Seen>>;

fn character(id: i64, name: &str, class: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "race": "Dwarf",
        "char_class": class,
        "level": 2,
        "strength": 16,
        "dexterity": 9,
        "constitution": 14,
        "intelligence": 10,
        "wisdom": 12,
        "charisma": 8,
        "max_hp": 18,
        "current_hp": 15,
        "armor_class": 16,
        "personality_traits": ["Stubborn", "Loyal"],
        "background": "Soldier",
        "inventory": ["Warhammer", "Rope"]
    })
}

fn campaign(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "A tale of heroes",
        "party_size": 2,
        "created_at": "2026-01-15T10:00:00.123456",
        "is_active": true
    })
}

async fn create_campaign(State(seen): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    let name = body["name"].as_str().unwrap_or_default().to_owned();
    seen.lock().unwrap().bodies.push(("create".into(), body));
    Json(campaign(7, &name))
}

async fn get_campaign(Path(id): Path<i64>) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if id == 7 {
        Ok(Json(campaign(7, "The Lost Mines")))
    } else {
        Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Campaign not found" })),
        ))
    }
}

async fn get_characters(Path(_id): Path<i64>) -> Json<Value> {
    Json(json!([
        character(1, "Thorin", "Fighter"),
        character(2, "Lyra", "Wizard")
    ]))
}

async fn get_messages(
    State(seen): State<Shared>,
    Path(_id): Path<i64>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    seen.lock().unwrap().queries.push(("messages".into(), query));
    Json(json!([
        {
            "id": 1, "role": "dm", "content": "You enter the mine.",
            "character_id": null, "message_type": "narrative",
            "timestamp": "2026-01-15T10:00:00"
        },
        {
            "id": 2, "role": "player", "content": "I light a torch.",
            "character_id": 1, "message_type": "narrative",
            "timestamp": "2026-01-15T10:00:05.250000"
        }
    ]))
}

async fn dm_input(
    State(seen): State<Shared>,
    Path(_id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let message = body["message"].clone();
    seen.lock().unwrap().bodies.push(("dm-input".into(), body));
    Json(json!({
        "dm_message": message,
        "party_responses": [
            { "character_id": 2, "character_name": "Lyra", "response": "I ready a spell." },
            { "character_id": 1, "character_name": "Thorin", "response": "Axes up!" }
        ]
    }))
}

async fn scenarios(
    State(seen): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let mut seen = seen.lock().unwrap();
    seen.queries.push(("scenarios".into(), query));
    seen.bodies.push(("scenarios".into(), body));
    Json(json!({ "suggestions": ["1. A rival party arrives", "2. The tunnel floods"] }))
}

async fn roll_dice(
    State(seen): State<Shared>,
    Path(_id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let dice_type = body["dice_type"].clone();
    seen.lock().unwrap().bodies.push(("roll".into(), body));
    Json(json!({
        "dice_type": dice_type,
        "count": 3,
        "rolls": [4, 6, 1],
        "total": 11,
        "modifier": 2,
        "final_total": 13
    }))
}

/// Serves the fake API and returns a client pointed at it.
pub async fn start() -> (HttpCampaignService, Shared) {
    let seen: Shared = Arc::default();
    let app = Router::new()
        .route("/campaigns", post(create_campaign))
        .route("/campaigns/{id}", get(get_campaign))
        .route("/campaigns/{id}/characters", get(get_characters))
        .route("/campaigns/{id}/messages", get(get_messages))
        .route("/campaigns/{id}/dm-input", post(dm_input))
        .route("/dm-assistant/scenarios", post(scenarios))
        .route("/campaigns/{id}/roll-dice", post(roll_dice))
        .with_state(Arc::clone(&seen));
    (serve(app).await, seen)
}

/// Serves an arbitrary router and returns a client pointed at it.
pub async fn serve(app: Router) -> HttpCampaignService {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    client_for(&format!("http://{addr}"))
}

fn client_for(base_url: &str) -> HttpCampaignService {
    let config = ServiceConfig {
        base_url: base_url.parse().unwrap(),
        timeout: Duration::from_secs(5),
        history_limit: 25,
    };
    HttpCampaignService::new(&config).unwrap()
}

/// A client pointed at a port nothing listens on.
pub async fn unreachable() -> HttpCampaignService {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    client_for(&format!("http://{addr}"))
}
