//! Integration tests for `HttpCampaignService` against a fake service.

mod common;

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use dmscreen_core::campaign::{CampaignDraft, CampaignId};
use dmscreen_core::character::CharacterId;
use dmscreen_core::dice::{DiceKind, DiceRollSpec};
use dmscreen_core::error::SessionError;
use dmscreen_core::message::Role;
use dmscreen_core::service::RemoteCampaignService;
use dmscreen_http::{HttpCampaignService, ServiceConfig};
use serde_json::json;

#[tokio::test]
async fn test_create_campaign_posts_draft_and_fetches_party() {
    let (service, seen) = common::start().await;

    let created = service
        .create_campaign(&CampaignDraft::new("The Lost Mines", "", 2))
        .await
        .unwrap();

    assert_eq!(created.campaign.id, CampaignId(7));
    assert_eq!(created.campaign.name, "The Lost Mines");
    assert!(created.campaign.created_at.is_some());
    let names: Vec<&str> = created.party.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Thorin", "Lyra"]);

    let seen = seen.lock().unwrap();
    let (_, body) = &seen.bodies[0];
    assert_eq!(
        body,
        &json!({
            "name": "The Lost Mines",
            "description": "A new adventure begins...",
            "party_size": 2
        })
    );
}

#[tokio::test]
async fn test_fetch_campaign_and_characters() {
    let (service, _) = common::start().await;

    let campaign = service.fetch_campaign(CampaignId(7)).await.unwrap();
    let party = service.fetch_characters(CampaignId(7)).await.unwrap();

    assert_eq!(campaign.party_size, 2);
    assert_eq!(party[1].class, "Wizard");
    assert_eq!(party[0].abilities.strength, 16);
    assert_eq!(party[0].inventory, vec!["Warhammer", "Rope"]);
}

#[tokio::test]
async fn test_missing_campaign_is_network_failure_with_detail() {
    let (service, _) = common::start().await;

    let result = service.fetch_campaign(CampaignId(99)).await;

    match result {
        Err(SessionError::NetworkFailure(msg)) => {
            assert!(msg.contains("404"), "{msg}");
            assert!(msg.contains("Campaign not found"), "{msg}");
        }
        other => panic!("expected NetworkFailure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_history_sends_limit_and_keeps_order() {
    let (service, seen) = common::start().await;

    let history = service.fetch_history(CampaignId(7)).await.unwrap();

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, Role::Dm);
    assert_eq!(history[1].role, Role::Player);
    assert_eq!(history[1].character_id, Some(CharacterId(1)));
    assert!(history[0].timestamp < history[1].timestamp);
    let seen = seen.lock().unwrap();
    assert_eq!(seen.queries[0].1.get("limit").map(String::as_str), Some("25"));
}

#[tokio::test]
async fn test_submit_narration_returns_responses_in_service_order() {
    let (service, seen) = common::start().await;

    let responses = service
        .submit_narration(CampaignId(7), "A troll blocks the path.")
        .await
        .unwrap();

    let ids: Vec<CharacterId> = responses.iter().map(|r| r.character_id).collect();
    assert_eq!(ids, vec![CharacterId(2), CharacterId(1)]);
    assert_eq!(responses[1].response, "Axes up!");
    let seen = seen.lock().unwrap();
    assert_eq!(seen.bodies[0].1, json!({ "message": "A troll blocks the path." }));
}

#[tokio::test]
async fn test_fetch_suggestions_passes_campaign_and_context() {
    let (service, seen) = common::start().await;

    let with_context = service
        .fetch_suggestions(CampaignId(7), Some("deep underground"))
        .await
        .unwrap();
    service.fetch_suggestions(CampaignId(7), None).await.unwrap();

    assert_eq!(
        with_context,
        vec!["1. A rival party arrives", "2. The tunnel floods"]
    );
    let seen = seen.lock().unwrap();
    assert_eq!(
        seen.queries[0].1.get("campaign_id").map(String::as_str),
        Some("7")
    );
    assert_eq!(seen.bodies[0].1, json!({ "context": "deep underground" }));
    assert_eq!(seen.bodies[1].1, json!({}));
}

#[tokio::test]
async fn test_roll_dice_sends_spec_and_decodes_outcome() {
    let (service, seen) = common::start().await;

    let roll = service
        .roll_dice(CampaignId(7), &DiceRollSpec::new(DiceKind::D6, 3, 2))
        .await
        .unwrap();

    assert_eq!(roll.rolls, vec![4, 6, 1]);
    assert_eq!(roll.modifier, 2);
    assert_eq!(roll.final_total, 13);
    let seen = seen.lock().unwrap();
    assert_eq!(
        seen.bodies[0].1,
        json!({ "dice_type": "d6", "count": 3, "modifier": 2 })
    );
}

#[tokio::test]
async fn test_server_error_is_network_failure() {
    let service = common::serve(Router::new().route(
        "/campaigns/{id}/dm-input",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model unavailable") }),
    ))
    .await;

    let result = service.submit_narration(CampaignId(1), "Hello").await;

    match result {
        Err(SessionError::NetworkFailure(msg)) => assert!(msg.contains("model unavailable")),
        other => panic!("expected NetworkFailure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_undecodable_body_is_malformed_result() {
    let service = common::serve(Router::new().route(
        "/campaigns/{id}/characters",
        get(|| async { axum::Json(json!({ "characters": "none" })) }),
    ))
    .await;

    let result = service.fetch_characters(CampaignId(1)).await;

    assert!(matches!(result, Err(SessionError::MalformedResult(_))));
}

#[tokio::test]
async fn test_unreachable_service_is_network_failure() {
    let service = common::unreachable().await;

    let result = service.fetch_history(CampaignId(1)).await;

    assert!(matches!(result, Err(SessionError::NetworkFailure(_))));
}

#[tokio::test]
async fn test_slow_service_times_out_as_network_failure() {
    let app = Router::new().route(
        "/dm-assistant/scenarios",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            axum::Json(json!({ "suggestions": [] }))
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let service = HttpCampaignService::new(&ServiceConfig {
        base_url: format!("http://{addr}").parse().unwrap(),
        timeout: Duration::from_millis(100),
        history_limit: 50,
    })
    .unwrap();

    let result = service.fetch_suggestions(CampaignId(1), None).await;

    assert!(matches!(result, Err(SessionError::NetworkFailure(_))));
}
