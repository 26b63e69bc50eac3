// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Session-gated dashboard endpoints mounted under `/api/me`
//!
//! Every lookup is keyed by the identity of the verified session; no user id
//! is ever read from the request.

use std::sync::Arc;

use log::info;
use rocket::serde::json::Json;
use rocket::{get, post, routes, Route, State};
use serde::Serialize;

use super::responses::{ApiError, ApiResponse};
use crate::auth::{AuthError, Session};
use crate::backend::{Balance, BackendClient, BackendError, BattlepassData, ClaimRequest, Season};
use crate::collection::{paginate, CardFilter, CardView, Page, ITEMS_PER_PAGE};
use crate::progression::{BattlepassView, ProgressionState, TierTable};

pub fn routes() -> Vec<Route> {
    routes![balance, cards, battlepass, claim, claim_all]
}

/// Battlepass payload: the season plus the computed view
#[derive(Debug, Serialize)]
pub struct BattlepassResponse {
    pub season: Season,
    #[serde(flatten)]
    pub view: BattlepassView,
}

#[derive(Debug, Serialize)]
pub struct ClaimAllResult {
    pub claimed_count: u32,
    #[serde(flatten)]
    pub battlepass: BattlepassResponse,
}

/// Fetch the battlepass and parse its tier table
async fn load_battlepass(
    backend: &BackendClient,
    user_id: &str,
) -> Result<(BattlepassData, TierTable), ApiError> {
    let data = backend.battlepass(user_id).await?;
    let table = TierTable::from_rewards_config(&data.rewards_config).map_err(BackendError::from)?;
    Ok((data, table))
}

fn render(season: Season, state: &ProgressionState, table: &TierTable) -> BattlepassResponse {
    BattlepassResponse {
        season,
        view: BattlepassView::build(state, table),
    }
}

#[get("/balance")]
pub async fn balance(
    session: Result<Session, AuthError>,
    backend: &State<Arc<BackendClient>>,
) -> Result<Json<ApiResponse<Balance>>, ApiError> {
    let session = session?;
    let balance = backend.balance(&session.identity.id).await?;
    Ok(ApiResponse::ok(balance))
}

#[get("/cards?<search>&<rarity>&<page>&<per_page>")]
pub async fn cards(
    session: Result<Session, AuthError>,
    backend: &State<Arc<BackendClient>>,
    search: Option<&str>,
    rarity: Option<&str>,
    page: Option<usize>,
    per_page: Option<usize>,
) -> Result<Json<ApiResponse<Page<CardView>>>, ApiError> {
    let session = session?;
    let collection = backend.card_collection(&session.identity.id).await?;

    let filter = CardFilter::new(search, rarity);
    let views: Vec<CardView> = filter
        .apply(&collection)
        .into_iter()
        .map(CardView::from)
        .collect();

    Ok(ApiResponse::ok(paginate(
        views,
        page.unwrap_or(1),
        per_page.unwrap_or(ITEMS_PER_PAGE),
    )))
}

#[get("/battlepass")]
pub async fn battlepass(
    session: Result<Session, AuthError>,
    backend: &State<Arc<BackendClient>>,
) -> Result<Json<ApiResponse<BattlepassResponse>>, ApiError> {
    let session = session?;
    let (data, table) = load_battlepass(backend, &session.identity.id).await?;
    Ok(ApiResponse::ok(render(data.season, &data.progress, &table)))
}

#[post("/battlepass/claim", data = "<request>")]
pub async fn claim(
    session: Result<Session, AuthError>,
    backend: &State<Arc<BackendClient>>,
    request: Json<ClaimRequest>,
) -> Result<Json<ApiResponse<BattlepassResponse>>, ApiError> {
    let session = session?;
    let ClaimRequest { level, reward_type } = request.into_inner();
    let user_id = &session.identity.id;

    let (data, table) = load_battlepass(backend, user_id).await?;
    let claimable = table
        .get(level)
        .is_some_and(|tier| data.progress.eligibility(tier).allows(reward_type));
    if !claimable {
        return Err(ApiError::NotClaimable {
            level,
            track: reward_type,
        });
    }

    backend.claim(user_id, level, reward_type).await?;
    info!("User {} claimed the {} reward of level {}", user_id, reward_type, level);

    let state = data.progress.with_claim(level, reward_type);
    Ok(ApiResponse::ok_with_message(
        render(data.season, &state, &table),
        format!("Claimed {} reward for level {}", reward_type, level),
    ))
}

#[post("/battlepass/claim-all")]
pub async fn claim_all(
    session: Result<Session, AuthError>,
    backend: &State<Arc<BackendClient>>,
) -> Result<Json<ApiResponse<ClaimAllResult>>, ApiError> {
    let session = session?;
    let user_id = &session.identity.id;

    let claimed_count = backend.claim_all(user_id).await?;
    info!("User {} claimed {} rewards at once", user_id, claimed_count);

    let (data, table) = load_battlepass(backend, user_id).await?;
    let message = if claimed_count == 0 {
        "Nothing to claim right now".to_string()
    } else {
        format!("Claimed {} rewards", claimed_count)
    };
    Ok(ApiResponse::ok_with_message(
        ClaimAllResult {
            claimed_count,
            battlepass: render(data.season, &data.progress, &table),
        },
        message,
    ))
}
