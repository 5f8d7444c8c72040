//! HTTP request handlers

use crate::api::server::AppContext;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    module: String,
    version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VolumeRequest {
    pub volume: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VolumeResponse {
    pub volume: i32,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DestroyRequest {
    #[serde(default)]
    pub sound_id: Option<String>,
    #[serde(default)]
    pub all: bool,
    #[serde(default)]
    pub instantly: bool,
    /// Fade duration in milliseconds
    #[serde(default)]
    pub transition: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DestroyResponse {
    pub selected: usize,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AmbianceRequest {
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelInfo {
    pub id: Uuid,
    pub tags: Vec<String>,
    pub volume: i32,
    pub sounds: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelsResponse {
    pub master_volume: i32,
    pub channels: Vec<ChannelInfo>,
}

// ============================================================================
// Health Endpoint
// ============================================================================

/// GET /health - Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        module: "mediactl".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Volume Endpoints
// ============================================================================

/// GET /volume - Current master volume
pub async fn get_volume(State(ctx): State<AppContext>) -> Json<VolumeResponse> {
    Json(VolumeResponse {
        volume: ctx.manager.get_master_volume().await,
    })
}

/// POST /volume - Set master volume (direct user change)
pub async fn set_volume(
    State(ctx): State<AppContext>,
    Json(req): Json<VolumeRequest>,
) -> Json<VolumeResponse> {
    ctx.manager.set_master_volume(req.volume).await;
    Json(VolumeResponse { volume: req.volume })
}

/// POST /volume/change - Programmatic volume change, moves the control too
pub async fn change_volume(
    State(ctx): State<AppContext>,
    Json(req): Json<VolumeRequest>,
) -> Json<VolumeResponse> {
    ctx.manager.change_volume(req.volume).await;
    Json(VolumeResponse { volume: req.volume })
}

// ============================================================================
// Channel Endpoints
// ============================================================================

/// GET /channels - Registered channels
pub async fn list_channels(State(ctx): State<AppContext>) -> Json<ChannelsResponse> {
    let mixer = ctx.manager.mixer();
    let channels = mixer
        .channels()
        .iter()
        .map(|channel| ChannelInfo {
            id: channel.id(),
            tags: channel.tags(),
            volume: channel.channel_volume(),
            sounds: channel
                .sounds()
                .iter()
                .map(|sound| sound.source().to_string())
                .collect(),
        })
        .collect();

    Json(ChannelsResponse {
        master_volume: mixer.master_volume(),
        channels,
    })
}

/// POST /sounds/destroy - Fade out and remove channels
pub async fn destroy_sounds(
    State(ctx): State<AppContext>,
    Json(req): Json<DestroyRequest>,
) -> Json<DestroyResponse> {
    let selected = ctx.manager.destroy_sounds(
        req.sound_id.as_deref(),
        req.all,
        req.instantly,
        req.transition,
    );
    info!("Teardown request selected {} channel(s)", selected);
    Json(DestroyResponse { selected })
}

/// POST /ambiance - Set the ambiance source
pub async fn setup_ambiance(
    State(ctx): State<AppContext>,
    Json(req): Json<AmbianceRequest>,
) -> Json<StatusResponse> {
    ctx.manager.setup_ambiance_sound(req.source.as_deref());
    Json(StatusResponse {
        status: "ok".to_string(),
    })
}
