use ui_common::{HomeLocation, HomeUpdate};

use crate::{ApiError, Endpoint, FallertrackClient};

pub async fn get_home(client: &FallertrackClient) -> Result<HomeLocation, ApiError> {
    log::debug!("Getting home location");
    client.fetch(Endpoint::Home).await
}

/// Replaces the home geofence with a single upsert
pub async fn save_home(client: &FallertrackClient, update: &HomeUpdate) -> Result<(), ApiError> {
    log::info!(
        "Saving home location ({}, {}) radius {}m",
        update.latitude,
        update.longitude,
        update.radius
    );
    client.post_ack(Endpoint::Home, update).await
}

pub async fn delete_home(client: &FallertrackClient) -> Result<(), ApiError> {
    log::info!("Deleting home location");
    client.delete(Endpoint::Home).await
}
