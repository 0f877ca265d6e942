use ui_common::{location::CurrentLocation, Coordinate, FallNotification};

use crate::{ApiError, Endpoint, FallertrackClient};

pub async fn get_current_location(client: &FallertrackClient) -> Result<Coordinate, ApiError> {
    log::debug!("Getting current location");
    let location: CurrentLocation = client.fetch(Endpoint::CurrentDistance).await?;
    Ok(location.into())
}

pub async fn get_fall_notification(
    client: &FallertrackClient,
) -> Result<FallNotification, ApiError> {
    log::debug!("Getting fall notification");
    client.fetch(Endpoint::FallNotification).await
}
