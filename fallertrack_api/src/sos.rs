use ui_common::{
    location::{SosAlert, SosResults, SosSearch},
    SosLocation,
};

use crate::{ApiError, Endpoint, FallertrackClient};

/// Emergency services within `radius_m` meters of the tracked person
pub async fn get_sos_locations(
    client: &FallertrackClient,
    radius_m: u32,
) -> Result<Vec<SosLocation>, ApiError> {
    log::debug!("Getting SOS locations within {radius_m}m");
    let res: SosResults = client
        .post(Endpoint::SosLocation, &SosSearch { radius: radius_m })
        .await?;
    Ok(res.results)
}

pub async fn send_alert(client: &FallertrackClient, sos: bool) -> Result<(), ApiError> {
    log::info!("Setting SOS alert to {sos}");
    client.post_ack(Endpoint::Alert, &SosAlert { sos }).await
}
