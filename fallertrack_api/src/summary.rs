use ui_common::{summary::SummaryResponse, SummaryRequest};

use crate::{ApiError, Endpoint, FallertrackClient};

/// Returns the raw summary text, still wrapped in its code fence
pub async fn summarize(
    client: &FallertrackClient,
    request: &SummaryRequest,
) -> Result<String, ApiError> {
    log::debug!(
        "Requesting activity summary {} - {}",
        request.start_date,
        request.end_date
    );
    let res: SummaryResponse = client.post(Endpoint::Summarize, request).await?;
    Ok(res.text)
}
