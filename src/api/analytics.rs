//! Analytics view data: four reports fetched as one

use super::error::ApiError;
use super::traits::OnboardingApi;
use crate::state::AnalyticsReport;

/// Fetch the summary, both breakdowns and the step metrics concurrently.
///
/// The report is all or nothing: if any call fails the tick fails, so the
/// view never mixes two different refreshes.
pub async fn fetch_report(api: &dyn OnboardingApi, days: u32) -> Result<AnalyticsReport, ApiError> {
    let (summary, statuses, types, steps) = tokio::try_join!(
        api.get_analytics_summary(days),
        api.get_status_breakdown(days),
        api.get_type_breakdown(days),
        api.get_step_analytics(days),
    )?;

    Ok(AnalyticsReport {
        summary,
        statuses,
        types,
        steps,
    })
}
