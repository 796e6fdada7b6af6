use super::{CheckError, CheckReconciler};
use crate::crd::{CheckResult, CheckStatus, CheckType};
use crate::provider::CheckResponse;
use chrono::{DateTime, SecondsFormat};
use tracing::{debug, error};

impl CheckReconciler<'_> {
    /// Fetch the check from Pingdom and replace the observed status with it
    ///
    /// The status is only replaced once the whole response has been mapped;
    /// on error the previous status is left untouched.
    pub(super) async fn read(&mut self) -> Result<(), CheckError> {
        let id = self.check.check_id();

        debug!(check = %self.name(), id, "fetching check resource from Pingdom");
        let response = self.api.read_check(id).await.map_err(|e| {
            error!(check = %self.name(), id, error = %e, "unable to fetch check resource from Pingdom");
            CheckError::Read(e)
        })?;

        let previous = self.check.status.clone().unwrap_or_default();
        let status = status_from_response(&response, &previous).inspect_err(|e| {
            error!(check = %self.name(), id, error = %e, "Pingdom didn't return check details");
        })?;
        self.check.status = Some(status);
        self.refreshed = true;

        debug!(check = %self.name(), id, "populated Status object from Pingdom state");
        Ok(())
    }
}

/// Build the observed status from a Pingdom check description
///
/// `previous` supplies the identifier and anything Pingdom did not report.
/// Fails when an http or tcp check comes back without its detail block.
pub fn status_from_response(
    response: &CheckResponse,
    previous: &CheckStatus,
) -> Result<CheckStatus, CheckError> {
    let mut status = CheckStatus {
        id: previous.id,
        status: Some(CheckResult::from_provider(&response.status)),
        last_error_time: unix_to_rfc3339(response.last_error_time),
        last_test_time: unix_to_rfc3339(response.last_test_time),
        last_response_time_millis: Some(response.last_response_time),
        created: unix_to_rfc3339(response.created).or_else(|| previous.created.clone()),
        ..CheckStatus::default()
    };

    let params = &mut status.params;
    params.name = Some(response.name.clone());
    params.host = response.hostname.clone();
    params.r#type = CheckType::from(response.check_type.name.as_str());
    params.resolution_minutes = Some(response.resolution);
    params.user_ids = Some(response.user_ids.clone().unwrap_or_default());

    match &params.r#type {
        CheckType::Http => {
            let http = response
                .check_type
                .http
                .as_ref()
                .ok_or_else(|| CheckError::MissingDetails("http".to_string()))?;
            params.port = Some(http.port);
            params.url = Some(http.url.clone());
            params.encryption = Some(http.encryption);
        }
        CheckType::Tcp => {
            let tcp = response
                .check_type
                .tcp
                .as_ref()
                .ok_or_else(|| CheckError::MissingDetails("tcp".to_string()))?;
            params.port = Some(tcp.port);
        }
        _ => params.port = response.check_type.port,
    }

    Ok(status)
}

/// Pingdom reports times as unix seconds, 0 meaning "never"
fn unix_to_rfc3339(seconds: i64) -> Option<String> {
    if seconds <= 0 {
        return None;
    }
    DateTime::from_timestamp(seconds, 0).map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
}
