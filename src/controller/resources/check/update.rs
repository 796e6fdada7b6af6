use super::{CheckError, CheckReconciler};
use tracing::{debug, error, info};

impl CheckReconciler<'_> {
    /// Push the spec to the existing Pingdom check
    ///
    /// A check that vanished on the Pingdom side is reported as an error,
    /// it is not created again. Neither is a check whose type changed.
    pub(super) async fn update(&mut self) -> Result<(), CheckError> {
        let id = self.check.check_id();
        let params = self.check.spec.put_params().inspect_err(|e| {
            error!(check = %self.name(), id, error = %e, "refusing to apply invalid check");
        })?;

        // Pingdom cannot change the type of a check; a PUT would never converge
        if self.refreshed {
            let observed = self.check.status.as_ref().map(|s| &s.params.r#type);
            let desired = &self.check.spec.params.r#type;
            if let Some(observed) = observed.filter(|observed| *observed != desired) {
                let error = CheckError::TypeChange {
                    observed: observed.to_string(),
                    desired: desired.to_string(),
                };
                error!(check = %self.name(), id, error = %error, "refusing to update check");
                return Err(error);
            }
        }

        info!(check = %self.name(), id, "updating check resource on Pingdom");
        let response = self.api.update_check(id, &params).await.map_err(|e| {
            error!(check = %self.name(), id, error = %e, "unable to update check resource on Pingdom");
            CheckError::Update(e)
        })?;
        debug!(check = %self.name(), id, response = ?response, "Pingdom update response");

        self.did_work = true;
        info!(check = %self.name(), id, message = %response.message, "updated check resource on Pingdom");
        Ok(())
    }
}
