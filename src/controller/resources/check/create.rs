use super::{CheckError, CheckReconciler};
use tracing::{debug, error, info};

impl CheckReconciler<'_> {
    /// Create the check on Pingdom and record its identifier
    pub(super) async fn create(&mut self) -> Result<(), CheckError> {
        let params = self.check.spec.post_params().inspect_err(|e| {
            error!(check = %self.name(), error = %e, "refusing to create invalid check");
        })?;

        info!(check = %self.name(), "creating check resource on Pingdom");
        let response = self.api.create_check(&params).await.map_err(|e| {
            error!(check = %self.name(), error = %e, "unable to create check resource on Pingdom");
            CheckError::Create(e)
        })?;
        debug!(check = %self.name(), response = ?response, "Pingdom create response");

        self.check.status.get_or_insert_with(Default::default).id = response.check.id;
        self.did_work = true;
        info!(check = %self.name(), id = response.check.id, "created check resource on Pingdom");
        Ok(())
    }
}
