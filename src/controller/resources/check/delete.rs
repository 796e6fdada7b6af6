use super::{CheckError, CheckReconciler};
use tracing::{error, info};

impl CheckReconciler<'_> {
    /// Delete the Pingdom check, if one was ever created
    ///
    /// A check Pingdom no longer knows about counts as deleted.
    pub(super) async fn delete(&mut self) -> Result<(), CheckError> {
        let id = self.check.check_id();
        if id == 0 {
            info!(check = %self.name(), "Pingdom resource doesn't exist, nothing to delete");
            return Ok(());
        }

        info!(check = %self.name(), id, "deleting check resource from Pingdom");
        match self.api.delete_check(id).await {
            Ok(response) => {
                info!(check = %self.name(), id, message = %response.message, "deleted check resource from Pingdom");
                Ok(())
            }
            Err(e) if e.is_invalid_identifier() => {
                info!(check = %self.name(), id, "check resource already gone from Pingdom");
                Ok(())
            }
            Err(e) => {
                error!(check = %self.name(), id, error = %e, "unable to delete the Pingdom check resource");
                Err(CheckError::Delete(e))
            }
        }
    }
}
