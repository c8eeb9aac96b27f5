use crate::client::PaystackClient;
use crate::error::PaystackError;
use crate::model::dedicated_account::{DedicatedAccount, DedicatedAccountRequest};

impl PaystackClient {
    /// Create a dedicated virtual account for an existing customer.
    ///
    /// POST /dedicated_account
    pub async fn create_dedicated_account(
        &self,
        req: &DedicatedAccountRequest,
    ) -> Result<DedicatedAccount, PaystackError> {
        self.post("/dedicated_account", req).await
    }
}
