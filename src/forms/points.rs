use serde::Deserialize;
use validator::Validate;

use crate::domain::point::GrantPoints;
use crate::domain::types::LoginId;
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Grant points to the selected members.
pub struct GrantPointsForm {
    #[validate(length(min = 1))]
    pub login_ids: Vec<String>,
    #[validate(range(min = 1))]
    pub amount: i64,
    #[validate(length(min = 1, max = 200))]
    pub description: String,
}

pub struct GrantPointsPayload {
    pub grants: Vec<GrantPoints>,
}

impl TryFrom<GrantPointsForm> for GrantPointsPayload {
    type Error = FormError;

    fn try_from(form: GrantPointsForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let description = form.description.trim().to_string();
        if description.is_empty() {
            return Err(FormError::EmptyContent);
        }

        let mut login_ids = form
            .login_ids
            .into_iter()
            .map(|id| LoginId::new(id).map_err(|_| FormError::InvalidName))
            .collect::<Result<Vec<_>, _>>()?;
        login_ids.dedup();

        let grants = login_ids
            .into_iter()
            .map(|login_id| GrantPoints {
                login_id,
                amount: form.amount,
                description: description.clone(),
            })
            .collect();
        Ok(Self { grants })
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Reason recorded when cancelling a ledger entry.
pub struct CancelPointsForm {
    #[validate(length(min = 1, max = 200))]
    pub description: String,
}
