use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{LoginId, PersonName, PhoneNumber};
use crate::domain::user::UpdateUser;
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Form data of the member edit modal.
pub struct EditUserForm {
    #[validate(length(min = 1, max = 50))]
    pub login_id: String,
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    /// Left blank to keep the current password.
    #[serde(default)]
    pub password: Option<String>,
    #[validate(range(min = 0))]
    pub points: i64,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl TryFrom<EditUserForm> for UpdateUser {
    type Error = FormError;

    fn try_from(form: EditUserForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let phone_number = form
            .phone_number
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(PhoneNumber::new)
            .transpose()
            .map_err(|_| FormError::InvalidPhoneNumber)?;

        Ok(UpdateUser {
            login_id: LoginId::new(form.login_id).map_err(|_| FormError::InvalidName)?,
            name: PersonName::new(form.name).map_err(|_| FormError::InvalidName)?,
            password: form.password.filter(|p| !p.trim().is_empty()),
            points: form.points,
            phone_number,
            address: form
                .address
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> EditUserForm {
        EditUserForm {
            login_id: " kim01 ".into(),
            name: "Kim".into(),
            password: Some(" ".into()),
            points: 100,
            phone_number: Some("010-1234-5678".into()),
            address: Some(String::new()),
        }
    }

    #[test]
    fn form_normalizes_member_fields() {
        let payload = UpdateUser::try_from(form()).unwrap();
        assert_eq!(payload.login_id.as_str(), "kim01");
        assert_eq!(payload.password, None);
        assert_eq!(payload.phone_number.unwrap().as_str(), "+821012345678");
        assert_eq!(payload.address, None);
    }

    #[test]
    fn negative_points_are_rejected() {
        let mut form = form();
        form.points = -1;
        assert!(matches!(
            UpdateUser::try_from(form),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn bad_phone_is_rejected() {
        let mut form = form();
        form.phone_number = Some("call me".into());
        assert!(matches!(
            UpdateUser::try_from(form),
            Err(FormError::InvalidPhoneNumber)
        ));
    }
}
