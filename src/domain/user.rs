use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{LoginId, PersonName, PhoneNumber, UserId};
use crate::domain::{Entity, Resource};

/// Membership state of a shop member.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum UserStatus {
    Active,
    Inactive,
    Withdrawn,
}

impl UserStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            UserStatus::Active => "Active",
            UserStatus::Inactive => "Inactive",
            UserStatus::Withdrawn => "Withdrawn",
        }
    }
}

/// Row of the members table.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    #[serde(rename = "UserID", alias = "UserId")]
    pub user_id: UserId,
    #[serde(rename = "LoginID")]
    pub login_id: String,
    pub name: String,
    pub status: UserStatus,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub join_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl Entity for User {
    type Key = UserId;

    const RESOURCE: Resource = Resource::new("users")
        .items_key("users")
        .search_path("users/search");

    const RETIRED_STATUS: Option<&'static str> = Some(UserStatus::Withdrawn.as_str());

    fn key(&self) -> UserId {
        self.user_id
    }

    fn toggled_status(&self) -> Option<&'static str> {
        match self.status {
            UserStatus::Active => Some(UserStatus::Inactive.as_str()),
            UserStatus::Inactive => Some(UserStatus::Active.as_str()),
            UserStatus::Withdrawn => None,
        }
    }
}

/// Payload of `PUT users/:id`. A missing password keeps the current one.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateUser {
    #[serde(rename = "LoginID")]
    pub login_id: LoginId,
    pub name: PersonName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub points: i64,
    pub phone_number: Option<PhoneNumber>,
    pub address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_member_row() {
        let user: User = serde_json::from_value(json!({
            "UserID": 3,
            "LoginID": "kim01",
            "Name": "Kim",
            "Status": "Active",
            "Points": 1200,
            "JoinDate": "2024-03-01T09:00:00Z",
            "LastLogin": null
        }))
        .unwrap();

        assert_eq!(user.key().get(), 3);
        assert_eq!(user.toggled_status(), Some("Inactive"));
        assert!(user.last_login.is_none());
        assert!(user.phone_number.is_none());
    }

    #[test]
    fn withdrawn_members_cannot_be_toggled() {
        let user: User = serde_json::from_value(json!({
            "UserId": 9, "LoginID": "gone", "Name": "Gone", "Status": "Withdrawn"
        }))
        .unwrap();
        assert_eq!(user.toggled_status(), None);
    }

    #[test]
    fn update_omits_blank_password() {
        let payload = UpdateUser {
            login_id: LoginId::new("kim01").unwrap(),
            name: PersonName::new("Kim").unwrap(),
            password: None,
            points: 10,
            phone_number: None,
            address: Some("Seoul".into()),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["LoginID"], "kim01");
        assert!(value.get("Password").is_none());
        assert_eq!(value["Address"], "Seoul");
    }
}
