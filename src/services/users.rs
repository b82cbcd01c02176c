//! Member administration.

use crate::api::{Body, ListReader, RowWriter};
use crate::controller::{ControllerError, Mutation, PagedCollectionController};
use crate::domain::page::Page;
use crate::domain::types::UserId;
use crate::domain::user::{UpdateUser, User, UserStatus};
use crate::forms::users::EditUserForm;
use crate::forms::{SearchForm, SearchKeys};
use crate::services::{ServiceResult, search};

pub async fn search_users<A>(
    users: &PagedCollectionController<User, A>,
    form: SearchForm,
) -> ServiceResult<Page<User>>
where
    A: ListReader + RowWriter,
{
    search(users, form, SearchKeys::DEFAULT).await
}

/// Validates the edit modal and saves the member.
pub async fn update_user<A>(
    users: &PagedCollectionController<User, A>,
    user_id: i64,
    form: EditUserForm,
) -> ServiceResult<()>
where
    A: ListReader + RowWriter,
{
    let key = UserId::new(user_id)?;
    let payload = UpdateUser::try_from(form)?;
    let body = Body::json(&payload).map_err(ControllerError::from)?;

    users.mutate(Mutation::Update { key, body }).await?;
    Ok(())
}

/// Marks the member as withdrawn; the row stays in the table.
pub async fn withdraw_user<A>(
    users: &PagedCollectionController<User, A>,
    user_id: i64,
) -> ServiceResult<()>
where
    A: ListReader + RowWriter,
{
    let key = UserId::new(user_id)?;
    users.mutate(Mutation::Retire { key }).await?;
    Ok(())
}

pub async fn set_user_status<A>(
    users: &PagedCollectionController<User, A>,
    user_id: i64,
    status: UserStatus,
) -> ServiceResult<()>
where
    A: ListReader + RowWriter,
{
    let key = UserId::new(user_id)?;
    users
        .mutate(Mutation::SetStatus {
            key,
            status: status.as_str().to_string(),
        })
        .await?;
    Ok(())
}

/// Switches a member on the current page between active and inactive.
pub async fn toggle_user_status<A>(
    users: &PagedCollectionController<User, A>,
    user_id: i64,
) -> ServiceResult<()>
where
    A: ListReader + RowWriter,
{
    let key = UserId::new(user_id)?;
    users.mutate(Mutation::ToggleStatus { key }).await?;
    Ok(())
}
