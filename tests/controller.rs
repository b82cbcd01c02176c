use std::sync::Arc;

use shop_backoffice::api::credentials::SessionCredentials;
use shop_backoffice::controller::{ControllerError, LoadPhase, Mutation, PagedCollectionController};
use shop_backoffice::domain::filter::FilterCriteria;
use shop_backoffice::domain::notice::Notice;
use shop_backoffice::domain::point::PointEntry;
use shop_backoffice::domain::types::UserId;
use shop_backoffice::domain::user::{User, UserStatus};
use shop_backoffice::forms::SearchForm;
use shop_backoffice::services;

mod common;

use common::{FakeAdmin, TOKEN};

#[actix_web::test]
async fn pages_through_members_with_ranks_and_window() {
    let admin = FakeAdmin::start(57).await;
    let users = PagedCollectionController::<User, _>::new(Arc::new(admin.client(Some(TOKEN))));

    users.load_page(1, None).await.unwrap();
    assert_eq!(users.visible_pages().await, vec![1, 2, 3, 4, 5]);

    users.change_page(6).await.unwrap();
    let view = users.paginated().await.unwrap();
    assert_eq!(view.pages, vec![2, 3, 4, 5, 6]);
    assert_eq!(view.total_pages, 6);
    let ranks: Vec<i64> = view.items.iter().map(|row| row.rank).collect();
    assert_eq!(ranks, vec![7, 6, 5, 4, 3, 2, 1]);

    let result = users.change_page(7).await;
    assert!(matches!(
        result,
        Err(ControllerError::PageOutOfRange {
            requested: 7,
            total_pages: 6
        })
    ));
    assert_eq!(users.current_page().await.get(), 6);
}

#[actix_web::test]
async fn search_form_goes_to_search_endpoint_and_reset_clears_it() {
    let admin = FakeAdmin::start(12).await;
    let users = PagedCollectionController::<User, _>::new(Arc::new(admin.client(Some(TOKEN))));

    let form = SearchForm {
        status: Some("Inactive".into()),
        ..SearchForm::default()
    };
    let page = services::users::search_users(&users, form).await.unwrap();
    assert_eq!(page.total_items, 4);
    assert!(page.items.iter().all(|user| user.status == UserStatus::Inactive));
    assert_eq!(admin.last_request().path, "users/search");

    let page = users.reset_filters().await.unwrap();
    assert_eq!(page.total_items, 12);
    assert_eq!(users.filters().await, FilterCriteria::new());
    assert_eq!(admin.last_request().path, "users");
}

#[actix_web::test]
async fn toggle_is_followed_by_reload() {
    let admin = FakeAdmin::start(4).await;
    let users = PagedCollectionController::<User, _>::new(Arc::new(admin.client(Some(TOKEN))));
    users.load_page(1, None).await.unwrap();

    services::users::toggle_user_status(&users, 2).await.unwrap();

    let toggled = users.find(&UserId::new(2).unwrap()).await.unwrap();
    assert_eq!(toggled.status, UserStatus::Inactive);
    let methods: Vec<String> = admin
        .requests()
        .iter()
        .map(|r| format!("{} {}", r.method, r.path))
        .collect();
    assert_eq!(methods, vec!["GET users", "PUT users/2/status", "GET users"]);
}

#[actix_web::test]
async fn deleting_only_row_of_last_page_moves_back() {
    let admin = FakeAdmin::start(21).await;
    let users = PagedCollectionController::<User, _>::new(Arc::new(admin.client(Some(TOKEN))));
    users.load_page(3, None).await.unwrap();

    users
        .mutate(Mutation::Delete {
            key: UserId::new(21).unwrap(),
        })
        .await
        .unwrap();

    let page = users.page().await.unwrap();
    assert_eq!(page.page_number.get(), 2);
    assert_eq!(page.total_items, 20);
    assert_eq!(users.phase().await, LoadPhase::Loaded);
}

#[actix_web::test]
async fn rejected_token_asks_for_login_and_keeps_page() {
    let admin = FakeAdmin::start(15).await;
    let session = Arc::new(SessionCredentials::new());
    session.store(TOKEN);
    let users = PagedCollectionController::<User, _>::new(Arc::new(admin.client_with(session.clone())));
    users.load_page(1, None).await.unwrap();

    session.clear();
    let result = users.change_page(2).await;

    assert!(matches!(result, Err(ControllerError::ReauthenticationRequired)));
    assert_eq!(users.phase().await, LoadPhase::Errored);
    let held = users.page().await.unwrap();
    assert_eq!(held.page_number.get(), 1);
    assert_eq!(held.items.len(), 10);
}

#[actix_web::test]
async fn bare_array_is_one_complete_page() {
    let admin = FakeAdmin::start(0).await;
    let notices = PagedCollectionController::<Notice, _>::new(Arc::new(admin.client(Some(TOKEN))));

    let page = notices.load_page(1, None).await.unwrap();

    assert_eq!(page.total_items, 2);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.items[0].title, "Holiday hours");
}

#[actix_web::test]
async fn bare_array_is_sliced_into_pages() {
    let admin = FakeAdmin::start(0).await;
    let notices = PagedCollectionController::<Notice, _>::new(Arc::new(admin.client(Some(TOKEN))))
        .with_page_size(1);

    let first = notices.load_page(1, None).await.unwrap();
    assert_eq!(first.items.len(), 1);
    assert_eq!(first.total_pages, 2);
    assert_eq!(first.items[0].title, "Holiday hours");

    let second = notices.change_page(2).await.unwrap();
    assert_eq!(second.items.len(), 1);
    assert_eq!(second.items[0].title, "Welcome");
    let ranks: Vec<i64> = second.ranked().map(|(rank, _)| rank).collect();
    assert_eq!(ranks, vec![1]);
}

#[actix_web::test]
async fn count_endpoint_feeds_displayed_total() {
    let admin = FakeAdmin::start(0).await;
    let points = PagedCollectionController::<PointEntry, _>::new(Arc::new(admin.client(Some(TOKEN))));

    assert_eq!(points.refresh_count().await.unwrap(), 42);
    assert_eq!(points.displayed_total().await, 42);
}
