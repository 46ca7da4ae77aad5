//! Integration tests for the services and administrative commands,
//! run against a real SQLite file.

use watchlist::config::{Config, SecurityConfig};
use watchlist::db::Store;
use watchlist::services::{
    AuthError, AuthService, MovieError, MovieService, SeaOrmAuthService, SeaOrmMovieService,
};
use watchlist::state::SharedState;

fn cheap_security() -> SecurityConfig {
    SecurityConfig {
        argon2_memory_cost_kib: 1024,
        argon2_time_cost: 1,
        argon2_parallelism: 1,
    }
}

fn temp_db_url() -> String {
    let db_path =
        std::env::temp_dir().join(format!("watchlist-service-test-{}.db", uuid::Uuid::new_v4()));
    format!("sqlite:{}", db_path.display())
}

fn temp_config() -> Config {
    let mut config = Config::default();
    config.general.database_path = temp_db_url();
    config.security = cheap_security();
    config
}

async fn setup_store() -> Store {
    Store::from_config(&temp_config().general)
        .await
        .expect("Failed to open store")
}

#[tokio::test]
async fn test_add_then_list() {
    let store = setup_store().await;
    let movies = SeaOrmMovieService::new(store.clone());

    let leon = movies.add("Leon", "1994").await.unwrap();
    let wall_e = movies.add("  WALL-E ", "2008").await.unwrap();

    assert_eq!(wall_e.title, "WALL-E");
    assert_ne!(leon.id, wall_e.id);

    let listed = movies.list().await.unwrap();
    assert_eq!(listed, vec![leon, wall_e]);
    assert_eq!(store.count_movies().await.unwrap(), 2);
}

#[tokio::test]
async fn test_invalid_add_leaves_list_unchanged() {
    let store = setup_store().await;
    let movies = SeaOrmMovieService::new(store.clone());
    movies.add("Leon", "1994").await.unwrap();

    let cases = [
        (String::new(), "1994".to_string()),
        ("Leon".to_string(), String::new()),
        ("   ".to_string(), "1994".to_string()),
        ("x".repeat(61), "1994".to_string()),
        ("Leon".to_string(), "19944".to_string()),
    ];

    for (title, year) in &cases {
        let result = movies.add(title, year).await;
        assert!(
            matches!(result, Err(MovieError::Validation(_))),
            "({title:?}, {year:?}) was accepted"
        );
    }

    assert_eq!(store.count_movies().await.unwrap(), 1);
}

#[tokio::test]
async fn test_title_length_counts_characters() {
    let store = setup_store().await;
    let movies = SeaOrmMovieService::new(store);

    let title = "é".repeat(60);
    let movie = movies.add(&title, "2000").await.unwrap();
    assert_eq!(movie.title.chars().count(), 60);
}

#[tokio::test]
async fn test_edit_movie() {
    let store = setup_store().await;
    let movies = SeaOrmMovieService::new(store);
    let movie = movies.add("Leon", "1994").await.unwrap();

    let edited = movies.edit(movie.id, "Leon: The Professional", "1994").await.unwrap();
    assert_eq!(edited.id, movie.id);
    assert_eq!(edited.title, "Leon: The Professional");
    assert_eq!(movies.get(movie.id).await.unwrap(), edited);
}

#[tokio::test]
async fn test_edit_unknown_or_invalid_changes_nothing() {
    let store = setup_store().await;
    let movies = SeaOrmMovieService::new(store);
    let movie = movies.add("Leon", "1994").await.unwrap();

    let result = movies.edit(movie.id + 100, "Ghost", "2000").await;
    assert!(matches!(result, Err(MovieError::NotFound(_))));

    let result = movies.edit(movie.id, "", "2000").await;
    assert!(matches!(result, Err(MovieError::Validation(_))));

    assert_eq!(movies.list().await.unwrap(), vec![movie]);
}

#[tokio::test]
async fn test_delete_then_delete_again() {
    let store = setup_store().await;
    let movies = SeaOrmMovieService::new(store.clone());
    let movie = movies.add("Leon", "1994").await.unwrap();

    movies.delete(movie.id).await.unwrap();
    assert!(matches!(
        movies.get(movie.id).await,
        Err(MovieError::NotFound(id)) if id == movie.id
    ));

    assert!(matches!(
        movies.delete(movie.id).await,
        Err(MovieError::NotFound(_))
    ));
    assert_eq!(store.count_movies().await.unwrap(), 0);
}

#[tokio::test]
async fn test_login_with_valid_and_invalid_credentials() {
    let store = setup_store().await;
    let (admin, created) =
        watchlist::cli::upsert_admin(&store, "skey", "s3cret", &cheap_security())
            .await
            .unwrap();
    assert!(created);
    assert_eq!(admin.name, "Admin");

    let auth = SeaOrmAuthService::new(store);

    let user = auth.login("skey", "s3cret").await.unwrap();
    assert_eq!(user.id, admin.id);

    for (username, password) in [("skey", "wrong"), ("nobody", "s3cret"), ("", ""), ("skey", "")] {
        assert!(matches!(
            auth.login(username, password).await,
            Err(AuthError::InvalidCredentials)
        ));
    }
}

#[tokio::test]
async fn test_site_owner_is_first_user() {
    let store = setup_store().await;
    let auth = SeaOrmAuthService::new(store.clone());
    assert!(auth.site_owner().await.unwrap().is_none());

    let first = store.create_user("Skey", None, None).await.unwrap();
    store.create_user("Guest", None, None).await.unwrap();

    assert_eq!(auth.site_owner().await.unwrap(), Some(first));
}

#[tokio::test]
async fn test_update_name_targets_given_user() {
    let store = setup_store().await;
    let auth = SeaOrmAuthService::new(store.clone());

    let first = store.create_user("Skey", None, None).await.unwrap();
    let second = store.create_user("Guest", None, None).await.unwrap();

    let renamed = auth.update_name(second.id, " Grey ").await.unwrap();
    assert_eq!(renamed.name, "Grey");

    assert_eq!(store.get_user(first.id).await.unwrap().unwrap().name, "Skey");

    assert!(matches!(
        auth.update_name(second.id, "").await,
        Err(AuthError::Validation(_))
    ));
    assert!(matches!(
        auth.update_name(second.id + 100, "Ghost").await,
        Err(AuthError::UserNotFound)
    ));
}

#[tokio::test]
async fn test_forge_seeds_demo_data() {
    let store = setup_store().await;

    let (owner, inserted) = watchlist::cli::forge(&store).await.unwrap();
    assert_eq!(owner.name, watchlist::cli::SEED_OWNER);
    assert!(owner.username.is_none());
    assert_eq!(inserted, 9);

    let movies = store.list_movies().await.unwrap();
    let titles: Vec<_> = movies.iter().map(|m| m.title.as_str()).collect();
    let expected: Vec<_> = watchlist::cli::SEED_MOVIES.iter().map(|(t, _)| *t).collect();
    assert_eq!(titles, expected);
}

#[tokio::test]
async fn test_admin_updates_existing_owner() {
    let store = setup_store().await;
    watchlist::cli::forge(&store).await.unwrap();

    let (user, created) =
        watchlist::cli::upsert_admin(&store, "skey", "first", &cheap_security())
            .await
            .unwrap();
    assert!(!created);
    assert_eq!(user.name, "Skey");
    assert_eq!(store.count_users().await.unwrap(), 1);

    let (user, created) =
        watchlist::cli::upsert_admin(&store, "grey", "second", &cheap_security())
            .await
            .unwrap();
    assert!(!created);
    assert_eq!(user.username.as_deref(), Some("grey"));

    assert!(store.verify_user_password("grey", "second").await.unwrap().is_some());
    assert!(store.verify_user_password("grey", "first").await.unwrap().is_none());
    assert!(store.verify_user_password("skey", "first").await.unwrap().is_none());
}

#[tokio::test]
async fn test_admin_rejects_bad_input() {
    let store = setup_store().await;

    assert!(
        watchlist::cli::upsert_admin(&store, "", "pw", &cheap_security())
            .await
            .is_err()
    );
    assert!(
        watchlist::cli::upsert_admin(&store, "skey", "", &cheap_security())
            .await
            .is_err()
    );
    assert_eq!(store.count_users().await.unwrap(), 0);
}

#[tokio::test]
async fn test_initdb_drop_clears_data() {
    let config = temp_config();

    let store = Store::from_config(&config.general).await.unwrap();
    watchlist::cli::forge(&store).await.unwrap();

    watchlist::cli::cmd_initdb(&config, false).await.unwrap();
    assert_eq!(store.count_movies().await.unwrap(), 9);

    watchlist::cli::cmd_initdb(&config, true).await.unwrap();
    assert_eq!(store.count_movies().await.unwrap(), 0);
    assert_eq!(store.count_users().await.unwrap(), 0);
}

#[tokio::test]
async fn test_shared_state_wires_services_to_one_store() {
    let config = temp_config();

    let state = SharedState::new(config).await.unwrap();
    state.store.add_movie("Leon", "1994").await.unwrap();

    assert_eq!(state.movie_service.list().await.unwrap().len(), 1);
    assert!(state.auth_service.site_owner().await.unwrap().is_none());
}

#[tokio::test]
async fn test_store_uses_configured_pool_bounds() {
    let mut config = temp_config();
    config.general.max_db_connections = 3;
    config.general.min_db_connections = 2;

    let store = Store::from_config(&config.general).await.unwrap();
    let pool = store.conn.get_sqlite_connection_pool();
    assert_eq!(pool.options().get_max_connections(), 3);
    assert_eq!(pool.options().get_min_connections(), 2);
}
