use crate::config::Config;
use crate::db::Store;
use crate::models::User;

pub const SEED_OWNER: &str = "Skey";

pub const SEED_MOVIES: [(&str, &str); 9] = [
    ("My Neighbor Totoro", "1988"),
    ("Dead Poets Society", "1989"),
    ("A Perfect World", "1993"),
    ("Leon", "1994"),
    ("Mahjong", "1996"),
    ("Swallowtail Butterfly", "1996"),
    ("King of Comedy", "1999"),
    ("Devils on the Doorstep", "1999"),
    ("WALL-E", "2008"),
];

/// Insert the demo owner (without credentials) and the demo movies.
pub async fn forge(store: &Store) -> anyhow::Result<(User, u64)> {
    let user = store.create_user(SEED_OWNER, None, None).await?;
    let inserted = store.add_movies(&SEED_MOVIES).await?;
    Ok((user, inserted))
}

pub async fn cmd_forge(config: &Config) -> anyhow::Result<()> {
    let store = Store::from_config(&config.general).await?;

    if store.count_users().await? > 0 || store.count_movies().await? > 0 {
        println!("Database already has data; forging adds to it.");
    }

    let (user, inserted) = forge(&store).await?;

    println!("✓ Created user '{}' (ID: {})", user.name, user.id);
    println!("✓ Added {inserted} movies");
    println!();
    println!("Run 'watchlist admin' to set login credentials.");
    Ok(())
}
