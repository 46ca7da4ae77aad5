use std::io::Write;

use crate::config::{Config, SecurityConfig};
use crate::db::Store;
use crate::models::User;
use crate::services::validation::validate_username;

const DEFAULT_ADMIN_NAME: &str = "Admin";

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{label}");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

fn confirmed_password(password: String, confirm: &str) -> anyhow::Result<String> {
    if password != confirm {
        anyhow::bail!("Passwords do not match");
    }
    Ok(password)
}

/// Update the first user's credentials, or create the account if the table
/// is empty.
pub async fn upsert_admin(
    store: &Store,
    username: &str,
    password: &str,
    security: &SecurityConfig,
) -> anyhow::Result<(User, bool)> {
    let username = validate_username(username).map_err(anyhow::Error::msg)?;
    if password.is_empty() {
        anyhow::bail!("Password cannot be empty");
    }

    let (target, created) = match store.first_user().await? {
        Some(user) => (user, false),
        None => (store.create_user(DEFAULT_ADMIN_NAME, None, None).await?, true),
    };

    if let Some(holder) = store.get_user_by_username(&username).await?
        && holder.id != target.id
    {
        anyhow::bail!("Username '{username}' already belongs to user {}", holder.id);
    }

    let user = store
        .set_user_credentials(target.id, &username, password, security)
        .await?;
    Ok((user, created))
}

pub async fn cmd_admin(
    config: &Config,
    username: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let username = match username {
        Some(username) => username,
        None => prompt("Username: ")?,
    };

    let password = match password {
        Some(password) => password,
        None => {
            let password = prompt("Password: ")?;
            let confirm = prompt("Repeat for confirmation: ")?;
            confirmed_password(password, &confirm)?
        }
    };

    let store = Store::from_config(&config.general).await?;
    let (user, created) = upsert_admin(&store, &username, &password, &config.security).await?;

    if created {
        println!("✓ Created user '{}' (ID: {})", user.name, user.id);
    } else {
        println!("✓ Updated user '{}' (ID: {})", user.name, user.id);
    }
    Ok(())
}
