use crate::auth::{check_password_strength, hash_password};
use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::{apply_table_style, short_timestamp};
use crate::db::{Database, SessionRepository, User, UserRepository};
use tabled::{Table, Tabled};

#[derive(Tabled)]
pub(crate) struct UserDisplay {
    #[tabled(rename = "ID")]
    pub(crate) id: String,
    #[tabled(rename = "Email")]
    pub(crate) email: String,
    #[tabled(rename = "Name")]
    pub(crate) name: String,
    #[tabled(rename = "Created")]
    pub(crate) created_at: String,
}

impl From<&User> for UserDisplay {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            created_at: short_timestamp(&user.created_at),
        }
    }
}

/// Create an admin account
pub async fn create_user<D: Database>(
    db: &D,
    email: &str,
    name: &str,
    password: &str,
) -> CliResult<String> {
    check_password_strength(password)?;

    let user = db
        .users()
        .create(&User {
            id: String::new(),
            email: email.to_string(),
            name: name.to_string(),
            password_hash: hash_password(password)?,
            created_at: String::new(),
            updated_at: String::new(),
        })
        .await?;

    Ok(format!("✓ Created user: {} ({})", user.email, user.id))
}

/// List admin accounts
pub async fn list_users<D: Database>(db: &D, format: &str) -> CliResult<String> {
    let users = db.users().list().await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&users)?),
        _ => Ok(format_table(&users)),
    }
}

pub(crate) fn format_table(users: &[User]) -> String {
    if users.is_empty() {
        return "No users found.".to_string();
    }

    let display: Vec<UserDisplay> = users.iter().map(|u| u.into()).collect();
    let mut table = Table::new(display);
    apply_table_style(&mut table);
    table.to_string()
}

/// Reset the password of an account and sign it out everywhere
pub async fn set_password<D: Database>(db: &D, email: &str, password: &str) -> CliResult<String> {
    check_password_strength(password)?;

    let user = db
        .users()
        .get_by_email(email)
        .await?
        .ok_or_else(|| CliError::invalid_argument(format!("no user with email {}", email)))?;

    db.users()
        .update_password(&user.id, &hash_password(password)?)
        .await?;
    let ended = db.sessions().delete_for_user(&user.id, None).await?;

    Ok(format!(
        "✓ Password updated for {} ({} session(s) ended)",
        user.email, ended
    ))
}

/// Delete an account; its sessions go with it
pub async fn delete_user<D: Database>(db: &D, id: &str) -> CliResult<String> {
    db.users().delete(id).await?;
    Ok(format!("✓ Deleted user: {}", id))
}
