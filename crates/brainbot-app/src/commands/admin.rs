//! User management console.

use brainbot_api::{NewUser, Page, UserDirectory, UserEdit, UserFilter, UserRecord};
use brainbot_common::BrainbotError;
use chrono::Local;

use crate::cli::UsersCommand;
use crate::context::{api_error, AppContext};

pub(super) async fn run(ctx: &AppContext, cmd: UsersCommand) -> Result<(), BrainbotError> {
    ctx.require_page(Page::UserManagement)?;
    let directory = ctx.backend.as_ref();

    match cmd {
        UsersCommand::List {
            search,
            role,
            status,
        } => {
            let users = directory.list_users().await.map_err(|e| ctx.fail(e))?;
            let filter = UserFilter {
                search,
                role,
                status,
            };
            let shown = filter.apply(&users);
            for user in &shown {
                println!("{}", format_row(user));
            }
            println!("{} of {} users", shown.len(), users.len());
        }
        UsersCommand::Add { name, email, role } => {
            let user = NewUser { name, email, role };
            user.validate().map_err(api_error)?;
            let message = directory.create_user(&user).await.map_err(|e| ctx.fail(e))?;
            if message.is_empty() {
                println!("Invitation sent to {}.", user.email);
            } else {
                println!("{message}");
            }
        }
        UsersCommand::Edit {
            id,
            username,
            email,
            role,
        } => {
            let edit = UserEdit {
                id,
                username,
                email,
                role,
            };
            directory.edit_user(&edit).await.map_err(|e| ctx.fail(e))?;
            println!("Updated {}.", edit.username);
        }
        UsersCommand::Lock { email } => {
            directory.set_locked(&email, true).await.map_err(|e| ctx.fail(e))?;
            println!("Locked {email}.");
        }
        UsersCommand::Unlock { email } => {
            directory.set_locked(&email, false).await.map_err(|e| ctx.fail(e))?;
            println!("Unlocked {email}.");
        }
        UsersCommand::Toggle { email } => {
            let users = directory.list_users().await.map_err(|e| ctx.fail(e))?;
            let user = find_by_email(&users, &email)
                .ok_or_else(|| BrainbotError::Other(format!("no user with email {email}")))?;
            let lock = user.toggled_lock();
            directory
                .set_locked(&user.email, lock)
                .await
                .map_err(|e| ctx.fail(e))?;
            println!("{} {}.", if lock { "Locked" } else { "Unlocked" }, user.email);
        }
        UsersCommand::Delete { id } => {
            directory.delete_user(&id).await.map_err(|e| ctx.fail(e))?;
            println!("Deleted user {id}.");
        }
    }
    Ok(())
}

fn find_by_email<'a>(users: &'a [UserRecord], email: &str) -> Option<&'a UserRecord> {
    users
        .iter()
        .find(|u| u.email.eq_ignore_ascii_case(email.trim()))
}

fn format_row(user: &UserRecord) -> String {
    let last_active = user
        .last_active
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".into());
    format!(
        "{:<24} {:<32} {:<10} {:<9} {:<10} {}",
        user.name,
        user.email,
        user.role.as_str(),
        user.status.as_str(),
        last_active,
        user.id
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use brainbot_api::{AccountStatus, Role};

    fn user(email: &str, status: AccountStatus) -> UserRecord {
        UserRecord {
            id: "u1".into(),
            name: "Ada".into(),
            email: email.into(),
            role: Role::Admin,
            status,
            last_active: None,
        }
    }

    #[test]
    fn row_shows_dash_without_last_active() {
        let row = format_row(&user("ada@x.io", AccountStatus::Inactive));
        assert!(row.starts_with("Ada"));
        assert!(row.contains("admin"));
        assert!(row.contains("inactive"));
        assert!(row.contains(" - "));
        assert!(row.ends_with("u1"));
    }

    #[test]
    fn toggle_target_is_found_case_insensitively() {
        let users = vec![
            user("ada@x.io", AccountStatus::Active),
            user("bob@x.io", AccountStatus::Inactive),
        ];
        let found = find_by_email(&users, " BOB@x.io ").unwrap();
        assert_eq!(found.email, "bob@x.io");
        assert!(!found.toggled_lock());
        assert!(find_by_email(&users, &users[0].email).unwrap().toggled_lock());
        assert!(find_by_email(&users, "eve@x.io").is_none());
    }
}
