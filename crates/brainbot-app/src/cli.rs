use std::path::PathBuf;

use brainbot_api::{AccountStatus, Role};
use clap::{Parser, Subcommand};

/// BrainBot: chat with the assistant, manage documents and users.
#[derive(Parser, Debug)]
#[command(name = "brainbot", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and store the session credential.
    Login {
        #[arg(short, long)]
        username: String,
        /// Read from stdin when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    /// Sign out and forget the stored credential.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// List the pages available to the signed-in user.
    Pages,
    /// Interactive chat.
    Chat {
        /// Open this conversation instead of the most recent one.
        #[arg(long)]
        conversation: Option<String>,
    },
    #[command(subcommand)]
    Conversations(ConversationsCommand),
    /// User management (administrators only).
    #[command(subcommand)]
    Users(UsersCommand),
    #[command(subcommand)]
    Docs(DocsCommand),
    #[command(subcommand)]
    Password(PasswordCommand),
    /// Save the chatbot evaluation chart (administrators only).
    Evaluations {
        /// Defaults to `ragas-evaluation.<ext>` in the current directory.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the effective configuration as JSON.
    Config,
}

#[derive(Subcommand, Debug)]
pub enum ConversationsCommand {
    List,
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    List {
        /// Case-insensitive match on name or email.
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, value_parser = parse_role)]
        role: Option<Role>,
        #[arg(long, value_parser = parse_status)]
        status: Option<AccountStatus>,
    },
    /// Invite a user; the server emails a verification link.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, value_parser = parse_role, default_value = "user")]
        role: Role,
    },
    Edit {
        id: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, value_parser = parse_role)]
        role: Role,
    },
    Lock { email: String },
    Unlock { email: String },
    /// Lock an active user or unlock an inactive one.
    Toggle { email: String },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum DocsCommand {
    List,
    Upload { path: PathBuf },
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
pub enum PasswordCommand {
    /// Change the signed-in user's password.
    Change,
    /// Request a reset link by email.
    Forgot {
        #[arg(long)]
        email: String,
    },
    /// Set a new password using the emailed link's email and token.
    Reset {
        #[arg(long)]
        email: String,
        #[arg(long)]
        token: String,
    },
}

fn parse_role(s: &str) -> Result<Role, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "admin" => Ok(Role::Admin),
        "moderator" => Ok(Role::Moderator),
        "user" => Ok(Role::User),
        other => Err(format!("unknown role '{other}' (admin, moderator, user)")),
    }
}

fn parse_status(s: &str) -> Result<AccountStatus, String> {
    AccountStatus::parse(s)
        .ok_or_else(|| format!("unknown status '{s}' (active, inactive, pending)"))
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_chat_with_global_flags() {
        let args = Args::try_parse_from([
            "brainbot",
            "chat",
            "--conversation",
            "c1",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(matches!(
            args.command,
            Command::Chat { conversation: Some(ref c) } if c == "c1"
        ));
    }

    #[test]
    fn parses_user_filters() {
        let args = Args::try_parse_from([
            "brainbot", "users", "list", "--role", "Admin", "--status", "inactive",
        ])
        .unwrap();
        let Command::Users(UsersCommand::List { role, status, search }) = args.command else {
            panic!("expected users list");
        };
        assert_eq!(role, Some(Role::Admin));
        assert_eq!(status, Some(AccountStatus::Inactive));
        assert!(search.is_empty());
    }

    #[test]
    fn rejects_unknown_role() {
        assert!(Args::try_parse_from(["brainbot", "users", "list", "--role", "root"]).is_err());
    }

    #[test]
    fn add_user_defaults_to_user_role() {
        let args = Args::try_parse_from([
            "brainbot", "users", "add", "--name", "Ada", "--email", "ada@x.io",
        ])
        .unwrap();
        assert!(matches!(
            args.command,
            Command::Users(UsersCommand::Add { role: Role::User, .. })
        ));
    }

    #[test]
    fn parses_evaluations_output() {
        let args = Args::try_parse_from(["brainbot", "evaluations", "-o", "chart.png"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Evaluations { output: Some(ref p) } if p == &PathBuf::from("chart.png")
        ));
        let args = Args::try_parse_from(["brainbot", "users", "toggle", "bob@x.io"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Users(UsersCommand::Toggle { ref email }) if email == "bob@x.io"
        ));
    }

    #[test]
    fn login_requires_username() {
        assert!(Args::try_parse_from(["brainbot", "login"]).is_err());
    }
}
