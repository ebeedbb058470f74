//! Command line definition

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use halso_client::{ClientConfig, ClientFlavor, EntityId};
use shared::models::{
    FacilityStatus, MembershipStatus, PaymentStatus, PostStatus, SubscriptionStatus, UserRole,
    Weekday,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Hälsoprofilen dashboard and member portal client")]
pub struct Cli {
    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Backend base URL
    #[arg(long, env = "HALSO_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Directory holding the persisted sessions
    #[arg(long, env = "HALSO_SESSION_DIR", global = true)]
    pub session_dir: Option<PathBuf>,
}

impl ConnectionArgs {
    /// Environment configuration for `flavor`, with flags taking precedence
    pub fn config(&self, flavor: ClientFlavor) -> ClientConfig {
        let mut config = ClientConfig::from_env(flavor);
        if let Some(url) = &self.api_url {
            config = config.with_base_url(url.clone());
        }
        if let Some(dir) = &self.session_dir {
            config = config.with_session_dir(dir.clone());
        }
        config
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Administrative dashboard
    #[command(subcommand)]
    Admin(AdminCommand),
    /// Member portal
    #[command(subcommand)]
    Member(MemberCommand),
}

#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Only rows containing this text (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,
}

impl SearchArgs {
    pub fn term(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }
}

/// One CRUD action on an admin collection, with `F` the form flags
#[derive(Debug)]
pub enum Crud<F> {
    List(SearchArgs),
    Show(EntityId),
    Add(F),
    Edit(EntityId, F),
    Delete(EntityId),
}

/// Subcommands every admin collection has; `$fields` holds the form flags
macro_rules! crud_command {
    ($command:ident, $fields:ident) => {
        #[derive(Subcommand, Debug)]
        pub enum $command {
            /// List rows, optionally filtered
            List(SearchArgs),
            /// Show one row
            Show { id: EntityId },
            /// Create from the given fields; the rest keep their form defaults
            Add($fields),
            /// Change only the given fields
            Edit {
                id: EntityId,
                #[command(flatten)]
                fields: $fields,
            },
            Delete { id: EntityId },
        }

        impl $command {
            pub fn into_crud(self) -> Crud<$fields> {
                match self {
                    Self::List(args) => Crud::List(args),
                    Self::Show { id } => Crud::Show(id),
                    Self::Add(fields) => Crud::Add(fields),
                    Self::Edit { id, fields } => Crud::Edit(id, fields),
                    Self::Delete { id } => Crud::Delete(id),
                }
            }
        }
    };
}

crud_command!(MembersCommand, MemberFields);
crud_command!(PlansCommand, PlanFields);
crud_command!(SubscriptionsCommand, SubscriptionFields);
crud_command!(FacilitiesCommand, FacilityFields);
crud_command!(UsersCommand, UserFields);
crud_command!(PostsCommand, PostFields);
crud_command!(ClassCrudCommand, ClassFields);

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    Login {
        username: String,
        #[arg(long, env = "HALSO_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create a dashboard account and log in as it
    Register {
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "HALSO_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Dashboard counters
    Stats,
    #[command(subcommand)]
    Members(MembersCommand),
    /// Subscription plans
    #[command(subcommand)]
    Plans(PlansCommand),
    /// Member subscriptions
    #[command(subcommand)]
    Subscriptions(SubscriptionsCommand),
    #[command(subcommand)]
    Facilities(FacilitiesCommand),
    /// Dashboard users
    #[command(subcommand)]
    Users(UsersCommand),
    #[command(subcommand)]
    Blog(BlogCommand),
    #[command(subcommand)]
    Classes(ClassesCommand),
    /// Current plan of a member
    MemberPlan { member_id: EntityId },
}

#[derive(Subcommand, Debug)]
pub enum BlogCommand {
    #[command(flatten)]
    Posts(PostsCommand),
    /// Mark a post published now
    Publish { id: EntityId },
}

#[derive(Subcommand, Debug)]
pub enum ClassesCommand {
    #[command(flatten)]
    Crud(ClassCrudCommand),
    /// Timetable grouped by weekday
    Week,
    Registrations { id: EntityId },
}

#[derive(Args, Debug, Default)]
pub struct MemberFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub status: Option<MembershipStatus>,
    /// New members join today unless given
    #[arg(long)]
    pub join_date: Option<String>,
    #[arg(long)]
    pub facility: Option<EntityId>,
}

#[derive(Args, Debug, Default)]
pub struct PlanFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub price: Option<f64>,
    /// Billing period in days
    #[arg(long)]
    pub duration: Option<u32>,
    /// Comma-separated
    #[arg(long)]
    pub features: Option<String>,
    #[arg(long)]
    pub active: Option<bool>,
}

#[derive(Args, Debug, Default)]
pub struct SubscriptionFields {
    #[arg(long)]
    pub member: Option<EntityId>,
    #[arg(long)]
    pub plan: Option<EntityId>,
    #[arg(long)]
    pub status: Option<SubscriptionStatus>,
    #[arg(long)]
    pub payment: Option<PaymentStatus>,
    /// New subscriptions start today unless given
    #[arg(long)]
    pub start_date: Option<String>,
    #[arg(long)]
    pub end_date: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct FacilityFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub postal_code: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub status: Option<FacilityStatus>,
}

#[derive(Args, Debug, Default)]
pub struct UserFields {
    #[arg(long)]
    pub username: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub role: Option<UserRole>,
    #[arg(long)]
    pub active: Option<bool>,
    /// Required for new users; leave out to keep the current one
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct PostFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub content: Option<String>,
    #[arg(long)]
    pub excerpt: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long)]
    pub status: Option<PostStatus>,
    /// Comma-separated
    #[arg(long)]
    pub tags: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct ClassFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub instructor: Option<String>,
    #[arg(long)]
    pub facility: Option<EntityId>,
    /// Day name or number (0 = Sunday)
    #[arg(long)]
    pub day: Option<Weekday>,
    /// `HH:MM`
    #[arg(long)]
    pub start: Option<String>,
    /// `HH:MM`
    #[arg(long)]
    pub end: Option<String>,
    #[arg(long)]
    pub capacity: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum MemberCommand {
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long, env = "HALSO_PASSWORD", hide_env_values = true)]
        password: String,
        /// Repeat of the password
        #[arg(long)]
        confirm_password: String,
    },
    Login {
        email: String,
        #[arg(long, env = "HALSO_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    Whoami,
    /// Class timetable, optionally for one day
    Classes {
        #[arg(long)]
        day: Option<Weekday>,
    },
    /// Plans open for sign-up
    Plans,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_edit_takes_only_given_fields() {
        let cli = Cli::try_parse_from([
            "halso", "admin", "plans", "edit", "p1", "--price", "549", "--active", "false",
        ])
        .unwrap();
        let Command::Admin(AdminCommand::Plans(command)) = cli.command else {
            panic!("parsed into the wrong command");
        };
        let Crud::Edit(id, fields) = command.into_crud() else {
            panic!("expected an edit");
        };
        assert_eq!(id, EntityId::from("p1"));
        assert_eq!(fields.price, Some(549.0));
        assert_eq!(fields.active, Some(false));
        assert!(fields.name.is_none());
    }

    #[test]
    fn test_flattened_class_commands() {
        let cli = Cli::try_parse_from([
            "halso", "admin", "classes", "add", "--name", "Boxing", "--day", "fri",
        ])
        .unwrap();
        let Command::Admin(AdminCommand::Classes(ClassesCommand::Crud(command))) = cli.command
        else {
            panic!("parsed into the wrong command");
        };
        let Crud::Add(fields) = command.into_crud() else {
            panic!("expected an add");
        };
        assert_eq!(fields.day, Some(Weekday::Friday));

        assert!(matches!(
            Cli::try_parse_from(["halso", "admin", "classes", "week"]).unwrap().command,
            Command::Admin(AdminCommand::Classes(ClassesCommand::Week))
        ));
    }

    #[test]
    fn test_member_register_requires_confirmation() {
        let missing = Cli::try_parse_from([
            "halso", "member", "register", "--name", "Lisa", "--email", "lisa@example.se",
            "--password", "secret123",
        ]);
        assert!(missing.is_err());
    }
}
