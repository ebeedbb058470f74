//! `halso admin ...`

use halso_client::{
    AdminClient, AdminRegistration, ClientConfig, HttpClient, MemberPlanView, Toaster,
    WeeklySchedule,
};

use crate::cli::{AdminCommand, BlogCommand, ClassesCommand};
use crate::{crud, render};

pub async fn run(config: &ClientConfig, command: AdminCommand) -> anyhow::Result<()> {
    let mut client = AdminClient::connect(config)?;
    let mut toaster = Toaster::new();
    let result = execute(&mut client, command, &mut toaster).await;
    render::toasts(&mut toaster);
    result
}

async fn execute<C: HttpClient + Clone>(
    client: &mut AdminClient<C>,
    command: AdminCommand,
    toaster: &mut Toaster,
) -> anyhow::Result<()> {
    match command {
        AdminCommand::Login { username, password } => {
            let user = client.auth_mut().login(&username, &password).await?;
            println!("Logged in as {} ({})", user.username, user.role.label());
        }
        AdminCommand::Register {
            username,
            email,
            password,
            confirm_password,
        } => {
            let form = AdminRegistration {
                username,
                email,
                password,
                confirm_password,
            };
            let user = client.auth_mut().register(&form).await?;
            println!("Registered and logged in as {} ({})", user.username, user.role.label());
        }
        AdminCommand::Logout => {
            client.auth_mut().logout()?;
            println!("Logged out");
        }
        AdminCommand::Whoami => match client.auth().principal() {
            Some(user) => println!("{} ({})", user.username, user.role.label()),
            None => println!("Not logged in"),
        },
        AdminCommand::Stats => render::stats(&client.dashboard().stats().await?),
        AdminCommand::Members(command) => {
            crud::run(&client.members(), command.into_crud(), toaster).await?
        }
        AdminCommand::Plans(command) => {
            crud::run(&client.plans(), command.into_crud(), toaster).await?
        }
        AdminCommand::Subscriptions(command) => {
            crud::run(&client.member_subscriptions(), command.into_crud(), toaster).await?
        }
        AdminCommand::Facilities(command) => {
            crud::run(&client.facilities(), command.into_crud(), toaster).await?
        }
        AdminCommand::Users(command) => {
            crud::run(&client.users(), command.into_crud(), toaster).await?
        }
        AdminCommand::Blog(BlogCommand::Posts(command)) => {
            crud::run(&client.blog(), command.into_crud(), toaster).await?
        }
        AdminCommand::Blog(BlogCommand::Publish { id }) => {
            let post = client.blog().publish(&id).await?;
            toaster.success(format!("Published \"{}\"", post.title));
        }
        AdminCommand::Classes(ClassesCommand::Crud(command)) => {
            crud::run(&client.classes(), command.into_crud(), toaster).await?
        }
        AdminCommand::Classes(ClassesCommand::Week) => {
            let list = crud::load(&client.classes(), toaster).await?;
            render::schedule(&WeeklySchedule::build(list.items()));
        }
        AdminCommand::Classes(ClassesCommand::Registrations { id }) => {
            let registrations = client.classes().registrations(&id).await?;
            render::table(&render::all(&registrations));
        }
        AdminCommand::MemberPlan { member_id } => {
            let index = client.member_plan_index().await?;
            match index.plan_for_member(&member_id) {
                MemberPlanView::Active { plan, subscription } => println!(
                    "{} (payment {}, {} - {})",
                    plan.name,
                    subscription.payment_status.label(),
                    subscription.start_date.as_deref().unwrap_or("?"),
                    subscription.end_date.as_deref().unwrap_or("open"),
                ),
                view @ MemberPlanView::NoActiveSubscription => println!("{}", view.label()),
            }
        }
    }
    Ok(())
}
