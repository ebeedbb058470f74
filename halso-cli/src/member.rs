//! `halso member ...`

use halso_client::{ClientConfig, MemberPortal, MemberRegistration};

use crate::cli::MemberCommand;
use crate::render;

pub async fn run(config: &ClientConfig, command: MemberCommand) -> anyhow::Result<()> {
    let mut portal = MemberPortal::connect(config)?;

    match command {
        MemberCommand::Register {
            name,
            email,
            phone,
            password,
            confirm_password,
        } => {
            let form = MemberRegistration {
                name,
                email,
                phone,
                password,
                confirm_password,
            };
            let member = portal.auth_mut().register(&form).await?;
            println!("Welcome, {}! You are now logged in.", member.name);
        }
        MemberCommand::Login { email, password } => {
            let member = portal.auth_mut().login(&email, &password).await?;
            println!("Logged in as {}", member.name);
        }
        MemberCommand::Logout => {
            portal.auth_mut().logout()?;
            println!("Logged out");
        }
        MemberCommand::Whoami => match portal.auth().principal() {
            Some(member) => println!("{} <{}>", member.name, member.email),
            None => println!("Not logged in"),
        },
        MemberCommand::Classes { day: None } => {
            render::schedule(&portal.weekly_schedule().await?);
        }
        MemberCommand::Classes { day: Some(day) } => {
            let schedule = portal.weekly_schedule().await?;
            render::table(&render::all(schedule.day(day)));
        }
        MemberCommand::Plans => {
            let plans = portal.plans().await?;
            render::table(&render::all(&plans));
        }
    }
    Ok(())
}
