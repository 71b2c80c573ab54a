use crate::app::App;
use crate::render;
use anyhow::{Context, Result};
use likeboard_application::{LoginRequest, RegistrationForm};
use likeboard_core::navigation::{Notifier, View};
use likeboard_interaction::encode_avatar;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

pub struct RegisterArgs {
    pub invitation_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub bio: String,
    pub avatar: Option<PathBuf>,
}

fn read_password() -> Result<String> {
    eprint!("Password: ");
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

async fn already_signed_in(app: &App, view: View) -> bool {
    if app.enter(view).await {
        return false;
    }
    if let Some(user) = app.session.current_user().await {
        println!("Already logged in as {}. Run `likeboard logout` first.", user.email);
    }
    true
}

pub async fn login(app: &App, email: String, password: Option<String>) -> Result<ExitCode> {
    if already_signed_in(app, View::Login).await {
        return Ok(ExitCode::SUCCESS);
    }

    let password = match password {
        Some(password) => password,
        None => read_password()?,
    };

    match app.session.login(&LoginRequest::new(email, password)).await {
        Ok(user) => {
            app.notifier.success(&format!("Welcome back, {}!", user.full_name()));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            app.notifier.error(&e.to_string());
            Ok(ExitCode::FAILURE)
        }
    }
}

pub async fn register(app: &App, args: RegisterArgs) -> Result<ExitCode> {
    if already_signed_in(app, View::Register).await {
        return Ok(ExitCode::SUCCESS);
    }

    let avatar = match &args.avatar {
        Some(path) => match encode_avatar(path) {
            Ok(uri) => Some(uri),
            Err(e) => {
                app.notifier.error(&e.to_string());
                return Ok(ExitCode::FAILURE);
            }
        },
        None => None,
    };

    let form = RegistrationForm {
        invitation_code: args.invitation_code,
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        password: args.password,
        confirm_password: args.confirm_password,
        bio: args.bio,
        avatar,
    };

    match app.session.register(&form).await {
        Ok(user) => {
            app.notifier.success(&format!("Welcome, {}!", user.full_name()));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            app.notifier.error(&e.to_string());
            Ok(ExitCode::FAILURE)
        }
    }
}

pub async fn validate_invitation(app: &App, code: &str) -> Result<ExitCode> {
    match app.session.validate_invitation(code).await {
        Ok(message) => {
            app.notifier.success(&message);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            app.notifier.error(&e.to_string());
            Ok(ExitCode::FAILURE)
        }
    }
}

pub async fn logout(app: &App) -> Result<ExitCode> {
    if !app.session.is_authenticated().await {
        println!("Not logged in.");
        return Ok(ExitCode::SUCCESS);
    }

    app.session.logout().await;
    app.notifier.success("Logged out");
    Ok(ExitCode::SUCCESS)
}

pub async fn whoami(app: &App) -> Result<ExitCode> {
    if !app.enter(View::Dashboard).await {
        return Ok(ExitCode::FAILURE);
    }

    match app.session.current_user().await {
        Some(user) => {
            print!("{}", render::profile(&user));
            Ok(ExitCode::SUCCESS)
        }
        None => Ok(ExitCode::FAILURE),
    }
}
