use super::reported;
use crate::app::App;
use crate::render;
use anyhow::Result;
use likeboard_core::navigation::{Notifier, View};
use likeboard_core::user::UserId;
use std::process::ExitCode;

pub async fn like(app: &App, id: i64) -> Result<ExitCode> {
    if !app.enter(View::Dashboard).await {
        return Ok(ExitCode::FAILURE);
    }

    let ledger = app.ledger();
    ledger.load_own_likes().await;

    match app.like_actions().handle_like_click(&ledger, UserId(id)).await {
        Ok(_) => {
            println!("Remaining likes: {}", ledger.remaining().await);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => reported(e),
    }
}

pub async fn unlike(app: &App, id: i64) -> Result<ExitCode> {
    if !app.enter(View::Dashboard).await {
        return Ok(ExitCode::FAILURE);
    }

    let ledger = app.ledger();
    ledger.load_own_likes().await;

    match app.like_actions().handle_unlike_click(&ledger, UserId(id)).await {
        Ok(()) => {
            println!("Remaining likes: {}", ledger.remaining().await);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => reported(e),
    }
}

pub async fn given(app: &App) -> Result<ExitCode> {
    if !app.enter(View::Dashboard).await {
        return Ok(ExitCode::FAILURE);
    }

    let ledger = app.ledger();
    ledger.load_own_likes().await;

    let records = ledger.given_likes().await;
    let targets: Vec<UserId> = records.iter().map(|r| r.marketer_id).collect();
    let view = ledger.reflect(&targets).await;
    print!("{}", render::given_likes(&records, &view));
    Ok(ExitCode::SUCCESS)
}

pub async fn stats(app: &App) -> Result<ExitCode> {
    if !app.enter(View::Dashboard).await {
        return Ok(ExitCode::FAILURE);
    }

    match app.ledger().detailed_stats().await {
        Some(stats) => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            app.notifier.error("Could not load like statistics");
            Ok(ExitCode::FAILURE)
        }
    }
}

pub async fn ranking(app: &App, limit: Option<u32>) -> Result<ExitCode> {
    if !app.enter(View::Dashboard).await {
        return Ok(ExitCode::FAILURE);
    }

    let entries = app.ledger().ranking(limit).await;
    print!("{}", render::ranking(&entries));
    Ok(ExitCode::SUCCESS)
}

pub async fn reset(app: &App) -> Result<ExitCode> {
    if !app.enter(View::Dashboard).await {
        return Ok(ExitCode::FAILURE);
    }

    if app.ledger().reset_all().await {
        app.notifier.success("All likes have been reset");
        Ok(ExitCode::SUCCESS)
    } else {
        app.notifier.error("Failed to reset likes");
        Ok(ExitCode::FAILURE)
    }
}
