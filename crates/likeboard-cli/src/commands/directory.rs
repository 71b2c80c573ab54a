use super::reported;
use crate::app::App;
use crate::render;
use anyhow::Result;
use likeboard_core::marketer::DirectoryFilter;
use likeboard_core::navigation::View;
use likeboard_core::user::UserId;
use std::process::ExitCode;

pub async fn list(
    app: &App,
    filter: DirectoryFilter,
    search: Option<String>,
    like: Option<i64>,
) -> Result<ExitCode> {
    if !app.enter(View::Dashboard).await {
        return Ok(ExitCode::FAILURE);
    }

    let directory = app.directory();
    directory.set_filter(filter).await;
    directory.set_search(search.as_deref()).await;

    if let Err(e) = directory.load_marketers().await {
        return reported(e);
    }
    directory.load_user_stats().await;

    let mut code = ExitCode::SUCCESS;
    if let Some(id) = like {
        if let Err(e) = directory.handle_like(UserId(id)).await {
            code = reported(e)?;
        }
    }

    let render = directory.render().await;
    print!(
        "{}",
        render::directory(
            &render,
            directory.filter().await,
            &directory.stats().await,
            directory.total_members().await,
        )
    );
    Ok(code)
}

pub async fn show(app: &App, id: i64) -> Result<ExitCode> {
    if !app.enter(View::Dashboard).await {
        return Ok(ExitCode::FAILURE);
    }

    let directory = app.directory();
    if let Err(e) = directory.load_marketers().await {
        return reported(e);
    }
    directory.load_user_stats().await;

    match directory.profile_detail(UserId(id)).await {
        Some(card) => {
            print!("{}", render::card_detail(&card));
            Ok(ExitCode::SUCCESS)
        }
        None => anyhow::bail!("No marketer with id {}", id),
    }
}
