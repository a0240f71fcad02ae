//! When steps for geofenced completion BDD scenarios.

use super::world::{CompletionWorld, RequestFailure, run_async};
use eyre::WrapErr;
use geotask::task::services::SubmitCompletionRequest;
use rstest_bdd_macros::when;

#[when(r#""{name}" submits a completion at {latitude}, {longitude}"#)]
fn submits_completion(
    world: &mut CompletionWorld,
    name: String,
    latitude: f64,
    longitude: f64,
) -> Result<(), eyre::Report> {
    let token = world.session(&name)?.access_token().to_owned();
    let task_id = world.task()?.id();

    let result = world.authenticate(&token).and_then(|principal| {
        run_async(world.service.submit_completion(SubmitCompletionRequest::new(
            task_id,
            principal.user_id(),
            latitude,
            longitude,
        )))
        .map_err(RequestFailure::Lifecycle)
    });
    world.last_submission = Some(result);
    Ok(())
}

#[when(r#""{name}" tries to start the task"#)]
fn tries_to_start(world: &mut CompletionWorld, name: String) -> Result<(), eyre::Report> {
    let token = world.session(&name)?.access_token().to_owned();
    start_with_token(world, &token)
}

#[when(r#""{name}" tries to start the task with the refresh token"#)]
fn tries_to_start_with_refresh_token(
    world: &mut CompletionWorld,
    name: String,
) -> Result<(), eyre::Report> {
    let token = world.session(&name)?.refresh_token().to_owned();
    start_with_token(world, &token)
}

#[when(r#""{name}" refreshes the session"#)]
fn refreshes_session(world: &mut CompletionWorld, name: String) -> Result<(), eyre::Report> {
    let refresh_token = world.session(&name)?.refresh_token().to_owned();
    let pair = run_async(world.gate.refresh(&refresh_token)).wrap_err("refresh session")?;
    world.sessions.insert(name, pair);
    Ok(())
}

fn start_with_token(world: &mut CompletionWorld, token: &str) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();

    let result = world.authenticate(token).and_then(|principal| {
        run_async(world.service.start_task(task_id, principal.user_id()))
            .map_err(RequestFailure::Lifecycle)
    });
    match result {
        Ok(started) => world.task = Some(started),
        Err(failure) => world.last_failure = Some(failure),
    }
    Ok(())
}
