//! Given steps for geofenced completion BDD scenarios.

use super::world::{CompletionWorld, run_async};
use chrono::Duration;
use eyre::WrapErr;
use geotask::task::services::CreateTaskRequest;
use geotask::user::{
    domain::{User, UserRole, Username},
    ports::UserRepository,
};
use rstest_bdd_macros::given;

#[given(r#"a user "{name}""#)]
fn a_user(world: &mut CompletionWorld, name: String) -> Result<(), eyre::Report> {
    let user = User::new(Username::new(name.as_str())?, UserRole::User);
    run_async(world.users.store(&user)).wrap_err("store scenario user")?;
    world.known_users.insert(name, user);
    Ok(())
}

#[given(
    r#""{assigner}" assigns "{assignee}" a task at {latitude}, {longitude} with a {radius} meter radius"#
)]
fn assigns_task(
    world: &mut CompletionWorld,
    assigner: String,
    assignee: String,
    latitude: f64,
    longitude: f64,
    radius: f64,
) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(
        "Confirm the delivery drop",
        "Stand at the drop point and submit your position",
        latitude,
        longitude,
        world.user(&assigner)?.id(),
        world.user(&assignee)?.id(),
    )
    .with_completion_radius(radius);

    let created = run_async(world.service.create_task(request)).wrap_err("create scenario task")?;
    world.task = Some(created);
    Ok(())
}

#[given(r#""{name}" has signed in"#)]
fn has_signed_in(world: &mut CompletionWorld, name: String) -> Result<(), eyre::Report> {
    let pair = world
        .gate
        .issue_session(world.user(&name)?)
        .wrap_err("issue scenario session")?;
    world.sessions.insert(name, pair);
    Ok(())
}

#[given(r#""{name}" has started the task"#)]
fn has_started_the_task(world: &mut CompletionWorld, name: String) -> Result<(), eyre::Report> {
    let principal = world
        .authenticate(world.session(&name)?.access_token())
        .map_err(|failure| eyre::eyre!("scenario session rejected: {failure:?}"))?;
    let task_id = world.task()?.id();

    let started = run_async(world.service.start_task(task_id, principal.user_id()))
        .wrap_err("start scenario task")?;
    world.task = Some(started);
    Ok(())
}

#[given("{minutes:u64} minutes pass")]
fn minutes_pass(world: &mut CompletionWorld, minutes: u64) -> Result<(), eyre::Report> {
    world.clock.advance(Duration::minutes(i64::try_from(minutes)?));
    Ok(())
}
