//! Then steps for geofenced completion BDD scenarios.

use super::world::{CompletionWorld, RequestFailure, run_async};
use geotask::auth::services::GateError;
use geotask::task::domain::{CompletionOutcome, TaskErrorKind, TaskStatus};
use rstest_bdd_macros::then;

fn last_outcome(world: &CompletionWorld) -> Result<&CompletionOutcome, eyre::Report> {
    match world.last_submission.as_ref() {
        Some(Ok(outcome)) => Ok(outcome),
        Some(Err(failure)) => Err(eyre::eyre!("submission failed: {failure:?}")),
        None => Err(eyre::eyre!("no completion was submitted")),
    }
}

fn last_failure(world: &CompletionWorld) -> Result<&RequestFailure, eyre::Report> {
    if let Some(Err(failure)) = world.last_submission.as_ref() {
        return Ok(failure);
    }
    world
        .last_failure
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected a failed request, but none failed"))
}

#[then("the claim is verified")]
fn claim_is_verified(world: &CompletionWorld) -> Result<(), eyre::Report> {
    let outcome = last_outcome(world)?;
    if !outcome.is_verified() {
        return Err(eyre::eyre!(
            "expected a verified claim, distance was {} m",
            outcome.verification().distance_meters()
        ));
    }
    Ok(())
}

#[then("the claim is not verified")]
fn claim_is_not_verified(world: &CompletionWorld) -> Result<(), eyre::Report> {
    let outcome = last_outcome(world)?;
    if outcome.is_verified() {
        return Err(eyre::eyre!("expected the claim to fall outside the fence"));
    }
    Ok(())
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &CompletionWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task_id = world.task()?.id();

    let stored = run_async(world.service.find_by_id(task_id))?
        .ok_or_else(|| eyre::eyre!("task {task_id} is no longer stored"))?;

    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            stored.status().as_str()
        ));
    }
    Ok(())
}

#[then("the task has {count:u64} recorded completion attempts")]
fn recorded_attempts(world: &CompletionWorld, count: u64) -> Result<(), eyre::Report> {
    let log = run_async(world.service.completions_for(world.task()?.id()))?;
    let expected = usize::try_from(count)?;

    if log.len() != expected {
        return Err(eyre::eyre!(
            "expected {expected} completion attempts, found {}",
            log.len()
        ));
    }
    Ok(())
}

#[then(r#"the latest attempt notes mention "{text}""#)]
fn latest_notes_mention(world: &CompletionWorld, text: String) -> Result<(), eyre::Report> {
    let log = run_async(world.service.completions_for(world.task()?.id()))?;
    let notes = log
        .last()
        .and_then(|attempt| attempt.verification_notes())
        .ok_or_else(|| eyre::eyre!("latest attempt has no notes"))?;

    if !notes.contains(&text) {
        return Err(eyre::eyre!("notes {notes:?} do not mention {text:?}"));
    }
    Ok(())
}

#[then("the attempt is rejected as unauthenticated")]
fn rejected_as_unauthenticated(world: &CompletionWorld) -> Result<(), eyre::Report> {
    let failure = last_failure(world)?;
    if !matches!(failure, RequestFailure::Gate(GateError::Unauthenticated)) {
        return Err(eyre::eyre!("expected an unauthenticated rejection, got {failure:?}"));
    }
    Ok(())
}

#[then("the attempt fails with an authorization error")]
fn fails_with_authorization_error(world: &CompletionWorld) -> Result<(), eyre::Report> {
    let failure = last_failure(world)?;
    let kind = match failure {
        RequestFailure::Lifecycle(err) => err.kind(),
        RequestFailure::Gate(_) => None,
    };
    if kind != Some(TaskErrorKind::Authorization) {
        return Err(eyre::eyre!("expected an authorization error, got {failure:?}"));
    }
    Ok(())
}
