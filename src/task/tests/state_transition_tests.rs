//! Unit tests for the task status state machine.

use super::fixtures::{Parties, clock, pending_task, started_task};
use crate::task::domain::{Task, TaskDomainError, TaskErrorKind, TaskStatus};
use crate::user::domain::UserId;
use eyre::{bail, ensure};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[case(TaskStatus::Pending, TaskStatus::Pending, false)]
#[case(TaskStatus::Pending, TaskStatus::InProgress, true)]
#[case(TaskStatus::Pending, TaskStatus::Completed, false)]
#[case(TaskStatus::InProgress, TaskStatus::Pending, false)]
#[case(TaskStatus::InProgress, TaskStatus::InProgress, false)]
#[case(TaskStatus::InProgress, TaskStatus::Completed, true)]
#[case(TaskStatus::Completed, TaskStatus::Pending, false)]
#[case(TaskStatus::Completed, TaskStatus::InProgress, false)]
#[case(TaskStatus::Completed, TaskStatus::Completed, false)]
fn can_transition_to_returns_expected(
    #[case] from: TaskStatus,
    #[case] to: TaskStatus,
    #[case] expected: bool,
) {
    assert_eq!(from.can_transition_to(to), expected);
}

#[rstest]
#[case(TaskStatus::Pending, false)]
#[case(TaskStatus::InProgress, false)]
#[case(TaskStatus::Completed, true)]
fn is_terminal_returns_expected(#[case] status: TaskStatus, #[case] expected: bool) {
    assert_eq!(status.is_terminal(), expected);
}

#[rstest]
#[case("PENDING", TaskStatus::Pending)]
#[case("in_progress", TaskStatus::InProgress)]
#[case(" Completed ", TaskStatus::Completed)]
fn status_parses_from_storage(#[case] raw: &str, #[case] expected: TaskStatus) {
    assert_eq!(TaskStatus::try_from(raw), Ok(expected));
}

#[rstest]
fn status_rejects_unknown_value() {
    assert!(TaskStatus::try_from("archived").is_err());
}

#[rstest]
fn start_by_assignee_moves_to_in_progress(
    clock: DefaultClock,
    pending_task: (Task, Parties),
) -> eyre::Result<()> {
    let (mut task, parties) = pending_task;
    let created_at = task.created_at();

    task.start(parties.assignee, &clock)?;

    ensure!(task.status() == TaskStatus::InProgress);
    ensure!(task.updated_at().is_some_and(|updated| updated >= created_at));
    ensure!(task.created_at() == created_at);
    Ok(())
}

#[rstest]
fn start_by_assigner_is_an_authorization_error(
    clock: DefaultClock,
    pending_task: (Task, Parties),
) -> eyre::Result<()> {
    let (mut task, parties) = pending_task;

    let result = task.start(parties.assigner, &clock);
    let expected = Err(TaskDomainError::NotAssignee {
        task_id: task.id(),
        actor: parties.assigner,
    });

    if result != expected {
        bail!("expected {expected:?}, got {result:?}");
    }
    ensure!(result.is_err_and(|err| err.kind() == TaskErrorKind::Authorization));
    ensure!(task.status() == TaskStatus::Pending);
    ensure!(task.updated_at().is_none());
    Ok(())
}

#[rstest]
fn start_by_stranger_is_rejected(
    clock: DefaultClock,
    pending_task: (Task, Parties),
) -> eyre::Result<()> {
    let (mut task, _) = pending_task;

    let result = task.start(UserId::new(), &clock);

    ensure!(matches!(result, Err(TaskDomainError::NotAssignee { .. })));
    Ok(())
}

#[rstest]
fn start_twice_is_an_invalid_transition(
    clock: DefaultClock,
    started_task: (Task, Parties),
) -> eyre::Result<()> {
    let (mut task, parties) = started_task;
    let updated_at = task.updated_at();

    let result = task.start(parties.assignee, &clock);
    let expected = Err(TaskDomainError::InvalidStateTransition {
        task_id: task.id(),
        from: TaskStatus::InProgress,
        to: TaskStatus::InProgress,
    });

    if result != expected {
        bail!("expected {expected:?}, got {result:?}");
    }
    ensure!(result.is_err_and(|err| err.kind() == TaskErrorKind::InvalidTransition));
    ensure!(task.updated_at() == updated_at);
    Ok(())
}

#[rstest]
fn transition_errors_take_precedence_over_actor_checks(
    clock: DefaultClock,
    started_task: (Task, Parties),
) -> eyre::Result<()> {
    let (mut task, parties) = started_task;

    let result = task.start(parties.assigner, &clock);

    ensure!(matches!(
        result,
        Err(TaskDomainError::InvalidStateTransition { .. })
    ));
    Ok(())
}
