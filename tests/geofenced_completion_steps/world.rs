//! Shared world state for geofenced completion BDD scenarios.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use geotask::auth::{
    domain::TokenConfig,
    services::{AuthorizationGate, GateError, Principal, TokenPair, TokenService},
};
use geotask::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{CompletionOutcome, Task},
    services::{TaskLifecycleError, TaskLifecycleService},
};
use geotask::user::{adapters::memory::InMemoryUserRepository, domain::User};
use mockable::Clock;
use rstest::fixture;

const SECRET: &str = "behaviour-suite-secret-0123456789abcdef";
const ACCESS_TTL_MS: u64 = 15 * 60 * 1000;
const REFRESH_TTL_MS: u64 = 24 * 60 * 60 * 1000;

/// Clock that stands still until a step advances it.
#[derive(Debug)]
pub struct SteppingClock(RwLock<DateTime<Utc>>);

impl SteppingClock {
    fn starting_at(start: DateTime<Utc>) -> Self {
        Self(RwLock::new(start))
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.0.write().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.read().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Service type used by the BDD world.
pub type TestTaskService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryUserRepository, SteppingClock>;

/// Gate type used by the BDD world.
pub type TestGate = AuthorizationGate<InMemoryUserRepository, SteppingClock>;

/// Why a request made in a step did not go through.
#[derive(Debug)]
pub enum RequestFailure {
    /// The session token was refused.
    Gate(GateError),
    /// The lifecycle operation was refused.
    Lifecycle(TaskLifecycleError),
}

/// Scenario world for geofenced completion behaviour tests.
pub struct CompletionWorld {
    pub clock: Arc<SteppingClock>,
    pub users: Arc<InMemoryUserRepository>,
    pub gate: TestGate,
    pub service: TestTaskService,
    pub known_users: HashMap<String, User>,
    pub sessions: HashMap<String, TokenPair>,
    pub task: Option<Task>,
    pub last_submission: Option<Result<CompletionOutcome, RequestFailure>>,
    pub last_failure: Option<RequestFailure>,
}

impl CompletionWorld {
    /// Creates a world with no users, sessions or tasks.
    #[must_use]
    pub fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2024, 5, 1, 9, 0, 0)
            .single()
            .unwrap_or_default();
        let clock = Arc::new(SteppingClock::starting_at(start));
        let users = Arc::new(InMemoryUserRepository::new());
        let config = TokenConfig::new(SECRET, ACCESS_TTL_MS, REFRESH_TTL_MS)
            .unwrap_or_else(|err| panic!("scenario token config is invalid: {err}"));
        let tokens = Arc::new(TokenService::new(Arc::new(config), Arc::clone(&clock)));

        Self {
            gate: AuthorizationGate::new(tokens, Arc::clone(&users)),
            service: TaskLifecycleService::new(
                Arc::new(InMemoryTaskRepository::new()),
                Arc::clone(&users),
                Arc::clone(&clock),
            ),
            clock,
            users,
            known_users: HashMap::new(),
            sessions: HashMap::new(),
            task: None,
            last_submission: None,
            last_failure: None,
        }
    }

    /// Looks up a user created earlier in the scenario.
    pub fn user(&self, name: &str) -> eyre::Result<&User> {
        self.known_users
            .get(name)
            .ok_or_else(|| eyre::eyre!("user {name:?} was not created in this scenario"))
    }

    /// Returns the session issued to a user earlier in the scenario.
    pub fn session(&self, name: &str) -> eyre::Result<&TokenPair> {
        self.sessions
            .get(name)
            .ok_or_else(|| eyre::eyre!("user {name:?} has not signed in"))
    }

    /// Returns the task created in the scenario.
    pub fn task(&self) -> eyre::Result<&Task> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }

    /// Authenticates a presented token through the gate.
    pub fn authenticate(&self, token: &str) -> Result<Principal, RequestFailure> {
        run_async(self.gate.authenticate(token)).map_err(RequestFailure::Gate)
    }
}

impl Default for CompletionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CompletionWorld {
    CompletionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
