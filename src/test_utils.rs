//! In-memory store and queue used by unit tests

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::{
    config::{Config, DatabaseConfig, DispatchConfig, JwtConfig, RedisConfig, ServerConfig},
    constants::submissions::{NO_RESULT, UNJUDGED_EXECUTED_TIME},
    db::{Store, StoreTx},
    error::{AppError, AppResult},
    models::{
        JudgePayload, NewSubmission, NewUser, Problem, Submission, TestCase, TestCaseFields, User,
    },
    queue::{QueueError, WorkQueue},
    state::AppState,
};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    problems: BTreeMap<i32, Problem>,
    test_cases: BTreeMap<i32, TestCase>,
    submissions: BTreeMap<i32, Submission>,
    users: BTreeMap<i32, User>,
    next_id: i32,
}

impl MemoryState {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn reserve(&mut self, id: i32) {
        self.next_id = self.next_id.max(id);
    }
}

/// Store backed by ordered maps.
///
/// A transaction works on a copy of the data and publishes it on commit,
/// so dropping it discards every write.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
    test_case_fetches: Arc<Mutex<HashMap<i32, usize>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_problem(&self, id: i32, title: &str) -> Problem {
        let mut state = self.state.lock().unwrap();
        state.reserve(id);
        let problem = Problem {
            id,
            title: title.to_string(),
            description: format!("{} description", title),
        };
        state.problems.insert(id, problem.clone());
        problem
    }

    pub fn seed_test_case(
        &self,
        problem_id: i32,
        input: &str,
        expected_output: &str,
        score: i32,
        timeout_seconds: f64,
    ) -> TestCase {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let test_case = TestCase {
            id,
            problem_id,
            input: input.to_string(),
            expected_output: expected_output.to_string(),
            comment: String::new(),
            score,
            timeout_seconds,
        };
        state.test_cases.insert(id, test_case.clone());
        test_case
    }

    pub fn seed_submission(&self, id: i32, problem_id: i32, user_id: i32, language: &str) -> Submission {
        let mut state = self.state.lock().unwrap();
        state.reserve(id);
        let submission = Submission {
            id,
            language: language.to_string(),
            code: format!("// submission {}", id),
            executed_time: UNJUDGED_EXECUTED_TIME,
            result: NO_RESULT.to_string(),
            problem_id,
            user_id,
        };
        state.submissions.insert(id, submission.clone());
        submission
    }

    pub fn seed_user(&self, id: i32, username: &str, authority: i32) -> User {
        let mut state = self.state.lock().unwrap();
        state.reserve(id);
        let user = User {
            id,
            username: username.to_string(),
            password_hash: String::new(),
            name: username.to_string(),
            email: format!("{}@example.com", username),
            authority,
        };
        state.users.insert(id, user.clone());
        user
    }

    /// Mark a submission as judged
    pub fn set_result(&self, submission_id: i32, result: &str) {
        let mut state = self.state.lock().unwrap();
        if let Some(submission) = state.submissions.get_mut(&submission_id) {
            submission.result = result.to_string();
            submission.executed_time = 0.5;
        }
    }

    pub fn test_cases(&self, problem_id: i32) -> Vec<TestCase> {
        let state = self.state.lock().unwrap();
        state
            .test_cases
            .values()
            .filter(|tc| tc.problem_id == problem_id)
            .cloned()
            .collect()
    }

    pub fn problem(&self, id: i32) -> Option<Problem> {
        self.state.lock().unwrap().problems.get(&id).cloned()
    }

    pub fn submission(&self, id: i32) -> Option<Submission> {
        self.state.lock().unwrap().submissions.get(&id).cloned()
    }

    /// How many times the test cases of `problem_id` were read
    pub fn test_case_fetches(&self, problem_id: i32) -> usize {
        self.test_case_fetches
            .lock()
            .unwrap()
            .get(&problem_id)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn begin(&self) -> AppResult<Box<dyn StoreTx>> {
        let working = self.state.lock().unwrap().clone();
        Ok(Box::new(MemoryTx {
            shared: self.state.clone(),
            fetches: self.test_case_fetches.clone(),
            working,
        }))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

struct MemoryTx {
    shared: Arc<Mutex<MemoryState>>,
    fetches: Arc<Mutex<HashMap<i32, usize>>>,
    working: MemoryState,
}

impl MemoryTx {
    fn record_fetch(&self, problem_id: i32) {
        *self.fetches.lock().unwrap().entry(problem_id).or_default() += 1;
    }
}

#[async_trait]
impl StoreTx for MemoryTx {
    async fn list_problems(&mut self) -> AppResult<Vec<Problem>> {
        Ok(self.working.problems.values().cloned().collect())
    }

    async fn find_problem(&mut self, id: i32) -> AppResult<Option<Problem>> {
        Ok(self.working.problems.get(&id).cloned())
    }

    async fn insert_problem(&mut self, title: &str, description: &str) -> AppResult<Problem> {
        let id = self.working.next_id();
        let problem = Problem {
            id,
            title: title.to_string(),
            description: description.to_string(),
        };
        self.working.problems.insert(id, problem.clone());
        Ok(problem)
    }

    async fn update_problem(&mut self, id: i32, title: &str, description: &str) -> AppResult<u64> {
        match self.working.problems.get_mut(&id) {
            Some(problem) => {
                problem.title = title.to_string();
                problem.description = description.to_string();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_problem(&mut self, id: i32) -> AppResult<u64> {
        let removed = self.working.problems.remove(&id).is_some();
        if removed {
            self.working.test_cases.retain(|_, tc| tc.problem_id != id);
        }
        Ok(removed as u64)
    }

    async fn list_test_cases(&mut self, problem_id: i32) -> AppResult<Vec<TestCase>> {
        self.record_fetch(problem_id);
        Ok(self
            .working
            .test_cases
            .values()
            .filter(|tc| tc.problem_id == problem_id)
            .cloned()
            .collect())
    }

    async fn list_test_cases_for(&mut self, problem_ids: &[i32]) -> AppResult<Vec<TestCase>> {
        for problem_id in problem_ids {
            self.record_fetch(*problem_id);
        }
        let mut cases: Vec<TestCase> = self
            .working
            .test_cases
            .values()
            .filter(|tc| problem_ids.contains(&tc.problem_id))
            .cloned()
            .collect();
        cases.sort_by_key(|tc| (tc.problem_id, tc.id));
        Ok(cases)
    }

    async fn insert_test_case(&mut self, problem_id: i32, fields: &TestCaseFields) -> AppResult<TestCase> {
        if !self.working.problems.contains_key(&problem_id) {
            return Err(AppError::NotFound("Referenced resource not found".to_string()));
        }
        let id = self.working.next_id();
        let test_case = TestCase {
            id,
            problem_id,
            input: fields.input.clone(),
            expected_output: fields.expected_output.clone(),
            comment: fields.comment.clone(),
            score: fields.score,
            timeout_seconds: fields.timeout_seconds,
        };
        self.working.test_cases.insert(id, test_case.clone());
        Ok(test_case)
    }

    async fn update_test_case(&mut self, problem_id: i32, id: i32, fields: &TestCaseFields) -> AppResult<u64> {
        match self.working.test_cases.get_mut(&id) {
            Some(tc) if tc.problem_id == problem_id => {
                tc.input = fields.input.clone();
                tc.expected_output = fields.expected_output.clone();
                tc.comment = fields.comment.clone();
                tc.score = fields.score;
                tc.timeout_seconds = fields.timeout_seconds;
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn delete_test_cases(&mut self, problem_id: i32, ids: &[i32]) -> AppResult<u64> {
        let before = self.working.test_cases.len();
        self.working
            .test_cases
            .retain(|id, tc| !(tc.problem_id == problem_id && ids.contains(id)));
        Ok((before - self.working.test_cases.len()) as u64)
    }

    async fn delete_all_test_cases(&mut self, problem_id: i32) -> AppResult<u64> {
        let before = self.working.test_cases.len();
        self.working.test_cases.retain(|_, tc| tc.problem_id != problem_id);
        Ok((before - self.working.test_cases.len()) as u64)
    }

    async fn insert_submission(&mut self, new: &NewSubmission) -> AppResult<Submission> {
        let id = self.working.next_id();
        let submission = Submission {
            id,
            language: new.language.clone(),
            code: new.code.clone(),
            executed_time: UNJUDGED_EXECUTED_TIME,
            result: NO_RESULT.to_string(),
            problem_id: new.problem_id,
            user_id: new.user_id,
        };
        self.working.submissions.insert(id, submission.clone());
        Ok(submission)
    }

    async fn find_submission(&mut self, id: i32) -> AppResult<Option<Submission>> {
        Ok(self.working.submissions.get(&id).cloned())
    }

    async fn list_unjudged_submissions(&mut self) -> AppResult<Vec<Submission>> {
        Ok(self
            .working
            .submissions
            .values()
            .filter(|s| !s.is_judged())
            .cloned()
            .collect())
    }

    async fn insert_user(&mut self, new: &NewUser) -> AppResult<User> {
        if self.working.users.values().any(|u| u.username == new.username) {
            return Err(AppError::AlreadyExists("Resource already exists".to_string()));
        }
        let id = self.working.next_id();
        let user = User {
            id,
            username: new.username.clone(),
            password_hash: new.password_hash.clone(),
            name: new.name.clone(),
            email: new.email.clone(),
            authority: new.authority,
        };
        self.working.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_user(&mut self, id: i32) -> AppResult<Option<User>> {
        Ok(self.working.users.get(&id).cloned())
    }

    async fn find_user_by_username(&mut self, username: &str) -> AppResult<Option<User>> {
        Ok(self.working.users.values().find(|u| u.username == username).cloned())
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        *self.shared.lock().unwrap() = self.working;
        Ok(())
    }
}

#[derive(Debug)]
struct QueueState {
    pushes: Vec<(String, Vec<u8>)>,
    available: bool,
    /// Go down after this many successful pushes
    fail_after: Option<usize>,
    pings: usize,
    reconnects: usize,
}

/// Queue that records pushes and can be switched off
#[derive(Debug)]
pub struct MemoryQueue {
    state: Mutex<QueueState>,
}

impl Default for MemoryQueue {
    fn default() -> Self {
        Self {
            state: Mutex::new(QueueState {
                pushes: Vec::new(),
                available: true,
                fail_after: None,
                pings: 0,
                reconnects: 0,
            }),
        }
    }
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        let queue = Self::default();
        queue.set_available(false);
        queue
    }

    /// Queue that goes down once `n` payloads were pushed
    pub fn failing_after(n: usize) -> Self {
        let queue = Self::default();
        queue.state.lock().unwrap().fail_after = Some(n);
        queue
    }

    pub fn set_available(&self, available: bool) {
        self.state.lock().unwrap().available = available;
    }

    pub fn pushes(&self) -> Vec<(String, Vec<u8>)> {
        self.state.lock().unwrap().pushes.clone()
    }

    /// Decoded payloads pushed under `key`, oldest first
    pub fn payloads(&self, key: &str) -> Vec<JudgePayload> {
        self.pushes()
            .into_iter()
            .filter(|(k, _)| k == key)
            .map(|(_, bytes)| serde_json::from_slice(&bytes).unwrap())
            .collect()
    }

    pub fn pings(&self) -> usize {
        self.state.lock().unwrap().pings
    }

    pub fn reconnects(&self) -> usize {
        self.state.lock().unwrap().reconnects
    }
}

fn refused() -> QueueError {
    QueueError::Connection("connection refused".to_string())
}

#[async_trait]
impl WorkQueue for MemoryQueue {
    async fn ping(&self) -> Result<(), QueueError> {
        let mut state = self.state.lock().unwrap();
        state.pings += 1;
        if state.available { Ok(()) } else { Err(refused()) }
    }

    async fn reconnect(&self) -> Result<(), QueueError> {
        let mut state = self.state.lock().unwrap();
        state.reconnects += 1;
        if state.available { Ok(()) } else { Err(refused()) }
    }

    async fn push(&self, key: &str, payload: Vec<u8>) -> Result<(), QueueError> {
        let mut state = self.state.lock().unwrap();
        if !state.available {
            return Err(refused());
        }
        state.pushes.push((key.to_string(), payload));
        if state.fail_after == Some(state.pushes.len()) {
            state.available = false;
        }
        Ok(())
    }
}

/// Configuration with short timeouts and near-zero backoff
pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
        },
        database: DatabaseConfig {
            url: "postgres://localhost/onlinejudge_test".to_string(),
            max_connections: 1,
            acquire_timeout: Duration::from_secs(1),
            statement_timeout: Duration::from_secs(1),
        },
        redis: RedisConfig {
            url: "redis://localhost:6379".to_string(),
        },
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            expiry_hours: 1,
        },
        dispatch: DispatchConfig {
            queue_timeout: Duration::from_millis(200),
            max_reconnect_attempts: 2,
            base_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(2),
        },
    }
}

/// Application state over the given fakes
pub fn test_state(store: &MemoryStore, queue: &Arc<MemoryQueue>) -> AppState {
    AppState::new(Arc::new(store.clone()), queue.clone(), test_config())
}
