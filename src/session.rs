use std::collections::BTreeSet;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::errors::AppError;
use crate::models::domain::{AccessTier, Quiz, QuizAttempt, UserProfile};
use crate::services::grading_service::{GradeReport, GradingService};

/// Lifecycle of one quiz run. `AccessDenied` and `Error` are terminal and
/// reachable only from the load step; `Finished` is the single terminal
/// success state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Ready,
    InProgress,
    Submitting,
    Finished,
    AccessDenied,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    Tick,
}

/// Repeating one-second pulse backing a timed session. The task has exactly
/// one disposal path: `cancel`, invoked both on natural completion
/// (submission) and on early teardown (drop).
pub struct Countdown {
    handle: Option<JoinHandle<()>>,
}

impl Countdown {
    fn start(sender: mpsc::UnboundedSender<SessionEvent>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(std::time::Duration::from_secs(1));
            interval.tick().await; // consume the immediate first tick
            loop {
                interval.tick().await;
                if sender.send(SessionEvent::Tick).is_err() {
                    break;
                }
            }
        });

        Self {
            handle: Some(handle),
        }
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Client-side controller for one run of one quiz by one user. Owns the
/// accumulated answers, the navigation cursor and the optional countdown;
/// nothing here touches the network, so grading at submission is always
/// possible from local state.
pub struct QuizSession {
    quiz: Option<Quiz>,
    error: Option<String>,
    state: SessionState,
    current_index: usize,
    answers: Vec<BTreeSet<String>>,
    remaining_seconds: Option<i64>,
    report: Option<GradeReport>,
    countdown: Option<Countdown>,
}

impl QuizSession {
    /// Resolve the load step: a fetched quiz moves to `Ready` unless the
    /// access gate fails; a fetch error lands in the terminal `Error` state.
    pub fn load(fetched: Result<Quiz, AppError>, profile: &UserProfile) -> Self {
        match fetched {
            Ok(quiz) => {
                let state = if quiz.access_type == AccessTier::Premium
                    && !profile.has_premium_access()
                {
                    SessionState::AccessDenied
                } else {
                    SessionState::Ready
                };

                let answers = vec![BTreeSet::new(); quiz.questions.len()];

                Self {
                    quiz: Some(quiz),
                    error: None,
                    state,
                    current_index: 0,
                    answers,
                    remaining_seconds: None,
                    report: None,
                    countdown: None,
                }
            }
            Err(error) => Self {
                quiz: None,
                error: Some(error.to_string()),
                state: SessionState::Error,
                current_index: 0,
                answers: Vec::new(),
                remaining_seconds: None,
                report: None,
                countdown: None,
            },
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn remaining_seconds(&self) -> Option<i64> {
        self.remaining_seconds
    }

    pub fn report(&self) -> Option<&GradeReport> {
        self.report.as_ref()
    }

    /// Enter the first question. Arms the countdown clock for timed quizzes;
    /// untimed quizzes run without one.
    pub fn start(&mut self) -> bool {
        if self.state != SessionState::Ready {
            return false;
        }

        self.remaining_seconds = self
            .quiz
            .as_ref()
            .and_then(|quiz| quiz.duration_minutes)
            .map(|minutes| minutes * 60);
        self.state = SessionState::InProgress;
        true
    }

    /// Spawn the real-time pulse for a timed session. The caller forwards
    /// each received event into `tick`. Returns `None` for untimed sessions
    /// or outside `InProgress`.
    pub fn arm_countdown(&mut self) -> Option<mpsc::UnboundedReceiver<SessionEvent>> {
        if self.state != SessionState::InProgress || self.remaining_seconds.is_none() {
            return None;
        }

        let (sender, receiver) = mpsc::unbounded_channel();
        self.countdown = Some(Countdown::start(sender));
        Some(receiver)
    }

    pub fn current_question_text(&self) -> Option<&str> {
        let quiz = self.quiz.as_ref()?;
        quiz.questions
            .get(self.current_index)
            .map(|question| question.text.as_str())
    }

    /// Toggle membership of one option text in the current answer set. Every
    /// question is multi-select; there is no single-choice mode.
    pub fn toggle_option(&mut self, option: &str) -> bool {
        if self.state != SessionState::InProgress {
            return false;
        }

        let Some(selected) = self.answers.get_mut(self.current_index) else {
            return false;
        };

        if !selected.remove(option) {
            selected.insert(option.to_string());
        }
        true
    }

    pub fn selected_options(&self) -> Option<&BTreeSet<String>> {
        self.answers.get(self.current_index)
    }

    /// A question must have at least one selection before `next` or a
    /// manual submit is allowed.
    pub fn current_answered(&self) -> bool {
        self.answers
            .get(self.current_index)
            .is_some_and(|selected| !selected.is_empty())
    }

    pub fn next(&mut self) -> bool {
        if self.state != SessionState::InProgress || !self.current_answered() {
            return false;
        }
        if self.current_index + 1 >= self.answers.len() {
            return false;
        }
        self.current_index += 1;
        true
    }

    pub fn previous(&mut self) -> bool {
        if self.state != SessionState::InProgress || self.current_index == 0 {
            return false;
        }
        self.current_index -= 1;
        true
    }

    /// Advance the clock by one second. Reaching zero submits exactly as if
    /// the user had pressed finish, without the answered-question guard.
    pub fn tick(&mut self) {
        if self.state != SessionState::InProgress {
            return;
        }

        if let Some(remaining) = self.remaining_seconds {
            let remaining = remaining - 1;
            self.remaining_seconds = Some(remaining.max(0));
            if remaining <= 0 {
                self.finish();
            }
        }
    }

    /// Manual submission from the last (or any) question. Refused while the
    /// current question is unanswered; idempotent once a submission ran.
    pub fn submit(&mut self) -> bool {
        if self.state != SessionState::InProgress || !self.current_answered() {
            return false;
        }
        self.finish();
        true
    }

    /// Build the immutable attempt record from the finished run. Persisting
    /// it is the caller's separate, fallible step; its failure never takes
    /// the shown score away.
    pub fn build_attempt(&self, user_id: &str) -> Option<QuizAttempt> {
        let quiz = self.quiz.as_ref()?;
        let report = self.report.as_ref()?;
        Some(GradingService::build_attempt(user_id, quiz, report.clone()))
    }

    fn finish(&mut self) {
        // Re-entry guard: only an in-progress run can submit.
        if self.state != SessionState::InProgress {
            return;
        }
        self.state = SessionState::Submitting;

        // Cancelling the countdown is the first step of submission.
        if let Some(mut countdown) = self.countdown.take() {
            countdown.cancel();
        }

        if let Some(quiz) = self.quiz.as_ref() {
            self.report = Some(GradingService::grade(&quiz.questions, &self.answers));
        }
        self.state = SessionState::Finished;
    }
}
