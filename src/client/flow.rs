// src/client/flow.rs

use std::{
    sync::{Arc, Weak},
    time::Duration,
};

use tokio::{sync::Mutex, task::JoinHandle, time::Instant};

use super::{ClientError, QuizApi};
use crate::models::{
    question::{OPTION_LETTERS, PublicQuestion},
    submission::{AnswerMap, ScoreReport},
};

/// Screen the user is currently looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    Quiz,
    Results,
}

/// What caused the submission of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTrigger {
    User,
    Timeout,
}

/// An in-progress quiz.
struct QuizSheet {
    questions: Vec<PublicQuestion>,
    answers: AnswerMap,
    deadline: Instant,
    /// Countdown task; `None` once it has fired or been disarmed.
    timer: Option<JoinHandle<()>>,
}

struct Completed {
    questions: Vec<PublicQuestion>,
    answers: AnswerMap,
    report: ScoreReport,
    trigger: SubmitTrigger,
}

enum Phase {
    Start,
    Quiz(QuizSheet),
    /// Answers are on their way to the server. Shown as the quiz screen.
    Submitting(QuizSheet),
    Results(Completed),
}

impl Phase {
    fn screen(&self) -> Screen {
        match self {
            Phase::Start => Screen::Start,
            Phase::Quiz(_) | Phase::Submitting(_) => Screen::Quiz,
            Phase::Results(_) => Screen::Results,
        }
    }
}

/// Drives one quiz session: `Start -> Quiz -> Results`, and `Results -> Start` on reset.
///
/// Entering the quiz arms a countdown. When it runs out, the answers collected
/// so far are submitted. The first submission (user or countdown) wins; the
/// countdown is disarmed and any later attempt fails with
/// [`ClientError::AlreadySubmitted`].
pub struct QuizFlow<A> {
    api: A,
    time_limit: Duration,
    phase: Mutex<Phase>,
}

impl<A: QuizApi> QuizFlow<A> {
    pub fn new(api: A, time_limit: Duration) -> Arc<Self> {
        Arc::new(Self {
            api,
            time_limit,
            phase: Mutex::new(Phase::Start),
        })
    }

    /// Fetches the questions, starts with an empty answer sheet and arms the countdown.
    pub async fn start(self: &Arc<Self>) -> Result<(), ClientError> {
        let mut phase = self.phase.lock().await;
        if !matches!(*phase, Phase::Start) {
            return Err(ClientError::InvalidTransition {
                from: phase.screen(),
                action: "start",
            });
        }

        let questions = self.api.fetch_questions().await?;
        tracing::info!("Quiz started with {} questions", questions.len());

        let timer = self.arm_countdown(Arc::downgrade(self));
        *phase = Phase::Quiz(QuizSheet {
            questions,
            answers: AnswerMap::new(),
            deadline: Instant::now() + self.time_limit,
            timer: Some(timer),
        });

        Ok(())
    }

    fn arm_countdown(&self, flow: Weak<Self>) -> JoinHandle<()> {
        let time_limit = self.time_limit;
        tokio::spawn(async move {
            tokio::time::sleep(time_limit).await;
            let Some(flow) = flow.upgrade() else {
                return;
            };
            tracing::info!("Time is up, submitting collected answers");
            match flow.submit_with(SubmitTrigger::Timeout).await {
                Ok(report) => tracing::info!("Forced submission scored {}%", report.score),
                Err(e) => tracing::warn!("Forced submission failed: {}", e),
            }
        })
    }

    /// Records `letter` for `question_id`, replacing an earlier choice.
    pub async fn select_answer(&self, question_id: i64, letter: &str) -> Result<(), ClientError> {
        if !OPTION_LETTERS.contains(&letter) {
            return Err(ClientError::InvalidOption(letter.to_string()));
        }

        let mut phase = self.phase.lock().await;
        let sheet = match &mut *phase {
            Phase::Quiz(sheet) => sheet,
            Phase::Submitting(_) => return Err(ClientError::AlreadySubmitted),
            other => {
                return Err(ClientError::InvalidTransition {
                    from: other.screen(),
                    action: "answer",
                });
            }
        };

        if !sheet.questions.iter().any(|q| q.id == question_id) {
            return Err(ClientError::UnknownQuestion(question_id));
        }

        sheet.answers.insert(question_id.to_string(), letter);
        Ok(())
    }

    /// Submits the current answers on the user's behalf.
    pub async fn submit(&self) -> Result<ScoreReport, ClientError> {
        self.submit_with(SubmitTrigger::User).await
    }

    async fn submit_with(&self, trigger: SubmitTrigger) -> Result<ScoreReport, ClientError> {
        let answers = {
            let mut phase = self.phase.lock().await;
            let mut sheet = match std::mem::replace(&mut *phase, Phase::Start) {
                Phase::Quiz(sheet) => sheet,
                other => {
                    let err = match other {
                        Phase::Submitting(_) | Phase::Results(_) => ClientError::AlreadySubmitted,
                        _ => ClientError::InvalidTransition {
                            from: other.screen(),
                            action: "submit",
                        },
                    };
                    *phase = other;
                    return Err(err);
                }
            };

            // The countdown task runs this very method on timeout, so it is only
            // aborted when someone else submits.
            if let Some(timer) = sheet.timer.take() {
                if trigger == SubmitTrigger::User {
                    timer.abort();
                }
            }

            let answers = sheet.answers.clone();
            *phase = Phase::Submitting(sheet);
            answers
        };

        let outcome = self.api.submit(&answers).await;

        let mut phase = self.phase.lock().await;
        let sheet = match std::mem::replace(&mut *phase, Phase::Start) {
            Phase::Submitting(sheet) => sheet,
            // Only this method leaves the Submitting phase.
            other => {
                *phase = other;
                return outcome;
            }
        };

        match outcome {
            Ok(report) => {
                *phase = Phase::Results(Completed {
                    questions: sheet.questions,
                    answers: sheet.answers,
                    report: report.clone(),
                    trigger,
                });
                Ok(report)
            }
            Err(e) => {
                // Back to the quiz so the user can retry; the countdown stays disarmed.
                tracing::warn!("Submission failed: {}", e);
                *phase = Phase::Quiz(sheet);
                Err(e)
            }
        }
    }

    /// Leaves the results screen and forgets everything about the finished session.
    pub async fn reset(&self) -> Result<(), ClientError> {
        let mut phase = self.phase.lock().await;
        if !matches!(*phase, Phase::Results(_)) {
            return Err(ClientError::InvalidTransition {
                from: phase.screen(),
                action: "reset",
            });
        }
        *phase = Phase::Start;
        Ok(())
    }

    pub async fn screen(&self) -> Screen {
        self.phase.lock().await.screen()
    }

    pub async fn is_submitting(&self) -> bool {
        matches!(*self.phase.lock().await, Phase::Submitting(_))
    }

    /// Time left on the countdown, `None` while no countdown is armed.
    ///
    /// The countdown is disarmed once a submission starts and stays disarmed
    /// if that submission fails.
    pub async fn time_remaining(&self) -> Option<Duration> {
        match &*self.phase.lock().await {
            Phase::Quiz(sheet) if sheet.timer.is_some() => {
                Some(sheet.deadline.saturating_duration_since(Instant::now()))
            }
            _ => None,
        }
    }

    pub async fn questions(&self) -> Vec<PublicQuestion> {
        match &*self.phase.lock().await {
            Phase::Quiz(sheet) | Phase::Submitting(sheet) => sheet.questions.clone(),
            Phase::Results(done) => done.questions.clone(),
            Phase::Start => Vec::new(),
        }
    }

    pub async fn answers(&self) -> AnswerMap {
        match &*self.phase.lock().await {
            Phase::Quiz(sheet) | Phase::Submitting(sheet) => sheet.answers.clone(),
            Phase::Results(done) => done.answers.clone(),
            Phase::Start => AnswerMap::new(),
        }
    }

    pub async fn report(&self) -> Option<ScoreReport> {
        match &*self.phase.lock().await {
            Phase::Results(done) => Some(done.report.clone()),
            _ => None,
        }
    }

    /// How the finished session was submitted.
    pub async fn submitted_by(&self) -> Option<SubmitTrigger> {
        match &*self.phase.lock().await {
            Phase::Results(done) => Some(done.trigger),
            _ => None,
        }
    }
}
