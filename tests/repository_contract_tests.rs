use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::sync::RwLock;

use concours_server::{
    db::Subscription,
    errors::{AppError, AppResult},
    models::domain::{AccessTier, Difficulty, Question, Quiz, QuizAttempt, UserProfile},
    repositories::{QuizAttemptRepository, QuizRepository, UserProfileRepository},
    services::AttemptService,
};

#[derive(Clone, Default)]
struct InMemoryQuizRepository {
    quizzes: Arc<RwLock<HashMap<String, Quiz>>>,
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.get(id).cloned())
    }

    async fn list_quizzes(&self, offset: i64, limit: i64) -> AppResult<(Vec<Quiz>, i64)> {
        let quizzes = self.quizzes.read().await;
        let mut items: Vec<_> = quizzes.values().cloned().collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));

        let total = items.len() as i64;
        let start = offset.max(0) as usize;
        let end = (start + limit.max(0) as usize).min(items.len());

        let page = if start >= items.len() {
            vec![]
        } else {
            items[start..end].to_vec()
        };

        Ok((page, total))
    }

    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        if quizzes.contains_key(&quiz.id) {
            return Err(AppError::Database(format!(
                "duplicate quiz id '{}'",
                quiz.id
            )));
        }
        quizzes.insert(quiz.id.clone(), quiz.clone());
        Ok(quiz)
    }

    async fn update(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        quizzes.insert(quiz.id.clone(), quiz.clone());
        Ok(quiz)
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let mut quizzes = self.quizzes.write().await;
        Ok(quizzes.remove(id).is_some())
    }

    fn subscribe_all(&self, poll_interval: Duration) -> Subscription<Vec<Quiz>> {
        let quizzes = self.quizzes.clone();
        Subscription::spawn(poll_interval, move || {
            let quizzes = quizzes.clone();
            async move {
                let snapshot = quizzes.read().await;
                let mut items: Vec<_> = snapshot.values().cloned().collect();
                items.sort_by(|a, b| a.id.cmp(&b.id));
                Some(items)
            }
        })
    }
}

#[derive(Clone, Default)]
struct InMemoryQuizAttemptRepository {
    attempts: Arc<RwLock<HashMap<String, QuizAttempt>>>,
}

#[async_trait]
impl QuizAttemptRepository for InMemoryQuizAttemptRepository {
    async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt> {
        let mut attempts = self.attempts.write().await;
        attempts.insert(attempt.id.clone(), attempt.clone());
        Ok(attempt)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizAttempt>> {
        let attempts = self.attempts.read().await;
        Ok(attempts.get(id).cloned())
    }

    async fn get_user_attempts(
        &self,
        user_id: &str,
        quiz_id: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<QuizAttempt>, i64)> {
        let attempts = self.attempts.read().await;
        let mut items: Vec<_> = attempts
            .values()
            .filter(|attempt| attempt.user_id == user_id)
            .filter(|attempt| quiz_id.map_or(true, |qid| attempt.quiz_id == qid))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = items.len() as i64;
        let start = offset.max(0) as usize;
        let end = (start + limit.max(0) as usize).min(items.len());

        let page = if start >= items.len() {
            vec![]
        } else {
            items[start..end].to_vec()
        };

        Ok((page, total))
    }
}

#[derive(Clone, Default)]
struct InMemoryUserProfileRepository {
    profiles: Arc<RwLock<HashMap<String, UserProfile>>>,
}

#[async_trait]
impl UserProfileRepository for InMemoryUserProfileRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<UserProfile>> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(id).cloned())
    }

    async fn upsert(&self, profile: UserProfile) -> AppResult<UserProfile> {
        let mut profiles = self.profiles.write().await;
        profiles.insert(profile.id.clone(), profile.clone());
        Ok(profile)
    }
}

fn sample_question(text: &str, correct: &str) -> Question {
    Question {
        text: text.to_string(),
        options: vec![
            correct.to_string(),
            "B".to_string(),
            "C".to_string(),
            "D".to_string(),
        ],
        correct_answers: vec![correct.to_string()],
        explanation: Some(format!("La bonne reponse est : {correct}.")),
    }
}

fn sample_quiz(access_type: AccessTier) -> Quiz {
    Quiz::new(
        "Concours blanc",
        "Entrainement",
        "culture",
        Difficulty::Moyen,
        access_type,
        None,
        vec![sample_question("Q1", "A"), sample_question("Q2", "A")],
    )
}

fn premium_profile(id: &str) -> UserProfile {
    let mut profile = UserProfile::free(id, "Candidate");
    profile.subscription.tier = AccessTier::Premium;
    profile
}

#[actix_web::test]
async fn quiz_repository_create_find_delete_contract() {
    let repository = InMemoryQuizRepository::default();
    let quiz = sample_quiz(AccessTier::Free);
    let quiz_id = quiz.id.clone();

    repository.create(quiz).await.expect("create should succeed");

    let found = repository
        .find_by_id(&quiz_id)
        .await
        .expect("find should succeed")
        .expect("quiz should exist");
    assert_eq!(found.id, quiz_id);

    assert!(repository.delete(&quiz_id).await.expect("delete should run"));
    assert!(!repository.delete(&quiz_id).await.expect("second delete should run"));
    assert!(repository
        .find_by_id(&quiz_id)
        .await
        .expect("find should succeed")
        .is_none());
}

#[actix_web::test]
async fn quiz_repository_list_pages_results() {
    let repository = InMemoryQuizRepository::default();
    for _ in 0..5 {
        repository
            .create(sample_quiz(AccessTier::Free))
            .await
            .expect("create should succeed");
    }

    let (page, total) = repository
        .list_quizzes(0, 3)
        .await
        .expect("list should succeed");
    assert_eq!(page.len(), 3);
    assert_eq!(total, 5);

    let (rest, _) = repository
        .list_quizzes(3, 3)
        .await
        .expect("list should succeed");
    assert_eq!(rest.len(), 2);
}

#[actix_web::test]
async fn quiz_subscription_sees_later_writes() {
    let repository = InMemoryQuizRepository::default();
    let mut subscription = repository.subscribe_all(Duration::from_millis(5));

    let empty = subscription
        .next_snapshot()
        .await
        .expect("first snapshot should arrive");
    assert!(empty.is_empty());

    repository
        .create(sample_quiz(AccessTier::Free))
        .await
        .expect("create should succeed");

    // Each delivery is a full snapshot, so a later one must contain the
    // newly written quiz.
    loop {
        let snapshot = subscription
            .next_snapshot()
            .await
            .expect("feed should stay open");
        if snapshot.len() == 1 {
            break;
        }
    }

    subscription.unsubscribe();
    assert!(!subscription.is_active());
}

#[actix_web::test]
async fn profile_repository_upsert_contract() {
    let repository = InMemoryUserProfileRepository::default();

    let profile = UserProfile::free("user-1", "Awa");
    repository
        .upsert(profile.clone())
        .await
        .expect("upsert should succeed");

    let found = repository
        .find_by_id("user-1")
        .await
        .expect("find should succeed")
        .expect("profile should exist");
    assert!(!found.has_premium_access());

    repository
        .upsert(premium_profile("user-1"))
        .await
        .expect("upsert should succeed");

    let upgraded = repository
        .find_by_id("user-1")
        .await
        .expect("find should succeed")
        .expect("profile should exist");
    assert!(upgraded.has_premium_access());
}

#[actix_web::test]
async fn attempt_service_records_graded_attempt() {
    let attempts = Arc::new(InMemoryQuizAttemptRepository::default());
    let profiles = Arc::new(InMemoryUserProfileRepository::default());
    let service = AttemptService::new(attempts.clone(), profiles);

    let quiz = sample_quiz(AccessTier::Free);
    let attempt = service
        .submit_attempt(
            "user-1",
            &quiz,
            vec![vec!["A".to_string()], vec!["B".to_string()]],
        )
        .await
        .expect("submission should succeed");

    assert_eq!(attempt.correct_count, 1);
    assert_eq!(attempt.score, 50);

    let stored = attempts
        .find_by_id(&attempt.id)
        .await
        .expect("find should succeed")
        .expect("attempt should be stored");
    assert_eq!(stored, attempt);

    let (listed, total) = service
        .get_user_attempts("user-1", Some(&quiz.id), 0, 10)
        .await
        .expect("list should succeed");
    assert_eq!(total, 1);
    assert_eq!(listed[0].quiz_title, "Concours blanc");
}

#[actix_web::test]
async fn attempt_service_gates_premium_quiz() {
    let attempts = Arc::new(InMemoryQuizAttemptRepository::default());
    let profiles = Arc::new(InMemoryUserProfileRepository::default());

    profiles
        .upsert(UserProfile::free("free-user", "Ib"))
        .await
        .expect("upsert should succeed");
    profiles
        .upsert(premium_profile("premium-user"))
        .await
        .expect("upsert should succeed");

    let service = AttemptService::new(attempts, profiles);
    let quiz = sample_quiz(AccessTier::Premium);

    let denied = service
        .submit_attempt("free-user", &quiz, vec![vec!["A".to_string()]])
        .await;
    assert!(matches!(denied, Err(AppError::Permission(_))));

    let allowed = service
        .submit_attempt("premium-user", &quiz, vec![vec!["A".to_string()]])
        .await;
    assert!(allowed.is_ok());
}
