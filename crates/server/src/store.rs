//! Entity model and persistence for users, lessons, and reading sessions.
//!
//! Backed by concurrent in-memory maps so the server is self-contained in
//! development and tests. In production this would sit on a relational
//! database behind the same method surface.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

/// Store error types
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("email already registered: {0}")]
    DuplicateEmail(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Account role. Controls which routes may act on whose data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Parent,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Role::Student
    }
}

/// A registered account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    /// `salt$digest`, both hex. Never serialized to clients; the routes
    /// only expose the `UserOut` projection.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// A lesson passage students read aloud
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub reading_level: String,
    pub created_at: DateTime<Utc>,
}

/// One scored reading attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingSession {
    pub id: u64,
    pub user_id: u64,
    pub lesson_id: u64,
    pub spoken_text: String,
    pub wpm: u32,
    pub accuracy: f64,
    pub error_words: Vec<String>,
    pub recommendation: String,
    pub created_at: DateTime<Utc>,
}

/// Concurrent in-memory store shared across request handlers
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: DashMap<u64, User>,
    users_by_email: DashMap<String, u64>,
    lessons: DashMap<u64, Lesson>,
    sessions: DashMap<u64, ReadingSession>,
    /// parent id -> linked student ids
    parent_links: DashMap<u64, HashSet<u64>>,
    next_user_id: AtomicU64,
    next_lesson_id: AtomicU64,
    next_session_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- users -----------------------------------------------------------

    /// Insert a new user. Fails if the email is already registered.
    pub fn create_user(
        &self,
        email: String,
        password_hash: String,
        full_name: Option<String>,
        role: Role,
    ) -> StoreResult<User> {
        use dashmap::mapref::entry::Entry;

        match self.users_by_email.entry(email.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateEmail(email)),
            Entry::Vacant(slot) => {
                let id = self.next_user_id.fetch_add(1, Ordering::Relaxed) + 1;
                let user = User {
                    id,
                    email,
                    password_hash,
                    full_name,
                    role,
                    created_at: Utc::now(),
                };
                self.users.insert(id, user.clone());
                slot.insert(id);
                Ok(user)
            }
        }
    }

    pub fn user(&self, id: u64) -> StoreResult<User> {
        self.users
            .get(&id)
            .map(|u| u.clone())
            .ok_or(StoreError::NotFound("User"))
    }

    pub fn user_by_email(&self, email: &str) -> StoreResult<User> {
        let id = self
            .users_by_email
            .get(email)
            .map(|id| *id)
            .ok_or(StoreError::NotFound("User"))?;
        self.user(id)
    }

    // ---- lessons ---------------------------------------------------------

    pub fn create_lesson(
        &self,
        title: String,
        content: String,
        reading_level: String,
    ) -> Lesson {
        let id = self.next_lesson_id.fetch_add(1, Ordering::Relaxed) + 1;
        let lesson = Lesson {
            id,
            title,
            content,
            reading_level,
            created_at: Utc::now(),
        };
        self.lessons.insert(id, lesson.clone());
        lesson
    }

    pub fn lesson(&self, id: u64) -> StoreResult<Lesson> {
        self.lessons
            .get(&id)
            .map(|l| l.clone())
            .ok_or(StoreError::NotFound("Lesson"))
    }

    /// All lessons ordered by id
    pub fn lessons(&self) -> Vec<Lesson> {
        let mut all: Vec<Lesson> = self.lessons.iter().map(|l| l.clone()).collect();
        all.sort_by_key(|l| l.id);
        all
    }

    /// Apply a partial update; `None` fields keep their current value.
    pub fn update_lesson(
        &self,
        id: u64,
        title: Option<String>,
        content: Option<String>,
        reading_level: Option<String>,
    ) -> StoreResult<Lesson> {
        let mut lesson = self
            .lessons
            .get_mut(&id)
            .ok_or(StoreError::NotFound("Lesson"))?;
        if let Some(title) = title {
            lesson.title = title;
        }
        if let Some(content) = content {
            lesson.content = content;
        }
        if let Some(level) = reading_level {
            lesson.reading_level = level;
        }
        Ok(lesson.clone())
    }

    pub fn delete_lesson(&self, id: u64) -> StoreResult<()> {
        self.lessons
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound("Lesson"))
    }

    // ---- reading sessions ------------------------------------------------

    pub fn create_session(
        &self,
        user_id: u64,
        lesson_id: u64,
        spoken_text: String,
        wpm: u32,
        result: &lexilearn::ScoreResult,
    ) -> ReadingSession {
        let id = self.next_session_id.fetch_add(1, Ordering::Relaxed) + 1;
        let session = ReadingSession {
            id,
            user_id,
            lesson_id,
            spoken_text,
            wpm,
            accuracy: result.accuracy,
            error_words: result.error_words.clone(),
            recommendation: result.recommendation.clone(),
            created_at: Utc::now(),
        };
        self.sessions.insert(id, session.clone());
        session
    }

    pub fn session(&self, id: u64) -> StoreResult<ReadingSession> {
        self.sessions
            .get(&id)
            .map(|s| s.clone())
            .ok_or(StoreError::NotFound("Session"))
    }

    /// All sessions for one user ordered by id
    pub fn sessions_for_user(&self, user_id: u64) -> Vec<ReadingSession> {
        let mut all: Vec<ReadingSession> = self
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id)
            .map(|s| s.clone())
            .collect();
        all.sort_by_key(|s| s.id);
        all
    }

    // ---- parent links ----------------------------------------------------

    pub fn link_student(&self, parent_id: u64, student_id: u64) {
        self.parent_links
            .entry(parent_id)
            .or_default()
            .insert(student_id);
    }

    pub fn students_of(&self, parent_id: u64) -> Vec<User> {
        let Some(ids) = self.parent_links.get(&parent_id) else {
            return Vec::new();
        };
        let mut students: Vec<User> = ids
            .iter()
            .filter_map(|id| self.users.get(id).map(|u| u.clone()))
            .collect();
        students.sort_by_key(|u| u.id);
        students
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_email_is_rejected() {
        let store = MemoryStore::new();
        store
            .create_user("kid@example.com".into(), "h".into(), None, Role::Student)
            .unwrap();
        let err = store
            .create_user("kid@example.com".into(), "h".into(), None, Role::Student)
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail(_)));
    }

    #[test]
    fn lesson_partial_update_keeps_unset_fields() {
        let store = MemoryStore::new();
        let lesson = store.create_lesson("Title".into(), "Content".into(), "basic".into());
        let updated = store
            .update_lesson(lesson.id, Some("New title".into()), None, None)
            .unwrap();
        assert_eq!(updated.title, "New title");
        assert_eq!(updated.content, "Content");
        assert_eq!(updated.reading_level, "basic");
    }

    #[test]
    fn sessions_are_listed_per_user_in_order() {
        let store = MemoryStore::new();
        let result = lexilearn::score("a b", "a b c");
        store.create_session(1, 1, "a b".into(), 1, &result);
        store.create_session(2, 1, "a b".into(), 1, &result);
        store.create_session(1, 1, "a b".into(), 1, &result);

        let sessions = store.sessions_for_user(1);
        assert_eq!(sessions.len(), 2);
        assert!(sessions[0].id < sessions[1].id);
    }

    #[test]
    fn parent_links_resolve_to_users() {
        let store = MemoryStore::new();
        let parent = store
            .create_user("p@example.com".into(), "h".into(), None, Role::Parent)
            .unwrap();
        let student = store
            .create_user("s@example.com".into(), "h".into(), None, Role::Student)
            .unwrap();
        store.link_student(parent.id, student.id);

        let students = store.students_of(parent.id);
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].id, student.id);
        assert!(store.students_of(student.id).is_empty());
    }

    #[test]
    fn missing_rows_surface_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(store.lesson(99), Err(StoreError::NotFound(_))));
        assert!(matches!(store.session(99), Err(StoreError::NotFound(_))));
        assert!(matches!(store.delete_lesson(99), Err(StoreError::NotFound(_))));
    }
}
