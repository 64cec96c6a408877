//! LexiLearn Server - HTTP REST API for the reading tutor
//!
//! This crate exposes the LexiLearn scoring core over a REST API. It
//! supports:
//!
//! - **Accounts**: Signup, login, and JWT-authenticated profiles
//! - **Lessons**: CRUD over the passages students read aloud
//! - **Reading Sessions**: Transcript submission, accuracy scoring, and
//!   per-user history
//! - **Parent Progress**: Linked students and averaged metrics
//! - **Chat Relay**: Optional pass-through to an external reply service
//!
//! # Features
//!
//! - **Authentication**: Bearer-token auth with per-user rate limiting
//! - **Middleware**: Compression, CORS, request ID tracking, structured logging
//! - **Configuration**: Environment variable and file-based configuration
//! - **Error Handling**: JSON error responses with stable error codes
//! - **Graceful Shutdown**: Proper signal handling for production deployments
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! ## Public Endpoints (No Authentication)
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `POST /auth/signup` - Register an account
//! - `POST /auth/login` - Exchange credentials for a token
//!
//! ## Protected Endpoints (Bearer Token Required)
//!
//! - `GET /api/v1/users/me` - Authenticated profile
//! - `POST /api/v1/lessons` - Create lesson
//! - `GET /api/v1/lessons` - List lessons
//! - `GET|PUT|DELETE /api/v1/lessons/{id}` - Lesson by id
//! - `POST /api/v1/sessions` - Submit and score a reading
//! - `GET /api/v1/sessions/{id}` - Session by id
//! - `GET /api/v1/sessions/user/{id}` - Sessions for a user
//! - `POST /api/v1/parents/{parent_id}/students/{student_id}` - Link student
//! - `GET /api/v1/parents/{parent_id}/students` - Linked students
//! - `GET /api/v1/parents/students/{student_id}/progress` - Progress roll-up
//! - `POST /api/v1/chat` - Relay a chat message

pub mod auth;
pub mod chat;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::AppState;
