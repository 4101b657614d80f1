//! # Repository Module
//!
//! Database repository implementations for Labstock.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.   │
//! │                                                                         │
//! │  Service handler                                                        │
//! │       │                                                                 │
//! │       │  db.tickets().redeem("GLOVE_7")                                 │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  TicketRepository                                                       │
//! │  ├── get_by_ticket_id(&self, ticket_id)                                 │
//! │  ├── issue(&self, product_id)                                           │
//! │  └── redeem(&self, ticket_id)       ← one transaction                   │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • SQL is isolated in one place                                         │
//! │  • The read-modify-write sequences get their transaction boundary here  │
//! │  • Easy to test against an in-memory database                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Registry reads, stock adjustment, sequence bump
//! - [`user::UserRepository`] - Account lookup and registration
//! - [`ticket::TicketRepository`] - Ticket issuance and redemption

pub mod product;
pub mod ticket;
pub mod user;
