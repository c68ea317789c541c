//! # Core Application Logic
//!
//! This module contains Eddi's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │    API     │      │  Storage   │
//!     │  Adapter   │      │   Client   │      │ (~/.eddi)  │
//!     │ (ratatui)  │      │ (reqwest)  │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct — all application state in one place
//! - [`action`]: The `Action` enum and `update()` reducer
//! - [`payload`]: Quick-reply button payload parsing
//! - [`config`]: Settings with defaults → file → env → CLI resolution
//! - [`storage`]: Persistent key-value store (token, theme)

pub mod action;
pub mod config;
pub mod payload;
pub mod state;
pub mod storage;
