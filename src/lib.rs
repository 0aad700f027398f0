//! Marketplace backend library.
//!
//! HTTP controllers for product listings and chat messaging over a
//! MongoDB document store.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────────┐
//!                    │               MARKETPLACE BACKEND              │
//!                    │                                                │
//!   Client Request   │  ┌────────┐   ┌───────────────┐   ┌─────────┐ │
//!   ─────────────────┼─▶│  http  │──▶│ products/chat │──▶│   db    │─┼──▶ MongoDB
//!                    │  │ server │   │   handlers    │   │ (bson)  │ │
//!                    │  └────────┘   └──────┬────────┘   └─────────┘ │
//!                    │                      │                        │
//!                    │                      ├──▶ postal (lookup APIs)│
//!                    │                      └──▶ images (local dir)  │
//!                    │                                                │
//!                    │  ┌──────────────────────────────────────────┐ │
//!                    │  │         Cross-Cutting Concerns            │ │
//!                    │  │  config │ observability │ lifecycle       │ │
//!                    │  └──────────────────────────────────────────┘ │
//!                    └───────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod db;
pub mod http;

// Domain
pub mod chat;
pub mod hashtags;
pub mod products;
pub mod search;
pub mod users;

// Integrations
pub mod images;
pub mod postal;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
