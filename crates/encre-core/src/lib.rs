//! encre-core
//!
//! Core building blocks for the encre article pipeline: a thin client around
//! an AI article-generation workflow. The operator supplies a keyword, the
//! workflow engine writes the generated article into a remote datastore, and
//! publication goes back out through a second webhook.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, keyword, article, request, errors）
//! - **ports**: 抽象化レイヤー（GenerationWebhook, PublishWebhook, ArticleStore, Clock, IdGenerator）
//! - **app**: アプリケーションロジック（Pipeline, status views）
//! - **impls**: 実装（HTTP adapters, in-memory stand-ins）
//! - **text**: slug / excerpt / reading-time helpers
//! - **config**: environment-based configuration

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;
pub mod text;
