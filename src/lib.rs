//! Biblio - 图书目录服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Author Context: 作者及作者统计
//! - Book Context: 图书
//! - Search: 检索参数规范化与分页
//!
//! 应用层 (application/):
//! - Ports: 仓储端口定义
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful JSON API + 静态前端
//! - Persistence: SQLite 存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
