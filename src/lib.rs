//! Employee DSS - 员工考核决策支持服务
//!
//! 基于 Actix Web 与 SeaORM 的加权评分与排名引擎。
//!
//! # 架构
//! - `config`: 配置管理
//! - `engine`: 加权聚合、排名与重算并发原语
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 写接口限流中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod config;
pub mod engine;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
