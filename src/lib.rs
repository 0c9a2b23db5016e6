//! 线索管理系统库
//! 访问控制引擎（模块目录、路由门、可见性策略）与承载它的服务

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod telemetry;
