//! HTTP 处理器模块

pub mod health;
pub mod lead;
pub mod metrics;
pub mod navigation;
pub mod privacy;
