//! 数据模型模块
//! 访问控制引擎的输入/输出类型与线索业务模型

pub mod actor;
pub mod lead;
pub mod module;
pub mod privacy;
