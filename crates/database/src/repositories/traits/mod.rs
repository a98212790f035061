//! 数据库仓库 trait 定义
//!
//! 这里定义了各种数据库仓库的抽象接口
//!
//! ## Repository Trait 设计模式 🎯
//!
//! 所有 Repository trait 都遵循统一的约束：
//!
//! ```rust,ignore
//! pub trait XxxRepositoryTrait: Send + Sync + Clone + 'static {
//!     // 异步方法定义...
//! }
//! ```
//!
//! - `Send` / `Sync`: 同一个仓库实例会被多个并发请求在不同线程中访问
//! - `Clone`: 服务层持有仓库的副本，克隆必须廉价（内部是连接池或 `Arc`）
//! - `'static`: 仓库作为应用服务长期运行，不依赖短期引用
//!
//! 同一个 trait 有两种实现：
//!
//! ```rust,ignore
//! // 线上环境
//! let repo = ProjectRepository::new(pool.clone());
//!
//! // 本地调试/测试，不需要数据库
//! let repo = MemoryProjectRepository::new();
//! ```
//!
//! 服务层通过泛型参数接收仓库，编译期确定具体类型。

pub mod project;

// 重新导出
pub use project::ProjectRepositoryTrait;
