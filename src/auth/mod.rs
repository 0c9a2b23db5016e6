//! Authentication boundary
//! 令牌签发属于外部身份服务；这里只做校验和 Actor 构造。

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, JwtService};
pub use middleware::{actor_auth_middleware, extract_token, ActorContext};
