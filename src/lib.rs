#![doc = include_str!("../README.md")]

#[cfg(feature = "mimalloc")]
use mimalloc::MiMalloc;
#[cfg_attr(feature = "mimalloc", global_allocator)]
#[cfg(feature = "mimalloc")]
static GLOBAL: MiMalloc = MiMalloc;

pub mod codec;
pub mod config;
pub mod coord;
pub mod error;
pub mod matcher;
pub mod network;
pub mod route;
pub mod server;
pub mod trajectory;
#[doc(hidden)]
pub mod util;

#[doc(inline)]
pub use codec::Response;
#[doc(inline)]
pub use config::MatchConfig;
#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use matcher::Matcher;
#[doc(inline)]
pub use network::Network;
#[doc(inline)]
pub use route::MatchResult;
#[doc(inline)]
pub use trajectory::Trajectory;

pub type Result<T> = std::result::Result<T, Error>;
