#[cfg(feature = "ssr")]
mod cache;
#[cfg(feature = "ssr")]
pub(crate) mod graphql;
mod me;

#[cfg(feature = "ssr")]
pub use cache::*;
#[cfg(feature = "ssr")]
pub use graphql::*;
pub use me::*;
