mod connection;
mod driver;
mod failure;
mod list;
mod param;
mod prepared;
mod slot;
mod status;
mod util;

pub use ::anyhow::Context;
pub use connection::*;
pub use driver::*;
pub use failure::*;
pub use list::*;
pub use param::*;
pub use prepared::*;
pub use slot::*;
pub use status::*;
pub use util::*;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
