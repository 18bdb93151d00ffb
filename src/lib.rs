//! Typed parameter binding and row reading over SQLite prepared statements.
//!
//! ```rust
//! use sqlbind::{Connection, Prepared, SqliteConnection};
//!
//! # fn main() -> sqlbind::Result<()> {
//! let connection = SqliteConnection::open_memory()?;
//! connection.execute("CREATE TABLE items (id INTEGER, name TEXT)")?;
//! connection
//!     .prepare_with("INSERT INTO items VALUES (?, ?)", (5, "x"))?
//!     .execute()?;
//!
//! let mut select = connection.prepare("SELECT id, name FROM items")?;
//! let (mut id, mut name) = (0, String::new());
//! while select.next_row()? {
//!     select.read_row((&mut id, &mut name))?;
//! }
//! assert_eq!((id, name.as_str()), (5, "x"));
//! # Ok(())
//! # }
//! ```
pub use sqlbind_core::*;
pub use sqlbind_sqlite::*;
