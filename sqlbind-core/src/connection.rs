use crate::{Driver, Params, Prepared, Result};

/// An open database handle producing [`Prepared`] statements.
///
/// Statements borrow the connection, it cannot be closed or dropped while one
/// of them is alive.
pub trait Connection: Sized {
    type Driver: Driver;
    /// `Default` is the inert statement left behind by [`std::mem::take`].
    type Prepared<'c>: Prepared + Default
    where
        Self: 'c;

    /// Open a connection from a url in the form `<driver name>://<location>`.
    fn connect(url: &str) -> Result<Self>;

    /// Compile a single statement. Any trailing SQL text is ignored.
    fn prepare(&self, sql: &str) -> Result<Self::Prepared<'_>>;

    /// Compile a statement and bind the parameters starting from the first
    /// placeholder.
    fn prepare_with<P: Params>(&self, sql: &str, params: P) -> Result<Self::Prepared<'_>> {
        let mut statement = self.prepare(sql)?;
        statement.bind(params)?;
        Ok(statement)
    }

    /// Run one or more statements without returning rows.
    fn execute(&self, sql: &str) -> Result<()>;

    /// Close the handle. On failure the handle is kept and the call can be retried.
    fn close(&mut self) -> Result<()>;
}
