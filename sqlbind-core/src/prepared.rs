use crate::{AsParam, AsSlot, Outcome, Outputs, Params, Result, Status};
use std::fmt::Display;

/// A prepared statement exclusively owning its engine handle.
///
/// # Cursors
/// A statement keeps two independent counters:
/// * The bind cursor is the last 1-based placeholder filled by [`Prepared::bind`].
///   It starts at 0 and is never reset implicitly, a second `bind` call continues
///   after the parameters bound by the first one. It advances by one for every
///   argument visited, before the argument is bound, even when binding fails.
///   [`Prepared::bind_at`] bypasses it. [`Prepared::clear_bindings`] rewinds it.
/// * The read cursor is the last 0-based column read by [`Prepared::read_row`].
///   It is reset to `-1` at the start of every `read_row` call and advances by
///   one for every output visited.
///
/// Bind and read chains stop at the first failure and return it. Positions
/// processed before the failure keep their effect.
///
/// # Iteration
/// Two conventions are supported, do not mix them on the same statement:
/// ```rust,ignore
/// // Step then check: `next_row` reports whether a row is staged.
/// while stmt.next_row()? {
///     stmt.read_row((&mut id, &mut name))?;
/// }
///
/// // Read then pre-fetch: `execute` stages the first row, every `read` consumes
/// // the staged row and steps to the following one.
/// stmt.execute()?;
/// while stmt.has_row() {
///     stmt.read((&mut id, &mut name))?;
/// }
/// ```
/// Modelling `read` as if it were `next_row` double counts rows.
pub trait Prepared: Display {
    /// Bind every argument to the placeholder following the bind cursor.
    fn bind<P: Params>(&mut self, params: P) -> Result<&mut Self>;
    /// Bind a single value at a 1-based placeholder, the bind cursor is untouched.
    fn bind_at<V: AsParam>(&mut self, index: i32, value: V) -> Result<&mut Self>;
    /// Advance the statement by one engine step.
    fn execute(&mut self) -> Result<Outcome>;
    /// Read the current row into the outputs, starting from column 0.
    fn read_row<O: Outputs>(&mut self, outputs: O) -> Result<()>;
    /// Read a single 0-based column of the current row, the read cursor is untouched.
    fn read_row_at<S: AsSlot>(&mut self, index: i32, output: S) -> Result<()>;
    /// Step unless a row was just staged by `execute`, return whether a row is available.
    fn next_row(&mut self) -> Result<bool>;
    /// Rewind the statement so it can be executed again, bindings are kept.
    fn reset(&mut self) -> Result<()>;
    /// Set every parameter back to NULL and rewind the bind cursor.
    fn clear_bindings(&mut self) -> Result<()>;
    /// Release the engine handle. Calling it again is a no-op.
    fn finalize(&mut self) -> Result<()>;

    fn bind_cursor(&self) -> i32;
    fn read_cursor(&self) -> i32;
    fn status(&self) -> Status;
    /// Whether the handle is still owned (not finalized nor moved out).
    fn is_valid(&self) -> bool;

    fn column_count(&self) -> Result<i32>;
    fn column_name(&self, index: i32) -> Result<String>;
    /// 1-based index of a named parameter like `:name`, `None` if unknown.
    fn argument_index(&self, name: &str) -> Result<Option<i32>>;

    /// Read the staged row then step to the next one.
    ///
    /// A read failure is returned without stepping. On success the outcome of
    /// the pre-fetch is returned, an engine error from that step is returned as
    /// error.
    fn read<O: Outputs>(&mut self, outputs: O) -> Result<Outcome> {
        self.read_row(outputs)?;
        self.execute()
    }

    fn has_row(&self) -> bool {
        self.status() == Status::Row
    }
}
