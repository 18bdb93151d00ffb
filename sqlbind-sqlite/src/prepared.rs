use crate::{CBox, SqliteConnection, codec, error_message_from_ptr, error_string};
use libsqlite3_sys::{
    SQLITE_DONE, SQLITE_MISUSE, SQLITE_NOMEM, SQLITE_OK, SQLITE_RANGE, SQLITE_ROW, sqlite3_stmt,
    sqlite3_bind_parameter_count, sqlite3_bind_parameter_index, sqlite3_clear_bindings,
    sqlite3_column_count, sqlite3_column_name, sqlite3_db_handle, sqlite3_errmsg, sqlite3_finalize,
    sqlite3_reset, sqlite3_sql, sqlite3_step,
};
use sqlbind_core::{
    AsParam, AsSlot, Blob, Context, Error, Failure, Null, Outcome, Outputs, Params, Prepared,
    Result, Status, StorageClass, truncate_long,
};
use std::{
    borrow::Cow,
    ffi::{CStr, CString, c_int},
    fmt::{self, Display},
    marker::PhantomData,
    mem, ptr,
};

pub(crate) fn finalize_handle(statement: *mut sqlite3_stmt) {
    unsafe {
        sqlite3_finalize(statement);
    }
}

/// Prepared statement of a [`SqliteConnection`].
///
/// Dropping it finalizes the handle and discards the result. Moving it out with
/// [`std::mem::take`] leaves behind an inert statement whose handle is null.
pub struct SqlitePrepared<'c> {
    pub(crate) statement: CBox<*mut sqlite3_stmt>,
    pub(crate) bind_index: c_int,
    pub(crate) read_index: c_int,
    pub(crate) status: Status,
    /// A row was staged by the last step and was not consumed yet.
    pub(crate) staged: bool,
    _connection: PhantomData<&'c SqliteConnection>,
}

impl<'c> SqlitePrepared<'c> {
    pub(crate) fn new(statement: CBox<*mut sqlite3_stmt>) -> Self {
        Self {
            statement,
            bind_index: 0,
            read_index: 0,
            status: Status::Pending,
            staged: false,
            _connection: PhantomData,
        }
    }

    fn handle(&self) -> Result<*mut sqlite3_stmt> {
        if self.statement.is_null() {
            let error = Error::new(Failure::Engine(SQLITE_MISUSE))
                .context("The statement was finalized or moved out");
            log::error!("{:#}", error);
            return Err(error);
        }
        Ok(*self.statement)
    }

    /// SQL text used to prepare the statement, empty once finalized.
    pub fn sql(&self) -> Cow<'_, str> {
        if self.statement.is_null() {
            return Cow::Borrowed("");
        }
        let query = unsafe { sqlite3_sql(*self.statement) };
        if query.is_null() {
            return Cow::Borrowed("");
        }
        unsafe { CStr::from_ptr(query) }.to_string_lossy()
    }

    fn engine_error(&self, rc: c_int, context: impl Display) -> Error {
        let message = if self.statement.is_null() {
            error_string(rc).to_string()
        } else {
            let connection = unsafe { sqlite3_db_handle(*self.statement) };
            error_message_from_ptr(&unsafe { sqlite3_errmsg(connection) }).to_string()
        };
        let error = Error::new(Failure::Engine(rc))
            .context(message)
            .context(context.to_string());
        log::error!("{:#}", error);
        error
    }

    fn bind_error(&self, rc: c_int, index: c_int) -> Error {
        self.engine_error(
            rc,
            format!(
                "Cannot bind parameter {} to query:\n{}",
                index,
                truncate_long!(self.sql())
            ),
        )
    }

    fn read_error(&self, failure: Failure, index: c_int) -> Error {
        let error = Error::new(failure).context(format!(
            "Cannot read column {} from query:\n{}",
            index,
            truncate_long!(self.sql())
        ));
        log::error!("{:#}", error);
        error
    }

    pub fn bind_null(&mut self, index: i32) -> Result<&mut Self> {
        self.bind_at(index, Null)
    }

    pub fn bind_text(&mut self, index: i32, value: &str) -> Result<&mut Self> {
        self.bind_at(index, value)
    }

    pub fn bind_blob(&mut self, index: i32, value: &[u8]) -> Result<&mut Self> {
        self.bind_at(index, value)
    }

    pub fn read_text(&mut self, index: i32, value: &mut String) -> Result<()> {
        self.read_row_at(index, value)
    }

    pub fn read_blob(&mut self, index: i32, value: &mut Vec<u8>) -> Result<()> {
        self.read_row_at(index, value)
    }

    /// Read a blob whose stored length must be exactly `value.len()`.
    pub fn read_blob_into(&mut self, index: i32, value: &mut [u8]) -> Result<()> {
        self.read_row_at(index, Blob::new(value))
    }

    /// Storage class of a column of the staged row.
    pub fn column_type(&self, index: i32) -> Result<StorageClass> {
        let statement = self.handle()?;
        codec::check_range(statement, index).map_err(|e| self.read_error(e, index))?;
        Ok(codec::storage_class(statement, index))
    }

    /// Number of placeholders, the largest index for numbered ones.
    pub fn parameter_count(&self) -> Result<i32> {
        let statement = self.handle()?;
        Ok(unsafe { sqlite3_bind_parameter_count(statement) })
    }
}

impl<'c> Prepared for SqlitePrepared<'c> {
    fn bind<P: Params>(&mut self, params: P) -> Result<&mut Self> {
        let statement = self.handle()?;
        params.visit_params(&mut |param| {
            self.bind_index += 1;
            let index = self.bind_index;
            let rc = codec::bind(statement, index, param);
            if rc != SQLITE_OK {
                return Err(self.bind_error(rc, index));
            }
            Ok(())
        })?;
        Ok(self)
    }

    fn bind_at<V: AsParam>(&mut self, index: i32, value: V) -> Result<&mut Self> {
        let statement = self.handle()?;
        let rc = codec::bind(statement, index, value.as_param());
        if rc != SQLITE_OK {
            return Err(self.bind_error(rc, index));
        }
        Ok(self)
    }

    fn execute(&mut self) -> Result<Outcome> {
        let statement = self.handle()?;
        let rc = unsafe { sqlite3_step(statement) };
        let outcome = match rc {
            SQLITE_ROW => Outcome::Row,
            SQLITE_DONE => Outcome::Done,
            _ => {
                self.status = Status::Error(rc);
                self.staged = false;
                return Err(self.engine_error(
                    rc,
                    format!("Cannot execute the query:\n{}", truncate_long!(self.sql())),
                ));
            }
        };
        self.status = outcome.into();
        self.staged = outcome.is_row();
        Ok(outcome)
    }

    fn read_row<O: Outputs>(&mut self, mut outputs: O) -> Result<()> {
        let statement = self.handle()?;
        self.read_index = -1;
        outputs.visit_slots(&mut |slot| {
            self.read_index += 1;
            let index = self.read_index;
            codec::read(statement, index, slot).map_err(|e| self.read_error(e, index))
        })?;
        self.staged = false;
        Ok(())
    }

    fn read_row_at<S: AsSlot>(&mut self, index: i32, mut output: S) -> Result<()> {
        let statement = self.handle()?;
        codec::read(statement, index, output.as_slot()).map_err(|e| self.read_error(e, index))
    }

    fn next_row(&mut self) -> Result<bool> {
        if mem::take(&mut self.staged) {
            return Ok(true);
        }
        let outcome = self.execute()?;
        self.staged = false;
        Ok(outcome.is_row())
    }

    fn reset(&mut self) -> Result<()> {
        let statement = self.handle()?;
        let rc = unsafe { sqlite3_reset(statement) };
        let previous = mem::replace(&mut self.status, Status::Pending);
        self.staged = false;
        // The engine reports again the failure of the last step, already returned by `execute`
        if rc != SQLITE_OK && previous != Status::Error(rc) {
            return Err(self.engine_error(
                rc,
                format!("Cannot reset the query:\n{}", truncate_long!(self.sql())),
            ));
        }
        Ok(())
    }

    fn clear_bindings(&mut self) -> Result<()> {
        let statement = self.handle()?;
        let rc = unsafe { sqlite3_clear_bindings(statement) };
        if rc != SQLITE_OK {
            return Err(self.engine_error(rc, "Cannot clear the bindings"));
        }
        self.bind_index = 0;
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        if self.statement.is_null() {
            return Ok(());
        }
        let query = truncate_long!(self.sql()).to_string();
        let connection = unsafe { sqlite3_db_handle(*self.statement) };
        // The handle is freed whatever the result
        let rc = unsafe { sqlite3_finalize(self.statement.release()) };
        self.staged = false;
        // Same as `reset`, the failure of the last step was already returned
        if rc != SQLITE_OK && self.status == Status::Error(rc) {
            log::trace!("Finalized the failed query:\n{}", query);
            return Ok(());
        }
        if rc != SQLITE_OK {
            let message = error_message_from_ptr(&unsafe { sqlite3_errmsg(connection) }).to_string();
            let error = Error::new(Failure::Engine(rc))
                .context(message)
                .context(format!("Cannot finalize the query:\n{}", query));
            log::error!("{:#}", error);
            return Err(error);
        }
        log::trace!("Finalized the query:\n{}", query);
        Ok(())
    }

    fn bind_cursor(&self) -> i32 {
        self.bind_index
    }

    fn read_cursor(&self) -> i32 {
        self.read_index
    }

    fn status(&self) -> Status {
        self.status
    }

    fn is_valid(&self) -> bool {
        !self.statement.is_null()
    }

    fn column_count(&self) -> Result<i32> {
        let statement = self.handle()?;
        Ok(unsafe { sqlite3_column_count(statement) })
    }

    fn column_name(&self, index: i32) -> Result<String> {
        let statement = self.handle()?;
        let count = unsafe { sqlite3_column_count(statement) };
        if index < 0 || index >= count {
            return Err(self.engine_error(
                SQLITE_RANGE,
                format!("Column {} is out of range, the query has {}", index, count),
            ));
        }
        let name = unsafe { sqlite3_column_name(statement, index) };
        if name.is_null() {
            return Err(self.engine_error(SQLITE_NOMEM, "Cannot get the column name"));
        }
        Ok(unsafe { CStr::from_ptr(name) }.to_string_lossy().into_owned())
    }

    fn argument_index(&self, name: &str) -> Result<Option<i32>> {
        let statement = self.handle()?;
        let c_name = CString::new(name)
            .with_context(|| format!("Invalid parameter name `{}`", name))?;
        let index = unsafe { sqlite3_bind_parameter_index(statement, c_name.as_ptr()) };
        Ok((index != 0).then_some(index))
    }
}

impl Default for SqlitePrepared<'_> {
    fn default() -> Self {
        Self::new(CBox::new(ptr::null_mut(), finalize_handle))
    }
}

impl Display for SqlitePrepared<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:p}", self.statement)
    }
}
