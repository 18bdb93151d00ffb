use crate::{
    CBox, SqliteDriver, SqlitePrepared, error_message_from_ptr, error_string,
    prepared::finalize_handle,
};
use libsqlite3_sys::{
    SQLITE_OK, SQLITE_OPEN_CREATE, SQLITE_OPEN_FULLMUTEX, SQLITE_OPEN_MEMORY,
    SQLITE_OPEN_NOMUTEX, SQLITE_OPEN_READONLY, SQLITE_OPEN_READWRITE, SQLITE_OPEN_URI, sqlite3,
    sqlite3_close, sqlite3_errmsg, sqlite3_exec, sqlite3_extended_result_codes,
    sqlite3_open_v2, sqlite3_prepare_v3, sqlite3_stmt,
};
use sqlbind_core::{Connection, Context, Driver, Error, Failure, Result, truncate_long};
use std::{
    ffi::{CString, c_char, c_int},
    fmt::{self, Display},
    ops::BitOr,
    ptr,
};

/// Flags controlling how a database file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenFlags(c_int);

impl OpenFlags {
    pub const READ_ONLY: OpenFlags = OpenFlags(SQLITE_OPEN_READONLY);
    pub const READ_WRITE: OpenFlags = OpenFlags(SQLITE_OPEN_READWRITE);
    pub const CREATE: OpenFlags = OpenFlags(SQLITE_OPEN_CREATE);
    pub const URI: OpenFlags = OpenFlags(SQLITE_OPEN_URI);
    pub const MEMORY: OpenFlags = OpenFlags(SQLITE_OPEN_MEMORY);
    pub const NO_MUTEX: OpenFlags = OpenFlags(SQLITE_OPEN_NOMUTEX);
    pub const FULL_MUTEX: OpenFlags = OpenFlags(SQLITE_OPEN_FULLMUTEX);

    pub const fn from_bits(bits: c_int) -> Self {
        Self(bits)
    }

    pub const fn bits(&self) -> c_int {
        self.0
    }

    pub const fn contains(&self, other: OpenFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for OpenFlags {
    fn default() -> Self {
        OpenFlags::READ_WRITE | OpenFlags::CREATE
    }
}

impl BitOr for OpenFlags {
    type Output = OpenFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        OpenFlags(self.0 | rhs.0)
    }
}

/// Connection to a SQLite database.
///
/// Closed when dropped. The statements it prepares borrow it.
pub struct SqliteConnection {
    pub(crate) connection: CBox<*mut sqlite3>,
    pub(crate) extended_result_codes: bool,
}

impl SqliteConnection {
    /// Open the database at `path`.
    pub fn open(path: &str, flags: OpenFlags) -> Result<SqliteConnection> {
        let context = || format!("While opening the database `{}`", path);
        let c_path = CString::new(path).with_context(context)?;
        let mut connection = CBox::new(ptr::null_mut::<sqlite3>(), |p| unsafe {
            sqlite3_close(p);
        });
        let rc = unsafe {
            sqlite3_open_v2(c_path.as_ptr(), &mut *connection, flags.bits(), ptr::null())
        };
        if rc != SQLITE_OK {
            let message = if connection.is_null() {
                error_string(rc).to_string()
            } else {
                error_message_from_ptr(&unsafe { sqlite3_errmsg(*connection) }).to_string()
            };
            let error = Error::new(Failure::Engine(rc))
                .context(message)
                .context(context());
            log::error!("{:#}", error);
            return Err(error);
        }
        log::debug!("Opened the database `{}`", path);
        Ok(Self {
            connection,
            extended_result_codes: false,
        })
    }

    /// Open a private, temporary in-memory database.
    pub fn open_memory() -> Result<SqliteConnection> {
        Self::open(":memory:", OpenFlags::default() | OpenFlags::MEMORY)
    }

    /// Whether the connection still owns its handle (it was not closed).
    pub fn is_open(&self) -> bool {
        !self.connection.is_null()
    }

    /// Switch between primary and extended result codes, the codes returned by
    /// the engine are propagated verbatim in both modes.
    pub fn toggle_extended_result_codes(&mut self) -> Result<()> {
        let connection = self.handle()?;
        let enabled = !self.extended_result_codes;
        let rc = unsafe { sqlite3_extended_result_codes(connection, enabled as c_int) };
        if rc != SQLITE_OK {
            return Err(self.engine_error(rc, "Cannot toggle the extended result codes"));
        }
        self.extended_result_codes = enabled;
        Ok(())
    }

    pub fn is_using_extended_result_codes(&self) -> bool {
        self.extended_result_codes
    }

    pub(crate) fn handle(&self) -> Result<*mut sqlite3> {
        if self.connection.is_null() {
            let error = Error::new(Failure::Engine(libsqlite3_sys::SQLITE_MISUSE))
                .context("The connection is closed");
            log::error!("{:#}", error);
            return Err(error);
        }
        Ok(*self.connection)
    }

    fn engine_error(&self, rc: c_int, context: impl Display) -> Error {
        let message = error_message_from_ptr(&unsafe { sqlite3_errmsg(*self.connection) }).to_string();
        let error = Error::new(Failure::Engine(rc))
            .context(message)
            .context(context.to_string());
        log::error!("{:#}", error);
        error
    }
}

impl Connection for SqliteConnection {
    type Driver = SqliteDriver;
    type Prepared<'c> = SqlitePrepared<'c>;

    /// Open from a url like `sqlite://path/to/file.sqlite?mode=rwc`, the part
    /// after the scheme is handed to the engine as a `file:` URI.
    fn connect(url: &str) -> Result<SqliteConnection> {
        let prefix = format!("{}://", <Self::Driver as Driver>::NAME);
        let Some(location) = url.strip_prefix(&prefix) else {
            let error = Error::msg(format!(
                "Expected sqlite connection url to start with `{}`",
                &prefix
            ));
            log::error!("{:#}", error);
            return Err(error);
        };
        Self::open(
            &format!("file:{}", location),
            OpenFlags::default() | OpenFlags::URI,
        )
        .with_context(|| format!("Error while connecting to `{}`", url))
    }

    fn prepare(&self, sql: &str) -> Result<SqlitePrepared<'_>> {
        let connection = self.handle()?;
        let context = || format!("While preparing the query:\n{}", truncate_long!(sql));
        let len = c_int::try_from(sql.len()).with_context(context)?;
        let mut statement = CBox::new(ptr::null_mut::<sqlite3_stmt>(), finalize_handle);
        let mut tail = ptr::null();
        let rc = unsafe {
            sqlite3_prepare_v3(
                connection,
                sql.as_ptr() as *const c_char,
                len,
                0,
                &mut *statement,
                &mut tail,
            )
        };
        if rc != SQLITE_OK {
            return Err(self.engine_error(rc, context()));
        }
        if statement.is_null() {
            log::warn!("The query does not contain any statement:\n{}", truncate_long!(sql));
        } else {
            log::trace!("Prepared {:p}:\n{}", statement, truncate_long!(sql));
        }
        Ok(SqlitePrepared::new(statement))
    }

    fn execute(&self, sql: &str) -> Result<()> {
        let connection = self.handle()?;
        let context = || format!("While executing the query:\n{}", truncate_long!(sql));
        let c_sql = CString::new(sql).with_context(context)?;
        let rc = unsafe {
            sqlite3_exec(
                connection,
                c_sql.as_ptr(),
                None,
                ptr::null_mut(),
                ptr::null_mut(),
            )
        };
        if rc != SQLITE_OK {
            return Err(self.engine_error(rc, context()));
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.connection.is_null() {
            return Ok(());
        }
        let rc = unsafe { sqlite3_close(*self.connection) };
        if rc != SQLITE_OK {
            return Err(self.engine_error(rc, "Cannot close the connection"));
        }
        self.connection.release();
        log::debug!("Closed the connection");
        Ok(())
    }
}

impl Display for SqliteConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:p}", self.connection)
    }
}
