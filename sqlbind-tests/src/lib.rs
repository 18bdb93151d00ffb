mod cursors;
mod iteration;
mod lifecycle;
mod mismatch;
mod roundtrip;
mod scenario;

use crate::{
    cursors::{bind_cursor, read_cursor},
    iteration::{next_row_iteration, read_iteration},
    lifecycle::{finalize_and_move, introspection, reset},
    mismatch::{nullability, size_mismatch, type_mismatch},
    roundtrip::{roundtrip, transient_text},
    scenario::insert_select,
};
use log::LevelFilter;
use sqlbind_core::Connection;
use std::env;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

pub fn execute_tests<C: Connection>(connection: &C) {
    roundtrip(connection);
    transient_text(connection);
    bind_cursor(connection);
    read_cursor(connection);
    type_mismatch(connection);
    size_mismatch(connection);
    nullability(connection);
    finalize_and_move(connection);
    introspection(connection);
    reset(connection);
    next_row_iteration(connection);
    read_iteration(connection);
    insert_select(connection);
}

/// Runs the code with logging turned off, evaluates to the value of the code.
#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        let result = { $($code)+ };
        log::set_max_level(level);
        result
    }};
}
