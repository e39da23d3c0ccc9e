use std::collections::VecDeque;

use strum::{Display, IntoStaticStr};
use tracing::debug;

use crate::{
    common::error::Error,
    core::types::Value,
    db::{
        row::{MockRow, Row},
        rows::{MockRows, Rows},
    },
};

/// Outcome of a statement that returns no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecResult {
    /// Id generated by an insert, when the backend reports one.
    pub last_insert_id: Option<i64>,
    pub rows_affected: u64,
}

/// The statement surface shared by a connection pool and a transaction.
///
/// Repository code that takes an `Execer` runs unchanged inside or outside
/// a transaction, and against [`MockExecer`] in tests.
pub trait Execer {
    type Rows: Rows;
    type Row: Row;

    fn exec(&mut self, query: &str, args: &[Value]) -> Result<ExecResult, Error>;

    fn query(&mut self, query: &str, args: &[Value]) -> Result<Self::Rows, Error>;

    /// Runs a query expected to return at most one row.
    fn query_row(&mut self, query: &str, args: &[Value]) -> Result<Self::Row, Error>;
}

/// An [`Execer`] that owns its connection and can be shut down.
pub trait ExecCloser: Execer {
    fn close(&mut self) -> Result<(), Error>;
}

/// Which [`Execer`] method recorded a [`Statement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Op {
    Exec,
    Query,
    QueryRow,
}

/// A statement received by a [`MockExecer`].
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub op: Op,
    pub sql: String,
    pub args: Vec<Value>,
}

/// Scripted [`Execer`] for tests.
///
/// Each operation pops its next response from its own queue, in the order
/// responses were pushed. Every call is recorded, including calls that
/// found nothing scripted.
#[derive(Debug, Default)]
pub struct MockExecer {
    execs: VecDeque<Result<ExecResult, Error>>,
    queries: VecDeque<Result<MockRows, Error>>,
    query_rows: VecDeque<Result<MockRow, Error>>,
    statements: Vec<Statement>,
    closed: bool,
}

impl MockExecer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_exec(&mut self, response: Result<ExecResult, Error>) -> &mut Self {
        self.execs.push_back(response);
        self
    }

    pub fn push_query(&mut self, response: Result<MockRows, Error>) -> &mut Self {
        self.queries.push_back(response);
        self
    }

    pub fn push_query_row(&mut self, response: Result<MockRow, Error>) -> &mut Self {
        self.query_rows.push_back(response);
        self
    }

    /// Every statement received so far, oldest first.
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn record(&mut self, op: Op, sql: &str, args: &[Value]) {
        debug!(%op, sql, args = args.len(), "mock statement");
        self.statements.push(Statement {
            op,
            sql: sql.to_owned(),
            args: args.to_vec(),
        });
    }
}

fn pop<T>(queue: &mut VecDeque<Result<T, Error>>, op: Op) -> Result<T, Error> {
    queue
        .pop_front()
        .unwrap_or_else(|| Err(Error::Unscripted { op: op.into() }))
}

impl Execer for MockExecer {
    type Rows = MockRows;
    type Row = MockRow;

    fn exec(&mut self, query: &str, args: &[Value]) -> Result<ExecResult, Error> {
        self.record(Op::Exec, query, args);
        pop(&mut self.execs, Op::Exec)
    }

    fn query(&mut self, query: &str, args: &[Value]) -> Result<MockRows, Error> {
        self.record(Op::Query, query, args);
        pop(&mut self.queries, Op::Query)
    }

    fn query_row(&mut self, query: &str, args: &[Value]) -> Result<MockRow, Error> {
        self.record(Op::QueryRow, query, args);
        pop(&mut self.query_rows, Op::QueryRow)
    }
}

impl ExecCloser for MockExecer {
    fn close(&mut self) -> Result<(), Error> {
        self.closed = true;
        Ok(())
    }
}
