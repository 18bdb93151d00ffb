/// Result of a single successful engine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A result row is staged and can be read.
    Row,
    /// The statement ran to completion, no more rows.
    Done,
}

impl Outcome {
    pub fn is_row(&self) -> bool {
        *self == Outcome::Row
    }
}

/// Last execution status recorded by a statement.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    #[default]
    Pending,
    Row,
    Done,
    Error(i32),
}

impl From<Outcome> for Status {
    fn from(value: Outcome) -> Self {
        match value {
            Outcome::Row => Status::Row,
            Outcome::Done => Status::Done,
        }
    }
}
