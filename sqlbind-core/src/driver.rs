use crate::{Connection, Result};

pub trait Driver {
    type Connection: Connection<Driver = Self>;

    /// Scheme used in connection urls, `sqlite` for `sqlite://path`.
    const NAME: &'static str;

    fn connect(&self, url: &str) -> Result<Self::Connection> {
        Self::Connection::connect(url)
    }
}
