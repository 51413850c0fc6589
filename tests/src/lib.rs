mod exec_log;
pub use exec_log::ExecLog;

mod logging_connection;
pub use logging_connection::{LoggingConnection, StatementOp};

pub mod models;

mod setup;
pub use setup::Setup;
