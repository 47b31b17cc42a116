//! Terminal front-end for the university library API.
//!
//! Wires the I/O-free `library-core` to the outside world: layered settings,
//! tracing bootstrap, a blocking `ureq` transport and the interactive
//! navigation shell.

pub mod logging;
pub mod settings;
pub mod shell;
pub mod transport;

pub use settings::Settings;
pub use shell::{Command, Screen, Shell};
pub use transport::UreqTransport;
