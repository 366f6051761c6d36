use anyhow::Result;
use simple_logger::{set_up_color_terminal, SimpleLogger};

/// Installs the terminal logger that `tracing` events are forwarded to.
/// `RUST_LOG` overrides the default level.
pub fn init() -> Result<()> {
    set_up_color_terminal();
    SimpleLogger::new().env().init()?;
    Ok(())
}
