use std::collections::HashMap;

use xfpport_device::XfpBackend;
use xfpport_term::{Response, TermReader};

use crate::error::CommandError;

/// A command implementation.
///
/// Handlers pull their own arguments off `args` and return the value for an
/// `ok` reply.
pub type Handler = fn(&mut dyn XfpBackend, &mut TermReader<'_>) -> Result<u32, CommandError>;

pub const OPEN_XFP_DRIVER: &str = "open_xfp_driver";
pub const CLOSE_XFP_DRIVER: &str = "close_xfp_driver";
pub const READ_REGISTER: &str = "read_register";
pub const WRITE_REGISTER: &str = "write_register";
pub const READ_PIN: &str = "read_pin";
pub const WRITE_PIN: &str = "write_pin";

/// Command name to handler table, built once at startup.
pub struct Dispatcher {
    handlers: HashMap<&'static str, Handler>,
}

impl Dispatcher {
    /// A dispatcher serving the six driver commands.
    pub fn new() -> Self {
        let mut dispatcher = Self {
            handlers: HashMap::new(),
        };
        dispatcher.register(OPEN_XFP_DRIVER, open_xfp_driver);
        dispatcher.register(CLOSE_XFP_DRIVER, close_xfp_driver);
        dispatcher.register(READ_REGISTER, read_register);
        dispatcher.register(WRITE_REGISTER, write_register);
        dispatcher.register(READ_PIN, read_pin);
        dispatcher.register(WRITE_PIN, write_pin);
        dispatcher
    }

    /// Add or replace the handler for `name`, returning any previous one.
    pub fn register(&mut self, name: &'static str, handler: Handler) -> Option<Handler> {
        self.handlers.insert(name, handler)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Run the handler for `name`.
    ///
    /// Every failure, including an unknown name, becomes `{error, 0}`; the
    /// caller always has a reply to send.
    pub fn dispatch(
        &self,
        name: &str,
        backend: &mut dyn XfpBackend,
        args: &mut TermReader<'_>,
    ) -> Response {
        let Some(handler) = self.handlers.get(name) else {
            tracing::warn!(command = name, "unknown command");
            return Response::error();
        };

        match handler(backend, args) {
            Ok(value) => Response::ok(value),
            Err(err) => {
                tracing::warn!(command = name, error = %err, "command rejected");
                Response::error()
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn open_xfp_driver(
    backend: &mut dyn XfpBackend,
    _args: &mut TermReader<'_>,
) -> Result<u32, CommandError> {
    backend.open()?;
    tracing::info!(backend = backend.name(), "driver opened");
    Ok(0)
}

fn close_xfp_driver(
    backend: &mut dyn XfpBackend,
    _args: &mut TermReader<'_>,
) -> Result<u32, CommandError> {
    backend.close()?;
    tracing::info!(backend = backend.name(), "driver closed");
    Ok(0)
}

fn read_register(
    backend: &mut dyn XfpBackend,
    args: &mut TermReader<'_>,
) -> Result<u32, CommandError> {
    let instance = args.decode_ulong()?;
    let register = args.decode_ulong()?;
    Ok(u32::from(backend.read_register(instance, register)?))
}

fn write_register(
    backend: &mut dyn XfpBackend,
    args: &mut TermReader<'_>,
) -> Result<u32, CommandError> {
    let instance = args.decode_ulong()?;
    let register = args.decode_ulong()?;
    let value = args.decode_ulong()?;
    backend.write_register(instance, register, value)?;
    Ok(0)
}

fn read_pin(backend: &mut dyn XfpBackend, args: &mut TermReader<'_>) -> Result<u32, CommandError> {
    let instance = args.decode_ulong()?;
    let pin = args.decode_ulong()?;
    Ok(u32::from(backend.read_pin(instance, pin)?))
}

fn write_pin(backend: &mut dyn XfpBackend, args: &mut TermReader<'_>) -> Result<u32, CommandError> {
    let instance = args.decode_ulong()?;
    let pin = args.decode_ulong()?;
    let value = args.decode_ulong()?;
    backend.write_pin(instance, pin, value)?;
    Ok(0)
}
