use std::io::{Read, Write};

use xfpport_device::XfpBackend;
use xfpport_frame::{FrameReader, FrameWriter};
use xfpport_term::{Request, Response};

use crate::dispatch::Dispatcher;
use crate::error::{Result, ServerError};

/// Serves requests strictly one at a time: read a frame, dispatch it, write
/// the reply, repeat.
///
/// The server is the sole owner of the backend, so device state needs no
/// synchronization.
pub struct Server<R, W> {
    reader: FrameReader<R>,
    writer: FrameWriter<W>,
    dispatcher: Dispatcher,
    backend: Box<dyn XfpBackend>,
    served: u64,
}

impl<R: Read, W: Write> Server<R, W> {
    pub fn new(
        reader: FrameReader<R>,
        writer: FrameWriter<W>,
        backend: Box<dyn XfpBackend>,
    ) -> Self {
        Self {
            reader,
            writer,
            dispatcher: Dispatcher::new(),
            backend,
            served: 0,
        }
    }

    /// Replace the built-in command table.
    pub fn with_dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    /// Handle exactly one request and return the reply that was sent.
    ///
    /// A request that names an unknown command or carries bad arguments still
    /// gets an `{error, 0}` reply and is not an error here. Errors mean the
    /// loop cannot continue.
    pub fn serve_one(&mut self) -> Result<Response> {
        let frame = self.reader.read_frame().map_err(ServerError::Read)?;
        let (header, mut args) = Request::decode_header(&frame.payload)?;

        let response = self
            .dispatcher
            .dispatch(&header.name, &mut *self.backend, &mut args);
        tracing::debug!(
            command = %header.name,
            arity = header.arity,
            %response,
            "request served"
        );

        self.writer
            .write_frame(&response.to_bytes())
            .map_err(ServerError::Write)?;
        self.served += 1;
        Ok(response)
    }

    /// Serve until something fatal happens, and return what it was.
    ///
    /// The host closing our input ends the loop with
    /// `ServerError::Read(FrameError::ConnectionClosed)`.
    pub fn run(&mut self) -> ServerError {
        loop {
            if let Err(err) = self.serve_one() {
                tracing::debug!(served = self.served, "serving loop stopped");
                return err;
            }
        }
    }

    /// Number of requests answered so far.
    pub fn served(&self) -> u64 {
        self.served
    }

    pub fn backend(&self) -> &dyn XfpBackend {
        &*self.backend
    }

    /// Consume the server and return the input and output streams.
    pub fn into_inner(self) -> (R, W) {
        (self.reader.into_inner(), self.writer.into_inner())
    }
}
