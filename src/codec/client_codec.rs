use crate::{
    codec::{
        CallEncoding, ClientCodecConfig, CodecError, PendingCalls, ResolvedResponse, ResponseSlot,
    },
    compression::{CompressorRegistry, standard_compressors},
    frame::FrameTransport,
    serialization::{Message, Serializer},
};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, TryLockError};

type ShutdownFn = Box<dyn Fn() -> io::Result<()> + Send + Sync>;

struct ResponseReader<R> {
    stream: BufReader<R>,
    slot: ResponseSlot,
}

/// Client side of the call codec over a blocking byte stream.
///
/// Any number of threads may call [`write_request`](Self::write_request)
/// concurrently; each request's header frame and body are written under one
/// lock so they stay contiguous on the wire. Responses are read by a single
/// context at a time through [`read_response_header`](Self::read_response_header)
/// followed by [`read_response_body`](Self::read_response_body). A second
/// concurrent reader is refused with [`CodecError::ReaderBusy`] rather than
/// left to corrupt the stream position.
pub struct ClientCodec<R, W: Write> {
    writer: Mutex<Option<BufWriter<W>>>,
    reader: Mutex<Option<ResponseReader<R>>>,
    pending: PendingCalls,
    encoding: CallEncoding,
    max_frame_size: usize,
    closed: AtomicBool,
    shutdown: Option<ShutdownFn>,
}

impl<R: Read, W: Write> ClientCodec<R, W> {
    pub fn new(
        reader: R,
        writer: W,
        serializer: Arc<dyn Serializer>,
        config: ClientCodecConfig,
    ) -> Self {
        Self {
            writer: Mutex::new(Some(BufWriter::with_capacity(
                config.write_buffer_capacity,
                writer,
            ))),
            reader: Mutex::new(Some(ResponseReader {
                stream: BufReader::with_capacity(config.read_buffer_capacity, reader),
                slot: ResponseSlot::new(),
            })),
            pending: PendingCalls::new(),
            encoding: CallEncoding::new(
                config.compression_tag,
                standard_compressors(),
                serializer,
            ),
            max_frame_size: config.max_frame_size,
            closed: AtomicBool::new(false),
            shutdown: None,
        }
    }

    /// Replaces the standard compressor registry.
    pub fn with_compressors(mut self, compressors: Arc<CompressorRegistry>) -> Self {
        self.encoding = self.encoding.with_compressors(compressors);
        self
    }

    /// Registers a hook run by [`close`](Self::close) to release the
    /// underlying connection, e.g. to unblock a reader parked in `read`.
    pub fn with_shutdown<F>(mut self, shutdown: F) -> Self
    where
        F: Fn() -> io::Result<()> + Send + Sync + 'static,
    {
        self.shutdown = Some(Box::new(shutdown));
        self
    }

    /// Encodes and sends one call.
    ///
    /// # Arguments
    ///
    /// * `sequence_id` - Id the matching response will carry. Must not be
    ///   pending already.
    /// * `method` - Non-empty name of the remote method.
    /// * `params` - Call parameters, or `None` for an empty body.
    ///
    /// # Returns
    ///
    /// `Ok(())` once the header frame and body have been flushed. The call
    /// is registered in the pending table first; any failure afterwards
    /// removes the registration again before the error is returned, so a
    /// failed send never leaves an orphaned entry. A write that fails after
    /// bytes reached the stream drops the writer, and later calls fail with
    /// [`CodecError::WriterTorn`].
    pub fn write_request(
        &self,
        sequence_id: u64,
        method: &str,
        params: Option<&dyn Message>,
    ) -> Result<(), CodecError> {
        if self.is_closed() {
            return Err(CodecError::Closed);
        }

        if method.is_empty() {
            return Err(CodecError::EmptyMethod);
        }

        let reservation = self.pending.reserve(sequence_id, method)?;

        match self.send_request(sequence_id, method, params) {
            Ok(()) => {
                reservation.commit();
                Ok(())
            }
            Err(err) => {
                tracing::debug!(sequence_id, method, error = %err, "request write failed");
                Err(err)
            }
        }
    }

    /// Reads the next response header and resolves it against the pending
    /// table.
    ///
    /// An unknown sequence id is not an error; it resolves to an empty
    /// method and the caller decides what to do with it. Either way the
    /// matching body must then be consumed with
    /// [`read_response_body`](Self::read_response_body).
    pub fn read_response_header(&self) -> Result<ResolvedResponse, CodecError> {
        let (sequence_id, error) = {
            let mut guard = self.lock_reader()?;
            let reader = guard.as_mut().ok_or(CodecError::Closed)?;

            reader.slot.begin_header()?;
            let frame = FrameTransport::receive(&mut reader.stream, self.max_frame_size)?;
            let header = reader.slot.accept_header(&frame)?;

            (header.sequence_id, header.error.clone())
        };

        let method = self.pending.resolve(sequence_id);

        match &method {
            Some(method) => {
                tracing::debug!(sequence_id, method = %method, "read response header");
            }
            None => {
                tracing::warn!(sequence_id, "response header has no pending call");
            }
        }

        Ok(ResolvedResponse {
            sequence_id,
            method: method.unwrap_or_default(),
            error,
        })
    }

    /// Consumes the body announced by the last header.
    ///
    /// # Arguments
    ///
    /// * `result` - Where to decode the body. With `None` the body is read
    ///   and discarded.
    ///
    /// # Returns
    ///
    /// `Ok(())` once the body has been consumed and, when requested,
    /// decoded. A decoded body is checksum-verified, checked against the
    /// configured compression tag, decompressed and unmarshaled into
    /// `result`. The body's bytes are always consumed from the stream first,
    /// so a validation failure leaves the stream positioned at the next
    /// header.
    pub fn read_response_body(&self, result: Option<&mut dyn Message>) -> Result<(), CodecError> {
        let mut guard = self.lock_reader()?;
        let reader = guard.as_mut().ok_or(CodecError::Closed)?;

        let (payload_length, checksum, compression_tag) = {
            let header = reader.slot.begin_body()?;
            (
                u64::from(header.payload_length),
                header.checksum,
                header.compression_tag,
            )
        };

        let Some(result) = result else {
            FrameTransport::discard(&mut reader.stream, payload_length)?;
            return Ok(());
        };

        if payload_length > self.max_frame_size as u64 {
            FrameTransport::discard(&mut reader.stream, payload_length)?;
            return Err(CodecError::PayloadTooLarge {
                len: payload_length,
                max: self.max_frame_size as u64,
            });
        }

        let body = FrameTransport::read_block(&mut reader.stream, payload_length as usize)?;
        drop(guard);

        self.encoding
            .decode_response_body(compression_tag, checksum, &body, result)
    }

    /// Flushes buffered requests and releases the connection.
    ///
    /// Closing twice is a no-op. Calls still pending stay in the table for
    /// the dispatch layer to fail; every later operation returns
    /// [`CodecError::Closed`].
    pub fn close(&self) -> Result<(), CodecError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }

        let flushed = match self.writer.lock() {
            Ok(mut guard) => match guard.take() {
                Some(mut writer) => writer.flush().map_err(CodecError::from),
                None => Ok(()),
            },
            Err(_) => Err(CodecError::Poisoned("request writer")),
        };

        let released = match &self.shutdown {
            Some(shutdown) => shutdown().map_err(CodecError::from),
            None => Ok(()),
        };

        // A reader blocked in `read` keeps its half until the shutdown hook
        // unblocks it; every later read sees the closed flag.
        if let Ok(mut guard) = self.reader.try_lock() {
            guard.take();
        }

        tracing::debug!(pending = self.pending.len(), "client codec closed");

        flushed.and(released)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Number of calls written whose response header has not arrived.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn compression_tag(&self) -> u16 {
        self.encoding.compression_tag()
    }

    fn send_request(
        &self,
        sequence_id: u64,
        method: &str,
        params: Option<&dyn Message>,
    ) -> Result<(), CodecError> {
        let request = self.encoding.encode_request(sequence_id, method, params)?;

        let mut guard = self
            .writer
            .lock()
            .map_err(|_| CodecError::Poisoned("request writer"))?;

        // Out of the slot while bytes are in flight; only a complete request
        // puts it back.
        let mut writer = guard.take().ok_or_else(|| self.writer_gone())?;

        FrameTransport::send(&mut writer, &request.header)?;
        FrameTransport::write_block(&mut writer, &request.body)?;
        writer.flush()?;

        *guard = Some(writer);

        tracing::debug!(
            sequence_id,
            method,
            payload_length = request.body.len(),
            "wrote request"
        );

        Ok(())
    }

    fn writer_gone(&self) -> CodecError {
        if self.is_closed() {
            CodecError::Closed
        } else {
            CodecError::WriterTorn
        }
    }

    fn lock_reader(&self) -> Result<MutexGuard<'_, Option<ResponseReader<R>>>, CodecError> {
        if self.is_closed() {
            return Err(CodecError::Closed);
        }

        match self.reader.try_lock() {
            Ok(guard) => Ok(guard),
            Err(TryLockError::WouldBlock) => Err(CodecError::ReaderBusy),
            Err(TryLockError::Poisoned(_)) => Err(CodecError::Poisoned("response reader")),
        }
    }
}

impl ClientCodec<TcpStream, TcpStream> {
    /// Splits a connected socket into the codec's read and write halves.
    ///
    /// [`close`](Self::close) shuts the socket down in both directions.
    pub fn from_tcp_stream(
        stream: TcpStream,
        serializer: Arc<dyn Serializer>,
        config: ClientCodecConfig,
    ) -> io::Result<Self> {
        let reader = stream.try_clone()?;
        let control = stream.try_clone()?;

        Ok(Self::new(reader, stream, serializer, config).with_shutdown(move || {
            match control.shutdown(Shutdown::Both) {
                Err(e) if e.kind() != io::ErrorKind::NotConnected => Err(e),
                _ => Ok(()),
            }
        }))
    }
}
