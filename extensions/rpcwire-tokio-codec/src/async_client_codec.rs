use crate::AsyncFrameTransport;
use rpcwire::{
    codec::{
        CallEncoding, ClientCodecConfig, CodecError, PendingCalls, ResolvedResponse, ResponseSlot,
    },
    compression::{CompressorRegistry, standard_compressors},
    serialization::{Message, Serializer},
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::{Mutex, MutexGuard};

struct ResponseReader<R> {
    stream: BufReader<R>,
    slot: ResponseSlot,
}

/// Client side of the call codec over Tokio byte streams.
///
/// Same wire behavior and pending-call bookkeeping as
/// [`rpcwire::codec::ClientCodec`]. Writers queue on an async lock; a second
/// concurrent reader gets [`CodecError::ReaderBusy`].
pub struct AsyncClientCodec<R, W> {
    writer: Mutex<Option<BufWriter<W>>>,
    reader: Mutex<Option<ResponseReader<R>>>,
    pending: PendingCalls,
    encoding: CallEncoding,
    max_frame_size: usize,
    closed: AtomicBool,
}

impl<R, W> AsyncClientCodec<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
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
        }
    }

    pub fn with_compressors(mut self, compressors: Arc<CompressorRegistry>) -> Self {
        self.encoding = self.encoding.with_compressors(compressors);
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
    /// `Ok(())` once the header frame and body have been flushed.
    ///
    /// The returned future may be dropped at any await point, e.g. by a
    /// timeout. The pending entry is released either way. If the future is
    /// dropped while it holds the writer, the writer is dropped with it and
    /// later calls fail with [`CodecError::WriterTorn`] instead of framing
    /// new requests after a partial one.
    pub async fn write_request(
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

        let result = match self.encoding.encode_request(sequence_id, method, params) {
            Ok(request) => self.send_encoded(&request.header, &request.body).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(()) => {
                reservation.commit();
                tracing::debug!(sequence_id, method, "wrote request");
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
    /// # Returns
    ///
    /// The response's sequence id, the method of the matching call and the
    /// remote error string. An unknown sequence id resolves to an empty
    /// method. The body must then be consumed with
    /// [`read_response_body`](Self::read_response_body).
    pub async fn read_response_header(&self) -> Result<ResolvedResponse, CodecError> {
        let (sequence_id, error) = {
            let mut guard = self.lock_reader()?;
            let reader = guard.as_mut().ok_or(CodecError::Closed)?;

            reader.slot.begin_header()?;
            let frame = AsyncFrameTransport::receive(&mut reader.stream, self.max_frame_size).await?;
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
    /// decoded. The bytes are read off the stream before any validation, so
    /// checksum and compressor mismatches leave the stream at the next
    /// header.
    pub async fn read_response_body(
        &self,
        result: Option<&mut dyn Message>,
    ) -> Result<(), CodecError> {
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
            AsyncFrameTransport::discard(&mut reader.stream, payload_length).await?;
            return Ok(());
        };

        if payload_length > self.max_frame_size as u64 {
            AsyncFrameTransport::discard(&mut reader.stream, payload_length).await?;
            return Err(CodecError::PayloadTooLarge {
                len: payload_length,
                max: self.max_frame_size as u64,
            });
        }

        let body =
            AsyncFrameTransport::read_block(&mut reader.stream, payload_length as usize).await?;
        drop(guard);

        self.encoding
            .decode_response_body(compression_tag, checksum, &body, result)
    }

    /// Flushes and shuts down the write half.
    ///
    /// Closing twice is a no-op. Every later operation returns
    /// [`CodecError::Closed`].
    pub async fn close(&self) -> Result<(), CodecError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }

        let result = match self.writer.lock().await.take() {
            Some(mut writer) => writer.shutdown().await.map_err(CodecError::from),
            None => Ok(()),
        };

        if let Ok(mut guard) = self.reader.try_lock() {
            guard.take();
        }

        tracing::debug!(pending = self.pending.len(), "async client codec closed");

        result
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn compression_tag(&self) -> u16 {
        self.encoding.compression_tag()
    }

    async fn send_encoded(&self, header: &[u8], body: &[u8]) -> Result<(), CodecError> {
        let mut guard = self.writer.lock().await;

        // Out of the slot while bytes are in flight. If this future is
        // dropped or a write fails, the writer goes with it.
        let mut writer = guard.take().ok_or_else(|| self.writer_gone())?;

        AsyncFrameTransport::send(&mut writer, header).await?;
        AsyncFrameTransport::write_block(&mut writer, body).await?;
        writer.flush().await?;

        *guard = Some(writer);

        tracing::trace!(payload_length = body.len(), "flushed request");

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

        self.reader.try_lock().map_err(|_| CodecError::ReaderBusy)
    }
}

impl AsyncClientCodec<OwnedReadHalf, OwnedWriteHalf> {
    /// Splits a connected socket; [`close`](Self::close) shuts down its
    /// write half.
    pub fn from_tcp_stream(
        stream: TcpStream,
        serializer: Arc<dyn Serializer>,
        config: ClientCodecConfig,
    ) -> Self {
        let (reader, writer) = stream.into_split();
        Self::new(reader, writer, serializer, config)
    }
}
