//! Incremental frame receiver.
//!
//! Consumes the serial stream one byte at a time and yields whole validated
//! frames. The stream is unreliable: frames may arrive cut short, corrupted,
//! or interleaved with garbage, so anything that does not look like a frame
//! is skipped silently and the machine hunts for the next start marker. A
//! checksum mismatch drops the frame and bumps a counter. Only one condition
//! is an error worth surfacing: a frame that passed its checksum but whose
//! payload does not decode to the length the header declared, since that
//! means the peer and this driver disagree about the protocol itself.

use heapless::Vec;

use crate::crc::Crc16Digest;
use crate::cursor::DecodeError;
use crate::data_type::DataType;
use crate::header::Header;
use crate::message::Payload;
use crate::frame::{MAX_PAYLOAD_SIZE, START_BYTE_1, START_BYTE_2};

/// One validated frame.
///
/// `payload` is `None` for zero-length frames (a bare header is a legal
/// message, used as a minimal ping).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub header: Header,
    pub payload: Option<Payload>,
}

/// A checksum-valid frame whose payload failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameError {
    pub data_type: DataType,
    pub error: DecodeError,
}

/// Receiver health counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReceiverStats {
    /// Frames delivered.
    pub frames: u32,
    /// Frames dropped for a bad checksum.
    pub crc_errors: u32,
    /// Partially accepted frames abandoned to re-hunt the start marker.
    pub resyncs: u32,
    /// Headers carrying a discriminant this driver does not know.
    pub unknown_types: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Start1,
    Start2,
    Header,
    Payload,
    Trailer,
}

/// Byte-at-a-time frame state machine.
pub struct FrameReceiver {
    section: Section,
    header_buf: [u8; Header::SIZE],
    header_pos: usize,
    header: Option<Header>,
    payload_buf: Vec<u8, MAX_PAYLOAD_SIZE>,
    trailer: [u8; 2],
    trailer_pos: usize,
    crc: Crc16Digest,
    stats: ReceiverStats,
}

impl FrameReceiver {
    #[must_use]
    pub fn new() -> Self {
        Self {
            section: Section::Start1,
            header_buf: [0; Header::SIZE],
            header_pos: 0,
            header: None,
            payload_buf: Vec::new(),
            trailer: [0; 2],
            trailer_pos: 0,
            crc: Crc16Digest::new(),
            stats: ReceiverStats::default(),
        }
    }

    /// Health counters, monotonically increasing over the receiver's life.
    #[must_use]
    pub fn stats(&self) -> ReceiverStats {
        self.stats
    }

    /// Discard any partial frame and hunt for the next start marker.
    pub fn reset(&mut self) {
        self.section = Section::Start1;
        self.header_pos = 0;
        self.header = None;
        self.payload_buf.clear();
        self.trailer_pos = 0;
        self.crc = Crc16Digest::new();
    }

    fn abandon(&mut self) {
        self.stats.resyncs += 1;
        self.reset();
    }

    /// Feed one byte from the stream.
    ///
    /// Returns `Ok(Some(frame))` when the byte completes a valid frame,
    /// `Ok(None)` otherwise. Framing noise and checksum failures never
    /// error; a post-checksum payload decode failure does.
    pub fn push_byte(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.section {
            Section::Start1 => {
                if byte == START_BYTE_1 {
                    self.section = Section::Start2;
                }
                Ok(None)
            }
            Section::Start2 => {
                if byte == START_BYTE_2 {
                    self.section = Section::Header;
                } else if byte != START_BYTE_1 {
                    // 0x0A 0x0A 0x55 still locks on.
                    self.abandon();
                }
                Ok(None)
            }
            Section::Header => {
                self.header_buf[self.header_pos] = byte;
                self.header_pos += 1;
                self.crc.update(byte);
                if self.header_pos == Header::SIZE {
                    self.on_header_complete();
                }
                Ok(None)
            }
            Section::Payload => {
                // Capacity is MAX_PAYLOAD_SIZE and length is a u8, so the
                // push cannot overflow.
                let _ = self.payload_buf.push(byte);
                self.crc.update(byte);
                if let Some(header) = self.header {
                    if self.payload_buf.len() == header.length as usize {
                        self.section = Section::Trailer;
                    }
                }
                Ok(None)
            }
            Section::Trailer => {
                self.trailer[self.trailer_pos] = byte;
                self.trailer_pos += 1;
                if self.trailer_pos == 2 {
                    self.on_frame_complete()
                } else {
                    Ok(None)
                }
            }
        }
    }

    fn on_header_complete(&mut self) {
        match Header::from_bytes(&self.header_buf) {
            Ok(header) => {
                self.header = Some(header);
                self.section = if header.length == 0 {
                    Section::Trailer
                } else {
                    Section::Payload
                };
            }
            Err(DecodeError::InvalidValue {
                field: "data_type",
                value,
            }) => {
                log::debug!("unknown data type 0x{value:02X}, resyncing");
                self.stats.unknown_types += 1;
                self.abandon();
            }
            Err(_) => {
                self.abandon();
            }
        }
    }

    fn on_frame_complete(&mut self) -> Result<Option<Frame>, FrameError> {
        let received = u16::from_le_bytes(self.trailer);
        let computed = core::mem::take(&mut self.crc).finalize();
        // Section::Trailer is only entered with a validated header.
        let Some(header) = self.header else {
            self.reset();
            return Ok(None);
        };

        if received != computed {
            log::warn!(
                "checksum mismatch on {:?} frame: got 0x{received:04X}, want 0x{computed:04X}",
                header.data_type
            );
            self.stats.crc_errors += 1;
            self.reset();
            return Ok(None);
        }

        let payload = if header.length == 0 {
            None
        } else {
            match Payload::decode_exact(header.data_type, &self.payload_buf) {
                Ok(payload) => Some(payload),
                Err(error) => {
                    self.reset();
                    return Err(FrameError {
                        data_type: header.data_type,
                        error,
                    });
                }
            }
        };

        self.stats.frames += 1;
        self.reset();
        Ok(Some(Frame { header, payload }))
    }
}

impl Default for FrameReceiver {
    fn default() -> Self {
        Self::new()
    }
}
