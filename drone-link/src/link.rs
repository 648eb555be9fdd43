//! Outbound command sender.

use core::future::Future;

use embedded_io_async::Write;

use drone_proto::frame::{encode_frame, MAX_FRAME_SIZE};
use drone_proto::{DeviceType, EncodeError, Payload};

use crate::ack::{AckHandle, AckOutcome, AckRegistry};

/// Why a send failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendError<E> {
    /// The payload did not fit a frame.
    Encode(EncodeError),
    /// The transport write failed.
    Io(E),
    /// Every acknowledgement slot is already claimed.
    AckTableFull,
}

impl<E> From<EncodeError> for SendError<E> {
    fn from(err: EncodeError) -> Self {
        Self::Encode(err)
    }
}

/// Sender half of the session, over any async byte transport.
pub struct Link<W: Write> {
    writer: W,
    /// Source device stamped into outbound headers.
    device: DeviceType,
}

impl<W: Write> Link<W> {
    /// A link speaking as the handheld controller.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_device(writer, DeviceType::Controller)
    }

    #[must_use]
    pub fn with_device(writer: W, device: DeviceType) -> Self {
        Self { writer, device }
    }

    /// Fire-and-forget send to the drone.
    pub async fn send(&mut self, payload: &Payload) -> Result<(), SendError<W::Error>> {
        self.send_to(payload, DeviceType::Drone).await
    }

    /// Fire-and-forget send to an explicit destination.
    pub async fn send_to(
        &mut self,
        payload: &Payload,
        to: DeviceType,
    ) -> Result<(), SendError<W::Error>> {
        let mut buf = [0u8; MAX_FRAME_SIZE];
        let len = encode_frame(payload, self.device, to, &mut buf)?;
        self.writer
            .write_all(&buf[..len])
            .await
            .map_err(SendError::Io)?;
        self.writer.flush().await.map_err(SendError::Io)?;
        Ok(())
    }

    /// Send a command and hand back the pending-ack handle.
    ///
    /// The expectation is registered before any byte goes out, so an ack
    /// racing the write cannot slip past. Nothing is written when the
    /// registry is full.
    pub async fn send_with_ack<'r>(
        &mut self,
        acks: &'r AckRegistry,
        payload: &Payload,
    ) -> Result<AckHandle<'r>, SendError<W::Error>> {
        let handle = acks
            .expect(payload.data_type())
            .ok_or(SendError::AckTableFull)?;
        self.send(payload).await?;
        Ok(handle)
    }

    /// Send a command and wait for its ack, bounded by `deadline`.
    pub async fn send_and_await_ack<F: Future>(
        &mut self,
        acks: &AckRegistry,
        payload: &Payload,
        deadline: F,
    ) -> Result<AckOutcome, SendError<W::Error>> {
        let handle = self.send_with_ack(acks, payload).await?;
        Ok(handle.wait_until(deadline).await)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::test_util::block_on;
    use core::convert::Infallible;
    use core::future::{pending, ready};
    use drone_proto::buzzer::{Buzzer, BuzzerMode};
    use drone_proto::command::Request;
    use drone_proto::receiver::FrameReceiver;
    use drone_proto::DataType;
    use std::vec::Vec;

    #[derive(Default)]
    struct MockWriter {
        bytes: Vec<u8>,
    }

    impl embedded_io_async::ErrorType for MockWriter {
        type Error = Infallible;
    }

    impl Write for MockWriter {
        async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            self.bytes.extend_from_slice(buf);
            Ok(buf.len())
        }
    }

    fn decode_one(bytes: &[u8]) -> drone_proto::Frame {
        let mut rx = FrameReceiver::new();
        let mut out = None;
        for &b in bytes {
            if let Some(frame) = rx.push_byte(b).unwrap() {
                out = Some(frame);
            }
        }
        out.expect("no frame in written bytes")
    }

    #[test]
    fn test_send_writes_a_decodable_frame() {
        let mut link = Link::new(MockWriter::default());
        let payload = Payload::Request(Request {
            data_type: DataType::State,
        });
        block_on(link.send(&payload)).unwrap();

        let frame = decode_one(&link.writer.bytes);
        assert_eq!(frame.header.from, DeviceType::Controller);
        assert_eq!(frame.header.to, DeviceType::Drone);
        assert_eq!(frame.payload, Some(payload));
    }

    #[test]
    fn test_send_with_ack_registers_expectation() {
        let acks = AckRegistry::new();
        let mut link = Link::new(MockWriter::default());
        let payload = Payload::Buzzer(Buzzer {
            mode: BuzzerMode::Hz,
            value: 440,
            time: 500,
        });

        let handle = block_on(link.send_with_ack(&acks, &payload)).unwrap();
        assert_eq!(handle.data_type(), DataType::Buzzer);
        assert_eq!(acks.pending(), 1);
        assert!(!link.writer.bytes.is_empty());

        acks.complete(DataType::Buzzer);
        assert_eq!(
            block_on(handle.wait_until(pending::<()>())),
            AckOutcome::Acknowledged
        );
    }

    #[test]
    fn test_full_registry_writes_nothing() {
        let acks = AckRegistry::new();
        let mut link = Link::new(MockWriter::default());
        let payload = Payload::Buzzer(Buzzer::default());

        let handles: Vec<_> = (0..crate::ack::MAX_PENDING_ACKS)
            .map(|_| acks.expect(DataType::LightMode).unwrap())
            .collect();

        let err = block_on(link.send_with_ack(&acks, &payload)).unwrap_err();
        assert_eq!(err, SendError::AckTableFull);
        assert!(link.writer.bytes.is_empty());
        drop(handles);
    }

    #[test]
    fn test_send_and_await_ack_times_out() {
        let acks = AckRegistry::new();
        let mut link = Link::new(MockWriter::default());
        let payload = Payload::Buzzer(Buzzer::default());

        let outcome = block_on(link.send_and_await_ack(&acks, &payload, ready(()))).unwrap();
        assert_eq!(outcome, AckOutcome::TimedOut);
        // The timed-out handle was dropped, freeing its slot.
        assert_eq!(acks.pending(), 0);
    }
}
