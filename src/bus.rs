//! Frame-level bus abstraction, below message reassembly.
//!
//! Endpoint discovery operates here rather than through [`crate::transport::Transport`]: it
//! needs to see individual CAN frames and install arbitration-id filters directly on the bus.

use std::collections::{HashMap, HashSet, VecDeque};
use std::time::{Duration, Instant};

use crate::Result;

/// A single CAN frame: an arbitration id and its data bytes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Frame {
    pub id: u32,
    pub data: Vec<u8>,
}

impl Frame {
    #[must_use]
    pub fn new(id: u32, data: Vec<u8>) -> Self {
        Self { id, data }
    }
}

/// Raw frame transmit/receive plus arbitration-id filtering.
///
/// Implementations may be backed by a real CAN interface (see the `socketcan` feature) or, for
/// tests, an in-memory script of canned replies.
pub trait Bus {
    /// Transmit `frame` onto the bus.
    ///
    /// # Errors
    /// Returns an error if the underlying interface rejects the frame.
    fn send(&mut self, frame: Frame) -> Result<()>;

    /// Block up to `timeout` for the next frame that passes the installed filter.
    ///
    /// # Errors
    /// Returns an error on a lower-level I/O failure. A timeout with no frame is `Ok(None)`, not
    /// an error.
    fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<Frame>>;

    /// Restrict [`Bus::recv_timeout`] to frames whose id is in `ids`.
    fn set_filter(&mut self, ids: &[u32]);

    /// Remove any installed filter; all arbitration ids pass again.
    fn clear_filter(&mut self);
}

/// True iff `data` has the shape of a diagnostic-session-control reply: `data[1]` is either the
/// positive-response id `0x50` or the negative-response sentinel `0x7F`.
#[must_use]
fn looks_like_session_control_reply(data: &[u8]) -> bool {
    data.len() >= 2 && matches!(data[1], 0x7F | 0x50)
}

/// Passively scan `frames` and return the set of arbitration ids that, within the listening
/// window, emitted something shaped like a diagnostic-session-control reply.
///
/// This is the ambient "auto-blacklist" helper: endpoint discovery uses it to avoid probing ids
/// that are already chattering on the bus before any probe has been sent.
pub fn auto_blacklist<'a>(frames: impl IntoIterator<Item = &'a Frame>) -> HashSet<u32> {
    frames
        .into_iter()
        .filter(|frame| looks_like_session_control_reply(&frame.data))
        .map(|frame| frame.id)
        .collect()
}

/// An in-memory [`Bus`] driven by a script of scheduled replies, keyed by the arbitration id a
/// frame was sent to.
#[derive(Default)]
pub struct MockBus {
    script: HashMap<u32, VecDeque<(Duration, Frame)>>,
    pending: VecDeque<(Instant, Frame)>,
    filter: Option<HashSet<u32>>,
    pub sent: Vec<Frame>,
}

impl MockBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arrange for a frame sent to `request_id` to elicit `reply` after `delay`.
    ///
    /// Multiple replies queued for the same `request_id` are emitted in the order scheduled, one
    /// per `send`.
    pub fn on_send(&mut self, request_id: u32, delay: Duration, reply: Frame) {
        self.script
            .entry(request_id)
            .or_default()
            .push_back((delay, reply));
    }

    fn passes_filter(&self, id: u32) -> bool {
        self.filter.as_ref().is_none_or(|ids| ids.contains(&id))
    }
}

impl Bus for MockBus {
    fn send(&mut self, frame: Frame) -> Result<()> {
        if let Some(queue) = self.script.get_mut(&frame.id)
            && let Some((delay, reply)) = queue.pop_front()
        {
            self.pending.push_back((Instant::now() + delay, reply));
        }
        self.sent.push(frame);
        Ok(())
    }

    fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<Frame>> {
        let deadline = Instant::now() + timeout;
        loop {
            let now = Instant::now();
            if let Some(index) = self
                .pending
                .iter()
                .position(|(arrival, frame)| *arrival <= now && self.passes_filter(frame.id))
            {
                let (_, frame) = self.pending.remove(index).expect("index just found");
                return Ok(Some(frame));
            }
            if now >= deadline {
                return Ok(None);
            }
            std::thread::sleep(Duration::from_millis(1).min(deadline - now));
        }
    }

    fn set_filter(&mut self, ids: &[u32]) {
        self.filter = Some(ids.iter().copied().collect());
    }

    fn clear_filter(&mut self) {
        self.filter = None;
    }
}

impl Bus for Box<dyn Bus + '_> {
    fn send(&mut self, frame: Frame) -> Result<()> {
        (**self).send(frame)
    }

    fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<Frame>> {
        (**self).recv_timeout(timeout)
    }

    fn set_filter(&mut self, ids: &[u32]) {
        (**self).set_filter(ids);
    }

    fn clear_filter(&mut self) {
        (**self).clear_filter();
    }
}

/// Raw CAN bus access backed by the kernel's SocketCAN stack.
///
/// Filtering is done in software: the kernel socket is opened unfiltered and
/// [`Bus::set_filter`] narrows what [`Bus::recv_timeout`] returns, mirroring how the
/// endpoint-discovery verification pass wants to watch exactly one response id at a time.
#[cfg(feature = "socketcan")]
pub mod socketcan_bus {
    use std::collections::HashSet;
    use std::time::{Duration, Instant};

    use socketcan::{CanFrame, CanSocket, EmbeddedFrame, ExtendedId, Frame as SocketCanFrame, Socket};

    use super::{Bus, Frame};
    use crate::Result;
    use crate::error::Error;

    fn io_err(source: impl std::fmt::Display) -> Error {
        Error::IoError(std::io::Error::other(source.to_string()))
    }

    pub struct SocketCanBus {
        socket: CanSocket,
        filter: Option<HashSet<u32>>,
    }

    impl SocketCanBus {
        /// Open `interface` (e.g. `"can0"`) for raw frame access.
        ///
        /// # Errors
        /// Returns an error if the interface cannot be opened.
        pub fn open(interface: &str) -> Result<Self> {
            let socket = CanSocket::open(interface).map_err(io_err)?;
            socket.set_nonblocking(true).map_err(io_err)?;
            Ok(Self {
                socket,
                filter: None,
            })
        }

        fn passes_filter(&self, id: u32) -> bool {
            self.filter.as_ref().is_none_or(|ids| ids.contains(&id))
        }
    }

    impl Bus for SocketCanBus {
        fn send(&mut self, frame: Frame) -> Result<()> {
            let can_id = ExtendedId::new(frame.id).ok_or_else(|| Error::InvalidArgument {
                field: "id",
                constraint: "<= 0x1FFF_FFFF",
                value: format!("{:#x}", frame.id),
            })?;
            let can_frame = CanFrame::new(can_id, &frame.data)
                .ok_or(Error::IncorrectMessageLengthOrInvalidFormat)?;
            self.socket.write_frame(&can_frame).map_err(io_err)?;
            Ok(())
        }

        fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<Frame>> {
            let deadline = Instant::now() + timeout;
            loop {
                match self.socket.read_frame() {
                    Ok(frame) => {
                        let id = frame.raw_id();
                        if self.passes_filter(id) {
                            return Ok(Some(Frame::new(id, frame.data().to_vec())));
                        }
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {}
                    Err(e) => return Err(Error::IoError(e)),
                }
                if Instant::now() >= deadline {
                    return Ok(None);
                }
                std::thread::sleep(Duration::from_millis(1));
            }
        }

        fn set_filter(&mut self, ids: &[u32]) {
            self.filter = Some(ids.iter().copied().collect());
        }

        fn clear_filter(&mut self) {
            self.filter = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_blacklist_flags_session_control_shaped_replies() {
        let frames = vec![
            Frame::new(0x7E8, vec![0x50, 0x01, 0, 0, 0, 0]),
            Frame::new(0x123, vec![0xAA, 0xBB]),
            Frame::new(0x7EA, vec![0x03, 0x7F, 0x10, 0x11]),
        ];
        let blacklist = auto_blacklist(&frames);
        assert!(blacklist.contains(&0x7E8));
        assert!(!blacklist.contains(&0x123));
        assert!(!blacklist.contains(&0x7EA));
    }

    #[test]
    fn mock_bus_replies_after_delay_and_respects_filter() {
        let mut bus = MockBus::new();
        bus.on_send(
            0x7E0,
            Duration::from_millis(5),
            Frame::new(0x7E8, vec![0x50, 0x01, 0, 0, 0, 0]),
        );
        bus.send(Frame::new(0x7E0, vec![0x10, 0x01])).unwrap();
        let reply = bus.recv_timeout(Duration::from_millis(50)).unwrap();
        assert_eq!(reply, Some(Frame::new(0x7E8, vec![0x50, 0x01, 0, 0, 0, 0])));

        bus.on_send(
            0x7E1,
            Duration::from_millis(1),
            Frame::new(0x7E9, vec![0x50, 0x01]),
        );
        bus.set_filter(&[0x7E8]);
        bus.send(Frame::new(0x7E1, vec![0x10, 0x01])).unwrap();
        let filtered_out = bus.recv_timeout(Duration::from_millis(20)).unwrap();
        assert_eq!(filtered_out, None);
    }
}
