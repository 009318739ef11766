//! Console ring: Fixed-capacity history of status messages.
//!
//! Holds the last [`CONSOLE_CAPACITY`] messages. Pushing into a full ring
//! overwrites the oldest one, so memory use is bounded no matter how
//! chatty the editor gets.

/// Number of messages retained.
pub const CONSOLE_CAPACITY: usize = 16;

/// Longest message kept, in bytes. Longer messages are cut on a char
/// boundary.
pub const MESSAGE_MAX_BYTES: usize = 255;

/// Circular buffer of status messages.
#[derive(Debug, Clone)]
pub struct ConsoleMessageRing {
    /// Slot storage; `None` until first written.
    slots: [Option<String>; CONSOLE_CAPACITY],
    /// Slot of the oldest message.
    front: usize,
    /// Slot the next push writes to.
    rear: usize,
    /// Number of live messages.
    size: usize,
}

impl Default for ConsoleMessageRing {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleMessageRing {
    /// Create an empty ring.
    pub const fn new() -> Self {
        Self {
            slots: [const { None }; CONSOLE_CAPACITY],
            front: 0,
            rear: 0,
            size: 0,
        }
    }

    /// Number of messages held.
    #[inline]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Whether no message has been pushed since creation or the last clear.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Add a message, evicting the oldest if the ring is full.
    pub fn push(&mut self, message: &str) {
        self.slots[self.rear] = Some(truncate(message, MESSAGE_MAX_BYTES).to_owned());
        self.rear = (self.rear + 1) % CONSOLE_CAPACITY;
        if self.size == CONSOLE_CAPACITY {
            self.front = (self.front + 1) % CONSOLE_CAPACITY;
        } else {
            self.size += 1;
        }
    }

    /// The most recent message.
    pub fn latest(&self) -> Option<&str> {
        if self.size == 0 {
            return None;
        }
        let slot = (self.rear + CONSOLE_CAPACITY - 1) % CONSOLE_CAPACITY;
        self.slots[slot].as_deref()
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> + '_ {
        (0..self.size).filter_map(move |i| self.slots[(self.front + i) % CONSOLE_CAPACITY].as_deref())
    }

    /// Drop every message.
    pub fn clear(&mut self) {
        self.slots = [const { None }; CONSOLE_CAPACITY];
        self.front = 0;
        self.rear = 0;
        self.size = 0;
    }
}

/// Longest prefix of `s` no longer than `max` bytes that ends on a char
/// boundary.
fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
