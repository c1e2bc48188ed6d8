//! Elements handed back to callers on removal.

use core::fmt;

/// An element removed from a queue.
///
/// The queue no longer references it; dropping the element frees its value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Element {
    value: String,
}

impl Element {
    #[inline]
    pub(crate) const fn new(value: String) -> Self {
        Self { value }
    }

    /// Returns the element's value.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Consumes the element, returning its value buffer.
    #[inline]
    pub fn into_value(self) -> String {
        self.value
    }

    /// Copies the value into `buf` as a NUL-terminated byte string.
    ///
    /// At most `buf.len() - 1` bytes are copied, truncating if needed, and a
    /// terminating zero follows them. An empty buffer is left untouched.
    /// Returns the number of value bytes copied.
    ///
    /// ```
    /// use nexus_ring::{NodePool, Queue};
    ///
    /// let mut pool = NodePool::new();
    /// let queue = Queue::new(&mut pool).unwrap();
    /// queue.insert_tail(&mut pool, "gerbil").unwrap();
    ///
    /// let element = queue.remove_head(&mut pool, None).unwrap();
    /// let mut buf = [0xffu8; 4];
    /// assert_eq!(element.copy_to(&mut buf), 3);
    /// assert_eq!(&buf, b"ger\0");
    /// assert_eq!(element.value(), "gerbil");
    /// ```
    pub fn copy_to(&self, buf: &mut [u8]) -> usize {
        let Some(room) = buf.len().checked_sub(1) else {
            return 0;
        };
        let bytes = self.value.as_bytes();
        let n = bytes.len().min(room);
        buf[..n].copy_from_slice(&bytes[..n]);
        buf[n] = 0;
        n
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for Element {
    fn as_ref(&self) -> &str {
        &self.value
    }
}
