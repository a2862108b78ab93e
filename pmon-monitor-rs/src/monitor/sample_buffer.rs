/// Fixed-capacity ring buffer of quantized graph Y coordinates.
///
/// Once full, every [`push`](Self::push) overwrites the oldest point, so
/// the buffer always holds the last `min(N, pushed)` points in the order
/// they were pushed. `N` must be non-zero.
///
/// # Examples
///
/// ```
/// use pmon::monitor::SampleBuffer;
///
/// let mut buf = SampleBuffer::<4>::new();
/// for y in 0..6 {
///     buf.push(y);
/// }
/// assert!(buf.iter().eq([2, 3, 4, 5]));
/// ```
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SampleBuffer<const N: usize> {
    points: [u8; N],
    /// Slot of the oldest valid point.
    first: usize,
    /// Number of valid points, never more than `N`.
    len: usize,
}

impl<const N: usize> Default for SampleBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SampleBuffer<N> {
    /// Create an empty buffer.
    pub const fn new() -> Self {
        Self {
            points: [0; N],
            first: 0,
            len: 0,
        }
    }

    /// Drop every point. Slot contents are left as-is and overwritten on
    /// the next pushes.
    pub fn clear(&mut self) {
        self.first = 0;
        self.len = 0;
    }

    /// Append a point, evicting the oldest one if the buffer is full.
    pub fn push(&mut self, y: u8) {
        if N == 0 {
            return;
        }

        if self.len == N {
            self.points[self.first] = y;
            self.first = (self.first + 1) % N;
            return;
        }

        let slot = (self.first + self.len) % N;
        self.points[slot] = y;
        self.len += 1;
    }

    /// Number of valid points.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no points have been pushed since the last clear.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` once the next push will evict a point.
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Maximum number of points held.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Iterate the points from oldest to newest.
    ///
    /// Each call starts a fresh pass over the buffer.
    pub fn iter(&self) -> Iter<'_, N> {
        Iter {
            buffer: self,
            offset: 0,
        }
    }
}

impl<'a, const N: usize> IntoIterator for &'a SampleBuffer<N> {
    type Item = u8;
    type IntoIter = Iter<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Oldest-to-newest iterator over a [`SampleBuffer`].
pub struct Iter<'a, const N: usize> {
    buffer: &'a SampleBuffer<N>,
    /// Points already yielded.
    offset: usize,
}

impl<const N: usize> Iterator for Iter<'_, N> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.offset >= self.buffer.len {
            return None;
        }
        let slot = (self.buffer.first + self.offset) % N;
        self.offset += 1;
        Some(self.buffer.points[slot])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len - self.offset;
        (remaining, Some(remaining))
    }
}

impl<const N: usize> ExactSizeIterator for Iter<'_, N> {}

// ── Tests ────────────────────────────────────────────────────────────────
