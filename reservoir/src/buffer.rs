/// Append-only byte buffer with a claim cursor.
///
/// Bytes are written at the tail in arrival order and claimed from the
/// front in the same order. The claim cursor only moves when a decode
/// step commits to consuming bytes, so a parser that finds too little
/// data simply returns without claiming and retries after the next
/// write.
///
/// Already-claimed bytes are kept in the backing storage for the life of
/// the reservoir (one reservoir serves one parsing session); they are
/// never re-read.
///
/// # Examples
///
/// ```
/// use reservoir::Reservoir;
///
/// let mut res = Reservoir::new();
/// res.write(&[0xDE, 0xAD]);
/// res.write(&[0xBE, 0xEF]);
///
/// assert_eq!(res.unclaimed(), 4);
/// assert_eq!(res.claim(3), &[0xDE, 0xAD, 0xBE]);
/// assert_eq!(res.unclaimed(), 1);
/// assert_eq!(res.claim(1), &[0xEF]);
/// ```
#[derive(Debug, Default)]
pub struct Reservoir {
    data: Vec<u8>,
    claimed: usize,
}

impl Reservoir {
    /// Creates an empty reservoir.
    pub fn new() -> Self {
        Reservoir {
            data: Vec::new(),
            claimed: 0,
        }
    }

    /// Appends bytes at the tail. The claim cursor is not disturbed.
    pub fn write(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Total number of bytes ever written.
    pub fn total_written(&self) -> usize {
        self.data.len()
    }

    /// Number of bytes consumed by completed decode steps.
    pub fn claimed(&self) -> usize {
        self.claimed
    }

    /// Number of written bytes not yet claimed.
    pub fn unclaimed(&self) -> usize {
        self.data.len() - self.claimed
    }

    /// True if no unclaimed bytes remain.
    pub fn is_drained(&self) -> bool {
        self.unclaimed() == 0
    }

    /// Returns the next `amount` unclaimed bytes in arrival order and
    /// advances the claim cursor past them.
    ///
    /// The reservoir carries no parsing policy: callers must check
    /// [`unclaimed`](Self::unclaimed) first and handle insufficiency
    /// themselves.
    ///
    /// # Panics
    ///
    /// Panics if `amount > self.unclaimed()`.
    pub fn claim(&mut self, amount: usize) -> &[u8] {
        assert!(
            amount <= self.unclaimed(),
            "claim of {amount} bytes with only {} unclaimed",
            self.unclaimed()
        );
        let start = self.claimed;
        self.claimed += amount;
        &self.data[start..self.claimed]
    }
}
