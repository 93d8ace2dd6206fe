//! Big-endian basis indexing for qubit registers.
//!
//! Qubit 0 is the most significant bit of a basis index, so for `n = 3` the
//! index `0b100 = 4` is the state with qubit 0 set. Labels are written with
//! qubit 0 leftmost.

/// Bit mask selecting `qubit` in an `n`-qubit basis index.
///
/// # Example
/// ```
/// use densesim::index::qubit_mask;
/// assert_eq!(qubit_mask(0, 3), 0b100);
/// assert_eq!(qubit_mask(2, 3), 0b001);
/// ```
#[inline]
pub fn qubit_mask(qubit: usize, num_qubits: usize) -> usize {
    debug_assert!(qubit < num_qubits);
    1 << (num_qubits - 1 - qubit)
}

/// Value (0 or 1) of `qubit` in basis index `index`.
///
/// # Example
/// ```
/// use densesim::index::qubit_bit;
/// // "10" on two qubits: qubit 0 is set
/// assert_eq!(qubit_bit(2, 0, 2), 1);
/// assert_eq!(qubit_bit(2, 1, 2), 0);
/// ```
#[inline]
pub fn qubit_bit(index: usize, qubit: usize, num_qubits: usize) -> usize {
    (index >> (num_qubits - 1 - qubit)) & 1
}

/// Flip `qubit` in basis index `index`.
#[inline]
pub fn flip_qubit(index: usize, qubit: usize, num_qubits: usize) -> usize {
    index ^ qubit_mask(qubit, num_qubits)
}

/// Clear `qubit` in `index`, keeping every other bit.
#[inline]
pub fn without_qubit(index: usize, qubit: usize, num_qubits: usize) -> usize {
    index & !qubit_mask(qubit, num_qubits)
}

/// Zero-padded binary label of `index`, width `num_qubits`.
///
/// # Example
/// ```
/// use densesim::index::basis_label;
/// assert_eq!(basis_label(5, 4), "0101");
/// ```
pub fn basis_label(index: usize, num_qubits: usize) -> String {
    format!("{:0width$b}", index, width = num_qubits)
}

/// Parse a binary label back into a basis index.
///
/// Returns `None` for empty labels or characters other than `0`/`1`.
pub fn parse_label(label: &str) -> Option<usize> {
    if label.is_empty() || !label.bytes().all(|b| b == b'0' || b == b'1') {
        return None;
    }
    usize::from_str_radix(label, 2).ok()
}

/// Iterate over all indices of an `n`-qubit register where `qubit` has value `val`.
pub fn iter_with_qubit(
    qubit: usize,
    val: usize,
    num_qubits: usize,
) -> impl Iterator<Item = usize> {
    (0..1usize << num_qubits).filter(move |&i| qubit_bit(i, qubit, num_qubits) == val)
}
