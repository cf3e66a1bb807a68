/// Truncates two series to their common leading length
///
/// Alignment is purely positional: the first `n = min(a.len(), b.len())`
/// elements of each series are kept and the tails are dropped. No timestamp
/// matching takes place.
///
/// # Arguments
///
/// * `a` - The first series
/// * `b` - The second series
///
/// # Returns
///
/// * `(&[T], &[U])` - Both series truncated to the same length
///
/// # Examples
///
/// ```
/// use price_correlation::align;
///
/// let (a, b) = align(&[1.0, 2.0, 3.0, 4.0, 5.0], &[9.0, 8.0, 7.0]);
/// assert_eq!(a, &[1.0, 2.0, 3.0]);
/// assert_eq!(b, &[9.0, 8.0, 7.0]);
/// ```
#[inline]
pub fn align<'a, 'b, T, U>(a: &'a [T], b: &'b [U]) -> (&'a [T], &'b [U]) {
    let n = a.len().min(b.len());
    (&a[..n], &b[..n])
}
