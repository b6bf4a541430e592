pub trait SliceExt<T> {
    /// Binary search for the first element matching `predicate`.
    ///
    /// The slice must be partitioned by the predicate: every non-matching element comes before
    /// every matching one. Returns the slice length when nothing matches.
    fn find_first_index_where<P>(&self, predicate: P) -> usize
    where
        P: FnMut(&T) -> bool;
}

impl<T> SliceExt<T> for [T] {
    fn find_first_index_where<P>(&self, mut predicate: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        let (mut left, mut right) = (0, self.len());
        while left < right {
            let mid = left + (right - left) / 2;
            if predicate(&self[mid]) {
                right = mid;
            } else {
                left = mid + 1;
            }
        }
        left
    }
}
