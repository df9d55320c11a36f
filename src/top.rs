//! Selection of the most frequent words

use std::{
    cmp::Reverse,
    collections::{BinaryHeap, VecDeque},
    num::NonZeroUsize,
};

/// Pick the most frequent words, by decreasing number of occurences
///
/// Words must be provided in order of first occurence, which is used to break
/// ties between words with the same number of occurences.
pub fn pick_top_words<'word>(
    words_and_counts: impl IntoIterator<Item = (&'word str, usize)>,
    max_len: NonZeroUsize,
) -> Vec<(&'word str, usize)> {
    // Find the top words using a bounded heap whose greatest element is the
    // least interesting word (lowest count, then latest first occurence)
    let max_len = max_len.get();
    let mut heap = BinaryHeap::with_capacity(max_len + 1);
    for (position, (word, count)) in words_and_counts.into_iter().enumerate() {
        heap.push((Reverse(count), position, word));
        if heap.len() > max_len {
            heap.pop();
        }
    }

    // Collect the results by decreasing popularity. Popping the heap yields
    // the least interesting words first, hence the order reversal.
    let mut result = VecDeque::with_capacity(heap.len());
    while let Some((Reverse(count), _position, word)) = heap.pop() {
        result.push_front((word, count));
    }
    result.into()
}
