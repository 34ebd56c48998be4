//! # Eisner Decoding for Projective Dependency Trees
//!
//! Finds the maximum-scoring projective tree over a score matrix with the
//! first-order span chart of Eisner (1996). Spans are filled by increasing
//! length in `O(n³)` time; backpointers record the winning split of every
//! cell so the tree can be read back in a single walk from the full span.

use crate::error::{ArborError, Result};
use crate::scoring::ScoreMatrix;
use crate::types::{Arc, DependencyTree, Direction};

/// Eisner decoder for first-order arc scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct EisnerDecoder;

/// Whether a span still owes its outer arc (`Open`) or is complete (`Closed`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Open,
    Closed,
}

/// Best score of a chart cell and the split that achieved it.
#[derive(Debug, Clone, Copy)]
struct ChartCell {
    score: f32,
    split: usize,
}

impl ChartCell {
    const EMPTY: ChartCell = ChartCell {
        score: 0.0,
        split: 0,
    };
}

/// Open and closed span tables over `(start, end, direction)`.
struct Chart {
    size: usize,
    open: Vec<ChartCell>,
    closed: Vec<ChartCell>,
}

impl Chart {
    fn new(size: usize) -> Self {
        let cells = size * size * 2;
        Self {
            size,
            open: vec![ChartCell::EMPTY; cells],
            closed: vec![ChartCell::EMPTY; cells],
        }
    }

    fn index(&self, s: usize, t: usize, dir: Direction) -> usize {
        (s * self.size + t) * 2 + dir.index()
    }

    fn get(&self, shape: Shape, s: usize, t: usize, dir: Direction) -> ChartCell {
        let idx = self.index(s, t, dir);
        match shape {
            Shape::Open => self.open[idx],
            Shape::Closed => self.closed[idx],
        }
    }

    fn score(&self, shape: Shape, s: usize, t: usize, dir: Direction) -> f32 {
        self.get(shape, s, t, dir).score
    }

    fn set(&mut self, shape: Shape, s: usize, t: usize, dir: Direction, cell: ChartCell) {
        let idx = self.index(s, t, dir);
        match shape {
            Shape::Open => self.open[idx] = cell,
            Shape::Closed => self.closed[idx] = cell,
        }
    }
}

/// Scans `lo..=hi` and keeps the first split with the highest score.
fn best_split(lo: usize, hi: usize, score_at: impl Fn(usize) -> f32) -> ChartCell {
    let mut best = ChartCell {
        score: score_at(lo),
        split: lo,
    };
    for split in lo + 1..=hi {
        let score = score_at(split);
        if score > best.score {
            best = ChartCell { score, split };
        }
    }
    best
}

impl EisnerDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decodes the best projective tree for `scores`.
    ///
    /// `scores` is indexed `[head][dependent]` with ROOT at position 0. Ties
    /// go to the lowest split index, so equal inputs always give equal trees.
    ///
    /// # Errors
    ///
    /// Returns `ArborError::InvalidInput` if the matrix covers fewer than two
    /// tokens (ROOT plus at least one word).
    ///
    /// # Examples
    /// ```
    /// use arbor_core::parser::EisnerDecoder;
    /// use arbor_core::scoring::ScoreMatrix;
    ///
    /// let mut scores = ScoreMatrix::zeros(3);
    /// scores.set(0, 2, 5.0);
    /// scores.set(2, 1, 5.0);
    ///
    /// let tree = EisnerDecoder::new().decode(&scores).unwrap();
    /// assert_eq!(tree.head(1), Some(2));
    /// assert_eq!(tree.head(2), Some(0));
    /// ```
    pub fn decode(&self, scores: &ScoreMatrix) -> Result<DependencyTree> {
        let n = scores.size();
        if n < 2 {
            return Err(ArborError::invalid_input(format!(
                "cannot decode a sentence of {n} token(s); need ROOT plus at least one word"
            )));
        }

        let chart = self.fill_chart(scores);

        let mut tree = DependencyTree::unattached(n);
        backtrack(&chart, 0, n - 1, Direction::Right, Shape::Closed, &mut tree);
        debug_assert!(tree.is_well_formed());
        Ok(tree)
    }

    /// Decodes from row-major nested vectors.
    ///
    /// # Errors
    ///
    /// Returns `ArborError::InvalidInput` if the rows do not form a square
    /// matrix or cover fewer than two tokens.
    pub fn decode_rows(&self, rows: &[Vec<f32>]) -> Result<DependencyTree> {
        let scores = ScoreMatrix::from_rows(rows)?;
        self.decode(&scores)
    }

    fn fill_chart(&self, scores: &ScoreMatrix) -> Chart {
        use Direction::{Left, Right};
        use Shape::{Closed, Open};

        let n = scores.size();
        let mut chart = Chart::new(n);

        for width in 1..n {
            for s in 0..n - width {
                let t = s + width;

                // Two facing complete halves joined by the arc t -> s or s -> t.
                let halves = |k: usize| chart.score(Closed, s, k, Right) + chart.score(Closed, k + 1, t, Left);
                let open_left = best_split(s, t - 1, |k| halves(k) + scores.get(t, s));
                let open_right = best_split(s, t - 1, |k| halves(k) + scores.get(s, t));
                chart.set(Open, s, t, Left, open_left);
                chart.set(Open, s, t, Right, open_right);

                let closed_left = best_split(s, t - 1, |k| {
                    chart.score(Closed, s, k, Left) + chart.score(Open, k, t, Left)
                });
                let closed_right = best_split(s + 1, t, |k| {
                    chart.score(Open, s, k, Right) + chart.score(Closed, k, t, Right)
                });
                chart.set(Closed, s, t, Left, closed_left);
                chart.set(Closed, s, t, Right, closed_right);
            }
        }

        chart
    }
}

/// Reads arcs back out of the chart, mirroring the forward recursion.
///
/// Recursion depth is bounded by the sentence length.
fn backtrack(chart: &Chart, s: usize, t: usize, dir: Direction, shape: Shape, tree: &mut DependencyTree) {
    if s == t {
        return;
    }

    let k = chart.get(shape, s, t, dir).split;
    match (shape, dir) {
        (Shape::Closed, Direction::Left) => {
            backtrack(chart, s, k, Direction::Left, Shape::Closed, tree);
            backtrack(chart, k, t, Direction::Left, Shape::Open, tree);
        }
        (Shape::Closed, Direction::Right) => {
            backtrack(chart, s, k, Direction::Right, Shape::Open, tree);
            backtrack(chart, k, t, Direction::Right, Shape::Closed, tree);
        }
        (Shape::Open, _) => {
            let arc = match dir {
                Direction::Left => Arc::new(t, s),
                Direction::Right => Arc::new(s, t),
            };
            tree.attach(arc);
            backtrack(chart, s, k, Direction::Right, Shape::Closed, tree);
            backtrack(chart, k + 1, t, Direction::Left, Shape::Closed, tree);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Every well-formed projective tree over `n` tokens, by brute force.
    fn projective_trees(n: usize) -> Vec<DependencyTree> {
        let words = n - 1;
        let mut trees = Vec::new();
        let mut heads = vec![0usize; words];
        loop {
            let mut all = vec![None];
            all.extend(heads.iter().map(|&h| Some(h)));
            let tree = DependencyTree::from_heads(all);
            if tree.is_well_formed() && tree.is_projective() {
                trees.push(tree);
            }

            // odometer over heads[i] in 0..n
            let mut i = 0;
            loop {
                if i == words {
                    return trees;
                }
                heads[i] += 1;
                if heads[i] < n {
                    break;
                }
                heads[i] = 0;
                i += 1;
            }
        }
    }

    fn matrix_from(n: usize, values: &[i8]) -> ScoreMatrix {
        let mut scores = ScoreMatrix::zeros(n);
        for head in 0..n {
            for dep in 1..n {
                if head != dep {
                    scores.set(head, dep, f32::from(values[head * n + dep]));
                }
            }
        }
        scores
    }

    #[test]
    fn test_john_saw_mary() {
        let mut scores = ScoreMatrix::zeros(4);
        scores.set(2, 1, 10.0);
        scores.set(0, 2, 10.0);
        scores.set(2, 3, 10.0);
        // distractors
        scores.set(1, 2, 3.0);
        scores.set(0, 1, 4.0);
        scores.set(3, 2, 2.0);

        let tree = EisnerDecoder::new().decode(&scores).unwrap();
        assert_eq!(tree.head(1), Some(2));
        assert_eq!(tree.head(2), Some(0));
        assert_eq!(tree.head(3), Some(2));
        assert_eq!(tree.score(&scores), 30.0);
    }

    #[test]
    fn test_single_word() {
        let tree = EisnerDecoder::new().decode(&ScoreMatrix::zeros(2)).unwrap();
        assert_eq!(tree.head(1), Some(0));
        assert_eq!(tree.arcs().count(), 1);
    }

    #[test]
    fn test_rejects_root_only() {
        let decoder = EisnerDecoder::new();
        assert!(matches!(decoder.decode(&ScoreMatrix::zeros(1)), Err(ArborError::InvalidInput(_))));
        assert!(matches!(decoder.decode(&ScoreMatrix::zeros(0)), Err(ArborError::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_non_square_rows() {
        let rows = vec![vec![0.0, 1.0, 2.0], vec![0.0, 1.0]];
        let result = EisnerDecoder::new().decode_rows(&rows);
        assert!(matches!(result, Err(ArborError::InvalidInput(_))));
    }

    #[test]
    fn test_prefers_projective_over_crossing() {
        // 0->2 and 3->1 would cross; the best projective tree must give one up.
        let mut scores = ScoreMatrix::zeros(4);
        scores.set(0, 2, 10.0);
        scores.set(3, 1, 10.0);
        scores.set(2, 3, 10.0);
        scores.set(2, 1, 1.0);

        let tree = EisnerDecoder::new().decode(&scores).unwrap();
        assert!(tree.is_well_formed());
        assert!(tree.is_projective());
        assert_eq!(tree.score(&scores), 21.0);
        assert_eq!(tree.head(1), Some(2));
    }

    #[test]
    fn test_all_zero_scores_are_deterministic() {
        let decoder = EisnerDecoder::new();
        let scores = ScoreMatrix::zeros(6);
        let first = decoder.decode(&scores).unwrap();
        let second = decoder.decode(&scores).unwrap();
        assert_eq!(first, second);
        assert!(first.is_well_formed());
        assert!(first.is_projective());
    }

    #[test]
    fn test_ties_take_lowest_split() {
        // every tree scores zero; lowest splits give the right-branching chain
        let decoder = EisnerDecoder::new();
        for n in 2..=6 {
            let tree = decoder.decode(&ScoreMatrix::zeros(n)).unwrap();
            let heads: Vec<Option<usize>> = (1..n).map(|d| tree.head(d)).collect();
            let chain: Vec<Option<usize>> = (0..n - 1).map(Some).collect();
            assert_eq!(heads, chain, "n = {n}");
        }

        let tree = decoder.decode(&ScoreMatrix::zeros(5)).unwrap();
        assert_eq!(tree, DependencyTree::from_heads(vec![None, Some(0), Some(1), Some(2), Some(3)]));
    }

    #[test]
    fn test_negative_scores_still_give_a_tree() {
        let mut scores = ScoreMatrix::zeros(5);
        for head in 0..5 {
            for dep in 1..5 {
                scores.set(head, dep, -1.0 - (head * 5 + dep) as f32);
            }
        }
        let tree = EisnerDecoder::new().decode(&scores).unwrap();
        assert!(tree.is_well_formed());
        assert!(tree.is_projective());
        assert_eq!(tree.arcs().count(), 4);
    }

    #[test]
    fn test_brute_force_counts() {
        // projective trees rooted at position 0 over 1, 2, 3 words
        assert_eq!(projective_trees(2).len(), 1);
        assert_eq!(projective_trees(3).len(), 3);
        assert_eq!(projective_trees(4).len(), 12);
    }

    proptest! {
        #[test]
        fn decoded_tree_is_well_formed_and_projective(
            n in 2usize..12,
            seed in proptest::collection::vec(-50i8..50, 144),
        ) {
            let scores = matrix_from(n, &seed);
            let tree = EisnerDecoder::new().decode(&scores).unwrap();
            prop_assert_eq!(tree.len(), n);
            prop_assert!(tree.is_well_formed());
            prop_assert!(tree.is_projective());
            prop_assert_eq!(tree.arcs().count(), n - 1);
        }

        #[test]
        fn decoding_is_idempotent(
            n in 2usize..10,
            seed in proptest::collection::vec(-3i8..3, 100),
        ) {
            // small value range forces many ties
            let scores = matrix_from(n, &seed);
            let decoder = EisnerDecoder::new();
            prop_assert_eq!(decoder.decode(&scores).unwrap(), decoder.decode(&scores).unwrap());
        }

        #[test]
        fn decoded_tree_is_optimal_for_short_sentences(
            n in 2usize..=5,
            seed in proptest::collection::vec(-20i8..20, 25),
        ) {
            let scores = matrix_from(n, &seed);
            let tree = EisnerDecoder::new().decode(&scores).unwrap();
            let best = projective_trees(n)
                .iter()
                .map(|t| t.score(&scores))
                .fold(f32::NEG_INFINITY, f32::max);
            prop_assert_eq!(tree.score(&scores), best);
        }
    }
}
