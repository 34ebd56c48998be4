use crate::scoring::ScoreMatrix;

use super::arc::Arc;

/// A head assignment for every token of a sentence, indexed by dependent id.
///
/// Position 0 (ROOT) never has a head. The decoder produces a fresh tree per
/// call; gold trees are built the same way from a sentence's head column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyTree {
    heads: Vec<Option<usize>>,
}

impl DependencyTree {
    /// Builds a tree from a head column, `heads[0]` being ROOT's (ignored) slot.
    #[must_use]
    pub fn from_heads(mut heads: Vec<Option<usize>>) -> Self {
        if let Some(root) = heads.first_mut() {
            *root = None;
        }
        Self { heads }
    }

    /// A tree over `len` tokens with no arcs yet.
    pub(crate) fn unattached(len: usize) -> Self {
        Self {
            heads: vec![None; len],
        }
    }

    pub(crate) fn attach(&mut self, arc: Arc) {
        self.heads[arc.dependent] = Some(arc.head);
    }

    /// Number of tokens covered, ROOT included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heads.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heads.is_empty()
    }

    /// Returns `true` when the tree covers ROOT alone.
    #[must_use]
    pub fn has_no_words(&self) -> bool {
        self.heads.len() < 2
    }

    #[must_use]
    pub fn head(&self, dependent: usize) -> Option<usize> {
        self.heads.get(dependent).copied().flatten()
    }

    /// Arcs in dependent order.
    pub fn arcs(&self) -> impl Iterator<Item = Arc> + '_ {
        self.heads
            .iter()
            .enumerate()
            .filter_map(|(dependent, head)| head.map(|h| Arc::new(h, dependent)))
    }

    /// Every word has exactly one in-range head and following heads from any
    /// word reaches ROOT without revisiting a token.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        let n = self.heads.len();
        for dependent in 1..n {
            match self.heads[dependent] {
                Some(h) if h < n && h != dependent => {}
                _ => return false,
            }
        }

        for start in 1..n {
            let mut current = start;
            let mut steps = 0;
            while current != 0 {
                match self.heads[current] {
                    Some(h) => current = h,
                    None => return false,
                }
                steps += 1;
                if steps > n {
                    return false;
                }
            }
        }
        true
    }

    /// No two arcs cross when drawn above the sentence.
    #[must_use]
    pub fn is_projective(&self) -> bool {
        let arcs: Vec<Arc> = self.arcs().collect();
        arcs.iter()
            .enumerate()
            .all(|(i, a)| arcs[i + 1..].iter().all(|b| !a.crosses(*b)))
    }

    /// Sum of the scores of this tree's arcs.
    #[must_use]
    pub fn score(&self, scores: &ScoreMatrix) -> f32 {
        self.arcs().map(|arc| scores.get(arc.head, arc.dependent)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(heads: &[usize]) -> DependencyTree {
        let mut all = vec![None];
        all.extend(heads.iter().map(|&h| Some(h)));
        DependencyTree::from_heads(all)
    }

    #[test]
    fn well_formed_projective_tree() {
        let t = tree(&[2, 0, 2]);
        assert!(t.is_well_formed());
        assert!(t.is_projective());
        assert_eq!(t.arcs().count(), 3);
        assert_eq!(t.head(2), Some(0));
        assert_eq!(t.head(0), None);
        assert_eq!(t.head(9), None);
    }

    #[test]
    fn emptiness_matches_len() {
        let root_only = DependencyTree::from_heads(vec![None]);
        assert_eq!(root_only.len(), 1);
        assert!(!root_only.is_empty());
        assert!(root_only.has_no_words());

        let none = DependencyTree::from_heads(Vec::new());
        assert!(none.is_empty());
        assert!(none.has_no_words());

        let t = tree(&[0]);
        assert!(!t.is_empty());
        assert!(!t.has_no_words());
    }

    #[test]
    fn cycles_are_not_well_formed() {
        // 1 -> 2 -> 1
        let t = tree(&[2, 1, 0]);
        assert!(!t.is_well_formed());
    }

    #[test]
    fn missing_head_is_not_well_formed() {
        let t = DependencyTree::from_heads(vec![None, Some(0), None]);
        assert!(!t.is_well_formed());
        assert!(!DependencyTree::unattached(3).is_well_formed());
    }

    #[test]
    fn crossing_tree_is_not_projective() {
        // 3 -> 1 and 0 -> 2 cross: 0 < 1 < 2 < 3
        let t = tree(&[3, 0, 2]);
        assert!(t.is_well_formed());
        assert!(!t.is_projective());
    }

    #[test]
    fn score_sums_arc_cells() {
        let mut scores = ScoreMatrix::zeros(4);
        scores.set(2, 1, 1.5);
        scores.set(0, 2, 2.0);
        scores.set(2, 3, 0.5);
        scores.set(1, 3, 10.0);
        assert_eq!(tree(&[2, 0, 2]).score(&scores), 4.0);
    }
}
