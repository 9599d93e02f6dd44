use crate::dataloader::Corpus;

/// Round-robin traversal state over the categories of a corpus.
///
/// Examples are taken one per category in index order; after a full cycle
/// the position inside every category advances by one. Exhausted categories
/// are skipped without ending the traversal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoundRobinCursor {
    global: usize,
    category: usize,
    within: usize,
}

impl RoundRobinCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of examples emitted so far
    pub fn position(&self) -> usize {
        self.global
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_exhausted(&self, corpus: &Corpus) -> bool {
        self.global >= corpus.total_examples()
    }

    /// Next `(text, label)` pair, `None` once every example was emitted
    pub fn select_next<'a>(&mut self, corpus: &'a Corpus) -> Option<(&'a str, usize)> {
        let categories = corpus.categories();

        while !self.is_exhausted(corpus) {
            if self.category < categories.len() {
                let cat = &categories[self.category];
                self.category += 1;

                if let Some(text) = cat.examples.get(self.within) {
                    self.global += 1;
                    return Some((text.as_str(), cat.label));
                }
            } else {
                self.category = 0;
                self.within += 1;
            }
        }

        None
    }

    /// Walks up to `slots` category visits. A visit to an exhausted category
    /// uses up its slot without emitting anything, so the result can be
    /// shorter than `slots` (even empty) before the corpus runs out.
    pub fn select_slots<'a>(&mut self, corpus: &'a Corpus, slots: usize) -> Vec<(&'a str, usize)> {
        let categories = corpus.categories();
        let mut out = Vec::with_capacity(slots);
        let mut slot = 0;

        while slot < slots && !self.is_exhausted(corpus) {
            if self.category < categories.len() {
                let cat = &categories[self.category];

                if let Some(text) = cat.examples.get(self.within) {
                    out.push((text.as_str(), cat.label));
                    self.global += 1;
                }

                self.category += 1;
                slot += 1;
            } else {
                // wrap around, the slot is retried
                self.category = 0;
                self.within += 1;
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataloader::Category;

    fn corpus(sizes: &[usize]) -> Corpus {
        let cats = sizes
            .iter()
            .enumerate()
            .map(|(label, n)| Category {
                label,
                tag: format!("c{}", label),
                examples: (0..*n).map(|i| format!("c{}-{}", label, i)).collect(),
            })
            .collect();

        Corpus::new(cats).unwrap()
    }

    #[test]
    fn interleaves_unequal_categories() {
        let c = corpus(&[2, 3]);
        let mut cur = RoundRobinCursor::new();

        let mut order = Vec::new();
        while let Some((_, label)) = cur.select_next(&c) {
            order.push(label);
        }

        assert_eq!(order, vec![0, 1, 0, 1, 1]);
        assert_eq!(cur.position(), 5);
        assert!(cur.is_exhausted(&c));
    }

    #[test]
    fn slots_match_single_steps_when_nothing_is_skipped() {
        let c = corpus(&[2, 3]);
        let mut cur = RoundRobinCursor::new();

        let picked = cur.select_slots(&c, 10);
        let texts: Vec<&str> = picked.iter().map(|(t, _)| *t).collect();

        assert_eq!(texts, vec!["c0-0", "c1-0", "c0-1", "c1-1", "c1-2"]);
    }

    #[test]
    fn exhausted_category_uses_up_a_slot() {
        let c = corpus(&[1, 3]);
        let mut cur = RoundRobinCursor::new();

        assert_eq!(cur.select_slots(&c, 2).len(), 2);

        // category 0 is exhausted but its visit still counts
        let short = cur.select_slots(&c, 2);
        assert_eq!(short, vec![("c1-1", 1)]);

        let last = cur.select_slots(&c, 2);
        assert_eq!(last, vec![("c1-2", 1)]);
        assert!(cur.is_exhausted(&c));
    }

    #[test]
    fn batch_can_be_empty_before_exhaustion() {
        let c = corpus(&[1, 3]);
        let mut cur = RoundRobinCursor::new();

        assert_eq!(cur.select_slots(&c, 1).len(), 1);
        assert_eq!(cur.select_slots(&c, 1).len(), 1);
        assert!(cur.select_slots(&c, 1).is_empty());
        assert!(!cur.is_exhausted(&c));
        assert_eq!(cur.select_slots(&c, 1), vec![("c1-1", 1)]);
    }

    #[test]
    fn reset_restarts_traversal() {
        let c = corpus(&[3, 1, 2]);
        let mut cur = RoundRobinCursor::new();

        let first: Vec<_> = std::iter::from_fn(|| cur.select_next(&c)).collect();
        cur.reset();
        assert_eq!(cur, RoundRobinCursor::new());
        let second: Vec<_> = std::iter::from_fn(|| cur.select_next(&c)).collect();

        assert_eq!(first.len(), 6);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_corpus_is_exhausted() {
        let c = corpus(&[0, 0]);
        let mut cur = RoundRobinCursor::new();

        assert!(cur.is_exhausted(&c));
        assert!(cur.select_next(&c).is_none());
        assert!(cur.select_slots(&c, 4).is_empty());
    }
}
