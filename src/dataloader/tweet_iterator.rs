use std::sync::Arc;

use log::{debug, info, trace, warn};

use crate::dataloader::*;
use crate::err::LoaderError;
use crate::text::{DefaultTokenizer, Tokenizer, WordVectors};

/// Sequences longer than this are cut
pub const TRUNCATE_LENGTH: usize = 300;

/// Round-robin batch iterator over a labeled tweet corpus
pub struct TweetIterator {
    corpus: Corpus,
    labels: Vec<String>,
    cursor: RoundRobinCursor,
    batch_size: usize,
    truncate_length: usize,
    word_vectors: Arc<dyn WordVectors>,
    tokenizer: Box<dyn Tokenizer>,
}

impl TweetIterator {
    pub fn new(
        corpus: Corpus,
        word_vectors: Arc<dyn WordVectors>,
        batch_size: usize,
    ) -> Result<Self, LoaderError> {
        if batch_size == 0 {
            return Err(LoaderError::InvalidFormat(
                "batch size must be positive".to_owned(),
            ));
        }

        if word_vectors.dim() == 0 {
            return Err(LoaderError::InvalidFormat(
                "word vectors have zero length".to_owned(),
            ));
        }

        info!(
            "Tweet iterator : {} examples, {} categories, batch {}, vector size {}",
            corpus.total_examples(),
            corpus.num_categories(),
            batch_size,
            word_vectors.dim()
        );

        Ok(Self {
            labels: corpus.tags(),
            corpus,
            cursor: RoundRobinCursor::new(),
            batch_size,
            truncate_length: TRUNCATE_LENGTH,
            word_vectors,
            tokenizer: Box::new(DefaultTokenizer::default()),
        })
    }

    pub fn from_manifest(
        manifest: &Manifest,
        word_vectors: Arc<dyn WordVectors>,
        batch_size: usize,
    ) -> Result<Self, LoaderError> {
        let corpus = Corpus::load(manifest)?;
        Self::new(corpus, word_vectors, batch_size)
    }

    pub fn truncate_length(mut self, len: usize) -> Self {
        self.truncate_length = len;
        self
    }

    pub fn tokenizer(mut self, tokenizer: Box<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Tokens of `text` that have a word vector
    fn known_tokens(&self, text: &str) -> Vec<String> {
        let tokens = self.tokenizer.tokenize(text);
        let all = tokens.len();

        let known: Vec<String> = tokens
            .into_iter()
            .filter(|t| self.word_vectors.has_word(t))
            .collect();

        if known.len() < all {
            trace!("Dropped {} unknown tokens of {}", all - known.len(), all);
        }

        known
    }

    fn build_batch(&mut self, num: usize) -> Result<SequenceBatch, LoaderError> {
        let picked = self.cursor.select_slots(&self.corpus, num);

        if picked.len() < num && !self.cursor.is_exhausted(&self.corpus) {
            warn!("Short batch : {} of {} requested examples", picked.len(), num);
        }

        let rows: Vec<(Vec<String>, usize)> = picked
            .iter()
            .map(|(text, label)| (self.known_tokens(text), *label))
            .collect();

        let longest = rows.iter().map(|(tokens, _)| tokens.len()).max().unwrap_or(0);
        let max_len = longest.min(self.truncate_length);

        if longest > max_len {
            debug!("Truncating sequences of {} tokens to {}", longest, max_len);
        }

        let dim = self.word_vectors.dim();
        let mut batch = SequenceBatch::zeros(rows.len(), dim, self.corpus.num_categories(), max_len);

        for (i, (tokens, label)) in rows.iter().enumerate() {
            for (step, token) in tokens.iter().take(max_len).enumerate() {
                let vector = self
                    .word_vectors
                    .vector(token)
                    .filter(|v| v.len() == dim)
                    .ok_or_else(|| LoaderError::MissingVector(token.clone()))?;

                batch.set_step(i, step, vector);
            }

            let last = tokens.len().min(max_len);

            if last > 0 {
                batch.set_label(i, *label, last - 1);
            }
        }

        debug!(
            "Batch of {} examples, {} steps, cursor {}/{}",
            batch.num_examples(),
            max_len,
            self.cursor.position(),
            self.corpus.total_examples()
        );

        Ok(batch)
    }
}

impl DataLoader for TweetIterator {
    fn has_next(&self) -> bool {
        !self.cursor.is_exhausted(&self.corpus)
    }

    fn next_batch(&mut self) -> Result<SequenceBatch, LoaderError> {
        self.next_n(self.batch_size)
    }

    fn next_n(&mut self, num: usize) -> Result<SequenceBatch, LoaderError> {
        if !self.has_next() {
            return Err(LoaderError::OutOfData);
        }

        self.build_batch(num)
    }

    fn reset(&mut self) {
        self.cursor.reset();
    }

    fn batch(&self) -> usize {
        self.batch_size
    }

    fn cursor(&self) -> usize {
        self.cursor.position()
    }

    fn total_examples(&self) -> usize {
        self.corpus.total_examples()
    }

    fn num_categories(&self) -> usize {
        self.corpus.num_categories()
    }

    fn input_dimension(&self) -> usize {
        self.word_vectors.dim()
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }
}
