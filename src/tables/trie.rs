use lexime_trie::DoubleArray;

use super::ConjunctPattern;

#[derive(Debug, PartialEq)]
pub enum TrieLookupResult {
    None,
    Prefix,
    Exact(&'static ConjunctPattern),
    ExactAndPrefix(&'static ConjunctPattern),
}

/// Conjunct patterns keyed by the UTF-8 bytes of their consonant sequence.
pub struct ConjunctTrie {
    da: DoubleArray<u8>,
    values: Vec<&'static ConjunctPattern>,
}

fn key(consonants: &[char]) -> String {
    consonants.iter().collect()
}

impl ConjunctTrie {
    pub fn build(patterns: &'static [ConjunctPattern]) -> Self {
        let mut pairs: Vec<(String, &'static ConjunctPattern)> =
            patterns.iter().map(|p| (key(p.consonants), p)).collect();
        // DoubleArray build needs sorted keys
        pairs.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

        let keys: Vec<&[u8]> = pairs.iter().map(|(k, _)| k.as_bytes()).collect();
        let da = DoubleArray::<u8>::build(&keys);
        let values = pairs.into_iter().map(|(_, p)| p).collect();
        ConjunctTrie { da, values }
    }

    pub fn lookup(&self, consonants: &[char]) -> TrieLookupResult {
        let pr = self.da.probe(key(consonants).as_bytes());
        match (pr.value, pr.has_children) {
            (None, false) => TrieLookupResult::None,
            (None, true) => TrieLookupResult::Prefix,
            (Some(id), false) => TrieLookupResult::Exact(self.values[id as usize]),
            (Some(id), true) => TrieLookupResult::ExactAndPrefix(self.values[id as usize]),
        }
    }

    /// All patterns that are a prefix of `consonants`, longest first.
    pub fn common_prefix_search(&self, consonants: &[char]) -> Vec<&'static ConjunctPattern> {
        let query = key(consonants);
        let mut found: Vec<(usize, &'static ConjunctPattern)> = self
            .da
            .common_prefix_search(query.as_bytes())
            .map(|m| (m.len, self.values[m.value_id as usize]))
            .collect();
        found.sort_by(|a, b| b.0.cmp(&a.0));
        found.into_iter().map(|(_, p)| p).collect()
    }
}
