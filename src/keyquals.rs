use crate::dictionary::AiDictionary;

/// The key-qualifier association index.
///
/// Every valid Digital Link path AI sequence appears as one space-joined
/// string: each `dlpkey` entry contributes its key alone plus every
/// order-preserving subset of each alternative qualifier chain. The list
/// is sorted, so membership and would-it-fit probes are binary searches.
#[derive(Debug, Clone)]
pub(crate) struct KeyQualifiers {
    seqs: Vec<String>,
}

impl KeyQualifiers {
    pub fn new(dict: &AiDictionary) -> Self {
        let mut seqs = Vec::new();
        for entry in dict.entries() {
            let Some(chains) = &entry.dl_key_chains else {
                continue;
            };
            for chain in chains {
                for mask in 0u32..1 << chain.len() {
                    let mut seq = entry.ai.clone();
                    for (i, qual) in chain.iter().enumerate() {
                        if mask & (1 << i) != 0 {
                            seq.push(' ');
                            seq.push_str(qual);
                        }
                    }
                    seqs.push(seq);
                }
            }
            seqs.push(entry.ai.clone());
        }
        seqs.sort_unstable();
        seqs.dedup();
        Self { seqs }
    }

    pub fn contains(&self, seq: &[&str]) -> bool {
        let joined = seq.join(" ");
        self.seqs
            .binary_search_by(|s| s.as_str().cmp(joined.as_str()))
            .is_ok()
    }

    pub fn is_primary_key(&self, ai: &str) -> bool {
        self.contains(&[ai])
    }

    /// Index entries beginning with `key`, in index (sorted) order.
    pub fn sequences_for_key<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> {
        let start = self.seqs.partition_point(|s| s.as_str() < key);
        self.seqs[start..]
            .iter()
            .map(String::as_str)
            .take_while(move |s| {
                *s == key || s.strip_prefix(key).is_some_and(|r| r.starts_with(' '))
            })
    }
}

#[test]
fn test_index_membership() {
    let kq = KeyQualifiers::new(&AiDictionary::default());
    assert!(kq.is_primary_key("01"));
    assert!(kq.is_primary_key("00"));
    assert!(!kq.is_primary_key("10"));
    // every order-preserving prefix subset of 01's qualifier chain
    assert!(kq.contains(&["01", "22", "10", "21"]));
    assert!(kq.contains(&["01", "10", "21"]));
    assert!(kq.contains(&["01", "10"]));
    assert!(kq.contains(&["01", "235"]));
    // order violations and foreign qualifiers are not members
    assert!(!kq.contains(&["01", "10", "22"]));
    assert!(!kq.contains(&["01", "254"]));
    // alternative chains do not mix
    assert!(kq.contains(&["414", "254"]));
    assert!(kq.contains(&["414", "7040"]));
    assert!(!kq.contains(&["414", "254", "7040"]));
    assert!(kq.contains(&["8003", "7040"]));
}

#[test]
fn test_sequences_for_key() {
    let kq = KeyQualifiers::new(&AiDictionary::default());
    let seqs: Vec<&str> = kq.sequences_for_key("8017").collect();
    assert_eq!(seqs, ["8017", "8017 8019"]);
    // "00" must not pick up "01 ..." entries
    assert!(kq.sequences_for_key("00").all(|s| s.starts_with("00")));
    assert_eq!(kq.sequences_for_key("00").count(), 1);
}