use serde::{Deserialize, Serialize};

use crate::core::rng::Rng;
use crate::error::CatalogError;

/// Difficulty bucket determining vocabulary pool and base fall speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Easy,
    Medium,
    Hard,
}

/// One vocabulary item: the written term, how it is pronounced (romanized),
/// and what it means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub term: String,
    pub pronunciation: String,
    #[serde(default)]
    pub gloss: String,
}

impl VocabularyEntry {
    pub fn new(term: impl Into<String>, pronunciation: impl Into<String>, gloss: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            pronunciation: pronunciation.into(),
            gloss: gloss.into(),
        }
    }
}

/// Static, tiered pools of vocabulary entries.
/// Loaded from a JSON file at runtime, or taken from the built-in set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VocabularyCatalog {
    #[serde(default)]
    pub easy: Vec<VocabularyEntry>,
    #[serde(default)]
    pub medium: Vec<VocabularyEntry>,
    #[serde(default)]
    pub hard: Vec<VocabularyEntry>,
}

impl VocabularyCatalog {
    /// Parse a catalog from a JSON string. At least one tier must be non-empty.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: VocabularyCatalog = serde_json::from_str(json)?;
        if catalog.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(catalog)
    }

    pub fn pool(&self, tier: Tier) -> &[VocabularyEntry] {
        match tier {
            Tier::Easy => &self.easy,
            Tier::Medium => &self.medium,
            Tier::Hard => &self.hard,
        }
    }

    /// Pick an entry uniformly at random from the tier's pool.
    /// Returns `None` (and draws nothing from `rng`) when the pool is empty.
    pub fn pick(&self, tier: Tier, rng: &mut Rng) -> Option<&VocabularyEntry> {
        let pool = self.pool(tier);
        if pool.is_empty() {
            return None;
        }
        pool.get(rng.next_int(pool.len() as u32) as usize)
    }

    pub fn len(&self) -> usize {
        self.easy.len() + self.medium.len() + self.hard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Built-in Mandarin starter set: single characters, two-character words,
    /// then longer compounds.
    pub fn builtin() -> Self {
        fn entries(rows: &[(&str, &str, &str)]) -> Vec<VocabularyEntry> {
            rows.iter()
                .map(|&(term, pronunciation, gloss)| VocabularyEntry::new(term, pronunciation, gloss))
                .collect()
        }

        Self {
            easy: entries(&[
                ("你", "ni", "you"),
                ("好", "hao", "good"),
                ("猫", "mao", "cat"),
                ("水", "shui", "water"),
                ("火", "huo", "fire"),
                ("山", "shan", "mountain"),
                ("人", "ren", "person"),
                ("大", "da", "big"),
                ("小", "xiao", "small"),
                ("月", "yue", "moon"),
            ]),
            medium: entries(&[
                ("蘋果", "pingguo", "apple"),
                ("香蕉", "xiangjiao", "banana"),
                ("櫻桃", "yingtao", "cherry"),
                ("葡萄", "putao", "grape"),
                ("交通", "jiaotong", "transport"),
                ("訊息", "xunxi", "message"),
                ("歐洲", "ouzhou", "Europe"),
                ("之間", "zhijian", "between"),
                ("國家", "guojia", "country"),
                ("朋友", "pengyou", "friend"),
            ]),
            hard: entries(&[
                ("最快的", "zuikuaide", "fastest"),
                ("電風扇", "dianfengshan", "electric fan"),
                ("圖書館", "tushuguan", "library"),
                ("計算機", "jisuanji", "computer"),
                ("火車站", "huochezhan", "train station"),
                ("博物館", "bowuguan", "museum"),
                ("電影院", "dianyingyuan", "cinema"),
                ("飛機場", "feijichang", "airport"),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_catalog_with_missing_tiers() {
        let json = r#"{
            "easy": [ { "term": "猫", "pronunciation": "mao", "gloss": "cat" } ],
            "hard": [ { "term": "圖書館", "pronunciation": "tushuguan" } ]
        }"#;
        let catalog = VocabularyCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.pool(Tier::Medium).is_empty());
        assert_eq!(catalog.pool(Tier::Hard)[0].gloss, "");
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(matches!(VocabularyCatalog::from_json("{}"), Err(CatalogError::Empty)));
    }

    #[test]
    fn pick_from_empty_pool_is_none() {
        let catalog = VocabularyCatalog {
            easy: vec![VocabularyEntry::new("猫", "mao", "cat")],
            ..Default::default()
        };
        let mut rng = Rng::new(1);
        assert!(catalog.pick(Tier::Medium, &mut rng).is_none());
        assert_eq!(catalog.pick(Tier::Easy, &mut rng).unwrap().term, "猫");
    }

    #[test]
    fn pick_is_deterministic_for_a_seed() {
        let catalog = VocabularyCatalog::builtin();
        let mut a = Rng::new(9);
        let mut b = Rng::new(9);
        for _ in 0..20 {
            assert_eq!(catalog.pick(Tier::Medium, &mut a), catalog.pick(Tier::Medium, &mut b));
        }
    }

    #[test]
    fn builtin_has_every_tier() {
        let catalog = VocabularyCatalog::builtin();
        for tier in [Tier::Easy, Tier::Medium, Tier::Hard] {
            assert!(!catalog.pool(tier).is_empty());
        }
    }
}
