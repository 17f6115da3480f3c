//! Dictionary spell checking.
//!
//! Words are checked against a Hunspell dictionary (`.aff` + `.dic` pair)
//! loaded with `spellbook`. The dictionary is loaded once per run.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Locale of the dictionary searched for by default.
pub const DEFAULT_LOCALE: &str = "en_US";

/// System directories where Hunspell/MySpell dictionaries are installed.
const DICTIONARY_DIRS: &[&str] = &[
    "/usr/share/hunspell",
    "/usr/share/myspell",
    "/usr/share/myspell/dicts",
    "/usr/local/share/hunspell",
    "/opt/homebrew/share/hunspell",
    "/Library/Spelling",
];

/// Something that can tell whether a word is spelled correctly.
pub trait Speller {
    fn check(&self, word: &str) -> bool;
}

#[derive(Debug, Error)]
pub enum SpellError {
    #[error("no {locale} dictionary found in {searched}")]
    NotFound { locale: String, searched: String },

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid dictionary `{0}`: {1}")]
    Parse(PathBuf, String),
}

/// Where to load the dictionary from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionarySource {
    /// Look for `<locale>.dic` in the standard system directories.
    Search { locale: String },
    /// Explicit `.dic` file; the `.aff` file is expected next to it.
    File(PathBuf),
}

impl Default for DictionarySource {
    fn default() -> Self {
        Self::Search {
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

/// Hunspell dictionary backed speller.
pub struct HunspellSpeller {
    dictionary: spellbook::Dictionary,
}

impl HunspellSpeller {
    pub fn load(source: &DictionarySource) -> Result<Self, SpellError> {
        let dic = match source {
            DictionarySource::File(path) => path.clone(),
            DictionarySource::Search { locale } => find_dictionary(locale, DICTIONARY_DIRS)?,
        };
        Self::from_files(&dic.with_extension("aff"), &dic)
    }

    pub fn from_files(aff: &Path, dic: &Path) -> Result<Self, SpellError> {
        let aff_content =
            fs::read_to_string(aff).map_err(|e| SpellError::Io(aff.to_path_buf(), e))?;
        let dic_content =
            fs::read_to_string(dic).map_err(|e| SpellError::Io(dic.to_path_buf(), e))?;
        Self::from_content(&aff_content, &dic_content)
            .map_err(|message| SpellError::Parse(dic.to_path_buf(), message))
    }

    fn from_content(aff: &str, dic: &str) -> Result<Self, String> {
        let dictionary = spellbook::Dictionary::new(aff, dic).map_err(|e| e.to_string())?;
        Ok(Self { dictionary })
    }
}

impl Speller for HunspellSpeller {
    fn check(&self, word: &str) -> bool {
        self.dictionary.check(word)
    }
}

/// First `<locale>.dic` found among `dirs` that has an `.aff` sibling.
fn find_dictionary(locale: &str, dirs: &[&str]) -> Result<PathBuf, SpellError> {
    dirs.iter()
        .map(|dir| Path::new(dir).join(format!("{locale}.dic")))
        .find(|dic| dic.is_file() && dic.with_extension("aff").is_file())
        .ok_or_else(|| SpellError::NotFound {
            locale: locale.to_string(),
            searched: dirs.join(", "),
        })
}

/// Every word `speller` rejects, in order.
///
/// Each text is split on single spaces; `normalize` is applied to each token
/// and tokens that end up empty are skipped.
pub fn misspelled<'a, I, F>(speller: &dyn Speller, texts: I, normalize: F) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
    F: Fn(&str) -> String,
{
    texts
        .into_iter()
        .filter(|text| !text.is_empty())
        .flat_map(|text| text.split(' '))
        .map(normalize)
        .filter(|word| !word.is_empty() && !speller.check(word))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const AFF: &str = "SET UTF-8\n";
    const DIC: &str = "4\nroad\nforest\nmill\nold\n";

    #[test]
    fn test_hunspell_check() {
        let speller = HunspellSpeller::from_content(AFF, DIC).unwrap();
        assert!(speller.check("road"));
        assert!(speller.check("forest"));
        assert!(!speller.check("xyzzqq"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let dic = dir.path().join("en_US.dic");
        fs::write(&dic, DIC).unwrap();
        fs::write(dir.path().join("en_US.aff"), AFF).unwrap();

        let speller = HunspellSpeller::load(&DictionarySource::File(dic)).unwrap();
        assert!(speller.check("mill"));
    }

    #[test]
    fn test_load_missing_aff() {
        let dir = TempDir::new().unwrap();
        let dic = dir.path().join("en_US.dic");
        fs::write(&dic, DIC).unwrap();

        let err = HunspellSpeller::load(&DictionarySource::File(dic)).err().unwrap();
        assert!(matches!(err, SpellError::Io(path, _) if path.ends_with("en_US.aff")));
    }

    #[test]
    fn test_find_dictionary_requires_pair() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();
        fs::write(dir.path().join("en_US.dic"), DIC).unwrap();
        assert!(matches!(
            find_dictionary("en_US", &[root]),
            Err(SpellError::NotFound { .. })
        ));

        fs::write(dir.path().join("en_US.aff"), AFF).unwrap();
        assert_eq!(
            find_dictionary("en_US", &[root]).unwrap(),
            dir.path().join("en_US.dic")
        );
    }

    #[test]
    fn test_misspelled_collects_rejected_tokens() {
        let speller = HunspellSpeller::from_content(AFF, DIC).unwrap();
        let texts = vec![
            "old road".to_string(),
            String::new(),
            "forest  xyzzqq".to_string(),
            "mil".to_string(),
        ];
        let words = misspelled(&speller, &texts, str::to_string);
        assert_eq!(words, ["xyzzqq", "mil"]);
    }

    #[test]
    fn test_misspelled_splits_on_spaces_only() {
        let speller = HunspellSpeller::from_content(AFF, DIC).unwrap();
        let texts = vec!["old\nroad forest".to_string(), "road\tforest".to_string()];
        let words = misspelled(&speller, &texts, |w| w.trim().to_string());
        assert_eq!(words, ["old\nroad", "road\tforest"]);
    }
}
