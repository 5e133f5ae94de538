//! Language-specific text analysis: word segmentation, stopword lists and stemming.
//!
//! Each concern sits behind a small trait so the set used by the document
//! processor can be swapped per language, or mocked in tests, through
//! [`Analyzer`].

use crate::config::Language;
use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::Algorithm;
use std::collections::HashSet;
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Splits text into word tokens.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Membership test for a language's function words.
pub trait StopwordFilter: Send + Sync {
    fn is_stopword(&self, token: &str) -> bool;
}

/// Reduces a token to its root form.
pub trait Stemmer: Send + Sync {
    fn stem(&self, token: &str) -> String;
}

lazy_static! {
    // Runs of letters/digits are words; runs of anything else that isn't
    // whitespace come out as separate symbol tokens.
    static ref WORD_RE: Regex = Regex::new(r"(?u)[\p{L}\p{N}]+|[^\s\p{L}\p{N}]+").expect("valid regex");
    static ref PORTUGUESE_STEMMER: rust_stemmers::Stemmer = rust_stemmers::Stemmer::create(Algorithm::Portuguese);
    static ref ENGLISH_STEMMER: rust_stemmers::Stemmer = rust_stemmers::Stemmer::create(Algorithm::English);
    static ref PORTUGUESE_STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","à","ao","aos","aquela","aquelas","aquele","aqueles","aquilo","as","às","até",
            "com","como","da","das","de","dela","delas","dele","deles","depois","do","dos",
            "e","é","ela","elas","ele","eles","em","entre","era","eram","éramos","essa","essas","esse","esses",
            "esta","está","estamos","estão","estar","estas","estava","estavam","estávamos","este","esteja","estejam",
            "estejamos","estes","esteve","estive","estivemos","estiver","estivera","estiveram","estivéramos",
            "estiverem","estivermos","estivesse","estivessem","estivéssemos","estou","eu",
            "foi","fomos","for","fora","foram","fôramos","forem","formos","fosse","fossem","fôssemos","fui",
            "há","haja","hajam","hajamos","hão","havemos","haver","hei","houve","houvemos","houver","houvera",
            "houverá","houveram","houvéramos","houverão","houverei","houverem","houveremos","houveria",
            "houveriam","houveríamos","houvermos","houvesse","houvessem","houvéssemos",
            "isso","isto","já","lhe","lhes","mais","mas","me","mesmo","meu","meus","minha","minhas","muito",
            "na","não","nas","nem","no","nos","nós","nossa","nossas","nosso","nossos","num","numa",
            "o","os","ou","para","pela","pelas","pelo","pelos","por","qual","quando","que","quem",
            "são","se","seja","sejam","sejamos","sem","ser","será","serão","serei","seremos","seria","seriam",
            "seríamos","seu","seus","só","somos","sou","sua","suas",
            "também","te","tem","tém","temos","tenha","tenham","tenhamos","tenho","terá","terão","terei",
            "teremos","teria","teriam","teríamos","teu","teus","teve","tinha","tinham","tínhamos","tive",
            "tivemos","tiver","tivera","tiveram","tivéramos","tiverem","tivermos","tivesse","tivessem",
            "tivéssemos","tu","tua","tuas","um","uma","você","vocês","vos"
        ];
        words.iter().copied().collect()
    };
    static ref ENGLISH_STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","cannot","could","did","do","does","doing","down","during",
            "each","few","for","from","further",
            "had","has","have","having","he","her","here","hers","herself","him","himself","his","how",
            "i","if","in","into","is","it","its","itself",
            "me","more","most","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","should","so","some","such",
            "than","that","the","their","theirs","them","themselves","then","there","these","they","this","those","through","to","too",
            "under","until","up","very",
            "was","we","were","what","when","where","which","while","who","whom","why","with","would",
            "you","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

/// Unicode-aware word segmentation. Text is NFC-composed first so accented
/// letters stay single characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let composed = text.nfc().collect::<String>();
        WORD_RE.find_iter(&composed).map(|m| m.as_str().to_string()).collect()
    }
}

/// Static stopword list for one language.
#[derive(Debug, Clone, Copy)]
pub struct StopwordList {
    words: &'static HashSet<&'static str>,
}

impl StopwordList {
    pub fn for_language(language: Language) -> Self {
        let words: &'static HashSet<&'static str> = match language {
            Language::Portuguese => &PORTUGUESE_STOPWORDS,
            Language::English => &ENGLISH_STOPWORDS,
        };
        Self { words }
    }
}

impl StopwordFilter for StopwordList {
    fn is_stopword(&self, token: &str) -> bool {
        self.words.contains(token)
    }
}

/// Snowball stemmer for one language.
pub struct SnowballStemmer {
    inner: &'static rust_stemmers::Stemmer,
}

impl SnowballStemmer {
    pub fn for_language(language: Language) -> Self {
        let inner: &'static rust_stemmers::Stemmer = match language {
            Language::Portuguese => &PORTUGUESE_STEMMER,
            Language::English => &ENGLISH_STEMMER,
        };
        Self { inner }
    }
}

impl Stemmer for SnowballStemmer {
    fn stem(&self, token: &str) -> String {
        self.inner.stem(token).into_owned()
    }
}

/// The tokenizer, stopword filter and stemmer the document processor runs with.
pub struct Analyzer {
    tokenizer: Box<dyn Tokenizer>,
    stopwords: Box<dyn StopwordFilter>,
    stemmer: Box<dyn Stemmer>,
}

impl Analyzer {
    pub fn new(
        tokenizer: impl Tokenizer + 'static,
        stopwords: impl StopwordFilter + 'static,
        stemmer: impl Stemmer + 'static,
    ) -> Self {
        Self { tokenizer: Box::new(tokenizer), stopwords: Box::new(stopwords), stemmer: Box::new(stemmer) }
    }

    pub fn for_language(language: Language) -> Self {
        Self::new(WordTokenizer, StopwordList::for_language(language), SnowballStemmer::for_language(language))
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.tokenizer.tokenize(text)
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.is_stopword(token)
    }

    pub fn stem(&self, token: &str) -> String {
        self.stemmer.stem(token)
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::for_language(Language::default())
    }
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer").finish_non_exhaustive()
    }
}
