// src/passage.rs
//
// Passage sources for the trainer shell. The engine only needs ordered,
// non-blank lines; everything here is about where those lines come from.

use std::error::Error;
use std::fs;
use std::path::Path;

/// Supplies ordered text lines for one practice run. An empty vec means
/// the source has nothing; the engine self-heals with a fallback line.
pub trait PassageSource {
    fn next_passage(&mut self) -> Vec<String>;
}

/// Embedded sample passages, cycling forever. Korean proverbs plus one
/// Latin pangram so both input paths get exercised out of the box.
pub struct BuiltinPassages {
    cursor: usize,
}

const BUILTIN: &[&[&str]] = &[
    &[
        "가는 말이 고와야 오는 말이 곱다",
        "낮말은 새가 듣고 밤말은 쥐가 듣는다",
        "티끌 모아 태산",
    ],
    &[
        "하늘이 무너져도 솟아날 구멍이 있다",
        "고생 끝에 낙이 온다",
        "시작이 반이다",
    ],
    &[
        "The quick brown fox jumps over the lazy dog",
        "Pack my box with five dozen liquor jugs",
    ],
];

impl BuiltinPassages {
    pub fn new() -> Self {
        Self { cursor: 0 }
    }
}

impl Default for BuiltinPassages {
    fn default() -> Self {
        Self::new()
    }
}

impl PassageSource for BuiltinPassages {
    fn next_passage(&mut self) -> Vec<String> {
        let passage = BUILTIN[self.cursor % BUILTIN.len()];
        self.cursor += 1;
        passage.iter().map(|line| line.to_string()).collect()
    }
}

/// A passage library loaded from disk, cycling through its passages.
///
/// Two formats: a `.json` array of string arrays, or plain text where
/// blank lines separate passages.
pub struct PassageFile {
    passages: Vec<Vec<String>>,
    cursor: usize,
}

impl PassageFile {
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let raw = fs::read_to_string(path)?;
        let parsed = if path.extension().map_or(false, |ext| ext == "json") {
            serde_json::from_str::<Vec<Vec<String>>>(&raw)?
        } else {
            parse_text_library(&raw)
        };
        let passages: Vec<Vec<String>> = parsed
            .into_iter()
            .map(|lines| {
                lines
                    .into_iter()
                    .map(|line| line.trim_end().to_string())
                    .filter(|line| !line.trim().is_empty())
                    .collect::<Vec<String>>()
            })
            .filter(|lines: &Vec<String>| !lines.is_empty())
            .collect();
        Ok(Self {
            passages,
            cursor: 0,
        })
    }

    pub fn passage_count(&self) -> usize {
        self.passages.len()
    }
}

impl PassageSource for PassageFile {
    fn next_passage(&mut self) -> Vec<String> {
        if self.passages.is_empty() {
            return Vec::new();
        }
        let passage = self.passages[self.cursor % self.passages.len()].clone();
        self.cursor += 1;
        passage
    }
}

fn parse_text_library(raw: &str) -> Vec<Vec<String>> {
    let mut passages = Vec::new();
    let mut current = Vec::new();
    for line in raw.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                passages.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line.to_string());
        }
    }
    if !current.is_empty() {
        passages.push(current);
    }
    passages
}
