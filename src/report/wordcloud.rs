//! Word cloud rendering.
//!
//! Text is tokenized into lowercase words, stopwords and numbers are dropped,
//! and plurals are folded into their singular when both occur. Words are then
//! laid out largest first on an Archimedean spiral starting at the canvas
//! center. Each word's font size is derived from the previous one by
//! relative scaling; when a word does not fit, its size shrinks until it fits
//! or falls below the minimum, at which point layout stops.

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::{Error, Result};

const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "else", "ever",
    "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "however", "i", "if", "in", "into", "is", "it",
    "its", "itself", "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "of",
    "off", "on", "once", "only", "or", "other", "otherwise", "ought", "our", "ours", "ourselves",
    "out", "over", "own", "same", "she", "should", "so", "some", "such", "than", "that", "the",
    "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those",
    "through", "to", "too", "under", "until", "up", "very", "was", "we", "were", "what", "when",
    "where", "which", "while", "who", "whom", "why", "with", "would", "you", "your", "yours",
    "yourself", "yourselves",
];

const PALETTE: &[RGBColor] = &[
    RGBColor(68, 1, 84),
    RGBColor(59, 82, 139),
    RGBColor(33, 145, 140),
    RGBColor(94, 201, 98),
    RGBColor(253, 231, 37),
    RGBColor(49, 104, 142),
    RGBColor(53, 183, 121),
];

/// Width of one character relative to the font size.
const CHAR_WIDTH_RATIO: f64 = 0.6;
const PADDING: i32 = 2;
const SPIRAL_STEP: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub word: String,
    pub frequency: f64,
    pub font_size: u32,
    /// Center of the word's box in canvas pixels.
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub color: usize,
}

impl PlacedWord {
    fn bounds(&self) -> (i32, i32, i32, i32) {
        box_bounds(self.x, self.y, self.width, self.height)
    }
}

pub struct WordCloud {
    pub width: u32,
    pub height: u32,
    pub max_words: usize,
    pub max_font_size: u32,
    pub min_font_size: u32,
    pub font_step: u32,
    pub relative_scaling: f64,
    pub background: RGBColor,
    stopwords: HashSet<&'static str>,
    token: Regex,
}

impl WordCloud {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            width,
            height,
            max_words: 200,
            max_font_size: (height / 4).max(4),
            min_font_size: 4,
            font_step: 1,
            relative_scaling: 0.5,
            background: WHITE,
            stopwords: STOPWORDS.iter().copied().collect(),
            token: Regex::new(r"\w[\w']+")?,
        })
    }

    /// Word counts, most frequent first, ties in order of first appearance.
    pub fn process_text(&self, text: &str) -> Vec<(String, usize)> {
        let lowered = text.to_lowercase();
        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();

        for token in self.token.find_iter(&lowered) {
            let word = token.as_str();
            let word = word.strip_suffix("'s").unwrap_or(word);
            if word.chars().count() < 2
                || self.stopwords.contains(word)
                || word.chars().all(|c| c.is_ascii_digit())
            {
                continue;
            }
            let entry = counts.entry(word.to_string()).or_insert(0);
            if *entry == 0 {
                order.push(word.to_string());
            }
            *entry += 1;
        }

        let plurals: Vec<(String, String)> = order
            .iter()
            .filter(|w| w.ends_with('s') && !w.ends_with("ss"))
            .filter_map(|w| {
                let singular = &w[..w.len() - 1];
                counts
                    .contains_key(singular)
                    .then(|| (w.clone(), singular.to_string()))
            })
            .collect();
        for (plural, singular) in plurals {
            if let Some(n) = counts.remove(&plural) {
                *counts.entry(singular).or_insert(0) += n;
            }
        }

        let mut words: Vec<(String, usize)> = order
            .into_iter()
            .filter_map(|w| counts.get(&w).map(|&n| (w, n)))
            .collect();
        words.sort_by(|a, b| b.1.cmp(&a.1));
        words
    }

    /// Counts scaled so the most frequent word is 1.0, capped at `max_words`.
    pub fn frequencies(&self, counts: &[(String, usize)]) -> Vec<(String, f64)> {
        let max = match counts.first() {
            Some((_, n)) if *n > 0 => *n as f64,
            _ => return Vec::new(),
        };
        counts
            .iter()
            .take(self.max_words)
            .map(|(w, n)| (w.clone(), *n as f64 / max))
            .collect()
    }

    pub fn layout(&self, frequencies: &[(String, f64)]) -> Vec<PlacedWord> {
        let mut placed: Vec<PlacedWord> = Vec::new();
        let mut font_size = self.max_font_size;
        let mut last_freq = 1.0;

        for (i, (word, freq)) in frequencies.iter().enumerate() {
            if i > 0 && self.relative_scaling != 0.0 {
                let scale = self.relative_scaling * (freq / last_freq) + (1.0 - self.relative_scaling);
                font_size = (scale * font_size as f64).round() as u32;
            }

            loop {
                if font_size < self.min_font_size {
                    tracing::debug!("Word cloud full after {} words", placed.len());
                    return placed;
                }
                let (width, height) = text_box(word, font_size);
                if let Some((x, y)) = self.find_position(width, height, &placed) {
                    placed.push(PlacedWord {
                        word: word.clone(),
                        frequency: *freq,
                        font_size,
                        x,
                        y,
                        width,
                        height,
                        color: i % PALETTE.len(),
                    });
                    break;
                }
                font_size = font_size.saturating_sub(self.font_step.max(1));
            }

            last_freq = *freq;
        }

        placed
    }

    fn find_position(&self, width: u32, height: u32, placed: &[PlacedWord]) -> Option<(i32, i32)> {
        let cx = self.width as f64 / 2.0;
        let cy = self.height as f64 / 2.0;
        let aspect = self.height as f64 / self.width as f64;
        let max_radius = cx.hypot(cy);

        let mut t: f64 = 0.0;
        loop {
            let r = 2.0 * t;
            if r > max_radius {
                return None;
            }
            let x = (cx + r * t.cos()).round() as i32;
            let y = (cy + r * t.sin() * aspect).round() as i32;

            let candidate = box_bounds(x, y, width, height);
            if self.inside(candidate) && !placed.iter().any(|p| overlaps(candidate, p.bounds())) {
                return Some((x, y));
            }
            t += SPIRAL_STEP;
        }
    }

    fn inside(&self, (left, top, right, bottom): (i32, i32, i32, i32)) -> bool {
        left >= 0 && top >= 0 && right <= self.width as i32 && bottom <= self.height as i32
    }

    pub fn render(&self, words: &[PlacedWord], path: &Path) -> Result<()> {
        self.draw(words, path).map_err(|e| Error::Render(e.to_string()))
    }

    fn draw(
        &self,
        words: &[PlacedWord],
        path: &Path,
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let root = SVGBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&self.background)?;

        for word in words {
            let style = ("sans-serif", word.font_size as f64)
                .into_font()
                .color(&PALETTE[word.color % PALETTE.len()])
                .pos(Pos::new(HPos::Center, VPos::Center));
            root.draw(&Text::new(word.word.as_str(), (word.x, word.y), style))?;
        }

        root.present()?;
        Ok(())
    }

    /// Tokenizes `text`, lays the words out and writes the SVG.
    pub fn generate(&self, text: &str, path: &Path) -> Result<Vec<PlacedWord>> {
        let counts = self.process_text(text);
        if counts.is_empty() {
            return Err(Error::Render("word cloud needs at least one word".to_string()));
        }
        let words = self.layout(&self.frequencies(&counts));
        self.render(&words, path)?;
        tracing::info!("Word cloud with {} words saved as {}", words.len(), path.display());
        Ok(words)
    }
}

fn text_box(word: &str, font_size: u32) -> (u32, u32) {
    let chars = word.chars().count() as f64;
    let width = (CHAR_WIDTH_RATIO * font_size as f64 * chars).ceil() as u32;
    (width, font_size)
}

fn box_bounds(x: i32, y: i32, width: u32, height: u32) -> (i32, i32, i32, i32) {
    let half_w = (width as i32 + 1) / 2 + PADDING;
    let half_h = (height as i32 + 1) / 2 + PADDING;
    (x - half_w, y - half_h, x + half_w, y + half_h)
}

fn overlaps(a: (i32, i32, i32, i32), b: (i32, i32, i32, i32)) -> bool {
    a.0 < b.2 && b.0 < a.2 && a.1 < b.3 && b.1 < a.3
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cloud() -> WordCloud {
        WordCloud::new(800, 400).unwrap()
    }

    #[test]
    fn test_process_text_drops_stopwords_and_numbers() {
        let counts = cloud().process_text("selenium, java, and the 2024, java, selenium, java");
        assert_eq!(
            counts,
            vec![("java".to_string(), 3), ("selenium".to_string(), 2)]
        );
    }

    #[test]
    fn test_process_text_folds_plurals_and_possessives() {
        let counts = cloud().process_text("api tests, test automation, test, tester's tool, tester");
        assert_eq!(counts[0], ("test".to_string(), 3));
        assert!(counts.contains(&("tester".to_string(), 2)));
        assert!(!counts.iter().any(|(w, _)| w == "tests"));
    }

    #[test]
    fn test_process_text_keeps_double_s_words() {
        let counts = cloud().process_text("process, proces, access");
        assert!(counts.iter().any(|(w, _)| w == "process"));
        assert!(counts.iter().any(|(w, _)| w == "access"));
    }

    #[test]
    fn test_frequencies_are_normalized() {
        let wc = cloud();
        let freqs = wc.frequencies(&[("pune".to_string(), 4), ("delhi".to_string(), 2)]);
        assert_eq!(freqs[0].1, 1.0);
        assert_eq!(freqs[1].1, 0.5);
        assert!(wc.frequencies(&[]).is_empty());
    }

    #[test]
    fn test_layout_places_words_without_overlap() {
        let wc = cloud();
        let counts = wc.process_text(
            "bengaluru, bengaluru, bengaluru, pune, pune, hyderabad, chennai, mumbai, delhi, noida, kolkata",
        );
        let placed = wc.layout(&wc.frequencies(&counts));

        assert!(!placed.is_empty());
        assert_eq!(placed[0].word, "bengaluru");
        assert_eq!(placed[0].font_size, wc.max_font_size);
        for (i, a) in placed.iter().enumerate() {
            assert!(wc.inside(a.bounds()), "{} out of bounds", a.word);
            for b in placed.iter().skip(i + 1) {
                assert!(!overlaps(a.bounds(), b.bounds()), "{} overlaps {}", a.word, b.word);
            }
        }
        assert!(placed.windows(2).all(|w| w[0].font_size >= w[1].font_size));
    }

    #[test]
    fn test_layout_stops_when_canvas_is_full() {
        let mut wc = WordCloud::new(60, 20).unwrap();
        wc.max_font_size = 10;
        let freqs: Vec<(String, f64)> = (0..50).map(|i| (format!("word{}", i), 1.0)).collect();
        let placed = wc.layout(&freqs);
        assert!(placed.len() < freqs.len());
    }

    #[test]
    fn test_generate_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skills_wordcloud.svg");
        let words = cloud().generate("selenium, java, selenium, api testing", &path).unwrap();

        assert_eq!(words[0].word, "selenium");
        assert!(std::fs::read_to_string(&path).unwrap().contains("<svg"));
    }

    #[test]
    fn test_generate_rejects_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.svg");
        assert!(cloud().generate(", , ", &path).is_err());
    }
}
