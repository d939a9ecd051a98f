// src/core/composer.rs
use crate::core::jamo;

/// Dubeolsik syllable-block composer.
///
/// Holds at most one open block as three optional jamo slots. `medial` is
/// only ever set while `initial` is set, and `trailing` only while `medial`
/// is set. Every key produces a defined transition; keys that do not map
/// to a jamo flush the open block and pass through verbatim.
pub struct HangulComposer {
    initial: Option<char>,
    medial: Option<char>,
    trailing: Option<char>,
}

impl HangulComposer {
    pub fn new() -> Self {
        Self {
            initial: None,
            medial: None,
            trailing: None,
        }
    }

    /// True iff the key maps to a consonant or vowel jamo.
    pub fn is_mappable(key: char) -> bool {
        jamo::consonant_for_key(key).is_some() || jamo::vowel_for_key(key).is_some()
    }

    /// Feeds one key and returns whatever text became final because of it.
    /// The still-open block, if any, is visible via `composition_text`.
    pub fn process_key(&mut self, key: char) -> String {
        if let Some(vowel) = jamo::vowel_for_key(key) {
            return self.apply_vowel(vowel);
        }
        if let Some(consonant) = jamo::consonant_for_key(key) {
            return self.apply_consonant(consonant);
        }
        let mut committed = self.flush();
        committed.push(key);
        committed
    }

    fn apply_vowel(&mut self, vowel: char) -> String {
        match (self.initial, self.medial, self.trailing) {
            // A vowel on its own opens a block with the null consonant ㅇ.
            (None, _, _) => {
                self.initial = Some(jamo::NULL_INITIAL);
                self.medial = Some(vowel);
                String::new()
            }
            (Some(_), None, _) => {
                self.medial = Some(vowel);
                String::new()
            }
            (Some(_), Some(current), None) => {
                if let Some(merged) = jamo::merge_vowels(current, vowel) {
                    self.medial = Some(merged);
                    String::new()
                } else {
                    let committed = self.flush();
                    self.initial = Some(jamo::NULL_INITIAL);
                    self.medial = Some(vowel);
                    committed
                }
            }
            // Full block: the final consonant migrates to lead the next
            // block. A compound final leaves its first constituent behind.
            (Some(_), Some(_), Some(trailing)) => {
                let carried = match jamo::split_final(trailing) {
                    Some((keep, carry)) => {
                        self.trailing = Some(keep);
                        carry
                    }
                    None => {
                        self.trailing = None;
                        trailing
                    }
                };
                let committed = self.flush();
                self.initial = Some(carried);
                self.medial = Some(vowel);
                committed
            }
        }
    }

    fn apply_consonant(&mut self, consonant: char) -> String {
        match (self.initial, self.medial, self.trailing) {
            (None, _, _) => {
                self.initial = Some(consonant);
                String::new()
            }
            // A vowel never arrived, so the lone consonant commits as-is.
            (Some(_), None, _) => {
                let committed = self.flush();
                self.initial = Some(consonant);
                committed
            }
            (Some(_), Some(_), None) => {
                self.trailing = Some(consonant);
                String::new()
            }
            (Some(_), Some(_), Some(current)) => {
                if let Some(merged) = jamo::merge_finals(current, consonant) {
                    self.trailing = Some(merged);
                    String::new()
                } else {
                    let committed = self.flush();
                    self.initial = Some(consonant);
                    committed
                }
            }
        }
    }

    /// Commits the open block, if any, and clears all slots.
    pub fn flush(&mut self) -> String {
        let text = self.composition_text();
        self.reset();
        text
    }

    /// The block as it currently stands, for live preview. Never mutates.
    pub fn composition_text(&self) -> String {
        match (self.initial, self.medial) {
            (None, _) => String::new(),
            (Some(initial), None) => initial.to_string(),
            (Some(initial), Some(medial)) => {
                match jamo::compose_syllable(initial, medial, self.trailing) {
                    Some(syllable) => syllable.to_string(),
                    None => initial.to_string(),
                }
            }
        }
    }

    /// Removes the most-recently-filled slot. Returns false when no block
    /// is open, in which case the caller should delete committed text.
    pub fn handle_backspace(&mut self) -> bool {
        self.trailing.take().is_some()
            || self.medial.take().is_some()
            || self.initial.take().is_some()
    }

    pub fn reset(&mut self) {
        self.initial = None;
        self.medial = None;
        self.trailing = None;
    }

    /// True when no block is open.
    pub fn is_empty(&self) -> bool {
        self.initial.is_none()
    }
}

impl Default for HangulComposer {
    fn default() -> Self {
        Self::new()
    }
}
