//! Classification of inbound text into commands.

/// What an inbound message asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundCommand {
    /// The text is the unlock phrase.
    UnlockRequest,
    /// The text is a one- or two-digit number. Not range-checked.
    EpisodeRequest(u32),
    /// Anything else; carries the original, untrimmed text.
    Unrecognized(String),
}

/// Purely syntactic command recognizer.
#[derive(Debug, Clone)]
pub struct CommandParser {
    unlock_phrase: String,
}

impl CommandParser {
    /// Creates a parser recognising `unlock_phrase`. An empty phrase never
    /// matches.
    #[must_use]
    pub fn new(unlock_phrase: impl Into<String>) -> Self {
        Self {
            unlock_phrase: unlock_phrase.into().trim().to_owned(),
        }
    }

    /// The phrase that produces [`InboundCommand::UnlockRequest`].
    #[must_use]
    pub fn unlock_phrase(&self) -> &str {
        &self.unlock_phrase
    }

    /// Classifies `raw`. Total: every input maps to exactly one command.
    ///
    /// Surrounding whitespace is ignored. Rules, in order: exact unlock
    /// phrase, then one or two decimal digits and nothing else, then
    /// unrecognized.
    #[must_use]
    pub fn parse(&self, raw: &str) -> InboundCommand {
        let text = raw.trim();
        if !self.unlock_phrase.is_empty() && text == self.unlock_phrase {
            return InboundCommand::UnlockRequest;
        }
        match episode_number(text) {
            Some(number) => InboundCommand::EpisodeRequest(number),
            None => InboundCommand::Unrecognized(raw.to_owned()),
        }
    }
}

fn episode_number(text: &str) -> Option<u32> {
    let mut digits = 0;
    let mut value = 0;
    for c in text.chars() {
        value = value * 10 + decimal_digit(c)?;
        digits += 1;
        if digits > 2 {
            return None;
        }
    }
    (digits > 0).then_some(value)
}

/// ASCII and full-width digits.
fn decimal_digit(c: char) -> Option<u32> {
    match c {
        '0'..='9' => c.to_digit(10),
        '０'..='９' => Some(u32::from(c) - u32::from('０')),
        _ => None,
    }
}
