use super::domain::{Question, QuestionId};

/// Ordered list of question templates a session is created from.
#[derive(Debug)]
pub struct QuestionPack {
    entries: Vec<PackEntry>,
}

#[derive(Debug, Clone)]
pub struct PackEntry {
    pub key: &'static str,
    pub text: &'static str,
    pub icon: &'static str,
}

impl QuestionPack {
    pub fn standard() -> Self {
        Self {
            entries: standard_entries(),
        }
    }

    pub fn entries(&self) -> &[PackEntry] {
        &self.entries
    }

    /// Materialize the pack into session questions, ordinal positions
    /// assigned from the pack order.
    pub fn questions(&self) -> Vec<Question> {
        self.entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| Question {
                id: QuestionId(entry.key.to_string()),
                idx: idx as u32,
                text: entry.text.to_string(),
                icon: entry.icon.to_string(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn standard_entries() -> Vec<PackEntry> {
    vec![
        PackEntry {
            key: "sense_of_humor",
            text: "Sense of humor",
            icon: "😄",
        },
        PackEntry {
            key: "patience",
            text: "Patience",
            icon: "🧘",
        },
        PackEntry {
            key: "honesty",
            text: "Honesty",
            icon: "🤝",
        },
        PackEntry {
            key: "listening",
            text: "Listening skills",
            icon: "👂",
        },
        PackEntry {
            key: "ambition",
            text: "Ambition",
            icon: "🚀",
        },
        PackEntry {
            key: "generosity",
            text: "Generosity",
            icon: "🎁",
        },
        PackEntry {
            key: "adventurousness",
            text: "Adventurousness",
            icon: "🌍",
        },
        PackEntry {
            key: "organization",
            text: "Organization",
            icon: "📋",
        },
        PackEntry {
            key: "romantic_effort",
            text: "Romantic effort",
            icon: "💌",
        },
        PackEntry {
            key: "cooking",
            text: "Cooking skills",
            icon: "🍳",
        },
    ]
}
