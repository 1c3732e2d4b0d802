mod normalizer;
mod parser;

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use super::domain::{QuestionId, Rating, Role, SessionError};
use super::pack::QuestionPack;
use super::session::{Session, SessionId};

#[derive(Debug)]
pub enum RatingsImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRole(String),
    InvalidValue(String),
    Session(SessionError),
}

impl std::fmt::Display for RatingsImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RatingsImportError::Io(err) => write!(f, "failed to read ratings export: {}", err),
            RatingsImportError::Csv(err) => write!(f, "invalid ratings CSV data: {}", err),
            RatingsImportError::InvalidRole(raw) => {
                write!(f, "'{}' is not a participant role (expected A or B)", raw)
            }
            RatingsImportError::InvalidValue(raw) => {
                write!(f, "'{}' is not a rating value", raw)
            }
            RatingsImportError::Session(err) => {
                write!(f, "could not apply ratings export to session: {}", err)
            }
        }
    }
}

impl std::error::Error for RatingsImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RatingsImportError::Io(err) => Some(err),
            RatingsImportError::Csv(err) => Some(err),
            RatingsImportError::InvalidRole(_) | RatingsImportError::InvalidValue(_) => None,
            RatingsImportError::Session(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for RatingsImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RatingsImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<SessionError> for RatingsImportError {
    fn from(err: SessionError) -> Self {
        Self::Session(err)
    }
}

/// Hydrates a session from a `Question,Rater,Target,Value` CSV export.
///
/// Questions are matched by pack key or display text (case- and
/// whitespace-insensitive); rows naming unknown questions are skipped, and
/// rows with an empty value cell mean "not rated yet" and are skipped too.
/// Later rows overwrite earlier ones for the same `(question, rater,
/// target)` triple, matching the store's last-write-wins semantics.
pub struct RatingsCsvImporter;

impl RatingsCsvImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        pack: &QuestionPack,
    ) -> Result<Session, RatingsImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, pack)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        pack: &QuestionPack,
    ) -> Result<Session, RatingsImportError> {
        let mut session = Session::new(SessionId("import".to_string()), pack);
        let lookup = question_lookup(&session);

        for row in parser::parse_rows(reader)? {
            let Some(question_id) = lookup.get(&normalizer::normalize(&row.question)) else {
                continue;
            };
            if row.value.is_empty() {
                continue;
            }

            let value = row
                .value
                .parse::<u8>()
                .map_err(|_| RatingsImportError::InvalidValue(row.value.clone()))?;

            session.submit_rating(Rating {
                question_id: question_id.clone(),
                rater: parse_role(&row.rater)?,
                target: parse_role(&row.target)?,
                value,
            })?;
        }

        Ok(session)
    }
}

fn question_lookup(session: &Session) -> HashMap<String, QuestionId> {
    let mut lookup = HashMap::new();
    for question in session.questions() {
        lookup.insert(normalizer::normalize(&question.id.0), question.id.clone());
        lookup.insert(normalizer::normalize(&question.text), question.id.clone());
    }
    lookup
}

fn parse_role(raw: &str) -> Result<Role, RatingsImportError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "a" | "player a" => Ok(Role::A),
        "b" | "player b" => Ok(Role::B),
        _ => Err(RatingsImportError::InvalidRole(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::domain::SessionStatus;
    use std::io::Cursor;

    #[test]
    fn normalize_handles_bom_keys_and_spacing() {
        assert_eq!(
            normalizer::normalize_for_tests("\u{feff}Sense  of   Humor"),
            "sense of humor"
        );
        assert_eq!(
            normalizer::normalize_for_tests("sense_of_humor"),
            "sense of humor"
        );
    }

    #[test]
    fn rows_with_empty_value_mean_not_yet_rated() {
        let csv = "Question,Rater,Target,Value\nPatience,A,B,\n";
        let session = RatingsCsvImporter::from_reader(Cursor::new(csv), &QuestionPack::standard())
            .expect("import succeeds");
        assert_eq!(session.ratings_submitted(), 0);
    }

    #[test]
    fn importer_matches_by_key_and_display_text() {
        let csv = "Question,Rater,Target,Value\n\
sense_of_humor,A,A,8\n\
Sense of humor,B,A,6\n";
        let session = RatingsCsvImporter::from_reader(Cursor::new(csv), &QuestionPack::standard())
            .expect("import succeeds");
        assert_eq!(session.ratings_submitted(), 2);
    }

    #[test]
    fn importer_ignores_unknown_question_names() {
        let csv = "Question,Rater,Target,Value\nTelepathy,A,B,9\n";
        let session = RatingsCsvImporter::from_reader(Cursor::new(csv), &QuestionPack::standard())
            .expect("import succeeds");
        assert_eq!(session.ratings_submitted(), 0);
        assert_eq!(session.status(), SessionStatus::Active);
    }

    #[test]
    fn importer_applies_last_write_wins_to_duplicate_rows() {
        let csv = "Question,Rater,Target,Value\n\
Patience,A,B,3\n\
Patience,A,B,9\n";
        let session = RatingsCsvImporter::from_reader(Cursor::new(csv), &QuestionPack::standard())
            .expect("import succeeds");

        let ratings = session.ratings();
        assert_eq!(ratings.len(), 1);
        assert_eq!(ratings[0].value, 9);
    }

    #[test]
    fn importer_rejects_unknown_roles_and_bad_values() {
        let bad_role = "Question,Rater,Target,Value\nPatience,C,B,5\n";
        let error =
            RatingsCsvImporter::from_reader(Cursor::new(bad_role), &QuestionPack::standard())
                .expect_err("role rejected");
        assert!(matches!(error, RatingsImportError::InvalidRole(_)));

        let bad_value = "Question,Rater,Target,Value\nPatience,A,B,eleven\n";
        let error =
            RatingsCsvImporter::from_reader(Cursor::new(bad_value), &QuestionPack::standard())
                .expect_err("value rejected");
        assert!(matches!(error, RatingsImportError::InvalidValue(_)));

        let out_of_range = "Question,Rater,Target,Value\nPatience,A,B,11\n";
        let error =
            RatingsCsvImporter::from_reader(Cursor::new(out_of_range), &QuestionPack::standard())
                .expect_err("out of range rejected");
        assert!(matches!(error, RatingsImportError::Session(_)));
    }

    #[test]
    fn importer_from_path_propagates_io_errors() {
        let error =
            RatingsCsvImporter::from_path("./does-not-exist.csv", &QuestionPack::standard())
                .expect_err("expected io error");

        match error {
            RatingsImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
