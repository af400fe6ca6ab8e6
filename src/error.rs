//! Error types for reading repository databases.
use crate::{db::Field, utils::compression::Compression};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    /// The container could not be opened or read
    #[error("Malformed repository container: {reason}")]
    MalformedContainer {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// `package` and `field` are known once the line belongs to an entry
    #[error("Malformed dependency expression '{line}'{}", relation_origin(.package, .field))]
    MalformedDependency {
        package: Option<String>,
        field: Option<Field>,
        line: String,
    },

    #[error("Package {package} is missing required field {field}")]
    MissingField { package: String, field: Field },

    #[error("Package {package} has malformed {field} value '{value}'")]
    MalformedField {
        package: String,
        field: Field,
        value: String,
    },

    #[error("Unsupported container compression: {0}")]
    UnsupportedCodec(Compression),
}

fn relation_origin(package: &Option<String>, field: &Option<Field>) -> String {
    match (package, field) {
        (Some(package), Some(field)) => format!(" in {} of package {}", field, package),
        (Some(package), None) => format!(" in package {}", package),
        (None, Some(field)) => format!(" in {}", field),
        (None, None) => String::new(),
    }
}

impl DbError {
    pub(crate) fn container<E>(reason: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        DbError::MalformedContainer {
            reason: reason.into(),
            source: Some(Box::new(source)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dependency_message() {
        let err = DbError::MalformedDependency {
            package: Some("a-1".to_string()),
            field: Some(Field::Depends),
            line: "<=1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed dependency expression '<=1' in %DEPENDS% of package a-1"
        );
        let err = DbError::MalformedDependency {
            package: None,
            field: None,
            line: "=1".to_string(),
        };
        assert_eq!(err.to_string(), "Malformed dependency expression '=1'");
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
