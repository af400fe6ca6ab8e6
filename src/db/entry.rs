use crate::{
    error::{DbError, Result},
    types::{parse_depends, Depends, EpochSeparators, Version},
};
use std::{collections::HashMap, fmt, sync::OnceLock};

/// Field tags known to appear in `desc`, `depends` and `files` blocks
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Version,
    Filename,
    Arch,
    Base,
    Desc,
    Url,
    Packager,
    BuildDate,
    CSize,
    ISize,
    Md5Sum,
    Sha256Sum,
    PgpSig,
    License,
    Groups,
    Files,
    Depends,
    MakeDepends,
    CheckDepends,
    OptDepends,
    Provides,
    Conflicts,
    Replaces,
}

impl Field {
    /// A package without these fields is corrupted
    pub const REQUIRED: [Field; 3] = [Field::Name, Field::Version, Field::Filename];

    pub fn tag(&self) -> &'static str {
        match self {
            Field::Name => "%NAME%",
            Field::Version => "%VERSION%",
            Field::Filename => "%FILENAME%",
            Field::Arch => "%ARCH%",
            Field::Base => "%BASE%",
            Field::Desc => "%DESC%",
            Field::Url => "%URL%",
            Field::Packager => "%PACKAGER%",
            Field::BuildDate => "%BUILDDATE%",
            Field::CSize => "%CSIZE%",
            Field::ISize => "%ISIZE%",
            Field::Md5Sum => "%MD5SUM%",
            Field::Sha256Sum => "%SHA256SUM%",
            Field::PgpSig => "%PGPSIG%",
            Field::License => "%LICENSE%",
            Field::Groups => "%GROUPS%",
            Field::Files => "%FILES%",
            Field::Depends => "%DEPENDS%",
            Field::MakeDepends => "%MAKEDEPENDS%",
            Field::CheckDepends => "%CHECKDEPENDS%",
            Field::OptDepends => "%OPTDEPENDS%",
            Field::Provides => "%PROVIDES%",
            Field::Conflicts => "%CONFLICTS%",
            Field::Replaces => "%REPLACES%",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Fields holding dependency expressions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relation {
    Depends,
    MakeDepends,
    CheckDepends,
    OptDepends,
    Provides,
    Conflicts,
    Replaces,
}

impl Relation {
    pub const ALL: [Relation; 7] = [
        Relation::Depends,
        Relation::MakeDepends,
        Relation::CheckDepends,
        Relation::OptDepends,
        Relation::Provides,
        Relation::Conflicts,
        Relation::Replaces,
    ];

    pub fn field(&self) -> Field {
        match self {
            Relation::Depends => Field::Depends,
            Relation::MakeDepends => Field::MakeDepends,
            Relation::CheckDepends => Field::CheckDepends,
            Relation::OptDepends => Field::OptDepends,
            Relation::Provides => Field::Provides,
            Relation::Conflicts => Field::Conflicts,
            Relation::Replaces => Field::Replaces,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// The raw fields of one package, as parsed from the database.
///
/// Required fields are checked and every relation field is parsed when the
/// entry is built, so a corrupt database fails early instead of handing out
/// partial data.
#[derive(Debug)]
pub struct PackageEntry {
    fields: HashMap<String, Vec<String>>,
    name: String,
    version_str: String,
    filename: String,
    relations: [Depends; 7],
    separators: EpochSeparators,
    version: OnceLock<Version>,
}

impl PackageEntry {
    /// `origin` names the entry in error messages, usually its directory
    pub fn new(
        fields: HashMap<String, Vec<String>>,
        origin: &str,
        separators: &EpochSeparators,
    ) -> Result<Self> {
        let required = |field: Field| -> Result<String> {
            fields
                .get(field.tag())
                .and_then(|values| values.first())
                .cloned()
                .ok_or_else(|| DbError::MissingField {
                    package: origin.to_owned(),
                    field,
                })
        };
        let name = required(Field::Name)?;
        let version_str = required(Field::Version)?;
        let filename = required(Field::Filename)?;

        let mut relations: [Depends; 7] = Default::default();
        for relation in Relation::ALL {
            let lines = fields
                .get(relation.field().tag())
                .into_iter()
                .flatten()
                .map(String::as_str);
            relations[relation.index()] =
                parse_depends(lines, separators).map_err(|e| match e {
                    DbError::MalformedDependency { line, .. } => DbError::MalformedDependency {
                        package: Some(origin.to_owned()),
                        field: Some(relation.field()),
                        line,
                    },
                    e => e,
                })?;
        }

        Ok(PackageEntry {
            fields,
            name,
            version_str,
            filename,
            relations,
            separators: separators.clone(),
            version: OnceLock::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Parsed on first access
    pub fn version(&self) -> &Version {
        self.version
            .get_or_init(|| Version::parse_with(&self.version_str, &self.separators))
    }

    /// Values of any tag, including ones without a [`Field`]
    pub fn raw(&self, tag: &str) -> Option<&[String]> {
        self.fields.get(tag).map(Vec::as_slice)
    }

    pub fn list(&self, field: Field) -> &[String] {
        self.raw(field.tag()).unwrap_or(&[])
    }

    pub fn single(&self, field: Field) -> Option<&str> {
        self.list(field).first().map(String::as_str)
    }

    pub fn relation(&self, relation: Relation) -> &Depends {
        &self.relations[relation.index()]
    }
}
