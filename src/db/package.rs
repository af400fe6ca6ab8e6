use super::{Database, Field, PackageEntry, Relation};
use crate::{
    error::{DbError, Result},
    types::{Checksum, Depends, Version},
};
use std::{
    cmp::Ordering,
    fmt,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

/// A read-only view of one package in a [`Database`].
///
/// Views are cheap to create and compare by `(name, version)`.
#[derive(Clone, Copy)]
pub struct Package<'a> {
    db: &'a Database,
    entry: &'a PackageEntry,
}

impl<'a> Package<'a> {
    pub(super) fn new(db: &'a Database, entry: &'a PackageEntry) -> Self {
        Package { db, entry }
    }

    pub fn db(&self) -> &'a Database {
        self.db
    }

    pub fn entry(&self) -> &'a PackageEntry {
        self.entry
    }

    pub fn name(&self) -> &'a str {
        self.entry.name()
    }

    pub fn version(&self) -> &'a Version {
        self.entry.version()
    }

    pub fn filename(&self) -> &'a str {
        self.entry.filename()
    }

    pub fn arch(&self) -> Option<&'a str> {
        self.entry.single(Field::Arch)
    }

    pub fn base(&self) -> Option<&'a str> {
        self.entry.single(Field::Base)
    }

    pub fn desc(&self) -> Option<&'a str> {
        self.entry.single(Field::Desc)
    }

    pub fn url(&self) -> Option<&'a str> {
        self.entry.single(Field::Url)
    }

    pub fn packager(&self) -> Option<&'a str> {
        self.entry.single(Field::Packager)
    }

    pub fn md5sum(&self) -> Option<&'a str> {
        self.entry.single(Field::Md5Sum)
    }

    pub fn sha256sum(&self) -> Option<&'a str> {
        self.entry.single(Field::Sha256Sum)
    }

    /// Base64 encoded PGP signature of the package file
    pub fn base64_sig(&self) -> Option<&'a str> {
        self.entry.single(Field::PgpSig)
    }

    /// Size of the package file
    pub fn download_size(&self) -> Result<Option<u64>> {
        self.number(Field::CSize)
    }

    pub fn size(&self) -> Result<Option<u64>> {
        self.download_size()
    }

    /// Installed size
    pub fn isize(&self) -> Result<Option<u64>> {
        self.number(Field::ISize)
    }

    pub fn builddate(&self) -> Result<Option<SystemTime>> {
        match self.number(Field::BuildDate)? {
            Some(secs) => UNIX_EPOCH
                .checked_add(Duration::from_secs(secs))
                .map(Some)
                .ok_or_else(|| self.malformed(Field::BuildDate, &secs.to_string())),
            None => Ok(None),
        }
    }

    pub fn files(&self) -> &'a [String] {
        self.entry.list(Field::Files)
    }

    pub fn groups(&self) -> &'a [String] {
        self.entry.list(Field::Groups)
    }

    pub fn licenses(&self) -> &'a [String] {
        self.entry.list(Field::License)
    }

    pub fn depends(&self) -> &'a Depends {
        self.entry.relation(Relation::Depends)
    }

    pub fn makedepends(&self) -> &'a Depends {
        self.entry.relation(Relation::MakeDepends)
    }

    pub fn checkdepends(&self) -> &'a Depends {
        self.entry.relation(Relation::CheckDepends)
    }

    pub fn optdepends(&self) -> &'a Depends {
        self.entry.relation(Relation::OptDepends)
    }

    pub fn provides(&self) -> &'a Depends {
        self.entry.relation(Relation::Provides)
    }

    pub fn conflicts(&self) -> &'a Depends {
        self.entry.relation(Relation::Conflicts)
    }

    pub fn replaces(&self) -> &'a Depends {
        self.entry.relation(Relation::Replaces)
    }

    /// The strongest checksum recorded for the package file
    pub fn checksum(&self) -> Result<Option<Checksum>> {
        match (self.sha256sum(), self.md5sum()) {
            (Some(sha256), _) => Checksum::from_sha256_str(sha256)
                .map(Some)
                .map_err(|_| self.malformed(Field::Sha256Sum, sha256)),
            (None, Some(md5)) => Checksum::from_md5_str(md5)
                .map(Some)
                .map_err(|_| self.malformed(Field::Md5Sum, md5)),
            (None, None) => Ok(None),
        }
    }

    /// Names of packages in the same database whose `relation` field names
    /// this package or anything it provides. Version constraints are ignored.
    pub fn compute_rdepends(&self, relation: Relation) -> Vec<&'a str> {
        let provides = self.provides();
        self.db
            .iter()
            .filter(|pkg| {
                let deps = pkg.entry.relation(relation);
                deps.contains_key(self.name()) || provides.keys().any(|p| deps.contains_key(p))
            })
            .map(|pkg| pkg.name())
            .collect()
    }

    pub fn required_by(&self) -> Vec<&'a str> {
        self.compute_rdepends(Relation::Depends)
    }

    pub fn optional_for(&self) -> Vec<&'a str> {
        self.compute_rdepends(Relation::OptDepends)
    }

    fn number(&self, field: Field) -> Result<Option<u64>> {
        self.entry
            .single(field)
            .map(|value| value.parse().map_err(|_| self.malformed(field, value)))
            .transpose()
    }

    fn malformed(&self, field: Field, value: &str) -> DbError {
        DbError::MalformedField {
            package: self.name().to_owned(),
            field,
            value: value.to_owned(),
        }
    }
}

impl PartialEq for Package<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name() && self.version() == other.version()
    }
}

impl PartialOrd for Package<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.name().cmp(other.name()) {
            Ordering::Equal => self.version().partial_cmp(other.version()),
            ord => Some(ord),
        }
    }
}

impl fmt::Display for Package<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.name(), self.version())
    }
}

impl fmt::Debug for Package<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Package({} from {})", self, self.db.name())
    }
}
