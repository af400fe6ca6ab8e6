//! The repository database index.
mod entry;
mod package;

pub use entry::{Field, PackageEntry, Relation};
pub use package::Package;

use crate::{
    config::Config,
    debug,
    error::{DbError, Result},
    types::EpochSeparators,
    utils::{compression::Compression, pacparse},
    warn,
};
use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    fs::File,
    io::{BufReader, Read, Seek},
    path::Path,
};
use tar::Archive;

/// Members of a package directory that carry metadata
const METADATA_FILES: &[&str] = &["/desc", "/depends", "/files"];

/// An immutable index over one repository database.
///
/// Nothing is mutated after construction, so a `Database` can be shared
/// between threads for read-only queries.
pub struct Database {
    name: String,
    url: Option<String>,
    separators: EpochSeparators,
    // In package directory order
    entries: Vec<PackageEntry>,
    by_name: HashMap<String, usize>,
}

impl Database {
    pub fn from_path<P: AsRef<Path>>(name: &str, path: P, config: &Config) -> Result<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            DbError::container(format!("failed to open {}", path.display()), e)
        })?;
        Self::from_reader(name, BufReader::new(f), config)
    }

    /// Read a tar container, optionally compressed with gzip, xz or zstd
    pub fn from_reader<R: Read + Seek>(name: &str, mut reader: R, config: &Config) -> Result<Self> {
        config.apply_verbosity();
        let compression = Compression::sniff(&mut reader)
            .map_err(|e| DbError::container("failed to read container header", e))?;
        debug!("Reading repository database {} ({} compression)", name, compression);
        let mut tar = Archive::new(compression.decoder(reader)?);

        let mut members = Vec::new();
        let entries = tar
            .entries()
            .map_err(|e| DbError::container("failed to read tar archive", e))?;
        for file in entries {
            let mut file = file.map_err(|e| DbError::container("failed to read tar entry", e))?;
            if !file.header().entry_type().is_file() {
                continue;
            }
            let path = String::from_utf8_lossy(&file.path_bytes()).into_owned();
            let mut content = Vec::new();
            file.read_to_end(&mut content)
                .map_err(|e| DbError::container(format!("failed to read {}", path), e))?;
            members.push((path, content));
        }
        debug!("Read {} files from {}", members.len(), name);

        Self::from_entries(name, members, config)
    }

    /// Build the index from container members given as `(path, content)`.
    ///
    /// Members are grouped by their top level directory. Within a directory,
    /// `desc`, `depends` and `files` are concatenated in path order and parsed
    /// as one block.
    pub fn from_entries<I>(name: &str, members: I, config: &Config) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Vec<u8>)>,
    {
        config.apply_verbosity();
        let separators = config.separators();
        let mut packages: BTreeMap<String, Vec<(String, Vec<u8>)>> = BTreeMap::new();
        for (path, content) in members {
            // Directory entries
            if path.ends_with('/') {
                continue;
            }
            let dir = match path.split_once('/') {
                Some((dir, _)) => dir.to_owned(),
                None => path.clone(),
            };
            packages.entry(dir).or_default().push((path, content));
        }

        let mut db = Database {
            name: name.to_owned(),
            url: None,
            separators,
            entries: Vec::with_capacity(packages.len()),
            by_name: HashMap::with_capacity(packages.len()),
        };
        let mut skipped = 0;
        for (dir, mut files) in packages {
            files.sort();
            let mut text = String::new();
            for (path, content) in files {
                if !METADATA_FILES.iter().any(|suffix| path.ends_with(suffix)) {
                    skipped += 1;
                    continue;
                }
                let content = String::from_utf8(content)
                    .map_err(|e| DbError::container(format!("{} is not valid UTF-8", path), e))?;
                text.push_str(&content);
            }

            let fields = pacparse::parse_block(&text);
            let entry = PackageEntry::new(fields, &dir, &db.separators).map_err(|e| {
                debug!("Bad metadata in {}/{}", db.name, dir);
                e
            })?;
            db.insert(entry);
        }
        if skipped > 0 {
            debug!("Skipped {} non-metadata files in {}", skipped, db.name);
        }
        debug!("Loaded {} packages from {}", db.len(), db.name);

        Ok(db)
    }

    fn insert(&mut self, entry: PackageEntry) {
        match self.by_name.get(entry.name()) {
            Some(&pos) => {
                warn!(
                    "Package {} appears more than once in {}, using the last one",
                    entry.name(),
                    self.name
                );
                self.entries[pos] = entry;
            }
            None => {
                self.by_name.insert(entry.name().to_owned(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Record where this database was fetched from
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn separators(&self) -> &EpochSeparators {
        &self.separators
    }

    pub fn get(&self, name: &str) -> Option<Package<'_>> {
        self.by_name
            .get(name)
            .map(|&pos| Package::new(self, &self.entries[pos]))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = Package<'_>> + '_ {
        self.entries.iter().map(move |entry| Package::new(self, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Database {
    type Item = Package<'a>;
    type IntoIter = Box<dyn Iterator<Item = Package<'a>> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Database")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("packages", &self.entries.len())
            .finish()
    }
}
