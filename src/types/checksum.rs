use md5::Context as Md5;
use sha2::{Digest, Sha256};
use std::{fmt::Display, fs::File, io, io::Read, path::Path};

/// Package file checksums recorded in the database
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Checksum {
    Md5(Vec<u8>),
    Sha256(Vec<u8>),
}

pub enum ChecksumValidator {
    Md5((Vec<u8>, Md5)),
    Sha256((Vec<u8>, Sha256)),
}

impl ChecksumValidator {
    pub fn update(&mut self, data: impl AsRef<[u8]>) {
        match self {
            ChecksumValidator::Md5((_, v)) => v.consume(data),
            ChecksumValidator::Sha256((_, v)) => v.update(data),
        }
    }

    pub fn finish(self) -> bool {
        match self {
            ChecksumValidator::Md5((c, v)) => c == v.compute().0.to_vec(),
            ChecksumValidator::Sha256((c, v)) => c == v.finalize().to_vec(),
        }
    }
}

impl Checksum {
    pub fn from_md5_str(s: &str) -> Result<Self, hex::FromHexError> {
        if s.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        Ok(Checksum::Md5(hex::decode(s)?))
    }

    pub fn from_sha256_str(s: &str) -> Result<Self, hex::FromHexError> {
        if s.len() != 64 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        Ok(Checksum::Sha256(hex::decode(s)?))
    }

    pub fn get_validator(&self) -> ChecksumValidator {
        match self {
            Checksum::Md5(c) => ChecksumValidator::Md5((c.clone(), Md5::new())),
            Checksum::Sha256(c) => ChecksumValidator::Sha256((c.clone(), Sha256::new())),
        }
    }

    pub fn cmp_read(&self, mut r: impl Read) -> io::Result<bool> {
        let mut validator = self.get_validator();
        let mut buf = [0u8; 8192];
        loop {
            let len = r.read(&mut buf)?;
            if len == 0 {
                break;
            }
            validator.update(&buf[..len]);
        }
        Ok(validator.finish())
    }

    pub fn cmp_file(&self, path: &Path) -> io::Result<bool> {
        let file = File::open(path)?;
        self.cmp_read(file)
    }
}

impl Display for Checksum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Checksum::Md5(hex) => {
                f.write_str("md5::")?;
                f.write_str(&hex::encode(hex))
            }
            Checksum::Sha256(hex) => {
                f.write_str("sha256::")?;
                f.write_str(&hex::encode(hex))
            }
        }
    }
}
