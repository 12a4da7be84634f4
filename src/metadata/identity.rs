//! Assembly identities as they appear in assembly references.
//!
//! An [`AssemblyIdentity`] is what a module records for every assembly it references,
//! and what an [`crate::metadata::resolver::AssemblyResolver`] receives when asked to
//! materialize one. The simple name doubles as the scope name of type references that
//! point into that assembly (`mscorlib`, `Windows`, ...).
//!
//! # Examples
//!
//! ```rust
//! use cilquery::metadata::identity::{AssemblyIdentity, AssemblyVersion};
//!
//! let mscorlib = AssemblyIdentity::parse(
//!     "mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089",
//! )?;
//! assert_eq!(mscorlib.name, "mscorlib");
//! assert_eq!(mscorlib.version, AssemblyVersion::new(4, 0, 0, 0));
//! assert!(mscorlib.is_culture_neutral());
//! assert!(mscorlib.is_strong_named());
//! # Ok::<(), cilquery::Error>(())
//! ```

use std::fmt::{self, Write};

use crate::Result;

/// Identity of an assembly: simple name, version, culture and public key token.
///
/// Equality and hashing ignore the public key token so that a reference written with and
/// without a token binds to the same assembly.
#[derive(Debug, Clone)]
pub struct AssemblyIdentity {
    /// Simple assembly name (e.g. "mscorlib", "FlaxEngine.CSharp")
    pub name: String,
    /// Four-part version number
    pub version: AssemblyVersion,
    /// Culture of satellite assemblies, `None` when culture-neutral
    pub culture: Option<String>,
    /// 8-byte public key token, in display order
    pub public_key_token: Option<[u8; 8]>,
}

impl PartialEq for AssemblyIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.version == other.version && self.culture == other.culture
    }
}

impl Eq for AssemblyIdentity {}

impl std::hash::Hash for AssemblyIdentity {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.version.hash(state);
        self.culture.hash(state);
    }
}

/// Four-part version numbering for .NET assemblies (major.minor.build.revision).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AssemblyVersion {
    /// Major version component
    pub major: u16,
    /// Minor version component
    pub minor: u16,
    /// Build version component
    pub build: u16,
    /// Revision version component
    pub revision: u16,
}

impl AssemblyIdentity {
    /// Create a culture-neutral identity without a public key token
    ///
    /// ## Arguments
    /// * 'name'    - The simple assembly name
    /// * 'version' - The assembly version
    pub fn new(name: impl Into<String>, version: AssemblyVersion) -> Self {
        AssemblyIdentity {
            name: name.into(),
            version,
            culture: None,
            public_key_token: None,
        }
    }

    /// Parse an identity from a .NET display name.
    ///
    /// ```text
    /// AssemblyName[, Version=Major.Minor.Build.Revision][, Culture=culture][, PublicKeyToken=token]
    /// ```
    ///
    /// Unknown components (e.g. `ProcessorArchitecture`) are ignored.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the name is empty, the version is not a valid
    /// four-part version, or the token is not 16 hex characters.
    pub fn parse(display_name: &str) -> Result<Self> {
        let mut parts = display_name.split(',').map(str::trim);

        let name = parts.next().unwrap_or_default();
        if name.is_empty() {
            return Err(malformed_error!("Assembly name cannot be empty"));
        }

        let mut identity = AssemblyIdentity::new(name, AssemblyVersion::default());
        for part in parts {
            if let Some(value) = part.strip_prefix("Version=") {
                identity.version = AssemblyVersion::parse(value)?;
            } else if let Some(value) = part.strip_prefix("Culture=") {
                if value != "neutral" && !value.is_empty() {
                    identity.culture = Some(value.to_string());
                }
            } else if let Some(value) = part.strip_prefix("PublicKeyToken=") {
                if value != "null" && !value.is_empty() {
                    let bytes = hex::decode(value).map_err(|e| {
                        malformed_error!("Invalid hex in PublicKeyToken '{}': {}", value, e)
                    })?;
                    let token: [u8; 8] = bytes.as_slice().try_into().map_err(|_| {
                        malformed_error!(
                            "PublicKeyToken must be exactly 8 bytes, got {} bytes from '{}'",
                            bytes.len(),
                            value
                        )
                    })?;
                    identity.public_key_token = Some(token);
                }
            }
        }

        Ok(identity)
    }

    /// Generate the .NET display name of this identity
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut result = String::with_capacity(self.name.len() + 80);
        result.push_str(&self.name);

        let _ = write!(result, ", Version={}", self.version);
        let _ = write!(
            result,
            ", Culture={}",
            self.culture.as_deref().unwrap_or("neutral")
        );

        result.push_str(", PublicKeyToken=");
        match &self.public_key_token {
            Some(token) => result.push_str(&hex::encode(token)),
            None => result.push_str("null"),
        }

        result
    }

    /// The simple name, which is also the scope name of references into this assembly
    #[must_use]
    pub fn simple_name(&self) -> &str {
        &self.name
    }

    /// Check if this assembly is strong-named
    #[must_use]
    pub fn is_strong_named(&self) -> bool {
        self.public_key_token.is_some()
    }

    /// Check if this assembly is culture-neutral
    #[must_use]
    pub fn is_culture_neutral(&self) -> bool {
        self.culture.is_none()
    }
}

impl fmt::Display for AssemblyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

impl AssemblyVersion {
    /// Create a new version
    #[must_use]
    pub const fn new(major: u16, minor: u16, build: u16, revision: u16) -> Self {
        AssemblyVersion {
            major,
            minor,
            build,
            revision,
        }
    }

    /// Parse a version from its dotted form; missing trailing components are zero.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for more than four components or a component
    /// that is not a valid `u16`.
    pub fn parse(version_str: &str) -> Result<Self> {
        let parts: Vec<&str> = version_str.split('.').collect();
        if parts.len() > 4 {
            return Err(malformed_error!("Invalid version format: {}", version_str));
        }

        let mut components = [0u16; 4];
        for (i, part) in parts.iter().enumerate() {
            components[i] = part
                .parse::<u16>()
                .map_err(|_| malformed_error!("Invalid version component: {}", part))?;
        }

        Ok(Self::new(
            components[0],
            components[1],
            components[2],
            components[3],
        ))
    }
}

impl fmt::Display for AssemblyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_parse_simple_name() {
        let identity = AssemblyIdentity::parse("FlaxEngine.CSharp").unwrap();
        assert_eq!(identity.name, "FlaxEngine.CSharp");
        assert_eq!(identity.version, AssemblyVersion::default());
        assert!(identity.is_culture_neutral());
        assert!(!identity.is_strong_named());
    }

    #[test]
    fn test_parse_full_display_name() {
        let identity = AssemblyIdentity::parse(
            "System.Core, Version=3.5.0.0, Culture=en-US, PublicKeyToken=b77a5c561934e089, ProcessorArchitecture=MSIL",
        )
        .unwrap();
        assert_eq!(identity.version, AssemblyVersion::new(3, 5, 0, 0));
        assert_eq!(identity.culture.as_deref(), Some("en-US"));
        assert_eq!(
            identity.public_key_token,
            Some([0xb7, 0x7a, 0x5c, 0x56, 0x19, 0x34, 0xe0, 0x89])
        );
    }

    #[test]
    fn test_display_name_roundtrip() {
        let text = "mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089";
        let identity = AssemblyIdentity::parse(text).unwrap();
        assert_eq!(identity.display_name(), text);
        assert_eq!(AssemblyIdentity::parse(&identity.to_string()).unwrap(), identity);
    }

    #[test]
    fn test_equality_ignores_token() {
        let with = AssemblyIdentity::parse("A, Version=1.0.0.0, PublicKeyToken=0011223344556677")
            .unwrap();
        let without = AssemblyIdentity::parse("A, Version=1.0.0.0").unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            AssemblyIdentity::parse(" , Version=1.0"),
            Err(Error::Malformed { .. })
        ));
        assert!(AssemblyIdentity::parse("A, Version=1.0.0.0.0").is_err());
        assert!(AssemblyIdentity::parse("A, Version=1.x").is_err());
        assert!(AssemblyIdentity::parse("A, PublicKeyToken=zz").is_err());
        assert!(AssemblyIdentity::parse("A, PublicKeyToken=0011").is_err());
    }

    #[test]
    fn test_partial_version() {
        assert_eq!(
            AssemblyVersion::parse("2.1").unwrap(),
            AssemblyVersion::new(2, 1, 0, 0)
        );
        assert!(AssemblyVersion::new(2, 0, 0, 0) > AssemblyVersion::new(1, 9, 9, 9));
    }
}
