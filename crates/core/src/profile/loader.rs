use crate::error::{Result, VitrinaError};
use crate::profile::directives::SiteProfile;
use crate::profile::parser::ProfileParser;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Loads per-domain site profiles from disk.
///
/// Profiles are named `<domain>.txt`. The custom directory takes priority
/// over the standard one, and a more specific domain over its parents.
#[derive(Debug, Clone)]
pub struct ProfileLoader {
    /// Custom profile directory path
    custom_dir: Option<PathBuf>,
    /// Standard profile directory path
    standard_dir: Option<PathBuf>,
    /// Profile cache keyed by domain
    cache: HashMap<String, SiteProfile>,
}

impl ProfileLoader {
    /// Create a loader that searches no directories
    pub fn new() -> Self {
        Self { custom_dir: None, standard_dir: None, cache: HashMap::new() }
    }

    /// Load the profile for a product URL
    pub fn load_for_url(&mut self, url: &str) -> Result<SiteProfile> {
        let domain = self.extract_domain(url)?;
        self.load_for_domain(&domain)
    }

    /// Load the profile for a domain, merging every matching file.
    ///
    /// Returns an empty profile when no file matches.
    pub fn load_for_domain(&mut self, domain: &str) -> Result<SiteProfile> {
        if let Some(profile) = self.cache.get(domain) {
            return Ok(profile.clone());
        }

        let mut merged = SiteProfile::new();

        for file_path in self.find_profile_files(domain).iter().rev() {
            match ProfileParser::parse_file(file_path) {
                Ok(profile) => merged.merge(&profile),
                Err(e) => tracing::warn!("Failed to parse site profile {}: {}", file_path.display(), e),
            }
        }

        self.cache.insert(domain.to_string(), merged.clone());

        Ok(merged)
    }

    /// Find all profile files for a domain, highest priority first
    fn find_profile_files(&self, domain: &str) -> Vec<PathBuf> {
        let mut files = Vec::new();
        let names = self.generate_profile_names(domain);

        for dir in [&self.custom_dir, &self.standard_dir].into_iter().flatten() {
            for name in &names {
                let file_path = dir.join(name);
                if file_path.exists() && !files.contains(&file_path) {
                    files.push(file_path);
                }
            }
        }

        files
    }

    /// Generate possible profile file names for a domain, most specific first
    fn generate_profile_names(&self, domain: &str) -> Vec<String> {
        let mut names = vec![format!("{}.txt", domain)];

        let parts: Vec<&str> = domain.split('.').collect();
        for i in 1..parts.len().saturating_sub(1) {
            let parent = parts[i..].join(".");
            if parent.contains('.') {
                names.push(format!("{}.txt", parent));
            }
        }

        names
    }

    /// Extract domain from URL
    fn extract_domain(&self, url: &str) -> Result<String> {
        let url = url::Url::parse(url).map_err(|e| VitrinaError::InvalidUrl(e.to_string()))?;

        let domain = url
            .host_str()
            .ok_or_else(|| VitrinaError::InvalidUrl("No domain found in URL".to_string()))?;

        Ok(domain.to_string())
    }
}

/// Builder for ProfileLoader
#[derive(Debug, Default)]
pub struct ProfileLoaderBuilder {
    custom_dir: Option<PathBuf>,
    standard_dir: Option<PathBuf>,
}

impl ProfileLoaderBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom profile directory
    pub fn custom_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.custom_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set standard profile directory
    pub fn standard_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.standard_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Build the ProfileLoader
    pub fn build(self) -> ProfileLoader {
        ProfileLoader { custom_dir: self.custom_dir, standard_dir: self.standard_dir, cache: HashMap::new() }
    }
}

impl Default for ProfileLoader {
    fn default() -> Self {
        let mut builder = ProfileLoaderBuilder::new();

        if let Some(custom_dir) = Self::default_custom_dir() {
            builder = builder.custom_dir(custom_dir);
        }

        if let Some(standard_dir) = Self::default_standard_dir() {
            builder = builder.standard_dir(standard_dir);
        }

        builder.build()
    }
}

impl ProfileLoader {
    /// Default custom profile directory (`<config dir>/vitrina/sites`)
    fn default_custom_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("vitrina").join("sites"))
    }

    /// Default standard profile directory, shipped next to the binary's working directory
    fn default_standard_dir() -> Option<PathBuf> {
        let std_dir = PathBuf::from("site_profiles");
        if std_dir.exists() { Some(std_dir) } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_generate_profile_names() {
        let loader = ProfileLoader::new();
        let names = loader.generate_profile_names("www.mercadolibre.com.mx");

        assert_eq!(names[0], "www.mercadolibre.com.mx.txt");
        assert!(names.contains(&"mercadolibre.com.mx.txt".to_string()));
        assert!(!names.iter().any(|n| n == "mx.txt"));
    }

    #[test]
    fn test_extract_domain() {
        let loader = ProfileLoader::new();

        assert_eq!(
            loader
                .extract_domain("https://www.mercadolibre.com.mx/laptop/p/MLM21816271")
                .unwrap(),
            "www.mercadolibre.com.mx"
        );
        assert!(loader.extract_domain("not a url").is_err());
    }

    #[test]
    fn test_load_for_domain_without_files() {
        let temp_dir = TempDir::new().unwrap();
        let mut loader = ProfileLoaderBuilder::new().custom_dir(temp_dir.path()).build();

        let profile = loader.load_for_domain("example.com").unwrap();
        assert!(profile.is_empty());
    }

    #[test]
    fn test_load_for_url_prefers_specific_domain() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("mercadolibre.com.ar.txt"),
            "name: h1.parent\nprice: span.parent\n",
        )
        .unwrap();
        fs::write(temp_dir.path().join("www.mercadolibre.com.ar.txt"), "name: h1.specific\n").unwrap();

        let mut loader = ProfileLoaderBuilder::new().custom_dir(temp_dir.path()).build();
        let profile = loader
            .load_for_url("https://www.mercadolibre.com.ar/p/MLA123")
            .unwrap();

        assert_eq!(profile.name.as_deref(), Some("h1.specific"));
        assert_eq!(profile.price.as_deref(), Some("span.parent"));
    }

    #[test]
    fn test_custom_dir_wins_over_standard() {
        let temp_dir = TempDir::new().unwrap();

        let custom_path = temp_dir.path().join("custom");
        fs::create_dir_all(&custom_path).unwrap();
        fs::write(custom_path.join("example.com.txt"), "price: span.custom\n").unwrap();

        let standard_path = temp_dir.path().join("standard");
        fs::create_dir_all(&standard_path).unwrap();
        fs::write(
            standard_path.join("example.com.txt"),
            "price: span.standard\ndescription: p.standard\n",
        )
        .unwrap();

        let mut loader = ProfileLoaderBuilder::new()
            .custom_dir(&custom_path)
            .standard_dir(&standard_path)
            .build();

        let profile = loader.load_for_domain("example.com").unwrap();

        assert_eq!(profile.price.as_deref(), Some("span.custom"));
        assert_eq!(profile.description.as_deref(), Some("p.standard"));
    }

    #[test]
    fn test_profile_caching() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("example.com.txt"), "name: h1\n").unwrap();

        let mut loader = ProfileLoaderBuilder::new().custom_dir(temp_dir.path()).build();

        let first = loader.load_for_domain("example.com").unwrap();
        assert_eq!(loader.cache.len(), 1);

        let second = loader.load_for_domain("example.com").unwrap();
        assert_eq!(first, second);
        assert_eq!(loader.cache.len(), 1);
    }

    #[test]
    fn test_broken_file_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("example.com.txt"), "this is not a directive\n").unwrap();

        let mut loader = ProfileLoaderBuilder::new().custom_dir(temp_dir.path()).build();
        let profile = loader.load_for_domain("example.com").unwrap();

        assert!(profile.is_empty());
    }
}
