use crate::error::{Result, VitrinaError};
use crate::profile::directives::{SiteProfile, parse_directive};
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Site profile file parser
#[derive(Debug)]
pub struct ProfileParser;

impl ProfileParser {
    /// Parse a single profile file
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<SiteProfile> {
        let file = std::fs::File::open(&path).map_err(|e| {
            VitrinaError::SiteConfigError(format!("Cannot open file {}: {}", path.as_ref().display(), e))
        })?;

        let reader = BufReader::new(file);
        Self::parse_reader(reader)
    }

    /// Parse a profile from a reader
    pub fn parse_reader<R: BufRead>(reader: R) -> Result<SiteProfile> {
        let mut profile = SiteProfile::new();

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line =
                line.map_err(|e| VitrinaError::SiteConfigError(format!("Read error at line {}: {}", line_number, e)))?;

            Self::apply_line(&mut profile, &line, line_number)?;
        }

        Ok(profile)
    }

    /// Parse a profile from a string
    pub fn parse_string(content: &str) -> Result<SiteProfile> {
        let mut profile = SiteProfile::new();

        for (index, line) in content.lines().enumerate() {
            Self::apply_line(&mut profile, line, index + 1)?;
        }

        Ok(profile)
    }

    fn apply_line(profile: &mut SiteProfile, line: &str, line_number: usize) -> Result<()> {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        match parse_directive(line) {
            Ok(directive) => {
                profile.add_directive(directive);
                Ok(())
            }
            Err(e) => Err(VitrinaError::SiteConfigError(format!(
                "Parse error at line {}: {}",
                line_number, e
            ))),
        }
    }
}
