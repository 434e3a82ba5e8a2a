//! Named groups of samples, one figure per group

use std::collections::HashMap;

use crate::error::{ExpError, Result};

const CONTEXT: &str = "sample groups";

/// A named set of samples whose values are pooled per gene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleGroup {
    name: String,
    samples: Vec<String>,
}

impl SampleGroup {
    pub fn new(name: impl Into<String>, samples: Vec<String>) -> Self {
        Self {
            name: name.into(),
            samples,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sample identifiers in file order, duplicates included
    pub fn samples(&self) -> &[String] {
        &self.samples
    }
}

/// All sample groups in order of first definition
#[derive(Debug, Clone, Default)]
pub struct SampleGroups {
    groups: Vec<SampleGroup>,
}

impl SampleGroups {
    /// Parse lines of `name<TAB>sample[,sample...]`
    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut groups: Vec<SampleGroup> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for (i, line) in lines.into_iter().enumerate() {
            let line_no = i + 1;
            let line = line.as_ref().trim();
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split('\t');
            let name = fields.next().unwrap_or_default().trim();
            let members = fields.next().ok_or_else(|| {
                ExpError::parse(CONTEXT, line_no, format!("group '{}' has no sample column", name))
            })?;
            let samples: Vec<String> = members
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
            if samples.is_empty() {
                return Err(ExpError::parse(
                    CONTEXT,
                    line_no,
                    format!("group '{}' lists no samples", name),
                ));
            }

            let group = SampleGroup::new(name, samples);
            match positions.get(name) {
                Some(&pos) => {
                    log::warn!("Sample group '{}' defined more than once; the last definition is used", name);
                    groups[pos] = group;
                }
                None => {
                    positions.insert(name.to_string(), groups.len());
                    groups.push(group);
                }
            }
        }

        Ok(Self { groups })
    }

    pub fn iter(&self) -> impl Iterator<Item = &SampleGroup> {
        self.groups.iter()
    }

    pub fn get(&self, name: &str) -> Option<&SampleGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_expansion() {
        let groups = SampleGroups::from_lines(["ctrl\tA,B,C", "single\tX"]).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups.get("ctrl").unwrap().samples(), &["A", "B", "C"]);
        assert_eq!(groups.get("single").unwrap().samples(), &["X"]);
        let names: Vec<&str> = groups.iter().map(|g| g.name()).collect();
        assert_eq!(names, vec!["ctrl", "single"]);
    }

    #[test]
    fn test_missing_second_field() {
        let err = SampleGroups::from_lines(["ok\tA", "", "broken"]).unwrap_err();
        assert!(matches!(err, ExpError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_duplicates_and_order_are_kept() {
        let groups = SampleGroups::from_lines(["g\tB,A,B"]).unwrap();
        assert_eq!(groups.get("g").unwrap().samples(), &["B", "A", "B"]);
    }

    #[test]
    fn test_redefined_group_keeps_position() {
        let groups = SampleGroups::from_lines(["a\tS1", "b\tS2", "a\tS3,S4"]).unwrap();
        let names: Vec<&str> = groups.iter().map(|g| g.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(groups.get("a").unwrap().samples(), &["S3", "S4"]);
    }
}
