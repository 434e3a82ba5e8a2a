//! Genes of interest with their display labels

use std::collections::HashMap;

use crate::error::Result;

/// Ordered list of genes to plot
/// Labels default to the identifier; order is first appearance in the input
#[derive(Debug, Clone, Default)]
pub struct GeneList {
    /// Gene identifiers in first-occurrence order
    order: Vec<String>,
    /// Identifier -> display label (last occurrence wins)
    labels: HashMap<String, String>,
}

impl GeneList {
    /// Build a gene list from lines of `id` or `id<TAB>label`
    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = GeneList::default();
        for line in lines {
            let line = line.as_ref().trim();
            if line.is_empty() {
                continue;
            }
            let (id, label) = match line.split_once('\t') {
                Some((id, rest)) => {
                    let id = id.trim();
                    // only the second column is the label
                    let label = rest.split('\t').next().unwrap_or("").trim();
                    (id, if label.is_empty() { id } else { label })
                }
                None => (line, line),
            };
            list.insert(id, label);
        }
        Ok(list)
    }

    fn insert(&mut self, id: &str, label: &str) {
        if self.labels.insert(id.to_string(), label.to_string()).is_some() {
            log::warn!("Gene '{}' listed more than once; using label '{}'", id, label);
        } else {
            self.order.push(id.to_string());
        }
    }

    /// Gene identifiers in plotting order
    pub fn ids(&self) -> &[String] {
        &self.order
    }

    pub fn label(&self, id: &str) -> Option<&str> {
        self.labels.get(id).map(|s| s.as_str())
    }

    /// Label as drawn on the figure: hyphens become primes (F3-H -> F3'H)
    pub fn display_label(&self, id: &str) -> String {
        self.label(id).unwrap_or(id).replace('-', "'")
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_and_labels() {
        let genes = GeneList::from_lines(["GENE1", "GENE2\tMyLabel", "", "GENE3\t"]).unwrap();
        assert_eq!(genes.ids(), &["GENE1", "GENE2", "GENE3"]);
        assert_eq!(genes.label("GENE1"), Some("GENE1"));
        assert_eq!(genes.label("GENE2"), Some("MyLabel"));
        assert_eq!(genes.label("GENE3"), Some("GENE3"));
        assert_eq!(genes.label("missing"), None);
    }

    #[test]
    fn test_duplicates_keep_first_position_last_label() {
        let genes = GeneList::from_lines(["A\tfirst", "B", "A\tsecond"]).unwrap();
        assert_eq!(genes.len(), 2);
        assert_eq!(genes.ids(), &["A", "B"]);
        assert_eq!(genes.label("A"), Some("second"));
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let genes = GeneList::from_lines(["  CHS \r", "\t", "FLS\tFLS_1 "]).unwrap();
        assert_eq!(genes.ids(), &["CHS", "FLS"]);
        assert_eq!(genes.label("FLS"), Some("FLS_1"));
    }

    #[test]
    fn test_display_label() {
        let genes = GeneList::from_lines(["g1\tF3-H", "g2\tMYB_12"]).unwrap();
        assert_eq!(genes.display_label("g1"), "F3'H");
        assert_eq!(genes.display_label("g2"), "MYB_12");
    }
}
