use crate::error::ConfigError;
use crate::graph::{Node, NodeKind, Position};
use ahash::AHashMap;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::Path;

/// Nominal node heights, looked up by kind when a node carries no measured height.
///
/// Entries loaded from configuration are merged over the default table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeightTable {
    pub baseline: f64,
    #[serde(deserialize_with = "merge_over_default_kinds")]
    pub kinds: AHashMap<NodeKind, f64>,
}

fn merge_over_default_kinds<'de, D>(deserializer: D) -> Result<AHashMap<NodeKind, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let configured = AHashMap::<NodeKind, f64>::deserialize(deserializer)?;
    let mut kinds = HeightTable::default().kinds;
    kinds.extend(configured);
    Ok(kinds)
}

impl Default for HeightTable {
    fn default() -> Self {
        let kinds = AHashMap::from([
            (NodeKind::Initial, 200.0),
            (NodeKind::Decision, 150.0),
            (NodeKind::TerminalSuccess, 120.0),
            (NodeKind::TerminalFailure, 120.0),
        ]);
        Self {
            baseline: 150.0,
            kinds,
        }
    }
}

impl HeightTable {
    pub fn for_kind(&self, kind: NodeKind) -> f64 {
        self.kinds.get(&kind).copied().unwrap_or(self.baseline)
    }

    pub fn with_height(mut self, kind: NodeKind, height: f64) -> Self {
        self.kinds.insert(kind, height);
        self
    }

    /// Vertical footprint of a node: its measured height, else the table entry.
    ///
    /// A measured height that is negative or not finite is ignored.
    pub fn height_of(&self, node: &Node) -> f64 {
        node.height
            .filter(|h| h.is_finite() && *h >= 0.0)
            .unwrap_or_else(|| self.for_kind(node.kind))
    }
}

/// Tunables of the tree layout.
///
/// ```json
/// { "origin": { "x": 50, "y": 50 }, "horizontalGap": 300, "verticalGap": 20,
///   "heights": { "baseline": 150, "kinds": { "apiNode": 150 } } }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Top-left corner of the root's band.
    pub origin: Position,
    /// Distance between the x of a node and the x of its children.
    pub horizontal_gap: f64,
    /// Space left between the bands of neighbouring siblings.
    pub vertical_gap: f64,
    pub heights: HeightTable,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin: Position::new(50.0, 50.0),
            horizontal_gap: 300.0,
            vertical_gap: 20.0,
            heights: HeightTable::default(),
        }
    }
}

impl LayoutConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: LayoutConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Rejects gaps and heights that would make bands overlap or go undefined.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut dimensions = vec![
            ("horizontalGap".to_string(), self.horizontal_gap),
            ("verticalGap".to_string(), self.vertical_gap),
            ("heights.baseline".to_string(), self.heights.baseline),
        ];
        dimensions.extend(
            self.heights
                .kinds
                .iter()
                .map(|(kind, height)| (format!("heights.kinds.{}", kind), *height)),
        );

        match dimensions
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            Some((name, value)) => Err(ConfigError::InvalidDimension { name, value }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_object_yields_defaults() {
        let config = LayoutConfig::from_json_str("{}").unwrap();
        assert_eq!(config, LayoutConfig::default());
        assert_eq!(config.heights.for_kind(NodeKind::Initial), 200.0);
        assert_eq!(config.heights.for_kind(NodeKind::TerminalFailure), 120.0);
    }

    #[test]
    fn partial_table_keeps_other_defaults() {
        let config = LayoutConfig::from_json_str(
            r#"{ "verticalGap": 40, "heights": { "baseline": 90, "kinds": { "apiNode": 180 } } }"#,
        )
        .unwrap();
        assert_eq!(config.vertical_gap, 40.0);
        assert_eq!(config.horizontal_gap, 300.0);
        assert_eq!(config.heights.baseline, 90.0);
        assert_eq!(config.heights.for_kind(NodeKind::Decision), 180.0);
        assert_eq!(config.heights.for_kind(NodeKind::Initial), 200.0);
        assert_eq!(config.heights.for_kind(NodeKind::TerminalSuccess), 120.0);
    }

    #[test]
    fn missing_kind_falls_back_to_baseline() {
        let mut table = HeightTable::default();
        table.kinds.remove(&NodeKind::Decision);
        assert_eq!(table.for_kind(NodeKind::Decision), 150.0);
    }

    #[test]
    fn measured_height_wins() {
        let table = HeightTable::default();
        let node = Node::new("n", NodeKind::Decision, Position::default());
        assert_eq!(table.height_of(&node), 150.0);
        assert_eq!(table.height_of(&node.clone().with_height(64.0)), 64.0);
    }

    #[test]
    fn unusable_measured_height_uses_table() {
        let table = HeightTable::default();
        let node = Node::new("n", NodeKind::Decision, Position::default());
        for bad in [f64::NAN, f64::INFINITY, -1.0] {
            assert_eq!(table.height_of(&node.clone().with_height(bad)), 150.0);
        }
        assert_eq!(table.height_of(&node.with_height(0.0)), 0.0);
    }

    #[test]
    fn rejects_negative_gap() {
        let err = LayoutConfig::from_json_str(r#"{ "verticalGap": -1 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDimension { ref name, .. } if name == "verticalGap"));
    }

    #[test]
    fn rejects_unknown_kind_key() {
        let err = LayoutConfig::from_json_str(r#"{ "heights": { "kinds": { "bogus": 1 } } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "origin": {{ "x": 0, "y": 10 }} }}"#).unwrap();
        let config = LayoutConfig::from_file(file.path()).unwrap();
        assert_eq!(config.origin, Position::new(0.0, 10.0));

        let missing = LayoutConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }
}
