//! Field validation performed before values reach the editor.
//!
//! The editor itself trusts its inputs; these types are the only way the
//! hosting UI turns raw field values into something it accepts.

use crate::error::FormError;
use crate::graph::{NodeData, NodeKind};
use std::str::FromStr;

pub const MIN_FIELD_CHARS: usize = 2;
pub const MAX_FIELD_CHARS: usize = 20;

/// Background choices offered for the initial node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    #[default]
    Blue,
    Green,
    Red,
}

impl Background {
    pub const ALL: [Background; 3] = [Background::Blue, Background::Green, Background::Red];

    pub fn style_class(&self) -> &'static str {
        match self {
            Background::Blue => "bg-blue-200",
            Background::Green => "bg-green-200",
            Background::Red => "bg-red-200",
        }
    }
}

impl FromStr for Background {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blue" | "bg-blue-200" => Ok(Background::Blue),
            "green" | "bg-green-200" => Ok(Background::Green),
            "red" | "bg-red-200" => Ok(Background::Red),
            _ => Err(FormError::InvalidBackground(s.to_string())),
        }
    }
}

/// Raw values of the "insert initial node" form.
#[derive(Debug, Clone, Default)]
pub struct InitialNodeForm {
    pub label: String,
    pub description: String,
    pub background: Background,
}

/// Values of an initial node form that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidInitialNode {
    label: String,
    description: String,
    background: Background,
}

impl ValidInitialNode {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn background(&self) -> Background {
        self.background
    }

    pub fn to_node_data(&self) -> NodeData {
        NodeData {
            label: Some(self.label.clone()),
            description: Some(self.description.clone()),
            style_class: Some(self.background.style_class().to_string()),
        }
    }
}

impl InitialNodeForm {
    pub fn new(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
            background: Background::default(),
        }
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    pub fn validate(self) -> Result<ValidInitialNode, FormError> {
        Ok(ValidInitialNode {
            label: check_length("label", &self.label)?,
            description: check_length("description", &self.description)?,
            background: self.background,
        })
    }
}

/// Raw value of the "new node" form: the wire name of the kind to attach.
#[derive(Debug, Clone)]
pub struct NewNodeForm {
    pub kind: String,
}

impl Default for NewNodeForm {
    fn default() -> Self {
        Self {
            kind: NodeKind::Decision.as_str().to_string(),
        }
    }
}

impl NewNodeForm {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }

    /// Only decision and terminal kinds may be attached; the initial node has its own form.
    pub fn validate(&self) -> Result<NodeKind, FormError> {
        NodeKind::from_str(self.kind.trim())
            .ok()
            .filter(|kind| NodeKind::ATTACHABLE.contains(kind))
            .ok_or_else(|| FormError::InvalidNodeKind(self.kind.clone()))
    }
}

fn check_length(field: &'static str, value: &str) -> Result<String, FormError> {
    let value = value.trim();
    let chars = value.chars().count();
    if chars < MIN_FIELD_CHARS {
        return Err(FormError::TooShort {
            field,
            min: MIN_FIELD_CHARS,
        });
    }
    if chars > MAX_FIELD_CHARS {
        return Err(FormError::TooLong {
            field,
            max: MAX_FIELD_CHARS,
        });
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds() {
        let valid = InitialNodeForm::new("ab", "x".repeat(20))
            .with_background(Background::Red)
            .validate()
            .unwrap();
        assert_eq!(valid.label(), "ab");
        assert_eq!(valid.to_node_data().style_class.as_deref(), Some("bg-red-200"));
    }

    #[test]
    fn rejects_out_of_bounds() {
        assert_eq!(
            InitialNodeForm::new("a", "fine").validate(),
            Err(FormError::TooShort { field: "label", min: 2 })
        );
        assert_eq!(
            InitialNodeForm::new("fine", "y".repeat(21)).validate(),
            Err(FormError::TooLong { field: "description", max: 20 })
        );
        // Whitespace does not count towards the minimum.
        assert!(InitialNodeForm::new(" a ", "fine").validate().is_err());
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert!(InitialNodeForm::new("ação", "descrição").validate().is_ok());
        assert!(InitialNodeForm::new("é".repeat(20), "ok").validate().is_ok());
    }

    #[test]
    fn new_node_kind_must_be_attachable() {
        assert_eq!(NewNodeForm::default().validate(), Ok(NodeKind::Decision));
        assert_eq!(
            NewNodeForm::new("finalFailedNode").validate(),
            Ok(NodeKind::TerminalFailure)
        );
        assert!(matches!(
            NewNodeForm::new("initialNode").validate(),
            Err(FormError::InvalidNodeKind(_))
        ));
        assert!(NewNodeForm::new("finalNode").validate().is_err());
    }

    #[test]
    fn parses_backgrounds() {
        assert_eq!("Green".parse::<Background>(), Ok(Background::Green));
        assert_eq!("bg-red-200".parse::<Background>(), Ok(Background::Red));
        assert!("purple".parse::<Background>().is_err());
    }
}
